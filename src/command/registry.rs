// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Top-level command registry and dispatcher.

use std::collections::BTreeMap;

use crate::error::CommandError;

use super::{CommandContext, CommandNode};

/// Hint printed for an unrecognized top-level command.
pub const UNKNOWN_COMMAND_HINT: &str = "That was not a valid command. Maybe try 'help'.";

/// A command resolved from a token sequence.
#[derive(Debug, Clone, Copy)]
pub struct Resolved<'r, 't> {
    /// The deepest matching command.
    pub command: &'r CommandNode,
    /// Names of the commands walked to reach it, root first.
    path: &'t [String],
    /// Tokens left after resolution, verbatim.
    pub args: &'t [String],
}

impl Resolved<'_, '_> {
    /// Returns the matched command path as typed, e.g. `fade add`.
    #[must_use]
    pub fn path(&self) -> String {
        self.path.join(" ")
    }

    /// Returns the number of tokens consumed as command names.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.path.len()
    }
}

/// The forest of top-level commands.
///
/// # Examples
///
/// ```
/// use casectl::command::{Arity, CommandNode, CommandRegistry};
///
/// let mut registry = CommandRegistry::new();
/// registry.register(
///     CommandNode::builder("lcd")
///         .subcommand(CommandNode::builder("mode").arity(Arity::Exact(1)).build())
///         .build(),
/// );
///
/// let tokens: Vec<String> = ["LCD", "mode", "clock"].map(String::from).into();
/// let resolved = registry.resolve(&tokens).unwrap();
/// assert_eq!(resolved.command.name(), "mode");
/// assert_eq!(resolved.args, ["clock"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    /// Keyed by lowercase name.
    roots: BTreeMap<String, CommandNode>,
}

impl CommandRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a top-level command. A command with the same name is
    /// replaced.
    pub fn register(&mut self, node: CommandNode) {
        let key = node.name().to_lowercase();
        if self.roots.insert(key, node).is_some() {
            tracing::warn!("Duplicate top-level command replaced");
        }
    }

    /// Looks up a top-level command, ignoring case.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&CommandNode> {
        self.roots.get(&name.to_lowercase())
    }

    /// Iterates over top-level commands in name order.
    pub fn commands(&self) -> impl Iterator<Item = &CommandNode> {
        self.roots.values()
    }

    /// Resolves `tokens` to the deepest matching command.
    ///
    /// The first token names a top-level command. Each following token that
    /// names a subcommand of the current command is consumed; resolution
    /// stops at the first token that does not. Everything left over is
    /// returned verbatim as arguments.
    ///
    /// # Errors
    ///
    /// Returns `CommandError::UnknownCommand` if `tokens` is empty or its
    /// first token names no top-level command.
    pub fn resolve<'r, 't>(
        &'r self,
        tokens: &'t [String],
    ) -> Result<Resolved<'r, 't>, CommandError> {
        let Some(first) = tokens.first() else {
            return Err(CommandError::UnknownCommand(String::new()));
        };
        let mut command = self
            .get(first)
            .ok_or_else(|| CommandError::UnknownCommand(first.clone()))?;

        let mut depth = 1;
        while let Some(child) = tokens.get(depth).and_then(|token| command.child(token)) {
            command = child;
            depth += 1;
        }

        Ok(Resolved {
            command,
            path: &tokens[..depth],
            args: &tokens[depth..],
        })
    }

    /// Tokenizes `line`, resolves it and runs the command.
    ///
    /// A blank line does nothing. On failure the reason is printed to the
    /// context's console: the unknown-command hint, or the resolved
    /// command's subcommands or usage text.
    ///
    /// # Errors
    ///
    /// Returns `CommandError::UnknownCommand` for an unrecognized command and
    /// `CommandError::MalformedArguments` when the argument count does not
    /// match or the command rejects its arguments.
    pub fn dispatch(&self, ctx: &mut CommandContext<'_>, line: &str) -> Result<(), CommandError> {
        let tokens: Vec<String> = line.split_whitespace().map(str::to_owned).collect();
        if tokens.is_empty() {
            return Ok(());
        }

        let resolved = match self.resolve(&tokens) {
            Ok(resolved) => resolved,
            Err(e) => {
                tracing::debug!(error = %e, "Command resolution failed");
                ctx.say(UNKNOWN_COMMAND_HINT);
                return Err(e);
            }
        };

        let command = resolved.command;
        let path = resolved.path();
        tracing::debug!(command = %path, args = resolved.args.len(), "Dispatching command");

        if command.arity().accepts(resolved.args.len()) && command.execute(ctx, resolved.args) {
            return Ok(());
        }

        tracing::debug!(command = %path, "Malformed arguments");
        print_fallback(ctx, command, &path);
        Err(CommandError::MalformedArguments { command: path })
    }
}

/// Prints the subcommand list of a group, or the usage of a leaf command.
pub(crate) fn print_fallback(ctx: &mut CommandContext<'_>, command: &CommandNode, path: &str) {
    if command.has_children() {
        ctx.say("Available subcommands:");
        for child in command.children() {
            ctx.say(format!("  {}", child.summary()));
        }
    } else {
        if command.arg_desc().is_empty() {
            ctx.say(format!("Usage: {path}"));
        } else {
            ctx.say(format!("Usage: {path} {}", command.arg_desc()));
        }
        if !command.full_desc().is_empty() {
            ctx.say(format!("  {}", command.full_desc()));
        }
    }
}
