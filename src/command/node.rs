// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Command tree nodes and their builder.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use super::CommandContext;

/// Function run when a command is resolved.
///
/// Receives the residual arguments verbatim and returns `false` when they
/// are malformed. A handler that returns `false` must not have changed any
/// state.
pub type Handler = Arc<dyn Fn(&mut CommandContext<'_>, &[String]) -> bool + Send + Sync>;

/// Number of residual arguments a command accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly this many arguments.
    Exact(usize),
    /// Any number of arguments; the handler validates them.
    Variable,
}

impl Arity {
    /// Returns `true` if `count` arguments are acceptable.
    #[must_use]
    pub const fn accepts(self, count: usize) -> bool {
        match self {
            Self::Exact(expected) => expected == count,
            Self::Variable => true,
        }
    }
}

/// A named command with optional subcommands.
///
/// Nodes are immutable once built; the tree is fixed at registration time.
#[derive(Clone)]
pub struct CommandNode {
    name: String,
    arity: Arity,
    arg_desc: String,
    full_desc: String,
    handler: Option<Handler>,
    /// Keyed by lowercase name.
    children: BTreeMap<String, CommandNode>,
}

impl CommandNode {
    /// Starts building a command called `name`.
    ///
    /// # Examples
    ///
    /// ```
    /// use casectl::command::{Arity, CommandNode};
    ///
    /// let node = CommandNode::builder("fadelist")
    ///     .arity(Arity::Exact(0))
    ///     .description("List the fade colors")
    ///     .handler(|_, _| true)
    ///     .build();
    ///
    /// assert_eq!(node.name(), "fadelist");
    /// assert!(!node.has_children());
    /// ```
    #[must_use]
    pub fn builder(name: impl Into<String>) -> CommandNodeBuilder {
        CommandNodeBuilder::new(name)
    }

    /// Returns the command name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the accepted argument count.
    #[must_use]
    pub fn arity(&self) -> Arity {
        self.arity
    }

    /// Returns the argument description, e.g. `<off|static|fade>`.
    #[must_use]
    pub fn arg_desc(&self) -> &str {
        &self.arg_desc
    }

    /// Returns the human-readable description.
    #[must_use]
    pub fn full_desc(&self) -> &str {
        &self.full_desc
    }

    /// Looks up a direct subcommand, ignoring case.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&CommandNode> {
        self.children.get(&name.to_lowercase())
    }

    /// Iterates over direct subcommands in name order.
    pub fn children(&self) -> impl Iterator<Item = &CommandNode> {
        self.children.values()
    }

    /// Returns `true` if this command has subcommands.
    #[must_use]
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// One-line summary: name, arguments and description.
    #[must_use]
    pub fn summary(&self) -> String {
        let mut line = self.name.clone();
        if !self.arg_desc.is_empty() {
            line.push(' ');
            line.push_str(&self.arg_desc);
        }
        if !self.full_desc.is_empty() {
            line.push_str(" - ");
            line.push_str(&self.full_desc);
        }
        line
    }

    /// Runs the handler. Group nodes without a handler always fail so the
    /// dispatcher lists their subcommands.
    pub(crate) fn execute(&self, ctx: &mut CommandContext<'_>, args: &[String]) -> bool {
        match &self.handler {
            Some(handler) => handler(ctx, args),
            None => false,
        }
    }
}

impl fmt::Debug for CommandNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandNode")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .field("arg_desc", &self.arg_desc)
            .field("has_handler", &self.handler.is_some())
            .field("children", &self.children.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Builder for [`CommandNode`].
///
/// Defaults to `Arity::Variable`, no descriptions, no handler and no
/// subcommands.
#[must_use]
pub struct CommandNodeBuilder {
    node: CommandNode,
}

impl CommandNodeBuilder {
    fn new(name: impl Into<String>) -> Self {
        Self {
            node: CommandNode {
                name: name.into(),
                arity: Arity::Variable,
                arg_desc: String::new(),
                full_desc: String::new(),
                handler: None,
                children: BTreeMap::new(),
            },
        }
    }

    /// Sets the accepted argument count.
    pub fn arity(mut self, arity: Arity) -> Self {
        self.node.arity = arity;
        self
    }

    /// Sets the argument description shown in usage text.
    pub fn args(mut self, arg_desc: impl Into<String>) -> Self {
        self.node.arg_desc = arg_desc.into();
        self
    }

    /// Sets the description shown in help.
    pub fn description(mut self, full_desc: impl Into<String>) -> Self {
        self.node.full_desc = full_desc.into();
        self
    }

    /// Sets the function run when this command is invoked.
    pub fn handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&mut CommandContext<'_>, &[String]) -> bool + Send + Sync + 'static,
    {
        self.node.handler = Some(Arc::new(handler));
        self
    }

    /// Adds a subcommand. A subcommand with the same name is replaced.
    pub fn subcommand(mut self, child: CommandNode) -> Self {
        let key = child.name.to_lowercase();
        if self.node.children.insert(key, child).is_some() {
            tracing::warn!(parent = %self.node.name, "Duplicate subcommand replaced");
        }
        self
    }

    /// Finishes the node.
    #[must_use]
    pub fn build(self) -> CommandNode {
        self.node
    }
}
