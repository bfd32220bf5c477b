// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Command tree and dispatcher.
//!
//! Commands form a forest: each top-level [`CommandNode`] may own nested
//! subcommands. An input line is split on whitespace and resolved to the
//! deepest matching command; the tokens left over are passed verbatim to
//! that command's handler.
//!
//! # Available Commands
//!
//! | Command | Arguments | Purpose |
//! |---------|-----------|---------|
//! | `help` | `[command...]` | List commands or show usage |
//! | `status` | | Show modes and current outputs |
//! | `stop` | | Save state and exit |
//! | `casemode` | `<off\|static\|fade>` | Set the case LED mode |
//! | `casecolor` | `<color>` | Set the static case color |
//! | `fadelist` | | List the fade colors |
//! | `fade add` | `<color>` | Append a fade color |
//! | `fade remove` | `<index>` | Remove a fade color |
//! | `fade clear` | | Remove every fade color |
//! | `fade ticks` | `[ticks]` | Show or set ticks per transition |
//! | `fade save`/`load`/`delete` | `<name>` | Manage saved fades |
//! | `fade saved` | | List saved fades |
//! | `lcd mode` | `<off\|static\|clock>` | Set the LCD mode |
//! | `lcd color` | `<color>` | Set the LCD backlight color |
//! | `lcd text` | `<row> [text...]` | Set one LCD row |
//! | `lcd clear` | | Blank the LCD text |
//!
//! A `<color>` is either three channel values (`255 128 0`), a hex string
//! (`#ff8000`, `ff8000`, `#f80`, `0xff8000`) or a color name (`orange`).
//!
//! # Examples
//!
//! ```
//! use casectl::command::{CommandContext, default_registry};
//! use casectl::scheduler::ModeScheduler;
//! use casectl::state::SharedState;
//!
//! let registry = default_registry();
//! let state = SharedState::default();
//! let scheduler = ModeScheduler::new(state.clone());
//! let mut ctx = CommandContext::new(&registry, &state, &scheduler);
//!
//! ctx.execute("fade add 255 0 0").unwrap();
//! ctx.execute("fade add blue").unwrap();
//! ctx.take_output();
//!
//! ctx.execute("fadelist").unwrap();
//! assert_eq!(ctx.take_output(), ["0 - (255, 0, 0)", "1 - (0, 0, 255)"]);
//! ```

mod case;
mod context;
mod general;
mod lcd;
mod node;
mod registry;

use std::fmt;
use std::str::FromStr;

pub use context::{CommandContext, Console};
pub use node::{Arity, CommandNode, CommandNodeBuilder, Handler};
pub use registry::{CommandRegistry, Resolved, UNKNOWN_COMMAND_HINT};

use crate::error::ValueError;

/// Builds the registry with every controller command.
#[must_use]
pub fn default_registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    for node in general::commands()
        .into_iter()
        .chain(case::commands())
        .chain(lcd::commands())
    {
        registry.register(node);
    }
    registry
}

/// Parses a numeric argument.
fn parse_number<T: FromStr>(arg: &str) -> Result<T, ValueError> {
    arg.parse()
        .map_err(|_| ValueError::NotANumber(arg.to_string()))
}

/// Prints why arguments were rejected and reports them as malformed.
fn reject(ctx: &mut CommandContext<'_>, error: &impl fmt::Display) -> bool {
    ctx.say(format!("Error: {error}"));
    false
}
