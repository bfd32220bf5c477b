// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `casectl` - An interactive controller for case LEDs and an LCD panel.
//!
//! Two outputs are driven continuously from user commands: the case LEDs
//! and a 20x4 character LCD with a backlight. Each output runs a swappable
//! mode that is ticked periodically, and the controller state survives
//! restarts.
//!
//! # Supported Features
//!
//! - **Case modes**: Off, Static color, Fade through a color list
//! - **LCD modes**: Off, Static text with backlight color, big-digit Clock
//! - **Fade presets**: Save, load and delete named fade color lists
//! - **Command tree**: Nested, case-insensitive commands with built-in help
//! - **Persistence**: Versioned JSON data file, saved after every command
//!
//! # Architecture
//!
//! | Module | Role |
//! |--------|------|
//! | [`types`] | Value types: colors, tick counts, LCD text |
//! | [`mode`] | Case and LCD mode variants |
//! | [`state`] | The shared application state |
//! | [`scheduler`] | Periodic per-channel mode drivers |
//! | [`command`] | Command tree, dispatcher and command set |
//! | [`persistence`] | Versioned schema, data file and background saves |
//! | [`transport`] | Output sink seam and transport task |
//!
//! # Quick Start
//!
//! ```no_run
//! use casectl::{Controller, ControllerConfig, TracingTransport};
//!
//! #[tokio::main]
//! async fn main() -> std::io::Result<()> {
//!     let config = ControllerConfig::new("/dev/ttyUSB0");
//!     let controller = Controller::start(config, TracingTransport::new("/dev/ttyUSB0"));
//!
//!     for line in ["casemode fade", "fade add red", "fade add blue"] {
//!         let outcome = controller.execute_line(line);
//!         for printed in outcome.output {
//!             println!("{printed}");
//!         }
//!     }
//!
//!     controller.shutdown().await;
//!     Ok(())
//! }
//! ```

pub mod command;
pub mod config;
mod controller;
pub mod error;
pub mod mode;
pub mod persistence;
pub mod scheduler;
pub mod state;
pub mod transport;
pub mod types;

pub use command::{CommandRegistry, default_registry};
pub use config::ControllerConfig;
pub use controller::{CommandOutcome, Controller, LOAD_FAILED_NOTICE};
pub use error::{
    CommandError, Error, PersistenceError, Result, SchedulerError, TransportError, ValueError,
};
pub use mode::{CaseMode, Channel, LcdMode};
pub use scheduler::ModeScheduler;
pub use state::{ApplicationState, OutputFrame, SharedState};
pub use transport::{TracingTransport, Transport};
pub use types::{Color, FadeTicks, LcdText};
