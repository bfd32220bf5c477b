// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! State persistence.
//!
//! - [`PersistedState`] is the versioned schema written to disk.
//! - [`StateStore`] reads and atomically rewrites the data file.
//! - [`PersistenceWorker`] saves snapshots in the background.
//!
//! Loading never fails the process: a missing, unreadable, corrupt or
//! incompatible file yields the default state, with a warning for
//! everything but a missing file.

mod schema;
mod store;
mod worker;

pub use schema::{
    CaseModeTag, CaseRecord, LcdModeTag, LcdRecord, PersistedState, SCHEMA_VERSION,
};
pub use store::{LoadOutcome, StateStore};
pub use worker::PersistenceWorker;
