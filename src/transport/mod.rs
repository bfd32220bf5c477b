// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Output transport.
//!
//! A [`Transport`] delivers [`OutputFrame`]s to the hardware. The transport
//! task polls the shared state on a fixed interval and hands every changed
//! frame to the transport; unchanged frames are not resent.

mod task;

pub use task::{TransportHandle, spawn};

use crate::error::TransportError;
use crate::state::OutputFrame;

/// Sink for computed outputs.
///
/// `send` is called from the transport task, never while the state lock is
/// held.
pub trait Transport {
    /// Delivers one frame.
    ///
    /// # Errors
    ///
    /// Returns `TransportError::Closed` when the sink is gone for good; the
    /// transport task then stops.
    fn send(&mut self, frame: &OutputFrame) -> Result<(), TransportError>;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send(&mut self, frame: &OutputFrame) -> Result<(), TransportError> {
        (**self).send(frame)
    }
}

/// Transport that logs each frame instead of writing it to a device.
#[derive(Debug, Clone)]
pub struct TracingTransport {
    port: String,
    frames: u64,
}

impl TracingTransport {
    /// Creates a transport for the named serial port.
    #[must_use]
    pub fn new(port: impl Into<String>) -> Self {
        Self {
            port: port.into(),
            frames: 0,
        }
    }

    /// Returns the serial port name.
    #[must_use]
    pub fn port(&self) -> &str {
        &self.port
    }

    /// Returns the number of frames sent.
    #[must_use]
    pub fn frames_sent(&self) -> u64 {
        self.frames
    }
}

impl Transport for TracingTransport {
    fn send(&mut self, frame: &OutputFrame) -> Result<(), TransportError> {
        self.frames += 1;
        tracing::debug!(
            port = %self.port,
            case = %frame.case_color.to_hex(),
            lcd = %frame.lcd_color.to_hex(),
            text = ?frame.lcd_text.rows(),
            "Output frame"
        );
        Ok(())
    }
}
