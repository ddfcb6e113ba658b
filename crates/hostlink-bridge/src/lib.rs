// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

//! Hostlink — web-side bridge.
//!
//! UI code talks to the native shell through a single [`Bridge`]. Commands
//! are encoded as `<endpoint><command>?<arg>&<arg>` addresses and handed to a
//! [`HostTransport`] when an endpoint is set; without one, they are routed to
//! an in-process mock controller ([`CommandTable`]) so the UI can run in a
//! plain browser or a test harness.

pub mod address;
pub mod bridge;
pub mod commands;
pub mod escape;
pub mod mock;
pub mod property;
pub mod transport;

pub use bridge::Bridge;
pub use commands::{CommandHandler, CommandTable};
pub use mock::MockHost;
pub use property::{HostProperty, PropertyTable};
pub use transport::{ChannelTransport, HostTransport, RecordingTransport};
