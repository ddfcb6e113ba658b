// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Hostlink — native-shell side of the bridge.
//
// Decodes the addresses the web layer sends, routes them to host commands,
// and implements the host's "ask the web view for a value" round trip.

pub mod handler;
pub mod listener;
pub mod message;
pub mod value_slot;

pub use handler::{HostCommands, HostHandler, MessageHandler};
pub use listener::{HostListener, ListenerStats};
pub use message::HostMessage;
pub use value_slot::ValueSlot;
