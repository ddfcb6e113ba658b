// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Host transports: where built addresses go when the bridge is in host mode.
//
// Delivery is one-way and at-most-once. `dispatch` must return without
// waiting for the host to act on the message.

use std::sync::Mutex;

use tokio::sync::mpsc;

use hostlink_core::error::{HostlinkError, Result};

/// Endpoint that receives outbound bridge calls.
pub trait HostTransport: Send + Sync {
    /// Hand one address to the host. Must not block.
    fn dispatch(&self, address: &str) -> Result<()>;

    /// Release transport resources. Called once from `Bridge::teardown`.
    fn close(&self) {}
}

/// Transport that pushes addresses into an unbounded tokio channel.
///
/// The receiving half is drained by the host shell (see `hostlink-host`).
#[derive(Debug, Clone)]
pub struct ChannelTransport {
    tx: mpsc::UnboundedSender<String>,
}

impl ChannelTransport {
    /// Create a transport and the receiver the host reads from.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl HostTransport for ChannelTransport {
    fn dispatch(&self, address: &str) -> Result<()> {
        self.tx
            .send(address.to_string())
            .map_err(|_| HostlinkError::Transport("host receiver dropped".into()))
    }
}

/// Transport that keeps every address in memory.
///
/// Useful for UI development without a host and for asserting on the exact
/// bytes a command produces.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<String>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Addresses dispatched so far, oldest first.
    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().map(|sent| sent.clone()).unwrap_or_default()
    }

    /// Most recent address, if any.
    pub fn last(&self) -> Option<String> {
        self.sent.lock().ok().and_then(|sent| sent.last().cloned())
    }
}

impl HostTransport for RecordingTransport {
    fn dispatch(&self, address: &str) -> Result<()> {
        self.sent
            .lock()
            .map_err(|_| HostlinkError::Transport("recording lock poisoned".into()))?
            .push(address.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_delivers_in_order() {
        let (transport, mut rx) = ChannelTransport::channel();
        transport.dispatch("app://a").unwrap();
        transport.dispatch("app://b").unwrap();
        assert_eq!(rx.try_recv().unwrap(), "app://a");
        assert_eq!(rx.try_recv().unwrap(), "app://b");
    }

    #[test]
    fn channel_without_receiver_fails() {
        let (transport, rx) = ChannelTransport::channel();
        drop(rx);
        let err = transport.dispatch("app://a").unwrap_err();
        assert!(matches!(err, HostlinkError::Transport(_)));
    }

    #[test]
    fn recording_keeps_history() {
        let transport = RecordingTransport::new();
        assert!(transport.last().is_none());
        transport.dispatch("x://one").unwrap();
        transport.dispatch("x://two").unwrap();
        assert_eq!(transport.sent(), vec!["x://one", "x://two"]);
        assert_eq!(transport.last().as_deref(), Some("x://two"));
    }
}
