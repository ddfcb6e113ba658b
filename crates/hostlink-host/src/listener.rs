// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Async loop that drains addresses from the web layer's transport channel.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::handler::MessageHandler;

/// Counters reported when the listener stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListenerStats {
    pub handled: usize,
    pub rejected: usize,
}

/// Feeds every received address to a [`MessageHandler`].
#[derive(Debug, Clone)]
pub struct HostListener {
    handler: Arc<MessageHandler>,
}

impl HostListener {
    pub fn new(handler: Arc<MessageHandler>) -> Self {
        Self { handler }
    }

    /// Run until every sender of `rx` has been dropped.
    pub async fn run(self, mut rx: mpsc::UnboundedReceiver<String>) -> ListenerStats {
        info!(endpoint = %self.handler.endpoint(), "host listener started");
        let mut stats = ListenerStats::default();

        while let Some(address) = rx.recv().await {
            debug!(%address, "received");
            if self.handler.handle(&address) {
                stats.handled += 1;
            } else {
                stats.rejected += 1;
            }
        }

        info!(
            handled = stats.handled,
            rejected = stats.rejected,
            "host listener stopped"
        );
        stats
    }

    /// Spawn [`run`](Self::run) onto the current tokio runtime.
    pub fn spawn(
        self,
        rx: mpsc::UnboundedReceiver<String>,
    ) -> tokio::task::JoinHandle<ListenerStats> {
        tokio::spawn(self.run(rx))
    }
}
