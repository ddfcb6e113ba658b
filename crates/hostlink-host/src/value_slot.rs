// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Single-value mailbox for `get_value_from_js` answers.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use serde_json::Value;
use tokio::sync::Notify;

use hostlink_core::error::{HostlinkError, Result};

#[derive(Default)]
struct SlotInner {
    value: Mutex<Option<Value>>,
    notify: Notify,
}

/// Holds the latest value sent back by the web layer until someone takes it.
#[derive(Clone, Default)]
pub struct ValueSlot {
    inner: Arc<SlotInner>,
}

impl ValueSlot {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Option<Value>> {
        self.inner
            .value
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Store a value, replacing any unread one, and wake a waiter.
    pub fn put(&self, value: Value) {
        *self.lock() = Some(value);
        self.inner.notify.notify_one();
    }

    pub fn take(&self) -> Option<Value> {
        self.lock().take()
    }

    /// Wait until a value is available and take it.
    ///
    /// `what` names the requested property in the timeout error.
    pub async fn wait(&self, what: &str, timeout: Duration) -> Result<Value> {
        let wait = async {
            loop {
                if let Some(value) = self.take() {
                    return value;
                }
                self.inner.notify.notified().await;
            }
        };
        tokio::time::timeout(timeout, wait)
            .await
            .map_err(|_| HostlinkError::Timeout(format!("value of {what:?}")))
    }
}

impl std::fmt::Debug for ValueSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValueSlot")
            .field("value", &*self.lock())
            .finish()
    }
}
