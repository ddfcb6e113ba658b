// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Host commands and the browser-only mock used by the demo shell.

use hostlink_bridge::MockHost;
use hostlink_core::error::Result;
use hostlink_core::types::WEB_ERROR_COMMAND;
use hostlink_host::{HostCommands, HostMessage};
use tracing::{info, warn};

/// Mock host used before the native shell has pushed its protocol.
pub struct ConsoleMock;

impl MockHost for ConsoleMock {
    fn web_error(&self, message: &str, location: &str) -> Result<()> {
        warn!(message, location, "mock: web error");
        Ok(())
    }

    fn load_complete(&self) -> Result<()> {
        info!("mock: load complete");
        Ok(())
    }
}

fn log_web_error(msg: &HostMessage) -> Result<()> {
    warn!(
        message = %msg.arg_text(0).unwrap_or_default(),
        location = %msg.arg_text(1).unwrap_or_default(),
        "host: web error"
    );
    Ok(())
}

fn log_load_complete(msg: &HostMessage) -> Result<()> {
    info!(at = %msg.received_at, "host: load complete");
    Ok(())
}

/// Commands the native side of the demo understands.
pub fn host_commands() -> Result<HostCommands> {
    HostCommands::new()
        .with(WEB_ERROR_COMMAND, log_web_error)?
        .with("load_complete", log_load_complete)
}
