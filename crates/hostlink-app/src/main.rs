// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Hostlink demo shell.
//
// Entry point. Initialises logging and config, starts the host listener, and
// drives a bridge through its lifecycle: mock mode first (as in a plain
// browser), then host mode once the shell pushes its protocol.
//
// Usage: hostlink [config.json]

mod shell;

use std::sync::{Arc, Mutex};

use serde_json::json;

use hostlink_bridge::{Bridge, ChannelTransport, mock};
use hostlink_core::error::{HostlinkError, Result};
use hostlink_core::types::{Endpoint, HostCall};
use hostlink_core::BridgeConfig;
use hostlink_host::{HostListener, MessageHandler};

/// Protocol used when the config does not name one.
const DEFAULT_PROTOCOL: &str = "hostlink";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => BridgeConfig::load(&path)?,
        None => BridgeConfig::default(),
    };
    tracing::info!(?config, "Hostlink starting");

    let endpoint =
        Endpoint::from_protocol(config.protocol.as_deref().unwrap_or(DEFAULT_PROTOCOL));

    // -- Native side --
    let handler = Arc::new(MessageHandler::with_config(
        endpoint.clone(),
        shell::host_commands()?,
        &config,
    ));
    let (transport, rx) = ChannelTransport::channel();
    let listener = HostListener::new(Arc::clone(&handler)).spawn(rx);

    // -- Web side --
    let bridge = Arc::new(Mutex::new(Bridge::with_config(config, Arc::new(transport))));
    {
        let mut web = bridge.lock().expect("bridge lock poisoned");
        web.set_mock_controller(mock::command_table(Arc::new(shell::ConsoleMock))?)?;
        web.send_command(mock::LOAD_COMPLETE_COMMAND, &[]);
        web.report_error("demo error raised in mock mode", 1, 1);
    }

    // Page loaded inside the shell: the host switches the bridge over.
    {
        let mut web = bridge.lock().expect("bridge lock poisoned");
        web.apply_host_call(HostCall::SetProtocol {
            protocol: endpoint.to_string(),
        })?;
        web.apply_host_call(HostCall::SetAppData {
            key: "user".into(),
            json: json!({"name": "demo", "locale": "en"}).to_string(),
        })?;
        web.send_command(mock::LOAD_COMPLETE_COMMAND, &[]);
    }

    let web = Arc::clone(&bridge);
    let user = handler
        .request_value("app_data.user", move |call| {
            web.lock().expect("bridge lock poisoned").apply_host_call(call)
        })
        .await?;
    tracing::info!(%user, "host read application data from the web view");

    let bridge = Arc::try_unwrap(bridge)
        .map_err(|_| HostlinkError::Transport("bridge still shared".into()))?
        .into_inner()
        .expect("bridge lock poisoned");
    bridge.teardown();

    let stats = listener
        .await
        .map_err(|e| HostlinkError::Transport(format!("listener task: {e}")))?;
    tracing::info!(handled = stats.handled, rejected = stats.rejected, "Hostlink stopped");
    Ok(())
}
