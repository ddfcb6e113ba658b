// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Typed mock host.
//
// `MockHost` is the fixed capability set the bridge's own commands need from
// a stand-in host. Implementing it and calling `command_table` yields a
// `CommandTable` that can be registered as the bridge's mock controller;
// extra app-specific commands can be added to that table afterwards.

use std::sync::Arc;

use hostlink_core::error::{HostlinkError, Result};
use hostlink_core::types::{GET_VALUE_COMMAND, WEB_ERROR_COMMAND};

use crate::commands::CommandTable;

/// Command the UI sends once its first view is ready.
pub const LOAD_COMPLETE_COMMAND: &str = "load_complete";

/// Host-side capabilities a browser-only mock has to provide.
pub trait MockHost: Send + Sync + 'static {
    /// A UI-side fault. `location` carries line/column detail.
    fn web_error(&self, message: &str, location: &str) -> Result<()>;

    /// The UI finished loading.
    fn load_complete(&self) -> Result<()>;

    /// Answer to a host value request.
    fn get_value_from_js(&self, value: &str) -> Result<()> {
        tracing::debug!(value, "mock host received value");
        Ok(())
    }
}

/// Names a `MockHost`-backed table always provides.
pub const MOCK_HOST_COMMANDS: [&str; 3] =
    [WEB_ERROR_COMMAND, LOAD_COMPLETE_COMMAND, GET_VALUE_COMMAND];

fn require_args(command: &str, args: &[String], count: usize) -> Result<()> {
    if args.len() < count {
        return Err(HostlinkError::Dispatch(format!(
            "{command} expects {count} argument(s), got {}",
            args.len()
        )));
    }
    Ok(())
}

/// Wrap `host` in a command table keyed by the [`MOCK_HOST_COMMANDS`] names.
pub fn command_table<H: MockHost>(host: Arc<H>) -> Result<CommandTable> {
    let mut table = CommandTable::new();

    let h = Arc::clone(&host);
    table.register(WEB_ERROR_COMMAND, move |args| {
        require_args(WEB_ERROR_COMMAND, args, 2)?;
        h.web_error(&args[0], &args[1])
    })?;

    let h = Arc::clone(&host);
    table.register(LOAD_COMPLETE_COMMAND, move |_args| h.load_complete())?;

    table.register(GET_VALUE_COMMAND, move |args| {
        require_args(GET_VALUE_COMMAND, args, 1)?;
        host.get_value_from_js(&args[0])
    })?;

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        calls: Mutex<Vec<String>>,
    }

    impl MockHost for Recorder {
        fn web_error(&self, message: &str, location: &str) -> Result<()> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("web_error:{message}:{location}"));
            Ok(())
        }

        fn load_complete(&self) -> Result<()> {
            self.calls.lock().unwrap().push("load_complete".into());
            Ok(())
        }
    }

    #[test]
    fn table_exposes_every_capability() {
        let table = command_table(Arc::new(Recorder::default())).unwrap();
        for name in MOCK_HOST_COMMANDS {
            assert!(table.contains(name), "missing {name}");
        }
    }

    #[test]
    fn handlers_forward_to_host() {
        let host = Arc::new(Recorder::default());
        let table = command_table(Arc::clone(&host)).unwrap();

        table
            .invoke("web_error", &["boom".into(), "line: 3".into()])
            .unwrap();
        table.invoke("load_complete", &[]).unwrap();
        table.invoke("get_value_from_js", &["en".into()]).unwrap();

        assert_eq!(
            *host.calls.lock().unwrap(),
            vec!["web_error:boom:line: 3".to_string(), "load_complete".to_string()]
        );
    }

    #[test]
    fn too_few_args_is_dispatch_error() {
        let table = command_table(Arc::new(Recorder::default())).unwrap();
        let err = table.invoke("web_error", &["only one".into()]).unwrap_err();
        assert!(matches!(err, HostlinkError::Dispatch(_)));
    }
}
