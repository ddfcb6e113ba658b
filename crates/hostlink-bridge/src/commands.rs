// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command table: name -> handler, registered ahead of time and looked up by
// exact name at dispatch. This is what a mock controller is.

use std::collections::BTreeMap;
use std::sync::Arc;

use hostlink_core::error::{HostlinkError, Result};
use hostlink_core::types::validate_command_name;

/// Handler for one command. Arguments arrive as text, exactly as a real host
/// would receive them off the wire.
pub type CommandHandler = Arc<dyn Fn(&[String]) -> Result<()> + Send + Sync>;

/// Named handlers, keyed by dotted command path (`web_error`, `ui.set_view`).
#[derive(Clone, Default)]
pub struct CommandTable {
    handlers: BTreeMap<String, CommandHandler>,
}

impl CommandTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` under `name`, replacing any previous handler.
    ///
    /// Fails with `InvalidCommandName` if the name is not a dotted
    /// identifier path.
    pub fn register<F>(&mut self, name: &str, handler: F) -> Result<&mut Self>
    where
        F: Fn(&[String]) -> Result<()> + Send + Sync + 'static,
    {
        validate_command_name(name)?;
        self.handlers.insert(name.to_string(), Arc::new(handler));
        Ok(self)
    }

    /// Builder form of [`register`](Self::register).
    pub fn with<F>(mut self, name: &str, handler: F) -> Result<Self>
    where
        F: Fn(&[String]) -> Result<()> + Send + Sync + 'static,
    {
        self.register(name, handler)?;
        Ok(self)
    }

    pub fn resolve(&self, name: &str) -> Option<&CommandHandler> {
        self.handlers.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Names from `required` that this table does not provide.
    pub fn missing(&self, required: &[String]) -> Vec<String> {
        required
            .iter()
            .filter(|name| !self.contains(name))
            .cloned()
            .collect()
    }

    /// Look up `name` and call it.
    ///
    /// An unknown name is a `Dispatch` error; whatever the handler returns is
    /// passed through.
    pub fn invoke(&self, name: &str, args: &[String]) -> Result<()> {
        let handler = self
            .resolve(name)
            .ok_or_else(|| HostlinkError::Dispatch(format!("no handler for {name:?}")))?;
        handler(args)
    }
}

impl std::fmt::Debug for CommandTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandTable")
            .field("commands", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn register_and_invoke() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let table = CommandTable::new()
            .with("foo", move |args| {
                sink.lock().unwrap().extend_from_slice(args);
                Ok(())
            })
            .unwrap();

        table.invoke("foo", &["bar".to_string()]).unwrap();
        assert_eq!(*seen.lock().unwrap(), vec!["bar".to_string()]);
    }

    #[test]
    fn unknown_name_is_dispatch_error() {
        let table = CommandTable::new();
        let err = table.invoke("missing", &[]).unwrap_err();
        assert!(matches!(err, HostlinkError::Dispatch(_)));
    }

    #[test]
    fn invalid_names_are_rejected_at_registration() {
        let mut table = CommandTable::new();
        let err = table.register("ui/view", |_| Ok(())).err().unwrap();
        assert!(matches!(err, HostlinkError::InvalidCommandName(_)));
        assert!(table.is_empty());
    }

    #[test]
    fn missing_reports_unprovided_names() {
        let table = CommandTable::new()
            .with("web_error", |_| Ok(()))
            .unwrap();
        let required = vec!["web_error".to_string(), "load_complete".to_string()];
        assert_eq!(table.missing(&required), vec!["load_complete".to_string()]);
    }

    #[test]
    fn debug_lists_names() {
        let table = CommandTable::new().with("b", |_| Ok(())).unwrap().with("a", |_| Ok(())).unwrap();
        assert_eq!(format!("{table:?}"), r#"CommandTable { commands: ["a", "b"] }"#);
    }
}
