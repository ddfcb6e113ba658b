// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Hostlink.

use thiserror::Error;

/// Top-level error type for all Hostlink operations.
#[derive(Debug, Error)]
pub enum HostlinkError {
    // -- Application data --
    #[error("malformed JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to encode argument: {0}")]
    Encode(String),

    // -- Dispatch --
    #[error("dispatch failed: {0}")]
    Dispatch(String),

    #[error("command handler failed: {0}")]
    Handler(String),

    #[error("invalid command name: {0:?}")]
    InvalidCommandName(String),

    #[error("mock controller is missing required commands: {}", .0.join(", "))]
    MissingCommands(Vec<String>),

    #[error("unknown property: {0}")]
    UnknownProperty(String),

    // -- Transport --
    #[error("host transport error: {0}")]
    Transport(String),

    #[error("failed to decode host message: {0}")]
    Decode(String),

    #[error("timed out waiting for {0}")]
    Timeout(String),

    // -- Configuration --
    #[error("configuration error: {0}")]
    Config(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl HostlinkError {
    /// Shorthand for handler implementations reporting a failure.
    pub fn handler(msg: impl Into<String>) -> Self {
        Self::Handler(msg.into())
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, HostlinkError>;
