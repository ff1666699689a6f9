//! Control-surface message protocol
//!
//! All messages are JSON-encoded, prefixed with a 4-byte little-endian length.
//! The requests mirror the shell's method surface so an out-of-process
//! front-end can drive it.

use serde::{Deserialize, Serialize};

use crate::update::UpdateInfo;

/// Requests from the front-end to the shell.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Request {
    /// Ping to check connectivity
    Ping,

    /// Request current shell status
    GetStatus,

    /// List the modifier and key names a binding may use
    ListKeys,

    /// Register (or replace) the global hotkey
    SetHotkey { modifiers: Vec<String>, key: String },

    /// Drop the global hotkey
    ClearHotkey,

    /// Query the autostart registration
    GetAutostart,

    /// Install or remove the autostart registration
    SetAutostart { enabled: bool },

    /// Run the best-effort update check
    CheckUpdate,

    /// Re-apply persisted window bounds
    SetBounds { x: i32, y: i32, width: i32, height: i32 },

    /// The window is about to close; capture bounds and decide
    BeforeClose,
}

/// Responses from the shell to the front-end.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Response {
    /// Pong response to ping
    Pong,

    /// Current shell status
    Status(ShellStatus),

    /// Binding catalogs for a picker UI
    Keys {
        modifiers: Vec<String>,
        keys: Vec<String>,
    },

    /// Request applied, nothing to report
    Ack,

    /// Autostart registration state
    Autostart { enabled: bool },

    /// Update check outcome; `None` means nothing to report
    Update { update: Option<UpdateInfo> },

    /// Whether the close should be prevented
    CloseDecision { prevent: bool },

    /// Error response
    Error { code: String, message: String },
}

/// Full shell status snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShellStatus {
    /// Shell version
    pub version: String,

    /// Display form of the registered binding, if any
    pub hotkey: Option<String>,

    /// Current visibility flag
    pub visible: bool,

    /// Uptime in seconds
    pub uptime_secs: u64,
}

impl Default for ShellStatus {
    fn default() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            hotkey: None,
            visible: true,
            uptime_secs: 0,
        }
    }
}
