//! Events the shell emits toward the front-end
//!
//! The window collaborator transports these to the UI layer; the names and
//! payloads are part of the front-end contract.

use serde::{Deserialize, Serialize};

/// Events emitted through the window collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ShellEvent {
    /// Window geometry captured right before the window closes.
    /// Payload is `[x, y, w, h]` in screen coordinates.
    SaveBounds {
        /// Position and size of the restored (non-minimised, non-maximised) window
        bounds: [i32; 4],
    },

    /// The global hotkey was pressed (notify policy only; under the toggle
    /// policy the shell flips visibility itself instead).
    HotkeyPress,
}

impl ShellEvent {
    /// Event name as the front-end subscribes to it.
    pub fn name(&self) -> &'static str {
        match self {
            ShellEvent::SaveBounds { .. } => "save-bounds",
            ShellEvent::HotkeyPress => "hotkey-press",
        }
    }
}

impl std::fmt::Display for ShellEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShellEvent::SaveBounds { bounds } => {
                write!(f, "save-bounds {:?}", bounds)
            }
            ShellEvent::HotkeyPress => write!(f, "hotkey-press"),
        }
    }
}
