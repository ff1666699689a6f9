//! Window visibility toggling
//!
//! One consumption loop per active hotkey registration: it reads press
//! events until the stream closes and reacts according to the configured
//! press policy. Stream closure is the cancellation signal, not an error.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::events::ShellEvent;
use crate::hotkey::PressStream;
use crate::window::Window;

/// What a hotkey press does.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PressPolicy {
    /// Flip the visibility flag and show/hide the window directly.
    #[default]
    Toggle,
    /// Forward a `hotkey-press` event and let the front-end decide.
    Notify,
}

/// Consumes press events and drives window visibility.
pub struct VisibilityToggler<W: Window> {
    window: Arc<W>,
    visible: Arc<AtomicBool>,
    policy: PressPolicy,
}

impl<W: Window> VisibilityToggler<W> {
    /// Create a toggler sharing the process-wide visibility flag.
    pub fn new(window: Arc<W>, visible: Arc<AtomicBool>, policy: PressPolicy) -> Self {
        Self {
            window,
            visible,
            policy,
        }
    }

    /// Consume presses until the stream closes.
    ///
    /// The loop exits silently when `recv` returns `None`: that means the
    /// registration was deliberately torn down, and anything buffered before
    /// the close has already been drained here, never in a successor loop.
    pub async fn run(self, mut presses: PressStream) {
        while let Some(press) = presses.recv().await {
            debug!(binding = %press.binding, "hotkey pressed");
            match self.policy {
                PressPolicy::Toggle => {
                    // fetch_xor returns the previous value; the flag holds the new one
                    let shown = !self.visible.fetch_xor(true, Ordering::SeqCst);
                    if shown {
                        self.window.show();
                    } else {
                        self.window.hide();
                    }
                }
                PressPolicy::Notify => {
                    self.window.emit_event(ShellEvent::HotkeyPress);
                }
            }
        }
        debug!("press stream closed, visibility loop exiting");
    }
}
