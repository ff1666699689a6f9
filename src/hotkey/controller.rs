//! Hotkey registration orchestration
//!
//! Owns the single active registration slot and the consumption task bound
//! to it. Replacing the binding tears the old registration down completely
//! (stream closed, loop exited) before the new one is brought up, so two
//! loops never run at once and the visibility flag has a single writer.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::keys::HotkeyBinding;
use super::listener::{HotkeyBackend, HotkeyError};
use crate::visibility::{PressPolicy, VisibilityToggler};
use crate::window::Window;

/// Orchestrates the single active hotkey registration.
pub struct HotkeyController<B: HotkeyBackend, W: Window> {
    backend: B,
    window: Arc<W>,
    policy: PressPolicy,
    visible: Arc<AtomicBool>,
    active: Option<ActiveHotkey>,
}

/// The active registration: its binding and the loop consuming its stream.
struct ActiveHotkey {
    binding: HotkeyBinding,
    consumer: JoinHandle<()>,
}

impl<B: HotkeyBackend, W: Window> HotkeyController<B, W> {
    /// Create a controller; the window starts out visible.
    pub fn new(backend: B, window: Arc<W>, policy: PressPolicy) -> Self {
        Self {
            backend,
            window,
            policy,
            visible: Arc::new(AtomicBool::new(true)),
            active: None,
        }
    }

    /// Replace the active hotkey with `binding`.
    ///
    /// The previous registration (if any) is unregistered first and its
    /// consumption loop awaited, so the new loop starts only after the old
    /// one has exited. On any error the active slot is left empty; a failed
    /// unregistration still clears the slot because the old grab cannot be
    /// trusted afterwards, and leaving it in place would wedge every retry.
    pub async fn set_hotkey(&mut self, binding: HotkeyBinding) -> Result<(), HotkeyError> {
        self.teardown_active().await?;

        let stream = self.backend.register(binding)?;
        info!(binding = %binding, "hotkey registered");

        let toggler = VisibilityToggler::new(
            Arc::clone(&self.window),
            Arc::clone(&self.visible),
            self.policy,
        );
        let consumer = tokio::spawn(toggler.run(stream));

        self.active = Some(ActiveHotkey { binding, consumer });
        Ok(())
    }

    /// Unregister the active hotkey without installing a replacement.
    pub async fn clear_hotkey(&mut self) -> Result<(), HotkeyError> {
        self.teardown_active().await
    }

    /// The currently registered binding, if any.
    pub fn active_binding(&self) -> Option<HotkeyBinding> {
        self.active.as_ref().map(|a| a.binding)
    }

    /// Current value of the visibility flag.
    pub fn is_visible(&self) -> bool {
        self.visible.load(Ordering::SeqCst)
    }

    async fn teardown_active(&mut self) -> Result<(), HotkeyError> {
        // Take the slot before anything fallible runs: no path leaves a
        // stale listener behind.
        let Some(active) = self.active.take() else {
            return Ok(());
        };

        debug!(binding = %active.binding, "unregistering previous hotkey");
        if let Err(err) = self.backend.unregister() {
            warn!(binding = %active.binding, %err, "unregistration failed, dropping stale loop");
            active.consumer.abort();
            return Err(err);
        }

        // The stream is closed now; the loop drains what it already had and
        // exits. Waiting here keeps listener generations from overlapping.
        let _ = active.consumer.await;
        debug!(binding = %active.binding, "previous hotkey torn down");
        Ok(())
    }
}
