//! Shell composition root
//!
//! Bundles the hotkey controller, bounds manager, autostart capability, and
//! update checker behind the method surface the embedding application (or
//! the IPC control surface) calls.

use std::sync::Arc;

use crate::autostart::{self, Autostart, AutostartError};
use crate::config::Config;
use crate::hotkey::{HotkeyBackend, HotkeyBinding, HotkeyController, HotkeyError};
use crate::update::{UpdateChecker, UpdateInfo};
use crate::window::{Window, WindowBounds, WindowBoundsManager};

/// The hotkey-driven window shell.
pub struct Shell<B: HotkeyBackend, W: Window, A: Autostart> {
    controller: HotkeyController<B, W>,
    bounds: WindowBoundsManager<W>,
    autostart: A,
    updater: UpdateChecker,
}

impl<B: HotkeyBackend, W: Window, A: Autostart> Shell<B, W, A> {
    /// Assemble the shell around the window collaborator.
    pub fn new(backend: B, window: Arc<W>, autostart: A, config: &Config) -> Self {
        Self {
            controller: HotkeyController::new(backend, Arc::clone(&window), config.press_policy),
            bounds: WindowBoundsManager::new(window),
            autostart,
            updater: UpdateChecker::new(config.release_endpoint.clone()),
        }
    }

    /// Register (or replace) the global show/hide hotkey.
    pub async fn set_toggle_hotkey(&mut self, binding: HotkeyBinding) -> Result<(), HotkeyError> {
        self.controller.set_hotkey(binding).await
    }

    /// Drop the global hotkey, e.g. during shutdown.
    pub async fn clear_toggle_hotkey(&mut self) -> Result<(), HotkeyError> {
        self.controller.clear_hotkey().await
    }

    /// The currently registered binding, if any.
    pub fn active_hotkey(&self) -> Option<HotkeyBinding> {
        self.controller.active_binding()
    }

    /// Whether the window is currently considered visible.
    pub fn is_visible(&self) -> bool {
        self.controller.is_visible()
    }

    /// Whether an autostart entry is installed.
    pub fn autostart_enabled(&self) -> bool {
        self.autostart.is_enabled()
    }

    /// Install or remove the autostart entry; no-op when already in state.
    pub fn set_autostart_enabled(&self, enabled: bool) -> Result<(), AutostartError> {
        autostart::set_enabled(&self.autostart, enabled)
    }

    /// Best-effort update check.
    pub fn check_for_update(&self) -> Option<UpdateInfo> {
        self.updater.check_for_update()
    }

    /// A checker clone, so the blocking fetch can run off the caller's lock.
    pub fn update_checker(&self) -> UpdateChecker {
        self.updater.clone()
    }

    /// Re-apply persisted window bounds, recentring when off-screen.
    pub fn set_window_bounds(&self, bounds: WindowBounds) {
        self.bounds.set_window_bounds(bounds);
    }

    /// Capture and emit bounds ahead of a close; returns whether to prevent it.
    pub fn capture_before_close(&self) -> bool {
        self.bounds.capture_before_close()
    }
}
