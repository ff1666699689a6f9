//! hotshell: hotkey-driven window visibility core for desktop shells
//!
//! The embedding GUI shell supplies a window (behind [`window::Window`]) and
//! gets back:
//! - A global show/hide hotkey with safe re-registration
//!   ([`hotkey::HotkeyController`])
//! - Window bounds capture/restore with off-screen recovery
//!   ([`window::WindowBoundsManager`])
//! - Autostart registration kept in sync ([`autostart`])
//! - A best-effort update check ([`update::UpdateChecker`])
//!
//! [`shell::Shell`] bundles these behind one method surface, and the
//! unix-only [`ipc::Server`] exposes that surface to an out-of-process
//! front-end over a Unix domain socket.

pub mod autostart;
pub mod config;
pub mod events;
pub mod hotkey;
#[cfg(unix)]
pub mod ipc;
pub mod lifecycle;
pub mod shell;
pub mod update;
pub mod visibility;
pub mod window;

#[cfg(test)]
pub(crate) mod testutil;

pub use crate::config::Config;
pub use crate::events::ShellEvent;
pub use crate::hotkey::{
    GlobalHotkeyBackend, HotkeyBackend, HotkeyBinding, HotkeyController, HotkeyError, KeyCode,
    Modifier, ModifierSet,
};
pub use crate::shell::Shell;
pub use crate::update::{UpdateChecker, UpdateInfo};
pub use crate::visibility::{PressPolicy, VisibilityToggler};
pub use crate::window::{Window, WindowBounds, WindowBoundsManager};
