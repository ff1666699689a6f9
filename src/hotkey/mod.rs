//! Global hotkey handling
//!
//! Binding data model, the OS grab capability with its press stream, and
//! the controller that keeps exactly one registration (and one consumption
//! loop) alive at a time.

mod controller;
mod keys;
mod listener;

pub use controller::HotkeyController;
pub use keys::{BindingParseError, HotkeyBinding, KeyCode, Modifier, ModifierSet};
pub use listener::{GlobalHotkeyBackend, HotkeyBackend, HotkeyError, PressEvent, PressStream};
