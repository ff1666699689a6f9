//! Autostart registration
//!
//! The OS-specific startup-shortcut mechanism is a consumed capability;
//! the shell only decides *whether* a transition is needed. A shortcut is
//! keyed by the executable path plus a display name.

use std::path::PathBuf;

/// Errors from the autostart capability.
#[derive(Debug, thiserror::Error)]
pub enum AutostartError {
    #[error("failed to resolve current executable: {0}")]
    Executable(#[from] std::io::Error),

    #[error("failed to update startup entry: {0}")]
    Registration(String),
}

/// Identity of the startup entry: display name + executable to launch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupShortcut {
    pub name: String,
    pub exec: PathBuf,
}

impl StartupShortcut {
    /// Shortcut pointing at the running executable.
    pub fn for_current_exe(name: impl Into<String>) -> Result<Self, AutostartError> {
        Ok(Self {
            name: name.into(),
            exec: std::env::current_exe()?,
        })
    }
}

/// The OS startup-registration capability.
pub trait Autostart: Send + Sync {
    /// Whether a startup entry currently exists.
    fn is_enabled(&self) -> bool;

    /// Install the startup entry.
    fn enable(&self) -> Result<(), AutostartError>;

    /// Remove the startup entry.
    fn disable(&self) -> Result<(), AutostartError>;
}

/// Bring the registration to the requested state, skipping redundant work.
pub fn set_enabled<A: Autostart + ?Sized>(autostart: &A, enable: bool) -> Result<(), AutostartError> {
    if autostart.is_enabled() == enable {
        return Ok(());
    }
    if enable {
        autostart.enable()
    } else {
        autostart.disable()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::FakeAutostart;

    #[test]
    fn test_set_enabled_is_idempotent() {
        let autostart = FakeAutostart::new(true);

        set_enabled(&autostart, true).unwrap();

        assert_eq!(autostart.enable_calls(), 0);
        assert_eq!(autostart.disable_calls(), 0);
        assert!(autostart.is_enabled());
    }

    #[test]
    fn test_set_enabled_transitions_when_needed() {
        let autostart = FakeAutostart::new(false);

        set_enabled(&autostart, true).unwrap();
        assert_eq!(autostart.enable_calls(), 1);
        assert!(autostart.is_enabled());

        set_enabled(&autostart, false).unwrap();
        assert_eq!(autostart.disable_calls(), 1);
        assert!(!autostart.is_enabled());
    }

    #[test]
    fn test_shortcut_for_current_exe() {
        let shortcut = StartupShortcut::for_current_exe("hotshell").unwrap();
        assert_eq!(shortcut.name, "hotshell");
        assert!(shortcut.exec.is_absolute());
    }
}
