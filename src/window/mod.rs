//! Window collaborator abstraction
//!
//! The GUI toolkit owns the actual window; the shell drives it through this
//! capability trait. Event emission rides on the same collaborator because
//! the toolkit is also the transport to the front-end.

mod bounds;

pub use bounds::{WindowBounds, WindowBoundsManager};

use crate::events::ShellEvent;

/// Operations the embedding window toolkit must provide.
pub trait Window: Send + Sync + 'static {
    /// Make the window visible.
    fn show(&self);

    /// Hide the window.
    fn hide(&self);

    /// Current top-left corner in screen coordinates.
    fn position(&self) -> (i32, i32);

    /// Current width and height.
    fn size(&self) -> (i32, i32);

    /// Move the window.
    fn set_position(&self, x: i32, y: i32);

    /// Resize the window.
    fn set_size(&self, width: i32, height: i32);

    /// Whether the window is currently minimised.
    fn is_minimised(&self) -> bool;

    /// Whether the window is currently maximised.
    fn is_maximised(&self) -> bool;

    /// Restore from the minimised state.
    fn unminimise(&self);

    /// Restore from the maximised state.
    fn unmaximise(&self);

    /// Enter fullscreen.
    fn fullscreen(&self);

    /// Leave fullscreen.
    fn unfullscreen(&self);

    /// Center the window on the current screen.
    fn center(&self);

    /// Deliver an event to the front-end.
    fn emit_event(&self, event: ShellEvent);
}
