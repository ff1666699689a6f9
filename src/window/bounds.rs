//! Window geometry capture and restore
//!
//! Captures bounds right before the window closes so the persistence layer
//! can re-apply them on the next start, and clamps re-applied bounds so the
//! window never comes back off-screen.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::events::ShellEvent;
use crate::window::Window;

/// Window position and size in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowBounds {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl WindowBounds {
    /// Construct from the four coordinates.
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The `[x, y, w, h]` form used in the save-bounds event payload.
    pub fn as_array(&self) -> [i32; 4] {
        [self.x, self.y, self.width, self.height]
    }

    /// Whether a point lies inside this rectangle.
    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        x >= self.x && y >= self.y && x < self.x + self.width && y < self.y + self.height
    }
}

/// Captures, re-applies, and clamps window geometry.
pub struct WindowBoundsManager<W: Window> {
    window: Arc<W>,
}

impl<W: Window> WindowBoundsManager<W> {
    /// Create a manager over the window collaborator.
    pub fn new(window: Arc<W>) -> Self {
        Self { window }
    }

    /// Capture the window geometry and emit it for persistence.
    ///
    /// Minimised and maximised states are both restored first, in that
    /// order; a maximised window that was just unminimised can report a
    /// transient state otherwise. Returns whether the close should be
    /// prevented — always `false`, since event delivery is asynchronous
    /// and holding the window open would not make it observable.
    pub fn capture_before_close(&self) -> bool {
        if self.window.is_minimised() {
            self.window.unminimise();
        }
        if self.window.is_maximised() {
            self.window.unmaximise();
        }

        let (x, y) = self.window.position();
        let (width, height) = self.window.size();
        info!(x, y, width, height, "saving window bounds before close");

        self.window.emit_event(ShellEvent::SaveBounds {
            bounds: [x, y, width, height],
        });

        false
    }

    /// Apply persisted bounds, recentring if the position is off-screen.
    pub fn set_window_bounds(&self, bounds: WindowBounds) {
        self.window.set_position(bounds.x, bounds.y);
        self.window.set_size(bounds.width, bounds.height);

        let screen = self.probe_screen_bounds();
        debug!(?screen, "detected screen bounds");

        if !screen.contains_point(bounds.x, bounds.y) {
            info!(x = bounds.x, y = bounds.y, "window position is off-screen, recentring");
            self.window.center();
        }
    }

    /// Learn the current screen's bounds through the window itself.
    ///
    /// The toolkit exposes no direct screen query, so the window briefly
    /// enters fullscreen (which snaps it to the screen rectangle), gets
    /// measured, and is restored. The visible flicker is the accepted cost.
    fn probe_screen_bounds(&self) -> WindowBounds {
        self.window.fullscreen();
        let (x, y) = self.window.position();
        let (width, height) = self.window.size();
        self.window.unfullscreen();
        WindowBounds::new(x, y, width, height)
    }
}
