//! Recording fakes for the consumed capabilities, shared across unit tests.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;

use crate::autostart::{Autostart, AutostartError};
use crate::config::Config;
use crate::events::ShellEvent;
use crate::hotkey::{HotkeyBackend, HotkeyBinding, HotkeyError, PressEvent, PressStream};
use crate::visibility::PressPolicy;
use crate::window::{Window, WindowBounds};

/// A config that touches neither the environment nor the network.
pub(crate) fn test_config() -> Config {
    Config {
        socket_path: PathBuf::from("/tmp/hotshell-test.sock"),
        data_dir: PathBuf::from("/tmp"),
        hotkey: "Ctrl+Shift+Space".parse().unwrap(),
        press_policy: PressPolicy::Toggle,
        autostart_name: "hotshell".to_string(),
        release_endpoint: "http://127.0.0.1:1/releases/latest".to_string(),
    }
}

/// Everything a fake window was asked to do, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    Show,
    Hide,
    SetPosition(i32, i32),
    SetSize(i32, i32),
    Unminimise,
    Unmaximise,
    Fullscreen,
    Unfullscreen,
    Center,
    Emit(ShellEvent),
}

struct WindowState {
    bounds: WindowBounds,
    screen: WindowBounds,
    minimised: bool,
    maximised: bool,
    fullscreen: bool,
    calls: Vec<Call>,
}

/// In-memory window that records every call and models fullscreen probing:
/// while fullscreen (or maximised) it reports the screen rectangle instead
/// of its normal bounds.
pub(crate) struct FakeWindow {
    state: Mutex<WindowState>,
}

impl FakeWindow {
    pub(crate) fn new(screen: WindowBounds) -> Self {
        Self {
            state: Mutex::new(WindowState {
                bounds: WindowBounds::new(0, 0, 800, 600),
                screen,
                minimised: false,
                maximised: false,
                fullscreen: false,
                calls: Vec::new(),
            }),
        }
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub(crate) fn set_minimised(&self, minimised: bool) {
        self.state.lock().unwrap().minimised = minimised;
    }

    pub(crate) fn set_maximised(&self, maximised: bool) {
        self.state.lock().unwrap().maximised = maximised;
    }

    pub(crate) fn is_fullscreen(&self) -> bool {
        self.state.lock().unwrap().fullscreen
    }
}

impl Window for FakeWindow {
    fn show(&self) {
        self.state.lock().unwrap().calls.push(Call::Show);
    }

    fn hide(&self) {
        self.state.lock().unwrap().calls.push(Call::Hide);
    }

    fn position(&self) -> (i32, i32) {
        let state = self.state.lock().unwrap();
        if state.fullscreen || state.maximised {
            (state.screen.x, state.screen.y)
        } else {
            (state.bounds.x, state.bounds.y)
        }
    }

    fn size(&self) -> (i32, i32) {
        let state = self.state.lock().unwrap();
        if state.fullscreen || state.maximised {
            (state.screen.width, state.screen.height)
        } else {
            (state.bounds.width, state.bounds.height)
        }
    }

    fn set_position(&self, x: i32, y: i32) {
        let mut state = self.state.lock().unwrap();
        state.bounds.x = x;
        state.bounds.y = y;
        state.calls.push(Call::SetPosition(x, y));
    }

    fn set_size(&self, width: i32, height: i32) {
        let mut state = self.state.lock().unwrap();
        state.bounds.width = width;
        state.bounds.height = height;
        state.calls.push(Call::SetSize(width, height));
    }

    fn is_minimised(&self) -> bool {
        self.state.lock().unwrap().minimised
    }

    fn is_maximised(&self) -> bool {
        self.state.lock().unwrap().maximised
    }

    fn unminimise(&self) {
        let mut state = self.state.lock().unwrap();
        state.minimised = false;
        state.calls.push(Call::Unminimise);
    }

    fn unmaximise(&self) {
        let mut state = self.state.lock().unwrap();
        state.maximised = false;
        state.calls.push(Call::Unmaximise);
    }

    fn fullscreen(&self) {
        let mut state = self.state.lock().unwrap();
        state.fullscreen = true;
        state.calls.push(Call::Fullscreen);
    }

    fn unfullscreen(&self) {
        let mut state = self.state.lock().unwrap();
        state.fullscreen = false;
        state.calls.push(Call::Unfullscreen);
    }

    fn center(&self) {
        let mut state = self.state.lock().unwrap();
        let x = state.screen.x + (state.screen.width - state.bounds.width) / 2;
        let y = state.screen.y + (state.screen.height - state.bounds.height) / 2;
        state.bounds.x = x;
        state.bounds.y = y;
        state.calls.push(Call::Center);
    }

    fn emit_event(&self, event: ShellEvent) {
        self.state.lock().unwrap().calls.push(Call::Emit(event));
    }
}

struct BackendState {
    registrations: u32,
    unregistrations: u32,
    fail_register: bool,
    fail_unregister: bool,
    binding: Option<HotkeyBinding>,
    tx: Option<mpsc::Sender<PressEvent>>,
}

/// Scriptable hotkey capability: counts register/unregister calls, can fail
/// on demand, and lets a test inject presses into the live stream.
#[derive(Clone)]
pub(crate) struct FakeBackend {
    state: Arc<Mutex<BackendState>>,
}

impl FakeBackend {
    pub(crate) fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(BackendState {
                registrations: 0,
                unregistrations: 0,
                fail_register: false,
                fail_unregister: false,
                binding: None,
                tx: None,
            })),
        }
    }

    pub(crate) fn registrations(&self) -> u32 {
        self.state.lock().unwrap().registrations
    }

    pub(crate) fn unregistrations(&self) -> u32 {
        self.state.lock().unwrap().unregistrations
    }

    pub(crate) fn fail_next_register(&self) {
        self.state.lock().unwrap().fail_register = true;
    }

    pub(crate) fn fail_next_unregister(&self) {
        self.state.lock().unwrap().fail_unregister = true;
    }

    /// Deliver a press on the active registration's stream.
    pub(crate) fn press(&self) {
        let state = self.state.lock().unwrap();
        let tx = state.tx.as_ref().expect("no active registration").clone();
        let binding = state.binding.expect("no active registration");
        tx.try_send(PressEvent { binding }).expect("press stream full");
    }
}

impl HotkeyBackend for FakeBackend {
    fn register(&mut self, binding: HotkeyBinding) -> Result<PressStream, HotkeyError> {
        let mut state = self.state.lock().unwrap();
        if state.fail_register {
            state.fail_register = false;
            return Err(HotkeyError::Register("grab refused".to_string()));
        }
        state.registrations += 1;
        let (tx, rx) = mpsc::channel(32);
        state.tx = Some(tx);
        state.binding = Some(binding);
        Ok(rx)
    }

    fn unregister(&mut self) -> Result<(), HotkeyError> {
        let mut state = self.state.lock().unwrap();
        if state.fail_unregister {
            state.fail_unregister = false;
            // The stream stays open: a failed release leaves the grab dangling
            return Err(HotkeyError::Unregister("release refused".to_string()));
        }
        state.unregistrations += 1;
        state.tx = None;
        state.binding = None;
        Ok(())
    }
}

struct AutostartState {
    enabled: bool,
    enable_calls: u32,
    disable_calls: u32,
}

/// In-memory autostart registration.
pub(crate) struct FakeAutostart {
    state: Mutex<AutostartState>,
}

impl FakeAutostart {
    pub(crate) fn new(enabled: bool) -> Self {
        Self {
            state: Mutex::new(AutostartState {
                enabled,
                enable_calls: 0,
                disable_calls: 0,
            }),
        }
    }

    pub(crate) fn enable_calls(&self) -> u32 {
        self.state.lock().unwrap().enable_calls
    }

    pub(crate) fn disable_calls(&self) -> u32 {
        self.state.lock().unwrap().disable_calls
    }
}

impl Autostart for FakeAutostart {
    fn is_enabled(&self) -> bool {
        self.state.lock().unwrap().enabled
    }

    fn enable(&self) -> Result<(), AutostartError> {
        let mut state = self.state.lock().unwrap();
        state.enable_calls += 1;
        state.enabled = true;
        Ok(())
    }

    fn disable(&self) -> Result<(), AutostartError> {
        let mut state = self.state.lock().unwrap();
        state.disable_calls += 1;
        state.enabled = false;
        Ok(())
    }
}
