//! Global hotkey registration and press delivery
//!
//! The OS-level grab is a consumed capability behind [`HotkeyBackend`]:
//! registering a binding yields a stream of press events, and unregistering
//! closes that stream. [`GlobalHotkeyBackend`] adapts the `global-hotkey`
//! crate, forwarding its process-global event channel into a per-registration
//! stream on a dedicated thread.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use global_hotkey::hotkey::{Code, HotKey, Modifiers};
use global_hotkey::{GlobalHotKeyEvent, GlobalHotKeyManager, HotKeyState};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use super::keys::{HotkeyBinding, KeyCode};

/// Capacity of a registration's press stream.
const PRESS_BUFFER: usize = 32;

/// How often the forwarder thread re-checks its shutdown flag.
const FORWARD_POLL: Duration = Duration::from_millis(50);

/// A notification that the bound shortcut was pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PressEvent {
    /// The binding that fired
    pub binding: HotkeyBinding,
}

/// The notification stream of one registration; closed on unregistration.
pub type PressStream = mpsc::Receiver<PressEvent>;

/// Errors from the hotkey capability.
#[derive(Debug, thiserror::Error)]
pub enum HotkeyError {
    #[error("failed to initialise the hotkey capability: {0}")]
    Init(String),

    #[error("a hotkey is already registered; unregister it first")]
    AlreadyRegistered,

    #[error("failed to register hotkey: {0}")]
    Register(String),

    #[error("failed to unregister hotkey: {0}")]
    Unregister(String),

    #[error("failed to spawn forwarder thread: {0}")]
    ThreadSpawn(String),
}

/// The OS-level grab capability.
///
/// At most one binding may be registered at a time; the previous one must be
/// unregistered first. `unregister` returns only after the press stream is
/// closed, so a caller that awaits its consumption loop afterwards gets
/// non-overlapping listener generations.
pub trait HotkeyBackend: Send + 'static {
    /// Grab `binding` system-wide and return its press stream.
    fn register(&mut self, binding: HotkeyBinding) -> Result<PressStream, HotkeyError>;

    /// Release the current grab and close its stream.
    fn unregister(&mut self) -> Result<(), HotkeyError>;
}

/// Default backend over the `global-hotkey` crate.
pub struct GlobalHotkeyBackend {
    manager: GlobalHotKeyManager,
    grab: Option<ActiveGrab>,
}

/// One live OS registration and its forwarder thread.
struct ActiveGrab {
    hotkey: HotKey,
    running: Arc<AtomicBool>,
    forwarder: thread::JoinHandle<()>,
}

impl GlobalHotkeyBackend {
    /// Initialise the OS hotkey manager.
    pub fn new() -> Result<Self, HotkeyError> {
        let manager = GlobalHotKeyManager::new().map_err(|e| HotkeyError::Init(e.to_string()))?;
        Ok(Self {
            manager,
            grab: None,
        })
    }
}

impl HotkeyBackend for GlobalHotkeyBackend {
    fn register(&mut self, binding: HotkeyBinding) -> Result<PressStream, HotkeyError> {
        if self.grab.is_some() {
            return Err(HotkeyError::AlreadyRegistered);
        }

        let hotkey = os_hotkey(&binding);
        self.manager
            .register(hotkey)
            .map_err(|e| HotkeyError::Register(e.to_string()))?;

        let (tx, rx) = mpsc::channel(PRESS_BUFFER);
        let running = Arc::new(AtomicBool::new(true));
        let thread_flag = Arc::clone(&running);
        let id = hotkey.id();

        let forwarder = thread::Builder::new()
            .name("hotkey-forwarder".to_string())
            .spawn(move || {
                debug!(binding = %binding, "press forwarder started");
                let receiver = GlobalHotKeyEvent::receiver();

                while thread_flag.load(Ordering::SeqCst) {
                    match receiver.try_recv() {
                        Ok(event) if event.id == id && event.state == HotKeyState::Pressed => {
                            if tx.blocking_send(PressEvent { binding }).is_err() {
                                warn!("press stream receiver dropped, forwarder exiting");
                                break;
                            }
                        }
                        Ok(_) => {}
                        Err(_) => thread::sleep(FORWARD_POLL),
                    }
                }

                // Drop anything still queued in the process-global channel so a
                // later registration of the same binding never sees this
                // generation's input.
                while receiver.try_recv().is_ok() {}

                debug!("press forwarder stopped");
            })
            .map_err(|e| HotkeyError::ThreadSpawn(e.to_string()))?;

        self.grab = Some(ActiveGrab {
            hotkey,
            running,
            forwarder,
        });

        Ok(rx)
    }

    fn unregister(&mut self) -> Result<(), HotkeyError> {
        let Some(grab) = self.grab.take() else {
            return Ok(());
        };

        let result = self
            .manager
            .unregister(grab.hotkey)
            .map_err(|e| HotkeyError::Unregister(e.to_string()));

        // Stop the forwarder either way; its sender drop closes the stream.
        grab.running.store(false, Ordering::SeqCst);
        if grab.forwarder.join().is_err() {
            warn!("press forwarder panicked");
        }

        result
    }
}

/// Translate a binding into the grab crate's representation.
fn os_hotkey(binding: &HotkeyBinding) -> HotKey {
    let mut modifiers = Modifiers::empty();
    if binding.mods.ctrl {
        modifiers |= Modifiers::CONTROL;
    }
    if binding.mods.shift {
        modifiers |= Modifiers::SHIFT;
    }
    if binding.mods.alt {
        modifiers |= Modifiers::ALT;
    }
    if binding.mods.meta {
        modifiers |= Modifiers::META;
    }

    let mods = if modifiers.is_empty() {
        None
    } else {
        Some(modifiers)
    };
    HotKey::new(mods, os_code(binding.key))
}

fn os_code(key: KeyCode) -> Code {
    match key {
        KeyCode::Space => Code::Space,
        KeyCode::Key0 => Code::Digit0,
        KeyCode::Key1 => Code::Digit1,
        KeyCode::Key2 => Code::Digit2,
        KeyCode::Key3 => Code::Digit3,
        KeyCode::Key4 => Code::Digit4,
        KeyCode::Key5 => Code::Digit5,
        KeyCode::Key6 => Code::Digit6,
        KeyCode::Key7 => Code::Digit7,
        KeyCode::Key8 => Code::Digit8,
        KeyCode::Key9 => Code::Digit9,
        KeyCode::A => Code::KeyA,
        KeyCode::B => Code::KeyB,
        KeyCode::C => Code::KeyC,
        KeyCode::D => Code::KeyD,
        KeyCode::E => Code::KeyE,
        KeyCode::F => Code::KeyF,
        KeyCode::G => Code::KeyG,
        KeyCode::H => Code::KeyH,
        KeyCode::I => Code::KeyI,
        KeyCode::J => Code::KeyJ,
        KeyCode::K => Code::KeyK,
        KeyCode::L => Code::KeyL,
        KeyCode::M => Code::KeyM,
        KeyCode::N => Code::KeyN,
        KeyCode::O => Code::KeyO,
        KeyCode::P => Code::KeyP,
        KeyCode::Q => Code::KeyQ,
        KeyCode::R => Code::KeyR,
        KeyCode::S => Code::KeyS,
        KeyCode::T => Code::KeyT,
        KeyCode::U => Code::KeyU,
        KeyCode::V => Code::KeyV,
        KeyCode::W => Code::KeyW,
        KeyCode::X => Code::KeyX,
        KeyCode::Y => Code::KeyY,
        KeyCode::Z => Code::KeyZ,
        KeyCode::Return => Code::Enter,
        KeyCode::Escape => Code::Escape,
        KeyCode::Delete => Code::Delete,
        KeyCode::Tab => Code::Tab,
        KeyCode::Left => Code::ArrowLeft,
        KeyCode::Right => Code::ArrowRight,
        KeyCode::Up => Code::ArrowUp,
        KeyCode::Down => Code::ArrowDown,
        KeyCode::F1 => Code::F1,
        KeyCode::F2 => Code::F2,
        KeyCode::F3 => Code::F3,
        KeyCode::F4 => Code::F4,
        KeyCode::F5 => Code::F5,
        KeyCode::F6 => Code::F6,
        KeyCode::F7 => Code::F7,
        KeyCode::F8 => Code::F8,
        KeyCode::F9 => Code::F9,
        KeyCode::F10 => Code::F10,
        KeyCode::F11 => Code::F11,
        KeyCode::F12 => Code::F12,
        KeyCode::F13 => Code::F13,
        KeyCode::F14 => Code::F14,
        KeyCode::F15 => Code::F15,
        KeyCode::F16 => Code::F16,
        KeyCode::F17 => Code::F17,
        KeyCode::F18 => Code::F18,
        KeyCode::F19 => Code::F19,
        KeyCode::F20 => Code::F20,
    }
}
