//! Hotkey binding data model
//!
//! A binding is an immutable modifier-set + key-code combination with
//! structural equality. The name tables mirror what a front-end binding
//! picker needs and what the string forms in config and IPC use.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A single modifier key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modifier {
    /// Control key
    Ctrl,
    /// Shift key
    Shift,
    /// Alt/Option key
    Alt,
    /// Command/Super/Windows key
    Meta,
}

impl Modifier {
    /// All supported modifiers, in display order.
    pub const ALL: [Modifier; 4] = [Modifier::Ctrl, Modifier::Shift, Modifier::Alt, Modifier::Meta];

    /// Canonical display name.
    pub fn name(&self) -> &'static str {
        match self {
            Modifier::Ctrl => "Ctrl",
            Modifier::Shift => "Shift",
            Modifier::Alt => "Alt",
            Modifier::Meta => "Meta",
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Modifier {
    type Err = BindingParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ctrl" | "control" => Ok(Modifier::Ctrl),
            "shift" => Ok(Modifier::Shift),
            "alt" | "option" => Ok(Modifier::Alt),
            "meta" | "cmd" | "super" | "win" => Ok(Modifier::Meta),
            _ => Err(BindingParseError::UnknownModifier(s.to_string())),
        }
    }
}

/// The set of modifiers held by a binding.
///
/// Plain booleans so equality is structural regardless of the order the
/// modifiers were written in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModifierSet {
    /// Control key is part of the binding
    pub ctrl: bool,
    /// Shift key is part of the binding
    pub shift: bool,
    /// Alt/Option key is part of the binding
    pub alt: bool,
    /// Command/Super key is part of the binding
    pub meta: bool,
}

impl ModifierSet {
    /// An empty set.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Add a modifier to the set.
    pub fn insert(&mut self, modifier: Modifier) {
        match modifier {
            Modifier::Ctrl => self.ctrl = true,
            Modifier::Shift => self.shift = true,
            Modifier::Alt => self.alt = true,
            Modifier::Meta => self.meta = true,
        }
    }

    /// Check membership.
    pub fn contains(&self, modifier: Modifier) -> bool {
        match modifier {
            Modifier::Ctrl => self.ctrl,
            Modifier::Shift => self.shift,
            Modifier::Alt => self.alt,
            Modifier::Meta => self.meta,
        }
    }

    /// Check if no modifiers are set.
    pub fn is_empty(&self) -> bool {
        !self.ctrl && !self.shift && !self.alt && !self.meta
    }

    /// Members in display order.
    pub fn iter(&self) -> impl Iterator<Item = Modifier> + '_ {
        Modifier::ALL.into_iter().filter(|m| self.contains(*m))
    }
}

impl FromIterator<Modifier> for ModifierSet {
    fn from_iter<I: IntoIterator<Item = Modifier>>(iter: I) -> Self {
        let mut set = ModifierSet::empty();
        for modifier in iter {
            set.insert(modifier);
        }
        set
    }
}

/// A key code a binding can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    Space,
    Key0,
    Key1,
    Key2,
    Key3,
    Key4,
    Key5,
    Key6,
    Key7,
    Key8,
    Key9,
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
    Return,
    Escape,
    Delete,
    Tab,
    Left,
    Right,
    Up,
    Down,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    F13,
    F14,
    F15,
    F16,
    F17,
    F18,
    F19,
    F20,
}

impl KeyCode {
    /// All supported key codes, in catalog order.
    pub const ALL: [KeyCode; 65] = [
        KeyCode::Space,
        KeyCode::Key0,
        KeyCode::Key1,
        KeyCode::Key2,
        KeyCode::Key3,
        KeyCode::Key4,
        KeyCode::Key5,
        KeyCode::Key6,
        KeyCode::Key7,
        KeyCode::Key8,
        KeyCode::Key9,
        KeyCode::A,
        KeyCode::B,
        KeyCode::C,
        KeyCode::D,
        KeyCode::E,
        KeyCode::F,
        KeyCode::G,
        KeyCode::H,
        KeyCode::I,
        KeyCode::J,
        KeyCode::K,
        KeyCode::L,
        KeyCode::M,
        KeyCode::N,
        KeyCode::O,
        KeyCode::P,
        KeyCode::Q,
        KeyCode::R,
        KeyCode::S,
        KeyCode::T,
        KeyCode::U,
        KeyCode::V,
        KeyCode::W,
        KeyCode::X,
        KeyCode::Y,
        KeyCode::Z,
        KeyCode::Return,
        KeyCode::Escape,
        KeyCode::Delete,
        KeyCode::Tab,
        KeyCode::Left,
        KeyCode::Right,
        KeyCode::Up,
        KeyCode::Down,
        KeyCode::F1,
        KeyCode::F2,
        KeyCode::F3,
        KeyCode::F4,
        KeyCode::F5,
        KeyCode::F6,
        KeyCode::F7,
        KeyCode::F8,
        KeyCode::F9,
        KeyCode::F10,
        KeyCode::F11,
        KeyCode::F12,
        KeyCode::F13,
        KeyCode::F14,
        KeyCode::F15,
        KeyCode::F16,
        KeyCode::F17,
        KeyCode::F18,
        KeyCode::F19,
        KeyCode::F20,
    ];

    /// Canonical display name.
    pub fn name(&self) -> &'static str {
        match self {
            KeyCode::Space => "Space",
            KeyCode::Key0 => "0",
            KeyCode::Key1 => "1",
            KeyCode::Key2 => "2",
            KeyCode::Key3 => "3",
            KeyCode::Key4 => "4",
            KeyCode::Key5 => "5",
            KeyCode::Key6 => "6",
            KeyCode::Key7 => "7",
            KeyCode::Key8 => "8",
            KeyCode::Key9 => "9",
            KeyCode::A => "A",
            KeyCode::B => "B",
            KeyCode::C => "C",
            KeyCode::D => "D",
            KeyCode::E => "E",
            KeyCode::F => "F",
            KeyCode::G => "G",
            KeyCode::H => "H",
            KeyCode::I => "I",
            KeyCode::J => "J",
            KeyCode::K => "K",
            KeyCode::L => "L",
            KeyCode::M => "M",
            KeyCode::N => "N",
            KeyCode::O => "O",
            KeyCode::P => "P",
            KeyCode::Q => "Q",
            KeyCode::R => "R",
            KeyCode::S => "S",
            KeyCode::T => "T",
            KeyCode::U => "U",
            KeyCode::V => "V",
            KeyCode::W => "W",
            KeyCode::X => "X",
            KeyCode::Y => "Y",
            KeyCode::Z => "Z",
            KeyCode::Return => "Return",
            KeyCode::Escape => "Escape",
            KeyCode::Delete => "Delete",
            KeyCode::Tab => "Tab",
            KeyCode::Left => "Left",
            KeyCode::Right => "Right",
            KeyCode::Up => "Up",
            KeyCode::Down => "Down",
            KeyCode::F1 => "F1",
            KeyCode::F2 => "F2",
            KeyCode::F3 => "F3",
            KeyCode::F4 => "F4",
            KeyCode::F5 => "F5",
            KeyCode::F6 => "F6",
            KeyCode::F7 => "F7",
            KeyCode::F8 => "F8",
            KeyCode::F9 => "F9",
            KeyCode::F10 => "F10",
            KeyCode::F11 => "F11",
            KeyCode::F12 => "F12",
            KeyCode::F13 => "F13",
            KeyCode::F14 => "F14",
            KeyCode::F15 => "F15",
            KeyCode::F16 => "F16",
            KeyCode::F17 => "F17",
            KeyCode::F18 => "F18",
            KeyCode::F19 => "F19",
            KeyCode::F20 => "F20",
        }
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for KeyCode {
    type Err = BindingParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.to_ascii_lowercase();
        KeyCode::ALL
            .into_iter()
            .find(|key| key.name().to_ascii_lowercase() == lowered)
            .ok_or_else(|| BindingParseError::UnknownKey(s.to_string()))
    }
}

/// A modifier-set + key-code combination identifying a global shortcut.
///
/// Immutable once constructed; equality is structural.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HotkeyBinding {
    /// Modifiers that must be held
    pub mods: ModifierSet,
    /// The key that triggers the shortcut
    pub key: KeyCode,
}

impl HotkeyBinding {
    /// Create a binding from a modifier set and a key.
    pub fn new(mods: ModifierSet, key: KeyCode) -> Self {
        Self { mods, key }
    }
}

impl fmt::Display for HotkeyBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for modifier in self.mods.iter() {
            write!(f, "{}+", modifier)?;
        }
        write!(f, "{}", self.key)
    }
}

impl FromStr for HotkeyBinding {
    type Err = BindingParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut mods = ModifierSet::empty();
        let mut key = None;
        let mut parts = s
            .split('+')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .peekable();

        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                // Last token is the key; everything before it must be a modifier
                key = Some(part.parse::<KeyCode>()?);
            } else {
                mods.insert(part.parse::<Modifier>()?);
            }
        }

        match key {
            Some(key) => Ok(HotkeyBinding::new(mods, key)),
            None => Err(BindingParseError::MissingKey),
        }
    }
}

/// Errors from parsing the string form of a binding.
#[derive(Debug, thiserror::Error)]
pub enum BindingParseError {
    #[error("binding has no key code")]
    MissingKey,

    #[error("unknown modifier '{0}'")]
    UnknownModifier(String),

    #[error("unknown key '{0}'")]
    UnknownKey(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_binding() {
        let binding: HotkeyBinding = "Ctrl+Shift+Space".parse().unwrap();
        assert!(binding.mods.ctrl);
        assert!(binding.mods.shift);
        assert!(!binding.mods.alt);
        assert_eq!(binding.key, KeyCode::Space);
    }

    #[test]
    fn test_modifier_order_does_not_matter() {
        let a: HotkeyBinding = "Ctrl+Shift+Space".parse().unwrap();
        let b: HotkeyBinding = "Shift+Ctrl+Space".parse().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_display_round_trip() {
        let binding: HotkeyBinding = "shift+ctrl+k".parse().unwrap();
        assert_eq!(binding.to_string(), "Ctrl+Shift+K");
        let reparsed: HotkeyBinding = binding.to_string().parse().unwrap();
        assert_eq!(binding, reparsed);
    }

    #[test]
    fn test_modifier_aliases() {
        let binding: HotkeyBinding = "Cmd+Option+Return".parse().unwrap();
        assert!(binding.mods.meta);
        assert!(binding.mods.alt);
        assert_eq!(binding.key, KeyCode::Return);
    }

    #[test]
    fn test_key_without_modifiers() {
        let binding: HotkeyBinding = "F12".parse().unwrap();
        assert!(binding.mods.is_empty());
        assert_eq!(binding.key, KeyCode::F12);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = "Ctrl+Bogus".parse::<HotkeyBinding>().unwrap_err();
        assert!(matches!(err, BindingParseError::UnknownKey(_)));
    }

    #[test]
    fn test_unknown_modifier_rejected() {
        let err = "Hyper+Space".parse::<HotkeyBinding>().unwrap_err();
        assert!(matches!(err, BindingParseError::UnknownModifier(_)));
    }

    #[test]
    fn test_empty_string_rejected() {
        assert!(matches!(
            "".parse::<HotkeyBinding>(),
            Err(BindingParseError::MissingKey)
        ));
    }

    #[test]
    fn test_catalog_names_are_unique() {
        let mut names: Vec<&str> = KeyCode::ALL.iter().map(|k| k.name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), KeyCode::ALL.len());
    }
}
