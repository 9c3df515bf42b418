use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Deserializer};
use std::str::FromStr;

/// A single key with optional modifiers, parsed from strings like `"q"`,
/// `"ctrl+r"` or `"pagedown"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl Key {
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }

    /// Whether a terminal key event activates this key.
    ///
    /// Character keys compare case-insensitively with shift folded into the
    /// character itself, so `"G"` matches the event `shift+g` produces.
    #[must_use]
    pub fn matches(&self, event: &KeyEvent) -> bool {
        match (self.code, event.code) {
            (KeyCode::Char(a), KeyCode::Char(b)) => {
                let chars_match = a == b
                    || (a.is_ascii_alphabetic()
                        && b.is_ascii_alphabetic()
                        && a.to_ascii_lowercase() == b.to_ascii_lowercase());

                let expected_mods = if a.is_ascii_uppercase() {
                    self.modifiers | KeyModifiers::SHIFT
                } else {
                    self.modifiers
                };
                let actual_mods = if b.is_ascii_uppercase() {
                    event.modifiers | KeyModifiers::SHIFT
                } else {
                    event.modifiers
                };

                chars_match
                    && (expected_mods & !KeyModifiers::SHIFT) == (actual_mods & !KeyModifiers::SHIFT)
            }
            _ => self.code == event.code && self.modifiers == event.modifiers,
        }
    }

    #[must_use]
    pub fn display(&self) -> String {
        let mut parts = Vec::new();

        if self.modifiers.contains(KeyModifiers::CONTROL) {
            parts.push("ctrl".to_string());
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            parts.push("alt".to_string());
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            parts.push("shift".to_string());
        }

        let key = match self.code {
            KeyCode::Char(' ') => "Space".to_string(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::Tab => "Tab".to_string(),
            KeyCode::Backspace => "Backspace".to_string(),
            KeyCode::Delete => "Delete".to_string(),
            KeyCode::Home => "Home".to_string(),
            KeyCode::End => "End".to_string(),
            KeyCode::PageUp => "PageUp".to_string(),
            KeyCode::PageDown => "PageDown".to_string(),
            KeyCode::Up => "Up".to_string(),
            KeyCode::Down => "Down".to_string(),
            KeyCode::Left => "Left".to_string(),
            KeyCode::Right => "Right".to_string(),
            KeyCode::F(n) => format!("F{n}"),
            _ => "?".to_string(),
        };

        parts.push(key);
        parts.join("+")
    }
}

impl FromStr for Key {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let parts: Vec<&str> = s.split('+').collect();

        let mut modifiers = KeyModifiers::NONE;
        let mut key_part = s;

        if parts.len() > 1 {
            for part in &parts[..parts.len() - 1] {
                match part.to_lowercase().as_str() {
                    "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
                    "alt" => modifiers |= KeyModifiers::ALT,
                    "shift" => modifiers |= KeyModifiers::SHIFT,
                    _ => return Err(format!("Unknown modifier: {part}")),
                }
            }
            key_part = parts[parts.len() - 1];
        }

        let code = match key_part.to_lowercase().as_str() {
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "backspace" => KeyCode::Backspace,
            "delete" | "del" => KeyCode::Delete,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "space" => KeyCode::Char(' '),
            lower if lower.starts_with('f') && lower.len() > 1 => {
                let num: u8 = lower[1..]
                    .parse()
                    .map_err(|_| format!("Invalid function key: {key_part}"))?;
                KeyCode::F(num)
            }
            _ => {
                // Single characters keep their original case
                let mut chars = key_part.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => KeyCode::Char(c),
                    _ => return Err(format!("Unknown key: {key_part}")),
                }
            }
        };

        Ok(Self { code, modifiers })
    }
}

impl<'de> Deserialize<'de> for Key {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// One or more keys bound to the same action.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum KeyBinding {
    Single(Key),
    Multiple(Vec<Key>),
}

impl KeyBinding {
    #[must_use]
    pub const fn multiple(keys: Vec<Key>) -> Self {
        Self::Multiple(keys)
    }

    #[must_use]
    pub fn matches(&self, event: &KeyEvent) -> bool {
        match self {
            Self::Single(key) => key.matches(event),
            Self::Multiple(keys) => keys.iter().any(|key| key.matches(event)),
        }
    }

    #[must_use]
    pub fn display(&self) -> String {
        match self {
            Self::Single(key) => key.display(),
            Self::Multiple(keys) => keys
                .iter()
                .map(Key::display)
                .collect::<Vec<_>>()
                .join("/"),
        }
    }
}

impl From<Key> for KeyBinding {
    fn from(key: Key) -> Self {
        Self::Single(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctrl(c: char) -> Key {
        Key {
            code: KeyCode::Char(c),
            modifiers: KeyModifiers::CONTROL,
        }
    }

    #[test]
    fn parses_plain_and_named_keys() {
        assert_eq!(Key::from_str("q").unwrap(), Key::new(KeyCode::Char('q')));
        assert_eq!(Key::from_str("Enter").unwrap(), Key::new(KeyCode::Enter));
        assert_eq!(Key::from_str("pgdn").unwrap(), Key::new(KeyCode::PageDown));
        assert_eq!(Key::from_str("Space").unwrap(), Key::new(KeyCode::Char(' ')));
        assert_eq!(Key::from_str("F1").unwrap(), Key::new(KeyCode::F(1)));
    }

    #[test]
    fn parses_modifiers() {
        assert_eq!(Key::from_str("ctrl+c").unwrap(), ctrl('c'));
        assert!(Key::from_str("hyper+c").is_err());
        assert!(Key::from_str("bogus").is_err());
    }

    #[test]
    fn displays_round_trip() {
        assert_eq!(Key::new(KeyCode::Char('q')).display(), "q");
        assert_eq!(Key::new(KeyCode::Enter).display(), "Enter");
        assert_eq!(ctrl('c').display(), "ctrl+c");
    }

    #[test]
    fn matches_plain_characters() {
        let key = Key::new(KeyCode::Char('q'));

        assert!(key.matches(&KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)));
        assert!(!key.matches(&KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL)));
    }

    #[test]
    fn uppercase_characters_fold_shift() {
        let key = Key::new(KeyCode::Char('G'));

        assert!(key.matches(&KeyEvent::new(KeyCode::Char('G'), KeyModifiers::SHIFT)));
        assert!(key.matches(&KeyEvent::new(KeyCode::Char('G'), KeyModifiers::NONE)));
    }

    #[test]
    fn binding_deserializes_from_string_or_list() {
        #[derive(Deserialize)]
        struct Wrapper {
            binding: KeyBinding,
        }

        let single: Wrapper = toml::from_str(r#"binding = "q""#).unwrap();
        assert_eq!(single.binding, Key::new(KeyCode::Char('q')).into());

        let multiple: Wrapper = toml::from_str(r#"binding = ["k", "up"]"#).unwrap();
        assert_eq!(
            multiple.binding,
            KeyBinding::multiple(vec![Key::new(KeyCode::Char('k')), Key::new(KeyCode::Up)])
        );
        assert!(multiple.binding.matches(&KeyEvent::new(KeyCode::Up, KeyModifiers::NONE)));
        assert_eq!(multiple.binding.display(), "k/Up");
    }
}
