use crossterm::event::KeyCode;
use serde::Deserialize;

use crate::config::key::{Key, KeyBinding};

/// Keybindings that work anywhere outside the search input.
#[derive(Debug, Clone, Deserialize)]
pub struct GlobalKeybindings {
    pub quit: KeyBinding,
    pub reload: KeyBinding,
}

impl Default for GlobalKeybindings {
    fn default() -> Self {
        Self {
            quit: Key::new(KeyCode::Char('q')).into(),
            reload: Key::new(KeyCode::Char('r')).into(),
        }
    }
}

/// Keybindings for moving through the result table.
#[derive(Debug, Clone, Deserialize)]
pub struct NavigationKeybindings {
    pub up: KeyBinding,
    pub down: KeyBinding,
    pub page_up: KeyBinding,
    pub page_down: KeyBinding,
    pub home: KeyBinding,
    pub end: KeyBinding,
}

impl Default for NavigationKeybindings {
    fn default() -> Self {
        Self {
            up: KeyBinding::multiple(vec![Key::new(KeyCode::Char('k')), Key::new(KeyCode::Up)]),
            down: KeyBinding::multiple(vec![
                Key::new(KeyCode::Char('j')),
                Key::new(KeyCode::Down),
            ]),
            page_up: Key::new(KeyCode::PageUp).into(),
            page_down: Key::new(KeyCode::PageDown).into(),
            home: KeyBinding::multiple(vec![Key::new(KeyCode::Char('g')), Key::new(KeyCode::Home)]),
            end: KeyBinding::multiple(vec![Key::new(KeyCode::Char('G')), Key::new(KeyCode::End)]),
        }
    }
}

/// Keybindings for entering and leaving the search input.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchKeybindings {
    pub focus: KeyBinding,
    pub exit: KeyBinding,
}

impl Default for SearchKeybindings {
    fn default() -> Self {
        Self {
            focus: Key::new(KeyCode::Char('/')).into(),
            exit: Key::new(KeyCode::Esc).into(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct KeybindingsConfig {
    #[serde(default)]
    pub global: GlobalKeybindings,
    #[serde(default)]
    pub navigation: NavigationKeybindings,
    #[serde(default)]
    pub search: SearchKeybindings,
}
