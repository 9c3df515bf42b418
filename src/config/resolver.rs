use std::sync::Arc;

use crossterm::event::KeyEvent;

use crate::config::key::KeyBinding;
use crate::config::keybindings::KeybindingsConfig;

/// Actions available anywhere outside the search input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobalAction {
    Quit,
    Reload,
}

/// Movement within the result table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    Up,
    Down,
    PageUp,
    PageDown,
    Home,
    End,
}

/// Focus changes for the search input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchAction {
    Focus,
    Exit,
}

/// Resolves key events against the configured keybindings.
#[derive(Debug, Clone)]
pub struct KeyResolver {
    keybindings: Arc<KeybindingsConfig>,
}

impl KeyResolver {
    #[must_use]
    pub const fn new(keybindings: Arc<KeybindingsConfig>) -> Self {
        Self { keybindings }
    }

    #[must_use]
    pub fn matches_global(&self, event: &KeyEvent, action: GlobalAction) -> bool {
        self.global_binding(action).matches(event)
    }

    #[must_use]
    pub fn display_global(&self, action: GlobalAction) -> String {
        self.global_binding(action).display()
    }

    #[must_use]
    pub fn matches_nav(&self, event: &KeyEvent, action: NavAction) -> bool {
        self.nav_binding(action).matches(event)
    }

    #[must_use]
    pub fn display_nav(&self, action: NavAction) -> String {
        self.nav_binding(action).display()
    }

    #[must_use]
    pub fn matches_search(&self, event: &KeyEvent, action: SearchAction) -> bool {
        self.search_binding(action).matches(event)
    }

    #[must_use]
    pub fn display_search(&self, action: SearchAction) -> String {
        self.search_binding(action).display()
    }

    fn global_binding(&self, action: GlobalAction) -> &KeyBinding {
        match action {
            GlobalAction::Quit => &self.keybindings.global.quit,
            GlobalAction::Reload => &self.keybindings.global.reload,
        }
    }

    fn nav_binding(&self, action: NavAction) -> &KeyBinding {
        let nav = &self.keybindings.navigation;
        match action {
            NavAction::Up => &nav.up,
            NavAction::Down => &nav.down,
            NavAction::PageUp => &nav.page_up,
            NavAction::PageDown => &nav.page_down,
            NavAction::Home => &nav.home,
            NavAction::End => &nav.end,
        }
    }

    fn search_binding(&self, action: SearchAction) -> &KeyBinding {
        match action {
            SearchAction::Focus => &self.keybindings.search.focus,
            SearchAction::Exit => &self.keybindings.search.exit,
        }
    }
}
