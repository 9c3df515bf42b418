use std::sync::Arc;

use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::Theme;
use crate::config::{KeyResolver, SearchAction};
use crate::ui::{Component, EventResult};

const PLACEHOLDER: &str = "Search through thousands of movies";

/// Events the search bar reports to its owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchBarEvent {
    /// The value changed through an edit.
    Changed(String),
    /// Enter was pressed on the current value.
    Submitted(String),
    /// The exit key was pressed; focus should move away.
    Dismissed,
}

/// Single-line text input for the movie query.
///
/// While focused it consumes every key event so that global shortcuts cannot
/// fire mid-typing. The cursor is a byte offset and always sits on a char
/// boundary.
pub struct SearchBar {
    resolver: Arc<KeyResolver>,
    value: String,
    cursor: usize,
    focused: bool,
}

impl SearchBar {
    #[must_use]
    pub fn new(resolver: Arc<KeyResolver>) -> Self {
        Self {
            resolver,
            value: String::new(),
            cursor: 0,
            focused: false,
        }
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.value.len();
    }

    pub const fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    /// Insert pasted text at the cursor, with control characters stripped.
    /// Returns the new value.
    pub fn paste(&mut self, text: &str) -> String {
        let text: String = text.chars().filter(|c| !c.is_control()).collect();
        self.value.insert_str(self.cursor, &text);
        self.cursor += text.len();
        self.value.clone()
    }

    fn insert_char(&mut self, c: char) {
        self.value.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    fn delete_char_before_cursor(&mut self) {
        if self.cursor > 0 {
            let start = self.prev_boundary();
            self.value.drain(start..self.cursor);
            self.cursor = start;
        }
    }

    fn delete_char_at_cursor(&mut self) {
        if self.cursor < self.value.len() {
            let end = self.next_boundary();
            self.value.drain(self.cursor..end);
        }
    }

    fn delete_word_before_cursor(&mut self) {
        let head = &self.value[..self.cursor];
        let trimmed = head.trim_end_matches(' ');
        let start = trimmed.rfind(' ').map_or(0, |i| i + 1);
        self.value.drain(start..self.cursor);
        self.cursor = start;
    }

    fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    fn move_cursor_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.prev_boundary();
        }
    }

    fn move_cursor_right(&mut self) {
        if self.cursor < self.value.len() {
            self.cursor = self.next_boundary();
        }
    }

    /// Byte offset of the char boundary before the cursor.
    fn prev_boundary(&self) -> usize {
        self.value[..self.cursor]
            .char_indices()
            .next_back()
            .map_or(0, |(i, _)| i)
    }

    /// Byte offset of the char boundary after the cursor.
    fn next_boundary(&self) -> usize {
        self.value[self.cursor..]
            .chars()
            .next()
            .map_or(self.cursor, |c| self.cursor + c.len_utf8())
    }

    fn apply_edit(&mut self, key: KeyEvent) {
        match (key.code, key.modifiers) {
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => self.clear(),
            (KeyCode::Char('a'), KeyModifiers::CONTROL) | (KeyCode::Home, _) => self.cursor = 0,
            (KeyCode::Char('e'), KeyModifiers::CONTROL) | (KeyCode::End, _) => {
                self.cursor = self.value.len();
            }
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => self.insert_char(c),
            (KeyCode::Backspace, KeyModifiers::ALT) => self.delete_word_before_cursor(),
            (KeyCode::Backspace, _) => self.delete_char_before_cursor(),
            (KeyCode::Delete, _) => self.delete_char_at_cursor(),
            (KeyCode::Left, _) => self.move_cursor_left(),
            (KeyCode::Right, _) => self.move_cursor_right(),
            _ => {}
        }
    }
}

impl Component for SearchBar {
    type Output = SearchBarEvent;

    fn handle_key(&mut self, key: KeyEvent) -> Result<EventResult<SearchBarEvent>> {
        if key.code == KeyCode::Enter {
            return Ok(SearchBarEvent::Submitted(self.value.clone()).into());
        }
        if self.resolver.matches_search(&key, SearchAction::Exit) {
            return Ok(SearchBarEvent::Dismissed.into());
        }

        let before = self.value.clone();
        self.apply_edit(key);

        if self.value == before {
            Ok(EventResult::Consumed)
        } else {
            Ok(SearchBarEvent::Changed(self.value.clone()).into())
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let border = if self.focused {
            theme.border_focused()
        } else {
            theme.border()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(border))
            .title(" Search ")
            .title_style(Style::default().fg(theme.mauve()).add_modifier(Modifier::BOLD));

        let input_style = Style::default().fg(theme.text());
        let cursor_style = Style::default().fg(theme.base()).bg(theme.text());
        let placeholder_style = Style::default().fg(theme.overlay0());

        let line = if self.value.is_empty() {
            if self.focused {
                Line::from(vec![
                    Span::styled(" ", cursor_style),
                    Span::styled(PLACEHOLDER, placeholder_style),
                ])
            } else {
                Line::from(Span::styled(PLACEHOLDER, placeholder_style))
            }
        } else if self.focused {
            let (before, after) = self.value.split_at(self.cursor);
            let cursor_char = after.chars().next().unwrap_or(' ');
            let rest: String = after.chars().skip(1).collect();
            Line::from(vec![
                Span::styled(before.to_string(), input_style),
                Span::styled(cursor_char.to_string(), cursor_style),
                Span::styled(rest, input_style),
            ])
        } else {
            Line::from(Span::styled(self.value.clone(), input_style))
        };

        frame.render_widget(Paragraph::new(line).block(block), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::keybindings::KeybindingsConfig;

    fn search_bar() -> SearchBar {
        SearchBar::new(Arc::new(KeyResolver::new(Arc::new(
            KeybindingsConfig::default(),
        ))))
    }

    fn press(bar: &mut SearchBar, code: KeyCode) -> EventResult<SearchBarEvent> {
        bar.handle_key(KeyEvent::new(code, KeyModifiers::NONE)).unwrap()
    }

    fn press_with(
        bar: &mut SearchBar,
        code: KeyCode,
        modifiers: KeyModifiers,
    ) -> EventResult<SearchBarEvent> {
        bar.handle_key(KeyEvent::new(code, modifiers)).unwrap()
    }

    fn type_str(bar: &mut SearchBar, s: &str) {
        for c in s.chars() {
            press(bar, KeyCode::Char(c));
        }
    }

    #[test]
    fn typing_emits_changed_events() {
        let mut bar = search_bar();

        let result = press(&mut bar, KeyCode::Char('d'));

        assert_eq!(
            result,
            EventResult::Event(SearchBarEvent::Changed("d".to_string()))
        );
        assert_eq!(bar.value(), "d");
    }

    #[test]
    fn enter_submits_the_current_value() {
        let mut bar = search_bar();
        type_str(&mut bar, "dune");

        let result = press(&mut bar, KeyCode::Enter);

        assert_eq!(
            result,
            EventResult::Event(SearchBarEvent::Submitted("dune".to_string()))
        );
    }

    #[test]
    fn escape_dismisses_without_clearing() {
        let mut bar = search_bar();
        type_str(&mut bar, "dune");

        let result = press(&mut bar, KeyCode::Esc);

        assert_eq!(result, EventResult::Event(SearchBarEvent::Dismissed));
        assert_eq!(bar.value(), "dune");
    }

    #[test]
    fn global_shortcut_characters_are_typed_not_propagated() {
        let mut bar = search_bar();

        let result = press(&mut bar, KeyCode::Char('q'));

        assert_eq!(
            result,
            EventResult::Event(SearchBarEvent::Changed("q".to_string()))
        );
    }

    #[test]
    fn unhandled_keys_are_consumed() {
        let mut bar = search_bar();

        assert_eq!(press(&mut bar, KeyCode::Tab), EventResult::Consumed);
        assert_eq!(press(&mut bar, KeyCode::Left), EventResult::Consumed);
    }

    #[test]
    fn backspace_removes_whole_characters() {
        let mut bar = search_bar();
        type_str(&mut bar, "amélie");

        let result = press(&mut bar, KeyCode::Backspace);

        assert_eq!(
            result,
            EventResult::Event(SearchBarEvent::Changed("améli".to_string()))
        );

        press(&mut bar, KeyCode::Backspace);
        press(&mut bar, KeyCode::Backspace);
        press(&mut bar, KeyCode::Backspace);
        assert_eq!(bar.value(), "am");
    }

    #[test]
    fn backspace_at_the_start_changes_nothing() {
        let mut bar = search_bar();

        assert_eq!(press(&mut bar, KeyCode::Backspace), EventResult::Consumed);
    }

    #[test]
    fn editing_in_the_middle_respects_the_cursor() {
        let mut bar = search_bar();
        type_str(&mut bar, "dne");

        press(&mut bar, KeyCode::Left);
        press(&mut bar, KeyCode::Left);
        press(&mut bar, KeyCode::Char('u'));

        assert_eq!(bar.value(), "dune");

        press(&mut bar, KeyCode::Delete);
        assert_eq!(bar.value(), "due");
    }

    #[test]
    fn ctrl_u_clears_the_value() {
        let mut bar = search_bar();
        type_str(&mut bar, "dune");

        let result = press_with(&mut bar, KeyCode::Char('u'), KeyModifiers::CONTROL);

        assert_eq!(
            result,
            EventResult::Event(SearchBarEvent::Changed(String::new()))
        );
        assert_eq!(bar.value(), "");
    }

    #[test]
    fn alt_backspace_deletes_the_previous_word() {
        let mut bar = search_bar();
        type_str(&mut bar, "the batman");

        press_with(&mut bar, KeyCode::Backspace, KeyModifiers::ALT);

        assert_eq!(bar.value(), "the ");
    }

    #[test]
    fn paste_inserts_at_the_cursor() {
        let mut bar = search_bar();
        type_str(&mut bar, "dpart two");
        for _ in 0..8 {
            press(&mut bar, KeyCode::Left);
        }

        let value = bar.paste("une: ");

        assert_eq!(value, "dune: part two");
    }

    #[test]
    fn set_value_moves_the_cursor_to_the_end() {
        let mut bar = search_bar();

        bar.set_value("dune");
        press(&mut bar, KeyCode::Char('!'));

        assert_eq!(bar.value(), "dune!");
    }
}
