use std::sync::Arc;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::Theme;
use crate::config::{GlobalAction, KeyResolver, NavAction, SearchAction};
use crate::ui::Keybinding;

/// Bottom bar showing the key hints for whatever currently has focus.
pub struct StatusBar {
    resolver: Arc<KeyResolver>,
}

impl StatusBar {
    #[must_use]
    pub const fn new(resolver: Arc<KeyResolver>) -> Self {
        Self { resolver }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme, search_focused: bool) {
        let hints = if search_focused {
            self.search_hints()
        } else {
            self.results_hints()
        };

        let mut spans = Vec::new();
        for (i, hint) in hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled("  │  ", Style::default().fg(theme.surface2())));
            }
            spans.push(Span::styled(
                hint.key.clone(),
                Style::default().fg(theme.peach()),
            ));
            spans.push(Span::raw(" "));
            spans.push(Span::styled(
                hint.description.clone(),
                Style::default().fg(theme.subtext0()),
            ));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn search_hints(&self) -> Vec<Keybinding> {
        vec![
            Keybinding::new("Enter", "Search now"),
            Keybinding::new(
                self.resolver.display_search(SearchAction::Exit),
                "Results",
            ),
        ]
    }

    fn results_hints(&self) -> Vec<Keybinding> {
        vec![
            Keybinding::new(self.resolver.display_search(SearchAction::Focus), "Search"),
            Keybinding::new(
                format!(
                    "{}/{}",
                    self.resolver.display_nav(NavAction::Up),
                    self.resolver.display_nav(NavAction::Down)
                ),
                "Navigate",
            ),
            Keybinding::new(self.resolver.display_global(GlobalAction::Reload), "Reload"),
            Keybinding::new(self.resolver.display_global(GlobalAction::Quit), "Quit"),
        ]
    }
}
