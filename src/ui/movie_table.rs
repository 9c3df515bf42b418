use std::sync::Arc;

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap};

use crate::Theme;
use crate::config::{KeyResolver, NavAction};
use crate::tmdb::Movie;

/// Rows jumped by page up / page down.
const PAGE_STEP: usize = 10;

/// Height of the details pane under the table.
const DETAILS_HEIGHT: u16 = 9;

/// Stateful table over a movie list, with a details pane for the selection.
///
/// Does not own the movies; callers pass the current list into every method.
/// Selection is tracked by TMDB id so it survives the list being replaced
/// wholesale by a new fetch.
pub struct MovieTable {
    resolver: Arc<KeyResolver>,
    state: TableState,
    selected_id: Option<u64>,
}

impl MovieTable {
    #[must_use]
    pub fn new(resolver: Arc<KeyResolver>) -> Self {
        Self {
            resolver,
            state: TableState::default(),
            selected_id: None,
        }
    }

    /// Reconcile the selection with a freshly loaded list. Keeps the selected
    /// movie when its id is still present, otherwise falls back to the first
    /// row.
    pub fn sync(&mut self, movies: &[Movie]) {
        if movies.is_empty() {
            self.state.select(None);
            self.selected_id = None;
            return;
        }

        let index = self
            .selected_id
            .and_then(|id| movies.iter().position(|movie| movie.id == id))
            .unwrap_or(0);
        self.state.select(Some(index));
        self.selected_id = Some(movies[index].id);
    }

    #[must_use]
    pub fn selected<'a>(&self, movies: &'a [Movie]) -> Option<&'a Movie> {
        self.state.selected().and_then(|index| movies.get(index))
    }

    /// Returns true when the key moved the selection.
    pub fn handle_key(&mut self, key: KeyEvent, movies: &[Movie]) -> bool {
        if movies.is_empty() {
            return false;
        }

        let last = movies.len() - 1;
        let current = self.state.selected().unwrap_or(0);
        let next = if self.resolver.matches_nav(&key, NavAction::Down) {
            usize::min(current + 1, last)
        } else if self.resolver.matches_nav(&key, NavAction::Up) {
            current.saturating_sub(1)
        } else if self.resolver.matches_nav(&key, NavAction::PageDown) {
            usize::min(current + PAGE_STEP, last)
        } else if self.resolver.matches_nav(&key, NavAction::PageUp) {
            current.saturating_sub(PAGE_STEP)
        } else if self.resolver.matches_nav(&key, NavAction::Home) {
            0
        } else if self.resolver.matches_nav(&key, NavAction::End) {
            last
        } else {
            return false;
        };

        self.state.select(Some(next));
        self.selected_id = Some(movies[next].id);
        true
    }

    pub fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        theme: &Theme,
        movies: &[Movie],
        title: &str,
    ) {
        if movies.is_empty() {
            let paragraph = Paragraph::new("No movies found")
                .style(Style::default().fg(theme.overlay0()))
                .alignment(Alignment::Center)
                .block(titled_block(theme, title));
            frame.render_widget(paragraph, area);
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(5), Constraint::Length(DETAILS_HEIGHT)])
            .split(area);

        self.render_table(frame, chunks[0], theme, movies, title);
        self.render_details(frame, chunks[1], theme, movies);
    }

    fn render_table(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        theme: &Theme,
        movies: &[Movie],
        title: &str,
    ) {
        let header = Row::new(vec!["Title", "Year", "Rating", "Language"])
            .style(
                Style::default()
                    .fg(theme.header())
                    .bg(theme.surface0())
                    .add_modifier(Modifier::BOLD),
            )
            .height(1);

        let rows = movies.iter().map(|movie| {
            Row::new(vec![
                Cell::from(movie.title.clone()).style(Style::default().fg(theme.text())),
                Cell::from(movie.year().unwrap_or("—").to_string())
                    .style(Style::default().fg(theme.subtext0())),
                Cell::from(format!("{:.1}", movie.vote_average))
                    .style(Style::default().fg(theme.yellow())),
                Cell::from(movie.original_language.clone())
                    .style(Style::default().fg(theme.subtext0())),
            ])
        });

        let widths = [
            Constraint::Min(24),
            Constraint::Length(6),
            Constraint::Length(8),
            Constraint::Length(8),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .block(titled_block(theme, title))
            .row_highlight_style(
                Style::default()
                    .bg(theme.selection_bg())
                    .fg(theme.lavender())
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");

        frame.render_stateful_widget(table, area, &mut self.state);
    }

    fn render_details(&self, frame: &mut Frame, area: Rect, theme: &Theme, movies: &[Movie]) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.border()))
            .title(" Details ")
            .title_style(Style::default().fg(theme.mauve()).add_modifier(Modifier::BOLD));

        let Some(movie) = self.selected(movies) else {
            frame.render_widget(block, area);
            return;
        };

        let meta_separator = Span::styled("  •  ", Style::default().fg(theme.surface2()));
        let mut lines = vec![
            Line::from(Span::styled(
                movie.title.clone(),
                Style::default()
                    .fg(theme.lavender())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(vec![
                Span::styled(
                    format!("★ {:.1}", movie.vote_average),
                    Style::default().fg(theme.yellow()),
                ),
                meta_separator.clone(),
                Span::styled(
                    movie.release_date.clone().unwrap_or_else(|| "—".to_string()),
                    Style::default().fg(theme.subtext0()),
                ),
                meta_separator,
                Span::styled(
                    movie.original_language.to_uppercase(),
                    Style::default().fg(theme.subtext0()),
                ),
            ]),
            Line::from(""),
        ];

        if movie.overview.is_empty() {
            lines.push(Line::from(Span::styled(
                "No overview available",
                Style::default().fg(theme.overlay0()),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                movie.overview.clone(),
                Style::default().fg(theme.text()),
            )));
        }

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true }).block(block);
        frame.render_widget(paragraph, area);
    }
}

fn titled_block<'a>(theme: &Theme, title: &'a str) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.border()))
        .title(title)
        .title_style(Style::default().fg(theme.mauve()).add_modifier(Modifier::BOLD))
}
