use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use tracing::{debug, error};

use crate::Theme;
use crate::browser::MovieBrowser;
use crate::cli::Args;
use crate::command::Command;
use crate::config::{AppConfig, GlobalAction, KeyResolver, SearchAction};
use crate::debounce::QueryDebouncer;
use crate::theme;
use crate::tmdb::TmdbClient;
use crate::tui::{Event, Tui};
use crate::ui::search_bar::{SearchBar, SearchBarEvent};
use crate::ui::status_bar::StatusBar;
use crate::ui::{Component, EventResult};
use crate::usage::{AppwriteRecorder, UsageRecorder};

const FRAME_RATE: f64 = 60.0;
/// Ticks drive spinner frames and debounce polling, so the tick period
/// bounds how long a settled query waits before its fetch is dispatched.
const TICK_RATE: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Search,
    Results,
}

/// Top-level application: owns the layout, focus and the event loop.
pub struct App {
    resolver: Arc<KeyResolver>,
    theme: Theme,
    focus: Focus,
    search_bar: SearchBar,
    debouncer: QueryDebouncer,
    browser: MovieBrowser,
    status_bar: StatusBar,
    should_quit: bool,
    should_suspend: bool,
}

impl App {
    #[must_use]
    pub fn new(config: &AppConfig, resolver: Arc<KeyResolver>, theme: Theme) -> Self {
        let client = TmdbClient::new(config.tmdb.clone());
        let recorder = config
            .usage
            .clone()
            .map(|usage| Arc::new(AppwriteRecorder::new(usage)) as Arc<dyn UsageRecorder>);

        let mut search_bar = SearchBar::new(Arc::clone(&resolver));
        search_bar.set_focused(true);

        Self {
            browser: MovieBrowser::new(client, recorder, Arc::clone(&resolver)),
            search_bar,
            debouncer: QueryDebouncer::new(Duration::from_millis(config.search.debounce_ms)),
            status_bar: StatusBar::new(Arc::clone(&resolver)),
            resolver,
            theme,
            focus: Focus::Search,
            should_quit: false,
            should_suspend: false,
        }
    }

    /// Apply command line overrides before the event loop starts.
    pub fn apply_cli_args(&mut self, args: &Args) {
        if let Some(name) = &args.theme {
            self.theme = theme::theme_from_name(name);
        }
        if let Some(query) = &args.query {
            self.search_bar.set_value(query.clone());
            self.debouncer.settle_on(query);
        }
    }

    pub async fn run(&mut self) -> color_eyre::Result<()> {
        let mut tui = Tui::new(FRAME_RATE, TICK_RATE)?;
        tui.enter()?;

        // Initial fetch: the seeded query, or popular movies when empty.
        self.browser.init(self.search_bar.value());

        loop {
            self.handle_event(&mut tui).await?;
            spawn_commands(self.browser.update());

            if self.should_suspend {
                self.should_suspend = false;
                tui.suspend()?;
                tui.resume()?;
                tui.clear()?;
            } else if self.should_quit {
                break;
            }
        }

        tui.exit()?;
        Ok(())
    }

    async fn handle_event(&mut self, tui: &mut Tui) -> color_eyre::Result<()> {
        let Some(event) = tui.next_event().await else {
            return Ok(());
        };

        match event {
            Event::Quit => self.should_quit = true,
            Event::Tick => self.handle_tick(),
            Event::Render => self.render(tui)?,
            Event::Resize(width, height) => {
                tui.resize(Rect::new(0, 0, width, height))?;
                self.render(tui)?;
            }
            Event::Key(key) => self.handle_key(key),
            Event::Paste(text) => self.handle_paste(&text),
            Event::Error(message) => error!("Terminal event error: {message}"),
            Event::Init | Event::FocusGained | Event::FocusLost => {}
        }

        Ok(())
    }

    fn handle_tick(&mut self) {
        self.browser.handle_tick();
        if let Some(query) = self.debouncer.poll() {
            self.browser.search(query);
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('z') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_suspend = true;
            return;
        }

        match self.focus {
            Focus::Search => self.handle_search_key(key),
            Focus::Results => self.handle_results_key(key),
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match self.search_bar.handle_key(key) {
            Ok(EventResult::Event(SearchBarEvent::Changed(value))) => {
                self.debouncer.observe(&value);
            }
            Ok(EventResult::Event(SearchBarEvent::Submitted(_))) => {
                if let Some(query) = self.debouncer.flush() {
                    self.browser.search(query);
                }
                self.set_focus(Focus::Results);
            }
            Ok(EventResult::Event(SearchBarEvent::Dismissed)) => {
                self.set_focus(Focus::Results);
            }
            Ok(EventResult::Consumed | EventResult::Ignored) => {}
            Err(e) => error!("Search input error: {e}"),
        }
    }

    fn handle_results_key(&mut self, key: KeyEvent) {
        if self.resolver.matches_search(&key, SearchAction::Focus) {
            self.set_focus(Focus::Search);
            return;
        }
        if self.resolver.matches_global(&key, GlobalAction::Quit) {
            self.should_quit = true;
            return;
        }
        if self.resolver.matches_global(&key, GlobalAction::Reload) {
            self.browser.reload();
            return;
        }
        self.browser.handle_key(key);
    }

    fn handle_paste(&mut self, text: &str) {
        if self.focus == Focus::Search {
            let value = self.search_bar.paste(text);
            self.debouncer.observe(&value);
        }
    }

    fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
        self.search_bar.set_focused(focus == Focus::Search);
    }

    fn render(&mut self, tui: &mut Tui) -> color_eyre::Result<()> {
        tui.draw(|frame| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(1),
                    Constraint::Length(3),
                    Constraint::Min(5),
                    Constraint::Length(1),
                ])
                .split(frame.area());

            render_header(frame, chunks[0], &self.theme);
            self.search_bar.render(frame, chunks[1], &self.theme);
            self.browser.render(frame, chunks[2], &self.theme);
            self.status_bar
                .render(frame, chunks[3], &self.theme, self.focus == Focus::Search);
        })?;
        Ok(())
    }
}

fn spawn_commands(commands: Vec<Box<dyn Command>>) {
    for command in commands {
        debug!("Spawning command: {}", command.name());
        tokio::spawn(async move {
            if let Err(e) = command.execute().await {
                error!("Command failed: {e}");
            }
        });
    }
}

fn render_header(frame: &mut Frame, area: Rect, theme: &Theme) {
    let line = Line::from(vec![
        Span::styled(
            " Reelscout ",
            Style::default().fg(theme.mauve()).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            " Find Movies You'll Enjoy Without the Hassle",
            Style::default().fg(theme.subtext0()),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
