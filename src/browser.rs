//! The movie browsing screen: debounced search on top of an async fetch
//! pipeline, with popular movies as the empty-query default.

pub mod command;
pub mod message;

use std::sync::Arc;

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::debug;

use crate::Theme;
use crate::browser::command::{FetchMoviesCmd, RecordSearchCmd};
use crate::browser::message::BrowserMsg;
use crate::command::Command;
use crate::config::KeyResolver;
use crate::tmdb::{Movie, TmdbClient};
use crate::ui::Component;
use crate::ui::movie_table::MovieTable;
use crate::ui::spinner::Spinner;
use crate::usage::UsageRecorder;

/// Where the current fetch cycle stands. Exactly one variant is active at a
/// time and `Loading` is only ever replaced by the newest dispatched fetch.
#[derive(Debug)]
pub enum FetchState {
    Idle,
    Loading,
    Error(String),
    Success(Vec<Movie>),
}

/// Drives fetching and displaying movies.
///
/// All mutation funnels through [`update`](Self::update): inputs and fetch
/// completions are queued as [`BrowserMsg`] values and processed in order on
/// the main loop. Async work never touches state directly.
pub struct MovieBrowser {
    client: TmdbClient,
    recorder: Option<Arc<dyn UsageRecorder>>,
    state: FetchState,
    /// Query of the most recently dispatched fetch.
    query: String,
    /// Generation of the most recently dispatched fetch. Completions carrying
    /// an older generation are stale and get discarded.
    generation: u64,
    spinner: Spinner,
    table: MovieTable,
    msg_tx: UnboundedSender<BrowserMsg>,
    msg_rx: UnboundedReceiver<BrowserMsg>,
}

impl MovieBrowser {
    #[must_use]
    pub fn new(
        client: TmdbClient,
        recorder: Option<Arc<dyn UsageRecorder>>,
        resolver: Arc<KeyResolver>,
    ) -> Self {
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        Self {
            client,
            recorder,
            state: FetchState::Idle,
            query: String::new(),
            generation: 0,
            spinner: Spinner::new(),
            table: MovieTable::new(resolver),
            msg_tx,
            msg_rx,
        }
    }

    /// Queue the startup fetch. Called once before the event loop starts.
    pub fn init(&self, query: &str) {
        self.queue(BrowserMsg::Fetch(query.to_string()));
    }

    /// Dispatch a fetch for a newly settled query.
    pub fn search(&self, query: String) {
        self.queue(BrowserMsg::Fetch(query));
    }

    /// Re-run the most recently dispatched query.
    pub fn reload(&self) {
        self.queue(BrowserMsg::Fetch(self.query.clone()));
    }

    fn queue(&self, message: BrowserMsg) {
        let _ = self.msg_tx.send(message);
    }

    /// Drain and process all queued messages, returning the commands to
    /// spawn. This is the single funnel for state changes.
    pub fn update(&mut self) -> Vec<Box<dyn Command>> {
        let mut commands = Vec::new();
        while let Ok(message) = self.msg_rx.try_recv() {
            commands.extend(self.process_message(message));
        }
        commands
    }

    fn process_message(&mut self, message: BrowserMsg) -> Vec<Box<dyn Command>> {
        match message {
            BrowserMsg::Fetch(query) => {
                self.generation += 1;
                self.spinner.set_label(if query.is_empty() {
                    "Loading popular movies...".to_string()
                } else {
                    format!("Searching for \"{query}\"...")
                });
                self.state = FetchState::Loading;
                self.query.clone_from(&query);
                vec![Box::new(FetchMoviesCmd::new(
                    self.client.clone(),
                    query,
                    self.generation,
                    self.msg_tx.clone(),
                ))]
            }
            BrowserMsg::MoviesLoaded { generation, movies } => {
                if generation != self.generation {
                    debug!(
                        "Discarding stale fetch result (generation {generation}, latest {})",
                        self.generation
                    );
                    return Vec::new();
                }

                self.table.sync(&movies);

                let mut commands: Vec<Box<dyn Command>> = Vec::new();
                if !self.query.is_empty()
                    && let Some(top) = movies.first()
                    && let Some(recorder) = &self.recorder
                {
                    commands.push(Box::new(RecordSearchCmd::new(
                        Arc::clone(recorder),
                        self.query.clone(),
                        top.clone(),
                    )));
                }

                self.state = FetchState::Success(movies);
                commands
            }
            BrowserMsg::FetchFailed {
                generation,
                message,
            } => {
                if generation != self.generation {
                    debug!(
                        "Discarding stale fetch failure (generation {generation}, latest {})",
                        self.generation
                    );
                    return Vec::new();
                }

                self.state = FetchState::Error(message);
                Vec::new()
            }
        }
    }

    /// Move the result selection. Returns true when the key was handled.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if let FetchState::Success(movies) = &self.state {
            self.table.handle_key(key, movies)
        } else {
            false
        }
    }

    pub fn handle_tick(&mut self) {
        if matches!(self.state, FetchState::Idle | FetchState::Loading) {
            self.spinner.handle_tick();
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        match &self.state {
            FetchState::Idle | FetchState::Loading => self.spinner.render(frame, area, theme),
            FetchState::Error(message) => render_error(frame, area, theme, message),
            FetchState::Success(movies) => {
                let title = if self.query.is_empty() {
                    format!(" Popular Movies ({}) ", movies.len())
                } else {
                    format!(" Results for \"{}\" ({}) ", self.query, movies.len())
                };
                self.table.render(frame, area, theme, movies, &title);
            }
        }
    }
}

fn render_error(frame: &mut Frame, area: Rect, theme: &Theme, message: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.error()));
    let paragraph = Paragraph::new(message.to_string())
        .style(Style::default().fg(theme.error()))
        .wrap(Wrap { trim: true })
        .block(block);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TmdbConfig;
    use crate::config::keybindings::KeybindingsConfig;
    use crate::usage::MockUsageRecorder;
    use crossterm::event::{KeyCode, KeyModifiers};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn browser() -> MovieBrowser {
        browser_with_recorder(None)
    }

    fn browser_with_recorder(recorder: Option<Arc<dyn UsageRecorder>>) -> MovieBrowser {
        MovieBrowser::new(
            TmdbClient::new(TmdbConfig::default()),
            recorder,
            Arc::new(KeyResolver::new(Arc::new(KeybindingsConfig::default()))),
        )
    }

    fn movie(id: u64, title: &str) -> Movie {
        Movie {
            id,
            title: title.to_string(),
            overview: "An overview".to_string(),
            poster_path: Some("/poster.jpg".to_string()),
            release_date: Some("1999-10-15".to_string()),
            vote_average: 7.5,
            original_language: "en".to_string(),
        }
    }

    fn loaded(generation: u64, movies: Vec<Movie>) -> BrowserMsg {
        BrowserMsg::MoviesLoaded { generation, movies }
    }

    #[test]
    fn fetch_enters_loading_and_spawns_one_command() {
        let mut browser = browser();

        browser.search("dune".to_string());
        let commands = browser.update();

        assert!(matches!(browser.state, FetchState::Loading));
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].name(), "Searching for \"dune\"");
    }

    #[test]
    fn empty_query_loads_popular_movies() {
        let mut browser = browser();

        browser.init("");
        let commands = browser.update();

        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].name(), "Loading popular movies");
    }

    #[test]
    fn completed_fetch_enters_success() {
        let mut browser = browser();
        browser.search("dune".to_string());
        browser.update();

        browser.queue(loaded(1, vec![movie(1, "Dune")]));
        browser.update();

        match &browser.state {
            FetchState::Success(movies) => assert_eq!(movies.len(), 1),
            other => panic!("expected success, got {other:?}"),
        }
    }

    #[test]
    fn stale_results_are_discarded() {
        let mut browser = browser();
        browser.search("a".to_string());
        browser.update();
        browser.search("av".to_string());
        browser.update();

        // The newer fetch completes first, the older one afterwards.
        browser.queue(loaded(2, vec![movie(2, "Avatar")]));
        browser.update();
        browser.queue(loaded(1, vec![movie(1, "Alien")]));
        browser.update();

        match &browser.state {
            FetchState::Success(movies) => assert_eq!(movies[0].id, 2),
            other => panic!("expected success, got {other:?}"),
        }
    }

    #[test]
    fn stale_failures_do_not_clobber_fresh_results() {
        let mut browser = browser();
        browser.search("a".to_string());
        browser.update();
        browser.search("av".to_string());
        browser.update();

        browser.queue(loaded(2, vec![movie(2, "Avatar")]));
        browser.update();
        browser.queue(BrowserMsg::FetchFailed {
            generation: 1,
            message: "Network error: timeout".to_string(),
        });
        browser.update();

        assert!(matches!(browser.state, FetchState::Success(_)));
    }

    #[test]
    fn failures_enter_the_error_state() {
        let mut browser = browser();
        browser.search("dune".to_string());
        browser.update();

        browser.queue(BrowserMsg::FetchFailed {
            generation: 1,
            message: "Invalid API key".to_string(),
        });
        browser.update();

        match &browser.state {
            FetchState::Error(message) => assert_eq!(message, "Invalid API key"),
            other => panic!("expected error, got {other:?}"),
        }
    }

    #[test]
    fn reload_refetches_the_current_query() {
        let mut browser = browser();
        browser.search("dune".to_string());
        browser.update();
        browser.queue(loaded(1, vec![movie(1, "Dune")]));
        browser.update();

        browser.reload();
        let commands = browser.update();

        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].name(), "Searching for \"dune\"");
        assert!(matches!(browser.state, FetchState::Loading));
    }

    #[test]
    fn empty_results_are_success_not_error() {
        let mut browser = browser();
        browser.search("zzzz".to_string());
        browser.update();

        browser.queue(loaded(1, Vec::new()));
        browser.update();

        match &browser.state {
            FetchState::Success(movies) => assert!(movies.is_empty()),
            other => panic!("expected success, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn successful_searches_record_usage_once() {
        let mut mock = MockUsageRecorder::new();
        mock.expect_record()
            .times(1)
            .withf(|query, top| query == "batman" && top.id == 7)
            .returning(|_, _| Ok(()));

        let mut browser = browser_with_recorder(Some(Arc::new(mock)));
        browser.search("batman".to_string());
        browser.update();

        browser.queue(loaded(1, vec![movie(7, "Batman"), movie(8, "Batman Returns")]));
        let commands = browser.update();

        assert_eq!(commands.len(), 1);
        for command in commands {
            command.execute().await.unwrap();
        }
    }

    #[test]
    fn popular_movie_loads_are_not_recorded() {
        let mock = MockUsageRecorder::new();

        let mut browser = browser_with_recorder(Some(Arc::new(mock)));
        browser.init("");
        browser.update();

        browser.queue(loaded(1, vec![movie(1, "Dune")]));
        let commands = browser.update();

        assert!(commands.is_empty());
    }

    #[test]
    fn searches_without_results_are_not_recorded() {
        let mock = MockUsageRecorder::new();

        let mut browser = browser_with_recorder(Some(Arc::new(mock)));
        browser.search("zzzz".to_string());
        browser.update();

        browser.queue(loaded(1, Vec::new()));
        let commands = browser.update();

        assert!(commands.is_empty());
    }

    #[test]
    fn rendering_the_same_state_twice_is_identical() {
        let mut browser = browser();
        browser.search("dune".to_string());
        browser.update();
        browser.queue(loaded(1, vec![movie(1, "Dune"), movie(2, "Dune: Part Two")]));
        browser.update();

        let theme = Theme::default();
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();

        terminal
            .draw(|frame| browser.render(frame, frame.area(), &theme))
            .unwrap();
        let first = terminal.backend().buffer().clone();

        terminal
            .draw(|frame| browser.render(frame, frame.area(), &theme))
            .unwrap();

        assert_eq!(first, *terminal.backend().buffer());
    }

    #[test]
    fn error_state_renders_the_message() {
        let mut browser = browser();
        browser.search("dune".to_string());
        browser.update();
        browser.queue(BrowserMsg::FetchFailed {
            generation: 1,
            message: "Invalid API key".to_string(),
        });
        browser.update();

        let theme = Theme::default();
        let mut terminal = Terminal::new(TestBackend::new(80, 10)).unwrap();
        terminal
            .draw(|frame| browser.render(frame, frame.area(), &theme))
            .unwrap();

        let content: String = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect();
        assert!(content.contains("Invalid API key"));
    }

    #[test]
    fn navigation_only_works_with_results() {
        let mut browser = browser();
        let down = KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE);

        assert!(!browser.handle_key(down));

        browser.search("dune".to_string());
        browser.update();
        browser.queue(loaded(1, vec![movie(1, "Dune"), movie(2, "Dune: Part Two")]));
        browser.update();

        assert!(browser.handle_key(down));
    }
}
