//! UI building blocks shared across the application.

pub mod movie_table;
pub mod search_bar;
pub mod spinner;
pub mod status_bar;

use color_eyre::Result;
use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;

use crate::Theme;

/// Result of handling an input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventResult<E> {
    /// The event was not handled and should propagate.
    Ignored,
    /// The event was handled; nothing further to do.
    Consumed,
    /// The event was handled and produced an output event.
    Event(E),
}

impl<E> From<E> for EventResult<E> {
    fn from(event: E) -> Self {
        Self::Event(event)
    }
}

/// An interactive piece of the UI.
///
/// Components handle input, advance on ticks and draw themselves. Anything a
/// component wants its owner to act on is surfaced through [`Self::Output`].
pub trait Component {
    type Output;

    fn handle_key(&mut self, key: KeyEvent) -> Result<EventResult<Self::Output>> {
        _ = key;
        Ok(EventResult::Ignored)
    }

    fn handle_tick(&mut self) {}

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme);
}

/// A key hint shown in the status bar.
#[derive(Debug, Clone)]
pub struct Keybinding {
    pub key: String,
    pub description: String,
}

impl Keybinding {
    pub fn new(key: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            description: description.into(),
        }
    }
}
