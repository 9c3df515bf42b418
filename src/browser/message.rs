use crate::tmdb::Movie;

/// Messages processed by the movie browser.
///
/// Everything that mutates browser state flows through this type, whether it
/// originates from user input or from a completed fetch.
#[derive(Debug, Clone)]
pub enum BrowserMsg {
    // === User intents ===
    /// Dispatch a fetch for the given query. An empty query fetches the
    /// popular movies list.
    Fetch(String),

    // === Fetch results ===
    /// A fetch completed. `generation` identifies which dispatch it belongs
    /// to; anything but the latest is discarded.
    MoviesLoaded {
        generation: u64,
        movies: Vec<Movie>,
    },
    /// A fetch failed with a displayable message.
    FetchFailed {
        generation: u64,
        message: String,
    },
}
