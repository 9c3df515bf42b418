use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc::UnboundedSender;
use tracing::warn;

use crate::browser::message::BrowserMsg;
use crate::command::Command;
use crate::tmdb::{Movie, TmdbClient};
use crate::usage::UsageRecorder;

/// Fetch movies for a query and report the outcome to the browser.
pub struct FetchMoviesCmd {
    client: TmdbClient,
    query: String,
    generation: u64,
    tx: UnboundedSender<BrowserMsg>,
}

impl FetchMoviesCmd {
    pub const fn new(
        client: TmdbClient,
        query: String,
        generation: u64,
        tx: UnboundedSender<BrowserMsg>,
    ) -> Self {
        Self {
            client,
            query,
            generation,
            tx,
        }
    }
}

#[async_trait]
impl Command for FetchMoviesCmd {
    fn name(&self) -> String {
        if self.query.is_empty() {
            "Loading popular movies".to_string()
        } else {
            format!("Searching for {:?}", self.query)
        }
    }

    async fn execute(self: Box<Self>) -> color_eyre::Result<()> {
        let message = match self.client.fetch_movies(&self.query).await {
            Ok(movies) => BrowserMsg::MoviesLoaded {
                generation: self.generation,
                movies,
            },
            Err(e) => BrowserMsg::FetchFailed {
                generation: self.generation,
                message: e.to_string(),
            },
        };
        let _ = self.tx.send(message);
        Ok(())
    }
}

/// Record one search hit against the usage counter. Fire and forget: errors
/// are logged, never shown.
pub struct RecordSearchCmd {
    recorder: Arc<dyn UsageRecorder>,
    query: String,
    top: Movie,
}

impl RecordSearchCmd {
    pub fn new(recorder: Arc<dyn UsageRecorder>, query: String, top: Movie) -> Self {
        Self {
            recorder,
            query,
            top,
        }
    }
}

#[async_trait]
impl Command for RecordSearchCmd {
    fn name(&self) -> String {
        format!("Recording search {:?}", self.query)
    }

    async fn execute(self: Box<Self>) -> color_eyre::Result<()> {
        if let Err(e) = self.recorder.record(&self.query, &self.top).await {
            warn!("Failed to record search {:?}: {e}", self.query);
        }
        Ok(())
    }
}
