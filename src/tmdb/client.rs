use reqwest::header;
use serde::Deserialize;
use tracing::debug;

use crate::config::TmdbConfig;
use crate::tmdb::error::TmdbError;
use crate::tmdb::model::{Movie, MoviePage};

/// Shown when the API reports a failure without a usable message.
const FALLBACK_ERROR: &str = "Failed to fetch movies";

/// Client for the TMDB REST API.
///
/// Cheap to clone; the underlying connection pool is shared between clones.
#[derive(Debug, Clone)]
pub struct TmdbClient {
    http: reqwest::Client,
    config: TmdbConfig,
}

impl TmdbClient {
    #[must_use]
    pub fn new(config: TmdbConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Fetch movies for a query. An empty query returns the most popular
    /// movies instead of search results.
    pub async fn fetch_movies(&self, query: &str) -> Result<Vec<Movie>, TmdbError> {
        let response = self
            .request_for(query)
            .send()
            .await
            .map_err(TmdbError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!("TMDB request failed with status {status}");
            return Err(TmdbError::Api(status_message(&body)));
        }

        let page = response
            .json::<MoviePage>()
            .await
            .map_err(TmdbError::Decode)?;
        debug!("Fetched {} movies for query {query:?}", page.results.len());
        Ok(page.results)
    }

    fn request_for(&self, query: &str) -> reqwest::RequestBuilder {
        let request = if query.is_empty() {
            self.http
                .get(format!("{}/discover/movie", self.config.base_url))
                .query(&[("sort_by", "popularity.desc")])
        } else {
            self.http
                .get(format!("{}/search/movie", self.config.base_url))
                .query(&[("query", query)])
        };

        request
            .query(&[("language", self.config.language.as_str())])
            .bearer_auth(&self.config.api_token)
            .header(header::ACCEPT, "application/json")
    }
}

/// Extract the API's `status_message` from an error body, if there is one.
fn status_message(body: &str) -> String {
    #[derive(Deserialize)]
    struct StatusBody {
        status_message: Option<String>,
    }

    serde_json::from_str::<StatusBody>(body)
        .ok()
        .and_then(|parsed| parsed.status_message)
        .unwrap_or_else(|| FALLBACK_ERROR.to_string())
}
