//! Search-popularity tracking.
//!
//! Every successful search for a non-empty query bumps a per-term counter in
//! an Appwrite collection, keyed by the search term and annotated with the
//! top-ranked result. Recording is fire-and-forget: failures are logged by
//! the dispatching command and never surface in the UI.

use async_trait::async_trait;
use color_eyre::eyre::eyre;
use serde::Deserialize;
use serde_json::json;

use crate::config::UsageConfig;
use crate::tmdb::Movie;

/// Records which search terms users run and how often.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsageRecorder: Send + Sync {
    /// Record one hit for `query`, associating the top-ranked result with it.
    async fn record(&self, query: &str, top: &Movie) -> color_eyre::Result<()>;
}

/// [`UsageRecorder`] backed by an Appwrite document collection.
///
/// Keeps one document per search term with the shape
/// `{ searchTerm, count, movie_id, poster_url }`.
pub struct AppwriteRecorder {
    http: reqwest::Client,
    config: UsageConfig,
}

#[derive(Debug, Deserialize)]
struct DocumentPage {
    #[serde(default)]
    documents: Vec<SearchDocument>,
}

#[derive(Debug, Deserialize)]
struct SearchDocument {
    #[serde(rename = "$id")]
    id: String,
    #[serde(default)]
    count: u64,
}

impl AppwriteRecorder {
    #[must_use]
    pub fn new(config: UsageConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    fn documents_url(&self) -> String {
        format!(
            "{}/databases/{}/collections/{}/documents",
            self.config.endpoint, self.config.database_id, self.config.collection_id
        )
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("X-Appwrite-Project", &self.config.project_id)
            .header("X-Appwrite-Key", &self.config.api_key)
    }

    async fn find_document(&self, query: &str) -> color_eyre::Result<Option<SearchDocument>> {
        let response = self
            .authorize(self.http.get(self.documents_url()))
            .query(&[("queries[]", search_filter(query).to_string())])
            .send()
            .await?;

        let page: DocumentPage = parse_success(response).await?;
        Ok(page.documents.into_iter().next())
    }

    async fn bump_count(&self, document: &SearchDocument) -> color_eyre::Result<()> {
        let url = format!("{}/{}", self.documents_url(), document.id);
        let body = json!({ "data": { "count": document.count + 1 } });

        let response = self
            .authorize(self.http.patch(url))
            .json(&body)
            .send()
            .await?;

        expect_success(response).await
    }

    async fn create_document(&self, query: &str, top: &Movie) -> color_eyre::Result<()> {
        let response = self
            .authorize(self.http.post(self.documents_url()))
            .json(&new_document_body(query, top))
            .send()
            .await?;

        expect_success(response).await
    }
}

#[async_trait]
impl UsageRecorder for AppwriteRecorder {
    async fn record(&self, query: &str, top: &Movie) -> color_eyre::Result<()> {
        match self.find_document(query).await? {
            Some(document) => self.bump_count(&document).await,
            None => self.create_document(query, top).await,
        }
    }
}

/// Appwrite query filter matching documents for one search term.
fn search_filter(query: &str) -> serde_json::Value {
    json!({
        "method": "equal",
        "attribute": "searchTerm",
        "values": [query],
    })
}

/// Body for a fresh search-term document.
fn new_document_body(query: &str, top: &Movie) -> serde_json::Value {
    json!({
        "documentId": "unique()",
        "data": {
            "searchTerm": query,
            "count": 1,
            "movie_id": top.id,
            "poster_url": top.poster_url(),
        },
    })
}

async fn parse_success<T: for<'de> Deserialize<'de>>(
    response: reqwest::Response,
) -> color_eyre::Result<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(eyre!("Appwrite returned status {status}: {body}"));
    }
    Ok(response.json().await?)
}

async fn expect_success(response: reqwest::Response) -> color_eyre::Result<()> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(eyre!("Appwrite returned status {status}: {body}"));
    }
    Ok(())
}
