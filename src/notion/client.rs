// src/notion/client.rs
// =============================================================================
// This module talks to the Notion API over HTTP.
//
// Two operations, matching what the rest of the app needs:
// - fetch_blocks: list the child blocks of a page (or of any block)
// - fetch_collection_pages: list the pages inside an embedded database
//
// Error model:
// - fetch_blocks returns a FetchError VALUE carrying the failed id and the
//   status, instead of bubbling a panic or a bare transport error upward.
//   Callers decide whether a failed page aborts anything (it never does).
// - fetch_collection_pages degrades to an empty set and logs a warning,
//   so one broken database can't stop a traversal.
//
// Rust concepts:
// - Struct with methods: The client owns its reqwest::Client and base URL
// - thiserror: Derive a proper error enum with display messages
// - Result<T, E>: Explicit success/failure values
// =============================================================================

use std::collections::HashSet;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use thiserror::Error;
use tracing::warn;

use crate::config::Config;
use crate::notion::types::{Block, BlockListing, PageListing};

// The Notion API version we speak, sent with every request
const NOTION_VERSION: &str = "2022-06-28";

// Where the real API lives; tests point the client at a local mock server
const DEFAULT_BASE_URL: &str = "https://api.notion.com/v1";

// Per-request timeout so a stuck call surfaces as an error instead of
// blocking the whole traversal
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// A failed fetch, as a value
//
// Carries the identifier that failed so callers can log or skip that page
#[derive(Debug, Error)]
pub enum FetchError {
    /// The API answered with a non-success status code
    #[error("failed to fetch blocks for {id}: HTTP {status}")]
    Status { id: String, status: u16 },

    /// The request never completed (timeout, DNS, connection reset, ...)
    /// or the response body was not the JSON we expected
    #[error("failed to fetch blocks for {id}: {source}")]
    Transport {
        id: String,
        #[source]
        source: reqwest::Error,
    },
}

impl FetchError {
    /// The identifier whose fetch failed
    pub fn id(&self) -> &str {
        match self {
            FetchError::Status { id, .. } => id,
            FetchError::Transport { id, .. } => id,
        }
    }
}

// The HTTP client for one process run
//
// Construction takes the configuration explicitly; there is no global state.
// Cloning is cheap (reqwest::Client is reference-counted internally)
#[derive(Debug, Clone)]
pub struct NotionClient {
    http: Client,
    base_url: String,
}

impl NotionClient {
    // Creates a client against the real Notion API
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        Self::with_base_url(config, DEFAULT_BASE_URL)
    }

    // Creates a client against an arbitrary base URL
    //
    // Tests use this to point at a local mock server
    pub fn with_base_url(config: &Config, base_url: &str) -> anyhow::Result<Self> {
        // Every request carries the same three headers, so bake them into
        // the client once instead of repeating them per call
        let mut headers = HeaderMap::new();
        let bearer = format!("Bearer {}", config.api_token);
        let mut auth_value = HeaderValue::from_str(&bearer)?;
        auth_value.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth_value);
        headers.insert("Notion-Version", HeaderValue::from_static(NOTION_VERSION));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .default_headers(headers)
            .build()?;

        Ok(NotionClient {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    // Fetches the immediate child blocks of a page or block
    //
    // Works for page ids, column_list ids, column ids and toggle-able block
    // ids alike - the API treats them all as "list my children"
    //
    // Returns the blocks in page order, or a FetchError naming the id
    pub async fn fetch_blocks(&self, id: &str) -> Result<Vec<Block>, FetchError> {
        let url = format!("{}/blocks/{}/children", self.base_url, id);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                id: id.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                id: id.to_string(),
                status: status.as_u16(),
            });
        }

        let listing: BlockListing =
            response
                .json()
                .await
                .map_err(|source| FetchError::Transport {
                    id: id.to_string(),
                    source,
                })?;

        Ok(listing.results)
    }

    // Fetches the ids of all pages belonging to an embedded database
    //
    // On any failure this logs a warning and returns an empty set: a broken
    // database query should cost us its rows, not the whole traversal
    pub async fn fetch_collection_pages(&self, database_id: &str) -> HashSet<String> {
        let url = format!("{}/databases/{}/query", self.base_url, database_id);

        // An empty filter object queries every row
        let response = match self.http.post(&url).json(&serde_json::json!({})).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(database_id, error = %e, "database query failed");
                return HashSet::new();
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!(database_id, status = status.as_u16(), "database query failed");
            return HashSet::new();
        }

        match response.json::<PageListing>().await {
            Ok(listing) => listing.results.into_iter().map(|page| page.id).collect(),
            Err(e) => {
                warn!(database_id, error = %e, "database query returned unexpected JSON");
                HashSet::new()
            }
        }
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why default_headers?
//    - The Authorization and Notion-Version headers never change
//    - Setting them on the Client means every request gets them for free
//
// 2. What is set_sensitive?
//    - Marks the header value as secret
//    - Debug-printing the client then won't leak the API token
//
// 3. Why does fetch_collection_pages not return a Result?
//    - Its contract is "give me the rows you could get"
//    - Failure is reported through the log and an empty set
//    - The caller's control flow stays simple: just union the set in
//
// 4. What is map_err?
//    - Transforms the error type of a Result
//    - Here it wraps reqwest's error into our FetchError with the id
// -----------------------------------------------------------------------------
