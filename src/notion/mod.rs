// src/notion/mod.rs
// =============================================================================
// This module contains everything that touches the Notion API.
//
// Submodules:
// - types: Typed models of the API payloads (blocks, listings, rich text)
// - client: The HTTP client that fetches block and page listings
//
// This file (mod.rs) is the module root - it re-exports the public API so
// the rest of the app can write `notion::NotionClient` instead of
// `notion::client::NotionClient`.
// =============================================================================

pub mod client;
pub mod types;

// Re-export the items the rest of the app uses
pub use client::{FetchError, NotionClient};
pub use types::{Block, BlockListing, BlockPayload, PageListing};
