// src/search/engine.rs
// =============================================================================
// The search engine: match a query against every reachable page.
//
// How it works:
// 1. Discover all pages reachable from the root (crawl module)
// 2. Fetch each page's block listing
// 3. For every textual block, concatenate its rich-text runs and apply the
//    match predicate
// 4. Collect matches as block_id -> [matched text]
//
// The search phase fetches pages afresh instead of reusing the traversal's
// cache; the traversal cache is scoped to discovery and dies with it. One
// extra fetch per page is the cost, and the behavior is kept as-is.
//
// Failure model: a page that cannot be fetched is skipped. The caller always
// gets a map back - possibly empty, never an error. Partial results beat no
// results when one page in a big workspace is broken.
// =============================================================================

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::crawl::discover_pages;
use crate::notion::NotionClient;
use crate::search::matcher::is_match;

// Searches every page reachable from `root` for `query`
//
// Returns a map from block id to a one-element vector holding the block's
// text. The vector shape is the output contract (JSON consumers get
// {"block-id": ["text"]}), so keep it even though one block matches at
// most once.
pub async fn search_pages(
    client: &NotionClient,
    query: &str,
    root: &str,
) -> HashMap<String, Vec<String>> {
    let pages = discover_pages(client, root).await;
    debug!(pages = pages.len(), "discovery finished, scanning for matches");

    let mut matches: HashMap<String, Vec<String>> = HashMap::new();

    for page_id in &pages {
        let blocks = match client.fetch_blocks(page_id).await {
            Ok(blocks) => blocks,
            Err(e) => {
                // This page contributes no matches; keep scanning the rest
                warn!(error = %e, "skipping page during search");
                continue;
            }
        };

        for block in blocks {
            // Non-textual blocks (child pages, columns, databases, unknown
            // kinds) have no text and are skipped here
            if let Some(text) = block.plain_text() {
                if is_match(&text, query) {
                    matches.insert(block.id, vec![text]);
                }
            }
        }
    }

    matches
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why fetch again instead of reusing discovery's cache?
//    - The cache lives inside discover_pages and is dropped when it returns
//    - Discovery and matching stay independent phases with a narrow seam
//      (just the set of page ids) between them
//
// 2. Why HashMap<String, Vec<String>>?
//    - The output contract is id -> list-of-text, serialized straight to
//      JSON for --json consumers
//    - insert() overwrites, which is fine: block ids are unique per page
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn test_config() -> Config {
        Config {
            api_token: "test-token".to_string(),
            root_page: "root".to_string(),
        }
    }

    async fn client_for(server: &mockito::ServerGuard) -> NotionClient {
        NotionClient::with_base_url(&test_config(), &server.url()).unwrap()
    }

    #[tokio::test]
    async fn test_single_page_match() {
        let mut server = mockito::Server::new_async().await;

        // Fetched twice: once by discovery, once by the matching pass
        let mock = server
            .mock("GET", "/blocks/root/children")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"results": [
                    {"id": "block-1", "type": "paragraph",
                     "paragraph": {"rich_text": [{"text": {"content": "Significant Impact"}}]}}
                ]}"#,
            )
            .expect(2)
            .create_async()
            .await;

        let client = client_for(&server).await;
        let matches = search_pages(&client, "Significant Impact", "root").await;

        assert_eq!(matches.len(), 1);
        assert_eq!(
            matches.get("block-1"),
            Some(&vec!["Significant Impact".to_string()])
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_matches_across_linked_pages() {
        let mut server = mockito::Server::new_async().await;

        server
            .mock("GET", "/blocks/root/children")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"results": [
                    {"id": "b-1", "type": "heading_1",
                     "heading_1": {"rich_text": [{"text": {"content": "release notes"}}]}},
                    {"id": "child", "type": "child_page", "child_page": {"title": "Child"}}
                ]}"#,
            )
            .create_async()
            .await;
        server
            .mock("GET", "/blocks/child/children")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"results": [
                    {"id": "b-2", "type": "bulleted_list_item",
                     "bulleted_list_item": {"rich_text": [{"text": {"content": "more release details"}}]}},
                    {"id": "b-3", "type": "paragraph",
                     "paragraph": {"rich_text": [{"text": {"content": "unrelated"}}]}}
                ]}"#,
            )
            .create_async()
            .await;

        let client = client_for(&server).await;
        let matches = search_pages(&client, "release", "root").await;

        assert_eq!(matches.len(), 2);
        assert!(matches.contains_key("b-1"));
        assert!(matches.contains_key("b-2"));
        assert!(!matches.contains_key("b-3"));
    }

    #[tokio::test]
    async fn test_failed_page_contributes_no_matches() {
        let mut server = mockito::Server::new_async().await;

        server
            .mock("GET", "/blocks/root/children")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"results": [
                    {"id": "b-1", "type": "paragraph",
                     "paragraph": {"rich_text": [{"text": {"content": "needle here"}}]}},
                    {"id": "broken", "type": "child_page", "child_page": {"title": "B"}}
                ]}"#,
            )
            .create_async()
            .await;
        server
            .mock("GET", "/blocks/broken/children")
            .with_status(500)
            .create_async()
            .await;

        let client = client_for(&server).await;
        let matches = search_pages(&client, "needle", "root").await;

        // The broken page is silently excluded; the root still matched
        assert_eq!(matches.len(), 1);
        assert!(matches.contains_key("b-1"));
    }

    #[tokio::test]
    async fn test_no_matches_yields_empty_map() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/blocks/root/children")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"results": [
                    {"id": "b-1", "type": "paragraph",
                     "paragraph": {"rich_text": [{"text": {"content": "nothing relevant"}}]}}
                ]}"#,
            )
            .create_async()
            .await;

        let client = client_for(&server).await;
        let matches = search_pages(&client, "absent", "root").await;

        assert!(matches.is_empty());
    }

    #[tokio::test]
    async fn test_child_page_titles_are_not_searched() {
        // Only rich-text blocks are matched; a child_page block has a title
        // but no searchable body of its own
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/blocks/root/children")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"results": [
                    {"id": "child", "type": "child_page", "child_page": {"title": "needle"}}
                ]}"#,
            )
            .create_async()
            .await;
        server
            .mock("GET", "/blocks/child/children")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"results": []}"#)
            .create_async()
            .await;

        let client = client_for(&server).await;
        let matches = search_pages(&client, "needle", "root").await;

        assert!(matches.is_empty());
    }
}
