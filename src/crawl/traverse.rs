// src/crawl/traverse.rs
// =============================================================================
// This module discovers every page reachable from a root page.
//
// How it works:
// 1. Start with the root page id on a stack
// 2. Pop an id; skip it if already visited, otherwise mark it visited
// 3. Fetch its block listing (at most once per id, thanks to the cache)
// 4. Extract the page links from the listing
// 5. Push every unvisited link onto the stack
// 6. Repeat until the stack is empty
//
// Marking an id visited BEFORE fetching it means a page that links to
// itself, or two pages linking to each other, can never cause a loop: the
// visited set only grows, and every id is processed at most once. That also
// bounds the number of API calls by the number of distinct reachable pages.
//
// All state (visited set, fetch cache) lives inside one call to
// discover_pages and dies with it. Concurrent searches each get their own
// state for free; nothing is shared.
//
// Rust concepts:
// - HashSet: To track visited ids (O(1) lookup)
// - HashMap: The per-run fetch cache
// - Vec as a stack: push/pop from the end gives depth-first order
// =============================================================================

use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use crate::extract::extract_page_links;
use crate::notion::{Block, NotionClient};

// Discovers all pages reachable from `root` by following links
//
// Returns the visited set: every id the traversal attempted, including ids
// whose fetch failed (they simply contributed no further links). A dead
// root therefore yields a set containing just the root id.
pub async fn discover_pages(client: &NotionClient, root: &str) -> HashSet<String> {
    let mut visited: HashSet<String> = HashSet::new();

    // At most one fetch per id; repeat encounters hit this cache
    let mut cache: HashMap<String, Vec<Block>> = HashMap::new();

    // Depth-first worklist
    let mut stack: Vec<String> = vec![root.to_string()];

    while let Some(page_id) = stack.pop() {
        // Skip pages we already handled (cycles land here)
        if visited.contains(&page_id) {
            continue;
        }

        // Mark visited before fetching, so even a self-referential page
        // is processed exactly once
        visited.insert(page_id.clone());

        if !cache.contains_key(&page_id) {
            match client.fetch_blocks(&page_id).await {
                Ok(blocks) => {
                    cache.insert(page_id.clone(), blocks);
                }
                Err(e) => {
                    // A dead page costs us its neighbors, nothing more
                    warn!(error = %e, "skipping unreachable page");
                    continue;
                }
            }
        }

        let blocks = match cache.get(&page_id) {
            Some(blocks) => blocks,
            None => continue,
        };

        let links = extract_page_links(client, blocks).await;
        debug!(page_id = %page_id, links = links.len(), "expanded page");

        for linked_id in links {
            if !visited.contains(&linked_id) {
                stack.push(linked_id);
            }
        }
    }

    visited
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why a Vec instead of recursion?
//    - A deep chain of pages would grow the call stack with recursion
//    - An explicit stack grows on the heap instead and never overflows
//    - pop() from the end gives the same depth-first order
//
// 2. Why both a visited set AND a cache?
//    - visited answers "have I processed this id?"
//    - the cache answers "have I fetched this id's content?"
//    - They coincide here, but keeping them separate makes the at-most-one-
//      fetch rule explicit and survivable if processing ever changes
//
// 3. Why does a failed fetch stay in the visited set?
//    - The traversal DID attempt the page; retrying it later in the same
//      run would just fail again
//    - Its entry simply has no cached content and no outgoing links
// -----------------------------------------------------------------------------
