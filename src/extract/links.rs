// src/extract/links.rs
// =============================================================================
// This module finds the pages reachable ONE hop from a block listing.
//
// A page can link to another page in four different ways:
// 1. A child_page block (the page lives directly under this one)
// 2. A link_to_page block (a cross-reference to a page anywhere)
// 3. Inside a column layout (column_list -> column -> blocks), which takes
//    extra fetches to see into
// 4. Through an embedded database (child_database), whose rows are pages
//
// On top of that, toggle-able blocks (a paragraph or list item with
// has_children set) can hide any of the above inside their children, so
// those get expanded too.
//
// Implementation: a worklist of blocks instead of recursion. Container
// fetches push their children onto the worklist, so arbitrarily nested
// layouts need no recursive calls. The result is a set, so the same page
// discovered twice in one listing is reported once.
//
// No caching happens here: the traverser caches at the page level, and the
// sub-fetches inside a single extraction are expected to be unique anyway.
// =============================================================================

use std::collections::{HashSet, VecDeque};

use tracing::debug;

use crate::notion::{Block, BlockPayload, NotionClient};

// Extracts the ids of all pages reachable one hop from the given blocks
//
// Sub-fetches that fail contribute nothing; extraction never aborts because
// one container or database could not be expanded
pub async fn extract_page_links(client: &NotionClient, blocks: &[Block]) -> HashSet<String> {
    let mut links = HashSet::new();

    // Blocks still to be inspected; container expansion appends to this
    let mut pending: VecDeque<Block> = blocks.iter().cloned().collect();

    while let Some(block) = pending.pop_front() {
        match &block.payload {
            // The child page's id is the block's own id
            BlockPayload::ChildPage { child_page } => {
                debug!(title = %child_page.title, "found child page");
                links.insert(block.id.clone());
            }

            // A cross-reference; the target can be absent (e.g. a link to
            // a database), in which case the block contributes nothing
            BlockPayload::LinkToPage { link_to_page } => {
                if let Some(page_id) = &link_to_page.page_id {
                    links.insert(page_id.clone());
                }
            }

            // A column layout: its children are the columns themselves,
            // which we inspect in turn
            BlockPayload::ColumnList => {
                match client.fetch_blocks(&block.id).await {
                    Ok(columns) => pending.extend(columns),
                    Err(e) => debug!(error = %e, "could not expand column list"),
                }
            }

            // A single column: look inside only when it has content
            BlockPayload::Column => {
                if block.has_children {
                    match client.fetch_blocks(&block.id).await {
                        Ok(children) => pending.extend(children),
                        Err(e) => debug!(error = %e, "could not expand column"),
                    }
                }
            }

            // An embedded database: every row is a page
            BlockPayload::ChildDatabase => {
                links.extend(client.fetch_collection_pages(&block.id).await);
            }

            // Any other kind: only interesting when it hides children
            // (e.g. a toggle paragraph with nested blocks)
            _ => {
                if block.has_children {
                    match client.fetch_blocks(&block.id).await {
                        Ok(children) => pending.extend(children),
                        Err(e) => debug!(error = %e, "could not expand block children"),
                    }
                }
            }
        }
    }

    links
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why a worklist instead of recursion?
//    - Async recursion in Rust needs boxed futures (extra ceremony)
//    - A VecDeque of blocks expresses "things left to inspect" directly
//    - Nesting depth is then limited by memory, not the call stack
//
// 2. Why is ChildPage handled before the has_children fallback?
//    - A child page usually HAS children - its own content!
//    - But those belong to the next page, not to this listing
//    - The traverser will fetch that page itself; expanding it here would
//      double-count its links
//
// 3. What does links.extend(...) do?
//    - Inserts every element of an iterator into the set
//    - Duplicates are absorbed silently - that's the point of a set
// -----------------------------------------------------------------------------
