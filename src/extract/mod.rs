// src/extract/mod.rs
// =============================================================================
// This module turns a block listing into the set of pages it links to.
//
// It knows about every way a Notion page can point at another page:
// direct child pages, cross-page links, links buried inside column layouts,
// and pages living as rows of an embedded database.
// =============================================================================

mod links;

// Re-export the one function everyone needs
pub use links::extract_page_links;
