// src/notion/types.rs
// =============================================================================
// This module models the Notion API payloads as typed Rust structs.
//
// The API returns two shapes we care about:
// - A block listing: the child blocks of a page (GET /blocks/{id}/children)
// - A page listing: the rows of a database (POST /databases/{id}/query)
//
// Instead of poking into untyped JSON dictionaries, we declare the closed set
// of block kinds we understand as an enum. Everything else falls into the
// `Other` variant, so an unknown block kind never breaks deserialization.
//
// Rust concepts:
// - Enums with data: Each block kind carries its own payload
// - serde attributes: Map the wire format onto our types declaratively
// - Option<T>: For payload fields that may be absent
// =============================================================================

use serde::Deserialize;

// The envelope for a block-children response
//
// Wire shape:
//   { "object": "list", "results": [ { ...block... }, ... ] }
//
// We only keep "results"; the other envelope fields are ignored
#[derive(Debug, Clone, Deserialize)]
pub struct BlockListing {
    /// The child blocks, in the order the page shows them
    #[serde(default)]
    pub results: Vec<Block>,
}

// The envelope for a database query response
//
// Wire shape:
//   { "object": "list", "results": [ { "id": "...", ... }, ... ] }
#[derive(Debug, Clone, Deserialize)]
pub struct PageListing {
    /// The pages (database rows) returned by the query
    #[serde(default)]
    pub results: Vec<PageStub>,
}

// A database row - we only need its page id
#[derive(Debug, Clone, Deserialize)]
pub struct PageStub {
    pub id: String,
}

// One content block belonging to a page
//
// Every block has an id and a has_children flag; the rest of the payload
// depends on its "type" tag, which serde routes into BlockPayload for us
#[derive(Debug, Clone, Deserialize)]
pub struct Block {
    /// The block's own identifier (for child_page blocks this IS the page id)
    pub id: String,

    /// Whether the block has nested child blocks
    ///
    /// Not every payload carries this field, so default to false
    #[serde(default)]
    pub has_children: bool,

    /// The type-specific payload
    ///
    /// #[serde(flatten)] means the enum tag and payload live at the same
    /// JSON level as "id" and "has_children", exactly like the wire format
    #[serde(flatten)]
    pub payload: BlockPayload,
}

// The closed set of block kinds we understand
//
// #[serde(tag = "type")] matches the Notion convention where the payload
// lives under a key named after the type:
//   { "type": "paragraph", "paragraph": { "rich_text": [...] } }
//
// The #[serde(other)] variant swallows every kind we don't model
// (bookmarks, images, dividers, ...) so they simply contribute nothing.
// Payload fields are defaulted: a block whose declared type doesn't carry
// the expected payload degrades to empty content instead of poisoning the
// whole listing it arrived in
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BlockPayload {
    /// A plain paragraph of rich text
    Paragraph {
        #[serde(default)]
        paragraph: RichTextBody,
    },

    /// Headings, levels 1 to 3
    #[serde(rename = "heading_1")]
    Heading1 {
        #[serde(default)]
        heading_1: RichTextBody,
    },
    #[serde(rename = "heading_2")]
    Heading2 {
        #[serde(default)]
        heading_2: RichTextBody,
    },
    #[serde(rename = "heading_3")]
    Heading3 {
        #[serde(default)]
        heading_3: RichTextBody,
    },

    /// Bulleted and numbered list items
    BulletedListItem {
        #[serde(default)]
        bulleted_list_item: RichTextBody,
    },
    NumberedListItem {
        #[serde(default)]
        numbered_list_item: RichTextBody,
    },

    /// A page nested directly under this one; the block id is the page id
    ChildPage {
        #[serde(default)]
        child_page: ChildPageBody,
    },

    /// A cross-reference to some other page
    LinkToPage {
        #[serde(default)]
        link_to_page: LinkTarget,
    },

    /// A column layout container; its children are the columns
    ColumnList,

    /// A single column inside a column_list
    Column,

    /// A database embedded in the page; the block id is the database id
    ChildDatabase,

    /// Anything we don't model - carries no payload we look at
    #[serde(other)]
    Other,
}

// The rich-text body shared by all six textual block kinds
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RichTextBody {
    #[serde(default)]
    pub rich_text: Vec<RichTextRun>,
}

// One run of rich text
//
// Runs that aren't plain text (mentions, equations) have no "text" payload;
// those are skipped when we concatenate
#[derive(Debug, Clone, Deserialize)]
pub struct RichTextRun {
    #[serde(default)]
    pub text: Option<TextPayload>,
}

// The actual characters of a plain-text run
#[derive(Debug, Clone, Deserialize)]
pub struct TextPayload {
    #[serde(default)]
    pub content: String,
}

// The payload of a child_page block
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChildPageBody {
    /// The page title, for diagnostics only
    #[serde(default)]
    pub title: String,
}

// The payload of a link_to_page block
//
// The referenced page id can be absent (e.g. a link to a database instead);
// in that case the block contributes no link
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LinkTarget {
    #[serde(default)]
    pub page_id: Option<String>,
}

impl Block {
    // Returns the concatenated plain text of a textual block, or None if
    // this block kind carries no rich text (child pages, columns, ...)
    //
    // Runs without a text payload are skipped; the result is trimmed of
    // leading and trailing whitespace
    pub fn plain_text(&self) -> Option<String> {
        let body = match &self.payload {
            BlockPayload::Paragraph { paragraph } => paragraph,
            BlockPayload::Heading1 { heading_1 } => heading_1,
            BlockPayload::Heading2 { heading_2 } => heading_2,
            BlockPayload::Heading3 { heading_3 } => heading_3,
            BlockPayload::BulletedListItem { bulleted_list_item } => bulleted_list_item,
            BlockPayload::NumberedListItem { numbered_list_item } => numbered_list_item,
            _ => return None,
        };

        let mut text = String::new();
        for run in &body.rich_text {
            if let Some(payload) = &run.text {
                text.push_str(&payload.content);
            }
        }

        Some(text.trim().to_string())
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What does #[serde(tag = "type")] do?
//    - It makes serde look at the "type" field first
//    - Then it picks the matching enum variant and parses the rest
//    - This is called an "internally tagged" enum
//
// 2. What is #[serde(other)]?
//    - A fallback variant for unrecognized tags
//    - Without it, an unknown block type would be a deserialization error
//    - With it, unknown blocks just become BlockPayload::Other
//
// 3. What is #[serde(flatten)]?
//    - Merges the fields of an inner type into the outer JSON object
//    - Lets Block keep "id"/"has_children" while the enum handles "type"
//
// 4. Why #[serde(default)] on has_children?
//    - Some payloads omit the field entirely
//    - default gives us false instead of a parse error
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // Helper: parse a single block from a JSON literal
    fn parse_block(json: &str) -> Block {
        serde_json::from_str(json).expect("block should deserialize")
    }

    #[test]
    fn test_parse_paragraph_with_text() {
        let block = parse_block(
            r#"{
                "id": "block-1",
                "type": "paragraph",
                "has_children": false,
                "paragraph": {
                    "rich_text": [
                        {"text": {"content": "Hello "}},
                        {"text": {"content": "world"}}
                    ]
                }
            }"#,
        );

        assert_eq!(block.id, "block-1");
        assert_eq!(block.plain_text(), Some("Hello world".to_string()));
    }

    #[test]
    fn test_plain_text_is_trimmed() {
        let block = parse_block(
            r#"{
                "id": "block-1",
                "type": "heading_1",
                "heading_1": {
                    "rich_text": [{"text": {"content": "  Title  "}}]
                }
            }"#,
        );

        assert_eq!(block.plain_text(), Some("Title".to_string()));
    }

    #[test]
    fn test_run_without_text_payload_is_skipped() {
        // A mention run has no "text" key; concatenation should skip it
        let block = parse_block(
            r#"{
                "id": "block-1",
                "type": "paragraph",
                "paragraph": {
                    "rich_text": [
                        {"text": {"content": "before"}},
                        {"mention": {"type": "user"}},
                        {"text": {"content": " after"}}
                    ]
                }
            }"#,
        );

        assert_eq!(block.plain_text(), Some("before after".to_string()));
    }

    #[test]
    fn test_paragraph_without_payload_degrades_to_empty_text() {
        // Declared textual but missing its payload key: treated as empty,
        // not as a listing-wide parse failure
        let block = parse_block(r#"{"id": "b-1", "type": "paragraph"}"#);
        assert_eq!(block.plain_text(), Some(String::new()));
    }

    #[test]
    fn test_parse_child_page() {
        let block = parse_block(
            r#"{
                "id": "page-2",
                "type": "child_page",
                "has_children": true,
                "child_page": {"title": "Sub page"}
            }"#,
        );

        assert!(matches!(block.payload, BlockPayload::ChildPage { .. }));
        assert!(block.has_children);
        // Child pages carry no searchable text themselves
        assert_eq!(block.plain_text(), None);
    }

    #[test]
    fn test_parse_link_to_page() {
        let block = parse_block(
            r#"{
                "id": "block-3",
                "type": "link_to_page",
                "link_to_page": {"type": "page_id", "page_id": "linked-page"}
            }"#,
        );

        match block.payload {
            BlockPayload::LinkToPage { link_to_page } => {
                assert_eq!(link_to_page.page_id.as_deref(), Some("linked-page"));
            }
            other => panic!("unexpected payload: {:?}", other),
        }
    }

    #[test]
    fn test_link_to_page_without_target() {
        // A link to a database has no page_id; the field must come out None
        let block = parse_block(
            r#"{
                "id": "block-3",
                "type": "link_to_page",
                "link_to_page": {"type": "database_id", "database_id": "db-1"}
            }"#,
        );

        match block.payload {
            BlockPayload::LinkToPage { link_to_page } => {
                assert_eq!(link_to_page.page_id, None);
            }
            other => panic!("unexpected payload: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_type_falls_back_to_other() {
        let block = parse_block(
            r#"{
                "id": "block-4",
                "type": "bookmark",
                "bookmark": {"url": "https://example.com"}
            }"#,
        );

        assert!(matches!(block.payload, BlockPayload::Other));
        // has_children was absent, so it defaults to false
        assert!(!block.has_children);
    }

    #[test]
    fn test_parse_block_listing() {
        let listing: BlockListing = serde_json::from_str(
            r#"{
                "object": "list",
                "results": [
                    {"id": "b-1", "type": "paragraph", "paragraph": {"rich_text": []}},
                    {"id": "b-2", "type": "column_list", "has_children": true, "column_list": {}}
                ]
            }"#,
        )
        .expect("listing should deserialize");

        assert_eq!(listing.results.len(), 2);
        assert!(matches!(listing.results[1].payload, BlockPayload::ColumnList));
    }

    #[test]
    fn test_parse_page_listing() {
        let listing: PageListing = serde_json::from_str(
            r#"{
                "object": "list",
                "results": [
                    {"id": "row-1", "object": "page"},
                    {"id": "row-2", "object": "page"}
                ]
            }"#,
        )
        .expect("listing should deserialize");

        let ids: Vec<&str> = listing.results.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["row-1", "row-2"]);
    }
}
