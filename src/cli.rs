// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes. The 'env' feature lets arguments fall back
// to environment variables, which is where credentials live anyway.
//
// Rust concepts:
// - Structs: Custom data types that group related data
// - Enums: Types that can be one of several variants
// - Derive macros: Automatically generate code for our types
// =============================================================================

use clap::{Parser, Subcommand};

// This struct represents our entire CLI application
#[derive(Parser, Debug)]
#[command(
    name = "notion-scout",
    version = "0.1.0",
    about = "Search text across every Notion page reachable from a root page",
    long_about = "notion-scout crawls the graph of linked pages in a Notion workspace, \
                  starting from a root page, and searches every discovered page for a \
                  text query. Pages nested in columns and linked databases are found too."
)]
pub struct Cli {
    /// Notion integration token
    ///
    /// Usually supplied through the NOTION_API_KEY environment variable
    /// so it doesn't end up in shell history
    #[arg(long, env = "NOTION_API_KEY", hide_env_values = true, global = true)]
    pub token: Option<String>,

    // The #[command(subcommand)] attribute tells clap that this field
    // will hold one of the subcommands defined in the Commands enum
    #[command(subcommand)]
    pub command: Commands,
}

// This enum defines our subcommands (search, crawl)
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search every reachable page for a text query
    ///
    /// Example: notion-scout search "significant impact" --root 1234abcd
    Search {
        /// Text to look for (case-insensitive, substring match)
        ///
        /// This is a positional argument (required)
        query: String,

        /// Page id to start crawling from
        ///
        /// Falls back to the NOTION_PAGE_ID environment variable
        #[arg(long, env = "NOTION_PAGE_ID")]
        root: Option<String>,

        /// Output results in JSON format instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Discover and list every page reachable from the root page
    ///
    /// Example: notion-scout crawl --root 1234abcd
    Crawl {
        /// Page id to start crawling from
        ///
        /// Falls back to the NOTION_PAGE_ID environment variable
        #[arg(long, env = "NOTION_PAGE_ID")]
        root: Option<String>,

        /// Output the page ids as a JSON array instead of a list
        #[arg(long)]
        json: bool,
    },
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What does env = "NOTION_PAGE_ID" do?
//    - If the flag isn't passed, clap reads the environment variable
//    - The --help output documents the fallback automatically
//
// 2. Why is the token global = true?
//    - Global args are accepted on any subcommand
//    - Every subcommand talks to the API, so every one needs the token
//
// 3. Why Option<String> for token and root?
//    - clap can't know at parse time whether the env fallback exists
//    - Config::resolve turns a missing value into a proper error message
// -----------------------------------------------------------------------------
