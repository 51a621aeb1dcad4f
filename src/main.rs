// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Resolve the runtime configuration (API token, root page)
// 3. Dispatch to the appropriate subcommand handler
// 4. Print results and exit with a proper code
//
// Exit codes follow the grep convention:
//   0 = matches found (or crawl succeeded)
//   1 = search ran fine but nothing matched
//   2 = error (bad config, unusable arguments, ...)
//
// Rust concepts used:
// - async/await: All the Notion fetches are network I/O
// - Result<T, E>: For error handling
// - match: Pattern matching to handle different subcommands
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli; //      src/cli.rs - command-line parsing
mod config; //   src/config.rs - runtime configuration
mod crawl; //    src/crawl/ - page-graph traversal
mod extract; //  src/extract/ - page-link extraction
mod notion; //   src/notion/ - Notion API types and client
mod search; //   src/search/ - text search over discovered pages

use std::collections::HashMap;

use cli::{Cli, Commands};
use config::Config;
use notion::NotionClient;

use clap::Parser; // Parser trait enables the parse() method

// anyhow::Result is like std::result::Result but simpler for applications
// It lets us return any error type with the ? operator
use anyhow::Result;

// The #[tokio::main] attribute transforms our async main into a real main
// function: it creates a tokio runtime and runs our async code inside it
#[tokio::main]
async fn main() {
    init_tracing();

    // Run our application logic and capture the exit code
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // If an unexpected error occurred, print it and exit with code 2
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Sends diagnostic events (fetch failures, traversal progress) to stderr
//
// Verbosity is controlled with RUST_LOG, e.g. RUST_LOG=notion_scout=debug;
// without it only warnings show up. Stdout stays clean for results
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

// This is the main application logic
// Returns:
//   Ok(0) = success (search: at least one match)
//   Ok(1) = search succeeded but found nothing
//   Err = configuration or startup error (mapped to exit code 2)
async fn run() -> Result<i32> {
    // Parse command-line arguments into our Cli struct
    // This will automatically handle --help, --version, etc.
    let cli = Cli::parse();

    // Match on which subcommand was used
    match cli.command {
        Commands::Search { query, root, json } => {
            let config = Config::resolve(cli.token, root)?;
            handle_search(&config, &query, json).await
        }
        Commands::Crawl { root, json } => {
            let config = Config::resolve(cli.token, root)?;
            handle_crawl(&config, json).await
        }
    }
}

// Handles the 'search' subcommand
// Parameters:
//   config: resolved runtime configuration
//   query: the text to look for
//   json: whether to output JSON format
async fn handle_search(config: &Config, query: &str, json: bool) -> Result<i32> {
    println!("🔍 Searching for \"{}\" under page: {}", query, config.root_page);

    let client = NotionClient::new(config)?;

    // Crawl the page graph and scan every discovered page
    let matches = search::search_pages(&client, query, &config.root_page).await;

    print_matches(&matches, json)?;

    // grep-style exit code: 1 when nothing matched
    if matches.is_empty() {
        Ok(1)
    } else {
        Ok(0)
    }
}

// Handles the 'crawl' subcommand
// Parameters:
//   config: resolved runtime configuration
//   json: whether to output JSON format
async fn handle_crawl(config: &Config, json: bool) -> Result<i32> {
    println!("🔍 Crawling pages under: {}", config.root_page);

    let client = NotionClient::new(config)?;
    let pages = crawl::discover_pages(&client, &config.root_page).await;

    // Sort for stable, readable output (HashSet iteration order is random)
    let mut page_ids: Vec<&String> = pages.iter().collect();
    page_ids.sort();

    if json {
        println!("{}", serde_json::to_string_pretty(&page_ids)?);
    } else {
        println!("📄 Discovered {} page(s):\n", page_ids.len());
        for page_id in &page_ids {
            println!("   {}", page_id);
        }
    }

    Ok(0)
}

// Prints the search results either as a table or JSON
fn print_matches(matches: &HashMap<String, Vec<String>>, json: bool) -> Result<()> {
    if json {
        // Serialize the map to JSON and print
        let json_output = serde_json::to_string_pretty(matches)?;
        println!("{}", json_output);
    } else {
        // Print human-readable table
        print_table(matches);
    }
    Ok(())
}

// Prints matches as a human-readable table in the terminal
fn print_table(matches: &HashMap<String, Vec<String>>) {
    // Sort by block id for stable output
    let mut rows: Vec<(&String, &Vec<String>)> = matches.iter().collect();
    rows.sort_by_key(|(block_id, _)| *block_id);

    println!("\n{:<40} {:<60}", "BLOCK ID", "MATCHED TEXT");
    println!("{}", "=".repeat(100));

    for (block_id, texts) in &rows {
        for text in texts.iter() {
            // Truncate long text so the table stays readable
            let text_display = if text.chars().count() > 57 {
                let prefix: String = text.chars().take(57).collect();
                format!("{}...", prefix)
            } else {
                text.clone()
            };

            println!("{:<40} {:<60}", block_id, text_display);
        }
    }

    println!();

    // Print summary
    if matches.is_empty() {
        println!("📊 Summary: no matching blocks");
    } else {
        println!("📊 Summary: ✅ {} matching block(s)", matches.len());
    }
}
