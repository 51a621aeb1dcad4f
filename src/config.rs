// src/config.rs
// =============================================================================
// Runtime configuration for one process run.
//
// Everything the Notion client needs (API token, root page id) is collected
// here ONCE at startup and then passed around explicitly. There is no global
// mutable state and nothing is read from the environment after this point.
//
// Both values arrive through clap: the token from the NOTION_API_KEY
// environment variable, the root page from --root or NOTION_PAGE_ID.
// Missing values are fatal before any network request is made, so the
// operator gets a clear message instead of a confusing 401 later.
// =============================================================================

use anyhow::{anyhow, Result};

// Everything needed to talk to one Notion workspace
#[derive(Debug, Clone)]
pub struct Config {
    /// The integration token, sent as a Bearer header on every request
    pub api_token: String,

    /// The page id the traversal starts from
    pub root_page: String,
}

impl Config {
    // Builds the configuration from the values clap collected
    //
    // Returns an error with an operator-friendly message when something
    // required is missing or blank
    pub fn resolve(api_token: Option<String>, root_page: Option<String>) -> Result<Config> {
        let api_token = api_token
            .filter(|token| !token.trim().is_empty())
            .ok_or_else(|| {
                anyhow!("NOTION_API_KEY is not set. Export your integration token first.")
            })?;

        let root_page = root_page
            .filter(|page| !page.trim().is_empty())
            .ok_or_else(|| {
                anyhow!("No root page id given. Pass --root <PAGE_ID> or set NOTION_PAGE_ID.")
            })?;

        Ok(Config {
            api_token,
            root_page,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_with_both_values() {
        let config =
            Config::resolve(Some("secret".to_string()), Some("page-1".to_string())).unwrap();
        assert_eq!(config.api_token, "secret");
        assert_eq!(config.root_page, "page-1");
    }

    #[test]
    fn test_missing_token_is_an_error() {
        let result = Config::resolve(None, Some("page-1".to_string()));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("NOTION_API_KEY"));
    }

    #[test]
    fn test_blank_root_is_an_error() {
        let result = Config::resolve(Some("secret".to_string()), Some("   ".to_string()));
        assert!(result.is_err());
    }
}
