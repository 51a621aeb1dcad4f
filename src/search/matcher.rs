// src/search/matcher.rs
// =============================================================================
// The match predicate: does this block's text satisfy the query?
//
// Two checks, in order:
// 1. Case-insensitive substring containment (lowercase both, .contains)
// 2. The query as a word-boundary-delimited literal phrase, matched with a
//    case-insensitive regex
//
// Check 2 can only succeed when check 1 already did: a phrase surrounded by
// word boundaries is in particular a substring. So the observable behavior
// is plain case-insensitive substring matching - "test" matches inside
// "matchtesting". Callers rely on that, and the tests pin it down.
// =============================================================================

use regex::Regex;

// Returns true when `text` matches `query`
//
// Case-insensitive. Substring containment is sufficient for a match;
// an empty query matches everything
pub fn is_match(text: &str, query: &str) -> bool {
    let text_lower = text.to_lowercase();
    let query_lower = query.to_lowercase();

    if text_lower.contains(&query_lower) {
        return true;
    }

    phrase_match(text, query)
}

// The boundary-delimited phrase check
//
// The query is escaped, so it is matched as a literal phrase and never
// interpreted as a pattern. An unbuildable regex counts as no match
fn phrase_match(text: &str, query: &str) -> bool {
    let pattern = format!(r"(?i)\b{}\b", regex::escape(query));
    match Regex::new(&pattern) {
        Ok(re) => re.is_match(text),
        Err(_) => false,
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why lowercase instead of a case-insensitive compare?
//    - Rust has no built-in case-insensitive .contains
//    - Lowercasing both sides once is the simplest correct approach
//
// 2. What does regex::escape do?
//    - Backslash-escapes every regex metacharacter in the query
//    - "C++" becomes "C\+\+", so it matches literally
//
// 3. What is \b?
//    - A word boundary: the edge between a word character and anything else
//    - r"\btest\b" matches "a test here" but not "matchtesting"
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive_match() {
        assert!(is_match("The word TEST is uppercase", "test"));
    }

    #[test]
    fn test_substring_match_inside_a_word() {
        // Containment counts even mid-word; this is the contract
        assert!(is_match("Partial matchtesting should not work", "test"));
    }

    #[test]
    fn test_no_match() {
        assert!(!is_match("No matching word here", "test"));
    }

    #[test]
    fn test_multi_word_phrase() {
        assert!(is_match("This had a Significant Impact on results", "significant impact"));
        assert!(!is_match("Significant results, no impact", "significant impact"));
    }

    #[test]
    fn test_query_with_regex_metacharacters_is_literal() {
        assert!(is_match("written in C++ mostly", "c++"));
        assert!(!is_match("written in C mostly", "c++"));
    }

    #[test]
    fn test_phrase_branch_agrees_with_substring() {
        // Whole-word occurrences pass both checks
        assert!(phrase_match("a plain test here", "test"));
        // Mid-word occurrences pass only the substring check, which runs first
        assert!(!phrase_match("matchtesting", "test"));
        assert!(is_match("matchtesting", "test"));
    }
}
