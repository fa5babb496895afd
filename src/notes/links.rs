use once_cell::sync::Lazy;
use regex::Regex;

// .*? = non-greedy, stops at the first ]], so a title containing ] still parses.
// Empty references ([[]]) are permitted, matching the editor.
static WIKI_LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[\[(.*?)\]\]").unwrap());

/// Extract `[[Title]]`-style references from note content.
///
/// Runs over the raw content (HTML markup included, nothing stripped) and
/// returns every non-overlapping match with case preserved, deduplicated in
/// first-occurrence order. There is no escaping for literal `[[`.
pub fn parse_internal_links(content: &str) -> Vec<String> {
    let mut seen = Vec::new();
    for cap in WIKI_LINK.captures_iter(content) {
        let title = cap[1].to_string();
        if !seen.contains(&title) {
            seen.push(title);
        }
    }
    seen
}
