use std::sync::LazyLock;

use regex::Regex;

/// First level-1 markdown heading. `## Sub` does not match.
static H1_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]{0,3}#[ \t]+(.+?)(?:[ \t]+#+)?[ \t]*$").expect("valid h1 regex")
});

/// Storefront noise appended to product titles. Each pattern removes the
/// marker and everything after it.
static SUFFIX_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)\s*[—–-]\s*купить\s+в\s+интернет-магазине.*$",
        r"(?i)\s*\|\s*Яндекс[\s.]?Маркет.*$",
        r"(?i)\s+[—–-]\s*Яндекс[\s.]?Маркет.*$",
    ]
    .into_iter()
    .map(|p| Regex::new(p).expect("valid title suffix regex"))
    .collect()
});

/// Picks the product title: provider metadata first, then the first `# `
/// heading in the markdown. Returns `None` if both are absent or clean to
/// an empty string.
pub(super) fn extract_title(metadata_title: Option<&str>, markdown: &str) -> Option<String> {
    metadata_title
        .map(clean_title)
        .filter(|t| !t.is_empty())
        .or_else(|| first_heading(markdown).map(clean_title))
        .filter(|t| !t.is_empty())
}

fn first_heading(markdown: &str) -> Option<&str> {
    H1_RE
        .captures(markdown)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Strips marketplace suffixes and surrounding whitespace.
pub(super) fn clean_title(raw: &str) -> String {
    let mut title = raw.trim().to_string();
    for re in SUFFIX_RES.iter() {
        title = re.replace(&title, "").into_owned();
    }
    title.trim().to_string()
}
