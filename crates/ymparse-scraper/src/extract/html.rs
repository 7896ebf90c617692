//! Regex-level HTML tag helpers. No DOM is built.

use std::sync::LazyLock;

use regex::Regex;

static IMG_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<img\b[^>]*>").expect("valid regex"));
static META_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<meta\b[^>]*>").expect("valid regex"));

/// `content` of the first `<meta>` whose `property` or `name` equals `key`.
pub(super) fn find_meta_content(html: &str, key: &str) -> Option<String> {
    META_TAG_RE.find_iter(html).find_map(|m| {
        let tag = m.as_str();
        let matches_key = ["property", "name"]
            .into_iter()
            .filter_map(|attr| extract_attr(tag, attr))
            .any(|value| value.eq_ignore_ascii_case(key));
        if matches_key {
            extract_attr(tag, "content")
        } else {
            None
        }
    })
}

/// `src` values of every `<img>` tag, in document order.
pub(super) fn img_sources(html: &str) -> impl Iterator<Item = String> + '_ {
    IMG_TAG_RE
        .find_iter(html)
        .filter_map(|m| extract_attr(m.as_str(), "src"))
}

/// Value of `attr` inside a single tag. The attribute name must not be part
/// of a longer name, so `src` does not match `data-src`.
fn extract_attr(tag: &str, attr: &str) -> Option<String> {
    let pattern = format!(
        r#"(?is)(?:^|[\s"'/])(?:{})\s*=\s*(?:"([^"]*)"|'([^']*)')"#,
        regex::escape(attr)
    );
    let re = Regex::new(&pattern).expect("valid attr regex");
    re.captures(tag)
        .and_then(|c| c.get(1).or_else(|| c.get(2)))
        .map(|m| m.as_str().trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Resolves `candidate` against `base`, decoding `&amp;`. `data:` URIs and
/// unparseable values yield `None`.
pub(super) fn absolutize_url(base: &reqwest::Url, candidate: &str) -> Option<String> {
    let candidate = candidate.trim().replace("&amp;", "&");
    if candidate.is_empty() || candidate.starts_with("data:") {
        return None;
    }
    let resolved = base.join(&candidate).ok()?;
    matches!(resolved.scheme(), "http" | "https").then(|| resolved.to_string())
}
