use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Inbound request: the product page to parse.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScrapeRequest {
    #[serde(default)]
    pub url: String,
}

/// Rendered page content returned by the scraping provider.
///
/// Transient: consumed once by [`crate::extract_product`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ScrapedPage {
    #[serde(default, deserialize_with = "null_as_default")]
    pub markdown: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub html: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: PageMetadata,
}

/// Subset of provider page metadata used for extraction.
///
/// Each field accepts either a string or an array of strings; for arrays the
/// first non-blank entry is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PageMetadata {
    #[serde(default, deserialize_with = "string_or_first")]
    pub title: Option<String>,
    #[serde(rename = "ogImage", default, deserialize_with = "string_or_first")]
    pub og_image: Option<String>,
    #[serde(default, deserialize_with = "string_or_first")]
    pub image: Option<String>,
}

/// Normalized product extracted from a single page.
///
/// `quarter_price` is derived from `price` at construction and the two are
/// always both present or both absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    title: String,
    price: Option<u64>,
    image: Option<String>,
    quarter_price: Option<u64>,
}

impl ProductRecord {
    #[must_use]
    pub fn new(title: String, price: Option<u64>, image: Option<String>) -> Self {
        Self {
            title,
            price,
            image,
            quarter_price: price.map(quarter_of),
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn price(&self) -> Option<u64> {
        self.price
    }

    #[must_use]
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    #[must_use]
    pub fn quarter_price(&self) -> Option<u64> {
        self.quarter_price
    }
}

/// One fourth of `price`, rounded up to the next whole unit.
fn quarter_of(price: u64) -> u64 {
    price.div_ceil(4)
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn string_or_first<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let non_blank = |s: String| {
        let trimmed = s.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    };

    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => non_blank(s),
        Some(Value::Array(items)) => items.into_iter().find_map(|item| match item {
            Value::String(s) => non_blank(s),
            _ => None,
        }),
        _ => None,
    })
}
