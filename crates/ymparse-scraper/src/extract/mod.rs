//! Heuristic extraction of a [`ProductRecord`] from a rendered page.

mod html;
mod image;
mod price;
mod title;

use reqwest::Url;

use crate::error::ExtractionError;
use crate::types::{ProductRecord, ScrapedPage};

pub use price::{MAX_PLAUSIBLE_PRICE, MIN_PLAUSIBLE_PRICE};

const TITLE_NOT_FOUND_MESSAGE: &str = "Не удалось найти название товара";

/// Builds a product record from provider output.
///
/// Only the title is mandatory. A missing price or image degrades the record
/// to `null` fields instead of failing.
///
/// # Errors
///
/// Returns [`ExtractionError::NotFound`] when neither the metadata title nor
/// a level-1 markdown heading yields a non-empty title.
pub fn extract_product(
    page: &ScrapedPage,
    page_url: &Url,
) -> Result<ProductRecord, ExtractionError> {
    let title = title::extract_title(page.metadata.title.as_deref(), &page.markdown)
        .ok_or_else(|| ExtractionError::NotFound(TITLE_NOT_FOUND_MESSAGE.to_string()))?;

    let price = price::extract_price(&page.markdown);
    let image = image::extract_image(&page.metadata, &page.html, page_url);

    Ok(ProductRecord::new(title, price, image))
}
