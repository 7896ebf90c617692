//! Product-page extraction for Yandex Market.
//!
//! A product URL is validated, rendered through Firecrawl, and reduced to a
//! [`ProductRecord`] by the heuristics in [`extract`].

pub mod client;
pub mod error;
pub mod extract;
pub mod service;
pub mod types;
pub mod validate;

pub use client::{FirecrawlClient, PageProvider};
pub use error::ExtractionError;
pub use extract::extract_product;
pub use service::ProductExtractor;
pub use types::{PageMetadata, ProductRecord, ScrapeRequest, ScrapedPage};
pub use validate::validate_product_url;
