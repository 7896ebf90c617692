use reqwest::Url;

use super::html::{absolutize_url, find_meta_content, img_sources};
use crate::types::PageMetadata;

/// Hosts serving marketplace product photos.
const MEDIA_HOSTS: &[&str] = &["avatars.mds.yandex.net"];

const IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".webp", ".gif"];

/// Picks a representative product image. Sources are tried in priority
/// order and the first usable candidate wins:
///
/// 1. provider `ogImage` metadata
/// 2. provider `image` metadata
/// 3. `og:image` meta tag in the raw HTML
/// 4. first `<img>` served from a marketplace media host
/// 5. first `<img>` with a known image file extension
pub(super) fn extract_image(
    metadata: &PageMetadata,
    html: &str,
    page_url: &Url,
) -> Option<String> {
    let resolve = |raw: &str| absolutize_url(page_url, raw);

    metadata
        .og_image
        .as_deref()
        .and_then(resolve)
        .or_else(|| metadata.image.as_deref().and_then(resolve))
        .or_else(|| find_meta_content(html, "og:image").as_deref().and_then(resolve))
        .or_else(|| {
            img_sources(html)
                .filter_map(|src| resolve(&src))
                .find(|url| is_media_host(url))
        })
        .or_else(|| {
            img_sources(html)
                .filter_map(|src| resolve(&src))
                .find(|url| has_image_extension(url))
        })
}

fn is_media_host(url: &str) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };
    parsed.host_str().is_some_and(|host| {
        MEDIA_HOSTS.iter().any(|media| {
            host == *media
                || host
                    .strip_suffix(media)
                    .is_some_and(|prefix| prefix.ends_with('.'))
        })
    })
}

fn has_image_extension(url: &str) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };
    let path = parsed.path().to_ascii_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}
