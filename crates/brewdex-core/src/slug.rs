//! Stable output file names for product pages.

use std::sync::LazyLock;

use regex::Regex;

static NON_SLUG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^A-Za-z0-9._]+").unwrap_or_else(|e| panic!("invalid slug pattern: {e}"))
});

/// Build the output file name for a product page.
///
/// Joins brand, product, packaging and size with underscores, collapses
/// every run of characters outside `[A-Za-z0-9._]` into a single underscore
/// and lowercases the result. An integral size renders without a decimal
/// point, so a 250.0 ml can becomes `..._250.html`.
pub fn product_slug(brand: &str, product: &str, packaging: &str, size: f64) -> String {
    let raw = format!("{brand}_{product}_{packaging}_{size}.html");
    NON_SLUG.replace_all(&raw, "_").to_lowercase()
}
