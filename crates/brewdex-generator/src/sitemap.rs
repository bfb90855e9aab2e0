//! Sitemap generation.
//!
//! Walks the rendered output directory and lists every HTML page in a
//! sitemap so search engines pick up new products without crawling.

use std::path::Path;

use brewdex_core::Config;
use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

/// Sitemap generation errors.
#[derive(Debug, Error)]
pub enum SitemapError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error while walking the output directory.
    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Result type for sitemap operations.
pub type Result<T> = std::result::Result<T, SitemapError>;

/// Sitemap generator.
#[derive(Debug)]
pub struct SitemapGenerator {
    config: Config,
}

impl SitemapGenerator {
    /// Create a new sitemap generator.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Collect the full URL of every HTML page under `output_dir`, sorted.
    pub fn collect_urls(&self, output_dir: &Path) -> Result<Vec<String>> {
        let mut urls = Vec::new();

        for entry in WalkDir::new(output_dir) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            if entry.path().extension().and_then(|e| e.to_str()) != Some("html") {
                continue;
            }

            let relative = entry
                .path()
                .strip_prefix(output_dir)
                .unwrap_or(entry.path());
            // Path separators normalized for non-unix hosts.
            let path = relative.to_string_lossy().replace('\\', "/");
            urls.push(self.config.url_for(&path));
        }

        urls.sort();
        urls.dedup();
        Ok(urls)
    }

    /// Generate sitemap XML for the pages under `output_dir`.
    pub fn generate(&self, output_dir: &Path) -> Result<String> {
        let urls = self.collect_urls(output_dir)?;
        debug!(count = urls.len(), "generating sitemap");

        let mut xml = String::from(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        xml.push('\n');
        xml.push_str(r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#);
        xml.push('\n');

        for url in &urls {
            xml.push_str("  <url>\n");
            xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(url)));
            xml.push_str("  </url>\n");
        }

        xml.push_str("</urlset>\n");
        Ok(xml)
    }
}

/// Escape special XML characters.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
