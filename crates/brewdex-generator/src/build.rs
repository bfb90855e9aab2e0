//! Build orchestration.
//!
//! Coordinates the full site build: prepare the output directory, collect
//! and enrich product data, render pages, then emit the sitemap and feed.

use std::{fs, path::PathBuf, time::Instant};

use brewdex_core::Config;
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    assets::{copy_assets, AssetError},
    collector::{Collector, CollectorError},
    feed::{FeedError, FeedGenerator},
    sitemap::{SitemapError, SitemapGenerator},
    template::{TemplateError, Templates},
};

/// Build errors.
#[derive(Debug, Error)]
pub enum BuildError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Collection error.
    #[error("collector error: {0}")]
    Collector(#[from] CollectorError),

    /// Template error.
    #[error("template error: {0}")]
    Template(#[from] TemplateError),

    /// Feed generation error.
    #[error("feed error: {0}")]
    Feed(#[from] FeedError),

    /// Sitemap generation error.
    #[error("sitemap error: {0}")]
    Sitemap(#[from] SitemapError),

    /// Asset error.
    #[error("asset error: {0}")]
    Asset(#[from] AssetError),
}

/// Result type for build operations.
pub type Result<T> = std::result::Result<T, BuildError>;

/// Build statistics.
#[derive(Debug, Clone, Default)]
pub struct BuildStats {
    /// Number of product pages generated.
    pub products: usize,

    /// Number of drafts excluded.
    pub drafts_skipped: usize,

    /// Number of static assets copied.
    pub assets: usize,

    /// Build duration in milliseconds.
    pub duration_ms: u64,
}

/// Site builder that orchestrates the build process.
#[derive(Debug)]
pub struct Builder {
    config: Config,
    data_dir: PathBuf,
    output_dir: PathBuf,
    static_dir: PathBuf,
    templates_dir: PathBuf,
}

impl Builder {
    /// Create a builder with the directories taken from the configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        let data_dir = PathBuf::from(&config.build.data_dir);
        let output_dir = PathBuf::from(&config.build.output_dir);
        let static_dir = PathBuf::from(&config.build.static_dir);
        let templates_dir = PathBuf::from(&config.build.templates_dir);
        Self {
            config,
            data_dir,
            output_dir,
            static_dir,
            templates_dir,
        }
    }

    /// Execute the full build process.
    pub fn build(&self) -> Result<BuildStats> {
        let start = Instant::now();
        let mut stats = BuildStats::default();

        info!(
            data = %self.data_dir.display(),
            output = %self.output_dir.display(),
            "starting build"
        );

        // 1. Prepare output directory
        stats.assets = self.prepare_output()?;

        // 2. Collect product data
        let collector = Collector::new(self.config.clone(), &self.data_dir);
        let catalog = collector.collect()?;
        stats.drafts_skipped = catalog.drafts_skipped;

        // 3. Render pages
        let templates = Templates::with_dir(&self.templates_dir)?;
        stats.products = self.render_products(&templates, &catalog.records)?;
        self.render_index(&templates, &catalog)?;

        // 4. Sitemap (walks the rendered output, so it comes after pages)
        self.render_sitemap()?;

        // 5. Feed
        if self.config.feed.enabled {
            self.render_feed(&catalog.records)?;
        }

        stats.duration_ms = start.elapsed().as_millis() as u64;

        info!(
            products = stats.products,
            drafts_skipped = stats.drafts_skipped,
            assets = stats.assets,
            duration_ms = stats.duration_ms,
            "build complete"
        );

        Ok(stats)
    }

    /// Recreate the output directory and copy static assets into it.
    fn prepare_output(&self) -> Result<usize> {
        if self.output_dir.exists() {
            debug!(dir = %self.output_dir.display(), "cleaning output directory");
            fs::remove_dir_all(&self.output_dir)?;
        }
        fs::create_dir_all(self.output_dir.join("products"))?;

        let count = copy_assets(&self.static_dir, &self.output_dir)?;
        Ok(count)
    }

    /// Render one page per product under `products/`.
    fn render_products(
        &self,
        templates: &Templates,
        records: &[brewdex_core::Record],
    ) -> Result<usize> {
        info!(count = records.len(), "rendering product pages");

        for record in records {
            let html = templates.render_product(&self.config.site, record)?;
            let path = self.output_dir.join("products").join(&record.derived.slug);
            fs::write(&path, html)?;
            debug!(path = %path.display(), "wrote product page");
        }

        Ok(records.len())
    }

    /// Render the index page listing every product.
    fn render_index(&self, templates: &Templates, catalog: &crate::collector::Catalog) -> Result<()> {
        let html = templates.render_index(&self.config.site, &catalog.records, &catalog.contributors)?;
        let path = self.output_dir.join("index.html");
        fs::write(&path, html)?;

        info!(path = %path.display(), "wrote index page");
        Ok(())
    }

    /// Generate the sitemap from the rendered output tree.
    fn render_sitemap(&self) -> Result<()> {
        let generator = SitemapGenerator::new(self.config.clone());
        let xml = generator.generate(&self.output_dir)?;
        let path = self.output_dir.join("sitemap.xml");
        fs::write(&path, xml)?;

        info!(path = %path.display(), "wrote sitemap");
        Ok(())
    }

    /// Generate the RSS feed.
    fn render_feed(&self, records: &[brewdex_core::Record]) -> Result<()> {
        let generator = FeedGenerator::new(self.config.clone());
        let path = self.output_dir.join("feed.xml");
        let mut file = fs::File::create(&path)?;
        generator.write_to(records, &mut file)?;

        info!(path = %path.display(), "wrote feed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use brewdex_core::config::SiteConfig;
    use tempfile::TempDir;

    use super::*;

    const PRODUCT_YAML: &str = r"
brand: Acme
product: Boost
packaging: Can
size: 250
caffeine: 32
stores:
  - name: Cornershop
    price: 2.0
    amount: 1
    date: 2023-01-01
";

    struct Site {
        root: TempDir,
        config: Config,
    }

    fn test_site() -> Site {
        let root = TempDir::new().unwrap();
        fs::create_dir(root.path().join("data")).unwrap();
        fs::create_dir(root.path().join("static")).unwrap();

        let base = root.path().display();
        let config = Config {
            site: SiteConfig {
                title: "Testlab".to_string(),
                base_url: "https://example.com".to_string(),
                description: None,
                author: None,
                contributors_file: None,
            },
            build: brewdex_core::config::BuildConfig {
                output_dir: format!("{base}/output"),
                data_dir: format!("{base}/data"),
                static_dir: format!("{base}/static"),
                templates_dir: format!("{base}/templates"),
                drafts: false,
            },
            feed: Default::default(),
        };

        Site { root, config }
    }

    #[test]
    fn test_build_empty_site() {
        let site = test_site();
        let stats = Builder::new(site.config.clone()).build().unwrap();

        let output = site.root.path().join("output");
        assert_eq!(stats.products, 0);
        assert!(output.join("index.html").exists());
        assert!(output.join("sitemap.xml").exists());
        assert!(output.join("feed.xml").exists());
        assert!(output.join("products").is_dir());
    }

    #[test]
    fn test_build_with_product() {
        let site = test_site();
        fs::write(site.root.path().join("data/acme.yml"), PRODUCT_YAML).unwrap();

        let stats = Builder::new(site.config.clone()).build().unwrap();

        let output = site.root.path().join("output");
        let page = output.join("products/acme_boost_can_250.html");
        assert_eq!(stats.products, 1);
        assert!(page.exists());

        let index = fs::read_to_string(output.join("index.html")).unwrap();
        assert!(index.contains("acme_boost_can_250.html"));

        let sitemap = fs::read_to_string(output.join("sitemap.xml")).unwrap();
        assert!(sitemap
            .contains("<loc>https://example.com/products/acme_boost_can_250.html</loc>"));

        let feed = fs::read_to_string(output.join("feed.xml")).unwrap();
        assert!(feed.contains("Acme Boost (Can)"));
    }

    #[test]
    fn test_build_skips_drafts() {
        let site = test_site();
        fs::write(
            site.root.path().join("data/draft.yml"),
            format!("{PRODUCT_YAML}draft: true\n"),
        )
        .unwrap();

        let stats = Builder::new(site.config.clone()).build().unwrap();

        assert_eq!(stats.products, 0);
        assert_eq!(stats.drafts_skipped, 1);
    }

    #[test]
    fn test_build_includes_drafts_when_enabled() {
        let site = test_site();
        fs::write(
            site.root.path().join("data/draft.yml"),
            format!("{PRODUCT_YAML}draft: true\n"),
        )
        .unwrap();

        let mut config = site.config.clone();
        config.build.drafts = true;

        let stats = Builder::new(config).build().unwrap();

        assert_eq!(stats.products, 1);
        assert_eq!(stats.drafts_skipped, 0);
    }

    #[test]
    fn test_build_copies_static_assets() {
        let site = test_site();
        fs::write(site.root.path().join("static/style.css"), "body {}").unwrap();

        let stats = Builder::new(site.config.clone()).build().unwrap();

        assert_eq!(stats.assets, 1);
        assert!(site.root.path().join("output/style.css").exists());
    }

    #[test]
    fn test_build_fails_on_missing_static_dir() {
        let site = test_site();
        let mut config = site.config.clone();
        config.build.static_dir = format!("{}/missing", site.root.path().display());

        let result = Builder::new(config).build();

        assert!(matches!(result, Err(BuildError::Asset(_))));
    }

    #[test]
    fn test_build_fails_on_invalid_data() {
        let site = test_site();
        fs::write(site.root.path().join("data/bad.yml"), "brand: Acme").unwrap();

        let result = Builder::new(site.config.clone()).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_output_dir_cleaned_between_builds() {
        let site = test_site();
        fs::write(site.root.path().join("data/acme.yml"), PRODUCT_YAML).unwrap();

        Builder::new(site.config.clone()).build().unwrap();

        // Stale file from a previous build must not survive.
        let stale = site.root.path().join("output/products/removed.html");
        fs::write(&stale, "old").unwrap();

        Builder::new(site.config.clone()).build().unwrap();
        assert!(!stale.exists());
    }
}
