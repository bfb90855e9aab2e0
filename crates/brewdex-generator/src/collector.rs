//! Product data collection.
//!
//! Finds the YAML product files in the data directory, parses and validates
//! each one and computes its derived metrics. A malformed or invalid file
//! aborts the whole collection so a broken record can never silently drop
//! out of the published site.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use brewdex_core::{Config, CoreError, Product, Record};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Collection errors.
#[derive(Debug, Error)]
pub enum CollectorError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse or validation error from a product file.
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Result type for collector operations.
pub type Result<T> = std::result::Result<T, CollectorError>;

/// Collected product catalog.
#[derive(Debug, Default)]
pub struct Catalog {
    /// Renderable records, in data-file order.
    pub records: Vec<Record>,

    /// Contributor names, if a contributors file is configured.
    pub contributors: Vec<String>,

    /// Number of drafts excluded from this collection.
    pub drafts_skipped: usize,
}

/// Collector that reads product files from the data directory.
#[derive(Debug)]
pub struct Collector {
    config: Config,
    data_dir: PathBuf,
}

impl Collector {
    /// Create a new collector.
    #[must_use]
    pub fn new(config: Config, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            config,
            data_dir: data_dir.into(),
        }
    }

    /// Collect every product record from the data directory.
    pub fn collect(&self) -> Result<Catalog> {
        info!(dir = %self.data_dir.display(), "collecting product data");

        let files = self.find_product_files()?;
        info!(count = files.len(), "found product files");

        let mut catalog = Catalog {
            contributors: self.load_contributors()?,
            ..Catalog::default()
        };

        for path in &files {
            let record = load_record(path)?;

            // Emitted at warn so the notice survives the binary's default
            // log filter.
            if record.product.draft && !self.config.build.drafts {
                warn!(
                    product = %record.product.display_name(),
                    path = %path.display(),
                    "skipping draft"
                );
                catalog.drafts_skipped += 1;
                continue;
            }

            debug!(path = %path.display(), slug = %record.derived.slug, "loaded product");
            catalog.records.push(record);
        }

        Ok(catalog)
    }

    /// Find all product files in the data directory, sorted by path.
    ///
    /// Sorting keeps the index page and feed ordering stable across
    /// filesystems that return directory entries in arbitrary order.
    fn find_product_files(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for entry in fs::read_dir(&self.data_dir)? {
            let entry = entry?;
            let path = entry.path();

            if !path.is_file() {
                continue;
            }

            match path.extension().and_then(|e| e.to_str()) {
                Some("yml" | "yaml") => files.push(path),
                _ => {}
            }
        }

        files.sort();
        Ok(files)
    }

    /// Load contributor names from the configured file, one per line.
    ///
    /// The first line is a header and is skipped. A missing file is not an
    /// error, the contributors section is simply left empty.
    fn load_contributors(&self) -> Result<Vec<String>> {
        let Some(ref file) = self.config.site.contributors_file else {
            return Ok(Vec::new());
        };

        let text = match fs::read_to_string(file) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %file, "contributors file not found");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let names: Vec<String> = text
            .lines()
            .skip(1)
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();

        Ok(names)
    }
}

/// Parse a single product file into a record with derived metrics.
pub fn load_record(path: &Path) -> Result<Record> {
    let yaml = fs::read_to_string(path)?;
    let product = Product::from_yaml(&yaml, path)?;
    let record = Record::new(product, path)?;
    Ok(record)
}
