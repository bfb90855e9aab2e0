//! Product record schema.
//!
//! One YAML file per product. The schema is strict: required fields are
//! validated at parse time instead of being accessed opportunistically later.

use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::metrics::Derived;

/// One observed price point for a product at a given store and date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreOffer {
    /// Store name, if known.
    #[serde(default)]
    pub name: Option<String>,

    /// Link to the store listing, if known.
    #[serde(default)]
    pub url: Option<String>,

    /// Package price in currency units.
    pub price: f64,

    /// Units per package. Divisor for the unit price.
    pub amount: f64,

    /// Date the price was observed.
    pub date: NaiveDate,
}

/// Raw product data as parsed from one YAML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Brand name.
    pub brand: String,

    /// Product name.
    pub product: String,

    /// Packaging kind (can, bottle, ...).
    pub packaging: String,

    /// Volume in ml.
    pub size: f64,

    /// Caffeine in mg per 100 ml.
    pub caffeine: f64,

    /// Sugar in g per 100 ml.
    #[serde(default)]
    pub sugar: f64,

    /// Not ready for publication; excluded unless drafts are requested.
    #[serde(default)]
    pub draft: bool,

    /// Observed store offers.
    pub stores: Vec<StoreOffer>,
}

impl Product {
    /// Parse a product from YAML text, attributing errors to `path`.
    pub fn from_yaml(yaml: &str, path: &Path) -> Result<Self> {
        let product: Product =
            serde_yaml::from_str(yaml).map_err(|e| CoreError::parse(path, e.to_string()))?;
        product.validate(path)?;
        Ok(product)
    }

    /// Validate the invariants every derived metric depends on.
    ///
    /// All three guard divisions: store count, caffeine and size are
    /// divisors, amounts divide per-offer prices.
    pub fn validate(&self, path: &Path) -> Result<()> {
        if self.stores.is_empty() {
            return Err(CoreError::invariant(path, "at least one store offer is required"));
        }
        if self.caffeine == 0.0 {
            return Err(CoreError::invariant(path, "caffeine must be non-zero"));
        }
        if self.size == 0.0 {
            return Err(CoreError::invariant(path, "size must be non-zero"));
        }
        for (i, store) in self.stores.iter().enumerate() {
            if store.amount <= 0.0 {
                return Err(CoreError::invariant(
                    path,
                    format!("store offer {i} has a non-positive amount"),
                ));
            }
        }
        Ok(())
    }

    /// Human-readable identity, used in skip notices.
    pub fn display_name(&self) -> String {
        format!("{} {} ({})", self.brand, self.product, self.packaging)
    }
}

/// A fully enriched record: parsed fields plus derived metrics.
///
/// Built fresh per build, appended to an ordered collection and discarded
/// after rendering.
#[derive(Debug, Clone, Serialize)]
pub struct Record {
    /// Raw parsed product data.
    #[serde(flatten)]
    pub product: Product,

    /// Derived pricing/nutritional metrics.
    pub derived: Derived,

    /// Source file name, for a "view source" link in templates.
    pub filename: String,
}

impl Record {
    /// Build an enriched record from a validated product.
    pub fn new(product: Product, path: &Path) -> Result<Self> {
        let derived = Derived::compute(&product, path)?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        Ok(Self {
            product,
            derived,
            filename,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
brand: Acme
product: Boost
packaging: Can
size: 250
caffeine: 32
stores:
  - name: Corner Shop
    price: 2.0
    amount: 1
    date: 2023-01-01
"#;

    #[test]
    fn test_parse_product() {
        let product = Product::from_yaml(SAMPLE, Path::new("acme.yml")).expect("parse");

        assert_eq!(product.brand, "Acme");
        assert_eq!(product.product, "Boost");
        assert_eq!(product.packaging, "Can");
        assert_eq!(product.size, 250.0);
        assert_eq!(product.caffeine, 32.0);
        assert_eq!(product.sugar, 0.0);
        assert!(!product.draft);
        assert_eq!(product.stores.len(), 1);
        assert_eq!(product.stores[0].date, NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
    }

    #[test]
    fn test_missing_required_field() {
        let yaml = "brand: Acme\nproduct: Boost\n";
        let err = Product::from_yaml(yaml, Path::new("broken.yml")).unwrap_err();

        assert!(err.to_string().contains("Parse error"));
        assert!(err.to_string().contains("broken.yml"));
    }

    #[test]
    fn test_non_numeric_size() {
        let yaml = SAMPLE.replace("size: 250", "size: tall");
        let err = Product::from_yaml(&yaml, Path::new("broken.yml")).unwrap_err();
        assert!(err.to_string().contains("broken.yml"));
    }

    #[test]
    fn test_empty_stores_rejected() {
        let yaml = r#"
brand: Acme
product: Boost
packaging: Can
size: 250
caffeine: 32
stores: []
"#;
        let err = Product::from_yaml(yaml, Path::new("acme.yml")).unwrap_err();
        assert!(err.to_string().contains("store offer"));
    }

    #[test]
    fn test_zero_caffeine_rejected() {
        let yaml = SAMPLE.replace("caffeine: 32", "caffeine: 0");
        let err = Product::from_yaml(&yaml, Path::new("acme.yml")).unwrap_err();
        assert!(err.to_string().contains("caffeine"));
    }

    #[test]
    fn test_zero_amount_rejected() {
        let yaml = SAMPLE.replace("amount: 1", "amount: 0");
        let err = Product::from_yaml(&yaml, Path::new("acme.yml")).unwrap_err();
        assert!(err.to_string().contains("amount"));
    }

    #[test]
    fn test_draft_default_and_explicit() {
        let yaml = format!("{SAMPLE}draft: true\n");
        let product = Product::from_yaml(&yaml, Path::new("acme.yml")).expect("parse");
        assert!(product.draft);
    }

    #[test]
    fn test_display_name() {
        let product = Product::from_yaml(SAMPLE, Path::new("acme.yml")).expect("parse");
        assert_eq!(product.display_name(), "Acme Boost (Can)");
    }

    #[test]
    fn test_record_filename() {
        let product = Product::from_yaml(SAMPLE, Path::new("data/acme.yml")).expect("parse");
        let record = Record::new(product, Path::new("data/acme.yml")).expect("record");
        assert_eq!(record.filename, "acme.yml");
    }
}
