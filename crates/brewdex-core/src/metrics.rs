//! Derived pricing and nutritional metrics.
//!
//! Metrics are computed once per record and carried in a separate structure
//! next to the parsed fields. Monetary and per-unit values are formatted to
//! exactly two decimal places as strings so rendered pages are stable
//! regardless of float representation.

use std::path::Path;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{CoreError, Result};
use crate::product::Product;
use crate::slug::product_slug;

/// Format a number to two decimal places for display.
pub fn round2(value: f64) -> String {
    format!("{value:.2}")
}

/// A store offer with its display prices resolved.
#[derive(Debug, Clone, Serialize)]
pub struct PricedOffer {
    /// Store name, if known.
    pub name: Option<String>,

    /// Link to the store listing, if known.
    pub url: Option<String>,

    /// Package price, two decimals.
    pub price: String,

    /// Price for a single unit (price / amount), two decimals.
    pub unit_price: String,

    /// Date the price was observed.
    pub date: NaiveDate,
}

/// Derived metrics for one product record.
#[derive(Debug, Clone, Serialize)]
pub struct Derived {
    /// Store offers with display prices.
    pub stores: Vec<PricedOffer>,

    /// Volume for display; integral sizes render without a decimal point,
    /// matching the slug.
    pub size: String,

    /// Mean of the per-offer unit prices.
    pub average_price: String,

    /// Average price scaled to 100 ml.
    pub price_per_100ml: String,

    /// Average price per mg of caffeine.
    pub price_per_mg_caffeine: String,

    /// Total caffeine in the package, mg.
    pub caffeine_total: String,

    /// Sugar per mg caffeine; the literal "0" when the product is sugar-free.
    pub sugar_per_mg_caffeine: String,

    /// Caffeine per g sugar; "0" when sugar-free.
    pub caffeine_per_g_sugar: String,

    /// Total sugar in the package, g; "0" when sugar-free.
    pub sugar_total: String,

    /// Most recent offer date.
    pub newest_update: NaiveDate,

    /// Output file name under `products/`.
    pub slug: String,
}

impl Derived {
    /// Compute all derived metrics for a validated product.
    ///
    /// `path` attributes invariant violations to the source file; callers
    /// that went through [`Product::from_yaml`] never hit those branches.
    pub fn compute(product: &Product, path: &Path) -> Result<Self> {
        product.validate(path)?;

        let mut stores = Vec::with_capacity(product.stores.len());
        let mut unit_price_sum = 0.0;
        let mut newest_update = NaiveDate::from_ymd_opt(1970, 1, 1)
            .ok_or_else(|| CoreError::invariant(path, "epoch date out of range"))?;

        for offer in &product.stores {
            let unit_price = offer.price / offer.amount;
            unit_price_sum += unit_price;

            if offer.date > newest_update {
                newest_update = offer.date;
            }

            stores.push(PricedOffer {
                name: offer.name.clone(),
                url: offer.url.clone(),
                price: round2(offer.price),
                unit_price: round2(unit_price),
                date: offer.date,
            });
        }

        let average = unit_price_sum / product.stores.len() as f64;

        // Sugar-free products report the literal "0" for all three
        // sugar-derived values.
        let (sugar_per_mg_caffeine, caffeine_per_g_sugar, sugar_total) = if product.sugar == 0.0 {
            ("0".to_string(), "0".to_string(), "0".to_string())
        } else {
            (
                round2(product.sugar / product.caffeine),
                round2(product.caffeine / product.sugar),
                round2(product.sugar * (product.size / 100.0)),
            )
        };

        Ok(Self {
            stores,
            size: product.size.to_string(),
            average_price: round2(average),
            price_per_100ml: round2((average / product.size) * 100.0),
            price_per_mg_caffeine: round2(average / product.caffeine),
            caffeine_total: round2(product.caffeine * (product.size / 100.0)),
            sugar_per_mg_caffeine,
            caffeine_per_g_sugar,
            sugar_total,
            newest_update,
            slug: product_slug(
                &product.brand,
                &product.product,
                &product.packaging,
                product.size,
            ),
        })
    }
}
