//! Brewdex Core Library
//!
//! Core types, configuration, and error handling for the Brewdex catalog
//! site builder.

pub mod config;
pub mod error;
pub mod metrics;
pub mod product;
pub mod slug;

pub use config::Config;
pub use error::{CoreError, Result};
pub use metrics::{round2, Derived, PricedOffer};
pub use product::{Product, Record, StoreOffer};
pub use slug::product_slug;
