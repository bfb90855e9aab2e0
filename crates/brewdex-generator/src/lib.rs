//! Brewdex Generator Library
//!
//! Static site generation engine for brewdex.
//!
//! # Modules
//!
//! - [`collector`] - Product data collection and enrichment
//! - [`template`] - HTML page rendering with Tera templates
//! - [`feed`] - RSS feed generation
//! - [`sitemap`] - XML sitemap generation
//! - [`assets`] - Static asset copying
//! - [`build`] - Build orchestration

pub mod assets;
pub mod build;
pub mod collector;
pub mod feed;
pub mod sitemap;
pub mod template;

pub use assets::copy_assets;
pub use build::{BuildStats, Builder};
pub use collector::{Catalog, Collector};
pub use feed::FeedGenerator;
pub use sitemap::SitemapGenerator;
pub use template::Templates;
