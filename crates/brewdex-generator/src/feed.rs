//! RSS feed generation.
//!
//! Publishes an RSS 2.0 feed of products ordered by their most recent price
//! update, so subscribers see which entries changed without diffing pages.

use std::io::Write;

use brewdex_core::{Config, Record};
use chrono::{NaiveTime, Utc};
use rss::{ChannelBuilder, GuidBuilder, Item, ItemBuilder};
use thiserror::Error;
use tracing::debug;

/// RSS generation errors.
#[derive(Debug, Error)]
pub enum FeedError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for feed operations.
pub type Result<T> = std::result::Result<T, FeedError>;

/// RSS feed generator.
#[derive(Debug)]
pub struct FeedGenerator {
    config: Config,
}

impl FeedGenerator {
    /// Create a new feed generator.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Generate the feed XML for the given records.
    ///
    /// Records are sorted by their newest price update, most recent first,
    /// and truncated to the configured item limit.
    pub fn generate(&self, records: &[Record]) -> Result<String> {
        let mut sorted: Vec<&Record> = records.iter().collect();
        sorted.sort_by(|a, b| b.derived.newest_update.cmp(&a.derived.newest_update));
        sorted.truncate(self.config.feed.limit);

        debug!(
            count = sorted.len(),
            limit = self.config.feed.limit,
            "generating feed"
        );

        let items: Vec<Item> = sorted.iter().map(|r| self.record_to_item(r)).collect();

        let channel = ChannelBuilder::default()
            .title(&self.config.site.title)
            .link(&self.config.site.base_url)
            .description(
                self.config
                    .site
                    .description
                    .as_deref()
                    .unwrap_or(&self.config.site.title),
            )
            .last_build_date(Some(Utc::now().to_rfc2822()))
            .items(items)
            .build();

        Ok(channel.to_string())
    }

    /// Generate the feed and write it to a writer.
    pub fn write_to<W: Write>(&self, records: &[Record], writer: &mut W) -> Result<()> {
        let xml = self.generate(records)?;
        writer.write_all(xml.as_bytes())?;
        Ok(())
    }

    /// Convert a record to a feed item.
    fn record_to_item(&self, record: &Record) -> Item {
        let url = self
            .config
            .url_for(&format!("products/{}", record.derived.slug));

        let guid = GuidBuilder::default().value(&url).permalink(true).build();

        // Midnight UTC on the newest observed price date.
        let pub_date = record
            .derived
            .newest_update
            .and_time(NaiveTime::MIN)
            .and_utc()
            .to_rfc2822();

        let mut builder = ItemBuilder::default();
        builder.title(Some(record.product.display_name()));
        builder.link(Some(url));
        builder.guid(Some(guid));
        builder.pub_date(Some(pub_date));
        builder.description(Some(format!(
            "Average price {} ({} per 100 ml), updated {}",
            record.derived.average_price,
            record.derived.price_per_100ml,
            record.derived.newest_update
        )));

        if let Some(author) = &self.config.site.author {
            builder.author(Some(author.clone()));
        }

        builder.build()
    }
}
