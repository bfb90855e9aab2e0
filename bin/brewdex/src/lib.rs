//! Brewdex CLI Library
//!
//! Command wiring for the brewdex site generator binary. The build pipeline
//! itself lives in `brewdex-generator`.

// Re-export core types for convenience
pub use brewdex_core::{Config, Record};
pub use brewdex_generator::{BuildStats, Builder};

/// Initialize tracing.
///
/// The log level is taken from `RUST_LOG`, defaulting to warnings only so a
/// normal build prints nothing but the final summary.
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();
}
