//! Brewdex CLI
//!
//! Builds the price comparison site from per-product YAML files.

use std::path::Path;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};

use brewdex::{Builder, Config};

/// Command-line interface for brewdex.
#[derive(Parser)]
#[command(
    name = "brewdex",
    version,
    about = "Static site generator for caffeinated-drink price comparison"
)]
struct Cli {
    /// Include draft products
    #[arg(short, long)]
    drafts: bool,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    brewdex::init_tracing();

    let mut config = Config::load_with_env(Path::new("config.toml"))
        .wrap_err("Failed to load configuration")?;

    if cli.drafts {
        config.build.drafts = true;
    }

    let output_dir = config.build.output_dir.clone();
    let stats = Builder::new(config).build().wrap_err("Build failed")?;

    println!();
    println!("  Build completed successfully!");
    println!();
    println!("  Products:       {}", stats.products);
    println!("  Drafts skipped: {}", stats.drafts_skipped);
    println!("  Assets:         {}", stats.assets);
    println!();
    println!("  Duration:       {:.2}s", stats.duration_ms as f64 / 1000.0);
    println!("  Output:         {output_dir}");
    println!();

    Ok(())
}
