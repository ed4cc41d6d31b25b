use anyhow::Result;
use sitegen_core::SiteConfig;
use sitegen_generator::{process_manual_bundles, process_product_bundles};

use super::print_report;

/// Copy product folder assets and regenerate their pages
pub fn run_products(config: &SiteConfig) -> Result<()> {
    println!("📦 Processing product folders...");

    let report = process_product_bundles(config)?;
    print_report(&report, &config.root);

    println!();
    println!(
        "✅ {} product folders processed, {} files copied",
        report.written.len(),
        report.copied.len()
    );
    println!();

    Ok(())
}

/// Copy manual folder assets and regenerate their pages
pub fn run_manuals(config: &SiteConfig) -> Result<()> {
    println!("📁 Processing manual folders...");

    let report = process_manual_bundles(config)?;
    print_report(&report, &config.root);

    println!();
    println!(
        "✅ {} manual folders processed, {} files copied",
        report.written.len(),
        report.copied.len()
    );
    println!();

    Ok(())
}
