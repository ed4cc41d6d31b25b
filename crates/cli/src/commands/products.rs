use anyhow::Result;
use sitegen_core::SiteConfig;
use sitegen_generator::generate_products;

use super::print_report;

/// Generate product pages from the product CSV
pub fn run(config: &SiteConfig) -> Result<()> {
    println!("🔄 Generating product pages...");

    let report = generate_products(config)?;
    print_report(&report, &config.root);

    println!();
    println!("✅ {} product pages generated", report.written.len());
    println!("   Output: {}", config.content_dir.join("produits").display());
    println!();

    Ok(())
}
