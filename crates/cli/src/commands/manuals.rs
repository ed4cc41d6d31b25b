use anyhow::Result;
use chrono::Local;
use sitegen_core::SiteConfig;
use sitegen_generator::index_manuals;

use super::print_report;

/// Generate manual pages for every model folder holding PDFs
pub fn run(config: &SiteConfig) -> Result<()> {
    println!("📁 Indexing PDF manuals...");

    let report = index_manuals(config, Local::now().date_naive())?;
    print_report(&report, &config.root);

    println!();
    println!(
        "✅ {} manual pages generated, {} preserved",
        report.written.len(),
        report.skipped.len()
    );
    println!("   Output: {}", config.content_dir.join("manuels").display());
    println!();

    Ok(())
}
