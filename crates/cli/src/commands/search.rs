use anyhow::Result;
use sitegen_core::SiteConfig;
use sitegen_generator::{GenerationReport, build_search_index, write_search_index};

/// Rebuild the JSON search index from the content tree
pub fn run(config: &SiteConfig) -> Result<()> {
    println!("🔎 Generating search index...");

    let mut report = GenerationReport::new();
    let entries = build_search_index(&config.content_dir, &mut report);
    let output = write_search_index(config, &entries)?;

    if !report.warnings.is_empty() {
        println!("   ⚠ {} warning(s)", report.warnings.len());
    }
    println!();
    println!("✅ Index generated: {} pages indexed", entries.len());
    println!("   File: {}", output.display());
    println!();

    Ok(())
}
