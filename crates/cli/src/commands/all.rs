use anyhow::Result;
use sitegen_core::SiteConfig;

/// Run every generation step in build order
///
/// Folders are processed first: manual folders copy their PDFs into the
/// static tree the manual index scans, and every generated page must exist
/// before the search index is built.
pub fn run(config: &SiteConfig) -> Result<()> {
    super::bundles::run_products(config)?;
    super::bundles::run_manuals(config)?;
    super::products::run(config)?;
    super::manuals::run(config)?;
    super::search::run(config)?;

    println!("🏁 All content generated");
    Ok(())
}
