pub mod all;
pub mod bundles;
pub mod manuals;
pub mod products;
pub mod search;

use sitegen_generator::GenerationReport;
use std::path::Path;

/// Print per-file results of a step, relative to the site root
pub fn print_report(report: &GenerationReport, root: &Path) {
    for path in &report.copied {
        println!("   📎 Copied {}", relative(path, root));
    }
    for path in &report.written {
        println!("   ✓ {}", relative(path, root));
    }
    for path in &report.skipped {
        println!("   ⏭  {} (exists, preserved)", relative(path, root));
    }
    if !report.warnings.is_empty() {
        println!("   ⚠ {} warning(s)", report.warnings.len());
    }
}

fn relative(path: &Path, root: &Path) -> String {
    path.strip_prefix(root).unwrap_or(path).display().to_string()
}
