// Content generation for the static site: product pages, manual pages,
// asset bundles and the search index.

pub mod assets;
pub mod bundles;
pub mod manuals;
pub mod products;
pub mod report;
pub mod search;

pub use bundles::manuals::process_manual_bundles;
pub use bundles::products::process_product_bundles;
pub use manuals::{extract_file_info, index_manuals};
pub use products::generate_products;
pub use report::GenerationReport;
pub use search::{build_search_index, write_search_index};
