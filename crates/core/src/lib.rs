pub mod config;
pub mod error;
pub mod frontmatter;
pub mod text;
pub mod types;

pub use config::{load_site_config, parse_site_toml_str};
pub use error::{Error, Result};
pub use types::*;
