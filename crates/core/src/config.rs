use crate::error::{Error, Result};
use crate::types::SiteConfig;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the optional configuration file at the site root
pub const CONFIG_FILE: &str = "sitegen.toml";

/// Raw TOML configuration structure
/// This matches the sitegen.toml file structure exactly
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default)]
    paths: RawPaths,
    #[serde(default)]
    defaults: RawDefaults,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawPaths {
    content: Option<String>,
    #[serde(rename = "static")]
    static_dir: Option<String>,
    data: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawDefaults {
    date: Option<String>, // Parse as NaiveDate
    placeholder_image: Option<String>,
}

/// Load `sitegen.toml` from the site root, falling back to defaults when absent
pub fn load_site_config<P: AsRef<Path>>(root: P) -> Result<SiteConfig> {
    let root = root.as_ref();
    let path = root.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(SiteConfig::with_defaults(root));
    }
    let content = fs::read_to_string(&path)?;
    parse_site_toml_str(&content, root)
}

/// Parse sitegen.toml from a string (useful for testing)
pub fn parse_site_toml_str<P: AsRef<Path>>(content: &str, root: P) -> Result<SiteConfig> {
    let raw: RawConfig = toml::from_str(content)?;
    let mut config = SiteConfig::with_defaults(root.as_ref());

    if let Some(content_dir) = raw.paths.content {
        config.content_dir = config.root.join(validate_path(&content_dir, "paths.content")?);
    }
    if let Some(static_dir) = raw.paths.static_dir {
        config.static_dir = config.root.join(validate_path(&static_dir, "paths.static")?);
    }
    if let Some(data_dir) = raw.paths.data {
        config.data_dir = config.root.join(validate_path(&data_dir, "paths.data")?);
    }

    if let Some(date) = raw.defaults.date {
        config.default_date = chrono::NaiveDate::parse_from_str(&date, "%Y-%m-%d")
            .map_err(|e| Error::ConfigParse(format!("Invalid defaults.date: {}", e)))?;
    }
    if let Some(image) = raw.defaults.placeholder_image {
        if image.trim().is_empty() {
            return Err(Error::ConfigParse(
                "Empty path in 'defaults.placeholder_image' field".to_string(),
            ));
        }
        config.placeholder_image = image;
    }

    Ok(config)
}

/// Validate and convert a path string to PathBuf.
///
/// Rejects absolute paths and parent directory references (`..`) so a
/// configuration file cannot point generation outside the site root.
///
/// ```text
/// validate_path("content", "paths.content")  → Ok(PathBuf)
/// validate_path("/etc", "paths.static")  → Err("Absolute paths not allowed...")
/// validate_path("../other-site/data", "paths.data")  → Err("Parent directory references...")
/// ```
fn validate_path(path_str: &str, field_name: &str) -> Result<PathBuf> {
    let path = Path::new(path_str);

    if path.is_absolute() {
        return Err(Error::ConfigParse(format!(
            "Absolute paths not allowed in '{}': '{}'. Use relative paths only.",
            field_name, path_str
        )));
    }

    for component in path.components() {
        if component == std::path::Component::ParentDir {
            return Err(Error::ConfigParse(format!(
                "Parent directory references (..) not allowed in '{}': '{}'",
                field_name, path_str
            )));
        }
    }

    if path_str.trim().is_empty() {
        return Err(Error::ConfigParse(format!(
            "Empty path in '{}' field",
            field_name
        )));
    }

    Ok(path.to_path_buf())
}
