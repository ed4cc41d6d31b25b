//! "Simple folder" content: a directory holding `info.yaml` plus the images
//! and PDFs for one page. Assets are copied into the static tree and the
//! page is regenerated from the metadata on every run.

pub mod manuals;
pub mod products;

use crate::assets::{copy_into, file_name, url_path};
use crate::report::GenerationReport;
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde_yaml_ng::Mapping;
use sitegen_core::text::display_value;
use std::fs;
use std::path::{Path, PathBuf};

pub const INFO_FILE: &str = "info.yaml";

/// Read a folder's `info.yaml`; an empty file yields the default
pub fn read_info<T: DeserializeOwned + Default>(path: &Path) -> Result<T> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    if content.trim().is_empty() {
        return Ok(T::default());
    }
    serde_yaml_ng::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Copy `files` into `<static>/<url_prefix>/` and return their site-relative URLs
pub fn publish_assets(
    files: &[PathBuf],
    static_dir: &Path,
    url_prefix: &Path,
    report: &mut GenerationReport,
) -> Result<Vec<String>> {
    let target_dir = static_dir.join(url_prefix);
    let mut urls = Vec::with_capacity(files.len());
    for file in files {
        let dst = copy_into(file, &target_dir)?;
        tracing::debug!("Copied {}", file.display());
        urls.push(url_path(&url_prefix.join(file_name(file))));
        report.copied.push(dst);
    }
    Ok(urls)
}

/// `- **key**: value` lines for a spec table
pub fn spec_lines(specs: &Mapping) -> Vec<String> {
    specs
        .iter()
        .map(|(key, value)| format!("- **{}**: {}", display_value(key), display_value(value)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_yaml_ng::Value;
    use tempfile::TempDir;

    #[derive(Debug, Default, Deserialize)]
    struct Info {
        title: Option<String>,
    }

    #[test]
    fn test_read_info_empty_file_is_default() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(INFO_FILE);
        fs::write(&path, "\n").unwrap();
        let info: Info = read_info(&path).unwrap();
        assert!(info.title.is_none());
    }

    #[test]
    fn test_read_info_invalid_yaml_names_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(INFO_FILE);
        fs::write(&path, "title: [unclosed").unwrap();
        let err = read_info::<Info>(&path).unwrap_err();
        assert!(err.to_string().contains("info.yaml"));
    }

    #[test]
    fn test_publish_assets_returns_urls() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("photo.jpg");
        fs::write(&src, b"img").unwrap();
        let static_dir = dir.path().join("static");

        let mut report = GenerationReport::new();
        let urls = publish_assets(
            &[src],
            &static_dir,
            Path::new("images/produits/pelle"),
            &mut report,
        )
        .unwrap();

        assert_eq!(urls, vec!["images/produits/pelle/photo.jpg"]);
        assert!(static_dir.join("images/produits/pelle/photo.jpg").exists());
        assert_eq!(report.copied.len(), 1);
    }

    #[test]
    fn test_spec_lines_keep_key_case() {
        let mut specs = Mapping::new();
        specs.insert(Value::from("Moteur"), Value::from("600 cc"));
        specs.insert(Value::from("poids"), Value::from(250));
        assert_eq!(
            spec_lines(&specs),
            vec!["- **Moteur**: 600 cc", "- **poids**: 250"]
        );
    }
}
