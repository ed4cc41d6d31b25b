//! Manual folders: `content/manuels/<category>/<model>/info.yaml` + PDFs
//! → `content/manuels/<category>/<model>.md`.

use super::{INFO_FILE, publish_assets, read_info, spec_lines};
use crate::assets::{
    DOCUMENT_EXTENSIONS, IMAGE_EXTENSIONS, file_name, file_stem, list_files, list_subdirs,
};
use crate::report::GenerationReport;
use anyhow::{Context, Result};
use serde::Serialize;
use serde_yaml_ng::{Mapping, Value};
use sitegen_core::frontmatter;
use sitegen_core::text::display_value;
use sitegen_core::{Language, ManualBundleInfo, ManualEntry, SiteConfig};
use std::fs;
use std::path::{Path, PathBuf};

pub const SECTION: &str = "manuels";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManualBundleFrontmatter {
    pub title: String,
    pub slug: String,
    pub description: String,
    pub years: Value,
    pub draft: bool,
    pub manuals: Vec<ManualEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specs: Option<Mapping>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
}

/// Manual entry for one PDF of a folder
///
/// The folder's `lang` (French by default) applies unless the file name
/// carries a `-A`/`-F` marker.
pub fn manual_entry(info: &ManualBundleInfo, pdf_name: &str, file: String) -> ManualEntry {
    let lang = match Language::from_filename(pdf_name) {
        Some(lang) => lang.label().to_string(),
        None => info
            .lang
            .as_ref()
            .map(display_value)
            .unwrap_or_else(|| Language::French.label().to_string()),
    };
    ManualEntry {
        title: file_stem(Path::new(pdf_name)),
        file,
        lang,
        date: info.date.clone().unwrap_or_else(empty),
        version: info.version.clone().unwrap_or_else(empty),
        description: info.description.clone().unwrap_or_default(),
    }
}

fn empty() -> Value {
    Value::String(String::new())
}

pub fn bundle_frontmatter(
    info: &ManualBundleInfo,
    model: &str,
    manuals: Vec<ManualEntry>,
    images: Vec<String>,
) -> ManualBundleFrontmatter {
    ManualBundleFrontmatter {
        title: info.title.clone().unwrap_or_else(|| model.to_string()),
        slug: model.to_string(),
        description: info
            .description
            .clone()
            .unwrap_or_else(|| format!("Manuels pour {}", model)),
        years: info.years.clone().unwrap_or_else(empty),
        draft: false,
        manuals,
        specs: info.specs.clone(),
        images,
    }
}

pub fn bundle_body(info: &ManualBundleInfo, model: &str) -> String {
    let specs = info.specs.as_ref().map(spec_lines).unwrap_or_default();
    format!(
        "# {}\n\n{}\n\n## Caractéristiques\n\n{}\n\n\
         ## Informations complémentaires\n\n\
         Pour toute question concernant ce modèle ou pour commander des pièces, \
         n'hésitez pas à [nous contacter](/contact/).\n",
        info.title.as_deref().unwrap_or(model),
        info.description.as_deref().unwrap_or_default(),
        specs.join("\n")
    )
}

/// Copy one model folder's assets and write `<category>/<model>.md`
fn process_folder(
    category: &str,
    folder: &Path,
    config: &SiteConfig,
    report: &mut GenerationReport,
) -> Result<Option<PathBuf>> {
    let info_path = folder.join(INFO_FILE);
    if !info_path.exists() {
        return Ok(None);
    }
    let pdf_files = list_files(folder, DOCUMENT_EXTENSIONS)?;
    if pdf_files.is_empty() {
        tracing::debug!("{} has no PDF, skipped", folder.display());
        return Ok(None);
    }
    let info: ManualBundleInfo = match read_info(&info_path) {
        Ok(info) => info,
        Err(e) => {
            report.warn(format!("{:#}, folder skipped", e));
            return Ok(None);
        }
    };

    let model = file_name(folder);

    let image_files = list_files(folder, IMAGE_EXTENSIONS)?;
    let image_prefix = Path::new("images").join(SECTION).join(category).join(&model);
    let images = publish_assets(&image_files, &config.static_dir, &image_prefix, report)?;

    let pdf_prefix = Path::new("pdf").join(SECTION).join(category).join(&model);
    let pdf_urls = publish_assets(&pdf_files, &config.static_dir, &pdf_prefix, report)?;
    let manuals = pdf_files
        .iter()
        .zip(pdf_urls)
        .map(|(path, file)| manual_entry(&info, &file_name(path), file))
        .collect();

    let page = bundle_frontmatter(&info, &model, manuals, images);
    let content = frontmatter::render(&page, &bundle_body(&info, &model))?;

    let page_file = folder
        .parent()
        .context("Manual folder has no parent")?
        .join(format!("{}.md", model));
    fs::write(&page_file, content)
        .with_context(|| format!("Failed to write {}", page_file.display()))?;
    Ok(Some(page_file))
}

/// Process every `<category>/<model>` folder under `content/manuels/`
pub fn process_manual_bundles(config: &SiteConfig) -> Result<GenerationReport> {
    let mut report = GenerationReport::new();

    let section_dir = config.content_dir.join(SECTION);
    if !section_dir.is_dir() {
        report.warn(format!("Directory {} not found", section_dir.display()));
        return Ok(report);
    }

    for category_dir in list_subdirs(&section_dir)? {
        let category = file_name(&category_dir);
        for folder in list_subdirs(&category_dir)? {
            if let Some(page_file) = process_folder(&category, &folder, config, &mut report)? {
                report.written.push(page_file);
            }
        }
    }

    Ok(report)
}
