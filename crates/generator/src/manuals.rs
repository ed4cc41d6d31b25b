//! Manual index pages built by scanning `static/pdf/manuels/<category>/<model>/`.
//!
//! Per-PDF metadata (language, date, document number, revision) is read
//! from the file name, e.g. `SA92B-SA98B OM 0440SB92-A 21900001 rev3 01-19.pdf`.
//! Model pages are written once and never overwritten, so manual edits
//! survive regeneration. Category index pages are always refreshed.

use crate::assets::{DOCUMENT_EXTENSIONS, file_name, file_stem, has_extension, url_path};
use crate::report::GenerationReport;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;
use serde_yaml_ng::Value;
use sitegen_core::frontmatter;
use sitegen_core::text::{
    capitalize, display_value, french_long_date, model_slug, truncate_chars,
};
use sitegen_core::{
    CategoryManuals, Language, ManualEntry, ManualFileInfo, ManualPdf, ModelManuals, SiteConfig,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use walkdir::WalkDir;

/// Manuals tree below the static root
pub const PDF_SUBDIR: &str = "pdf/manuels";
/// Content section holding manual pages
pub const SECTION: &str = "manuels";

const MAX_TITLE_CHARS: usize = 50;
const EXCLUDED_DIRS: &[&str] = &["archives", "désuet"];

static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{2})[-/](\d{2,4})").expect("valid date regex"));
static DOC_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"OM\s+(\d+\w+)").expect("valid document number regex"));
static REVISION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)rev(\d+)").expect("valid revision regex"));
static YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{4})").expect("valid year regex"));

/// Parse language, date, document number and revision from a PDF file name
pub fn extract_file_info(filename: &str) -> ManualFileInfo {
    let date = DATE_RE.captures(filename).map(|caps| {
        let month = &caps[1];
        let year = &caps[2];
        if year.len() == 2 {
            format!("{}/20{}", month, year)
        } else {
            format!("{}/{}", month, year)
        }
    });

    ManualFileInfo {
        lang: Language::from_filename(filename),
        date,
        doc_number: DOC_NUMBER_RE.captures(filename).map(|c| c[1].to_string()),
        revision: REVISION_RE.captures(filename).map(|c| c[1].to_string()),
    }
}

/// Archived and obsolete manuals are kept on disk but not listed
fn is_excluded(relative: &Path) -> bool {
    let lowered = relative.to_string_lossy().to_lowercase();
    EXCLUDED_DIRS.iter().any(|dir| lowered.contains(dir))
}

/// Scan the manuals tree. Returns `None` when it does not exist.
pub fn scan_manuals(static_dir: &Path) -> Result<Option<Vec<CategoryManuals>>> {
    let base = static_dir.join(PDF_SUBDIR);
    if !base.is_dir() {
        return Ok(None);
    }

    let mut categories = Vec::new();
    for category_dir in list_dirs(&base)? {
        let mut category = CategoryManuals {
            category: file_name(&category_dir),
            models: Vec::new(),
        };

        for model_dir in list_dirs(&category_dir)? {
            let mut model = ModelManuals {
                model: file_name(&model_dir),
                pdfs: Vec::new(),
            };

            let walker = WalkDir::new(&model_dir).sort_by_file_name();
            for entry in walker {
                let entry =
                    entry.with_context(|| format!("Failed to scan {}", model_dir.display()))?;
                let path = entry.path();
                if !entry.file_type().is_file() || !has_extension(path, DOCUMENT_EXTENSIONS) {
                    continue;
                }
                if is_excluded(path.strip_prefix(&base).unwrap_or(path)) {
                    tracing::debug!("Ignoring archived manual {}", path.display());
                    continue;
                }

                let name = file_name(path);
                model.pdfs.push(ManualPdf {
                    file: url_path(path.strip_prefix(static_dir).unwrap_or(path)),
                    title: file_stem(path),
                    info: extract_file_info(&name),
                });
            }

            category.models.push(model);
        }

        categories.push(category);
    }

    Ok(Some(categories))
}

/// Every subdirectory, including `_`-prefixed ones, in name order
fn list_dirs(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut dirs: Vec<PathBuf> = fs::read_dir(dir)
        .with_context(|| format!("Failed to read {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_dir())
        .collect();
    dirs.sort();
    Ok(dirs)
}

#[derive(Debug, Serialize)]
struct CategoryIndexFrontmatter {
    title: String,
    description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManualPageFrontmatter {
    pub title: String,
    pub description: String,
    pub date: String,
    pub categories: Vec<String>,
    pub years: String,
    pub draft: bool,
    pub manuals: Vec<ManualEntry>,
}

/// `_index.md` for a category folder
pub fn render_category_index(category: &str) -> Result<String> {
    let title = capitalize(category);
    let lowered = category.to_lowercase();
    let page = CategoryIndexFrontmatter {
        title: title.clone(),
        description: format!("Manuels de pièces pour {}", lowered),
    };
    let body = format!(
        "# {}\n\nRetrouvez ci-dessous tous les manuels de pièces pour nos équipements de type **{}**.\n",
        title, lowered
    );
    Ok(frontmatter::render(&page, &body)?)
}

/// Frontmatter for one model page
pub fn manual_page_frontmatter(
    category: &str,
    model: &ModelManuals,
    config: &SiteConfig,
) -> ManualPageFrontmatter {
    let title = model.model.replace(['-', '_'], " ");
    let years = YEAR_RE
        .captures(&model.model)
        .map(|c| c[1].to_string())
        .unwrap_or_default();

    let manuals = model
        .pdfs
        .iter()
        .map(|pdf| {
            let short_title = if pdf.title.chars().count() > MAX_TITLE_CHARS {
                format!("{}...", truncate_chars(&pdf.title, MAX_TITLE_CHARS))
            } else {
                pdf.title.clone()
            };
            let lang = pdf.info.lang.map(|l| l.label().to_string()).unwrap_or_default();
            let description = if lang.is_empty() {
                String::new()
            } else {
                format!("Manuel {}", lang)
            };
            ManualEntry {
                title: short_title,
                file: pdf.file.clone(),
                lang,
                date: Value::String(pdf.info.date.clone().unwrap_or_default()),
                version: Value::String(pdf.info.revision.clone().unwrap_or_default()),
                description,
            }
        })
        .collect();

    ManualPageFrontmatter {
        description: format!("Manuels de pièces pour {}", title),
        title,
        date: config.default_date_string(),
        categories: vec![capitalize(category)],
        years,
        draft: false,
        manuals,
    }
}

/// Markdown body listing each manual with its download link
pub fn manual_page_body(page: &ManualPageFrontmatter, updated: NaiveDate) -> String {
    let mut body = format!(
        "# {title}\n\nCette page contient tous les manuels de pièces disponibles \
         pour le modèle **{title}**.\n\n## Documents disponibles\n\n",
        title = page.title
    );

    for manual in &page.manuals {
        body.push_str(&format!("### {}\n\n", manual.title));
        let fields = [
            ("Langue", manual.lang.clone()),
            ("Date", display_value(&manual.date)),
            ("Version", display_value(&manual.version)),
        ];
        for (label, value) in fields {
            if !value.is_empty() {
                body.push_str(&format!("- **{}**: {}\n", label, value));
            }
        }
        body.push_str(&format!("\n[📥 Télécharger le PDF](/{})\n\n", manual.file));
    }

    body.push_str(&format!(
        "## Informations complémentaires\n\n\
         Pour toute question concernant ce modèle ou pour commander des pièces, \
         n'hésitez pas à [nous contacter](/contact/).\n\n\
         ---\n\n\
         *Dernière mise à jour: {}*\n",
        french_long_date(updated)
    ));
    body
}

/// Full page text for one model
pub fn render_manual_page(
    category: &str,
    model: &ModelManuals,
    config: &SiteConfig,
    updated: NaiveDate,
) -> Result<String> {
    let page = manual_page_frontmatter(category, model, config);
    Ok(frontmatter::render(&page, &manual_page_body(&page, updated))?)
}

/// Generate category indexes and model pages under `content/manuels/`
///
/// `today` stamps the "last updated" line of new pages.
pub fn index_manuals(config: &SiteConfig, today: NaiveDate) -> Result<GenerationReport> {
    let mut report = GenerationReport::new();

    let Some(categories) = scan_manuals(&config.static_dir)? else {
        report.warn(format!(
            "Directory {} not found",
            config.static_dir.join(PDF_SUBDIR).display()
        ));
        return Ok(report);
    };
    if categories.is_empty() {
        report.warn("No manuals found");
        return Ok(report);
    }

    for category in &categories {
        let category_dir = config
            .content_dir
            .join(SECTION)
            .join(category.category.to_lowercase());
        fs::create_dir_all(&category_dir)
            .with_context(|| format!("Failed to create {}", category_dir.display()))?;

        let index_file = category_dir.join("_index.md");
        fs::write(&index_file, render_category_index(&category.category)?)
            .with_context(|| format!("Failed to write {}", index_file.display()))?;
        report.written.push(index_file);

        for model in &category.models {
            if model.pdfs.is_empty() {
                continue;
            }

            let slug = model_slug(&model.model);
            if slug.is_empty() {
                report.warn(format!(
                    "Model folder '{}' has no usable name, skipped",
                    model.model
                ));
                continue;
            }

            let output_file = category_dir.join(format!("{}.md", slug));
            if output_file.exists() {
                tracing::debug!("{} exists, preserved", output_file.display());
                report.skipped.push(output_file);
                continue;
            }

            let content = render_manual_page(&category.category, model, config, today)?;
            fs::write(&output_file, content)
                .with_context(|| format!("Failed to write {}", output_file.display()))?;
            tracing::debug!(pdfs = model.pdfs.len(), "wrote {}", output_file.display());
            report.written.push(output_file);
        }
    }

    Ok(report)
}
