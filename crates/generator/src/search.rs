//! Flat JSON search index over every Markdown page of the site.

use crate::assets::url_path;
use crate::report::GenerationReport;
use anyhow::{Context, Result};
use sitegen_core::frontmatter;
use sitegen_core::text::truncate_chars;
use sitegen_core::{SearchEntry, SiteConfig};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const OUTPUT_FILE: &str = "search-index.json";

/// Characters of body text kept per page
pub const EXCERPT_CHARS: usize = 500;

/// Site URL of a page, from its path relative to the content root
///
/// `produits/pelle.md` → `/produits/pelle/`; a bundle's
/// `produits/pelle/index.md` maps to the same URL.
pub fn page_url(relative: &Path) -> String {
    let mut parts: Vec<String> = url_path(relative)
        .split('/')
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect();
    if let Some(last) = parts.last_mut()
        && last.ends_with(".md")
    {
        last.truncate(last.len() - ".md".len());
    }
    if parts.last().is_some_and(|last| last == "index") {
        parts.pop();
    }
    if parts.is_empty() {
        "/".to_string()
    } else {
        format!("/{}/", parts.join("/"))
    }
}

/// Top-level section of a page; root-level pages are their own section
pub fn page_section(relative: &Path) -> String {
    let url = url_path(relative);
    match url.split_once('/') {
        Some((section, _)) => section.to_string(),
        None => url.strip_suffix(".md").unwrap_or(&url).to_string(),
    }
}

/// Index entry for one page
pub fn search_entry(relative: &Path, source: &str) -> SearchEntry {
    let (meta, body) = frontmatter::parse(source);
    let stem = relative
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    SearchEntry {
        title: frontmatter::get_str(&meta, "title").unwrap_or(stem),
        description: frontmatter::get_str(&meta, "description").unwrap_or_default(),
        url: page_url(relative),
        content: truncate_chars(body.trim(), EXCERPT_CHARS).to_string(),
        section: page_section(relative),
    }
}

fn is_indexed(path: &Path) -> bool {
    let is_markdown = path.extension().is_some_and(|ext| ext == "md");
    let hidden = path
        .file_name()
        .and_then(|n| n.to_str())
        .is_none_or(|name| name.starts_with('_'));
    is_markdown && !hidden
}

/// Collect entries for every `*.md` under `content_dir`, in path order
///
/// Files starting with `_` (section indexes) are left out. Unreadable
/// pages are reported and skipped.
pub fn build_search_index(content_dir: &Path, report: &mut GenerationReport) -> Vec<SearchEntry> {
    let mut entries = Vec::new();
    if !content_dir.is_dir() {
        report.warn(format!("Directory {} not found", content_dir.display()));
        return entries;
    }

    for entry in WalkDir::new(content_dir).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                report.warn(format!("Error while scanning: {}", e));
                continue;
            }
        };
        let path = entry.path();
        if !entry.file_type().is_file() || !is_indexed(path) {
            continue;
        }
        let relative = path.strip_prefix(content_dir).unwrap_or(path);
        match fs::read_to_string(path) {
            Ok(source) => entries.push(search_entry(relative, &source)),
            Err(e) => report.warn(format!("Error with {}: {}", path.display(), e)),
        }
    }

    entries
}

/// Write `static/search-index.json`
pub fn write_search_index(config: &SiteConfig, entries: &[SearchEntry]) -> Result<PathBuf> {
    fs::create_dir_all(&config.static_dir)
        .with_context(|| format!("Failed to create {}", config.static_dir.display()))?;
    let output = config.static_dir.join(OUTPUT_FILE);
    let json = serde_json::to_string_pretty(entries).context("Failed to serialize search index")?;
    fs::write(&output, json).with_context(|| format!("Failed to write {}", output.display()))?;
    Ok(output)
}
