use anyhow::{Context, Result};
use std::fs;
use std::path::{Component, Path, PathBuf};

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];
pub const DOCUMENT_EXTENSIONS: &[&str] = &["pdf"];

/// Windows folder settings that end up in synced asset folders
const IGNORED_FILES: &[&str] = &["desktop.ini"];

/// True when `path` has one of `extensions`, compared case-insensitively
pub fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| extensions.contains(&ext.as_str()))
}

/// Files directly inside `dir` with one of `extensions`, sorted by name
pub fn list_files(dir: &Path, extensions: &[&str]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("Failed to read {}", dir.display()))? {
        let path = entry?.path();
        if !path.is_file() || !has_extension(&path, extensions) {
            continue;
        }
        let ignored = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|name| IGNORED_FILES.contains(&name.to_lowercase().as_str()));
        if !ignored {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Subdirectories of `dir` in name order, minus those starting with `_`
pub fn list_subdirs(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("Failed to read {}", dir.display()))? {
        let path = entry?.path();
        let hidden = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_none_or(|name| name.starts_with('_'));
        if path.is_dir() && !hidden {
            dirs.push(path);
        }
    }
    dirs.sort();
    Ok(dirs)
}

/// Copy `src` into `target_dir`, keeping its file name; returns the destination
pub fn copy_into(src: &Path, target_dir: &Path) -> Result<PathBuf> {
    let filename = src.file_name().context("Invalid asset filename")?;
    fs::create_dir_all(target_dir)
        .with_context(|| format!("Failed to create {}", target_dir.display()))?;
    let dst = target_dir.join(filename);
    fs::copy(src, &dst).with_context(|| format!("Failed to copy {}", src.display()))?;
    Ok(dst)
}

/// Join path components with `/` for use in site URLs
pub fn url_path(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Final component of `path` as UTF-8, lossy
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// File name without extension, lossy
pub fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
