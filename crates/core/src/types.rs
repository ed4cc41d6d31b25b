use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_yaml_ng::{Mapping, Value};
use std::fmt;
use std::path::{Path, PathBuf};

/// Resolved site layout and content defaults
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub root: PathBuf,
    pub content_dir: PathBuf,
    pub static_dir: PathBuf,
    pub data_dir: PathBuf,
    /// Date stamped into generated frontmatter when the source has none
    pub default_date: NaiveDate,
    pub placeholder_image: String,
}

impl SiteConfig {
    pub const DEFAULT_DATE: &'static str = "2024-01-01";
    pub const DEFAULT_PLACEHOLDER_IMAGE: &'static str = "images/produits/placeholder.jpg";

    /// Layout used when the site has no `sitegen.toml`
    pub fn with_defaults<P: AsRef<Path>>(root: P) -> Self {
        let root = root.as_ref().to_path_buf();
        Self {
            content_dir: root.join("content"),
            static_dir: root.join("static"),
            data_dir: root.join("data"),
            root,
            default_date: NaiveDate::parse_from_str(Self::DEFAULT_DATE, "%Y-%m-%d")
                .unwrap_or_default(),
            placeholder_image: Self::DEFAULT_PLACEHOLDER_IMAGE.to_string(),
        }
    }

    pub fn default_date_string(&self) -> String {
        self.default_date.format("%Y-%m-%d").to_string()
    }
}

/// One row of `produits.csv`
///
/// Every column except `sku` and `name` may be absent from the header.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductRow {
    pub sku: String,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub price_note: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub manual_ref: String,
    #[serde(default = "default_in_stock")]
    pub in_stock: String,
    #[serde(default)]
    pub featured: String,
}

fn default_in_stock() -> String {
    "true".to_string()
}

impl ProductRow {
    pub fn in_stock(&self) -> bool {
        self.in_stock.trim().eq_ignore_ascii_case("true")
    }

    pub fn featured(&self) -> bool {
        self.featured.trim().eq_ignore_ascii_case("true")
    }

    /// Lowercase SKU, used as file name and specs key
    pub fn sku_key(&self) -> String {
        self.sku.trim().to_lowercase()
    }
}

/// Language of a manual, as detected from its file name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    English,
    French,
}

impl Language {
    /// Label shown on the (French-language) site
    pub fn label(&self) -> &'static str {
        match self {
            Language::English => "Anglais",
            Language::French => "Français",
        }
    }

    /// `-A` marks an English manual, `-F` a French one. `-A` wins when both appear.
    pub fn from_filename(filename: &str) -> Option<Self> {
        if filename.contains("-A") {
            Some(Language::English)
        } else if filename.contains("-F") {
            Some(Language::French)
        } else {
            None
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Metadata parsed out of a manual's PDF file name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManualFileInfo {
    pub lang: Option<Language>,
    /// `MM/YYYY`
    pub date: Option<String>,
    pub doc_number: Option<String>,
    pub revision: Option<String>,
}

/// A PDF found under the static manuals tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManualPdf {
    /// Path relative to the static root, forward slashes
    pub file: String,
    /// File stem
    pub title: String,
    pub info: ManualFileInfo,
}

/// Manuals found for one model folder
#[derive(Debug, Clone, Default)]
pub struct ModelManuals {
    pub model: String,
    pub pdfs: Vec<ManualPdf>,
}

/// Manuals found for one category folder, models in name order
#[derive(Debug, Clone, Default)]
pub struct CategoryManuals {
    pub category: String,
    pub models: Vec<ModelManuals>,
}

/// `info.yaml` of a product folder
///
/// Fields copied into frontmatter are kept as raw YAML so a hand-written
/// `categories: Outils` or `in_stock: non` passes through unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductBundleInfo {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<Value>,
    pub categories: Option<Value>,
    pub price: Option<Value>,
    pub price_note: Option<Value>,
    pub specs: Option<Mapping>,
    pub sku: Option<Value>,
    pub in_stock: Option<Value>,
}

impl ProductBundleInfo {
    /// Absent means in stock; `false`, `no` and `non` (any case) mean on order
    pub fn in_stock(&self) -> bool {
        match &self.in_stock {
            Some(Value::Bool(available)) => *available,
            Some(Value::String(s)) => {
                let s = s.trim();
                !["no", "false", "non"].iter().any(|n| s.eq_ignore_ascii_case(n))
            }
            _ => true,
        }
    }
}

/// `info.yaml` of a manual folder
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ManualBundleInfo {
    pub title: Option<String>,
    pub description: Option<String>,
    pub years: Option<Value>,
    pub lang: Option<Value>,
    pub date: Option<Value>,
    pub version: Option<Value>,
    pub specs: Option<Mapping>,
}

/// A linked document in generated frontmatter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentLink {
    pub title: String,
    pub file: String,
}

/// One manual entry in generated frontmatter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManualEntry {
    pub title: String,
    pub file: String,
    pub lang: String,
    pub date: Value,
    pub version: Value,
    pub description: String,
}

/// One page in the JSON search index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchEntry {
    pub title: String,
    pub description: String,
    pub url: String,
    pub content: String,
    pub section: String,
}
