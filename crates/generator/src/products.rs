//! Product pages generated from `data/produits.csv` and `data/specs.yaml`.

use crate::report::GenerationReport;
use anyhow::{Context, Result};
use serde::Serialize;
use serde_yaml_ng::Mapping;
use sitegen_core::frontmatter;
use sitegen_core::text::{capitalize, display_value, slugify};
use sitegen_core::{Error, ProductRow, SiteConfig};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

pub const CSV_FILE: &str = "produits.csv";
pub const SPECS_FILE: &str = "specs.yaml";
/// Content section holding product pages
pub const SECTION: &str = "produits";

const DEFAULT_TAGS: &[&str] = &["équipement", "hiver"];
const DEFAULT_WARRANTY: &str = "Voir détails en magasin";

/// Per-SKU spec tables, keyed by lowercase SKU
pub type SpecsTable = HashMap<String, Mapping>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductFrontmatter {
    pub title: String,
    pub description: String,
    pub date: String,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    pub price: f64,
    pub price_note: String,
    pub image: String,
    pub manual_ref: String,
    pub in_stock: bool,
    pub featured: bool,
    pub sku: String,
    pub specs: Mapping,
    pub draft: bool,
}

/// Load `specs.yaml`; a missing or empty file yields an empty table
pub fn load_specs(path: &Path) -> Result<SpecsTable> {
    if !path.exists() {
        return Ok(SpecsTable::new());
    }
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    if content.trim().is_empty() {
        return Ok(SpecsTable::new());
    }
    let table: Option<SpecsTable> = serde_yaml_ng::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(table.unwrap_or_default())
}

/// Parse a CSV price cell. Empty means zero.
///
/// A decimal comma (`1299,99`) is accepted only when it cannot be a
/// thousands separator: a single comma, no dot, and not exactly three
/// digits after it. `1,299` and `1,299.99` are rejected.
pub fn parse_price(raw: &str) -> sitegen_core::Result<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }
    let invalid = || Error::InvalidData(format!("Invalid price '{}'", raw));

    let normalized = match trimmed.split_once(',') {
        None => trimmed.to_string(),
        Some((whole, fraction)) => {
            if fraction.contains(',') || trimmed.contains('.') || fraction.len() == 3 {
                return Err(invalid());
            }
            format!("{}.{}", whole, fraction)
        }
    };
    normalized.parse::<f64>().map_err(|_| invalid())
}

/// Map one CSV row and its specs to page frontmatter
pub fn product_frontmatter(
    row: &ProductRow,
    specs: &SpecsTable,
    config: &SiteConfig,
) -> sitegen_core::Result<ProductFrontmatter> {
    let sku = row.sku_key();
    let price = parse_price(&row.price)?;

    let mut tags = vec![row.category.to_lowercase()];
    tags.extend(DEFAULT_TAGS.iter().map(|t| t.to_string()));

    let image = if row.image.trim().is_empty() {
        config.placeholder_image.clone()
    } else {
        row.image.clone()
    };

    let manual_ref = if row.manual_ref.trim().is_empty() {
        String::new()
    } else {
        format!("/{}/", row.manual_ref.trim())
    };

    Ok(ProductFrontmatter {
        title: row.name.clone(),
        description: row.description.clone(),
        date: config.default_date_string(),
        categories: vec![row.category.clone()],
        tags,
        price,
        price_note: row.price_note.clone(),
        image,
        manual_ref,
        in_stock: row.in_stock(),
        featured: row.featured(),
        sku: sku.to_uppercase(),
        specs: specs.get(&sku).cloned().unwrap_or_default(),
        draft: false,
    })
}

/// Markdown body that follows the frontmatter
pub fn product_body(page: &ProductFrontmatter) -> String {
    let mut body = format!(
        "{}\n\n## Description\n\n{}\n\n## Caractéristiques principales\n\n",
        page.title, page.description
    );

    for (key, value) in &page.specs {
        body.push_str(&format!(
            "- **{}**: {}\n",
            capitalize(&display_value(key)),
            display_value(value)
        ));
    }

    let availability = if page.in_stock { "En stock" } else { "Sur commande" };
    let warranty = page
        .specs
        .get("garantie")
        .map(display_value)
        .unwrap_or_else(|| DEFAULT_WARRANTY.to_string());

    body.push_str(&format!(
        "\n## Informations complémentaires\n\n\
         - **Référence (SKU)**: {}\n\
         - **Disponibilité**: {}\n\
         - **Garantie**: {}\n\n\
         Pour plus d'informations ou pour commander ce produit, \
         [contactez-nous](/contact/?produit={}).\n",
        page.sku,
        availability,
        warranty,
        slugify(&page.title)
    ));
    body
}

/// Full page text for one row
pub fn render_product_page(
    row: &ProductRow,
    specs: &SpecsTable,
    config: &SiteConfig,
) -> Result<String> {
    let page = product_frontmatter(row, specs, config)?;
    Ok(frontmatter::render(&page, &product_body(&page))?)
}

/// Write one page per CSV row into `content/produits/`, overwriting
pub fn generate_products(config: &SiteConfig) -> Result<GenerationReport> {
    let mut report = GenerationReport::new();

    let csv_path = config.data_dir.join(CSV_FILE);
    if !csv_path.exists() {
        report.warn(format!("File {} not found", csv_path.display()));
        return Ok(report);
    }

    let specs = load_specs(&config.data_dir.join(SPECS_FILE))?;
    tracing::debug!("Loaded specs for {} products", specs.len());

    let output_dir = config.content_dir.join(SECTION);
    fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;

    let mut reader = csv::Reader::from_path(&csv_path)
        .with_context(|| format!("Failed to open {}", csv_path.display()))?;

    for (index, record) in reader.deserialize::<ProductRow>().enumerate() {
        // Header is line 1
        let line = index + 2;
        let row = match record {
            Ok(row) => row,
            Err(e) => {
                report.warn(format!("{} line {}: {}", CSV_FILE, line, e));
                continue;
            }
        };

        let sku = row.sku_key();
        if sku.is_empty() {
            report.warn(format!("{} line {}: empty SKU, row skipped", CSV_FILE, line));
            continue;
        }

        let content = match render_product_page(&row, &specs, config) {
            Ok(content) => content,
            Err(e) => {
                report.warn(format!("{} line {} ({}): {}", CSV_FILE, line, sku, e));
                continue;
            }
        };

        let output_file = output_dir.join(format!("{}.md", sku));
        fs::write(&output_file, content)
            .with_context(|| format!("Failed to write {}", output_file.display()))?;
        tracing::debug!(sku = %sku, "wrote product page");
        report.written.push(output_file);
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_yaml_ng::Value;
    use tempfile::TempDir;

    fn row(sku: &str, price: &str) -> ProductRow {
        ProductRow {
            sku: sku.to_string(),
            name: "Souffleuse 24 po".to_string(),
            category: "Souffleuses".to_string(),
            price: price.to_string(),
            price_note: "plus taxes".to_string(),
            description: "Souffleuse deux phases".to_string(),
            image: String::new(),
            manual_ref: "manuels/souffleuses/sb24".to_string(),
            in_stock: "true".to_string(),
            featured: "false".to_string(),
        }
    }

    fn specs_for(sku: &str) -> SpecsTable {
        let mut specs = Mapping::new();
        specs.insert(Value::from("moteur"), Value::from("208 cc"));
        specs.insert(Value::from("garantie"), Value::from("2 ans"));
        let mut table = SpecsTable::new();
        table.insert(sku.to_string(), specs);
        table
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("").unwrap(), 0.0);
        assert_eq!(parse_price(" 1299.99 ").unwrap(), 1299.99);
        assert_eq!(parse_price("1299,99").unwrap(), 1299.99);
        assert!(parse_price("sur demande").is_err());
    }

    #[test]
    fn test_parse_price_rejects_grouped_thousands() {
        for raw in ["1,299", "1 299,99", "1,299.99", "1,2,3"] {
            let result = parse_price(raw);
            assert!(result.is_err(), "{raw} should be rejected");
            assert!(result.unwrap_err().to_string().contains("Invalid price"));
        }
        assert_eq!(parse_price("12,5").unwrap(), 12.5);
        assert_eq!(parse_price("1299,9999").unwrap(), 1299.9999);
    }

    #[test]
    fn test_frontmatter_fields() {
        let config = SiteConfig::with_defaults("/site");
        let page = product_frontmatter(&row("SB-24", "1299.99"), &specs_for("sb-24"), &config)
            .unwrap();

        assert_eq!(page.title, "Souffleuse 24 po");
        assert_eq!(page.date, "2024-01-01");
        assert_eq!(page.categories, vec!["Souffleuses"]);
        assert_eq!(page.tags, vec!["souffleuses", "équipement", "hiver"]);
        assert_eq!(page.price, 1299.99);
        assert_eq!(page.image, "images/produits/placeholder.jpg");
        assert_eq!(page.manual_ref, "/manuels/souffleuses/sb24/");
        assert!(page.in_stock);
        assert!(!page.featured);
        assert_eq!(page.sku, "SB-24");
        assert_eq!(page.specs.len(), 2);
        assert!(!page.draft);
    }

    #[test]
    fn test_frontmatter_without_specs_or_manual() {
        let config = SiteConfig::with_defaults("/site");
        let mut product = row("X1", "");
        product.manual_ref = String::new();
        product.image = "images/produits/x1.jpg".to_string();

        let page = product_frontmatter(&product, &SpecsTable::new(), &config).unwrap();
        assert_eq!(page.price, 0.0);
        assert_eq!(page.manual_ref, "");
        assert_eq!(page.image, "images/produits/x1.jpg");
        assert!(page.specs.is_empty());
    }

    #[test]
    fn test_body_lists_specs_and_warranty() {
        let config = SiteConfig::with_defaults("/site");
        let page = product_frontmatter(&row("SB-24", "10"), &specs_for("sb-24"), &config).unwrap();
        let body = product_body(&page);

        assert!(body.starts_with("Souffleuse 24 po\n\n## Description\n\nSouffleuse deux phases"));
        assert!(body.contains("- **Moteur**: 208 cc\n"));
        assert!(body.contains("- **Garantie**: 2 ans\n"));
        assert!(body.contains("- **Référence (SKU)**: SB-24"));
        assert!(body.contains("- **Disponibilité**: En stock"));
        assert!(body.contains("(/contact/?produit=souffleuse-24-po)"));
    }

    #[test]
    fn test_body_defaults_when_out_of_stock() {
        let config = SiteConfig::with_defaults("/site");
        let mut product = row("SB-24", "10");
        product.in_stock = "false".to_string();
        let page = product_frontmatter(&product, &SpecsTable::new(), &config).unwrap();
        let body = product_body(&page);

        assert!(body.contains("- **Disponibilité**: Sur commande"));
        assert!(body.contains("- **Garantie**: Voir détails en magasin"));
    }

    #[test]
    fn test_rendered_page_has_frontmatter() {
        let config = SiteConfig::with_defaults("/site");
        let page = render_product_page(&row("SB-24", "10"), &SpecsTable::new(), &config).unwrap();
        assert!(page.starts_with("---\ntitle: Souffleuse 24 po\n"));
        assert!(page.contains("\nsku: SB-24\n"));
        assert!(page.contains("\ndraft: false\n---\n\n"));
    }

    #[test]
    fn test_generate_products_writes_pages() {
        let dir = TempDir::new().unwrap();
        let config = SiteConfig::with_defaults(dir.path());
        fs::create_dir_all(&config.data_dir).unwrap();
        fs::write(
            config.data_dir.join(CSV_FILE),
            "sku,name,category,price,description\n\
             SB-24,Souffleuse,Souffleuses,1299,Deux phases\n\
             ,Sans SKU,Divers,1,Rien\n\
             PL-1,Pelle,Outils,abc,Pelle à neige\n\
             TR-9,Traîneau,Accessoires,,Traîneau robuste\n",
        )
        .unwrap();
        fs::write(
            config.data_dir.join(SPECS_FILE),
            "sb-24:\n  moteur: 208 cc\n",
        )
        .unwrap();

        let report = generate_products(&config).unwrap();
        assert_eq!(report.written.len(), 2);
        assert_eq!(report.warnings.len(), 2);

        let page = fs::read_to_string(config.content_dir.join("produits/sb-24.md")).unwrap();
        assert!(page.contains("- **Moteur**: 208 cc"));
        assert!(page.contains("in_stock: true"));
        assert!(config.content_dir.join("produits/tr-9.md").exists());
        assert!(!config.content_dir.join("produits/pl-1.md").exists());
    }

    #[test]
    fn test_generate_products_missing_csv_warns() {
        let dir = TempDir::new().unwrap();
        let config = SiteConfig::with_defaults(dir.path());
        let report = generate_products(&config).unwrap();
        assert!(report.written.is_empty());
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("produits.csv"));
    }

    #[test]
    fn test_load_specs_missing_and_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(SPECS_FILE);
        assert!(load_specs(&path).unwrap().is_empty());
        fs::write(&path, "").unwrap();
        assert!(load_specs(&path).unwrap().is_empty());
    }
}
