//! Product folders: `content/produits/<product>/info.yaml` → `index.md`.

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
use sitegen_core::{DocumentLink, ProductBundleInfo, SiteConfig};
use std::fs;
use std::path::{Path, PathBuf};

pub const SECTION: &str = "produits";
pub const PAGE_FILE: &str = "index.md";

const DEFAULT_WARRANTY: &str = "Voir détails en magasin";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductBundleFrontmatter {
    pub title: String,
    pub slug: String,
    pub description: String,
    pub date: Value,
    pub draft: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_note: Option<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub documents: Vec<DocumentLink>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specs: Option<Mapping>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_stock: Option<Value>,
}

/// Frontmatter for a product folder; `images` and `documents` are site URLs
pub fn bundle_frontmatter(
    info: &ProductBundleInfo,
    product: &str,
    images: Vec<String>,
    documents: Vec<DocumentLink>,
    config: &SiteConfig,
) -> ProductBundleFrontmatter {
    ProductBundleFrontmatter {
        title: info.title.clone().unwrap_or_else(|| product.to_string()),
        slug: product.to_string(),
        description: info
            .description
            .clone()
            .unwrap_or_else(|| format!("Produit {}", product)),
        date: info
            .date
            .clone()
            .unwrap_or_else(|| Value::String(config.default_date_string())),
        draft: false,
        categories: info.categories.clone(),
        price: info.price.clone(),
        price_note: info.price_note.clone(),
        images,
        documents,
        specs: info.specs.clone(),
        sku: info.sku.clone(),
        in_stock: info.in_stock.clone(),
    }
}

pub fn bundle_body(info: &ProductBundleInfo, product: &str) -> String {
    let mut body = format!("{}\n\n", info.description.as_deref().unwrap_or_default());

    if let Some(specs) = &info.specs {
        body.push_str("## Caractéristiques\n\n");
        for line in spec_lines(specs) {
            body.push_str(&line);
            body.push('\n');
        }
        body.push('\n');
    }

    body.push_str("## Informations complémentaires\n\n");
    if let Some(sku) = &info.sku {
        body.push_str(&format!("- **Référence (SKU)**: {}\n", display_value(sku)));
    }
    let availability = if info.in_stock() {
        "En stock"
    } else {
        "Sur commande"
    };
    body.push_str(&format!("- **Disponibilité**: {}\n", availability));

    let warranty = info
        .specs
        .as_ref()
        .and_then(|specs| specs.get("garantie"))
        .map(display_value)
        .unwrap_or_else(|| DEFAULT_WARRANTY.to_string());
    body.push_str(&format!("- **Garantie**: {}\n", warranty));

    body.push_str(&format!(
        "\nPour plus d'informations ou pour commander ce produit, \
         [contactez-nous](/contact/?produit={}).\n",
        product
    ));
    body
}

/// Copy one folder's assets and write its `index.md`
fn process_folder(
    folder: &Path,
    config: &SiteConfig,
    report: &mut GenerationReport,
) -> Result<Option<PathBuf>> {
    let info_path = folder.join(INFO_FILE);
    if !info_path.exists() {
        return Ok(None);
    }
    let info: ProductBundleInfo = match read_info(&info_path) {
        Ok(info) => info,
        Err(e) => {
            report.warn(format!("{:#}, folder skipped", e));
            return Ok(None);
        }
    };

    let product = file_name(folder);

    let image_files = list_files(folder, IMAGE_EXTENSIONS)?;
    let image_prefix = Path::new("images").join(SECTION).join(&product);
    let images = publish_assets(&image_files, &config.static_dir, &image_prefix, report)?;

    let pdf_files = list_files(folder, DOCUMENT_EXTENSIONS)?;
    let pdf_prefix = Path::new("pdf").join(SECTION).join(&product);
    let pdf_urls = publish_assets(&pdf_files, &config.static_dir, &pdf_prefix, report)?;
    let documents = pdf_files
        .iter()
        .zip(pdf_urls)
        .map(|(path, file)| DocumentLink {
            title: file_stem(path),
            file,
        })
        .collect();

    let page = bundle_frontmatter(&info, &product, images, documents, config);
    let content = frontmatter::render(&page, &bundle_body(&info, &product))?;

    let page_file = folder.join(PAGE_FILE);
    fs::write(&page_file, content)
        .with_context(|| format!("Failed to write {}", page_file.display()))?;
    Ok(Some(page_file))
}

/// Process every product folder under `content/produits/`
pub fn process_product_bundles(config: &SiteConfig) -> Result<GenerationReport> {
    let mut report = GenerationReport::new();

    let section_dir = config.content_dir.join(SECTION);
    if !section_dir.is_dir() {
        report.warn(format!("Directory {} not found", section_dir.display()));
        return Ok(report);
    }

    for folder in list_subdirs(&section_dir)? {
        if let Some(page_file) = process_folder(&folder, config, &mut report)? {
            report.written.push(page_file);
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn info_from(yaml: &str) -> ProductBundleInfo {
        serde_yaml_ng::from_str(yaml).unwrap()
    }

    #[test]
    fn test_frontmatter_defaults() {
        let config = SiteConfig::with_defaults("/site");
        let page = bundle_frontmatter(
            &ProductBundleInfo::default(),
            "pelle-a-neige",
            Vec::new(),
            Vec::new(),
            &config,
        );
        assert_eq!(page.title, "pelle-a-neige");
        assert_eq!(page.slug, "pelle-a-neige");
        assert_eq!(page.description, "Produit pelle-a-neige");
        assert_eq!(page.date, Value::String("2024-01-01".to_string()));

        let yaml = serde_yaml_ng::to_string(&page).unwrap();
        assert_eq!(
            yaml,
            "title: pelle-a-neige\nslug: pelle-a-neige\ndescription: Produit pelle-a-neige\ndate: 2024-01-01\ndraft: false\n"
        );
    }

    #[test]
    fn test_frontmatter_optional_fields_in_order() {
        let config = SiteConfig::with_defaults("/site");
        let info = info_from(
            "title: Pelle\nprice: 49.99\nsku: PL-1\nin_stock: false\ncategories: [Outils]\nspecs:\n  largeur: 24 po\n",
        );
        let page = bundle_frontmatter(
            &info,
            "pelle",
            vec!["images/produits/pelle/a.jpg".to_string()],
            vec![DocumentLink {
                title: "fiche".to_string(),
                file: "pdf/produits/pelle/fiche.pdf".to_string(),
            }],
            &config,
        );
        let yaml = serde_yaml_ng::to_string(&page).unwrap();
        let keys: Vec<_> = yaml
            .lines()
            .filter(|l| !l.starts_with(' ') && !l.starts_with('-'))
            .map(|l| l.split(':').next().unwrap())
            .collect();
        assert_eq!(
            keys,
            vec![
                "title", "slug", "description", "date", "draft", "categories", "price",
                "images", "documents", "specs", "sku", "in_stock"
            ]
        );
    }

    #[test]
    fn test_body_sections() {
        let info = info_from(
            "description: Pelle robuste\nsku: PL-1\nin_stock: false\nspecs:\n  largeur: 24 po\n  garantie: 1 an\n",
        );
        let body = bundle_body(&info, "pelle");
        assert!(body.starts_with("Pelle robuste\n\n## Caractéristiques\n\n- **largeur**: 24 po\n"));
        assert!(body.contains("- **Référence (SKU)**: PL-1\n"));
        assert!(body.contains("- **Disponibilité**: Sur commande\n"));
        assert!(body.contains("- **Garantie**: 1 an\n"));
        assert!(body.ends_with("[contactez-nous](/contact/?produit=pelle).\n"));
    }

    #[test]
    fn test_body_without_specs() {
        let body = bundle_body(&ProductBundleInfo::default(), "pelle");
        assert!(!body.contains("Caractéristiques"));
        assert!(!body.contains("SKU"));
        assert!(body.contains("- **Disponibilité**: En stock\n"));
        assert!(body.contains("- **Garantie**: Voir détails en magasin\n"));
    }

    #[test]
    fn test_process_product_bundles() {
        let dir = TempDir::new().unwrap();
        let config = SiteConfig::with_defaults(dir.path());
        let section = config.content_dir.join(SECTION);

        let folder = section.join("souffleuse");
        fs::create_dir_all(&folder).unwrap();
        fs::write(folder.join(INFO_FILE), "title: Souffleuse\nprice: 1299\n").unwrap();
        fs::write(folder.join("b.png"), b"png").unwrap();
        fs::write(folder.join("a.JPG"), b"jpg").unwrap();
        fs::write(folder.join("desktop.ini"), b"ini").unwrap();
        fs::write(folder.join("Fiche-technique.pdf"), b"pdf").unwrap();

        // No info.yaml: ignored
        fs::create_dir_all(section.join("sans-info")).unwrap();
        // Underscore folders are drafts
        fs::create_dir_all(section.join("_modele")).unwrap();
        fs::write(section.join("_modele").join(INFO_FILE), "title: Modèle\n").unwrap();
        // Broken metadata: warning, not failure
        fs::create_dir_all(section.join("casse")).unwrap();
        fs::write(section.join("casse").join(INFO_FILE), "title: [").unwrap();

        let report = process_product_bundles(&config).unwrap();
        assert_eq!(report.written, vec![folder.join(PAGE_FILE)]);
        assert_eq!(report.copied.len(), 3);
        assert_eq!(report.warnings.len(), 1);

        assert!(config.static_dir.join("images/produits/souffleuse/a.JPG").exists());
        assert!(config.static_dir.join("pdf/produits/souffleuse/Fiche-technique.pdf").exists());

        let page = fs::read_to_string(folder.join(PAGE_FILE)).unwrap();
        assert!(page.contains("images:\n- images/produits/souffleuse/a.JPG\n- images/produits/souffleuse/b.png\n"));
        assert!(page.contains("documents:\n- title: Fiche-technique\n  file: pdf/produits/souffleuse/Fiche-technique.pdf\n"));
        assert!(page.contains("price: 1299\n"));
        assert!(!section.join("_modele").join(PAGE_FILE).exists());
    }

    #[test]
    fn test_process_product_bundles_loose_yaml_types() {
        let dir = TempDir::new().unwrap();
        let config = SiteConfig::with_defaults(dir.path());
        let folder = config.content_dir.join(SECTION).join("grattoir");
        fs::create_dir_all(&folder).unwrap();
        fs::write(
            folder.join(INFO_FILE),
            "title: Grattoir\ncategories: Outils\nprice_note: 15\nin_stock: no\n",
        )
        .unwrap();

        let report = process_product_bundles(&config).unwrap();
        assert_eq!(report.written, vec![folder.join(PAGE_FILE)]);
        assert!(report.warnings.is_empty());

        let page = fs::read_to_string(folder.join(PAGE_FILE)).unwrap();
        assert!(page.contains("categories: Outils\n"));
        assert!(page.contains("price_note: 15\n"));
        assert!(page.contains("in_stock:"));
        assert!(page.contains("- **Disponibilité**: Sur commande\n"));
    }

    #[test]
    fn test_process_product_bundles_missing_section() {
        let dir = TempDir::new().unwrap();
        let config = SiteConfig::with_defaults(dir.path());
        let report = process_product_bundles(&config).unwrap();
        assert_eq!(report.warnings.len(), 1);
    }
}
