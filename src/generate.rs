//! Site generation: catalog in, static files out.
//!
//! ## Output Structure
//!
//! ```text
//! <root>/
//! ├── data/products.json        # input (never modified)
//! ├── products/
//! │   ├── exterior-plywood-18mm/
//! │   │   └── index.html        # one page per product
//! │   └── roofing-screws/
//! │       └── index.html
//! ├── sitemap.xml               # fixed pages + every product page
//! └── _redirects                # /<slug> short links + catch-all
//! ```
//!
//! All locations come from [`PathsConfig`](crate::config::PathsConfig).
//!
//! The catalog is loaded and every page is rendered before the first file is
//! written, so a bad catalog leaves the previous output untouched. Pages are
//! rendered in parallel on the global rayon pool and written in catalog
//! order. Existing files are overwritten; stale product directories from
//! earlier builds are left in place.

use crate::catalog::{self, Catalog, CatalogError, SkippedRecords};
use crate::config::SiteConfig;
use crate::redirects::{redirect_rules, render_redirects};
use crate::render::render_product_page;
use crate::sitemap::{sitemap_entries, sitemap_xml};
use crate::types::Slug;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// One product page, planned or written.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedPage {
    pub slug: Slug,
    pub name: String,
    pub image_count: usize,
    /// Relative to the site root.
    pub path: PathBuf,
}

/// What a build produced (or, for [`check`], would produce).
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateReport {
    pub pages: Vec<GeneratedPage>,
    pub skipped: SkippedRecords,
    pub sitemap_path: PathBuf,
    pub sitemap_entries: usize,
    pub redirects_path: PathBuf,
    pub redirect_rules: usize,
}

/// Build every output file under `root`.
pub fn generate(root: &Path, config: &SiteConfig) -> Result<GenerateReport, GenerateError> {
    let catalog = load(root, config)?;
    let report = plan(&catalog, config);

    let rendered: Vec<(PathBuf, String)> = catalog
        .products
        .par_iter()
        .zip(report.pages.par_iter())
        .map(|(product, page)| {
            let html = render_product_page(product, config).into_string();
            (root.join(&page.path), html)
        })
        .collect();

    fs::create_dir_all(root.join(&config.paths.products_dir))?;
    for (path, html) in &rendered {
        write_file(path, html)?;
        debug!(path = %path.display(), "wrote product page");
    }

    let sitemap = sitemap_xml(&config.site.base_url, catalog.slugs());
    write_file(&root.join(&report.sitemap_path), &sitemap)?;
    debug!(entries = report.sitemap_entries, "wrote sitemap");

    let redirects = render_redirects(&redirect_rules(catalog.slugs()));
    write_file(&root.join(&report.redirects_path), &redirects)?;
    debug!(rules = report.redirect_rules, "wrote redirects");

    info!(
        pages = report.pages.len(),
        skipped = report.skipped.total(),
        "site generated"
    );
    Ok(report)
}

/// Load and validate the catalog and report what [`generate`] would write.
/// Nothing is written.
pub fn check(root: &Path, config: &SiteConfig) -> Result<GenerateReport, GenerateError> {
    let catalog = load(root, config)?;
    Ok(plan(&catalog, config))
}

fn load(root: &Path, config: &SiteConfig) -> Result<Catalog, GenerateError> {
    let catalog_path = root.join(&config.paths.catalog);
    info!(path = %catalog_path.display(), "loading catalog");
    Ok(catalog::load_catalog(&catalog_path)?)
}

fn plan(catalog: &Catalog, config: &SiteConfig) -> GenerateReport {
    let products_dir = Path::new(&config.paths.products_dir);
    let pages = catalog
        .products
        .iter()
        .map(|product| GeneratedPage {
            slug: product.slug.clone(),
            name: product.name.clone(),
            image_count: product.images.len(),
            path: products_dir.join(product.slug.page_dir()).join("index.html"),
        })
        .collect();

    GenerateReport {
        pages,
        skipped: catalog.skipped,
        sitemap_path: PathBuf::from(&config.paths.sitemap),
        sitemap_entries: sitemap_entries(&config.site.base_url, catalog.slugs()).len(),
        redirects_path: PathBuf::from(&config.paths.redirects),
        redirect_rules: redirect_rules(catalog.slugs()).len(),
    }
}

fn write_file(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)
}

// ============================================================================
// Tests
// ============================================================================
