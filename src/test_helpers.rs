//! Shared test utilities for the catalog-pages test suite.
//!
//! Provides fixture setup, product builders, lookup helpers that panic with
//! the available slugs on a miss, and small extractors for rendered output.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let catalog = load_catalog(&tmp.path().join("data/products.json")).unwrap();
//!
//! let plywood = find_product(&catalog, "exterior-plywood-18mm");
//! assert_eq!(plywood.images.len(), 2);
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::catalog::Catalog;
use crate::types::{Product, Slug};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/` to a temp directory and return it.
///
/// The copy is a complete site root: `data/products.json` is in place and
/// no output has been generated yet.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Write `json` as the catalog of a fresh site root.
pub fn write_catalog(root: &Path, json: &str) {
    let path = root.join("data/products.json");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, json).unwrap();
}

// =========================================================================
// Builders
// =========================================================================

/// A product with loader defaults and nothing else filled in.
pub fn product(slug: &str) -> Product {
    Product {
        slug: Slug::parse(slug).unwrap(),
        name: "Product".to_string(),
        category: "Products".to_string(),
        price: String::new(),
        description: Vec::new(),
        dimensions: Vec::new(),
        images: Vec::new(),
        tags: Vec::new(),
    }
}

// =========================================================================
// Catalog lookups: panic with a clear message on miss
// =========================================================================

/// Find a product by slug. Panics if not found.
pub fn find_product<'a>(catalog: &'a Catalog, slug: &str) -> &'a Product {
    catalog
        .products
        .iter()
        .find(|p| p.slug.as_str() == slug)
        .unwrap_or_else(|| {
            let slugs = product_slugs(catalog);
            panic!("product '{slug}' not found. Available: {slugs:?}")
        })
}

/// All product slugs in catalog order.
pub fn product_slugs(catalog: &Catalog) -> Vec<&str> {
    catalog.products.iter().map(|p| p.slug.as_str()).collect()
}

// =========================================================================
// Output extractors
// =========================================================================

/// Body of the JSON-LD `<script>` block. Panics if there is none.
pub fn json_ld(html: &str) -> &str {
    const OPEN: &str = r#"<script type="application/ld+json">"#;
    let start = html
        .find(OPEN)
        .unwrap_or_else(|| panic!("no JSON-LD block in page"))
        + OPEN.len();
    let len = html[start..]
        .find("</script>")
        .unwrap_or_else(|| panic!("unterminated JSON-LD block"));
    &html[start..start + len]
}

/// Non-overlapping occurrences of `needle` in `haystack`.
pub fn count(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}
