//! Catalog loading and record normalization.
//!
//! The catalog is a JSON array of product records. Every attribute except
//! `slug` is optional, and the list fields (`images`, `tags`) may arrive
//! either as a real array or as a comma-joined string:
//!
//! ```json
//! [
//!   {
//!     "slug": "exterior-plywood-18mm",
//!     "name": "Exterior Plywood 18mm",
//!     "category": "Plywood",
//!     "price": "Request Quote",
//!     "description": "Line 1\nLine 2",
//!     "dimensions": "2400 x 1200\n18mm",
//!     "images": [
//!       "https://res.cloudinary.com/demo/image/upload/products/plywood-1.jpg",
//!       "https://res.cloudinary.com/demo/image/upload/products/plywood-2.jpg"
//!     ],
//!     "tags": "plywood, construction, exterior"
//!   }
//! ]
//! ```
//!
//! ## Filtering
//!
//! Records are filtered on their slug before anything else is looked at:
//! blank slugs, path-traversal slugs and repeated slugs are skipped and
//! counted in [`SkippedRecords`]. A record that survives the filter but has
//! a field of the wrong type aborts the whole load; there is no per-record
//! error isolation.

use crate::types::{Product, Slug, SlugRejection};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

const DEFAULT_NAME: &str = "Product";
const DEFAULT_CATEGORY: &str = "Products";

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Missing {}", .0.display())]
    Missing(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid record #{index} (slug {slug}): {source}")]
    Record {
        index: usize,
        slug: String,
        source: serde_json::Error,
    },
}

/// Counts of records left out of every output, by reason.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SkippedRecords {
    pub missing_slug: usize,
    pub unsafe_slug: usize,
    pub duplicate_slug: usize,
}

impl SkippedRecords {
    pub fn total(&self) -> usize {
        self.missing_slug + self.unsafe_slug + self.duplicate_slug
    }
}

/// A loaded catalog: products in input order plus the skipped tally.
#[derive(Debug, Default)]
pub struct Catalog {
    pub products: Vec<Product>,
    pub skipped: SkippedRecords,
}

impl Catalog {
    pub fn slugs(&self) -> impl Iterator<Item = &Slug> {
        self.products.iter().map(|p| &p.slug)
    }
}

/// Record fields after the slug has been taken out.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawProduct {
    name: Option<String>,
    category: Option<String>,
    price: Option<String>,
    description: Option<String>,
    dimensions: Option<String>,
    #[serde(deserialize_with = "list_field")]
    images: Vec<String>,
    #[serde(deserialize_with = "list_field")]
    tags: Vec<String>,
}

impl RawProduct {
    fn into_product(self, slug: Slug) -> Product {
        Product {
            slug,
            name: self.name.unwrap_or_else(|| DEFAULT_NAME.to_string()),
            category: self
                .category
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            price: self.price.as_deref().unwrap_or_default().trim().to_string(),
            description: non_blank_lines(self.description.as_deref()),
            dimensions: non_blank_lines(self.dimensions.as_deref()),
            images: self.images,
            tags: self.tags,
        }
    }
}

fn list_field<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(normalize_list(&value))
}

/// Coerce a list-ish JSON value into trimmed, non-empty strings.
///
/// - `null` → empty
/// - array → each element stringified and trimmed; `null` elements and
///   blanks dropped
/// - string → split on commas, trimmed, blanks dropped
/// - any other scalar → one element if non-blank
///
/// Order is always preserved.
pub fn normalize_list(value: &Value) -> Vec<String> {
    match value {
        Value::Null => Vec::new(),
        Value::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                Value::Null => None,
                Value::String(s) => Some(s.trim().to_string()),
                other => Some(other.to_string().trim().to_string()),
            })
            .filter(|s| !s.is_empty())
            .collect(),
        Value::String(s) => s
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect(),
        other => {
            let text = other.to_string();
            let text = text.trim();
            if text.is_empty() {
                Vec::new()
            } else {
                vec![text.to_string()]
            }
        }
    }
}

/// Split multi-line text into trimmed, non-blank lines.
fn non_blank_lines(text: Option<&str>) -> Vec<String> {
    text.unwrap_or_default()
        .split(['\n', '\r'])
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

/// `null`, `false`, zero and empty containers: slugs that count as missing
/// rather than as a type error.
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
    }
}

/// Load and normalize the catalog at `path`.
///
/// A missing file is reported as [`CatalogError::Missing`] so callers can
/// abort before producing any output.
pub fn load_catalog(path: &Path) -> Result<Catalog, CatalogError> {
    if !path.exists() {
        return Err(CatalogError::Missing(path.to_path_buf()));
    }
    let content = fs::read_to_string(path)?;
    parse_catalog(&content)
}

/// Parse catalog JSON text into normalized products.
pub fn parse_catalog(content: &str) -> Result<Catalog, CatalogError> {
    let records: Vec<Map<String, Value>> = serde_json::from_str(content)?;

    let mut catalog = Catalog::default();
    let mut seen = HashSet::new();

    for (index, mut record) in records.into_iter().enumerate() {
        let raw_slug = match record.remove("slug") {
            None => String::new(),
            Some(Value::String(s)) => s,
            Some(other) if is_falsy(&other) => String::new(),
            Some(other) => {
                return Err(CatalogError::Record {
                    index,
                    slug: other.to_string(),
                    source: serde_json::Error::custom("slug must be a string"),
                });
            }
        };

        let slug = match Slug::parse(&raw_slug) {
            Ok(slug) => slug,
            Err(SlugRejection::Empty) => {
                debug!(index, "skipping record without slug");
                catalog.skipped.missing_slug += 1;
                continue;
            }
            Err(SlugRejection::Unsafe) => {
                warn!(index, slug = %raw_slug.trim(), "skipping record with unsafe slug");
                catalog.skipped.unsafe_slug += 1;
                continue;
            }
        };

        if !seen.insert(slug.clone()) {
            warn!(index, %slug, "duplicate slug, keeping the first record");
            catalog.skipped.duplicate_slug += 1;
            continue;
        }

        let raw: RawProduct =
            serde_json::from_value(Value::Object(record)).map_err(|source| {
                CatalogError::Record {
                    index,
                    slug: slug.to_string(),
                    source,
                }
            })?;
        catalog.products.push(raw.into_product(slug));
    }

    debug!(
        products = catalog.products.len(),
        skipped = catalog.skipped.total(),
        "catalog loaded"
    );
    Ok(catalog)
}
