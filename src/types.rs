//! Catalog types shared by the renderer and the index emitters.
//!
//! A [`Product`] is the normalized form of one catalog record: defaults are
//! applied and list fields are coerced once, at load time, so rendering
//! never has to second-guess a field's shape.

use std::fmt;
use std::path::PathBuf;

/// Why a raw slug cannot identify a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlugRejection {
    /// Missing or blank after trimming.
    Empty,
    /// Would escape the products directory or form an ambiguous path
    /// (`.`/`..`/empty segments, backslashes).
    Unsafe,
}

/// A validated, trimmed product identifier.
///
/// Used verbatim as the output directory name and, percent-encoded, as the
/// URL path segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Slug(String);

impl Slug {
    /// Surrounding whitespace and trailing `/` are dropped first, so
    /// `"plywood/"` names the same page as `"plywood"`.
    pub fn parse(raw: &str) -> Result<Self, SlugRejection> {
        let slug = raw.trim().trim_end_matches('/');
        if slug.is_empty() {
            return Err(SlugRejection::Empty);
        }
        let unsafe_segment = slug
            .split('/')
            .any(|segment| segment.is_empty() || segment == "." || segment == "..");
        if unsafe_segment || slug.contains('\\') {
            return Err(SlugRejection::Unsafe);
        }
        Ok(Self(slug.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Percent-encode each path segment, keeping `/` separators.
    pub fn url_encoded(&self) -> String {
        self.0
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Directory of this product's page, relative to the products directory.
    pub fn page_dir(&self) -> PathBuf {
        self.0.split('/').collect()
    }

    /// Absolute URL of this product's page: `{base_url}/products/{encoded}/`.
    pub fn product_url(&self, base_url: &str) -> String {
        format!("{base_url}/products/{}/", self.url_encoded())
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One normalized catalog record.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub slug: Slug,
    pub name: String,
    pub category: String,
    /// Trimmed; may be empty.
    pub price: String,
    /// Non-blank description lines, trimmed.
    pub description: Vec<String>,
    /// Non-blank dimension lines, trimmed.
    pub dimensions: Vec<String>,
    /// Image URLs in catalog order.
    pub images: Vec<String>,
    /// Normalized but not rendered.
    pub tags: Vec<String>,
}

impl Product {
    /// Whether the page gets thumbnails, arrows and the gallery script.
    pub fn has_gallery(&self) -> bool {
        self.images.len() > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_is_trimmed() {
        let slug = Slug::parse("  plywood-18mm \n").unwrap();
        assert_eq!(slug.as_str(), "plywood-18mm");
    }

    #[test]
    fn blank_slug_rejected() {
        assert_eq!(Slug::parse(""), Err(SlugRejection::Empty));
        assert_eq!(Slug::parse("   "), Err(SlugRejection::Empty));
    }

    #[test]
    fn traversal_slugs_rejected() {
        for raw in ["..", "../etc", "a/../b", "/abs", "a//b", "./a", "a/./b", "a\\b"] {
            assert_eq!(Slug::parse(raw), Err(SlugRejection::Unsafe), "{raw}");
        }
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        assert_eq!(Slug::parse("plywood/").unwrap().as_str(), "plywood");
        assert_eq!(Slug::parse(" plywood/18mm// ").unwrap().as_str(), "plywood/18mm");
        assert_eq!(Slug::parse("plywood/").unwrap().page_dir(), PathBuf::from("plywood"));
    }

    #[test]
    fn lone_slash_is_empty() {
        assert_eq!(Slug::parse("/"), Err(SlugRejection::Empty));
        assert_eq!(Slug::parse(" // "), Err(SlugRejection::Empty));
    }

    #[test]
    fn nested_slug_allowed() {
        let slug = Slug::parse("plywood/18mm").unwrap();
        assert_eq!(slug.page_dir(), PathBuf::from("plywood").join("18mm"));
    }

    #[test]
    fn url_encoding_keeps_separators() {
        let slug = Slug::parse("deck boards/ø 90").unwrap();
        assert_eq!(slug.url_encoded(), "deck%20boards/%C3%B8%2090");
    }

    #[test]
    fn url_encoding_leaves_unreserved_alone() {
        let slug = Slug::parse("pine-2x4_treated.v2~").unwrap();
        assert_eq!(slug.url_encoded(), "pine-2x4_treated.v2~");
    }

    #[test]
    fn product_url_has_trailing_slash() {
        let slug = Slug::parse("a b").unwrap();
        assert_eq!(
            slug.product_url("https://example.com"),
            "https://example.com/products/a%20b/"
        );
    }
}
