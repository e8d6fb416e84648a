//! Cloudinary delivery-URL transformations.
//!
//! Cloudinary serves derived images when a transformation segment is placed
//! right after `/upload/` in a delivery URL:
//!
//! ```text
//! https://res.cloudinary.com/demo/image/upload/products/board.jpg
//! https://res.cloudinary.com/demo/image/upload/w_400,q_auto,f_auto/products/board.jpg
//! ```
//!
//! Anything that is not a Cloudinary upload URL passes through untouched,
//! so local paths and other CDNs still render (just without resizing).

const HOST_MARKER: &str = "res.cloudinary.com";
const UPLOAD_MARKER: &str = "/upload/";

/// 400px wide, automatic quality and format.
pub const WIDTH_400: &str = "w_400,q_auto,f_auto";
/// 800px wide, automatic quality and format.
pub const WIDTH_800: &str = "w_800,q_auto,f_auto";
/// 1200px wide, automatic quality and format.
pub const WIDTH_1200: &str = "w_1200,q_auto,f_auto";
/// 1200x630 fill crop for Open Graph / Twitter cards.
pub const SOCIAL_CARD: &str = "w_1200,h_630,c_fill,g_auto,q_auto,f_auto";
/// Gallery thumbnail.
pub const THUMBNAIL: &str = "w_200,q_auto,f_auto";

pub fn is_cloudinary(url: &str) -> bool {
    url.contains(HOST_MARKER) && url.contains(UPLOAD_MARKER)
}

/// Insert `directive` as a path segment right after `/upload/`.
///
/// Directives are opaque; surrounding slashes and whitespace are trimmed and
/// an empty directive only normalizes the slashes after `/upload/`. Each call
/// adds a segment, so always derive variants from the original URL.
pub fn transform(url: &str, directive: &str) -> String {
    if !is_cloudinary(url) {
        return url.to_string();
    }
    let Some((head, tail)) = url.split_once(UPLOAD_MARKER) else {
        return url.to_string();
    };
    let tail = tail.trim_start_matches('/');
    let directive = directive.trim_matches('/').trim();
    if directive.is_empty() {
        format!("{head}{UPLOAD_MARKER}{tail}")
    } else {
        format!("{head}{UPLOAD_MARKER}{directive}/{tail}")
    }
}

/// The three width variants behind a responsive `<img>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponsiveSet {
    pub w400: String,
    pub w800: String,
    pub w1200: String,
}

impl ResponsiveSet {
    pub fn from_source(url: &str) -> Self {
        Self {
            w400: transform(url, WIDTH_400),
            w800: transform(url, WIDTH_800),
            w1200: transform(url, WIDTH_1200),
        }
    }

    /// `srcset` attribute value with width descriptors.
    pub fn srcset(&self) -> String {
        format!(
            "{} 400w, {} 800w, {} 1200w",
            self.w400, self.w800, self.w1200
        )
    }
}
