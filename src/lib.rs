//! # Catalog Pages
//!
//! A static site generator for a product catalog. One JSON file is the data
//! source: every record with a slug becomes a product page, and the same slug
//! list drives the sitemap and the host's redirect map.
//!
//! ```text
//! data/products.json  →  products/<slug>/index.html
//!                     →  sitemap.xml
//!                     →  _redirects
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`catalog`] | Loads `products.json`, filters slugs, normalizes list and text fields |
//! | [`types`] | `Slug` validation and encoding, the normalized `Product` |
//! | [`cloudinary`] | Inserts resize/format directives into Cloudinary delivery URLs |
//! | [`render`] | Renders one product page with Maud: SEO head, JSON-LD, gallery, panel |
//! | [`sitemap`] | Sitemap XML for the fixed pages plus every product |
//! | [`redirects`] | `_redirects` short links and the catch-all rule |
//! | [`generate`] | Orchestrates load → render → write, and the dry-run `check` |
//! | [`config`] | `site.toml` loading, merging onto stock defaults, validation |
//! | [`output`] | CLI output formatting |
//! | [`observability`] | `tracing` subscriber setup |
//!
//! # Design Decisions
//!
//! ## Load Everything, Then Write
//!
//! The catalog is parsed and every page rendered before the first file is
//! written. A missing or malformed catalog aborts the run with the previous
//! build still in place.
//!
//! ## Slugs Are Paths
//!
//! A slug is used verbatim as a directory name under `products/`, so slugs
//! that could escape that directory (`..`, absolute paths, backslashes) are
//! skipped with a warning rather than written. In URLs each slug segment is
//! percent-encoded.
//!
//! ## No Image Processing
//!
//! Images are never downloaded or resized locally. Cloudinary derives the
//! 400/800/1200px variants, thumbnails and the social card from directives
//! in the URL; other image hosts are linked as-is.

pub mod catalog;
pub mod cloudinary;
pub mod config;
pub mod generate;
pub mod observability;
pub mod output;
pub mod redirects;
pub mod render;
pub mod sitemap;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
