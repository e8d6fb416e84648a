//! Product page rendering.
//!
//! One [`Product`] becomes one complete HTML document. Rendering is a pure
//! function of the product and the site config, so pages can be rendered in
//! any order (or in parallel) and always come out byte-identical.
//!
//! ## Page Anatomy
//!
//! ```text
//! head      title, meta description, canonical, Open Graph, Twitter card,
//!           JSON-LD Product
//! header    logo + main navigation
//! main      breadcrumb, hero, gallery (main image [+ arrows, thumbnails]),
//!           panel (category, #price, dimensions, description, CTAs)
//! script    gallery navigation, only when there are 2+ images
//! ```
//!
//! ## Escaping
//!
//! Markup goes through [maud](https://maud.lambda.xyz/), so every product
//! string placed in element content or an attribute is HTML-escaped. The
//! JSON-LD block is built with `serde_json` instead and is emitted
//! pre-escaped, with `<`, `>` and `&` written as `\u003c`, `\u003e` and
//! `\u0026` so no product text can terminate the `<script>` element.

use crate::cloudinary::{self, ResponsiveSet};
use crate::config::SiteConfig;
use crate::types::Product;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use serde_json::json;

const GALLERY_JS: &str = include_str!("../static/gallery.js");

const IMAGE_SIZES: &str = "(max-width: 900px) 92vw, 620px";

/// Everything derived from a product before markup is produced.
struct PageContext<'a> {
    product: &'a Product,
    config: &'a SiteConfig,
    canonical_url: String,
    meta_description: String,
    main_image: ResponsiveSet,
    social_image: String,
    structured_data: String,
}

impl<'a> PageContext<'a> {
    fn new(product: &'a Product, config: &'a SiteConfig) -> Self {
        let base_url = config.site.base_url.as_str();
        let first_image = product
            .images
            .first()
            .map(String::as_str)
            .unwrap_or(config.site.icon.as_str());

        let canonical_url = product.slug.product_url(base_url);
        let meta_description = meta_description(product, config);
        let social_image = absolute_url(
            base_url,
            &cloudinary::transform(first_image, cloudinary::SOCIAL_CARD),
        );
        let schema_images = schema_images(product, config);
        let structured_data =
            structured_data(product, config, &schema_images, &meta_description, &canonical_url);

        Self {
            product,
            config,
            canonical_url,
            meta_description,
            main_image: ResponsiveSet::from_source(first_image),
            social_image,
            structured_data,
        }
    }
}

/// Prefix path-absolute URLs (`/images/x.png`) with the site origin.
pub fn absolute_url(base_url: &str, url: &str) -> String {
    if url.starts_with('/') && !url.starts_with("//") {
        format!("{base_url}{url}")
    } else {
        url.to_string()
    }
}

/// First description line (or a generated sentence) plus the site suffix.
pub fn meta_description(product: &Product, config: &SiteConfig) -> String {
    let lead = match product.description.first() {
        Some(line) => line.clone(),
        None => format!("{} from {}.", product.name, config.site.name),
    };
    format!("{lead} {}", config.copy.meta_suffix)
        .trim_end()
        .to_string()
}

/// Images listed in the JSON-LD block: every image at 1200px, or the site icon.
fn schema_images(product: &Product, config: &SiteConfig) -> Vec<String> {
    let base_url = config.site.base_url.as_str();
    if product.images.is_empty() {
        return vec![absolute_url(base_url, &config.site.icon)];
    }
    product
        .images
        .iter()
        .map(|url| absolute_url(base_url, &cloudinary::transform(url, cloudinary::WIDTH_1200)))
        .collect()
}

fn structured_data(
    product: &Product,
    config: &SiteConfig,
    images: &[String],
    description: &str,
    url: &str,
) -> String {
    let schema = json!({
        "@context": "https://schema.org",
        "@type": "Product",
        "name": product.name,
        "category": product.category,
        "image": images,
        "description": description,
        "brand": { "@type": "Brand", "name": config.site.name },
        "url": url,
    });
    // Those characters only occur inside JSON strings, where \uXXXX is legal.
    schema
        .to_string()
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026")
}

/// Render the full HTML document for one product.
pub fn render_product_page(product: &Product, config: &SiteConfig) -> Markup {
    let page = PageContext::new(product, config);

    html! {
        (DOCTYPE)
        html lang="en" {
            (head(&page))
            body {
                (site_header(config))
                main.content-page {
                    div.breadcrumb {
                        a href="/" { "Home" }
                        " "
                        span style="opacity:.55;" { "›" }
                        " "
                        span { (product.category) }
                    }
                    section.hero2 {
                        h1 { (product.name) }
                        p.meta { (product.category) " • Supply across " (config.site.region) }
                    }
                    section.cols {
                        div.media { (gallery(&page)) }
                        div.panel { (panel(&page)) }
                    }
                    (more_section(config))
                }
                @if product.has_gallery() {
                    script { (PreEscaped(GALLERY_JS)) }
                }
            }
        }
    }
}

fn head(page: &PageContext) -> Markup {
    let product = page.product;
    let site = &page.config.site;

    html! {
        head {
            meta charset="UTF-8";
            meta name="viewport" content="width=device-width, initial-scale=1.0";
            title { (product.name) " | " (site.name) }
            meta name="description" content=(page.meta_description);
            meta name="robots" content="index, follow";
            meta name="theme-color" content=(site.theme_color);
            link rel="canonical" href=(page.canonical_url);
            link rel="stylesheet" href=(site.stylesheet);
            link rel="icon" href=(site.icon) type="image/png";
            link rel="apple-touch-icon" href=(site.icon);

            meta property="og:type" content="product";
            meta property="og:site_name" content=(site.name);
            meta property="og:title" content=(product.name);
            meta property="og:description" content=(page.meta_description);
            meta property="og:url" content=(page.canonical_url);
            meta property="og:image" content=(page.social_image);
            meta property="og:image:width" content="1200";
            meta property="og:image:height" content="630";
            meta property="og:image:alt" content=(product.name);

            meta name="twitter:card" content="summary_large_image";
            meta name="twitter:title" content=(product.name);
            meta name="twitter:description" content=(page.meta_description);
            meta name="twitter:image" content=(page.social_image);

            script type="application/ld+json" { (PreEscaped(&page.structured_data)) }
        }
    }
}

fn site_header(config: &SiteConfig) -> Markup {
    let enquiry = config.contact.enquiry_url.as_str();
    html! {
        header.site-header {
            div.header-inner {
                a.brand href="/" aria-label={ (config.site.name) " Home" } {
                    img src=(config.site.logo) alt=(config.site.name);
                }
                nav.nav-pills aria-label="Main navigation" {
                    a href="/about.html" { "About" }
                    a href="/faq.html" { "FAQ" }
                    a href=(enquiry) { "Contact" }
                    a.btn-cta href=(enquiry) { "Request Quote" }
                }
            }
        }
    }
}

/// Main image, plus arrows and thumbnails when there is more than one image.
fn gallery(page: &PageContext) -> Markup {
    let product = page.product;
    let main = &page.main_image;

    html! {
        div.product-gallery role="region" aria-label="Product image gallery" {
            @if product.has_gallery() {
                button.nav-arrow.prev type="button" aria-label="Previous image" id="pgPrev" { "‹" }
                button.nav-arrow.next type="button" aria-label="Next image" id="pgNext" { "›" }
            }
            img.product-main id="pgMain" src=(main.w800) srcset=(main.srcset())
                sizes=(IMAGE_SIZES) alt=(product.name) loading="eager";
            @if product.has_gallery() {
                div.product-thumbs aria-label="Product image thumbnails" {
                    @for (i, url) in product.images.iter().enumerate() {
                        @let variants = ResponsiveSet::from_source(url);
                        button.product-thumb.active[i == 0] type="button"
                            data-src400=(variants.w400)
                            data-src800=(variants.w800)
                            data-src1200=(variants.w1200)
                            aria-label={ "View image " (i + 1) } {
                            img src=(cloudinary::transform(url, cloudinary::THUMBNAIL))
                                alt={ (product.name) " thumbnail " (i + 1) } loading="lazy";
                        }
                    }
                }
            }
        }
    }
}

fn panel(page: &PageContext) -> Markup {
    let product = page.product;
    let config = page.config;

    html! {
        div style="display:flex; justify-content:space-between; gap:12px; align-items:center; flex-wrap:wrap;" {
            strong id="cat" style="text-transform:uppercase; letter-spacing:1px; font-size:.85rem; color:#34B0E0;" {
                (product.category)
            }
            // Always present: external scripts look up #price.
            strong id="price" style="font-size:1.05rem; color:#0f172a;" { (product.price) }
        }
        @if !product.dimensions.is_empty() {
            div.dimension-box id="dims-box" {
                div.dim-label { "Details" }
                div.dim-list id="dims-list" {
                    @for dimension in &product.dimensions {
                        span.pill { (dimension) }
                    }
                }
            }
        }
        ul.list id="desc" {
            @if product.description.is_empty() {
                li { (config.copy.default_bullet) }
            } @else {
                @for line in &product.description {
                    li { (line) }
                }
            }
        }
        div.ctaRow {
            a.cta-btn href=(config.contact.enquiry_url) style="display:inline-block; text-decoration:none;" {
                "Request Quote"
            }
            a.cta-btn href=(config.contact.phone_uri()) style="display:inline-block; text-decoration:none;" {
                "Call " (config.contact.phone)
            }
        }
        p.note { (config.copy.supply_note) }
    }
}

fn more_section(config: &SiteConfig) -> Markup {
    html! {
        div.section style="margin-top:26px;" {
            h2 style="margin:0 0 10px 0;" { "More from " (config.site.name) }
            p style="margin:0; color:#334155; line-height:1.7;" {
                "Browse our full catalogue on the homepage, or contact us for availability and pricing across "
                (config.site.region) "."
            }
            p style="margin:10px 0 0 0;" {
                a href="/" style="font-weight:900; text-decoration:none;" { "View all products →" }
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
