//! XML sitemap generation.
//!
//! The sitemap lists the fixed top-level pages first, then every product
//! page in catalog order. It is rendered with maud like the product pages,
//! so `loc` values are XML-escaped.

use crate::types::Slug;
use maud::{Markup, PreEscaped, html};

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;
const SITEMAP_NAMESPACE: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFreq {
    Weekly,
    Monthly,
}

impl ChangeFreq {
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeFreq::Weekly => "weekly",
            ChangeFreq::Monthly => "monthly",
        }
    }
}

/// Top-level pages, in sitemap order: path, change frequency, priority.
const FIXED_PAGES: [(&str, ChangeFreq, &str); 4] = [
    ("/", ChangeFreq::Weekly, "1.0"),
    ("/about.html", ChangeFreq::Monthly, "0.7"),
    ("/faq.html", ChangeFreq::Monthly, "0.7"),
    ("/contact.html", ChangeFreq::Monthly, "0.7"),
];

const PRODUCT_CHANGEFREQ: ChangeFreq = ChangeFreq::Weekly;
const PRODUCT_PRIORITY: &str = "0.7";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapEntry {
    pub loc: String,
    pub changefreq: ChangeFreq,
    pub priority: &'static str,
}

/// Fixed pages followed by one entry per product slug.
pub fn sitemap_entries<'a>(
    base_url: &str,
    slugs: impl IntoIterator<Item = &'a Slug>,
) -> Vec<SitemapEntry> {
    let fixed = FIXED_PAGES
        .iter()
        .map(|&(path, changefreq, priority)| SitemapEntry {
            loc: format!("{base_url}{path}"),
            changefreq,
            priority,
        });
    let products = slugs.into_iter().map(|slug| SitemapEntry {
        loc: slug.product_url(base_url),
        changefreq: PRODUCT_CHANGEFREQ,
        priority: PRODUCT_PRIORITY,
    });
    fixed.chain(products).collect()
}

pub fn render_sitemap(entries: &[SitemapEntry]) -> Markup {
    html! {
        (PreEscaped(XML_DECLARATION))
        "\n"
        urlset xmlns=(SITEMAP_NAMESPACE) {
            @for entry in entries {
                "\n  "
                url {
                    loc { (entry.loc) }
                    changefreq { (entry.changefreq.as_str()) }
                    priority { (entry.priority) }
                }
            }
            "\n"
        }
        "\n"
    }
}

/// Complete sitemap document for the given product slugs.
pub fn sitemap_xml<'a>(base_url: &str, slugs: impl IntoIterator<Item = &'a Slug>) -> String {
    render_sitemap(&sitemap_entries(base_url, slugs)).into_string()
}
