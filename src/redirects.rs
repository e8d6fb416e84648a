//! `_redirects` rules for Netlify / Cloudflare Pages style hosts.
//!
//! Every product gets a short link (`/<slug>` to its page, permanent), and a
//! final catch-all serves the home page for anything else.

use crate::types::Slug;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectRule {
    pub from: String,
    pub to: String,
    pub status: u16,
}

impl RedirectRule {
    fn product(slug: &Slug) -> Self {
        let encoded = slug.url_encoded();
        Self {
            from: format!("/{encoded}"),
            to: format!("/products/{encoded}/"),
            status: 301,
        }
    }

    fn fallback() -> Self {
        Self {
            from: "/*".to_string(),
            to: "/index.html".to_string(),
            status: 200,
        }
    }
}

impl fmt::Display for RedirectRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}    {}   {}", self.from, self.to, self.status)
    }
}

/// One 301 per slug in catalog order, then the catch-all.
///
/// The catch-all must stay last: hosts evaluate rules top to bottom.
pub fn redirect_rules<'a>(slugs: impl IntoIterator<Item = &'a Slug>) -> Vec<RedirectRule> {
    slugs
        .into_iter()
        .map(RedirectRule::product)
        .chain(std::iter::once(RedirectRule::fallback()))
        .collect()
}

pub fn render_redirects(rules: &[RedirectRule]) -> String {
    let mut out = String::new();
    for rule in rules {
        out.push_str(&rule.to_string());
        out.push('\n');
    }
    out
}
