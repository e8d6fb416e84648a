//! Site configuration module.
//!
//! Handles loading, validating, and merging `site.toml`. Stock defaults
//! describe the original storefront; a `site.toml` in the site root
//! overrides any subset of them.
//!
//! ## Config File Location
//!
//! ```text
//! site/
//! ├── site.toml                # Optional (overrides stock defaults)
//! ├── data/
//! │   └── products.json        # Catalog input
//! ├── products/                # Generated product pages
//! ├── sitemap.xml              # Generated
//! └── _redirects               # Generated
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! base_url = "https://sqframes.com"   # No trailing slash
//! name = "Square Frames"
//! region = "Fiji"
//! logo = "/images/sqf_logo_transparent.png"
//! icon = "/images/tab_icon.png"       # Also the fallback product image
//! stylesheet = "/style.css"
//! theme_color = "#ffffff"
//!
//! [contact]
//! phone = "+679 785 5919"
//! enquiry_url = "/contact.html#enquiry"
//!
//! [copy]
//! meta_suffix = "Nationwide supply across Fiji. Request a quote."
//! default_bullet = "Request details and availability."
//! supply_note = "For faster service, include the item name, ..."
//!
//! [paths]
//! catalog = "data/products.json"
//! products_dir = "products"
//! sitemap = "sitemap.xml"
//! redirects = "_redirects"
//!
//! [processing]
//! max_processes = 4         # Max render threads (omit for auto = CPU cores)
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Name of the optional config file in the site root.
pub const CONFIG_FILE: &str = "site.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `site.toml`.
///
/// All fields have defaults. User config files need only specify the values
/// they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Site identity: base URL, brand name, shared assets.
    pub site: SiteIdentity,
    /// Contact details shown on every product page.
    pub contact: ContactConfig,
    /// Fixed copy blocks.
    pub copy: CopyConfig,
    /// Input and output locations, relative to the site root.
    pub paths: PathsConfig,
    /// Render parallelism.
    pub processing: ProcessingConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = &self.site.base_url;
        if !(base.starts_with("https://") || base.starts_with("http://")) {
            return Err(ConfigError::Validation(
                "site.base_url must start with http:// or https://".into(),
            ));
        }
        if base.ends_with('/') {
            return Err(ConfigError::Validation(
                "site.base_url must not end with a slash".into(),
            ));
        }
        if self.site.icon.trim().is_empty() {
            return Err(ConfigError::Validation(
                "site.icon must not be empty".into(),
            ));
        }
        let paths = [
            ("paths.catalog", &self.paths.catalog),
            ("paths.products_dir", &self.paths.products_dir),
            ("paths.sitemap", &self.paths.sitemap),
            ("paths.redirects", &self.paths.redirects),
        ];
        for (key, value) in paths {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation(format!("{key} must not be empty")));
            }
        }
        Ok(())
    }
}

/// Site identity shared by every generated document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteIdentity {
    /// Absolute origin used for canonical URLs and the sitemap, no trailing slash.
    pub base_url: String,
    /// Brand name used in titles and structured data.
    pub name: String,
    /// Region named in page copy ("Supply across ...").
    pub region: String,
    /// Header logo path.
    pub logo: String,
    /// Favicon path, also the fallback image for products without images.
    pub icon: String,
    /// Stylesheet linked from every page.
    pub stylesheet: String,
    /// `theme-color` meta value.
    pub theme_color: String,
}

impl Default for SiteIdentity {
    fn default() -> Self {
        Self {
            base_url: "https://sqframes.com".to_string(),
            name: "Square Frames".to_string(),
            region: "Fiji".to_string(),
            logo: "/images/sqf_logo_transparent.png".to_string(),
            icon: "/images/tab_icon.png".to_string(),
            stylesheet: "/style.css".to_string(),
            theme_color: "#ffffff".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContactConfig {
    /// Display form of the phone number; the `tel:` link strips whitespace.
    pub phone: String,
    /// Target of every "Request Quote" / "Contact" link.
    pub enquiry_url: String,
}

impl ContactConfig {
    /// Phone number as used in a `tel:` URI.
    pub fn phone_uri(&self) -> String {
        let digits: String = self.phone.chars().filter(|c| !c.is_whitespace()).collect();
        format!("tel:{digits}")
    }
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            phone: "+679 785 5919".to_string(),
            enquiry_url: "/contact.html#enquiry".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CopyConfig {
    /// Appended to every meta description.
    pub meta_suffix: String,
    /// Sole description bullet for products without a description.
    pub default_bullet: String,
    /// Note under the call-to-action buttons.
    pub supply_note: String,
}

impl Default for CopyConfig {
    fn default() -> Self {
        Self {
            meta_suffix: "Nationwide supply across Fiji. Request a quote.".to_string(),
            default_bullet: "Request details and availability.".to_string(),
            supply_note: "For faster service, include the item name, quantities (if known), \
                          and your location in Fiji."
                .to_string(),
        }
    }
}

/// Input and output locations, all relative to the site root.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    pub catalog: String,
    pub products_dir: String,
    pub sitemap: String,
    pub redirects: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            catalog: "data/products.json".to_string(),
            products_dir: "products".to_string(),
            sitemap: "sitemap.xml".to_string(),
            redirects: "_redirects".to_string(),
        }
    }
}

/// Parallel rendering settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of render threads.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer that user overrides are merged on top of.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `site.toml` from the site root as a raw TOML value.
///
/// Returns `Ok(None)` if no `site.toml` exists.
pub fn load_raw_config(root: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = root.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load the site config from `site.toml` in the given root.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    resolve_config(stock_defaults_value(), load_raw_config(root)?)
}

/// Returns a fully-commented stock `site.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# catalog-pages site configuration
# ================================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys cause an error.

# ---------------------------------------------------------------------------
# Site identity
# ---------------------------------------------------------------------------
[site]
# Origin for canonical URLs, social tags and the sitemap. No trailing slash.
base_url = "https://sqframes.com"
name = "Square Frames"
# Named in page copy: "Supply across <region>".
region = "Fiji"
logo = "/images/sqf_logo_transparent.png"
# Favicon, and the fallback image for products without images.
icon = "/images/tab_icon.png"
stylesheet = "/style.css"
theme_color = "#ffffff"

# ---------------------------------------------------------------------------
# Contact
# ---------------------------------------------------------------------------
[contact]
phone = "+679 785 5919"
enquiry_url = "/contact.html#enquiry"

# ---------------------------------------------------------------------------
# Copy
# ---------------------------------------------------------------------------
[copy]
# Appended to every meta description.
meta_suffix = "Nationwide supply across Fiji. Request a quote."
# Shown when a product has no description.
default_bullet = "Request details and availability."
supply_note = "For faster service, include the item name, quantities (if known), and your location in Fiji."

# ---------------------------------------------------------------------------
# Paths (relative to the site root)
# ---------------------------------------------------------------------------
[paths]
catalog = "data/products.json"
products_dir = "products"
sitemap = "sitemap.xml"
redirects = "_redirects"

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum render threads.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}
