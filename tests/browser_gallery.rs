//! Browser gallery tests: runs the embedded gallery script in headless Chrome
//! against a generated product page.
//!
//! Run with: `cargo test --test browser_gallery -- --ignored`

use headless_chrome::{Browser, LaunchOptions, Tab};
use std::path::PathBuf;
use std::process::Command;
use std::sync::{Arc, OnceLock};

const CATALOG: &str = r#"[
  {
    "slug": "gallery-board",
    "name": "Gallery Board",
    "images": [
      "https://res.cloudinary.com/demo/image/upload/products/board-1.jpg",
      "https://res.cloudinary.com/demo/image/upload/products/board-2.jpg",
      "https://res.cloudinary.com/demo/image/upload/products/board-3.jpg"
    ]
  },
  {
    "slug": "single-board",
    "name": "Single Board",
    "images": ["https://res.cloudinary.com/demo/image/upload/products/single-1.jpg"]
  }
]"#;

// ---------------------------------------------------------------------------
// Setup helpers
// ---------------------------------------------------------------------------

fn site_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/browser/site")
}

fn ensure_site_built() {
    static BUILT: OnceLock<()> = OnceLock::new();
    BUILT.get_or_init(|| {
        let root = site_dir();
        if root.exists() {
            std::fs::remove_dir_all(&root).expect("failed to clean site dir");
        }
        std::fs::create_dir_all(root.join("data")).unwrap();
        std::fs::write(root.join("data/products.json"), CATALOG).unwrap();

        let status = Command::new(env!("CARGO_BIN_EXE_catalog-pages"))
            .args(["--root", root.to_str().unwrap(), "build"])
            .status()
            .expect("failed to run catalog-pages");
        assert!(status.success(), "site generation failed");
    });
}

fn browser() -> &'static Browser {
    static B: OnceLock<Browser> = OnceLock::new();
    B.get_or_init(|| {
        Browser::new(LaunchOptions {
            window_size: Some((1280, 800)),
            ..Default::default()
        })
        .expect("failed to launch Chrome")
    })
}

fn load_product(slug: &str) -> Arc<Tab> {
    ensure_site_built();
    let tab = browser().new_tab().unwrap();
    let file = site_dir().join("products").join(slug).join("index.html");
    assert!(file.exists(), "missing: {}", file.display());

    tab.navigate_to(&format!("file://{}", file.display()))
        .unwrap()
        .wait_until_navigated()
        .unwrap();
    tab
}

fn eval(tab: &Tab, js: &str) -> serde_json::Value {
    tab.evaluate(js, false)
        .expect("failed to evaluate JS")
        .value
        .expect("no value returned")
}

fn main_src(tab: &Tab) -> String {
    eval(tab, "document.getElementById('pgMain').src")
        .as_str()
        .expect("src is not a string")
        .to_string()
}

fn main_srcset(tab: &Tab) -> String {
    eval(tab, "document.getElementById('pgMain').getAttribute('srcset')")
        .as_str()
        .expect("srcset is not a string")
        .to_string()
}

/// Index of the thumb carrying `active`, or -1.
fn active_thumb(tab: &Tab) -> i64 {
    eval(
        tab,
        "Array.from(document.querySelectorAll('.product-thumb'))\
            .findIndex(t => t.classList.contains('active'))",
    )
    .as_i64()
    .expect("index is not a number")
}

fn click(tab: &Tab, selector: &str) {
    eval(
        tab,
        &format!("document.querySelector('{selector}').click(); true"),
    );
}

fn press(tab: &Tab, key: &str) {
    eval(
        tab,
        &format!("document.dispatchEvent(new KeyboardEvent('keydown', {{ key: '{key}' }})); true"),
    );
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
#[ignore]
fn first_thumb_starts_active() {
    let tab = load_product("gallery-board");
    assert_eq!(active_thumb(&tab), 0);
    let src = main_src(&tab);
    assert!(src.ends_with("/w_800,q_auto,f_auto/products/board-1.jpg"), "src was {src}");
}

#[test]
#[ignore]
fn prev_from_first_wraps_to_last() {
    let tab = load_product("gallery-board");
    let srcset_before = main_srcset(&tab);

    click(&tab, "#pgPrev");

    assert_eq!(active_thumb(&tab), 2);
    let src = main_src(&tab);
    assert!(src.ends_with("-3.jpg"), "src was {src}");
    assert!(src.contains("/w_800,q_auto,f_auto/"), "src was {src}");

    let srcset = main_srcset(&tab);
    assert_ne!(srcset, srcset_before);
    assert!(srcset.contains("/w_400,q_auto,f_auto/products/board-3.jpg 400w"), "srcset was {srcset}");
    assert!(srcset.contains("/w_1200,q_auto,f_auto/products/board-3.jpg 1200w"), "srcset was {srcset}");
}

#[test]
#[ignore]
fn arrow_right_from_last_wraps_to_first() {
    let tab = load_product("gallery-board");
    click(&tab, "#pgPrev");
    assert_eq!(active_thumb(&tab), 2);

    press(&tab, "ArrowRight");

    assert_eq!(active_thumb(&tab), 0);
    let src = main_src(&tab);
    assert!(src.ends_with("-1.jpg"), "src was {src}");
    assert!(main_srcset(&tab).contains("products/board-1.jpg 800w"));
}

#[test]
#[ignore]
fn arrow_left_from_first_wraps_to_last() {
    let tab = load_product("gallery-board");
    press(&tab, "ArrowLeft");
    assert_eq!(active_thumb(&tab), 2);
    assert!(main_src(&tab).ends_with("-3.jpg"));
}

#[test]
#[ignore]
fn next_from_last_wraps_to_first() {
    let tab = load_product("gallery-board");
    click(&tab, ".product-thumb:nth-child(3)");
    assert_eq!(active_thumb(&tab), 2);

    click(&tab, "#pgNext");

    assert_eq!(active_thumb(&tab), 0);
    assert!(main_src(&tab).ends_with("-1.jpg"));
}

#[test]
#[ignore]
fn thumb_click_selects_that_image() {
    let tab = load_product("gallery-board");
    click(&tab, ".product-thumb:nth-child(2)");
    assert_eq!(active_thumb(&tab), 1);
    assert!(main_src(&tab).ends_with("-2.jpg"));
    let active_count = eval(&tab, "document.querySelectorAll('.product-thumb.active').length");
    assert_eq!(active_count.as_i64(), Some(1));
}

#[test]
#[ignore]
fn single_image_page_ignores_arrow_keys() {
    let tab = load_product("single-board");
    let thumbs = eval(&tab, "document.querySelectorAll('.product-thumb').length");
    assert_eq!(thumbs.as_i64(), Some(0));

    let before = main_src(&tab);
    press(&tab, "ArrowRight");
    assert_eq!(main_src(&tab), before);
}
