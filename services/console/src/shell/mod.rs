//! Admin shell: sidebar navigation and page resolution.

pub mod navigation;
pub mod pages;

use serde::Serialize;

use navigation::{NavItem, nav_items};
use pages::Page;

pub const BRAND: &str = "NCM Group";
pub const BRAND_SUBTITLE: &str = "Admin Dashboard";

/// Everything a renderer needs for one path: sidebar plus page content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShellView {
    pub brand: &'static str,
    pub subtitle: &'static str,
    pub path: String,
    pub title: &'static str,
    pub nav: Vec<NavItem>,
    pub page: Page,
}

impl ShellView {
    pub fn new(path: &str, page: Page) -> Self {
        Self {
            brand: BRAND,
            subtitle: BRAND_SUBTITLE,
            path: path.to_owned(),
            title: page.title(),
            nav: nav_items(path),
            page,
        }
    }
}
