use serde::Serialize;

use crate::shell::pages::Route;

/// Icon reference; rendering is up to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Icon {
    Home,
    UserAdd,
    Users,
    Package,
    ChartBar,
    Cog,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavEntry {
    pub label: &'static str,
    pub path: &'static str,
    pub icon: Icon,
    pub route: Route,
}

/// Sidebar entries, in display order.
pub const NAVIGATION: [NavEntry; 6] = [
    NavEntry {
        label: "Dashboard",
        path: "/",
        icon: Icon::Home,
        route: Route::Dashboard,
    },
    NavEntry {
        label: "Register User",
        path: "/register",
        icon: Icon::UserAdd,
        route: Route::Register,
    },
    NavEntry {
        label: "User Management",
        path: "/users",
        icon: Icon::Users,
        route: Route::Users,
    },
    NavEntry {
        label: "Inventory",
        path: "/inventory",
        icon: Icon::Package,
        route: Route::Placeholder {
            title: "Inventory Management",
        },
    },
    NavEntry {
        label: "Analytics",
        path: "/analytics",
        icon: Icon::ChartBar,
        route: Route::Placeholder {
            title: "Analytics & Reports",
        },
    },
    NavEntry {
        label: "Settings",
        path: "/settings",
        icon: Icon::Cog,
        route: Route::Placeholder {
            title: "System Settings",
        },
    },
];

/// Sidebar entry with its highlight state for one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub label: &'static str,
    pub path: &'static str,
    pub icon: Icon,
    pub active: bool,
}

/// The entry whose path equals `path` exactly. No prefix matching.
pub fn active_entry(path: &str) -> Option<&'static NavEntry> {
    NAVIGATION.iter().find(|entry| entry.path == path)
}

pub fn nav_items(path: &str) -> Vec<NavItem> {
    NAVIGATION
        .iter()
        .map(|entry| NavItem {
            label: entry.label,
            path: entry.path,
            icon: entry.icon,
            active: entry.path == path,
        })
        .collect()
}
