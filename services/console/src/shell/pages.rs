use serde::Serialize;

use erp_domain::user::UserRole;

use crate::listing::ListingSnapshot;
use crate::shell::navigation::active_entry;

pub const UNDER_DEVELOPMENT: &str = "This page is under development.";
pub const COMING_SOON_TITLE: &str = "Page Coming Soon";
pub const COMING_SOON_BODY: &str = "This page is under development. Check back later!";

/// Where a path leads, before any data is fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Dashboard,
    Register,
    Users,
    Placeholder { title: &'static str },
    /// Any unregistered path. A soft fallback, never a 404.
    ComingSoon,
}

/// Every page is reached through its navigation entry; anything else is coming soon.
pub fn resolve(path: &str) -> Route {
    active_entry(path).map_or(Route::ComingSoon, |entry| entry.route)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatCard {
    pub title: &'static str,
    pub value: &'static str,
}

/// Dashboard figures; inventory is not wired up yet.
pub const DASHBOARD_STATS: [StatCard; 4] = [
    StatCard {
        title: "Total Products",
        value: "0",
    },
    StatCard {
        title: "Low Stock Items",
        value: "0",
    },
    StatCard {
        title: "Pending Orders",
        value: "0",
    },
    StatCard {
        title: "Total Sales",
        value: "RM 0",
    },
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Page {
    Dashboard {
        title: &'static str,
        subtitle: &'static str,
        stats: Vec<StatCard>,
    },
    Register {
        title: &'static str,
        roles: Vec<UserRole>,
    },
    Users {
        title: &'static str,
        listing: ListingSnapshot,
    },
    Placeholder {
        title: &'static str,
        body: &'static str,
    },
    ComingSoon {
        title: &'static str,
        body: &'static str,
    },
}

impl Page {
    pub fn dashboard() -> Self {
        Self::Dashboard {
            title: "Admin Dashboard",
            subtitle: "Welcome to the Inventory Management System. Manage your business operations efficiently.",
            stats: DASHBOARD_STATS.to_vec(),
        }
    }

    pub fn register() -> Self {
        Self::Register {
            title: "Register User",
            roles: UserRole::ALL.to_vec(),
        }
    }

    pub fn users(listing: ListingSnapshot) -> Self {
        Self::Users {
            title: "Registered Users",
            listing,
        }
    }

    pub fn placeholder(title: &'static str) -> Self {
        Self::Placeholder {
            title,
            body: UNDER_DEVELOPMENT,
        }
    }

    pub fn coming_soon() -> Self {
        Self::ComingSoon {
            title: COMING_SOON_TITLE,
            body: COMING_SOON_BODY,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Dashboard { title, .. }
            | Self::Register { title, .. }
            | Self::Users { title, .. }
            | Self::Placeholder { title, .. }
            | Self::ComingSoon { title, .. } => *title,
        }
    }
}
