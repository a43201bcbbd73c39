use serde::{Deserialize, Serialize};

use crate::identity::AccountType;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavEntry {
    pub label: String,
    pub icon: String,
    pub target: String,
    #[serde(rename = "isActive")]
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stat {
    pub label: String,
    pub value: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickAction {
    pub label: String,
    pub icon: String,
    pub target: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub description: String,
    pub icon: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Welcome {
    pub title: String,
    pub subtitle: String,
    pub icon: String,
    pub description: String,
}

/// Everything a dashboard view renders for one account type. Derived, never
/// persisted; recomputed from the account type on every access.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(rename = "accountType")]
    pub account_type: AccountType,
    pub welcome: Welcome,
    pub navigation: Vec<NavEntry>,
    pub stats: Vec<Stat>,
    #[serde(rename = "quickActions")]
    pub quick_actions: Vec<QuickAction>,
    #[serde(rename = "recentActivity")]
    pub recent_activity: Vec<Activity>,
}

impl DashboardConfig {
    /// Target of the active navigation entry (the canonical dashboard path).
    pub fn active_target(&self) -> Option<&str> {
        self.navigation
            .iter()
            .find(|entry| entry.is_active)
            .map(|entry| entry.target.as_str())
    }
}

/// Static selector metadata for one account type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountTypeDescriptor {
    pub label: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
    pub dashboard_path: &'static str,
}
