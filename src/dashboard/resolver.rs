use once_cell::sync::Lazy;

use crate::identity::{AccountType, User};

use super::model::{
    AccountTypeDescriptor, Activity, DashboardConfig, NavEntry, QuickAction, Stat, Welcome,
};

const BUSINESS_DESCRIPTOR: AccountTypeDescriptor = AccountTypeDescriptor {
    label: "Business",
    icon: "🏪",
    description: "Restaurants, markets, and food businesses",
    dashboard_path: "/dashboard/business",
};

const INDIVIDUAL_DESCRIPTOR: AccountTypeDescriptor = AccountTypeDescriptor {
    label: "Individual",
    icon: "👤",
    description: "Individual donors and volunteers",
    dashboard_path: "/dashboard/individual",
};

const CHARITY_DESCRIPTOR: AccountTypeDescriptor = AccountTypeDescriptor {
    label: "Charity",
    icon: "❤️",
    description: "Non-profit organizations and charities",
    dashboard_path: "/dashboard/charity",
};

pub fn descriptor(account_type: AccountType) -> &'static AccountTypeDescriptor {
    match account_type {
        AccountType::Business => &BUSINESS_DESCRIPTOR,
        AccountType::Individual => &INDIVIDUAL_DESCRIPTOR,
        AccountType::Charity => &CHARITY_DESCRIPTOR,
    }
}

/// Resolves the dashboard configuration for an account type. Pure and
/// idempotent: identical calls return structurally identical configs.
pub fn resolve(account_type: AccountType) -> DashboardConfig {
    match account_type {
        AccountType::Business => BUSINESS.clone(),
        AccountType::Individual => INDIVIDUAL.clone(),
        AccountType::Charity => CHARITY.clone(),
    }
}

/// Resolves from a raw role tag; unknown tags fall back to Individual so the
/// UI always has something to render.
pub fn resolve_tag(tag: &str) -> DashboardConfig {
    resolve(AccountType::parse(tag))
}

/// Resolves for a signed-in user: same tables, with the welcome subtitle
/// replaced by the user's display name.
pub fn resolve_for_user(user: &User) -> DashboardConfig {
    let mut config = resolve(user.account_type);
    let name = user.display_name();
    if !name.is_empty() {
        config.welcome.subtitle = name.to_string();
    }
    config
}

static BUSINESS: Lazy<DashboardConfig> = Lazy::new(|| DashboardConfig {
    account_type: AccountType::Business,
    welcome: welcome(
        "Tasty Bites Restaurant",
        "🏪",
        "Manage your business donations and help your community",
    ),
    navigation: navigation(
        AccountType::Business,
        &[("Giveaways", "🎁", "/giveaways"), ("Donations", "❤️", "/donations")],
    ),
    stats: vec![
        stat("Total Donations", "26", "🎁"),
        stat("This Month", "8", "📅"),
        stat("People Helped", "156", "👥"),
    ],
    quick_actions: vec![
        action("Make Donation", "🎁", "/donations/create"),
        action("View Requests", "📋", "/requests"),
        action("Update Profile", "✏️", "/profile"),
    ],
    recent_activity: vec![
        activity("Donated food to Children's Home", "🎁", "2 days ago"),
        activity("Updated business profile", "✏️", "3 days ago"),
        activity("Received donation request", "📋", "1 week ago"),
    ],
});

static INDIVIDUAL: Lazy<DashboardConfig> = Lazy::new(|| DashboardConfig {
    account_type: AccountType::Individual,
    welcome: welcome("John Doe", "👤", "Browse donations and help your community"),
    navigation: navigation(
        AccountType::Individual,
        &[("Giveaways", "🎁", "/giveaways"), ("Donations", "❤️", "/donations")],
    ),
    stats: vec![
        stat("Donations Made", "15", "❤️"),
        stat("This Month", "3", "📅"),
        stat("Organizations Helped", "7", "🏢"),
    ],
    quick_actions: vec![
        action("Browse Donations", "🔍", "/donations"),
        action("Make Donation", "❤️", "/donations/create"),
        action("View Organizations", "🏢", "/organizations"),
    ],
    recent_activity: vec![
        activity("Donated to local charity", "❤️", "2 days ago"),
        activity("Received notification", "🔔", "3 days ago"),
        activity("Updated profile information", "✏️", "1 week ago"),
    ],
});

static CHARITY: Lazy<DashboardConfig> = Lazy::new(|| DashboardConfig {
    account_type: AccountType::Charity,
    welcome: welcome(
        "Mekedonia Organization",
        "❤️",
        "Manage your organization and receive donations",
    ),
    navigation: navigation(
        AccountType::Charity,
        &[("Requests", "📝", "/requests"), ("Donations", "📦", "/donations")],
    ),
    stats: vec![
        stat("Donations Received", "42", "📦"),
        stat("This Month", "12", "📅"),
        stat("People Served", "89", "👥"),
    ],
    quick_actions: vec![
        action("Create Request", "📝", "/requests/create"),
        action("View Donations", "📦", "/donations"),
        action("Update Profile", "✏️", "/profile"),
    ],
    recent_activity: vec![
        activity("Received food donation", "📦", "1 day ago"),
        activity("Created donation request", "📝", "3 days ago"),
        activity("Updated organization profile", "✏️", "1 week ago"),
    ],
});

/// Shared navigation head (Dashboard, the role's own entry marked active,
/// Profile, Map) followed by the role-specific tail.
fn navigation(account_type: AccountType, tail: &[(&str, &str, &str)]) -> Vec<NavEntry> {
    let desc = descriptor(account_type);
    let mut entries = vec![
        nav("Dashboard", "📊", "/dashboard", false),
        nav(desc.label, desc.icon, desc.dashboard_path, true),
        nav("Profile", "👤", "/profile", false),
        nav("Map", "🗺️", "/map", false),
    ];
    for &(label, icon, target) in tail {
        entries.push(nav(label, icon, target, false));
    }
    entries
}

fn nav(label: &str, icon: &str, target: &str, is_active: bool) -> NavEntry {
    NavEntry { label: label.to_string(), icon: icon.to_string(), target: target.to_string(), is_active }
}

fn stat(label: &str, value: &str, icon: &str) -> Stat {
    Stat { label: label.to_string(), value: value.to_string(), icon: icon.to_string() }
}

fn action(label: &str, icon: &str, target: &str) -> QuickAction {
    QuickAction { label: label.to_string(), icon: icon.to_string(), target: target.to_string() }
}

fn activity(description: &str, icon: &str, timestamp: &str) -> Activity {
    Activity {
        description: description.to_string(),
        icon: icon.to_string(),
        timestamp: timestamp.to_string(),
    }
}

fn welcome(subtitle: &str, icon: &str, description: &str) -> Welcome {
    Welcome {
        title: "Welcome back!".to_string(),
        subtitle: subtitle.to_string(),
        icon: icon.to_string(),
        description: description.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_account_type_has_a_complete_config() {
        for t in AccountType::ALL {
            let config = resolve(t);
            assert!(!config.navigation.is_empty());
            assert!(!config.stats.is_empty());
            assert!(!config.quick_actions.is_empty());
            assert_eq!(config.active_target(), Some(descriptor(t).dashboard_path));
        }
    }

    #[test]
    fn unknown_tag_resolves_to_individual() {
        assert_eq!(resolve_tag("unknown"), resolve(AccountType::Individual));
        assert_eq!(resolve_tag(""), resolve(AccountType::Individual));
    }

    #[test]
    fn resolve_is_idempotent() {
        assert_eq!(resolve(AccountType::Charity), resolve(AccountType::Charity));
    }
}
