//! Role-scoped dashboard configuration.
//! Pure table lookup from account type to the navigation, stats, quick
//! actions and activity feed a dashboard view should display.

mod model;
mod resolver;

pub use model::{
    AccountTypeDescriptor, Activity, DashboardConfig, NavEntry, QuickAction, Stat, Welcome,
};
pub use resolver::{descriptor, resolve, resolve_for_user, resolve_tag};
