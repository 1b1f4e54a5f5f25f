use crate::Permission;

/// Sidebar regions and the single permission gating each one.
///
/// Regions missing from this table are not gated here: they are either
/// always visible or checked separately by the caller.
const SIDEBAR_ITEMS: &[(&str, Permission)] = &[
    ("dashboard", Permission::DashboardView),
    ("analytics", Permission::DashboardAnalytics),
    ("teams", Permission::TeamsView),
    ("players", Permission::PlayersView),
    ("coaches", Permission::CoachesView),
    ("tournaments", Permission::TournamentsView),
    ("matches", Permission::MatchesView),
    ("playgrounds", Permission::PlaygroundsView),
    ("reservations", Permission::ReservationsView),
    ("users", Permission::UsersView),
    ("roles", Permission::RolesView),
    ("files", Permission::FilesView),
    ("news", Permission::NewsView),
    ("reports", Permission::ReportsView),
    ("notifications", Permission::NotificationsView),
    ("settings", Permission::SettingsView),
];

/// Returns the permission gating a sidebar item, if the item is mapped.
#[must_use]
pub fn sidebar_permission(sidebar_item_id: &str) -> Option<Permission> {
    SIDEBAR_ITEMS
        .iter()
        .find(|(item_id, _)| *item_id == sidebar_item_id)
        .map(|(_, permission)| *permission)
}

/// Returns every mapped sidebar item id in display order.
#[must_use]
pub fn sidebar_items() -> impl Iterator<Item = &'static str> {
    SIDEBAR_ITEMS.iter().map(|(item_id, _)| *item_id)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::{SIDEBAR_ITEMS, sidebar_items, sidebar_permission};
    use crate::Permission;

    #[test]
    fn mapped_item_resolves_to_its_permission() {
        assert_eq!(sidebar_permission("users"), Some(Permission::UsersView));
        assert_eq!(
            sidebar_permission("analytics"),
            Some(Permission::DashboardAnalytics)
        );
    }

    #[test]
    fn lookup_is_exact() {
        assert_eq!(sidebar_permission("Users"), None);
        assert_eq!(sidebar_permission(" users"), None);
        assert_eq!(sidebar_permission(""), None);
    }

    #[test]
    fn item_ids_are_unique() {
        let ids: BTreeSet<&str> = sidebar_items().collect();
        assert_eq!(ids.len(), SIDEBAR_ITEMS.len());
    }
}
