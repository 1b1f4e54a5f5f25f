use std::str::FromStr;

use league_core::AppError;
use serde::{Deserialize, Serialize};

use crate::Role;

/// Permissions gating dashboard features, named `<resource>.<action>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Permission {
    /// Allows viewing the dashboard home.
    #[serde(rename = "dashboard.view")]
    DashboardView,
    /// Allows viewing dashboard analytics.
    #[serde(rename = "dashboard.analytics")]
    DashboardAnalytics,
    /// Allows exporting dashboard data.
    #[serde(rename = "dashboard.export")]
    DashboardExport,
    /// Allows customizing dashboard widgets.
    #[serde(rename = "dashboard.customize")]
    DashboardCustomize,
    /// Allows viewing teams.
    #[serde(rename = "teams.view")]
    TeamsView,
    /// Allows creating teams.
    #[serde(rename = "teams.create")]
    TeamsCreate,
    /// Allows editing teams.
    #[serde(rename = "teams.edit")]
    TeamsEdit,
    /// Allows deleting teams.
    #[serde(rename = "teams.delete")]
    TeamsDelete,
    /// Allows viewing players.
    #[serde(rename = "players.view")]
    PlayersView,
    /// Allows registering players.
    #[serde(rename = "players.create")]
    PlayersCreate,
    /// Allows editing players.
    #[serde(rename = "players.edit")]
    PlayersEdit,
    /// Allows deleting players.
    #[serde(rename = "players.delete")]
    PlayersDelete,
    /// Allows viewing coaches.
    #[serde(rename = "coaches.view")]
    CoachesView,
    /// Allows creating coach profiles.
    #[serde(rename = "coaches.create")]
    CoachesCreate,
    /// Allows editing coach profiles.
    #[serde(rename = "coaches.edit")]
    CoachesEdit,
    /// Allows deleting coach profiles.
    #[serde(rename = "coaches.delete")]
    CoachesDelete,
    /// Allows viewing tournaments.
    #[serde(rename = "tournaments.view")]
    TournamentsView,
    /// Allows creating tournaments.
    #[serde(rename = "tournaments.create")]
    TournamentsCreate,
    /// Allows editing tournaments.
    #[serde(rename = "tournaments.edit")]
    TournamentsEdit,
    /// Allows deleting tournaments.
    #[serde(rename = "tournaments.delete")]
    TournamentsDelete,
    /// Allows viewing matches.
    #[serde(rename = "matches.view")]
    MatchesView,
    /// Allows scheduling matches.
    #[serde(rename = "matches.create")]
    MatchesCreate,
    /// Allows editing match details and scores.
    #[serde(rename = "matches.edit")]
    MatchesEdit,
    /// Allows deleting matches.
    #[serde(rename = "matches.delete")]
    MatchesDelete,
    /// Allows viewing playgrounds.
    #[serde(rename = "playgrounds.view")]
    PlaygroundsView,
    /// Allows creating playgrounds.
    #[serde(rename = "playgrounds.create")]
    PlaygroundsCreate,
    /// Allows editing playgrounds.
    #[serde(rename = "playgrounds.edit")]
    PlaygroundsEdit,
    /// Allows deleting playgrounds.
    #[serde(rename = "playgrounds.delete")]
    PlaygroundsDelete,
    /// Allows viewing reservations.
    #[serde(rename = "reservations.view")]
    ReservationsView,
    /// Allows requesting reservations.
    #[serde(rename = "reservations.create")]
    ReservationsCreate,
    /// Allows approving reservations.
    #[serde(rename = "reservations.approve")]
    ReservationsApprove,
    /// Allows cancelling reservations.
    #[serde(rename = "reservations.cancel")]
    ReservationsCancel,
    /// Allows viewing user accounts.
    #[serde(rename = "users.view")]
    UsersView,
    /// Allows creating user accounts.
    #[serde(rename = "users.create")]
    UsersCreate,
    /// Allows deleting user accounts.
    #[serde(rename = "users.delete")]
    UsersDelete,
    /// Allows managing user accounts.
    #[serde(rename = "users.manage")]
    UsersManage,
    /// Allows viewing role assignments.
    #[serde(rename = "roles.view")]
    RolesView,
    /// Allows assigning roles to users.
    #[serde(rename = "roles.assign")]
    RolesAssign,
    /// Allows editing role definitions.
    #[serde(rename = "roles.edit")]
    RolesEdit,
    /// Allows deleting role definitions.
    #[serde(rename = "roles.delete")]
    RolesDelete,
    /// Allows browsing uploaded files.
    #[serde(rename = "files.view")]
    FilesView,
    /// Allows uploading files.
    #[serde(rename = "files.upload")]
    FilesUpload,
    /// Allows downloading files.
    #[serde(rename = "files.download")]
    FilesDownload,
    /// Allows deleting files.
    #[serde(rename = "files.delete")]
    FilesDelete,
    /// Allows viewing news articles.
    #[serde(rename = "news.view")]
    NewsView,
    /// Allows drafting news articles.
    #[serde(rename = "news.create")]
    NewsCreate,
    /// Allows editing news articles.
    #[serde(rename = "news.edit")]
    NewsEdit,
    /// Allows publishing news articles.
    #[serde(rename = "news.publish")]
    NewsPublish,
    /// Allows viewing reports.
    #[serde(rename = "reports.view")]
    ReportsView,
    /// Allows building reports.
    #[serde(rename = "reports.create")]
    ReportsCreate,
    /// Allows exporting reports.
    #[serde(rename = "reports.export")]
    ReportsExport,
    /// Allows scheduling recurring reports.
    #[serde(rename = "reports.schedule")]
    ReportsSchedule,
    /// Allows viewing notifications.
    #[serde(rename = "notifications.view")]
    NotificationsView,
    /// Allows sending notifications.
    #[serde(rename = "notifications.send")]
    NotificationsSend,
    /// Allows editing notification templates.
    #[serde(rename = "notifications.edit")]
    NotificationsEdit,
    /// Allows deleting notifications.
    #[serde(rename = "notifications.delete")]
    NotificationsDelete,
    /// Allows viewing league settings.
    #[serde(rename = "settings.view")]
    SettingsView,
    /// Allows editing league settings.
    #[serde(rename = "settings.edit")]
    SettingsEdit,
    /// Allows changing security settings.
    #[serde(rename = "settings.security")]
    SettingsSecurity,
    /// Allows managing third-party integrations.
    #[serde(rename = "settings.integrations")]
    SettingsIntegrations,
}

impl Permission {
    /// Returns the stable `resource.action` value for this permission.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DashboardView => "dashboard.view",
            Self::DashboardAnalytics => "dashboard.analytics",
            Self::DashboardExport => "dashboard.export",
            Self::DashboardCustomize => "dashboard.customize",
            Self::TeamsView => "teams.view",
            Self::TeamsCreate => "teams.create",
            Self::TeamsEdit => "teams.edit",
            Self::TeamsDelete => "teams.delete",
            Self::PlayersView => "players.view",
            Self::PlayersCreate => "players.create",
            Self::PlayersEdit => "players.edit",
            Self::PlayersDelete => "players.delete",
            Self::CoachesView => "coaches.view",
            Self::CoachesCreate => "coaches.create",
            Self::CoachesEdit => "coaches.edit",
            Self::CoachesDelete => "coaches.delete",
            Self::TournamentsView => "tournaments.view",
            Self::TournamentsCreate => "tournaments.create",
            Self::TournamentsEdit => "tournaments.edit",
            Self::TournamentsDelete => "tournaments.delete",
            Self::MatchesView => "matches.view",
            Self::MatchesCreate => "matches.create",
            Self::MatchesEdit => "matches.edit",
            Self::MatchesDelete => "matches.delete",
            Self::PlaygroundsView => "playgrounds.view",
            Self::PlaygroundsCreate => "playgrounds.create",
            Self::PlaygroundsEdit => "playgrounds.edit",
            Self::PlaygroundsDelete => "playgrounds.delete",
            Self::ReservationsView => "reservations.view",
            Self::ReservationsCreate => "reservations.create",
            Self::ReservationsApprove => "reservations.approve",
            Self::ReservationsCancel => "reservations.cancel",
            Self::UsersView => "users.view",
            Self::UsersCreate => "users.create",
            Self::UsersDelete => "users.delete",
            Self::UsersManage => "users.manage",
            Self::RolesView => "roles.view",
            Self::RolesAssign => "roles.assign",
            Self::RolesEdit => "roles.edit",
            Self::RolesDelete => "roles.delete",
            Self::FilesView => "files.view",
            Self::FilesUpload => "files.upload",
            Self::FilesDownload => "files.download",
            Self::FilesDelete => "files.delete",
            Self::NewsView => "news.view",
            Self::NewsCreate => "news.create",
            Self::NewsEdit => "news.edit",
            Self::NewsPublish => "news.publish",
            Self::ReportsView => "reports.view",
            Self::ReportsCreate => "reports.create",
            Self::ReportsExport => "reports.export",
            Self::ReportsSchedule => "reports.schedule",
            Self::NotificationsView => "notifications.view",
            Self::NotificationsSend => "notifications.send",
            Self::NotificationsEdit => "notifications.edit",
            Self::NotificationsDelete => "notifications.delete",
            Self::SettingsView => "settings.view",
            Self::SettingsEdit => "settings.edit",
            Self::SettingsSecurity => "settings.security",
            Self::SettingsIntegrations => "settings.integrations",
        }
    }

    /// Returns the resource segment of the permission value.
    #[must_use]
    pub fn resource(&self) -> &'static str {
        let value = self.as_str();
        value.split_once('.').map_or(value, |(resource, _)| resource)
    }

    /// Returns the roles granted this permission.
    ///
    /// The table is total over the enumeration and never returns an empty
    /// slice.
    #[must_use]
    pub fn granted_roles(&self) -> &'static [Role] {
        match self {
            Self::DashboardView => EVERY_ROLE,
            Self::DashboardAnalytics => &[Role::Admin, Role::Manager, Role::Analyst],
            Self::DashboardExport => &[Role::Admin, Role::Manager, Role::Analyst],
            Self::DashboardCustomize => &[Role::Admin, Role::Manager],
            Self::TeamsView => EVERY_ROLE,
            Self::TeamsCreate => &[Role::Admin, Role::Manager],
            Self::TeamsEdit => &[Role::Admin, Role::Manager, Role::Coach],
            Self::TeamsDelete => &[Role::Admin],
            Self::PlayersView => EVERY_ROLE,
            Self::PlayersCreate => &[Role::Admin, Role::Manager, Role::Coach],
            Self::PlayersEdit => &[Role::Admin, Role::Manager, Role::Coach],
            Self::PlayersDelete => &[Role::Admin, Role::Manager],
            Self::CoachesView => &[Role::Admin, Role::Manager, Role::Coach, Role::Analyst],
            Self::CoachesCreate => &[Role::Admin, Role::Manager],
            Self::CoachesEdit => &[Role::Admin, Role::Manager],
            Self::CoachesDelete => &[Role::Admin],
            Self::TournamentsView => EVERY_ROLE,
            Self::TournamentsCreate => &[Role::Admin, Role::Manager],
            Self::TournamentsEdit => &[Role::Admin, Role::Manager],
            Self::TournamentsDelete => &[Role::Admin],
            Self::MatchesView => EVERY_ROLE,
            Self::MatchesCreate => &[Role::Admin, Role::Manager],
            Self::MatchesEdit => &[Role::Admin, Role::Manager, Role::Coach],
            Self::MatchesDelete => &[Role::Admin, Role::Manager],
            Self::PlaygroundsView => &[Role::Admin, Role::Manager, Role::Coach, Role::Player],
            Self::PlaygroundsCreate => &[Role::Admin, Role::Manager],
            Self::PlaygroundsEdit => &[Role::Admin, Role::Manager],
            Self::PlaygroundsDelete => &[Role::Admin],
            Self::ReservationsView => &[Role::Admin, Role::Manager, Role::Coach, Role::Player],
            Self::ReservationsCreate => &[Role::Admin, Role::Manager, Role::Coach, Role::Player],
            Self::ReservationsApprove => &[Role::Admin, Role::Manager],
            Self::ReservationsCancel => &[Role::Admin, Role::Manager, Role::Coach],
            Self::UsersView => &[Role::Admin, Role::Manager],
            Self::UsersCreate => &[Role::Admin],
            Self::UsersDelete => &[Role::Admin],
            Self::UsersManage => &[Role::Admin],
            Self::RolesView => &[Role::Admin, Role::Manager],
            Self::RolesAssign => &[Role::Admin],
            Self::RolesEdit => &[Role::Admin],
            Self::RolesDelete => &[Role::Admin],
            Self::FilesView => &[Role::Admin, Role::Manager, Role::Coach, Role::ContentEditor],
            Self::FilesUpload => &[Role::Admin, Role::Manager, Role::Coach, Role::ContentEditor],
            Self::FilesDownload => &[
                Role::Admin,
                Role::Manager,
                Role::Coach,
                Role::ContentEditor,
                Role::Analyst,
            ],
            Self::FilesDelete => &[Role::Admin, Role::ContentEditor],
            Self::NewsView => EVERY_ROLE,
            Self::NewsCreate => &[Role::Admin, Role::ContentEditor],
            Self::NewsEdit => &[Role::Admin, Role::ContentEditor],
            Self::NewsPublish => &[Role::Admin, Role::Manager, Role::ContentEditor],
            Self::ReportsView => &[Role::Admin, Role::Manager, Role::Analyst],
            Self::ReportsCreate => &[Role::Admin, Role::Analyst],
            Self::ReportsExport => &[Role::Admin, Role::Manager, Role::Analyst],
            Self::ReportsSchedule => &[Role::Admin, Role::Analyst],
            Self::NotificationsView => EVERY_ROLE,
            Self::NotificationsSend => &[Role::Admin, Role::Manager, Role::ContentEditor],
            Self::NotificationsEdit => &[Role::Admin, Role::Manager],
            Self::NotificationsDelete => &[Role::Admin],
            Self::SettingsView => &[Role::Admin, Role::Manager],
            Self::SettingsEdit => &[Role::Admin],
            Self::SettingsSecurity => &[Role::Admin],
            Self::SettingsIntegrations => &[Role::Admin],
        }
    }

    /// Returns all known permissions in declaration order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[Permission] = &[
            Permission::DashboardView,
            Permission::DashboardAnalytics,
            Permission::DashboardExport,
            Permission::DashboardCustomize,
            Permission::TeamsView,
            Permission::TeamsCreate,
            Permission::TeamsEdit,
            Permission::TeamsDelete,
            Permission::PlayersView,
            Permission::PlayersCreate,
            Permission::PlayersEdit,
            Permission::PlayersDelete,
            Permission::CoachesView,
            Permission::CoachesCreate,
            Permission::CoachesEdit,
            Permission::CoachesDelete,
            Permission::TournamentsView,
            Permission::TournamentsCreate,
            Permission::TournamentsEdit,
            Permission::TournamentsDelete,
            Permission::MatchesView,
            Permission::MatchesCreate,
            Permission::MatchesEdit,
            Permission::MatchesDelete,
            Permission::PlaygroundsView,
            Permission::PlaygroundsCreate,
            Permission::PlaygroundsEdit,
            Permission::PlaygroundsDelete,
            Permission::ReservationsView,
            Permission::ReservationsCreate,
            Permission::ReservationsApprove,
            Permission::ReservationsCancel,
            Permission::UsersView,
            Permission::UsersCreate,
            Permission::UsersDelete,
            Permission::UsersManage,
            Permission::RolesView,
            Permission::RolesAssign,
            Permission::RolesEdit,
            Permission::RolesDelete,
            Permission::FilesView,
            Permission::FilesUpload,
            Permission::FilesDownload,
            Permission::FilesDelete,
            Permission::NewsView,
            Permission::NewsCreate,
            Permission::NewsEdit,
            Permission::NewsPublish,
            Permission::ReportsView,
            Permission::ReportsCreate,
            Permission::ReportsExport,
            Permission::ReportsSchedule,
            Permission::NotificationsView,
            Permission::NotificationsSend,
            Permission::NotificationsEdit,
            Permission::NotificationsDelete,
            Permission::SettingsView,
            Permission::SettingsEdit,
            Permission::SettingsSecurity,
            Permission::SettingsIntegrations,
        ];

        ALL
    }
}

const EVERY_ROLE: &[Role] = &[
    Role::Admin,
    Role::Manager,
    Role::Coach,
    Role::Player,
    Role::ContentEditor,
    Role::Analyst,
];

impl std::fmt::Display for Permission {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|permission| permission.as_str() == value)
            .ok_or_else(|| AppError::Validation(format!("unknown permission value '{value}'")))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::str::FromStr;

    use super::Permission;
    use crate::Role;

    #[test]
    fn permission_roundtrip_storage_value() {
        let permission = Permission::TeamsCreate;
        let restored = Permission::from_str(permission.as_str());
        assert!(restored.is_ok());
        assert_eq!(restored.unwrap_or(Permission::DashboardView), permission);
    }

    #[test]
    fn unknown_permission_is_rejected() {
        assert!(Permission::from_str("teams.archive").is_err());
        assert!(Permission::from_str("TEAMS.CREATE").is_err());
    }

    #[test]
    fn every_permission_has_a_granting_role() {
        for permission in Permission::all() {
            assert!(
                !permission.granted_roles().is_empty(),
                "{permission} has no granting role"
            );
        }
    }

    #[test]
    fn permission_values_are_unique_and_well_formed() {
        let values: BTreeSet<&str> = Permission::all()
            .iter()
            .map(|permission| permission.as_str())
            .collect();
        assert_eq!(values.len(), Permission::all().len());
        assert_eq!(values.len(), 60);

        for value in values {
            let parts: Vec<&str> = value.split('.').collect();
            assert_eq!(parts.len(), 2, "{value} is not resource.action");
        }
    }

    #[test]
    fn permissions_span_fifteen_resources() {
        let resources: BTreeSet<&str> = Permission::all()
            .iter()
            .map(|permission| permission.resource())
            .collect();
        assert_eq!(resources.len(), 15);
    }

    #[test]
    fn serde_uses_transport_value() {
        let encoded = serde_json::to_string(&Permission::UsersManage).unwrap_or_default();
        assert_eq!(encoded, "\"users.manage\"");

        let decoded: Result<Permission, _> = serde_json::from_str("\"players.edit\"");
        assert!(matches!(decoded, Ok(Permission::PlayersEdit)));
    }

    #[test]
    fn destructive_user_actions_are_admin_only() {
        assert_eq!(Permission::UsersDelete.granted_roles(), &[Role::Admin]);
        assert_eq!(Permission::UsersManage.granted_roles(), &[Role::Admin]);
    }

    #[test]
    fn admin_holds_every_permission() {
        for permission in Permission::all() {
            assert!(permission.granted_roles().contains(&Role::Admin));
        }
    }
}
