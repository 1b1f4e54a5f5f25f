use std::str::FromStr;

use league_core::{AppError, AppResult};
use league_domain::rules::{
    array_max_length, array_min_length, date, date_after, date_before, email, max, max_length,
    min, min_length, pattern, phone, required,
};
use league_domain::{DateReference, FormData, Validator};
use regex::Regex;

/// Dashboard forms with a fixed validation shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LeagueForm {
    /// Team create and edit form.
    Team,
    /// Player registration form.
    Player,
    /// Tournament setup form.
    Tournament,
    /// Playground (facility) form.
    Playground,
    /// Playground reservation request.
    Reservation,
    /// User account form.
    User,
}

impl LeagueForm {
    /// Returns the stable form identifier.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Team => "team",
            Self::Player => "player",
            Self::Tournament => "tournament",
            Self::Playground => "playground",
            Self::Reservation => "reservation",
            Self::User => "user",
        }
    }

    /// Returns all known forms.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[LeagueForm] = &[
            LeagueForm::Team,
            LeagueForm::Player,
            LeagueForm::Tournament,
            LeagueForm::Playground,
            LeagueForm::Reservation,
            LeagueForm::User,
        ];

        ALL
    }
}

impl std::fmt::Display for LeagueForm {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for LeagueForm {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|form| form.as_str() == value)
            .ok_or_else(|| AppError::NotFound(format!("unknown form '{value}'")))
    }
}

/// Validators for every league form, built once at startup.
#[derive(Debug, Clone)]
pub struct FormCatalog {
    team: Validator<FormData>,
    player: Validator<FormData>,
    tournament: Validator<FormData>,
    playground: Validator<FormData>,
    reservation: Validator<FormData>,
    user: Validator<FormData>,
}

impl FormCatalog {
    /// Builds the catalog.
    pub fn new() -> AppResult<Self> {
        Ok(Self {
            team: team_validator(),
            player: player_validator(),
            tournament: tournament_validator(),
            playground: playground_validator(),
            reservation: reservation_validator(),
            user: user_validator()?,
        })
    }

    /// Returns the validator for a form.
    #[must_use]
    pub fn validator(&self, form: LeagueForm) -> &Validator<FormData> {
        match form {
            LeagueForm::Team => &self.team,
            LeagueForm::Player => &self.player,
            LeagueForm::Tournament => &self.tournament,
            LeagueForm::Playground => &self.playground,
            LeagueForm::Reservation => &self.reservation,
            LeagueForm::User => &self.user,
        }
    }
}

fn team_validator() -> Validator<FormData> {
    Validator::new()
        .field(
            "name",
            [
                required().with_message("Team name is required"),
                min_length(2),
                max_length(50),
            ],
        )
        .field("city", [required().with_message("City is required")])
        .field("coach_email", [email()])
        .field("founded_year", [min(1850.0)])
}

fn player_validator() -> Validator<FormData> {
    Validator::new()
        .field(
            "first_name",
            [
                required().with_message("First name is required"),
                max_length(50),
            ],
        )
        .field(
            "last_name",
            [
                required().with_message("Last name is required"),
                max_length(50),
            ],
        )
        .field(
            "jersey_number",
            [
                min(1.0).with_message("Jersey number must be between 1 and 99"),
                max(99.0).with_message("Jersey number must be between 1 and 99"),
            ],
        )
        .field(
            "birth_date",
            [
                required().with_message("Birth date is required"),
                date_before(DateReference::Now).with_message("Birth date must be in the past"),
            ],
        )
        .field("email", [email()])
        .field("phone", [phone()])
}

fn tournament_validator() -> Validator<FormData> {
    Validator::new()
        .field(
            "name",
            [
                required().with_message("Tournament name is required"),
                min_length(3),
                max_length(100),
            ],
        )
        .field(
            "start_date",
            [
                required().with_message("Start date is required"),
                date().with_message("Start date must be a valid date"),
            ],
        )
        .field(
            "end_date",
            [
                required().with_message("End date is required"),
                date_after(DateReference::field("start_date"))
                    .with_message("End date must be after start date"),
            ],
        )
        .field(
            "team_ids",
            [
                array_min_length(2).with_message("A tournament needs at least 2 teams"),
                array_max_length(64),
            ],
        )
}

fn playground_validator() -> Validator<FormData> {
    Validator::new()
        .field("name", [required().with_message("Playground name is required")])
        .field("address", [required().with_message("Address is required")])
        .field("capacity", [min(1.0)])
        .field("hourly_rate", [min(0.0)])
}

fn reservation_validator() -> Validator<FormData> {
    Validator::new()
        .field(
            "playground_id",
            [required().with_message("Select a playground")],
        )
        .field(
            "start_time",
            [
                required().with_message("Start time is required"),
                date().with_message("Start time must be a valid date"),
                date_after(DateReference::Now).with_message("Start time must be in the future"),
            ],
        )
        .field(
            "end_time",
            [
                required().with_message("End time is required"),
                date_after(DateReference::field("start_time"))
                    .with_message("End time must be after start time"),
            ],
        )
        .field("notes", [max_length(500)])
}

fn user_validator() -> AppResult<Validator<FormData>> {
    let username_pattern = Regex::new(r"^[a-zA-Z0-9_]+$").map_err(|error| {
        AppError::Internal(format!("failed to compile username pattern: {error}"))
    })?;

    Ok(Validator::new()
        .field(
            "username",
            [
                required().with_message("Username is required"),
                min_length(3),
                max_length(32),
                pattern(username_pattern)
                    .with_message("Username can only contain letters, numbers, and underscores"),
            ],
        )
        .field(
            "email",
            [required().with_message("Email is required"), email()],
        )
        .field("phone", [phone()])
        .field(
            "roles",
            [array_min_length(1).with_message("Assign at least one role")],
        ))
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use league_core::AppError;
    use league_domain::FormData;
    use serde_json::{Value, json};

    use super::{FormCatalog, LeagueForm};

    fn catalog() -> FormCatalog {
        FormCatalog::new().unwrap_or_else(|error| panic!("{error}"))
    }

    fn form(value: Value) -> FormData {
        match value {
            Value::Object(fields) => fields,
            _ => panic!("test form must be an object"),
        }
    }

    #[test]
    fn form_identifiers_roundtrip() {
        for form in LeagueForm::all() {
            assert!(matches!(LeagueForm::from_str(form.as_str()), Ok(value) if value == *form));
        }
        assert!(matches!(
            LeagueForm::from_str("sponsor"),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn every_form_has_rules() {
        let catalog = catalog();
        for form in LeagueForm::all() {
            assert!(catalog.validator(*form).fields().next().is_some());
        }
    }

    #[test]
    fn valid_team_passes() {
        let result = catalog().validator(LeagueForm::Team).validate(&form(json!({
            "name": "Riverside Lions",
            "city": "Leeds",
            "coach_email": "coach@riverside.org",
            "founded_year": 1921
        })));
        assert!(result.is_valid());
    }

    #[test]
    fn tournament_end_must_follow_start() {
        let validator = catalog();
        let validator = validator.validator(LeagueForm::Tournament);
        let result = validator.validate(&form(json!({
            "name": "Spring Cup",
            "start_date": "2025-01-10",
            "end_date": "2025-01-05",
            "team_ids": ["t1", "t2"]
        })));
        assert_eq!(
            result.error("end_date"),
            Some("End date must be after start date")
        );
        assert_eq!(result.errors().len(), 1);
    }

    #[test]
    fn tournament_start_must_be_a_date() {
        let result = catalog().validator(LeagueForm::Tournament).validate(&form(json!({
            "name": "Spring Cup",
            "start_date": "next spring",
            "end_date": "2025-01-10",
            "team_ids": ["t1", "t2"]
        })));
        assert_eq!(
            result.error("start_date"),
            Some("Start date must be a valid date")
        );
        assert_eq!(result.errors().len(), 1);
    }

    #[test]
    fn tournament_needs_two_teams() {
        let result = catalog().validator(LeagueForm::Tournament).validate(&form(json!({
            "name": "Spring Cup",
            "start_date": "2025-01-01",
            "end_date": "2025-01-10",
            "team_ids": ["t1"]
        })));
        assert_eq!(
            result.error("team_ids"),
            Some("A tournament needs at least 2 teams")
        );
    }

    #[test]
    fn user_form_checks_username_and_phone() {
        let result = catalog().validator(LeagueForm::User).validate(&form(json!({
            "username": "jo hn",
            "email": "john@league.org",
            "phone": "12345678901",
            "roles": ["COACH"]
        })));
        assert_eq!(
            result.error("username"),
            Some("Username can only contain letters, numbers, and underscores")
        );
        assert_eq!(result.error("phone"), Some("Invalid phone number"));
        assert!(result.error("email").is_none());
    }

    #[test]
    fn reservation_in_the_past_is_rejected() {
        let result = catalog().validator(LeagueForm::Reservation).validate(&form(json!({
            "playground_id": "pg-1",
            "start_time": "2001-05-01T10:00",
            "end_time": "2001-05-01T09:00"
        })));
        assert_eq!(
            result.error("start_time"),
            Some("Start time must be in the future")
        );
        assert_eq!(
            result.error("end_time"),
            Some("End time must be after start time")
        );
    }

    #[test]
    fn reservation_start_must_be_a_date() {
        let result = catalog().validator(LeagueForm::Reservation).validate(&form(json!({
            "playground_id": "pg-1",
            "start_time": "tomorrow morning",
            "end_time": "2999-05-01T09:00"
        })));
        assert_eq!(
            result.error("start_time"),
            Some("Start time must be a valid date")
        );
        assert!(result.error("end_time").is_none());
    }

    #[test]
    fn player_jersey_number_is_bounded() {
        let validator = catalog();
        let validator = validator.validator(LeagueForm::Player);
        assert_eq!(
            validator
                .validate_field_in("jersey_number", Some(&json!(120)), &FormData::new())
                .as_deref(),
            Some("Jersey number must be between 1 and 99")
        );
        assert!(
            validator
                .validate_field_in("jersey_number", Some(&json!(10)), &FormData::new())
                .is_none()
        );
    }
}
