//! Team entity and related types

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use super::token::TeamToken;
use super::validation::{
    canonical_team_ip, validate_logo_path, validate_team_id, validate_team_name,
    TeamValidationError,
};
use crate::domain::storage::StorageEntity;
use crate::domain::DomainError;

/// Team identifier - positive integer assigned by storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct TeamId(i64);

impl TeamId {
    /// Create a new TeamId after validation
    pub fn new(id: i64) -> Result<Self, TeamValidationError> {
        validate_team_id(id)?;
        Ok(Self(id))
    }

    /// Get the inner integer value
    pub fn get(&self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for TeamId {
    type Error = TeamValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TeamId> for i64 {
    fn from(id: TeamId) -> Self {
        id.0
    }
}

impl std::str::FromStr for TeamId {
    type Err = TeamValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s
            .trim()
            .parse::<i64>()
            .map_err(|_| TeamValidationError::InvalidId)?;
        Self::new(id)
    }
}

impl std::fmt::Display for TeamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Default values for the optional team flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeamDefaults {
    pub highlighted: bool,
    pub active: bool,
}

/// Applied whenever `highlighted` or `active` is not supplied
pub const TEAM_DEFAULTS: TeamDefaults = TeamDefaults {
    highlighted: false,
    active: true,
};

/// A competing team: network identity, secret token, display flags
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    /// Storage-assigned identifier, absent until first insert
    id: Option<TeamId>,
    /// Display name, stored trimmed
    name: String,
    /// Network address of the team's vulnerable host, in canonical form
    ip: String,
    /// Secret credential, issued once at creation
    token: TeamToken,
    /// Emphasized on the scoreboard
    highlighted: bool,
    /// Takes part in the competition
    active: bool,
    /// Path to the team logo; empty when there is none
    logo_path: String,
}

impl Team {
    /// Create a new, unsaved team with a freshly issued token
    pub fn new(
        name: impl Into<String>,
        ip: impl Into<String>,
        logo_path: impl Into<String>,
    ) -> Result<Self, TeamValidationError> {
        Self::with_token(name, ip, logo_path, TeamToken::generate())
    }

    fn with_token(
        name: impl Into<String>,
        ip: impl Into<String>,
        logo_path: impl Into<String>,
        token: TeamToken,
    ) -> Result<Self, TeamValidationError> {
        let name = name.into().trim().to_string();
        let ip: String = ip.into();
        let logo_path = logo_path.into();

        validate_team_name(&name)?;
        let ip = canonical_team_ip(&ip)?;
        validate_logo_path(&logo_path)?;

        Ok(Self {
            id: None,
            name,
            ip,
            token,
            highlighted: TEAM_DEFAULTS.highlighted,
            active: TEAM_DEFAULTS.active,
            logo_path,
        })
    }

    /// Set highlighted flag (builder pattern)
    pub fn with_highlighted(mut self, highlighted: bool) -> Self {
        self.highlighted = highlighted;
        self
    }

    /// Set active flag (builder pattern)
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    // Getters

    pub fn team_id(&self) -> Option<TeamId> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ip(&self) -> &str {
        &self.ip
    }

    pub fn token(&self) -> &TeamToken {
        &self.token
    }

    pub fn highlighted(&self) -> bool {
        self.highlighted
    }

    pub fn active(&self) -> bool {
        self.active
    }

    pub fn logo_path(&self) -> &str {
        &self.logo_path
    }

    // Mutators

    /// Update the name; surrounding whitespace is dropped
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), TeamValidationError> {
        let name = name.into().trim().to_string();
        validate_team_name(&name)?;
        self.name = name;
        Ok(())
    }

    /// Update the network address, stored in canonical form
    pub fn set_ip(&mut self, ip: impl Into<String>) -> Result<(), TeamValidationError> {
        let ip: String = ip.into();
        self.ip = canonical_team_ip(&ip)?;
        Ok(())
    }

    /// Update the logo path
    pub fn set_logo_path(&mut self, path: impl Into<String>) -> Result<(), TeamValidationError> {
        let path = path.into();
        validate_logo_path(&path)?;
        self.logo_path = path;
        Ok(())
    }

    pub fn set_highlighted(&mut self, highlighted: bool) {
        self.highlighted = highlighted;
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Field mapping for non-privileged viewers: everything except the token
    ///
    /// The map is an owned copy; changing it never touches the team.
    pub fn to_participant_fields(&self) -> Map<String, Value> {
        let mut fields = self.fields();
        fields.remove("token");
        fields
    }
}

impl std::fmt::Display for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.id {
            Some(id) => write!(f, "Team({}, {})", id, self.name),
            None => write!(f, "Team(None, {})", self.name),
        }
    }
}

impl StorageEntity for Team {
    const TABLE_NAME: &'static str = "Teams";

    fn id(&self) -> Option<i64> {
        self.id.map(|id| id.get())
    }

    fn assign_id(&mut self, id: i64) -> Result<(), DomainError> {
        if let Some(existing) = self.id {
            return Err(DomainError::conflict(format!(
                "Team already has ID {}",
                existing
            )));
        }

        let id = TeamId::new(id).map_err(|e| DomainError::invalid_id(e.to_string()))?;
        self.id = Some(id);
        Ok(())
    }

    fn fields(&self) -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert("id".to_string(), json!(self.id.map(|id| id.get())));
        fields.insert("name".to_string(), json!(self.name));
        fields.insert("ip".to_string(), json!(self.ip));
        fields.insert("token".to_string(), json!(self.token.as_str()));
        fields.insert("highlighted".to_string(), json!(self.highlighted));
        fields.insert("active".to_string(), json!(self.active));
        fields.insert("logo_path".to_string(), json!(self.logo_path));
        fields
    }

    fn defaults() -> Map<String, Value> {
        let mut defaults = Map::new();
        defaults.insert("highlighted".to_string(), json!(TEAM_DEFAULTS.highlighted));
        defaults.insert("active".to_string(), json!(TEAM_DEFAULTS.active));
        defaults
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn alpha() -> Team {
        Team::new("Alpha", "10.0.0.1", "").unwrap()
    }

    #[test]
    fn test_team_id_valid() {
        let id = TeamId::new(42).unwrap();
        assert_eq!(id.get(), 42);
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn test_team_id_invalid() {
        assert!(TeamId::new(0).is_err());
        assert!(TeamId::new(-1).is_err());
    }

    #[test]
    fn test_team_id_from_str() {
        assert_eq!("17".parse::<TeamId>().unwrap().get(), 17);
        assert!("abc".parse::<TeamId>().is_err());
        assert!("0".parse::<TeamId>().is_err());
    }

    #[test]
    fn test_team_creation_defaults() {
        let team = alpha();

        assert!(team.team_id().is_none());
        assert_eq!(team.name(), "Alpha");
        assert_eq!(team.ip(), "10.0.0.1");
        assert_eq!(team.logo_path(), "");
        assert!(!team.highlighted());
        assert!(team.active());
        assert_eq!(team.token().as_str().len(), 16);
    }

    #[test]
    fn test_team_builder_flags() {
        let team = alpha().with_highlighted(true).with_active(false);

        assert!(team.highlighted());
        assert!(!team.active());
    }

    #[test]
    fn test_team_invalid_fields() {
        assert_eq!(
            Team::new("", "10.0.0.1", "").unwrap_err(),
            TeamValidationError::EmptyName
        );
        assert!(matches!(
            Team::new("Alpha", "not-an-ip", ""),
            Err(TeamValidationError::InvalidIp(_))
        ));
    }

    #[test]
    fn test_display_unsaved() {
        assert_eq!(alpha().to_string(), "Team(None, Alpha)");
    }

    #[test]
    fn test_display_saved() {
        let mut team = alpha();
        team.assign_id(3).unwrap();
        assert_eq!(team.to_string(), "Team(3, Alpha)");
    }

    #[test]
    fn test_display_and_debug_hide_token() {
        let team = alpha();
        let token = team.token().as_str().to_string();

        assert!(!team.to_string().contains(&token));
        assert!(!format!("{:?}", team).contains(&token));
    }

    #[test]
    fn test_fields_contain_everything() {
        let team = alpha();
        let fields = team.fields();

        let keys: BTreeSet<&str> = fields.keys().map(String::as_str).collect();
        let expected: BTreeSet<&str> =
            ["id", "name", "ip", "token", "highlighted", "active", "logo_path"]
                .into_iter()
                .collect();
        assert_eq!(keys, expected);
        assert_eq!(fields["token"], json!(team.token().as_str()));
    }

    #[test]
    fn test_participant_fields_scenario() {
        let team = alpha();

        let expected = json!({
            "id": null,
            "name": "Alpha",
            "ip": "10.0.0.1",
            "highlighted": false,
            "active": true,
            "logo_path": ""
        });

        assert_eq!(Value::Object(team.to_participant_fields()), expected);
    }

    #[test]
    fn test_participant_fields_never_contain_token() {
        let mut team = alpha().with_highlighted(true).with_active(false);
        team.assign_id(9).unwrap();

        let fields = team.to_participant_fields();
        assert!(!fields.contains_key("token"));
        assert_eq!(fields["id"], json!(9));
        assert_eq!(fields["highlighted"], json!(true));
        assert_eq!(fields["active"], json!(false));

        let rendered = serde_json::to_string(&fields).unwrap();
        assert!(!rendered.contains(team.token().as_str()));
    }

    #[test]
    fn test_participant_fields_are_a_copy() {
        let team = alpha();

        let mut fields = team.to_participant_fields();
        fields.insert("name".to_string(), json!("Mallory"));
        fields.insert("token".to_string(), json!("leaked"));

        assert_eq!(team.name(), "Alpha");
        assert!(!team.to_participant_fields().contains_key("token"));
    }

    #[test]
    fn test_assign_id_is_write_once() {
        let mut team = alpha();

        team.assign_id(1).unwrap();
        assert!(matches!(team.assign_id(2), Err(DomainError::Conflict { .. })));
        assert_eq!(team.id(), Some(1));
    }

    #[test]
    fn test_assign_id_rejects_non_positive() {
        let mut team = alpha();

        assert!(matches!(team.assign_id(0), Err(DomainError::InvalidId { .. })));
        assert!(team.id().is_none());
    }

    #[test]
    fn test_defaults_table() {
        let defaults = Team::defaults();

        assert_eq!(defaults.len(), 2);
        assert_eq!(defaults["highlighted"], json!(false));
        assert_eq!(defaults["active"], json!(true));
        assert_eq!(Team::TABLE_NAME, "Teams");
    }

    #[test]
    fn test_deserialize_full_document() {
        let stored = json!({
            "id": 4,
            "name": "Bravo",
            "ip": "10.0.0.2",
            "token": "0123456789abcdef",
            "highlighted": true,
            "active": false,
            "logo_path": ""
        });

        let team: Team = serde_json::from_value(stored).unwrap();
        assert_eq!(team.id(), Some(4));
        assert!(team.highlighted());
        assert!(!team.active());
    }

    #[test]
    fn test_name_is_trimmed() {
        let mut team = Team::new("  Alpha ", "10.0.0.1", "").unwrap();
        assert_eq!(team.name(), "Alpha");

        team.set_name("Bravo\t").unwrap();
        assert_eq!(team.name(), "Bravo");
    }

    #[test]
    fn test_ip_is_canonical() {
        let mut team = Team::new("Alpha", "FD00:0:0::1", "").unwrap();
        assert_eq!(team.ip(), "fd00::1");

        team.set_ip("::ffff:10.0.0.5").unwrap();
        assert_eq!(team.ip(), "10.0.0.5");
        assert_eq!(team.fields()["ip"], json!("10.0.0.5"));
    }

    #[test]
    fn test_mutators_validate() {
        let mut team = alpha();
        let token = team.token().clone();

        team.set_name("Bravo").unwrap();
        team.set_ip("fd00::2").unwrap();
        team.set_logo_path("/logos/bravo.png").unwrap();
        team.set_highlighted(true);
        team.set_active(false);

        assert!(team.set_name("").is_err());
        assert!(team.set_ip("nope").is_err());

        assert_eq!(team.name(), "Bravo");
        assert_eq!(team.ip(), "fd00::2");
        assert_eq!(team.logo_path(), "/logos/bravo.png");
        assert_eq!(team.token(), &token);
    }
}
