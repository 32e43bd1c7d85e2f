//! Team validation

use std::net::IpAddr;

use thiserror::Error;

/// Errors that can occur during team validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TeamValidationError {
    #[error("Team ID must be a positive integer")]
    InvalidId,

    #[error("Team name cannot be empty")]
    EmptyName,

    #[error("Team name cannot exceed {0} characters")]
    NameTooLong(usize),

    #[error("Team IP address cannot be empty")]
    EmptyIp,

    #[error("'{0}' is not a valid IP address")]
    InvalidIp(String),

    #[error("Team logo path cannot exceed {0} characters")]
    LogoPathTooLong(usize),

    #[error("Team token must be {0} lowercase hexadecimal characters")]
    InvalidToken(usize),
}

const MAX_TEAM_NAME_LENGTH: usize = 100;
const MAX_LOGO_PATH_LENGTH: usize = 255;

/// Validate a team ID
pub fn validate_team_id(id: i64) -> Result<(), TeamValidationError> {
    if id <= 0 {
        return Err(TeamValidationError::InvalidId);
    }

    Ok(())
}

/// Validate a team name
pub fn validate_team_name(name: &str) -> Result<(), TeamValidationError> {
    if name.trim().is_empty() {
        return Err(TeamValidationError::EmptyName);
    }

    if name.chars().count() > MAX_TEAM_NAME_LENGTH {
        return Err(TeamValidationError::NameTooLong(MAX_TEAM_NAME_LENGTH));
    }

    Ok(())
}

/// Validate a team's network address (IPv4 or IPv6)
pub fn validate_team_ip(ip: &str) -> Result<(), TeamValidationError> {
    if ip.is_empty() {
        return Err(TeamValidationError::EmptyIp);
    }

    ip.parse::<IpAddr>()
        .map(|_| ())
        .map_err(|_| TeamValidationError::InvalidIp(ip.to_string()))
}

/// Validate a team address and return its canonical text
///
/// Every spelling of one address maps to the same string: IPv6 is compressed
/// and lowercased, and IPv4-mapped IPv6 collapses to plain IPv4.
pub fn canonical_team_ip(ip: &str) -> Result<String, TeamValidationError> {
    let ip = ip.trim();
    validate_team_ip(ip)?;

    ip.parse::<IpAddr>()
        .map(|addr| addr.to_canonical().to_string())
        .map_err(|_| TeamValidationError::InvalidIp(ip.to_string()))
}

/// Validate a logo path; the empty string means "no logo"
pub fn validate_logo_path(path: &str) -> Result<(), TeamValidationError> {
    if path.chars().count() > MAX_LOGO_PATH_LENGTH {
        return Err(TeamValidationError::LogoPathTooLong(MAX_LOGO_PATH_LENGTH));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_team_id() {
        assert!(validate_team_id(1).is_ok());
        assert!(validate_team_id(i64::MAX).is_ok());
    }

    #[test]
    fn test_invalid_team_id() {
        assert_eq!(validate_team_id(0), Err(TeamValidationError::InvalidId));
        assert_eq!(validate_team_id(-4), Err(TeamValidationError::InvalidId));
    }

    #[test]
    fn test_valid_team_name() {
        assert!(validate_team_name("Alpha").is_ok());
        assert!(validate_team_name("Team with spaces & symbols!").is_ok());
    }

    #[test]
    fn test_empty_team_name() {
        assert_eq!(validate_team_name(""), Err(TeamValidationError::EmptyName));
        assert_eq!(validate_team_name("   "), Err(TeamValidationError::EmptyName));
    }

    #[test]
    fn test_team_name_too_long() {
        let long_name = "a".repeat(101);
        assert_eq!(
            validate_team_name(&long_name),
            Err(TeamValidationError::NameTooLong(100))
        );
    }

    #[test]
    fn test_valid_team_ip() {
        assert!(validate_team_ip("10.0.0.1").is_ok());
        assert!(validate_team_ip("fd00::1").is_ok());
    }

    #[test]
    fn test_invalid_team_ip() {
        assert_eq!(validate_team_ip(""), Err(TeamValidationError::EmptyIp));
        assert_eq!(
            validate_team_ip("10.0.0.256"),
            Err(TeamValidationError::InvalidIp("10.0.0.256".to_string()))
        );
        assert_eq!(
            validate_team_ip("team.example.org"),
            Err(TeamValidationError::InvalidIp("team.example.org".to_string()))
        );
    }

    #[test]
    fn test_canonical_team_ip() {
        assert_eq!(canonical_team_ip("10.0.0.5").unwrap(), "10.0.0.5");
        assert_eq!(canonical_team_ip(" 10.0.0.5 ").unwrap(), "10.0.0.5");
        assert_eq!(canonical_team_ip("FD00:0:0::1").unwrap(), "fd00::1");
        assert_eq!(canonical_team_ip("fd00:0000::0001").unwrap(), "fd00::1");
        assert_eq!(canonical_team_ip("::ffff:10.0.0.5").unwrap(), "10.0.0.5");
        assert_eq!(canonical_team_ip("::1").unwrap(), "::1");
        assert_eq!(canonical_team_ip("  "), Err(TeamValidationError::EmptyIp));
        assert!(matches!(
            canonical_team_ip("10.0.0"),
            Err(TeamValidationError::InvalidIp(_))
        ));
    }

    #[test]
    fn test_logo_path() {
        assert!(validate_logo_path("").is_ok());
        assert!(validate_logo_path("/static/logos/alpha.png").is_ok());
        assert_eq!(
            validate_logo_path(&"x".repeat(256)),
            Err(TeamValidationError::LogoPathTooLong(255))
        );
    }
}
