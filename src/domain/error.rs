use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Invalid ID format: {message}")]
    InvalidId { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },
}

impl DomainError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn invalid_id(message: impl Into<String>) -> Self {
        Self::InvalidId {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error() {
        let error = DomainError::not_found("Team '7' not found");
        assert_eq!(error.to_string(), "Not found: Team '7' not found");
    }

    #[test]
    fn test_validation_error() {
        let error = DomainError::validation("Team name cannot be empty");
        assert_eq!(
            error.to_string(),
            "Validation error: Team name cannot be empty"
        );
    }

    #[test]
    fn test_conflict_error() {
        let error = DomainError::conflict("Team name 'Alpha' is already taken");
        assert_eq!(
            error.to_string(),
            "Conflict: Team name 'Alpha' is already taken"
        );
    }

    #[test]
    fn test_storage_error() {
        let error = DomainError::storage("Failed to acquire read lock");
        assert_eq!(error.to_string(), "Storage error: Failed to acquire read lock");
    }
}
