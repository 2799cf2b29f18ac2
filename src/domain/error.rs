use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    #[error("Invalid claims: {message}")]
    InvalidClaims { message: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl DomainError {
    pub fn invalid_claims(message: impl Into<String>) -> Self {
        Self::InvalidClaims {
            message: message.into(),
        }
    }

    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

impl From<config::ConfigError> for DomainError {
    fn from(err: config::ConfigError) -> Self {
        Self::configuration(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_claims_error() {
        let error = DomainError::invalid_claims("claims must be a JSON object");
        assert_eq!(
            error.to_string(),
            "Invalid claims: claims must be a JSON object"
        );
    }

    #[test]
    fn test_serialization_error() {
        let error = DomainError::serialization("expected value at line 1 column 1");
        assert_eq!(
            error.to_string(),
            "Serialization error: expected value at line 1 column 1"
        );
    }

    #[test]
    fn test_configuration_error_from_config() {
        let error: DomainError = config::ConfigError::Message("bad level".to_string()).into();
        assert_eq!(error.to_string(), "Configuration error: bad level");
    }
}
