//! Admin API configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Admin API configuration
///
/// Admin endpoints are protected by a single shared bearer token compared
/// for exact equality against the `Authorization` header.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdminConfig {
    /// Shared admin bearer token
    pub token: String,
}

impl AdminConfig {
    /// Validate admin configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.token.is_empty() {
            return Err(ValidationError::MissingRequired("ADMIN_TOKEN"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_missing_token() {
        let config = AdminConfig::default();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_valid_token() {
        let config = AdminConfig {
            token: "super-secret-admin-token".to_string(),
        };
        assert!(config.validate().is_ok());
    }
}
