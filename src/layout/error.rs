//! Error types for layout configuration

use thiserror::Error;

/// Errors that can occur when loading or checking a [`LayoutConfig`](super::LayoutConfig)
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read layout config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse layout config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value the placement stages cannot work with
    #[error("invalid layout config value '{field}': {reason}")]
    Invalid { field: String, reason: String },
}

impl ConfigError {
    /// Create an invalid value error
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_message() {
        let err = ConfigError::invalid("max_step", "must be a positive number");
        assert_eq!(
            err.to_string(),
            "invalid layout config value 'max_step': must be a positive number"
        );
    }
}
