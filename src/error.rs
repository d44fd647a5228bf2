use serde_json::{json, Value};
use thiserror::Error;

/// Application error types
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
    /// Catalog could not be parsed or is structurally invalid
    #[error("Catalog error: {0}")]
    CatalogError(String),
    /// Input rejected by a non-forgiving entry point (e.g. share link parsing)
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl AppError {
    /// Stable machine-readable name, the `type` field of [`AppError::to_json`]
    pub fn type_name(&self) -> &'static str {
        match self {
            AppError::ConfigError(_) => "config_error",
            AppError::CatalogError(_) => "catalog_error",
            AppError::InvalidInput(_) => "invalid_input",
        }
    }

    /// Error body printed by `--json` commands when they fail
    pub fn to_json(&self) -> Value {
        error_body(&self.to_string(), self.type_name())
    }
}

/// `{"error": {"message": .., "type": ..}}`
pub fn error_body(message: &str, type_name: &str) -> Value {
    json!({
        "error": {
            "message": message,
            "type": type_name,
        }
    })
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        Self::CatalogError(format!("TOML parse error: {}", err))
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::ConfigError(err.to_string())
    }
}

impl From<url::ParseError> for AppError {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidInput(format!("URL error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = AppError::CatalogError("duplicate provider 'RunPod'".to_string());
        assert_eq!(error.to_string(), "Catalog error: duplicate provider 'RunPod'");
    }

    #[test]
    fn test_error_type_name() {
        assert_eq!(AppError::ConfigError("test".to_string()).type_name(), "config_error");
        assert_eq!(AppError::InvalidInput("test".to_string()).type_name(), "invalid_input");
    }

    #[test]
    fn test_error_json_body() {
        let body = AppError::CatalogError("duplicate provider 'RunPod'".to_string()).to_json();
        assert_eq!(body["error"]["type"], "catalog_error");
        assert_eq!(body["error"]["message"], "Catalog error: duplicate provider 'RunPod'");
    }

    #[test]
    fn test_url_error_conversion() {
        let err: AppError = url::Url::parse("not a url").unwrap_err().into();
        assert_eq!(err.type_name(), "invalid_input");
    }
}
