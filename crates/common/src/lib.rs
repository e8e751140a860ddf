//! Common types and utilities for the PowerShell cmdlet generator
//!
//! This crate contains the shared error type and the service model IR
//! consumed by the configuration, generator, and CLI components.

mod model;

pub use model::{
    EnumDefinition, OperationDefinition, PaginationDefinition, ParamCustomization, PropertyInfo,
    ServiceModel, TypeDefinition,
};

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during cmdlet and format generation
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("Failed to load configuration manifest {}: {source}", .path.display())]
    ConfigLoad {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Invalid custom format document {}: {message}", .path.display())]
    CustomFormat { path: PathBuf, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type for generator operations
pub type Result<T> = std::result::Result<T, GeneratorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_load_error_names_path() {
        let err = GeneratorError::ConfigLoad {
            path: PathBuf::from("/configs/Configs.xml"),
            source: Box::new(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "no such file",
            )),
        };

        let message = err.to_string();
        assert!(message.contains("/configs/Configs.xml"));
        assert!(message.contains("no such file"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
