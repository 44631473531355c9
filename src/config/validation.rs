//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Route patterns and template names must pass structural validation
//! - Method names must not be blank
//! - Log level must be a known level
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: BridgeConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;
use tracing::level_filters::LevelFilter;

use crate::config::schema::BridgeConfig;
use crate::routing::validation::{validate_route, RouteError};

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("route `{pattern}` is invalid: {source}")]
    InvalidPattern { pattern: String, source: RouteError },

    #[error("route `{pattern}` names invalid template `{template}`: {source}")]
    InvalidTemplate {
        pattern: String,
        template: String,
        source: RouteError,
    },

    #[error("route `{pattern}` has a blank method")]
    BlankMethod { pattern: String },

    #[error("unknown log level `{0}`")]
    LogLevel(String),
}

/// Check a parsed configuration, collecting every error.
pub fn validate_config(config: &BridgeConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    for route in &config.routes {
        if let Err(source) = validate_route(&route.pattern, "") {
            errors.push(ValidationError::InvalidPattern {
                pattern: route.pattern.clone(),
                source,
            });
        }

        if let Some(template) = &route.template {
            if let Err(source) = validate_route(template, "") {
                errors.push(ValidationError::InvalidTemplate {
                    pattern: route.pattern.clone(),
                    template: template.clone(),
                    source,
                });
            }
        }

        if route.methods.iter().any(|m| m.trim().is_empty()) {
            errors.push(ValidationError::BlankMethod {
                pattern: route.pattern.clone(),
            });
        }
    }

    if config.observability.log_level.parse::<LevelFilter>().is_err() {
        errors.push(ValidationError::LogLevel(config.observability.log_level.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
