//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check every backend address parses as an http/https URL
//! - Validate value ranges (registry non-empty, interval > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is a pure function: BalancerConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;
use url::Url;

use crate::config::schema::BalancerConfig;

/// A single validation failure.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("no backends configured; at least one is required")]
    NoBackends,

    #[error("backend address {address:?} is not a valid URL: {source}")]
    InvalidBackendUrl {
        address: String,
        source: url::ParseError,
    },

    #[error("backend address {address:?} has unsupported scheme {scheme:?}; only http is supported")]
    UnsupportedScheme { address: String, scheme: String },

    #[error("backend address {address:?} has no host")]
    MissingHost { address: String },

    #[error("health check interval must be greater than zero")]
    ZeroInterval,

    #[error("health check path {path:?} must start with '/'")]
    InvalidHealthPath { path: String },
}

/// Validate a configuration, collecting every error found.
pub fn validate_config(config: &BalancerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.backends.is_empty() {
        errors.push(ValidationError::NoBackends);
    }

    for address in &config.backends {
        match Url::parse(address) {
            Ok(url) => {
                // The forwarding and probe clients speak plain HTTP; an
                // https backend would pass startup and then fail every
                // request, so it is rejected here instead.
                if url.scheme() != "http" {
                    errors.push(ValidationError::UnsupportedScheme {
                        address: address.clone(),
                        scheme: url.scheme().to_string(),
                    });
                } else if url.host_str().is_none() {
                    errors.push(ValidationError::MissingHost {
                        address: address.clone(),
                    });
                }
            }
            Err(source) => {
                errors.push(ValidationError::InvalidBackendUrl {
                    address: address.clone(),
                    source,
                });
            }
        }
    }

    if config.health_check.interval_secs == 0 {
        errors.push(ValidationError::ZeroInterval);
    }

    if !config.health_check.path.starts_with('/') {
        errors.push(ValidationError::InvalidHealthPath {
            path: config.health_check.path.clone(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
