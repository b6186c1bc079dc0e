//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (cost positive, intervals and timeouts non-zero)
//! - Detect unparseable and duplicate backend addresses
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: `GatewayConfig → Result<(), Vec<_>>`
//! - Runs before the config is accepted into the gateway

use std::collections::HashSet;

use thiserror::Error;
use url::Url;

use crate::config::schema::GatewayConfig;

/// One semantic problem with a configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("no backends configured; the gateway needs at least one")]
    NoBackends,

    #[error("backend '{name}': invalid address '{address}': {reason}")]
    InvalidAddress {
        name: String,
        address: String,
        reason: String,
    },

    #[error("backend address '{0}' is configured more than once")]
    DuplicateAddress(String),

    #[error("dispatch.job_cost must be positive")]
    ZeroJobCost,

    #[error("{0} must be positive")]
    ZeroDuration(&'static str),
}

/// Check a configuration, collecting every problem found.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.backends.is_empty() {
        errors.push(ValidationError::NoBackends);
    }

    let mut seen = HashSet::new();
    for backend in &config.backends {
        match backend.address.parse::<Url>() {
            Ok(url) => {
                if !seen.insert(url) {
                    errors.push(ValidationError::DuplicateAddress(backend.address.clone()));
                }
            }
            Err(e) => errors.push(ValidationError::InvalidAddress {
                name: backend.name.clone(),
                address: backend.address.clone(),
                reason: e.to_string(),
            }),
        }
    }

    if config.dispatch.job_cost == 0 {
        errors.push(ValidationError::ZeroJobCost);
    }
    if config.dispatch.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroDuration("dispatch.request_timeout_secs"));
    }
    if config.health_check.interval_secs == 0 {
        errors.push(ValidationError::ZeroDuration("health_check.interval_secs"));
    }
    if config.health_check.timeout_secs == 0 {
        errors.push(ValidationError::ZeroDuration("health_check.timeout_secs"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
