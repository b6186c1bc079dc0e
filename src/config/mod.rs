//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks, all errors at once)
//!     → GatewayConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the backend set is fixed for the
//!   gateway's lifetime
//! - All fields have defaults so a minimal config stays minimal
//! - Validation separates syntactic (serde) from semantic checks

mod loader;
mod schema;
mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{BackendConfig, DispatchConfig, GatewayConfig, HealthCheckConfig};
pub use validation::{validate_config, ValidationError};
