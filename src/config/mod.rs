//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → BridgeConfig (validated, immutable)
//!     → Router::from_config builds the route table
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a new router
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::BridgeConfig;
pub use schema::EnvironmentConfig;
pub use schema::ObservabilityConfig;
pub use schema::RouteConfig;
pub use schema::TemplatesConfig;
pub use validation::{validate_config, ValidationError};
