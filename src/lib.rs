//! Route registration and dispatch for template-backed endpoints.

pub mod config;
pub mod observability;
pub mod routing;
pub mod security;
pub mod templates;

pub use config::schema::BridgeConfig;
pub use routing::{Handler, Params, RouteOutcome, Router};
pub use security::environment::Environment;
pub use security::validator::Validator;
pub use templates::FileLoader;
