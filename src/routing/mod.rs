//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Registration:
//!     pattern
//!     → path.rs (normalize)
//!     → validation.rs (structural checks)
//!     → router.rs (store Handler under the normalized key)
//!
//! Dispatch (path, method, environment):
//!     → path.rs (normalize)
//!     → router.rs (exact key, else scan patterns in insertion order)
//!     → matcher.rs (placeholder captures → params.rs)
//!     → handler.rs (gate, validator, method or `*` callback)
//!     → bool
//! ```
//!
//! # Design Decisions
//! - Callbacks receive one named `Params`, never positional values
//! - Every public operation answers with a bool; reasons go to logs
//! - First match wins (ordered by registration)

pub mod handler;
pub mod matcher;
pub mod params;
pub mod path;
pub mod router;
pub mod validation;

pub use handler::{Callback, Handler};
pub use matcher::{dynamic_match, RoutePattern};
pub use params::Params;
pub use router::{RouteOutcome, Router};
pub use validation::{is_valid_route, validate_route, RouteError};
