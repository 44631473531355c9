//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Request headers + request data
//!     → environment.rs (explicit per-call context)
//!     → validator.rs (HeaderGate, custom validators)
//!     → Handler / Router decide whether dispatch may proceed
//! ```
//!
//! # Design Decisions
//! - Fail closed: a missing or falsy gate header rejects the call
//! - No process-wide state; the environment is passed explicitly

pub mod environment;
pub mod validator;

pub use environment::Environment;
pub use validator::{HeaderGate, Validator};
