//! Template subsystem.
//!
//! # Data Flow
//! ```text
//! location on disk
//!     → discovery.rs (template names, sorted)
//!     → Router::load registers one route per name
//!     → loader.rs (resolve name → file, refuse escapes)
//!     → render.rs (produce content)
//! ```

pub mod discovery;
pub mod loader;
pub mod render;

pub use loader::FileLoader;
pub use render::{Render, StdoutRender};
