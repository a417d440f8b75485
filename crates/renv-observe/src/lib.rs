//! Logging bootstrap for `renv`.
//!
//! Everything is written to stderr: the wrapped command owns stdout.
mod logger;
pub use logger::*;
