//! Rank-dependent environment resolution.
//!
//! Works on an explicit [`Environment`] snapshot: nothing here reads or
//! mutates the ambient process environment except [`Environment::capture`].

mod error;
pub use error::{RenvError, RenvResult};

mod env;
pub use env::Environment;

mod source;
pub use source::{RankIndex, RankKeys, RankScope, RankSource, resolve_rank};

mod map;
pub use map::{DEFAULT_KEYVAL_SEPARATOR, DEFAULT_MAP_SEPARATOR, Separators, TaskMap};

mod apply;
pub use apply::{Assignment, Request, apply};
