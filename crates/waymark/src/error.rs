//! Library error type.
//!
//! The compiler and path algebra are pure string transforms with no failure
//! modes of their own; the only error this crate surfaces is a lookup of a
//! route group that was never compiled, which is raised synchronously so
//! application startup fails fast.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// `use_routes` was called with a name no `create_routes` call stored.
    #[error("unknown route group `{0}`")]
    UnknownGroup(String),
}

pub type Result<T> = std::result::Result<T, Error>;
