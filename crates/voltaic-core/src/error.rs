//! Error types for voltaic-core.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// A wire references a pin no component declares.
    #[error("wire references undeclared pin: {0}")]
    MalformedNetlist(String),

    /// A node label that is neither `"0"` nor `"N<k>"`.
    #[error("invalid node label: {0}")]
    InvalidNodeLabel(String),
}

pub type Result<T> = std::result::Result<T, Error>;
