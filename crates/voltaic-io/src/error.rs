//! Error types for voltaic-io.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// File version this reader does not speak.
    #[error("unsupported circuit file version: {0}")]
    UnsupportedVersion(String),

    /// A component type tag outside the known family.
    #[error("unknown component kind: {0}")]
    UnknownComponentKind(String),

    /// A wire endpoint that is not `<component_id>:<pin_name>`.
    #[error("malformed pin id: {0}")]
    MalformedPinId(String),

    /// A missing or wrongly-typed component property.
    #[error("component {id}: missing or invalid property `{property}`")]
    BadProperty { id: String, property: String },

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Core(#[from] voltaic_core::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
