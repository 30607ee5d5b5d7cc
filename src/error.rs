use std::path::PathBuf;
use thiserror::Error;

/// The main error type for raillabel operations.
#[derive(Debug, Error)]
pub enum RaillabelError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse OpenLABEL JSON from {path}: {source}")]
    JsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write OpenLABEL JSON to {path}: {source}")]
    JsonWrite {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid OpenLABEL scene in {path}: {source}")]
    Schema {
        path: PathBuf,
        #[source]
        source: SchemaError,
    },

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid OpenLABEL scene: {0}")]
    InvalidScene(#[from] SchemaError),

    #[error("Strict mode: decoding produced {warning_count} warning(s)")]
    StrictWarnings { warning_count: usize },

    #[error("Failed to serialize report: {0}")]
    ReportSerialize(#[source] serde_json::Error),
}

/// A fatal structural problem in an OpenLABEL record tree.
///
/// Raised when a required field is absent, has the wrong shape, or holds a
/// value that cannot be represented (e.g. a geometry array whose length is
/// not a multiple of the point arity). Decoding stops at the first one.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{}field '{field}': {reason}", uid_prefix(.uid))]
pub struct SchemaError {
    /// Name of the offending field as it appears on the wire.
    pub field: String,
    /// uid of the enclosing entity, when it could be read.
    pub uid: Option<String>,
    /// What is wrong with the field.
    pub reason: String,
}

impl SchemaError {
    /// Creates an error for an arbitrary structural problem.
    pub fn invalid(field: impl Into<String>, uid: Option<&str>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            uid: uid.map(str::to_owned),
            reason: reason.into(),
        }
    }

    /// Creates an error for a required field that is absent.
    pub fn missing(field: impl Into<String>, uid: Option<&str>) -> Self {
        Self::invalid(field, uid, "required field is missing")
    }
}

fn uid_prefix(uid: &Option<String>) -> String {
    match uid {
        Some(uid) => format!("'{uid}': "),
        None => String::new(),
    }
}
