//! Labeled objects and file metadata.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A physical object that is annotated across frames.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Object {
    /// Human-readable name, e.g. `"person_0032"`.
    pub name: String,

    /// Class of the object, e.g. `"person"` or `"signal"`.
    #[serde(rename = "type")]
    pub kind: String,
}

impl Object {
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
        }
    }
}

/// Information about the annotation file itself.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// OpenLABEL schema version the file follows.
    pub schema_version: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Version of the project-specific subschema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subschema_version: Option<String>,

    /// Version of the tool that wrote the file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exporter_version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotator: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    /// Directory or file the annotations belong to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tagged_file: Option<String>,

    /// Keys this crate does not interpret, kept verbatim.
    #[serde(flatten)]
    pub additional: BTreeMap<String, Value>,
}

impl Metadata {
    pub fn new(schema_version: impl Into<String>) -> Self {
        Self {
            schema_version: schema_version.into(),
            name: None,
            subschema_version: None,
            exporter_version: None,
            annotator: None,
            comment: None,
            tagged_file: None,
            additional: BTreeMap::new(),
        }
    }
}
