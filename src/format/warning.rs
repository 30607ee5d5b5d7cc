//! Non-fatal decode diagnostics.
//!
//! Warnings are collected rather than raised: every decode returns the
//! entity it built together with the warnings met on the way, and every
//! aggregation level appends the warnings of its children in order.

use serde::Serialize;
use std::fmt;

/// A single non-fatal problem found while decoding.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Warning {
    /// A stable code for the kind of problem.
    pub code: WarningCode,

    /// A human-readable description of the problem.
    pub message: String,
}

impl Warning {
    /// Creates a new warning.
    pub fn new(code: WarningCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// A coordinate system reference that names nothing in the scene.
    ///
    /// `referrer` completes the sentence, e.g. `"the annotation 1234"`.
    pub fn missing_coordinate_system(name: &str, referrer: &str) -> Self {
        Self::new(
            WarningCode::MissingCoordinateSystem,
            format!("{name} does not exist as a coordinate system, but is referenced for {referrer}."),
        )
    }

    /// A frame references a stream that is not declared in the scene.
    pub fn missing_stream(name: &str, frame: impl fmt::Display) -> Self {
        Self::new(
            WarningCode::MissingStream,
            format!("{name} does not exist as a stream, but is referenced in the frame {frame}."),
        )
    }

    /// A frame carries data for an object that is not declared in the scene.
    pub fn missing_object(id: &str, frame: impl fmt::Display) -> Self {
        Self::new(
            WarningCode::MissingObject,
            format!("{id} does not exist as an object, but is referenced in the frame {frame}."),
        )
    }

    /// Two annotations share a uid; `scope` completes the sentence, e.g.
    /// `"the frame 3"`. Only the last of them stays visible.
    pub fn duplicate_annotation_uid(uid: &str, scope: &str) -> Self {
        Self::new(
            WarningCode::DuplicateAnnotationUid,
            format!("the annotation uid {uid} is used more than once in {scope}; only the last one is kept."),
        )
    }

    /// An `object_data` key that names no supported annotation kind.
    pub fn unsupported_annotation_type(kind: &str, object: &str) -> Self {
        Self::new(
            WarningCode::UnsupportedAnnotationType,
            format!("annotation type '{kind}' of the object {object} is not supported and was skipped."),
        )
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// A stable code identifying the kind of warning.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum WarningCode {
    /// A referenced coordinate system is not declared.
    MissingCoordinateSystem,
    /// A referenced stream is not declared.
    MissingStream,
    /// A frame references an undeclared object.
    MissingObject,
    /// Two annotations in one frame share a uid.
    DuplicateAnnotationUid,
    /// An annotation kind outside the supported set.
    UnsupportedAnnotationType,
}
