//! Coordinate systems declared in the scene.

use serde::{Deserialize, Serialize};

use super::geometry::{Point3d, Quaternion};
use super::CoordinateSystemId;
use crate::error::SchemaError;

/// A coordinate system that annotations can be labeled in.
///
/// Coordinate systems form a tree through `parent`/`children`; the root has
/// an empty `parent`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CoordinateSystem {
    /// Kind of coordinate system, e.g. `"local"` or `"sensor"`.
    #[serde(rename = "type")]
    pub kind: String,

    /// Name of the parent coordinate system, empty for the root.
    #[serde(default)]
    pub parent: String,

    /// Names of the child coordinate systems.
    #[serde(default)]
    pub children: Vec<CoordinateSystemId>,

    /// Pose relative to the parent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pose_wrt_parent: Option<Pose>,
}

impl CoordinateSystem {
    /// Creates a root coordinate system of the given kind.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            parent: String::new(),
            children: Vec::new(),
            pose_wrt_parent: None,
        }
    }

    /// Sets the parent of this coordinate system.
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = parent.into();
        self
    }

    /// Sets the pose relative to the parent.
    pub fn with_pose(mut self, pose: Pose) -> Self {
        self.pose_wrt_parent = Some(pose);
        self
    }

    /// Returns the parent name, or `None` for a root.
    pub fn parent(&self) -> Option<&str> {
        (!self.parent.is_empty()).then_some(self.parent.as_str())
    }

    pub(crate) fn check_encodable(&self, name: &str) -> Result<(), SchemaError> {
        match &self.pose_wrt_parent {
            Some(pose) if !pose.is_finite() => Err(SchemaError::invalid(
                "pose_wrt_parent",
                Some(name),
                "pose contains non-finite numbers",
            )),
            _ => Ok(()),
        }
    }
}

/// Translation and rotation of a coordinate system relative to its parent.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub translation: [f64; 3],
    pub quaternion: [f64; 4],
}

impl Pose {
    pub fn new(translation: Point3d, rotation: Quaternion) -> Self {
        Self {
            translation: [translation.x, translation.y, translation.z],
            quaternion: [rotation.x, rotation.y, rotation.z, rotation.w],
        }
    }

    pub fn translation(&self) -> Point3d {
        let [x, y, z] = self.translation;
        Point3d::new(x, y, z)
    }

    pub fn rotation(&self) -> Quaternion {
        let [x, y, z, w] = self.quaternion;
        Quaternion::new(x, y, z, w)
    }

    fn is_finite(&self) -> bool {
        self.translation.iter().chain(&self.quaternion).all(|v| v.is_finite())
    }
}
