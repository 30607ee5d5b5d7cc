//! Newtype IDs for type-safe cross-references between scene elements.
//!
//! Using newtypes prevents accidentally mixing up different kinds of IDs
//! (e.g., passing a stream name where a coordinate system is expected).
//! References between entities are stored as these IDs and never as owned
//! pointers, so the object graph stays a tree.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Creates a new identifier.
            #[inline]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the underlying string.
            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({:?})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self::new(id)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

string_id!(
    /// Identifier of an annotation, unique across the whole file.
    AnnotationId
);

string_id!(
    /// Identifier of a labeled object declared in the scene.
    ObjectId
);

string_id!(
    /// Name of a coordinate system declared in the scene.
    CoordinateSystemId
);

string_id!(
    /// Name of a sensor stream declared in the scene.
    StreamId
);

/// Number of a frame within the annotation file.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrameId(pub u64);

impl FrameId {
    /// Creates a new FrameId.
    #[inline]
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the underlying u64 value.
    #[inline]
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FrameId({})", self.0)
    }
}

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for FrameId {
    fn from(id: u64) -> Self {
        FrameId::new(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn id_equality() {
        assert_eq!(ObjectId::from("a"), ObjectId::new("a".to_string()));
        assert_ne!(StreamId::from("lidar"), StreamId::from("rgb_center"));
    }

    #[test]
    fn frame_id_ordering() {
        assert!(FrameId(1) < FrameId(2));
        assert_eq!(FrameId::from(7).as_u64(), 7);
    }

    #[test]
    fn map_lookup_by_str() {
        let mut map = BTreeMap::new();
        map.insert(CoordinateSystemId::from("base"), 1);
        assert_eq!(map.get("base"), Some(&1));
        assert_eq!(map.get("lidar"), None);
    }

    #[test]
    fn debug_and_display() {
        let id = AnnotationId::from("78f0ad89");
        assert_eq!(format!("{id:?}"), "AnnotationId(\"78f0ad89\")");
        assert_eq!(id.to_string(), "78f0ad89");
    }
}
