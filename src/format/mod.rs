//! Typed model of OpenLABEL annotation files.
//!
//! This module maps the untyped JSON record tree of an OpenLABEL file onto
//! typed entities and back. Decoding is split into two outcomes:
//!
//! - a fatal [`SchemaError`](crate::error::SchemaError) when a record is
//!   structurally broken (a required field is missing, a geometry array
//!   has the wrong length, a value has the wrong type), and
//! - a list of [`Warning`]s for problems that leave a usable result, such
//!   as a reference to a coordinate system that the scene never declares.
//!
//! # Design Principles
//!
//! 1. **References by id**: annotations, frames and object data point at
//!    coordinate systems, streams and objects by their identifiers, never
//!    by owned copies. A [`Resolver`] checks those identifiers during
//!    decode.
//!
//! 2. **Closed set of kinds**: every annotation kind is its own struct
//!    implementing [`Annotation`]; mixed-kind views use [`AnnotationRef`].
//!
//! 3. **Warnings are values**: decode returns them alongside the entity and
//!    each level appends the warnings of its children in order.
//!
//! # Example
//!
//! ```
//! use raillabel::format::{AnnotationBase, Annotation, Poly3d, Point3d};
//!
//! let rail = Poly3d::new(
//!     AnnotationBase::new("a1", "rail_left"),
//!     vec![Point3d::new(0.0, 0.0, 0.0), Point3d::new(1.0, 0.0, 0.0)],
//!     false,
//! );
//! let record = rail.encode().unwrap();
//! assert_eq!(record["val"].as_array().unwrap().len(), 6);
//! ```

mod annotation;
mod attributes;
mod bbox;
mod coordinate_system;
mod frame;
mod geometry;
mod ids;
pub mod io_json;
mod object;
mod object_data;
mod point;
mod poly;
pub mod record;
mod resolver;
mod scene;
mod seg3d;
mod stream;
mod warning;

pub use annotation::{Annotation, AnnotationBase, AnnotationRef, AnnotationType};
pub use attributes::{AttributeValue, Attributes};
pub use bbox::{Bbox, Cuboid};
pub use coordinate_system::{CoordinateSystem, Pose};
pub use frame::{Frame, Num};
pub use geometry::{Point2d, Point3d, Quaternion, Size2d, Size3d};
pub use ids::{AnnotationId, CoordinateSystemId, FrameId, ObjectId, StreamId};
pub use object::{Metadata, Object};
pub use object_data::ObjectData;
#[cfg(feature = "fuzzing")]
pub use object_data::fuzz_decode_object_data;
pub use point::{Keypoint2d, Keypoint3d};
pub use poly::{Poly2d, Poly3d, MODE_POLY2D_ABSOLUTE};
pub use resolver::{resolve, Resolver};
pub use scene::{FrameInterval, Scene};
pub use seg3d::Seg3d;
pub use stream::{Stream, StreamReference};
pub use warning::{Warning, WarningCode};
