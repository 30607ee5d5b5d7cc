//! Polylines and polygons in 2D and 3D.
//!
//! Both kinds store their points as one flat `val` array. The `closed` flag
//! tells a polygon (closed shape) from an open polyline.

use super::annotation::{Annotation, AnnotationBase, AnnotationType};
use super::geometry::{points2d_from_flat, points2d_to_flat, points3d_from_flat, points3d_to_flat};
use super::geometry::{Point2d, Point3d};
use super::record::{f64_array, optional_string, required, required_bool, Record};
use crate::error::SchemaError;
use serde_json::Value;

/// Default interpretation of 2D polygon coordinates.
pub const MODE_POLY2D_ABSOLUTE: &str = "MODE_POLY2D_ABSOLUTE";

/// A sequence of 2D points.
#[derive(Clone, Debug, PartialEq)]
pub struct Poly2d {
    pub base: AnnotationBase,
    pub points: Vec<Point2d>,
    pub closed: bool,
    /// How `val` encodes the points; always written.
    pub mode: String,
}

impl Poly2d {
    pub fn new(base: AnnotationBase, points: Vec<Point2d>, closed: bool) -> Self {
        Self {
            base,
            points,
            closed,
            mode: MODE_POLY2D_ABSOLUTE.to_string(),
        }
    }
}

impl Annotation for Poly2d {
    const TYPE: AnnotationType = AnnotationType::Poly2d;

    fn base(&self) -> &AnnotationBase {
        &self.base
    }

    fn decode_geometry(record: &Record, base: AnnotationBase) -> Result<Self, SchemaError> {
        let uid = Some(base.uid.as_str());
        let val = f64_array(required(record, "val", uid)?, "val", uid)?;
        let points = points2d_from_flat(&val, "val", uid)?;
        let closed = required_bool(record, "closed", uid)?;
        let mode = optional_string(record, "mode", uid)?
            .unwrap_or_else(|| MODE_POLY2D_ABSOLUTE.to_string());

        Ok(Self {
            base,
            points,
            closed,
            mode,
        })
    }

    fn encode_geometry(&self, record: &mut Record) -> Result<(), SchemaError> {
        let uid = Some(self.base.uid.as_str());
        record.insert("val".into(), points2d_to_flat(&self.points, "val", uid)?);
        record.insert("closed".into(), Value::Bool(self.closed));
        record.insert("mode".into(), Value::String(self.mode.clone()));
        Ok(())
    }
}

/// A sequence of 3D points, e.g. a rail track or a catenary wire.
#[derive(Clone, Debug, PartialEq)]
pub struct Poly3d {
    pub base: AnnotationBase,
    pub points: Vec<Point3d>,
    pub closed: bool,
}

impl Poly3d {
    pub fn new(base: AnnotationBase, points: Vec<Point3d>, closed: bool) -> Self {
        Self {
            base,
            points,
            closed,
        }
    }
}

impl Annotation for Poly3d {
    const TYPE: AnnotationType = AnnotationType::Poly3d;

    fn base(&self) -> &AnnotationBase {
        &self.base
    }

    fn decode_geometry(record: &Record, base: AnnotationBase) -> Result<Self, SchemaError> {
        let uid = Some(base.uid.as_str());
        let val = f64_array(required(record, "val", uid)?, "val", uid)?;
        let points = points3d_from_flat(&val, "val", uid)?;
        let closed = required_bool(record, "closed", uid)?;

        Ok(Self {
            base,
            points,
            closed,
        })
    }

    fn encode_geometry(&self, record: &mut Record) -> Result<(), SchemaError> {
        let uid = Some(self.base.uid.as_str());
        record.insert("closed".into(), Value::Bool(self.closed));
        record.insert("val".into(), points3d_to_flat(&self.points, "val", uid)?);
        Ok(())
    }
}
