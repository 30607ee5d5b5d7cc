//! Single keypoints in 2D and 3D.

use super::annotation::{Annotation, AnnotationBase, AnnotationType};
use super::geometry::{expect_len, Point2d, Point3d};
use super::record::{f64_array, numbers, required, Record};
use crate::error::SchemaError;

/// A single point in image space. Wire form: `val = [x, y]`.
#[derive(Clone, Debug, PartialEq)]
pub struct Keypoint2d {
    pub base: AnnotationBase,
    pub point: Point2d,
}

impl Keypoint2d {
    pub fn new(base: AnnotationBase, point: Point2d) -> Self {
        Self { base, point }
    }
}

impl Annotation for Keypoint2d {
    const TYPE: AnnotationType = AnnotationType::Point2d;

    fn base(&self) -> &AnnotationBase {
        &self.base
    }

    fn decode_geometry(record: &Record, base: AnnotationBase) -> Result<Self, SchemaError> {
        let uid = Some(base.uid.as_str());
        let val = f64_array(required(record, "val", uid)?, "val", uid)?;
        expect_len(&val, 2, "val", uid)?;

        Ok(Self {
            point: Point2d::new(val[0], val[1]),
            base,
        })
    }

    fn encode_geometry(&self, record: &mut Record) -> Result<(), SchemaError> {
        let val = numbers(
            [self.point.x, self.point.y],
            "val",
            Some(self.base.uid.as_str()),
        )?;
        record.insert("val".into(), val);
        Ok(())
    }
}

/// A single point in 3D space. Wire form: `val = [x, y, z]`.
#[derive(Clone, Debug, PartialEq)]
pub struct Keypoint3d {
    pub base: AnnotationBase,
    pub point: Point3d,
}

impl Keypoint3d {
    pub fn new(base: AnnotationBase, point: Point3d) -> Self {
        Self { base, point }
    }
}

impl Annotation for Keypoint3d {
    const TYPE: AnnotationType = AnnotationType::Point3d;

    fn base(&self) -> &AnnotationBase {
        &self.base
    }

    fn decode_geometry(record: &Record, base: AnnotationBase) -> Result<Self, SchemaError> {
        let uid = Some(base.uid.as_str());
        let val = f64_array(required(record, "val", uid)?, "val", uid)?;
        expect_len(&val, 3, "val", uid)?;

        Ok(Self {
            point: Point3d::new(val[0], val[1], val[2]),
            base,
        })
    }

    fn encode_geometry(&self, record: &mut Record) -> Result<(), SchemaError> {
        let val = numbers(
            [self.point.x, self.point.y, self.point.z],
            "val",
            Some(self.base.uid.as_str()),
        )?;
        record.insert("val".into(), val);
        Ok(())
    }
}
