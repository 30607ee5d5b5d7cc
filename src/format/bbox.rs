//! 2D bounding boxes and 3D cuboids.

use serde_json::Value;

use super::annotation::{Annotation, AnnotationBase, AnnotationType};
use super::geometry::{expect_len, Point2d, Point3d, Quaternion, Size2d, Size3d};
use super::record::{f64_array, numbers, required, Record};
use crate::error::SchemaError;

/// An axis-aligned box in image space, stored as centre and size.
///
/// Wire form: `val = [x, y, width, height]`.
#[derive(Clone, Debug, PartialEq)]
pub struct Bbox {
    pub base: AnnotationBase,
    /// Centre of the box.
    pub pos: Point2d,
    pub size: Size2d,
}

impl Bbox {
    pub fn new(base: AnnotationBase, pos: Point2d, size: Size2d) -> Self {
        Self { base, pos, size }
    }
}

impl Annotation for Bbox {
    const TYPE: AnnotationType = AnnotationType::Bbox;

    fn base(&self) -> &AnnotationBase {
        &self.base
    }

    fn decode_geometry(record: &Record, base: AnnotationBase) -> Result<Self, SchemaError> {
        let uid = Some(base.uid.as_str());
        let val = f64_array(required(record, "val", uid)?, "val", uid)?;
        expect_len(&val, 4, "val", uid)?;

        Ok(Self {
            pos: Point2d::new(val[0], val[1]),
            size: Size2d::new(val[2], val[3]),
            base,
        })
    }

    fn encode_geometry(&self, record: &mut Record) -> Result<(), SchemaError> {
        let val = numbers(
            [self.pos.x, self.pos.y, self.size.x, self.size.y],
            "val",
            Some(self.base.uid.as_str()),
        )?;
        record.insert("val".into(), val);
        Ok(())
    }
}

/// An oriented box in 3D space.
///
/// Wire form: `val = [x, y, z, qx, qy, qz, qw, sx, sy, sz]`.
#[derive(Clone, Debug, PartialEq)]
pub struct Cuboid {
    pub base: AnnotationBase,
    /// Centre of the cuboid.
    pub pos: Point3d,
    pub quat: Quaternion,
    pub size: Size3d,
}

impl Cuboid {
    pub fn new(base: AnnotationBase, pos: Point3d, quat: Quaternion, size: Size3d) -> Self {
        Self {
            base,
            pos,
            quat,
            size,
        }
    }
}

impl Annotation for Cuboid {
    const TYPE: AnnotationType = AnnotationType::Cuboid;

    fn base(&self) -> &AnnotationBase {
        &self.base
    }

    fn decode_geometry(record: &Record, base: AnnotationBase) -> Result<Self, SchemaError> {
        let uid = Some(base.uid.as_str());
        let val = f64_array(required(record, "val", uid)?, "val", uid)?;
        expect_len(&val, 10, "val", uid)?;

        Ok(Self {
            pos: Point3d::new(val[0], val[1], val[2]),
            quat: Quaternion::new(val[3], val[4], val[5], val[6]),
            size: Size3d::new(val[7], val[8], val[9]),
            base,
        })
    }

    fn encode_geometry(&self, record: &mut Record) -> Result<(), SchemaError> {
        let Cuboid {
            pos, quat, size, ..
        } = self;
        let val: Value = numbers(
            [
                pos.x, pos.y, pos.z, quat.x, quat.y, quat.z, quat.w, size.x, size.y, size.z,
            ],
            "val",
            Some(self.base.uid.as_str()),
        )?;
        record.insert("val".into(), val);
        Ok(())
    }
}
