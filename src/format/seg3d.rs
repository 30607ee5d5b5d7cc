//! Point cloud segmentations.

use serde_json::Value;

use super::annotation::{Annotation, AnnotationBase, AnnotationType};
use super::record::{as_array, required, Record};
use crate::error::SchemaError;

/// The set of point cloud points that belong to an object.
///
/// Wire form: `val = [i0, i1, ...]`, indices into the frame's point cloud.
#[derive(Clone, Debug, PartialEq)]
pub struct Seg3d {
    pub base: AnnotationBase,
    pub point_ids: Vec<u64>,
}

impl Seg3d {
    pub fn new(base: AnnotationBase, point_ids: Vec<u64>) -> Self {
        Self { base, point_ids }
    }
}

impl Annotation for Seg3d {
    const TYPE: AnnotationType = AnnotationType::Seg3d;

    fn base(&self) -> &AnnotationBase {
        &self.base
    }

    fn decode_geometry(record: &Record, base: AnnotationBase) -> Result<Self, SchemaError> {
        let uid = Some(base.uid.as_str());
        let point_ids = as_array(required(record, "val", uid)?, "val", uid)?
            .iter()
            .enumerate()
            .map(|(idx, item)| {
                item.as_u64().ok_or_else(|| {
                    SchemaError::invalid("val", uid, format!("element {idx} is not a point index"))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { base, point_ids })
    }

    fn encode_geometry(&self, record: &mut Record) -> Result<(), SchemaError> {
        let val = self.point_ids.iter().map(|&id| Value::from(id)).collect();
        record.insert("val".into(), Value::Array(val));
        Ok(())
    }
}
