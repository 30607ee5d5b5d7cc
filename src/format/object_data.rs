//! All annotations of one object in one frame, grouped by kind.

use std::collections::BTreeMap;

use serde_json::Value;

use super::annotation::{Annotation, AnnotationRef, AnnotationType};
use super::record::{as_array, as_record, Record};
use super::resolver::Resolver;
use super::warning::Warning;
use super::{AnnotationId, Bbox, Cuboid, Keypoint2d, Keypoint3d, ObjectId, Poly2d, Poly3d, Seg3d};
use crate::error::SchemaError;

/// The annotations of a single object within a single frame.
///
/// Every group maps annotation uid to annotation. The owning object is
/// recorded by id; annotations point back to it the same way.
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectData {
    pub object: ObjectId,
    pub bbox: BTreeMap<AnnotationId, Bbox>,
    pub cuboid: BTreeMap<AnnotationId, Cuboid>,
    pub point2d: BTreeMap<AnnotationId, Keypoint2d>,
    pub point3d: BTreeMap<AnnotationId, Keypoint3d>,
    pub poly2d: BTreeMap<AnnotationId, Poly2d>,
    pub poly3d: BTreeMap<AnnotationId, Poly3d>,
    pub seg3d: BTreeMap<AnnotationId, Seg3d>,
}

impl ObjectData {
    /// Creates empty object data for `object`.
    pub fn new(object: impl Into<ObjectId>) -> Self {
        Self {
            object: object.into(),
            bbox: BTreeMap::new(),
            cuboid: BTreeMap::new(),
            point2d: BTreeMap::new(),
            point3d: BTreeMap::new(),
            poly2d: BTreeMap::new(),
            poly3d: BTreeMap::new(),
            seg3d: BTreeMap::new(),
        }
    }

    /// Returns true if the object has no annotations at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of annotations across all groups.
    pub fn len(&self) -> usize {
        self.bbox.len()
            + self.cuboid.len()
            + self.point2d.len()
            + self.point3d.len()
            + self.poly2d.len()
            + self.poly3d.len()
            + self.seg3d.len()
    }

    /// Iterates every annotation, group by group in [`AnnotationType::ALL`]
    /// order and by uid within a group.
    pub fn annotations(&self) -> impl Iterator<Item = AnnotationRef<'_>> {
        self.bbox
            .values()
            .map(AnnotationRef::from)
            .chain(self.cuboid.values().map(AnnotationRef::from))
            .chain(self.point2d.values().map(AnnotationRef::from))
            .chain(self.point3d.values().map(AnnotationRef::from))
            .chain(self.poly2d.values().map(AnnotationRef::from))
            .chain(self.poly3d.values().map(AnnotationRef::from))
            .chain(self.seg3d.values().map(AnnotationRef::from))
    }

    /// Decodes an `object_data` record (kind key -> list of records).
    ///
    /// A fatal error in any annotation aborts the whole object.
    pub fn decode(
        object: ObjectId,
        value: &Value,
        resolver: &Resolver<'_>,
    ) -> Result<(Self, Vec<Warning>), SchemaError> {
        let record = as_record(value, "object_data", Some(object.as_str()))?;
        let mut data = ObjectData::new(object);
        let mut warnings = Vec::new();

        for (key, entries) in record {
            let Some(kind) = AnnotationType::from_key(key) else {
                warnings.push(Warning::unsupported_annotation_type(key, data.object.as_str()));
                continue;
            };

            let object = &data.object;
            match kind {
                AnnotationType::Bbox => {
                    decode_group(entries, object, resolver, &mut data.bbox, &mut warnings)?
                }
                AnnotationType::Cuboid => {
                    decode_group(entries, object, resolver, &mut data.cuboid, &mut warnings)?
                }
                AnnotationType::Point2d => {
                    decode_group(entries, object, resolver, &mut data.point2d, &mut warnings)?
                }
                AnnotationType::Point3d => {
                    decode_group(entries, object, resolver, &mut data.point3d, &mut warnings)?
                }
                AnnotationType::Poly2d => {
                    decode_group(entries, object, resolver, &mut data.poly2d, &mut warnings)?
                }
                AnnotationType::Poly3d => {
                    decode_group(entries, object, resolver, &mut data.poly3d, &mut warnings)?
                }
                AnnotationType::Seg3d => {
                    decode_group(entries, object, resolver, &mut data.seg3d, &mut warnings)?
                }
            }
        }

        Ok((data, warnings))
    }

    /// Encodes the `object_data` record, emitting only non-empty groups.
    pub fn encode(&self) -> Result<Value, SchemaError> {
        let mut record = Record::new();
        encode_group(&self.bbox, &mut record)?;
        encode_group(&self.cuboid, &mut record)?;
        encode_group(&self.point2d, &mut record)?;
        encode_group(&self.point3d, &mut record)?;
        encode_group(&self.poly2d, &mut record)?;
        encode_group(&self.poly3d, &mut record)?;
        encode_group(&self.seg3d, &mut record)?;
        Ok(Value::Object(record))
    }
}

/// Fuzz-only entrypoint for decoding a single `object_data` record.
#[cfg(feature = "fuzzing")]
pub fn fuzz_decode_object_data(bytes: &[u8]) -> Result<(), crate::RaillabelError> {
    let value: Value = serde_json::from_slice(bytes)?;
    let _ = ObjectData::decode(ObjectId::from("<fuzz>"), &value, &Resolver::default())?;
    Ok(())
}

fn decode_group<A: Annotation>(
    entries: &Value,
    object: &ObjectId,
    resolver: &Resolver<'_>,
    group: &mut BTreeMap<AnnotationId, A>,
    warnings: &mut Vec<Warning>,
) -> Result<(), SchemaError> {
    for entry in as_array(entries, A::TYPE.key(), Some(object.as_str()))? {
        let (annotation, annotation_warnings) = A::decode(entry, resolver, Some(object))?;
        warnings.extend(annotation_warnings);
        let uid = annotation.uid().clone();
        if group.insert(uid.clone(), annotation).is_some() {
            warnings.push(Warning::duplicate_annotation_uid(
                uid.as_str(),
                &format!("the object {object}"),
            ));
        }
    }
    Ok(())
}

fn encode_group<A: Annotation>(
    group: &BTreeMap<AnnotationId, A>,
    record: &mut Record,
) -> Result<(), SchemaError> {
    if group.is_empty() {
        return Ok(());
    }

    let entries = group
        .values()
        .map(Annotation::encode)
        .collect::<Result<Vec<_>, _>>()?;
    record.insert(A::TYPE.key().into(), Value::Array(entries));
    Ok(())
}
