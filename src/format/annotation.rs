//! The common contract of every annotation kind.
//!
//! Each kind is its own struct carrying an [`AnnotationBase`] plus its
//! geometry. The [`Annotation`] trait supplies the shared decode/encode
//! logic; kinds only implement their geometry. [`AnnotationRef`] is the
//! closed set of kinds used wherever annotations of mixed kinds are viewed
//! together.

use std::fmt;

use serde_json::Value;

use super::attributes::{decode_attributes, encode_attributes, take_uri, AttributeValue, Attributes};
use super::record::{as_record, optional_string, record_uid, required_string, Record};
use super::resolver::Resolver;
use super::warning::Warning;
use super::{AnnotationId, Bbox, CoordinateSystemId, Cuboid, Keypoint2d, Keypoint3d, ObjectId};
use super::{Poly2d, Poly3d, Seg3d};
use crate::error::SchemaError;

/// Fields shared by every annotation kind.
#[derive(Clone, Debug, PartialEq)]
pub struct AnnotationBase {
    /// Identifier, unique across the whole file.
    pub uid: AnnotationId,

    /// Human-readable name.
    pub name: String,

    /// Coordinate system the annotation is labeled in.
    pub coordinate_system: Option<CoordinateSystemId>,

    /// Auxiliary attributes, without the reserved `uri`.
    pub attributes: Attributes,

    /// File that contains the annotated data.
    pub uri: Option<String>,

    /// Object whose data holds this annotation. Set by decode; never
    /// written to the wire.
    pub object: Option<ObjectId>,
}

impl AnnotationBase {
    pub fn new(uid: impl Into<AnnotationId>, name: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            name: name.into(),
            coordinate_system: None,
            attributes: Attributes::new(),
            uri: None,
            object: None,
        }
    }

    pub fn with_coordinate_system(mut self, coordinate_system: impl Into<CoordinateSystemId>) -> Self {
        self.coordinate_system = Some(coordinate_system.into());
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    pub fn with_object(mut self, object: impl Into<ObjectId>) -> Self {
        self.object = Some(object.into());
        self
    }

    fn decode(
        record: &Record,
        resolver: &Resolver<'_>,
        object: Option<&ObjectId>,
        warnings: &mut Vec<Warning>,
    ) -> Result<Self, SchemaError> {
        let uid = required_string(record, "uid", None)?;
        let ctx = Some(uid.as_str());
        let name = required_string(record, "name", ctx)?;

        let reference = optional_string(record, "coordinate_system", ctx)?;
        let coordinate_system = resolver.coordinate_system_or_warn(
            reference.as_deref(),
            &format!("the annotation {uid}"),
            warnings,
        );

        let (attributes, uri) = match record.get("attributes") {
            Some(value) => {
                let mut attributes = decode_attributes(value, ctx)?;
                let uri = take_uri(&mut attributes, ctx)?;
                (attributes, uri)
            }
            None => (Attributes::new(), None),
        };

        Ok(Self {
            uid: AnnotationId::new(uid),
            name,
            coordinate_system,
            attributes,
            uri,
            object: object.cloned(),
        })
    }

    fn encode_required(&self, record: &mut Record) {
        record.insert("uid".into(), Value::String(self.uid.to_string()));
        record.insert("name".into(), Value::String(self.name.clone()));
    }

    fn encode_optional(&self, record: &mut Record) -> Result<(), SchemaError> {
        if let Some(coordinate_system) = &self.coordinate_system {
            record.insert(
                "coordinate_system".into(),
                Value::String(coordinate_system.to_string()),
            );
        }

        if let Some(attributes) =
            encode_attributes(&self.attributes, self.uri.as_deref(), Some(self.uid.as_str()))?
        {
            record.insert("attributes".into(), attributes);
        }

        Ok(())
    }
}

/// An annotation kind that can be decoded from and encoded to its record.
pub trait Annotation: Sized {
    /// The kind tag, which is also the `object_data` key on the wire.
    const TYPE: AnnotationType;

    fn base(&self) -> &AnnotationBase;

    /// Builds the kind from its record once the shared fields are decoded.
    fn decode_geometry(record: &Record, base: AnnotationBase) -> Result<Self, SchemaError>;

    /// Writes the kind-specific fields.
    fn encode_geometry(&self, record: &mut Record) -> Result<(), SchemaError>;

    fn uid(&self) -> &AnnotationId {
        &self.base().uid
    }

    /// Decodes one annotation record.
    ///
    /// Missing or malformed required fields are fatal. An unknown
    /// `coordinate_system` is not: the annotation is built without it and
    /// a warning is returned.
    fn decode(
        value: &Value,
        resolver: &Resolver<'_>,
        object: Option<&ObjectId>,
    ) -> Result<(Self, Vec<Warning>), SchemaError> {
        let record = as_record(value, Self::TYPE.key(), None)?;
        let mut warnings = Vec::new();
        let base = AnnotationBase::decode(record, resolver, object, &mut warnings)
            .map_err(|err| with_uid(err, record))?;
        let annotation = Self::decode_geometry(record, base)?;
        Ok((annotation, warnings))
    }

    /// Encodes the annotation. Unset optional fields are omitted.
    fn encode(&self) -> Result<Value, SchemaError> {
        let mut record = Record::new();
        self.base().encode_required(&mut record);
        self.encode_geometry(&mut record)?;
        self.base().encode_optional(&mut record)?;
        Ok(Value::Object(record))
    }
}

fn with_uid(mut err: SchemaError, record: &Record) -> SchemaError {
    if err.uid.is_none() {
        err.uid = record_uid(record);
    }
    err
}

/// The supported annotation kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AnnotationType {
    Bbox,
    Cuboid,
    Point2d,
    Point3d,
    Poly2d,
    Poly3d,
    Seg3d,
}

impl AnnotationType {
    /// All kinds, in the order `object_data` groups are walked.
    pub const ALL: [AnnotationType; 7] = [
        AnnotationType::Bbox,
        AnnotationType::Cuboid,
        AnnotationType::Point2d,
        AnnotationType::Point3d,
        AnnotationType::Poly2d,
        AnnotationType::Poly3d,
        AnnotationType::Seg3d,
    ];

    /// The `object_data` key of this kind.
    pub fn key(&self) -> &'static str {
        match self {
            AnnotationType::Bbox => "bbox",
            AnnotationType::Cuboid => "cuboid",
            AnnotationType::Point2d => "point2d",
            AnnotationType::Point3d => "point3d",
            AnnotationType::Poly2d => "poly2d",
            AnnotationType::Poly3d => "poly3d",
            AnnotationType::Seg3d => "vec",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.key() == key)
    }
}

impl fmt::Display for AnnotationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A borrowed annotation of any kind.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AnnotationRef<'a> {
    Bbox(&'a Bbox),
    Cuboid(&'a Cuboid),
    Point2d(&'a Keypoint2d),
    Point3d(&'a Keypoint3d),
    Poly2d(&'a Poly2d),
    Poly3d(&'a Poly3d),
    Seg3d(&'a Seg3d),
}

impl<'a> AnnotationRef<'a> {
    pub fn base(&self) -> &'a AnnotationBase {
        match *self {
            AnnotationRef::Bbox(a) => a.base(),
            AnnotationRef::Cuboid(a) => a.base(),
            AnnotationRef::Point2d(a) => a.base(),
            AnnotationRef::Point3d(a) => a.base(),
            AnnotationRef::Poly2d(a) => a.base(),
            AnnotationRef::Poly3d(a) => a.base(),
            AnnotationRef::Seg3d(a) => a.base(),
        }
    }

    pub fn uid(&self) -> &'a AnnotationId {
        &self.base().uid
    }

    pub fn kind(&self) -> AnnotationType {
        match self {
            AnnotationRef::Bbox(_) => AnnotationType::Bbox,
            AnnotationRef::Cuboid(_) => AnnotationType::Cuboid,
            AnnotationRef::Point2d(_) => AnnotationType::Point2d,
            AnnotationRef::Point3d(_) => AnnotationType::Point3d,
            AnnotationRef::Poly2d(_) => AnnotationType::Poly2d,
            AnnotationRef::Poly3d(_) => AnnotationType::Poly3d,
            AnnotationRef::Seg3d(_) => AnnotationType::Seg3d,
        }
    }

    pub fn encode(&self) -> Result<Value, SchemaError> {
        match self {
            AnnotationRef::Bbox(a) => a.encode(),
            AnnotationRef::Cuboid(a) => a.encode(),
            AnnotationRef::Point2d(a) => a.encode(),
            AnnotationRef::Point3d(a) => a.encode(),
            AnnotationRef::Poly2d(a) => a.encode(),
            AnnotationRef::Poly3d(a) => a.encode(),
            AnnotationRef::Seg3d(a) => a.encode(),
        }
    }
}

macro_rules! annotation_ref_from {
    ($($kind:ident => $variant:ident),* $(,)?) => {
        $(
            impl<'a> From<&'a $kind> for AnnotationRef<'a> {
                fn from(annotation: &'a $kind) -> Self {
                    AnnotationRef::$variant(annotation)
                }
            }
        )*
    };
}

annotation_ref_from!(
    Bbox => Bbox,
    Cuboid => Cuboid,
    Keypoint2d => Point2d,
    Keypoint3d => Point3d,
    Poly2d => Poly2d,
    Poly3d => Poly3d,
    Seg3d => Seg3d,
);
