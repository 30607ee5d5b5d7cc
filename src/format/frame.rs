//! Frames: everything annotated at one point in time.

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;
use serde_json::Value;

use super::annotation::AnnotationRef;
use super::object_data::ObjectData;
use super::record::{as_array, as_record, decimal, number, optional_string, required_f64};
use super::record::{required_string, Record};
use super::resolver::Resolver;
use super::stream::StreamReference;
use super::warning::Warning;
use super::{AnnotationId, CoordinateSystemId, FrameId, ObjectId, StreamId};
use crate::error::SchemaError;

/// A container of dynamic, time-indexed information.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    /// Number of the frame within the file.
    pub uid: FrameId,

    /// Unix epoch time of the frame with up to nanosecond precision.
    pub timestamp: Option<Decimal>,

    /// Frame-specific information per stream.
    pub streams: BTreeMap<StreamId, StreamReference>,

    /// Frame-level numeric data not attached to any object, keyed by name.
    pub data: BTreeMap<String, Num>,

    /// Annotations per object.
    pub objects: BTreeMap<ObjectId, ObjectData>,
}

impl Frame {
    /// Creates an empty frame.
    pub fn new(uid: impl Into<FrameId>) -> Self {
        Self {
            uid: uid.into(),
            timestamp: None,
            streams: BTreeMap::new(),
            data: BTreeMap::new(),
            objects: BTreeMap::new(),
        }
    }

    /// Sets the frame timestamp.
    pub fn with_timestamp(mut self, timestamp: Decimal) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// All annotations of this frame regardless of object or kind, keyed by
    /// uid.
    ///
    /// This is a view computed on every call. Should two annotations share
    /// a uid, the one visited last (by object id, then kind, then uid) wins;
    /// decode reports such collisions as warnings.
    pub fn annotations(&self) -> BTreeMap<&AnnotationId, AnnotationRef<'_>> {
        self.objects
            .values()
            .flat_map(ObjectData::annotations)
            .map(|annotation| (annotation.uid(), annotation))
            .collect()
    }

    /// Decodes the frame stored under key `uid` of the `frames` section.
    pub fn decode(
        uid: FrameId,
        value: &Value,
        resolver: &Resolver<'_>,
    ) -> Result<(Self, Vec<Warning>), SchemaError> {
        let ctx = uid.to_string();
        let ctx = Some(ctx.as_str());
        let record = as_record(value, "frames", ctx)?;

        let mut frame = Frame::new(uid);
        let mut warnings = Vec::new();

        if let Some(props) = record.get("frame_properties") {
            let props = as_record(props, "frame_properties", ctx)?;

            if let Some(timestamp) = props.get("timestamp") {
                frame.timestamp = Some(decimal(timestamp, "timestamp", ctx)?);
            }

            if let Some(streams) = props.get("streams") {
                for (name, reference) in as_record(streams, "streams", ctx)? {
                    match resolver.stream(name) {
                        Some(stream) => {
                            let reference = StreamReference::decode(stream.clone(), reference)?;
                            frame.streams.insert(stream.clone(), reference);
                        }
                        None => warnings.push(Warning::missing_stream(name, uid)),
                    }
                }
            }

            if let Some(frame_data) = props.get("frame_data") {
                let frame_data = as_record(frame_data, "frame_data", ctx)?;
                if let Some(nums) = frame_data.get("num") {
                    for entry in as_array(nums, "num", ctx)? {
                        let num = Num::decode(entry, resolver, uid, &mut warnings)?;
                        frame.data.insert(num.name.clone(), num);
                    }
                }
            }
        }

        if let Some(objects) = record.get("objects") {
            for (id, object) in as_record(objects, "objects", ctx)? {
                if resolver.object(id).is_none() {
                    warnings.push(Warning::missing_object(id, uid));
                }

                let object = as_record(object, "objects", Some(id.as_str()))?;
                let data = match object.get("object_data") {
                    Some(object_data) => {
                        let (data, object_warnings) =
                            ObjectData::decode(ObjectId::from(id.as_str()), object_data, resolver)?;
                        warnings.extend(object_warnings);
                        data
                    }
                    None => ObjectData::new(id.as_str()),
                };
                frame.objects.insert(data.object.clone(), data);
            }
        }

        warnings.extend(frame.duplicate_uid_warnings());

        Ok((frame, warnings))
    }

    /// Encodes the frame. `frame_properties` is written only when there is a
    /// timestamp, a stream reference or frame data; `objects` only when
    /// there are objects.
    pub fn encode(&self) -> Result<Value, SchemaError> {
        let mut record = Record::new();

        if self.timestamp.is_some() || !self.streams.is_empty() || !self.data.is_empty() {
            let mut props = Record::new();

            if let Some(timestamp) = &self.timestamp {
                props.insert("timestamp".into(), Value::String(timestamp.to_string()));
            }

            if !self.streams.is_empty() {
                let streams = self
                    .streams
                    .iter()
                    .map(|(id, reference)| (id.to_string(), reference.encode()))
                    .collect();
                props.insert("streams".into(), Value::Object(streams));
            }

            if !self.data.is_empty() {
                let nums = self
                    .data
                    .values()
                    .map(|num| num.encode(self.uid))
                    .collect::<Result<Vec<_>, _>>()?;
                let mut frame_data = Record::new();
                frame_data.insert("num".into(), Value::Array(nums));
                props.insert("frame_data".into(), Value::Object(frame_data));
            }

            record.insert("frame_properties".into(), Value::Object(props));
        }

        if !self.objects.is_empty() {
            let mut objects = Record::new();
            for (id, data) in &self.objects {
                let mut object = Record::new();
                if !data.is_empty() {
                    object.insert("object_data".into(), data.encode()?);
                }
                objects.insert(id.to_string(), Value::Object(object));
            }
            record.insert("objects".into(), Value::Object(objects));
        }

        Ok(Value::Object(record))
    }

    fn duplicate_uid_warnings(&self) -> Vec<Warning> {
        let mut seen = BTreeSet::new();
        let mut warnings = Vec::new();
        let scope = format!("the frame {}", self.uid);

        // Uids are unique within one kind group of one object, so any repeat
        // here is either across kinds or across objects.
        for annotation in self.objects.values().flat_map(ObjectData::annotations) {
            let uid: &AnnotationId = annotation.uid();
            if !seen.insert(uid) {
                warnings.push(Warning::duplicate_annotation_uid(uid.as_str(), &scope));
            }
        }

        warnings
    }
}

/// A named number attached to a frame, e.g. the train speed.
#[derive(Clone, Debug, PartialEq)]
pub struct Num {
    pub name: String,
    pub val: f64,
    pub coordinate_system: Option<CoordinateSystemId>,
}

impl Num {
    pub fn new(name: impl Into<String>, val: f64) -> Self {
        Self {
            name: name.into(),
            val,
            coordinate_system: None,
        }
    }

    fn decode(
        value: &Value,
        resolver: &Resolver<'_>,
        frame: FrameId,
        warnings: &mut Vec<Warning>,
    ) -> Result<Self, SchemaError> {
        let ctx = frame.to_string();
        let ctx = Some(ctx.as_str());
        let record = as_record(value, "num", ctx)?;

        let name = required_string(record, "name", ctx)?;
        let val = required_f64(record, "val", ctx)?;
        let reference = optional_string(record, "coordinate_system", ctx)?;
        let coordinate_system = resolver.coordinate_system_or_warn(
            reference.as_deref(),
            &format!("the frame data {name} of the frame {frame}"),
            warnings,
        );

        Ok(Self {
            name,
            val,
            coordinate_system,
        })
    }

    fn encode(&self, frame: FrameId) -> Result<Value, SchemaError> {
        let ctx = frame.to_string();
        let mut record = Record::new();
        record.insert("name".into(), Value::String(self.name.clone()));
        record.insert("val".into(), number(self.val, "val", Some(ctx.as_str()))?);
        if let Some(coordinate_system) = &self.coordinate_system {
            record.insert(
                "coordinate_system".into(),
                Value::String(coordinate_system.to_string()),
            );
        }
        Ok(Value::Object(record))
    }
}
