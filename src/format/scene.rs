//! The root of an OpenLABEL file.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use super::frame::Frame;
use super::object::{Metadata, Object};
use super::record::{as_record, deserialize, serialize, Record};
use super::resolver::Resolver;
use super::warning::Warning;
use super::{CoordinateSystem, CoordinateSystemId, FrameId, ObjectId, Stream, StreamId};
use crate::error::SchemaError;

/// A complete annotation file.
///
/// Scene-level sections are decoded first so that frames can resolve their
/// references against them.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub metadata: Metadata,
    pub coordinate_systems: BTreeMap<CoordinateSystemId, CoordinateSystem>,
    pub streams: BTreeMap<StreamId, Stream>,
    pub objects: BTreeMap<ObjectId, Object>,
    pub frames: BTreeMap<FrameId, Frame>,
}

/// An inclusive run of consecutive frame uids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct FrameInterval {
    pub frame_start: u64,
    pub frame_end: u64,
}

impl FrameInterval {
    /// Number of frames covered by the interval.
    pub fn frame_count(&self) -> u64 {
        self.frame_end - self.frame_start + 1
    }
}

impl Scene {
    /// Creates a scene with the given metadata and nothing else.
    pub fn new(metadata: Metadata) -> Self {
        Self {
            metadata,
            coordinate_systems: BTreeMap::new(),
            streams: BTreeMap::new(),
            objects: BTreeMap::new(),
            frames: BTreeMap::new(),
        }
    }

    /// Resolver over this scene's declared entities.
    pub fn resolver(&self) -> Resolver<'_> {
        Resolver::new(&self.coordinate_systems, &self.streams, &self.objects)
    }

    /// Maximal runs of consecutive frame uids, in ascending order.
    pub fn frame_intervals(&self) -> Vec<FrameInterval> {
        let mut intervals: Vec<FrameInterval> = Vec::new();

        for uid in self.frames.keys() {
            let uid = uid.as_u64();
            match intervals.last_mut() {
                Some(last) if last.frame_end.checked_add(1) == Some(uid) => last.frame_end = uid,
                _ => intervals.push(FrameInterval {
                    frame_start: uid,
                    frame_end: uid,
                }),
            }
        }

        intervals
    }

    /// Decodes a whole `{"openlabel": {...}}` document.
    pub fn decode(value: &Value) -> Result<(Self, Vec<Warning>), SchemaError> {
        let root = as_record(value, "openlabel", None)?;
        let openlabel = root
            .get("openlabel")
            .ok_or_else(|| SchemaError::missing("openlabel", None))?;
        let record = as_record(openlabel, "openlabel", None)?;

        let metadata = record
            .get("metadata")
            .ok_or_else(|| SchemaError::missing("metadata", None))?;
        if as_record(metadata, "metadata", None)?.get("schema_version").is_none() {
            return Err(SchemaError::missing("schema_version", None));
        }

        let mut scene = Scene::new(deserialize(metadata, "metadata", None)?);
        let mut warnings = Vec::new();

        scene.coordinate_systems = decode_section(record, "coordinate_systems")?;
        scene.streams = decode_section(record, "streams")?;
        scene.objects = decode_section(record, "objects")?;

        for (name, coordinate_system) in &scene.coordinate_systems {
            if let Some(parent) = coordinate_system.parent() {
                if !scene.coordinate_systems.contains_key(parent) {
                    warnings.push(Warning::missing_coordinate_system(
                        parent,
                        &format!("the parent of the coordinate system {name}"),
                    ));
                }
            }
        }

        if let Some(frames) = record.get("frames") {
            let resolver = scene.resolver();
            let mut decoded = BTreeMap::new();

            for (key, frame) in as_record(frames, "frames", None)? {
                let uid = key.parse::<u64>().map_err(|_| {
                    SchemaError::invalid("frames", Some(key.as_str()), "frame keys must be non-negative integers")
                })?;
                if decoded.contains_key(&FrameId(uid)) {
                    return Err(SchemaError::invalid(
                        "frames",
                        Some(key.as_str()),
                        format!("frame key names the frame {uid} a second time"),
                    ));
                }
                let (frame, frame_warnings) = Frame::decode(FrameId(uid), frame, &resolver)?;
                warnings.extend(frame_warnings);
                decoded.insert(frame.uid, frame);
            }

            scene.frames = decoded;
        }

        log::debug!(
            "decoded scene: {} frame(s), {} object(s), {} warning(s)",
            scene.frames.len(),
            scene.objects.len(),
            warnings.len()
        );

        Ok((scene, warnings))
    }

    /// Encodes the scene. Empty sections are omitted and `frame_intervals`
    /// is derived from the frame uids.
    pub fn encode(&self) -> Result<Value, SchemaError> {
        let mut record = Record::new();
        record.insert("metadata".into(), serialize(&self.metadata, "metadata", None)?);

        for (name, coordinate_system) in &self.coordinate_systems {
            coordinate_system.check_encodable(name.as_str())?;
        }
        encode_section(&mut record, "coordinate_systems", &self.coordinate_systems)?;
        encode_section(&mut record, "streams", &self.streams)?;
        encode_section(&mut record, "objects", &self.objects)?;

        if !self.frames.is_empty() {
            let mut frames = Record::new();
            for (uid, frame) in &self.frames {
                frames.insert(uid.to_string(), frame.encode()?);
            }
            record.insert("frames".into(), Value::Object(frames));
            record.insert(
                "frame_intervals".into(),
                serialize(&self.frame_intervals(), "frame_intervals", None)?,
            );
        }

        let mut root = Record::new();
        root.insert("openlabel".into(), Value::Object(record));
        Ok(Value::Object(root))
    }
}

fn decode_section<K, V>(record: &Record, section: &str) -> Result<BTreeMap<K, V>, SchemaError>
where
    K: From<String> + Ord,
    V: serde::de::DeserializeOwned,
{
    let Some(value) = record.get(section) else {
        return Ok(BTreeMap::new());
    };

    as_record(value, section, None)?
        .iter()
        .map(|(key, entry)| {
            let entry: V = deserialize(entry, section, Some(key.as_str()))?;
            Ok((K::from(key.clone()), entry))
        })
        .collect::<Result<BTreeMap<K, V>, SchemaError>>()
}

fn encode_section<K, V>(
    record: &mut Record,
    section: &str,
    entries: &BTreeMap<K, V>,
) -> Result<(), SchemaError>
where
    K: std::fmt::Display,
    V: Serialize,
{
    if entries.is_empty() {
        return Ok(());
    }

    let mut encoded = Record::new();
    for (key, entry) in entries {
        let key = key.to_string();
        let value = serialize(entry, section, Some(key.as_str()))?;
        encoded.insert(key, value);
    }
    record.insert(section.into(), Value::Object(encoded));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{Point3d, Pose, Quaternion, WarningCode};
    use serde_json::json;

    fn document() -> Value {
        json!({"openlabel": {
            "metadata": {"schema_version": "1.0.0", "subschema_version": "4.0.0", "project": "osdar"},
            "coordinate_systems": {
                "base": {"type": "local", "parent": "", "children": ["lidar"]},
                "lidar": {
                    "type": "sensor", "parent": "base", "children": [],
                    "pose_wrt_parent": {"translation": [0, 0, 2], "quaternion": [0, 0, 0, 1]}
                },
                "radar": {"type": "sensor", "parent": "mount", "children": []}
            },
            "streams": {"lidar": {"type": "lidar", "uri": "/lidar"}},
            "objects": {"o1": {"name": "person_0001", "type": "person"}},
            "frames": {
                "0": {"objects": {"o1": {"object_data": {"point3d": [
                    {"uid": "k1", "name": "head", "val": [1, 2, 3], "coordinate_system": "lidar"}
                ]}}}},
                "1": {},
                "5": {}
            },
            "frame_intervals": [{"frame_start": 99, "frame_end": 100}]
        }})
    }

    #[test]
    fn decodes_sections_and_resolves_frames() {
        let (scene, warnings) = Scene::decode(&document()).unwrap();

        assert_eq!(scene.metadata.schema_version, "1.0.0");
        assert_eq!(scene.metadata.additional["project"], json!("osdar"));
        assert_eq!(scene.coordinate_systems.len(), 3);
        assert_eq!(scene.streams["lidar"].uri.as_deref(), Some("/lidar"));
        assert_eq!(scene.frames.len(), 3);

        let keypoint = &scene.frames[&FrameId(0)].objects["o1"].point3d["k1"];
        assert_eq!(keypoint.point, Point3d::new(1.0, 2.0, 3.0));
        assert_eq!(
            keypoint.base.coordinate_system,
            Some(CoordinateSystemId::from("lidar"))
        );

        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].code, WarningCode::MissingCoordinateSystem);
        assert!(warnings[0].message.contains("mount"));
    }

    #[test]
    fn missing_metadata_is_fatal() {
        let err = Scene::decode(&json!({"openlabel": {}})).expect_err("no metadata");
        assert_eq!(err.field, "metadata");

        let err = Scene::decode(&json!({"openlabel": {"metadata": {}}})).expect_err("no version");
        assert_eq!(err.field, "schema_version");

        let err = Scene::decode(&json!({"metadata": {}})).expect_err("no root");
        assert_eq!(err.field, "openlabel");
    }

    #[test]
    fn non_integer_frame_key_is_fatal() {
        let value = json!({"openlabel": {
            "metadata": {"schema_version": "1.0.0"},
            "frames": {"first": {}}
        }});
        let err = Scene::decode(&value).expect_err("bad frame key");
        assert_eq!(err.field, "frames");
        assert_eq!(err.uid.as_deref(), Some("first"));
    }

    #[test]
    fn colliding_frame_keys_are_fatal() {
        let value = json!({"openlabel": {
            "metadata": {"schema_version": "1.0.0"},
            "frames": {"07": {}, "7": {}}
        }});
        let err = Scene::decode(&value).expect_err("two keys for frame 7");
        assert_eq!(err.field, "frames");
        assert_eq!(err.uid.as_deref(), Some("7"));
    }

    #[test]
    fn frame_intervals_are_derived_not_read() {
        let (scene, _) = Scene::decode(&document()).unwrap();
        assert_eq!(
            scene.frame_intervals(),
            vec![
                FrameInterval { frame_start: 0, frame_end: 1 },
                FrameInterval { frame_start: 5, frame_end: 5 },
            ]
        );

        let encoded = scene.encode().unwrap();
        assert_eq!(
            encoded["openlabel"]["frame_intervals"],
            json!([{"frame_start": 0, "frame_end": 1}, {"frame_start": 5, "frame_end": 5}])
        );
        assert_eq!(scene.frame_intervals()[0].frame_count(), 2);
    }

    #[test]
    fn roundtrip_preserves_scene() {
        let (scene, _) = Scene::decode(&document()).unwrap();
        let (decoded, _) = Scene::decode(&scene.encode().unwrap()).unwrap();
        assert_eq!(decoded, scene);
    }

    #[test]
    fn empty_sections_are_omitted() {
        let scene = Scene::new(Metadata::new("1.0.0"));
        let encoded = scene.encode().unwrap();
        assert_eq!(encoded, json!({"openlabel": {"metadata": {"schema_version": "1.0.0"}}}));
    }

    #[test]
    fn non_finite_pose_fails_encode() {
        let mut scene = Scene::new(Metadata::new("1.0.0"));
        scene.coordinate_systems.insert(
            "lidar".into(),
            CoordinateSystem::new("sensor").with_pose(Pose::new(
                Point3d::new(f64::NAN, 0.0, 0.0),
                Quaternion::default(),
            )),
        );
        let err = scene.encode().expect_err("nan pose");
        assert_eq!(err.field, "pose_wrt_parent");
        assert_eq!(err.uid.as_deref(), Some("lidar"));
    }
}
