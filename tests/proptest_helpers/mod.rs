#![allow(dead_code)]

use std::collections::BTreeMap;

use proptest::collection::{btree_map, vec};
use proptest::option;
use proptest::prelude::*;
use proptest::strategy::BoxedStrategy;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};
use raillabel::format::{
    AnnotationBase, AttributeValue, Attributes, Bbox, CoordinateSystem, Cuboid, Frame, FrameId,
    Keypoint2d, Keypoint3d, Metadata, Num, Object, ObjectData, Point2d, Point3d, Poly2d, Poly3d,
    Pose, Quaternion, Scene, Seg3d, Size2d, Size3d, Stream, StreamReference,
};
use rust_decimal::Decimal;

/// Coordinate systems every generated scene declares.
pub const COORDINATE_SYSTEMS: [&str; 3] = ["base", "lidar", "rgb_center"];

/// Streams every generated scene declares.
pub const STREAMS: [&str; 2] = ["lidar", "rgb_center"];

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

/// Finite coordinates on a quarter grid, so they survive a trip through
/// JSON text unchanged.
pub fn arb_coord() -> BoxedStrategy<f64> {
    (-400_000i32..400_000).prop_map(|v| f64::from(v) / 4.0).boxed()
}

/// Timestamps between 2020 and 2023 with nanosecond precision.
pub fn arb_timestamp() -> BoxedStrategy<Decimal> {
    (1_577_836_800_000_000_000i64..1_672_531_200_000_000_000)
        .prop_map(|nanos| Decimal::new(nanos, 9))
        .boxed()
}

pub fn arb_attribute_value() -> BoxedStrategy<AttributeValue> {
    prop_oneof![
        any::<bool>().prop_map(AttributeValue::Boolean),
        arb_coord().prop_map(AttributeValue::Num),
        "[a-zA-Z0-9_ ]{0,12}".prop_map(AttributeValue::Text),
        vec(arb_coord(), 0..4).prop_map(AttributeValue::Vec),
    ]
    .boxed()
}

pub fn arb_attributes() -> BoxedStrategy<Attributes> {
    btree_map("attr_[a-z]{1,6}", arb_attribute_value(), 0..4).boxed()
}

fn arb_coordinate_system_ref() -> BoxedStrategy<Option<String>> {
    option::of(proptest::sample::select(COORDINATE_SYSTEMS.to_vec()).prop_map(str::to_string))
        .boxed()
}

/// The parts of an annotation base that are not derived from its position.
#[derive(Clone, Debug)]
pub struct BaseSeed {
    pub name: String,
    pub coordinate_system: Option<String>,
    pub attributes: Attributes,
    pub uri: Option<String>,
}

fn arb_base_seed() -> BoxedStrategy<BaseSeed> {
    (
        "[a-z_]{1,16}",
        arb_coordinate_system_ref(),
        arb_attributes(),
        option::of("/[a-z_]{1,8}/[0-9]{3}\\.png"),
    )
        .prop_map(|(name, coordinate_system, attributes, uri)| BaseSeed {
            name,
            coordinate_system,
            attributes,
            uri,
        })
        .boxed()
}

fn base_from_seed(seed: BaseSeed, uid: String, object: &str) -> AnnotationBase {
    let mut base = AnnotationBase::new(uid, seed.name).with_object(object);
    base.coordinate_system = seed.coordinate_system.map(Into::into);
    base.attributes = seed.attributes;
    base.uri = seed.uri;
    base
}

/// One annotation of any kind, still without uid and owner.
#[derive(Clone, Debug)]
pub enum AnnotationSeed {
    Bbox(BaseSeed, Point2d, Size2d),
    Cuboid(BaseSeed, Point3d, Quaternion, Size3d),
    Point2d(BaseSeed, Point2d),
    Point3d(BaseSeed, Point3d),
    Poly2d(BaseSeed, Vec<Point2d>, bool),
    Poly3d(BaseSeed, Vec<Point3d>, bool),
    Seg3d(BaseSeed, Vec<u64>),
}

fn arb_point2d() -> BoxedStrategy<Point2d> {
    (arb_coord(), arb_coord())
        .prop_map(|(x, y)| Point2d::new(x, y))
        .boxed()
}

fn arb_point3d() -> BoxedStrategy<Point3d> {
    (arb_coord(), arb_coord(), arb_coord())
        .prop_map(|(x, y, z)| Point3d::new(x, y, z))
        .boxed()
}

fn arb_annotation_seed() -> BoxedStrategy<AnnotationSeed> {
    prop_oneof![
        (arb_base_seed(), arb_point2d(), arb_point2d())
            .prop_map(|(b, pos, s)| AnnotationSeed::Bbox(b, pos, Size2d::new(s.x, s.y))),
        (arb_base_seed(), arb_point3d(), arb_point3d(), arb_point3d(), arb_coord()).prop_map(
            |(b, pos, q, s, w)| {
                AnnotationSeed::Cuboid(
                    b,
                    pos,
                    Quaternion::new(q.x, q.y, q.z, w),
                    Size3d::new(s.x, s.y, s.z),
                )
            }
        ),
        (arb_base_seed(), arb_point2d()).prop_map(|(b, p)| AnnotationSeed::Point2d(b, p)),
        (arb_base_seed(), arb_point3d()).prop_map(|(b, p)| AnnotationSeed::Point3d(b, p)),
        (arb_base_seed(), vec(arb_point2d(), 0..6), any::<bool>())
            .prop_map(|(b, p, c)| AnnotationSeed::Poly2d(b, p, c)),
        (arb_base_seed(), vec(arb_point3d(), 0..6), any::<bool>())
            .prop_map(|(b, p, c)| AnnotationSeed::Poly3d(b, p, c)),
        (arb_base_seed(), vec(0u64..1_000_000, 0..8))
            .prop_map(|(b, ids)| AnnotationSeed::Seg3d(b, ids)),
    ]
    .boxed()
}

fn insert_annotation(data: &mut ObjectData, seed: AnnotationSeed, uid: String) {
    let object = data.object.to_string();
    match seed {
        AnnotationSeed::Bbox(b, pos, size) => {
            let base = base_from_seed(b, uid.clone(), &object);
            data.bbox.insert(uid.into(), Bbox::new(base, pos, size));
        }
        AnnotationSeed::Cuboid(b, pos, quat, size) => {
            let base = base_from_seed(b, uid.clone(), &object);
            data.cuboid
                .insert(uid.into(), Cuboid::new(base, pos, quat, size));
        }
        AnnotationSeed::Point2d(b, point) => {
            let base = base_from_seed(b, uid.clone(), &object);
            data.point2d.insert(uid.into(), Keypoint2d::new(base, point));
        }
        AnnotationSeed::Point3d(b, point) => {
            let base = base_from_seed(b, uid.clone(), &object);
            data.point3d.insert(uid.into(), Keypoint3d::new(base, point));
        }
        AnnotationSeed::Poly2d(b, points, closed) => {
            let base = base_from_seed(b, uid.clone(), &object);
            data.poly2d
                .insert(uid.into(), Poly2d::new(base, points, closed));
        }
        AnnotationSeed::Poly3d(b, points, closed) => {
            let base = base_from_seed(b, uid.clone(), &object);
            data.poly3d
                .insert(uid.into(), Poly3d::new(base, points, closed));
        }
        AnnotationSeed::Seg3d(b, ids) => {
            let base = base_from_seed(b, uid.clone(), &object);
            data.seg3d.insert(uid.into(), Seg3d::new(base, ids));
        }
    }
}

/// Everything needed to build one frame.
#[derive(Clone, Debug)]
pub struct FrameSeed {
    pub timestamp: Option<Decimal>,
    pub streams: Vec<(bool, Option<Decimal>, Option<String>)>,
    pub data: BTreeMap<String, (f64, Option<String>)>,
    pub objects: Vec<Vec<AnnotationSeed>>,
}

fn arb_frame_seed(max_objects: usize, max_annotations: usize) -> BoxedStrategy<FrameSeed> {
    let stream_ref = (
        any::<bool>(),
        option::of(arb_timestamp()),
        option::of("/[a-z]{1,8}/[0-9]{3}\\.pcd"),
    );

    (
        option::of(arb_timestamp()),
        vec(stream_ref, STREAMS.len()),
        btree_map("[a-z_]{1,10}", (arb_coord(), arb_coordinate_system_ref()), 0..3),
        vec(vec(arb_annotation_seed(), 0..=max_annotations), 0..=max_objects),
    )
        .prop_map(|(timestamp, streams, data, objects)| FrameSeed {
            timestamp,
            streams,
            data,
            objects,
        })
        .boxed()
}

fn build_frame(uid: u64, seed: FrameSeed) -> Frame {
    let mut frame = Frame::new(FrameId(uid));
    frame.timestamp = seed.timestamp;

    for (name, (present, timestamp, uri)) in STREAMS.iter().zip(seed.streams) {
        if !present {
            continue;
        }
        let mut reference = StreamReference::new(*name);
        reference.timestamp = timestamp;
        reference.uri = uri;
        frame.streams.insert((*name).into(), reference);
    }

    for (name, (val, coordinate_system)) in seed.data {
        let mut num = Num::new(name.clone(), val);
        num.coordinate_system = coordinate_system.map(Into::into);
        frame.data.insert(name, num);
    }

    for (object_index, annotations) in seed.objects.into_iter().enumerate() {
        let object = object_id(object_index);
        let mut data = ObjectData::new(object.as_str());
        for (index, annotation) in annotations.into_iter().enumerate() {
            let uid = format!("{uid}-{object_index}-{index}");
            insert_annotation(&mut data, annotation, uid);
        }
        frame.objects.insert(object.into(), data);
    }

    frame
}

fn object_id(index: usize) -> String {
    format!("object-{index:04}")
}

/// A scene whose references all resolve, so decode yields no warnings.
///
/// Frame uids are drawn sparsely so that frame intervals have gaps.
pub fn arb_scene(max_frames: usize, max_objects: usize, max_annotations: usize) -> BoxedStrategy<Scene> {
    (
        "[0-9]\\.[0-9]\\.[0-9]",
        option::of("[a-z_]{1,12}"),
        btree_map(0u64..64, arb_frame_seed(max_objects, max_annotations), 0..=max_frames),
        option::of(arb_point3d()),
    )
        .prop_map(move |(schema_version, name, frames, translation)| {
            let mut metadata = Metadata::new(schema_version);
            metadata.name = name;

            let mut scene = Scene::new(metadata);

            let mut base = CoordinateSystem::new("local");
            base.children = vec!["lidar".into(), "rgb_center".into()];
            scene.coordinate_systems.insert("base".into(), base);
            for sensor in &COORDINATE_SYSTEMS[1..] {
                let mut cs = CoordinateSystem::new("sensor").with_parent("base");
                if let Some(translation) = translation {
                    cs = cs.with_pose(Pose::new(translation, Quaternion::default()));
                }
                scene.coordinate_systems.insert((*sensor).into(), cs);
            }

            for stream in STREAMS {
                scene.streams.insert(stream.into(), Stream::new(stream));
            }

            for index in 0..max_objects {
                scene
                    .objects
                    .insert(object_id(index).into(), Object::new(format!("track_{index:04}"), "track"));
            }

            for (uid, seed) in frames {
                scene.frames.insert(FrameId(uid), build_frame(uid, seed));
            }

            scene
        })
        .boxed()
}
