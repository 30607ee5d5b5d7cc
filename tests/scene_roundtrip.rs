//! Integration tests for OpenLABEL scene files.

use std::path::Path;
use std::str::FromStr;

use raillabel::format::io_json::{from_scene_str, read_scene, to_scene_string, write_scene};
use raillabel::format::{
    AnnotationId, AnnotationRef, AttributeValue, CoordinateSystemId, FrameId, ObjectId, Point2d,
    StreamId, WarningCode, MODE_POLY2D_ABSOLUTE,
};
use raillabel::RaillabelError;
use rust_decimal::Decimal;

const PERSON: &str = "b1f5ebc8-0fb5-43ed-a3ff-3b9e1e7c3f2a";
const TRACK: &str = "6fe55546-0dd7-4e40-b6b4-bb7ea3445772";

fn fixture(name: &str) -> std::path::PathBuf {
    Path::new("tests/fixtures").join(name)
}

#[test]
fn reads_valid_scene_without_warnings() {
    let (scene, warnings) = read_scene(&fixture("scene_valid.json")).expect("read scene");

    assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
    assert_eq!(scene.metadata.schema_version, "1.0.0");
    assert_eq!(scene.metadata.subschema_version.as_deref(), Some("4.0.0"));
    assert_eq!(scene.coordinate_systems.len(), 3);
    assert_eq!(scene.streams.len(), 2);
    assert_eq!(scene.objects.len(), 2);
    assert_eq!(
        scene.frames.keys().copied().collect::<Vec<_>>(),
        vec![FrameId(12), FrameId(13)]
    );
}

#[test]
fn frame_properties_are_typed() {
    let (scene, _) = read_scene(&fixture("scene_valid.json")).expect("read scene");
    let frame = &scene.frames[&FrameId(12)];

    assert_eq!(
        frame.timestamp,
        Some(Decimal::from_str("1632321743.100000072").unwrap())
    );
    let lidar = &frame.streams[&StreamId::from("lidar")];
    assert_eq!(
        lidar.timestamp,
        Some(Decimal::from_str("1632321743.134149277").unwrap())
    );
    assert_eq!(
        lidar.uri.as_deref(),
        Some("/lidar_merged/012_1632321743.134149277.pcd")
    );

    let velocity = &frame.data["train_velocity"];
    assert_eq!(velocity.val, 7.5);
    assert_eq!(
        velocity.coordinate_system,
        Some(CoordinateSystemId::from("base"))
    );
}

#[test]
fn annotations_are_decoded_per_kind() {
    let (scene, _) = read_scene(&fixture("scene_valid.json")).expect("read scene");
    let frame = &scene.frames[&FrameId(12)];

    let person = &frame.objects[PERSON];
    let bbox = &person.bbox["78f0ad89-2750-4a30-9d66-44c9da73a714"];
    assert_eq!(bbox.pos, Point2d::new(2467.0, 1100.5));
    assert_eq!(
        bbox.base.uri.as_deref(),
        Some("/rgb_center/012_1632321743.100000072.png")
    );
    assert!(!bbox.base.attributes.contains_key("uri"));
    assert_eq!(
        bbox.base.attributes["occluded"],
        AttributeValue::Boolean(false)
    );
    assert_eq!(bbox.base.object, Some(ObjectId::from(PERSON)));

    let seg = &person.seg3d["a1e7b23d-9d0f-4a42-8b2d-9be5d8f5d0aa"];
    assert_eq!(seg.point_ids, vec![1024, 1025, 1030]);

    let track = &frame.objects[TRACK];
    let poly = &track.poly2d["3b6a1f0c-8e2d-4c55-9b0e-2b1b0c2d7e11"];
    assert_eq!(poly.points.len(), 2);
    assert!(!poly.closed);
    assert_eq!(poly.mode, MODE_POLY2D_ABSOLUTE);
    assert_eq!(
        poly.base.attributes["railSide"],
        AttributeValue::Text("leftRail".into())
    );
}

#[test]
fn frame_annotations_view_spans_objects() {
    let (scene, _) = read_scene(&fixture("scene_valid.json")).expect("read scene");
    let annotations = scene.frames[&FrameId(12)].annotations();

    assert_eq!(annotations.len(), 7);
    let cuboid = annotations[&AnnotationId::from("dd1d2e3c-7a89-4d6e-9e8a-3fde6a28dd32")];
    assert!(matches!(cuboid, AnnotationRef::Cuboid(_)));
    assert_eq!(cuboid.base().name, "lidar__cuboid__person_0000");
}

#[test]
fn file_roundtrip_is_lossless() {
    let (original, _) = read_scene(&fixture("scene_valid.json")).expect("read scene");

    let temp = tempfile::tempdir().expect("create temp dir");
    let path = temp.path().join("scene.json");
    write_scene(&path, &original).expect("write scene");

    let (restored, warnings) = read_scene(&path).expect("read written scene");
    assert!(warnings.is_empty());
    assert_eq!(restored, original);
}

#[test]
fn encode_is_idempotent() {
    let (scene, _) = read_scene(&fixture("scene_valid.json")).expect("read scene");

    let first = to_scene_string(&scene).expect("first encode");
    let (decoded, _) = from_scene_str(&first).expect("decode first");
    let second = to_scene_string(&decoded).expect("second encode");

    assert_eq!(first, second);
}

#[test]
fn warnings_are_collected_in_decode_order() {
    let (scene, warnings) = read_scene(&fixture("scene_warnings.json")).expect("read scene");

    let codes: Vec<WarningCode> = warnings.iter().map(|w| w.code).collect();
    assert_eq!(
        codes,
        vec![
            WarningCode::MissingCoordinateSystem,
            WarningCode::MissingStream,
            WarningCode::UnsupportedAnnotationType,
            WarningCode::MissingCoordinateSystem,
            WarningCode::MissingObject,
            WarningCode::DuplicateAnnotationUid,
        ]
    );
    assert!(warnings[0].message.contains("mount"));
    assert!(warnings[3].message.contains("csA"));

    let frame = &scene.frames[&FrameId(0)];
    assert!(frame.streams.is_empty());
    assert!(frame.objects.contains_key("o2"));
    assert_eq!(frame.objects["o1"].poly3d["a"].base.coordinate_system, None);
    assert_eq!(
        frame.annotations()[&AnnotationId::from("a")].base().name,
        "rail_right"
    );
}

#[test]
fn invalid_scene_names_the_field() {
    let err = read_scene(&fixture("scene_invalid.json")).expect_err("invalid scene");

    match err {
        RaillabelError::Schema { path, source } => {
            assert!(path.ends_with("scene_invalid.json"));
            assert_eq!(source.uid.as_deref(), Some("a"));
        }
        other => panic!("unexpected error: {other}"),
    }
}
