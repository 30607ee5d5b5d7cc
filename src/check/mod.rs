//! Scene checks.
//!
//! Decoding already does the work: this module only summarizes what was
//! decoded and collects the warnings into a report.

mod report;

pub use report::{CheckReport, SummarySection};

use crate::format::{Scene, Warning};

/// Builds a report for a decoded scene and the warnings its decode produced.
pub fn check_scene(scene: &Scene, warnings: Vec<Warning>) -> CheckReport {
    CheckReport {
        summary: summarize(scene),
        warnings,
    }
}

fn summarize(scene: &Scene) -> SummarySection {
    let mut summary = SummarySection {
        frames: scene.frames.len(),
        objects: scene.objects.len(),
        coordinate_systems: scene.coordinate_systems.len(),
        streams: scene.streams.len(),
        ..Default::default()
    };

    let annotations = scene
        .frames
        .values()
        .flat_map(|frame| frame.objects.values())
        .flat_map(|data| data.annotations());

    for annotation in annotations {
        summary.annotations += 1;
        *summary
            .annotations_by_kind
            .entry(annotation.kind().key().to_string())
            .or_insert(0) += 1;
    }

    summary
}
