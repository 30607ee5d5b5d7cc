//! Check report types.
//!
//! A [`CheckReport`] summarizes a decoded scene and carries the warnings
//! produced while decoding it. It renders as text through `Display` and as
//! JSON through `Serialize`.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::format::Warning;

/// The result of checking an OpenLABEL file.
#[derive(Clone, Debug, Serialize)]
pub struct CheckReport {
    /// Entity counts of the decoded scene.
    pub summary: SummarySection,
    /// Warnings in decode order.
    pub warnings: Vec<Warning>,
}

impl CheckReport {
    /// Returns the number of warnings in the report.
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// Returns true if decoding produced no warnings.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Entity counts of a scene.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SummarySection {
    pub frames: usize,
    pub objects: usize,
    pub coordinate_systems: usize,
    pub streams: usize,
    /// Annotations summed over every frame and object.
    pub annotations: usize,
    /// Annotation counts keyed by their `object_data` key.
    pub annotations_by_kind: BTreeMap<String, usize>,
}

impl fmt::Display for CheckReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = &self.summary;

        writeln!(f, "Scene summary:")?;
        writeln!(f, "  frames:             {}", summary.frames)?;
        writeln!(f, "  objects:            {}", summary.objects)?;
        writeln!(f, "  coordinate systems: {}", summary.coordinate_systems)?;
        writeln!(f, "  streams:            {}", summary.streams)?;
        writeln!(f, "  annotations:        {}", summary.annotations)?;
        for (kind, count) in &summary.annotations_by_kind {
            writeln!(f, "    {kind:<10} {count}")?;
        }
        writeln!(f)?;

        if self.warnings.is_empty() {
            return writeln!(f, "Check passed: no warnings");
        }

        writeln!(f, "Check completed with {} warning(s):", self.warning_count())?;
        writeln!(f)?;
        for warning in &self.warnings {
            writeln!(f, "  [WARN] {:?}: {}", warning.code, warning)?;
        }

        Ok(())
    }
}
