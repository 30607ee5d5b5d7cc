//! Geometric value types and their flat numeric-array wire form.
//!
//! OpenLABEL stores every geometry in a single `val` array of numbers; these
//! helpers repack such arrays into typed points and back. Nothing here
//! checks that values are sensible: a box may have a negative size and a
//! quaternion need not be normalised.

use serde_json::Value;

use super::record::numbers;
use crate::error::SchemaError;

/// A point in 2D image space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point2d {
    pub x: f64,
    pub y: f64,
}

impl Point2d {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A point in 3D space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point3d {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3d {
    #[inline]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Extent of a 2D shape.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size2d {
    pub x: f64,
    pub y: f64,
}

impl Size2d {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Extent of a 3D shape.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size3d {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Size3d {
    #[inline]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// A rotation quaternion in (x, y, z, w) order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quaternion {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Quaternion {
    #[inline]
    pub fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }
}

/// Checks that a flat array has exactly `len` elements.
pub fn expect_len(values: &[f64], len: usize, field: &str, uid: Option<&str>) -> Result<(), SchemaError> {
    if values.len() == len {
        Ok(())
    } else {
        Err(SchemaError::invalid(
            field,
            uid,
            format!("expected {len} numbers, found {}", values.len()),
        ))
    }
}

fn expect_multiple_of(
    values: &[f64],
    arity: usize,
    field: &str,
    uid: Option<&str>,
) -> Result<(), SchemaError> {
    if values.len() % arity == 0 {
        Ok(())
    } else {
        Err(SchemaError::invalid(
            field,
            uid,
            format!(
                "length {} is not a multiple of the point arity {arity}",
                values.len()
            ),
        ))
    }
}

/// Repacks `[x0, y0, x1, y1, ...]` into 2D points.
pub fn points2d_from_flat(
    values: &[f64],
    field: &str,
    uid: Option<&str>,
) -> Result<Vec<Point2d>, SchemaError> {
    expect_multiple_of(values, 2, field, uid)?;
    Ok(values
        .chunks_exact(2)
        .map(|c| Point2d::new(c[0], c[1]))
        .collect())
}

/// Repacks `[x0, y0, z0, x1, ...]` into 3D points.
pub fn points3d_from_flat(
    values: &[f64],
    field: &str,
    uid: Option<&str>,
) -> Result<Vec<Point3d>, SchemaError> {
    expect_multiple_of(values, 3, field, uid)?;
    Ok(values
        .chunks_exact(3)
        .map(|c| Point3d::new(c[0], c[1], c[2]))
        .collect())
}

/// Flattens 2D points back into `[x0, y0, x1, y1, ...]`.
pub fn points2d_to_flat(points: &[Point2d], field: &str, uid: Option<&str>) -> Result<Value, SchemaError> {
    numbers(points.iter().flat_map(|p| [p.x, p.y]), field, uid)
}

/// Flattens 3D points back into `[x0, y0, z0, x1, ...]`.
pub fn points3d_to_flat(points: &[Point3d], field: &str, uid: Option<&str>) -> Result<Value, SchemaError> {
    numbers(points.iter().flat_map(|p| [p.x, p.y, p.z]), field, uid)
}
