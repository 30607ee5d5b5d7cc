//! Reading and writing OpenLABEL JSON files.
//!
//! These helpers only move text and bytes; every typed step goes through
//! [`Scene::decode`] and [`Scene::encode`]. Decoding returns the warnings
//! next to the scene so callers decide whether they are acceptable.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde_json::Value;

use super::scene::Scene;
use super::warning::Warning;
use crate::error::RaillabelError;

/// Reads a scene from an OpenLABEL JSON file.
///
/// # Errors
/// Returns an error if the file cannot be read, is not JSON, or does not
/// hold a valid OpenLABEL scene.
pub fn read_scene(path: &Path) -> Result<(Scene, Vec<Warning>), RaillabelError> {
    let file = File::open(path).map_err(RaillabelError::Io)?;
    let reader = BufReader::new(file);

    let value: Value =
        serde_json::from_reader(reader).map_err(|source| RaillabelError::JsonParse {
            path: path.to_path_buf(),
            source,
        })?;

    let (scene, warnings) = Scene::decode(&value).map_err(|source| RaillabelError::Schema {
        path: path.to_path_buf(),
        source,
    })?;

    log::debug!(
        "read {}: {} frame(s), {} warning(s)",
        path.display(),
        scene.frames.len(),
        warnings.len()
    );

    Ok((scene, warnings))
}

/// Writes a scene to a pretty-printed OpenLABEL JSON file.
///
/// # Errors
/// Returns an error if the scene cannot be encoded or the file cannot be
/// written.
pub fn write_scene(path: &Path, scene: &Scene) -> Result<(), RaillabelError> {
    let value = scene.encode().map_err(|source| RaillabelError::Schema {
        path: path.to_path_buf(),
        source,
    })?;

    let file = File::create(path).map_err(RaillabelError::Io)?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, &value).map_err(|source| {
        RaillabelError::JsonWrite {
            path: path.to_path_buf(),
            source,
        }
    })?;
    writer.flush()?;

    log::debug!("wrote {}: {} frame(s)", path.display(), scene.frames.len());
    Ok(())
}

/// Decodes a scene from a JSON string.
///
/// Useful for testing without file I/O.
pub fn from_scene_str(json: &str) -> Result<(Scene, Vec<Warning>), RaillabelError> {
    let value: Value = serde_json::from_str(json)?;
    Ok(Scene::decode(&value)?)
}

/// Decodes a scene from raw bytes.
pub fn from_scene_slice(bytes: &[u8]) -> Result<(Scene, Vec<Warning>), RaillabelError> {
    let value: Value = serde_json::from_slice(bytes)?;
    Ok(Scene::decode(&value)?)
}

/// Encodes a scene to a pretty-printed JSON string.
pub fn to_scene_string(scene: &Scene) -> Result<String, RaillabelError> {
    let value = scene.encode()?;
    Ok(serde_json::to_string_pretty(&value)?)
}
