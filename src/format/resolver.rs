//! Resolution of textual references against the scene's declared entities.
//!
//! The resolver never creates entities. A reference that names nothing is
//! reported as `None`; the call site turns that into a [`Warning`] and
//! leaves the reference unset.

use std::borrow::Borrow;
use std::collections::BTreeMap;

use super::warning::Warning;
use super::{CoordinateSystem, CoordinateSystemId, Object, ObjectId, Stream, StreamId};

static NO_COORDINATE_SYSTEMS: BTreeMap<CoordinateSystemId, CoordinateSystem> = BTreeMap::new();
static NO_STREAMS: BTreeMap<StreamId, Stream> = BTreeMap::new();
static NO_OBJECTS: BTreeMap<ObjectId, Object> = BTreeMap::new();

/// Looks `name` up in `mapping`, returning the stored key and entity.
pub fn resolve<'m, K, V>(name: &str, mapping: &'m BTreeMap<K, V>) -> Option<(&'m K, &'m V)>
where
    K: Borrow<str> + Ord,
{
    mapping.get_key_value(name)
}

/// Read-only view of the entities that annotations and frames may refer to.
///
/// The borrowed maps must stay untouched for as long as a decode runs,
/// which the borrow checker enforces.
#[derive(Clone, Copy, Debug)]
pub struct Resolver<'a> {
    coordinate_systems: &'a BTreeMap<CoordinateSystemId, CoordinateSystem>,
    streams: &'a BTreeMap<StreamId, Stream>,
    objects: &'a BTreeMap<ObjectId, Object>,
}

impl<'a> Resolver<'a> {
    pub fn new(
        coordinate_systems: &'a BTreeMap<CoordinateSystemId, CoordinateSystem>,
        streams: &'a BTreeMap<StreamId, Stream>,
        objects: &'a BTreeMap<ObjectId, Object>,
    ) -> Self {
        Self {
            coordinate_systems,
            streams,
            objects,
        }
    }

    /// A resolver that only knows coordinate systems, enough for decoding
    /// single annotations.
    pub fn with_coordinate_systems(
        coordinate_systems: &'a BTreeMap<CoordinateSystemId, CoordinateSystem>,
    ) -> Self {
        Self::new(coordinate_systems, &NO_STREAMS, &NO_OBJECTS)
    }

    pub fn coordinate_system(&self, name: &str) -> Option<&'a CoordinateSystemId> {
        resolve(name, self.coordinate_systems).map(|(id, _)| id)
    }

    pub fn stream(&self, name: &str) -> Option<&'a StreamId> {
        resolve(name, self.streams).map(|(id, _)| id)
    }

    pub fn object(&self, id: &str) -> Option<&'a ObjectId> {
        resolve(id, self.objects).map(|(id, _)| id)
    }

    /// Resolves an optional coordinate system reference. Empty names count
    /// as absent; unknown names add a warning and resolve to `None`.
    pub fn coordinate_system_or_warn(
        &self,
        name: Option<&str>,
        referrer: &str,
        warnings: &mut Vec<Warning>,
    ) -> Option<CoordinateSystemId> {
        let name = name.filter(|name| !name.is_empty())?;
        match self.coordinate_system(name) {
            Some(id) => Some(id.clone()),
            None => {
                warnings.push(Warning::missing_coordinate_system(name, referrer));
                None
            }
        }
    }
}

impl Default for Resolver<'static> {
    fn default() -> Self {
        Self::new(&NO_COORDINATE_SYSTEMS, &NO_STREAMS, &NO_OBJECTS)
    }
}
