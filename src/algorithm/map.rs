//! Precomputed table of legal neighbours for every tile and face

use tracing::debug;

use crate::algorithm::compatibility::check_compatibility;
use crate::io::error::{AssemblyError, Result};
use crate::spatial::face::Face;
use crate::spatial::tiles::{TileId, TileRegistry};

/// A tile, turned by `rotation`, that may sit on a given face of another tile
///
/// Equality is exact on the rotation value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompatibilityEntry {
    /// Candidate tile
    pub tile: TileId,
    /// Counter-clockwise rotation in degrees, relative to the anchor tile
    pub rotation: f32,
}

impl CompatibilityEntry {
    /// Create an entry
    pub const fn new(tile: TileId, rotation: f32) -> Self {
        Self { tile, rotation }
    }
}

/// Read-only lookup from (tile, face) to the entries that fit there
///
/// Built once from a registry; rows are indexed by [`TileId`] and columns by
/// [`Face::index`].
#[derive(Debug, Clone)]
pub struct CompatibilityMap {
    rows: Vec<[Vec<CompatibilityEntry>; 4]>,
}

impl CompatibilityMap {
    /// Run the compatibility checker for every ordered tile pair and face
    ///
    /// Entry order follows registry order of the candidate tile, then the
    /// order in which the checker reports rotations.
    ///
    /// # Errors
    ///
    /// Returns any authoring error found while re-validating the prototypes,
    /// or `TileSizeMismatch` if two tiles cannot be compared.
    pub fn build(registry: &TileRegistry) -> Result<Self> {
        for (_, prototype) in registry.iter() {
            prototype.validate()?;
        }

        let mut rows = Vec::with_capacity(registry.len());
        for (_, tile_a) in registry.iter() {
            let mut faces: [Vec<CompatibilityEntry>; 4] = Default::default();
            for (entries, face) in faces.iter_mut().zip(Face::ALL) {
                for (id_b, tile_b) in registry.iter() {
                    for rotation in check_compatibility(tile_a, tile_b, face)? {
                        entries.push(CompatibilityEntry::new(id_b, rotation));
                    }
                }
            }
            rows.push(faces);
        }

        let map = Self { rows };
        debug!(
            tiles = map.tile_count(),
            entries = map.entry_count(),
            "Built compatibility map"
        );
        Ok(map)
    }

    /// Entries that fit on `face` of `tile`, or `None` when nothing fits
    ///
    /// # Errors
    ///
    /// Returns `UnknownTile` if `tile` was not part of the registry the map
    /// was built from.
    pub fn query(&self, tile: TileId, face: Face) -> Result<Option<&[CompatibilityEntry]>> {
        let row = self.rows.get(tile.index()).ok_or(AssemblyError::UnknownTile {
            index: tile.index(),
            registered: self.rows.len(),
        })?;

        Ok(row
            .get(face.index())
            .map(Vec::as_slice)
            .filter(|entries| !entries.is_empty()))
    }

    /// Whether `entry` is listed for `face` of `tile`, comparing rotations exactly
    ///
    /// # Errors
    ///
    /// Returns `UnknownTile` for an unregistered `tile`.
    pub fn is_compatible(&self, tile: TileId, face: Face, entry: CompatibilityEntry) -> Result<bool> {
        Ok(self
            .query(tile, face)?
            .is_some_and(|entries| entries.contains(&entry)))
    }

    /// Number of tiles the map covers
    pub const fn tile_count(&self) -> usize {
        self.rows.len()
    }

    /// Total number of entries over all tiles and faces
    pub fn entry_count(&self) -> usize {
        self.rows.iter().flatten().map(Vec::len).sum()
    }

    /// Dump every list at debug level
    pub fn log_summary(&self, registry: &TileRegistry) {
        for (index, row) in self.rows.iter().enumerate() {
            let id = TileId(index);
            let name = registry
                .get(id)
                .map_or_else(|_| id.to_string(), |t| t.asset.to_string());
            for (entries, face) in row.iter().zip(Face::ALL) {
                let listing = entries
                    .iter()
                    .map(|e| format!("{}@{}", e.tile, e.rotation))
                    .collect::<Vec<_>>()
                    .join(" ");
                debug!(tile = %name, %face, count = entries.len(), "[{listing}]");
            }
        }
    }
}
