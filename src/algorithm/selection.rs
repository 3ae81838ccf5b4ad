//! Candidate filtering against placed neighbours and seeded random choice

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::algorithm::map::{CompatibilityEntry, CompatibilityMap};
use crate::io::error::{Result, invalid_argument};
use crate::math::geometry::normalize_rotation;
use crate::spatial::face::Face;
use crate::spatial::tiles::TileId;

/// An already placed cell next to the one being created
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedNeighbor {
    /// Direction from the new cell towards the neighbour
    pub direction: Face,
    /// Tile placed in the neighbouring cell
    pub tile: TileId,
    /// Global rotation of the neighbouring cell
    pub rotation: f32,
}

impl PlacedNeighbor {
    /// Face of the neighbour that touches the new cell, in the neighbour's own frame
    pub fn facing_face(&self) -> Face {
        self.direction.opposite().rotated(-self.rotation)
    }
}

/// Tiles with global rotations that satisfy every placed neighbour
///
/// The first neighbour is the anchor: its map entries, shifted into global
/// rotation space, are the provisional candidates. Each further neighbour then
/// keeps only the candidates it also lists, after re-expressing the rotation
/// relative to that neighbour. An empty result means nothing fits.
///
/// # Errors
///
/// Returns `InvalidArgument` if `neighbors` is empty, or `UnknownTile` if a
/// neighbour's tile is missing from the map.
pub fn fitting_candidates(
    map: &CompatibilityMap,
    neighbors: &[PlacedNeighbor],
) -> Result<Vec<CompatibilityEntry>> {
    let Some((anchor, others)) = neighbors.split_first() else {
        return Err(invalid_argument(
            &"fitting requires at least one placed neighbour",
        ));
    };

    let provisional = map
        .query(anchor.tile, anchor.facing_face())?
        .unwrap_or_default()
        .iter()
        .map(|entry| {
            CompatibilityEntry::new(entry.tile, normalize_rotation(entry.rotation + anchor.rotation))
        });

    let mut survivors = Vec::new();
    'candidates: for candidate in provisional {
        for neighbor in others {
            let relative = CompatibilityEntry::new(
                candidate.tile,
                normalize_rotation(candidate.rotation - neighbor.rotation),
            );
            if !map.is_compatible(neighbor.tile, neighbor.facing_face(), relative)? {
                continue 'candidates;
            }
        }
        survivors.push(candidate);
    }

    Ok(survivors)
}

/// Seeded source of uniform random choices
///
/// Owned by the assembler so a fixed seed reproduces a layout exactly.
#[derive(Debug, Clone)]
pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    /// Create a deterministic random selector
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Uniform index below `len`, or `None` when `len` is zero
    pub fn choose_index(&mut self, len: usize) -> Option<usize> {
        (len > 0).then(|| self.rng.random_range(0..len))
    }

    /// Uniformly chosen element of `items`
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        self.choose_index(items.len()).and_then(|i| items.get(i))
    }
}
