//! Rotation-aware connector matching between two tile prototypes

use glam::{IVec2, Vec2};

use crate::io::error::{AssemblyError, Result};
use crate::math::geometry::rotate_around;
use crate::spatial::face::Face;
use crate::spatial::tiles::{Connector, TilePrototype};

/// Find every rotation of `tile_b` that lets it sit against `face_on_a` of `tile_a`
///
/// Each face of `tile_b` carrying exactly as many connectors as `tile_a` shows
/// on `face_on_a` is a candidate. The candidate is turned to face `tile_a` and
/// accepted when every connector pair lands on mirrored cells. Faces with no
/// connectors on either side match trivially. Rotations are returned in face
/// order (up, right, down, left); an empty result means no match.
///
/// # Errors
///
/// Returns `TileSizeMismatch` if the tiles have different grid sizes.
pub fn check_compatibility(
    tile_a: &TilePrototype,
    tile_b: &TilePrototype,
    face_on_a: Face,
) -> Result<Vec<f32>> {
    if tile_a.grid_size != tile_b.grid_size {
        return Err(AssemblyError::TileSizeMismatch {
            expected: tile_a.grid_size,
            found: tile_b.grid_size,
        });
    }

    let required_face = face_on_a.opposite();
    let required_count = tile_a.connectors_on(face_on_a).count();
    let mut rotations = Vec::new();

    for candidate in Face::ALL {
        let tally = tile_b.connectors_on(candidate).count();
        if tally != required_count {
            continue;
        }

        if tally == 0 {
            rotations.push(candidate.rotation_to(required_face));
            continue;
        }

        let rotation = candidate.rotation_to(required_face);
        let mut matched = 0;
        for a in tile_a.connectors_on(face_on_a) {
            for b in tile_b.connectors_on(candidate) {
                if lands_on_mirror(a, b, tile_a.grid_size, rotation) {
                    matched += 1;
                }
            }
        }

        if matched == tally {
            rotations.push(rotation);
        }
    }

    Ok(rotations)
}

/// Cell on the neighbouring tile that must hold the partner of `connector`
fn mirrored_position(connector: &Connector, grid_size: IVec2) -> IVec2 {
    let p = connector.position;
    match connector.face {
        Face::Left => IVec2::new(grid_size.x - 1, p.y),
        Face::Up => IVec2::new(p.x, 0),
        Face::Right => IVec2::new(0, p.y),
        Face::Down => IVec2::new(p.x, grid_size.y - 1),
    }
}

/// Whether `b`, turned by `rotation` around the tile center, covers the mirror cell of `a`
fn lands_on_mirror(a: &Connector, b: &Connector, grid_size: IVec2, rotation: f32) -> bool {
    let center = grid_size.as_vec2() / 2.0;
    let cell_center = b.position.as_vec2() + Vec2::splat(0.5);
    let rotated = rotate_around(cell_center, center, rotation).floor().as_ivec2();
    rotated == mirrored_position(a, grid_size)
}
