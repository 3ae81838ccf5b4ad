//! PNG export of assembled layouts

use std::path::Path;

use glam::{I64Vec2, IVec2, Vec2};
use image::{Rgba, RgbaImage};

use crate::algorithm::assembler::GridAssembler;
use crate::io::configuration::{INACTIVE_DIM_FACTOR, PIXELS_PER_CELL};
use crate::io::error::{AssemblyError, Result, invalid_parameter, invalid_source};
use crate::io::tileset::TileSet;
use crate::math::geometry::rotate_around;
use crate::spatial::grid::GridCell;

const ROAD_COLOR: [u8; 4] = [64, 64, 72, 255];
const GROUND_COLOR: [u8; 4] = [96, 168, 80, 255];
const EMPTY_COLOR: [u8; 4] = [0, 0, 0, 0];

/// Inclusive range of grid positions covering every cell
pub fn layout_bounds<'a>(cells: impl IntoIterator<Item = &'a GridCell>) -> Option<(IVec2, IVec2)> {
    cells.into_iter().fold(None, |bounds, cell| {
        let p = cell.position();
        Some(bounds.map_or((p, p), |(min, max): (IVec2, IVec2)| (min.min(p), max.max(p))))
    })
}

/// Draw `cells` inside `bounds`, each mask turned by its cell rotation
///
/// Grid y points up, so the bottom row of the image is the lowest grid row.
/// Inactive cells are dimmed; uncovered positions stay transparent.
///
/// # Errors
///
/// Returns `UnknownTile` if a cell's tile has no mask in `tileset`, or
/// `InvalidParameter` when `bounds` span more pixels than an image can hold.
pub fn render_cells<'a>(
    cells: impl IntoIterator<Item = &'a GridCell>,
    tileset: &TileSet,
    bounds: (IVec2, IVec2),
    pixels_per_cell: u32,
) -> Result<RgbaImage> {
    let grid_size = tileset.registry().grid_size();
    let (min, max) = bounds;
    let scale = pixels_per_cell.max(1);
    let cells_wide = (max.as_i64vec2() - min.as_i64vec2() + I64Vec2::ONE) * grid_size.as_i64vec2();
    let to_pixels = |cells: i64| {
        u32::try_from(cells)
            .ok()
            .and_then(|c| c.checked_mul(scale))
            .filter(|&pixels| pixels > 0)
    };
    let (Some(width), Some(height)) = (to_pixels(cells_wide.x), to_pixels(cells_wide.y)) else {
        return Err(invalid_parameter(
            "bounds",
            &format!("{min}..={max}"),
            &"layout does not fit in one image",
        ));
    };
    let mut img = RgbaImage::from_pixel(width, height, Rgba(EMPTY_COLOR));

    let center = grid_size.as_vec2() / 2.0;
    for cell in cells {
        let position = cell.position();
        if position.cmplt(min).any() || position.cmpgt(max).any() {
            continue;
        }
        let mask = tileset
            .mask(cell.tile())
            .ok_or(AssemblyError::UnknownTile {
                index: cell.tile().index(),
                registered: tileset.registry().len(),
            })?;
        let origin = (position.as_i64vec2() - min.as_i64vec2()) * grid_size.as_i64vec2();

        for ly in 0..grid_size.y {
            for lx in 0..grid_size.x {
                // Sample the unrotated mask at the pre-image of this cell
                let local = Vec2::new(lx as f32, ly as f32) + Vec2::splat(0.5);
                let source = rotate_around(local, center, -cell.rotation())
                    .floor()
                    .as_ivec2();
                let road = usize::try_from(source.x)
                    .ok()
                    .zip(usize::try_from(source.y).ok())
                    .and_then(|index| mask.get(index))
                    .copied()
                    .unwrap_or(false);

                let base = if road { ROAD_COLOR } else { GROUND_COLOR };
                let color = if cell.is_active() { base } else { dim(base) };

                let gx = (origin.x + i64::from(lx)) as u32;
                let gy = (cells_wide.y - 1 - (origin.y + i64::from(ly))) as u32;
                for dy in 0..scale {
                    for dx in 0..scale {
                        img.put_pixel(gx * scale + dx, gy * scale + dy, Rgba(color));
                    }
                }
            }
        }
    }

    Ok(img)
}

fn dim(color: [u8; 4]) -> [u8; 4] {
    let [r, g, b, a] = color;
    let scale = |c: u8| (f32::from(c) * INACTIVE_DIM_FACTOR) as u8;
    [scale(r), scale(g), scale(b), a]
}

/// Export every placed cell of `assembler` as a PNG
///
/// # Errors
///
/// Returns an error if:
/// - No cells have been placed
/// - A placed tile has no mask in `tileset`
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_layout_as_png(
    assembler: &GridAssembler,
    tileset: &TileSet,
    output_path: &Path,
) -> Result<()> {
    let bounds = layout_bounds(assembler.cells())
        .ok_or_else(|| invalid_source(&"No cells have been placed"))?;
    let img = render_cells(assembler.cells(), tileset, bounds, PIXELS_PER_CELL)?;

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| AssemblyError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    img.save(output_path)
        .map_err(|e| AssemblyError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    Ok(())
}
