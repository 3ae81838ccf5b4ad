//! Road-mask tile sets: loading from PNG files and the built-in set
//!
//! A mask marks which cells of a tile carry road. Connectors are derived from
//! the mask edges: every maximal run of road cells along an edge becomes one
//! connector on that face, placed at the run's middle cell.

use std::path::Path;

use glam::IVec2;
use ndarray::Array2;

use crate::io::configuration::{CENTRAL_TILE_NAME, ROAD_ALPHA_THRESHOLD, ROAD_LUMA_THRESHOLD};
use crate::io::error::{AssemblyError, Result, invalid_parameter, invalid_source};
use crate::spatial::face::Face;
use crate::spatial::tiles::{AssetHandle, Connector, TileId, TilePrototype, TileRegistry};

/// Road mask indexed `[x, y]` in tile-local coordinates, y pointing up
pub type RoadMask = Array2<bool>;

/// Registered tiles together with the masks they were derived from
#[derive(Debug, Clone)]
pub struct TileSet {
    registry: TileRegistry,
    masks: Vec<RoadMask>,
}

impl TileSet {
    /// Build a tile set from named masks sharing one size
    ///
    /// # Errors
    ///
    /// Returns `InvalidSourceData` when `masks` is empty or a mask has a zero
    /// dimension, and any registration error.
    pub fn from_masks(masks: Vec<(AssetHandle, RoadMask)>, real_size: IVec2) -> Result<Self> {
        let Some((_, first)) = masks.first() else {
            return Err(invalid_source(&"tile set contains no masks"));
        };
        let grid_size = mask_size(first)?;

        let mut registry = TileRegistry::new(grid_size, real_size);
        let mut kept = Vec::with_capacity(masks.len());
        for (asset, mask) in masks {
            let size = mask_size(&mask)?;
            let connectors = extract_connectors(&mask);
            registry.register(TilePrototype::new(asset, size, real_size, connectors))?;
            kept.push(mask);
        }

        Ok(Self {
            registry,
            masks: kept,
        })
    }

    /// Load every PNG in `dir`, sorted by file name
    ///
    /// The file stem becomes the asset handle. A pixel is road when it is
    /// opaque and dark.
    ///
    /// # Errors
    ///
    /// Returns `FileSystem` if the directory cannot be read, `ImageLoad` for an
    /// unreadable image, `InvalidSourceData` if no PNG is found, or
    /// `TileSizeMismatch` when images differ in size.
    pub fn from_dir(dir: &Path, real_size: IVec2) -> Result<Self> {
        let entries = std::fs::read_dir(dir).map_err(|e| AssemblyError::FileSystem {
            path: dir.to_path_buf(),
            operation: "read directory",
            source: e,
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|s| s.to_str()) == Some("png") {
                paths.push(path);
            }
        }
        paths.sort();

        if paths.is_empty() {
            return Err(invalid_source(&format!(
                "no PNG tiles found in '{}'",
                dir.display()
            )));
        }

        let mut masks = Vec::with_capacity(paths.len());
        for path in paths {
            let name = path
                .file_stem()
                .unwrap_or_default()
                .to_string_lossy()
                .to_string();
            masks.push((AssetHandle::new(name), load_mask(&path)?));
        }

        Self::from_masks(masks, real_size)
    }

    /// Road tiles covering every combination of open sides
    ///
    /// Crossroad, straight, corner, T-junction, dead end and empty. Roads run
    /// along the middle row and column, so `grid_size` must be odd.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for an even or smaller-than-three grid size.
    pub fn builtin(grid_size: i32, real_size: IVec2) -> Result<Self> {
        if grid_size < 3 || grid_size % 2 == 0 {
            return Err(invalid_parameter(
                "grid_size",
                &grid_size,
                &"built-in tiles need an odd size of at least 3",
            ));
        }

        let n = grid_size as usize;
        let mid = n / 2;
        let paint = |open: [bool; 4]| {
            let [up, right, down, left] = open;
            Array2::from_shape_fn((n, n), |(x, y)| {
                (x == mid && ((up && y >= mid) || (down && y <= mid)))
                    || (y == mid && ((right && x >= mid) || (left && x <= mid)))
            })
        };

        let layouts = [
            ("crossroad", [true, true, true, true]),
            ("straight", [true, false, true, false]),
            ("corner", [true, true, false, false]),
            ("junction", [false, true, true, true]),
            ("dead_end", [true, false, false, false]),
            ("empty", [false, false, false, false]),
        ];
        let masks = layouts
            .into_iter()
            .map(|(name, open)| (AssetHandle::new(name), paint(open)))
            .collect();

        Self::from_masks(masks, real_size)
    }

    /// Registry of the tile set
    pub const fn registry(&self) -> &TileRegistry {
        &self.registry
    }

    /// Road mask of a registered tile
    pub fn mask(&self, id: TileId) -> Option<&RoadMask> {
        self.masks.get(id.index())
    }

    /// Tile seeded at the origin: the crossroad when present, else the first tile
    pub fn central_tile(&self) -> TileId {
        self.registry
            .find(&AssetHandle::new(CENTRAL_TILE_NAME))
            .unwrap_or(TileId(0))
    }
}

fn mask_size(mask: &RoadMask) -> Result<IVec2> {
    let (width, height) = mask.dim();
    if width == 0 || height == 0 {
        return Err(invalid_source(&"tile mask has a zero dimension"));
    }
    Ok(IVec2::new(width as i32, height as i32))
}

/// Read a PNG road mask, flipping rows so y points up
///
/// # Errors
///
/// Returns `ImageLoad` if the file cannot be decoded.
pub fn load_mask(path: &Path) -> Result<RoadMask> {
    let img = image::open(path)
        .map_err(|e| AssemblyError::ImageLoad {
            path: path.to_path_buf(),
            source: e,
        })?
        .to_luma_alpha8();

    let (width, height) = img.dimensions();
    Ok(Array2::from_shape_fn(
        (width as usize, height as usize),
        |(x, y)| {
            let row = height as usize - 1 - y;
            let [luma, alpha] = img.get_pixel(x as u32, row as u32).0;
            alpha >= ROAD_ALPHA_THRESHOLD && luma < ROAD_LUMA_THRESHOLD
        },
    ))
}

/// Connectors along the mask edges in face order, runs in increasing coordinate
pub fn extract_connectors(mask: &RoadMask) -> Vec<Connector> {
    let (width, height) = mask.dim();
    if width == 0 || height == 0 {
        return Vec::new();
    }
    let (top, right) = (height - 1, width - 1);

    let mut connectors = Vec::new();
    for face in Face::ALL {
        let edge: Vec<bool> = match face {
            Face::Up => (0..width).map(|x| is_road(mask, x, top)).collect(),
            Face::Down => (0..width).map(|x| is_road(mask, x, 0)).collect(),
            Face::Right => (0..height).map(|y| is_road(mask, right, y)).collect(),
            Face::Left => (0..height).map(|y| is_road(mask, 0, y)).collect(),
        };

        for (start, len) in road_runs(&edge) {
            let along = (start + (len - 1) / 2) as i32;
            let position = match face {
                Face::Up => IVec2::new(along, top as i32),
                Face::Down => IVec2::new(along, 0),
                Face::Right => IVec2::new(right as i32, along),
                Face::Left => IVec2::new(0, along),
            };
            connectors.push(Connector::new(face, position, len as u32));
        }
    }
    connectors
}

fn is_road(mask: &RoadMask, x: usize, y: usize) -> bool {
    mask.get((x, y)).copied().unwrap_or(false)
}

// Maximal runs of `true` as (start, length)
fn road_runs(edge: &[bool]) -> Vec<(usize, usize)> {
    let mut runs = Vec::new();
    let mut start = None;
    for (i, &road) in edge.iter().chain(std::iter::once(&false)).enumerate() {
        match (road, start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                runs.push((s, i - s));
                start = None;
            }
            _ => {}
        }
    }
    runs
}
