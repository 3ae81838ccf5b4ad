//! Placed grid cells, the visibility window and world-to-grid projection

use glam::{I64Vec2, IVec2, Vec3};

use crate::spatial::tiles::TileId;

/// One placed chunk on the unbounded grid
///
/// Tile and rotation are fixed at creation; only the active flag changes.
#[derive(Debug, Clone, PartialEq)]
pub struct GridCell {
    position: IVec2,
    tile: TileId,
    rotation: f32,
    active: bool,
}

impl GridCell {
    /// Create an inactive cell
    pub const fn new(position: IVec2, tile: TileId, rotation: f32) -> Self {
        Self {
            position,
            tile,
            rotation,
            active: false,
        }
    }

    /// Grid coordinate of the cell
    pub const fn position(&self) -> IVec2 {
        self.position
    }

    /// Registered tile placed here
    pub const fn tile(&self) -> TileId {
        self.tile
    }

    /// Counter-clockwise rotation in degrees, a multiple of 90
    pub const fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Whether the cell lies inside the current window
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Flip the active flag, reporting whether it changed
    pub(crate) const fn set_active(&mut self, active: bool) -> bool {
        let changed = self.active != active;
        self.active = active;
        changed
    }

    /// World-space center of the cell on the ground plane
    pub fn world_center(&self, real_size: IVec2) -> Vec3 {
        let real = real_size.as_vec2();
        let center = self.position.as_vec2() * real + real * 0.5;
        Vec3::new(center.x, 0.0, center.y)
    }

    /// Yaw for a y-up renderer, which turns clockwise for positive angles
    pub const fn yaw_degrees(&self) -> f32 {
        -self.rotation
    }
}

/// Inclusive square of grid positions around a reference cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    /// Lowest corner, inclusive
    pub bottom_left: IVec2,
    /// Highest corner, inclusive
    pub top_right: IVec2,
}

impl Window {
    /// Window of `radius` cells on each side of `center`
    ///
    /// Edges are clamped to the `i32` range, so a window touching the limits
    /// of the grid is cut off there.
    pub fn around(center: IVec2, radius: u32) -> Self {
        let r = IVec2::splat(i32::try_from(radius).unwrap_or(i32::MAX));
        Self {
            bottom_left: center.saturating_sub(r),
            top_right: center.saturating_add(r),
        }
    }

    /// Middle cell of the window, rounded towards negative infinity
    pub fn center(&self) -> IVec2 {
        let sum = self.bottom_left.as_i64vec2() + self.top_right.as_i64vec2();
        IVec2::new(sum.x.div_euclid(2) as i32, sum.y.div_euclid(2) as i32)
    }

    /// Whether `position` lies inside the window, edges included
    pub fn contains(&self, position: IVec2) -> bool {
        position.cmpge(self.bottom_left).all() && position.cmple(self.top_right).all()
    }

    /// Number of cells covered
    pub fn area(&self) -> usize {
        let extent = self.top_right.as_i64vec2() - self.bottom_left.as_i64vec2() + I64Vec2::ONE;
        (extent.x.max(0) as usize).saturating_mul(extent.y.max(0) as usize)
    }

    /// Every position in the window, nearest to the center first
    ///
    /// Ties are broken by x, then y, so the order is stable across runs.
    pub fn positions(&self) -> Vec<IVec2> {
        let center = self.center();
        let mut positions = Vec::with_capacity(self.area());
        for x in self.bottom_left.x..=self.top_right.x {
            for y in self.bottom_left.y..=self.top_right.y {
                positions.push(IVec2::new(x, y));
            }
        }
        positions.sort_by_key(|p| (distance_squared(*p, center), p.x, p.y));
        positions
    }
}

fn distance_squared(a: IVec2, b: IVec2) -> u128 {
    let dx = u128::from(a.x.abs_diff(b.x));
    let dy = u128::from(a.y.abs_diff(b.y));
    dx * dx + dy * dy
}

/// Project a world point onto the tile grid
///
/// Negative coordinates are shifted by one grid-size unit before the ceiling
/// division, keeping the projection continuous across zero. Points beyond the
/// `i32` range land on the outermost cell.
pub fn world_to_grid(world: Vec3, grid_size: IVec2, real_size: IVec2) -> IVec2 {
    let mut x = world.x;
    let mut z = world.z;
    if x < 0.0 {
        x -= grid_size.x as f32;
    }
    if z < 0.0 {
        z -= grid_size.y as f32;
    }

    let real = real_size.as_vec2();
    IVec2::new(
        ((x / real.x).ceil() as i32).saturating_sub(1),
        ((z / real.y).ceil() as i32).saturating_sub(1),
    )
}
