//! Reference points that drive the assembly window

use glam::{Vec2, Vec3};

use crate::math::geometry::rotate;

/// Anything whose world position the assembler follows
pub trait TerrainTrigger {
    /// Current world-space position, polled once per update cycle
    fn position(&self) -> Vec3;
}

/// A reference point that never moves
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedPoint(pub Vec3);

impl TerrainTrigger for FixedPoint {
    fn position(&self) -> Vec3 {
        self.0
    }
}

/// A point travelling along a straight line on the ground plane
#[derive(Debug, Clone, PartialEq)]
pub struct LinearPath {
    origin: Vec3,
    direction: Vec2,
    speed: f32,
    travelled: f32,
}

impl LinearPath {
    /// Start at `origin`, heading `heading_degrees` counter-clockwise from +x
    ///
    /// `speed` is the distance covered per [`tick`](Self::tick).
    pub fn new(origin: Vec3, heading_degrees: f32, speed: f32) -> Self {
        Self {
            origin,
            direction: rotate(Vec2::X, heading_degrees),
            speed,
            travelled: 0.0,
        }
    }

    /// Move forward by an explicit distance
    pub fn advance(&mut self, distance: f32) {
        self.travelled += distance;
    }

    /// Move forward by one tick worth of distance
    pub fn tick(&mut self) {
        self.advance(self.speed);
    }

    /// Total distance covered so far
    pub const fn travelled(&self) -> f32 {
        self.travelled
    }
}

impl TerrainTrigger for LinearPath {
    fn position(&self) -> Vec3 {
        let offset = self.direction * self.travelled;
        self.origin + Vec3::new(offset.x, 0.0, offset.y)
    }
}
