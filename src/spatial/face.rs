//! Cardinal faces of a grid cell
//!
//! A face doubles as a direction: the unit step from a cell towards the
//! neighbour that shares that edge. Rotating a face by a multiple of 90°
//! yields the face the edge ends up on after the tile is rotated.

use glam::IVec2;
use std::fmt;

use crate::math::geometry::normalize_rotation;

/// One of the four edges of a square cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Face {
    /// Positive y
    Up,
    /// Positive x
    Right,
    /// Negative y
    Down,
    /// Negative x
    Left,
}

impl Face {
    /// All faces in clockwise order starting at [`Face::Up`]
    pub const ALL: [Self; 4] = [Self::Up, Self::Right, Self::Down, Self::Left];

    /// Position of this face in [`Face::ALL`]
    pub const fn index(self) -> usize {
        match self {
            Self::Up => 0,
            Self::Right => 1,
            Self::Down => 2,
            Self::Left => 3,
        }
    }

    /// Unit grid step pointing out of this face
    pub const fn vector(self) -> IVec2 {
        match self {
            Self::Up => IVec2::Y,
            Self::Right => IVec2::X,
            Self::Down => IVec2::NEG_Y,
            Self::Left => IVec2::NEG_X,
        }
    }

    /// Neighbouring position across this face, `None` past the `i32` range
    pub fn step(self, from: IVec2) -> Option<IVec2> {
        let offset = self.vector();
        Some(IVec2::new(
            from.x.checked_add(offset.x)?,
            from.y.checked_add(offset.y)?,
        ))
    }

    /// Face for a unit axis step, `None` for anything else
    pub fn from_vector(vector: IVec2) -> Option<Self> {
        Self::ALL.into_iter().find(|face| face.vector() == vector)
    }

    /// The face on the other side of the cell
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Right => Self::Left,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
        }
    }

    /// Face reached by rotating this one counter-clockwise by `angle_degrees`
    ///
    /// The angle is snapped to the nearest quarter turn.
    pub fn rotated(self, angle_degrees: f32) -> Self {
        let quarter_turns = (normalize_rotation(angle_degrees) / 90.0).round() as usize % 4;
        // ALL is clockwise, so a counter-clockwise quarter turn steps backwards
        let index = (self.index() + 4 - quarter_turns) % 4;
        Self::ALL.get(index).copied().unwrap_or(self)
    }

    /// Counter-clockwise rotation in degrees that turns this face into `target`
    ///
    /// Always one of 0, 90, 180 or 270. Agrees with
    /// [`angle360`](crate::math::geometry::angle360) on the face vectors but
    /// is computed exactly instead of through trigonometry.
    pub fn rotation_to(self, target: Self) -> f32 {
        let quarter_turns = (self.index() + 4 - target.index()) % 4;
        quarter_turns as f32 * 90.0
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Up => "up",
            Self::Right => "right",
            Self::Down => "down",
            Self::Left => "left",
        };
        f.write_str(name)
    }
}
