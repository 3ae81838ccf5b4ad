//! Mathematical utilities for tile placement

/// Planar rotation and angle helpers working in degrees
pub mod geometry;
