//! Spatial data structures for the tile grid
//!
//! This module contains:
//! - Cardinal faces and their rotations
//! - Tile prototypes, connectors and the tile registry
//! - Placed cells, the visibility window and grid projection
//! - Reference points that drive assembly

/// Cardinal faces of a grid cell
pub mod face;
/// Placed cells, windows and world-to-grid projection
pub mod grid;
/// Tile prototypes, connectors and registry
pub mod tiles;
/// Moving and fixed reference points
pub mod trigger;

pub use face::Face;
pub use grid::{GridCell, Window};
pub use tiles::{TileId, TilePrototype, TileRegistry};
