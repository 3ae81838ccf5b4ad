//! Incremental assembly of an unbounded grid of connector-matched terrain tiles
//!
//! Tiles carry connectors on their edges. A compatibility map, built once,
//! lists for every tile and face which tiles fit there and at which rotation.
//! The assembler follows a moving reference point, keeps a square window of
//! cells active around it, and fills each new cell with a tile that agrees
//! with all of its placed neighbours.

#![forbid(unsafe_code)]

/// Compatibility checking, the compatibility map and grid assembly
pub mod algorithm;
/// Tile sets, rendering, command-line interface and error handling
pub mod io;
/// Planar rotation and angle helpers
pub mod math;
/// Faces, tiles, grid cells and reference points
pub mod spatial;

pub use io::error::{AssemblyError, Result};
