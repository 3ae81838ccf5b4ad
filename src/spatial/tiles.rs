//! Tile prototypes, edge connectors and the registry that owns them

use std::fmt;

use glam::IVec2;

use crate::io::error::{AssemblyError, Result};
use crate::spatial::face::Face;

/// Opaque handle naming the visual asset behind a tile
///
/// The assembly core only compares handles and passes them through on
/// placement events; it never looks inside.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AssetHandle(String);

impl AssetHandle {
    /// Create a handle from any string-like name
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Name of the underlying asset
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssetHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Attachment point on one edge of a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Connector {
    /// Edge the connector sits on
    pub face: Face,
    /// Cell position in tile-local coordinates, y pointing up
    pub position: IVec2,
    /// Number of cells the connector spans, at least one
    pub width: u32,
}

impl Connector {
    /// Create a connector
    pub const fn new(face: Face, position: IVec2, width: u32) -> Self {
        Self {
            face,
            position,
            width,
        }
    }

    /// Whether the connector position lies within `[0, grid_size)`
    pub fn is_within(&self, grid_size: IVec2) -> bool {
        self.position.cmpge(IVec2::ZERO).all() && self.position.cmplt(grid_size).all()
    }
}

/// Immutable description of one placeable tile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TilePrototype {
    /// Visual asset rendered for this tile
    pub asset: AssetHandle,
    /// Logical cell count of the tile
    pub grid_size: IVec2,
    /// World-space extent of the tile
    pub real_size: IVec2,
    /// Edge connectors in authoring order
    pub connectors: Vec<Connector>,
}

impl TilePrototype {
    /// Create a prototype without validating it
    ///
    /// Validation happens on registration.
    pub fn new(
        asset: AssetHandle,
        grid_size: IVec2,
        real_size: IVec2,
        connectors: Vec<Connector>,
    ) -> Self {
        Self {
            asset,
            grid_size,
            real_size,
            connectors,
        }
    }

    /// Connectors lying on `face`, in authoring order
    pub fn connectors_on(&self, face: Face) -> impl Iterator<Item = &Connector> + '_ {
        self.connectors.iter().filter(move |c| c.face == face)
    }

    /// Whether two prototypes name the same tile for matching purposes
    pub fn same_identity(&self, other: &Self) -> bool {
        self.asset == other.asset && self.grid_size == other.grid_size
    }

    /// Check connector bounds and widths
    ///
    /// # Errors
    ///
    /// Returns `InvalidConnectorWidth` for a zero-width connector and
    /// `ConnectorOutOfBounds` for a connector outside the grid.
    pub fn validate(&self) -> Result<()> {
        for connector in &self.connectors {
            if connector.width == 0 {
                return Err(AssemblyError::InvalidConnectorWidth {
                    tile: self.asset.to_string(),
                    width: connector.width,
                });
            }
            if !connector.is_within(self.grid_size) {
                return Err(AssemblyError::ConnectorOutOfBounds {
                    tile: self.asset.to_string(),
                    position: connector.position,
                    grid_size: self.grid_size,
                });
            }
        }
        Ok(())
    }
}

/// Arena index of a registered tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(pub usize);

impl TileId {
    /// Position of the tile in its registry
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Ordered, append-only collection of validated tile prototypes
///
/// Every tile shares the registry's grid and real size. Tiles are addressed
/// by [`TileId`] in registration order.
#[derive(Debug, Clone)]
pub struct TileRegistry {
    grid_size: IVec2,
    real_size: IVec2,
    tiles: Vec<TilePrototype>,
}

impl TileRegistry {
    /// Create an empty registry for tiles of the given sizes
    pub const fn new(grid_size: IVec2, real_size: IVec2) -> Self {
        Self {
            grid_size,
            real_size,
            tiles: Vec::new(),
        }
    }

    /// Validate and append a prototype
    ///
    /// # Errors
    ///
    /// Returns `TileSizeMismatch` when the prototype's grid or real size differs
    /// from the registry's, any connector validation error, or `DuplicateTile`
    /// when a prototype with the same identity is already registered.
    pub fn register(&mut self, prototype: TilePrototype) -> Result<TileId> {
        if prototype.grid_size != self.grid_size {
            return Err(AssemblyError::TileSizeMismatch {
                expected: self.grid_size,
                found: prototype.grid_size,
            });
        }
        if prototype.real_size != self.real_size {
            return Err(AssemblyError::TileSizeMismatch {
                expected: self.real_size,
                found: prototype.real_size,
            });
        }
        prototype.validate()?;
        if self.tiles.iter().any(|t| t.same_identity(&prototype)) {
            return Err(AssemblyError::DuplicateTile {
                tile: prototype.asset.to_string(),
            });
        }

        let id = TileId(self.tiles.len());
        self.tiles.push(prototype);
        Ok(id)
    }

    /// Look up a registered prototype
    ///
    /// # Errors
    ///
    /// Returns `UnknownTile` if the handle was not issued by this registry.
    pub fn get(&self, id: TileId) -> Result<&TilePrototype> {
        self.tiles.get(id.0).ok_or(AssemblyError::UnknownTile {
            index: id.0,
            registered: self.tiles.len(),
        })
    }

    /// Handle of the first tile using `asset`
    pub fn find(&self, asset: &AssetHandle) -> Option<TileId> {
        self.tiles.iter().position(|t| &t.asset == asset).map(TileId)
    }

    /// All handles in registration order
    pub fn ids(&self) -> impl Iterator<Item = TileId> + '_ {
        (0..self.tiles.len()).map(TileId)
    }

    /// All tiles with their handles in registration order
    pub fn iter(&self) -> impl Iterator<Item = (TileId, &TilePrototype)> + '_ {
        self.tiles.iter().enumerate().map(|(i, t)| (TileId(i), t))
    }

    /// Number of registered tiles
    pub const fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether no tile has been registered
    pub const fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Grid size shared by every tile
    pub const fn grid_size(&self) -> IVec2 {
        self.grid_size
    }

    /// Real size shared by every tile
    pub const fn real_size(&self) -> IVec2 {
        self.real_size
    }
}
