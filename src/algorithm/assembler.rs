//! Incremental assembly of the tile grid around a moving reference point
//!
//! Each update cycle recomputes the window around the reference cell,
//! deactivates cells that fell out of it, creates every missing cell inside it
//! and finally activates the window. Cells are created once and never
//! re-tiled; only their active flag changes afterwards.

use std::collections::{HashMap, HashSet};

use glam::IVec2;
use tracing::{debug, trace};

use crate::algorithm::map::CompatibilityMap;
use crate::algorithm::selection::{PlacedNeighbor, RandomSelector, fitting_candidates};
use crate::io::error::{AssemblyError, Result, invalid_argument, invalid_parameter};
use crate::spatial::face::Face;
use crate::spatial::grid::{GridCell, Window, world_to_grid};
use crate::spatial::tiles::{TileId, TileRegistry};
use crate::spatial::trigger::TerrainTrigger;

/// Runtime parameters of the assembler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssemblerConfig {
    /// Logical cells per tile; must match every registered tile
    pub chunk_grid_size: IVec2,
    /// World-space size of one tile
    pub chunk_real_size: IVec2,
    /// Cells kept active on each side of the reference cell
    pub block_radius: u32,
    /// Tile seeded at the origin by [`GridAssembler::start`]
    pub central_tile: TileId,
}

impl AssemblerConfig {
    /// Check the configuration against the registry it will run on
    ///
    /// # Errors
    ///
    /// Returns `EmptyRegistry`, `TileSizeMismatch`, `InvalidParameter` for a
    /// non-positive size, or `UnknownTile` when the central tile is not
    /// registered.
    pub fn validate(&self, registry: &TileRegistry) -> Result<()> {
        if registry.is_empty() {
            return Err(AssemblyError::EmptyRegistry);
        }
        if self.chunk_grid_size.cmple(IVec2::ZERO).any() {
            return Err(invalid_parameter(
                "chunk_grid_size",
                &self.chunk_grid_size,
                &"must be positive on both axes",
            ));
        }
        if self.chunk_real_size.cmple(IVec2::ZERO).any() {
            return Err(invalid_parameter(
                "chunk_real_size",
                &self.chunk_real_size,
                &"must be positive on both axes",
            ));
        }
        if self.chunk_grid_size != registry.grid_size() {
            return Err(AssemblyError::TileSizeMismatch {
                expected: self.chunk_grid_size,
                found: registry.grid_size(),
            });
        }
        if self.chunk_real_size != registry.real_size() {
            return Err(AssemblyError::TileSizeMismatch {
                expected: self.chunk_real_size,
                found: registry.real_size(),
            });
        }
        registry.get(self.central_tile)?;
        Ok(())
    }
}

/// Receiver of placement events, typically a renderer
///
/// All methods default to doing nothing.
pub trait PlacementSink {
    /// A cell was created, initially inactive
    fn on_cell_created(&mut self, _position: IVec2, _tile: TileId, _rotation: f32) {}

    /// A cell entered the window
    fn on_cell_activated(&mut self, _position: IVec2) {}

    /// A cell left the window
    fn on_cell_deactivated(&mut self, _position: IVec2) {}
}

/// Sink that discards every event
impl PlacementSink for () {}

/// Forwards to the inner sink when present
impl<S: PlacementSink> PlacementSink for Option<S> {
    fn on_cell_created(&mut self, position: IVec2, tile: TileId, rotation: f32) {
        if let Some(sink) = self {
            sink.on_cell_created(position, tile, rotation);
        }
    }

    fn on_cell_activated(&mut self, position: IVec2) {
        if let Some(sink) = self {
            sink.on_cell_activated(position);
        }
    }

    fn on_cell_deactivated(&mut self, position: IVec2) {
        if let Some(sink) = self {
            sink.on_cell_deactivated(position);
        }
    }
}

/// Recorded placement event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlacementEvent {
    /// A cell was created
    Created {
        /// Grid coordinate
        position: IVec2,
        /// Placed tile
        tile: TileId,
        /// Global rotation in degrees
        rotation: f32,
    },
    /// A cell was activated
    Activated(IVec2),
    /// A cell was deactivated
    Deactivated(IVec2),
}

impl PlacementSink for Vec<PlacementEvent> {
    fn on_cell_created(&mut self, position: IVec2, tile: TileId, rotation: f32) {
        self.push(PlacementEvent::Created {
            position,
            tile,
            rotation,
        });
    }

    fn on_cell_activated(&mut self, position: IVec2) {
        self.push(PlacementEvent::Activated(position));
    }

    fn on_cell_deactivated(&mut self, position: IVec2) {
        self.push(PlacementEvent::Deactivated(position));
    }
}

/// Owner of the placed cells and the active window
#[derive(Debug)]
pub struct GridAssembler {
    registry: TileRegistry,
    map: CompatibilityMap,
    config: AssemblerConfig,
    selector: RandomSelector,
    cells: HashMap<IVec2, GridCell>,
    active: HashSet<IVec2>,
    window: Option<Window>,
    tick: u64,
}

impl GridAssembler {
    /// Create an assembler over a registry and the map built from it
    ///
    /// # Errors
    ///
    /// Returns any configuration error from [`AssemblerConfig::validate`], or
    /// `InvalidArgument` if the map was built from a different registry.
    pub fn new(
        registry: TileRegistry,
        map: CompatibilityMap,
        config: AssemblerConfig,
        selector: RandomSelector,
    ) -> Result<Self> {
        config.validate(&registry)?;
        if map.tile_count() != registry.len() {
            return Err(invalid_argument(&format!(
                "compatibility map covers {} tiles but the registry holds {}",
                map.tile_count(),
                registry.len()
            )));
        }

        Ok(Self {
            registry,
            map,
            config,
            selector,
            cells: HashMap::new(),
            active: HashSet::new(),
            window: None,
            tick: 0,
        })
    }

    /// Seed the origin with the central tile at rotation 0
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the origin is already placed.
    pub fn start(&mut self, sink: &mut impl PlacementSink) -> Result<()> {
        if self.cells.contains_key(&IVec2::ZERO) {
            return Err(invalid_argument(&"the origin cell is already placed"));
        }

        let cell = GridCell::new(IVec2::ZERO, self.config.central_tile, 0.0);
        self.commit(cell, sink);
        Ok(())
    }

    /// Run one update cycle for the window around `center`
    ///
    /// # Errors
    ///
    /// Returns `GenerationDeadlock` if a missing cell has no fitting tile, or
    /// `UnknownTile` if the map lacks a placed tile. On error the cycle stops
    /// before any activation and the window's positions stay out of the
    /// active set.
    pub fn update(&mut self, center: IVec2, sink: &mut impl PlacementSink) -> Result<()> {
        let window = Window::around(center, self.config.block_radius);
        self.tick += 1;
        self.window = Some(window);
        trace!(tick = self.tick, x = center.x, y = center.y, "Update cycle");

        let mut leaving: Vec<IVec2> = self
            .active
            .iter()
            .filter(|p| !window.contains(**p))
            .copied()
            .collect();
        leaving.sort_by_key(|p| (p.x, p.y));
        for position in leaving {
            self.active.remove(&position);
            if self
                .cells
                .get_mut(&position)
                .is_some_and(|cell| cell.set_active(false))
            {
                sink.on_cell_deactivated(position);
            }
        }

        let positions = window.positions();
        for &position in &positions {
            if !self.cells.contains_key(&position) {
                let cell = self.create_cell(position)?;
                self.commit(cell, sink);
            }
        }

        // Only a fully populated window becomes active
        self.active.extend(positions.iter().copied());

        for &position in &positions {
            if self
                .cells
                .get_mut(&position)
                .is_some_and(|cell| cell.set_active(true))
            {
                sink.on_cell_activated(position);
            }
        }

        Ok(())
    }

    /// Project the trigger onto the grid and run one update cycle there
    ///
    /// Returns the reference cell used as the window center.
    ///
    /// # Errors
    ///
    /// Returns any error from [`update`](Self::update).
    pub fn update_from_trigger(
        &mut self,
        trigger: &impl TerrainTrigger,
        sink: &mut impl PlacementSink,
    ) -> Result<IVec2> {
        let center = world_to_grid(
            trigger.position(),
            self.config.chunk_grid_size,
            self.config.chunk_real_size,
        );
        self.update(center, sink)?;
        Ok(center)
    }

    /// Choose a tile and rotation for an unplaced position
    fn create_cell(&mut self, position: IVec2) -> Result<GridCell> {
        let neighbors = self.placed_neighbors(position);

        if neighbors.is_empty() {
            let index = self
                .selector
                .choose_index(self.registry.len())
                .ok_or(AssemblyError::EmptyRegistry)?;
            return Ok(GridCell::new(position, TileId(index), 0.0));
        }

        let candidates = fitting_candidates(&self.map, &neighbors)?;
        let Some(chosen) = self.selector.choose(&candidates) else {
            return Err(AssemblyError::GenerationDeadlock {
                position,
                directions: neighbors.iter().map(|n| n.direction).collect(),
            });
        };

        Ok(GridCell::new(position, chosen.tile, chosen.rotation))
    }

    /// Placed cells around `position`, scanned counter-clockwise from up
    fn placed_neighbors(&self, position: IVec2) -> Vec<PlacedNeighbor> {
        let mut direction = Face::Up;
        let mut neighbors = Vec::with_capacity(4);
        for _ in 0..4 {
            if let Some(cell) = direction.step(position).and_then(|p| self.cells.get(&p)) {
                neighbors.push(PlacedNeighbor {
                    direction,
                    tile: cell.tile(),
                    rotation: cell.rotation(),
                });
            }
            direction = direction.rotated(90.0);
        }
        neighbors
    }

    fn commit(&mut self, cell: GridCell, sink: &mut impl PlacementSink) {
        let position = cell.position();
        debug!(
            x = position.x,
            y = position.y,
            tile = %cell.tile(),
            rotation = cell.rotation(),
            "Created cell"
        );
        sink.on_cell_created(position, cell.tile(), cell.rotation());
        self.cells.insert(position, cell);
    }

    /// Placed cell at `position`, if any
    pub fn cell(&self, position: IVec2) -> Option<&GridCell> {
        self.cells.get(&position)
    }

    /// Every placed cell, in no particular order
    pub fn cells(&self) -> impl Iterator<Item = &GridCell> + '_ {
        self.cells.values()
    }

    /// Number of placed cells
    pub fn placed_count(&self) -> usize {
        self.cells.len()
    }

    /// Active positions sorted by x, then y
    pub fn active_positions(&self) -> Vec<IVec2> {
        let mut positions: Vec<IVec2> = self.active.iter().copied().collect();
        positions.sort_by_key(|p| (p.x, p.y));
        positions
    }

    /// Whether `position` belongs to the last fully populated window
    pub fn is_active(&self, position: IVec2) -> bool {
        self.active.contains(&position)
    }

    /// Window of the most recent cycle
    pub const fn window(&self) -> Option<Window> {
        self.window
    }

    /// Number of update cycles run so far
    pub const fn tick(&self) -> u64 {
        self.tick
    }

    /// Registry the assembler places tiles from
    pub const fn registry(&self) -> &TileRegistry {
        &self.registry
    }

    /// Compatibility map consulted for new cells
    pub const fn map(&self) -> &CompatibilityMap {
        &self.map
    }

    /// Active configuration
    pub const fn config(&self) -> &AssemblerConfig {
        &self.config
    }
}
