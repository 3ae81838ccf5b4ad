//! Event capture and GIF export of the moving window

use std::collections::HashMap;
use std::path::Path;

use glam::IVec2;
use image::{Delay, Frame};

use crate::algorithm::assembler::{PlacementEvent, PlacementSink};
use crate::io::configuration::VIEWER_MIN_FRAME_DELAY_MS;
use crate::io::error::{AssemblyError, Result, invalid_source};
use crate::io::image::{layout_bounds, render_cells};
use crate::io::tileset::TileSet;
use crate::spatial::grid::GridCell;
use crate::spatial::tiles::TileId;

/// Placement sink that records every event with the tick it happened in
///
/// Call [`next_frame`](Self::next_frame) after each update cycle; every tick
/// becomes one frame of the exported animation.
#[derive(Debug, Clone, Default)]
pub struct VisualizationCapture {
    events: Vec<(usize, PlacementEvent)>,
    frame: usize,
}

impl VisualizationCapture {
    /// Create an empty capture
    pub fn new() -> Self {
        Self::default()
    }

    /// Close the current frame
    pub const fn next_frame(&mut self) {
        self.frame += 1;
    }

    /// Number of closed frames
    pub const fn frame_count(&self) -> usize {
        self.frame
    }

    /// Recorded events with their frame index
    pub fn events(&self) -> &[(usize, PlacementEvent)] {
        &self.events
    }

    /// Export one frame per tick as an animated GIF
    ///
    /// Frames are skipped when `frame_delay_ms` is below what viewers support,
    /// keeping the apparent speed. The last frame is held longer.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No placement events were captured
    /// - A recorded tile has no mask in `tileset`
    /// - File system operations fail
    /// - GIF encoding fails
    pub fn export_gif(&self, tileset: &TileSet, output_path: &Path, frame_delay_ms: u32) -> Result<()> {
        if self.events.is_empty() {
            return Err(invalid_source(
                &"No placement events captured for visualization",
            ));
        }

        let frame_delay_ms = frame_delay_ms.max(1);
        let effective_delay_ms = frame_delay_ms.max(VIEWER_MIN_FRAME_DELAY_MS);
        let skip_factor = if frame_delay_ms < VIEWER_MIN_FRAME_DELAY_MS {
            VIEWER_MIN_FRAME_DELAY_MS.div_ceil(frame_delay_ms) as usize
        } else {
            1
        };

        let frames = self.generate_frames(tileset, effective_delay_ms, skip_factor)?;

        if let Some(parent) = output_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| AssemblyError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }

        let file = std::fs::File::create(output_path).map_err(|e| AssemblyError::FileSystem {
            path: output_path.to_path_buf(),
            operation: "create file",
            source: e,
        })?;

        let mut encoder = image::codecs::gif::GifEncoder::new(file);
        encoder
            .encode_frames(frames)
            .map_err(|e| AssemblyError::ImageExport {
                path: output_path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    fn generate_frames(
        &self,
        tileset: &TileSet,
        delay_ms: u32,
        skip_factor: usize,
    ) -> Result<Vec<Frame>> {
        let created: Vec<GridCell> = self
            .events
            .iter()
            .filter_map(|(_, event)| match *event {
                PlacementEvent::Created {
                    position,
                    tile,
                    rotation,
                } => Some(GridCell::new(position, tile, rotation)),
                _ => None,
            })
            .collect();
        let bounds = layout_bounds(&created)
            .ok_or_else(|| invalid_source(&"No cells were created during capture"))?;

        let mut cells: HashMap<IVec2, GridCell> = HashMap::new();
        let mut frames = Vec::new();
        let mut pending = self.events.iter().peekable();
        let last_event_frame = self.events.last().map_or(0, |(frame, _)| *frame);
        let last_frame = last_event_frame.max(self.frame.saturating_sub(1));

        for frame in 0..=last_frame {
            while let Some((_, event)) = pending.next_if(|(f, _)| *f == frame) {
                apply_event(&mut cells, *event);
            }

            if frame % skip_factor == 0 || frame == last_frame {
                let img = render_cells(cells.values(), tileset, bounds, 1)?;
                frames.push(Frame::from_parts(
                    img,
                    0,
                    0,
                    Delay::from_numer_denom_ms(delay_ms, 1),
                ));
            }
        }

        // Final frame displays longer for better visibility
        if let Some(last_frame_img) = frames.last().map(|f| f.buffer().clone()) {
            frames.push(Frame::from_parts(
                last_frame_img,
                0,
                0,
                Delay::from_numer_denom_ms(delay_ms * 25, 1),
            ));
        }

        Ok(frames)
    }
}

fn apply_event(cells: &mut HashMap<IVec2, GridCell>, event: PlacementEvent) {
    match event {
        PlacementEvent::Created {
            position,
            tile,
            rotation,
        } => {
            cells.insert(position, GridCell::new(position, tile, rotation));
        }
        PlacementEvent::Activated(position) => {
            if let Some(cell) = cells.get_mut(&position) {
                cell.set_active(true);
            }
        }
        PlacementEvent::Deactivated(position) => {
            if let Some(cell) = cells.get_mut(&position) {
                cell.set_active(false);
            }
        }
    }
}

impl PlacementSink for VisualizationCapture {
    fn on_cell_created(&mut self, position: IVec2, tile: TileId, rotation: f32) {
        self.events.push((
            self.frame,
            PlacementEvent::Created {
                position,
                tile,
                rotation,
            },
        ));
    }

    fn on_cell_activated(&mut self, position: IVec2) {
        self.events
            .push((self.frame, PlacementEvent::Activated(position)));
    }

    fn on_cell_deactivated(&mut self, position: IVec2) {
        self.events
            .push((self.frame, PlacementEvent::Deactivated(position)));
    }
}
