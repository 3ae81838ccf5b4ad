//! Command-line interface driving a simulated reference point over the grid

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Parser;
use glam::{IVec2, Vec3};
use tracing::info;

use crate::algorithm::assembler::{AssemblerConfig, GridAssembler};
use crate::algorithm::map::CompatibilityMap;
use crate::algorithm::selection::RandomSelector;
use crate::io::configuration::{
    DEFAULT_BLOCK_RADIUS, DEFAULT_CHUNK_GRID_SIZE, DEFAULT_CHUNK_REAL_SIZE, DEFAULT_HEADING,
    DEFAULT_SEED, DEFAULT_SPEED, DEFAULT_TICKS, GIF_FRAME_DELAY_MS, VISUALIZATION_SUFFIX,
};
use crate::io::error::{Result, invalid_parameter};
use crate::io::image::export_layout_as_png;
use crate::io::progress::ProgressManager;
use crate::io::tileset::TileSet;
use crate::io::visualization::VisualizationCapture;
use crate::spatial::trigger::{LinearPath, TerrainTrigger};

#[derive(Parser, Debug)]
#[command(name = "chunkweave")]
#[command(
    author,
    version,
    about = "Assemble connector-matched terrain tiles around a moving point"
)]
/// Command-line arguments for the assembly simulation
pub struct Cli {
    /// Output PNG for the final layout
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Directory of PNG road masks (built-in tiles when omitted)
    #[arg(short, long, value_name = "DIR")]
    pub tiles: Option<PathBuf>,

    /// Random seed for reproducible layouts
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Number of update cycles to simulate
    #[arg(short = 'n', long, default_value_t = DEFAULT_TICKS)]
    pub ticks: usize,

    /// Cells kept active on each side of the reference cell
    #[arg(short, long, default_value_t = DEFAULT_BLOCK_RADIUS)]
    pub radius: u32,

    /// World units travelled per tick
    #[arg(long, default_value_t = DEFAULT_SPEED)]
    pub speed: f32,

    /// Travel direction in degrees, counter-clockwise from +x
    #[arg(long, default_value_t = DEFAULT_HEADING, allow_negative_numbers = true)]
    pub heading: f32,

    /// Cells per edge of the built-in tiles (odd)
    #[arg(short, long, default_value_t = DEFAULT_CHUNK_GRID_SIZE)]
    pub grid_size: i32,

    /// World units per tile edge
    #[arg(long, default_value_t = DEFAULT_CHUNK_REAL_SIZE)]
    pub real_size: i32,

    /// Also export the run as an animated GIF
    #[arg(short, long)]
    pub visualize: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// GIF path next to the output PNG
    pub fn visualization_path(&self) -> PathBuf {
        let stem = self.output.file_stem().unwrap_or_default();
        let name = format!("{}{VISUALIZATION_SUFFIX}.gif", stem.to_string_lossy());
        self.output
            .parent()
            .map_or_else(|| PathBuf::from(&name), |parent| parent.join(&name))
    }
}

/// Outcome of one simulation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationSummary {
    /// Update cycles run
    pub ticks: usize,
    /// Cells placed in total
    pub placed_cells: usize,
    /// Cells active after the last cycle
    pub active_cells: usize,
    /// Reference cell of the last cycle
    pub final_center: IVec2,
    /// Written layout image
    pub output: PathBuf,
    /// Written animation, if requested
    pub visualization: Option<PathBuf>,
}

/// Wires tile set, compatibility map and assembler, then drives the assembler
/// with a point moving in a straight line
pub struct SimulationRunner {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl SimulationRunner {
    /// Create a new runner with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let ticks = cli.ticks;
        let progress_manager = cli
            .should_show_progress()
            .then(|| ProgressManager::new(ticks));

        Self {
            cli,
            progress_manager,
        }
    }

    /// Run the simulation and write its outputs
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Parameters are out of range
    /// - The tile set cannot be loaded or is malformed
    /// - Assembly hits a generation deadlock
    /// - Output images cannot be written
    pub fn run(&mut self) -> Result<SimulationSummary> {
        let start_time = Instant::now();
        if self.cli.real_size <= 0 {
            return Err(invalid_parameter(
                "real_size",
                &self.cli.real_size,
                &"must be positive",
            ));
        }
        let real_size = IVec2::splat(self.cli.real_size);

        let tileset = self.load_tileset(real_size)?;
        let registry = tileset.registry().clone();
        let map = CompatibilityMap::build(&registry)?;
        map.log_summary(&registry);
        info!(
            tiles = registry.len(),
            entries = map.entry_count(),
            "Compatibility map ready"
        );

        let config = AssemblerConfig {
            chunk_grid_size: registry.grid_size(),
            chunk_real_size: registry.real_size(),
            block_radius: self.cli.radius,
            central_tile: tileset.central_tile(),
        };
        let mut assembler =
            GridAssembler::new(registry, map, config, RandomSelector::new(self.cli.seed))?;

        let origin = real_size.as_vec2() / 2.0;
        let mut path = LinearPath::new(
            Vec3::new(origin.x, 0.0, origin.y),
            self.cli.heading,
            self.cli.speed,
        );
        let mut capture = self.cli.visualize.then(VisualizationCapture::new);

        let mut final_center = IVec2::ZERO;
        assembler.start(&mut capture)?;
        for _ in 0..self.cli.ticks {
            final_center = assembler.update_from_trigger(&path, &mut capture)?;
            if let Some(sink) = capture.as_mut() {
                sink.next_frame();
            }
            path.tick();

            if let Some(ref pm) = self.progress_manager {
                pm.tick(assembler.placed_count());
            }
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        export_layout_as_png(&assembler, &tileset, &self.cli.output)?;

        let visualization = capture
            .map(|capture| -> Result<PathBuf> {
                let viz_path = self.cli.visualization_path();
                capture.export_gif(&tileset, &viz_path, GIF_FRAME_DELAY_MS)?;
                Ok(viz_path)
            })
            .transpose()?;

        let summary = SimulationSummary {
            ticks: self.cli.ticks,
            placed_cells: assembler.placed_count(),
            active_cells: assembler.active_positions().len(),
            final_center,
            output: self.cli.output.clone(),
            visualization,
        };
        let end = path.position();
        info!(
            placed = summary.placed_cells,
            active = summary.active_cells,
            x = end.x,
            z = end.z,
            elapsed_ms = start_time.elapsed().as_millis(),
            "Simulation finished"
        );
        Ok(summary)
    }

    fn load_tileset(&self, real_size: IVec2) -> Result<TileSet> {
        self.cli.tiles.as_deref().map_or_else(
            || TileSet::builtin(self.cli.grid_size, real_size),
            |dir: &Path| TileSet::from_dir(dir, real_size),
        )
    }
}
