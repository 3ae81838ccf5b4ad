//! Assembly constants and runtime configuration defaults

// Tile geometry
/// Cells per tile edge for the built-in tile set (odd, so the road sits on a middle cell)
pub const DEFAULT_CHUNK_GRID_SIZE: i32 = 11;
/// World units per tile edge
pub const DEFAULT_CHUNK_REAL_SIZE: i32 = 10;

// Window
/// Cells kept active on each side of the reference cell
pub const DEFAULT_BLOCK_RADIUS: u32 = 2;

// Default values for configurable parameters
/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;
/// Number of simulated update cycles
pub const DEFAULT_TICKS: usize = 120;
/// Distance travelled by the reference point per tick
pub const DEFAULT_SPEED: f32 = 2.5;
/// Heading of the reference point in degrees, counter-clockwise from +x
pub const DEFAULT_HEADING: f32 = 30.0;

/// Asset name of the tile seeded at the origin
pub const CENTRAL_TILE_NAME: &str = "crossroad";

// Rendering
/// Road pixels are those darker than this luminance
pub const ROAD_LUMA_THRESHOLD: u8 = 128;
/// Road pixels must be at least this opaque
pub const ROAD_ALPHA_THRESHOLD: u8 = 128;
/// Output pixels per tile cell
pub const PIXELS_PER_CELL: u32 = 4;
/// Brightness factor applied to inactive cells
pub const INACTIVE_DIM_FACTOR: f32 = 0.45;

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 50;

// Output settings
/// Suffix added to visualization filenames
pub const VISUALIZATION_SUFFIX: &str = "_visualization";
/// Delay between GIF animation frames
pub const GIF_FRAME_DELAY_MS: u32 = 80;
/// Minimum frame delay that viewers reliably support (in milliseconds)
pub const VIEWER_MIN_FRAME_DELAY_MS: u32 = 50;
