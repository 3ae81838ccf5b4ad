/// Command-line interface and simulation runner
pub mod cli;
/// Compile-time defaults
pub mod configuration;
/// Error types
pub mod error;
/// PNG rendering of placed cells
pub mod image;
/// Progress display
pub mod progress;
/// Road-mask tile sets
pub mod tileset;
/// Event capture and GIF export
pub mod visualization;
