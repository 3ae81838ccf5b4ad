//! Error types for tile registration, compatibility and grid assembly

use std::fmt;
use std::path::PathBuf;

use glam::IVec2;

use crate::spatial::face::Face;

/// Main error type for all assembly operations
#[derive(Debug)]
pub enum AssemblyError {
    /// Two tiles that must share a grid size do not
    ///
    /// Tiles of different size are never comparable, and every tile in a
    /// registry must match the configured chunk size.
    TileSizeMismatch {
        /// Size the operation required
        expected: IVec2,
        /// Size that was supplied
        found: IVec2,
    },

    /// A connector lies outside its tile's grid
    ConnectorOutOfBounds {
        /// Asset name of the offending tile
        tile: String,
        /// Connector position in tile-local coordinates
        position: IVec2,
        /// Grid size of the tile
        grid_size: IVec2,
    },

    /// A connector was authored with a width below one cell
    InvalidConnectorWidth {
        /// Asset name of the offending tile
        tile: String,
        /// The rejected width
        width: u32,
    },

    /// A tile with the same asset and grid size is already registered
    DuplicateTile {
        /// Asset name of the duplicate
        tile: String,
    },

    /// A tile handle that the registry or compatibility map never saw
    UnknownTile {
        /// The unknown handle
        index: usize,
        /// Number of registered tiles
        registered: usize,
    },

    /// The registry holds no tiles to choose from
    EmptyRegistry,

    /// No tile satisfies every placed neighbour of a new cell
    ///
    /// Indicates a tile set whose compatibility graph is disconnected.
    GenerationDeadlock {
        /// Grid position that could not be filled
        position: IVec2,
        /// Directions of the already placed neighbours
        directions: Vec<Face>,
    },

    /// An operation received input that indicates a caller bug
    InvalidArgument {
        /// Description of the violated precondition
        reason: String,
    },

    /// Configuration parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Tile set input doesn't meet the loader's requirements
    InvalidSourceData {
        /// Description of what's wrong with the source data
        reason: String,
    },

    /// Failed to load a tile mask image
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to save a rendered layout to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for AssemblyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TileSizeMismatch { expected, found } => {
                write!(
                    f,
                    "Tile size mismatch: expected {}x{}, found {}x{}",
                    expected.x, expected.y, found.x, found.y
                )
            }
            Self::ConnectorOutOfBounds {
                tile,
                position,
                grid_size,
            } => {
                write!(
                    f,
                    "Connector of tile '{tile}' at ({}, {}) lies outside the {}x{} grid",
                    position.x, position.y, grid_size.x, grid_size.y
                )
            }
            Self::InvalidConnectorWidth { tile, width } => {
                write!(f, "Connector of tile '{tile}' has invalid width {width}")
            }
            Self::DuplicateTile { tile } => {
                write!(f, "Tile '{tile}' is already registered")
            }
            Self::UnknownTile { index, registered } => {
                write!(
                    f,
                    "Tile handle {index} is not part of the map ({registered} tiles registered)"
                )
            }
            Self::EmptyRegistry => f.write_str("No tiles are registered"),
            Self::GenerationDeadlock {
                position,
                directions,
            } => {
                let names = directions
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(
                    f,
                    "No tile fits at ({}, {}) given neighbours [{names}]",
                    position.x, position.y
                )
            }
            Self::InvalidArgument { reason } => write!(f, "Invalid argument: {reason}"),
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::InvalidSourceData { reason } => {
                write!(f, "Invalid source data: {reason}")
            }
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for AssemblyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl AssemblyError {
    /// Whether this error stems from bad static tile data rather than a caller bug
    pub const fn is_authoring_error(&self) -> bool {
        matches!(
            self,
            Self::TileSizeMismatch { .. }
                | Self::ConnectorOutOfBounds { .. }
                | Self::InvalidConnectorWidth { .. }
                | Self::DuplicateTile { .. }
        )
    }
}

impl From<image::ImageError> for AssemblyError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for AssemblyError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Convenience type alias for assembly results
pub type Result<T> = std::result::Result<T, AssemblyError>;

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> AssemblyError {
    AssemblyError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an invalid argument error
pub fn invalid_argument(reason: &impl ToString) -> AssemblyError {
    AssemblyError::InvalidArgument {
        reason: reason.to_string(),
    }
}

/// Create an invalid source data error
pub fn invalid_source(reason: &impl ToString) -> AssemblyError {
    AssemblyError::InvalidSourceData {
        reason: reason.to_string(),
    }
}
