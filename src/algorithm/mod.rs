/// Grid assembly cycle, configuration and placement events
pub mod assembler;
/// Connector matching between two tiles
pub mod compatibility;
/// Precomputed compatibility lookup table
pub mod map;
/// Neighbour-constrained candidate filtering and random choice
pub mod selection;
