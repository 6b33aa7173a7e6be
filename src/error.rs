//! Error types for puzzle loading and volume access.

use thiserror::Error;

/// Errors surfaced by the puzzle core.
///
/// Pointer input never produces one of these: misses, stale targets and
/// redundant toggles are absorbed by the interaction controller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PuzzleError {
    #[error("cell {what} is outside the {width}x{height}x{depth} volume")]
    IndexOutOfRange {
        what: String,
        width: usize,
        height: usize,
        depth: usize,
    },

    #[error("voxel volume largest dimension ({largest}) exceeds the maximum ({max})")]
    VolumeTooLarge { largest: usize, max: usize },

    #[error("clue number {number} is out of range [1..{max}]")]
    InvalidClueNumber { number: usize, max: usize },

    #[error("volume dimensions must be positive, got {width}x{height}x{depth}")]
    InvalidDimensions {
        width: usize,
        height: usize,
        depth: usize,
    },

    #[error("a {width}x{height}x{depth} volume has more cells than can be addressed")]
    CellCountOverflow {
        width: usize,
        height: usize,
        depth: usize,
    },

    #[error("imported voxel ({x}, {y}, {z}) lies outside the source size")]
    VoxelOutOfBounds { x: usize, y: usize, z: usize },

    #[error("imported voxel references palette entry {0}, which the source palette lacks")]
    UnknownPaletteEntry(usize),

    #[error("more than {0} distinct colors in the imported palette")]
    PaletteOverflow(usize),
}

pub type Result<T> = std::result::Result<T, PuzzleError>;
