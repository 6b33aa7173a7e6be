pub mod clues;
pub mod import;
pub mod volume;

pub use clues::ClueMaxima;
pub use volume::VoxelVolume;

/// Palette slot of a voxel. Slot 0 is the reserved "no color" entry.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct ColorIndex(pub u8);

impl ColorIndex {
    pub const EMPTY: Self = Self(0);

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn is_colored(self) -> bool {
        self.0 != 0
    }
}

/// Player-assigned state of a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum CellState {
    #[default]
    Grid = 0,
    Marked = 1,
    Crossed = 2,
}

impl CellState {
    pub fn id(self) -> u32 {
        self as u32
    }
}

/// One voxel: immutable color plus mutable player state.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub struct Cell {
    pub color: ColorIndex,
    pub state: CellState,
}

/// Packed `0xRRGGBB` palette color.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct Rgb(pub u32);

impl Rgb {
    pub fn from_components(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    pub fn components(self) -> [u8; 3] {
        [(self.0 >> 16) as u8, (self.0 >> 8) as u8, self.0 as u8]
    }
}

/// Principal axes of the volume.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Axis with the largest absolute component. Ties resolve to X, then Y.
    pub fn dominant(v: [f32; 3]) -> Self {
        let lx = v[0].abs();
        let ly = v[1].abs();
        let lz = v[2].abs();
        if lx >= ly && lx >= lz {
            Axis::X
        } else if ly >= lz {
            Axis::Y
        } else {
            Axis::Z
        }
    }

    pub fn unit(self) -> [f32; 3] {
        match self {
            Axis::X => [1.0, 0.0, 0.0],
            Axis::Y => [0.0, 1.0, 0.0],
            Axis::Z => [0.0, 0.0, 1.0],
        }
    }

    pub fn component(self, coords: [usize; 3]) -> usize {
        match self {
            Axis::X => coords[0],
            Axis::Y => coords[1],
            Axis::Z => coords[2],
        }
    }
}
