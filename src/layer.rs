//! Flattening a picked volume slice into the 2D nonogram the player solves.

use cgmath::Vector3;

use crate::error::{PuzzleError, Result};
use crate::voxel::clues::run_lengths;
use crate::voxel::{Axis, CellState, VoxelVolume};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ClueSide {
    Top,
    Left,
}

/// A clue number and where it sits around the layer grid.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ClueLabel {
    pub number: usize,
    pub side: ClueSide,
    /// Layer-plane position, same frame as [`Layer::cell_position`].
    pub position: [f32; 2],
}

/// Name of the label asset for a clue number, zero-padded to `digits_min`.
pub fn clue_label_name(number: usize, max: usize, digits_min: usize) -> Result<String> {
    if number < 1 || number > max {
        return Err(PuzzleError::InvalidClueNumber { number, max });
    }
    Ok(format!("num{number:0digits_min$}"))
}

/// One 2D layer of the volume, row-major `width x height`.
///
/// The layer only stores indices into the volume; cell states are always read
/// from and written to the volume.
#[derive(Clone, Debug, PartialEq)]
pub struct Layer {
    axis: Axis,
    width: usize,
    height: usize,
    indices: Vec<usize>,
    top_clues: Vec<Vec<usize>>,
    left_clues: Vec<Vec<usize>>,
}

impl Layer {
    /// Build the layer through `hit_index` perpendicular to the dominant axis
    /// of `face_normal` (volume-local).
    pub fn project(
        volume: &VoxelVolume,
        hit_index: usize,
        face_normal: Vector3<f32>,
    ) -> Result<Self> {
        let [hx, hy, hz] = volume.coords(hit_index)?;
        let [w, h, d] = volume.dimensions();
        let axis = Axis::dominant(face_normal.into());

        let (width, height) = match axis {
            Axis::X => (d, h),
            Axis::Y => (w, d),
            Axis::Z => (w, h),
        };
        let indices = (0..width * height)
            .map(|i| {
                let (lx, ly) = (i % width, i / width);
                match axis {
                    Axis::X => volume.index_unchecked(hx, ly, d - 1 - lx),
                    Axis::Y => volume.index_unchecked(lx, hy, d - 1 - ly),
                    Axis::Z => volume.index_unchecked(lx, ly, hz),
                }
            })
            .collect::<Vec<_>>();

        let colored = |i: usize| volume.cell_at(indices[i]).color.is_colored();
        let top_clues = (0..width)
            .map(|x| run_lengths((0..height).map(|y| colored(x + y * width))))
            .collect();
        let left_clues = (0..height)
            .map(|y| run_lengths((0..width).rev().map(|x| colored(x + y * width))))
            .collect();

        log::debug!(
            "Projected {:?} layer {}x{} through cell ({}, {}, {})",
            axis,
            width,
            height,
            hx,
            hy,
            hz
        );

        Ok(Self {
            axis,
            width,
            height,
            indices,
            top_clues,
            left_clues,
        })
    }

    /// Axis perpendicular to the layer.
    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn volume_indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn volume_index(&self, layer_index: usize) -> Option<usize> {
        self.indices.get(layer_index).copied()
    }

    /// Run lengths of column `x`, from the bottom row upward.
    pub fn column_clues(&self, x: usize) -> &[usize] {
        self.top_clues.get(x).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Run lengths of row `y`, from the right edge leftward.
    pub fn row_clues(&self, y: usize) -> &[usize] {
        self.left_clues.get(y).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn top_clues(&self) -> &[Vec<usize>] {
        &self.top_clues
    }

    pub fn left_clues(&self) -> &[Vec<usize>] {
        &self.left_clues
    }

    fn center(&self) -> [f32; 2] {
        [
            (self.width as f32 - 1.0) / 2.0,
            (self.height as f32 - 1.0) / 2.0,
        ]
    }

    pub fn cell_position(&self, layer_index: usize) -> [f32; 2] {
        let [cx, cy] = self.center();
        let x = (layer_index % self.width) as f32;
        let y = (layer_index / self.width) as f32;
        [x - cx, y - cy]
    }

    /// Clue numbers stacked above each column and left of each row, nearest
    /// the grid first.
    pub fn clue_labels(&self) -> Vec<ClueLabel> {
        let [cx, cy] = self.center();
        let mut labels = Vec::new();
        for (x, runs) in self.top_clues.iter().enumerate() {
            for (k, &number) in runs.iter().enumerate() {
                labels.push(ClueLabel {
                    number,
                    side: ClueSide::Top,
                    position: [x as f32 - cx, (k + self.height) as f32 - cy],
                });
            }
        }
        for (y, runs) in self.left_clues.iter().enumerate() {
            for (k, &number) in runs.iter().enumerate() {
                labels.push(ClueLabel {
                    number,
                    side: ClueSide::Left,
                    position: [-((k + 1) as f32) - cx, y as f32 - cy],
                });
            }
        }
        labels
    }

    /// Top-left corner slot, diagonal to the clue margins.
    pub fn action_switch_position(&self) -> [f32; 2] {
        let [cx, cy] = self.center();
        [-1.0 - cx, self.height as f32 - cy]
    }

    pub fn state(&self, volume: &VoxelVolume, layer_index: usize) -> Result<CellState> {
        volume.state(self.resolve(volume, layer_index)?)
    }

    /// Flip a cell between Grid and `target`. A cell already in `target`
    /// returns to Grid. Returns the state written.
    pub fn toggle(
        &self,
        volume: &mut VoxelVolume,
        layer_index: usize,
        target: CellState,
    ) -> Result<CellState> {
        let index = self.resolve(volume, layer_index)?;
        let next = if volume.state(index)? == target {
            CellState::Grid
        } else {
            target
        };
        volume.set_state(index, next)?;
        Ok(next)
    }

    /// Force a cell into `state`. Returns whether the stored state changed.
    pub fn paint(
        &self,
        volume: &mut VoxelVolume,
        layer_index: usize,
        state: CellState,
    ) -> Result<bool> {
        let index = self.resolve(volume, layer_index)?;
        if volume.state(index)? == state {
            return Ok(false);
        }
        volume.set_state(index, state)?;
        Ok(true)
    }

    fn resolve(&self, volume: &VoxelVolume, layer_index: usize) -> Result<usize> {
        self.volume_index(layer_index).ok_or_else(|| PuzzleError::IndexOutOfRange {
            what: format!("layer index {layer_index}"),
            width: volume.width(),
            height: volume.height(),
            depth: volume.depth(),
        })
    }
}
