use cgmath::Point3;

use super::clues::{self, ClueMaxima};
use super::{Cell, CellState, ColorIndex, Rgb};
use crate::error::{PuzzleError, Result};

/// The puzzle volume: a dense `width * height * depth` grid of cells.
///
/// Cells are stored X-fastest, then Y, then Z. Color data is fixed at
/// construction; only cell states change while the puzzle is being solved.
#[derive(Clone, Debug)]
pub struct VoxelVolume {
    width: usize,
    height: usize,
    depth: usize,
    cells: Vec<Cell>,
    palette: Vec<Rgb>,
    clue_maxima: ClueMaxima,
}

impl VoxelVolume {
    /// Build a volume from per-cell color slots and the palette they index.
    ///
    /// `palette[0]` is the reserved "no color" slot; an empty palette gets one
    /// inserted. All states start as [`CellState::Grid`].
    pub fn from_colors(
        dimensions: [usize; 3],
        colors: Vec<ColorIndex>,
        mut palette: Vec<Rgb>,
    ) -> Result<Self> {
        let [width, height, depth] = dimensions;
        if colors.len() != cell_count(dimensions)? {
            return Err(PuzzleError::IndexOutOfRange {
                what: format!("count {}", colors.len()),
                width,
                height,
                depth,
            });
        }
        if palette.is_empty() {
            palette.push(Rgb::default());
        }
        if let Some(bad) = colors.iter().find(|c| c.0 as usize >= palette.len()) {
            return Err(PuzzleError::UnknownPaletteEntry(bad.0 as usize));
        }

        let cells = colors
            .into_iter()
            .map(|color| Cell {
                color,
                state: CellState::Grid,
            })
            .collect();
        let mut volume = Self {
            width,
            height,
            depth,
            cells,
            palette,
            clue_maxima: ClueMaxima::default(),
        };
        volume.clue_maxima = volume.compute_clue_maxima();
        Ok(volume)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn dimensions(&self) -> [usize; 3] {
        [self.width, self.height, self.depth]
    }

    pub fn largest_dimension(&self) -> usize {
        self.width.max(self.height).max(self.depth)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn palette(&self) -> &[Rgb] {
        &self.palette
    }

    /// Fail with [`PuzzleError::VolumeTooLarge`] if any extent exceeds `max`.
    pub fn check_fits(&self, max: usize) -> Result<()> {
        let largest = self.largest_dimension();
        if largest > max {
            return Err(PuzzleError::VolumeTooLarge { largest, max });
        }
        Ok(())
    }

    fn out_of_range(&self, what: String) -> PuzzleError {
        PuzzleError::IndexOutOfRange {
            what,
            width: self.width,
            height: self.height,
            depth: self.depth,
        }
    }

    pub fn index(&self, x: usize, y: usize, z: usize) -> Result<usize> {
        if x >= self.width || y >= self.height || z >= self.depth {
            return Err(self.out_of_range(format!("({x}, {y}, {z})")));
        }
        Ok(self.index_unchecked(x, y, z))
    }

    pub(crate) fn index_unchecked(&self, x: usize, y: usize, z: usize) -> usize {
        debug_assert!(x < self.width && y < self.height && z < self.depth);
        x + y * self.width + z * self.width * self.height
    }

    /// Inverse of [`VoxelVolume::index`].
    pub fn coords(&self, index: usize) -> Result<[usize; 3]> {
        self.check_index(index)?;
        let wh = self.width * self.height;
        let z = index / wh;
        let xy = index % wh;
        Ok([xy % self.width, xy / self.width, z])
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.cells.len() {
            return Err(self.out_of_range(format!("index {index}")));
        }
        Ok(())
    }

    pub(crate) fn cell_at(&self, index: usize) -> Cell {
        self.cells[index]
    }

    pub fn state(&self, index: usize) -> Result<CellState> {
        self.check_index(index)?;
        Ok(self.cells[index].state)
    }

    pub fn set_state(&mut self, index: usize, state: CellState) -> Result<()> {
        self.check_index(index)?;
        self.cells[index].state = state;
        Ok(())
    }

    pub fn color_index(&self, index: usize) -> Result<ColorIndex> {
        self.check_index(index)?;
        Ok(self.cells[index].color)
    }

    /// Palette color of a cell, `None` for empty cells.
    pub fn color(&self, index: usize) -> Result<Option<Rgb>> {
        let color = self.color_index(index)?;
        Ok(if color.is_empty() {
            None
        } else {
            Some(self.palette[color.0 as usize])
        })
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// True when every colored cell is Marked and no empty cell is.
    pub fn is_solved(&self) -> bool {
        self.cells
            .iter()
            .all(|cell| cell.color.is_colored() == (cell.state == CellState::Marked))
    }

    /// Mark every colored cell and cross every empty one.
    pub fn show_solution(&mut self) {
        for cell in &mut self.cells {
            cell.state = if cell.color.is_colored() {
                CellState::Marked
            } else {
                CellState::Crossed
            };
        }
    }

    pub fn reset_states(&mut self) {
        for cell in &mut self.cells {
            cell.state = CellState::Grid;
        }
    }

    pub fn compute_clue_maxima(&self) -> ClueMaxima {
        clues::compute_maxima(self)
    }

    /// Cached result of [`VoxelVolume::compute_clue_maxima`] from load time.
    pub fn clue_maxima(&self) -> ClueMaxima {
        self.clue_maxima
    }

    /// Center of the grid in cell coordinates.
    pub fn center(&self) -> [f32; 3] {
        [
            (self.width as f32 - 1.0) / 2.0,
            (self.height as f32 - 1.0) / 2.0,
            (self.depth as f32 - 1.0) / 2.0,
        ]
    }

    /// Position of a cell relative to the volume center.
    pub fn cell_position(&self, index: usize) -> Result<Point3<f32>> {
        let [x, y, z] = self.coords(index)?;
        let [cx, cy, cz] = self.center();
        Ok(Point3::new(x as f32 - cx, y as f32 - cy, z as f32 - cz))
    }

    pub fn bounding_radius(&self) -> f32 {
        let hw = self.width as f32 / 2.0;
        let hh = self.height as f32 / 2.0;
        let hd = self.depth as f32 / 2.0;
        (hw * hw + hh * hh + hd * hd).sqrt()
    }

    /// Bounding radius once each half extent is padded by half the clue margin.
    pub fn bounding_radius_with_clues(&self) -> f32 {
        let m = self.clue_maxima;
        let hw = (self.width + m.x) as f32 / 2.0;
        let hh = (self.height + m.y) as f32 / 2.0;
        let hd = (self.depth + m.z) as f32 / 2.0;
        (hw * hw + hh * hh + hd * hd).sqrt()
    }

    pub fn frustum_half_size(&self, minimum: f32) -> f32 {
        self.bounding_radius_with_clues().max(minimum)
    }
}

/// Number of cells in a volume of the given extents.
pub(crate) fn cell_count(dimensions: [usize; 3]) -> Result<usize> {
    let [width, height, depth] = dimensions;
    if width == 0 || height == 0 || depth == 0 {
        return Err(PuzzleError::InvalidDimensions {
            width,
            height,
            depth,
        });
    }
    width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(depth))
        .ok_or(PuzzleError::CellCountOverflow {
            width,
            height,
            depth,
        })
}

/// Horizontal and vertical frustum half extents for an orthographic camera.
pub fn frustum_extents(half_size: f32, aspect: f32) -> [f32; 2] {
    [aspect * half_size, half_size]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn volume_from(dimensions: [usize; 3], colors: &[u8]) -> VoxelVolume {
        let max = colors.iter().copied().max().unwrap_or(0) as usize;
        let palette = (0..=max).map(|i| Rgb(i as u32 * 0x111111)).collect();
        VoxelVolume::from_colors(
            dimensions,
            colors.iter().map(|&c| ColorIndex(c)).collect(),
            palette,
        )
        .unwrap()
    }

    fn set_states(volume: &mut VoxelVolume, states: &[CellState]) {
        for (i, &s) in states.iter().enumerate() {
            volume.set_state(i, s).unwrap();
        }
    }

    #[test]
    fn index_and_coords_are_inverse() {
        let volume = volume_from([4, 3, 5], &[0; 60]);
        for z in 0..5 {
            for y in 0..3 {
                for x in 0..4 {
                    let index = volume.index(x, y, z).unwrap();
                    assert_eq!(volume.coords(index).unwrap(), [x, y, z]);
                }
            }
        }
        assert_eq!(volume.index(3, 2, 4).unwrap(), 59);
    }

    #[test]
    fn out_of_range_access_fails() {
        let mut volume = volume_from([2, 2, 2], &[0; 8]);
        assert!(matches!(
            volume.index(2, 0, 0),
            Err(PuzzleError::IndexOutOfRange { .. })
        ));
        assert!(volume.coords(8).is_err());
        assert!(volume.state(8).is_err());
        assert!(volume.set_state(100, CellState::Marked).is_err());
        assert!(volume.color_index(8).is_err());
    }

    #[test]
    fn zero_dimension_is_rejected() {
        let err = VoxelVolume::from_colors([0, 1, 1], Vec::new(), Vec::new()).unwrap_err();
        assert!(matches!(err, PuzzleError::InvalidDimensions { .. }));
    }

    #[test]
    fn color_slots_must_exist_in_palette() {
        let err = VoxelVolume::from_colors(
            [2, 1, 1],
            vec![ColorIndex(0), ColorIndex(3)],
            vec![Rgb(0), Rgb(0xff0000)],
        )
        .unwrap_err();
        assert_eq!(err, PuzzleError::UnknownPaletteEntry(3));
    }

    #[test]
    fn solved_requires_exactly_colored_cells_marked() {
        use CellState::*;
        let mut volume = volume_from([2, 1, 1], &[0, 5]);

        set_states(&mut volume, &[Crossed, Marked]);
        assert!(volume.is_solved());

        set_states(&mut volume, &[Grid, Marked]);
        assert!(volume.is_solved());

        set_states(&mut volume, &[Crossed, Crossed]);
        assert!(!volume.is_solved());

        set_states(&mut volume, &[Marked, Marked]);
        assert!(!volume.is_solved());

        set_states(&mut volume, &[Crossed, Grid]);
        assert!(!volume.is_solved());
    }

    #[test]
    fn show_solution_solves_the_puzzle() {
        let mut volume = volume_from([3, 1, 1], &[1, 0, 2]);
        assert!(!volume.is_solved());
        volume.show_solution();
        assert!(volume.is_solved());
        assert_eq!(volume.state(1).unwrap(), CellState::Crossed);
        assert_eq!(volume.state(2).unwrap(), CellState::Marked);

        volume.reset_states();
        assert!(volume.cells().iter().all(|c| c.state == CellState::Grid));
    }

    #[test]
    fn clue_maxima_per_axis() {
        // 4x2x1: row y=0 is [1,1,0,1], row y=1 is [0,1,0,0]
        let volume = volume_from([4, 2, 1], &[1, 1, 0, 1, 0, 1, 0, 0]);
        let maxima = volume.clue_maxima();
        assert_eq!(maxima.x, 2);
        assert_eq!(maxima.y, 1);
        assert_eq!(maxima.z, 1);
        assert_eq!(volume.compute_clue_maxima(), maxima);
    }

    #[test]
    fn clue_maxima_along_depth_flushes_final_run() {
        // 1x1x5 column [1,0,1,0,1] along Z
        let volume = volume_from([1, 1, 5], &[1, 0, 1, 0, 1]);
        assert_eq!(volume.clue_maxima().z, 3);
        assert_eq!(volume.clue_maxima().x, 1);
    }

    #[test]
    fn state_changes_do_not_touch_colors_or_maxima() {
        let mut volume = volume_from([2, 1, 1], &[0, 1]);
        let before = volume.clue_maxima();
        volume.set_state(0, CellState::Marked).unwrap();
        assert_eq!(volume.color_index(0).unwrap(), ColorIndex::EMPTY);
        assert_eq!(volume.clue_maxima(), before);
    }

    #[test]
    fn framing_values() {
        let volume = volume_from([2, 2, 2], &[0; 8]);
        assert!((volume.bounding_radius() - 3f32.sqrt()).abs() < 1e-6);
        assert_eq!(volume.center(), [0.5, 0.5, 0.5]);
        let p = volume.cell_position(7).unwrap();
        assert_eq!([p.x, p.y, p.z], [0.5, 0.5, 0.5]);
        assert_eq!(volume.frustum_half_size(5.0), 5.0);
        assert_eq!(frustum_extents(5.0, 2.0), [10.0, 5.0]);
    }

    #[test]
    fn check_fits_reports_largest_dimension() {
        let volume = volume_from([3, 1, 1], &[0; 3]);
        assert!(volume.check_fits(3).is_ok());
        assert_eq!(
            volume.check_fits(2),
            Err(PuzzleError::VolumeTooLarge { largest: 3, max: 2 })
        );
    }

    #[test]
    fn overflowing_extents_are_an_error() {
        let err =
            VoxelVolume::from_colors([usize::MAX, 2, 1], Vec::new(), Vec::new()).unwrap_err();
        assert_eq!(
            err,
            PuzzleError::CellCountOverflow {
                width: usize::MAX,
                height: 2,
                depth: 1,
            }
        );
        assert_eq!(
            cell_count([3, 0, 2]).unwrap_err(),
            PuzzleError::InvalidDimensions {
                width: 3,
                height: 0,
                depth: 2,
            }
        );
        assert_eq!(cell_count([3, 4, 2]).unwrap(), 24);
    }
}
