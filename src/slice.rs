//! Cut-plane sliders that peel layers off the volume in the pick view.

use cgmath::{Point3, Vector3};

use crate::voxel::{Axis, VoxelVolume};

/// Outcome of a slider step request.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StepChange {
    Unchanged,
    /// The step moved; hidden cells must be recomputed.
    Changed { step: usize },
}

/// One axis-aligned cut plane. Identified by the axis of its normal: the
/// `Axis::X` slider sits on the +X face and hides the highest-X layers.
#[derive(Clone, Debug, PartialEq)]
pub struct Slider {
    axis: Axis,
    normal: Vector3<f32>,
    base_position: Point3<f32>,
    step: usize,
    step_max: usize,
}

impl Slider {
    fn new(volume: &VoxelVolume, axis: Axis) -> Self {
        let [w, h, d] = volume.dimensions();
        let [cx, cy, cz] = volume.center();
        let (base_position, extent) = match axis {
            Axis::X => (Point3::new(w as f32 - 0.5 - cx, -0.5 - cy, -0.5 - cz), w),
            Axis::Y => (Point3::new(-0.5 - cx, h as f32 - 0.5 - cy, -0.5 - cz), h),
            Axis::Z => (Point3::new(-0.5 - cx, -0.5 - cy, d as f32 - 0.5 - cz), d),
        };
        Self {
            axis,
            normal: Vector3::from(axis.unit()),
            base_position,
            step: 0,
            step_max: extent - 1,
        }
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn normal(&self) -> Vector3<f32> {
        self.normal
    }

    pub fn base_position(&self) -> Point3<f32> {
        self.base_position
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn step_max(&self) -> usize {
        self.step_max
    }

    /// Handle position in volume space: pushed inward by one cell per step.
    pub fn position(&self) -> Point3<f32> {
        self.base_position - self.normal * self.step as f32
    }

    pub fn set_step(&mut self, step: i64) -> StepChange {
        let clamped = step.clamp(0, self.step_max as i64) as usize;
        if clamped == self.step {
            return StepChange::Unchanged;
        }
        self.step = clamped;
        StepChange::Changed { step: clamped }
    }
}

/// Cells currently cut away by the sliders.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct HiddenCells {
    hidden: Vec<bool>,
    count: usize,
}

impl HiddenCells {
    pub fn none(len: usize) -> Self {
        Self {
            hidden: vec![false; len],
            count: 0,
        }
    }

    fn hide(&mut self, index: usize) {
        if !self.hidden[index] {
            self.hidden[index] = true;
            self.count += 1;
        }
    }

    pub fn is_hidden(&self, index: usize) -> bool {
        self.hidden.get(index).copied().unwrap_or(false)
    }

    pub fn is_visible(&self, index: usize) -> bool {
        index < self.hidden.len() && !self.hidden[index]
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.hidden
            .iter()
            .enumerate()
            .filter_map(|(i, &h)| h.then_some(i))
    }
}

/// Union of the cells hidden by three slider steps, indexed by `Axis::ALL`.
pub fn hidden_cells_for_steps(dimensions: [usize; 3], steps: [usize; 3]) -> HiddenCells {
    let [w, h, d] = dimensions;
    let mut hidden = HiddenCells::none(w * h * d);
    for (axis, &step) in Axis::ALL.iter().zip(steps.iter()) {
        let extent = axis.component(dimensions);
        let step = step.min(extent);
        for layer in extent - step..extent {
            match axis {
                Axis::X => {
                    for z in 0..d {
                        for y in 0..h {
                            hidden.hide(layer + y * w + z * w * h);
                        }
                    }
                }
                Axis::Y => {
                    for z in 0..d {
                        for x in 0..w {
                            hidden.hide(x + layer * w + z * w * h);
                        }
                    }
                }
                Axis::Z => {
                    for y in 0..h {
                        for x in 0..w {
                            hidden.hide(x + y * w + layer * w * h);
                        }
                    }
                }
            }
        }
    }
    hidden
}

/// The three sliders of the pick view.
#[derive(Clone, Debug, PartialEq)]
pub struct SliceSelector {
    dimensions: [usize; 3],
    sliders: [Slider; 3],
}

impl SliceSelector {
    pub fn new(volume: &VoxelVolume) -> Self {
        Self {
            dimensions: volume.dimensions(),
            sliders: [
                Slider::new(volume, Axis::X),
                Slider::new(volume, Axis::Y),
                Slider::new(volume, Axis::Z),
            ],
        }
    }

    fn slot(axis: Axis) -> usize {
        match axis {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    pub fn slider(&self, axis: Axis) -> &Slider {
        &self.sliders[Self::slot(axis)]
    }

    pub fn sliders(&self) -> &[Slider; 3] {
        &self.sliders
    }

    pub fn steps(&self) -> [usize; 3] {
        [
            self.sliders[0].step,
            self.sliders[1].step,
            self.sliders[2].step,
        ]
    }

    pub fn set_step(&mut self, axis: Axis, step: i64) -> StepChange {
        self.sliders[Self::slot(axis)].set_step(step)
    }

    /// Move a slider by a signed number of layers.
    pub fn move_by(&mut self, axis: Axis, delta: i64) -> StepChange {
        let current = self.slider(axis).step as i64;
        self.set_step(axis, current.saturating_add(delta))
    }

    pub fn reset(&mut self) {
        for slider in &mut self.sliders {
            slider.step = 0;
        }
    }

    pub fn compute_hidden_cells(&self) -> HiddenCells {
        hidden_cells_for_steps(self.dimensions, self.steps())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voxel::{ColorIndex, Rgb};

    fn empty_volume(dimensions: [usize; 3]) -> VoxelVolume {
        let len = dimensions.iter().product();
        VoxelVolume::from_colors(dimensions, vec![ColorIndex::EMPTY; len], vec![Rgb(0)]).unwrap()
    }

    #[test]
    fn step_is_clamped_and_idempotent() {
        let volume = empty_volume([4, 3, 2]);
        let mut selector = SliceSelector::new(&volume);
        assert_eq!(selector.slider(Axis::X).step_max(), 3);

        assert_eq!(selector.set_step(Axis::X, 2), StepChange::Changed { step: 2 });
        assert_eq!(selector.set_step(Axis::X, 2), StepChange::Unchanged);
        assert_eq!(selector.set_step(Axis::X, 99), StepChange::Changed { step: 3 });
        assert_eq!(selector.set_step(Axis::X, 50), StepChange::Unchanged);
        assert_eq!(selector.set_step(Axis::X, -7), StepChange::Changed { step: 0 });
        assert_eq!(selector.move_by(Axis::Z, -1), StepChange::Unchanged);
        assert_eq!(selector.move_by(Axis::Z, 1), StepChange::Changed { step: 1 });
        assert_eq!(selector.move_by(Axis::Z, 1), StepChange::Unchanged);
    }

    #[test]
    fn width_slider_hides_highest_x_layers() {
        let volume = empty_volume([4, 3, 2]);
        let mut selector = SliceSelector::new(&volume);
        selector.set_step(Axis::X, 2);
        let hidden = selector.compute_hidden_cells();

        for index in 0..volume.len() {
            let [x, _, _] = volume.coords(index).unwrap();
            assert_eq!(hidden.is_hidden(index), x >= 2, "index {index}");
        }
        assert_eq!(hidden.count(), 2 * 3 * 2);
    }

    #[test]
    fn height_and_depth_sliders_hide_their_top_layers() {
        let volume = empty_volume([3, 3, 3]);
        let mut selector = SliceSelector::new(&volume);
        selector.set_step(Axis::Y, 1);
        selector.set_step(Axis::Z, 1);
        let hidden = selector.compute_hidden_cells();

        for index in 0..volume.len() {
            let [_, y, z] = volume.coords(index).unwrap();
            assert_eq!(hidden.is_hidden(index), y == 2 || z == 2);
        }
        // union, not sum: the shared edge row counts once
        assert_eq!(hidden.count(), 9 + 9 - 3);
        assert_eq!(hidden.iter().count(), hidden.count());
    }

    #[test]
    fn reset_restores_full_visibility() {
        let volume = empty_volume([2, 2, 2]);
        let mut selector = SliceSelector::new(&volume);
        let initial = selector.compute_hidden_cells();
        assert!(initial.is_empty());

        selector.set_step(Axis::X, 1);
        selector.set_step(Axis::Y, 1);
        assert!(!selector.compute_hidden_cells().is_empty());

        selector.reset();
        assert_eq!(selector.steps(), [0, 0, 0]);
        assert_eq!(selector.compute_hidden_cells(), initial);
    }

    #[test]
    fn handle_moves_inward_with_step() {
        let volume = empty_volume([4, 2, 2]);
        let mut selector = SliceSelector::new(&volume);
        let base = selector.slider(Axis::X).position();
        assert_eq!(base, Point3::new(2.0, -1.0, -1.0));

        selector.set_step(Axis::X, 3);
        assert_eq!(selector.slider(Axis::X).position(), Point3::new(-1.0, -1.0, -1.0));
    }

    #[test]
    fn huge_moves_saturate_at_the_ends() {
        let volume = empty_volume([5, 2, 2]);
        let mut selector = SliceSelector::new(&volume);
        selector.set_step(Axis::X, 1);
        assert_eq!(selector.move_by(Axis::X, i64::MAX), StepChange::Changed { step: 4 });
        assert_eq!(selector.move_by(Axis::X, i64::MAX), StepChange::Unchanged);
        assert_eq!(selector.move_by(Axis::X, i64::MIN), StepChange::Changed { step: 0 });
    }

    #[test]
    fn single_cell_axis_never_moves() {
        let volume = empty_volume([1, 1, 1]);
        let mut selector = SliceSelector::new(&volume);
        assert_eq!(selector.set_step(Axis::Y, 4), StepChange::Unchanged);
        assert!(selector.compute_hidden_cells().is_empty());
    }
}
