//! The view state machine: pick a layer in the 3D volume, solve it on the 2D
//! layer view, and show the finished model once the whole volume is solved.
//!
//! Pointer gestures arrive as `down -> move* -> up`. Every handler tolerates
//! missing rays, unmatched `up`s and targets that no longer apply; those are
//! silently ignored rather than reported.

use cgmath::{InnerSpace, Vector3};
use log::{debug, info, warn};

use crate::config::PuzzleConfig;
use crate::error::{PuzzleError, Result};
use crate::layer::Layer;
use crate::notify::RenderNotifier;
use crate::picking::{PickFrame, PickHit, PickTarget, Picker, Plane};
use crate::slice::{HiddenCells, SliceSelector, StepChange};
use crate::voxel::import::{import_volume, VoxelSource};
use crate::voxel::volume::frustum_extents;
use crate::voxel::{Axis, CellState, VoxelVolume};

const DRAG_PLANE_EPSILON: f32 = 1e-6;

/// Which of the three views is active.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ViewKind {
    Selecting,
    Solving,
    Solved,
}

/// What a stroke on the layer view writes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum PaintAction {
    #[default]
    Mark,
    Cross,
}

impl PaintAction {
    pub fn target_state(self) -> CellState {
        match self {
            PaintAction::Mark => CellState::Marked,
            PaintAction::Cross => CellState::Crossed,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            PaintAction::Mark => PaintAction::Cross,
            PaintAction::Cross => PaintAction::Mark,
        }
    }

    /// State pictured on the action switch: the action it switches to.
    pub fn switch_display_state(self) -> CellState {
        self.toggled().target_state()
    }
}

/// The layer being solved and the active paint action.
#[derive(Clone, Debug)]
pub struct SolvingView {
    pub layer: Layer,
    pub action: PaintAction,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SolvedView {
    /// Idle spin around Y, radians.
    pub spin: f32,
}

#[derive(Clone, Debug)]
enum View {
    Selecting,
    Solving(SolvingView),
    Solved(SolvedView),
}

#[derive(Copy, Clone, Debug)]
struct SliderDrag {
    axis: Axis,
    plane: Plane,
    /// Slider normal in world space.
    normal: Vector3<f32>,
    /// Handle position minus grab point, world space.
    offset: Vector3<f32>,
}

#[derive(Copy, Clone, Debug)]
enum Gesture {
    Idle,
    /// `down` was fully handled; the matching `up` does nothing.
    Consumed,
    /// `down` struck nothing on the layer view.
    Missed,
    DraggingSlider(SliderDrag),
    Painting { applied: CellState, last_cell: usize },
}

/// One loaded puzzle and everything derived from it.
#[derive(Clone, Debug)]
struct Session {
    volume: VoxelVolume,
    sliders: SliceSelector,
    hidden: HiddenCells,
    view: View,
    gesture: Gesture,
}

impl Session {
    fn new(volume: VoxelVolume) -> Self {
        let sliders = SliceSelector::new(&volume);
        let hidden = sliders.compute_hidden_cells();
        Self {
            volume,
            sliders,
            hidden,
            view: View::Selecting,
            gesture: Gesture::Idle,
        }
    }

    fn view_kind(&self) -> ViewKind {
        match self.view {
            View::Selecting => ViewKind::Selecting,
            View::Solving(_) => ViewKind::Solving,
            View::Solved(_) => ViewKind::Solved,
        }
    }

    fn enter(&mut self, view: View, notifier: &mut impl RenderNotifier) {
        self.view = view;
        let kind = self.view_kind();
        info!("Entering {:?} view", kind);
        notifier.view_transition(kind);
    }

    fn down_selecting(
        &mut self,
        hit: Option<PickHit>,
        frame: &PickFrame,
        notifier: &mut impl RenderNotifier,
    ) {
        let Some(hit) = hit else {
            return;
        };
        match hit.target {
            PickTarget::VolumeCell(index) if self.hidden.is_visible(index) => {
                match Layer::project(&self.volume, index, hit.face_normal) {
                    Ok(layer) => {
                        self.gesture = Gesture::Consumed;
                        self.enter(
                            View::Solving(SolvingView {
                                layer,
                                action: PaintAction::Mark,
                            }),
                            notifier,
                        );
                    }
                    Err(e) => warn!("Ignoring pick on cell {}: {}", index, e),
                }
            }
            PickTarget::Slider(axis) => {
                if let Some(drag) = self.begin_drag(axis, &hit, frame) {
                    debug!(
                        "Dragging {:?} slider from step {}",
                        axis,
                        self.sliders.slider(axis).step()
                    );
                    self.gesture = Gesture::DraggingSlider(drag);
                }
            }
            other => debug!("Ignoring {:?} in the volume view", other),
        }
    }

    fn begin_drag(&self, axis: Axis, hit: &PickHit, frame: &PickFrame) -> Option<SliderDrag> {
        let slider = self.sliders.slider(axis);
        let normal = frame.direction_to_world(slider.normal());
        let handle = frame.point_to_world(slider.position());

        // Plane containing the slider normal, turned to face the camera.
        let side = (frame.eye - hit.point).normalize().cross(normal);
        if side.magnitude2() < DRAG_PLANE_EPSILON || !side.magnitude2().is_finite() {
            return None;
        }
        let plane_normal = side.normalize().cross(normal);
        Some(SliderDrag {
            axis,
            plane: Plane::from_normal_and_coplanar_point(plane_normal, hit.point),
            normal,
            offset: handle - hit.point,
        })
    }

    fn drag_slider(
        &mut self,
        drag: SliderDrag,
        picker: &impl Picker,
        screen: [f32; 2],
        frame: &PickFrame,
        notifier: &mut impl RenderNotifier,
    ) {
        let Some(point) = picker.intersect_plane(ViewKind::Selecting, screen, &drag.plane) else {
            return;
        };
        let handle = frame.point_to_world(self.sliders.slider(drag.axis).position());
        // Steps push the handle against its normal.
        let distance = -((point + drag.offset) - handle).dot(drag.normal);
        let delta = (distance + 0.5).floor() as i64;
        if delta == 0 {
            return;
        }
        if let StepChange::Changed { step } = self.sliders.move_by(drag.axis, delta) {
            self.hidden = self.sliders.compute_hidden_cells();
            debug!(
                "{:?} slider at step {}, {} cells hidden",
                drag.axis,
                step,
                self.hidden.count()
            );
            notifier.slider_moved(drag.axis, step);
            notifier.visibility_changed(&self.hidden);
        }
    }

    fn down_solving(&mut self, hit: Option<PickHit>, notifier: &mut impl RenderNotifier) {
        let View::Solving(solving) = &mut self.view else {
            return;
        };
        self.gesture = match hit.map(|h| h.target) {
            None => Gesture::Missed,
            Some(PickTarget::ActionSwitch) => {
                solving.action = solving.action.toggled();
                debug!("Paint action is now {:?}", solving.action);
                notifier.paint_action_changed(solving.action);
                Gesture::Consumed
            }
            Some(PickTarget::LayerCell(cell)) => {
                let target = solving.action.target_state();
                match solving.layer.toggle(&mut self.volume, cell, target) {
                    Ok(applied) => {
                        if let Some(index) = solving.layer.volume_index(cell) {
                            notifier.cell_appearance_changed(index);
                        }
                        Gesture::Painting {
                            applied,
                            last_cell: cell,
                        }
                    }
                    Err(e) => {
                        warn!("Ignoring stroke start: {}", e);
                        Gesture::Consumed
                    }
                }
            }
            Some(other) => {
                debug!("Ignoring {:?} in the layer view", other);
                Gesture::Consumed
            }
        };
    }

    fn paint_stroke(
        &mut self,
        applied: CellState,
        last_cell: usize,
        hit: Option<PickHit>,
        notifier: &mut impl RenderNotifier,
    ) {
        let View::Solving(solving) = &self.view else {
            return;
        };
        let Some(PickTarget::LayerCell(cell)) = hit.map(|h| h.target) else {
            return;
        };
        if cell == last_cell {
            return;
        }
        match solving.layer.paint(&mut self.volume, cell, applied) {
            Ok(changed) => {
                if changed {
                    if let Some(index) = solving.layer.volume_index(cell) {
                        notifier.cell_appearance_changed(index);
                    }
                }
                self.gesture = Gesture::Painting {
                    applied,
                    last_cell: cell,
                };
            }
            Err(e) => warn!("Ignoring stroke cell: {}", e),
        }
    }

    fn up_solving(&mut self, gesture: Gesture, notifier: &mut impl RenderNotifier) {
        match gesture {
            Gesture::Missed => self.enter(View::Selecting, notifier),
            Gesture::Painting { .. } => {
                if self.volume.is_solved() {
                    info!("Puzzle solved");
                    self.enter(View::Solved(SolvedView { spin: 0.0 }), notifier);
                }
            }
            _ => {}
        }
    }
}

/// Drives a puzzle from pointer input and reports visual changes to `N`.
pub struct InteractionController<N: RenderNotifier> {
    config: PuzzleConfig,
    frame: PickFrame,
    session: Option<Session>,
    notifier: N,
}

impl<N: RenderNotifier> InteractionController<N> {
    pub fn new(config: PuzzleConfig, notifier: N) -> Self {
        let frame = PickFrame::from_config(&config);
        Self {
            config,
            frame,
            session: None,
            notifier,
        }
    }

    /// Install `volume` as the active puzzle, starting in the volume view with
    /// all sliders at zero and every cell in the Grid state.
    ///
    /// A volume larger than the configured maximum is rejected and the
    /// previous puzzle, if any, stays active.
    pub fn load_volume(&mut self, mut volume: VoxelVolume) -> Result<()> {
        if let Err(e) = volume.check_fits(self.config.max_dimension) {
            warn!("Rejecting volume: {}", e);
            return Err(e);
        }
        volume.reset_states();
        let [w, h, d] = volume.dimensions();
        let maxima = volume.clue_maxima();
        info!(
            "Loaded {}x{}x{} puzzle, clue margins {}/{}/{}",
            w, h, d, maxima.x, maxima.y, maxima.z
        );

        let session = Session::new(volume);
        self.notifier.visibility_changed(&session.hidden);
        self.session = Some(session);
        self.notifier.view_transition(ViewKind::Selecting);
        Ok(())
    }

    /// Import a parsed voxel model and load it.
    pub fn load_source(&mut self, source: &VoxelSource) -> Result<()> {
        let largest = source.size.iter().copied().max().unwrap_or(0);
        let max = self.config.max_dimension;
        if largest > max {
            let e = PuzzleError::VolumeTooLarge { largest, max };
            warn!("Rejecting voxel source: {}", e);
            return Err(e);
        }
        let volume = import_volume(source)?;
        self.load_volume(volume)
    }

    pub fn config(&self) -> &PuzzleConfig {
        &self.config
    }

    pub fn pick_frame(&self) -> &PickFrame {
        &self.frame
    }

    pub fn view_kind(&self) -> Option<ViewKind> {
        self.session.as_ref().map(Session::view_kind)
    }

    pub fn volume(&self) -> Option<&VoxelVolume> {
        self.session.as_ref().map(|s| &s.volume)
    }

    pub fn slice_selector(&self) -> Option<&SliceSelector> {
        self.session.as_ref().map(|s| &s.sliders)
    }

    pub fn hidden_cells(&self) -> Option<&HiddenCells> {
        self.session.as_ref().map(|s| &s.hidden)
    }

    pub fn solving(&self) -> Option<&SolvingView> {
        match &self.session.as_ref()?.view {
            View::Solving(solving) => Some(solving),
            _ => None,
        }
    }

    pub fn solved(&self) -> Option<&SolvedView> {
        match &self.session.as_ref()?.view {
            View::Solved(solved) => Some(solved),
            _ => None,
        }
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    pub fn pointer_down(&mut self, picker: &impl Picker, screen: [f32; 2]) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.gesture = Gesture::Idle;
        match session.view_kind() {
            ViewKind::Selecting => {
                let hit = picker.pick(ViewKind::Selecting, screen);
                session.down_selecting(hit, &self.frame, &mut self.notifier);
            }
            ViewKind::Solving => {
                let hit = picker.pick(ViewKind::Solving, screen);
                session.down_solving(hit, &mut self.notifier);
            }
            ViewKind::Solved => {}
        }
    }

    pub fn pointer_move(&mut self, picker: &impl Picker, screen: [f32; 2]) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        match (session.view_kind(), session.gesture) {
            (ViewKind::Selecting, Gesture::DraggingSlider(drag)) => {
                session.drag_slider(drag, picker, screen, &self.frame, &mut self.notifier);
            }
            (ViewKind::Solving, Gesture::Painting { applied, last_cell }) => {
                let hit = picker.pick(ViewKind::Solving, screen);
                session.paint_stroke(applied, last_cell, hit, &mut self.notifier);
            }
            _ => {}
        }
    }

    pub fn pointer_up(&mut self, _picker: &impl Picker, _screen: [f32; 2]) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let gesture = std::mem::replace(&mut session.gesture, Gesture::Idle);
        if session.view_kind() == ViewKind::Solving {
            session.up_solving(gesture, &mut self.notifier);
        }
    }

    /// Per-frame presentation update. Never touches cell states.
    pub fn tick(&mut self, dt: f32) {
        let rate = self.config.solved_spin_rate;
        if let Some(Session {
            view: View::Solved(solved),
            ..
        }) = self.session.as_mut()
        {
            solved.spin = (solved.spin + rate * dt).rem_euclid(std::f32::consts::TAU);
        }
    }

    /// Fill in the whole solution. Only available before the puzzle is solved.
    pub fn show_solution(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.view_kind() == ViewKind::Solved {
            return;
        }
        session.volume.show_solution();
        for index in 0..session.volume.len() {
            self.notifier.cell_appearance_changed(index);
        }
    }

    /// Orthographic half extents framing the puzzle in a viewport of the
    /// given aspect ratio. Recompute on every resize.
    pub fn frustum_extents(&self, aspect: f32) -> Option<[f32; 2]> {
        let volume = self.volume()?;
        let half_size = volume.frustum_half_size(self.config.frustum_half_size_min);
        Some(frustum_extents(half_size, aspect))
    }

    /// `[tilt around X, spin around Y]` of the solved model.
    pub fn solved_orientation(&self) -> Option<[f32; 2]> {
        self.solved().map(|solved| [self.config.solved_tilt, solved.spin])
    }
}
