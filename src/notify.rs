//! Notifications the core sends to the rendering layer. The core never reads
//! rendering state back.

use crate::interaction::{PaintAction, ViewKind};
use crate::slice::HiddenCells;
use crate::voxel::Axis;

pub trait RenderNotifier {
    /// The state of a volume cell changed; refresh it in every view showing it.
    fn cell_appearance_changed(&mut self, index: usize);

    fn slider_moved(&mut self, slider: Axis, step: usize);

    fn view_transition(&mut self, view: ViewKind);

    fn visibility_changed(&mut self, _hidden: &HiddenCells) {}

    fn paint_action_changed(&mut self, _action: PaintAction) {}
}

/// Recorded notification, see [`NotificationLog`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notification {
    CellChanged(usize),
    SliderMoved { slider: Axis, step: usize },
    ViewChanged(ViewKind),
    VisibilityChanged { hidden: usize },
    PaintActionChanged(PaintAction),
}

/// A notifier that keeps every notification in order.
#[derive(Clone, Debug, Default)]
pub struct NotificationLog {
    pub entries: Vec<Notification>,
}

impl NotificationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.entries)
    }

    pub fn changed_cells(&self) -> Vec<usize> {
        self.entries
            .iter()
            .filter_map(|n| match n {
                Notification::CellChanged(index) => Some(*index),
                _ => None,
            })
            .collect()
    }
}

impl RenderNotifier for NotificationLog {
    fn cell_appearance_changed(&mut self, index: usize) {
        self.entries.push(Notification::CellChanged(index));
    }

    fn slider_moved(&mut self, slider: Axis, step: usize) {
        self.entries.push(Notification::SliderMoved { slider, step });
    }

    fn view_transition(&mut self, view: ViewKind) {
        self.entries.push(Notification::ViewChanged(view));
    }

    fn visibility_changed(&mut self, hidden: &HiddenCells) {
        self.entries.push(Notification::VisibilityChanged {
            hidden: hidden.count(),
        });
    }

    fn paint_action_changed(&mut self, action: PaintAction) {
        self.entries.push(Notification::PaintActionChanged(action));
    }
}
