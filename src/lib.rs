pub mod clock;
pub mod config;
pub mod error;
pub mod interaction;
pub mod layer;
pub mod notify;
pub mod picking;
pub mod render_data;
pub mod sample;
pub mod slice;
pub mod voxel;

pub use config::PuzzleConfig;
pub use error::{PuzzleError, Result};
pub use interaction::{InteractionController, PaintAction, ViewKind};
pub use layer::Layer;
pub use notify::RenderNotifier;
pub use picking::{PickHit, PickTarget, Picker};
pub use slice::SliceSelector;
pub use voxel::{Axis, CellState, ColorIndex, Rgb, VoxelVolume};

/// Install the platform logger. Safe to call more than once.
pub fn init_logging() {
    cfg_if::cfg_if! {
        if #[cfg(target_arch = "wasm32")] {
            std::panic::set_hook(Box::new(console_error_panic_hook::hook));
            let _ = console_log::init_with_level(log::Level::Debug);
        } else {
            let _ = env_logger::try_init();
        }
    }
}
