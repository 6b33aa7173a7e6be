use std::f32::consts::PI;

/// Largest accepted extent of a puzzle volume along any axis.
pub const VOLUME_DIMENSION_MAX: usize = 30;

/// Clue labels are zero-padded to at least this many digits (`num05`).
pub const CLUE_DIGIT_COUNT_MIN: usize = 2;

/// Smallest half-size of the orthographic frustum used to frame a puzzle.
pub const FRUSTUM_HALF_SIZE_MIN: f32 = 5.0;

/// Far plane of the framing camera; the eye sits halfway out.
pub const CAMERA_FAR: f32 = 100.0;

/// Runtime knobs for a puzzle session.
#[derive(Clone, Debug, PartialEq)]
pub struct PuzzleConfig {
    pub max_dimension: usize,
    pub clue_digits_min: usize,
    pub frustum_half_size_min: f32,
    /// Distance of the camera eye from the origin along +Z.
    pub camera_distance: f32,
    /// Euler rotation (X, then Y) applied to the volume in the pick view.
    pub pick_view_rotation: [f32; 2],
    /// Fixed X tilt of the solved view.
    pub solved_tilt: f32,
    /// Idle spin of the solved view around Y, radians per second.
    pub solved_spin_rate: f32,
}

impl PuzzleConfig {
    pub fn with_defaults() -> Self {
        Self {
            max_dimension: VOLUME_DIMENSION_MAX,
            clue_digits_min: CLUE_DIGIT_COUNT_MIN,
            frustum_half_size_min: FRUSTUM_HALF_SIZE_MIN,
            camera_distance: CAMERA_FAR / 2.0,
            pick_view_rotation: [PI / 4.0, -PI / 4.0],
            solved_tilt: PI / 12.0,
            solved_spin_rate: -PI / 4.0,
        }
    }
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        Self::with_defaults()
    }
}
