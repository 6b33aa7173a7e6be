use super::{Axis, VoxelVolume};

/// Largest number of runs found on any line parallel to each axis.
///
/// These size the clue margins around a layer, so they only depend on color
/// data and are computed once per loaded volume.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub struct ClueMaxima {
    pub x: usize,
    pub y: usize,
    pub z: usize,
}

/// Lengths of the maximal runs of `true` in `line`, in scan order.
///
/// An open run is flushed at the last element even when no empty cell
/// follows it.
pub fn run_lengths<I>(line: I) -> Vec<usize>
where
    I: IntoIterator<Item = bool>,
{
    let mut runs = Vec::new();
    let mut count = 0usize;
    for colored in line {
        if colored {
            count += 1;
        } else if count > 0 {
            runs.push(count);
            count = 0;
        }
    }
    if count > 0 {
        runs.push(count);
    }
    runs
}

/// Number of runs in `line` without collecting their lengths.
pub fn run_count<I>(line: I) -> usize
where
    I: IntoIterator<Item = bool>,
{
    let mut runs = 0usize;
    let mut previous = false;
    for colored in line {
        if colored && !previous {
            runs += 1;
        }
        previous = colored;
    }
    runs
}

/// Scan every line of `volume` parallel to `axis` and return the largest run
/// count found.
pub fn max_runs_along(volume: &VoxelVolume, axis: Axis) -> usize {
    let [w, h, d] = volume.dimensions();
    let (outer, inner, len, stride) = match axis {
        Axis::X => (d, h, w, 1),
        Axis::Y => (d, w, h, w),
        Axis::Z => (w, h, d, w * h),
    };

    let mut best = 0usize;
    for a in 0..outer {
        for b in 0..inner {
            let start = match axis {
                Axis::X => b * w + a * w * h,
                Axis::Y => b + a * w * h,
                Axis::Z => a + b * w,
            };
            let line = (0..len).map(|s| volume.cell_at(start + s * stride).color.is_colored());
            best = best.max(run_count(line));
        }
    }
    best
}

pub fn compute_maxima(volume: &VoxelVolume) -> ClueMaxima {
    ClueMaxima {
        x: max_runs_along(volume, Axis::X),
        y: max_runs_along(volume, Axis::Y),
        z: max_runs_along(volume, Axis::Z),
    }
}
