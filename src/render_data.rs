//! GPU-ready instance records for the three views.

use bytemuck::{Pod, Zeroable};

use crate::error::Result;
use crate::layer::Layer;
use crate::slice::HiddenCells;
use crate::voxel::{CellState, Rgb, VoxelVolume};

pub const GRID_COLOR: Rgb = Rgb(0xF7E1D7);
pub const MARKED_COLOR: Rgb = Rgb(0xA3D5FF);

#[repr(C)]
#[derive(Default, Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct CellInstance {
    pub position: [f32; 3],
    /// [`CellState::id`] of the cell; textured grid/cross overlays key off it.
    pub state: u32,
    /// `0xRRGGBB` tint.
    pub color: u32,
    pub visible: u32,
}

pub fn state_color(state: CellState) -> Rgb {
    match state {
        CellState::Marked => MARKED_COLOR,
        CellState::Grid | CellState::Crossed => GRID_COLOR,
    }
}

/// One instance per volume cell, in index order, hidden cells flagged.
pub fn pick_view_instances(
    volume: &VoxelVolume,
    hidden: &HiddenCells,
) -> Result<Vec<CellInstance>> {
    (0..volume.len())
        .map(|index| {
            let state = volume.state(index)?;
            let p = volume.cell_position(index)?;
            Ok(CellInstance {
                position: [p.x, p.y, p.z],
                state: state.id(),
                color: state_color(state).0,
                visible: hidden.is_visible(index) as u32,
            })
        })
        .collect()
}

/// One instance per layer cell, in layer order, on the z = 0 plane.
pub fn layer_instances(volume: &VoxelVolume, layer: &Layer) -> Result<Vec<CellInstance>> {
    (0..layer.len())
        .map(|i| {
            let state = layer.state(volume, i)?;
            let [x, y] = layer.cell_position(i);
            Ok(CellInstance {
                position: [x, y, 0.0],
                state: state.id(),
                color: state_color(state).0,
                visible: 1,
            })
        })
        .collect()
}

/// Colored cells only, tinted with their palette color.
pub fn solved_instances(volume: &VoxelVolume) -> Result<Vec<CellInstance>> {
    let mut instances = Vec::new();
    for index in 0..volume.len() {
        let Some(color) = volume.color(index)? else {
            continue;
        };
        let p = volume.cell_position(index)?;
        instances.push(CellInstance {
            position: [p.x, p.y, p.z],
            state: CellState::Marked.id(),
            color: color.0,
            visible: 1,
        });
    }
    Ok(instances)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slice::hidden_cells_for_steps;
    use crate::voxel::ColorIndex;

    fn two_cell_volume() -> VoxelVolume {
        VoxelVolume::from_colors(
            [2, 1, 1],
            vec![ColorIndex(0), ColorIndex(1)],
            vec![Rgb(0), Rgb(0x123456)],
        )
        .unwrap()
    }

    #[test]
    fn instances_cast_to_bytes() {
        let volume = two_cell_volume();
        let hidden = hidden_cells_for_steps([2, 1, 1], [1, 0, 0]);
        let instances = pick_view_instances(&volume, &hidden).unwrap();
        let bytes: &[u8] = bytemuck::cast_slice(&instances);
        assert_eq!(bytes.len(), 2 * std::mem::size_of::<CellInstance>());
        assert_eq!(instances[0].visible, 1);
        assert_eq!(instances[1].visible, 0);
        assert_eq!(instances[0].position, [-0.5, 0.0, 0.0]);
    }

    #[test]
    fn solved_view_shows_palette_colors_only() {
        let mut volume = two_cell_volume();
        volume.set_state(1, CellState::Crossed).unwrap();
        let instances = solved_instances(&volume).unwrap();
        assert_eq!(instances.len(), 1);
        assert_eq!(instances[0].color, 0x123456);
        assert_eq!(instances[0].position, [0.5, 0.0, 0.0]);
    }
}
