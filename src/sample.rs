//! Small procedural models, in voxel-file (Z-up) coordinates.

use crate::voxel::import::{SourceVoxel, VoxelSource};
use crate::voxel::Rgb;

const STONE: usize = 0;
const MOSS: usize = 1;
const CAP: usize = 2;
const STEM: usize = 3;

const PALETTE: [Rgb; 4] = [Rgb(0x8D99AE), Rgb(0x6A994E), Rgb(0xD62828), Rgb(0xF1FAEE)];

#[derive(Copy, Clone, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum SampleShape {
    /// Stepped pyramid, one ring per level.
    Pyramid,
    /// Flat ring lying on the ground.
    Ring,
    /// Two-colored mushroom.
    Mushroom,
    /// Solid block with a moss top.
    Block,
}

fn voxel(x: usize, y: usize, z: usize, color_index: usize) -> SourceVoxel {
    SourceVoxel {
        x,
        y,
        z,
        color_index,
    }
}

pub fn sample_source(shape: SampleShape, size: usize) -> VoxelSource {
    let size = size.max(1);
    let mut voxels = Vec::new();
    let (sx, sy, sz) = match shape {
        SampleShape::Pyramid => {
            let levels = size.div_ceil(2);
            for z in 0..levels {
                for y in z..size - z {
                    for x in z..size - z {
                        let color = if z + 1 == levels { MOSS } else { STONE };
                        voxels.push(voxel(x, y, z, color));
                    }
                }
            }
            (size, size, levels)
        }
        SampleShape::Ring => {
            let center = (size as f32 - 1.0) / 2.0;
            let outer = size as f32 / 2.0;
            let inner = (outer - 1.5).max(0.0);
            for y in 0..size {
                for x in 0..size {
                    let r = ((x as f32 - center).powi(2) + (y as f32 - center).powi(2)).sqrt();
                    if r < outer && r >= inner {
                        voxels.push(voxel(x, y, 0, STONE));
                    }
                }
            }
            (size, size, 1)
        }
        SampleShape::Mushroom => {
            let height = size.max(3);
            let mid = size / 2;
            let stem_top = height / 2;
            for z in 0..stem_top {
                voxels.push(voxel(mid, mid, z, STEM));
            }
            for z in stem_top..height {
                let inset = z - stem_top;
                for y in inset..size.saturating_sub(inset) {
                    for x in inset..size.saturating_sub(inset) {
                        voxels.push(voxel(x, y, z, CAP));
                    }
                }
            }
            (size, size, height)
        }
        SampleShape::Block => {
            for z in 0..size {
                for y in 0..size {
                    for x in 0..size {
                        let color = if z + 1 == size { MOSS } else { STONE };
                        voxels.push(voxel(x, y, z, color));
                    }
                }
            }
            (size, size, size)
        }
    };

    VoxelSource {
        size: [sx, sy, sz],
        voxels,
        palette: PALETTE.to_vec(),
    }
}
