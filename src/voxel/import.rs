use super::volume::cell_count;
use super::{ColorIndex, Rgb, VoxelVolume};
use crate::error::{PuzzleError, Result};

/// One occupied voxel as delivered by a voxel-file reader.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SourceVoxel {
    pub x: usize,
    pub y: usize,
    pub z: usize,
    /// Index into [`VoxelSource::palette`].
    pub color_index: usize,
}

/// Parsed voxel model handed over by the import collaborator.
///
/// Source files are Z-up; the puzzle volume is Y-up with Z pointing at the
/// viewer, so the importer swaps the two axes.
#[derive(Clone, Debug, Default)]
pub struct VoxelSource {
    pub size: [usize; 3],
    pub voxels: Vec<SourceVoxel>,
    pub palette: Vec<Rgb>,
}

/// Convert a parsed model into a puzzle volume.
///
/// Volume `(width, height, depth)` is source `(x, z, y)`, and source voxel
/// `(x, y, z)` lands at volume `(x, z, depth - 1 - y)`. Palette entries are
/// appended in first-use order and reused for later voxels of the same source
/// color.
pub fn import_volume(source: &VoxelSource) -> Result<VoxelVolume> {
    let [sx, sy, sz] = source.size;
    let (width, height, depth) = (sx, sz, sy);
    let len = cell_count([width, height, depth])?;

    let mut colors = vec![ColorIndex::EMPTY; len];
    let mut palette = vec![Rgb::default()];
    let mut palette_map: Vec<Option<ColorIndex>> = vec![None; source.palette.len()];

    for v in &source.voxels {
        if v.x >= sx || v.y >= sy || v.z >= sz {
            return Err(PuzzleError::VoxelOutOfBounds {
                x: v.x,
                y: v.y,
                z: v.z,
            });
        }
        let slot = palette_map
            .get_mut(v.color_index)
            .ok_or(PuzzleError::UnknownPaletteEntry(v.color_index))?;
        let color = match *slot {
            Some(color) => color,
            None => {
                let next = palette.len();
                if next > u8::MAX as usize {
                    return Err(PuzzleError::PaletteOverflow(u8::MAX as usize));
                }
                palette.push(source.palette[v.color_index]);
                let color = ColorIndex(next as u8);
                *slot = Some(color);
                color
            }
        };
        let index = v.x + v.z * width + (depth - 1 - v.y) * width * height;
        colors[index] = color;
    }

    log::debug!(
        "Imported {}x{}x{} volume: {} voxels, {} palette colors",
        width,
        height,
        depth,
        source.voxels.len(),
        palette.len() - 1
    );

    VoxelVolume::from_colors([width, height, depth], colors, palette)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn voxel(x: usize, y: usize, z: usize, color_index: usize) -> SourceVoxel {
        SourceVoxel {
            x,
            y,
            z,
            color_index,
        }
    }

    #[test]
    fn swaps_source_y_and_z() {
        let source = VoxelSource {
            size: [2, 3, 4],
            voxels: vec![voxel(1, 0, 3, 1)],
            palette: vec![Rgb(0), Rgb(0xff0000)],
        };
        let volume = import_volume(&source).unwrap();
        assert_eq!(volume.dimensions(), [2, 4, 3]);

        // source y=0 is the far end of the volume's depth
        let index = volume.index(1, 3, 2).unwrap();
        assert_eq!(volume.color_index(index).unwrap(), ColorIndex(1));
        assert_eq!(volume.cells().iter().filter(|c| c.color.is_colored()).count(), 1);
    }

    #[test]
    fn palette_is_deduplicated_in_first_use_order() {
        let source = VoxelSource {
            size: [3, 1, 1],
            voxels: vec![voxel(0, 0, 0, 7), voxel(1, 0, 0, 2), voxel(2, 0, 0, 7)],
            palette: (0..8).map(|i| Rgb(i * 0x10)).collect(),
        };
        let volume = import_volume(&source).unwrap();
        assert_eq!(volume.palette(), &[Rgb(0), Rgb(0x70), Rgb(0x20)]);
        assert_eq!(volume.color_index(0).unwrap(), ColorIndex(1));
        assert_eq!(volume.color_index(1).unwrap(), ColorIndex(2));
        assert_eq!(volume.color_index(2).unwrap(), ColorIndex(1));
        assert_eq!(volume.color(2).unwrap(), Some(Rgb(0x70)));
    }

    #[test]
    fn rejects_voxels_outside_the_source_size() {
        let source = VoxelSource {
            size: [2, 2, 2],
            voxels: vec![voxel(0, 2, 0, 0)],
            palette: vec![Rgb(0)],
        };
        assert!(matches!(
            import_volume(&source),
            Err(PuzzleError::VoxelOutOfBounds { .. })
        ));
    }

    #[test]
    fn rejects_missing_palette_entries() {
        let source = VoxelSource {
            size: [1, 1, 1],
            voxels: vec![voxel(0, 0, 0, 4)],
            palette: vec![Rgb(0)],
        };
        assert_eq!(
            import_volume(&source).unwrap_err(),
            PuzzleError::UnknownPaletteEntry(4)
        );
    }

    #[test]
    fn unaddressable_size_fails_before_allocating() {
        let source = VoxelSource {
            size: [1 << 40, 1 << 30, 1 << 4],
            voxels: Vec::new(),
            palette: vec![Rgb(0)],
        };
        assert_eq!(
            import_volume(&source).unwrap_err(),
            PuzzleError::CellCountOverflow {
                width: 1 << 40,
                height: 1 << 4,
                depth: 1 << 30,
            }
        );
    }

    #[test]
    fn computes_clue_maxima_at_import() {
        let source = VoxelSource {
            size: [4, 1, 1],
            voxels: vec![voxel(0, 0, 0, 1), voxel(1, 0, 0, 1), voxel(3, 0, 0, 1)],
            palette: vec![Rgb(0), Rgb(0xabcdef)],
        };
        let volume = import_volume(&source).unwrap();
        assert_eq!(volume.clue_maxima().x, 2);
    }
}
