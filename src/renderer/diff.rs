//! Buffer diffing for efficient rendering.

use crate::buffer::FrameBuffer;

/// A horizontal run of changed cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DirtyRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
}

/// Result of diffing two equally sized buffers.
#[derive(Debug, Default)]
pub struct BufferDiff {
    /// Changed cells in row-major order.
    pub changed_cells: Vec<(u32, u32)>,
    /// Changed cells merged into runs per row.
    pub dirty_regions: Vec<DirtyRegion>,
}

impl BufferDiff {
    /// Compare two buffers cell by cell, bitwise on colors.
    ///
    /// # Panics
    ///
    /// Panics if the buffers differ in size.
    #[must_use]
    pub fn compute(old: &FrameBuffer, new: &FrameBuffer) -> Self {
        assert_eq!(old.size(), new.size(), "buffer size mismatch in diff");

        let width = old.width();
        let changed_cells: Vec<(u32, u32)> = old
            .cells()
            .iter()
            .zip(new.cells())
            .enumerate()
            .filter(|(_, (a, b))| !a.bits_eq(b))
            .map(|(i, _)| (i as u32 % width, i as u32 / width))
            .collect();

        let dirty_regions = Self::merge_into_regions(&changed_cells);
        Self {
            changed_cells,
            dirty_regions,
        }
    }

    #[must_use]
    pub fn change_count(&self) -> usize {
        self.changed_cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changed_cells.is_empty()
    }

    /// Group row-major cells into contiguous runs.
    fn merge_into_regions(cells: &[(u32, u32)]) -> Vec<DirtyRegion> {
        let mut regions: Vec<DirtyRegion> = Vec::new();
        for &(x, y) in cells {
            match regions.last_mut() {
                Some(run) if run.y == y && run.x + run.width == x => run.width += 1,
                _ => regions.push(DirtyRegion { x, y, width: 1 }),
            }
        }
        regions
    }

    /// A full redraw is cheaper once more than half the screen changed.
    #[must_use]
    pub fn should_full_redraw(&self, total_cells: usize) -> bool {
        self.change_count() > total_cells / 2
    }
}
