//! Hit testing grid for mouse events.

/// Maps screen cells to control ids. Later registrations win where areas overlap.
#[derive(Clone, Debug)]
pub struct HitGrid {
    width: u32,
    height: u32,
    cells: Vec<Option<u32>>,
}

impl HitGrid {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Register a rectangle; parts outside the grid are ignored.
    pub fn register(&mut self, x: i32, y: i32, width: u32, height: u32, id: u32) {
        let x0 = x.max(0) as u32;
        let y0 = y.max(0) as u32;
        let x1 = (i64::from(x) + i64::from(width)).clamp(0, i64::from(self.width)) as u32;
        let y1 = (i64::from(y) + i64::from(height)).clamp(0, i64::from(self.height)) as u32;

        for row in y0..y1 {
            let start = row as usize * self.width as usize;
            for col in x0..x1 {
                self.cells[start + col as usize] = Some(id);
            }
        }
    }

    /// Which id, if any, covers a position.
    #[must_use]
    pub fn test(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells[y as usize * self.width as usize + x as usize]
    }

    /// Resize the grid, clearing all hit areas.
    pub fn resize(&mut self, width: u32, height: u32) {
        *self = Self::new(width, height);
    }

    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

impl Default for HitGrid {
    fn default() -> Self {
        Self::new(80, 24)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_test() {
        let mut grid = HitGrid::new(100, 50);
        grid.register(10, 10, 20, 10, 42);

        assert_eq!(grid.test(15, 15), Some(42));
        assert_eq!(grid.test(29, 19), Some(42));
        assert_eq!(grid.test(30, 20), None);
        assert_eq!(grid.test(5, 5), None);
    }

    #[test]
    fn test_later_registration_wins() {
        let mut grid = HitGrid::new(100, 50);
        grid.register(0, 0, 30, 30, 1);
        grid.register(10, 10, 10, 10, 2);

        assert_eq!(grid.test(5, 5), Some(1));
        assert_eq!(grid.test(15, 15), Some(2));
        assert_eq!(grid.test(25, 25), Some(1));
    }

    #[test]
    fn test_partially_offscreen_area_is_clipped() {
        let mut grid = HitGrid::new(10, 5);
        grid.register(-3, -2, 5, 4, 7);
        grid.register(8, 3, 10, 10, 8);

        assert_eq!(grid.test(0, 0), Some(7));
        assert_eq!(grid.test(1, 1), Some(7));
        assert_eq!(grid.test(2, 1), None);
        assert_eq!(grid.test(9, 4), Some(8));
        assert_eq!(grid.test(10, 4), None);
    }

    #[test]
    fn test_fully_offscreen_area_is_ignored() {
        let mut grid = HitGrid::new(10, 5);
        grid.register(-20, 0, 5, 5, 1);
        grid.register(0, 9, 5, 5, 2);
        assert!((0..10).all(|x| (0..5).all(|y| grid.test(x, y).is_none())));
    }

    #[test]
    fn test_clear_and_resize() {
        let mut grid = HitGrid::new(20, 20);
        grid.register(0, 0, 20, 20, 3);
        grid.clear();
        assert_eq!(grid.test(4, 4), None);

        grid.register(0, 0, 20, 20, 3);
        grid.resize(40, 10);
        assert_eq!(grid.size(), (40, 10));
        assert_eq!(grid.test(4, 4), None);
    }
}
