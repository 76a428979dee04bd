//! Scissor (clipping) rectangle stack.

/// A clipping rectangle in buffer coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClipRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl ClipRect {
    #[must_use]
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Exclusive right edge.
    #[must_use]
    pub fn right(&self) -> i32 {
        self.x.saturating_add_unsigned(self.width)
    }

    /// Exclusive bottom edge.
    #[must_use]
    pub fn bottom(&self) -> i32 {
        self.y.saturating_add_unsigned(self.height)
    }

    #[must_use]
    pub fn contains(&self, px: i32, py: i32) -> bool {
        px >= self.x && py >= self.y && px < self.right() && py < self.bottom()
    }

    /// Overlap of two rectangles, `None` when they do not touch.
    #[must_use]
    pub fn intersect(&self, other: &ClipRect) -> Option<ClipRect> {
        let x1 = self.x.max(other.x);
        let y1 = self.y.max(other.y);
        let x2 = self.right().min(other.right());
        let y2 = self.bottom().min(other.bottom());

        (x2 > x1 && y2 > y1).then(|| ClipRect {
            x: x1,
            y: y1,
            width: x1.abs_diff(x2),
            height: y1.abs_diff(y2),
        })
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl Default for ClipRect {
    fn default() -> Self {
        Self::new(0, 0, u32::MAX, u32::MAX)
    }
}

/// Nested clip regions; each push intersects with the current region.
#[derive(Clone, Debug, Default)]
pub struct ScissorStack {
    stack: Vec<ClipRect>,
    current: ClipRect,
}

impl ScissorStack {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, rect: ClipRect) {
        self.stack.push(self.current);
        self.current = self
            .current
            .intersect(&rect)
            .unwrap_or(ClipRect::new(0, 0, 0, 0));
    }

    pub fn pop(&mut self) {
        if let Some(rect) = self.stack.pop() {
            self.current = rect;
        }
    }

    pub fn clear(&mut self) {
        self.stack.clear();
        self.current = ClipRect::default();
    }

    #[must_use]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.current.contains(x, y)
    }

    #[must_use]
    pub fn current(&self) -> ClipRect {
        self.current
    }
}
