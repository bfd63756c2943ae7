use serde::{Deserialize, Serialize};

/// Pixel size of one drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Which of the two synchronized views a component belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChartRole {
    Main,
    Navigator,
}

impl ChartRole {
    /// Low-resolution views always render at full resolution without grouping.
    #[must_use]
    pub const fn is_low_resolution(self) -> bool {
        matches!(self, Self::Navigator)
    }
}

/// Inclusive `[lower, upper]` index span into the shared x axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexRange {
    pub lower: usize,
    pub upper: usize,
}

impl IndexRange {
    #[must_use]
    pub const fn new(lower: usize, upper: usize) -> Self {
        Self { lower, upper }
    }

    #[must_use]
    pub const fn contains(self, index: usize) -> bool {
        index >= self.lower && index <= self.upper
    }

    #[must_use]
    pub const fn len(self) -> usize {
        self.upper - self.lower + 1
    }
}
