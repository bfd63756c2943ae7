use serde::{Deserialize, Serialize};

/// Data-to-canvas mapping of one view for one frame.
///
/// `pixel_x`/`pixel_y` are data units per pixel. The y mapping is built from
/// the animated extrema, so series slide smoothly while the scale rescales.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartScale {
    pub min_x: f64,
    pub pixel_x: f64,
    pub left_padding_px: f64,
    pub min_y: f64,
    pub pixel_y: f64,
    pub bottom_line: f64,
}

impl ChartScale {
    /// Builds a scale; `None` when either unit-per-pixel factor is degenerate.
    #[must_use]
    pub fn new(
        min_x: f64,
        pixel_x: f64,
        left_padding_px: f64,
        min_y: f64,
        pixel_y: f64,
        bottom_line: f64,
    ) -> Option<Self> {
        let valid = |value: f64| value.is_finite() && value > 0.0;
        if !valid(pixel_x) || !valid(pixel_y) || !min_x.is_finite() || !min_y.is_finite() {
            return None;
        }
        Some(Self {
            min_x,
            pixel_x,
            left_padding_px,
            min_y,
            pixel_y,
            bottom_line,
        })
    }

    #[must_use]
    pub fn x_to_canvas(self, x: f64) -> f64 {
        self.left_padding_px + (x - self.min_x) / self.pixel_x
    }

    #[must_use]
    pub fn canvas_to_x(self, canvas_x: f64) -> f64 {
        self.min_x + (canvas_x - self.left_padding_px) * self.pixel_x
    }

    #[must_use]
    pub fn y_to_canvas(self, y: f64) -> f64 {
        self.bottom_line - (y - self.min_y) / self.pixel_y
    }

    #[must_use]
    pub fn canvas_to_y(self, canvas_y: f64) -> f64 {
        self.min_y + (self.bottom_line - canvas_y) * self.pixel_y
    }

    /// Same horizontal mapping with a different vertical one.
    #[must_use]
    pub fn with_y(self, min_y: f64, pixel_y: f64) -> Option<Self> {
        Self::new(
            self.min_x,
            self.pixel_x,
            self.left_padding_px,
            min_y,
            pixel_y,
            self.bottom_line,
        )
    }
}

/// Read-only view of one series for a paint pass.
#[derive(Debug, Clone, Copy)]
pub struct SeriesSlice<'a> {
    pub x_axis: &'a [f64],
    pub values: &'a [f64],
}

impl SeriesSlice<'_> {
    /// Data-space width of the bar starting at `index` for the given stride.
    #[must_use]
    pub fn bar_width_at(&self, index: usize, step: usize) -> f64 {
        let next = index + step;
        if next < self.x_axis.len() {
            return self.x_axis[next] - self.x_axis[index];
        }
        if index >= step {
            return self.x_axis[index] - self.x_axis[index - step];
        }
        0.0
    }
}
