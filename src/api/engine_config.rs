use serde::{Deserialize, Serialize};

use crate::animation::{PlaybackTuning, TimingFunction};
use crate::core::{GroupingTuning, Viewport};
use crate::error::{ChartError, ChartResult};

/// Space above the main plot, in label font heights.
pub(crate) const PLOT_TOP_PADDING_EM: f64 = 1.5;

/// Public engine bootstrap configuration.
///
/// This type is serializable so host applications can persist/load chart setup
/// without inventing their own ad-hoc format. Every tunable has a serde default,
/// so a payload only needs the two surface sizes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartEngineConfig {
    pub main_viewport: Viewport,
    pub navigator_viewport: Viewport,
    #[serde(default = "default_device_pixel_ratio")]
    pub device_pixel_ratio: f64,
    #[serde(default = "default_padding_pixels")]
    pub padding_pixels: f64,
    #[serde(default = "default_grouping_pixels")]
    pub grouping_pixels: f64,
    #[serde(default = "default_min_grouping_span")]
    pub min_grouping_span: usize,
    #[serde(default = "default_grouping_boost_threshold")]
    pub grouping_boost_threshold: usize,
    #[serde(default = "default_range_animation_ms")]
    pub range_animation_ms: f64,
    #[serde(default = "default_extrema_animation_ms")]
    pub extrema_animation_ms: f64,
    #[serde(default = "default_opacity_animation_ms")]
    pub opacity_animation_ms: f64,
    #[serde(default = "default_label_fade_ms")]
    pub label_fade_ms: f64,
    #[serde(default = "default_x_label_min_width_px")]
    pub x_label_min_width_px: f64,
    #[serde(default = "default_y_tick_count")]
    pub y_tick_count: usize,
    #[serde(default = "default_label_pool_capacity")]
    pub label_pool_capacity: usize,
    #[serde(default = "default_cursor_exit_delay_ms")]
    pub cursor_exit_delay_ms: f64,
    #[serde(default)]
    pub cursor_playback: PlaybackTuning,
    /// Share of the domain, counted from its end, shown by the main chart at
    /// startup.
    #[serde(default = "default_initial_range_ratio")]
    pub initial_range_ratio: f64,
    #[serde(default = "default_main_line_width")]
    pub main_line_width: f64,
    #[serde(default = "default_navigator_line_width")]
    pub navigator_line_width: f64,
    /// Height reserved below the main plot for x-axis labels.
    #[serde(default = "default_x_axis_height_px")]
    pub x_axis_height_px: f64,
    #[serde(default = "default_label_font_px")]
    pub label_font_px: f64,
    #[serde(default)]
    pub timing_function: TimingFunction,
}

impl ChartEngineConfig {
    /// Creates a config with default tuning for the given surface sizes.
    #[must_use]
    pub fn new(main_viewport: Viewport, navigator_viewport: Viewport) -> Self {
        Self {
            main_viewport,
            navigator_viewport,
            device_pixel_ratio: default_device_pixel_ratio(),
            padding_pixels: default_padding_pixels(),
            grouping_pixels: default_grouping_pixels(),
            min_grouping_span: default_min_grouping_span(),
            grouping_boost_threshold: default_grouping_boost_threshold(),
            range_animation_ms: default_range_animation_ms(),
            extrema_animation_ms: default_extrema_animation_ms(),
            opacity_animation_ms: default_opacity_animation_ms(),
            label_fade_ms: default_label_fade_ms(),
            x_label_min_width_px: default_x_label_min_width_px(),
            y_tick_count: default_y_tick_count(),
            label_pool_capacity: default_label_pool_capacity(),
            cursor_exit_delay_ms: default_cursor_exit_delay_ms(),
            cursor_playback: PlaybackTuning::default(),
            initial_range_ratio: default_initial_range_ratio(),
            main_line_width: default_main_line_width(),
            navigator_line_width: default_navigator_line_width(),
            x_axis_height_px: default_x_axis_height_px(),
            label_font_px: default_label_font_px(),
            timing_function: TimingFunction::default(),
        }
    }

    #[must_use]
    pub fn with_device_pixel_ratio(mut self, ratio: f64) -> Self {
        self.device_pixel_ratio = ratio;
        self
    }

    #[must_use]
    pub fn with_padding_pixels(mut self, padding_pixels: f64) -> Self {
        self.padding_pixels = padding_pixels;
        self
    }

    /// Sets point-grouping tuning.
    #[must_use]
    pub fn with_grouping(mut self, tuning: GroupingTuning) -> Self {
        self.grouping_pixels = tuning.grouping_pixels;
        self.min_grouping_span = tuning.min_grouping_span;
        self.grouping_boost_threshold = tuning.boost_threshold;
        self
    }

    /// Sets range, extrema and opacity animation durations in milliseconds.
    #[must_use]
    pub fn with_animation_durations(
        mut self,
        range_ms: f64,
        extrema_ms: f64,
        opacity_ms: f64,
    ) -> Self {
        self.range_animation_ms = range_ms;
        self.extrema_animation_ms = extrema_ms;
        self.opacity_animation_ms = opacity_ms;
        self
    }

    #[must_use]
    pub fn with_label_fade_ms(mut self, fade_ms: f64) -> Self {
        self.label_fade_ms = fade_ms;
        self
    }

    #[must_use]
    pub fn with_label_pool_capacity(mut self, capacity: usize) -> Self {
        self.label_pool_capacity = capacity;
        self
    }

    #[must_use]
    pub fn with_cursor_exit_delay_ms(mut self, delay_ms: f64) -> Self {
        self.cursor_exit_delay_ms = delay_ms;
        self
    }

    #[must_use]
    pub fn with_cursor_playback(mut self, tuning: PlaybackTuning) -> Self {
        self.cursor_playback = tuning;
        self
    }

    #[must_use]
    pub fn with_initial_range_ratio(mut self, ratio: f64) -> Self {
        self.initial_range_ratio = ratio;
        self
    }

    #[must_use]
    pub fn with_timing_function(mut self, timing: TimingFunction) -> Self {
        self.timing_function = timing;
        self
    }

    #[must_use]
    pub fn with_x_axis_height_px(mut self, height: f64) -> Self {
        self.x_axis_height_px = height;
        self
    }

    #[must_use]
    pub fn grouping_tuning(&self) -> GroupingTuning {
        GroupingTuning {
            grouping_pixels: self.grouping_pixels,
            min_grouping_span: self.min_grouping_span,
            boost_threshold: self.grouping_boost_threshold,
        }
    }

    /// Checks surface sizes and numeric tunables.
    pub fn validate(&self) -> ChartResult<()> {
        for viewport in [self.main_viewport, self.navigator_viewport] {
            if !viewport.is_valid() {
                return Err(ChartError::InvalidViewport {
                    width: viewport.width,
                    height: viewport.height,
                });
            }
        }

        for (name, value) in [
            ("device_pixel_ratio", self.device_pixel_ratio),
            ("grouping_pixels", self.grouping_pixels),
            ("x_label_min_width_px", self.x_label_min_width_px),
            ("main_line_width", self.main_line_width),
            ("navigator_line_width", self.navigator_line_width),
            ("label_font_px", self.label_font_px),
            ("cursor_playback.max_velocity", self.cursor_playback.max_velocity),
            ("cursor_playback.acceleration", self.cursor_playback.acceleration),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }

        for (name, value) in [
            ("padding_pixels", self.padding_pixels),
            ("range_animation_ms", self.range_animation_ms),
            ("extrema_animation_ms", self.extrema_animation_ms),
            ("opacity_animation_ms", self.opacity_animation_ms),
            ("label_fade_ms", self.label_fade_ms),
            ("cursor_exit_delay_ms", self.cursor_exit_delay_ms),
            ("x_axis_height_px", self.x_axis_height_px),
            ("cursor_playback.snap_distance", self.cursor_playback.snap_distance),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }

        if !self.initial_range_ratio.is_finite()
            || self.initial_range_ratio <= 0.0
            || self.initial_range_ratio > 1.0
        {
            return Err(ChartError::invalid("initial_range_ratio must be in (0, 1]"));
        }
        if self.y_tick_count < 2 {
            return Err(ChartError::invalid("y_tick_count must be >= 2"));
        }
        let reserved = (self.x_axis_height_px + self.label_font_px * PLOT_TOP_PADDING_EM)
            * self.device_pixel_ratio;
        if f64::from(self.main_viewport.height) <= reserved {
            return Err(ChartError::invalid(
                "x_axis_height_px must leave room for the main plot",
            ));
        }
        Ok(())
    }

    /// Serializes config to pretty JSON for debug/config files.
    pub fn to_json_pretty(self) -> ChartResult<String> {
        serde_json::to_string_pretty(&self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes config from JSON.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse config: {e}")))
    }
}

fn default_device_pixel_ratio() -> f64 {
    1.0
}

fn default_padding_pixels() -> f64 {
    16.0
}

fn default_grouping_pixels() -> f64 {
    GroupingTuning::default().grouping_pixels
}

fn default_min_grouping_span() -> usize {
    GroupingTuning::default().min_grouping_span
}

fn default_grouping_boost_threshold() -> usize {
    GroupingTuning::default().boost_threshold
}

fn default_range_animation_ms() -> f64 {
    300.0
}

fn default_extrema_animation_ms() -> f64 {
    250.0
}

fn default_opacity_animation_ms() -> f64 {
    250.0
}

fn default_label_fade_ms() -> f64 {
    200.0
}

fn default_x_label_min_width_px() -> f64 {
    60.0
}

fn default_y_tick_count() -> usize {
    6
}

fn default_label_pool_capacity() -> usize {
    64
}

fn default_cursor_exit_delay_ms() -> f64 {
    300.0
}

fn default_initial_range_ratio() -> f64 {
    0.25
}

fn default_main_line_width() -> f64 {
    2.0
}

fn default_navigator_line_width() -> f64 {
    1.0
}

fn default_x_axis_height_px() -> f64 {
    24.0
}

fn default_label_font_px() -> f64 {
    11.0
}
