mod axis;
mod axis_label_format;
mod axis_ticks;
mod channels;
mod engine;
mod engine_accessors;
mod engine_config;
mod engine_init;
mod extrema_animator;
mod interaction_controller;
mod invalidation;
mod navigator_window;
mod range_interaction_controller;
mod render_coordinator;
mod series_painter;
mod series_state;
mod theme;
mod view;
mod viewport_controller;
mod worker;

pub use axis::{
    AxisDiff, AxisElement, AxisElementState, AxisLabelEngine, AxisOrientation, array_diff,
};
pub use axis_label_format::{format_x_label, format_y_label};
pub use axis_ticks::{XTickSequence, nice_y_ticks};
pub use channels::{
    Channel, CursorEvent, RangeSync, ThemeChange, TooltipValue, VisibilitySync,
};
pub use engine::ChartEngine;
pub use engine_config::ChartEngineConfig;
pub use extrema_animator::{ExtremaAnimator, ExtremaDirection};
pub use invalidation::DirtyFlags;
pub use navigator_window::NavigatorWindow;
pub use series_painter::{PaintPass, draw_by_interval};
pub use series_state::SeriesState;
pub use theme::{ColorRole, ThemeTable};
pub use view::ChartView;
pub use viewport_controller::{RangeChange, RangeOptions, ViewportController};
pub use worker::{WorkerMessage, WorkerReceiver, WorkerSender, worker_channel};
