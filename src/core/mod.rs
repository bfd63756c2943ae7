pub mod area_series;
pub mod bar_series;
pub mod data;
pub mod extrema;
pub mod grouper;
pub mod handle;
pub mod line_series;
pub mod scale;
pub mod search;
pub mod stack_sums;
pub mod types;

pub use area_series::project_percentage_area;
pub use bar_series::project_stacked_bars;
pub use data::{ChartData, ChartFlags, SeriesColumn, SeriesInput, SeriesKind};
pub use extrema::Extrema;
pub use grouper::{GroupingTuning, IndexPlan, PointGrouper};
pub use handle::{AnimationId, AxisElementId, HandleAllocator, SeriesId};
pub use line_series::project_line_path;
pub use scale::{ChartScale, SeriesSlice};
pub use search::{bracket, range_indexes};
pub use stack_sums::StackSums;
pub use types::{ChartRole, IndexRange, Viewport};
