//! Immutable input columns shared by the main chart and the navigator.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::core::{Extrema, HandleAllocator, IndexRange, SeriesId};
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Drawing strategy of one series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesKind {
    Line,
    Bar,
    #[serde(rename = "area")]
    PercentageArea,
}

impl SeriesKind {
    fn from_type_tag(tag: &str) -> Option<Self> {
        match tag {
            "line" => Some(Self::Line),
            "bar" => Some(Self::Bar),
            "area" => Some(Self::PercentageArea),
            _ => None,
        }
    }
}

/// Dataset-wide presentation flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChartFlags {
    #[serde(default)]
    pub stacked: bool,
    #[serde(default)]
    pub percentage: bool,
    #[serde(default)]
    pub y_scaled: bool,
}

/// One y column plus its presentation metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesColumn {
    pub id: SeriesId,
    pub label: String,
    pub name: String,
    pub color: Color,
    pub kind: SeriesKind,
    pub values: Vec<f64>,
    global: Option<Extrema>,
}

impl SeriesColumn {
    /// Extrema over the whole series; `None` for a series without finite values.
    #[must_use]
    pub fn global_extrema(&self) -> Option<Extrema> {
        self.global
    }

    /// Extrema restricted to `range`.
    #[must_use]
    pub fn local_extrema(&self, range: IndexRange) -> Option<Extrema> {
        Extrema::scan(&self.values, range)
    }
}

/// Series description used by [`ChartData::from_columns`].
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesInput {
    pub label: String,
    pub name: String,
    pub color: Color,
    pub kind: SeriesKind,
    pub values: Vec<f64>,
}

impl SeriesInput {
    #[must_use]
    pub fn new(label: impl Into<String>, kind: SeriesKind, values: Vec<f64>) -> Self {
        let label = label.into();
        Self {
            name: label.clone(),
            label,
            color: Color::rgb(0.25, 0.45, 0.85),
            kind,
            values,
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

/// Shared x axis and series columns of one chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    x_axis: Vec<f64>,
    series: Vec<SeriesColumn>,
    flags: ChartFlags,
}

#[derive(Debug, Deserialize)]
struct RawChartData {
    columns: Vec<Vec<Value>>,
    types: IndexMap<String, String>,
    #[serde(default)]
    names: IndexMap<String, String>,
    #[serde(default)]
    colors: IndexMap<String, String>,
    #[serde(flatten)]
    flags: ChartFlags,
}

impl ChartData {
    /// Builds the dataset from already-separated columns.
    ///
    /// Only structural integrity is checked: every series must have as many
    /// samples as the x axis and labels must be unique.
    pub fn from_columns(
        x_axis: Vec<f64>,
        series: Vec<SeriesInput>,
        flags: ChartFlags,
        handles: &HandleAllocator,
    ) -> ChartResult<Self> {
        let mut columns = Vec::with_capacity(series.len());
        for input in series {
            if input.values.len() != x_axis.len() {
                return Err(ChartError::InvalidData(format!(
                    "series `{}` has {} values but the x axis has {}",
                    input.label,
                    input.values.len(),
                    x_axis.len()
                )));
            }
            if columns
                .iter()
                .any(|column: &SeriesColumn| column.label == input.label)
            {
                return Err(ChartError::InvalidData(format!(
                    "duplicate series label `{}`",
                    input.label
                )));
            }
            let global = Extrema::of_iter(input.values.iter().copied());
            columns.push(SeriesColumn {
                id: handles.next_series(),
                label: input.label,
                name: input.name,
                color: input.color,
                kind: input.kind,
                values: input.values,
                global,
            });
        }

        debug!(
            points = x_axis.len(),
            series = columns.len(),
            stacked = flags.stacked,
            percentage = flags.percentage,
            y_scaled = flags.y_scaled,
            "loaded chart data"
        );
        Ok(Self {
            x_axis,
            series: columns,
            flags,
        })
    }

    /// Decodes the host column payload (`columns`, `types`, `names`, `colors`
    /// and the optional `stacked`/`percentage`/`y_scaled` flags).
    pub fn from_json_str(input: &str, handles: &HandleAllocator) -> ChartResult<Self> {
        let raw: RawChartData = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse chart data: {e}")))?;

        let mut x_axis: Option<Vec<f64>> = None;
        let mut series = Vec::new();
        for column in raw.columns {
            let (label, values) = decode_column(column)?;
            let type_tag = raw.types.get(&label).ok_or_else(|| {
                ChartError::InvalidData(format!("column `{label}` has no type entry"))
            })?;

            if type_tag == "x" {
                if x_axis.replace(values).is_some() {
                    return Err(ChartError::invalid("chart data has more than one x column"));
                }
                continue;
            }

            let kind = SeriesKind::from_type_tag(type_tag).ok_or_else(|| {
                ChartError::InvalidData(format!(
                    "column `{label}` has unknown type `{type_tag}`"
                ))
            })?;
            let color = match raw.colors.get(&label) {
                Some(hex) => Color::from_hex(hex)?,
                None => Color::rgb(0.25, 0.45, 0.85),
            };
            let name = raw.names.get(&label).cloned().unwrap_or_else(|| label.clone());
            series.push(SeriesInput {
                label,
                name,
                color,
                kind,
                values,
            });
        }

        let x_axis = x_axis.ok_or_else(|| ChartError::invalid("chart data has no x column"))?;
        Self::from_columns(x_axis, series, raw.flags, handles)
    }

    #[must_use]
    pub fn x_axis(&self) -> &[f64] {
        &self.x_axis
    }

    #[must_use]
    pub fn series(&self) -> &[SeriesColumn] {
        &self.series
    }

    #[must_use]
    pub fn series_by_id(&self, id: SeriesId) -> Option<&SeriesColumn> {
        self.series.iter().find(|column| column.id == id)
    }

    #[must_use]
    pub fn series_by_label(&self, label: &str) -> Option<&SeriesColumn> {
        self.series.iter().find(|column| column.label == label)
    }

    #[must_use]
    pub fn flags(&self) -> ChartFlags {
        self.flags
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.x_axis.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x_axis.is_empty()
    }

    /// `[first, last]` timestamps, `None` for an empty axis.
    #[must_use]
    pub fn x_bounds(&self) -> Option<(f64, f64)> {
        Some((*self.x_axis.first()?, *self.x_axis.last()?))
    }

    /// Full index span of the axis.
    #[must_use]
    pub fn full_index_range(&self) -> Option<IndexRange> {
        if self.x_axis.is_empty() {
            return None;
        }
        Some(IndexRange::new(0, self.x_axis.len() - 1))
    }

    /// Whether series are drawn on top of each other.
    #[must_use]
    pub fn is_stacked(&self) -> bool {
        self.flags.stacked
            || self.flags.percentage
            || self
                .series
                .iter()
                .any(|column| column.kind == SeriesKind::PercentageArea)
    }
}

fn decode_column(column: Vec<Value>) -> ChartResult<(String, Vec<f64>)> {
    let mut cells = column.into_iter();
    let label = match cells.next() {
        Some(Value::String(label)) => label,
        _ => return Err(ChartError::invalid("column must start with a string label")),
    };
    let values = cells
        .map(|cell| {
            cell.as_f64().ok_or_else(|| {
                ChartError::InvalidData(format!("column `{label}` holds a non-numeric value"))
            })
        })
        .collect::<ChartResult<Vec<f64>>>()?;
    Ok((label, values))
}
