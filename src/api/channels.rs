use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::api::ThemeTable;
use crate::core::SeriesId;
use crate::render::Color;

/// FIFO queue carrying one kind of message between chart components.
#[derive(Debug, Clone, PartialEq)]
pub struct Channel<T> {
    queue: VecDeque<T>,
}

impl<T> Default for Channel<T> {
    fn default() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }
}

impl<T> Channel<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn send(&mut self, message: T) {
        self.queue.push_back(message);
    }

    /// Takes every pending message in send order.
    pub fn drain(&mut self) -> Vec<T> {
        self.queue.drain(..).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

/// Range messages exchanged between the navigator and the main chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RangeSync {
    /// Apply the range immediately.
    Changed { min: f64, max: f64 },
    /// Animate towards the range.
    Animate { min: f64, max: f64 },
}

/// Series visibility mirrored from the main chart to the navigator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibilitySync {
    pub series: SeriesId,
    pub visible: bool,
}

/// New theme for every view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeChange {
    pub theme: ThemeTable,
}

/// Value of one series at the cursor, for tooltips and legends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipValue {
    pub series: SeriesId,
    pub name: String,
    pub color: Color,
    pub value: f64,
}

/// Cursor notifications for tooltip collaborators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CursorEvent {
    Moved {
        index: usize,
        x: f64,
        canvas_x: f64,
        values: Vec<TooltipValue>,
    },
    Hidden,
}
