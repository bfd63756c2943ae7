use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use serde::{Deserialize, Serialize};

use crate::api::{CursorEvent, RangeSync, ThemeTable, VisibilitySync};
use crate::core::SeriesId;
use crate::error::{ChartError, ChartResult};

/// Structured message crossing into or out of an isolated chart context.
///
/// Serialized as tagged JSON (`{"type": "RANGE_CHANGED", "min": .., "max": ..}`)
/// so it survives any transport that moves strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkerMessage {
    RangeChanged { min: f64, max: f64 },
    AnimateRange { min: f64, max: f64 },
    SeriesVisibleChange { series: SeriesId, visible: bool },
    ThemeChanged { theme: ThemeTable },
    Tooltip { event: CursorEvent },
}

impl WorkerMessage {
    pub fn to_json(&self) -> ChartResult<String> {
        serde_json::to_string(self).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize worker message: {e}"))
        })
    }

    pub fn from_json(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse worker message: {e}")))
    }
}

impl From<RangeSync> for WorkerMessage {
    fn from(message: RangeSync) -> Self {
        match message {
            RangeSync::Changed { min, max } => Self::RangeChanged { min, max },
            RangeSync::Animate { min, max } => Self::AnimateRange { min, max },
        }
    }
}

impl From<VisibilitySync> for WorkerMessage {
    fn from(message: VisibilitySync) -> Self {
        Self::SeriesVisibleChange {
            series: message.series,
            visible: message.visible,
        }
    }
}

impl From<CursorEvent> for WorkerMessage {
    fn from(event: CursorEvent) -> Self {
        Self::Tooltip { event }
    }
}

/// Sending half of a one-way worker channel.
#[derive(Debug, Clone)]
pub struct WorkerSender {
    inner: Sender<String>,
}

impl WorkerSender {
    /// Serializes and posts a message; fails when the receiver is gone.
    pub fn post(&self, message: &WorkerMessage) -> ChartResult<()> {
        let payload = message.to_json()?;
        self.inner
            .send(payload)
            .map_err(|_| ChartError::invalid("worker channel receiver disconnected"))
    }
}

/// Receiving half of a one-way worker channel.
#[derive(Debug)]
pub struct WorkerReceiver {
    inner: Receiver<String>,
}

impl WorkerReceiver {
    /// Next pending message without blocking; `Ok(None)` when nothing is queued
    /// or the sender is gone.
    pub fn try_next(&self) -> ChartResult<Option<WorkerMessage>> {
        match self.inner.try_recv() {
            Ok(payload) => WorkerMessage::from_json(&payload).map(Some),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => Ok(None),
        }
    }

    /// Every pending message in send order.
    pub fn drain(&self) -> ChartResult<Vec<WorkerMessage>> {
        let mut messages = Vec::new();
        while let Some(message) = self.try_next()? {
            messages.push(message);
        }
        Ok(messages)
    }
}

/// Creates a FIFO one-way channel for worker messages.
#[must_use]
pub fn worker_channel() -> (WorkerSender, WorkerReceiver) {
    let (sender, receiver) = mpsc::channel();
    (
        WorkerSender { inner: sender },
        WorkerReceiver { inner: receiver },
    )
}
