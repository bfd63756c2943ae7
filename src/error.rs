use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    /// A series handle that does not belong to this chart.
    #[error("unknown series handle {handle}")]
    UnknownSeries { handle: u32 },

    #[error("render backend failure: {0}")]
    Backend(String),
}

impl ChartError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidData(message.into())
    }
}
