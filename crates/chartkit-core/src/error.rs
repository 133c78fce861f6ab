// File: crates/chartkit-core/src/error.rs
// Summary: Error type shared by the core library.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChartError {
    /// The chart's parent selector does not name a host on the page.
    #[error("host element '{0}' not found on page")]
    HostNotFound(String),

    #[error("failed to read CSV '{}': {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("CSV header has no '{0}' column")]
    MissingColumn(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("render failed: {0}")]
    Render(String),
}

pub type Result<T, E = ChartError> = std::result::Result<T, E>;
