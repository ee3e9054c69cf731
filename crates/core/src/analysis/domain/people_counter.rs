use thiserror::Error;

use crate::shared::selected_file::SelectedFile;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("failed to read {name}: {source}")]
    Read {
        name: String,
        #[source]
        source: std::io::Error,
    },
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("{url} responded with status {status}")]
    Status { url: String, status: u16 },
    #[error("malformed response: {0}")]
    MalformedResponse(#[source] serde_json::Error),
}

/// Domain interface for the remote people-counting service.
pub trait PeopleCounter: Send + Sync {
    /// Uploads `file` and returns the number of people detected in it.
    fn count_people(&self, file: &SelectedFile) -> Result<u32, AnalysisError>;
}
