// Adapter error taxonomy.
//
// Input errors are detected synchronously and carry fixed messages that the
// oracle node matches on. Downstream errors wrap the collaborator's anyhow
// error and render its whole context chain, so the caller sees the cause.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdapterError {
    #[error("No data")]
    NoData,

    #[error("Job run ID required")]
    MissingJobRunId,

    #[error("Content hash required")]
    MissingContentHash,

    /// The host adapter could not decode the request at all.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("{0:#}")]
    Fetch(anyhow::Error),

    #[error("{0:#}")]
    Moderation(anyhow::Error),
}

impl AdapterError {
    /// True for errors caused by the request itself rather than a downstream call.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::NoData | Self::MissingJobRunId | Self::MissingContentHash | Self::InvalidRequest(_)
        )
    }
}
