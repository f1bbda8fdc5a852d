use thiserror::Error;

/// Collaborator failures surfaced to the session as a state flag
/// (`last_error`), never as an unhandled failure. Stale responses and
/// degenerate inputs (zero results, zero active filters, zero valid
/// coordinates) are NOT errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    #[error("filter extraction failed: {0}")]
    Extraction(String),
    #[error("search request failed: {0}")]
    Search(String),
}
