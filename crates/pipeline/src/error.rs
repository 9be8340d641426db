use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// The payload is not an object with a string `reason` and a `changes`
    /// array of known change types.
    #[error("Invalid response format")]
    InvalidResponse,

    #[error("Invalid JSON: {0}")]
    Parse(String),
}
