use thiserror::Error;

/// Errors emitted while resolving expressions and formatting samples.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("unknown provider: {0}")]
    UnknownProvider(String),
    #[error("unknown operation: {0}")]
    UnknownOperation(String),
    #[error("invalid expression: {0}")]
    InvalidExpression(String),
    #[error("invalid parameter: {0}")]
    InvalidParams(String),
    #[error("asset error: {0}")]
    Asset(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Svnr(#[from] fakeform_core::SvnrError),
}
