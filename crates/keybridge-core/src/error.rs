use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompileError {
    #[error("no controller pin is named '{0}'; this keyboard may not use a Pro Micro compatible pinout")]
    UnresolvedPin(String),

    #[error("layout '{0}' does not exist in this descriptor")]
    LayoutNotFound(String),

    #[error("malformed descriptor: {0}")]
    MalformedDescriptor(String),

    #[error("JSON Serialization Error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type CompileResult<T> = Result<T, CompileError>;
