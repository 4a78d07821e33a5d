use thiserror::Error;

#[derive(Error, Debug)]
pub enum EnrichError {
    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("Model request error: {0}")]
    ModelTransport(#[from] reqwest::Error),

    #[error("Model API error {status}: {body}")]
    ModelApi { status: u16, body: String },

    #[error("Model returned no completion choices")]
    EmptyCompletion,

    #[error("Malformed model response: expected 4 labeled lines, got {lines}")]
    MalformedResponse { lines: usize },

    #[error("Malformed model response: line {index} has no ':' separator")]
    UnlabeledLine { index: usize },

    #[error("Document in '{collection}' missing required field '{field}'")]
    MissingField {
        collection: &'static str,
        field: &'static str,
    },

    #[error("Missing required environment variable {name}")]
    MissingEnv { name: &'static str },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type EnrichResult<T> = Result<T, EnrichError>;
