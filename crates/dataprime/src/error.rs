use thiserror::Error;

pub type Result<T> = std::result::Result<T, DataprimeError>;

#[derive(Error, Debug)]
pub enum DataprimeError {
    #[error("Failed to parse query response: {0}")]
    Response(#[from] serde_json::Error),
}
