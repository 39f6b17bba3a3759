use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API error: {status} - {body}")]
    Status { status: u16, body: String },

    #[error(transparent)]
    Parse(#[from] coralogix_dataprime::DataprimeError),

    #[error("Completion error: {0}")]
    Completion(String),

    #[error("No service name provided")]
    NoServiceName,

    #[error("No matching service name found for {0}")]
    UnresolvedService(String),
}
