use thiserror::Error;

#[derive(Error, Debug)]
pub enum OracleError {
    #[error("Failed to build or send the HTTP request: {0}")]
    Request(#[from] reqwest::Error),

    #[error("No API credential is configured for the live quote source")]
    MissingCredential,

    #[error("Failed to deserialize the quote response: {0}")]
    Deserialization(String),

    #[error("Invalid data in quote response: {0}")]
    InvalidData(String),

    #[error("The live quote request timed out")]
    Timeout,
}
