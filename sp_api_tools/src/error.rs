use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpApiError {
    #[error("Could not initialize client: {0}")]
    Initialization(String),
    #[error("Failed to obtain access token: {0}")]
    AuthError(String),
    #[error("Invalid REST response: {0}")]
    RestResponseError(String),
    #[error("Could not deserialize JSON: {0}")]
    JsonError(String),
    #[error("Failed to fetch orders. Error {status}. {message}")]
    FetchError { status: u16, message: String },
}
