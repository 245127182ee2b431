use reqwest::StatusCode;
use thiserror::Error;
pub type Result<T = ()> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("malformed api key")]
    MalformedApiKey,
    #[error("malformed url")]
    MalformedUrl(#[from] url::ParseError),
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("HTTP status code: {0}")]
    UnexpectedStatus(StatusCode),
}

impl Error {
    pub fn status(status: StatusCode) -> Self {
        Self::UnexpectedStatus(status)
    }
}
