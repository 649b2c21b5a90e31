//! AWS adapter error types

use bucketclaim_core::ClaimError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AwsError {
    #[error("Could not create bucket {bucket}: {message}")]
    CreateBucket { bucket: String, message: String },

    #[error("Could not delete bucket {bucket}: {message}")]
    DeleteBucket { bucket: String, message: String },

    #[error("Could not put object {key} into {bucket}: {message}")]
    PutObject {
        bucket: String,
        key: String,
        message: String,
    },

    #[error("GET {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

impl From<AwsError> for ClaimError {
    fn from(err: AwsError) -> Self {
        match err {
            AwsError::Request { .. } => ClaimError::Fetch(err.to_string()),
            other => ClaimError::Provider(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, AwsError>;
