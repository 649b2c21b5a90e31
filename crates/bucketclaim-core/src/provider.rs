//! Collaborator traits for the storage provider and the probe transport

use crate::error::Result;
use async_trait::async_trait;

/// Storage provider capability surface
///
/// The workflow only interprets success or failure of each call; any
/// provider-specific detail is folded into the error message.
#[async_trait]
pub trait BucketProvider: Send + Sync {
    /// Returns the provider name (e.g., "aws-s3")
    fn name(&self) -> &str;

    /// Create a bucket owned by the operator's account
    async fn create_bucket(&self, bucket: &str) -> Result<()>;

    /// Delete a bucket previously created by a takeover run
    async fn delete_bucket(&self, bucket: &str) -> Result<()>;

    /// Upload a single object into a bucket
    async fn put_object(&self, bucket: &str, key: &str, body: Vec<u8>) -> Result<()>;
}

/// Probe transport
///
/// Implementations return the response body regardless of status code:
/// the "no such bucket" document arrives with a 404.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}
