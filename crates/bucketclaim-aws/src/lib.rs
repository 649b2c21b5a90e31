//! AWS collaborators for bucketclaim
//!
//! This crate implements the two collaborator traits of
//! `bucketclaim-core` against real infrastructure:
//!
//! - [`S3Provider`]: `BucketProvider` on top of `aws-sdk-s3`
//! - [`HttpFetcher`]: `Fetcher` on top of `reqwest`, configured through an
//!   explicit [`TransportConfig`] rather than process-wide TLS state
//!
//! # Example
//!
//! ```ignore
//! use bucketclaim_aws::{HttpFetcher, S3Provider, S3Settings, TransportConfig};
//!
//! let provider = S3Provider::connect(&S3Settings {
//!     region: Some("eu-west-1".to_string()),
//!     ..Default::default()
//! })
//! .await;
//! let fetcher = HttpFetcher::new(&TransportConfig::default())?;
//! ```

pub mod error;
pub mod fetch;
pub mod s3;

pub use error::{AwsError, Result};
pub use fetch::{HttpFetcher, TransportConfig};
pub use s3::{S3Provider, S3Settings};
