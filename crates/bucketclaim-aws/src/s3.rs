//! S3 bucket provider

use crate::error::AwsError;
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{BucketLocationConstraint, CreateBucketConfiguration};
use bucketclaim_core::BucketProvider;

/// Region that rejects an explicit location constraint
const DEFAULT_REGION: &str = "us-east-1";

/// Connection settings for the S3 client
#[derive(Debug, Clone, Default)]
pub struct S3Settings {
    /// Region override (SDK default chain if not set)
    pub region: Option<String>,

    /// Shared config profile (default credential chain if not set)
    pub profile: Option<String>,

    /// Endpoint override for S3-compatible stores
    pub endpoint_url: Option<String>,
}

/// `BucketProvider` backed by `aws-sdk-s3`
pub struct S3Provider {
    client: Client,
    region: Option<String>,
}

impl S3Provider {
    /// Build a client from the SDK default config plus `settings` overrides
    pub async fn connect(settings: &S3Settings) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(profile) = &settings.profile {
            loader = loader.profile_name(profile);
        }
        if let Some(region) = &settings.region {
            loader = loader.region(Region::new(region.clone()));
        }
        let sdk_config = loader.load().await;

        let mut builder = aws_sdk_s3::config::Builder::from(&sdk_config);
        if let Some(endpoint) = &settings.endpoint_url {
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }

        let region = sdk_config.region().map(|r| r.as_ref().to_string());
        tracing::debug!(
            "S3 client ready (region: {}, profile: {})",
            region.as_deref().unwrap_or("<unset>"),
            settings.profile.as_deref().unwrap_or("<default>")
        );

        Self {
            client: Client::from_conf(builder.build()),
            region,
        }
    }

    /// Create from a pre-built client (for testing)
    pub fn from_client(client: Client, region: Option<String>) -> Self {
        Self { client, region }
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }
}

/// Location constraint to send with CreateBucket for `region`
fn location_constraint(region: Option<&str>) -> Option<CreateBucketConfiguration> {
    match region {
        None | Some(DEFAULT_REGION) => None,
        Some(region) => Some(
            CreateBucketConfiguration::builder()
                .location_constraint(BucketLocationConstraint::from(region))
                .build(),
        ),
    }
}

/// "Code: message" for service errors, the full error chain otherwise
fn describe<E, R>(err: &SdkError<E, R>) -> String
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    match err.code() {
        Some(code) => format!("{}: {}", code, err.message().unwrap_or("no message")),
        None => DisplayErrorContext(err).to_string(),
    }
}

#[async_trait]
impl BucketProvider for S3Provider {
    fn name(&self) -> &str {
        "aws-s3"
    }

    async fn create_bucket(&self, bucket: &str) -> bucketclaim_core::Result<()> {
        tracing::debug!("CreateBucket {}", bucket);
        self.client
            .create_bucket()
            .bucket(bucket)
            .set_create_bucket_configuration(location_constraint(self.region()))
            .send()
            .await
            .map_err(|e| AwsError::CreateBucket {
                bucket: bucket.to_string(),
                message: describe(&e),
            })?;
        Ok(())
    }

    async fn delete_bucket(&self, bucket: &str) -> bucketclaim_core::Result<()> {
        tracing::debug!("DeleteBucket {}", bucket);
        self.client
            .delete_bucket()
            .bucket(bucket)
            .send()
            .await
            .map_err(|e| AwsError::DeleteBucket {
                bucket: bucket.to_string(),
                message: describe(&e),
            })?;
        Ok(())
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
    ) -> bucketclaim_core::Result<()> {
        tracing::debug!("PutObject {}/{} ({} bytes)", bucket, key, body.len());
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| AwsError::PutObject {
                bucket: bucket.to_string(),
                key: key.to_string(),
                message: describe(&e),
            })?;
        Ok(())
    }
}
