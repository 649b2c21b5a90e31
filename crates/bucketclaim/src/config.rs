//! Option resolution
//!
//! Global options are parsed once and resolved into a [`RunConfig`]; the
//! workflow crates never look at flags or environment variables.

use bucketclaim_aws::{S3Settings, TransportConfig};
use bucketclaim_core::DEFAULT_LEDGER_PATH;
use clap::Args;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Region for the S3 client and new buckets
    #[arg(short, long, env = "AWS_REGION", global = true)]
    pub region: Option<String>,

    /// Shared config profile (default credential chain if omitted)
    #[arg(short, long, env = "AWS_PROFILE", global = true)]
    pub profile: Option<String>,

    /// S3 endpoint override (S3-compatible stores)
    #[arg(long, env = "BUCKETCLAIM_ENDPOINT_URL", global = true)]
    pub endpoint_url: Option<String>,

    /// Skip certificate verification when probing candidates
    #[arg(short = 'k', long, env = "BUCKETCLAIM_INSECURE", global = true)]
    pub insecure: bool,

    /// Ledger of claimed buckets
    #[arg(long, env = "BUCKETCLAIM_LEDGER", default_value = DEFAULT_LEDGER_PATH, global = true)]
    pub ledger: PathBuf,

    /// Probe timeout in seconds (0 disables)
    #[arg(long, default_value_t = 30, global = true)]
    pub timeout: u64,

    /// Debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Resolved configuration for one invocation
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub s3: S3Settings,
    pub transport: TransportConfig,
    pub ledger_path: PathBuf,
}

impl From<&GlobalArgs> for RunConfig {
    fn from(args: &GlobalArgs) -> Self {
        Self {
            s3: S3Settings {
                region: args.region.clone(),
                profile: args.profile.clone(),
                endpoint_url: args.endpoint_url.clone(),
            },
            transport: TransportConfig {
                accept_invalid_certs: args.insecure,
                timeout: (args.timeout > 0).then(|| Duration::from_secs(args.timeout)),
            },
            ledger_path: args.ledger.clone(),
        }
    }
}
