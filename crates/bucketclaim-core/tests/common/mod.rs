use async_trait::async_trait;
use bucketclaim_core::{BucketProvider, ClaimError, Fetcher, LedgerWriter, Result};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Create(String),
    Delete(String),
    Put(String, String),
}

/// In-memory provider that owns what it creates
#[derive(Default)]
pub struct MockProvider {
    calls: Mutex<Vec<Call>>,
    owned: Mutex<HashSet<String>>,
    refuse_create: HashSet<String>,
    refuse_delete: HashSet<String>,
}

#[allow(dead_code)]
impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn refusing_create(mut self, bucket: &str) -> Self {
        self.refuse_create.insert(bucket.to_string());
        self
    }

    pub fn refusing_delete(mut self, bucket: &str) -> Self {
        self.refuse_delete.insert(bucket.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn create_calls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Create(name) => Some(name),
                _ => None,
            })
            .collect()
    }

    pub fn delete_calls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Delete(name) => Some(name),
                _ => None,
            })
            .collect()
    }

    pub fn owns(&self, bucket: &str) -> bool {
        self.owned.lock().unwrap().contains(bucket)
    }
}

#[async_trait]
impl BucketProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn create_bucket(&self, bucket: &str) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Create(bucket.to_string()));
        if self.refuse_create.contains(bucket) {
            return Err(ClaimError::Provider(format!("AccessDenied: {}", bucket)));
        }
        if !self.owned.lock().unwrap().insert(bucket.to_string()) {
            return Err(ClaimError::Provider(format!(
                "BucketAlreadyOwnedByYou: {}",
                bucket
            )));
        }
        Ok(())
    }

    async fn delete_bucket(&self, bucket: &str) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Delete(bucket.to_string()));
        if self.refuse_delete.contains(bucket) {
            return Err(ClaimError::Provider(format!("BucketNotEmpty: {}", bucket)));
        }
        self.owned.lock().unwrap().remove(bucket);
        Ok(())
    }

    async fn put_object(&self, bucket: &str, key: &str, _body: Vec<u8>) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Put(bucket.to_string(), key.to_string()));
        Ok(())
    }
}

/// Serves canned bodies by URL; anything unknown fails like a DNS error
#[derive(Default)]
pub struct MockFetcher {
    bodies: HashMap<String, Vec<u8>>,
    requested: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn serving(mut self, url: &str, body: impl Into<Vec<u8>>) -> Self {
        self.bodies.insert(url.to_string(), body.into());
        self
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        self.requested.lock().unwrap().push(url.to_string());
        self.bodies
            .get(url)
            .cloned()
            .ok_or_else(|| ClaimError::Fetch(format!("dns error: failed to lookup {}", url)))
    }
}

/// Ledger whose every append fails
pub struct BrokenLedger;

#[async_trait]
impl LedgerWriter for BrokenLedger {
    async fn append(&mut self, bucket: &str) -> Result<()> {
        Err(ClaimError::LedgerAppend {
            bucket: bucket.to_string(),
            source: std::io::Error::other("disk full"),
        })
    }
}

pub fn no_such_bucket(bucket: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<Error><Code>NoSuchBucket</Code><Message>The specified bucket does not exist</Message><BucketName>{}</BucketName><RequestId>8RZ3V1XK0Q5N2M7B</RequestId><HostId>c2FtcGxlLWhvc3QtaWQ=</HostId></Error>"#,
        bucket
    )
}
