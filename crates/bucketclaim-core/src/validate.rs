//! S3 general purpose bucket naming rules
//!
//! Names extracted from an error document are attacker-influenced. The
//! claim path only consults this check when name validation is enabled.

use thiserror::Error;

const MIN_LEN: usize = 3;
const MAX_LEN: usize = 63;
const RESERVED_PREFIXES: &[&str] = &["xn--", "sthree-", "amzn-s3-demo-"];
const RESERVED_SUFFIXES: &[&str] = &["-s3alias", "--ol-s3", ".mrap", "--x-s3"];

/// Reason a bucket name was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidBucketName {
    #[error("{name:?} must be between 3 and 63 characters (got {len})")]
    Length { name: String, len: usize },

    #[error("{name:?} contains invalid character {ch:?}")]
    InvalidCharacter { name: String, ch: char },

    #[error("{0:?} must begin and end with a letter or number")]
    Boundary(String),

    #[error("{0:?} must not contain adjacent periods")]
    AdjacentPeriods(String),

    #[error("{0:?} must not be formatted as an IP address")]
    IpAddress(String),

    #[error("{name:?} uses reserved affix {affix:?}")]
    ReservedAffix { name: String, affix: &'static str },
}

/// Check `name` against the S3 naming rules
pub fn validate_bucket_name(name: &str) -> Result<(), InvalidBucketName> {
    let len = name.chars().count();
    if !(MIN_LEN..=MAX_LEN).contains(&len) {
        return Err(InvalidBucketName::Length {
            name: name.to_string(),
            len,
        });
    }

    if let Some(ch) = name
        .chars()
        .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '.' || *c == '-'))
    {
        return Err(InvalidBucketName::InvalidCharacter {
            name: name.to_string(),
            ch,
        });
    }

    let bytes = name.as_bytes();
    let is_alnum = |b: u8| b.is_ascii_lowercase() || b.is_ascii_digit();
    if !is_alnum(bytes[0]) || !is_alnum(bytes[bytes.len() - 1]) {
        return Err(InvalidBucketName::Boundary(name.to_string()));
    }

    if name.contains("..") {
        return Err(InvalidBucketName::AdjacentPeriods(name.to_string()));
    }

    if name.parse::<std::net::Ipv4Addr>().is_ok() {
        return Err(InvalidBucketName::IpAddress(name.to_string()));
    }

    if let Some(affix) = RESERVED_PREFIXES.iter().copied().find(|p| name.starts_with(p)) {
        return Err(InvalidBucketName::ReservedAffix {
            name: name.to_string(),
            affix,
        });
    }
    if let Some(affix) = RESERVED_SUFFIXES.iter().copied().find(|s| name.ends_with(s)) {
        return Err(InvalidBucketName::ReservedAffix {
            name: name.to_string(),
            affix,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        for name in ["my-bucket", "assets.example.com", "abc", "a1b2c3", "a".repeat(63).as_str()] {
            assert_eq!(validate_bucket_name(name), Ok(()), "{name}");
        }
    }

    #[test]
    fn test_length_bounds() {
        assert!(matches!(
            validate_bucket_name("ab"),
            Err(InvalidBucketName::Length { len: 2, .. })
        ));
        assert!(matches!(
            validate_bucket_name(&"a".repeat(64)),
            Err(InvalidBucketName::Length { len: 64, .. })
        ));
        assert!(matches!(
            validate_bucket_name(""),
            Err(InvalidBucketName::Length { len: 0, .. })
        ));
    }

    #[test]
    fn test_invalid_characters() {
        assert!(matches!(
            validate_bucket_name("My-Bucket"),
            Err(InvalidBucketName::InvalidCharacter { ch: 'M', .. })
        ));
        assert!(matches!(
            validate_bucket_name("my_bucket"),
            Err(InvalidBucketName::InvalidCharacter { ch: '_', .. })
        ));
        assert!(matches!(
            validate_bucket_name("bucket/../etc"),
            Err(InvalidBucketName::InvalidCharacter { ch: '/', .. })
        ));
    }

    #[test]
    fn test_boundaries_and_periods() {
        assert!(matches!(
            validate_bucket_name("-bucket"),
            Err(InvalidBucketName::Boundary(_))
        ));
        assert!(matches!(
            validate_bucket_name("bucket."),
            Err(InvalidBucketName::Boundary(_))
        ));
        assert!(matches!(
            validate_bucket_name("my..bucket"),
            Err(InvalidBucketName::AdjacentPeriods(_))
        ));
    }

    #[test]
    fn test_ip_address() {
        assert!(matches!(
            validate_bucket_name("192.168.5.4"),
            Err(InvalidBucketName::IpAddress(_))
        ));
    }

    #[test]
    fn test_reserved_affixes() {
        assert!(matches!(
            validate_bucket_name("xn--bucket"),
            Err(InvalidBucketName::ReservedAffix { affix: "xn--", .. })
        ));
        assert!(matches!(
            validate_bucket_name("bucket-s3alias"),
            Err(InvalidBucketName::ReservedAffix {
                affix: "-s3alias",
                ..
            })
        ));
        assert!(matches!(
            validate_bucket_name("bucket--x-s3"),
            Err(InvalidBucketName::ReservedAffix { affix: "--x-s3", .. })
        ));
    }
}
