//! Provider "no such bucket" error document
//!
//! S3 answers a request for a missing bucket with a small XML document:
//!
//! ```text
//! <Error>
//!   <Code>NoSuchBucket</Code>
//!   <Message>The specified bucket does not exist</Message>
//!   <BucketName>assets.example.com</BucketName>
//!   <RequestId>...</RequestId>
//!   <HostId>...</HostId>
//! </Error>
//! ```
//!
//! The body is untrusted. Anything that is not a well-formed `<Error>`
//! document parses to [`ErrorResponse::default()`], never to an error.

use quick_xml::events::Event;
use quick_xml::reader::Reader;
use serde::Serialize;

const ROOT_ELEMENT: &[u8] = b"Error";

/// Fields of a provider error document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    pub bucket_name: String,
    pub request_id: String,
    pub host_id: String,
}

#[derive(Debug, Clone, Copy)]
enum Field {
    Code,
    Message,
    BucketName,
    RequestId,
    HostId,
}

impl Field {
    fn from_tag(tag: &[u8]) -> Option<Self> {
        match tag {
            b"Code" => Some(Field::Code),
            b"Message" => Some(Field::Message),
            b"BucketName" => Some(Field::BucketName),
            b"RequestId" => Some(Field::RequestId),
            b"HostId" => Some(Field::HostId),
            _ => None,
        }
    }
}

impl ErrorResponse {
    /// Parse a fetched body. Each call starts from an empty value.
    pub fn parse(body: &[u8]) -> Self {
        let text = String::from_utf8_lossy(body);
        match Self::parse_document(&text) {
            Some(response) => response,
            None => {
                tracing::debug!("Body is not a provider error document ({} bytes)", body.len());
                Self::default()
            }
        }
    }

    /// The bucket name the provider expects, if the document carried one
    pub fn bucket_name(&self) -> Option<&str> {
        if self.bucket_name.is_empty() {
            None
        } else {
            Some(&self.bucket_name)
        }
    }

    fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Code => &mut self.code,
            Field::Message => &mut self.message,
            Field::BucketName => &mut self.bucket_name,
            Field::RequestId => &mut self.request_id,
            Field::HostId => &mut self.host_id,
        }
    }

    /// Returns `None` for anything other than a complete `<Error>` root.
    fn parse_document(text: &str) -> Option<Self> {
        let mut reader = Reader::from_str(text);
        let mut response = Self::default();
        let mut depth = 0usize;
        let mut current: Option<Field> = None;

        loop {
            match reader.read_event().ok()? {
                Event::Start(e) => {
                    depth += 1;
                    match depth {
                        1 if e.local_name().as_ref() != ROOT_ELEMENT => return None,
                        2 => {
                            current = Field::from_tag(e.local_name().as_ref());
                            if let Some(field) = current {
                                response.field_mut(field).clear();
                            }
                        }
                        _ => {}
                    }
                }
                Event::Empty(e) => match depth {
                    0 => {
                        return (e.local_name().as_ref() == ROOT_ELEMENT).then(Self::default);
                    }
                    1 => {
                        if let Some(field) = Field::from_tag(e.local_name().as_ref()) {
                            response.field_mut(field).clear();
                        }
                    }
                    _ => {}
                },
                Event::Text(t) if depth == 2 => {
                    if let Some(field) = current {
                        response.field_mut(field).push_str(&t.unescape().ok()?);
                    }
                }
                Event::CData(c) if depth == 2 => {
                    if let Some(field) = current {
                        response
                            .field_mut(field)
                            .push_str(&String::from_utf8_lossy(&c.into_inner()));
                    }
                }
                Event::End(_) => {
                    depth = depth.checked_sub(1)?;
                    match depth {
                        0 => return Some(response),
                        1 => current = None,
                        _ => {}
                    }
                }
                Event::Eof => return None,
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_SUCH_BUCKET: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Error><Code>NoSuchBucket</Code><Message>The specified bucket does not exist</Message><BucketName>assets.example.com</BucketName><RequestId>4442587FB7D0A2F9</RequestId><HostId>abc123=</HostId></Error>"#;

    #[test]
    fn test_parse_no_such_bucket() {
        let response = ErrorResponse::parse(NO_SUCH_BUCKET.as_bytes());
        assert_eq!(response.code, "NoSuchBucket");
        assert_eq!(response.message, "The specified bucket does not exist");
        assert_eq!(response.bucket_name, "assets.example.com");
        assert_eq!(response.request_id, "4442587FB7D0A2F9");
        assert_eq!(response.host_id, "abc123=");
        assert_eq!(response.bucket_name(), Some("assets.example.com"));
    }

    #[test]
    fn test_parse_pretty_printed_keeps_value_verbatim() {
        let body = "<Error>\n  <Code>NoSuchBucket</Code>\n  <BucketName>my-bucket</BucketName>\n</Error>\n";
        let response = ErrorResponse::parse(body.as_bytes());
        assert_eq!(response.bucket_name, "my-bucket");
    }

    #[test]
    fn test_parse_unescapes_entities_and_cdata() {
        let body = "<Error><Message>a &amp; b</Message><BucketName><![CDATA[cdata-bucket]]></BucketName></Error>";
        let response = ErrorResponse::parse(body.as_bytes());
        assert_eq!(response.message, "a & b");
        assert_eq!(response.bucket_name, "cdata-bucket");
    }

    #[test]
    fn test_parse_missing_bucket_name() {
        let body = "<Error><Code>AccessDenied</Code><Message>Access Denied</Message></Error>";
        let response = ErrorResponse::parse(body.as_bytes());
        assert_eq!(response.code, "AccessDenied");
        assert!(response.bucket_name.is_empty());
        assert_eq!(response.bucket_name(), None);
    }

    #[test]
    fn test_parse_html_body() {
        let body = "<!DOCTYPE html><html><body><h1>It works</h1></body></html>";
        assert_eq!(ErrorResponse::parse(body.as_bytes()), ErrorResponse::default());
    }

    #[test]
    fn test_parse_wrong_root_ignores_fields() {
        let body = "<ListBucketResult><BucketName>not-an-error</BucketName></ListBucketResult>";
        assert_eq!(ErrorResponse::parse(body.as_bytes()).bucket_name(), None);
    }

    #[test]
    fn test_parse_nested_field_is_not_direct_child() {
        let body = "<Error><Details><BucketName>nested</BucketName></Details></Error>";
        assert_eq!(ErrorResponse::parse(body.as_bytes()).bucket_name(), None);
    }

    #[test]
    fn test_parse_truncated_document() {
        let body = "<Error><Code>NoSuchBucket</Code><BucketName>half-writ";
        assert_eq!(ErrorResponse::parse(body.as_bytes()), ErrorResponse::default());
    }

    #[test]
    fn test_parse_mismatched_tags() {
        let body = "<Error><BucketName>x</Code></Error>";
        assert_eq!(ErrorResponse::parse(body.as_bytes()), ErrorResponse::default());
    }

    #[test]
    fn test_parse_garbage_and_empty() {
        assert_eq!(ErrorResponse::parse(b""), ErrorResponse::default());
        assert_eq!(ErrorResponse::parse(b"not xml at all"), ErrorResponse::default());
        assert_eq!(
            ErrorResponse::parse(&[0xff, 0xfe, 0x00, 0x3c]),
            ErrorResponse::default()
        );
    }

    #[test]
    fn test_parse_empty_root() {
        assert_eq!(ErrorResponse::parse(b"<Error/>"), ErrorResponse::default());
    }

    #[test]
    fn test_parse_does_not_carry_state_between_calls() {
        let first = ErrorResponse::parse(NO_SUCH_BUCKET.as_bytes());
        assert_eq!(first.bucket_name(), Some("assets.example.com"));

        let second = ErrorResponse::parse(b"<html>gateway timeout</html>");
        assert_eq!(second.bucket_name(), None);
    }
}
