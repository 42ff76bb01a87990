//! Response metadata and prelude serialization.
//!
//! The prelude is the JSON object the platform parses off the front of the
//! response body. Key order is not semantically significant to the consumer,
//! but the sentinel's position depends on the exact serialized byte length,
//! so headers use an ordered map to keep the encoding deterministic.

use std::collections::BTreeMap;

use bytes::Bytes;
use serde::Serialize;

use crate::envelope::types::FrameResult;

/// Content type applied when the caller does not supply one.
pub const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// HTTP-shaped description of a streamed invocation response.
///
/// Immutable once handed to a [`FramedStream`](crate::FramedStream): the
/// framer serializes a snapshot at construction, so later mutation of the
/// value never reaches the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponseMetadata {
    /// Response headers. Always contains a `Content-Type` entry.
    pub headers: BTreeMap<String, String>,

    /// HTTP status code.
    #[serde(rename = "statusCode")]
    pub status_code: u16,

    /// Cookies in `"name=value"` form. Omitted from the prelude when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cookies: Option<Vec<String>>,
}

impl ResponseMetadata {
    /// Metadata with status 200 and content type `application/json`.
    pub fn new() -> Self {
        Self::with_content_type(DEFAULT_CONTENT_TYPE)
    }

    /// Metadata with status 200 and the given content type.
    pub fn with_content_type(content_type: impl Into<String>) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), content_type.into());
        Self {
            headers,
            status_code: 200,
            cookies: None,
        }
    }

    /// Metadata with the given status code and content type.
    pub fn with_status(status_code: u16, content_type: impl Into<String>) -> Self {
        Self {
            status_code,
            ..Self::with_content_type(content_type)
        }
    }

    /// Add or replace a response header.
    pub fn insert_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.insert(name.into(), value.into());
    }

    /// Set the cookie list. Cookies are serialized in the order given.
    pub fn set_cookies(&mut self, cookies: Vec<String>) {
        self.cookies = Some(cookies);
    }

    /// Serialize to the UTF-8 JSON prelude bytes.
    ///
    /// Pure value transform; header values are the caller's responsibility
    /// and are not validated here.
    pub fn to_prelude(&self) -> FrameResult<Bytes> {
        Ok(Bytes::from(serde_json::to_vec(self)?))
    }
}

impl Default for ResponseMetadata {
    fn default() -> Self {
        Self::new()
    }
}
