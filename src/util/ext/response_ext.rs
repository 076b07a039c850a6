//! Provides the [`ResponseExt`](ResponseExt) trait which provides commonly used functions on HTTP
//! responses.

use crate::error::StreamError;
use async_trait::async_trait;
use percent_encoding::percent_decode_str;
use reqwest::header::CONTENT_DISPOSITION;
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// Collection of common functions used with HTTP responses.
#[async_trait]
pub trait ResponseExt {
    /// Streams the response body chunk by chunk into a given writer. Returns the number of bytes
    /// written.
    async fn to_writer<W>(&mut self, dest: &mut W) -> Result<u64, StreamError>
    where
        W: AsyncWrite + Unpin + Send;

    /// Returns the file name the response should be saved as. The `filename` parameter of a
    /// `Content-Disposition` header takes precedence over the last segment of the response URL.
    fn file_name(&self) -> Option<String>;
}

#[async_trait]
impl ResponseExt for reqwest::Response {
    async fn to_writer<W>(&mut self, dest: &mut W) -> Result<u64, StreamError>
    where
        W: AsyncWrite + Unpin + Send,
    {
        let mut written = 0;
        while let Some(chunk) = self.chunk().await.map_err(StreamError::Read)? {
            written += chunk.len() as u64;
            dest.write_all(&chunk).await.map_err(StreamError::Write)?;
        }

        dest.flush().await.map_err(StreamError::Write)?;
        Ok(written)
    }

    fn file_name(&self) -> Option<String> {
        self.headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .and_then(disposition_file_name)
            .or_else(|| {
                self.url()
                    .path_segments()
                    .and_then(|segments| segments.last())
                    .and_then(decoded_file_name)
            })
    }
}

/// Returns the `filename` parameter of a `Content-Disposition` header value.
fn disposition_file_name(disposition: &str) -> Option<String> {
    disposition
        .split(';')
        .map(str::trim)
        .find_map(|param| param.strip_prefix("filename="))
        .map(|name| name.trim_matches('"'))
        .and_then(decoded_file_name)
}

/// Percent-decodes a given file name and rejects names that are empty or would escape the
/// directory they're saved into.
fn decoded_file_name(name: &str) -> Option<String> {
    let decoded = percent_decode_str(name).decode_utf8().ok()?;
    if decoded.is_empty() || decoded == "." || decoded == ".." || decoded.contains(&['/', '\\'][..]) {
        None
    } else {
        Some(decoded.into_owned())
    }
}
