//! Provides all error types the program uses.

use crate::Step;
use std::{io, path::PathBuf};
use thiserror::Error;

/// Represents all types of errors that can occur when downloading a remote resource.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request couldn't be sent or the response couldn't be received. This includes
    /// connection failures, timeouts and malformed URLs.
    #[error("Request to '{url}' failed: {source}")]
    Transport {
        /// The requested URL as given by the caller.
        url: String,
        /// The underlying HTTP client error.
        source: reqwest::Error,
    },
    /// The remote responded with a status code outside of the 2xx range.
    #[error("Download from '{url}' returned status {status}")]
    BadStatus {
        /// The requested URL.
        url: String,
        /// The returned status code.
        status: reqwest::StatusCode,
    },
    /// The local file couldn't be created, written or moved into place.
    #[error("Failed to write download to {path}: {source}")]
    LocalIo {
        /// Path to the file being written.
        path: PathBuf,
        /// The underlying IO error.
        source: io::Error,
    },
    /// Neither the response headers nor the response URL contain a usable file name.
    #[error("Response from '{0}' doesn't have a file name component")]
    NoFileName(String),
}

/// Represents the two ways streaming a response body to disk can fail.
#[derive(Debug, Error)]
pub enum StreamError {
    /// Reading the next body chunk from the connection failed.
    #[error(transparent)]
    Read(reqwest::Error),
    /// Writing a chunk into the destination failed.
    #[error(transparent)]
    Write(io::Error),
}

/// Represents all types of errors that can occur when extracting an archive.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The archive file doesn't exist or can't be read.
    #[error("Failed to read archive {path}: {source}")]
    ArchiveIo {
        /// Path to the archive.
        path: PathBuf,
        /// The underlying IO error.
        source: io::Error,
    },
    /// The archive is malformed or truncated.
    #[error("Archive {path} is corrupt: {reason}")]
    Corrupt {
        /// Path to the archive.
        path: PathBuf,
        /// What was wrong with it.
        reason: String,
    },
    /// An extracted entry couldn't be written to the destination.
    #[error("Failed to write {path}: {source}")]
    LocalIo {
        /// Path of the entry being written.
        path: PathBuf,
        /// The underlying IO error.
        source: io::Error,
    },
}

/// Represents all types of errors that can occur when producing the server settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The settings couldn't be serialized into JSON.
    #[error("Failed to serialize server settings: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Represents all types of errors that can occur when transforming paths.
#[derive(Debug, Error)]
pub enum PathError {
    /// A given path doesn't have a file name when trying to extract the file name.
    #[error("Path doesn't have a filename")]
    NoFilename,
    /// A given path's file name isn't valid Unicode.
    #[error("Path isn't valid unicode")]
    InvalidUnicode,
}

/// Returned when a provisioning run is aborted. Names the step that failed and wraps its cause.
#[derive(Debug, Error)]
#[error("Failed to {step}")]
pub struct ProvisionError {
    /// The step that failed.
    pub step: Step,
    /// The underlying cause.
    #[source]
    pub source: anyhow::Error,
}

impl ProvisionError {
    /// Returns a closure that wraps an error into a `ProvisionError` for a given step. Meant to be
    /// used with `map_err`.
    pub fn at<E>(step: Step) -> impl FnOnce(E) -> Self
    where
        E: Into<anyhow::Error>,
    {
        move |e| Self {
            step,
            source: e.into(),
        }
    }

    /// Returns the underlying cause downcast into a concrete error type, if it is one.
    pub fn cause<E>(&self) -> Option<&E>
    where
        E: std::fmt::Display + std::fmt::Debug + Send + Sync + 'static,
    {
        self.source.downcast_ref::<E>()
    }
}
