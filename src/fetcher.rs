//! Provides the [`Fetcher`](Fetcher) object used to download remote files over HTTP(S).

use crate::{
    config::Config,
    error::{FetchError, StreamError},
    util::{
        ext::{PathExt, ResponseExt},
        file,
    },
};
use bytesize::ByteSize;
use log::*;
use reqwest::Client;
use std::{
    path::{Path, PathBuf},
    time::Duration,
};
use tokio::fs;

/// The user-agent used in all HTTP requests.
const USER_AGENT: &str = "factinstall";
/// Prefix of the temporary files downloads are streamed into.
const PARTIAL_PREFIX: &str = ".partial-";

/// The outcome of a single successful download.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchResult {
    /// The URL the file was requested from.
    pub url: String,
    /// The path the file was saved to.
    pub path: PathBuf,
    /// The saved file's name.
    pub file_name: String,
    /// The number of bytes written.
    pub written: u64,
}

/// Downloads remote files into the local filesystem.
#[derive(Debug)]
pub struct Fetcher {
    /// The HTTP client.
    client: Client,
}

impl Fetcher {
    /// Returns a new `Fetcher` with the HTTP timeouts from a given `Config` object.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(Duration::from_secs(config.connect_timeout))
            .timeout(Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self { client })
    }

    /// Downloads a given URL into a given directory. The file name is taken from the response's
    /// `Content-Disposition` header, or the last segment of the response URL after redirects.
    pub async fn fetch_into<P>(&self, directory: P, url: &str) -> Result<FetchResult, FetchError>
    where
        P: AsRef<Path>,
    {
        let response = self.get(url).await?;
        let file_name = response
            .file_name()
            .ok_or_else(|| FetchError::NoFileName(response.url().to_string()))?;

        self.save(response, directory.as_ref(), file_name, url).await
    }

    /// Downloads a given URL into a file at a given path.
    pub async fn fetch_to<P>(&self, path: P, url: &str) -> Result<FetchResult, FetchError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let file_name = path
            .get_file_name()
            .map_err(|_| FetchError::NoFileName(path.display().to_string()))?;
        let directory = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let response = self.get(url).await?;
        self.save(response, directory, file_name, url).await
    }
}

impl Fetcher {
    /// GETs a given URL and returns the response if its status is successful.
    async fn get(&self, url: &str) -> Result<reqwest::Response, FetchError> {
        debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_owned(),
                source,
            })?;

        let status = response.status();
        if status.is_success() {
            trace!("{:?}", response);
            Ok(response)
        } else {
            debug!("Caught erroneous response. Body: {:?}", response.text().await);
            Err(FetchError::BadStatus {
                url: url.to_owned(),
                status,
            })
        }
    }

    /// Streams a response's body into a temporary file in a given directory and moves it to its
    /// final name once the whole body has been written. The temporary file is removed if anything
    /// fails.
    async fn save(
        &self,
        mut response: reqwest::Response,
        directory: &Path,
        file_name: String,
        url: &str,
    ) -> Result<FetchResult, FetchError> {
        let dest = directory.join(&file_name);
        let local_io = |path: &Path| {
            let path = path.to_path_buf();
            move |source: std::io::Error| FetchError::LocalIo { path, source }
        };

        let partial = tempfile::Builder::new()
            .prefix(PARTIAL_PREFIX)
            .tempfile_in(directory)
            .map_err(local_io(&dest))?;
        debug!(
            "Streaming '{}' into {}",
            response.url(),
            partial.path().display()
        );

        let mut out = fs::File::from_std(partial.reopen().map_err(local_io(partial.path()))?);
        let written = response.to_writer(&mut out).await.map_err(|e| match e {
            StreamError::Read(source) => FetchError::Transport {
                url: url.to_owned(),
                source,
            },
            StreamError::Write(source) => FetchError::LocalIo {
                path: partial.path().to_path_buf(),
                source,
            },
        })?;
        drop(out);

        partial.persist(&dest).map_err(|e| FetchError::LocalIo {
            path: dest.clone(),
            source: e.error,
        })?;
        file::set_permissions(&dest, file::FILE_MODE).map_err(local_io(&dest))?;

        info!("Downloaded '{}' ({})", file_name, ByteSize(written));
        Ok(FetchResult {
            url: url.to_owned(),
            path: dest,
            file_name,
            written,
        })
    }
}
