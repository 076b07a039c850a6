//! Provides the [`PathExt`](PathExt) trait which provides commonly used functions on paths.

use crate::error::PathError;
use std::path::Path;

/// Collection of common functions used with paths.
pub trait PathExt {
    /// Returns the path's file name as an owned `String`.
    fn get_file_name(&self) -> Result<String, PathError>;
}

impl<P> PathExt for P
where
    P: AsRef<Path>,
{
    fn get_file_name(&self) -> Result<String, PathError> {
        Ok(self
            .as_ref()
            .file_name()
            .ok_or(PathError::NoFilename)?
            .to_str()
            .ok_or(PathError::InvalidUnicode)?
            .to_owned())
    }
}
