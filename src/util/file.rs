//! Provides helpers for creating directories and files with fixed Unix permissions.

use std::{
    fs, io,
    os::unix::fs::{DirBuilderExt, PermissionsExt},
    path::Path,
};

/// Permissions for every directory the provisioner creates.
pub const DIRECTORY_MODE: u32 = 0o755;
/// Permissions for every plain file the provisioner writes.
pub const FILE_MODE: u32 = 0o644;

/// Returns a given path's permission bits.
pub fn get_permissions<P>(path: P) -> io::Result<u32>
where
    P: AsRef<Path>,
{
    let permissions = fs::metadata(path)?.permissions();
    Ok(permissions.mode() & 0o7777)
}

/// Sets a given path's permission bits.
pub fn set_permissions<P>(path: P, mode: u32) -> io::Result<()>
where
    P: AsRef<Path>,
{
    let mut permissions = fs::metadata(&path)?.permissions();
    permissions.set_mode(mode);
    fs::set_permissions(&path, permissions)
}

/// Creates a directory and all its missing parents. An existing directory is left as is, including
/// its permissions.
pub fn ensure_directory<P>(path: P) -> io::Result<()>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if path.is_dir() {
        return Ok(());
    }

    fs::DirBuilder::new()
        .recursive(true)
        .mode(DIRECTORY_MODE)
        .create(path)
}

/// Writes a given buffer into a file, replacing it if it exists, and sets the file's permissions to
/// [`FILE_MODE`](FILE_MODE).
pub fn write_file<P, C>(path: P, contents: C) -> io::Result<()>
where
    P: AsRef<Path>,
    C: AsRef<[u8]>,
{
    fs::write(&path, contents)?;
    set_permissions(&path, FILE_MODE)
}

/// Removes a given file. A file that doesn't exist is not an error.
pub fn remove_file_if_exists<P>(path: P) -> io::Result<()>
where
    P: AsRef<Path>,
{
    match fs::remove_file(path) {
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        result => result,
    }
}
