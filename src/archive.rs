//! Provides functions to unpack gzip- and xz-compressed tarballs and zip archives into a directory.

use crate::{error::ExtractError, util::file};
use log::*;
use serde::Deserialize;
use std::{
    fs::{self, File},
    io::{self, BufReader, Read, Write},
    path::{Component, Path, PathBuf},
};
use strum_macros::{Display, EnumString};

/// Size of the buffer used when copying an entry's contents to disk.
const COPY_BUFFER_SIZE: usize = 64 * 1024;

/// The supported archive formats. The format of an archive is always given by the caller, it is
/// never detected from the archive's contents. Config values and command line strings parse the
/// same way, ignoring case.
#[derive(Debug, Deserialize, PartialEq, Eq, Copy, Clone, Display, EnumString)]
#[serde(try_from = "String")]
#[strum(ascii_case_insensitive)]
pub enum ArchiveFormat {
    /// A gzip-compressed tarball.
    #[strum(to_string = "tar.gz", serialize = "tgz")]
    TarGz,
    /// An xz-compressed tarball.
    #[strum(to_string = "tar.xz", serialize = "txz")]
    TarXz,
    /// A zip archive.
    #[strum(serialize = "zip")]
    Zip,
}

impl TryFrom<String> for ArchiveFormat {
    type Error = strum::ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Extracts an archive of a given format into a target directory, creating the directory if it
/// doesn't exist. Existing files are replaced by the archive's entries.
pub fn extract<P, Q>(archive: P, target: Q, format: ArchiveFormat) -> Result<(), ExtractError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    Extraction {
        archive: archive.as_ref(),
        target: target.as_ref(),
        strip_root: None,
    }
    .run(format)
}

/// Extracts an archive like [`extract`](extract), unwrapping the archive's top-level directory if
/// every entry sits under the same one and that directory contains a given `anchor` path. Returns
/// the name of the unwrapped directory, if any.
///
/// The server archive ships as `factorio/bin/x64/factorio`, `factorio/data/...` and so on, and
/// unwrapping it puts the executable at `<target>/bin/x64/factorio` whatever the target is named.
pub fn extract_unwrapping<P, Q, A>(
    archive: P,
    target: Q,
    format: ArchiveFormat,
    anchor: A,
) -> Result<Option<String>, ExtractError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    A: AsRef<Path>,
{
    let archive = archive.as_ref();
    let target = target.as_ref();

    let paths = Extraction {
        archive,
        target,
        strip_root: None,
    }
    .entry_paths(format)?;
    let root = wrapping_root(&paths, anchor.as_ref());
    if let Some(root) = &root {
        debug!("Unwrapping top-level directory '{}' of {}", root, archive.display());
    }

    Extraction {
        archive,
        target,
        strip_root: root.as_deref(),
    }
    .run(format)?;
    Ok(root)
}

/// Returns the single top-level directory all given entry paths share, provided the directory
/// contains `anchor`.
fn wrapping_root(paths: &[PathBuf], anchor: &Path) -> Option<String> {
    let mut root: Option<PathBuf> = None;
    let mut anchored = false;

    for path in paths {
        let path: PathBuf = path.components().filter(|c| *c != Component::CurDir).collect();
        let first = match path.components().next() {
            Some(Component::Normal(first)) => PathBuf::from(first),
            _ => return None,
        };

        if *root.get_or_insert_with(|| first.clone()) != first {
            return None;
        }

        if path.strip_prefix(&first).map_or(false, |rest| rest == anchor) {
            anchored = true;
        }
    }

    if anchored {
        root.and_then(|root| root.to_str().map(String::from))
    } else {
        None
    }
}

/// A single extraction of an archive into a target directory.
struct Extraction<'a> {
    /// Path to the archive file.
    archive: &'a Path,
    /// The directory the entries are unpacked into.
    target: &'a Path,
    /// Leading directory to remove from each entry's path.
    strip_root: Option<&'a str>,
}

impl Extraction<'_> {
    /// Unpacks the archive in a given format.
    fn run(&self, format: ArchiveFormat) -> Result<(), ExtractError> {
        debug!(
            "Extracting {} ({}) into {}",
            self.archive.display(),
            format,
            self.target.display()
        );

        let reader = self.open()?;
        self.create_dir(self.target)?;

        match format {
            ArchiveFormat::TarGz => self.unpack_tar(flate2::read::GzDecoder::new(reader)),
            ArchiveFormat::TarXz => self.unpack_tar(xz2::read::XzDecoder::new(reader)),
            ArchiveFormat::Zip => self.unpack_zip(reader),
        }
    }

    /// Lists the paths of every entry in the archive without unpacking anything.
    fn entry_paths(&self, format: ArchiveFormat) -> Result<Vec<PathBuf>, ExtractError> {
        let reader = self.open()?;

        match format {
            ArchiveFormat::TarGz => self.tar_paths(flate2::read::GzDecoder::new(reader)),
            ArchiveFormat::TarXz => self.tar_paths(xz2::read::XzDecoder::new(reader)),
            ArchiveFormat::Zip => {
                let archive = zip::ZipArchive::new(reader).map_err(|e| self.corrupt(e))?;
                Ok(archive.file_names().map(PathBuf::from).collect())
            }
        }
    }

    fn tar_paths<R>(&self, reader: R) -> Result<Vec<PathBuf>, ExtractError>
    where
        R: Read,
    {
        let mut archive = tar::Archive::new(reader);
        let mut paths = Vec::new();

        for entry in archive.entries().map_err(|e| self.corrupt(e))? {
            let entry = entry.map_err(|e| self.corrupt(e))?;
            paths.push(entry.path().map_err(|e| self.corrupt(e))?.into_owned());
        }

        Ok(paths)
    }

    /// Opens the archive file for reading.
    fn open(&self) -> Result<BufReader<File>, ExtractError> {
        let file = File::open(self.archive).map_err(|source| ExtractError::ArchiveIo {
            path: self.archive.to_path_buf(),
            source,
        })?;
        Ok(BufReader::new(file))
    }

    /// Unpacks a tarball read from a given (decompressing) reader.
    fn unpack_tar<R>(&self, reader: R) -> Result<(), ExtractError>
    where
        R: Read,
    {
        let mut archive = tar::Archive::new(reader);
        let entries = archive.entries().map_err(|e| self.corrupt(e))?;

        for entry in entries {
            let mut entry = entry.map_err(|e| self.corrupt(e))?;
            let entry_path = entry.path().map_err(|e| self.corrupt(e))?.into_owned();
            let relative = match self.relative_path(&entry_path)? {
                Some(relative) => relative,
                None => continue,
            };
            self.check_parents(&relative)?;
            let dest = self.target.join(&relative);
            let entry_type = entry.header().entry_type();
            trace!("{:?} {} -> {}", entry_type, entry_path.display(), dest.display());

            if entry_type.is_dir() {
                self.create_dir(&dest)?;
                continue;
            }

            self.create_parent(&dest)?;
            if entry_type.is_file() {
                let size = entry.size();
                let mode = entry.header().mode().ok();
                self.write_entry(&mut entry, &dest, size, mode)?;
            } else if entry_type.is_symlink() {
                let link_name = entry
                    .link_name()
                    .map_err(|e| self.corrupt(e))?
                    .ok_or_else(|| self.corrupt_reason(format!("symlink {} has no target", entry_path.display())))?
                    .into_owned();
                self.check_link_target(&entry_path, &link_name)?;
                self.clear(&dest)?;
                entry.unpack(&dest).map_err(|e| self.local_io(&dest, e))?;
            } else if entry_type.is_hard_link() {
                let link_name = entry
                    .link_name()
                    .map_err(|e| self.corrupt(e))?
                    .ok_or_else(|| self.corrupt_reason(format!("hard link {} has no target", entry_path.display())))?
                    .into_owned();
                let original = match self.relative_path(&link_name)? {
                    Some(original) => {
                        self.check_parents(&original)?;
                        self.target.join(original)
                    }
                    None => continue,
                };
                self.clear(&dest)?;
                fs::hard_link(&original, &dest).map_err(|e| self.local_io(&dest, e))?;
            } else {
                debug!("Skipping {:?} entry {}", entry_type, entry_path.display());
            }
        }

        Ok(())
    }

    /// Unpacks a zip archive read from a given reader.
    fn unpack_zip(&self, reader: BufReader<File>) -> Result<(), ExtractError> {
        let mut archive = zip::ZipArchive::new(reader).map_err(|e| self.corrupt(e))?;

        for index in 0..archive.len() {
            let mut file = archive.by_index(index).map_err(|e| self.corrupt(e))?;
            let entry_path = PathBuf::from(file.name());
            let relative = match self.relative_path(&entry_path)? {
                Some(relative) => relative,
                None => continue,
            };
            self.check_parents(&relative)?;
            let dest = self.target.join(&relative);
            trace!("{} -> {}", entry_path.display(), dest.display());

            if file.is_dir() {
                self.create_dir(&dest)?;
                continue;
            }

            self.create_parent(&dest)?;
            let size = file.size();
            let mode = file.unix_mode();
            self.write_entry(&mut file, &dest, size, mode)?;
        }

        Ok(())
    }

    /// Returns an entry's path relative to the target directory with the stripped root removed, or
    /// `None` if nothing remains of the path. Entries that would escape the target directory are
    /// corrupt.
    fn relative_path(&self, entry_path: &Path) -> Result<Option<PathBuf>, ExtractError> {
        let mut relative = PathBuf::new();
        for component in entry_path.components() {
            match component {
                Component::Normal(part) => relative.push(part),
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    return Err(self.corrupt_reason(format!(
                        "entry {} escapes the target directory",
                        entry_path.display()
                    )))
                }
            }
        }

        if let Some(root) = self.strip_root {
            if let Ok(stripped) = relative.strip_prefix(root) {
                relative = stripped.to_path_buf();
            }
        }

        Ok(if relative.as_os_str().is_empty() {
            None
        } else {
            Some(relative)
        })
    }

    /// Fails if any directory between the target and a given relative entry path is a symlink, since
    /// writing through it could land anywhere.
    fn check_parents(&self, relative: &Path) -> Result<(), ExtractError> {
        let mut current = self.target.to_path_buf();
        for component in relative.parent().into_iter().flat_map(Path::components) {
            current.push(component);
            if fs::symlink_metadata(&current).map_or(false, |meta| meta.file_type().is_symlink()) {
                return Err(self.corrupt_reason(format!(
                    "entry {} would be written through symlink {}",
                    relative.display(),
                    current.display()
                )));
            }
        }

        Ok(())
    }

    /// Symlinks may only point at relative paths that don't climb out with `..`.
    fn check_link_target(&self, entry_path: &Path, link_name: &Path) -> Result<(), ExtractError> {
        let escapes = link_name
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::RootDir | Component::Prefix(_)));

        if escapes {
            Err(self.corrupt_reason(format!(
                "symlink {} -> {} points outside the target directory",
                entry_path.display(),
                link_name.display()
            )))
        } else {
            Ok(())
        }
    }

    /// Copies an entry's contents into a new file at a given path. Read failures and entries that
    /// end before their declared size mean the archive is corrupt, write failures are local.
    fn write_entry<R>(&self, reader: &mut R, dest: &Path, size: u64, mode: Option<u32>) -> Result<(), ExtractError>
    where
        R: Read,
    {
        self.clear(dest)?;
        let mut out = File::create(dest).map_err(|e| self.local_io(dest, e))?;

        let mut buffer = vec![0; COPY_BUFFER_SIZE];
        let mut written: u64 = 0;
        loop {
            let read = match reader.read(&mut buffer) {
                Ok(0) => break,
                Ok(read) => read,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(self.corrupt(e)),
            };
            out.write_all(&buffer[..read]).map_err(|e| self.local_io(dest, e))?;
            written += read as u64;
        }

        if written < size {
            return Err(self.corrupt_reason(format!(
                "entry {} is truncated ({} of {} bytes)",
                dest.display(),
                written,
                size
            )));
        }

        if let Some(mode) = mode {
            file::set_permissions(dest, mode & 0o7777).map_err(|e| self.local_io(dest, e))?;
        }

        Ok(())
    }

    /// Removes a non-directory filesystem entry at a given path so it can be replaced.
    fn clear(&self, path: &Path) -> Result<(), ExtractError> {
        match fs::symlink_metadata(path) {
            Ok(meta) if !meta.is_dir() => fs::remove_file(path).map_err(|e| self.local_io(path, e)),
            _ => Ok(()),
        }
    }

    fn create_dir(&self, path: &Path) -> Result<(), ExtractError> {
        file::ensure_directory(path).map_err(|e| self.local_io(path, e))
    }

    fn create_parent(&self, path: &Path) -> Result<(), ExtractError> {
        match path.parent() {
            Some(parent) => self.create_dir(parent),
            None => Ok(()),
        }
    }

    fn corrupt<E>(&self, error: E) -> ExtractError
    where
        E: std::fmt::Display,
    {
        self.corrupt_reason(error.to_string())
    }

    fn corrupt_reason(&self, reason: String) -> ExtractError {
        ExtractError::Corrupt {
            path: self.archive.to_path_buf(),
            reason,
        }
    }

    fn local_io(&self, path: &Path, source: io::Error) -> ExtractError {
        ExtractError::LocalIo {
            path: path.to_path_buf(),
            source,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use flate2::{write::GzEncoder, Compression};
    use std::os::unix::fs::{MetadataExt, PermissionsExt};
    use tempfile::TempDir;
    use zip::write::SimpleFileOptions;

    /// Returns `len` bytes that gzip can't meaningfully compress.
    pub fn noise(len: usize) -> Vec<u8> {
        let mut state: u32 = 0x2545_f491;
        (0..len)
            .map(|_| {
                state ^= state << 13;
                state ^= state >> 17;
                state ^= state << 5;
                (state >> 24) as u8
            })
            .collect()
    }

    /// Returns an uncompressed tarball of given paths and contents, each with mode 0755.
    pub fn tar_bytes(files: &[(&str, &[u8])]) -> Vec<u8> {
        let mut builder = tar::Builder::new(Vec::new());
        for (path, contents) in files {
            let mut header = tar::Header::new_gnu();
            header.set_size(contents.len() as u64);
            header.set_mode(0o755);
            header.set_entry_type(tar::EntryType::Regular);
            builder
                .append_data(&mut header, path, *contents)
                .expect("failed to append tar entry");
        }
        builder.into_inner().expect("failed to finish tarball")
    }

    /// Returns a gzip-compressed tarball of given paths and contents.
    pub fn tar_gz_bytes(files: &[(&str, &[u8])]) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder
            .write_all(&tar_bytes(files))
            .expect("failed to compress tarball");
        encoder.finish().expect("failed to finish gzip stream")
    }

    /// Returns an xz-compressed tarball of given paths and contents.
    pub fn tar_xz_bytes(files: &[(&str, &[u8])]) -> Vec<u8> {
        let mut encoder = xz2::write::XzEncoder::new(Vec::new(), 6);
        encoder
            .write_all(&tar_bytes(files))
            .expect("failed to compress tarball");
        encoder.finish().expect("failed to finish xz stream")
    }

    /// Returns a zip archive of given paths and contents. Paths ending in `/` become directories.
    pub fn zip_bytes(files: &[(&str, &[u8])]) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(io::Cursor::new(Vec::new()));
        for (path, contents) in files {
            if path.ends_with('/') {
                writer
                    .add_directory(*path, SimpleFileOptions::default())
                    .expect("failed to add zip directory");
            } else {
                writer
                    .start_file(*path, SimpleFileOptions::default())
                    .expect("failed to start zip entry");
                writer.write_all(contents).expect("failed to write zip entry");
            }
        }
        writer.finish().expect("failed to finish zip").into_inner()
    }

    fn write_archive(dir: &TempDir, name: &str, bytes: &[u8]) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, bytes).expect("failed to write archive");
        path
    }

    /// A single entry of a hand-built tarball.
    enum TarEntry<'a> {
        File(&'a str, &'a [u8]),
        HardLink(&'a str, &'a str),
        Symlink(&'a str, &'a str),
    }

    /// Returns a gzip-compressed tarball of given entries, in order.
    fn tar_gz_entries(entries: &[TarEntry]) -> Vec<u8> {
        let mut builder = tar::Builder::new(Vec::new());
        for entry in entries {
            let mut header = tar::Header::new_gnu();
            match entry {
                TarEntry::File(path, contents) => {
                    header.set_size(contents.len() as u64);
                    header.set_mode(0o644);
                    header.set_entry_type(tar::EntryType::Regular);
                    builder.append_data(&mut header, path, *contents)
                }
                TarEntry::HardLink(path, target) | TarEntry::Symlink(path, target) => {
                    header.set_size(0);
                    header.set_mode(0o777);
                    header.set_entry_type(match entry {
                        TarEntry::HardLink(..) => tar::EntryType::Link,
                        _ => tar::EntryType::Symlink,
                    });
                    builder.append_link(&mut header, path, target)
                }
            }
            .expect("failed to append tar entry");
        }

        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder
            .write_all(&builder.into_inner().expect("failed to finish tarball"))
            .expect("failed to compress tarball");
        encoder.finish().expect("failed to finish gzip stream")
    }

    /// Returns every path under a given directory relative to it, sorted. Symlinks are listed but
    /// not followed.
    pub fn tree(root: &Path) -> Vec<String> {
        fn walk(root: &Path, dir: &Path, out: &mut Vec<String>) {
            for entry in fs::read_dir(dir).expect("failed to read directory") {
                let entry = entry.expect("failed to read entry");
                let path = entry.path();
                out.push(path.strip_prefix(root).unwrap().display().to_string());
                if entry.file_type().expect("failed to read file type").is_dir() {
                    walk(root, &path, out);
                }
            }
        }

        let mut out = Vec::new();
        walk(root, root, &mut out);
        out.sort();
        out
    }

    #[test]
    fn extract_tar_gz_tree() {
        let temp = tempfile::tempdir().expect("failed to create tempdir");
        let big = noise(200_000);
        let archive = write_archive(
            &temp,
            "server.tar.gz",
            &tar_gz_bytes(&[("bin/x64/factorio", b"\x7fELF"), ("data/base/info.json", &big)]),
        );
        let target = temp.path().join("out");

        extract(&archive, &target, ArchiveFormat::TarGz).expect("failed to extract tarball");

        assert_eq!(
            tree(&target),
            vec!["bin", "bin/x64", "bin/x64/factorio", "data", "data/base", "data/base/info.json"]
        );
        assert_eq!(fs::read(target.join("bin/x64/factorio")).unwrap(), b"\x7fELF");
        assert_eq!(fs::read(target.join("data/base/info.json")).unwrap(), big);
        let mode = fs::metadata(target.join("bin/x64/factorio")).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }

    #[test]
    fn extract_tar_links() {
        let temp = tempfile::tempdir().expect("failed to create tempdir");
        let archive = write_archive(
            &temp,
            "links.tar.gz",
            &tar_gz_entries(&[
                TarEntry::File("bin/x", b"0123456789"),
                TarEntry::HardLink("bin/y", "bin/x"),
                TarEntry::Symlink("latest", "bin/x"),
            ]),
        );
        let target = temp.path().join("out");

        extract(&archive, &target, ArchiveFormat::TarGz).expect("failed to extract tarball");

        assert_eq!(tree(&target), vec!["bin", "bin/x", "bin/y", "latest"]);
        let original = fs::metadata(target.join("bin/x")).unwrap();
        let linked = fs::metadata(target.join("bin/y")).unwrap();
        assert_eq!(original.ino(), linked.ino());
        assert_eq!(fs::read_link(target.join("latest")).unwrap(), Path::new("bin/x"));
        assert_eq!(fs::read(target.join("latest")).unwrap(), b"0123456789");
    }

    #[test]
    fn escaping_symlink_is_corrupt() {
        let temp = tempfile::tempdir().expect("failed to create tempdir");
        let outside = temp.path().join("outside");
        fs::create_dir(&outside).unwrap();
        let absolute = outside.display().to_string();

        for link_target in [absolute.as_str(), "../outside", "bin/../../outside"] {
            let archive = write_archive(
                &temp,
                "evil.tar.gz",
                &tar_gz_entries(&[
                    TarEntry::Symlink("link", link_target),
                    TarEntry::File("link/pwned", b"gotcha"),
                ]),
            );
            let target = temp.path().join("out");

            let result = extract(&archive, &target, ArchiveFormat::TarGz);

            assert!(matches!(result, Err(ExtractError::Corrupt { .. })), "{}: {:?}", link_target, result);
            assert!(!outside.join("pwned").exists());
            assert!(fs::symlink_metadata(target.join("link")).is_err());
        }
    }

    #[test]
    fn writing_through_existing_symlink_is_corrupt() {
        let temp = tempfile::tempdir().expect("failed to create tempdir");
        let outside = temp.path().join("outside");
        fs::create_dir(&outside).unwrap();
        let target = temp.path().join("mods");
        fs::create_dir(&target).unwrap();
        std::os::unix::fs::symlink(&outside, target.join("link")).unwrap();
        let archive = write_archive(&temp, "mods.zip", &zip_bytes(&[("link/pwned", b"gotcha")]));

        let result = extract(&archive, &target, ArchiveFormat::Zip);

        assert!(matches!(result, Err(ExtractError::Corrupt { .. })), "{:?}", result);
        assert!(!outside.join("pwned").exists());
    }

    #[test]
    fn unwrap_top_level_directory() {
        let temp = tempfile::tempdir().expect("failed to create tempdir");
        let archive = write_archive(
            &temp,
            "server.tar.xz",
            &tar_xz_bytes(&[("factorio/bin/x64/factorio", b"binary"), ("factorio/config-path.cfg", b"cfg")]),
        );
        let target = temp.path().join("game");

        let root = extract_unwrapping(&archive, &target, ArchiveFormat::TarXz, "bin/x64/factorio")
            .expect("failed to extract");

        assert_eq!(root.as_deref(), Some("factorio"));
        assert_eq!(tree(&target), vec!["bin", "bin/x64", "bin/x64/factorio", "config-path.cfg"]);
        assert_eq!(fs::read(target.join("bin/x64/factorio")).unwrap(), b"binary");
    }

    #[test]
    fn unwrap_requires_anchor_and_single_root() {
        let temp = tempfile::tempdir().expect("failed to create tempdir");
        let target = temp.path().join("base");

        let archive = write_archive(&temp, "a.tar.gz", &tar_gz_bytes(&[("bin/x", b"0123456789")]));
        let root = extract_unwrapping(&archive, &target, ArchiveFormat::TarGz, "bin/x64/factorio")
            .expect("failed to extract");
        assert_eq!(root, None);
        assert_eq!(tree(&target), vec!["bin", "bin/x"]);

        let archive = write_archive(
            &temp,
            "b.zip",
            &zip_bytes(&[("factorio/bin/x64/factorio", b"binary"), ("README", b"readme")]),
        );
        let root = extract_unwrapping(&archive, &target, ArchiveFormat::Zip, "bin/x64/factorio")
            .expect("failed to extract");
        assert_eq!(root, None);
        assert!(target.join("factorio/bin/x64/factorio").is_file());
    }

    #[test]
    fn extract_zip_tree() {
        let temp = tempfile::tempdir().expect("failed to create tempdir");
        let archive = write_archive(
            &temp,
            "mods.zip",
            &zip_bytes(&[
                ("mod-list.json", b"{\"mods\":[]}"),
                ("empty/", b""),
                ("nested/deeper/mod_1.0.0.zip", b"inner"),
            ]),
        );
        let target = temp.path().join("mods");

        extract(&archive, &target, ArchiveFormat::Zip).expect("failed to extract zip");

        assert_eq!(
            tree(&target),
            vec!["empty", "mod-list.json", "nested", "nested/deeper", "nested/deeper/mod_1.0.0.zip"]
        );
        assert_eq!(fs::read(target.join("mod-list.json")).unwrap(), b"{\"mods\":[]}");
        assert_eq!(fs::read(target.join("nested/deeper/mod_1.0.0.zip")).unwrap(), b"inner");
    }

    #[test]
    fn extract_replaces_existing_files() {
        let temp = tempfile::tempdir().expect("failed to create tempdir");
        let archive = write_archive(&temp, "mods.zip", &zip_bytes(&[("a.txt", b"new")]));
        let target = temp.path().join("mods");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("a.txt"), b"old contents").unwrap();

        extract(&archive, &target, ArchiveFormat::Zip).expect("failed to extract zip");

        assert_eq!(fs::read(target.join("a.txt")).unwrap(), b"new");
    }

    #[test]
    fn missing_archive() {
        let temp = tempfile::tempdir().expect("failed to create tempdir");
        let result = extract(temp.path().join("nope.zip"), temp.path(), ArchiveFormat::Zip);

        assert!(matches!(result, Err(ExtractError::ArchiveIo { .. })));
    }

    #[test]
    fn truncated_zip_is_corrupt() {
        let temp = tempfile::tempdir().expect("failed to create tempdir");
        let bytes = zip_bytes(&[("a.bin", &noise(4096))]);
        let archive = write_archive(&temp, "mods.zip", &bytes[..bytes.len() / 2]);

        let result = extract(&archive, temp.path().join("out"), ArchiveFormat::Zip);

        assert!(matches!(result, Err(ExtractError::Corrupt { .. })), "{:?}", result);
    }

    #[test]
    fn truncated_tar_gz_is_corrupt() {
        let temp = tempfile::tempdir().expect("failed to create tempdir");
        let bytes = tar_gz_bytes(&[("bin/x", &noise(100_000))]);
        let archive = write_archive(&temp, "server.tar.gz", &bytes[..bytes.len() / 2]);

        let result = extract(&archive, temp.path().join("out"), ArchiveFormat::TarGz);

        assert!(matches!(result, Err(ExtractError::Corrupt { .. })), "{:?}", result);
    }

    #[test]
    fn garbage_is_corrupt() {
        let temp = tempfile::tempdir().expect("failed to create tempdir");
        let archive = write_archive(&temp, "server.tar.xz", b"definitely not an xz stream");

        let result = extract(&archive, temp.path().join("out"), ArchiveFormat::TarXz);

        assert!(matches!(result, Err(ExtractError::Corrupt { .. })), "{:?}", result);
    }

    #[test]
    fn escaping_entry_is_corrupt() {
        let temp = tempfile::tempdir().expect("failed to create tempdir");
        let archive = write_archive(&temp, "evil.zip", &zip_bytes(&[("../evil.txt", b"gotcha")]));
        let target = temp.path().join("out");

        let result = extract(&archive, &target, ArchiveFormat::Zip);

        assert!(matches!(result, Err(ExtractError::Corrupt { .. })), "{:?}", result);
        assert!(!temp.path().join("evil.txt").exists());
    }

    #[test]
    fn parse_format() {
        assert_eq!("tar.xz".parse::<ArchiveFormat>().unwrap(), ArchiveFormat::TarXz);
        assert_eq!("TGZ".parse::<ArchiveFormat>().unwrap(), ArchiveFormat::TarGz);
        assert_eq!("zip".parse::<ArchiveFormat>().unwrap(), ArchiveFormat::Zip);
        assert!("rar".parse::<ArchiveFormat>().is_err());
        assert_eq!(ArchiveFormat::TarXz.to_string(), "tar.xz");
    }

    #[test]
    fn deserialize_format_ignoring_case() {
        assert_eq!(serde_json::from_str::<ArchiveFormat>("\"TGZ\"").unwrap(), ArchiveFormat::TarGz);
        assert_eq!(serde_json::from_str::<ArchiveFormat>("\"Tar.Xz\"").unwrap(), ArchiveFormat::TarXz);
        assert!(serde_json::from_str::<ArchiveFormat>("\"rar\"").is_err());
    }
}
