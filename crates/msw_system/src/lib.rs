use std::fmt::Debug;
use std::path::PathBuf;
use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use thiserror::Error;

use crate::walk::{DirectoryWalker, WalkDirectory, WalkDirectoryBuilder, WalkDirectoryConfiguration};

pub mod walk;

pub type Result<T> = std::io::Result<T>;

/// The file system that discovery runs against.
///
/// Every query is relative to [`System::current_directory`], which acts as the project root.
/// Abstracting the system lets tests control listing order and inject failures.
pub trait System: Debug {
    /// Reads the metadata of the file or directory at `path`.
    ///
    /// This function will traverse symbolic links to query information about the destination file.
    fn path_metadata(&self, path: &Utf8Path) -> Result<Metadata>;

    /// Iterate over the contents of the directory at `path`.
    ///
    /// The returned iterator must have the following properties:
    /// - It only iterates over the top level of the directory,
    ///   i.e., it does not recurse into subdirectories.
    /// - It skips the current and parent directories (`.` and `..`
    ///   respectively).
    /// - An `Err` item with [`std::io::ErrorKind::InvalidData`] signals an entry whose
    ///   name is not valid UTF-8.
    ///
    /// # Errors
    /// Returns an error if `path` does not exist, is not a directory, or cannot be read.
    fn read_directory<'a>(
        &'a self,
        path: &Utf8Path,
    ) -> Result<Box<dyn Iterator<Item = Result<DirectoryEntry>> + 'a>>;

    /// Creates a builder to recursively walk `path`.
    fn walk_directory(&self, path: &Utf8Path) -> WalkDirectoryBuilder;

    /// Returns the directory all relative paths are resolved against.
    fn current_directory(&self) -> &Utf8Path;

    /// Returns `true` if `path` exists and is a directory.
    fn is_directory(&self, path: &Utf8Path) -> bool {
        self.path_metadata(path)
            .is_ok_and(|metadata| metadata.file_type().is_directory())
    }

    /// Returns `true` if `path` exists and is a file.
    fn is_file(&self, path: &Utf8Path) -> bool {
        self.path_metadata(path)
            .is_ok_and(|metadata| metadata.file_type().is_file())
    }
}

/// A system implementation that uses the OS file system.
#[derive(Debug, Clone)]
pub struct OsSystem {
    inner: Arc<OsSystemInner>,
}

#[derive(Default, Debug)]
struct OsSystemInner {
    cwd: Utf8PathBuf,
}

impl OsSystem {
    pub fn new(cwd: impl AsRef<Utf8Path>) -> Self {
        let cwd = cwd.as_ref();
        assert!(cwd.is_absolute());

        tracing::debug!(
            "Architecture: {}, OS: {}",
            std::env::consts::ARCH,
            std::env::consts::OS,
        );

        Self {
            inner: Arc::new(OsSystemInner {
                cwd: cwd.to_path_buf(),
            }),
        }
    }

    /// Creates a system rooted at the process working directory.
    pub fn from_current_dir() -> std::result::Result<Self, CurrentDirectoryError> {
        let cwd = std::env::current_dir()?;
        let cwd = Utf8PathBuf::from_path_buf(cwd).map_err(CurrentDirectoryError::NonUtf8Path)?;

        tracing::debug!(cwd = %cwd, "Working directory");

        Ok(Self::new(cwd))
    }
}

impl System for OsSystem {
    fn path_metadata(&self, path: &Utf8Path) -> Result<Metadata> {
        let metadata = path.as_std_path().metadata()?;

        Ok(Metadata::new(metadata.file_type().into()))
    }

    fn read_directory(
        &self,
        path: &Utf8Path,
    ) -> Result<Box<dyn Iterator<Item = Result<DirectoryEntry>>>> {
        Ok(Box::new(path.read_dir_utf8()?.map(|res| {
            let res = res?;

            let file_type = res.file_type()?;
            Ok(DirectoryEntry::new(res.into_path(), file_type.into()))
        })))
    }

    /// Creates a builder to recursively walk `path`.
    ///
    /// The walker ignores files according to [`ignore::WalkBuilder::standard_filters`]
    /// only when [`WalkDirectoryBuilder::standard_filters`] is set to true.
    fn walk_directory(&self, path: &Utf8Path) -> WalkDirectoryBuilder {
        WalkDirectoryBuilder::new(
            path,
            OsDirectoryWalker {
                cwd: self.current_directory().to_path_buf(),
            },
        )
    }

    fn current_directory(&self) -> &Utf8Path {
        &self.inner.cwd
    }
}

#[derive(Debug)]
struct OsDirectoryWalker {
    cwd: Utf8PathBuf,
}

impl DirectoryWalker for OsDirectoryWalker {
    fn walk(self: Box<Self>, configuration: WalkDirectoryConfiguration) -> WalkDirectory {
        let WalkDirectoryConfiguration {
            path,
            standard_filters,
            follow_links,
        } = configuration;

        let mut builder = ignore::WalkBuilder::new(path.as_std_path());
        builder.current_dir(self.cwd.as_std_path());
        builder.standard_filters(standard_filters);
        builder.follow_links(follow_links);

        Box::new(builder.build().filter_map(walk::from_ignore_entry))
    }
}

/// The working directory could not be turned into a discovery root.
#[derive(Debug, Error)]
pub enum CurrentDirectoryError {
    #[error("Failed to get the current working directory")]
    Io(#[from] std::io::Error),
    #[error(
        "The current working directory `{}` contains non-Unicode characters. Only Unicode paths are supported.",
        .0.display()
    )]
    NonUtf8Path(PathBuf),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Metadata {
    file_type: FileType,
}

impl Metadata {
    pub const fn new(file_type: FileType) -> Self {
        Self { file_type }
    }

    pub const fn file_type(&self) -> FileType {
        self.file_type
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum FileType {
    File,
    Directory,
    Symlink,
    /// FIFOs, sockets and device files.
    Other,
}

impl FileType {
    pub const fn is_file(self) -> bool {
        matches!(self, Self::File)
    }

    pub const fn is_directory(self) -> bool {
        matches!(self, Self::Directory)
    }

    pub const fn is_symlink(self) -> bool {
        matches!(self, Self::Symlink)
    }
}

impl From<std::fs::FileType> for FileType {
    fn from(file_type: std::fs::FileType) -> Self {
        if file_type.is_file() {
            Self::File
        } else if file_type.is_dir() {
            Self::Directory
        } else if file_type.is_symlink() {
            Self::Symlink
        } else {
            Self::Other
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct DirectoryEntry {
    path: Utf8PathBuf,
    file_type: FileType,
}

impl DirectoryEntry {
    pub const fn new(path: Utf8PathBuf, file_type: FileType) -> Self {
        Self { path, file_type }
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    pub const fn file_type(&self) -> FileType {
        self.file_type
    }
}
