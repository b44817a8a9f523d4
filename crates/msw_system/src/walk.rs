//! Recursive directory walking.
//!
//! A walk is a lazy, single-pass iterator over every entry below a path, the
//! path itself included at depth `0`. Errors are yielded in place so callers
//! decide whether to skip or abort.

use std::fmt::Debug;
use std::path::PathBuf;

use camino::{Utf8Path, Utf8PathBuf};
use thiserror::Error;

use crate::FileType;

pub type WalkDirectory = Box<dyn Iterator<Item = Result<WalkEntry, WalkError>>>;

/// Produces the entries of a configured walk.
pub trait DirectoryWalker: Debug {
    fn walk(self: Box<Self>, configuration: WalkDirectoryConfiguration) -> WalkDirectory;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkDirectoryConfiguration {
    pub path: Utf8PathBuf,
    pub standard_filters: bool,
    pub follow_links: bool,
}

/// Builder for a recursive walk of a single path.
///
/// Defaults to a plain walk: hidden and git-ignored entries are visited and symbolic
/// links are not followed.
#[derive(Debug)]
pub struct WalkDirectoryBuilder {
    configuration: WalkDirectoryConfiguration,
    walker: Box<dyn DirectoryWalker>,
}

impl WalkDirectoryBuilder {
    pub fn new(path: impl AsRef<Utf8Path>, walker: impl DirectoryWalker + 'static) -> Self {
        Self {
            configuration: WalkDirectoryConfiguration {
                path: path.as_ref().to_path_buf(),
                standard_filters: false,
                follow_links: false,
            },
            walker: Box::new(walker),
        }
    }

    /// Enables the standard ignore filters (hidden files, `.gitignore`, `.ignore`).
    #[must_use]
    pub const fn standard_filters(mut self, standard_filters: bool) -> Self {
        self.configuration.standard_filters = standard_filters;
        self
    }

    /// Descends into linked directories. Links that point back at an ancestor are reported as
    /// [`WalkError::Loop`].
    #[must_use]
    pub const fn follow_links(mut self, follow_links: bool) -> Self {
        self.configuration.follow_links = follow_links;
        self
    }

    pub fn build(self) -> WalkDirectory {
        self.walker.walk(self.configuration)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkEntry {
    path: Utf8PathBuf,
    file_type: FileType,
    depth: usize,
}

impl WalkEntry {
    pub const fn new(path: Utf8PathBuf, file_type: FileType, depth: usize) -> Self {
        Self {
            path,
            file_type,
            depth,
        }
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    pub const fn file_type(&self) -> FileType {
        self.file_type
    }

    pub const fn depth(&self) -> usize {
        self.depth
    }
}

#[derive(Debug, Error)]
pub enum WalkError {
    #[error("`{}` is not a valid UTF-8 path", .path.display())]
    NonUtf8Path { path: PathBuf },

    #[error("File system loop found: `{child}` points to an ancestor `{ancestor}`")]
    Loop {
        child: Utf8PathBuf,
        ancestor: Utf8PathBuf,
    },

    #[error("Failed to read {}: {source}", describe_path(.path.as_deref()))]
    Io {
        path: Option<Utf8PathBuf>,
        #[source]
        source: std::io::Error,
    },

    /// An ignore file could not be parsed. Never fatal for the walk itself.
    #[error(transparent)]
    IgnoreFile(ignore::Error),
}

fn describe_path(path: Option<&Utf8Path>) -> String {
    path.map_or_else(|| "an unknown path".to_string(), |path| format!("`{path}`"))
}

pub(crate) fn from_ignore_entry(
    entry: Result<ignore::DirEntry, ignore::Error>,
) -> Option<Result<WalkEntry, WalkError>> {
    match entry {
        Ok(entry) => {
            // `file_type` is only `None` for stdin entries, which are never requested.
            let file_type = entry.file_type()?;
            let depth = entry.depth();

            if let Some(error) = entry.error() {
                tracing::warn!("{error}");
            }

            Some(match Utf8PathBuf::from_path_buf(entry.into_path()) {
                Ok(path) => Ok(WalkEntry::new(path, file_type.into(), depth)),
                Err(path) => Err(WalkError::NonUtf8Path { path }),
            })
        }
        Err(error) => Some(Err(from_ignore_error(error, None))),
    }
}

#[cold]
fn from_ignore_error(error: ignore::Error, path: Option<PathBuf>) -> WalkError {
    use ignore::Error;

    match error {
        Error::WithPath { path, err } => from_ignore_error(*err, Some(path)),
        Error::WithDepth { err, .. } | Error::WithLineNumber { err, .. } => {
            from_ignore_error(*err, path)
        }
        Error::Loop { child, ancestor } => {
            match (
                Utf8PathBuf::from_path_buf(child),
                Utf8PathBuf::from_path_buf(ancestor),
            ) {
                (Ok(child), Ok(ancestor)) => WalkError::Loop { child, ancestor },
                (Err(path), _) | (_, Err(path)) => WalkError::NonUtf8Path { path },
            }
        }
        Error::Io(source) => match path.map(Utf8PathBuf::from_path_buf).transpose() {
            Ok(path) => WalkError::Io { path, source },
            Err(path) => WalkError::NonUtf8Path { path },
        },
        error @ (Error::Glob { .. }
        | Error::UnrecognizedFileType(_)
        | Error::InvalidDefinition
        | Error::Partial(..)) => WalkError::IgnoreFile(error),
    }
}
