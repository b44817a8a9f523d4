use camino::Utf8Path;
use indexmap::IndexMap;
use serde::Serialize;

/// Headers grouped by the directory that contains them.
///
/// Keys are directory paths as walked (`./os/thread`), values are file names in the order
/// they were discovered (`Thread.h`). Directories without headers have no entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct HeaderDeployInfo {
    groups: IndexMap<String, Vec<String>>,
}

impl HeaderDeployInfo {
    /// Adds the header at `path` to the group of its parent directory.
    pub(crate) fn insert(&mut self, path: &str) {
        let path = Utf8Path::new(path);

        let (Some(directory), Some(file_name)) = (path.parent(), path.file_name()) else {
            tracing::debug!("Ignoring header without a parent directory: `{path}`");
            return;
        };

        self.groups
            .entry(directory.to_string())
            .or_default()
            .push(file_name.to_string());
    }

    /// The headers found directly in `directory`.
    pub fn get(&self, directory: &str) -> Option<&[String]> {
        self.groups.get(directory).map(Vec::as_slice)
    }

    pub fn contains_directory(&self, directory: &str) -> bool {
        self.groups.contains_key(directory)
    }

    pub fn directories(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.groups
            .iter()
            .map(|(directory, files)| (directory.as_str(), files.as_slice()))
    }

    /// Every `(directory, file name)` pair, the unit a deployment step copies.
    pub fn deploy_paths(&self) -> impl Iterator<Item = (&str, &str)> {
        self.iter().flat_map(|(directory, files)| {
            files.iter().map(move |file| (directory, file.as_str()))
        })
    }

    /// Number of directories holding at least one header.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of headers across all directories.
    pub fn file_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }
}

impl<'a> FromIterator<&'a str> for HeaderDeployInfo {
    fn from_iter<T: IntoIterator<Item = &'a str>>(paths: T) -> Self {
        let mut info = Self::default();
        for path in paths {
            info.insert(path);
        }
        info
    }
}

impl FromIterator<String> for HeaderDeployInfo {
    fn from_iter<T: IntoIterator<Item = String>>(paths: T) -> Self {
        let mut info = Self::default();
        for path in paths {
            info.insert(&path);
        }
        info
    }
}
