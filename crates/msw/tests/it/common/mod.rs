use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use msw_system::walk::{
    DirectoryWalker, WalkDirectory, WalkDirectoryBuilder, WalkDirectoryConfiguration, WalkEntry,
};
use msw_system::{DirectoryEntry, FileType, Metadata, System};

/// An in-memory project whose files are listed and walked in exactly the given order.
#[derive(Debug, Clone)]
pub struct ScriptedSystem {
    root: Utf8PathBuf,
    files: Vec<Utf8PathBuf>,
    unreadable: bool,
}

impl ScriptedSystem {
    pub fn new<'a>(root: &str, files: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            root: Utf8PathBuf::from(root),
            files: files.into_iter().map(Utf8PathBuf::from).collect(),
            unreadable: false,
        }
    }

    /// Makes every directory listing fail with a permission error.
    #[must_use]
    pub fn unreadable(mut self) -> Self {
        self.unreadable = true;
        self
    }

    /// `path` relative to the root, without `.` components.
    fn relative(&self, path: &Utf8Path) -> Option<Utf8PathBuf> {
        let relative = path.strip_prefix(&self.root).ok()?;
        Some(
            relative
                .components()
                .filter(|component| !matches!(component, Utf8Component::CurDir))
                .collect(),
        )
    }

    fn file_type(&self, relative: &Utf8Path) -> Option<FileType> {
        if relative.as_str().is_empty() {
            return Some(FileType::Directory);
        }

        self.files.iter().find_map(|file| {
            if file == relative {
                Some(FileType::File)
            } else if file.starts_with(relative) {
                Some(FileType::Directory)
            } else {
                None
            }
        })
    }
}

impl System for ScriptedSystem {
    fn path_metadata(&self, path: &Utf8Path) -> msw_system::Result<Metadata> {
        self.relative(path)
            .and_then(|relative| self.file_type(&relative))
            .map(Metadata::new)
            .ok_or_else(|| std::io::Error::from(std::io::ErrorKind::NotFound))
    }

    fn read_directory<'a>(
        &'a self,
        path: &Utf8Path,
    ) -> msw_system::Result<Box<dyn Iterator<Item = msw_system::Result<DirectoryEntry>> + 'a>>
    {
        if self.unreadable {
            return Err(std::io::Error::from(std::io::ErrorKind::PermissionDenied));
        }

        let relative = self
            .relative(path)
            .ok_or_else(|| std::io::Error::from(std::io::ErrorKind::NotFound))?;

        let mut children: Vec<(String, FileType)> = Vec::new();
        for file in &self.files {
            let Ok(rest) = file.strip_prefix(&relative) else {
                continue;
            };
            let mut components = rest.components();
            let Some(first) = components.next() else {
                continue;
            };
            let file_type = if components.next().is_some() {
                FileType::Directory
            } else {
                FileType::File
            };
            if !children.iter().any(|(name, _)| name == first.as_str()) {
                children.push((first.as_str().to_string(), file_type));
            }
        }

        let path = path.to_path_buf();
        Ok(Box::new(children.into_iter().map(move |(name, file_type)| {
            Ok(DirectoryEntry::new(path.join(name), file_type))
        })))
    }

    fn walk_directory(&self, path: &Utf8Path) -> WalkDirectoryBuilder {
        WalkDirectoryBuilder::new(path, self.clone())
    }

    fn current_directory(&self) -> &Utf8Path {
        &self.root
    }
}

impl DirectoryWalker for ScriptedSystem {
    fn walk(self: Box<Self>, configuration: WalkDirectoryConfiguration) -> WalkDirectory {
        let walk_root = configuration.path;

        let Some(start) = self.relative(&walk_root) else {
            return Box::new(std::iter::empty());
        };

        let Some(start_type) = self.file_type(&start) else {
            return Box::new(std::iter::empty());
        };

        let mut entries = vec![WalkEntry::new(walk_root.clone(), start_type, 0)];

        if start_type.is_directory() {
            for file in &self.files {
                let Ok(rest) = file.strip_prefix(&start) else {
                    continue;
                };
                let depth = rest.components().count();
                entries.push(WalkEntry::new(walk_root.join(rest), FileType::File, depth));
            }
        }

        Box::new(entries.into_iter().map(Ok))
    }
}

/// Listing order is up to the file system, so compare sorted.
pub fn sorted(mut paths: Vec<String>) -> Vec<String> {
    paths.sort();
    paths
}
