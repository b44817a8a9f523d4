use std::collections::HashSet;

use camino::Utf8Path;
use msw_system::System;

use crate::{
    DiscoveryError, Exclusion, HEADER_PATTERN, HeaderDeployInfo, LocateFiles, ROOT_MODULE,
    Result, SOURCE_PATTERN,
};

/// Walk start for whole-project queries.
const PROJECT_START: &str = ".";

/// Answers layout questions about the project rooted at [`System::current_directory`].
///
/// Every call reads the file system afresh; two calls without changes in between return
/// the same content, although listing order is whatever the file system produces.
#[derive(Debug, Clone, Copy)]
pub struct Discovery<'a> {
    system: &'a dyn System,
}

impl<'a> Discovery<'a> {
    pub const fn new(system: &'a dyn System) -> Self {
        Self { system }
    }

    pub fn root(&self) -> &'a Utf8Path {
        self.system.current_directory()
    }

    /// The package name, which is the base name of the project root.
    pub fn package_name(&self) -> Result<String> {
        let root = self.root();

        let name = root
            .file_name()
            .ok_or_else(|| DiscoveryError::UnnamedRoot {
                root: root.to_path_buf(),
            })?;

        Ok(name.to_string())
    }

    /// Names of the immediate subdirectories of the project root.
    ///
    /// Hidden directories are included; links to directories count as directories.
    pub fn packages(&self) -> Result<Vec<String>> {
        let root = self.root();
        let read_error = |source| DiscoveryError::ReadDirectory {
            path: root.to_path_buf(),
            source,
        };

        let mut packages = Vec::new();

        for entry in self.system.read_directory(root).map_err(read_error)? {
            let entry = match entry {
                Ok(entry) => entry,
                Err(error) if error.kind() == std::io::ErrorKind::InvalidData => {
                    tracing::debug!("Skipping entry in `{root}`: {error}");
                    continue;
                }
                Err(error) => return Err(read_error(error)),
            };

            let file_type = entry.file_type();
            let is_directory = file_type.is_directory()
                || (file_type.is_symlink() && self.system.is_directory(entry.path()));

            if !is_directory {
                continue;
            }

            if let Some(name) = entry.path().file_name() {
                packages.push(name.to_string());
            }
        }

        tracing::debug!(root = %root, "Discovered {} package(s)", packages.len());

        Ok(packages)
    }

    /// The project root itself, as [`ROOT_MODULE`], followed by [`Discovery::packages`].
    pub fn modules(&self) -> Result<Vec<String>> {
        let packages = self.packages()?;

        let mut modules = Vec::with_capacity(packages.len() + 1);
        modules.push(ROOT_MODULE.to_string());
        modules.extend(packages);

        Ok(modules)
    }

    /// Every `*.cpp` file below the project root, minus those found under `avoid`.
    ///
    /// A source is excluded only if the walk of the excluded subtree produces the exact
    /// same path string.
    pub fn sources(&self, avoid: impl Into<Exclusion>) -> Result<Vec<String>> {
        let avoid = avoid.into();

        let avoided: HashSet<String> = match avoid.path() {
            Some(path) => self.locate_files(SOURCE_PATTERN, path)?.collect(),
            None => HashSet::new(),
        };

        let sources: Vec<String> = self
            .locate_files(SOURCE_PATTERN, PROJECT_START)?
            .filter(|source| !avoided.contains(source))
            .collect();

        tracing::debug!(
            avoid = %avoid,
            "Discovered {} source(s), {} avoided",
            sources.len(),
            avoided.len()
        );

        Ok(sources)
    }

    /// Every `*.cpp` file below the project root.
    pub fn sources_all(&self) -> Result<Vec<String>> {
        self.sources(Exclusion::Nothing)
    }

    /// Every `*.h` file below the project root, grouped by the directory that contains it.
    pub fn header_deploy_info(&self) -> Result<HeaderDeployInfo> {
        let info: HeaderDeployInfo = self
            .locate_files(HEADER_PATTERN, PROJECT_START)?
            .collect();

        tracing::debug!(
            "Discovered {} header(s) in {} director(ies)",
            info.file_count(),
            info.len()
        );

        Ok(info)
    }

    /// Lazily lists the files below `start` whose name matches the glob `pattern`.
    ///
    /// `start` is relative to the project root and is kept verbatim as the prefix of
    /// every yielded path.
    pub fn locate_files(&self, pattern: &str, start: &str) -> Result<LocateFiles<'a>> {
        LocateFiles::new(self.system, pattern, start)
    }
}
