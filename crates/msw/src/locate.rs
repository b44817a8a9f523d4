use camino::Utf8PathBuf;
use glob::Pattern;
use msw_system::System;
use msw_system::walk::WalkDirectory;

use crate::{DiscoveryError, Result};

/// Lazily yields every file below a start directory whose name matches a pattern.
///
/// Paths are the textual start directory joined with the path relative to it, so walking
/// `./net` yields `./net/sock.cpp` and `./net/impl/sock_impl.cpp`. The pattern only ever
/// sees the file name.
///
/// Entries the walk cannot read are skipped. A start directory that does not exist, or
/// that is a file, yields nothing.
pub struct LocateFiles<'a> {
    system: &'a dyn System,
    entries: WalkDirectory,
    pattern: Pattern,
    walk_root: Utf8PathBuf,
    start: Utf8PathBuf,
}

impl<'a> LocateFiles<'a> {
    pub(crate) fn new(system: &'a dyn System, pattern: &str, start: &str) -> Result<Self> {
        let pattern = Pattern::new(pattern).map_err(|source| DiscoveryError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;

        let walk_root = system.current_directory().join(start);
        let entries = system.walk_directory(&walk_root).build();

        Ok(Self {
            system,
            entries,
            pattern,
            walk_root,
            start: Utf8PathBuf::from(start),
        })
    }
}

impl Iterator for LocateFiles<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        for entry in self.entries.by_ref() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(error) => {
                    tracing::debug!("Skipping unreadable entry: {error}");
                    continue;
                }
            };

            // Links are not followed while walking, but a link to a directory is still one.
            let file_type = entry.file_type();
            if entry.depth() == 0
                || file_type.is_directory()
                || (file_type.is_symlink() && self.system.is_directory(entry.path()))
            {
                continue;
            }

            let Some(file_name) = entry.path().file_name() else {
                continue;
            };

            if !self.pattern.matches(file_name) {
                continue;
            }

            let Ok(relative) = entry.path().strip_prefix(&self.walk_root) else {
                tracing::debug!(
                    "`{}` is outside of the walked directory `{}`",
                    entry.path(),
                    self.walk_root
                );
                continue;
            };

            let path = self.start.join(relative);
            tracing::trace!(path = %path, pattern = %self.pattern, "Matched file");

            return Some(path.into_string());
        }

        None
    }
}

impl std::fmt::Debug for LocateFiles<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocateFiles")
            .field("pattern", &self.pattern.as_str())
            .field("start", &self.start)
            .finish_non_exhaustive()
    }
}
