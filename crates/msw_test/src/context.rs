use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use insta::{Settings, internals::SettingsBindDropGuard};
use msw_system::OsSystem;
use tempfile::TempDir;

use crate::{setup_tracing, tempdir_filter};

/// A throwaway project directory for discovery tests.
///
/// The project lives in a directory called `project` (or a chosen name) inside a fresh
/// temporary directory, so its package name is predictable. Snapshots see the temporary
/// directory as `<temp_dir>/`.
pub struct TestContext {
    _temp_dir: TempDir,
    project_dir_path: Utf8PathBuf,
    _settings_scope: SettingsBindDropGuard,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_name("project")
    }

    pub fn with_name(name: &str) -> Self {
        setup_tracing();

        let temp_dir = TempDir::new().expect("Failed to create temp directory");

        let temp_path = Utf8PathBuf::from_path_buf(
            dunce::simplified(
                &temp_dir
                    .path()
                    .canonicalize()
                    .context("Failed to canonicalize temp directory")
                    .unwrap(),
            )
            .to_path_buf(),
        )
        .expect("Path is not valid UTF-8");

        let project_dir_path = temp_path.join(name);
        std::fs::create_dir_all(&project_dir_path)
            .with_context(|| format!("Failed to create project directory `{project_dir_path}`"))
            .unwrap();

        let mut settings = Settings::clone_current();
        settings.add_filter(&tempdir_filter(&temp_path), "<temp_dir>/");
        settings.add_filter(r"\\", "/");

        let settings_scope = settings.bind_to_scope();

        Self {
            _temp_dir: temp_dir,
            project_dir_path,
            _settings_scope: settings_scope,
        }
    }

    pub fn with_files<'a>(files: impl IntoIterator<Item = &'a str>) -> Self {
        let context = Self::default();
        context.write_files(files);
        context
    }

    /// Creates an empty file at each path, with parent directories as needed.
    pub fn write_files<'a>(&self, files: impl IntoIterator<Item = &'a str>) {
        for path in files {
            self.write_file(path, "");
        }
    }

    pub fn write_file(&self, path: impl AsRef<Utf8Path>, content: &str) {
        let path = self.project_dir_path.join(path);

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory `{parent}`"))
                .unwrap();
        }

        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write file `{path}`"))
            .unwrap();
    }

    #[allow(clippy::must_use_candidate)]
    pub fn create_dir(&self, path: impl AsRef<Utf8Path>) -> Utf8PathBuf {
        let path = self.project_dir_path.join(path);
        std::fs::create_dir_all(&path)
            .with_context(|| format!("Failed to create directory `{path}`"))
            .unwrap();
        path
    }

    pub fn remove_dir(&self, path: impl AsRef<Utf8Path>) {
        let path = self.project_dir_path.join(path);
        std::fs::remove_dir_all(&path)
            .with_context(|| format!("Failed to remove directory `{path}`"))
            .unwrap();
    }

    pub fn temp_path(&self, path: impl AsRef<Utf8Path>) -> Utf8PathBuf {
        self.project_dir_path.join(path)
    }

    pub fn root(&self) -> &Utf8Path {
        &self.project_dir_path
    }

    /// An OS-backed system rooted at the project directory.
    pub fn system(&self) -> OsSystem {
        OsSystem::new(&self.project_dir_path)
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
