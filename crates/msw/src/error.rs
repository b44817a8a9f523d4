use camino::Utf8PathBuf;
use msw_system::CurrentDirectoryError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DiscoveryError>;

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error(transparent)]
    CurrentDirectory(#[from] CurrentDirectoryError),

    #[error("Failed to read directory `{path}`")]
    ReadDirectory {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("`{root}` has no final component to name the package after")]
    UnnamedRoot { root: Utf8PathBuf },

    #[error("Invalid file pattern `{pattern}`")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
}
