//! Directory-convention discovery for build configuration scripts.
//!
//! A project root is split into *packages* (its immediate subdirectories), *modules*
//! (the root itself plus its packages), C++ *sources* and *headers*. Every query reads
//! the file system at call time; nothing is cached.
//!
//! ```no_run
//! use msw::{Discovery, Exclusion};
//! use msw_system::OsSystem;
//!
//! let system = OsSystem::from_current_dir()?;
//! let discovery = Discovery::new(&system);
//!
//! let sources = discovery.sources(Exclusion::subtree("test"))?;
//! let headers = discovery.header_deploy_info()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod discovery;
mod error;
mod exclusion;
mod headers;
mod locate;

pub mod cwd;

pub use discovery::Discovery;
pub use error::{DiscoveryError, Result};
pub use exclusion::Exclusion;
pub use headers::HeaderDeployInfo;
pub use locate::LocateFiles;

/// File name pattern of C++ translation units.
pub const SOURCE_PATTERN: &str = "*.cpp";

/// File name pattern of deployable headers.
pub const HEADER_PATTERN: &str = "*.h";

/// The module entry naming the project root itself.
pub const ROOT_MODULE: &str = ".";
