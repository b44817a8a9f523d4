//! Discovery rooted at the process working directory.
//!
//! These are the entry points for build scripts that are evaluated from inside the
//! project. Each call reads the working directory anew.

use msw_system::OsSystem;

use crate::{Discovery, Exclusion, HeaderDeployInfo, Result};

fn with_current_dir<T>(query: impl FnOnce(Discovery<'_>) -> Result<T>) -> Result<T> {
    let system = OsSystem::from_current_dir()?;
    query(Discovery::new(&system))
}

pub fn package_name() -> Result<String> {
    with_current_dir(|discovery| discovery.package_name())
}

pub fn packages() -> Result<Vec<String>> {
    with_current_dir(|discovery| discovery.packages())
}

pub fn modules() -> Result<Vec<String>> {
    with_current_dir(|discovery| discovery.modules())
}

pub fn sources(avoid: impl Into<Exclusion>) -> Result<Vec<String>> {
    with_current_dir(|discovery| discovery.sources(avoid))
}

pub fn header_deploy_info() -> Result<HeaderDeployInfo> {
    with_current_dir(|discovery| discovery.header_deploy_info())
}
