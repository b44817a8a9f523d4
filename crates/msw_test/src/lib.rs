mod context;
mod logging;
mod utils;

pub use context::TestContext;
pub use logging::{EnvVars, setup_tracing};
pub use utils::tempdir_filter;
