//! Command implementations, one module per subcommand.

pub mod build;
pub mod check;
pub mod expand;
pub mod graph;

use std::path::Path;

use baler_bundler::{BalerConfig, DEFAULT_CONFIG_FILE};

use crate::error::Result;

/// Load the config from an explicit path or the default location.
pub(crate) fn load_config(path: Option<&Path>) -> Result<BalerConfig> {
    let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
    Ok(BalerConfig::load(path)?)
}
