//! Check command: validate configuration and entry files without building.

use crate::cli::CheckArgs;
use crate::commands::load_config;
use crate::error::{CliError, Result};
use crate::ui;

pub fn execute(args: CheckArgs) -> Result<()> {
    ui::info("checking configuration...");
    let config = load_config(args.config.as_deref())?;
    config.validate().map_err(CliError::from)?;
    ui::success("configuration is valid");

    for entry in &config.entry {
        if !entry.exists() {
            ui::error(&format!("entry not found: {}", entry.display()));
            return Err(CliError::FileNotFound(entry.clone()));
        }
        ui::success(&format!("  {} exists", entry.display()));
    }

    if !config.remote_root.exists() {
        ui::warning(&format!(
            "remote root does not exist: {}",
            config.remote_root.display()
        ));
    }
    if let Some(tests_root) = &config.tests_root {
        if !tests_root.exists() {
            ui::warning(&format!("tests root does not exist: {}", tests_root.display()));
        }
    }

    ui::success("all checks passed");
    Ok(())
}
