//! Build command: resolve, compile, and write manifests for every entry.

use tracing::info;

use crate::cli::BuildArgs;
use crate::commands::load_config;
use crate::error::{CliError, Result};
use crate::ui;

pub fn execute(args: BuildArgs) -> Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if !args.entry.is_empty() {
        config.entry = args.entry;
    }
    if let Some(out_dir) = args.out_dir {
        config.out_dir = out_dir;
    }
    if args.mute_missing {
        config.mute_missing = true;
    }
    config.validate().map_err(CliError::from)?;

    for entry in &config.entry {
        if !entry.exists() {
            return Err(CliError::FileNotFound(entry.clone()));
        }

        info!(entry = %entry.display(), "building");
        let (sets, compiled) = baler_bundler::build_entry(entry, &config)?;

        for unit in &compiled {
            ui::info(&format!("  wrote {}", unit.output.display()));
        }
        ui::success(&format!(
            "{}: {} compile units",
            entry.display(),
            sets.len()
        ));
    }
    Ok(())
}
