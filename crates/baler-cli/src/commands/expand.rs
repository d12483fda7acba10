//! Expand command: reverse-resolve a manifest into page URLs.

use baler_bundler::expand_manifest;

use crate::cli::ExpandArgs;
use crate::error::{CliError, Result};

pub fn execute(args: ExpandArgs) -> Result<()> {
    if !args.manifest.exists() {
        return Err(CliError::FileNotFound(args.manifest.clone()));
    }

    let urls = expand_manifest(&args.manifest, &args.base, &args.remote_symbol)?;
    for url in urls {
        println!("{url}");
    }
    Ok(())
}
