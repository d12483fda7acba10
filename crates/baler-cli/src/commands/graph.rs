//! Graph command: print the dependency-set plan without writing anything.

use baler_graph::{partition, DiskFileSystem, Resolver};

use crate::cli::GraphArgs;
use crate::commands::load_config;
use crate::error::{CliError, Result};

pub fn execute(args: GraphArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    if !args.entry.exists() {
        return Err(CliError::FileNotFound(args.entry.clone()));
    }

    let resolver = Resolver::new(DiskFileSystem);
    let root = resolver.resolve(&args.entry, config.resolve_options())?;
    let sets = partition(&root);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&sets)?);
        return Ok(());
    }

    for (index, set) in sets.iter().enumerate() {
        let name = set.defining_path().unwrap_or("<empty>");
        println!("unit {}: {name}", index + 1);
        for dependency in &set.dependencies {
            let marker = if set.no_compile_paths.contains(dependency) {
                " (nocompile)"
            } else {
                ""
            };
            println!("  script     {dependency}{marker}");
        }
        for stylesheet in &set.stylesheets {
            println!("  stylesheet {stylesheet}");
        }
        for package in &set.packages {
            println!("  package    {package}");
        }
    }
    Ok(())
}
