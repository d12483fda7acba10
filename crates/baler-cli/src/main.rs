//! baler CLI entry point: parse arguments, initialize logging, dispatch.

use clap::Parser;
use miette::Result;

use baler_cli::{cli, commands, error, logger, ui};

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init_colors(args.no_color);

    let result = match args.command {
        cli::Command::Build(build_args) => commands::build::execute(build_args),
        cli::Command::Graph(graph_args) => commands::graph::execute(graph_args),
        cli::Command::Check(check_args) => commands::check::execute(check_args),
        cli::Command::Expand(expand_args) => commands::expand::execute(expand_args),
    };

    result.map_err(error::cli_error_to_miette)
}
