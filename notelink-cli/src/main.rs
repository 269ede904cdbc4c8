//! Entry point for the notelink binary

use clap::Parser;
use notelink_cli::commands::Commands;
use notelink_cli::CliResult;

/// Rewrite notes in a vault so known titles become [[wiki]] references
#[derive(Debug, Parser)]
#[command(name = "notelink", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn run(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Commands::Link(args) => args.execute(),
        Commands::Unlink(args) => args.execute(),
        Commands::Titles(args) => args.execute(),
    }
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(&cli) {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_args_are_well_formed() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
