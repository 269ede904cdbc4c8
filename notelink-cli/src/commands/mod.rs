//! CLI command implementations

use clap::Subcommand;

use crate::error::CliResult;

pub mod link;
pub mod titles;
pub mod unlink;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Rewrite known note titles into [[...]] references
    Link(link::LinkArgs),

    /// Strip [[...]] references back to plain prose
    Unlink(unlink::UnlinkArgs),

    /// List the titles and acronyms a vault links against
    Titles(titles::TitlesArgs),
}

/// Initialize logging from the shared --quiet/--verbose flags
pub(crate) fn init_logging(quiet: bool, verbose: u8) -> CliResult<()> {
    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    if !quiet {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
            .init();
    }

    Ok(())
}
