use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "tmdb2folder")]
#[command(author, version, about, long_about = None)]
#[command(about = "Match media directories to TMDB records and rename them interactively")]
pub struct Args {
    /// Root directories to scan for media folders, processed in order.
    /// Roots containing "shows" in their path are searched as series,
    /// everything else as films.
    #[arg(required = true, value_name = "ROOT")]
    pub roots: Vec<PathBuf>,

    /// Processed-folder ledger file (created if missing)
    #[arg(short = 'p', long, default_value = "already_processed.log", value_name = "FILE")]
    pub ledger: PathBuf,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
