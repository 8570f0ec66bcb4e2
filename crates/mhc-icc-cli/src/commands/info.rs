use std::path::PathBuf;

use clap::Parser;

/// Prints header fields and the tag table of an ICC profile.
#[derive(Debug, Parser)]
#[non_exhaustive]
pub struct InfoArgs {
    /// Input file
    pub input: PathBuf,
    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}
