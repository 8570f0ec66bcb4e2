use std::path::PathBuf;

use clap::Parser;

/// Checks a profile for ICC v4 and MHC2 problems.
#[derive(Debug, Parser)]
#[non_exhaustive]
pub struct ValidateArgs {
    /// Input file
    pub input: PathBuf,
}
