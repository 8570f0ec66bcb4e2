use std::path::PathBuf;

use clap::Parser;
use mhc_icc::Signature;

use super::parse_signature;

/// Prints the data of a tag as a hex view.
#[derive(Debug, Parser)]
#[non_exhaustive]
pub struct DumpArgs {
    /// Input file
    pub input: PathBuf,
    /// Tag signature
    #[arg(value_parser = parse_signature)]
    pub tag: Signature,
    /// Print contiguous hex instead of a hex view
    #[arg(long)]
    pub raw: bool,
}
