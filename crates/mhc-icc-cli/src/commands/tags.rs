use std::path::PathBuf;

use clap::Parser;

/// Searches known tag signatures by signature or description.
#[derive(Debug, Parser)]
#[non_exhaustive]
pub struct TagsArgs {
    /// Search text; lists every known tag if omitted
    pub query: Option<String>,
    /// Hide tags already present in this profile
    #[arg(long, value_name = "PROFILE")]
    pub exclude_from: Option<PathBuf>,
}
