pub mod chromaticity;
pub mod dump;
pub mod edit;
pub mod header_spec;
pub mod info;
pub mod mhc2;
pub mod new;
pub mod tag_spec;
pub mod tags;
pub mod validate;

pub use chromaticity::{parse_matrix, parse_primaries, parse_white_point};
pub use dump::DumpArgs;
pub use edit::EditArgs;
pub use header_spec::{parse_header_spec, HeaderSpec};
pub use info::InfoArgs;
pub use mhc2::Mhc2Args;
pub use new::NewArgs;
pub use tag_spec::{parse_signature, parse_tag_assignment, parse_tag_move, TagAssignment, TagMove};
pub use tags::TagsArgs;
pub use validate::ValidateArgs;

#[derive(Debug, clap::Parser)]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub subcommand: Subcommands,
    #[command(flatten)]
    pub globals: GlobalArgs,
}

#[derive(Debug, clap::Args)]
#[non_exhaustive]
pub struct GlobalArgs {
    /// Print debug information; can be repeated.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
    /// Do not print logs to console.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Debug, clap::Subcommand)]
pub enum Subcommands {
    /// Create a new MHC2 display profile.
    #[command(short_flag = 'n')]
    New(NewArgs),
    /// Print header fields and the tag table of a profile.
    #[command(short_flag = 'I')]
    Info(InfoArgs),
    /// Print the raw data of a tag as hex.
    Dump(DumpArgs),
    /// Edit header fields and tags of a profile.
    #[command(short_flag = 'e')]
    Edit(EditArgs),
    /// Replace the MHC2 calibration of a profile.
    Mhc2(Mhc2Args),
    /// Check a profile for ICC v4 and MHC2 problems.
    Validate(ValidateArgs),
    /// Search the library of known tag signatures.
    Tags(TagsArgs),
}

/// Error of the parameter parsers used by the subcommands.
#[derive(Debug)]
pub struct SpecParseError(std::borrow::Cow<'static, str>);

impl From<&'static str> for SpecParseError {
    fn from(value: &'static str) -> Self {
        Self(value.into())
    }
}

impl From<String> for SpecParseError {
    fn from(value: String) -> Self {
        Self(value.into())
    }
}

impl From<mhc_icc::Error> for SpecParseError {
    fn from(value: mhc_icc::Error) -> Self {
        Self(value.to_string().into())
    }
}

impl std::fmt::Display for SpecParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for SpecParseError {}
