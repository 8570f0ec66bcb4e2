use std::path::PathBuf;

use clap::Parser;

use super::{
    parse_header_spec, parse_signature, parse_tag_assignment, parse_tag_move, HeaderSpec,
    TagAssignment, TagMove,
};
use mhc_icc::Signature;

/// Edits header fields and tags of a profile.
///
/// Edits are applied in the order: header, remove, add, set, move.
#[derive(Debug, Parser)]
#[non_exhaustive]
pub struct EditArgs {
    /// Input file
    pub input: PathBuf,
    /// Output file; overwrites input if omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Header fields as text, `key=value[,key=value...]`; can be repeated
    #[arg(long, value_name = "SPEC", value_parser = parse_header_spec)]
    pub header: Vec<HeaderSpec>,
    /// Header fields as raw hex, `key=hex[,key=hex...]`; can be repeated
    #[arg(long, value_name = "SPEC", value_parser = parse_header_spec)]
    pub header_hex: Vec<HeaderSpec>,
    /// Remove a tag; can be repeated
    #[arg(long, value_name = "TAG", value_parser = parse_signature)]
    pub remove: Vec<Signature>,
    /// Append a tag, `TAG=HEX` or `TAG=@PATH`; can be repeated
    #[arg(long, value_name = "TAG=DATA", value_parser = parse_tag_assignment)]
    pub add: Vec<TagAssignment>,
    /// Replace the data of an existing tag, `TAG=HEX` or `TAG=@PATH`; can be repeated
    #[arg(long, value_name = "TAG=DATA", value_parser = parse_tag_assignment)]
    pub set: Vec<TagAssignment>,
    /// Move a tag in the table, `TAG=DELTA`; can be repeated
    #[arg(long = "move", value_name = "TAG=DELTA", value_parser = parse_tag_move, allow_hyphen_values = true)]
    pub moves: Vec<TagMove>,
    /// Keep the creation date of the input
    #[arg(long)]
    pub keep_date: bool,
}
