use std::path::PathBuf;

use mhc_icc::Signature;

use super::SpecParseError;

/// Where new tag data comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagSource {
    Hex(Vec<u8>),
    /// Raw bytes of a file.
    File(PathBuf),
}

/// `TAG=HEX` or `TAG=@PATH`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagAssignment {
    pub signature: Signature,
    pub source: TagSource,
}

impl TagAssignment {
    pub fn read_data(&self) -> crate::Result<Vec<u8>> {
        match &self.source {
            TagSource::Hex(data) => Ok(data.clone()),
            TagSource::File(path) => std::fs::read(path).map_err(crate::Error::ReadInput),
        }
    }
}

/// `TAG=DELTA`, moving a tag up (negative) or down the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagMove {
    pub signature: Signature,
    pub delta: isize,
}

pub fn parse_signature(val: &str) -> Result<Signature, SpecParseError> {
    Ok(val.parse::<Signature>()?)
}

pub fn parse_tag_assignment(val: &str) -> Result<TagAssignment, SpecParseError> {
    let (sig, data) = val
        .split_once('=')
        .ok_or_else(|| format!("`{val}` is not in the form TAG=HEX or TAG=@PATH"))?;
    let signature = parse_signature(sig)?;
    let source = match data.strip_prefix('@') {
        Some(path) if !path.is_empty() => TagSource::File(PathBuf::from(path)),
        Some(_) => return Err("path is required after `@`".into()),
        None => TagSource::Hex(mhc_icc::hexview::parse_hex(data)?),
    };
    Ok(TagAssignment { signature, source })
}

pub fn parse_tag_move(val: &str) -> Result<TagMove, SpecParseError> {
    let (sig, delta) = val
        .split_once('=')
        .ok_or_else(|| format!("`{val}` is not in the form TAG=DELTA"))?;
    let signature = parse_signature(sig)?;
    let delta = delta
        .trim()
        .parse::<isize>()
        .map_err(|_| format!("invalid move delta `{delta}`"))?;
    Ok(TagMove { signature, delta })
}
