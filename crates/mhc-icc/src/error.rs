use std::borrow::Cow;

use crate::Signature;

#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    ProfileTooShort {
        len: usize,
    },
    MissingAcsp,
    TagTableOutOfBounds {
        tag_count: u32,
        len: usize,
    },
    TagOutOfBounds {
        signature: Signature,
        offset: u32,
        size: u32,
    },
    TagOverlapsHeader {
        signature: Signature,
        offset: u32,
    },
    InvalidSignature(String),
    InvalidHeaderField {
        field: &'static str,
        reason: Cow<'static, str>,
    },
    UnknownHeaderField(String),
    InvalidTagData {
        signature: Signature,
        reason: Cow<'static, str>,
    },
    DuplicateTag(Signature),
    TagNotFound(Signature),
    ValueOutOfRange {
        what: &'static str,
        value: f64,
    },
    InvalidHex(&'static str),
    ProfileTooLarge(usize),
}

impl Error {
    #[inline]
    pub(crate) fn invalid_tag_data(
        signature: Signature,
        reason: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::InvalidTagData {
            signature,
            reason: reason.into(),
        }
    }

    #[inline]
    pub(crate) fn invalid_header_field(
        field: &'static str,
        reason: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::InvalidHeaderField {
            field,
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use Error::*;

        match self {
            ProfileTooShort { len } => {
                write!(f, "file too small to be a valid ICC profile ({len} bytes)")
            }
            MissingAcsp => write!(f, "missing required 'acsp' signature"),
            TagTableOutOfBounds { tag_count, len } => write!(
                f,
                "tag table of {tag_count} entries exceeds file size ({len} bytes)"
            ),
            TagOutOfBounds {
                signature,
                offset,
                size,
            } => write!(
                f,
                "tag {signature} out of bounds (offset {offset}, size {size})"
            ),
            TagOverlapsHeader { signature, offset } => write!(
                f,
                "tag {signature} overlaps header/tag table (offset {offset})"
            ),
            InvalidSignature(s) => {
                write!(f, "invalid signature `{s}`, must be up to 4 ASCII characters")
            }
            InvalidHeaderField { field, reason } => {
                write!(f, "invalid value for header field `{field}`: {reason}")
            }
            UnknownHeaderField(name) => write!(f, "unknown header field `{name}`"),
            InvalidTagData { signature, reason } => {
                write!(f, "invalid data in tag {signature}: {reason}")
            }
            DuplicateTag(signature) => {
                write!(f, "the tag {signature} is already in the table")
            }
            TagNotFound(signature) => write!(f, "tag {signature} not found"),
            ValueOutOfRange { what, value } => write!(f, "{what} out of range: {value}"),
            InvalidHex(reason) => write!(f, "invalid hex: {reason}"),
            ProfileTooLarge(size) => {
                write!(f, "profile of {size} bytes does not fit in a 32-bit size field")
            }
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
