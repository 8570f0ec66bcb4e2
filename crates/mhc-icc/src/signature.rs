use crate::{Error, Result};

/// Four-byte signature used for tags, tag types and several header fields.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Signature(pub [u8; 4]);

impl Signature {
    pub const ZERO: Self = Self([0; 4]);

    #[inline]
    pub const fn new(bytes: &[u8; 4]) -> Self {
        Self(*bytes)
    }

    #[inline]
    pub const fn from_u32(value: u32) -> Self {
        Self(value.to_be_bytes())
    }

    #[inline]
    pub const fn to_u32(self) -> u32 {
        u32::from_be_bytes(self.0)
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.0 == [0; 4]
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }

    /// Parses a signature field that may be left empty.
    ///
    /// Trailing whitespace is ignored, shorter text is padded with spaces, and empty text
    /// yields the all-zero signature.
    pub fn parse_limited(s: &str) -> Result<Self> {
        let trimmed = s.trim_end();
        if trimmed.is_empty() {
            return Ok(Self::ZERO);
        }
        if !trimmed.is_ascii() || trimmed.len() > 4 {
            return Err(Error::InvalidSignature(s.to_owned()));
        }

        let mut bytes = [b' '; 4];
        bytes[..trimmed.len()].copy_from_slice(trimmed.as_bytes());
        Ok(Self(bytes))
    }

    fn is_printable(&self) -> bool {
        self.0.iter().all(|b| (0x20..0x7f).contains(b))
    }
}

impl std::str::FromStr for Signature {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let bytes: [u8; 4] = s
            .as_bytes()
            .try_into()
            .ok()
            .filter(|_| s.is_ascii())
            .ok_or_else(|| Error::InvalidSignature(s.to_owned()))?;
        Ok(Self(bytes))
    }
}

impl std::fmt::Display for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_printable() {
            // Printable ASCII is valid UTF-8.
            let s = std::str::from_utf8(&self.0).map_err(|_| std::fmt::Error)?;
            f.write_str(s)
        } else {
            write!(f, "{:08X}", self.to_u32())
        }
    }
}

impl std::fmt::Debug for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Signature(\"{self}\")")
    }
}

impl From<[u8; 4]> for Signature {
    fn from(value: [u8; 4]) -> Self {
        Self(value)
    }
}

/// Tag signatures written by MHC2 display profiles.
pub mod tags {
    use super::Signature;

    pub const COPYRIGHT: Signature = Signature::new(b"cprt");
    pub const DESCRIPTION: Signature = Signature::new(b"desc");
    pub const RED_TRC: Signature = Signature::new(b"rTRC");
    pub const GREEN_TRC: Signature = Signature::new(b"gTRC");
    pub const BLUE_TRC: Signature = Signature::new(b"bTRC");
    pub const GRAY_TRC: Signature = Signature::new(b"kTRC");
    pub const CHROMATIC_ADAPTATION: Signature = Signature::new(b"chad");
    pub const RED_COLORANT: Signature = Signature::new(b"rXYZ");
    pub const GREEN_COLORANT: Signature = Signature::new(b"gXYZ");
    pub const BLUE_COLORANT: Signature = Signature::new(b"bXYZ");
    pub const MEDIA_WHITE_POINT: Signature = Signature::new(b"wtpt");
    pub const MEDIA_BLACK_POINT: Signature = Signature::new(b"bkpt");
    pub const LUMINANCE: Signature = Signature::new(b"lumi");
    pub const MS_COLOR_ADAPTATION: Signature = Signature::new(b"MSCA");
    pub const MHC2: Signature = Signature::new(b"MHC2");
}

/// Tag type signatures understood by [`TagData`](crate::TagData).
pub mod types {
    use super::Signature;

    pub const XYZ: Signature = Signature::new(b"XYZ ");
    pub const CURVE: Signature = Signature::new(b"curv");
    pub const PARAMETRIC_CURVE: Signature = Signature::new(b"para");
    pub const S15_FIXED16_ARRAY: Signature = Signature::new(b"sf32");
    pub const TEXT: Signature = Signature::new(b"text");
    pub const MULTI_LOCALIZED_UNICODE: Signature = Signature::new(b"mluc");
    pub const MHC2: Signature = Signature::new(b"MHC2");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_exact() {
        let sig: Signature = "rTRC".parse().unwrap();
        assert_eq!(sig, tags::RED_TRC);
        assert_eq!(sig.to_u32(), 0x7254_5243);

        assert!("rTR".parse::<Signature>().is_err());
        assert!("rTRCx".parse::<Signature>().is_err());
        assert!("rTRé".parse::<Signature>().is_err());
    }

    #[test]
    fn parse_limited() {
        assert_eq!(Signature::parse_limited("").unwrap(), Signature::ZERO);
        assert_eq!(Signature::parse_limited("   ").unwrap(), Signature::ZERO);
        assert_eq!(
            Signature::parse_limited("AB").unwrap(),
            Signature::new(b"AB  ")
        );
        assert_eq!(
            Signature::parse_limited("MSFT  ").unwrap(),
            Signature::new(b"MSFT")
        );
        assert!(Signature::parse_limited("TOOLONG").is_err());
    }

    #[test]
    fn display() {
        assert_eq!(tags::MHC2.to_string(), "MHC2");
        assert_eq!(types::XYZ.to_string(), "XYZ ");
        assert_eq!(Signature::ZERO.to_string(), "00000000");
        assert_eq!(Signature::from_u32(0x0102_0304).to_string(), "01020304");
    }
}
