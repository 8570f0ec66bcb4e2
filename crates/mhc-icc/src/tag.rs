//! Tag entries and the library of known tag signatures.
use crate::signature::{tags, types};
use crate::{Result, Signature, TagData};

/// Tag signature paired with its raw data.
///
/// Data is kept as bytes so that tags of unknown types survive a round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub signature: Signature,
    pub data: Vec<u8>,
}

impl Tag {
    #[inline]
    pub fn new(signature: Signature, data: Vec<u8>) -> Self {
        Self { signature, data }
    }

    pub fn from_data(signature: Signature, data: &TagData) -> Result<Self> {
        Ok(Self {
            signature,
            data: data.encode()?,
        })
    }

    #[inline]
    pub fn decode(&self) -> Result<TagData> {
        TagData::decode(self.signature, &self.data)
    }

    #[inline]
    pub fn description(&self) -> &'static str {
        describe(self.signature)
    }
}

const CUSTOM_TAG: &str = "Custom tag";

/// Tags of ICC.1 v4 plus the Windows specific ones, sorted by signature.
pub static KNOWN_TAGS: &[(Signature, &str)] = &[
    (Signature::new(b"A2B0"), "AToB0 (PCS -> Device)"),
    (Signature::new(b"A2B1"), "AToB1"),
    (Signature::new(b"A2B2"), "AToB2"),
    (Signature::new(b"A2B3"), "AToB3"),
    (Signature::new(b"B2A0"), "BToA0 (Device -> PCS)"),
    (Signature::new(b"B2A1"), "BToA1"),
    (Signature::new(b"B2A2"), "BToA2"),
    (Signature::new(b"B2A3"), "BToA3"),
    (tags::MHC2, "Windows Advanced Color metadata"),
    (tags::MS_COLOR_ADAPTATION, "Microsoft Color Adaptation"),
    (tags::BLUE_TRC, "Blue tone reproduction curve"),
    (tags::BLUE_COLORANT, "Blue colorant"),
    (tags::MEDIA_BLACK_POINT, "Media black point"),
    (Signature::new(b"calt"), "Calibration date/time"),
    (tags::CHROMATIC_ADAPTATION, "Chromatic adaptation"),
    (Signature::new(b"chrm"), "Chromaticity"),
    (Signature::new(b"clro"), "Colorant order"),
    (Signature::new(b"clrt"), "Colorant table"),
    (tags::COPYRIGHT, "Copyright"),
    (Signature::new(b"crdi"), "CrdInfo"),
    (tags::DESCRIPTION, "Profile description"),
    (Signature::new(b"dmdd"), "Device model description"),
    (Signature::new(b"dmnd"), "Device manufacturer description"),
    (tags::GREEN_TRC, "Green tone reproduction curve"),
    (tags::GREEN_COLORANT, "Green colorant"),
    (Signature::new(b"gamt"), "Gamut"),
    (tags::GRAY_TRC, "Black tone reproduction curve"),
    (tags::LUMINANCE, "Luminance"),
    (Signature::new(b"meas"), "Measurement"),
    (Signature::new(b"mluc"), "Multi-localized Unicode"),
    (Signature::new(b"mmod"), "Make and model"),
    (Signature::new(b"ncl2"), "Named color 2"),
    (Signature::new(b"pseq"), "Profile sequence description"),
    (Signature::new(b"psid"), "Profile sequence identifier"),
    (tags::RED_TRC, "Red tone reproduction curve"),
    (tags::RED_COLORANT, "Red colorant"),
    (Signature::new(b"resp"), "Output response"),
    (Signature::new(b"rig0"), "Perceptual rendering intent gamut"),
    (Signature::new(b"rig2"), "ICC-absolute rendering intent gamut"),
    (Signature::new(b"scrd"), "Screening description"),
    (Signature::new(b"scrn"), "Screening"),
    (Signature::new(b"targ"), "CharTarget"),
    (Signature::new(b"tech"), "Technology"),
    (Signature::new(b"vcgt"), "Video card gamma"),
    (Signature::new(b"view"), "Viewing conditions"),
    (Signature::new(b"vued"), "Viewing conditions description"),
    (tags::MEDIA_WHITE_POINT, "Media white point"),
];

pub fn is_known(signature: Signature) -> bool {
    KNOWN_TAGS.iter().any(|&(sig, _)| sig == signature)
}

/// Human description of a tag signature.
pub fn describe(signature: Signature) -> &'static str {
    KNOWN_TAGS
        .iter()
        .find(|&&(sig, _)| sig == signature)
        .map(|&(_, desc)| desc)
        .unwrap_or(CUSTOM_TAG)
}

/// Case-insensitive substring search over signatures and descriptions.
///
/// Results are sorted by signature and leave out `exclude`.
pub fn search(query: &str, exclude: &[Signature]) -> Vec<(Signature, &'static str)> {
    let query = query.to_lowercase();
    let mut ret = KNOWN_TAGS
        .iter()
        .copied()
        .filter(|(sig, _)| !exclude.contains(sig))
        .filter(|(sig, desc)| {
            sig.to_string().to_lowercase().contains(&query)
                || desc.to_lowercase().contains(&query)
        })
        .collect::<Vec<_>>();
    ret.sort_by_key(|&(sig, _)| sig);
    ret
}

/// Tag types a display profile may use for `signature`, if constrained.
pub fn expected_types(signature: Signature) -> Option<&'static [Signature]> {
    const XYZ: &[Signature] = &[types::XYZ];
    const TRC: &[Signature] = &[types::CURVE, types::PARAMETRIC_CURVE];
    const TEXT: &[Signature] = &[types::MULTI_LOCALIZED_UNICODE, types::TEXT];

    Some(match signature {
        tags::RED_COLORANT
        | tags::GREEN_COLORANT
        | tags::BLUE_COLORANT
        | tags::MEDIA_WHITE_POINT
        | tags::MEDIA_BLACK_POINT
        | tags::LUMINANCE => XYZ,
        tags::RED_TRC | tags::GREEN_TRC | tags::BLUE_TRC | tags::GRAY_TRC => TRC,
        tags::CHROMATIC_ADAPTATION => &[types::S15_FIXED16_ARRAY],
        tags::COPYRIGHT | tags::DESCRIPTION => TEXT,
        tags::MS_COLOR_ADAPTATION => &[types::TEXT],
        tags::MHC2 => &[types::MHC2],
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn library_sorted() {
        assert!(KNOWN_TAGS.windows(2).all(|w| w[0].0 < w[1].0));
        assert_eq!(describe(tags::MHC2), "Windows Advanced Color metadata");
        assert_eq!(describe(Signature::new(b"zzzz")), "Custom tag");
        assert!(is_known(Signature::new(b"vcgt")));
    }

    #[test]
    fn search_library() {
        let results = search("TRC", &[]);
        let sigs: Vec<_> = results.iter().map(|(sig, _)| sig.to_string()).collect();
        assert_eq!(sigs, ["bTRC", "gTRC", "kTRC", "rTRC"]);

        let results = search("colorant", &[tags::RED_COLORANT]);
        let sigs: Vec<_> = results.iter().map(|(sig, _)| sig.to_string()).collect();
        assert_eq!(sigs, ["bXYZ", "clro", "clrt", "gXYZ"]);

        assert_eq!(search("", &[]).len(), KNOWN_TAGS.len());
        assert!(search("no such tag", &[]).is_empty());
    }

    #[test]
    fn tag_views() {
        let tag = Tag::from_data(tags::MS_COLOR_ADAPTATION, &TagData::Text("x".into())).unwrap();
        assert_eq!(tag.data, b"text\0\0\0\0x\0");
        assert_eq!(tag.decode().unwrap(), TagData::Text("x".into()));
        assert_eq!(tag.description(), "Microsoft Color Adaptation");

        assert_eq!(expected_types(tags::LUMINANCE), Some(&[types::XYZ][..]));
        assert_eq!(expected_types(Signature::new(b"vcgt")), None);
    }
}
