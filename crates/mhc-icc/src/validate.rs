//! Consistency checks of a profile against ICC v4 and the `MHC2` invariants.
use crate::header::{DataColorSpace, DeviceClass};
use crate::signature::{tags, types};
use crate::tag::{expected_types, is_known};
use crate::{Profile, Signature, TagData, XyzNumber};

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Error => "error",
            Self::Warning => "warning",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub severity: Severity,
    /// Tag the issue is about, `None` for header issues.
    pub signature: Option<Signature>,
    pub message: String,
}

impl Issue {
    fn error(signature: Option<Signature>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            signature,
            message: message.into(),
        }
    }

    fn warning(signature: Option<Signature>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            signature,
            message: message.into(),
        }
    }

    #[inline]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl std::fmt::Display for Issue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.signature {
            Some(sig) => write!(f, "{}: [{sig}] {}", self.severity, self.message),
            None => write!(f, "{}: {}", self.severity, self.message),
        }
    }
}

const REQUIRED_DISPLAY_RGB: [Signature; 9] = [
    tags::DESCRIPTION,
    tags::COPYRIGHT,
    tags::MEDIA_WHITE_POINT,
    tags::RED_COLORANT,
    tags::GREEN_COLORANT,
    tags::BLUE_COLORANT,
    tags::RED_TRC,
    tags::GREEN_TRC,
    tags::BLUE_TRC,
];

pub fn validate(profile: &Profile) -> Vec<Issue> {
    let _guard = tracing::trace_span!("Validate profile").entered();
    let mut issues = Vec::new();
    let header = &profile.header;

    if header.version.major() != 4 {
        issues.push(Issue::warning(
            None,
            format!("profile version {} is not ICC v4", header.version),
        ));
    }
    if header.illuminant != XyzNumber::D50 {
        issues.push(Issue::warning(
            None,
            format!("PCS illuminant {} is not D50", header.illuminant),
        ));
    }

    if !header.rendering_intent.is_known() {
        issues.push(Issue::error(
            None,
            format!(
                "rendering intent {} is not 0-3",
                header.rendering_intent.to_u32()
            ),
        ));
    }

    let mut seen = Vec::new();
    let mut duplicates = Vec::new();
    for tag in profile.tags() {
        if !seen.contains(&tag.signature) {
            seen.push(tag.signature);
        } else if !duplicates.contains(&tag.signature) {
            duplicates.push(tag.signature);
            issues.push(Issue::error(Some(tag.signature), "duplicate tag signature"));
        }
    }

    if header.device_class == DeviceClass::Display && header.color_space == DataColorSpace::Rgb {
        for sig in REQUIRED_DISPLAY_RGB {
            if !profile.contains(sig) {
                issues.push(Issue::error(
                    Some(sig),
                    "tag required by RGB display profiles is missing",
                ));
            }
        }
    }

    for tag in profile.tags() {
        let sig = tag.signature;
        if !is_known(sig) {
            issues.push(Issue::warning(Some(sig), "unknown tag signature"));
        }
        if tag.data.is_empty() {
            issues.push(Issue::error(Some(sig), "tag data is empty"));
            continue;
        }

        let decoded = match tag.decode() {
            Ok(decoded) => decoded,
            Err(e) => {
                issues.push(Issue::error(Some(sig), e.to_string()));
                continue;
            }
        };
        let type_sig = decoded.type_signature();
        if let Some(expected) = expected_types(sig) {
            if !expected.contains(&type_sig) {
                issues.push(Issue::error(
                    Some(sig),
                    format!("unexpected tag type {type_sig}"),
                ));
                continue;
            }
        }

        match (sig, &decoded) {
            (tags::CHROMATIC_ADAPTATION, TagData::S15Fixed16Array(values)) if values.len() != 9 => {
                issues.push(Issue::error(
                    Some(sig),
                    format!("chad must hold a 3x3 matrix, found {} values", values.len()),
                ));
            }
            (tags::DESCRIPTION | tags::COPYRIGHT, _) if type_sig != types::MULTI_LOCALIZED_UNICODE => {
                issues.push(Issue::warning(
                    Some(sig),
                    "ICC v4 expects multiLocalizedUnicodeType",
                ));
            }
            (_, TagData::Mhc2(mhc2)) => {
                if let Err(e) = mhc2.validate() {
                    issues.push(Issue::error(Some(sig), e.to_string()));
                }
            }
            _ => {}
        }
    }

    for issue in &issues {
        tracing::debug!(%issue);
    }
    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Mhc2, ProfileVersion, RenderingIntent, Tag};

    fn messages(issues: &[Issue]) -> Vec<String> {
        issues.iter().map(|i| i.to_string()).collect()
    }

    #[test]
    fn reference_is_clean() {
        let issues = validate(&Profile::default());
        assert!(issues.is_empty(), "{:?}", messages(&issues));
    }

    #[test]
    fn missing_and_empty() {
        let mut profile = Profile::default();
        profile.remove_tag(tags::GREEN_TRC).unwrap();
        profile.set_tag_data(tags::LUMINANCE, vec![]).unwrap();
        let issues = validate(&profile);
        assert_eq!(
            messages(&issues),
            [
                "error: [gTRC] tag required by RGB display profiles is missing",
                "error: [lumi] tag data is empty",
            ]
        );
    }

    #[test]
    fn type_checks() {
        let mut profile = Profile::default();
        profile
            .set_tag(tags::CHROMATIC_ADAPTATION, &TagData::S15Fixed16Array(vec![1.0; 6]))
            .unwrap();
        profile
            .set_tag(tags::RED_COLORANT, &TagData::Text("red".into()))
            .unwrap();
        profile
            .set_tag(tags::DESCRIPTION, &TagData::Text("desc".into()))
            .unwrap();
        profile
            .set_tag_data(tags::BLUE_COLORANT, b"XYZ \0\0\0\0\0".to_vec())
            .unwrap();

        let issues = validate(&profile);
        let errors: Vec<_> = issues.iter().filter(|i| i.is_error()).collect();
        assert_eq!(errors.len(), 3, "{:?}", messages(&issues));
        assert!(issues.iter().any(|i| i.signature == Some(tags::DESCRIPTION)
            && i.severity == Severity::Warning));
        assert!(errors.iter().any(|i| i.signature == Some(tags::RED_COLORANT)
            && i.message == "unexpected tag type text"));
    }

    #[test]
    fn mhc2_and_header() {
        let mut profile = Profile::default();
        // The encoder refuses min > peak, so patch the encoded minimum luminance.
        let mut data = Mhc2::identity(0.0, 100.0, 4).unwrap().encode().unwrap();
        data[12..16].copy_from_slice(&(200i32 << 16).to_be_bytes());
        assert_eq!(Mhc2::decode(tags::MHC2, &data).unwrap().min_luminance, 200.0);
        profile.set_tag_data(tags::MHC2, data).unwrap();

        profile.header.version = ProfileVersion::new(2, 1, 0);
        profile.header.illuminant = XyzNumber([0xf351, 0x10000, 0x116cc]);
        profile
            .add_tag(Tag::new(Signature::new(b"zzzz"), vec![0; 12]))
            .unwrap();

        let issues = validate(&profile);
        let errors: Vec<_> = issues.iter().filter(|i| i.is_error()).collect();
        assert_eq!(errors.len(), 1, "{:?}", messages(&issues));
        assert_eq!(errors[0].signature, Some(tags::MHC2));
        assert_eq!(issues.len(), 4, "{:?}", messages(&issues));
    }

    #[test]
    fn unknown_rendering_intent() {
        let mut profile = Profile::default();
        profile.header.rendering_intent = RenderingIntent::Other(7);
        let issues = validate(&profile);
        assert_eq!(messages(&issues), ["error: rendering intent 7 is not 0-3"]);
    }
}
