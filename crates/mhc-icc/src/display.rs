use crate::colorimetry::{
    adapted_colorants, ILLUMINANT_D50, ILLUMINANT_D65, PCS_D50_XYZ, PRIMARIES_SRGB,
};
use crate::signature::tags;
use crate::types::LocalizedString;
use crate::{Curve, Error, Mhc2, Profile, ProfileHeader, Result, Tag, TagData, XyzNumber};

/// Parameters of a matrix/TRC display profile carrying an `MHC2` tag.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayProfile {
    pub description: String,
    pub copyright: String,
    /// Chromaticities of the red, green and blue primaries.
    pub primaries: [[f64; 2]; 3],
    pub white_point: [f64; 2],
    pub tone_curve: Curve,
    /// Minimum luminance in nits.
    pub min_luminance: f64,
    /// Peak luminance in nits.
    pub peak_luminance: f64,
    /// Defaults to an identity calibration spanning the luminance range.
    pub mhc2: Option<Mhc2>,
}

impl Default for DisplayProfile {
    fn default() -> Self {
        Self {
            description: "MHC2 Display Profile".to_owned(),
            copyright: "No copyright, use freely".to_owned(),
            primaries: PRIMARIES_SRGB,
            white_point: ILLUMINANT_D65,
            tone_curve: Curve::Gamma(2.2),
            min_luminance: 0.0,
            peak_luminance: 80.0,
            mhc2: None,
        }
    }
}

impl DisplayProfile {
    /// Builds the profile with tags in the order Windows display profiles use.
    pub fn build(&self) -> Result<Profile> {
        let _guard = tracing::trace_span!("Build display profile").entered();

        let adapted = adapted_colorants(self.primaries, self.white_point).ok_or_else(|| {
            Error::invalid_tag_data(
                tags::RED_COLORANT,
                "primaries and white point do not form a valid RGB space",
            )
        })?;
        tracing::debug!(colorants = ?adapted.colorants, chad = ?adapted.chad);

        let mhc2 = match &self.mhc2 {
            Some(mhc2) => mhc2.clone(),
            None => Mhc2::identity(self.min_luminance, self.peak_luminance, 2)?,
        };
        mhc2.validate()?;

        let xyz = |v: [f64; 3]| -> Result<TagData> { Ok(TagData::Xyz(vec![XyzNumber::from_f64(v)?])) };
        let trc = TagData::Curve(self.tone_curve.clone());
        let [red, green, blue] = adapted.colorants;
        let d65_adapted = self.white_point != ILLUMINANT_D50;

        let tag_data = [
            (
                tags::COPYRIGHT,
                TagData::MultiLocalizedUnicode(vec![LocalizedString::en_us(&self.copyright)]),
            ),
            (tags::RED_TRC, trc.clone()),
            (tags::GREEN_TRC, trc.clone()),
            (tags::BLUE_TRC, trc),
            (
                tags::CHROMATIC_ADAPTATION,
                TagData::S15Fixed16Array(adapted.chad.to_vec()),
            ),
            (tags::RED_COLORANT, xyz(red)?),
            (tags::GREEN_COLORANT, xyz(green)?),
            (tags::BLUE_COLORANT, xyz(blue)?),
            (tags::MEDIA_WHITE_POINT, xyz(PCS_D50_XYZ)?),
            (
                tags::MS_COLOR_ADAPTATION,
                TagData::Text(format!(
                    "{{'Appversion':'1.0.152.0','D65Adapted':{}}}",
                    if d65_adapted { "True" } else { "False" }
                )),
            ),
            (tags::LUMINANCE, xyz([self.peak_luminance; 3])?),
            (tags::MHC2, TagData::Mhc2(mhc2)),
            (
                tags::DESCRIPTION,
                TagData::MultiLocalizedUnicode(vec![LocalizedString::en_us(&self.description)]),
            ),
        ];

        let mut profile = Profile::new(ProfileHeader::default());
        for (signature, data) in &tag_data {
            profile.add_tag(Tag::from_data(*signature, data)?)?;
        }
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colorimetry::PRIMARIES_P3;

    fn xyz_of(profile: &Profile, sig: crate::Signature) -> [f64; 3] {
        let TagData::Xyz(values) = profile.tag_data(sig).unwrap() else {
            panic!("{sig} is not XYZ");
        };
        values[0].to_f64()
    }

    #[test]
    fn srgb_display() {
        let profile = DisplayProfile::default().build().unwrap();
        assert_eq!(profile.tags().len(), 13);

        let red = xyz_of(&profile, tags::RED_COLORANT);
        assert!((red[0] - 0.43604).abs() < 1e-4);
        assert!((red[1] - 0.22248).abs() < 1e-4);

        let white = xyz_of(&profile, tags::MEDIA_WHITE_POINT);
        assert_eq!(white, [0.964202880859375, 1.0, 0.8249053955078125]);

        let TagData::S15Fixed16Array(chad) = profile.tag_data(tags::CHROMATIC_ADAPTATION).unwrap()
        else {
            panic!();
        };
        assert_eq!(chad.len(), 9);
        assert!((chad[0] - 1.04789).abs() < 1e-4);

        let TagData::Mhc2(mhc2) = profile.tag_data(tags::MHC2).unwrap() else {
            panic!();
        };
        assert_eq!(mhc2.peak_luminance, 80.0);

        assert_eq!(
            profile.tag_data(tags::MS_COLOR_ADAPTATION).unwrap(),
            TagData::Text("{'Appversion':'1.0.152.0','D65Adapted':True}".into())
        );
    }

    #[test]
    fn trc_is_shared() {
        let profile = DisplayProfile {
            primaries: PRIMARIES_P3,
            peak_luminance: 500.0,
            ..Default::default()
        }
        .build()
        .unwrap();
        let layout = profile.layout().unwrap();
        assert_eq!(layout.entries[1].offset, layout.entries[3].offset);
        assert_eq!(layout.entries[3].shared_with, Some(tags::RED_TRC));
    }

    #[test]
    fn invalid_parameters() {
        let degenerate = DisplayProfile {
            primaries: [[0.3, 0.3]; 3],
            ..Default::default()
        };
        assert!(degenerate.build().is_err());

        let inverted = DisplayProfile {
            min_luminance: 100.0,
            peak_luminance: 10.0,
            ..Default::default()
        };
        assert!(inverted.build().is_err());
    }
}
