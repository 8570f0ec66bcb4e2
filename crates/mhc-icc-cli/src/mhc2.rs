use mhc_icc::signature::tags;
use mhc_icc::{CreationDate, Mhc2, TagData};

use crate::{commands::mhc2::*, Result};

const DEFAULT_PEAK_LUMINANCE: f64 = 80.0;

pub fn handle_mhc2(args: Mhc2Args) -> Result<()> {
    let _guard = tracing::trace_span!("Handle mhc2 subcommand").entered();

    let (_, mut profile) = crate::read_profile(&args.input)?;

    let existing = match profile.tag_data(tags::MHC2) {
        Ok(TagData::Mhc2(mhc2)) => Some(mhc2),
        Ok(_) => {
            tracing::warn!("MHC2 tag has an unexpected type, replacing it");
            None
        }
        Err(mhc_icc::Error::TagNotFound(_)) => None,
        Err(e) => {
            tracing::warn!("MHC2 tag is unreadable, replacing it: {e}");
            None
        }
    };
    let mut mhc2 = match existing {
        Some(mhc2) => mhc2,
        None => {
            tracing::info!("Starting from identity calibration");
            let min = args.min_luminance.unwrap_or(0.0);
            let peak = args.peak_luminance.unwrap_or(DEFAULT_PEAK_LUMINANCE).max(min);
            Mhc2::identity(min, peak, Mhc2::MIN_LUT_SIZE)?
        }
    };

    if let Some(matrix) = args.matrix {
        mhc2.matrix = matrix;
    }
    if let Some(lut_size) = args.lut_size {
        let gamma = args.lut_gamma.unwrap_or(1.0);
        mhc2.luts = Mhc2::with_gamma(0.0, 0.0, lut_size, gamma)?.luts;
    }
    if let Some(min_luminance) = args.min_luminance {
        mhc2.min_luminance = min_luminance;
    }
    if let Some(peak_luminance) = args.peak_luminance {
        mhc2.peak_luminance = peak_luminance;
    }
    mhc2.validate()?;
    tracing::debug!(%mhc2, "New calibration");

    profile.set_tag(tags::MHC2, &TagData::Mhc2(mhc2))?;

    let date = if args.keep_date {
        CreationDate::Keep
    } else {
        CreationDate::Now
    };
    let bytes = profile.encode(date)?;
    let output = args.output.as_deref().unwrap_or(&args.input);
    crate::write_profile(output, &bytes)
}
