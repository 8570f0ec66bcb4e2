use mhc_icc::{CreationDate, Curve, DisplayProfile, Mhc2};

use crate::{commands::new::*, Result};

pub fn handle_new(args: NewArgs) -> Result<()> {
    let _guard = tracing::trace_span!("Handle new subcommand").entered();

    let mut params = DisplayProfile::default();
    if let Some(description) = args.description {
        params.description = description;
    }
    if let Some(copyright) = args.copyright {
        params.copyright = copyright;
    }
    if let Some(primaries) = args.primaries {
        params.primaries = primaries;
    }
    if let Some(white_point) = args.white_point {
        params.white_point = white_point;
    }
    params.tone_curve = Curve::Gamma(args.gamma);
    params.min_luminance = args.min_luminance;
    params.peak_luminance = args.peak_luminance;
    params.mhc2 = Some(Mhc2::identity(
        args.min_luminance,
        args.peak_luminance,
        args.lut_size,
    )?);

    let mut profile = params.build()?;
    let bytes = profile.encode(CreationDate::Now)?;
    crate::write_profile(&args.output, &bytes)
}
