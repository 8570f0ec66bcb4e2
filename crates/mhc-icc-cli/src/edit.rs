use mhc_icc::{CreationDate, Tag};

use crate::{commands::edit::*, Result};

pub fn handle_edit(args: EditArgs) -> Result<()> {
    let _guard = tracing::trace_span!("Handle edit subcommand").entered();

    let (_, mut profile) = crate::read_profile(&args.input)?;

    for spec in &args.header {
        spec.apply(&mut profile.header)?;
    }
    for spec in &args.header_hex {
        spec.apply_hex(&mut profile.header)?;
    }
    for &signature in &args.remove {
        profile.remove_tag(signature)?;
    }
    for assignment in &args.add {
        let data = assignment.read_data()?;
        profile.add_tag(Tag::new(assignment.signature, data))?;
    }
    for assignment in &args.set {
        let data = assignment.read_data()?;
        tracing::debug!(signature = %assignment.signature, size = data.len(), "Replacing tag data");
        profile.set_tag_data(assignment.signature, data)?;
    }
    for mv in &args.moves {
        if !profile.move_tag(mv.signature, mv.delta)? {
            tracing::warn!(signature = %mv.signature, delta = mv.delta, "Move out of range, ignoring");
        }
    }

    let date = if args.keep_date {
        CreationDate::Keep
    } else {
        CreationDate::Now
    };
    let bytes = profile.encode(date)?;
    let output = args.output.as_deref().unwrap_or(&args.input);
    crate::write_profile(output, &bytes)
}
