use mhc_icc::hexview;

use crate::{commands::dump::*, Result};

pub fn handle_dump(args: DumpArgs) -> Result<()> {
    let _guard = tracing::trace_span!("Handle dump subcommand").entered();

    let (_, profile) = crate::read_profile(&args.input)?;
    let tag = profile
        .tag(args.tag)
        .ok_or(mhc_icc::Error::TagNotFound(args.tag))?;
    tracing::debug!(signature = %tag.signature, size = tag.data.len(), "Dumping tag");

    if args.raw {
        println!("{}", hexview::to_hex(&tag.data));
    } else {
        println!("{}", hexview::hex_view_header());
        println!("{}", hexview::format_hex_view(&tag.data));
    }
    Ok(())
}
