use mhc_icc::Signature;

use crate::{commands::tags::*, Result};

pub fn handle_tags(args: TagsArgs) -> Result<()> {
    let _guard = tracing::trace_span!("Handle tags subcommand").entered();

    let exclude = match &args.exclude_from {
        Some(path) => {
            let (_, profile) = crate::read_profile(path)?;
            profile
                .tags()
                .iter()
                .map(|tag| tag.signature)
                .collect::<Vec<Signature>>()
        }
        None => Vec::new(),
    };

    let found = mhc_icc::tag::search(args.query.as_deref().unwrap_or(""), &exclude);
    for (signature, description) in &found {
        println!("{signature}  {description}");
    }
    tracing::debug!(count = found.len(), "Tag search done");
    Ok(())
}
