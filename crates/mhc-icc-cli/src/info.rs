use mhc_icc::{HeaderField, TagEntry};

use crate::{commands::info::*, Error, Result};

#[derive(Debug, serde::Serialize)]
struct Report {
    size: usize,
    header: Vec<HeaderReport>,
    tags: Vec<TagReport>,
    /// `None` if the profile has no ID.
    profile_id_valid: Option<bool>,
}

#[derive(Debug, serde::Serialize)]
struct HeaderReport {
    key: &'static str,
    label: &'static str,
    value: String,
    hex: String,
}

#[derive(Debug, serde::Serialize)]
struct TagReport {
    signature: String,
    description: &'static str,
    offset: u32,
    size: u32,
    shared_with: Option<String>,
    summary: String,
}

pub fn handle_info(args: InfoArgs) -> Result<()> {
    let _guard = tracing::trace_span!("Handle info subcommand").entered();

    let (bytes, profile) = crate::read_profile(&args.input)?;
    let entries = mhc_icc::read_tag_table(&bytes)?;

    let header = HeaderField::ALL
        .into_iter()
        .map(|field| HeaderReport {
            key: field.key(),
            label: field.label(),
            value: profile.header.field_text(field),
            hex: profile.header.field_hex(field),
        })
        .collect();
    let tags = entries
        .iter()
        .zip(profile.tags())
        .map(|(entry, tag)| tag_report(entry, tag))
        .collect();
    let report = Report {
        size: bytes.len(),
        header,
        tags,
        profile_id_valid: mhc_icc::verify_profile_id(&bytes),
    };

    if args.json {
        let json = serde_json::to_string_pretty(&report).map_err(Error::Json)?;
        println!("{json}");
    } else {
        print_report(&report);
    }
    Ok(())
}

fn tag_report(entry: &TagEntry, tag: &mhc_icc::Tag) -> TagReport {
    let summary = match tag.decode() {
        Ok(data) => data.summary(),
        Err(e) => {
            tracing::debug!(signature = %tag.signature, "Failed to decode tag: {e}");
            format!("<{e}>")
        }
    };
    TagReport {
        signature: entry.signature.to_string(),
        description: tag.description(),
        offset: entry.offset,
        size: entry.size,
        shared_with: entry.shared_with.map(|sig| sig.to_string()),
        summary,
    }
}

fn print_report(report: &Report) {
    println!("ICC profile ({} bytes)", report.size);
    println!("  Header:");
    for field in &report.header {
        println!("    {:<22} {}", field.label, field.value);
    }

    println!("  Tags ({}):", report.tags.len());
    for (idx, tag) in report.tags.iter().enumerate() {
        print!(
            "    {idx:>3}  {:<4}  offset {:>6}  size {:>6}  {}",
            tag.signature, tag.offset, tag.size, tag.description
        );
        if let Some(shared) = &tag.shared_with {
            print!(" (shares data with {shared})");
        }
        println!();
        println!("               {}", tag.summary);
    }

    match report.profile_id_valid {
        Some(true) => println!("  Profile ID matches"),
        Some(false) => println!("  Profile ID mismatch"),
        None => println!("  No profile ID"),
    }
}
