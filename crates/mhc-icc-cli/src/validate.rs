use crate::{commands::validate::*, Error, Result};

pub fn handle_validate(args: ValidateArgs) -> Result<()> {
    let _guard = tracing::trace_span!("Handle validate subcommand").entered();

    let (bytes, profile) = crate::read_profile(&args.input)?;
    let mut issues = mhc_icc::validate(&profile);
    if mhc_icc::verify_profile_id(&bytes) == Some(false) {
        issues.push(mhc_icc::Issue {
            severity: mhc_icc::Severity::Warning,
            signature: None,
            message: "stored profile ID doesn't match the MD5 of the profile".into(),
        });
    }

    for issue in &issues {
        println!("{issue}");
    }
    let errors = issues.iter().filter(|issue| issue.is_error()).count();
    let warnings = issues.len() - errors;
    println!("{errors} error(s), {warnings} warning(s)");

    if errors > 0 {
        return Err(Error::Validation { errors });
    }
    Ok(())
}
