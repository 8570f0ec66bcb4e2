use std::path::Path;

pub mod commands;
pub mod dump;
pub mod edit;
pub mod error;
pub mod info;
pub mod mhc2;
pub mod new;
pub mod tags;
pub mod validate;

pub use commands::{Args, Subcommands};
pub use error::Error;

type Result<T> = std::result::Result<T, Error>;

fn read_profile(path: &Path) -> Result<(Vec<u8>, mhc_icc::Profile)> {
    let bytes = std::fs::read(path).map_err(Error::ReadProfile)?;
    let profile = mhc_icc::Profile::parse(&bytes)?;
    tracing::debug!(path = %path.display(), size = bytes.len(), tags = profile.tags().len(), "Loaded profile");
    Ok((bytes, profile))
}

fn write_profile(path: &Path, bytes: &[u8]) -> Result<()> {
    std::fs::write(path, bytes).map_err(Error::WriteProfile)?;
    tracing::info!(path = %path.display(), size = bytes.len(), "Profile saved");
    Ok(())
}
