//! Reading, editing and writing ICC v4 display profiles with the Windows `MHC2` tag.
pub mod colorimetry;
mod display;
mod error;
pub mod fixed;
pub mod header;
pub mod hexview;
mod mhc2;
mod profile;
pub mod signature;
pub mod tag;
pub mod types;
pub mod validate;

pub use display::DisplayProfile;
pub use error::*;
pub use header::{HeaderField, ProfileHeader, ProfileVersion, RenderingIntent, XyzNumber};
pub use mhc2::{gamma_lut, Mhc2};
pub use profile::*;
pub use signature::Signature;
pub use tag::Tag;
pub use types::{Curve, LocalizedString, ParametricCurve, TagData};
pub use validate::{validate, Issue, Severity};
