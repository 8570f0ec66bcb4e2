use std::path::PathBuf;

use clap::Parser;

use super::parse_matrix;

/// Replaces the `MHC2` calibration of a profile.
///
/// Values not given are taken from the existing tag, or from an identity calibration if the
/// profile has no readable one.
#[derive(Debug, Parser)]
#[non_exhaustive]
pub struct Mhc2Args {
    /// Input file
    pub input: PathBuf,
    /// Output file; overwrites input if omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Row-major 3x4 color matrix, twelve numbers
    #[arg(long, value_parser = parse_matrix, allow_hyphen_values = true)]
    pub matrix: Option<[[f64; 4]; 3]>,
    /// Regenerate LUTs with this many entries
    #[arg(long)]
    pub lut_size: Option<usize>,
    /// Gamma of regenerated LUTs
    #[arg(long, requires = "lut_size")]
    pub lut_gamma: Option<f64>,
    /// Minimum luminance in nits
    #[arg(long)]
    pub min_luminance: Option<f64>,
    /// Peak luminance in nits
    #[arg(long)]
    pub peak_luminance: Option<f64>,
    /// Keep the creation date of the input
    #[arg(long)]
    pub keep_date: bool,
}
