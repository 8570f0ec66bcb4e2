use std::path::PathBuf;

use clap::Parser;

use super::{parse_primaries, parse_white_point};

/// Creates a matrix/TRC display profile with an `MHC2` tag.
#[derive(Debug, Parser)]
#[non_exhaustive]
pub struct NewArgs {
    /// Output file
    #[arg(short, long)]
    pub output: PathBuf,
    /// Profile description
    #[arg(long)]
    pub description: Option<String>,
    /// Copyright text
    #[arg(long)]
    pub copyright: Option<String>,
    /// Chromaticities of the primaries: `srgb`, `p3`, `bt2100` or `rx,ry,gx,gy,bx,by`
    #[arg(long, value_parser = parse_primaries)]
    pub primaries: Option<[[f64; 2]; 3]>,
    /// White point: `d65`, `d50` or `x,y`
    #[arg(long, value_parser = parse_white_point)]
    pub white_point: Option<[f64; 2]>,
    /// Gamma of the tone response curves
    #[arg(long, default_value_t = 2.2)]
    pub gamma: f64,
    /// Minimum luminance in nits
    #[arg(long, default_value_t = 0.0)]
    pub min_luminance: f64,
    /// Peak luminance in nits
    #[arg(long, default_value_t = 80.0)]
    pub peak_luminance: f64,
    /// Number of entries of each MHC2 LUT
    #[arg(long, default_value_t = 2)]
    pub lut_size: usize,
}
