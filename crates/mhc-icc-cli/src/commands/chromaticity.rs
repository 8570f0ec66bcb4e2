use mhc_icc::colorimetry::{
    ILLUMINANT_D50, ILLUMINANT_D65, PRIMARIES_BT2100, PRIMARIES_P3, PRIMARIES_SRGB,
};

use super::SpecParseError;

fn parse_floats<const N: usize>(val: &str, what: &str) -> Result<[f64; N], SpecParseError> {
    let values = val
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| format!("`{s}` is not a number"))
        })
        .collect::<Result<Vec<_>, _>>()?;
    values
        .try_into()
        .map_err(|values: Vec<f64>| format!("{what} needs {N} values, got {}", values.len()).into())
}

/// Parses chromaticities of the primaries, either a preset or `rx,ry,gx,gy,bx,by`.
pub fn parse_primaries(val: &str) -> Result<[[f64; 2]; 3], SpecParseError> {
    Ok(match &*val.to_ascii_lowercase() {
        "srgb" | "bt709" | "rec709" => PRIMARIES_SRGB,
        "p3" | "display_p3" | "dci_p3" => PRIMARIES_P3,
        "bt2100" | "bt2020" | "rec2020" | "rec2100" => PRIMARIES_BT2100,
        _ => {
            let [rx, ry, gx, gy, bx, by] = parse_floats::<6>(val, "primaries")?;
            [[rx, ry], [gx, gy], [bx, by]]
        }
    })
}

/// Parses a white point, either `d65`, `d50` or `x,y`.
pub fn parse_white_point(val: &str) -> Result<[f64; 2], SpecParseError> {
    Ok(match &*val.to_ascii_lowercase() {
        "d65" => ILLUMINANT_D65,
        "d50" => ILLUMINANT_D50,
        _ => {
            let wp = parse_floats::<2>(val, "white point")?;
            if wp[1] <= 0.0 {
                return Err("white point y must be positive".into());
            }
            wp
        }
    })
}

/// Parses a row-major 3x4 matrix of twelve values.
pub fn parse_matrix(val: &str) -> Result<[[f64; 4]; 3], SpecParseError> {
    let v = parse_floats::<12>(val, "matrix")?;
    Ok([
        [v[0], v[1], v[2], v[3]],
        [v[4], v[5], v[6], v[7]],
        [v[8], v[9], v[10], v[11]],
    ])
}
