//! CIE XYZ helpers used to synthesize matrix/TRC display profiles.
//!
//! Chromaticities are in xy coordinates; matrices are row-major 3x3.

const MAT_BRADFORD: [f64; 9] = [
    0.8951, 0.2664, -0.1614, -0.7502, 1.7135, 0.0367, 0.0389, -0.0685, 1.0296,
];

/// CIE illuminant D50.
pub const ILLUMINANT_D50: [f64; 2] = [0.3457, 0.3585];

/// CIE illuminant D65.
pub const ILLUMINANT_D65: [f64; 2] = [0.3127, 0.329];

/// PCS illuminant D50 in XYZ, as fixed by ICC.1.
pub const PCS_D50_XYZ: [f64; 3] = [0.9642, 1.0, 0.8249];

/// Primaries used by the sRGB colorspace.
pub const PRIMARIES_SRGB: [[f64; 2]; 3] = [[0.64, 0.33], [0.30, 0.60], [0.15, 0.06]];

/// Primaries specified in SMPTE ST 428-1.
pub const PRIMARIES_P3: [[f64; 2]; 3] = [[0.680, 0.320], [0.265, 0.690], [0.150, 0.060]];

/// Primaries specified in ITU-R BT.2100-2.
pub const PRIMARIES_BT2100: [[f64; 2]; 3] = [[0.708, 0.292], [0.170, 0.797], [0.131, 0.046]];

#[inline]
pub fn matmul3(a: &[f64; 9], b: &[f64; 9]) -> [f64; 9] {
    std::array::from_fn(|idx| {
        let (row, col) = (idx / 3, idx % 3);
        a[row * 3] * b[col] + a[row * 3 + 1] * b[3 + col] + a[row * 3 + 2] * b[6 + col]
    })
}

#[inline]
pub fn matmul3vec(a: &[f64; 9], b: &[f64; 3]) -> [f64; 3] {
    [
        a[0] * b[0] + a[1] * b[1] + a[2] * b[2],
        a[3] * b[0] + a[4] * b[1] + a[5] * b[2],
        a[6] * b[0] + a[7] * b[1] + a[8] * b[2],
    ]
}

/// Inverts a 3x3 matrix; `None` if it is singular.
pub fn matinv(mat: &[f64; 9]) -> Option<[f64; 9]> {
    let det = mat[0] * (mat[4] * mat[8] - mat[5] * mat[7])
        + mat[1] * (mat[5] * mat[6] - mat[3] * mat[8])
        + mat[2] * (mat[3] * mat[7] - mat[4] * mat[6]);
    if det.abs() < 1e-12 || !det.is_finite() {
        return None;
    }
    Some([
        (mat[4] * mat[8] - mat[5] * mat[7]) / det,
        (mat[7] * mat[2] - mat[8] * mat[1]) / det,
        (mat[1] * mat[5] - mat[2] * mat[4]) / det,
        (mat[5] * mat[6] - mat[3] * mat[8]) / det,
        (mat[8] * mat[0] - mat[6] * mat[2]) / det,
        (mat[2] * mat[3] - mat[0] * mat[5]) / det,
        (mat[3] * mat[7] - mat[4] * mat[6]) / det,
        (mat[6] * mat[1] - mat[7] * mat[0]) / det,
        (mat[0] * mat[4] - mat[1] * mat[3]) / det,
    ])
}

#[inline]
pub fn illuminant_to_xyz([x, y]: [f64; 2]) -> [f64; 3] {
    [x / y, 1.0, (1.0 - x) / y - 1.0]
}

/// Bradford chromatic adaptation from one white (XYZ, Y = 1) to another.
pub fn adapt_mat(from_white: [f64; 3], to_white: [f64; 3]) -> Option<[f64; 9]> {
    let from_lms = matmul3vec(&MAT_BRADFORD, &from_white);
    let to_lms = matmul3vec(&MAT_BRADFORD, &to_white);
    if from_lms.iter().any(|&v| v.abs() < 1e-12) {
        return None;
    }

    let mul = [
        to_lms[0] / from_lms[0],
        to_lms[1] / from_lms[1],
        to_lms[2] / from_lms[2],
    ];
    let multiplied = std::array::from_fn(|idx| MAT_BRADFORD[idx] * mul[idx / 3]);
    Some(matmul3(&matinv(&MAT_BRADFORD)?, &multiplied))
}

/// RGB to XYZ matrix of the given primaries, normalized so that RGB (1, 1, 1) maps to `wp`.
pub fn primaries_to_xyz_mat(primaries: [[f64; 2]; 3], wp: [f64; 2]) -> Option<[f64; 9]> {
    let mut primaries = [
        primaries[0][0],
        primaries[1][0],
        primaries[2][0],
        primaries[0][1],
        primaries[1][1],
        primaries[2][1],
        (1.0 - primaries[0][0] - primaries[0][1]),
        (1.0 - primaries[1][0] - primaries[1][1]),
        (1.0 - primaries[2][0] - primaries[2][1]),
    ];
    let primaries_inv = matinv(&primaries)?;

    let w_xyz = illuminant_to_xyz(wp);
    let mul = matmul3vec(&primaries_inv, &w_xyz);

    for (idx, p) in primaries.iter_mut().enumerate() {
        *p *= mul[idx % 3];
    }
    Some(primaries)
}

/// Colorants of a matrix/TRC profile, adapted to the PCS white.
#[derive(Debug, Clone, PartialEq)]
pub struct AdaptedColorants {
    /// Rows are `rXYZ`, `gXYZ` and `bXYZ`.
    pub colorants: [[f64; 3]; 3],
    /// Contents of the `chad` tag.
    pub chad: [f64; 9],
}

pub fn adapted_colorants(primaries: [[f64; 2]; 3], wp: [f64; 2]) -> Option<AdaptedColorants> {
    let chad = adapt_mat(illuminant_to_xyz(wp), PCS_D50_XYZ)?;
    let rgb_to_xyz = primaries_to_xyz_mat(primaries, wp)?;
    let adapted = matmul3(&chad, &rgb_to_xyz);
    let colorants = std::array::from_fn(|c| [adapted[c], adapted[3 + c], adapted[6 + c]]);
    Some(AdaptedColorants { colorants, chad })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: &[f64], b: &[f64], eps: f64) {
        for (x, y) in a.iter().zip(b) {
            assert!((x - y).abs() < eps, "{a:?} != {b:?}");
        }
    }

    #[test]
    fn bradford_d65_to_d50() {
        let chad = adapt_mat(illuminant_to_xyz(ILLUMINANT_D65), PCS_D50_XYZ).unwrap();
        assert_close(
            &chad,
            &[
                1.04789, 0.02292, -0.05022, 0.02958, 0.99048, -0.01708, -0.00925, 0.01507,
                0.75168,
            ],
            1e-4,
        );
    }

    #[test]
    fn srgb_colorants() {
        let AdaptedColorants { colorants, .. } =
            adapted_colorants(PRIMARIES_SRGB, ILLUMINANT_D65).unwrap();
        assert_close(&colorants[0], &[0.43604, 0.22248, 0.01392], 1e-4);
        assert_close(&colorants[1], &[0.38511, 0.71691, 0.09707], 1e-4);
        assert_close(&colorants[2], &[0.14305, 0.06061, 0.71391], 1e-4);

        let white: Vec<f64> = (0..3)
            .map(|i| colorants.iter().map(|c| c[i]).sum())
            .collect();
        assert_close(&white, &PCS_D50_XYZ, 1e-9);
    }

    #[test]
    fn singular() {
        assert!(matinv(&[1.0, 2.0, 3.0, 2.0, 4.0, 6.0, 0.0, 0.0, 1.0]).is_none());
        let degenerate = [[0.3, 0.3], [0.3, 0.3], [0.3, 0.3]];
        assert!(primaries_to_xyz_mat(degenerate, ILLUMINANT_D65).is_none());
    }
}
