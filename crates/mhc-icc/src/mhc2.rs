//! `MHC2` tag used by the Windows advanced color pipeline.
use crate::fixed::{from_s15_fixed16, read_i32, read_u32, round_to_s15_fixed16, to_s15_fixed16};
use crate::signature::types;
use crate::types::type_header;
use crate::{Error, Result, Signature};

const MATRIX_OFFSET: usize = 36;
const MATRIX_LEN: usize = 48;
const LUT_HEADER_LEN: usize = 8;

/// Calibration matrix and per-channel lookup tables.
///
/// The matrix is 3x4, row-major; the fourth column is an offset. Each LUT
/// maps normalized input to normalized output and holds between
/// [`Mhc2::MIN_LUT_SIZE`] and [`Mhc2::MAX_LUT_SIZE`] entries.
#[derive(Debug, Clone, PartialEq)]
pub struct Mhc2 {
    /// Minimum luminance in nits.
    pub min_luminance: f64,
    /// Peak luminance in nits.
    pub peak_luminance: f64,
    pub matrix: [[f64; 4]; 3],
    /// Red, green and blue LUTs.
    pub luts: [Vec<f64>; 3],
}

impl Mhc2 {
    pub const MIN_LUT_SIZE: usize = 2;
    pub const MAX_LUT_SIZE: usize = 4096;

    pub const IDENTITY_MATRIX: [[f64; 4]; 3] = [
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
    ];

    /// Identity matrix with linear LUTs of `lut_size` entries.
    pub fn identity(min_luminance: f64, peak_luminance: f64, lut_size: usize) -> Result<Self> {
        Self::with_gamma(min_luminance, peak_luminance, lut_size, 1.0)
    }

    /// Identity matrix with LUTs following `x^gamma`.
    pub fn with_gamma(
        min_luminance: f64,
        peak_luminance: f64,
        lut_size: usize,
        gamma: f64,
    ) -> Result<Self> {
        if !gamma.is_finite() || gamma <= 0.0 {
            return Err(Error::ValueOutOfRange {
                what: "LUT gamma",
                value: gamma,
            });
        }
        check_lut_size(lut_size)?;
        let lut = gamma_lut(lut_size, gamma);
        let ret = Self {
            min_luminance,
            peak_luminance,
            matrix: Self::IDENTITY_MATRIX,
            luts: [lut.clone(), lut.clone(), lut],
        };
        ret.validate()?;
        Ok(ret)
    }

    #[inline]
    pub fn lut_size(&self) -> usize {
        self.luts[0].len()
    }

    /// Checks the invariants the encoder relies on.
    pub fn validate(&self) -> Result<()> {
        let n = self.lut_size();
        check_lut_size(n)?;
        if self.luts.iter().any(|lut| lut.len() != n) {
            return Err(Error::invalid_tag_data(
                types::MHC2,
                "LUTs must have the same number of entries",
            ));
        }

        for (what, value) in [
            ("minimum luminance", self.min_luminance),
            ("peak luminance", self.peak_luminance),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::ValueOutOfRange { what, value });
            }
        }
        if self.min_luminance > self.peak_luminance {
            return Err(Error::invalid_tag_data(
                types::MHC2,
                format!(
                    "minimum luminance {} exceeds peak luminance {}",
                    self.min_luminance, self.peak_luminance
                ),
            ));
        }

        let values = self.matrix.iter().flatten().chain(self.luts.iter().flatten());
        for &value in values {
            to_s15_fixed16(value)?;
        }
        Ok(())
    }

    /// Evaluates a LUT at normalized input `x` with linear interpolation.
    ///
    /// `x` is clamped to `[0, 1]`.
    pub fn eval_lut(&self, channel: usize, x: f64) -> f64 {
        let lut = &self.luts[channel];
        let Some(last) = lut.len().checked_sub(1) else {
            return x;
        };
        if last == 0 {
            return lut[0];
        }

        let pos = x.clamp(0.0, 1.0) * last as f64;
        let idx = (pos.floor() as usize).min(last - 1);
        let frac = pos - idx as f64;
        lut[idx] + (lut[idx + 1] - lut[idx]) * frac
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        self.validate()?;
        let n = self.lut_size();
        let lut_len = LUT_HEADER_LEN + 4 * n;
        let lut_base = MATRIX_OFFSET + MATRIX_LEN;

        let mut out = type_header(types::MHC2);
        out.extend_from_slice(&(n as u32).to_be_bytes());
        out.extend_from_slice(&to_s15_fixed16(self.min_luminance)?.to_be_bytes());
        out.extend_from_slice(&to_s15_fixed16(self.peak_luminance)?.to_be_bytes());
        out.extend_from_slice(&(MATRIX_OFFSET as u32).to_be_bytes());
        for c in 0..3 {
            out.extend_from_slice(&((lut_base + c * lut_len) as u32).to_be_bytes());
        }
        debug_assert_eq!(out.len(), MATRIX_OFFSET);

        for &value in self.matrix.iter().flatten() {
            out.extend_from_slice(&to_s15_fixed16(value)?.to_be_bytes());
        }
        for lut in &self.luts {
            out.extend_from_slice(&crate::types::encode_sf32(lut)?);
        }
        Ok(out)
    }

    /// Decodes the tag, following the stored block offsets.
    pub fn decode(tag: Signature, data: &[u8]) -> Result<Self> {
        let err = |reason: String| Error::invalid_tag_data(tag, reason);
        let field = |offset: usize| {
            read_u32(data, offset)
                .ok_or_else(|| err(format!("MHC2 is truncated at offset {offset}")))
        };

        let n = field(8)? as usize;
        if !(Self::MIN_LUT_SIZE..=Self::MAX_LUT_SIZE).contains(&n) {
            return Err(err(format!("MHC2 LUT size {n} is out of range")));
        }
        let min_luminance = from_s15_fixed16(field(12)? as i32);
        let peak_luminance = from_s15_fixed16(field(16)? as i32);
        let matrix_offset = field(20)? as usize;
        let lut_offsets = [field(24)? as usize, field(28)? as usize, field(32)? as usize];

        let matrix_end = matrix_offset.checked_add(MATRIX_LEN);
        if matrix_end.is_none_or(|end| end > data.len()) {
            return Err(err(format!(
                "MHC2 matrix at offset {matrix_offset} exceeds tag size {}",
                data.len()
            )));
        }
        let mut matrix = [[0.0; 4]; 3];
        for (idx, value) in matrix.iter_mut().flatten().enumerate() {
            let raw = read_i32(data, matrix_offset + idx * 4)
                .ok_or_else(|| err("MHC2 matrix is truncated".into()))?;
            *value = from_s15_fixed16(raw);
        }

        let mut luts: [Vec<f64>; 3] = Default::default();
        for (lut, offset) in luts.iter_mut().zip(lut_offsets) {
            let end = offset.checked_add(LUT_HEADER_LEN + 4 * n);
            if end.is_none_or(|end| end > data.len()) {
                return Err(err(format!(
                    "MHC2 LUT at offset {offset} exceeds tag size {}",
                    data.len()
                )));
            }
            if data[offset..offset + 4] != *types::S15_FIXED16_ARRAY.as_bytes() {
                return Err(err(format!("MHC2 LUT at offset {offset} is not sf32")));
            }
            *lut = (0..n)
                .filter_map(|idx| read_i32(data, offset + LUT_HEADER_LEN + idx * 4))
                .map(from_s15_fixed16)
                .collect();
        }

        tracing::trace!(n, min_luminance, peak_luminance, "Decoded MHC2");
        Ok(Self {
            min_luminance,
            peak_luminance,
            matrix,
            luts,
        })
    }
}

impl std::fmt::Display for Mhc2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MHC2 {}-{} nits, LUT size {}, matrix [",
            self.min_luminance,
            self.peak_luminance,
            self.lut_size()
        )?;
        for (idx, row) in self.matrix.iter().enumerate() {
            if idx > 0 {
                write!(f, "; ")?;
            }
            write!(
                f,
                "{:.5} {:.5} {:.5} {:.5}",
                row[0], row[1], row[2], row[3]
            )?;
        }
        write!(f, "]")
    }
}

fn check_lut_size(n: usize) -> Result<()> {
    if !(Mhc2::MIN_LUT_SIZE..=Mhc2::MAX_LUT_SIZE).contains(&n) {
        return Err(Error::ValueOutOfRange {
            what: "MHC2 LUT size",
            value: n as f64,
        });
    }
    Ok(())
}

/// `n` samples of `x^gamma` over `[0, 1]`, rounded to what the tag stores.
pub fn gamma_lut(n: usize, gamma: f64) -> Vec<f64> {
    let last = n.saturating_sub(1).max(1) as f64;
    (0..n)
        .map(|idx| round_to_s15_fixed16((idx as f64 / last).powf(gamma)))
        .collect()
}
