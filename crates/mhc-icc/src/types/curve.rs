use crate::fixed::{
    from_s15_fixed16, from_u8_fixed8, read_i32, read_u16, read_u32, to_s15_fixed16, to_u8_fixed8,
};
use crate::signature::types;
use crate::{Error, Result, Signature};

use super::type_header;

/// `curv` tone curve.
#[derive(Debug, Clone, PartialEq)]
pub enum Curve {
    Identity,
    /// Pure power function, stored as u8Fixed8Number.
    Gamma(f64),
    /// Sampled curve over `[0, 1]`, each entry normalized to 65535.
    Table(Vec<u16>),
}

impl Curve {
    pub(super) fn decode(tag: Signature, data: &[u8]) -> Result<Self> {
        let Some(count) = read_u32(data, 8) else {
            return Err(Error::invalid_tag_data(tag, "curv is missing entry count"));
        };
        let count = count as usize;
        if data.len() < 12 + 2 * count {
            return Err(Error::invalid_tag_data(
                tag,
                format!("curv with {count} entries is truncated"),
            ));
        }

        Ok(match count {
            0 => Self::Identity,
            1 => Self::Gamma(from_u8_fixed8(read_u16(data, 12).unwrap_or_default())),
            _ => Self::Table(
                (0..count)
                    .filter_map(|idx| read_u16(data, 12 + idx * 2))
                    .collect(),
            ),
        })
    }

    pub(super) fn encode(&self) -> Result<Vec<u8>> {
        let mut out = type_header(types::CURVE);
        match self {
            Self::Identity => out.extend_from_slice(&0u32.to_be_bytes()),
            Self::Gamma(gamma) => {
                out.extend_from_slice(&1u32.to_be_bytes());
                out.extend_from_slice(&to_u8_fixed8(*gamma)?.to_be_bytes());
                // Keeps the element four-byte aligned, as Windows display profiles do.
                out.extend_from_slice(&[0; 2]);
            }
            Self::Table(table) => {
                let count = u32::try_from(table.len())
                    .map_err(|_| Error::invalid_tag_data(types::CURVE, "curv table is too long"))?;
                out.extend_from_slice(&count.to_be_bytes());
                for v in table {
                    out.extend_from_slice(&v.to_be_bytes());
                }
            }
        }
        Ok(out)
    }

    /// Evaluates the curve at `x` in `[0, 1]`.
    pub fn eval(&self, x: f64) -> f64 {
        let x = x.clamp(0.0, 1.0);
        match self {
            Self::Identity => x,
            Self::Gamma(gamma) => x.powf(*gamma),
            Self::Table(table) => match table.as_slice() {
                [] => x,
                [v] => *v as f64 / 65535.0,
                _ => {
                    let last = table.len() - 1;
                    let pos = x * last as f64;
                    let idx = (pos.floor() as usize).min(last - 1);
                    let frac = pos - idx as f64;
                    let a = table[idx] as f64;
                    let b = table[idx + 1] as f64;
                    (a + (b - a) * frac) / 65535.0
                }
            },
        }
    }
}

impl std::fmt::Display for Curve {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Identity => write!(f, "curv identity"),
            Self::Gamma(gamma) => write!(f, "curv gamma {gamma:.5}"),
            Self::Table(table) => write!(f, "curv table of {} entries", table.len()),
        }
    }
}

/// `para` parametric curve, function types 0 to 4 of ICC.1.
#[derive(Debug, Clone, PartialEq)]
pub struct ParametricCurve {
    function_type: u16,
    params: Vec<f64>,
}

impl ParametricCurve {
    const PARAM_COUNTS: [usize; 5] = [1, 3, 4, 5, 7];

    pub fn new(function_type: u16, params: Vec<f64>) -> Result<Self> {
        let Some(&expected) = Self::PARAM_COUNTS.get(function_type as usize) else {
            return Err(Error::invalid_tag_data(
                types::PARAMETRIC_CURVE,
                format!("unknown parametric function type {function_type}"),
            ));
        };
        if params.len() != expected {
            return Err(Error::invalid_tag_data(
                types::PARAMETRIC_CURVE,
                format!(
                    "function type {function_type} takes {expected} parameters, got {}",
                    params.len()
                ),
            ));
        }
        Ok(Self {
            function_type,
            params,
        })
    }

    #[inline]
    pub fn function_type(&self) -> u16 {
        self.function_type
    }

    #[inline]
    pub fn params(&self) -> &[f64] {
        &self.params
    }

    pub(super) fn decode(tag: Signature, data: &[u8]) -> Result<Self> {
        let Some(function_type) = read_u16(data, 8) else {
            return Err(Error::invalid_tag_data(tag, "para is missing function type"));
        };
        let Some(&count) = Self::PARAM_COUNTS.get(function_type as usize) else {
            return Err(Error::invalid_tag_data(
                tag,
                format!("unknown parametric function type {function_type}"),
            ));
        };
        if data.len() < 12 + 4 * count {
            return Err(Error::invalid_tag_data(tag, "para is truncated"));
        }

        let params = (0..count)
            .filter_map(|idx| read_i32(data, 12 + idx * 4))
            .map(from_s15_fixed16)
            .collect();
        Ok(Self {
            function_type,
            params,
        })
    }

    pub(super) fn encode(&self) -> Result<Vec<u8>> {
        let mut out = type_header(types::PARAMETRIC_CURVE);
        out.extend_from_slice(&self.function_type.to_be_bytes());
        out.extend_from_slice(&[0; 2]);
        for &p in &self.params {
            out.extend_from_slice(&to_s15_fixed16(p)?.to_be_bytes());
        }
        Ok(out)
    }

    pub fn eval(&self, x: f64) -> f64 {
        let pow = |base: f64, g: f64| base.max(0.0).powf(g);
        match (self.function_type, self.params.as_slice()) {
            (0, &[g]) => pow(x, g),
            (1, &[g, a, b]) => {
                if a * x + b >= 0.0 {
                    pow(a * x + b, g)
                } else {
                    0.0
                }
            }
            (2, &[g, a, b, c]) => {
                if a * x + b >= 0.0 {
                    pow(a * x + b, g) + c
                } else {
                    c
                }
            }
            (3, &[g, a, b, c, d]) => {
                if x >= d {
                    pow(a * x + b, g)
                } else {
                    c * x
                }
            }
            (4, &[g, a, b, c, d, e, f]) => {
                if x >= d {
                    pow(a * x + b, g) + e
                } else {
                    c * x + f
                }
            }
            _ => x,
        }
    }
}

impl std::fmt::Display for ParametricCurve {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "para type {} [", self.function_type)?;
        for (idx, p) in self.params.iter().enumerate() {
            if idx > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{p:.5}")?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hexview::parse_hex;
    use crate::signature::tags;
    use crate::TagData;

    #[test]
    fn gamma_trc() {
        let data = parse_hex("63757276000000000000000102330000").unwrap();
        let TagData::Curve(curve) = TagData::decode(tags::RED_TRC, &data).unwrap() else {
            panic!();
        };
        assert_eq!(curve, Curve::Gamma(2.19921875));
        assert_eq!(curve.encode().unwrap(), data);
        assert_eq!(Curve::decode(tags::RED_TRC, &data[..14]).unwrap(), curve);
        assert!((curve.eval(0.5) - 0.5f64.powf(2.19921875)).abs() < 1e-12);
    }

    #[test]
    fn table_and_identity() {
        let table = Curve::Table(vec![0, 16384, 65535]);
        let data = table.encode().unwrap();
        assert_eq!(data.len(), 18);
        assert_eq!(Curve::decode(tags::GREEN_TRC, &data).unwrap(), table);
        assert!((table.eval(0.25) - 8192.0 / 65535.0).abs() < 1e-12);
        assert_eq!(table.eval(1.0), 1.0);

        let identity = Curve::Identity.encode().unwrap();
        assert_eq!(identity, b"curv\0\0\0\0\0\0\0\0");
        assert_eq!(Curve::decode(tags::GREEN_TRC, &identity).unwrap(), Curve::Identity);

        assert!(Curve::decode(tags::GREEN_TRC, &data[..16]).is_err());
    }

    #[test]
    fn srgb_parametric() {
        let srgb = ParametricCurve::new(
            3,
            vec![2.4, 1.0 / 1.055, 0.055 / 1.055, 1.0 / 12.92, 0.04045],
        )
        .unwrap();
        let data = srgb.encode().unwrap();
        assert_eq!(data.len(), 32);

        let decoded = ParametricCurve::decode(tags::BLUE_TRC, &data).unwrap();
        assert_eq!(decoded.function_type(), 3);
        assert!((decoded.eval(0.5) - 0.21404).abs() < 1e-3);
        assert!((decoded.eval(0.01) - 0.01 / 12.92).abs() < 1e-4);

        assert!(ParametricCurve::new(3, vec![2.4]).is_err());
        assert!(ParametricCurve::new(5, vec![]).is_err());
        assert!(ParametricCurve::decode(tags::BLUE_TRC, &data[..20]).is_err());
    }
}
