//! Encoders and decoders for the tag types used by display profiles.
mod curve;
mod mluc;

pub use curve::{Curve, ParametricCurve};
pub use mluc::LocalizedString;

use crate::fixed::{from_s15_fixed16, read_i32, to_s15_fixed16};
use crate::signature::types;
use crate::{Error, Mhc2, Result, Signature, XyzNumber};

/// Decoded view of tag data.
#[derive(Debug, Clone, PartialEq)]
pub enum TagData {
    Xyz(Vec<XyzNumber>),
    Curve(Curve),
    ParametricCurve(ParametricCurve),
    S15Fixed16Array(Vec<f64>),
    Text(String),
    MultiLocalizedUnicode(Vec<LocalizedString>),
    Mhc2(Mhc2),
    /// Type this crate does not interpret.
    Unknown(Signature),
}

impl TagData {
    /// Decodes tag data. `tag` is used for error reporting only.
    pub fn decode(tag: Signature, data: &[u8]) -> Result<Self> {
        if data.len() < 8 {
            return Err(Error::invalid_tag_data(tag, "tag data is shorter than 8 bytes"));
        }
        let type_signature = Signature([data[0], data[1], data[2], data[3]]);

        Ok(match type_signature {
            types::XYZ => Self::Xyz(decode_xyz(tag, data)?),
            types::CURVE => Self::Curve(Curve::decode(tag, data)?),
            types::PARAMETRIC_CURVE => Self::ParametricCurve(ParametricCurve::decode(tag, data)?),
            types::S15_FIXED16_ARRAY => Self::S15Fixed16Array(decode_sf32(tag, data)?),
            types::TEXT => Self::Text(decode_text(data)),
            types::MULTI_LOCALIZED_UNICODE => {
                Self::MultiLocalizedUnicode(mluc::decode(tag, data)?)
            }
            types::MHC2 => Self::Mhc2(Mhc2::decode(tag, data)?),
            other => Self::Unknown(other),
        })
    }

    pub fn type_signature(&self) -> Signature {
        match self {
            Self::Xyz(_) => types::XYZ,
            Self::Curve(_) => types::CURVE,
            Self::ParametricCurve(_) => types::PARAMETRIC_CURVE,
            Self::S15Fixed16Array(_) => types::S15_FIXED16_ARRAY,
            Self::Text(_) => types::TEXT,
            Self::MultiLocalizedUnicode(_) => types::MULTI_LOCALIZED_UNICODE,
            Self::Mhc2(_) => types::MHC2,
            Self::Unknown(sig) => *sig,
        }
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        match self {
            Self::Xyz(values) => Ok(encode_xyz(values)),
            Self::Curve(curve) => curve.encode(),
            Self::ParametricCurve(curve) => curve.encode(),
            Self::S15Fixed16Array(values) => encode_sf32(values),
            Self::Text(text) => Ok(encode_text(text)),
            Self::MultiLocalizedUnicode(records) => mluc::encode(records),
            Self::Mhc2(mhc2) => mhc2.encode(),
            Self::Unknown(sig) => Err(Error::invalid_tag_data(
                *sig,
                "cannot encode tag data of unknown type",
            )),
        }
    }

    /// One-line summary used by listings.
    pub fn summary(&self) -> String {
        match self {
            Self::Xyz(values) => values
                .iter()
                .map(|v| format!("XYZ({v})"))
                .collect::<Vec<_>>()
                .join(" "),
            Self::Curve(curve) => curve.to_string(),
            Self::ParametricCurve(curve) => curve.to_string(),
            Self::S15Fixed16Array(values) => {
                let values = values
                    .iter()
                    .map(|v| format!("{v:.5}"))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("sf32 [{values}]")
            }
            Self::Text(text) => format!("text {text:?}"),
            Self::MultiLocalizedUnicode(records) => records
                .iter()
                .map(|r| format!("{}: {:?}", r.locale(), r.text))
                .collect::<Vec<_>>()
                .join("; "),
            Self::Mhc2(mhc2) => mhc2.to_string(),
            Self::Unknown(sig) => format!("type {sig}"),
        }
    }
}

#[inline]
pub(crate) fn type_header(sig: Signature) -> Vec<u8> {
    let mut out = Vec::with_capacity(64);
    out.extend_from_slice(sig.as_bytes());
    out.extend_from_slice(&[0; 4]);
    out
}

fn decode_xyz(tag: Signature, data: &[u8]) -> Result<Vec<XyzNumber>> {
    let body = &data[8..];
    if body.is_empty() || body.len() % 12 != 0 {
        return Err(Error::invalid_tag_data(
            tag,
            "XYZType must hold a whole number of XYZNumber",
        ));
    }
    Ok(body
        .chunks_exact(12)
        .filter_map(XyzNumber::parse_bytes)
        .collect())
}

fn encode_xyz(values: &[XyzNumber]) -> Vec<u8> {
    let mut out = type_header(types::XYZ);
    for v in values {
        out.extend_from_slice(&v.to_bytes());
    }
    out
}

fn decode_sf32(tag: Signature, data: &[u8]) -> Result<Vec<f64>> {
    let body = &data[8..];
    if body.len() % 4 != 0 {
        return Err(Error::invalid_tag_data(
            tag,
            "s15Fixed16ArrayType length is not a multiple of 4",
        ));
    }
    Ok((0..body.len() / 4)
        .filter_map(|idx| read_i32(body, idx * 4))
        .map(from_s15_fixed16)
        .collect())
}

pub(crate) fn encode_sf32(values: &[f64]) -> Result<Vec<u8>> {
    let mut out = type_header(types::S15_FIXED16_ARRAY);
    for &v in values {
        out.extend_from_slice(&to_s15_fixed16(v)?.to_be_bytes());
    }
    Ok(out)
}

fn decode_text(data: &[u8]) -> String {
    let body = &data[8..];
    let end = body.iter().position(|&b| b == 0).unwrap_or(body.len());
    String::from_utf8_lossy(&body[..end]).into_owned()
}

fn encode_text(text: &str) -> Vec<u8> {
    let mut out = type_header(types::TEXT);
    out.extend_from_slice(text.as_bytes());
    out.push(0);
    out
}
