//! Fixed-point number encodings used by ICC profiles.
use crate::{Error, Result};

/// Encodes `value` as s15Fixed16Number, rounding to the nearest representable value.
pub fn to_s15_fixed16(value: f64) -> Result<i32> {
    let scaled = (value * 65536.0).round();
    if !value.is_finite() || scaled < i32::MIN as f64 || scaled > i32::MAX as f64 {
        return Err(Error::ValueOutOfRange {
            what: "s15Fixed16Number",
            value,
        });
    }
    Ok(scaled as i32)
}

#[inline]
pub fn from_s15_fixed16(raw: i32) -> f64 {
    raw as f64 / 65536.0
}

/// Rounds `value` to the nearest multiple of 1/65536, the value an s15Fixed16 field stores.
#[inline]
pub fn round_to_s15_fixed16(value: f64) -> f64 {
    (value * 65536.0).round() / 65536.0
}

pub fn to_u8_fixed8(value: f64) -> Result<u16> {
    let scaled = (value * 256.0).round();
    if !value.is_finite() || !(0.0..=u16::MAX as f64).contains(&scaled) {
        return Err(Error::ValueOutOfRange {
            what: "u8Fixed8Number",
            value,
        });
    }
    Ok(scaled as u16)
}

#[inline]
pub fn from_u8_fixed8(raw: u16) -> f64 {
    raw as f64 / 256.0
}

pub fn to_u16_fixed16(value: f64) -> Result<u32> {
    let scaled = (value * 65536.0).round();
    if !value.is_finite() || !(0.0..=u32::MAX as f64).contains(&scaled) {
        return Err(Error::ValueOutOfRange {
            what: "u16Fixed16Number",
            value,
        });
    }
    Ok(scaled as u32)
}

#[inline]
pub fn from_u16_fixed16(raw: u32) -> f64 {
    raw as f64 / 65536.0
}

#[inline]
pub(crate) fn read_u16(data: &[u8], offset: usize) -> Option<u16> {
    let bytes = data.get(offset..offset + 2)?;
    Some(u16::from_be_bytes([bytes[0], bytes[1]]))
}

#[inline]
pub(crate) fn read_u32(data: &[u8], offset: usize) -> Option<u32> {
    let bytes = data.get(offset..offset + 4)?;
    Some(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

#[inline]
pub(crate) fn read_i32(data: &[u8], offset: usize) -> Option<i32> {
    read_u32(data, offset).map(|v| v as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn s15_fixed16() {
        assert_eq!(to_s15_fixed16(1.0).unwrap(), 0x10000);
        assert_eq!(to_s15_fixed16(0.9642).unwrap(), 0xf6d6);
        assert_eq!(to_s15_fixed16(0.8249).unwrap(), 0xd32d);
        assert_eq!(to_s15_fixed16(-1.0).unwrap(), -0x10000);
        assert_eq!(to_s15_fixed16(1250.0).unwrap(), 0x04e2_0000);

        assert!(to_s15_fixed16(32768.0).is_err());
        assert!(to_s15_fixed16(f64::NAN).is_err());

        assert_eq!(from_s15_fixed16(-0x8000), -0.5);
        assert_eq!(round_to_s15_fixed16(0.5), 0.5);
        let third = round_to_s15_fixed16(1.0 / 3.0);
        assert_eq!(from_s15_fixed16(to_s15_fixed16(third).unwrap()), third);
        assert_eq!(to_s15_fixed16(third).unwrap(), 0x5555);
    }

    #[test]
    fn u16_fixed16() {
        assert_eq!(to_u16_fixed16(1.0).unwrap(), 0x10000);
        assert_eq!(to_u16_fixed16(65535.5).unwrap(), 0xffff_8000);
        assert_eq!(from_u16_fixed16(0x0001_8000), 1.5);
        assert!(to_u16_fixed16(-0.5).is_err());
        assert!(to_u16_fixed16(65536.0).is_err());
        assert!(to_u16_fixed16(f64::INFINITY).is_err());
    }

    #[test]
    fn u8_fixed8() {
        // Gamma 2.2 as written by Windows display profiles.
        assert_eq!(to_u8_fixed8(2.2).unwrap(), 0x0233);
        assert!((from_u8_fixed8(0x0233) - 2.19921875).abs() < 1e-12);
        assert!(to_u8_fixed8(-1.0).is_err());
        assert!(to_u8_fixed8(256.0).is_err());
    }

    #[test]
    fn readers() {
        let data = [0x00, 0x01, 0xff, 0xff, 0xff, 0xfe];
        assert_eq!(read_u16(&data, 0), Some(1));
        assert_eq!(read_i32(&data, 2), Some(-2));
        assert_eq!(read_u32(&data, 3), None);
    }
}
