use crate::fixed::{read_u16, read_u32};
use crate::signature::types;
use crate::{Error, Result, Signature};

use super::type_header;

const RECORD_SIZE: usize = 12;

/// Single record of `multiLocalizedUnicodeType`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalizedString {
    pub language: [u8; 2],
    pub country: [u8; 2],
    pub text: String,
}

impl LocalizedString {
    pub fn en_us(text: impl Into<String>) -> Self {
        Self {
            language: *b"en",
            country: *b"US",
            text: text.into(),
        }
    }

    /// Locale code such as `enUS`.
    pub fn locale(&self) -> String {
        self.language
            .iter()
            .chain(&self.country)
            .map(|&b| b as char)
            .collect()
    }
}

pub(super) fn decode(tag: Signature, data: &[u8]) -> Result<Vec<LocalizedString>> {
    let err = |reason: &'static str| Error::invalid_tag_data(tag, reason);
    let count = read_u32(data, 8).ok_or_else(|| err("mluc is missing record count"))? as usize;
    let record_size = read_u32(data, 12).ok_or_else(|| err("mluc is missing record size"))? as usize;
    if record_size < RECORD_SIZE {
        return Err(err("mluc record size is smaller than 12"));
    }
    let records_end = count
        .checked_mul(record_size)
        .and_then(|len| len.checked_add(16));
    if records_end.is_none_or(|end| end > data.len()) {
        return Err(err("mluc records exceed tag size"));
    }

    let mut ret = Vec::with_capacity(count);
    for idx in 0..count {
        let base = 16 + idx * record_size;
        let language = [data[base], data[base + 1]];
        let country = [data[base + 2], data[base + 3]];
        let len = read_u32(data, base + 4).unwrap_or_default() as usize;
        let offset = read_u32(data, base + 8).unwrap_or_default() as usize;
        if offset.checked_add(len).is_none_or(|end| end > data.len()) {
            return Err(err("mluc string exceeds tag size"));
        }
        if len % 2 != 0 {
            return Err(err("mluc string has odd length"));
        }

        let units = (0..len / 2)
            .filter_map(|i| read_u16(data, offset + i * 2))
            .collect::<Vec<_>>();
        let text = String::from_utf16_lossy(&units)
            .trim_end_matches('\0')
            .to_owned();
        ret.push(LocalizedString {
            language,
            country,
            text,
        });
    }
    Ok(ret)
}

pub(super) fn encode(records: &[LocalizedString]) -> Result<Vec<u8>> {
    let too_long = || Error::invalid_tag_data(types::MULTI_LOCALIZED_UNICODE, "mluc is too long");

    let strings = records
        .iter()
        .map(|r| {
            r.text
                .encode_utf16()
                .flat_map(u16::to_be_bytes)
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    let mut out = type_header(types::MULTI_LOCALIZED_UNICODE);
    out.extend_from_slice(&(records.len() as u32).to_be_bytes());
    out.extend_from_slice(&(RECORD_SIZE as u32).to_be_bytes());

    let mut offset = 16 + RECORD_SIZE * records.len();
    for (record, string) in records.iter().zip(&strings) {
        out.extend_from_slice(&record.language);
        out.extend_from_slice(&record.country);
        let len = u32::try_from(string.len()).map_err(|_| too_long())?;
        out.extend_from_slice(&len.to_be_bytes());
        let offset32 = u32::try_from(offset).map_err(|_| too_long())?;
        out.extend_from_slice(&offset32.to_be_bytes());
        offset += string.len();
    }
    for string in strings {
        out.extend_from_slice(&string);
    }
    Ok(out)
}
