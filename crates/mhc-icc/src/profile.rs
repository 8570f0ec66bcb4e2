//! Profile model, tag data layout, writer and reader.
use std::collections::HashMap;

use md5::{Digest, Md5};

use crate::fixed::read_u32;
use crate::header::{DateTimeNumber, HeaderField, HEADER_SIZE};
use crate::signature::tags;
use crate::types::LocalizedString;
use crate::{Curve, Error, Mhc2, ProfileHeader, Result, Signature, Tag, TagData, XyzNumber};

const TAG_ENTRY_SIZE: usize = 12;

/// How the writer fills the creation date field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CreationDate {
    /// Current time.
    #[default]
    Now,
    /// Value already in the header.
    Keep,
    At(DateTimeNumber),
}

/// Tag table entry computed by [`Profile::layout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagEntry {
    pub signature: Signature,
    pub offset: u32,
    /// Unpadded data length.
    pub size: u32,
    /// Earlier tag whose data block this entry reuses.
    pub shared_with: Option<Signature>,
}

/// Placement of tag data in an encoded profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub entries: Vec<TagEntry>,
    /// Total profile size, including padding after the last block.
    pub size: u32,
    stored: Vec<usize>,
}

impl Layout {
    #[inline]
    pub fn data_start(tag_count: usize) -> usize {
        HEADER_SIZE + 4 + TAG_ENTRY_SIZE * tag_count
    }
}

/// ICC profile being edited.
///
/// Tags are kept in table order. Signatures are unique for profiles built through
/// [`Profile::add_tag`], but a parsed profile keeps whatever the file contains.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub header: ProfileHeader,
    tags: Vec<Tag>,
}

impl Default for Profile {
    fn default() -> Self {
        Self::reference().expect("reference tag data should encode")
    }
}

impl Profile {
    pub fn new(header: ProfileHeader) -> Self {
        Self {
            header,
            tags: Vec::new(),
        }
    }

    /// Reference MHC2 SDR display profile.
    ///
    /// Thirteen tags with shared TRCs, laying out to 812 bytes.
    pub fn reference() -> Result<Self> {
        let gamma = TagData::Curve(Curve::Gamma(crate::fixed::from_u8_fixed8(0x0233)));
        let identity = TagData::S15Fixed16Array(vec![1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]);
        let xyz = |raw: [i32; 3]| TagData::Xyz(vec![XyzNumber(raw)]);

        let tag_data = [
            (
                tags::COPYRIGHT,
                TagData::MultiLocalizedUnicode(vec![LocalizedString::en_us(
                    "Copyright (C) Microsoft Corporation.",
                )]),
            ),
            (tags::RED_TRC, gamma.clone()),
            (tags::GREEN_TRC, gamma.clone()),
            (tags::BLUE_TRC, gamma),
            (tags::CHROMATIC_ADAPTATION, identity),
            (tags::RED_COLORANT, xyz([0xe78e, 0x6d29, 0x0158])),
            (tags::GREEN_COLORANT, xyz([0x5bc6, 0xee72, 0x1007])),
            (tags::BLUE_COLORANT, xyz([0x2fc3, 0x133a, 0xfac5])),
            (tags::MEDIA_WHITE_POINT, xyz([0x8a82, 0x9194, 0x9e9d])),
            (
                tags::MS_COLOR_ADAPTATION,
                TagData::Text("{'Appversion':'1.0.152.0','D65Adapted':True}".to_owned()),
            ),
            (tags::LUMINANCE, xyz([0x04e2_0000; 3])),
            (tags::MHC2, TagData::Mhc2(Mhc2::identity(0.0, 1250.0, 2)?)),
            (
                tags::DESCRIPTION,
                TagData::MultiLocalizedUnicode(vec![LocalizedString::en_us(
                    "NE160QDM-NM7 SDR Profile",
                )]),
            ),
        ];

        let mut profile = Self::new(ProfileHeader::default());
        for (signature, data) in &tag_data {
            profile.add_tag(Tag::from_data(*signature, data)?)?;
        }
        Ok(profile)
    }

    #[inline]
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn tag(&self, signature: Signature) -> Option<&Tag> {
        self.tags.iter().find(|tag| tag.signature == signature)
    }

    pub fn contains(&self, signature: Signature) -> bool {
        self.tag(signature).is_some()
    }

    pub fn tag_data(&self, signature: Signature) -> Result<TagData> {
        self.tag(signature)
            .ok_or(Error::TagNotFound(signature))?
            .decode()
    }

    fn position(&self, signature: Signature) -> Result<usize> {
        self.tags
            .iter()
            .position(|tag| tag.signature == signature)
            .ok_or(Error::TagNotFound(signature))
    }

    /// Appends a tag; signatures already in the table are rejected.
    pub fn add_tag(&mut self, tag: Tag) -> Result<()> {
        if self.contains(tag.signature) {
            return Err(Error::DuplicateTag(tag.signature));
        }
        tracing::debug!(signature = %tag.signature, size = tag.data.len(), "Adding tag");
        self.tags.push(tag);
        Ok(())
    }

    pub fn remove_tag(&mut self, signature: Signature) -> Result<Tag> {
        let idx = self.position(signature)?;
        tracing::debug!(%signature, "Removing tag");
        Ok(self.tags.remove(idx))
    }

    /// Moves a tag by `delta` positions in the table.
    ///
    /// Returns `false` without changing anything if the target position is out of range.
    pub fn move_tag(&mut self, signature: Signature, delta: isize) -> Result<bool> {
        let idx = self.position(signature)?;
        let Some(new_idx) = idx.checked_add_signed(delta).filter(|&i| i < self.tags.len()) else {
            return Ok(false);
        };
        let tag = self.tags.remove(idx);
        self.tags.insert(new_idx, tag);
        Ok(true)
    }

    /// Replaces the raw data of an existing tag.
    pub fn set_tag_data(&mut self, signature: Signature, data: Vec<u8>) -> Result<()> {
        let idx = self.position(signature)?;
        self.tags[idx].data = data;
        Ok(())
    }

    /// Encodes `data` into the tag, appending the tag if it's absent.
    pub fn set_tag(&mut self, signature: Signature, data: &TagData) -> Result<()> {
        let encoded = data.encode()?;
        match self.position(signature) {
            Ok(idx) => self.tags[idx].data = encoded,
            Err(_) => self.tags.push(Tag::new(signature, encoded)),
        }
        Ok(())
    }

    /// Computes offsets and sizes of the tag table.
    ///
    /// Identical data blocks are stored once, and every stored block is padded to a
    /// four-byte boundary.
    pub fn layout(&self) -> Result<Layout> {
        let mut cursor = Layout::data_start(self.tags.len());
        let mut seen: HashMap<&[u8], (usize, Signature)> = HashMap::new();
        let mut entries = Vec::with_capacity(self.tags.len());
        let mut stored = Vec::new();

        for (idx, tag) in self.tags.iter().enumerate() {
            let size = to_u32(tag.data.len())?;
            if let Some(&(offset, first)) = seen.get(tag.data.as_slice()) {
                tracing::trace!(signature = %tag.signature, %first, offset, "Sharing tag data");
                entries.push(TagEntry {
                    signature: tag.signature,
                    offset: to_u32(offset)?,
                    size,
                    shared_with: Some(first),
                });
                continue;
            }

            seen.insert(tag.data.as_slice(), (cursor, tag.signature));
            entries.push(TagEntry {
                signature: tag.signature,
                offset: to_u32(cursor)?,
                size,
                shared_with: None,
            });
            stored.push(idx);
            cursor += tag.data.len().next_multiple_of(4);
        }

        Ok(Layout {
            entries,
            size: to_u32(cursor)?,
            stored,
        })
    }

    /// Serializes the profile, updating size, creation date and profile ID in the header.
    pub fn encode(&mut self, date: CreationDate) -> Result<Vec<u8>> {
        let _guard = tracing::trace_span!("Encode profile", tags = self.tags.len()).entered();

        let layout = self.layout()?;
        self.header.size = layout.size;
        match date {
            CreationDate::Now => self.header.date_time = DateTimeNumber::now(),
            CreationDate::Keep => {}
            CreationDate::At(date_time) => self.header.date_time = date_time,
        }
        self.header.profile_id = [0; 16];

        let mut out = Vec::with_capacity(layout.size as usize);
        out.extend_from_slice(&self.header.to_bytes());
        out.extend_from_slice(&(self.tags.len() as u32).to_be_bytes());
        for entry in &layout.entries {
            out.extend_from_slice(entry.signature.as_bytes());
            out.extend_from_slice(&entry.offset.to_be_bytes());
            out.extend_from_slice(&entry.size.to_be_bytes());
        }
        for &idx in &layout.stored {
            let data = &self.tags[idx].data;
            out.extend_from_slice(data);
            out.resize(out.len() + (data.len().next_multiple_of(4) - data.len()), 0);
        }
        debug_assert_eq!(out.len(), layout.size as usize);

        let id = compute_profile_id(&out);
        let id_offset = HeaderField::ProfileId.offset();
        out[id_offset..id_offset + 16].copy_from_slice(&id);
        self.header.profile_id = id;

        tracing::debug!(
            size = layout.size,
            stored = layout.stored.len(),
            "Encoded profile"
        );
        Ok(out)
    }

    /// Parses an ICC profile.
    ///
    /// Tags pointing at the same block load as separate entries with equal data.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let _guard = tracing::trace_span!("Parse profile", len = bytes.len()).entered();

        if bytes.len() < HEADER_SIZE + 4 {
            return Err(Error::ProfileTooShort { len: bytes.len() });
        }
        let mut header = ProfileHeader::parse(bytes)?;
        let tags = read_tag_table(bytes)?
            .into_iter()
            .map(|entry| {
                let start = entry.offset as usize;
                Tag::new(entry.signature, bytes[start..start + entry.size as usize].to_vec())
            })
            .collect();

        let actual_size = to_u32(bytes.len())?;
        if header.size != actual_size {
            tracing::warn!(
                stored = header.size,
                actual = actual_size,
                "Profile size field does not match file length"
            );
        }
        header.size = actual_size;

        Ok(Self { header, tags })
    }
}

/// Reads and bounds-checks the tag table of an encoded profile.
///
/// Entries pointing at the same block as an earlier entry are marked as shared.
pub fn read_tag_table(bytes: &[u8]) -> Result<Vec<TagEntry>> {
    let len = bytes.len();
    if len < HEADER_SIZE + 4 {
        return Err(Error::ProfileTooShort { len });
    }
    if bytes[HeaderField::Acsp.offset()..][..4] != *b"acsp" {
        return Err(Error::MissingAcsp);
    }

    let tag_count = read_u32(bytes, HEADER_SIZE).unwrap_or_default();
    let table_end = (tag_count as usize)
        .checked_mul(TAG_ENTRY_SIZE)
        .and_then(|table_len| table_len.checked_add(HEADER_SIZE + 4))
        .filter(|&end| end <= len)
        .ok_or(Error::TagTableOutOfBounds { tag_count, len })?;

    let mut entries: Vec<TagEntry> = Vec::with_capacity(tag_count as usize);
    for entry in bytes[HEADER_SIZE + 4..table_end].chunks_exact(TAG_ENTRY_SIZE) {
        let signature = Signature([entry[0], entry[1], entry[2], entry[3]]);
        let offset = read_u32(entry, 4).unwrap_or_default();
        let size = read_u32(entry, 8).unwrap_or_default();

        let end = (offset as usize).checked_add(size as usize);
        if end.is_none_or(|end| end > len) {
            return Err(Error::TagOutOfBounds {
                signature,
                offset,
                size,
            });
        }
        if (offset as usize) < table_end {
            return Err(Error::TagOverlapsHeader { signature, offset });
        }

        let shared_with = entries
            .iter()
            .find(|e| e.offset == offset && e.size == size)
            .map(|e| e.signature);
        tracing::trace!(%signature, offset, size, "Tag entry");
        entries.push(TagEntry {
            signature,
            offset,
            size,
            shared_with,
        });
    }
    Ok(entries)
}

#[inline]
fn to_u32(value: usize) -> Result<u32> {
    u32::try_from(value).map_err(|_| Error::ProfileTooLarge(value))
}

/// MD5 profile ID of an encoded profile.
///
/// Profile flags, rendering intent and profile ID are zeroed before hashing.
pub fn compute_profile_id(bytes: &[u8]) -> [u8; 16] {
    let mut hasher = Md5::new();
    if bytes.len() < HEADER_SIZE {
        hasher.update(bytes);
        return hasher.finalize().into();
    }

    let mut header = [0u8; HEADER_SIZE];
    header.copy_from_slice(&bytes[..HEADER_SIZE]);
    for field in [
        HeaderField::Flags,
        HeaderField::RenderingIntent,
        HeaderField::ProfileId,
    ] {
        let offset = field.offset();
        header[offset..offset + field.len()].fill(0);
    }
    hasher.update(header);
    hasher.update(&bytes[HEADER_SIZE..]);
    hasher.finalize().into()
}

/// Checks the stored profile ID; `None` if the profile has no ID.
pub fn verify_profile_id(bytes: &[u8]) -> Option<bool> {
    let offset = HeaderField::ProfileId.offset();
    let stored = bytes.get(offset..offset + 16)?;
    if stored.iter().all(|&b| b == 0) {
        return None;
    }
    Some(stored == compute_profile_id(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_date() -> CreationDate {
        CreationDate::At("2025-12-04 16:47:16".parse().unwrap())
    }

    #[test]
    fn reference_layout() {
        let profile = Profile::default();
        let layout = profile.layout().unwrap();
        assert_eq!(layout.size, 812);

        let entries: Vec<_> = layout
            .entries
            .iter()
            .map(|e| (e.signature.to_string(), e.offset, e.size))
            .collect();
        let expected = [
            ("cprt", 288, 100),
            ("rTRC", 388, 16),
            ("gTRC", 388, 16),
            ("bTRC", 388, 16),
            ("chad", 404, 44),
            ("rXYZ", 448, 20),
            ("gXYZ", 468, 20),
            ("bXYZ", 488, 20),
            ("wtpt", 508, 20),
            ("MSCA", 528, 53),
            ("lumi", 584, 20),
            ("MHC2", 604, 132),
            ("desc", 736, 76),
        ];
        assert_eq!(entries.len(), expected.len());
        for ((sig, offset, size), (exp_sig, exp_offset, exp_size)) in entries.iter().zip(expected) {
            assert_eq!((sig.as_str(), *offset, *size), (exp_sig, exp_offset, exp_size));
        }
        assert_eq!(layout.entries[2].shared_with, Some(tags::RED_TRC));
        assert_eq!(layout.entries[0].shared_with, None);
    }

    #[test]
    fn encode_updates_header() {
        let mut profile = Profile::default();
        let bytes = profile.encode(fixed_date()).unwrap();
        assert_eq!(bytes.len(), 812);
        assert_eq!(&bytes[..4], &[0, 0, 3, 0x2c]);
        assert_eq!(profile.header.size, 812);
        assert_eq!(profile.header.date_time.to_string(), "2025-12-04 16:47:16");
        assert_eq!(&bytes[84..100], &profile.header.profile_id);
        assert_eq!(verify_profile_id(&bytes), Some(true));

        // MSCA is 53 bytes long and padded to 56.
        assert_eq!(&bytes[581..584], &[0, 0, 0]);
        assert_eq!(&bytes[128..132], &[0, 0, 0, 13]);
    }

    #[test]
    fn profile_id_ignores_flags_and_intent() {
        let mut profile = Profile::default();
        let mut bytes = profile.encode(fixed_date()).unwrap();
        bytes[47] = 1;
        bytes[67] = 0;
        assert_eq!(verify_profile_id(&bytes), Some(true));

        bytes[200] ^= 0xff;
        assert_eq!(verify_profile_id(&bytes), Some(false));

        bytes[84..100].fill(0);
        assert_eq!(verify_profile_id(&bytes), None);
    }

    #[test]
    fn keep_date() {
        let mut profile = Profile::default();
        profile.header.date_time = "2020-01-02 03:04:05".parse().unwrap();
        profile.encode(CreationDate::Keep).unwrap();
        assert_eq!(profile.header.date_time.to_string(), "2020-01-02 03:04:05");
    }

    #[test]
    fn parse_round_trip() {
        let mut profile = Profile::default();
        let bytes = profile.encode(fixed_date()).unwrap();
        let mut parsed = Profile::parse(&bytes).unwrap();
        assert_eq!(parsed, profile);
        assert_eq!(parsed.tags().len(), 13);
        assert_eq!(parsed.tag(tags::GREEN_TRC).unwrap().data.len(), 16);

        assert_eq!(parsed.encode(CreationDate::Keep).unwrap(), bytes);
    }

    #[test]
    fn file_tag_table() {
        let mut profile = Profile::default();
        let bytes = profile.encode(fixed_date()).unwrap();
        let entries = read_tag_table(&bytes).unwrap();
        assert_eq!(entries, profile.layout().unwrap().entries);
        assert_eq!(entries[3].shared_with, Some(tags::RED_TRC));
        assert_eq!(entries[4].shared_with, None);
    }

    #[test]
    fn table_edits() {
        let mut profile = Profile::default();
        assert!(matches!(
            profile.add_tag(Tag::new(tags::RED_TRC, vec![])),
            Err(Error::DuplicateTag(_))
        ));

        assert!(profile.move_tag(tags::COPYRIGHT, 1).unwrap());
        assert_eq!(profile.tags()[0].signature, tags::RED_TRC);
        assert_eq!(profile.tags()[1].signature, tags::COPYRIGHT);
        assert!(!profile.move_tag(tags::RED_TRC, -1).unwrap());
        assert!(!profile.move_tag(tags::DESCRIPTION, 1).unwrap());
        assert!(profile.move_tag(Signature::new(b"zzzz"), 1).is_err());

        let removed = profile.remove_tag(tags::MS_COLOR_ADAPTATION).unwrap();
        assert_eq!(removed.data.len(), 53);
        assert!(!profile.contains(tags::MS_COLOR_ADAPTATION));
        assert_eq!(profile.layout().unwrap().size, 812 - 56 - 12);

        profile.set_tag_data(tags::GREEN_TRC, b"curv\0\0\0\0\0\0\0\0".to_vec()).unwrap();
        let layout = profile.layout().unwrap();
        let green = layout.entries.iter().find(|e| e.signature == tags::GREEN_TRC).unwrap();
        assert_eq!(green.shared_with, None);
        assert_eq!(green.size, 12);
        assert!(matches!(
            profile.set_tag_data(Signature::new(b"zzzz"), vec![]),
            Err(Error::TagNotFound(_))
        ));
    }

    #[test]
    fn reader_errors() {
        let mut profile = Profile::default();
        let bytes = profile.encode(fixed_date()).unwrap();

        assert!(matches!(
            Profile::parse(&bytes[..131]),
            Err(Error::ProfileTooShort { len: 131 })
        ));

        let mut no_acsp = bytes.clone();
        no_acsp[36] = b'x';
        assert!(matches!(Profile::parse(&no_acsp), Err(Error::MissingAcsp)));

        let mut huge_table = bytes.clone();
        huge_table[128..132].copy_from_slice(&1000u32.to_be_bytes());
        assert!(matches!(
            Profile::parse(&huge_table),
            Err(Error::TagTableOutOfBounds { tag_count: 1000, .. })
        ));

        // Size of the last tag entry (desc).
        let desc_size = HEADER_SIZE + 4 + 12 * 12 + 8;
        let mut out_of_bounds = bytes.clone();
        out_of_bounds[desc_size..desc_size + 4].copy_from_slice(&100u32.to_be_bytes());
        assert!(matches!(
            Profile::parse(&out_of_bounds),
            Err(Error::TagOutOfBounds { .. })
        ));

        let cprt_offset = HEADER_SIZE + 4 + 4;
        let mut overlapping = bytes.clone();
        overlapping[cprt_offset..cprt_offset + 4].copy_from_slice(&200u32.to_be_bytes());
        assert!(matches!(
            Profile::parse(&overlapping),
            Err(Error::TagOverlapsHeader { offset: 200, .. })
        ));
    }

    #[test]
    fn unknown_rendering_intent_loads() {
        let mut profile = Profile::default();
        let mut bytes = profile.encode(fixed_date()).unwrap();
        bytes[64..68].copy_from_slice(&4u32.to_be_bytes());

        let mut parsed = Profile::parse(&bytes).unwrap();
        assert_eq!(parsed.header.rendering_intent, crate::RenderingIntent::Other(4));
        assert_eq!(verify_profile_id(&bytes), Some(true));

        parsed
            .header
            .set_field_hex(HeaderField::RenderingIntent, "00000001")
            .unwrap();
        let repaired = parsed.encode(CreationDate::Keep).unwrap();
        assert_eq!(&repaired[64..68], &[0, 0, 0, 1]);
    }

    #[test]
    fn size_field_is_replaced() {
        let mut profile = Profile::default();
        let mut bytes = profile.encode(fixed_date()).unwrap();
        bytes.extend_from_slice(&[0; 8]);
        let parsed = Profile::parse(&bytes).unwrap();
        assert_eq!(parsed.header.size, 820);
    }
}
