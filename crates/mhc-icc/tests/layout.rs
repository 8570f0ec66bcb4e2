use rand::prelude::*;

use mhc_icc::{verify_profile_id, CreationDate, Layout, Profile, ProfileHeader, Signature, Tag};

fn random_profile(rng: &mut SmallRng) -> Profile {
    let mut profile = Profile::new(ProfileHeader::default());
    let tag_count = rng.gen_range(0..24);
    let mut blocks: Vec<Vec<u8>> = Vec::new();

    for idx in 0..tag_count {
        let signature = Signature::new(&[b'T', b'0' + (idx / 10) as u8, b'0' + (idx % 10) as u8, b'x']);
        let data = if !blocks.is_empty() && rng.gen_bool(0.3) {
            blocks.choose(rng).unwrap().clone()
        } else {
            let len = rng.gen_range(0..70);
            let mut data = vec![0u8; len];
            rng.fill(&mut data[..]);
            data
        };
        blocks.push(data.clone());
        profile.add_tag(Tag::new(signature, data)).unwrap();
    }
    profile
}

#[test]
fn randomized_layout() {
    let mut rng = SmallRng::seed_from_u64(0x4d48_4332);

    for _ in 0..64 {
        let mut profile = random_profile(&mut rng);
        let layout = profile.layout().unwrap();
        let bytes = profile.encode(CreationDate::Now).unwrap();
        assert_eq!(bytes.len(), layout.size as usize);
        assert_eq!(bytes.len() % 4, 0);

        let data_start = Layout::data_start(profile.tags().len());
        let mut stored = Vec::new();
        for (entry, tag) in layout.entries.iter().zip(profile.tags()) {
            let offset = entry.offset as usize;
            let size = entry.size as usize;
            assert_eq!(entry.signature, tag.signature);
            assert_eq!(size, tag.data.len());
            assert_eq!(offset % 4, 0);
            assert!(offset >= data_start);
            assert_eq!(&bytes[offset..offset + size], &tag.data[..]);

            match entry.shared_with {
                Some(first) => {
                    let first_entry = layout.entries.iter().find(|e| e.signature == first).unwrap();
                    assert_eq!(first_entry.offset, entry.offset);
                    assert_eq!(profile.tag(first).unwrap().data, tag.data);
                }
                None => {
                    assert!(
                        !stored.iter().any(|(_, data): &(usize, &[u8])| *data == &tag.data[..]),
                        "identical data stored twice"
                    );
                    stored.push((offset, &tag.data[..]));
                }
            }
        }

        // Stored blocks are consecutive and padded.
        let mut cursor = data_start;
        for (offset, data) in &stored {
            assert_eq!(*offset, cursor);
            cursor += data.len().next_multiple_of(4);
        }
        assert_eq!(cursor, bytes.len());

        assert_eq!(verify_profile_id(&bytes), Some(true));
        let parsed = Profile::parse(&bytes).unwrap();
        assert_eq!(parsed.tags(), profile.tags());
        assert_eq!(parsed.header, profile.header);
    }
}

#[test]
fn empty_profile() {
    let mut profile = Profile::new(ProfileHeader::default());
    let bytes = profile.encode(CreationDate::Now).unwrap();
    assert_eq!(bytes.len(), 132);
    assert_eq!(&bytes[36..40], b"acsp");

    let parsed = Profile::parse(&bytes).unwrap();
    assert!(parsed.tags().is_empty());
}
