use std::path::{Path, PathBuf};

use clap::Parser;
use mhc_icc::signature::tags;
use mhc_icc::{CreationDate, Mhc2, Profile, RenderingIntent, TagData};
use mhc_icc_cli::{Args, Error, Subcommands};
use tempfile::TempDir;

const LUMI_200: &str = "58595a20 00000000 00c80000 00c80000 00c80000";
const BKPT_ZERO: &str = "58595a20 00000000 00000000 00000000 00000000";
const BKPT_ONE: &str = "58595a20 00000000 00010000 00010000 00010000";

fn run(args: &[&str]) -> Result<(), Error> {
    let args = Args::try_parse_from(std::iter::once("mhc-icc").chain(args.iter().copied())).unwrap();
    match args.subcommand {
        Subcommands::Edit(args) => mhc_icc_cli::edit::handle_edit(args),
        Subcommands::Mhc2(args) => mhc_icc_cli::mhc2::handle_mhc2(args),
        Subcommands::Validate(args) => mhc_icc_cli::validate::handle_validate(args),
        _ => panic!("subcommand not covered here"),
    }
}

fn write(dir: &TempDir, name: &str, profile: &mut Profile) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, profile.encode(CreationDate::Now).unwrap()).unwrap();
    path
}

fn read(path: &Path) -> Profile {
    Profile::parse(&std::fs::read(path).unwrap()).unwrap()
}

fn read_mhc2(path: &Path) -> Mhc2 {
    match read(path).tag_data(tags::MHC2).unwrap() {
        TagData::Mhc2(mhc2) => mhc2,
        other => panic!("unexpected MHC2 data {other:?}"),
    }
}

fn arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn edit_applies_remove_add_set_move_in_order() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "in.icc", &mut Profile::default());

    // `lumi` is removed before it is added again, and `bkpt` is added before it is set and moved.
    run(&[
        "edit",
        arg(&input),
        "--move",
        "bkpt=-12",
        "--set",
        &format!("bkpt={BKPT_ONE}"),
        "--add",
        &format!("bkpt={BKPT_ZERO}"),
        "--add",
        &format!("lumi={LUMI_200}"),
        "--remove",
        "lumi",
        "--header",
        "rendering_intent=perceptual",
    ])
    .unwrap();

    let profile = read(&input);
    let signatures = profile.tags().iter().map(|tag| tag.signature).collect::<Vec<_>>();
    assert_eq!(signatures.len(), 14);
    assert_eq!(signatures[0], tags::MEDIA_BLACK_POINT);
    assert_eq!(signatures[13], tags::LUMINANCE);
    assert_eq!(
        profile.tag(tags::MEDIA_BLACK_POINT).unwrap().data,
        mhc_icc::hexview::parse_hex(BKPT_ONE).unwrap()
    );
    assert_eq!(
        profile.tag(tags::LUMINANCE).unwrap().data,
        mhc_icc::hexview::parse_hex(LUMI_200).unwrap()
    );
    assert_eq!(profile.header.rendering_intent, RenderingIntent::Perceptual);
    assert_eq!(mhc_icc::verify_profile_id(&std::fs::read(&input).unwrap()), Some(true));
}

#[test]
fn edit_without_output_overwrites_input() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "in.icc", &mut Profile::default());

    run(&["edit", arg(&input), "--remove", "MSCA"]).unwrap();

    assert!(!read(&input).contains(tags::MS_COLOR_ADAPTATION));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn edit_with_output_leaves_input() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "in.icc", &mut Profile::default());
    let before = std::fs::read(&input).unwrap();
    let output = dir.path().join("out.icc");

    run(&["edit", arg(&input), "-o", arg(&output), "--remove", "MSCA"]).unwrap();

    assert_eq!(std::fs::read(&input).unwrap(), before);
    assert!(!read(&output).contains(tags::MS_COLOR_ADAPTATION));
}

#[test]
fn edit_failure_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "in.icc", &mut Profile::default());
    let before = std::fs::read(&input).unwrap();

    let result = run(&["edit", arg(&input), "--add", &format!("lumi={LUMI_200}")]);

    assert!(matches!(
        result,
        Err(Error::Profile(mhc_icc::Error::DuplicateTag(sig))) if sig == tags::LUMINANCE
    ));
    assert_eq!(std::fs::read(&input).unwrap(), before);
}

#[test]
fn mhc2_without_tag_starts_from_identity() {
    let dir = TempDir::new().unwrap();
    let mut profile = Profile::default();
    profile.remove_tag(tags::MHC2).unwrap();
    let input = write(&dir, "in.icc", &mut profile);
    let output = dir.path().join("out.icc");

    run(&["mhc2", arg(&input), "-o", arg(&output), "--peak-luminance", "400"]).unwrap();

    assert_eq!(
        read_mhc2(&output),
        Mhc2::identity(0.0, 400.0, Mhc2::MIN_LUT_SIZE).unwrap()
    );
    assert!(!read(&input).contains(tags::MHC2));
}

#[test]
fn mhc2_keeps_values_not_overridden() {
    let dir = TempDir::new().unwrap();
    let mut original = Mhc2::with_gamma(0.5, 500.0, 16, 2.2).unwrap();
    original.matrix[0] = [0.75, 0.25, 0.0, 0.0];
    let mut profile = Profile::default();
    profile.set_tag(tags::MHC2, &TagData::Mhc2(original.clone())).unwrap();
    let input = write(&dir, "in.icc", &mut profile);

    run(&["mhc2", arg(&input), "--peak-luminance", "600"]).unwrap();

    let mut expected = original;
    expected.peak_luminance = 600.0;
    assert_eq!(read_mhc2(&input), expected);
}

#[test]
fn mhc2_regenerates_luts() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "in.icc", &mut Profile::default());

    run(&["mhc2", arg(&input), "--lut-size", "256", "--lut-gamma", "2.2"]).unwrap();

    let mhc2 = read_mhc2(&input);
    assert_eq!(mhc2.luts, Mhc2::with_gamma(0.0, 1.0, 256, 2.2).unwrap().luts);
    assert_eq!(mhc2.peak_luminance, 1250.0);
}

#[test]
fn mhc2_rejects_non_positive_gamma() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "in.icc", &mut Profile::default());
    let before = std::fs::read(&input).unwrap();

    for gamma in ["0", "-1"] {
        let gamma_arg = format!("--lut-gamma={gamma}");
        let result = run(&[
            "mhc2",
            arg(&input),
            "--lut-size",
            "16",
            &gamma_arg,
        ]);
        assert!(
            matches!(
                result,
                Err(Error::Profile(mhc_icc::Error::ValueOutOfRange { what: "LUT gamma", .. }))
            ),
            "gamma {gamma}: {result:?}"
        );
    }
    assert_eq!(std::fs::read(&input).unwrap(), before);
}

#[test]
fn mhc2_replaces_unreadable_tag() {
    let truncated = mhc_icc::hexview::parse_hex("4d484332 00000000 00000010").unwrap();
    let wrong_type = mhc_icc::hexview::parse_hex("74657874 00000000 61626300").unwrap();

    for data in [truncated, wrong_type] {
        let dir = TempDir::new().unwrap();
        let mut profile = Profile::default();
        profile.set_tag_data(tags::MHC2, data).unwrap();
        let input = write(&dir, "in.icc", &mut profile);

        run(&["mhc2", arg(&input), "--peak-luminance", "300"]).unwrap();

        assert_eq!(
            read_mhc2(&input),
            Mhc2::identity(0.0, 300.0, Mhc2::MIN_LUT_SIZE).unwrap()
        );
    }
}

#[test]
fn validate_clean_profile() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "in.icc", &mut Profile::default());

    run(&["validate", arg(&input)]).unwrap();
}

#[test]
fn validate_reports_errors() {
    let dir = TempDir::new().unwrap();
    let mut profile = Profile::default();
    profile.remove_tag(tags::DESCRIPTION).unwrap();
    let input = write(&dir, "in.icc", &mut profile);

    let result = run(&["validate", arg(&input)]);
    assert!(matches!(result, Err(Error::Validation { errors: 1 })), "{result:?}");
}

#[test]
fn validate_reports_unknown_rendering_intent() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.icc");
    let mut bytes = Profile::default().encode(CreationDate::Now).unwrap();
    bytes[64..68].copy_from_slice(&4u32.to_be_bytes());
    std::fs::write(&input, bytes).unwrap();

    let result = run(&["validate", arg(&input)]);
    assert!(matches!(result, Err(Error::Validation { errors: 1 })), "{result:?}");
}
