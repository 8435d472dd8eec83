//! Contract Invariant Tests
//!
//! These tests verify the export guarantees end to end on a real directory.

use std::fs;
use std::path::Path;

use appicon_core::{
    ExportPipeline, IconSetConfig, IconStyle, PipelineError, SizeSpec, SizeTable,
    manifest::Contents,
};

fn export_into(pipeline: &ExportPipeline, dir: &Path) -> (appicon_core::ExportReport, Vec<String>) {
    let mut created = vec![];
    let report = pipeline
        .export(dir, |name| created.push(name.to_string()))
        .unwrap();
    (report, created)
}

fn read_manifest(dir: &Path) -> Contents {
    let raw = fs::read_to_string(dir.join("Contents.json")).unwrap();
    serde_json::from_str(&raw).unwrap()
}

#[test]
fn invariant_every_spec_has_a_file_of_the_right_size() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = ExportPipeline::default();
    let (report, created) = export_into(&pipeline, dir.path());

    assert_eq!(report.master_size, 1024);
    for spec in SizeTable::ios().specs() {
        let img = image::open(dir.path().join(spec.filename())).unwrap();
        let px = spec.pixel_size();
        assert_eq!((img.width(), img.height()), (px, px), "{}", spec.filename());
        assert_eq!(img.color(), image::ColorType::Rgba8);
    }

    // 15 writes plus the manifest; two filenames are shared.
    assert_eq!(created.len(), 16);
    assert_eq!(created.last().map(String::as_str), Some("Contents.json"));
    let pngs = fs::read_dir(dir.path())
        .unwrap()
        .filter(|e| e.as_ref().unwrap().path().extension().map_or(false, |x| x == "png"))
        .count();
    assert_eq!(pngs, 13);
}

#[test]
fn invariant_manifest_matches_table_order() {
    let dir = tempfile::tempdir().unwrap();
    export_into(&ExportPipeline::default(), dir.path());

    let contents = read_manifest(dir.path());
    let table = SizeTable::ios();
    assert_eq!(contents.images.len(), table.len());
    for (entry, spec) in contents.images.iter().zip(table.specs()) {
        assert_eq!(entry.filename, spec.filename());
        assert_eq!(entry.scale, spec.scale_label());
    }

    let second = &contents.images[1];
    assert_eq!(second.filename, "icon_40x40.png");
    assert_eq!(second.idiom, "iphone");
    assert_eq!(second.scale, "2x");
    assert_eq!(second.size, "20x20");

    assert_eq!(contents.images[11].idiom, "ipad");
    assert_eq!(contents.images[14].idiom, "ios-marketing");
    assert_eq!(contents.info.author, "xcode");
    assert_eq!(contents.info.version, 1);

    let raw = fs::read_to_string(dir.path().join("Contents.json")).unwrap();
    assert!(raw.starts_with("{\n  \"images\": [\n    {\n      \"filename\""));
}

#[test]
fn invariant_runs_are_reproducible() {
    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();
    let pipeline = ExportPipeline::default();

    let (a, _) = export_into(&pipeline, first.path());
    let (b, _) = export_into(&pipeline, second.path());

    assert_eq!(a.manifest_hash, b.manifest_hash);
    assert_eq!(
        fs::read(first.path().join("Contents.json")).unwrap(),
        fs::read(second.path().join("Contents.json")).unwrap()
    );
    for (fa, fb) in a.files.iter().zip(&b.files) {
        assert_eq!(fa.filename, fb.filename);
        assert_eq!(fa.hash, fb.hash);
    }
}

#[test]
fn invariant_shared_pixel_size_last_write_wins() {
    let dir = tempfile::tempdir().unwrap();
    let table = SizeTable::new(vec![SizeSpec::new(76.0, 1), SizeSpec::new(38.0, 2)]);
    let pipeline = ExportPipeline::new(table, IconStyle::default());

    // A stale file is replaced, not appended to or skipped.
    fs::write(dir.path().join("icon_76x76.png"), b"stale").unwrap();
    let (report, created) = export_into(&pipeline, dir.path());

    assert_eq!(created, vec!["icon_76x76.png", "icon_76x76.png", "Contents.json"]);
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].rule, "pixel_collision");
    assert_eq!(report.warnings[0].entries, vec![0, 1]);

    // Both entries stay in the manifest, pointing at the one file on disk.
    let contents = read_manifest(dir.path());
    assert_eq!(contents.images.len(), 2);
    assert_eq!(contents.images[0].size, "76x76");
    assert_eq!(contents.images[1].size, "38x38");
    assert!(contents.images.iter().all(|e| e.filename == "icon_76x76.png"));

    assert_eq!(report.files[0].hash, report.files[1].hash);
    let img = image::open(dir.path().join("icon_76x76.png")).unwrap();
    assert_eq!(img.width(), 76);
}

#[test]
fn invariant_master_follows_table_maximum() {
    let dir = tempfile::tempdir().unwrap();
    let table = SizeTable::new(vec![SizeSpec::new(16.0, 1), SizeSpec::new(32.0, 2)]);
    let pipeline = ExportPipeline::new(table, IconStyle::default());
    let (report, _) = export_into(&pipeline, dir.path());

    assert_eq!(report.master_size, 64);
    let contents = read_manifest(dir.path());
    assert_eq!(contents.images[0].idiom, "ipad");
    assert_eq!(contents.images[1].filename, "icon_64x64.png");
}

#[test]
fn invariant_missing_output_dir_fails_fast() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("does-not-exist");
    let mut created = vec![];

    let result = ExportPipeline::default().export(&missing, |name| created.push(name.to_string()));

    assert!(result.is_err());
    assert!(created.is_empty());
    assert!(!missing.exists());
}

#[test]
fn invariant_invalid_table_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let table = SizeTable::new(vec![SizeSpec::new(20.0, 1), SizeSpec::new(-4.0, 2)]);
    let pipeline = ExportPipeline::new(table, IconStyle::default());

    let err = pipeline.export(dir.path(), |_| {}).unwrap_err();
    assert!(matches!(err, PipelineError::ValidationFailed(_)));
    assert!(err.to_string().contains("positive_dimensions"));
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn invariant_config_file_drives_export() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("iconset.json");
    fs::write(
        &config_path,
        r#"{
  "engineMinVersion": "1.0.0",
  "sizes": [{"size": 20, "scale": 2}],
  "style": {
    "gradientStart": [0, 0, 0, 255],
    "gradientEnd": [0, 0, 0, 255],
    "boxFill": [255, 255, 255, 230],
    "gold": [255, 215, 0, 255],
    "gem": [255, 100, 100, 255]
  },
  "author": "designer",
  "version": 2
}"#,
    )
    .unwrap();

    let out = dir.path().join("AppIcon.appiconset");
    fs::create_dir(&out).unwrap();

    let config = IconSetConfig::load(&config_path).unwrap();
    let (report, created) = export_into(&ExportPipeline::with_config(config), &out);

    assert_eq!(created, vec!["icon_40x40.png", "Contents.json"]);
    assert_eq!(report.master_size, 40);
    let contents = read_manifest(&out);
    assert_eq!(contents.info.author, "designer");
    assert_eq!(contents.info.version, 2);

    let img = image::open(out.join("icon_40x40.png")).unwrap().to_rgba8();
    assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0, 255]);
}

#[test]
fn invariant_render_command_writes_master() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("master.png");
    ExportPipeline::default().render_master(&path, 256).unwrap();

    let img = image::open(&path).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (256, 256));
    assert!(img.pixels().all(|p| p.0[3] == 255));
    assert_eq!(img.get_pixel(0, 0).0, [102, 126, 234, 255]);
}
