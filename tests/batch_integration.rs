use datestamp::report::{Event, FileStatus, RecordingReporter};
use datestamp::{Color, RunError, WatermarkConfig, batch};
use image::{Rgb, RgbImage};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn test_config() -> WatermarkConfig {
    WatermarkConfig {
        font_size: 16,
        color: Color::resolve("white"),
        margin: 5,
        ..WatermarkConfig::default()
    }
}

/// Creates `<temp>/photos` and returns both.
fn photo_dir() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path().join("photos");
    std::fs::create_dir(&dir).unwrap();
    (temp_dir, dir)
}

fn write_image(path: &Path) {
    RgbImage::from_pixel(160, 120, Rgb([60, 60, 60]))
        .save(path)
        .unwrap();
}

/// Minimal little-endian TIFF block: DateTime in IFD0 and DateTimeOriginal in
/// the EXIF sub-IFD.
fn exif_block(date_time: &str, date_time_original: &str) -> Vec<u8> {
    fn ascii20(value: &str) -> Vec<u8> {
        let mut bytes = value.as_bytes().to_vec();
        bytes.resize(20, 0);
        bytes
    }
    fn entry(tag: u16, kind: u16, count: u32, value: u32) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&tag.to_le_bytes());
        bytes.extend_from_slice(&kind.to_le_bytes());
        bytes.extend_from_slice(&count.to_le_bytes());
        bytes.extend_from_slice(&value.to_le_bytes());
        bytes
    }

    const ASCII: u16 = 2;
    const LONG: u16 = 4;
    let ifd0 = 8u32;
    let date_time_at = ifd0 + 2 + 2 * 12 + 4;
    let exif_ifd = date_time_at + 20;
    let original_at = exif_ifd + 2 + 12 + 4;

    let mut tiff = Vec::new();
    tiff.extend_from_slice(b"II");
    tiff.extend_from_slice(&42u16.to_le_bytes());
    tiff.extend_from_slice(&ifd0.to_le_bytes());

    tiff.extend_from_slice(&2u16.to_le_bytes());
    tiff.extend(entry(0x0132, ASCII, 20, date_time_at));
    tiff.extend(entry(0x8769, LONG, 1, exif_ifd));
    tiff.extend_from_slice(&0u32.to_le_bytes());
    tiff.extend(ascii20(date_time));

    tiff.extend_from_slice(&1u16.to_le_bytes());
    tiff.extend(entry(0x9003, ASCII, 20, original_at));
    tiff.extend_from_slice(&0u32.to_le_bytes());
    tiff.extend(ascii20(date_time_original));

    tiff
}

/// Writes a JPEG with an APP1 EXIF segment right after SOI.
fn write_jpeg_with_exif(path: &Path, date_time: &str, date_time_original: &str) {
    let mut jpeg = Vec::new();
    RgbImage::from_pixel(160, 120, Rgb([60, 60, 60]))
        .write_to(&mut std::io::Cursor::new(&mut jpeg), image::ImageFormat::Jpeg)
        .unwrap();

    let mut payload = b"Exif\0\0".to_vec();
    payload.extend(exif_block(date_time, date_time_original));

    let mut segment = vec![0xFF, 0xE1];
    segment.extend_from_slice(&((payload.len() + 2) as u16).to_be_bytes());
    segment.extend(payload);

    let mut out = jpeg[..2].to_vec();
    out.extend(segment);
    out.extend_from_slice(&jpeg[2..]);
    std::fs::write(path, out).unwrap();
}

fn output_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn test_processes_only_matching_images() {
    let (_temp_dir, dir) = photo_dir();
    write_image(&dir.join("one.png"));
    write_image(&dir.join("two.JPG"));
    write_image(&dir.join("three.bmp"));
    write_image(&dir.join("four.tiff"));
    std::fs::write(dir.join("readme.txt"), "not a photo").unwrap();
    std::fs::write(dir.join("clip.mp4"), [0u8; 16]).unwrap();

    let mut reporter = RecordingReporter::default();
    let summary = batch::run(&dir, &test_config(), &mut reporter).unwrap();

    assert_eq!(summary.total, 4);
    assert_eq!(summary.processed, 4);
    assert_eq!(summary.failed, 0);
    assert_eq!(summary.output_dir, dir.join("photos_watermark"));
    assert_eq!(
        output_names(&summary.output_dir),
        vec!["four.tiff", "one.png", "three.bmp", "two.JPG"]
    );
    assert!(
        reporter
            .events
            .iter()
            .any(|e| matches!(e, Event::Info(m) if m.contains("4/4")))
    );
}

#[test]
fn test_originals_untouched_and_output_stamped() {
    let (_temp_dir, dir) = photo_dir();
    let source = dir.join("shot.png");
    write_image(&source);
    let before = std::fs::read(&source).unwrap();

    let mut reporter = RecordingReporter::default();
    let summary = batch::run(&dir, &test_config(), &mut reporter).unwrap();

    assert_eq!(std::fs::read(&source).unwrap(), before);

    let original = image::open(&source).unwrap().into_rgb8();
    let stamped = image::open(summary.output_dir.join("shot.png"))
        .unwrap()
        .into_rgb8();
    assert_eq!(original.dimensions(), stamped.dimensions());
    assert!(original.pixels().zip(stamped.pixels()).any(|(a, b)| a != b));
    // Top-left stays untouched for a bottom-right stamp.
    assert_eq!(stamped.get_pixel(0, 0), original.get_pixel(0, 0));
}

#[test]
fn test_rerun_reuses_output_directory() {
    let (_temp_dir, dir) = photo_dir();
    write_image(&dir.join("a.png"));
    write_image(&dir.join("b.png"));

    let config = test_config();
    let first = batch::run(&dir, &config, &mut RecordingReporter::default()).unwrap();
    let first_bytes = std::fs::read(first.output_dir.join("a.png")).unwrap();
    let second = batch::run(&dir, &config, &mut RecordingReporter::default()).unwrap();

    assert_eq!(first.output_dir, second.output_dir);
    assert_eq!(second.processed, 2);
    assert_eq!(output_names(&second.output_dir), vec!["a.png", "b.png"]);
    assert_eq!(
        std::fs::read(second.output_dir.join("a.png")).unwrap(),
        first_bytes
    );
    assert_eq!(output_names(&dir), vec!["a.png", "b.png", "photos_watermark"]);
}

#[test]
fn test_no_images_found() {
    let (_temp_dir, dir) = photo_dir();
    std::fs::write(dir.join("notes.txt"), "nothing here").unwrap();

    let mut reporter = RecordingReporter::default();
    let result = batch::run(&dir, &test_config(), &mut reporter);

    assert!(matches!(result, Err(RunError::NoImagesFound(_))));
    let output_dir = dir.join("photos_watermark");
    assert!(output_dir.is_dir());
    assert!(output_names(&output_dir).is_empty());
    assert_eq!(reporter.finished().count(), 0);
}

#[test]
fn test_exif_date_preferred_over_mtime() {
    let (_temp_dir, dir) = photo_dir();
    write_jpeg_with_exif(
        &dir.join("camera.jpg"),
        "2019:05:05 08:00:00",
        "2018:04:04 09:30:00",
    );

    let mut reporter = RecordingReporter::default();
    let summary = batch::run(&dir, &test_config(), &mut reporter).unwrap();

    assert_eq!(summary.processed, 1);
    let (name, status) = reporter.finished().next().unwrap();
    assert_eq!(name, "camera.jpg");
    assert_eq!(
        status,
        &FileStatus::Stamped {
            output: summary.output_dir.join("camera.jpg"),
            date: "2018-04-04".to_string(),
        }
    );
    assert!(!reporter.warnings().any(|w| w.contains("modification date")));
}

#[test]
fn test_missing_exif_uses_modification_date() {
    let (_temp_dir, dir) = photo_dir();
    let path = dir.join("scan.png");
    write_image(&path);
    let expected = batch::modified_date(&path).unwrap();

    let mut reporter = RecordingReporter::default();
    batch::run(&dir, &test_config(), &mut reporter).unwrap();

    let (_, status) = reporter.finished().next().unwrap();
    match status {
        FileStatus::Stamped { date, .. } => assert_eq!(date, &expected),
        other => panic!("unexpected status: {:?}", other),
    }
    assert!(reporter.warnings().any(|w| w.contains("modification date")));
}

#[test]
fn test_corrupt_file_does_not_stop_batch() {
    let (_temp_dir, dir) = photo_dir();
    std::fs::write(dir.join("a_broken.jpg"), b"definitely not a jpeg").unwrap();
    write_image(&dir.join("b_good.png"));

    let mut reporter = RecordingReporter::default();
    let summary = batch::run(&dir, &test_config(), &mut reporter).unwrap();

    assert_eq!(summary.total, 2);
    assert_eq!(summary.processed, 1);
    assert_eq!(summary.failed, 1);

    let finished: Vec<_> = reporter.finished().collect();
    assert_eq!(finished.len(), 2);
    assert_eq!(finished[0].0, "a_broken.jpg");
    assert!(matches!(finished[0].1, FileStatus::Failed { .. }));
    assert!(matches!(finished[1].1, FileStatus::Stamped { .. }));
    assert_eq!(output_names(&summary.output_dir), vec!["b_good.png"]);
}
