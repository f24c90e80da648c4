use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::WatermarkConfig;
use crate::error::{FileError, RunError};
use crate::exif_date::{self, DateLookup};
use crate::font::StampFont;
use crate::report::{FileStatus, Reporter};
use crate::watermark::Watermarker;

/// Extensions (lowercase, without the dot) picked up from the input directory.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif"];

/// Suffix appended to the input directory's name for the output directory.
pub const OUTPUT_SUFFIX: &str = "_watermark";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    /// Files whose stamped copy was written.
    pub processed: usize,
    pub failed: usize,
    pub output_dir: PathBuf,
}

/// Stamp every image directly inside `input_dir`, writing the results into
/// `<input_dir>/<name>_watermark/`.
///
/// A failing file is reported and skipped; only problems with the directory
/// itself end the run early.
pub fn run(
    input_dir: &Path,
    config: &WatermarkConfig,
    reporter: &mut dyn Reporter,
) -> Result<BatchSummary, RunError> {
    run_with_font(
        input_dir,
        config,
        || StampFont::load(config.font_size, config.font_path.as_deref()),
        reporter,
    )
}

/// Like [`run`], with the font supplied by `load_font`. The loader is only
/// called once images have been found.
pub fn run_with_font(
    input_dir: &Path,
    config: &WatermarkConfig,
    load_font: impl FnOnce() -> StampFont,
    reporter: &mut dyn Reporter,
) -> Result<BatchSummary, RunError> {
    if !input_dir.exists() {
        return Err(RunError::DirectoryNotFound(input_dir.to_path_buf()));
    }
    if !input_dir.is_dir() {
        return Err(RunError::NotADirectory(input_dir.to_path_buf()));
    }

    let output_dir = output_dir_for(input_dir);
    std::fs::create_dir_all(&output_dir).map_err(|source| RunError::OutputDirectory {
        path: output_dir.clone(),
        source,
    })?;
    reporter.info(&format!("Output directory: {}", output_dir.display()));

    let images = discover_images(input_dir);
    if images.is_empty() {
        return Err(RunError::NoImagesFound(input_dir.to_path_buf()));
    }
    reporter.info(&format!("Found {} images", images.len()));

    let watermarker = Watermarker::with_font(config, load_font());
    if watermarker.font().is_builtin() {
        reporter.warn("No TrueType font could be loaded, using the built-in font (font size is ignored)");
    }

    let mut summary = BatchSummary {
        total: images.len(),
        processed: 0,
        failed: 0,
        output_dir: output_dir.clone(),
    };

    for image_path in &images {
        let file_name = display_name(image_path);
        reporter.info(&format!("Processing: {}", file_name));

        let output_path = output_dir.join(image_path.file_name().unwrap_or_default());
        let status = match process_file(&watermarker, image_path, &output_path, reporter) {
            Ok(date) => {
                summary.processed += 1;
                FileStatus::Stamped {
                    output: output_path,
                    date,
                }
            }
            Err(e) => {
                summary.failed += 1;
                FileStatus::Failed {
                    reason: e.to_string(),
                }
            }
        };
        reporter.file_done(&file_name, &status);
    }

    info!(
        "Stamped {}/{} images into {}",
        summary.processed,
        summary.total,
        output_dir.display()
    );
    reporter.info(&format!(
        "Done! Processed {}/{} images",
        summary.processed, summary.total
    ));
    reporter.info(&format!("Output directory: {}", output_dir.display()));

    Ok(summary)
}

fn process_file(
    watermarker: &Watermarker<'_>,
    image_path: &Path,
    output_path: &Path,
    reporter: &mut dyn Reporter,
) -> Result<String, FileError> {
    let date = resolve_date(image_path, reporter)?;
    watermarker.render(image_path, output_path, &date)?;
    Ok(date)
}

/// Capture date from EXIF, or the file's modification date when EXIF has none.
pub fn resolve_date(image_path: &Path, reporter: &mut dyn Reporter) -> Result<String, FileError> {
    let file_name = display_name(image_path);

    match exif_date::extract(image_path) {
        DateLookup::Found(date) => return Ok(date),
        DateLookup::NoMetadata => reporter.warn(&format!("{} has no EXIF metadata", file_name)),
        DateLookup::NoDateTag => {
            reporter.warn(&format!("{} has no capture date in its EXIF", file_name))
        }
        DateLookup::Unreadable(e) => {
            reporter.error(&format!("Failed to read EXIF from {}: {}", file_name, e))
        }
    }

    let date = modified_date(image_path)?;
    reporter.warn(&format!("Using file modification date: {}", date));
    Ok(date)
}

/// Local modification date of `path` as `YYYY-MM-DD`.
pub fn modified_date(path: &Path) -> Result<String, FileError> {
    let modified = std::fs::metadata(path)
        .and_then(|metadata| metadata.modified())
        .map_err(|source| FileError::ModifiedTime {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(DateTime::<Local>::from(modified).format("%Y-%m-%d").to_string())
}

/// Image files directly inside `dir`, sorted by file name.
pub fn discover_images(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|entry| entry.file_type().is_file() && is_image(entry.path()))
        .map(|entry| entry.into_path())
        .collect()
}

pub fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let lower = ext.to_lowercase();
            IMAGE_EXTENSIONS.contains(&lower.as_str())
        })
        .unwrap_or(false)
}

/// `<dir>/<dir name>_watermark`. Falls back to the canonical name for paths
/// like `.` that have no final component.
pub fn output_dir_for(input_dir: &Path) -> PathBuf {
    let name = input_dir
        .file_name()
        .map(|name| name.to_os_string())
        .or_else(|| {
            std::fs::canonicalize(input_dir)
                .ok()
                .and_then(|path| path.file_name().map(|name| name.to_os_string()))
        })
        .unwrap_or_default();

    let mut dir_name = name;
    dir_name.push(OUTPUT_SUFFIX);
    debug!("Output directory name: {:?}", dir_name);
    input_dir.join(dir_name)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
