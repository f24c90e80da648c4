use rexif::{ExifError, ExifTag};
use std::path::Path;
use tracing::{debug, trace};

/// Date tags consulted, highest priority first.
const DATE_TAGS: [ExifTag; 3] = [
    ExifTag::DateTimeOriginal,
    ExifTag::DateTime,
    ExifTag::DateTimeDigitized,
];

/// Result of looking for a capture date in an image's EXIF block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateLookup {
    /// A date formatted as `YYYY-MM-DD`.
    Found(String),
    /// The file carries no EXIF block, or its format cannot carry one.
    NoMetadata,
    /// EXIF is present but has none of the date tags.
    NoDateTag,
    /// EXIF is present but could not be parsed.
    Unreadable(String),
}

impl DateLookup {
    pub fn date(self) -> Option<String> {
        match self {
            DateLookup::Found(date) => Some(date),
            _ => None,
        }
    }
}

pub fn extract(image_path: &Path) -> DateLookup {
    match rexif::parse_file(image_path) {
        Ok(exif) => {
            let entries = exif
                .entries
                .iter()
                .map(|entry| (entry.tag, &*entry.value_more_readable));
            match pick_capture_date(entries) {
                Some(date) => {
                    debug!("Capture date for {}: {}", image_path.display(), date);
                    DateLookup::Found(date)
                }
                None => DateLookup::NoDateTag,
            }
        }
        Err(ExifError::JpegWithoutExif(_)) | Err(ExifError::FileTypeUnknown) => {
            trace!("No EXIF data for {}", image_path.display());
            DateLookup::NoMetadata
        }
        Err(e) => {
            trace!("Failed to parse EXIF for {}: {}", image_path.display(), e);
            DateLookup::Unreadable(e.to_string())
        }
    }
}

/// Choose a date from `(tag, value)` pairs by fixed tag priority, independent
/// of the order the entries were stored in.
pub fn pick_capture_date<'a>(entries: impl IntoIterator<Item = (ExifTag, &'a str)>) -> Option<String> {
    let mut found: [Option<&str>; DATE_TAGS.len()] = [None; DATE_TAGS.len()];

    for (tag, value) in entries {
        if let Some(rank) = DATE_TAGS.iter().position(|t| *t == tag) {
            found[rank].get_or_insert(value);
        }
    }

    found.into_iter().flatten().find_map(format_exif_date)
}

/// `"2024:11:12 14:30:45"` becomes `"2024-11-12"`.
pub fn format_exif_date(value: &str) -> Option<String> {
    let date = value.split_whitespace().next()?;
    Some(date.replace(':', "-"))
}
