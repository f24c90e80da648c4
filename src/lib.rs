use std::path::PathBuf;

pub mod batch;
pub mod color;
pub mod error;
pub mod exif_date;
pub mod font;
pub mod position;
pub mod report;
pub mod watermark;

pub use batch::{BatchSummary, run};
pub use color::Color;
pub use error::{FileError, RenderError, RunError};
pub use position::Anchor;
pub use report::{ConsoleReporter, Reporter};

/// Settings applied to every image in a run.
#[derive(Debug, Clone, PartialEq)]
pub struct WatermarkConfig {
    /// Text height in pixels.
    pub font_size: u32,
    pub color: Color,
    pub position: Anchor,
    /// Distance from the anchored edges, in pixels.
    pub margin: u32,
    /// TrueType font tried before the built-in search list.
    pub font_path: Option<PathBuf>,
}

impl Default for WatermarkConfig {
    fn default() -> Self {
        Self {
            font_size: 50,
            color: Color::default(),
            position: Anchor::default(),
            margin: 20,
            font_path: None,
        }
    }
}
