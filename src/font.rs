use ab_glyph::{FontVec, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_text_mut, text_size};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

use crate::position::TextBox;

/// TrueType files tried, in order, after any explicitly configured font.
const FONT_CANDIDATES: &[&str] = &[
    "DejaVuSans.ttf",
    "static/DejaVuSans.ttf",
    "arial.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:/Windows/Fonts/arial.ttf",
];

/// Pixel scale applied to the built-in glyphs.
const BUILTIN_SCALE: u32 = 2;
const GLYPH_WIDTH: u32 = 5;
const GLYPH_HEIGHT: u32 = 7;
/// One blank column between glyphs.
const GLYPH_ADVANCE: u32 = GLYPH_WIDTH + 1;

/// The font used to draw the stamp.
pub enum StampFont {
    TrueType {
        font: FontVec,
        scale: PxScale,
        source: PathBuf,
    },
    /// 5x7 bitmap font compiled into the binary. Ignores the requested size.
    Builtin,
}

impl std::fmt::Debug for StampFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StampFont::TrueType { scale, source, .. } => f
                .debug_struct("TrueType")
                .field("scale", &scale.y)
                .field("source", source)
                .finish(),
            StampFont::Builtin => f.write_str("Builtin"),
        }
    }
}

impl StampFont {
    /// Walk the fallback chain, ending at the built-in font.
    pub fn load(font_size: u32, preferred: Option<&Path>) -> Self {
        let candidates = preferred
            .into_iter()
            .map(Path::to_path_buf)
            .chain(FONT_CANDIDATES.iter().map(PathBuf::from));

        for path in candidates {
            if let Some(font) = Self::load_truetype(&path, font_size) {
                return font;
            }
        }

        debug!("No TrueType font available, using built-in bitmap font");
        StampFont::Builtin
    }

    pub fn load_truetype(path: &Path, font_size: u32) -> Option<Self> {
        let data = match std::fs::read(path) {
            Ok(data) => data,
            Err(e) => {
                trace!("Font {:?} not readable: {}", path, e);
                return None;
            }
        };

        match FontVec::try_from_vec(data) {
            Ok(font) => {
                debug!("Loaded font {:?} at {}px", path, font_size);
                Some(StampFont::TrueType {
                    font,
                    scale: PxScale::from(font_size as f32),
                    source: path.to_path_buf(),
                })
            }
            Err(e) => {
                debug!("Failed to parse font {:?}: {}", path, e);
                None
            }
        }
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self, StampFont::Builtin)
    }

    /// Extents of `text` when drawn at the origin.
    pub fn text_box(&self, text: &str) -> TextBox {
        match self {
            StampFont::TrueType { font, scale, .. } => {
                let (width, height) = text_size(*scale, font, text);
                TextBox::from_size(width, height)
            }
            StampFont::Builtin => {
                let chars = text.chars().count() as u32;
                let width = if chars == 0 {
                    0
                } else {
                    (chars * GLYPH_ADVANCE - 1) * BUILTIN_SCALE
                };
                TextBox::from_size(width, GLYPH_HEIGHT * BUILTIN_SCALE)
            }
        }
    }

    /// Draw `text` with its top-left corner at `(x, y)`. Pixels falling
    /// outside the canvas are dropped.
    pub fn draw(&self, canvas: &mut RgbImage, color: Rgb<u8>, x: i32, y: i32, text: &str) {
        match self {
            StampFont::TrueType { font, scale, .. } => {
                draw_text_mut(canvas, color, x, y, *scale, font, text);
            }
            StampFont::Builtin => draw_builtin(canvas, color, x, y, text),
        }
    }
}

fn draw_builtin(canvas: &mut RgbImage, color: Rgb<u8>, x: i32, y: i32, text: &str) {
    let scale = BUILTIN_SCALE as i32;
    let (width, height) = (canvas.width() as i32, canvas.height() as i32);

    for (index, ch) in text.chars().enumerate() {
        let origin_x = x + (index as i32) * (GLYPH_ADVANCE as i32) * scale;
        let rows = glyph(ch);

        for (row, bits) in rows.iter().enumerate() {
            for col in 0..GLYPH_WIDTH {
                if bits & (1 << (GLYPH_WIDTH - 1 - col)) == 0 {
                    continue;
                }
                for dy in 0..scale {
                    for dx in 0..scale {
                        let px = origin_x + col as i32 * scale + dx;
                        let py = y + row as i32 * scale + dy;
                        if px >= 0 && py >= 0 && px < width && py < height {
                            canvas.put_pixel(px as u32, py as u32, color);
                        }
                    }
                }
            }
        }
    }
}

/// Row bitmaps, most significant of the low five bits is the leftmost column.
fn glyph(ch: char) -> [u8; GLYPH_HEIGHT as usize] {
    match ch {
        '0' => [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
        '1' => [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
        '2' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
        '3' => [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
        '4' => [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
        '5' => [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
        '6' => [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
        '7' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        '8' => [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
        '9' => [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
        '-' => [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00],
        ':' => [0x00, 0x0C, 0x0C, 0x00, 0x0C, 0x0C, 0x00],
        '/' => [0x00, 0x01, 0x02, 0x04, 0x08, 0x10, 0x00],
        '.' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C],
        ' ' => [0x00; GLYPH_HEIGHT as usize],
        // Unknown characters render as a hollow box.
        _ => [0x1F, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1F],
    }
}
