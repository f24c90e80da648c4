use image::{ExtendedColorType, ImageEncoder, Rgb, RgbImage, codecs::jpeg::JpegEncoder};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::debug;

use crate::WatermarkConfig;
use crate::error::RenderError;
use crate::font::StampFont;
use crate::position;

/// Offset of the shadow copy, in pixels right and down.
pub const SHADOW_OFFSET: i32 = 2;
pub const SHADOW_COLOR: Rgb<u8> = Rgb([0, 0, 0]);
/// Encoder quality for formats that take one.
pub const JPEG_QUALITY: u8 = 95;

/// Draws date stamps using one resolved font for the whole run.
pub struct Watermarker<'a> {
    config: &'a WatermarkConfig,
    font: StampFont,
}

impl<'a> Watermarker<'a> {
    pub fn new(config: &'a WatermarkConfig) -> Self {
        let font = StampFont::load(config.font_size, config.font_path.as_deref());
        Self::with_font(config, font)
    }

    pub fn with_font(config: &'a WatermarkConfig, font: StampFont) -> Self {
        Self { config, font }
    }

    pub fn font(&self) -> &StampFont {
        &self.font
    }

    /// Stamp `text` onto the image at `input` and write it to `output`.
    pub fn render(&self, input: &Path, output: &Path, text: &str) -> Result<(), RenderError> {
        let mut canvas = image::open(input)?.into_rgb8();
        self.stamp(&mut canvas, text);
        save(&canvas, output)?;
        debug!("Wrote {}", output.display());
        Ok(())
    }

    /// Draw the shadow, then the foreground text on top of it.
    pub fn stamp(&self, canvas: &mut RgbImage, text: &str) {
        let text_box = self.font.text_box(text);
        let (x, y) = position::compute(
            canvas.dimensions(),
            text_box,
            self.config.position,
            self.config.margin,
        );

        self.font
            .draw(canvas, SHADOW_COLOR, x + SHADOW_OFFSET, y + SHADOW_OFFSET, text);
        self.font.draw(canvas, self.config.color.to_rgb(), x, y, text);
    }
}

/// Stamp a single file: resolves the font chain, then renders.
///
/// Batch runs build one [`Watermarker`] instead so the chain is walked once.
pub fn render_watermark(
    input: &Path,
    output: &Path,
    text: &str,
    config: &WatermarkConfig,
) -> Result<(), RenderError> {
    Watermarker::new(config).render(input, output, text)
}

fn save(canvas: &RgbImage, output: &Path) -> Result<(), RenderError> {
    let is_jpeg = output
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("jpg") || ext.eq_ignore_ascii_case("jpeg"))
        .unwrap_or(false);

    if is_jpeg {
        let writer = BufWriter::new(File::create(output)?);
        let encoder = JpegEncoder::new_with_quality(writer, JPEG_QUALITY);
        encoder.write_image(
            canvas,
            canvas.width(),
            canvas.height(),
            ExtendedColorType::Rgb8,
        )?;
    } else {
        canvas.save(output)?;
    }

    Ok(())
}
