use std::fmt;

/// Named placement of the stamp relative to the image bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Anchor {
    TopLeft,
    TopCenter,
    TopRight,
    Center,
    BottomLeft,
    BottomCenter,
    #[default]
    BottomRight,
}

impl Anchor {
    pub const ALL: [Anchor; 7] = [
        Anchor::TopLeft,
        Anchor::TopCenter,
        Anchor::TopRight,
        Anchor::Center,
        Anchor::BottomLeft,
        Anchor::BottomCenter,
        Anchor::BottomRight,
    ];

    /// Unrecognized names resolve to `BottomRight`.
    pub fn from_name(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|anchor| anchor.name() == name)
            .unwrap_or_default()
    }

    pub fn name(&self) -> &'static str {
        match self {
            Anchor::TopLeft => "top-left",
            Anchor::TopCenter => "top-center",
            Anchor::TopRight => "top-right",
            Anchor::Center => "center",
            Anchor::BottomLeft => "bottom-left",
            Anchor::BottomCenter => "bottom-center",
            Anchor::BottomRight => "bottom-right",
        }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Pixel extents of rendered text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextBox {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl TextBox {
    pub fn from_size(width: u32, height: u32) -> Self {
        Self {
            left: 0,
            top: 0,
            right: width as i32,
            bottom: height as i32,
        }
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }
}

/// Top-left draw coordinates for text of `text_box` size placed at `anchor`.
///
/// Coordinates are not clamped: text larger than the image minus margins
/// produces negative values.
pub fn compute(image_size: (u32, u32), text_box: TextBox, anchor: Anchor, margin: u32) -> (i32, i32) {
    let (width, height) = (image_size.0 as i32, image_size.1 as i32);
    let (text_width, text_height) = (text_box.width(), text_box.height());
    let margin = margin as i32;

    let center_x = (width - text_width) / 2;
    let right_x = width - text_width - margin;
    let bottom_y = height - text_height - margin;

    match anchor {
        Anchor::TopLeft => (margin, margin),
        Anchor::TopCenter => (center_x, margin),
        Anchor::TopRight => (right_x, margin),
        Anchor::Center => (center_x, (height - text_height) / 2),
        Anchor::BottomLeft => (margin, bottom_y),
        Anchor::BottomCenter => (center_x, bottom_y),
        Anchor::BottomRight => (right_x, bottom_y),
    }
}
