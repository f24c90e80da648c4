use image::Rgb;
use std::fmt;

/// One of the color names accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamedColor {
    White,
    Black,
    Red,
    Green,
    Blue,
    Yellow,
    Cyan,
    Magenta,
}

impl NamedColor {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "white" => Some(NamedColor::White),
            "black" => Some(NamedColor::Black),
            "red" => Some(NamedColor::Red),
            "green" => Some(NamedColor::Green),
            "blue" => Some(NamedColor::Blue),
            "yellow" => Some(NamedColor::Yellow),
            "cyan" => Some(NamedColor::Cyan),
            "magenta" => Some(NamedColor::Magenta),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            NamedColor::White => "white",
            NamedColor::Black => "black",
            NamedColor::Red => "red",
            NamedColor::Green => "green",
            NamedColor::Blue => "blue",
            NamedColor::Yellow => "yellow",
            NamedColor::Cyan => "cyan",
            NamedColor::Magenta => "magenta",
        }
    }

    /// Palette values follow the usual X11/CSS names, so `green` is half intensity.
    pub fn rgb(&self) -> [u8; 3] {
        match self {
            NamedColor::White => [255, 255, 255],
            NamedColor::Black => [0, 0, 0],
            NamedColor::Red => [255, 0, 0],
            NamedColor::Green => [0, 128, 0],
            NamedColor::Blue => [0, 0, 255],
            NamedColor::Yellow => [255, 255, 0],
            NamedColor::Cyan => [0, 255, 255],
            NamedColor::Magenta => [255, 0, 255],
        }
    }
}

/// Text color for the date stamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Named(NamedColor),
    Rgb(u8, u8, u8),
}

impl Default for Color {
    fn default() -> Self {
        Color::Named(NamedColor::White)
    }
}

impl Color {
    /// Resolve a user supplied token into a color.
    ///
    /// Tries the named palette first, then a `r,g,b` triple. Anything that
    /// does not parse resolves to white; this never fails.
    pub fn resolve(token: &str) -> Self {
        let token = token.to_lowercase();

        if let Some(named) = NamedColor::from_name(&token) {
            return Color::Named(named);
        }

        if token.contains(',') {
            if let Some(color) = parse_rgb_triple(&token) {
                return color;
            }
        }

        Color::default()
    }

    pub fn to_rgb(&self) -> Rgb<u8> {
        match self {
            Color::Named(named) => Rgb(named.rgb()),
            Color::Rgb(r, g, b) => Rgb([*r, *g, *b]),
        }
    }
}

fn parse_rgb_triple(token: &str) -> Option<Color> {
    // Parse into i64 first so "300" is rejected as out of range rather than
    // as a parse failure; both end at the same default anyway.
    let channels: Vec<i64> = token
        .split(',')
        .map(|part| part.trim().parse::<i64>())
        .collect::<Result<_, _>>()
        .ok()?;

    match channels.as_slice() {
        [r, g, b] => Some(Color::Rgb(
            u8::try_from(*r).ok()?,
            u8::try_from(*g).ok()?,
            u8::try_from(*b).ok()?,
        )),
        _ => None,
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Named(named) => f.write_str(named.name()),
            Color::Rgb(r, g, b) => write!(f, "({}, {}, {})", r, g, b),
        }
    }
}
