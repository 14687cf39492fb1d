use image::Rgba;
use std::path::PathBuf;

/// Side length of the rendered canvas, in pixels.
pub const CANVAS_SIZE: u32 = 32;

pub const BACKGROUND: Rgba<u8> = Rgba([30, 64, 175, 255]);
pub const BORDER: Rgba<u8> = Rgba([255, 255, 255, 255]);
pub const GLYPH_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);
pub const DOT_COLOR: Rgba<u8> = Rgba([59, 130, 246, 179]);

/// Font files tried in order before falling back to the built-in glyphs.
pub const FONT_CANDIDATES: &[&str] = &[
    "/System/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Helvetica.ttc",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// A decorative dot, centered on a pixel coordinate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dot {
    pub x: u32,
    pub y: u32,
}

/// Every parameter of the generated icon.
#[derive(Clone, Debug)]
pub struct IconSpec {
    pub size: u32,
    pub background: Rgba<u8>,
    pub border: Rgba<u8>,
    pub border_width: u32,
    pub glyph: char,
    pub glyph_color: Rgba<u8>,
    pub font_size: f32,
    pub font_candidates: Vec<PathBuf>,
    pub dots: Vec<Dot>,
    pub dot_radius: f32,
    pub dot_color: Rgba<u8>,
    pub png_name: &'static str,
    pub ico_name: &'static str,
    pub ico_sizes: Vec<u32>,
}

impl IconSpec {
    /// The favicon this program ships.
    pub fn favicon() -> Self {
        Self {
            size: CANVAS_SIZE,
            background: BACKGROUND,
            border: BORDER,
            border_width: 1,
            glyph: '$',
            glyph_color: GLYPH_COLOR,
            font_size: 18.0,
            font_candidates: FONT_CANDIDATES.iter().map(PathBuf::from).collect(),
            dots: vec![
                Dot { x: 8, y: 8 },
                Dot { x: 24, y: 8 },
                Dot { x: 8, y: 24 },
                Dot { x: 24, y: 24 },
            ],
            dot_radius: 1.5,
            dot_color: DOT_COLOR,
            png_name: "favicon.png",
            ico_name: "favicon.ico",
            ico_sizes: vec![16, 32, 48],
        }
    }
}

/// Paths of the files written by a generator run.
#[derive(Clone, Debug, PartialEq)]
pub struct OutputFiles {
    pub png: PathBuf,
    pub ico: PathBuf,
}
