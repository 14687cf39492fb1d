use crate::error::{Error, Result};
use cosmic_text::{Attrs, Buffer, Color, Family, FontSystem, Metrics, Shaping, SwashCache, Wrap, fontdb};
use std::fs;
use std::path::Path;

/// Rows of the built-in `$` bitmap, 5 columns by 9 rows.
const BUILTIN_DOLLAR: [&str; 9] = [
    "..#..",
    ".####",
    "#.#..",
    "#.#..",
    ".###.",
    "..#.#",
    "..#.#",
    "####.",
    "..#..",
];

/// Drawn by the built-in renderer for any character it has no bitmap for.
const BUILTIN_MISSING: [&str; 9] = [
    "#####",
    "#...#",
    "#...#",
    "#...#",
    "#...#",
    "#...#",
    "#...#",
    "#...#",
    "#####",
];

const BUILTIN_COLS: u32 = 5;
const BUILTIN_ROWS: u32 = 9;

/// Coverage bitmap of a single glyph, cropped to its ink bounding box.
#[derive(Clone, Debug, PartialEq)]
pub struct GlyphMask {
    pub width: u32,
    pub height: u32,
    pub coverage: Vec<u8>,
}

impl GlyphMask {
    pub fn empty() -> Self {
        Self { width: 0, height: 0, coverage: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn coverage_at(&self, x: u32, y: u32) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.coverage[(y * self.width + x) as usize]
    }

    /// Crops a full scratch bitmap down to the box holding every non-zero pixel.
    fn cropped(width: u32, height: u32, coverage: &[u8]) -> Self {
        let mut bounds: Option<(u32, u32, u32, u32)> = None;
        for y in 0..height {
            for x in 0..width {
                if coverage[(y * width + x) as usize] == 0 {
                    continue;
                }
                bounds = Some(match bounds {
                    None => (x, y, x, y),
                    Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
                });
            }
        }

        let Some((x0, y0, x1, y1)) = bounds else {
            return Self::empty();
        };

        let crop_width = x1 - x0 + 1;
        let crop_height = y1 - y0 + 1;
        let mut cropped = Vec::with_capacity((crop_width * crop_height) as usize);
        for y in y0..=y1 {
            let row = (y * width) as usize;
            cropped.extend_from_slice(&coverage[row + x0 as usize..=row + x1 as usize]);
        }

        Self { width: crop_width, height: crop_height, coverage: cropped }
    }
}

/// An outline font loaded from a file, with its own font database.
pub struct OutlineFont {
    font_system: FontSystem,
    cache: SwashCache,
    family: String,
    size: f32,
}

impl OutlineFont {
    /// Loads a TrueType/OpenType file (collections included) at the given pixel size.
    pub fn load(path: &Path, size: f32) -> Result<Self> {
        let data = fs::read(path).map_err(|source| Error::FontLoad { path: path.to_path_buf(), source })?;

        let mut db = fontdb::Database::new();
        db.load_font_data(data);

        let family = db
            .faces()
            .find_map(|face| face.families.first().map(|(name, _)| name.clone()))
            .ok_or_else(|| Error::EmptyFont(path.to_path_buf()))?;

        Ok(Self {
            font_system: FontSystem::new_with_locale_and_db("en-US".to_string(), db),
            cache: SwashCache::new(),
            family,
            size,
        })
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    fn rasterize(&mut self, ch: char) -> GlyphMask {
        // Scratch area comfortably larger than any glyph at this size.
        let extent = (self.size * 3.0).ceil().max(1.0) as u32;
        let mut coverage = vec![0u8; (extent * extent) as usize];

        let mut utf8 = [0u8; 4];
        let text: &str = ch.encode_utf8(&mut utf8);

        let mut buffer = Buffer::new_empty(Metrics::new(self.size, self.size * 1.5));
        let mut buffer = buffer.borrow_with(&mut self.font_system);
        buffer.set_size(Some(extent as f32), Some(extent as f32));
        buffer.set_wrap(Wrap::None);

        let attrs = Attrs::new().family(Family::Name(&self.family));
        buffer.set_text(text, &attrs, Shaping::Advanced);
        buffer.shape_until_scroll(false);

        buffer.draw(&mut self.cache, Color::rgb(255, 255, 255), |x, y, w, h, color| {
            let alpha = color.a();
            if alpha == 0 {
                return;
            }
            for gy in 0..h as i32 {
                for gx in 0..w as i32 {
                    let px = x + gx;
                    let py = y + gy;
                    if px < 0 || py < 0 || px >= extent as i32 || py >= extent as i32 {
                        continue;
                    }
                    let idx = (py as u32 * extent + px as u32) as usize;
                    coverage[idx] = coverage[idx].max(alpha);
                }
            }
        });

        GlyphMask::cropped(extent, extent, &coverage)
    }
}

/// The font a run draws its glyph with.
pub enum Font {
    Outline(Box<OutlineFont>),
    /// Compiled-in bitmap glyphs; always available.
    Builtin { size: f32 },
}

impl Font {
    /// Tries each candidate file in order; the first that loads wins.
    /// Falls back to the built-in glyphs when none do.
    pub fn resolve<P: AsRef<Path>>(candidates: &[P], size: f32) -> Self {
        for candidate in candidates {
            let path = candidate.as_ref();
            match OutlineFont::load(path, size) {
                Ok(font) => {
                    log::debug!("Using font {} ({})", path.display(), font.family());
                    return Font::Outline(Box::new(font));
                }
                Err(e) => log::debug!("Skipping font candidate: {}", e),
            }
        }

        log::info!("No font candidate available, using built-in glyphs");
        Font::Builtin { size }
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self, Font::Builtin { .. })
    }

    /// Renders `ch` into a mask cropped to its ink box; the mask size is the measured bounding box.
    pub fn rasterize(&mut self, ch: char) -> GlyphMask {
        if ch.is_whitespace() {
            return GlyphMask::empty();
        }
        match self {
            Font::Outline(font) => font.rasterize(ch),
            Font::Builtin { size } => builtin_glyph(ch, *size),
        }
    }
}

fn builtin_glyph(ch: char, size: f32) -> GlyphMask {
    let rows = match ch {
        '$' => &BUILTIN_DOLLAR,
        _ => &BUILTIN_MISSING,
    };
    let scale = ((size / BUILTIN_ROWS as f32).round() as u32).max(1);

    let width = BUILTIN_COLS * scale;
    let height = BUILTIN_ROWS * scale;
    let mut coverage = vec![0u8; (width * height) as usize];

    for (row, bits) in rows.iter().enumerate() {
        for (col, bit) in bits.bytes().enumerate() {
            if bit != b'#' {
                continue;
            }
            for sy in 0..scale {
                for sx in 0..scale {
                    let x = col as u32 * scale + sx;
                    let y = row as u32 * scale + sy;
                    coverage[(y * width + x) as usize] = 255;
                }
            }
        }
    }

    GlyphMask::cropped(width, height, &coverage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;
    use crate::models::FONT_CANDIDATES;
    use image::Rgba;
    use std::path::PathBuf;

    /// First shipped font candidate present on this machine.
    fn installed_candidate() -> Option<&'static Path> {
        FONT_CANDIDATES.iter().map(Path::new).find(|path| OutlineFont::load(path, 18.0).is_ok())
    }

    #[test]
    fn installed_candidate_resolves_to_outline_font() {
        let Some(path) = installed_candidate() else {
            return;
        };
        let font = Font::resolve(&[PathBuf::from("/nonexistent/a.ttf"), path.to_path_buf()], 18.0);
        assert!(!font.is_builtin());
    }

    #[test]
    fn outline_dollar_has_ink_and_centers() {
        let Some(path) = installed_candidate() else {
            return;
        };
        let mut font = Font::Outline(Box::new(OutlineFont::load(path, 18.0).unwrap()));
        let mask = font.rasterize('$');
        assert!(!mask.is_empty(), "no ink from {}", path.display());
        assert!(mask.width < 32 && mask.height < 32);

        let background = Rgba([30, 64, 175, 255]);
        let mut canvas = Canvas::new(32, background);
        canvas.draw_glyph_centered(&mask, Rgba([255, 255, 255, 255]));

        let image = canvas.into_image();
        let inked: Vec<(i32, i32)> = image
            .enumerate_pixels()
            .filter(|(_, _, p)| **p != background)
            .map(|(x, y, _)| (x as i32, y as i32))
            .collect();
        let min_x = inked.iter().map(|p| p.0).min().unwrap();
        let max_x = inked.iter().map(|p| p.0).max().unwrap();
        let min_y = inked.iter().map(|p| p.1).min().unwrap();
        let max_y = inked.iter().map(|p| p.1).max().unwrap();

        assert!((min_x - (31 - max_x)).abs() <= 1, "x {min_x}..{max_x}");
        assert!((min_y - (31 - max_y)).abs() <= 1, "y {min_y}..{max_y}");
    }

    #[test]
    fn missing_candidates_fall_back_to_builtin() {
        let candidates = [PathBuf::from("/nonexistent/a.ttf"), PathBuf::from("/nonexistent/b.ttc")];
        let font = Font::resolve(&candidates, 18.0);
        assert!(font.is_builtin());
    }

    #[test]
    fn empty_candidate_list_falls_back_to_builtin() {
        let font = Font::resolve::<PathBuf>(&[], 18.0);
        assert!(font.is_builtin());
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let err = OutlineFont::load(Path::new("/nonexistent/font.ttf"), 18.0).err();
        assert!(matches!(err, Some(Error::FontLoad { .. })));
    }

    #[test]
    fn garbage_file_has_no_faces() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.ttf");
        fs::write(&path, b"definitely not a font").unwrap();

        let err = OutlineFont::load(&path, 18.0).err();
        assert!(matches!(err, Some(Error::EmptyFont(p)) if p == path));
    }

    #[test]
    fn builtin_dollar_scales_with_size() {
        let mut font = Font::Builtin { size: 18.0 };
        let mask = font.rasterize('$');
        assert_eq!((mask.width, mask.height), (10, 18));

        // Top row is "..#.." at scale 2.
        assert_eq!(mask.coverage_at(4, 0), 255);
        assert_eq!(mask.coverage_at(5, 1), 255);
        assert_eq!(mask.coverage_at(0, 0), 0);
        assert_eq!(mask.coverage_at(3, 0), 0);
    }

    #[test]
    fn builtin_scale_never_drops_below_one() {
        let mut font = Font::Builtin { size: 4.0 };
        let mask = font.rasterize('$');
        assert_eq!((mask.width, mask.height), (5, 9));
    }

    #[test]
    fn builtin_unknown_character_draws_box() {
        let mut font = Font::Builtin { size: 9.0 };
        let mask = font.rasterize('Q');
        assert_eq!((mask.width, mask.height), (5, 9));
        assert_eq!(mask.coverage_at(0, 0), 255);
        assert_eq!(mask.coverage_at(2, 4), 0);
    }

    #[test]
    fn whitespace_has_no_ink() {
        let mut font = Font::Builtin { size: 18.0 };
        assert!(font.rasterize(' ').is_empty());
    }

    #[test]
    fn cropping_finds_ink_box() {
        #[rustfmt::skip]
        let scratch = [
            0, 0, 0, 0,
            0, 9, 0, 0,
            0, 0, 7, 0,
            0, 0, 0, 0,
        ];
        let mask = GlyphMask::cropped(4, 4, &scratch);
        assert_eq!(mask, GlyphMask { width: 2, height: 2, coverage: vec![9, 0, 0, 7] });
    }

    #[test]
    fn cropping_blank_scratch_is_empty() {
        let mask = GlyphMask::cropped(3, 3, &[0; 9]);
        assert!(mask.is_empty());
        assert_eq!(mask.coverage_at(0, 0), 0);
    }
}
