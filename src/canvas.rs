use crate::font::GlyphMask;
use image::{Rgba, RgbaImage};

/// A square RGBA drawing surface.
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    /// Allocates a `size`x`size` canvas filled with `background`.
    pub fn new(size: u32, background: Rgba<u8>) -> Self {
        Self { image: RgbaImage::from_pixel(size, size, background) }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    #[cfg(test)]
    pub fn pixel(&self, x: u32, y: u32) -> Rgba<u8> {
        *self.image.get_pixel(x, y)
    }

    /// Strokes a rectangle outline along the canvas edge, `width` pixels thick.
    pub fn stroke_border(&mut self, color: Rgba<u8>, width: u32) {
        let (w, h) = self.image.dimensions();
        for (x, y, pixel) in self.image.enumerate_pixels_mut() {
            let is_border = x < width || y < width || x + width >= w || y + width >= h;
            if is_border {
                *pixel = color;
            }
        }
    }

    /// Draws `mask` so its ink box sits in the middle of the canvas.
    /// Returns the top-left corner the mask was placed at.
    pub fn draw_glyph_centered(&mut self, mask: &GlyphMask, color: Rgba<u8>) -> (i64, i64) {
        let x = (self.width() as i64 - mask.width as i64) / 2;
        let y = (self.height() as i64 - mask.height as i64) / 2;
        self.draw_glyph(mask, x, y, color);
        (x, y)
    }

    /// Composites `mask` at (`left`, `top`), using its coverage as alpha.
    pub fn draw_glyph(&mut self, mask: &GlyphMask, left: i64, top: i64, color: Rgba<u8>) {
        if mask.is_empty() {
            return;
        }
        for my in 0..mask.height {
            for mx in 0..mask.width {
                let coverage = mask.coverage_at(mx, my);
                if coverage == 0 {
                    continue;
                }
                let px = left + mx as i64;
                let py = top + my as i64;
                if px < 0 || py < 0 || px >= self.width() as i64 || py >= self.height() as i64 {
                    continue;
                }
                let dst = self.image.get_pixel_mut(px as u32, py as u32);
                *dst = blend_over(*dst, color, coverage);
            }
        }
    }

    /// Fills a disc around (`cx`, `cy`). Covered pixels are replaced with `color`, alpha included.
    pub fn fill_circle(&mut self, cx: u32, cy: u32, radius: f32, color: Rgba<u8>) {
        let reach = radius.floor() as i64;
        let r2 = radius * radius;
        for dy in -reach..=reach {
            for dx in -reach..=reach {
                if (dx * dx + dy * dy) as f32 > r2 {
                    continue;
                }
                let px = cx as i64 + dx;
                let py = cy as i64 + dy;
                if px < 0 || py < 0 || px >= self.width() as i64 || py >= self.height() as i64 {
                    continue;
                }
                self.image.put_pixel(px as u32, py as u32, color);
            }
        }
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }
}

/// Source-over compositing of `src`, scaled by `coverage`, onto `dst`.
fn blend_over(dst: Rgba<u8>, src: Rgba<u8>, coverage: u8) -> Rgba<u8> {
    let sa = src[3] as f32 / 255.0 * coverage as f32 / 255.0;
    let da = dst[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        return Rgba([0, 0, 0, 0]);
    }

    let channel = |i: usize| {
        let value = (src[i] as f32 * sa + dst[i] as f32 * da * (1.0 - sa)) / out_a;
        value.round().clamp(0.0, 255.0) as u8
    };

    Rgba([channel(0), channel(1), channel(2), (out_a * 255.0).round() as u8])
}
