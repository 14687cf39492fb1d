use crate::canvas::Canvas;
use crate::error::Result;
use crate::export::{save_ico, save_png};
use crate::font::Font;
use crate::models::{IconSpec, OutputFiles};
use crate::utils::calculate_hash;
use image::RgbaImage;
use std::path::Path;

/// Draws the icon described by `spec` with an already resolved font.
pub fn render(spec: &IconSpec, font: &mut Font) -> RgbaImage {
    let mut canvas = Canvas::new(spec.size, spec.background);
    canvas.stroke_border(spec.border, spec.border_width);

    let mask = font.rasterize(spec.glyph);
    let (x, y) = canvas.draw_glyph_centered(&mask, spec.glyph_color);
    log::debug!(
        "Glyph {:?} measured {}x{}, drawn at ({}, {}){}",
        spec.glyph,
        mask.width,
        mask.height,
        x,
        y,
        if font.is_builtin() { " with built-in glyphs" } else { "" }
    );

    for dot in &spec.dots {
        canvas.fill_circle(dot.x, dot.y, spec.dot_radius, spec.dot_color);
    }

    canvas.into_image()
}

/// Renders the icon and writes the PNG and ICO files into `out_dir`, overwriting existing ones.
pub fn create_favicon(spec: &IconSpec, out_dir: &Path) -> Result<OutputFiles> {
    let mut font = Font::resolve(&spec.font_candidates, spec.font_size);
    let image = render(spec, &mut font);

    let files = OutputFiles {
        png: out_dir.join(spec.png_name),
        ico: out_dir.join(spec.ico_name),
    };

    save_png(&image, &files.png)?;
    log::info!("Wrote {}", files.png.display());

    save_ico(&image, &spec.ico_sizes, &files.ico)?;
    log::info!("Wrote {} (sizes: {:?})", files.ico.display(), spec.ico_sizes);

    if log::log_enabled!(log::Level::Debug) {
        for path in [&files.png, &files.ico] {
            log::debug!("sha256 {} {}", calculate_hash(path)?, path.display());
        }
    }

    Ok(files)
}
