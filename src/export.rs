use crate::error::Result;
use ico::{IconDir, IconDirEntry, IconImage, ResourceType};
use image::imageops::{self, FilterType};
use image::{ImageFormat, RgbaImage};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Writes `image` as a PNG, replacing any existing file.
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<()> {
    image.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

/// Resamples `image` to each square size and collects the results into an icon directory.
pub fn build_icon_dir(image: &RgbaImage, sizes: &[u32]) -> Result<IconDir> {
    let mut icon_dir = IconDir::new(ResourceType::Icon);
    for &size in sizes {
        let resized = imageops::resize(image, size, size, FilterType::Lanczos3);
        let icon_image = IconImage::from_rgba_data(size, size, resized.into_raw());
        icon_dir.add_entry(IconDirEntry::encode(&icon_image)?);
    }
    Ok(icon_dir)
}

/// Writes a multi-resolution `.ico` file, replacing any existing file.
pub fn save_ico(image: &RgbaImage, sizes: &[u32], path: &Path) -> Result<()> {
    let icon_dir = build_icon_dir(image, sizes)?;
    let file = BufWriter::new(File::create(path)?);
    icon_dir.write(file)?;
    Ok(())
}
