//! PNG snapshot of the current frame.

use std::io::Cursor;
use std::path::Path;

use shared::DateKey;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("screenshot is empty")]
    EmptyImage,
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] image::ImageError),
    #[error("cannot write image: {0}")]
    Io(#[from] std::io::Error),
}

/// Default file name for the snapshot of `date`
pub fn snapshot_file_name(date: &DateKey) -> String {
    format!("muscle-pain-{}.png", date.as_str())
}

/// Cut the viewport out of a full-window screenshot.
pub fn crop_to_viewport(
    screenshot: &egui::ColorImage,
    viewport: egui::Rect,
    pixels_per_point: f32,
) -> egui::ColorImage {
    screenshot.region(&viewport, Some(pixels_per_point))
}

fn to_rgba(image: &egui::ColorImage) -> Result<image::RgbaImage, ExportError> {
    let [w, h] = image.size;
    if w == 0 || h == 0 {
        return Err(ExportError::EmptyImage);
    }
    let pixels: Vec<u8> = image
        .pixels
        .iter()
        .flat_map(|c| c.to_srgba_unmultiplied())
        .collect();
    image::RgbaImage::from_raw(w as u32, h as u32, pixels).ok_or(ExportError::EmptyImage)
}

/// Encode to PNG bytes.
pub fn encode_png(image: &egui::ColorImage) -> Result<Vec<u8>, ExportError> {
    let rgba = to_rgba(image)?;
    let mut bytes = Vec::new();
    rgba.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)?;
    Ok(bytes)
}

/// Write the image to `path` as PNG.
pub fn save_png(image: &egui::ColorImage, path: &Path) -> Result<(), ExportError> {
    let bytes = encode_png(image)?;
    std::fs::write(path, bytes)?;
    tracing::info!("Saved snapshot {} ({}x{})", path.display(), image.size[0], image.size[1]);
    Ok(())
}
