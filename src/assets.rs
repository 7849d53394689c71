//! Optional raster assets: the festival logo and the menu QR code.

use std::path::Path;

use ::image::{DynamicImage, Luma, Rgba, RgbImage};
use qrcode::QrCode;
use tracing::debug;

use crate::error::{AppError, Result};

/// Images shared by every generator. Either may be absent.
#[derive(Debug, Clone, Default)]
pub struct Assets {
    pub logo: Option<DynamicImage>,
    pub qr: Option<DynamicImage>,
}

impl Assets {
    /// Load the logo and QR image from disk.
    ///
    /// A missing QR file falls back to a code generated from `menu_url`
    /// when one is given.
    pub fn load(logo_path: &Path, qr_path: &Path, menu_url: Option<&str>) -> Result<Self> {
        let logo = load_optional_image(logo_path)?;
        let qr = match load_optional_image(qr_path)? {
            Some(img) => Some(img),
            None => menu_url.map(generate_qr_image).transpose()?,
        };
        Ok(Self { logo, qr })
    }
}

/// Load an image if the file exists. A file that exists but cannot be
/// decoded is an error.
pub fn load_optional_image(path: &Path) -> Result<Option<DynamicImage>> {
    if !path.exists() {
        debug!(path = %path.display(), "image not found, skipping");
        return Ok(None);
    }

    let bytes = std::fs::read(path)
        .map_err(|e| AppError::AssetError(format!("{}: {}", path.display(), e)))?;
    let img = ::image::load_from_memory(&bytes)
        .map_err(|e| AppError::AssetError(format!("{}: {}", path.display(), e)))?;

    debug!(path = %path.display(), width = img.width(), height = img.height(), "loaded image");
    Ok(Some(img))
}

/// Width over height, used by callers to size an image box.
pub fn aspect_ratio(img: &DynamicImage) -> f32 {
    if img.height() == 0 {
        return 1.0;
    }
    img.width() as f32 / img.height() as f32
}

/// Render `url` as a QR code image.
pub fn generate_qr_image(url: &str) -> Result<DynamicImage> {
    let code = QrCode::new(url.as_bytes()).map_err(|e| AppError::QrError(e.to_string()))?;
    let image = code.render::<Luma<u8>>().build();
    Ok(DynamicImage::ImageLuma8(image))
}

/// Composite any transparency against a white background.
pub fn flatten_onto_white(img: &DynamicImage) -> RgbImage {
    let rgba_image = img.to_rgba8();
    let (width_px, height_px) = rgba_image.dimensions();

    let mut rgb_image = RgbImage::new(width_px, height_px);
    for (x, y, pixel) in rgba_image.enumerate_pixels() {
        let Rgba([r, g, b, a]) = *pixel;
        let alpha = a as f32 / 255.0;
        let bg = 255.0;
        let out_r = (r as f32 * alpha + bg * (1.0 - alpha)) as u8;
        let out_g = (g as f32 * alpha + bg * (1.0 - alpha)) as u8;
        let out_b = (b as f32 * alpha + bg * (1.0 - alpha)) as u8;
        rgb_image.put_pixel(x, y, ::image::Rgb([out_r, out_g, out_b]));
    }
    rgb_image
}
