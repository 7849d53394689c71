//! Landscape table and direction signs.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::assets::aspect_ratio;
use crate::canvas::{Canvas, Orientation, MARGIN, NAVY_BLUE, ORANGE};
use crate::context::FestivalContext;
use crate::error::Result;
use crate::metrics::Font;

pub const SIGNS: [&str; 5] = ["TABLE 1", "TABLE 2", "TABLE 3", "ENTER", "EXIT"];
pub const QR_CAPTION: &str = "scan for the dinner menu";

const LABEL_FONT_SIZE: f32 = 120.0;
/// Cap height stand-in used to center the label box.
const LABEL_HEIGHT: f32 = 120.0;
const BORDER_MARGIN: f32 = 40.0;
const LOGO_HEIGHT: f32 = 120.0;
const QR_HEIGHT: f32 = 100.0;
const CAPTION_FONT_SIZE: f32 = 10.0;

/// "TABLE 1" -> "table_1_sign.pdf"
pub fn sign_file_name(label: &str) -> String {
    format!("{}_sign.pdf", label.to_lowercase().replace(' ', "_"))
}

/// Write all five signs.
pub fn generate_signs(ctx: &FestivalContext) -> Result<Vec<PathBuf>> {
    SIGNS
        .iter()
        .map(|label| {
            let path = ctx.output_path(&sign_file_name(label));
            create_sign(ctx, label, &path)?;
            info!("Created sign: {}", path.display());
            Ok(path)
        })
        .collect()
}

pub fn create_sign(ctx: &FestivalContext, label: &str, path: &Path) -> Result<()> {
    let mut canvas = Canvas::new(label, Orientation::Landscape, MARGIN, ctx.sanitizer)?;
    let width = canvas.width();
    let height = canvas.height();

    if let Some(logo) = &ctx.assets.logo {
        let logo_width = LOGO_HEIGHT * aspect_ratio(logo);
        canvas.draw_image(logo, MARGIN, height - MARGIN - LOGO_HEIGHT, logo_width, LOGO_HEIGHT);
    }

    if let Some(qr) = &ctx.assets.qr {
        let qr_width = QR_HEIGHT * aspect_ratio(qr);
        let qr_x = width - MARGIN - qr_width;
        let qr_y = height - MARGIN - QR_HEIGHT;
        canvas.draw_image(qr, qr_x, qr_y, qr_width, QR_HEIGHT);

        let caption_width = canvas.measure(QR_CAPTION, Font::Helvetica, CAPTION_FONT_SIZE);
        canvas.draw_text(
            QR_CAPTION,
            qr_x + (qr_width - caption_width) / 2.0,
            qr_y - 15.0,
            Font::Helvetica,
            CAPTION_FONT_SIZE,
            NAVY_BLUE,
        );
    }

    let text_width = canvas.measure(label, Font::HelveticaBold, LABEL_FONT_SIZE);
    let x = (width - text_width) / 2.0;
    let y = (height - LABEL_HEIGHT) / 2.0;

    canvas.draw_rect(
        x - BORDER_MARGIN,
        y - BORDER_MARGIN,
        text_width + 2.0 * BORDER_MARGIN,
        LABEL_HEIGHT + 2.0 * BORDER_MARGIN,
        None,
        Some(ORANGE),
        Some(3.0),
    );
    canvas.draw_text(label, x, y, Font::HelveticaBold, LABEL_FONT_SIZE, NAVY_BLUE);

    canvas.save(path)
}
