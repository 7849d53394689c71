//! Blank dish card to fill in by hand.

use std::path::PathBuf;

use tracing::info;

use crate::assets::aspect_ratio;
use crate::canvas::{Canvas, Orientation, MARGIN, NAVY_BLUE, ORANGE, WHITE};
use crate::context::FestivalContext;
use crate::error::Result;
use crate::metrics::Font;
use crate::record::Field;

pub const TEMPLATE_FILE: &str = "dish_card.pdf";

const HEADER_HEIGHT: f32 = 100.0;
const TITLE_BOX_HEIGHT: f32 = 60.0;
const TITLE_BOX_MARGIN: f32 = 20.0;
const SECTION_SPACING: f32 = 50.0;
const LOGO_HEIGHT: f32 = 100.0;

pub fn generate_template(ctx: &FestivalContext) -> Result<PathBuf> {
    let mut canvas = Canvas::new("Dish Card", Orientation::Portrait, MARGIN, ctx.sanitizer)?;
    let width = canvas.width();
    let height = canvas.height();
    let content_width = width - 2.0 * MARGIN;
    let band_y = height - MARGIN - HEADER_HEIGHT;

    canvas.draw_rect(MARGIN, band_y, content_width, HEADER_HEIGHT, Some(NAVY_BLUE), None, None);

    // Slot for the handwritten title
    canvas.draw_rect(
        MARGIN + TITLE_BOX_MARGIN,
        band_y + (HEADER_HEIGHT - TITLE_BOX_HEIGHT) / 2.0,
        content_width - 2.0 * TITLE_BOX_MARGIN,
        TITLE_BOX_HEIGHT,
        Some(WHITE),
        None,
        None,
    );

    canvas.draw_rect(
        MARGIN,
        MARGIN,
        content_width,
        height - 2.0 * MARGIN,
        None,
        Some(ORANGE),
        Some(3.0),
    );

    let left = MARGIN + 30.0;
    let mut y = band_y - 60.0;
    canvas.draw_text(
        "Provided by: ___________________________",
        left,
        y,
        Font::HelveticaBold,
        18.0,
        NAVY_BLUE,
    );
    y -= 80.0;

    let blank = "_".repeat(30);
    for field in Field::ALL {
        canvas.draw_text(&format!("{}:", field.label()), left, y, Font::HelveticaBold, 14.0, NAVY_BLUE);
        canvas.draw_text(&blank, left + 150.0, y, Font::Helvetica, 14.0, NAVY_BLUE);
        y -= SECTION_SPACING;
    }

    if let Some(logo) = &ctx.assets.logo {
        let logo_width = LOGO_HEIGHT * aspect_ratio(logo);
        canvas.draw_image(logo, (width - logo_width) / 2.0, MARGIN + 10.0, logo_width, LOGO_HEIGHT);
    }

    let path = ctx.output_path(TEMPLATE_FILE);
    canvas.save(&path)?;
    info!("Created empty dish card template: {}", TEMPLATE_FILE);
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::Assets;
    use ::image::DynamicImage;

    #[test]
    fn test_template_with_logo() {
        let dir = tempfile::tempdir().unwrap();
        let assets = Assets {
            logo: Some(DynamicImage::new_rgb8(30, 10)),
            qr: None,
        };
        let ctx = FestivalContext::new(Vec::new(), assets, dir.path());
        let path = generate_template(&ctx).unwrap();
        assert_eq!(path, dir.path().join(TEMPLATE_FILE));
        assert!(std::fs::read(&path).unwrap().starts_with(b"%PDF"));
    }
}
