//! Page composer: positioned drawing on fixed-size PDF pages.
//!
//! Coordinates are PDF points with the origin at the bottom-left corner.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use ::image::DynamicImage;
use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{
    Color, ColorBits, ColorSpace, Image, ImageTransform, ImageXObject, IndirectFontRef, Line, Mm,
    PdfDocument, PdfDocumentReference, PdfLayerReference, Point, Polygon, Pt, Px, Rgb,
};

use crate::assets::flatten_onto_white;
use crate::error::{AppError, Result};
use crate::metrics::Font;
use crate::sanitize::Sanitizer;

// ============================================================================
// Constants
// ============================================================================

/// US Letter in points
pub const LETTER_WIDTH: f32 = 612.0;
pub const LETTER_HEIGHT: f32 = 792.0;

/// One inch
pub const MARGIN: f32 = 72.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Swatch {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Swatch {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    fn to_pdf(self) -> Color {
        Color::Rgb(Rgb::new(self.r, self.g, self.b, None))
    }
}

pub const NAVY_BLUE: Swatch = Swatch::new(0.0, 0.12, 0.36);
pub const ORANGE: Swatch = Swatch::new(1.0, 0.5, 0.0);
pub const WHITE: Swatch = Swatch::new(1.0, 1.0, 1.0);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Orientation {
    Portrait,
    Landscape,
}

impl Orientation {
    /// Page (width, height) in points.
    pub fn size(self) -> (f32, f32) {
        match self {
            Orientation::Portrait => (LETTER_WIDTH, LETTER_HEIGHT),
            Orientation::Landscape => (LETTER_HEIGHT, LETTER_WIDTH),
        }
    }
}

fn mm(points: f32) -> Mm {
    Mm::from(Pt(points))
}

// ============================================================================
// Vertical Cursor
// ============================================================================

/// Current baseline and the lowest baseline allowed before a page break.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerticalCursor {
    y: f32,
    min_y: f32,
}

impl VerticalCursor {
    pub fn new(y: f32, min_y: f32) -> Self {
        Self { y, min_y }
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn set(&mut self, y: f32) {
        self.y = y;
    }

    /// Move down by `dy`. Returns true once the cursor is below the threshold.
    pub fn advance(&mut self, dy: f32) -> bool {
        self.y -= dy;
        self.needs_break()
    }

    pub fn needs_break(&self) -> bool {
        self.y < self.min_y
    }
}

/// Decoration drawn at the top of a page.
pub trait PageHeader {
    /// Draw the header and return the baseline where content starts.
    fn draw(&self, canvas: &mut Canvas, first_page: bool) -> Result<f32>;
}

// ============================================================================
// Canvas
// ============================================================================

struct FontSet {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    italic: IndirectFontRef,
}

impl FontSet {
    fn get(&self, font: Font) -> &IndirectFontRef {
        match font {
            Font::Helvetica => &self.regular,
            Font::HelveticaBold => &self.bold,
            Font::TimesItalic => &self.italic,
        }
    }
}

/// A string as it was placed on a page.
#[cfg(test)]
#[derive(Debug, Clone, PartialEq)]
pub struct DrawnText {
    pub page: usize,
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub font: Font,
}

pub struct Canvas {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    fonts: FontSet,
    width: f32,
    height: f32,
    cursor: VerticalCursor,
    page_index: usize,
    sanitizer: Sanitizer,
    #[cfg(test)]
    drawn: Vec<DrawnText>,
}

impl Canvas {
    /// Create a one-page document. The cursor starts at the top edge.
    pub fn new(
        title: &str,
        orientation: Orientation,
        min_y: f32,
        sanitizer: Sanitizer,
    ) -> Result<Self> {
        let (width, height) = orientation.size();
        let (doc, page1, layer1) = PdfDocument::new(title, mm(width), mm(height), "Layer 1");
        let layer = doc.get_page(page1).get_layer(layer1);

        let add = |font: Font| {
            doc.add_builtin_font(font.builtin())
                .map_err(|e| AppError::PdfError(e.to_string()))
        };
        let fonts = FontSet {
            regular: add(Font::Helvetica)?,
            bold: add(Font::HelveticaBold)?,
            italic: add(Font::TimesItalic)?,
        };

        Ok(Self {
            doc,
            layer,
            fonts,
            width,
            height,
            cursor: VerticalCursor::new(height, min_y),
            page_index: 0,
            sanitizer,
            #[cfg(test)]
            drawn: Vec::new(),
        })
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_count(&self) -> usize {
        self.page_index + 1
    }

    pub fn cursor(&self) -> f32 {
        self.cursor.y()
    }

    pub fn set_cursor(&mut self, y: f32) {
        self.cursor.set(y);
    }

    /// See [`VerticalCursor::advance`].
    pub fn advance(&mut self, dy: f32) -> bool {
        self.cursor.advance(dy)
    }

    pub fn needs_page_break(&self) -> bool {
        self.cursor.needs_break()
    }

    /// Draw the first page's header and move the cursor below it.
    pub fn start(&mut self, header: &dyn PageHeader) -> Result<()> {
        let top = header.draw(self, true)?;
        self.cursor.set(top);
        Ok(())
    }

    /// Close the current page and continue on a fresh one.
    pub fn new_page(&mut self, header: &dyn PageHeader) -> Result<()> {
        let (page, layer) = self.doc.add_page(mm(self.width), mm(self.height), "Layer 1");
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.page_index += 1;
        let top = header.draw(self, false)?;
        self.cursor.set(top);
        Ok(())
    }

    /// Sanitized width of `text` in points.
    pub fn measure(&self, text: &str, font: Font, size: f32) -> f32 {
        font.text_width(&self.sanitizer.sanitize(text), size)
    }

    pub fn draw_rect(
        &mut self,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        fill: Option<Swatch>,
        stroke: Option<Swatch>,
        line_width: Option<f32>,
    ) {
        let mode = match (fill, stroke) {
            (Some(_), Some(_)) => PaintMode::FillStroke,
            (Some(_), None) => PaintMode::Fill,
            (None, Some(_)) => PaintMode::Stroke,
            (None, None) => return,
        };
        if let Some(color) = fill {
            self.layer.set_fill_color(color.to_pdf());
        }
        if let Some(color) = stroke {
            self.layer.set_outline_color(color.to_pdf());
        }
        if let Some(thickness) = line_width {
            self.layer.set_outline_thickness(thickness);
        }

        let ring = vec![
            (Point::new(mm(x), mm(y)), false),
            (Point::new(mm(x + w), mm(y)), false),
            (Point::new(mm(x + w), mm(y + h)), false),
            (Point::new(mm(x), mm(y + h)), false),
        ];
        self.layer.add_polygon(Polygon {
            rings: vec![ring],
            mode,
            winding_order: WindingOrder::NonZero,
        });
    }

    pub fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, stroke: Swatch, line_width: f32) {
        self.layer.set_outline_color(stroke.to_pdf());
        self.layer.set_outline_thickness(line_width);
        let points = vec![
            (Point::new(mm(x1), mm(y1)), false),
            (Point::new(mm(x2), mm(y2)), false),
        ];
        self.layer.add_line(Line {
            points,
            is_closed: false,
        });
    }

    /// Draw one line of sanitized text with its baseline at `y`.
    /// Returns the drawn width.
    pub fn draw_text(
        &mut self,
        text: &str,
        x: f32,
        y: f32,
        font: Font,
        size: f32,
        color: Swatch,
    ) -> f32 {
        let clean = self.sanitizer.sanitize(text);
        self.layer.set_fill_color(color.to_pdf());
        self.layer
            .use_text(clean.as_str(), size, mm(x), mm(y), self.fonts.get(font));
        #[cfg(test)]
        self.drawn.push(DrawnText {
            page: self.page_index,
            text: clean.clone(),
            x,
            y,
            font,
        });
        font.text_width(&clean, size)
    }

    /// Draw text horizontally centered on the page. Returns the drawn width.
    pub fn draw_text_centered(&mut self, text: &str, y: f32, font: Font, size: f32, color: Swatch) -> f32 {
        let width = self.measure(text, font, size);
        self.draw_text(text, (self.width - width) / 2.0, y, font, size, color)
    }

    /// Draw `img` stretched to the `w`×`h` box whose lower-left corner is (x, y).
    pub fn draw_image(&mut self, img: &DynamicImage, x: f32, y: f32, w: f32, h: f32) {
        let rgb_image = flatten_onto_white(img);
        let (width_px, height_px) = rgb_image.dimensions();
        if width_px == 0 || height_px == 0 || w <= 0.0 || h <= 0.0 {
            return;
        }

        let image = Image::from(ImageXObject {
            width: Px(width_px as usize),
            height: Px(height_px as usize),
            color_space: ColorSpace::Rgb,
            bits_per_component: ColorBits::Bit8,
            interpolate: true,
            image_data: rgb_image.into_raw(),
            image_filter: None,
            clipping_bbox: None,
            smask: None,
        });

        // Natural size is px / dpi inches; pick dpi for the width, scale the height.
        let dpi = width_px as f32 * 72.0 / w;
        let natural_height = height_px as f32 * 72.0 / dpi;

        image.add_to_layer(
            self.layer.clone(),
            ImageTransform {
                translate_x: Some(mm(x)),
                translate_y: Some(mm(y)),
                dpi: Some(dpi),
                scale_y: Some(h / natural_height),
                ..Default::default()
            },
        );
    }

    /// Every string drawn so far, in drawing order.
    #[cfg(test)]
    pub fn drawn_text(&self) -> &[DrawnText] {
        &self.drawn
    }

    /// Write the finished document to `path`.
    pub fn save(self, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.doc
            .save(&mut writer)
            .map_err(|e| AppError::PdfError(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedHeader(f32);

    impl PageHeader for FixedHeader {
        fn draw(&self, _canvas: &mut Canvas, _first_page: bool) -> Result<f32> {
            Ok(self.0)
        }
    }

    #[test]
    fn test_cursor_signals_break_below_threshold() {
        let mut cursor = VerticalCursor::new(200.0, 152.0);
        assert!(!cursor.advance(40.0));
        assert!(!cursor.advance(8.0));
        assert_eq!(cursor.y(), 152.0);
        assert!(cursor.advance(0.5));
        assert!(cursor.needs_break());
        cursor.set(700.0);
        assert!(!cursor.needs_break());
    }

    #[test]
    fn test_new_page_resets_cursor() {
        let mut canvas = Canvas::new("test", Orientation::Portrait, 152.0, Sanitizer::default()).unwrap();
        let header = FixedHeader(700.0);
        canvas.start(&header).unwrap();
        assert_eq!(canvas.cursor(), 700.0);
        assert!(canvas.advance(600.0));
        canvas.new_page(&header).unwrap();
        assert_eq!(canvas.page_index(), 1);
        assert_eq!(canvas.page_count(), 2);
        assert_eq!(canvas.cursor(), 700.0);
        assert!(!canvas.needs_page_break());
    }

    #[test]
    fn test_landscape_swaps_dimensions() {
        let canvas = Canvas::new("sign", Orientation::Landscape, 0.0, Sanitizer::default()).unwrap();
        assert_eq!(canvas.width(), 792.0);
        assert_eq!(canvas.height(), 612.0);
    }

    #[test]
    fn test_draw_text_returns_sanitized_width() {
        let mut canvas = Canvas::new("test", Orientation::Portrait, 0.0, Sanitizer::default()).unwrap();
        let width = canvas.draw_text("Falafel \u{1F331}", 72.0, 700.0, Font::Helvetica, 12.0, NAVY_BLUE);
        assert_eq!(width, Font::Helvetica.text_width("Falafel", 12.0));
    }

    #[test]
    fn test_save_writes_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.pdf");
        let mut canvas = Canvas::new("test", Orientation::Portrait, 0.0, Sanitizer::default()).unwrap();
        canvas.draw_rect(72.0, 72.0, 468.0, 648.0, None, Some(ORANGE), Some(3.0));
        canvas.draw_rect(72.0, 620.0, 468.0, 100.0, Some(NAVY_BLUE), None, None);
        canvas.draw_image(&DynamicImage::new_rgb8(4, 2), 200.0, 82.0, 200.0, 100.0);
        canvas.save(&path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
