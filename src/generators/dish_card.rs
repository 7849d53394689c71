//! One card per dish: title band, provider, field columns, outlet line, logo.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::assets::aspect_ratio;
use crate::canvas::{Canvas, Orientation, MARGIN, NAVY_BLUE, ORANGE, WHITE};
use crate::context::FestivalContext;
use crate::error::Result;
use crate::metrics::Font;
use crate::record::{DishRecord, Field};
use crate::wrap::LineWrapper;

// ============================================================================
// Constants
// ============================================================================

const HEADER_HEIGHT: f32 = 100.0;
const BORDER_WIDTH: f32 = 3.0;

/// Font sizes in points
const TITLE_FONT_SIZE: f32 = 28.0;
const PROVIDER_FONT_SIZE: f32 = 18.0;
const FIELD_FONT_SIZE: f32 = 14.0;
const OUTLET_FONT_SIZE: f32 = 12.0;

/// Baseline-to-baseline distances
const TITLE_LEADING: f32 = 30.0;
const PROVIDER_LEADING: f32 = 25.0;
const FIELD_LEADING: f32 = 20.0;
const FIELD_GAP: f32 = 10.0;

const LOGO_HEIGHT: f32 = 100.0;
const LOGO_GAP: f32 = 20.0;

/// Lowest baseline a field may start on.
pub const FIELD_MIN_Y: f32 = MARGIN + LOGO_HEIGHT + LOGO_GAP;

pub fn card_file_name(number: usize) -> String {
    format!("dish_card_{number}.pdf")
}

// ============================================================================
// Column Flow
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Left,
    Right,
}

/// Two-column placement for card fields.
///
/// Fields fill the left column; once the cursor is under `min_y` they move
/// to the right column starting at `top`. When the right column is also
/// used up, no further field is placed.
#[derive(Debug, Clone, Copy)]
pub struct ColumnFlow {
    column: Column,
    top: f32,
    min_y: f32,
}

impl ColumnFlow {
    pub fn new(top: f32, min_y: f32) -> Self {
        Self {
            column: Column::Left,
            top,
            min_y,
        }
    }

    pub fn column(&self) -> Column {
        self.column
    }

    /// Column for the next field, moving `y` to the right column's top on a switch.
    pub fn place(&mut self, y: &mut f32) -> Option<Column> {
        if *y < self.min_y {
            match self.column {
                Column::Left => {
                    self.column = Column::Right;
                    *y = self.top;
                }
                Column::Right => return None,
            }
        }
        Some(self.column)
    }
}

/// Wrap width for a field value.
fn value_width(field: Field, column: Column, content_width: f32) -> f32 {
    let half = content_width / 2.0;
    match (field, column) {
        (Field::Ingredients, _) => half - 10.0,
        (_, Column::Left) => half - 25.0,
        (_, Column::Right) => half - 15.0,
    }
}

// ============================================================================
// Generation
// ============================================================================

/// Write `dish_cards/dish_card_{n}.pdf` for every dish, numbered from 1.
pub fn generate_dish_cards(ctx: &FestivalContext) -> Result<Vec<PathBuf>> {
    let dir = ctx.card_dir();
    std::fs::create_dir_all(&dir)?;

    let mut written = Vec::with_capacity(ctx.dishes.len());
    for (idx, dish) in ctx.dishes.iter().enumerate() {
        let path = dir.join(card_file_name(idx + 1));
        create_dish_card(ctx, dish, &path)?;
        info!("Created dish card {}", idx + 1);
        written.push(path);
    }
    Ok(written)
}

pub fn create_dish_card(ctx: &FestivalContext, dish: &DishRecord, path: &Path) -> Result<()> {
    let mut canvas = Canvas::new(&dish.name, Orientation::Portrait, FIELD_MIN_Y, ctx.sanitizer)?;
    let wrapper = LineWrapper::new(ctx.sanitizer);
    let width = canvas.width();
    let height = canvas.height();
    let content_width = width - 2.0 * MARGIN;

    // Header band and page border
    canvas.draw_rect(
        MARGIN,
        height - MARGIN - HEADER_HEIGHT,
        content_width,
        HEADER_HEIGHT,
        Some(NAVY_BLUE),
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
        Some(BORDER_WIDTH),
    );

    // Title, centered in the band
    let title_lines = wrapper.wrap(&dish.name, Font::HelveticaBold, TITLE_FONT_SIZE, content_width - 40.0);
    let title_block = title_lines.len() as f32 * TITLE_LEADING;
    let mut title_y = height - MARGIN - 40.0 - (HEADER_HEIGHT - title_block) / 2.0 + 20.0;
    for line in &title_lines {
        canvas.draw_text_centered(line, title_y, Font::HelveticaBold, TITLE_FONT_SIZE, WHITE);
        title_y -= TITLE_LEADING;
    }

    // Provider
    canvas.set_cursor(height - MARGIN - HEADER_HEIGHT - 40.0);
    let provider = format!("Provided by: {}", dish.provider);
    for line in wrapper.wrap(&provider, Font::HelveticaBold, PROVIDER_FONT_SIZE, content_width - 40.0) {
        let y = canvas.cursor();
        canvas.draw_text_centered(&line, y, Font::HelveticaBold, PROVIDER_FONT_SIZE, NAVY_BLUE);
        canvas.advance(PROVIDER_LEADING);
    }
    canvas.advance(20.0);

    draw_fields(&mut canvas, &wrapper, dish, content_width);

    // Outlet requirement
    canvas.advance(FIELD_GAP);
    if let Some(outlet) = dish.outlet.as_deref() {
        let y = canvas.cursor();
        canvas.draw_text(
            &format!("Electrical Outlet Required: {outlet}"),
            MARGIN + 20.0,
            y,
            Font::Helvetica,
            OUTLET_FONT_SIZE,
            NAVY_BLUE,
        );
    }

    if let Some(logo) = &ctx.assets.logo {
        let logo_width = LOGO_HEIGHT * aspect_ratio(logo);
        canvas.draw_image(logo, (width - logo_width) / 2.0, MARGIN + 10.0, logo_width, LOGO_HEIGHT);
    }

    canvas.save(path)
}

fn draw_fields(canvas: &mut Canvas, wrapper: &LineWrapper, dish: &DishRecord, content_width: f32) {
    let left_x = MARGIN + 20.0;
    let right_x = MARGIN + content_width / 2.0 + 10.0;
    let mut y = canvas.cursor();
    let mut flow = ColumnFlow::new(y, FIELD_MIN_Y);

    for (pos, field) in Field::ALL.iter().copied().enumerate() {
        let Some(value) = dish.field(field) else {
            continue;
        };
        let Some(column) = flow.place(&mut y) else {
            let dropped: Vec<&str> = Field::ALL[pos..]
                .iter()
                .filter(|f| dish.field(**f).is_some())
                .map(|f| f.label())
                .collect();
            debug!(dish = %dish.name, ?dropped, "no room left on card");
            break;
        };
        let x = match column {
            Column::Left => left_x,
            Column::Right => right_x,
        };

        let label = format!("{}: ", field.label());
        canvas.draw_text(&label, x, y, Font::HelveticaBold, FIELD_FONT_SIZE, NAVY_BLUE);
        let label_width = Font::HelveticaBold.text_width(&label, FIELD_FONT_SIZE);

        let available = value_width(field, column, content_width);
        for line in wrapper.wrap(value, Font::Helvetica, FIELD_FONT_SIZE, available) {
            canvas.draw_text(&line, x + label_width, y, Font::Helvetica, FIELD_FONT_SIZE, NAVY_BLUE);
            y -= FIELD_LEADING;
        }
        y -= FIELD_GAP;
    }

    canvas.set_cursor(y);
}
