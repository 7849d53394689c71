//! Multi-page menu grouped by dish type.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use ::image::DynamicImage;
use tracing::{debug, info};

use crate::assets::aspect_ratio;
use crate::canvas::{Canvas, Orientation, PageHeader, MARGIN, NAVY_BLUE, ORANGE};
use crate::context::FestivalContext;
use crate::error::Result;
use crate::metrics::Font;
use crate::record::DishRecord;
use crate::wrap::{EntryText, LineWrapper};

pub const MENU_FILE: &str = "menu.pdf";
pub const MENU_TITLE: &str = "Dinner Menu";

/// Preferred section order; other types follow alphabetically.
pub const CATEGORY_ORDER: [&str; 5] = ["Appetizer", "Salad", "Main course", "Dessert", "Drink"];

/// Section for dishes submitted without a type.
pub const UNCATEGORIZED: &str = "Other";

const TITLE_FONT_SIZE: f32 = 24.0;
const SECTION_FONT_SIZE: f32 = 14.0;
const ENTRY_FONT_SIZE: f32 = 12.0;
const ENTRY_LEADING: f32 = 16.0;
const LOGO_HEIGHT: f32 = 90.0;
const BULLET: &str = "\u{2022} ";

/// Page break when the cursor drops under this baseline.
pub const MENU_MIN_Y: f32 = MARGIN + 80.0;

// ============================================================================
// Grouping
// ============================================================================

/// Order distinct category names: preferred ones first, the rest sorted.
pub fn order_categories<'a>(categories: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
    let present: BTreeSet<&str> = categories.into_iter().collect();
    let mut ordered: Vec<&str> = CATEGORY_ORDER
        .iter()
        .filter_map(|c| present.get(c).copied())
        .collect();
    ordered.extend(present.iter().filter(|c| !CATEGORY_ORDER.contains(c)));
    ordered
}

/// Dishes grouped into menu sections, each section sorted by dish name.
pub fn group_dishes(dishes: &[DishRecord]) -> Vec<(&str, Vec<&DishRecord>)> {
    let mut groups: BTreeMap<&str, Vec<&DishRecord>> = BTreeMap::new();
    for dish in dishes {
        let category = dish.category.as_deref().unwrap_or(UNCATEGORIZED);
        groups.entry(category).or_default().push(dish);
    }

    order_categories(groups.keys().copied())
        .into_iter()
        .map(|category| {
            let mut members = groups.remove(category).unwrap_or_default();
            members.sort_by(|a, b| a.name.cmp(&b.name));
            (category, members)
        })
        .collect()
}

/// Capitalize the first letter of every word, lowercase the rest.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_alpha = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

pub fn menu_entry(dish: &DishRecord) -> EntryText {
    EntryText {
        primary: dish.name.clone(),
        annotation: format!("~ by {} at Table {}", dish.provider, dish.table()),
    }
}

// ============================================================================
// Drawing
// ============================================================================

struct MenuHeader<'a> {
    logo: Option<&'a DynamicImage>,
}

impl PageHeader for MenuHeader<'_> {
    fn draw(&self, canvas: &mut Canvas, first_page: bool) -> Result<f32> {
        let top = canvas.height() - MARGIN;
        if !first_page {
            return Ok(top - 20.0);
        }

        // Logo and title go together; without a logo the page starts bare.
        let Some(logo) = self.logo else {
            return Ok(top - 20.0);
        };
        let logo_width = LOGO_HEIGHT * aspect_ratio(logo);
        canvas.draw_image(logo, MARGIN, top - LOGO_HEIGHT, logo_width, LOGO_HEIGHT);
        canvas.draw_text_centered(
            MENU_TITLE,
            top - LOGO_HEIGHT / 2.0 + 10.0,
            Font::HelveticaBold,
            TITLE_FONT_SIZE,
            NAVY_BLUE,
        );
        Ok(top - LOGO_HEIGHT - 20.0)
    }
}

fn draw_section_heading(canvas: &mut Canvas, heading: &str) -> f32 {
    let y = canvas.cursor();
    canvas.draw_text_centered(heading, y, Font::HelveticaBold, SECTION_FONT_SIZE, NAVY_BLUE)
}

/// Draw a bulleted entry at the cursor, leaving the cursor on its last baseline.
fn draw_dish_entry(canvas: &mut Canvas, wrapper: &LineWrapper, dish: &DishRecord, x: f32, available_width: f32) {
    let bullet_width = Font::Helvetica.text_width(BULLET, ENTRY_FONT_SIZE);
    let lines = wrapper.wrap_entry(
        &menu_entry(dish),
        Font::Helvetica,
        Font::TimesItalic,
        ENTRY_FONT_SIZE,
        available_width,
        bullet_width,
    );

    let mut y = canvas.cursor();
    for (i, line) in lines.iter().enumerate() {
        if i == 0 {
            canvas.draw_text(BULLET, x, y, Font::Helvetica, ENTRY_FONT_SIZE, NAVY_BLUE);
        }
        canvas.draw_text(&line.text, x + bullet_width, y, line.font, ENTRY_FONT_SIZE, NAVY_BLUE);
        y -= ENTRY_LEADING;
    }
    canvas.set_cursor(y + ENTRY_LEADING);
}

/// Write `menu.pdf`. Returns the path and the number of pages.
pub fn generate_menu(ctx: &FestivalContext) -> Result<(PathBuf, usize)> {
    let canvas = layout_menu(ctx)?;
    let pages = canvas.page_count();
    let path = ctx.output_path(MENU_FILE);
    canvas.save(&path)?;
    info!(pages, "Created {}", MENU_FILE);
    Ok((path, pages))
}

/// Lay out every section and entry on a fresh canvas.
fn layout_menu(ctx: &FestivalContext) -> Result<Canvas> {
    let mut canvas = Canvas::new(MENU_TITLE, Orientation::Portrait, MENU_MIN_Y, ctx.sanitizer)?;
    let wrapper = LineWrapper::new(ctx.sanitizer);
    let header = MenuHeader {
        logo: ctx.assets.logo.as_ref(),
    };
    let width = canvas.width();
    let content_width = width - 2.0 * MARGIN;

    canvas.start(&header)?;

    for (category, dishes) in group_dishes(&ctx.dishes) {
        if canvas.needs_page_break() {
            canvas.new_page(&header)?;
        }

        let heading = title_case(category);
        let text_width = draw_section_heading(&mut canvas, &heading);
        canvas.advance(10.0);

        let underline = (text_width + 40.0).min(200.0);
        let y = canvas.cursor();
        canvas.draw_line((width - underline) / 2.0, y, (width + underline) / 2.0, y, ORANGE, 1.0);
        canvas.advance(15.0);

        for dish in dishes {
            if canvas.needs_page_break() {
                canvas.new_page(&header)?;
                draw_section_heading(&mut canvas, &heading);
                canvas.advance(25.0);
                debug!(section = %heading, page = canvas.page_count(), "section continued");
            }

            draw_dish_entry(&mut canvas, &wrapper, dish, MARGIN + 30.0, content_width - 60.0);
            canvas.advance(15.0);
        }

        canvas.advance(20.0);
    }

    canvas.draw_line(
        MARGIN + 30.0,
        MARGIN + 50.0,
        width - MARGIN - 30.0,
        MARGIN + 50.0,
        ORANGE,
        2.0,
    );

    Ok(canvas)
}
