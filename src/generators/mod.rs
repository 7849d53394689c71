//! Batch document generators. Each one builds and saves its documents in a
//! single pass from the shared [`FestivalContext`].

pub mod dish_card;
pub mod menu;
pub mod signs;
pub mod template;

use std::path::PathBuf;

use clap::ValueEnum;

use crate::context::FestivalContext;
use crate::error::Result;

pub use dish_card::generate_dish_cards;
pub use menu::generate_menu;
pub use signs::generate_signs;
pub use template::generate_template;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DocumentKind {
    /// One card per dish
    Cards,
    /// Categorized menu
    Menu,
    /// Blank dish card
    Template,
    /// Table and direction signs
    Signs,
}

impl DocumentKind {
    /// Run order when everything is generated.
    pub const ALL: [DocumentKind; 4] = [
        DocumentKind::Cards,
        DocumentKind::Menu,
        DocumentKind::Template,
        DocumentKind::Signs,
    ];
}

/// Run one generator and return the files it wrote.
pub fn generate(ctx: &FestivalContext, kind: DocumentKind) -> Result<Vec<PathBuf>> {
    match kind {
        DocumentKind::Cards => generate_dish_cards(ctx),
        DocumentKind::Menu => generate_menu(ctx).map(|(path, _)| vec![path]),
        DocumentKind::Template => generate_template(ctx).map(|path| vec![path]),
        DocumentKind::Signs => generate_signs(ctx),
    }
}

/// Run the requested generators in [`DocumentKind::ALL`] order.
pub fn generate_all(ctx: &FestivalContext, kinds: &[DocumentKind]) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(ctx.output_dir())?;
    let mut written = Vec::new();
    for kind in DocumentKind::ALL.into_iter().filter(|k| kinds.contains(k)) {
        written.extend(generate(ctx, kind)?);
    }
    Ok(written)
}
