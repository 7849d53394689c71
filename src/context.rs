//! Everything a generator needs for one run, passed explicitly.

use std::path::{Path, PathBuf};

use crate::assets::Assets;
use crate::record::DishRecord;
use crate::sanitize::Sanitizer;

/// Subdirectory of the output directory that holds per-dish cards.
pub const CARD_DIR: &str = "dish_cards";

#[derive(Debug, Clone)]
pub struct FestivalContext {
    pub dishes: Vec<DishRecord>,
    pub assets: Assets,
    pub output_dir: PathBuf,
    pub sanitizer: Sanitizer,
}

impl FestivalContext {
    pub fn new(dishes: Vec<DishRecord>, assets: Assets, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            dishes,
            assets,
            output_dir: output_dir.into(),
            sanitizer: Sanitizer::default(),
        }
    }

    pub fn with_sanitizer(mut self, sanitizer: Sanitizer) -> Self {
        self.sanitizer = sanitizer;
        self
    }

    pub fn output_path(&self, file_name: &str) -> PathBuf {
        self.output_dir.join(file_name)
    }

    pub fn card_dir(&self) -> PathBuf {
        self.output_dir.join(CARD_DIR)
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}
