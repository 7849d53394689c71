//! festival-pdf: printable dish cards, menu, template and signs for a
//! community food festival, generated from the sign-up form export.

pub mod assets;
pub mod canvas;
pub mod context;
pub mod error;
pub mod generators;
pub mod metrics;
pub mod record;
pub mod sanitize;
pub mod table;
pub mod wrap;

pub use assets::Assets;
pub use context::FestivalContext;
pub use error::{AppError, Result};
pub use generators::{generate_all, DocumentKind};
pub use record::{load_dishes, DishRecord};
pub use sanitize::{SanitizeMode, Sanitizer};
pub use table::{table_number, TableNumber};
