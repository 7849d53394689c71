//! Dish records and loading them from the form export.

use std::borrow::Cow;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use encoding_rs::{UTF_16BE, UTF_16LE, UTF_8};
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{AppError, Result};
use crate::table::{table_number, TableNumber};

// ============================================================================
// Data Structures
// ============================================================================

/// One submitted dish.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DishRecord {
    pub name: String,
    pub cuisine: Option<String>,
    pub category: Option<String>,
    pub ingredients: Option<String>,
    pub protein: Option<String>,
    pub allergens: Option<String>,
    pub provider: String,
    pub outlet: Option<String>,
}

/// Labelled optional field shown on a dish card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Cuisine,
    Category,
    Ingredients,
    Protein,
    Allergens,
}

impl Field {
    /// Card order.
    pub const ALL: [Field; 5] = [
        Field::Cuisine,
        Field::Category,
        Field::Ingredients,
        Field::Protein,
        Field::Allergens,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Field::Cuisine => "Represented cuisine",
            Field::Category => "Type of the dish",
            Field::Ingredients => "Ingredients",
            Field::Protein => "Protein/Category",
            Field::Allergens => "Allergens",
        }
    }
}

impl DishRecord {
    pub fn field(&self, field: Field) -> Option<&str> {
        match field {
            Field::Cuisine => self.cuisine.as_deref(),
            Field::Category => self.category.as_deref(),
            Field::Ingredients => self.ingredients.as_deref(),
            Field::Protein => self.protein.as_deref(),
            Field::Allergens => self.allergens.as_deref(),
        }
    }

    pub fn table(&self) -> TableNumber {
        table_number(
            self.category.as_deref().unwrap_or(""),
            self.outlet.as_deref().unwrap_or(""),
        )
    }
}

/// Row layout of the form export. Header names are the form questions.
#[derive(Debug, Deserialize)]
struct RawDish {
    #[serde(rename = "Name of the dish:")]
    name: String,
    #[serde(rename = "Represented cuisine:", default)]
    cuisine: Option<String>,
    #[serde(rename = "Type of the dish:", default)]
    category: Option<String>,
    #[serde(rename = "Ingredients:", default)]
    ingredients: Option<String>,
    #[serde(rename = "Protein/Category:", default)]
    protein: Option<String>,
    #[serde(
        rename = "Allergens:",
        alias = "Allergen (Nuts are not allowed, see ACS allergy policy):",
        default
    )]
    allergens: Option<String>,
    #[serde(rename = "Provided by:")]
    provider: String,
    #[serde(rename = "Do you need an electrical outlet?", default)]
    outlet: Option<String>,
}

fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl From<RawDish> for DishRecord {
    fn from(raw: RawDish) -> Self {
        DishRecord {
            name: raw.name.trim().to_string(),
            cuisine: present(raw.cuisine),
            category: present(raw.category),
            ingredients: present(raw.ingredients),
            protein: present(raw.protein),
            allergens: present(raw.allergens),
            provider: raw.provider.trim().to_string(),
            outlet: present(raw.outlet),
        }
    }
}

// ============================================================================
// Encoding Detection
// ============================================================================

/// Encodings tried in order; the first clean decode wins.
pub const ENCODINGS: [&str; 3] = ["utf-8", "utf-8-sig", "utf-16"];

fn try_decode<'a>(encoding: &str, bytes: &'a [u8]) -> Option<Cow<'a, str>> {
    match encoding {
        "utf-8" => {
            if bytes.starts_with(&[0xEF, 0xBB, 0xBF]) {
                return None;
            }
            UTF_8.decode_without_bom_handling_and_without_replacement(bytes)
        }
        "utf-8-sig" => {
            let body = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF])?;
            UTF_8.decode_without_bom_handling_and_without_replacement(body)
        }
        "utf-16" => {
            let (codec, body) = if let Some(body) = bytes.strip_prefix(&[0xFF, 0xFE]) {
                (UTF_16LE, body)
            } else if let Some(body) = bytes.strip_prefix(&[0xFE, 0xFF]) {
                (UTF_16BE, body)
            } else {
                (UTF_16LE, bytes)
            };
            if body.len() % 2 != 0 {
                return None;
            }
            let (text, had_errors) = codec.decode_without_bom_handling(body);
            if had_errors {
                None
            } else {
                Some(text)
            }
        }
        _ => None,
    }
}

/// Decode raw file bytes, returning the text and the encoding that worked.
pub fn decode_input(bytes: &[u8]) -> Option<(String, &'static str)> {
    ENCODINGS
        .iter()
        .find_map(|&encoding| try_decode(encoding, bytes).map(|text| (text.into_owned(), encoding)))
}

// ============================================================================
// Loading
// ============================================================================

/// Parse dish rows from already-decoded CSV text.
pub fn parse_dishes(text: &str) -> Result<Vec<DishRecord>> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::Headers)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut dishes = Vec::new();
    for row in reader.deserialize::<RawDish>() {
        let raw = row?;
        dishes.push(DishRecord::from(raw));
    }
    Ok(dishes)
}

/// Read, decode and parse the export at `path`.
pub fn load_dishes(path: &Path) -> Result<Vec<DishRecord>> {
    let bytes = std::fs::read(path).map_err(|source| AppError::InputError {
        path: path.display().to_string(),
        source,
    })?;

    let (text, encoding) = decode_input(&bytes).ok_or_else(|| AppError::EncodingError {
        path: path.display().to_string(),
        tried: ENCODINGS.join(", "),
    })?;
    info!("Successfully read CSV with {encoding} encoding");

    let dishes = parse_dishes(&text)?;
    debug!(count = dishes.len(), "loaded dish records");
    Ok(dishes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const HEADER: &str = "Timestamp,Name of the dish:,Represented cuisine:,Type of the dish:,Ingredients:,Protein/Category:,\"Allergen (Nuts are not allowed, see ACS allergy policy):\",Provided by:,Do you need an electrical outlet?";

    #[test]
    fn test_parse_renames_allergen_column() {
        let csv = format!(
            "{HEADER}\n2025-04-01,Samosa,Indian,Appetizer,\"Potato, peas\",Vegetarian,Gluten,Priya,No\n"
        );
        let dishes = parse_dishes(&csv).unwrap();
        assert_eq!(
            dishes,
            vec![DishRecord {
                name: "Samosa".to_string(),
                cuisine: Some("Indian".to_string()),
                category: Some("Appetizer".to_string()),
                ingredients: Some("Potato, peas".to_string()),
                protein: Some("Vegetarian".to_string()),
                allergens: Some("Gluten".to_string()),
                provider: "Priya".to_string(),
                outlet: Some("No".to_string()),
            }]
        );
    }

    #[test]
    fn test_empty_cells_become_none() {
        let csv = format!("{HEADER}\n,Flan,,Dessert,,, ,Maria,\n");
        let dishes = parse_dishes(&csv).unwrap();
        assert_eq!(dishes.len(), 1);
        assert_eq!(dishes[0].cuisine, None);
        assert_eq!(dishes[0].allergens, None);
        assert_eq!(dishes[0].outlet, None);
        assert_eq!(dishes[0].field(Field::Category), Some("Dessert"));
    }

    #[test]
    fn test_simplified_allergen_header() {
        let csv = "Name of the dish:,Allergens:,Provided by:\nPho,Fish sauce,Linh\n";
        let dishes = parse_dishes(csv).unwrap();
        assert_eq!(dishes[0].allergens.as_deref(), Some("Fish sauce"));
    }

    #[test]
    fn test_missing_required_column_fails() {
        let csv = "Name of the dish:,Type of the dish:\nPho,Main course\n";
        assert!(parse_dishes(csv).is_err());
    }

    #[test]
    fn test_table_from_record() {
        let dish = DishRecord {
            category: Some("Appetizer".to_string()),
            outlet: Some("Yes".to_string()),
            ..Default::default()
        };
        assert_eq!(dish.table().get(), 3);
        assert_eq!(DishRecord::default().table().get(), 3);
    }

    #[test]
    fn test_decode_plain_utf8() {
        let (text, encoding) = decode_input("Crème brûlée".as_bytes()).unwrap();
        assert_eq!(text, "Crème brûlée");
        assert_eq!(encoding, "utf-8");
    }

    #[test]
    fn test_decode_utf8_with_bom() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice(b"Name of the dish:");
        let (text, encoding) = decode_input(&bytes).unwrap();
        assert_eq!(text, "Name of the dish:");
        assert_eq!(encoding, "utf-8-sig");
    }

    #[test]
    fn test_decode_utf16_le() {
        let mut bytes = vec![0xFF, 0xFE];
        for unit in "Pho,Linh".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        let (text, encoding) = decode_input(&bytes).unwrap();
        assert_eq!(text, "Pho,Linh");
        assert_eq!(encoding, "utf-16");
    }

    #[test]
    fn test_undecodable_bytes() {
        // Invalid UTF-8 and an odd length for UTF-16.
        assert!(decode_input(&[0xC3, 0x28, 0xFF]).is_none());
    }
}
