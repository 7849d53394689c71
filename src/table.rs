//! Serving-table assignment.

use std::fmt;

/// Physical serving table, always 1, 2 or 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TableNumber(u8);

impl TableNumber {
    pub fn get(self) -> u8 {
        self.0
    }
}

impl fmt::Display for TableNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Pick the table for a dish.
///
/// Outlet needs and desserts/drinks go to table 3 before any category
/// rule is looked at; unknown categories also land on table 3.
pub fn table_number(category: &str, needs_outlet: &str) -> TableNumber {
    let category = category.trim().to_lowercase();
    let needs_outlet = needs_outlet.trim().to_lowercase();

    if needs_outlet == "yes" || matches!(category.as_str(), "dessert" | "drink") {
        TableNumber(3)
    } else if category == "appetizer" {
        TableNumber(1)
    } else if matches!(category.as_str(), "salad" | "main course") {
        TableNumber(2)
    } else {
        TableNumber(3)
    }
}
