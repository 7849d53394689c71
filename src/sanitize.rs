//! Removal of decorative dietary symbols from display text.

/// What to do with a matched symbol sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolAction {
    Delete,
    Substitute(&'static str),
}

/// A decorative sequence and the label it stands for.
#[derive(Debug, Clone, Copy)]
pub struct DietarySymbol {
    pub sequence: &'static str,
    pub label: &'static str,
}

/// Each sequence includes the space that precedes the symbol in form answers.
pub const DIETARY_SYMBOLS: [DietarySymbol; 7] = [
    DietarySymbol { sequence: " \u{1F319}", label: "(Halal)" },
    DietarySymbol { sequence: " \u{2721}\u{FE0F}", label: "(Kosher)" },
    DietarySymbol { sequence: " \u{1F966}", label: "(Vegetarian)" },
    DietarySymbol { sequence: " \u{1F416}", label: "(Pork)" },
    DietarySymbol { sequence: " \u{1F414}", label: "(Poultry)" },
    DietarySymbol { sequence: " \u{1F404}", label: "(Beef)" },
    DietarySymbol { sequence: " \u{1F331}", label: "(Vegan)" },
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SanitizeMode {
    /// Drop the symbol entirely.
    #[default]
    Delete,
    /// Replace the symbol with its bracketed label.
    Label,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Sanitizer {
    mode: SanitizeMode,
}

impl Sanitizer {
    pub fn new(mode: SanitizeMode) -> Self {
        Self { mode }
    }

    pub fn action_for(&self, symbol: &DietarySymbol) -> SymbolAction {
        match self.mode {
            SanitizeMode::Delete => SymbolAction::Delete,
            SanitizeMode::Label => SymbolAction::Substitute(symbol.label),
        }
    }

    pub fn sanitize(&self, text: &str) -> String {
        let mut result = text.to_string();
        // Deleting one sequence can splice a space onto a following symbol,
        // so repeat until nothing matches.
        loop {
            for symbol in &DIETARY_SYMBOLS {
                if !result.contains(symbol.sequence) {
                    continue;
                }
                result = match self.action_for(symbol) {
                    SymbolAction::Delete => result.replace(symbol.sequence, ""),
                    SymbolAction::Substitute(label) => {
                        result.replace(symbol.sequence, &format!(" {label}"))
                    }
                };
            }
            if !DIETARY_SYMBOLS.iter().any(|s| result.contains(s.sequence)) {
                break;
            }
        }
        result.trim().to_string()
    }
}

/// Sanitize with the default delete-only behaviour.
pub fn sanitize(text: &str) -> String {
    Sanitizer::default().sanitize(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removes_every_known_symbol() {
        let text = "Biryani \u{1F319} \u{2721}\u{FE0F} \u{1F966} \u{1F416} \u{1F414} \u{1F404} \u{1F331}";
        assert_eq!(sanitize(text), "Biryani");
    }

    #[test]
    fn test_noop_without_symbols() {
        assert_eq!(sanitize("Chicken tikka masala"), "Chicken tikka masala");
    }

    #[test]
    fn test_trims_whitespace() {
        assert_eq!(sanitize("  Baklava \n"), "Baklava");
    }

    #[test]
    fn test_unknown_symbols_pass_through() {
        assert_eq!(sanitize("Tacos \u{1F32E}"), "Tacos \u{1F32E}");
    }

    #[test]
    fn test_symbol_without_leading_space_is_kept() {
        assert_eq!(sanitize("\u{1F331}Salad"), "\u{1F331}Salad");
    }

    #[test]
    fn test_idempotent_on_spliced_sequences() {
        let text = "Dal  \u{1F331}\u{1F331} curry";
        let once = sanitize(text);
        assert_eq!(sanitize(&once), once);
        assert_eq!(once, "Dal curry");
    }

    #[test]
    fn test_label_mode_substitutes() {
        let sanitizer = Sanitizer::new(SanitizeMode::Label);
        assert_eq!(sanitizer.sanitize("Kebab \u{1F319}"), "Kebab (Halal)");
        let once = sanitizer.sanitize("Tofu \u{1F331} \u{1F966}");
        assert_eq!(once, "Tofu (Vegan) (Vegetarian)");
        assert_eq!(sanitizer.sanitize(&once), once);
    }
}
