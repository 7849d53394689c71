//! Greedy word wrapping against built-in font metrics.

use crate::metrics::Font;
use crate::sanitize::Sanitizer;

/// One wrapped line and the font it is drawn in.
#[derive(Debug, Clone, PartialEq)]
pub struct StyledLine {
    pub text: String,
    pub font: Font,
}

/// A menu entry split into the dish name and the trailing provider clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryText {
    pub primary: String,
    pub annotation: String,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LineWrapper {
    sanitizer: Sanitizer,
}

impl LineWrapper {
    pub fn new(sanitizer: Sanitizer) -> Self {
        Self { sanitizer }
    }

    /// Split `text` into lines no wider than `max_width` points.
    ///
    /// A word is added while `current + width(word + " ") <= max_width`.
    /// A word that does not fit on an empty line gets a line to itself.
    pub fn wrap(&self, text: &str, font: Font, size: f32, max_width: f32) -> Vec<String> {
        self.wrap_indented(text, font, size, max_width, 0.0)
    }

    /// Same as [`wrap`](Self::wrap), with `indent` points already used on every line.
    pub fn wrap_indented(
        &self,
        text: &str,
        font: Font,
        size: f32,
        max_width: f32,
        indent: f32,
    ) -> Vec<String> {
        let clean = self.sanitizer.sanitize(text);
        let mut lines = Vec::new();
        let mut current: Vec<&str> = Vec::new();
        let mut current_width = indent;

        for word in clean.split_whitespace() {
            let word_width = font.text_width(&format!("{word} "), size);
            if current_width + word_width <= max_width {
                current.push(word);
                current_width += word_width;
            } else {
                if !current.is_empty() {
                    lines.push(current.join(" "));
                }
                current = vec![word];
                current_width = indent + word_width;
            }
        }

        if !current.is_empty() {
            lines.push(current.join(" "));
        }

        lines
    }

    /// Wrap a two-part entry: the primary text in `primary_font`, then the
    /// annotation starting on a fresh line in `annotation_font`.
    pub fn wrap_entry(
        &self,
        entry: &EntryText,
        primary_font: Font,
        annotation_font: Font,
        size: f32,
        max_width: f32,
        indent: f32,
    ) -> Vec<StyledLine> {
        let primary = self
            .wrap_indented(&entry.primary, primary_font, size, max_width, indent)
            .into_iter()
            .map(|text| StyledLine { text, font: primary_font });
        let annotation = self
            .wrap_indented(&entry.annotation, annotation_font, size, max_width, indent)
            .into_iter()
            .map(|text| StyledLine { text, font: annotation_font });
        primary.chain(annotation).collect()
    }
}

/// Wrap with the default sanitizer.
pub fn wrap_text(text: &str, font: Font, size: f32, max_width: f32) -> Vec<String> {
    LineWrapper::default().wrap(text, font, size, max_width)
}
