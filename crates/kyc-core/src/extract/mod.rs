//! Document field extraction module.

mod assembler;
mod extractor;
pub mod rules;

pub use assembler::assemble;
pub use extractor::{ExtractionResult, RuleExtractor};

use std::collections::BTreeMap;

use crate::models::record::FieldKind;

/// OCR output for one document image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawText {
    text: String,
}

impl RawText {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Trimmed, non-blank lines in document order.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
    }
}

impl From<&str> for RawText {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

/// Field values collected while a document's lines are classified.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldValues {
    values: BTreeMap<FieldKind, String>,
}

impl FieldValues {
    pub fn get(&self, field: FieldKind) -> Option<&str> {
        self.values.get(&field).map(String::as_str)
    }

    pub fn is_set(&self, field: FieldKind) -> bool {
        self.values.contains_key(&field)
    }

    pub fn set(&mut self, field: FieldKind, value: String) {
        self.values.insert(field, value);
    }

    /// Remove and return a field value.
    pub fn take(&mut self, field: FieldKind) -> Option<String> {
        self.values.remove(&field)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_text_lines_are_trimmed_and_blank_free() {
        let raw = RawText::new("  JOHN SMITH \r\n\n   \nABCDE1234F\n");
        let lines: Vec<&str> = raw.lines().collect();
        assert_eq!(lines, vec!["JOHN SMITH", "ABCDE1234F"]);
    }

    #[test]
    fn test_field_values() {
        let mut fields = FieldValues::default();
        assert!(fields.is_empty());

        fields.set(FieldKind::Dob, "01-01-1990".to_string());
        assert!(fields.is_set(FieldKind::Dob));
        assert_eq!(fields.get(FieldKind::Dob), Some("01-01-1990"));
        assert_eq!(fields.len(), 1);

        assert_eq!(fields.take(FieldKind::Dob), Some("01-01-1990".to_string()));
        assert!(!fields.is_set(FieldKind::Dob));
    }
}
