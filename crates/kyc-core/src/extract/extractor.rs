//! Drives the line classifier over a document and assembles the record.

use std::time::Instant;

use tracing::{debug, info, trace, warn};

use crate::models::record::{DocumentKind, ExtractedRecord};

use super::rules::{Assignment, RuleSet, rule_set};
use super::{FieldValues, RawText, assemble};

/// Result of field extraction for one document.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Assembled record.
    pub record: ExtractedRecord,
    /// Number of lines that matched a rule.
    pub matched_lines: usize,
    /// Fields that no line matched.
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Rule-table driven field extractor for one document type.
#[derive(Debug, Clone, Copy)]
pub struct RuleExtractor {
    rules: &'static RuleSet,
}

impl RuleExtractor {
    /// Extractor using the built-in rule table for `kind`.
    pub fn for_kind(kind: DocumentKind) -> Self {
        Self::with_rules(rule_set(kind))
    }

    /// Extractor using a custom rule table.
    pub fn with_rules(rules: &'static RuleSet) -> Self {
        Self { rules }
    }

    pub fn kind(&self) -> DocumentKind {
        self.rules.kind()
    }

    /// Extract and assemble the record for a document.
    pub fn extract(&self, raw: &RawText) -> ExtractionResult {
        let start = Instant::now();
        let kind = self.kind();

        let (fields, matched_lines) = self.run(raw);
        let warnings: Vec<String> = self
            .rules
            .fields()
            .into_iter()
            .filter(|field| !fields.is_set(*field))
            .map(|field| format!("Could not extract {}", field))
            .collect();

        for warning in &warnings {
            warn!("{} card: {}", kind, warning);
        }

        let record = assemble(kind, fields);

        info!(
            "Extracted {} record from {} matched lines",
            kind, matched_lines
        );

        ExtractionResult {
            record,
            matched_lines,
            warnings,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }

    /// Extract the record for a block of text.
    pub fn extract_from_text(&self, text: &str) -> ExtractedRecord {
        self.extract(&RawText::new(text)).record
    }

    fn run(&self, raw: &RawText) -> (FieldValues, usize) {
        let mut fields = FieldValues::default();
        let mut matched_lines = 0;

        for (index, line) in raw.lines().enumerate() {
            let Some(rule) = self.rules.select(line, &fields) else {
                trace!("line {}: no rule matched", index + 1);
                continue;
            };

            matched_lines += 1;
            let outcome = rule.apply(line, &mut fields);
            match outcome {
                Assignment::Ignored => {
                    debug!("line {}: {} already set, ignoring", index + 1, rule.field)
                }
                Assignment::Set | Assignment::Overwritten => {
                    debug!("line {}: {} {:?}", index + 1, rule.field, outcome)
                }
            }
        }

        (fields, matched_lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record::{FieldKind, IdentityRecord, TaxIdRecord};
    use pretty_assertions::assert_eq;

    fn identity(text: &str) -> ExtractedRecord {
        RuleExtractor::for_kind(DocumentKind::Identity).extract_from_text(text)
    }

    fn tax_id(text: &str) -> ExtractedRecord {
        RuleExtractor::for_kind(DocumentKind::TaxId).extract_from_text(text)
    }

    #[test]
    fn test_identity_card() {
        let record = identity("Name: Asha Rao\nDOB: 01-01-1990\nMale\n1234 5678 9012");

        assert_eq!(
            record,
            ExtractedRecord::Identity(IdentityRecord {
                name: Some("Asha Rao".to_string()),
                dob: Some("01-01-1990".to_string()),
                gender: Some("Male".to_string()),
                id_number: Some("1234 5678 9012".to_string()),
                address: None,
            })
        );
    }

    #[test]
    fn test_tax_id_card() {
        let record = tax_id("JOHN SMITH\nROBERT SMITH\nABCDE1234F\nDOB: 02-02-1985\nABCDF5678G");

        assert_eq!(
            record,
            ExtractedRecord::TaxId(TaxIdRecord {
                name: Some("JOHN SMITH".to_string()),
                father_name: Some("ROBERT SMITH".to_string()),
                dob: Some("02-02-1985".to_string()),
                tax_id_number: Some("ABCDF5678G".to_string()),
            })
        );
    }

    #[test]
    fn test_identity_keeps_first_match() {
        let text = r#"
            Government of India
            Name: Asha Rao
            Father's Name: Ravi Rao
            DOB: 01-01-1990
            DOB: 31-12-1999
            Female
            Male
            1234 5678 9012
            9999 8888 7777
        "#;

        let record = identity(text);
        assert_eq!(record.get(FieldKind::Name), Some("Asha Rao"));
        assert_eq!(record.get(FieldKind::Dob), Some("01-01-1990"));
        assert_eq!(record.get(FieldKind::Gender), Some("Female"));
        assert_eq!(record.get(FieldKind::IdNumber), Some("1234 5678 9012"));
    }

    #[test]
    fn test_identity_claimed_line_does_not_fall_through() {
        // The second line holds a number but is claimed by the name rule,
        // whose field is already set.
        let record = identity("Name: Asha Rao\nName ref 1234 5678 9012");
        assert_eq!(record.get(FieldKind::IdNumber), None);
    }

    #[test]
    fn test_tax_id_keeps_last_number_and_date() {
        let text = "ABCDE1234F\nDate of Birth: 01/01/1980\nXYZAB9876C\nDOB: 02/02/1985";

        let record = tax_id(text);
        assert_eq!(record.get(FieldKind::TaxIdNumber), Some("XYZAB9876C"));
        assert_eq!(record.get(FieldKind::Dob), Some("02/02/1985"));
    }

    #[test]
    fn test_tax_id_names_keep_first_two_uppercase_lines() {
        let text = "INCOME TAX DEPARTMENT\nJOHN SMITH\nROBERT SMITH\nPermanent Account Number";

        let record = tax_id(text);
        assert_eq!(record.get(FieldKind::Name), Some("INCOME TAX DEPARTMENT"));
        assert_eq!(record.get(FieldKind::FatherName), Some("JOHN SMITH"));
    }

    #[test]
    fn test_tax_id_blank_lines_are_skipped() {
        let record = tax_id("\n   \nJOHN SMITH\n\n\t\nROBERT SMITH\n");
        assert_eq!(record.get(FieldKind::Name), Some("JOHN SMITH"));
        assert_eq!(record.get(FieldKind::FatherName), Some("ROBERT SMITH"));
    }

    #[test]
    fn test_unmatched_fields_are_absent() {
        assert_eq!(
            identity("Government of India\nVID 12"),
            ExtractedRecord::Identity(IdentityRecord::default())
        );
        assert_eq!(tax_id(""), ExtractedRecord::TaxId(TaxIdRecord::default()));
    }

    #[test]
    fn test_extraction_is_repeatable() {
        let text = "JOHN SMITH\nABCDE1234F\nROBERT SMITH\nDOB: 02-02-1985";
        let extractor = RuleExtractor::for_kind(DocumentKind::TaxId);

        let first = extractor.extract_from_text(text);
        let second = extractor.extract_from_text(text);
        assert_eq!(first, second);
    }

    #[test]
    fn test_warnings_list_missing_fields() {
        let result = RuleExtractor::for_kind(DocumentKind::Identity)
            .extract(&RawText::new("Name: Asha Rao\nMale"));

        assert_eq!(result.matched_lines, 2);
        assert_eq!(
            result.warnings,
            vec![
                "Could not extract dob".to_string(),
                "Could not extract aadhaar_number".to_string()
            ]
        );
    }
}
