//! Ordered field rule tables and the line classifier.
//!
//! Each document type has one [`RuleSet`]. A line is tested against the
//! rules in table order and belongs to the first rule that matches; the
//! rule's [`AssignPolicy`] then decides whether the field takes the value.

pub mod identity;
pub mod patterns;
pub mod tax_id;

use regex::Regex;

use crate::models::record::{DocumentKind, FieldKind};

use super::FieldValues;

pub use identity::IDENTITY_RULES;
pub use tax_id::TAX_ID_RULES;

/// How a matching line is assigned to its field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignPolicy {
    /// The first matching line sets the field. Later matches still claim
    /// their line but leave the field unchanged.
    FirstWins,
    /// The rule only takes part in classification while its field is
    /// empty; once set, lines fall through to later rules.
    FirstVacant,
    /// Every matching line overwrites the field; the last one wins.
    LastWins,
}

/// Derives a field value from a line that matched a rule.
#[derive(Debug, Clone, Copy)]
pub enum ValueExtractor {
    /// Text after the last colon, trimmed (whole line if there is no colon).
    AfterLastColon,
    /// The trimmed line.
    TrimmedLine,
    /// The text matched by the rule's matcher.
    MatchedText,
    /// The line with every match of the pattern removed, trimmed.
    Strip(&'static Regex),
}

/// What happened to a field when a rule was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assignment {
    Set,
    Overwritten,
    Ignored,
}

/// One entry of a rule table.
#[derive(Debug, Clone)]
pub struct FieldRule {
    pub field: FieldKind,
    pub matcher: &'static Regex,
    pub extractor: ValueExtractor,
    pub policy: AssignPolicy,
}

impl FieldRule {
    pub fn new(
        field: FieldKind,
        matcher: &'static Regex,
        extractor: ValueExtractor,
        policy: AssignPolicy,
    ) -> Self {
        Self {
            field,
            matcher,
            extractor,
            policy,
        }
    }

    /// Whether the rule's matcher accepts the line.
    pub fn matches(&self, line: &str) -> bool {
        self.matcher.is_match(line)
    }

    /// Whether the rule takes part in classification given the current fields.
    pub fn admits(&self, fields: &FieldValues) -> bool {
        match self.policy {
            AssignPolicy::FirstVacant => !fields.is_set(self.field),
            AssignPolicy::FirstWins | AssignPolicy::LastWins => true,
        }
    }

    /// Derive the field value from a matching line.
    pub fn extract(&self, line: &str) -> String {
        match self.extractor {
            ValueExtractor::AfterLastColon => line
                .rsplit(':')
                .next()
                .unwrap_or(line)
                .trim()
                .to_string(),
            ValueExtractor::TrimmedLine => line.trim().to_string(),
            ValueExtractor::MatchedText => self
                .matcher
                .find(line)
                .map(|m| m.as_str().to_string())
                .unwrap_or_else(|| line.trim().to_string()),
            ValueExtractor::Strip(pattern) => pattern.replace_all(line, "").trim().to_string(),
        }
    }

    /// Apply the rule to a line it matched.
    pub fn apply(&self, line: &str, fields: &mut FieldValues) -> Assignment {
        let already_set = fields.is_set(self.field);
        match self.policy {
            AssignPolicy::FirstWins | AssignPolicy::FirstVacant if already_set => {
                Assignment::Ignored
            }
            _ => {
                fields.set(self.field, self.extract(line));
                if already_set {
                    Assignment::Overwritten
                } else {
                    Assignment::Set
                }
            }
        }
    }
}

/// The ordered rule table of one document type.
#[derive(Debug)]
pub struct RuleSet {
    kind: DocumentKind,
    rules: Vec<FieldRule>,
}

impl RuleSet {
    pub fn new(kind: DocumentKind, rules: Vec<FieldRule>) -> Self {
        Self { kind, rules }
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    /// Distinct fields the table can populate, in priority order.
    pub fn fields(&self) -> Vec<FieldKind> {
        let mut fields = Vec::with_capacity(self.rules.len());
        for rule in &self.rules {
            if !fields.contains(&rule.field) {
                fields.push(rule.field);
            }
        }
        fields
    }

    /// First rule whose matcher accepts the line, ignoring field state.
    pub fn classify(&self, line: &str) -> Option<&FieldRule> {
        self.rules.iter().find(|rule| rule.matches(line))
    }

    /// First rule that is admitted by the current fields and matches the line.
    pub fn select(&self, line: &str, fields: &FieldValues) -> Option<&FieldRule> {
        self.rules
            .iter()
            .find(|rule| rule.admits(fields) && rule.matches(line))
    }
}

/// Rule table for a document type.
pub fn rule_set(kind: DocumentKind) -> &'static RuleSet {
    match kind {
        DocumentKind::Identity => &IDENTITY_RULES,
        DocumentKind::TaxId => &TAX_ID_RULES,
    }
}

#[cfg(test)]
mod tests {
    use super::patterns::{BIRTH_DATE_LABEL, NAME_KEYWORD, PAN_NUMBER};
    use super::*;

    #[test]
    fn test_after_last_colon() {
        let rule = FieldRule::new(
            FieldKind::Name,
            &NAME_KEYWORD,
            ValueExtractor::AfterLastColon,
            AssignPolicy::FirstWins,
        );
        assert_eq!(rule.extract("Name: Asha Rao"), "Asha Rao");
        assert_eq!(rule.extract("Father's Name : S/O: Ravi Rao "), "Ravi Rao");
        assert_eq!(rule.extract("  Name Asha Rao  "), "Name Asha Rao");
        assert_eq!(rule.extract("Name:"), "");
    }

    #[test]
    fn test_matched_text_takes_substring() {
        let rule = FieldRule::new(
            FieldKind::TaxIdNumber,
            &PAN_NUMBER,
            ValueExtractor::MatchedText,
            AssignPolicy::LastWins,
        );
        assert_eq!(rule.extract("PAN ABCDE1234F (copy)"), "ABCDE1234F");
    }

    #[test]
    fn test_strip_removes_every_occurrence() {
        let rule = FieldRule::new(
            FieldKind::Dob,
            &PAN_NUMBER,
            ValueExtractor::Strip(&BIRTH_DATE_LABEL),
            AssignPolicy::LastWins,
        );
        assert_eq!(rule.extract("Date of Birth: 02/02/1985"), "02/02/1985");
        assert_eq!(rule.extract("DOB : dob: 02-02-1985"), "02-02-1985");
    }

    #[test]
    fn test_policies() {
        let mut fields = FieldValues::default();
        let first = FieldRule::new(
            FieldKind::Name,
            &NAME_KEYWORD,
            ValueExtractor::AfterLastColon,
            AssignPolicy::FirstWins,
        );
        assert_eq!(first.apply("Name: A", &mut fields), Assignment::Set);
        assert_eq!(first.apply("Name: B", &mut fields), Assignment::Ignored);
        assert_eq!(fields.get(FieldKind::Name), Some("A"));

        let last = FieldRule::new(
            FieldKind::TaxIdNumber,
            &PAN_NUMBER,
            ValueExtractor::MatchedText,
            AssignPolicy::LastWins,
        );
        assert_eq!(last.apply("ABCDE1234F", &mut fields), Assignment::Set);
        assert_eq!(last.apply("ABCDF5678G", &mut fields), Assignment::Overwritten);
        assert_eq!(fields.get(FieldKind::TaxIdNumber), Some("ABCDF5678G"));
    }

    #[test]
    fn test_first_vacant_rule_steps_aside() {
        let mut fields = FieldValues::default();
        let rule = FieldRule::new(
            FieldKind::Name,
            &NAME_KEYWORD,
            ValueExtractor::TrimmedLine,
            AssignPolicy::FirstVacant,
        );
        assert!(rule.admits(&fields));
        fields.set(FieldKind::Name, "X".to_string());
        assert!(!rule.admits(&fields));
    }

    #[test]
    fn test_rule_set_lookup() {
        assert_eq!(rule_set(DocumentKind::Identity).kind(), DocumentKind::Identity);
        assert_eq!(rule_set(DocumentKind::TaxId).kind(), DocumentKind::TaxId);
    }
}
