//! Rule table for PAN tax-id cards.
//!
//! The PAN number and birth date keep the last matching line while the two
//! name fields keep the first two uppercase lines.

use lazy_static::lazy_static;

use crate::models::record::{DocumentKind, FieldKind};

use super::patterns::{BIRTH_DATE_KEYWORD, BIRTH_DATE_LABEL, PAN_NUMBER, UPPERCASE_LINE};
use super::{AssignPolicy, FieldRule, RuleSet, ValueExtractor};

lazy_static! {
    pub static ref TAX_ID_RULES: RuleSet = RuleSet::new(
        DocumentKind::TaxId,
        vec![
            FieldRule::new(
                FieldKind::TaxIdNumber,
                &PAN_NUMBER,
                ValueExtractor::MatchedText,
                AssignPolicy::LastWins,
            ),
            FieldRule::new(
                FieldKind::Dob,
                &BIRTH_DATE_KEYWORD,
                ValueExtractor::Strip(&BIRTH_DATE_LABEL),
                AssignPolicy::LastWins,
            ),
            FieldRule::new(
                FieldKind::Name,
                &UPPERCASE_LINE,
                ValueExtractor::TrimmedLine,
                AssignPolicy::FirstVacant,
            ),
            FieldRule::new(
                FieldKind::FatherName,
                &UPPERCASE_LINE,
                ValueExtractor::TrimmedLine,
                AssignPolicy::FirstVacant,
            ),
        ],
    );
}
