//! Rule table for Aadhaar identity cards.

use lazy_static::lazy_static;

use crate::models::record::{DocumentKind, FieldKind};

use super::patterns::{AADHAAR_NUMBER, DOB_KEYWORD, GENDER_KEYWORD, NAME_KEYWORD};
use super::{AssignPolicy, FieldRule, RuleSet, ValueExtractor};

lazy_static! {
    /// Every Aadhaar rule keeps the first value it sees. The address is
    /// printed across several unlabeled lines and has no rule.
    pub static ref IDENTITY_RULES: RuleSet = RuleSet::new(
        DocumentKind::Identity,
        vec![
            FieldRule::new(
                FieldKind::Name,
                &NAME_KEYWORD,
                ValueExtractor::AfterLastColon,
                AssignPolicy::FirstWins,
            ),
            FieldRule::new(
                FieldKind::Dob,
                &DOB_KEYWORD,
                ValueExtractor::AfterLastColon,
                AssignPolicy::FirstWins,
            ),
            FieldRule::new(
                FieldKind::Gender,
                &GENDER_KEYWORD,
                ValueExtractor::TrimmedLine,
                AssignPolicy::FirstWins,
            ),
            FieldRule::new(
                FieldKind::IdNumber,
                &AADHAAR_NUMBER,
                ValueExtractor::TrimmedLine,
                AssignPolicy::FirstWins,
            ),
        ],
    );
}
