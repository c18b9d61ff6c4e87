//! Regex patterns for Aadhaar and PAN field extraction.
//!
//! Keyword patterns are case-insensitive; format patterns are exact-case.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Aadhaar keywords
    pub static ref NAME_KEYWORD: Regex = Regex::new(r"(?i)name").unwrap();

    pub static ref DOB_KEYWORD: Regex = Regex::new(r"(?i)dob").unwrap();

    pub static ref GENDER_KEYWORD: Regex = Regex::new(r"(?i)male|female|others").unwrap();

    // Aadhaar number: three groups of four digits
    pub static ref AADHAAR_NUMBER: Regex = Regex::new(r"[0-9]{4} [0-9]{4} [0-9]{4}").unwrap();

    // PAN number (ABCDE1234F)
    pub static ref PAN_NUMBER: Regex = Regex::new(r"[A-Z]{5}[0-9]{4}[A-Z]").unwrap();

    pub static ref BIRTH_DATE_KEYWORD: Regex = Regex::new(r"(?i)dob|date of birth").unwrap();

    // Removed from a birth-date line to leave the date itself
    pub static ref BIRTH_DATE_LABEL: Regex = Regex::new(r"(?i)dob|date of birth|:").unwrap();

    // Printed names on PAN cards are uppercase
    pub static ref UPPERCASE_LINE: Regex = Regex::new(r"^[A-Z\s]+$").unwrap();
}
