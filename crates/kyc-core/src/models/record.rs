//! Extracted and persisted KYC record models.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Supported document types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DocumentKind {
    /// Aadhaar identity card.
    #[serde(rename = "aadhaar")]
    Identity,
    /// PAN tax-id card.
    #[serde(rename = "pan")]
    TaxId,
}

impl DocumentKind {
    /// Name used in user-facing messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Identity => "Aadhaar",
            Self::TaxId => "PAN",
        }
    }

    /// Multipart field carrying the uploaded image.
    pub fn upload_field(&self) -> &'static str {
        match self {
            Self::Identity => "aadhaar",
            Self::TaxId => "pan",
        }
    }

    /// Storage collection holding records of this type.
    pub fn collection(&self) -> &'static str {
        match self {
            Self::Identity => "aadhaar_data",
            Self::TaxId => "pan_data",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A field that a rule can populate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldKind {
    Name,
    FatherName,
    Dob,
    Gender,
    IdNumber,
    TaxIdNumber,
    Address,
}

impl FieldKind {
    /// Field name as it appears in the JSON record.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::FatherName => "father_name",
            Self::Dob => "dob",
            Self::Gender => "gender",
            Self::IdNumber => "aadhaar_number",
            Self::TaxIdNumber => "pan_number",
            Self::Address => "address",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields extracted from an Aadhaar card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityRecord {
    pub name: Option<String>,
    pub dob: Option<String>,
    pub gender: Option<String>,
    /// 12-digit Aadhaar number as printed (three space-separated groups).
    #[serde(rename = "aadhaar_number")]
    pub id_number: Option<String>,
    /// No rule extracts the address; it is always `None`.
    pub address: Option<String>,
}

/// Fields extracted from a PAN card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxIdRecord {
    pub name: Option<String>,
    pub father_name: Option<String>,
    pub dob: Option<String>,
    #[serde(rename = "pan_number")]
    pub tax_id_number: Option<String>,
}

/// A record extracted from one document.
///
/// Serializes as the flat field object of the inner record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ExtractedRecord {
    Identity(IdentityRecord),
    TaxId(TaxIdRecord),
}

impl ExtractedRecord {
    /// Document type of this record.
    pub fn kind(&self) -> DocumentKind {
        match self {
            Self::Identity(_) => DocumentKind::Identity,
            Self::TaxId(_) => DocumentKind::TaxId,
        }
    }

    /// Value of a field, if the record type has it and it was extracted.
    pub fn get(&self, field: FieldKind) -> Option<&str> {
        let value = match (self, field) {
            (Self::Identity(r), FieldKind::Name) => &r.name,
            (Self::Identity(r), FieldKind::Dob) => &r.dob,
            (Self::Identity(r), FieldKind::Gender) => &r.gender,
            (Self::Identity(r), FieldKind::IdNumber) => &r.id_number,
            (Self::Identity(r), FieldKind::Address) => &r.address,
            (Self::TaxId(r), FieldKind::Name) => &r.name,
            (Self::TaxId(r), FieldKind::FatherName) => &r.father_name,
            (Self::TaxId(r), FieldKind::Dob) => &r.dob,
            (Self::TaxId(r), FieldKind::TaxIdNumber) => &r.tax_id_number,
            _ => return None,
        };
        value.as_deref()
    }
}

/// A record after it has been written to a store.
#[derive(Debug, Clone, Serialize)]
pub struct PersistedRecord {
    /// Identifier generated at insert time.
    #[serde(rename = "_id")]
    pub id: String,

    /// Insertion timestamp.
    pub created_at: DateTime<Utc>,

    #[serde(flatten)]
    pub record: ExtractedRecord,
}

impl PersistedRecord {
    /// Wrap a record with a freshly generated identifier.
    pub fn new(record: ExtractedRecord) -> Self {
        Self {
            id: Uuid::new_v4().simple().to_string(),
            created_at: Utc::now(),
            record,
        }
    }

    pub fn kind(&self) -> DocumentKind {
        self.record.kind()
    }
}
