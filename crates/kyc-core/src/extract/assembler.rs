//! Packages extracted field values into typed records.

use crate::models::record::{DocumentKind, ExtractedRecord, FieldKind, IdentityRecord, TaxIdRecord};

use super::FieldValues;

/// Build the record variant for `kind` from extracted field values.
///
/// No validation happens here: fields that were not extracted stay `None`.
pub fn assemble(kind: DocumentKind, mut fields: FieldValues) -> ExtractedRecord {
    match kind {
        DocumentKind::Identity => ExtractedRecord::Identity(IdentityRecord {
            name: fields.take(FieldKind::Name),
            dob: fields.take(FieldKind::Dob),
            gender: fields.take(FieldKind::Gender),
            id_number: fields.take(FieldKind::IdNumber),
            address: None,
        }),
        DocumentKind::TaxId => ExtractedRecord::TaxId(TaxIdRecord {
            name: fields.take(FieldKind::Name),
            father_name: fields.take(FieldKind::FatherName),
            dob: fields.take(FieldKind::Dob),
            tax_id_number: fields.take(FieldKind::TaxIdNumber),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_fields_stay_absent() {
        let record = assemble(DocumentKind::TaxId, FieldValues::default());
        assert_eq!(record, ExtractedRecord::TaxId(TaxIdRecord::default()));
    }

    #[test]
    fn test_identity_address_is_never_filled() {
        let mut fields = FieldValues::default();
        fields.set(FieldKind::Address, "12 MG Road".to_string());
        fields.set(FieldKind::Gender, "Male".to_string());

        let record = assemble(DocumentKind::Identity, fields);
        assert_eq!(record.get(FieldKind::Address), None);
        assert_eq!(record.get(FieldKind::Gender), Some("Male"));
    }
}
