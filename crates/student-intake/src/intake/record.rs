use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Admission-related fields of the Student entity that extraction can fill.
///
/// Declaration order is the serialization order of a [`PartialRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StudentField {
    FirstName,
    LastName,
    Email,
    Phone,
    DateOfBirth,
    Major,
    DesiredAdmissionTerm,
    DesiredUniversities,
    ShorelightApplication,
    ShorelightUniversities,
    HomestayAddress,
    BostonArrivalDate,
    ExpectedGraduationDate,
    PassportCollected,
    ApplicationFormCollected,
    HighschoolTranscriptCollected,
    CollegeTranscriptCollected,
    Stage2Services,
}

impl StudentField {
    pub const ALL: [StudentField; 18] = [
        StudentField::FirstName,
        StudentField::LastName,
        StudentField::Email,
        StudentField::Phone,
        StudentField::DateOfBirth,
        StudentField::Major,
        StudentField::DesiredAdmissionTerm,
        StudentField::DesiredUniversities,
        StudentField::ShorelightApplication,
        StudentField::ShorelightUniversities,
        StudentField::HomestayAddress,
        StudentField::BostonArrivalDate,
        StudentField::ExpectedGraduationDate,
        StudentField::PassportCollected,
        StudentField::ApplicationFormCollected,
        StudentField::HighschoolTranscriptCollected,
        StudentField::CollegeTranscriptCollected,
        StudentField::Stage2Services,
    ];

    /// JSON key used by the student form.
    pub fn key(self) -> &'static str {
        match self {
            StudentField::FirstName => "firstName",
            StudentField::LastName => "lastName",
            StudentField::Email => "email",
            StudentField::Phone => "phone",
            StudentField::DateOfBirth => "dateOfBirth",
            StudentField::Major => "major",
            StudentField::DesiredAdmissionTerm => "desiredAdmissionTerm",
            StudentField::DesiredUniversities => "desiredUniversities",
            StudentField::ShorelightApplication => "shorelightApplication",
            StudentField::ShorelightUniversities => "shorelightUniversities",
            StudentField::HomestayAddress => "homestayAddress",
            StudentField::BostonArrivalDate => "bostonArrivalDate",
            StudentField::ExpectedGraduationDate => "expectedGraduationDate",
            StudentField::PassportCollected => "passportCollected",
            StudentField::ApplicationFormCollected => "applicationFormCollected",
            StudentField::HighschoolTranscriptCollected => "highschoolTranscriptCollected",
            StudentField::CollegeTranscriptCollected => "collegeTranscriptCollected",
            StudentField::Stage2Services => "stage2Services",
        }
    }
}

/// Value extracted for a single field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Date(NaiveDate),
    Flag(bool),
    List(Vec<String>),
}

/// Sparse extraction result holding only positively extracted fields.
///
/// Empty text, empty lists and `false` flags are never stored, so the
/// serialized object can be merged over form defaults without blanking them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PartialRecord {
    fields: BTreeMap<StudentField, FieldValue>,
}

impl PartialRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` unless it is blank. Returns whether the field was set.
    pub fn insert_text(&mut self, field: StudentField, value: impl Into<String>) -> bool {
        let value = value.into();
        if value.trim().is_empty() {
            return false;
        }
        self.fields.insert(field, FieldValue::Text(value));
        true
    }

    pub fn insert_date(&mut self, field: StudentField, value: NaiveDate) -> bool {
        self.fields.insert(field, FieldValue::Date(value));
        true
    }

    /// Only `true` is recorded; an absent flag already reads as `false`.
    pub fn insert_flag(&mut self, field: StudentField, value: bool) -> bool {
        if !value {
            return false;
        }
        self.fields.insert(field, FieldValue::Flag(true));
        true
    }

    pub fn insert_list(&mut self, field: StudentField, values: Vec<String>) -> bool {
        if values.is_empty() {
            return false;
        }
        self.fields.insert(field, FieldValue::List(values));
        true
    }

    pub fn get(&self, field: StudentField) -> Option<&FieldValue> {
        self.fields.get(&field)
    }

    pub fn contains(&self, field: StudentField) -> bool {
        self.fields.contains_key(&field)
    }

    pub fn text(&self, field: StudentField) -> Option<&str> {
        match self.fields.get(&field) {
            Some(FieldValue::Text(value)) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn date(&self, field: StudentField) -> Option<NaiveDate> {
        match self.fields.get(&field) {
            Some(FieldValue::Date(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn flag(&self, field: StudentField) -> bool {
        matches!(self.fields.get(&field), Some(FieldValue::Flag(true)))
    }

    pub fn list(&self, field: StudentField) -> &[String] {
        match self.fields.get(&field) {
            Some(FieldValue::List(values)) => values.as_slice(),
            _ => &[],
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = StudentField> + '_ {
        self.fields.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (StudentField, &FieldValue)> + '_ {
        self.fields.iter().map(|(field, value)| (*field, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn blank_values_are_never_stored() {
        let mut record = PartialRecord::new();
        assert!(!record.insert_text(StudentField::Major, "   "));
        assert!(!record.insert_list(StudentField::DesiredUniversities, Vec::new()));
        assert!(!record.insert_flag(StudentField::PassportCollected, false));

        assert!(record.is_empty());
        assert!(!record.flag(StudentField::PassportCollected));
        assert!(record.list(StudentField::DesiredUniversities).is_empty());
    }

    #[test]
    fn serializes_as_camel_case_object_in_field_order() {
        let mut record = PartialRecord::new();
        record.insert_flag(StudentField::Stage2Services, true);
        record.insert_text(StudentField::FirstName, "Jane");
        record.insert_date(
            StudentField::DateOfBirth,
            NaiveDate::from_ymd_opt(1999, 5, 2).expect("valid date"),
        );
        record.insert_list(
            StudentField::ShorelightUniversities,
            vec!["Stony Brook".to_string()],
        );

        let value = serde_json::to_value(&record).expect("record serializes");
        assert_eq!(
            value,
            json!({
                "firstName": "Jane",
                "dateOfBirth": "1999-05-02",
                "shorelightUniversities": ["Stony Brook"],
                "stage2Services": true,
            })
        );

        let rendered = serde_json::to_string(&record).expect("record serializes");
        assert!(rendered.starts_with("{\"firstName\""));
        assert!(rendered.ends_with("\"stage2Services\":true}"));
    }

    #[test]
    fn field_keys_match_serde_names() {
        for field in StudentField::ALL {
            let serialized = serde_json::to_value(field).expect("field serializes");
            assert_eq!(serialized, json!(field.key()));
        }
    }

    #[test]
    fn typed_accessors_ignore_other_variants() {
        let mut record = PartialRecord::new();
        record.insert_text(StudentField::Phone, "617-555-0100");

        assert_eq!(record.text(StudentField::Phone), Some("617-555-0100"));
        assert!(record.date(StudentField::Phone).is_none());
        assert!(!record.flag(StudentField::Phone));
        assert!(record.list(StudentField::Phone).is_empty());
        assert_eq!(record.fields().collect::<Vec<_>>(), vec![StudentField::Phone]);
    }
}
