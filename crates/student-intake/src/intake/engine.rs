use std::sync::OnceLock;

use super::keywords::{Keyword, PartnerPrograms, CHECKLIST_KEYWORDS};
use super::normalizer::normalize_text;
use super::patterns::{
    extract_date, extract_discriminated_list, extract_field, LabelChain,
};
use super::record::{PartialRecord, StudentField};

// Label and value are separated by colons or whitespace (newlines included).
// Free-text values start with a non-blank character and end at the line end.
const TEXT_LABELS: &[(StudentField, &[&str])] = &[
    (
        StudentField::FirstName,
        &[
            r"first\s*name[:\s]+([A-Za-z]+)",
            r"first[:\s]+([A-Za-z]+)",
            r"name[:\s]+([A-Za-z]+)",
        ],
    ),
    (
        StudentField::LastName,
        &[
            r"last\s*name[:\s]+([A-Za-z]+)",
            r"surname[:\s]+([A-Za-z]+)",
            r"family\s*name[:\s]+([A-Za-z]+)",
        ],
    ),
    (
        StudentField::Email,
        &[
            r"email[:\s]+([A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,})",
            r"e-mail[:\s]+([A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,})",
            r"([A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,})",
        ],
    ),
    (
        StudentField::Phone,
        &[
            r"phone[:\s]+([\d(+][\d\t ()+\-]*)",
            r"telephone[:\s]+([\d(+][\d\t ()+\-]*)",
            r"mobile[:\s]+([\d(+][\d\t ()+\-]*)",
            r"contact[:\s]+([\d(+][\d\t ()+\-]*)",
        ],
    ),
    (
        StudentField::Major,
        &[
            r"major[:\s]+([A-Za-z][A-Za-z\t ]*)",
            r"field\s*of\s*study[:\s]+([A-Za-z][A-Za-z\t ]*)",
            r"program[:\s]+([A-Za-z][A-Za-z\t ]*)",
        ],
    ),
    (
        StudentField::DesiredAdmissionTerm,
        &[
            r"admission\s*term[:\s]+([A-Za-z\d][A-Za-z\d\t ]*)",
            r"term[:\s]+([A-Za-z\d][A-Za-z\d\t ]*)",
            r"semester[:\s]+([A-Za-z\d][A-Za-z\d\t ]*)",
        ],
    ),
    (
        StudentField::HomestayAddress,
        &[
            r"homestay[:\s]+([A-Za-z0-9][A-Za-z0-9\t ,.\-]*)",
            r"address[:\s]+([A-Za-z0-9][A-Za-z0-9\t ,.\-]*)",
        ],
    ),
];

const DATE_LABELS: &[(StudentField, &[&str])] = &[
    (
        StudentField::DateOfBirth,
        &[
            r"date\s*of\s*birth[:\s]+([\d/\-.]+)",
            r"dob[:\s]+([\d/\-.]+)",
            r"birth\s*date[:\s]+([\d/\-.]+)",
        ],
    ),
    (
        StudentField::BostonArrivalDate,
        &[
            r"boston\s*arrival[:\s]+([\d/\-.]+)",
            r"arrival\s*date[:\s]+([\d/\-.]+)",
        ],
    ),
    (
        StudentField::ExpectedGraduationDate,
        &[
            r"expected\s*graduation[:\s]+([\d/\-.]+)",
            r"graduation\s*date[:\s]+([\d/\-.]+)",
        ],
    ),
];

// Group 1 is the singular/plural marker, group 2 the list body.
const UNIVERSITY_LABELS: &[&str] = &[
    r"universit(y|ies)[:\s]+([A-Za-z][A-Za-z\t ,;]*)",
    r"school(s)?[:\s]+([A-Za-z][A-Za-z\t ,;]*)",
    r"institution(s)?[:\s]+([A-Za-z][A-Za-z\t ,;]*)",
];
const UNIVERSITY_VALUE_GROUP: usize = 2;

static STANDARD: OnceLock<ApplicationFormExtractor> = OnceLock::new();

/// Heuristic extractor turning application-form text into a partial
/// student record.
#[derive(Debug, Clone)]
pub struct ApplicationFormExtractor {
    text_fields: Vec<(StudentField, LabelChain)>,
    date_fields: Vec<(StudentField, LabelChain)>,
    universities: LabelChain,
    checklist: Vec<(StudentField, Keyword)>,
    partners: PartnerPrograms,
}

impl ApplicationFormExtractor {
    /// Shared extractor built from the built-in label tables.
    pub fn standard() -> &'static Self {
        STANDARD.get_or_init(|| Self::build().expect("built-in label patterns compile"))
    }

    pub fn build() -> Result<Self, regex::Error> {
        let text_fields = TEXT_LABELS
            .iter()
            .map(|(field, patterns)| LabelChain::new(patterns).map(|chain| (*field, chain)))
            .collect::<Result<Vec<_>, _>>()?;
        let date_fields = DATE_LABELS
            .iter()
            .map(|(field, patterns)| LabelChain::new(patterns).map(|chain| (*field, chain)))
            .collect::<Result<Vec<_>, _>>()?;
        let universities =
            LabelChain::with_value_group(UNIVERSITY_LABELS, UNIVERSITY_VALUE_GROUP)?;
        let checklist = CHECKLIST_KEYWORDS
            .iter()
            .map(|(field, pattern)| Keyword::new(pattern).map(|keyword| (*field, keyword)))
            .collect::<Result<Vec<_>, _>>()?;
        let partners = PartnerPrograms::standard()?;

        Ok(Self {
            text_fields,
            date_fields,
            universities,
            checklist,
            partners,
        })
    }

    /// Extracts every recognizable field. Never fails; unmatched fields are
    /// simply absent from the returned record.
    pub fn extract(&self, raw_text: &str) -> PartialRecord {
        let mut record = PartialRecord::new();
        if raw_text.trim().is_empty() {
            return record;
        }
        let text = normalize_text(raw_text);

        for (field, chain) in &self.text_fields {
            if let Some(value) = extract_field(&text, chain) {
                record.insert_text(*field, value);
            }
        }

        for (field, chain) in &self.date_fields {
            if let Some(date) = extract_date(&text, chain) {
                record.insert_date(*field, date);
            }
        }

        let mut universities = extract_discriminated_list(&text, &self.universities);
        dedup_preserving_order(&mut universities);
        record.insert_list(StudentField::DesiredUniversities, universities);

        let partners = self.partners.scan(&text);
        record.insert_flag(StudentField::ShorelightApplication, partners.applied);
        record.insert_list(StudentField::ShorelightUniversities, partners.campuses);

        for (field, keyword) in &self.checklist {
            record.insert_flag(*field, keyword.found_in(&text));
        }

        record
    }
}

/// Extracts a partial student record with the standard label tables.
pub fn extract(raw_text: &str) -> PartialRecord {
    ApplicationFormExtractor::standard().extract(raw_text)
}

fn dedup_preserving_order(values: &mut Vec<String>) {
    let mut seen = std::collections::HashSet::new();
    values.retain(|value| seen.insert(value.to_ascii_lowercase()));
}
