use regex::{Regex, RegexBuilder};

use super::record::StudentField;

/// Document-checklist flags, each set when its keyword appears anywhere.
/// Wording around the keyword is not inspected, so "passport not yet
/// received" still counts as a passport mention.
pub(crate) const CHECKLIST_KEYWORDS: &[(StudentField, &str)] = &[
    (StudentField::PassportCollected, r"passport"),
    (StudentField::ApplicationFormCollected, r"application\s*form"),
    (
        StudentField::HighschoolTranscriptCollected,
        r"high\s*school\s*transcript",
    ),
    (StudentField::CollegeTranscriptCollected, r"college\s*transcript"),
    (StudentField::Stage2Services, r"stage\s*2"),
];

/// Program keyword that marks an application without naming a campus.
pub(crate) const PROGRAM_KEYWORD: &str = r"shorelight";

/// Partner campuses in the order they are reported.
pub(crate) const PARTNER_CAMPUSES: &[(&str, &str)] = &[
    ("Stony Brook", r"stony\s*brook"),
    ("UMASS Boston", r"umass\s*boston"),
    (
        "University of Illinois Chicago",
        r"university\s*of\s*illinois\s*chicago",
    ),
];

/// Case-insensitive presence test.
#[derive(Debug, Clone)]
pub struct Keyword {
    regex: Regex,
}

impl Keyword {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        let regex = RegexBuilder::new(pattern).case_insensitive(true).build()?;
        Ok(Self { regex })
    }

    pub fn found_in(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

/// Closed set of partner-program campuses checked by keyword.
#[derive(Debug, Clone)]
pub struct PartnerPrograms {
    program: Keyword,
    campuses: Vec<(&'static str, Keyword)>,
}

/// Partner-program findings for one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartnerMatch {
    pub applied: bool,
    pub campuses: Vec<String>,
}

impl PartnerPrograms {
    pub fn standard() -> Result<Self, regex::Error> {
        let program = Keyword::new(PROGRAM_KEYWORD)?;
        let campuses = PARTNER_CAMPUSES
            .iter()
            .map(|(name, pattern)| Keyword::new(pattern).map(|keyword| (*name, keyword)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { program, campuses })
    }

    /// Campuses are listed in canonical order, never document order.
    pub fn scan(&self, text: &str) -> PartnerMatch {
        let campuses: Vec<String> = self
            .campuses
            .iter()
            .filter(|(_, keyword)| keyword.found_in(text))
            .map(|(name, _)| name.to_string())
            .collect();
        let applied = !campuses.is_empty() || self.program.found_in(text);

        PartnerMatch { applied, campuses }
    }
}
