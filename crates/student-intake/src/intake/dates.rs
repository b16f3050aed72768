use chrono::NaiveDate;

/// Normalizes a captured date string to a calendar date.
///
/// Accepts ISO `YYYY-MM-DD` plus the loose forms that show up on scanned
/// forms: `M/D/YYYY`, `M-D-YYYY`, `M.D.YYYY` (two-digit years pivot at 50),
/// `YYYY/M/D`, `YYYY.M.D`, `YYYY-M-D`, and a bare four-digit year.
/// Returns `None` for anything that does not name a real calendar day.
pub fn try_parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim().trim_end_matches('.');
    if trimmed.is_empty() {
        return None;
    }

    if is_iso_shape(trimmed) {
        return NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok();
    }

    let parts: Vec<&str> = trimmed.split(['/', '-', '.']).collect();
    if !parts
        .iter()
        .all(|part| !part.is_empty() && part.bytes().all(|byte| byte.is_ascii_digit()))
    {
        return None;
    }

    match parts.as_slice() {
        [year] if year.len() == 4 => NaiveDate::from_ymd_opt(year.parse().ok()?, 1, 1),
        [year, month, day] if year.len() == 4 => {
            build_date(year.parse().ok()?, month, day)
        }
        [month, day, year] if year.len() == 4 => build_date(year.parse().ok()?, month, day),
        [month, day, year] if year.len() == 2 => {
            let short: i32 = year.parse().ok()?;
            let year = if short < 50 { 2000 + short } else { 1900 + short };
            build_date(year, month, day)
        }
        _ => None,
    }
}

fn is_iso_shape(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(idx, byte)| idx == 4 || idx == 7 || byte.is_ascii_digit())
}

fn build_date(year: i32, month: &str, day: &str) -> Option<NaiveDate> {
    if month.len() > 2 || day.len() > 2 {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month.parse().ok()?, day.parse().ok()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    #[test]
    fn iso_dates_round_trip_unchanged() {
        let parsed = try_parse_date("1999-05-02").expect("iso parses");
        assert_eq!(parsed.to_string(), "1999-05-02");
    }

    #[test]
    fn us_style_dates_are_month_first() {
        assert_eq!(try_parse_date("05/02/1999"), Some(ymd(1999, 5, 2)));
        assert_eq!(try_parse_date("5-2-1999"), Some(ymd(1999, 5, 2)));
        assert_eq!(try_parse_date("12.31.2024"), Some(ymd(2024, 12, 31)));
    }

    #[test]
    fn year_first_dates_accept_any_separator() {
        assert_eq!(try_parse_date("1999/5/2"), Some(ymd(1999, 5, 2)));
        assert_eq!(try_parse_date("1999.05.02"), Some(ymd(1999, 5, 2)));
        assert_eq!(try_parse_date("1999-5-2"), Some(ymd(1999, 5, 2)));
    }

    #[test]
    fn two_digit_years_pivot_at_fifty() {
        assert_eq!(try_parse_date("8/20/25"), Some(ymd(2025, 8, 20)));
        assert_eq!(try_parse_date("5/2/99"), Some(ymd(1999, 5, 2)));
        assert_eq!(try_parse_date("1/1/50"), Some(ymd(1950, 1, 1)));
    }

    #[test]
    fn bare_year_resolves_to_january_first() {
        assert_eq!(try_parse_date("2029"), Some(ymd(2029, 1, 1)));
    }

    #[test]
    fn trailing_sentence_period_is_ignored() {
        assert_eq!(try_parse_date("05/02/1999."), Some(ymd(1999, 5, 2)));
    }

    #[test]
    fn impossible_or_malformed_dates_are_rejected() {
        assert_eq!(try_parse_date(""), None);
        assert_eq!(try_parse_date("   "), None);
        assert_eq!(try_parse_date("1999-13-45"), None);
        assert_eq!(try_parse_date("31/31/1999"), None);
        assert_eq!(try_parse_date("02/30/2001"), None);
        assert_eq!(try_parse_date("123/4/1999"), None);
        assert_eq!(try_parse_date("//"), None);
        assert_eq!(try_parse_date("12"), None);
        assert_eq!(try_parse_date("1999-05"), None);
        assert_eq!(try_parse_date("05/02/199"), None);
    }
}
