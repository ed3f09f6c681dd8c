//! Cost-code segmentation and division names.
//!
//! Cost codes are `-` delimited, e.g. `01-100-10`. The first segment is the
//! division and the first two segments together are the subdivision. Codes
//! with fewer segments than asked for fall back to the whole code.

use std::borrow::Cow;

/// Delimiter between cost-code segments.
pub const COST_CODE_DELIMITER: char = '-';

/// Standard construction division names keyed by division code.
pub const DIVISION_NAMES: [(&str, &str); 16] = [
    ("01", "General Conditions"),
    ("02", "Site Work"),
    ("03", "Concrete"),
    ("04", "Masonry"),
    ("05", "Metals"),
    ("06", "Wood & Plastics"),
    ("07", "Thermal & Moisture Protection"),
    ("08", "Doors & Windows"),
    ("09", "Finishes"),
    ("10", "Specialties"),
    ("11", "Equipment"),
    ("12", "Furnishings"),
    ("13", "Special Construction"),
    ("14", "Conveying Systems"),
    ("15", "Mechanical"),
    ("16", "Electrical"),
];

/// Returns the division segment of a cost code.
///
/// A code without a delimiter is its own division.
#[must_use]
pub fn division_code(cost_code: &str) -> &str {
    cost_code
        .split_once(COST_CODE_DELIMITER)
        .map_or(cost_code, |(division, _)| division)
}

/// Returns the first two segments of a cost code, rejoined with the delimiter.
///
/// A code with fewer than two segments is returned unchanged.
#[must_use]
pub fn subdivision_code(cost_code: &str) -> &str {
    match cost_code.match_indices(COST_CODE_DELIMITER).nth(1) {
        Some((end, _)) => &cost_code[..end],
        None => cost_code,
    }
}

/// Looks up the display name of a division.
///
/// Unknown codes get `"Division <code>"`.
#[must_use]
pub fn division_name(division_code: &str) -> Cow<'static, str> {
    DIVISION_NAMES
        .iter()
        .find(|(code, _)| *code == division_code)
        .map_or_else(
            || Cow::Owned(format!("Division {division_code}")),
            |(_, name)| Cow::Borrowed(*name),
        )
}

/// A cost code split into its hierarchy levels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostCode {
    /// Division segment.
    pub division: String,
    /// Second segment, if present.
    pub subdivision: Option<String>,
    /// Everything after the second delimiter, if present.
    pub detail: Option<String>,
}

impl CostCode {
    /// Splits a raw cost code. Never fails; missing levels are `None`.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let mut segments = raw.splitn(3, COST_CODE_DELIMITER);
        let division = segments.next().unwrap_or_default().to_string();
        let subdivision = segments.next().map(str::to_string);
        let detail = segments.next().map(str::to_string);

        Self {
            division,
            subdivision,
            detail,
        }
    }

    /// Division grouping key.
    #[must_use]
    pub fn division_code(&self) -> &str {
        &self.division
    }

    /// Subdivision grouping key, or the division when there is no second segment.
    #[must_use]
    pub fn subdivision_code(&self) -> String {
        match &self.subdivision {
            Some(subdivision) => {
                format!("{}{COST_CODE_DELIMITER}{subdivision}", self.division)
            }
            None => self.division.clone(),
        }
    }

    /// Display name of this code's division.
    #[must_use]
    pub fn division_name(&self) -> Cow<'static, str> {
        division_name(&self.division)
    }
}

impl std::fmt::Display for CostCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.division)?;
        if let Some(subdivision) = &self.subdivision {
            write!(f, "{COST_CODE_DELIMITER}{subdivision}")?;
        }
        if let Some(detail) = &self.detail {
            write!(f, "{COST_CODE_DELIMITER}{detail}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("01-100-10", "01")]
    #[case("01-100", "01")]
    #[case("GENERAL", "GENERAL")]
    #[case("", "")]
    #[case("-100", "")]
    fn test_division_code(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(division_code(raw), expected);
    }

    #[rstest]
    #[case("01-100-10", "01-100")]
    #[case("01-100-10-5", "01-100")]
    #[case("01-100", "01-100")]
    #[case("01", "01")]
    #[case("01-", "01-")]
    #[case("GENERAL", "GENERAL")]
    fn test_subdivision_code(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(subdivision_code(raw), expected);
    }

    #[test]
    fn test_division_name_lookup() {
        assert_eq!(division_name("01"), "General Conditions");
        assert_eq!(division_name("03"), "Concrete");
        assert_eq!(division_name("16"), "Electrical");
        assert_eq!(division_name("GENERAL"), "Division GENERAL");
        assert_eq!(division_name("26"), "Division 26");
    }

    #[test]
    fn test_parse_levels() {
        let code = CostCode::parse("01-100-10-5");

        assert_eq!(code.division, "01");
        assert_eq!(code.subdivision.as_deref(), Some("100"));
        assert_eq!(code.detail.as_deref(), Some("10-5"));
        assert_eq!(code.to_string(), "01-100-10-5");
    }

    #[rstest]
    #[case("01-100-10")]
    #[case("01-100")]
    #[case("01")]
    #[case("01-")]
    #[case("")]
    fn test_parsed_keys_match_string_helpers(#[case] raw: &str) {
        let code = CostCode::parse(raw);

        assert_eq!(code.division_code(), division_code(raw));
        assert_eq!(code.subdivision_code(), subdivision_code(raw));
        assert_eq!(code.to_string(), raw);
    }
}
