//! Per-section validity rules.

use std::fmt;

use crate::calculator::evaluate;

/// One of the three calculator inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    A,
    D,
    M,
}

impl Section {
    /// All sections in display order.
    pub const ALL: [Section; 3] = [Section::A, Section::D, Section::M];

    /// Single-letter label shown next to the input.
    pub fn label(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::D => "D",
            Self::M => "M",
        }
    }

    /// Whether the section total must be strictly positive.
    /// M has no lower bound.
    pub fn requires_positive(self) -> bool {
        !matches!(self, Self::M)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of validating one section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionValidation {
    pub is_valid: bool,
    /// Empty when valid.
    pub error_message: String,
}

impl SectionValidation {
    fn valid() -> Self {
        Self {
            is_valid: true,
            error_message: String::new(),
        }
    }

    fn not_positive(section: Section) -> Self {
        Self {
            is_valid: false,
            error_message: format!("Section {section} must be greater than 0"),
        }
    }
}

/// Validate the raw text of a section.
///
/// Sections A and D are valid only when their expression evaluates to a
/// value greater than zero. Section M is always valid.
pub fn validate_section(raw_text: &str, section: Section) -> SectionValidation {
    if !section.requires_positive() {
        return SectionValidation::valid();
    }

    if evaluate(raw_text) > 0.0 {
        SectionValidation::valid()
    } else {
        SectionValidation::not_positive(section)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_sections_valid() {
        assert!(validate_section("5", Section::A).is_valid);
        assert!(validate_section("2*3", Section::D).is_valid);
        assert!(validate_section("0.1", Section::A).is_valid);
    }

    #[test]
    fn test_zero_and_negative_rejected() {
        let zero = validate_section("0", Section::A);
        assert!(!zero.is_valid);
        assert_eq!(zero.error_message, "Section A must be greater than 0");

        let negative = validate_section("-1", Section::D);
        assert!(!negative.is_valid);
        assert_eq!(negative.error_message, "Section D must be greater than 0");

        assert!(!validate_section("", Section::A).is_valid);
        assert!(!validate_section("abc", Section::D).is_valid);
    }

    #[test]
    fn test_half_typed_parenthesis_is_invalid() {
        let open = validate_section("5+(2", Section::A);
        assert!(!open.is_valid);
        assert_eq!(open.error_message, "Section A must be greater than 0");
        assert!(validate_section("5+(2)", Section::A).is_valid);
    }

    #[test]
    fn test_section_m_has_no_lower_bound() {
        assert!(validate_section("", Section::M).is_valid);
        assert!(validate_section("-100", Section::M).is_valid);
        assert!(validate_section("0", Section::M).error_message.is_empty());
    }

    #[test]
    fn test_labels() {
        let labels: Vec<String> = Section::ALL.iter().map(Section::to_string).collect();
        assert_eq!(labels, ["A", "D", "M"]);
    }

    #[test]
    fn test_valid_has_empty_message() {
        assert_eq!(validate_section("3", Section::A).error_message, "");
    }
}
