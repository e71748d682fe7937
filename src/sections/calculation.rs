//! A calculation over all three sections.

use chrono::{DateTime, Utc};

use super::total::grand_total;
use super::validation::{Section, SectionValidation, validate_section};
use crate::calculator::{evaluate, format_plain, format_signed, format_two_decimals};
use crate::error::CalcError;
use crate::history::{CalculationRecord, SectionSnapshot, next_record_id};

/// The evaluated state of a single section.
#[derive(Clone, Debug, PartialEq)]
pub struct SectionResult {
    pub section: Section,
    /// The text as entered.
    pub raw_text: String,
    /// The best-effort value of the text.
    pub total: f64,
    pub validation: SectionValidation,
}

impl SectionResult {
    pub fn evaluate(section: Section, raw_text: &str) -> Self {
        Self {
            section,
            raw_text: raw_text.to_string(),
            total: evaluate(raw_text),
            validation: validate_section(raw_text, section),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.validation.is_valid
    }

    /// The validation message, if the section is invalid.
    pub fn error_message(&self) -> Option<&str> {
        if self.validation.is_valid {
            None
        } else {
            Some(&self.validation.error_message)
        }
    }

    /// The running total as shown next to the input.
    /// M is signed with one decimal, A and D use two decimals.
    pub fn display_total(&self) -> String {
        match self.section {
            Section::M => format_signed(self.total, 1),
            Section::A | Section::D => format_two_decimals(self.total),
        }
    }

    /// The total as stored in a history record.
    fn stored_total(&self) -> String {
        match self.section {
            Section::M => format_signed(self.total, 1),
            Section::A | Section::D => format_plain(self.total),
        }
    }

    fn snapshot(&self) -> SectionSnapshot {
        SectionSnapshot::new(self.raw_text.clone(), self.stored_total())
    }
}

/// Sections A, D and M evaluated together with their grand total.
#[derive(Clone, Debug, PartialEq)]
pub struct Calculation {
    a: SectionResult,
    d: SectionResult,
    m: SectionResult,
    grand_total: f64,
}

impl Calculation {
    pub fn new(a: &str, d: &str, m: &str) -> Self {
        let a = SectionResult::evaluate(Section::A, a);
        let d = SectionResult::evaluate(Section::D, d);
        let m = SectionResult::evaluate(Section::M, m);
        let grand_total = grand_total(a.total, d.total, m.total);
        Self {
            a,
            d,
            m,
            grand_total,
        }
    }

    pub fn section(&self, section: Section) -> &SectionResult {
        match section {
            Section::A => &self.a,
            Section::D => &self.d,
            Section::M => &self.m,
        }
    }

    /// All sections in display order.
    pub fn sections(&self) -> [&SectionResult; 3] {
        [&self.a, &self.d, &self.m]
    }

    pub fn grand_total(&self) -> f64 {
        self.grand_total
    }

    /// The grand total, signed, with one decimal.
    pub fn grand_total_display(&self) -> String {
        format_signed(self.grand_total, 1)
    }

    /// Whether the calculation may be saved: A and D must both be valid.
    pub fn is_valid(&self) -> bool {
        self.a.is_valid() && self.d.is_valid()
    }

    /// Messages for every invalid section.
    pub fn errors(&self) -> Vec<String> {
        self.sections()
            .iter()
            .filter_map(|result| result.error_message())
            .map(str::to_string)
            .collect()
    }

    /// Build a history record stamped with the current time.
    pub fn to_record(&self) -> Result<CalculationRecord, CalcError> {
        self.to_record_at(Utc::now())
    }

    /// Build a history record stamped with `saved_at`.
    pub fn to_record_at(&self, saved_at: DateTime<Utc>) -> Result<CalculationRecord, CalcError> {
        if !self.is_valid() {
            return Err(CalcError {
                messages: self.errors(),
            });
        }

        Ok(CalculationRecord::new(
            next_record_id(saved_at),
            saved_at,
            self.a.snapshot(),
            self.d.snapshot(),
            self.m.snapshot(),
            self.grand_total_display(),
        ))
    }
}
