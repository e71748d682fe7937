//! Saved calculation records.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Last id handed out by [`next_record_id`], in milliseconds.
static LAST_ID: AtomicI64 = AtomicI64::new(0);

/// Produce a time-based record id.
///
/// Ids are the creation time in milliseconds since the Unix epoch. Within
/// one process they are strictly increasing: two records created in the
/// same millisecond get consecutive values.
pub fn next_record_id(now: DateTime<Utc>) -> String {
    let millis = now.timestamp_millis();
    let mut last = LAST_ID.load(Ordering::Relaxed);
    loop {
        let candidate = millis.max(last + 1);
        match LAST_ID.compare_exchange_weak(last, candidate, Ordering::Relaxed, Ordering::Relaxed)
        {
            Ok(_) => return candidate.to_string(),
            Err(actual) => last = actual,
        }
    }
}

/// The input text and computed total of one section.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSnapshot {
    /// The raw text the user entered.
    pub value: String,
    /// The formatted total.
    pub total: String,
}

impl SectionSnapshot {
    pub fn new(value: impl Into<String>, total: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            total: total.into(),
        }
    }
}

/// A saved calculation.
///
/// Records are never modified after creation; the history only adds and
/// removes whole records.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationRecord {
    id: String,
    #[serde(rename = "savedDate", alias = "savedAt")]
    saved_at: DateTime<Utc>,
    section_a: SectionSnapshot,
    section_d: SectionSnapshot,
    section_m: SectionSnapshot,
    final_total: String,
}

impl CalculationRecord {
    pub fn new(
        id: impl Into<String>,
        saved_at: DateTime<Utc>,
        section_a: SectionSnapshot,
        section_d: SectionSnapshot,
        section_m: SectionSnapshot,
        final_total: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            saved_at,
            section_a,
            section_d,
            section_m,
            final_total: final_total.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn saved_at(&self) -> DateTime<Utc> {
        self.saved_at
    }

    pub fn section_a(&self) -> &SectionSnapshot {
        &self.section_a
    }

    pub fn section_d(&self) -> &SectionSnapshot {
        &self.section_d
    }

    pub fn section_m(&self) -> &SectionSnapshot {
        &self.section_m
    }

    /// The grand total, signed, with one decimal.
    pub fn final_total(&self) -> &str {
        &self.final_total
    }
}
