//! Three-section calculator core.
//!
//! Sections A, D and M are free-form arithmetic expressions. Each is
//! evaluated with [`calculator::evaluate`], checked with
//! [`sections::validate_section`] and combined by [`sections::grand_total`].
//! Saved calculations go to a [`history::History`] backed by any
//! [`history::KeyValueStore`].

pub mod calculator;
pub mod config;
pub mod error;
pub mod history;
pub mod sections;

pub use calculator::evaluate;
pub use config::Config;
pub use history::{CalculationRecord, FileStore, History, KeyValueStore, MemoryStore};
pub use sections::{Calculation, Section};
