//! Section validation and the grand-total calculation.

mod calculation;
mod total;
mod validation;

pub use calculation::{Calculation, SectionResult};
pub use total::grand_total;
pub use validation::{Section, SectionValidation, validate_section};
