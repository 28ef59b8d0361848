//! Domain models for Life Copilot.
//!
//! - [`Task`]: a to-do item with a due date, owned by the task store.
//! - [`RawAnalysis`] / [`RawStressPoint`]: the model's reply after schema
//!   validation, before normalization.
//! - [`AiAnalysis`] / [`StressPoint`]: the published seven-day forecast plus
//!   [`Recommendation`]s.
//! - [`SessionView`]: the snapshot served to front ends.

mod analysis;
mod task;

pub use analysis::*;
pub use task::*;

/// Calendar date format used on the wire and as the forecast lookup key.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
