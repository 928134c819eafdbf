//! Evaluation context

use chrono::NaiveDate;

/// Inputs shared by every engine operation.
///
/// The engine never reads a clock. Callers decide which calendar date is
/// "today" (the command-line binary uses the local date) and pass it in here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvaluationContext {
    /// Current calendar date
    pub today: NaiveDate,
}

impl EvaluationContext {
    /// Create a context evaluating on `today`
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    /// Create a context for the caller's local calendar date
    pub fn local() -> Self {
        Self::new(chrono::Local::now().date_naive())
    }

    /// Whole days between `date` and today, negative when `date` is later
    pub fn days_since(&self, date: NaiveDate) -> i64 {
        (self.today - date).num_days()
    }
}
