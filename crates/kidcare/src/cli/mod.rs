//! CLI functionality for the kidcare tool
//!
//! This module contains all CLI-related functionality including:
//! - Vaccination status and completion toggling
//! - Child registration
//! - Availability and booking
//! - Doctor search, medications and recommendation prompts
//! - Data file handling and output formatting

pub mod appointments;
pub mod children;
pub mod doctors;
pub mod medications;
pub mod output;
pub mod prompt;
pub mod store;
pub mod vaccinations;

use anyhow::Result;
use chrono::{NaiveDate, NaiveTime};
use kidcare_engine::EvaluationContext;
use kidcare_model::InMemoryStore;
use output::OutputFormat;
use serde::Serialize;
use std::path::PathBuf;

/// Settings shared by every command
#[derive(Debug, Clone)]
pub struct Session {
    /// JSON snapshot holding every table
    pub data: PathBuf,
    pub ctx: EvaluationContext,
    pub format: OutputFormat,
    pub output_file: Option<PathBuf>,
    /// Catalog that seeds a data file that does not exist yet
    pub catalog: Option<PathBuf>,
}

impl Session {
    pub fn new(data: PathBuf, today: Option<NaiveDate>) -> Self {
        Self {
            data,
            ctx: today.map_or_else(EvaluationContext::local, EvaluationContext::new),
            format: OutputFormat::Table,
            output_file: None,
            catalog: None,
        }
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_output(mut self, output_file: Option<PathBuf>) -> Self {
        self.output_file = output_file;
        self
    }

    pub fn with_catalog(mut self, catalog: Option<PathBuf>) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn load_store(&self) -> Result<InMemoryStore> {
        store::load(&self.data, self.catalog.as_deref())
    }

    pub fn save_store(&self, store: &InMemoryStore) -> Result<()> {
        store::save(store, &self.data)
    }

    pub fn print<T: Serialize + ?Sized>(&self, value: &T, table: impl FnOnce() -> String) -> Result<()> {
        output::print_output(value, table, self.format, self.output_file.as_deref())
    }
}

/// Parse a `YYYY-MM-DD` date argument
pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| format!("invalid date '{}' (expected YYYY-MM-DD): {}", s, e))
}

/// Parse an `HH:MM` or `HH:MM:SS` time argument
pub fn parse_time(s: &str) -> Result<NaiveTime, String> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .map_err(|e| format!("invalid time '{}' (expected HH:MM): {}", s, e))
}
