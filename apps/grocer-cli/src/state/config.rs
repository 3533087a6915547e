//! # Configuration State
//!
//! Configuration loaded at startup plus the export reference date, which
//! the `date` command may change during a session.

use std::path::Path;

use chrono::NaiveDate;

use grocer_core::export::parse_reference_date;
use grocer_core::{CoreResult, ExportFormat};

use crate::config::AppConfig;

#[derive(Debug, Clone)]
pub struct ConfigState {
    config: AppConfig,
    reference_date: NaiveDate,
}

impl ConfigState {
    pub fn new(config: AppConfig, reference_date: NaiveDate) -> Self {
        ConfigState {
            config,
            reference_date,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn reference_date(&self) -> NaiveDate {
        self.reference_date
    }

    /// Parses and stores a new reference date. Invalid input leaves the
    /// current date in place.
    pub fn set_reference_date(&mut self, input: &str) -> CoreResult<NaiveDate> {
        self.reference_date = parse_reference_date(input)?;
        Ok(self.reference_date)
    }

    pub fn output_dir(&self) -> &Path {
        &self.config.export.output_dir
    }

    pub fn export_format(&self) -> ExportFormat {
        self.config.export.format
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_reference_date() {
        let start = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let mut state = ConfigState::new(AppConfig::default(), start);

        let date = state.set_reference_date("05-10-2026").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2026, 10, 5).unwrap());

        assert!(state.set_reference_date("31-02-2026").is_err());
        assert_eq!(state.reference_date(), date);
    }
}
