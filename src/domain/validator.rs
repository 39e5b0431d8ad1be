//! Chain-validation result state.

use chrono::{DateTime, Utc};
use tracing::info;

use crate::api::{ValidationError, ValidationReport};

/// Last known chain-validation result. A failed re-check leaves the
/// previous result in place: the check failing is not evidence the chain
/// became valid.
#[derive(Debug, Default)]
pub struct ChainValidation {
    is_valid: Option<bool>,
    errors: Vec<ValidationError>,
    checked_at: Option<DateTime<Utc>>,
}

impl ChainValidation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a successful validator response. A valid chain clears any
    /// previous error list; an invalid one replaces it.
    pub fn apply(&mut self, report: ValidationReport) {
        info!(
            is_valid = report.is_valid,
            errors = report.errors.len(),
            "chain validation completed"
        );
        self.is_valid = Some(report.is_valid);
        self.errors = if report.is_valid {
            Vec::new()
        } else {
            report.errors
        };
        self.checked_at = Some(Utc::now());
    }

    /// `None` until a validation has completed successfully at least once.
    pub fn is_valid(&self) -> Option<bool> {
        self.is_valid
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn error_for(&self, block_id: u64) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.block_id == block_id)
            .map(|e| e.error.as_str())
    }

    pub fn checked_at(&self) -> Option<DateTime<Utc>> {
        self.checked_at
    }
}
