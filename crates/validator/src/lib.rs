//! Validation schemas for villa and user records entered through admin forms.

mod rules;
pub mod user;
pub mod villa;

pub use user::validate_user;
pub use villa::validate_villa;

use serde_json::Value;
use sitemap_kit_core::{Error, Result};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub info: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub(crate) fn error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    pub(crate) fn warn(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    /// Fold another report in, prefixing its messages with `label`
    pub fn merge(&mut self, label: &str, other: ValidationReport) {
        let tag = |m: String| format!("{}: {}", label, m);
        self.errors.extend(other.errors.into_iter().map(tag));
        self.warnings.extend(other.warnings.into_iter().map(tag));
        self.info.extend(other.info.into_iter().map(tag));
    }
}

/// Which schema a record is checked against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Villa,
    User,
}

impl RecordKind {
    pub fn validate(&self, record: &Value) -> ValidationReport {
        match self {
            RecordKind::Villa => validate_villa(record),
            RecordKind::User => validate_user(record),
        }
    }
}

/// Validate a JSON file holding one record or an array of records
pub fn validate_file<P: AsRef<Path>>(path: P, kind: RecordKind) -> Result<ValidationReport> {
    let content = fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&content)
        .map_err(|e| Error::InvalidData(format!("Not valid JSON: {}", e)))?;
    Ok(validate_value(&value, kind))
}

/// Validate a record or an array of records already parsed
pub fn validate_value(value: &Value, kind: RecordKind) -> ValidationReport {
    match value {
        Value::Array(records) => {
            let mut report = ValidationReport::default();
            for (i, record) in records.iter().enumerate() {
                report.merge(&format!("record {}", i), kind.validate(record));
            }
            report.info.push(format!("{} records checked", records.len()));
            report
        }
        record => kind.validate(record),
    }
}
