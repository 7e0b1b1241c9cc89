// Field-level checks shared by the record schemas

use crate::ValidationReport;
use serde_json::{Map, Value};

/// The record as an object, or an error when it is anything else
pub(crate) fn as_object<'a>(
    record: &'a Value,
    report: &mut ValidationReport,
) -> Option<&'a Map<String, Value>> {
    match record.as_object() {
        Some(obj) => Some(obj),
        None => {
            report.error("record must be a JSON object");
            None
        }
    }
}

/// A non-blank string field; missing, wrong-typed or blank values are errors
pub(crate) fn required_str<'a>(
    obj: &'a Map<String, Value>,
    field: &str,
    report: &mut ValidationReport,
) -> Option<&'a str> {
    match obj.get(field) {
        None | Some(Value::Null) => {
            report.error(format!("'{}' is required", field));
            None
        }
        Some(Value::String(s)) if s.trim().is_empty() => {
            report.error(format!("'{}' must not be blank", field));
            None
        }
        Some(Value::String(s)) => Some(s.as_str()),
        Some(_) => {
            report.error(format!("'{}' must be a string", field));
            None
        }
    }
}

/// A string field that may be absent or null
pub(crate) fn optional_str<'a>(
    obj: &'a Map<String, Value>,
    field: &str,
    report: &mut ValidationReport,
) -> Option<&'a str> {
    match obj.get(field) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.as_str()),
        Some(_) => {
            report.error(format!("'{}' must be a string", field));
            None
        }
    }
}

/// Character-length bounds, inclusive
pub(crate) fn check_len(
    value: &str,
    field: &str,
    min: usize,
    max: usize,
    report: &mut ValidationReport,
) {
    let len = value.trim().chars().count();
    if len < min || len > max {
        report.error(format!(
            "'{}' must be between {} and {} characters, got {}",
            field, min, max, len
        ));
    }
}

/// A numeric field; `required` controls whether absence is an error
pub(crate) fn number(
    obj: &Map<String, Value>,
    field: &str,
    required: bool,
    report: &mut ValidationReport,
) -> Option<f64> {
    match obj.get(field) {
        None | Some(Value::Null) => {
            if required {
                report.error(format!("'{}' is required", field));
            }
            None
        }
        Some(Value::Number(n)) => n.as_f64(),
        Some(_) => {
            report.error(format!("'{}' must be a number", field));
            None
        }
    }
}

/// A whole-number field within `min..=max`
pub(crate) fn integer_in(
    obj: &Map<String, Value>,
    field: &str,
    required: bool,
    min: i64,
    max: i64,
    report: &mut ValidationReport,
) -> Option<i64> {
    let value = match obj.get(field) {
        None | Some(Value::Null) => {
            if required {
                report.error(format!("'{}' is required", field));
            }
            return None;
        }
        Some(value) => value,
    };
    match value.as_i64() {
        Some(n) if (min..=max).contains(&n) => Some(n),
        Some(n) => {
            report.error(format!(
                "'{}' must be between {} and {}, got {}",
                field, min, max, n
            ));
            None
        }
        None => {
            report.error(format!("'{}' must be a whole number", field));
            None
        }
    }
}

/// Lowercase ASCII letters and digits separated by single hyphens
pub(crate) fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && !slug.contains("--")
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

pub(crate) fn is_http_url(url: &str) -> bool {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"));
    match rest {
        Some(rest) => {
            let host = rest.split('/').next().unwrap_or_default();
            !host.is_empty() && !url.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

/// Validate email format
/// Checks for basic RFC 5322 compliance without full regex
pub(crate) fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    // Exactly one @ symbol
    if domain.contains('@') {
        return false;
    }

    if local.is_empty() || local.len() > 64 || local.chars().any(char::is_whitespace) {
        return false;
    }

    if domain.is_empty() || domain.len() > 255 || !domain.contains('.') {
        return false;
    }

    // Domain can't start/end with dot or hyphen
    if domain.starts_with('.')
        || domain.ends_with('.')
        || domain.starts_with('-')
        || domain.ends_with('-')
        || domain.contains("..")
    {
        return false;
    }

    // Domain must have valid TLD (at least 2 chars after last dot)
    domain
        .rsplit('.')
        .next()
        .is_some_and(|tld| tld.len() >= 2)
}
