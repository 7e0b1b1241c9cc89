use crate::ValidationReport;
use crate::rules::{as_object, check_len, is_valid_email, optional_str, required_str};
use serde_json::Value;

pub const ROLES: &[&str] = &["admin", "staff", "customer"];
const MIN_PASSWORD_CHARS: usize = 8;

/// Check a user record.
///
/// Required: `name`, `email`. Optional: `phone`, `role`, `password`.
pub fn validate_user(record: &Value) -> ValidationReport {
    let mut report = ValidationReport::default();
    let Some(obj) = as_object(record, &mut report) else {
        return report;
    };

    if let Some(name) = required_str(obj, "name", &mut report) {
        check_len(name, "name", 2, 100, &mut report);
    }

    if let Some(email) = required_str(obj, "email", &mut report)
        && !is_valid_email(email.trim())
    {
        report.error(format!("'email' is not a valid address: '{}'", email));
    }

    if let Some(phone) = optional_str(obj, "phone", &mut report)
        && !is_valid_phone(phone)
    {
        report.error(format!(
            "'phone' must hold 9 to 15 digits with optional +, spaces or dashes: '{}'",
            phone
        ));
    }

    match optional_str(obj, "role", &mut report) {
        Some(role) if !ROLES.contains(&role) => {
            report.error(format!(
                "'role' must be one of {}, got '{}'",
                ROLES.join(", "),
                role
            ));
        }
        Some(_) => {}
        None => report.info.push("no role given, defaults to customer".to_string()),
    }

    if let Some(password) = optional_str(obj, "password", &mut report) {
        check_password(password, &mut report);
    }

    report
}

fn is_valid_phone(phone: &str) -> bool {
    let phone = phone.trim();
    let body = phone.strip_prefix('+').unwrap_or(phone);
    if !body
        .chars()
        .all(|c| c.is_ascii_digit() || c == ' ' || c == '-')
    {
        return false;
    }
    let digits = body.chars().filter(char::is_ascii_digit).count();
    (9..=15).contains(&digits)
}

fn check_password(password: &str, report: &mut ValidationReport) {
    if password.chars().count() < MIN_PASSWORD_CHARS {
        report.error(format!(
            "'password' must be at least {} characters",
            MIN_PASSWORD_CHARS
        ));
    }
    let has_letter = password.chars().any(char::is_alphabetic);
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    if !has_letter || !has_digit {
        report.error("'password' must contain both letters and digits");
    }
}
