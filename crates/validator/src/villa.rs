use crate::ValidationReport;
use crate::rules::{
    as_object, check_len, integer_in, is_http_url, is_valid_slug, number, optional_str,
    required_str,
};
use serde_json::Value;

const MIN_DESCRIPTION_CHARS: usize = 50;
const MAX_GUESTS: i64 = 100;
const MAX_ROOMS: i64 = 50;

/// Check a villa record.
///
/// Required: `name`, `slug`, `location`, `price_per_night`, `max_guests`.
/// Optional: `bedrooms`, `bathrooms`, `description`, `images`, `amenities`.
pub fn validate_villa(record: &Value) -> ValidationReport {
    let mut report = ValidationReport::default();
    let Some(obj) = as_object(record, &mut report) else {
        return report;
    };

    if let Some(name) = required_str(obj, "name", &mut report) {
        check_len(name, "name", 3, 200, &mut report);
    }

    if let Some(slug) = required_str(obj, "slug", &mut report)
        && !is_valid_slug(slug)
    {
        report.error(format!(
            "'slug' must be lowercase letters, digits and single hyphens: '{}'",
            slug
        ));
    }

    required_str(obj, "location", &mut report);

    if let Some(price) = number(obj, "price_per_night", true, &mut report)
        && price <= 0.0
    {
        report.error(format!("'price_per_night' must be greater than 0, got {}", price));
    }

    integer_in(obj, "max_guests", true, 1, MAX_GUESTS, &mut report);
    integer_in(obj, "bedrooms", false, 0, MAX_ROOMS, &mut report);
    integer_in(obj, "bathrooms", false, 0, MAX_ROOMS, &mut report);

    match optional_str(obj, "description", &mut report) {
        Some(desc) if desc.trim().chars().count() < MIN_DESCRIPTION_CHARS => {
            report.warn(format!(
                "'description' is shorter than {} characters",
                MIN_DESCRIPTION_CHARS
            ));
        }
        Some(_) => {}
        None => report.warn("'description' is missing"),
    }

    check_images(obj.get("images"), &mut report);
    check_amenities(obj.get("amenities"), &mut report);

    report
}

fn check_images(images: Option<&Value>, report: &mut ValidationReport) {
    match images {
        None | Some(Value::Null) => report.warn("no images; the villa page will show a placeholder"),
        Some(Value::Array(items)) => {
            if items.is_empty() {
                report.warn("no images; the villa page will show a placeholder");
            }
            for (i, item) in items.iter().enumerate() {
                match item.as_str() {
                    Some(url) if is_http_url(url) => {}
                    _ => report.error(format!("'images[{}]' must be an http(s) URL", i)),
                }
            }
            if !items.is_empty() {
                report.info.push(format!("{} images", items.len()));
            }
        }
        Some(_) => report.error("'images' must be an array of URLs"),
    }
}

fn check_amenities(amenities: Option<&Value>, report: &mut ValidationReport) {
    match amenities {
        None | Some(Value::Null) => {}
        Some(Value::Array(items)) => {
            if items
                .iter()
                .any(|a| a.as_str().is_none_or(|s| s.trim().is_empty()))
            {
                report.error("'amenities' must contain only non-blank strings");
            }
        }
        Some(_) => report.error("'amenities' must be an array of strings"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_villa() -> Value {
        json!({
            "name": "Sunset Bay Villa",
            "slug": "sunset-bay-villa",
            "location": "Vung Tau",
            "price_per_night": 3500000,
            "max_guests": 12,
            "bedrooms": 5,
            "bathrooms": 4,
            "description": "Beachfront villa with a private pool, garden and a rooftop terrace facing the sea.",
            "images": ["https://cdn.example.com/villas/sunset/1.jpg"],
            "amenities": ["pool", "bbq", "karaoke"]
        })
    }

    #[test]
    fn test_valid_villa() {
        let report = validate_villa(&valid_villa());
        assert!(report.is_valid(), "{:?}", report.errors);
        assert!(report.warnings.is_empty(), "{:?}", report.warnings);
        assert_eq!(report.info, vec!["1 images".to_string()]);
    }

    #[test]
    fn test_missing_required_fields() {
        let report = validate_villa(&json!({}));
        for field in ["name", "slug", "location", "price_per_night", "max_guests"] {
            assert!(
                report.errors.iter().any(|e| e.contains(&format!("'{}' is required", field))),
                "{} not reported: {:?}",
                field,
                report.errors
            );
        }
    }

    #[test]
    fn test_bad_slug() {
        let mut villa = valid_villa();
        villa["slug"] = json!("Sunset Bay");
        let report = validate_villa(&villa);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("'slug'"));
    }

    #[test]
    fn test_price_and_guest_bounds() {
        let mut villa = valid_villa();
        villa["price_per_night"] = json!(0);
        villa["max_guests"] = json!(0);
        villa["bedrooms"] = json!(-1);
        let report = validate_villa(&villa);
        assert_eq!(report.errors.len(), 3, "{:?}", report.errors);
    }

    #[test]
    fn test_price_must_be_number() {
        let mut villa = valid_villa();
        villa["price_per_night"] = json!("3.500.000");
        let report = validate_villa(&villa);
        assert!(report.errors.iter().any(|e| e.contains("must be a number")));
    }

    #[test]
    fn test_short_description_and_no_images_warn() {
        let mut villa = valid_villa();
        villa["description"] = json!("Nice.");
        villa["images"] = json!([]);
        let report = validate_villa(&villa);
        assert!(report.is_valid());
        assert_eq!(report.warnings.len(), 2, "{:?}", report.warnings);
    }

    #[test]
    fn test_bad_image_url() {
        let mut villa = valid_villa();
        villa["images"] = json!(["https://cdn.example.com/ok.jpg", "/local/path.jpg", 5]);
        let report = validate_villa(&villa);
        assert_eq!(report.errors.len(), 2);
        assert!(report.errors[0].contains("images[1]"));
        assert!(report.errors[1].contains("images[2]"));
    }

    #[test]
    fn test_bad_amenities() {
        let mut villa = valid_villa();
        villa["amenities"] = json!(["pool", ""]);
        assert!(!validate_villa(&villa).is_valid());

        villa["amenities"] = json!("pool");
        assert!(!validate_villa(&villa).is_valid());
    }

    #[test]
    fn test_non_object_record() {
        let report = validate_villa(&json!(["not", "an", "object"]));
        assert_eq!(report.errors, vec!["record must be a JSON object".to_string()]);
    }
}
