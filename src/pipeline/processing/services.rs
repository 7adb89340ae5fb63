use std::collections::HashSet;

use super::text::clean_service;
use crate::config::BrandConfig;

/// Clean a raw service list: substitute brand placeholders, title-case,
/// drop entries that clean to nothing, and remove duplicates while keeping
/// first-seen order.
pub fn format(raw_services: &[String], brand: &BrandConfig) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut services = Vec::new();

    for raw in raw_services {
        let cleaned = clean_service(raw, brand);
        if cleaned.is_empty() {
            continue;
        }
        if seen.insert(cleaned.clone()) {
            services.push(cleaned);
        }
    }

    services
}

#[cfg(test)]
mod tests {
    use super::*;

    fn acme_brand() -> BrandConfig {
        BrandConfig {
            display_name: "Acme".to_string(),
            placeholders: vec!["[c_groceryBrand]".to_string()],
        }
    }

    #[test]
    fn test_format_substitutes_and_title_cases() {
        let raw = vec![
            "[c_groceryBrand] Pharmacy".to_string(),
            "drive-thru pickup".to_string(),
        ];
        assert_eq!(
            format(&raw, &acme_brand()),
            vec!["Acme Pharmacy", "Drive-thru Pickup"]
        );
    }

    #[test]
    fn test_format_drops_empty_and_duplicate_entries() {
        let raw = vec![
            "Deli".to_string(),
            "   ".to_string(),
            "deli".to_string(),
            "DELI".to_string(),
            "Bakery".to_string(),
        ];
        assert_eq!(format(&raw, &acme_brand()), vec!["Deli", "Bakery"]);
    }

    #[test]
    fn test_format_empty_input() {
        assert!(format(&[], &acme_brand()).is_empty());
    }
}
