use crate::config::BrandConfig;

/// Collapse internal whitespace runs to single spaces and trim the edges.
/// Pure and total: any input, however mangled, yields a (possibly empty)
/// string.
pub fn clean(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Clean a raw service name: substitute the configured brand placeholder
/// tokens with the brand display name, then title-case word by word.
pub fn clean_service(raw: &str, brand: &BrandConfig) -> String {
    let mut value = raw.to_string();
    for token in &brand.placeholders {
        value = value.replace(token.as_str(), &brand.display_name);
    }
    title_case(&clean(&value))
}

/// Word-by-word title casing: first character uppercased, the rest lowered.
pub fn title_case(text: &str) -> String {
    text.split(' ')
        .map(title_word)
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn acme_brand() -> BrandConfig {
        BrandConfig {
            display_name: "Acme".to_string(),
            placeholders: vec!["[c_groceryBrand]".to_string(), "[name]".to_string()],
        }
    }

    #[test]
    fn test_clean_collapses_whitespace() {
        assert_eq!(clean("  123   Main \t St \n"), "123 Main St");
        assert_eq!(clean(""), "");
        assert_eq!(clean("   "), "");
    }

    #[test]
    fn test_clean_is_idempotent() {
        let once = clean("  Curbside   pickup ");
        assert_eq!(clean(&once), once);
    }

    #[test]
    fn test_clean_service_substitutes_placeholder() {
        assert_eq!(
            clean_service("[c_groceryBrand] Pharmacy", &acme_brand()),
            "Acme Pharmacy"
        );
        assert_eq!(clean_service("[name] deli", &acme_brand()), "Acme Deli");
    }

    #[test]
    fn test_clean_service_title_cases() {
        assert_eq!(clean_service("drive-thru  PICKUP", &acme_brand()), "Drive-thru Pickup");
    }

    #[test]
    fn test_title_case_is_idempotent() {
        assert_eq!(title_case("Acme Pharmacy"), "Acme Pharmacy");
    }
}
