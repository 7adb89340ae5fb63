use super::text::clean;

/// Raw address components as handed over by a source adapter. Any of them
/// may be empty.
#[derive(Debug, Clone, Default)]
pub struct AddressParts {
    pub street: String,
    pub street2: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

/// Compose one formatted address string. Components are cleaned first;
/// empties are dropped. City, state and zip are joined by single spaces into
/// one trailing component, and the surviving components are joined with
/// ", ". All-empty input yields an empty string, which the validator treats
/// as a missing required field.
pub fn format(parts: &AddressParts) -> String {
    let locality = [clean(&parts.city), clean(&parts.state), clean(&parts.zip)]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    [clean(&parts.street), clean(&parts.street2), locality]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}
