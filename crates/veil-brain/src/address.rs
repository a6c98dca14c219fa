//! Fake postal address generation flow.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::api_types::ChatMessage;
use crate::backend::{ChatBackend, OutputFormat};
use crate::prompt::parse_json_reply;
use crate::BrainError;

/// Output contract given to the model.
pub const ADDRESS_INSTRUCTIONS: &str = "You invent postal addresses. Respond with a single JSON \
object with the string fields street, city, state, postalCode and country, and nothing else.";

/// A realistic but fake physical address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    /// Street address, including the house or building number.
    pub street: String,
    /// City or town.
    pub city: String,
    /// State, province, or region.
    pub state: String,
    /// Postal or ZIP code.
    pub postal_code: String,
    /// Country.
    pub country: String,
}

impl Address {
    /// The three display lines: street, locality, country.
    pub fn lines(&self) -> [String; 3] {
        [
            self.street.clone(),
            format!("{}, {} {}", self.city, self.state, self.postal_code),
            self.country.clone(),
        ]
    }

    fn validate(self) -> Result<Self, BrainError> {
        let fields = [
            ("street", &self.street),
            ("city", &self.city),
            ("state", &self.state),
            ("postalCode", &self.postal_code),
            ("country", &self.country),
        ];
        if let Some((name, _)) = fields.iter().find(|(_, v)| v.trim().is_empty()) {
            return Err(BrainError::InvalidOutput(format!(
                "Address field '{}' is empty",
                name
            )));
        }
        Ok(self)
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.lines().join("\n"))
    }
}

/// Normalize a country choice; `None` means any country.
///
/// An empty string or "random" (any case) means no constraint.
pub fn country_choice(selection: Option<&str>) -> Option<&str> {
    selection
        .map(str::trim)
        .filter(|c| !c.is_empty() && !c.eq_ignore_ascii_case("random"))
}

/// Build the user prompt.
pub fn address_prompt(country: Option<&str>) -> String {
    let constraint = match country {
        Some(country) => format!("The address must be from {}.", country),
        None => "The address can be from any random country.".to_string(),
    };
    format!(
        "Generate a single, realistic but fake physical address.\n{}\nThe address should look authentic for the country it's from.",
        constraint
    )
}

/// Generate a fake address, optionally constrained to a country.
pub async fn generate_address<B>(backend: &B, country: Option<&str>) -> Result<Address, BrainError>
where
    B: ChatBackend + ?Sized,
{
    let country = country_choice(country);
    let messages = vec![
        ChatMessage::system(ADDRESS_INSTRUCTIONS),
        ChatMessage::user(address_prompt(country)),
    ];

    debug!(backend = backend.name(), country = ?country, "Generating address");
    let reply = backend.complete(messages, OutputFormat::Json).await?;
    let address = parse_json_reply::<Address>(&reply)?.validate()?;
    info!(country = %address.country, "Address generated");

    Ok(address)
}
