use serde::{Deserialize, Deserializer, Serialize};

/// Current conditions for one location, as resolved by the weather API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherResult {
    pub resolved_address: String,
    /// Kept as the API sent it; rendered verbatim with a degree suffix.
    pub temperature: String,
    pub conditions: String,
}

/// Accepts either a JSON number or a string and keeps its textual form.
pub(crate) fn number_or_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(serde_json::Number),
        Text(String),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Number(n) => n.to_string(),
        Raw::Text(s) => s,
    })
}
