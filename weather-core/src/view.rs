use crate::WeatherResult;

pub const INPUT_LABEL: &str = "City name";
pub const INPUT_PLACEHOLDER: &str = "Enter city name";

/// The three lines of the result card.
pub fn card_lines(weather: &WeatherResult) -> [String; 3] {
    [
        format!("Weather in {}", weather.resolved_address),
        format!("Temperature: {}°C", weather.temperature),
        format!("Conditions: {}", weather.conditions),
    ]
}
