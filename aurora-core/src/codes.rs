//! WMO weather-code lookup tables.

use serde::{Deserialize, Serialize};

/// Label shown when a code has no description.
pub const FALLBACK_DESCRIPTION: &str = "Live update";

/// Coarse visual classification of the sky.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkyTheme {
    #[default]
    Clear,
    Clouds,
    Rain,
    Snow,
    Storm,
}

impl SkyTheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkyTheme::Clear => "clear",
            SkyTheme::Clouds => "clouds",
            SkyTheme::Rain => "rain",
            SkyTheme::Snow => "snow",
            SkyTheme::Storm => "storm",
        }
    }
}

impl std::fmt::Display for SkyTheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Short English description of a weather code, if the code is known.
pub fn describe_code(code: Option<i64>) -> Option<&'static str> {
    let text = match code? {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Fog",
        48 => "Rime fog",
        51 => "Light drizzle",
        53 => "Drizzle",
        55 => "Heavy drizzle",
        56 => "Freezing drizzle",
        57 => "Heavy freezing drizzle",
        61 => "Light rain",
        63 => "Rain",
        65 => "Heavy rain",
        66 => "Freezing rain",
        67 => "Heavy freezing rain",
        71 => "Light snow",
        73 => "Snow",
        75 => "Heavy snow",
        77 => "Snow grains",
        80 => "Light showers",
        81 => "Showers",
        82 => "Violent showers",
        85 => "Snow showers",
        86 => "Heavy snow showers",
        95 => "Thunderstorm",
        96 => "Storm with hail",
        99 => "Severe storm",
        _ => return None,
    };
    Some(text)
}

pub fn describe_code_or_fallback(code: Option<i64>) -> &'static str {
    describe_code(code).unwrap_or(FALLBACK_DESCRIPTION)
}

/// Glyph for a weather code, if the code is known.
pub fn icon_for_code(code: Option<i64>) -> Option<char> {
    let icon = match code? {
        0 => '\u{2600}',
        1 | 2 => '\u{26c5}',
        3 | 45 | 48 => '\u{2601}',
        51 | 53 | 55 | 61 | 63 | 65 | 80 | 81 | 82 => '\u{2614}',
        // freezing drizzle and rain
        56 | 57 | 66 | 67 => '\u{2602}',
        71 | 73 | 75 | 77 | 85 | 86 => '\u{2744}',
        95 | 96 | 99 => '\u{26a1}',
        _ => return None,
    };
    Some(icon)
}

/// Groups a weather code into a sky theme. Unknown and absent codes are clear.
pub fn classify_sky(code: Option<i64>) -> SkyTheme {
    match code {
        Some(95 | 96 | 99) => SkyTheme::Storm,
        Some(61 | 63 | 65 | 80 | 81 | 82 | 66 | 67) => SkyTheme::Rain,
        Some(71 | 73 | 75 | 77 | 85 | 86) => SkyTheme::Snow,
        Some(2 | 3 | 45 | 48) => SkyTheme::Clouds,
        _ => SkyTheme::Clear,
    }
}
