//! Condition labels and icon categories derived from coded METAR text

use serde::{Deserialize, Serialize};

use crate::error::MissingWeatherData;

/// Label used when no usable METAR text exists
pub const CONDITION_UNAVAILABLE: &str = "Weather data unavailable";

/// Text shown in place of a missing METAR
pub const METAR_UNAVAILABLE: &str = "No METAR data available";

/// Markers the weather provider embeds in place of a report
const UNAVAILABLE_MARKERS: [&str; 2] = ["failed", "No METAR"];

/// First match wins, so order encodes precedence.
const CONDITION_TABLE: [(&[&str], &str); 8] = [
    (&["TS"], "Thunderstorms"),
    (&["RA"], "Rain"),
    (&["SN"], "Snow"),
    (&["FG"], "Fog"),
    (&["BR"], "Mist"),
    (&["OVC", "BKN"], "Cloudy"),
    (&["SCT"], "Partly cloudy"),
    (&["CLR", "SKC"], "Clear skies"),
];

const VARIABLE_CONDITIONS: &str = "Variable conditions";

/// Return the usable METAR text, or why there is none
pub fn normalize_raw_code(raw_code: Option<&str>) -> Result<&str, MissingWeatherData> {
    let Some(raw) = raw_code else {
        return Err(MissingWeatherData {
            reason: "no METAR reported".to_string(),
        });
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(MissingWeatherData {
            reason: "empty METAR".to_string(),
        });
    }

    if let Some(marker) = UNAVAILABLE_MARKERS.iter().find(|m| trimmed.contains(**m)) {
        return Err(MissingWeatherData {
            reason: format!("provider reported '{trimmed}' ({marker})"),
        });
    }

    Ok(trimmed)
}

/// Decode a METAR into a human-readable condition label
#[must_use]
pub fn extract_condition(raw_code: Option<&str>) -> &'static str {
    let Ok(code) = normalize_raw_code(raw_code) else {
        return CONDITION_UNAVAILABLE;
    };

    CONDITION_TABLE
        .iter()
        .find(|(markers, _)| markers.iter().any(|marker| code.contains(*marker)))
        .map_or(VARIABLE_CONDITIONS, |(_, label)| *label)
}

/// Icon family for a condition label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconCategory {
    Lightning,
    Rain,
    Snow,
    Clear,
    Cloud,
    Fog,
    Wind,
    Default,
}

const ICON_KEYWORDS: [(&[&str], IconCategory); 7] = [
    (&["thunderstorm", "lightning"], IconCategory::Lightning),
    (&["rain", "shower"], IconCategory::Rain),
    (&["snow", "flurries"], IconCategory::Snow),
    (&["clear", "sunny"], IconCategory::Clear),
    (&["cloud", "overcast"], IconCategory::Cloud),
    (&["fog", "mist"], IconCategory::Fog),
    (&["wind", "gusty"], IconCategory::Wind),
];

impl IconCategory {
    /// Classify any label, not only those produced by [`extract_condition`]
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        let label = label.to_lowercase();

        ICON_KEYWORDS
            .iter()
            .find(|(keywords, _)| keywords.iter().any(|k| label.contains(*k)))
            .map_or(IconCategory::Default, |(_, category)| *category)
    }

    /// Icon font class used by the interactive page
    #[must_use]
    pub fn icon_class(self) -> &'static str {
        match self {
            IconCategory::Lightning => "fa-bolt",
            IconCategory::Rain => "fa-cloud-rain",
            IconCategory::Snow => "fa-snowflake",
            IconCategory::Clear => "fa-sun",
            IconCategory::Cloud => "fa-cloud",
            IconCategory::Fog => "fa-smog",
            IconCategory::Wind => "fa-wind",
            IconCategory::Default => "fa-cloud-sun",
        }
    }
}

/// Icon family for a condition label
#[must_use]
pub fn icon_category(label: &str) -> IconCategory {
    IconCategory::from_label(label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("VABB 191030Z 24008KT 2500 TSRA BKN010 CB", "Thunderstorms")]
    #[case("KJFK 191051Z 10005KT 1/2SM TS BR OVC005 CLR", "Thunderstorms")]
    #[case("VECC 191030Z 18006KT 4000 -RA SCT015", "Rain")]
    #[case("UUEE 191030Z 05004MPS 1500 SN OVC004", "Snow")]
    #[case("VIDP 190030Z 00000KT 0200 FG VV001", "Fog")]
    #[case("VOBL 190130Z 09003KT 3000 BR SCT020", "Mist")]
    #[case("VAAH 191030Z 27008KT 6000 BKN030", "Cloudy")]
    #[case("VAAH 191030Z 27008KT 6000 OVC030", "Cloudy")]
    #[case("VOHY 191030Z 15010KT 5SM SCT030", "Partly cloudy")]
    #[case("KLAX 191053Z 12003KT 10SM CLR 28/15", "Clear skies")]
    #[case("EGLL 191050Z 24010KT 9999 SKC 18/09", "Clear skies")]
    #[case("VIJP 191030Z 31004KT 5000 HZ NSC 33/14", "Variable conditions")]
    fn test_condition_precedence(#[case] metar: &str, #[case] expected: &str) {
        assert_eq!(extract_condition(Some(metar)), expected);
    }

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    #[case(Some("   "))]
    #[case(Some("METAR fetch failed"))]
    #[case(Some("No METAR data"))]
    fn test_unavailable_metar(#[case] metar: Option<&str>) {
        assert_eq!(extract_condition(metar), CONDITION_UNAVAILABLE);
        assert!(normalize_raw_code(metar).is_err());
    }

    #[test]
    fn test_markers_are_case_sensitive() {
        // lower-case "ts" is not a thunderstorm marker
        assert_eq!(extract_condition(Some("vidp gusts ts")), "Variable conditions");
    }

    #[test]
    fn test_normalize_trims() {
        assert_eq!(normalize_raw_code(Some("  VIDP 1930Z  ")), Ok("VIDP 1930Z"));
    }

    #[rstest]
    #[case("Thunderstorms", IconCategory::Lightning)]
    #[case("Rain", IconCategory::Rain)]
    #[case("Snow", IconCategory::Snow)]
    #[case("Clear skies", IconCategory::Clear)]
    #[case("Cloudy", IconCategory::Cloud)]
    #[case("Partly cloudy", IconCategory::Cloud)]
    #[case("Fog", IconCategory::Fog)]
    #[case("Mist", IconCategory::Fog)]
    #[case("Variable conditions", IconCategory::Default)]
    #[case("Weather data unavailable", IconCategory::Default)]
    #[case("GUSTY WINDS", IconCategory::Wind)]
    #[case("Sunny spells", IconCategory::Clear)]
    #[case("", IconCategory::Default)]
    fn test_icon_category(#[case] label: &str, #[case] expected: IconCategory) {
        assert_eq!(icon_category(label), expected);
    }

    #[test]
    fn test_icon_classes() {
        assert_eq!(IconCategory::Lightning.icon_class(), "fa-bolt");
        assert_eq!(IconCategory::Default.icon_class(), "fa-cloud-sun");
    }
}
