use serde::{Deserialize, Serialize};

/// Severity tag of an AQI category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AqiSeverity {
    Good,
    Moderate,
    UnhealthySensitive,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
}

impl AqiSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            AqiSeverity::Good => "good",
            AqiSeverity::Moderate => "moderate",
            AqiSeverity::UnhealthySensitive => "unhealthy_sensitive",
            AqiSeverity::Unhealthy => "unhealthy",
            AqiSeverity::VeryUnhealthy => "very_unhealthy",
            AqiSeverity::Hazardous => "hazardous",
        }
    }
}

/// Caller-facing interpretation of an AQI value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AqiInfo {
    pub level: &'static str,
    pub description: &'static str,
    pub health_implications: &'static str,
    pub recommendations: &'static str,
    pub severity: AqiSeverity,
    pub color: &'static str,
}

struct AqiBand {
    upper: f64,
    info: AqiInfo,
}

const AQI_BANDS: [AqiBand; 6] = [
    AqiBand {
        upper: 50.0,
        info: AqiInfo {
            level: "Good",
            description: "Air quality is satisfactory",
            health_implications: "Air quality is satisfactory, and air pollution poses little or no risk.",
            recommendations: "Enjoy your usual outdoor activities.",
            severity: AqiSeverity::Good,
            color: "#00e400",
        },
    },
    AqiBand {
        upper: 100.0,
        info: AqiInfo {
            level: "Moderate",
            description: "Air quality is acceptable",
            health_implications: "Air quality is acceptable; unusually sensitive people may be at some risk.",
            recommendations: "Unusually sensitive people should consider reducing prolonged outdoor exertion.",
            severity: AqiSeverity::Moderate,
            color: "#ffff00",
        },
    },
    AqiBand {
        upper: 150.0,
        info: AqiInfo {
            level: "Unhealthy for Sensitive Groups",
            description: "Sensitive people may experience minor issues",
            health_implications: "Members of sensitive groups may experience health effects; the general public is less likely to be affected.",
            recommendations: "Sensitive groups should reduce prolonged or heavy outdoor exertion.",
            severity: AqiSeverity::UnhealthySensitive,
            color: "#ff7e00",
        },
    },
    AqiBand {
        upper: 200.0,
        info: AqiInfo {
            level: "Unhealthy",
            description: "Everyone may experience health effects",
            health_implications: "Some members of the general public may experience health effects; sensitive groups may experience more serious effects.",
            recommendations: "Everyone should reduce prolonged outdoor exertion; sensitive groups should avoid it.",
            severity: AqiSeverity::Unhealthy,
            color: "#ff0000",
        },
    },
    AqiBand {
        upper: 300.0,
        info: AqiInfo {
            level: "Very Unhealthy",
            description: "Health alert: everyone may experience serious effects",
            health_implications: "Health alert: the risk of health effects is increased for everyone.",
            recommendations: "Everyone should avoid prolonged outdoor exertion; sensitive groups should stay indoors.",
            severity: AqiSeverity::VeryUnhealthy,
            color: "#8f3f97",
        },
    },
    AqiBand {
        upper: f64::INFINITY,
        info: AqiInfo {
            level: "Hazardous",
            description: "Health warnings of emergency conditions",
            health_implications: "Health warning of emergency conditions: everyone is more likely to be affected.",
            recommendations: "Everyone should avoid all outdoor physical activity and remain indoors.",
            severity: AqiSeverity::Hazardous,
            color: "#7e0023",
        },
    },
];

/// Look up the AQI category for a value. Bands are checked low to high and the first
/// upper bound the value does not exceed wins; NaN falls through to `Hazardous`.
pub fn classify_aqi(aqi: f64) -> AqiInfo {
    AQI_BANDS
        .iter()
        .find(|band| aqi <= band.upper)
        .map(|band| band.info)
        .unwrap_or(AQI_BANDS[AQI_BANDS.len() - 1].info)
}
