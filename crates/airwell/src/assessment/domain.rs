use std::fmt;

use serde::{Deserialize, Serialize};

/// Self-reported gender captured on the health profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Other,
    PreferNotToSay,
}

/// How much of the day the user typically spends outdoors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutdoorExposure {
    Low,
    Moderate,
    High,
}

/// Fully populated health profile the scorer runs against.
///
/// Callers are expected to have checked completeness beforehand (see
/// [`ProfileDraft`](super::validation::ProfileDraft)); the scorer reads every field as given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthProfile {
    pub age: u8,
    pub gender: Gender,
    #[serde(default)]
    pub is_pregnant: bool,
    #[serde(default)]
    pub is_smoker: bool,
    #[serde(default)]
    pub has_asthma: bool,
    #[serde(default)]
    pub has_heart_disease: bool,
    #[serde(default)]
    pub has_respiratory_issues: bool,
    pub outdoor_exposure: OutdoorExposure,
}

/// Current air-quality reading at the user's location.
///
/// `aqi` is on the US EPA 0-500 scale; particulate readings are in µg/m³.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentalReading {
    pub aqi: f64,
    pub pm25: f64,
    pub pm10: f64,
}

/// Categorical risk derived from a risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 4] = [
        RiskLevel::Low,
        RiskLevel::Moderate,
        RiskLevel::High,
        RiskLevel::VeryHigh,
    ];

    /// Classify a score; thresholds are inclusive at their lower bound.
    pub fn from_score(score: u32) -> Self {
        if score >= 75 {
            RiskLevel::VeryHigh
        } else if score >= 50 {
            RiskLevel::High
        } else if score >= 25 {
            RiskLevel::Moderate
        } else {
            RiskLevel::Low
        }
    }

    /// Parse the wire representation (`low`, `moderate`, `high`, `very_high`).
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.as_str() == raw)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Moderate => "moderate",
            RiskLevel::High => "high",
            RiskLevel::VeryHigh => "very_high",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low Risk",
            RiskLevel::Moderate => "Moderate Risk",
            RiskLevel::High => "High Risk",
            RiskLevel::VeryHigh => "Very High Risk",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            RiskLevel::Low => "#4CAF50",
            RiskLevel::Moderate => "#FF9800",
            RiskLevel::High => "#F44336",
            RiskLevel::VeryHigh => "#9C27B0",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The four named components of a risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RiskCategory {
    Environmental,
    Age,
    HealthConditions,
    Lifestyle,
}

impl RiskCategory {
    pub const ALL: [RiskCategory; 4] = [
        RiskCategory::Environmental,
        RiskCategory::Age,
        RiskCategory::HealthConditions,
        RiskCategory::Lifestyle,
    ];

    /// Upper bound for the category's contribution to the total score.
    pub const fn max(&self) -> u32 {
        match self {
            RiskCategory::Environmental => 40,
            RiskCategory::Age => 20,
            RiskCategory::HealthConditions => 25,
            RiskCategory::Lifestyle => 15,
        }
    }

    /// Key used in serialized breakdowns.
    pub fn key(&self) -> &'static str {
        match self {
            RiskCategory::Environmental => "environmental",
            RiskCategory::Age => "age",
            RiskCategory::HealthConditions => "healthConditions",
            RiskCategory::Lifestyle => "lifestyle",
        }
    }
}

/// Per-category decomposition of a risk score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskBreakdown {
    pub environmental: u32,
    pub age: u32,
    pub health_conditions: u32,
    pub lifestyle: u32,
}

impl RiskBreakdown {
    pub fn get(&self, category: RiskCategory) -> u32 {
        match category {
            RiskCategory::Environmental => self.environmental,
            RiskCategory::Age => self.age,
            RiskCategory::HealthConditions => self.health_conditions,
            RiskCategory::Lifestyle => self.lifestyle,
        }
    }

    pub fn set(&mut self, category: RiskCategory, value: u32) {
        match category {
            RiskCategory::Environmental => self.environmental = value,
            RiskCategory::Age => self.age = value,
            RiskCategory::HealthConditions => self.health_conditions = value,
            RiskCategory::Lifestyle => self.lifestyle = value,
        }
    }

    pub fn total(&self) -> u32 {
        RiskCategory::ALL
            .iter()
            .map(|category| self.get(*category))
            .sum()
    }
}

/// Result of a health-risk assessment, from either the scorer or the reconciler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub risk_score: u32,
    pub risk_level: RiskLevel,
    pub breakdown: RiskBreakdown,
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub insights: Vec<String>,
}
