use serde::{Deserialize, Serialize};

use super::aqi::{classify_aqi, AqiSeverity};
use super::domain::{EnvironmentalReading, Gender, HealthProfile, OutdoorExposure};

pub const AQI_MAX: f64 = 500.0;
pub const PM25_WARNING_THRESHOLD: f64 = 500.0;
pub const PM10_WARNING_THRESHOLD: f64 = 600.0;

/// Outcome of soft-validating an environmental reading.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadingValidation {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<AqiSeverity>,
}

impl ReadingValidation {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Check a reading against the documented domains. The scorer never rejects inputs; this
/// is what callers run first.
pub fn validate_reading(reading: &EnvironmentalReading) -> ReadingValidation {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if !reading.aqi.is_finite() || !(0.0..=AQI_MAX).contains(&reading.aqi) {
        errors.push("AQI must be between 0 and 500".to_string());
    }

    if !reading.pm25.is_finite() || reading.pm25 < 0.0 {
        errors.push("PM2.5 must be a non-negative number".to_string());
    } else if reading.pm25 > PM25_WARNING_THRESHOLD {
        warnings.push("PM2.5 value seems unusually high - please verify".to_string());
    }

    if !reading.pm10.is_finite() || reading.pm10 < 0.0 {
        errors.push("PM10 must be a non-negative number".to_string());
    } else if reading.pm10 > PM10_WARNING_THRESHOLD {
        warnings.push("PM10 value seems unusually high - please verify".to_string());
    }

    if reading.pm25 > reading.pm10 {
        warnings.push(
            "PM2.5 is typically lower than PM10 - please verify your readings".to_string(),
        );
    }

    let severity = reading
        .aqi
        .is_finite()
        .then(|| classify_aqi(reading.aqi).severity);

    ReadingValidation {
        errors,
        warnings,
        severity,
    }
}

/// Health profile as stored by the caller, possibly incomplete.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDraft {
    pub age: Option<u8>,
    pub gender: Option<Gender>,
    pub is_pregnant: Option<bool>,
    pub is_smoker: Option<bool>,
    pub has_asthma: Option<bool>,
    pub has_heart_disease: Option<bool>,
    pub has_respiratory_issues: Option<bool>,
    pub outdoor_exposure: Option<OutdoorExposure>,
}

/// Fields that must be present before a profile can be scored.
pub const REQUIRED_PROFILE_FIELDS: [&str; 3] = ["age", "gender", "outdoorExposure"];

/// Completeness summary for profile screens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileCompleteness {
    pub is_complete: bool,
    pub missing_fields: Vec<&'static str>,
    pub completion_percentage: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("health profile is incomplete; missing {}", .missing_fields.join(", "))]
pub struct IncompleteProfile {
    pub missing_fields: Vec<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileValidationError {
    #[error("age must be between 1 and 120 (got {0})")]
    AgeOutOfRange(u8),
}

impl ProfileDraft {
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let present = [
            self.age.is_some(),
            self.gender.is_some(),
            self.outdoor_exposure.is_some(),
        ];
        REQUIRED_PROFILE_FIELDS
            .iter()
            .zip(present)
            .filter(|(_, present)| !present)
            .map(|(field, _)| *field)
            .collect()
    }

    pub fn completeness(&self) -> ProfileCompleteness {
        let missing_fields = self.missing_fields();
        let required = REQUIRED_PROFILE_FIELDS.len();
        let filled = required - missing_fields.len();
        let completion_percentage = ((filled as f32 / required as f32) * 100.0).round() as u8;

        ProfileCompleteness {
            is_complete: missing_fields.is_empty(),
            missing_fields,
            completion_percentage,
        }
    }

    /// Reject values outside the accepted domains. Absent fields are not errors here.
    pub fn validate(&self) -> Result<(), ProfileValidationError> {
        match self.age {
            Some(age) if !(1..=120).contains(&age) => {
                Err(ProfileValidationError::AgeOutOfRange(age))
            }
            _ => Ok(()),
        }
    }

    /// Promote to a scoreable profile; unset condition flags count as `false`.
    pub fn into_profile(self) -> Result<HealthProfile, IncompleteProfile> {
        match (self.age, self.gender, self.outdoor_exposure) {
            (Some(age), Some(gender), Some(outdoor_exposure)) => Ok(HealthProfile {
                age,
                gender,
                is_pregnant: self.is_pregnant.unwrap_or(false),
                is_smoker: self.is_smoker.unwrap_or(false),
                has_asthma: self.has_asthma.unwrap_or(false),
                has_heart_disease: self.has_heart_disease.unwrap_or(false),
                has_respiratory_issues: self.has_respiratory_issues.unwrap_or(false),
                outdoor_exposure,
            }),
            _ => Err(IncompleteProfile {
                missing_fields: self.missing_fields(),
            }),
        }
    }
}

impl From<HealthProfile> for ProfileDraft {
    fn from(profile: HealthProfile) -> Self {
        Self {
            age: Some(profile.age),
            gender: Some(profile.gender),
            is_pregnant: Some(profile.is_pregnant),
            is_smoker: Some(profile.is_smoker),
            has_asthma: Some(profile.has_asthma),
            has_heart_disease: Some(profile.has_heart_disease),
            has_respiratory_issues: Some(profile.has_respiratory_issues),
            outdoor_exposure: Some(profile.outdoor_exposure),
        }
    }
}
