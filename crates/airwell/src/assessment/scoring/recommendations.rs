use super::super::domain::{HealthProfile, RiskLevel};

/// Build the ordered recommendation list: risk-level guidance, then condition-specific
/// lines (asthma, heart disease, pregnancy, smoking), then age-specific lines.
pub fn recommendations_for(level: RiskLevel, profile: &HealthProfile) -> Vec<String> {
    let mut recommendations: Vec<String> = level_guidance(level)
        .iter()
        .map(|line| line.to_string())
        .collect();

    let conditions = [
        (
            profile.has_asthma,
            "Keep your inhaler readily available and follow your asthma action plan.",
        ),
        (
            profile.has_heart_disease,
            "Monitor your symptoms closely and contact your doctor if you experience chest pain or unusual fatigue.",
        ),
        (
            profile.is_pregnant,
            "Consult with your healthcare provider about air quality precautions during pregnancy.",
        ),
        (
            profile.is_smoker,
            "Consider quitting smoking to reduce additional respiratory risks.",
        ),
    ];
    recommendations.extend(
        conditions
            .iter()
            .filter(|(applies, _)| *applies)
            .map(|(_, line)| line.to_string()),
    );

    if profile.age >= 65 {
        recommendations
            .push("Seniors should be extra cautious during poor air quality days.".to_string());
    }
    if profile.age <= 12 {
        recommendations
            .push("Children should limit outdoor play during poor air quality periods.".to_string());
    }

    recommendations
}

fn level_guidance(level: RiskLevel) -> &'static [&'static str] {
    match level {
        RiskLevel::VeryHigh => &[
            "Avoid all outdoor activities. Stay indoors with air purifiers running.",
            "Seek immediate medical attention if experiencing breathing difficulties.",
        ],
        RiskLevel::High => &[
            "Limit outdoor activities to essential tasks only.",
            "Wear N95 masks when going outside.",
        ],
        RiskLevel::Moderate => &[
            "Reduce prolonged outdoor activities and consider wearing a mask during outdoor exercise.",
        ],
        RiskLevel::Low => &["Normal outdoor activities are generally safe."],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::domain::{Gender, OutdoorExposure};

    fn adult() -> HealthProfile {
        HealthProfile {
            age: 30,
            gender: Gender::Male,
            is_pregnant: false,
            is_smoker: false,
            has_asthma: false,
            has_heart_disease: false,
            has_respiratory_issues: false,
            outdoor_exposure: OutdoorExposure::Moderate,
        }
    }

    #[test]
    fn level_guidance_line_counts() {
        let profile = adult();
        assert_eq!(recommendations_for(RiskLevel::VeryHigh, &profile).len(), 2);
        assert_eq!(recommendations_for(RiskLevel::High, &profile).len(), 2);
        assert_eq!(recommendations_for(RiskLevel::Moderate, &profile).len(), 1);
        assert_eq!(recommendations_for(RiskLevel::Low, &profile).len(), 1);
    }

    #[test]
    fn condition_lines_follow_fixed_order() {
        let mut profile = adult();
        profile.is_smoker = true;
        profile.is_pregnant = true;
        profile.has_heart_disease = true;
        profile.has_asthma = true;

        let lines = recommendations_for(RiskLevel::Low, &profile);

        assert_eq!(lines.len(), 5);
        assert!(lines[1].contains("inhaler"));
        assert!(lines[2].contains("chest pain"));
        assert!(lines[3].contains("pregnancy"));
        assert!(lines[4].contains("quitting smoking"));
    }

    #[test]
    fn respiratory_issues_add_no_dedicated_line() {
        let mut profile = adult();
        profile.has_respiratory_issues = true;
        assert_eq!(recommendations_for(RiskLevel::Low, &profile).len(), 1);
    }

    #[test]
    fn age_lines_come_last() {
        let mut senior = adult();
        senior.age = 70;
        senior.has_asthma = true;
        let lines = recommendations_for(RiskLevel::High, &senior);
        assert_eq!(
            lines.last().map(String::as_str),
            Some("Seniors should be extra cautious during poor air quality days.")
        );

        let mut child = adult();
        child.age = 12;
        let lines = recommendations_for(RiskLevel::Moderate, &child);
        assert!(lines
            .last()
            .is_some_and(|line| line.starts_with("Children should limit")));
    }
}
