use super::super::domain::{EnvironmentalReading, HealthProfile, OutdoorExposure};

/// AQI band contribution, 5 to 40 points. Particulate readings do not feed this score.
pub(crate) fn environmental_score(reading: &EnvironmentalReading) -> u32 {
    let aqi = reading.aqi;
    if aqi >= 300.0 {
        40
    } else if aqi >= 200.0 {
        35
    } else if aqi >= 150.0 {
        30
    } else if aqi >= 100.0 {
        20
    } else if aqi >= 50.0 {
        10
    } else {
        5
    }
}

/// Age contribution, 5 to 20 points. Checks run in order; the first match wins.
pub(crate) fn age_score(age: u8) -> u32 {
    if age >= 65 {
        20
    } else if age >= 45 {
        15
    } else if age <= 5 {
        18
    } else if age <= 12 {
        12
    } else {
        5
    }
}

/// Additive condition points. Not clamped: all four flags add up to 33.
pub(crate) fn health_conditions_score(profile: &HealthProfile) -> u32 {
    let mut score = 0;
    if profile.has_asthma {
        score += 8;
    }
    if profile.has_heart_disease {
        score += 10;
    }
    if profile.has_respiratory_issues {
        score += 7;
    }
    if profile.is_pregnant {
        score += 8;
    }
    score
}

/// Smoking plus outdoor exposure, 1 to 15 points.
pub(crate) fn lifestyle_score(profile: &HealthProfile) -> u32 {
    let smoking = if profile.is_smoker { 8 } else { 0 };
    let exposure = match profile.outdoor_exposure {
        OutdoorExposure::High => 7,
        OutdoorExposure::Moderate => 4,
        OutdoorExposure::Low => 1,
    };
    smoking + exposure
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::domain::Gender;

    fn reading(aqi: f64) -> EnvironmentalReading {
        EnvironmentalReading {
            aqi,
            pm25: 10.0,
            pm10: 20.0,
        }
    }

    fn profile() -> HealthProfile {
        HealthProfile {
            age: 30,
            gender: Gender::Female,
            is_pregnant: false,
            is_smoker: false,
            has_asthma: false,
            has_heart_disease: false,
            has_respiratory_issues: false,
            outdoor_exposure: OutdoorExposure::Low,
        }
    }

    #[test]
    fn environmental_score_follows_aqi_bands() {
        let cases = [
            (0.0, 5),
            (49.9, 5),
            (50.0, 10),
            (99.0, 10),
            (100.0, 20),
            (150.0, 30),
            (199.5, 30),
            (200.0, 35),
            (299.0, 35),
            (300.0, 40),
            (500.0, 40),
        ];
        for (aqi, expected) in cases {
            assert_eq!(environmental_score(&reading(aqi)), expected, "aqi {aqi}");
        }
    }

    #[test]
    fn environmental_score_ignores_particulates() {
        let mut heavy = reading(42.0);
        heavy.pm25 = 480.0;
        heavy.pm10 = 590.0;
        assert_eq!(environmental_score(&heavy), 5);
    }

    #[test]
    fn age_score_checks_bounds_in_order() {
        let cases = [
            (1, 18),
            (5, 18),
            (6, 12),
            (12, 12),
            (13, 5),
            (44, 5),
            (45, 15),
            (64, 15),
            (65, 20),
            (120, 20),
        ];
        for (age, expected) in cases {
            assert_eq!(age_score(age), expected, "age {age}");
        }
    }

    #[test]
    fn health_conditions_are_additive_and_unclamped() {
        let mut all = profile();
        all.has_asthma = true;
        all.has_heart_disease = true;
        all.has_respiratory_issues = true;
        all.is_pregnant = true;
        assert_eq!(health_conditions_score(&all), 33);
        assert_eq!(health_conditions_score(&profile()), 0);
    }

    #[test]
    fn lifestyle_combines_smoking_and_exposure() {
        let mut smoker = profile();
        smoker.is_smoker = true;
        smoker.outdoor_exposure = OutdoorExposure::High;
        assert_eq!(lifestyle_score(&smoker), 15);

        let mut moderate = profile();
        moderate.outdoor_exposure = OutdoorExposure::Moderate;
        assert_eq!(lifestyle_score(&moderate), 4);
        assert_eq!(lifestyle_score(&profile()), 1);
    }
}
