use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde_json::Value;

use crate::assessment::domain::{EnvironmentalReading, Gender, HealthProfile, OutdoorExposure};
use crate::assessment::model::{AssessmentModel, AssessmentRequest, ModelError};
use crate::assessment::repository::{
    AssessmentRecord, AssessmentRepository, RepositoryError, UserId,
};

pub(super) fn healthy_adult() -> HealthProfile {
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

pub(super) fn asthmatic_senior() -> HealthProfile {
    HealthProfile {
        age: 70,
        gender: Gender::Male,
        is_pregnant: false,
        is_smoker: false,
        has_asthma: true,
        has_heart_disease: false,
        has_respiratory_issues: false,
        outdoor_exposure: OutdoorExposure::High,
    }
}

pub(super) fn hazardous_air() -> EnvironmentalReading {
    EnvironmentalReading {
        aqi: 320.0,
        pm25: 200.0,
        pm10: 250.0,
    }
}

pub(super) fn clean_air() -> EnvironmentalReading {
    EnvironmentalReading {
        aqi: 42.0,
        pm25: 8.0,
        pm10: 15.0,
    }
}

/// Model double replaying a fixed reply and counting calls.
pub(super) struct ScriptedModel {
    reply: Result<Value, String>,
    calls: Mutex<usize>,
}

impl ScriptedModel {
    pub(super) fn replying(reply: Value) -> Self {
        Self {
            reply: Ok(reply),
            calls: Mutex::new(0),
        }
    }

    pub(super) fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            calls: Mutex::new(0),
        }
    }

    pub(super) fn calls(&self) -> usize {
        *self.calls.lock().expect("model mutex poisoned")
    }
}

impl AssessmentModel for ScriptedModel {
    fn name(&self) -> &str {
        "scripted"
    }

    fn generate(&self, _request: &AssessmentRequest) -> Result<Value, ModelError> {
        *self.calls.lock().expect("model mutex poisoned") += 1;
        self.reply.clone().map_err(ModelError::Unavailable)
    }
}

#[derive(Default, Clone)]
pub(super) struct InMemoryAssessmentRepository {
    records: Arc<Mutex<HashMap<UserId, Vec<AssessmentRecord>>>>,
}

impl AssessmentRepository for InMemoryAssessmentRepository {
    fn append(&self, record: AssessmentRecord) -> Result<AssessmentRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let history = guard.entry(record.user_id.clone()).or_default();
        if history.iter().any(|existing| existing.id == record.id) {
            return Err(RepositoryError::Conflict);
        }
        history.push(record.clone());
        Ok(record)
    }

    fn latest(&self, user_id: &UserId) -> Result<Option<AssessmentRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .get(user_id)
            .and_then(|history| history.last())
            .cloned())
    }

    fn history(
        &self,
        user_id: &UserId,
        limit: usize,
    ) -> Result<Vec<AssessmentRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .get(user_id)
            .map(|history| history.iter().rev().take(limit).cloned().collect())
            .unwrap_or_default())
    }
}

/// Repository double that refuses every write.
pub(super) struct OfflineRepository;

impl AssessmentRepository for OfflineRepository {
    fn append(&self, _record: AssessmentRecord) -> Result<AssessmentRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn latest(&self, _user_id: &UserId) -> Result<Option<AssessmentRecord>, RepositoryError> {
        Ok(None)
    }

    fn history(
        &self,
        _user_id: &UserId,
        _limit: usize,
    ) -> Result<Vec<AssessmentRecord>, RepositoryError> {
        Ok(Vec::new())
    }
}
