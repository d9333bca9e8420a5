use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::domain::{EnvironmentalReading, HealthProfile};

/// Inputs handed to a generative model client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentRequest {
    pub profile: HealthProfile,
    pub reading: EnvironmentalReading,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// Client boundary for an external model producing assessment JSON.
///
/// Implementations own transport, prompting, retries and timeouts. Their output is untrusted
/// and always passes through [`reconcile`](super::reconcile::reconcile).
pub trait AssessmentModel: Send + Sync {
    fn name(&self) -> &str;
    fn generate(&self, request: &AssessmentRequest) -> Result<Value, ModelError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("model unavailable: {0}")]
    Unavailable(String),
    #[error("model reply is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Parse a model reply, tolerating a surrounding Markdown code fence.
pub fn extract_json_payload(reply: &str) -> Result<Value, ModelError> {
    let trimmed = reply.trim();
    let body = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.trim_end().strip_suffix("```"))
        .unwrap_or(trimmed);

    Ok(serde_json::from_str(body.trim())?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_json_is_parsed() {
        let value = extract_json_payload(r#" {"riskScore": 40} "#).expect("parses");
        assert_eq!(value["riskScore"], 40);
    }

    #[test]
    fn fenced_json_is_unwrapped() {
        let reply = "```json\n{\"riskLevel\": \"high\"}\n```\n";
        let value = extract_json_payload(reply).expect("parses");
        assert_eq!(value["riskLevel"], "high");

        let bare_fence = "```\n[1, 2]\n```";
        assert!(extract_json_payload(bare_fence)
            .expect("parses")
            .is_array());
    }

    #[test]
    fn prose_is_rejected() {
        let err = extract_json_payload("I cannot assess this user.").expect_err("not json");
        assert!(matches!(err, ModelError::InvalidJson(_)));
    }
}
