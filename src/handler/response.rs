// Response envelopes in the external-adapter wire format.
//
// Success: { jobRunID, data: { <moderation output>, result }, result, statusCode }
// Error:   { jobRunID, status: "errored", error, statusCode }

use serde::Serialize;
use serde_json::Value;

use crate::error::AdapterError;
use crate::moderation::traits::ModerationOutput;

pub const STATUS_OK: u16 = 200;
pub const STATUS_ERRORED: u16 = 500;

/// The moderation output with the normalized score string appended.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModerationData {
    #[serde(flatten)]
    pub output: ModerationOutput,
    pub result: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuccessPayload {
    #[serde(rename = "jobRunID")]
    pub job_run_id: Value,
    pub data: ModerationData,
    pub result: String,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorPayload {
    #[serde(rename = "jobRunID")]
    pub job_run_id: Value,
    pub status: &'static str,
    pub error: String,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    Success(SuccessPayload),
    Errored(ErrorPayload),
}

/// What every host adapter receives from the request handler.
#[derive(Debug, Clone, PartialEq)]
pub struct AdapterResponse {
    pub status_code: u16,
    pub payload: Payload,
}

impl SuccessPayload {
    pub fn new(job_run_id: Value, output: ModerationOutput, result: String) -> Self {
        Self {
            job_run_id,
            data: ModerationData {
                output,
                result: result.clone(),
            },
            result,
            status_code: STATUS_OK,
        }
    }
}

impl AdapterResponse {
    pub fn success(payload: SuccessPayload) -> Self {
        Self {
            status_code: STATUS_OK,
            payload: Payload::Success(payload),
        }
    }

    pub fn errored(job_run_id: Value, error: &AdapterError) -> Self {
        Self {
            status_code: STATUS_ERRORED,
            payload: Payload::Errored(ErrorPayload {
                job_run_id,
                status: "errored",
                error: error.to_string(),
                status_code: STATUS_ERRORED,
            }),
        }
    }

    pub fn from_result(job_run_id: Value, result: Result<SuccessPayload, AdapterError>) -> Self {
        match result {
            Ok(payload) => Self::success(payload),
            Err(e) => Self::errored(job_run_id, &e),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.payload, Payload::Success(_))
    }

    /// The error message, for errored responses.
    pub fn error_message(&self) -> Option<&str> {
        match &self.payload {
            Payload::Errored(e) => Some(&e.error),
            Payload::Success(_) => None,
        }
    }

    /// The payload as a JSON value.
    pub fn payload_json(&self) -> Value {
        // Every field is a String, number or JSON value; serialization cannot fail.
        serde_json::to_value(&self.payload).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moderation::traits::ModerationLabel;
    use serde_json::json;

    #[test]
    fn success_envelope_shape() {
        let output = ModerationOutput {
            moderation_labels: vec![ModerationLabel::new("Violence", 95.8)],
            moderation_model_version: Some("7.0".to_string()),
        };
        let response = AdapterResponse::success(SuccessPayload::new(
            json!("job-1"),
            output,
            "0,0,96,0,0".to_string(),
        ));
        assert_eq!(
            response.payload_json(),
            json!({
                "jobRunID": "job-1",
                "data": {
                    "ModerationLabels": [{"Name": "Violence", "Confidence": 95.8}],
                    "ModerationModelVersion": "7.0",
                    "result": "0,0,96,0,0"
                },
                "result": "0,0,96,0,0",
                "statusCode": 200
            })
        );
    }

    #[test]
    fn error_envelope_shape() {
        let response = AdapterResponse::errored(json!("job-1"), &AdapterError::NoData);
        assert_eq!(response.status_code, 500);
        assert_eq!(
            response.payload_json(),
            json!({
                "jobRunID": "job-1",
                "status": "errored",
                "error": "No data",
                "statusCode": 500
            })
        );
    }
}
