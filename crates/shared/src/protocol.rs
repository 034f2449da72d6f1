use serde::{Deserialize, Serialize};

/// Body of `POST /api/generate-report`.
///
/// The backend contract uses camelCase field names on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GenerateReportRequest {
    pub input_text: String,
    pub report_type: String,
}

/// Successful (2xx) response body for report generation.
///
/// `report` is optional at decode time so that a well-formed body
/// missing the field is distinguishable from a decode failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateReportResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report: Option<String>,
}

/// Best-effort decode of a non-2xx response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Response body of the `GET /api/test` health probe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PingResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_with_camel_case_field_names() {
        let request = GenerateReportRequest {
            input_text: "fever for three days".to_string(),
            report_type: "Summarize Clinical Notes".to_string(),
        };
        let json = serde_json::to_value(&request).expect("serialize");
        assert_eq!(json["inputText"], "fever for three days");
        assert_eq!(json["reportType"], "Summarize Clinical Notes");
    }

    #[test]
    fn response_decodes_missing_report_field_as_none() {
        let response: GenerateReportResponse =
            serde_json::from_str("{}").expect("empty object is well-formed");
        assert!(response.report.is_none());
    }

    #[test]
    fn error_body_tolerates_absent_error_field() {
        let body: ErrorBody = serde_json::from_str("{\"detail\":\"x\"}").expect("decode");
        assert!(body.error.is_none());
    }
}
