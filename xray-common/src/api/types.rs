//! Shared API request/response types
//!
//! JSON bodies for the health, upload, transparency score, provenance and
//! report endpoints.

use serde::{Deserialize, Serialize};

// ========================================
// Service Types
// ========================================

/// Health check response
///
/// # Examples
///
/// ```
/// use xray_common::api::types::HealthResponse;
///
/// let health = HealthResponse::healthy("xray-api", "2.0.0");
/// assert_eq!(health.status, "healthy");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub module: String,
    pub version: String,
}

impl HealthResponse {
    /// Fixed "healthy" payload for the given module
    pub fn healthy(module: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            status: "healthy".to_string(),
            module: module.into(),
            version: version.into(),
        }
    }
}

/// Build identification captured at compile time
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BuildInfo {
    pub version: String,
    pub git_hash: String,
    pub build_timestamp: String,
    pub build_profile: String,
}

// ========================================
// Ingestion Types
// ========================================

/// Result of a file upload
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UploadResponse {
    /// Batch the files were recorded into
    pub batch_id: String,

    /// Accepted filenames, in upload order
    pub files_ingested: Vec<String>,

    /// Ingestion warnings (no producer yet)
    #[serde(default)]
    pub warnings: Vec<String>,
}

// ========================================
// Metric Types
// ========================================

/// Transparency score for one batch
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TransparencyScoreResponse {
    pub batch_id: String,
    /// 0-100, two decimals
    pub score: f64,
    /// 0-1, four decimals
    pub priced_ratio: f64,
    pub reconciled_ratio: f64,
    pub mapped_ratio: f64,
}

/// One input file that nominally fed a metric
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProvenanceInput {
    pub file: String,
    pub rows_used: u64,
}

/// Provenance record for a metric
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProvenanceResponse {
    /// Metric name as requested by the caller
    pub metric: String,
    pub inputs: Vec<ProvenanceInput>,
    pub calculation: String,
}

// ========================================
// Report Types
// ========================================

/// Body of `POST /report/pdf`
///
/// # Examples
///
/// ```
/// use xray_common::api::types::ReportRequest;
///
/// let req: ReportRequest = serde_json::from_str(
///     r#"{"batch_id":"b_0123456789ab","client":"Acme","advisor":"Jo"}"#,
/// ).unwrap();
/// assert!(req.as_of.is_none());
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReportRequest {
    pub batch_id: String,
    pub client: String,
    pub advisor: String,
    /// Report date; today when omitted
    #[serde(default)]
    pub as_of: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_upload_response_warnings_default_to_empty() {
        let parsed: UploadResponse =
            serde_json::from_value(json!({"batch_id": "b_1", "files_ingested": ["a.csv"]}))
                .unwrap();
        assert!(parsed.warnings.is_empty());
    }

    #[test]
    fn test_provenance_response_field_names() {
        let resp = ProvenanceResponse {
            metric: "sharpe".to_string(),
            inputs: vec![ProvenanceInput {
                file: "prices.csv".to_string(),
                rows_used: 365,
            }],
            calculation: "risk_adjusted_return".to_string(),
        };
        let value = serde_json::to_value(&resp).unwrap();
        assert_eq!(value["inputs"][0]["file"], "prices.csv");
        assert_eq!(value["inputs"][0]["rows_used"], 365);
        assert_eq!(value["calculation"], "risk_adjusted_return");
    }

    #[test]
    fn test_report_request_rejects_missing_client() {
        let result: std::result::Result<ReportRequest, _> =
            serde_json::from_value(json!({"batch_id": "b_1", "advisor": "Jo"}));
        assert!(result.is_err());
    }
}
