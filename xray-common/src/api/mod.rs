//! API module for shared HTTP API types
//!
//! Request/response bodies exchanged with the Portfolio X-Ray API. Kept free of
//! HTTP framework dependencies so clients and tests can reuse them.

pub mod types;

pub use types::{
    BuildInfo, HealthResponse, ProvenanceInput, ProvenanceResponse, ReportRequest,
    TransparencyScoreResponse, UploadResponse,
};
