//! HTTP API handlers for xray-api

pub mod buildinfo;
pub mod health;
pub mod provenance;
pub mod report;
pub mod score;
pub mod upload;

pub use buildinfo::get_build_info;
pub use health::health_routes;
pub use provenance::get_provenance;
pub use report::make_report_pdf;
pub use score::get_transparency_score;
pub use upload::upload_files;
