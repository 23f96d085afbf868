//! Transparency score
//!
//! score = 100 * (0.5 * priced + 0.3 * reconciled + 0.2 * mapped)
//!
//! Reconciled and mapped ratios are fixed constants that switch on once any
//! position is priced.

use tracing::debug;
use xray_common::api::TransparencyScoreResponse;

use crate::metrics;
use crate::store::FileSet;

const PRICED_WEIGHT: f64 = 0.5;
const RECONCILED_WEIGHT: f64 = 0.3;
const MAPPED_WEIGHT: f64 = 0.2;

/// Reconciled ratio reported for any priced batch
pub const RECONCILED_RATIO: f64 = 0.98;

/// Mapped ratio reported for any priced batch
pub const MAPPED_RATIO: f64 = 0.99;

/// Round half away from zero to `places` decimals
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Combine a priced ratio into the full score response
pub fn score_from_priced(batch_id: &str, priced: f64) -> TransparencyScoreResponse {
    let (reconciled, mapped) = if priced > 0.0 {
        (RECONCILED_RATIO, MAPPED_RATIO)
    } else {
        (0.0, 0.0)
    };

    let score = 100.0
        * (PRICED_WEIGHT * priced + RECONCILED_WEIGHT * reconciled + MAPPED_WEIGHT * mapped);

    TransparencyScoreResponse {
        batch_id: batch_id.to_string(),
        score: round_to(score, 2),
        priced_ratio: round_to(priced, 4),
        reconciled_ratio: reconciled,
        mapped_ratio: mapped,
    }
}

/// Transparency score for the files currently in a batch
pub fn transparency_score(batch_id: &str, files: &FileSet) -> TransparencyScoreResponse {
    let response = score_from_priced(batch_id, metrics::priced_ratio(files));
    debug!(batch_id, score = response.score, "Computed transparency score");
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_sample_portfolio_score() {
        let files: FileSet = ["sample_portfolio.csv".to_string()].into_iter().collect();
        let resp = transparency_score("b_1", &files);

        assert_eq!(resp.batch_id, "b_1");
        assert!((resp.priced_ratio - 0.95).abs() < EPS);
        assert!((resp.reconciled_ratio - 0.98).abs() < EPS);
        assert!((resp.mapped_ratio - 0.99).abs() < EPS);
        // 100 * (0.475 + 0.294 + 0.198)
        assert!((resp.score - 96.7).abs() < EPS, "score was {}", resp.score);
    }

    #[test]
    fn test_empty_batch_scores_zero() {
        let resp = transparency_score("b_unknown", &FileSet::new());
        assert_eq!(resp.score, 0.0);
        assert_eq!(resp.priced_ratio, 0.0);
        assert_eq!(resp.reconciled_ratio, 0.0);
        assert_eq!(resp.mapped_ratio, 0.0);
    }

    #[test]
    fn test_score_from_priced_rounding() {
        let resp = score_from_priced("b", 0.123456);
        assert!((resp.priced_ratio - 0.1235).abs() < EPS);
        // 100 * (0.061728 + 0.294 + 0.198) = 55.3728
        assert!((resp.score - 55.37).abs() < EPS);
    }

    #[test]
    fn test_full_priced_ratio_score() {
        let resp = score_from_priced("b", 1.0);
        assert!((resp.score - 99.2).abs() < EPS);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(2.5, 0), 3.0);
        assert_eq!(round_to(-2.5, 0), -3.0);
        assert!((round_to(96.69999999, 2) - 96.7).abs() < EPS);
    }
}
