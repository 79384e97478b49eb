//! Confidence decomposition for cross-check results.
//!
//! A single "how much should I trust this check" number hides two very
//! different questions: did both sides actually deliver data (coverage),
//! and how well do the delivered figures agree (matching quality)? The
//! splitter answers each separately and reports the rounded average as the
//! combined score, so a reviewer can see a perfectly-matched check built on
//! half the data for what it is.

use serde::Serialize;

use crate::types::{CheckStatus, CrossCheckResult};

/// Decomposed trust score for one cross-check, all components in 0–100.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ConfidenceSplit {
    /// Did both sides deliver usable data?
    pub coverage: u8,
    /// How closely do the delivered figures agree?
    pub matching_quality: u8,
    /// Rounded average of the two sub-scores.
    pub combined: u8,
    pub coverage_rationale: String,
    pub matching_rationale: String,
}

/// Split the trust indicator for one cross-check result.
pub fn split(result: &CrossCheckResult) -> ConfidenceSplit {
    let (coverage, coverage_rationale) = coverage_score(result);
    let (matching_quality, matching_rationale) = matching_score(result);
    let combined = ((coverage as f64 + matching_quality as f64) / 2.0).round() as u8;
    ConfidenceSplit {
        coverage,
        matching_quality,
        combined,
        coverage_rationale,
        matching_rationale,
    }
}

fn coverage_score(result: &CrossCheckResult) -> (u8, String) {
    if result.status == CheckStatus::NoData {
        return (
            0,
            format!("{} için iki taraftan da veri gelmedi.", result.check_name),
        );
    }
    let sides_present =
        usize::from(result.has_source_value()) + usize::from(result.has_target_value());
    match sides_present {
        2 => (
            100,
            format!(
                "Hem {} hem {} dolu ve sıfırdan farklı.",
                result.source_label, result.target_label
            ),
        ),
        1 => {
            let missing = if result.has_source_value() {
                &result.target_label
            } else {
                &result.source_label
            };
            (
                50,
                format!("Yalnızca bir taraf dolu; {} tarafı boş.", missing),
            )
        }
        _ => (0, "İki tarafta da kullanılabilir tutar yok.".to_string()),
    }
}

fn matching_score(result: &CrossCheckResult) -> (u8, String) {
    match result.status {
        CheckStatus::Pass => (
            100,
            format!("{} tolerans içinde eşleşti.", result.check_name),
        ),
        CheckStatus::NoData | CheckStatus::Skipped => (
            0,
            "Kontrol çalışmadığı için eşleşme kalitesi ölçülemedi.".to_string(),
        ),
        _ => {
            let pct = result.difference_percent;
            let score = if pct > 10.0 {
                20
            } else if pct > 5.0 {
                50
            } else if pct > 1.0 {
                70
            } else {
                90
            };
            (
                score,
                format!("%{:.2} sapma eşleşme kalitesini {} puana indiriyor.", pct, score),
            )
        }
    }
}
