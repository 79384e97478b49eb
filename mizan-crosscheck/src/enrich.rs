//! Cross-check enrichment: root cause + confidence + trend + decision.
//!
//! Every result is enriched independently of user input — the persisted
//! reviewer decision is joined in afterwards, never consulted during
//! classification — so two runs over the same inputs always classify the
//! same way regardless of what the reviewer decided in between.

use std::collections::HashMap;

use log::{debug, info};
use serde::Serialize;

use crate::confidence::{self, ConfidenceSplit};
use crate::decisions::DecisionStore;
use crate::root_cause::{self, RootCauseAssessment};
use crate::trend::{self, TrendAssessment};
use crate::types::{CrossCheckResult, UserDecision};

/// One cross-check result with everything the review screen needs.
#[derive(Clone, Debug, Serialize)]
pub struct EnrichedCrossCheck {
    pub result: CrossCheckResult,
    pub root_cause: RootCauseAssessment,
    pub confidence: ConfidenceSplit,
    pub trend: TrendAssessment,
    /// The reviewer's persisted verdict, when one exists for this check.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decision: Option<UserDecision>,
}

/// Enrich every result, in input order.
///
/// Previous-period results are matched by check id; checks without a prior
/// counterpart get a no-history trend. The decision store is read-only and
/// an absent decision stays absent — the engine never substitutes a default
/// verdict.
pub fn enrich_cross_checks(
    current: &[CrossCheckResult],
    previous: Option<&[CrossCheckResult]>,
    decisions: &dyn DecisionStore,
) -> Vec<EnrichedCrossCheck> {
    let previous_by_id: HashMap<&str, f64> = previous
        .unwrap_or(&[])
        .iter()
        .map(|r| (r.check_id.as_str(), r.difference.abs()))
        .collect();

    let enriched: Vec<EnrichedCrossCheck> = current
        .iter()
        .map(|result| {
            let root_cause = root_cause::classify(result);
            let confidence = confidence::split(result);
            let trend = trend::compute(
                result.difference,
                previous_by_id.get(result.check_id.as_str()).copied(),
            );
            debug!(
                "enriched {}: cause={} confidence={} trend={}",
                result.check_id,
                root_cause.cause.code(),
                confidence.combined,
                trend.direction
            );
            EnrichedCrossCheck {
                root_cause,
                confidence,
                trend,
                decision: decisions.decision_for(&result.check_id).cloned(),
                result: result.clone(),
            }
        })
        .collect();

    info!(
        "enriched {} cross-checks ({} with prior-period history, {} with a decision)",
        enriched.len(),
        enriched
            .iter()
            .filter(|e| e.trend.previous_difference.is_some())
            .count(),
        enriched.iter().filter(|e| e.decision.is_some()).count()
    );
    enriched
}
