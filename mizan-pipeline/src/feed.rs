//! Feed pipeline orchestration.
//!
//! One synchronous pass: rule evaluation, explainability gate, materiality
//! gate, dedupe/bundle, capacity cut, id assignment. Each stage is a pure
//! function over the previous stage's output; the pipeline owns no mutable
//! state between runs, so the same input always yields the same items,
//! ids included.

use log::info;
use serde::Serialize;

use crate::bundle;
use crate::error::PresetError;
use crate::explainability;
use crate::limit;
use crate::materiality::{self, MaterialityPreset};
use crate::rule::{EvaluationFault, RuleSet};
use crate::signal_id;
use crate::types::{
    AccountBalance, CrossCheckItem, DomainRecord, FeedItem, FeedStats, ReviewScope,
};

/// The raw records one pipeline run consumes.
#[derive(Clone, Debug, Default)]
pub struct FeedInput {
    pub balances: Vec<AccountBalance>,
    pub cross_checks: Vec<CrossCheckItem>,
}

impl FeedInput {
    fn records(&self) -> Vec<DomainRecord> {
        self.balances
            .iter()
            .cloned()
            .map(DomainRecord::Balance)
            .chain(
                self.cross_checks
                    .iter()
                    .cloned()
                    .map(DomainRecord::CrossCheck),
            )
            .collect()
    }
}

/// Everything one run produced: the capped item list, stage counters, and
/// the non-fatal rule faults encountered along the way.
#[derive(Debug, Serialize)]
pub struct FeedOutcome {
    pub items: Vec<FeedItem>,
    pub stats: FeedStats,
    pub faults: Vec<EvaluationFault>,
}

/// The configured signal-to-feed pipeline.
pub struct FeedPipeline {
    rules: RuleSet,
    preset: MaterialityPreset,
    capacity: usize,
}

impl FeedPipeline {
    /// Build a pipeline, failing fast on malformed configuration.
    pub fn new(
        rules: RuleSet,
        preset: MaterialityPreset,
        capacity: usize,
    ) -> Result<Self, PresetError> {
        preset.validate()?;
        if capacity == 0 {
            return Err(PresetError::ZeroCapacity);
        }
        Ok(Self {
            rules,
            preset,
            capacity,
        })
    }

    /// The standard rules, standard preset, and default capacity.
    pub fn standard() -> Self {
        Self::new(
            RuleSet::standard(),
            MaterialityPreset::standard(),
            limit::DEFAULT_CAPACITY,
        )
        .expect("shipped configuration is valid")
    }

    /// Run the whole pipeline for one scope.
    pub fn run(&self, input: &FeedInput, scope: &ReviewScope) -> FeedOutcome {
        let records = input.records();
        let evaluation = self.rules.evaluate(&records, scope);
        let total_raw = evaluation.candidates.len();

        let explainability = explainability::apply(evaluation.candidates);
        let passed_explainability = explainability.kept.len();

        let materiality = materiality::apply(&self.preset, explainability.kept);
        let passed_materiality = materiality.kept.len();

        let bundled = bundle::bundle(materiality.kept);
        let after_dedupe = bundled.len();

        let (selected, others_count) = limit::select(bundled, self.capacity);

        let items: Vec<FeedItem> = selected
            .into_iter()
            .map(|b| {
                let signal = b.signal;
                FeedItem {
                    id: signal_id::assign(
                        &scope.client_id,
                        &scope.period,
                        signal.category,
                        &signal.dedupe_key,
                    ),
                    category: signal.category,
                    severity: signal.severity,
                    score: signal.score,
                    impact: signal.impact,
                    title: signal.title,
                    summary: signal.summary,
                    justification: signal.justification,
                    evidence: signal.evidence,
                    actions: signal.actions,
                    snoozeable: signal.snoozeable,
                    dedupe_key: signal.dedupe_key,
                    rule_name: signal.rule_name,
                    merged_count: b.merged_count,
                    client_id: scope.client_id.clone(),
                    period: scope.period.clone(),
                }
            })
            .collect();

        let stats = FeedStats {
            total_raw,
            passed_explainability,
            passed_materiality,
            after_dedupe,
            final_count: items.len(),
            others_count,
            rejected_explainability: explainability.rejected,
            rejected_materiality: materiality.rejected,
            fault_count: evaluation.faults.len(),
        };
        info!(
            "feed run for {}/{}: {} raw -> {} explainable -> {} material -> {} bundled -> {} \
             final ({} overflow, {} faults)",
            scope.client_id,
            scope.period,
            stats.total_raw,
            stats.passed_explainability,
            stats.passed_materiality,
            stats.after_dedupe,
            stats.final_count,
            stats.others_count,
            stats.fault_count
        );

        FeedOutcome {
            items,
            stats,
            faults: evaluation.faults,
        }
    }
}
