//! The materiality gate and its three named presets.
//!
//! Only impacts above a meaningful size or confidence should reach the
//! reviewer; the bypass lists let whole categories (VDK exposure) and
//! severities skip the size test entirely. The three presets differ only
//! in threshold values and bypass membership — the gate logic is identical
//! across them.

use log::debug;
use serde::Serialize;

use crate::error::PresetError;
use crate::types::{CandidateSignal, SignalCategory};
use mizan_crosscheck::Severity;

/// Named materiality thresholds.
#[derive(Clone, Debug, Serialize)]
pub struct MaterialityPreset {
    pub name: &'static str,
    /// Monetary impact at or above this always passes.
    pub absolute_threshold: f64,
    /// Percentage impact at or above this always passes.
    pub relative_threshold: f64,
    /// Score at or above this always passes.
    pub min_score: f64,
    /// Categories that pass regardless of size.
    pub bypass_categories: Vec<SignalCategory>,
    /// Severities that pass regardless of size.
    pub bypass_severities: Vec<Severity>,
}

impl MaterialityPreset {
    /// Strictest preset: only large or critical findings surface.
    pub fn conservative() -> Self {
        Self {
            name: "conservative",
            absolute_threshold: 10_000.0,
            relative_threshold: 10.0,
            min_score: 80.0,
            bypass_categories: vec![SignalCategory::VdkRisk],
            bypass_severities: vec![Severity::Critical],
        }
    }

    /// The default balance between noise and coverage.
    pub fn standard() -> Self {
        Self {
            name: "standard",
            absolute_threshold: 2_500.0,
            relative_threshold: 5.0,
            min_score: 65.0,
            bypass_categories: vec![SignalCategory::VdkRisk, SignalCategory::CashIntegrity],
            bypass_severities: vec![Severity::Critical, Severity::High],
        }
    }

    /// Most lenient preset: surfaces nearly everything explainable.
    pub fn aggressive() -> Self {
        Self {
            name: "aggressive",
            absolute_threshold: 500.0,
            relative_threshold: 2.0,
            min_score: 45.0,
            bypass_categories: vec![
                SignalCategory::VdkRisk,
                SignalCategory::CashIntegrity,
                SignalCategory::DataQuality,
            ],
            bypass_severities: vec![Severity::Critical, Severity::High, Severity::Medium],
        }
    }

    /// Fail fast on a malformed preset; this is a caller bug, not data.
    pub fn validate(&self) -> Result<(), PresetError> {
        if self.absolute_threshold < 0.0 {
            return Err(PresetError::NegativeThreshold {
                preset: self.name,
                name: "absolute_threshold",
                value: self.absolute_threshold,
            });
        }
        if self.relative_threshold < 0.0 {
            return Err(PresetError::NegativeThreshold {
                preset: self.name,
                name: "relative_threshold",
                value: self.relative_threshold,
            });
        }
        if !(0.0..=100.0).contains(&self.min_score) {
            return Err(PresetError::ScoreOutOfRange {
                preset: self.name,
                value: self.min_score,
            });
        }
        Ok(())
    }

    /// The gate predicate, evaluated in fixed order: category bypass,
    /// severity bypass, absolute amount, relative percentage, score.
    pub fn passes(&self, candidate: &CandidateSignal) -> bool {
        if self.bypass_categories.contains(&candidate.category) {
            return true;
        }
        if self.bypass_severities.contains(&candidate.severity) {
            return true;
        }
        if candidate.impact.amount.unwrap_or(0.0).abs() >= self.absolute_threshold {
            return true;
        }
        if candidate.impact.percentage.unwrap_or(0.0).abs() >= self.relative_threshold {
            return true;
        }
        candidate.score >= self.min_score
    }
}

/// Partition of candidates into kept and rejected-count.
pub struct GateOutcome {
    pub kept: Vec<CandidateSignal>,
    pub rejected: usize,
}

/// Apply the preset to every candidate, keeping input order.
pub fn apply(preset: &MaterialityPreset, candidates: Vec<CandidateSignal>) -> GateOutcome {
    let total = candidates.len();
    let kept: Vec<CandidateSignal> = candidates
        .into_iter()
        .filter(|c| {
            let ok = preset.passes(c);
            if !ok {
                debug!(
                    "materiality gate ({}) dropped {} (key {})",
                    preset.name, c.rule_name, c.dedupe_key
                );
            }
            ok
        })
        .collect();
    GateOutcome {
        rejected: total - kept.len(),
        kept,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        ActionKind, EvidenceKind, EvidenceRef, ImpactEstimate, SuggestedAction,
    };

    fn candidate(
        category: SignalCategory,
        severity: Severity,
        score: f64,
        impact: ImpactEstimate,
    ) -> CandidateSignal {
        CandidateSignal {
            category,
            severity,
            score,
            impact,
            title: "test".into(),
            summary: "test".into(),
            justification: "yeterince uzun bir gerekçe".into(),
            evidence: vec![EvidenceRef {
                id: "e1".into(),
                kind: EvidenceKind::LedgerRow,
                label: "mizan".into(),
                locator: None,
            }],
            actions: vec![SuggestedAction {
                id: "a1".into(),
                label: "incele".into(),
                kind: ActionKind::OpenAccount,
                target: None,
                payload: None,
            }],
            snoozeable: true,
            dedupe_key: "k".into(),
            rule_name: "TestRule".into(),
        }
    }

    #[test]
    fn shipped_presets_validate() {
        MaterialityPreset::conservative().validate().unwrap();
        MaterialityPreset::standard().validate().unwrap();
        MaterialityPreset::aggressive().validate().unwrap();
    }

    #[test]
    fn invalid_presets_fail_fast() {
        let mut preset = MaterialityPreset::standard();
        preset.absolute_threshold = -1.0;
        assert!(preset.validate().is_err());

        let mut preset = MaterialityPreset::standard();
        preset.min_score = 120.0;
        assert!(preset.validate().is_err());
    }

    #[test]
    fn category_bypass_ignores_size() {
        let preset = MaterialityPreset::standard();
        let c = candidate(
            SignalCategory::VdkRisk,
            Severity::Info,
            5.0,
            ImpactEstimate::amount(1.0),
        );
        assert!(preset.passes(&c));
    }

    #[test]
    fn severity_bypass_ignores_size() {
        let preset = MaterialityPreset::standard();
        let c = candidate(
            SignalCategory::PeriodAnomaly,
            Severity::High,
            5.0,
            ImpactEstimate::amount(1.0),
        );
        assert!(preset.passes(&c));
    }

    #[test]
    fn absolute_threshold_is_inclusive_and_signed() {
        let preset = MaterialityPreset::standard();
        let at = candidate(
            SignalCategory::PeriodAnomaly,
            Severity::Low,
            5.0,
            ImpactEstimate::amount(2_500.0),
        );
        assert!(preset.passes(&at));
        let negative = candidate(
            SignalCategory::PeriodAnomaly,
            Severity::Low,
            5.0,
            ImpactEstimate::amount(-3_000.0),
        );
        assert!(preset.passes(&negative), "|amount| is what counts");
        let below = candidate(
            SignalCategory::PeriodAnomaly,
            Severity::Low,
            5.0,
            ImpactEstimate::amount(2_499.0),
        );
        assert!(!preset.passes(&below));
    }

    #[test]
    fn relative_threshold_rescues_small_amounts() {
        let preset = MaterialityPreset::standard();
        let c = candidate(
            SignalCategory::PeriodAnomaly,
            Severity::Low,
            5.0,
            ImpactEstimate {
                amount: Some(100.0),
                percentage: Some(6.0),
                points: None,
            },
        );
        assert!(preset.passes(&c));
    }

    #[test]
    fn score_is_the_last_resort() {
        let preset = MaterialityPreset::standard();
        let c = candidate(
            SignalCategory::PeriodAnomaly,
            Severity::Low,
            70.0,
            ImpactEstimate::default(),
        );
        assert!(preset.passes(&c));
        let weak = candidate(
            SignalCategory::PeriodAnomaly,
            Severity::Low,
            40.0,
            ImpactEstimate::default(),
        );
        assert!(!preset.passes(&weak));
    }

    #[test]
    fn removing_a_bypass_never_increases_the_pass_count() {
        // Gate monotonicity for the bypassed category.
        let with_bypass = MaterialityPreset::standard();
        let mut without_bypass = MaterialityPreset::standard();
        without_bypass
            .bypass_categories
            .retain(|c| *c != SignalCategory::CashIntegrity);

        let candidates: Vec<CandidateSignal> = (0..10)
            .map(|i| {
                candidate(
                    SignalCategory::CashIntegrity,
                    Severity::Low,
                    f64::from(i) * 10.0,
                    ImpactEstimate::amount(f64::from(i) * 400.0),
                )
            })
            .collect();

        let passed_with = candidates.iter().filter(|c| with_bypass.passes(c)).count();
        let passed_without = candidates
            .iter()
            .filter(|c| without_bypass.passes(c))
            .count();
        assert!(passed_without <= passed_with);
    }

    #[test]
    fn presets_are_strictly_ordered_by_leniency() {
        // A candidate the conservative preset drops but standard keeps.
        let c = candidate(
            SignalCategory::PeriodAnomaly,
            Severity::Medium,
            66.0,
            ImpactEstimate::amount(3_000.0),
        );
        assert!(!MaterialityPreset::conservative().passes(&c));
        assert!(MaterialityPreset::standard().passes(&c));
        assert!(MaterialityPreset::aggressive().passes(&c));
    }
}
