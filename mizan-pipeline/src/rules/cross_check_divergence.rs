//! Ledger-vs-external divergence above tolerance.
//!
//! Fires when the two sides of a cross-check disagree by 5% or more of the
//! external value, escalating at 10% and 20%. Declaration-backed
//! comparisons additionally cost VDK risk points, since a mismatch against
//! a filed declaration is what a desk audit starts from. Comparisons whose
//! external side never arrived are not this rule's business — see
//! `CrossCheckMissingSourceRule`.

use crate::error::RuleError;
use crate::rule::SignalRule;
use crate::types::{
    ActionKind, CandidateSignal, DomainRecord, EvidenceKind, EvidenceRef, ImpactEstimate,
    ReviewScope, SignalCategory, SuggestedAction,
};
use mizan_crosscheck::Severity;

/// Divergence (percent of the external value) at which the rule fires.
const DIVERGENCE_MEDIUM: f64 = 5.0;
const DIVERGENCE_HIGH: f64 = 10.0;
const DIVERGENCE_CRITICAL: f64 = 20.0;
/// VDK risk points for a declaration-backed mismatch.
const DECLARATION_POINTS: f64 = -10.0;

pub struct CrossCheckDivergenceRule;

impl SignalRule for CrossCheckDivergenceRule {
    fn matches(&self, record: &DomainRecord) -> bool {
        matches!(record, DomainRecord::CrossCheck(_))
    }

    fn evaluate(
        &self,
        record: &DomainRecord,
        _scope: &ReviewScope,
    ) -> Result<Option<CandidateSignal>, RuleError> {
        let DomainRecord::CrossCheck(item) = record else {
            return Ok(None);
        };
        // No usable external value: the missing-source rule covers it.
        match item.external_value {
            Some(v) if v != 0.0 => {}
            _ => return Ok(None),
        }

        let percent = item.difference_percent;
        let (severity, score) = if percent > DIVERGENCE_CRITICAL {
            (Severity::Critical, 85.0)
        } else if percent > DIVERGENCE_HIGH {
            (Severity::High, 70.0)
        } else if percent >= DIVERGENCE_MEDIUM {
            (Severity::Medium, 55.0)
        } else {
            return Ok(None);
        };
        let amount = item.difference.abs();

        Ok(Some(CandidateSignal {
            category: SignalCategory::CrossCheck,
            severity,
            score,
            impact: ImpactEstimate {
                amount: Some(amount),
                percentage: Some(percent),
                points: item.kind.is_declaration().then_some(DECLARATION_POINTS),
            },
            title: format!("{} ile mizan uyuşmuyor", item.kind),
            summary: format!(
                "{} hesabı {} değerinden %{:.1} sapıyor.",
                item.account_code, item.source_label, percent
            ),
            justification: format!(
                "{} hesabındaki {:.2} tutarı, {} kaynağındaki {:.2} tutarından {:.2} \
                 (%{:.1}) sapıyor; %{:.0} eşiğinin üzerindeki sapmalar kalem bazında \
                 mutabakat gerektirir.",
                item.account_code,
                item.ledger_value,
                item.source_label,
                item.external_value.unwrap_or(0.0),
                amount,
                percent,
                DIVERGENCE_MEDIUM
            ),
            evidence: vec![
                EvidenceRef {
                    id: format!("mizan-{}", item.account_code),
                    kind: EvidenceKind::LedgerRow,
                    label: format!(
                        "{} mizan değeri {:.2}",
                        item.account_code, item.ledger_value
                    ),
                    locator: Some(format!("mizan:{}", item.account_code)),
                },
                EvidenceRef {
                    id: format!("source-{}", item.account_code),
                    kind: EvidenceKind::ExternalSource,
                    label: format!(
                        "{}: {:.2}",
                        item.source_label,
                        item.external_value.unwrap_or(0.0)
                    ),
                    locator: None,
                },
            ],
            actions: vec![SuggestedAction {
                id: format!("crosscheck-{}", item.account_code),
                label: format!("{} karşılaştırma detayını aç", item.kind),
                kind: ActionKind::OpenCrossCheck,
                target: Some(format!("crosscheck:{}", item.account_code)),
                payload: Some(serde_json::json!({
                    "account": item.account_code,
                    "difference": amount,
                })),
            }],
            snoozeable: true,
            dedupe_key: format!("crosscheck-divergence:{}", item.account_code),
            rule_name: self.name().to_string(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mizan_crosscheck::types::{ComparisonKind, CrossCheckItem};

    fn scope() -> ReviewScope {
        ReviewScope {
            tenant_id: "t".into(),
            client_id: "c".into(),
            period: "2026-01".into(),
            turnover: None,
            paid_in_capital: None,
        }
    }

    fn item(kind: ComparisonKind, ledger: f64, external: Option<f64>, percent: f64) -> DomainRecord {
        DomainRecord::CrossCheck(CrossCheckItem {
            kind,
            account_code: "191".into(),
            ledger_value: ledger,
            external_value: external,
            difference: ledger - external.unwrap_or(0.0),
            difference_percent: percent,
            source_label: "Ocak KDV beyannamesi".into(),
        })
    }

    #[test]
    fn divergence_bands_escalate_severity() {
        let rule = CrossCheckDivergenceRule;

        let medium = rule
            .evaluate(
                &item(ComparisonKind::VatDeclaration, 107_000.0, Some(100_000.0), 7.0),
                &scope(),
            )
            .unwrap()
            .expect("7% should fire");
        assert_eq!(medium.severity, Severity::Medium);
        assert_eq!(medium.score, 55.0);

        let high = rule
            .evaluate(
                &item(ComparisonKind::VatDeclaration, 115_000.0, Some(100_000.0), 15.0),
                &scope(),
            )
            .unwrap()
            .unwrap();
        assert_eq!(high.severity, Severity::High);
        assert_eq!(high.score, 70.0);

        let critical = rule
            .evaluate(
                &item(ComparisonKind::VatDeclaration, 125_000.0, Some(100_000.0), 25.0),
                &scope(),
            )
            .unwrap()
            .unwrap();
        assert_eq!(critical.severity, Severity::Critical);
        assert_eq!(critical.score, 85.0);
    }

    #[test]
    fn five_percent_boundary_is_inclusive() {
        let signal = CrossCheckDivergenceRule
            .evaluate(
                &item(ComparisonKind::BankReconciliation, 105_000.0, Some(100_000.0), 5.0),
                &scope(),
            )
            .unwrap();
        assert!(signal.is_some(), "at-threshold divergence fires");
    }

    #[test]
    fn declaration_kinds_carry_vdk_points() {
        let declaration = CrossCheckDivergenceRule
            .evaluate(
                &item(ComparisonKind::VatDeclaration, 107_000.0, Some(100_000.0), 7.0),
                &scope(),
            )
            .unwrap()
            .unwrap();
        assert_eq!(declaration.impact.points, Some(-10.0));

        let bank = CrossCheckDivergenceRule
            .evaluate(
                &item(ComparisonKind::BankReconciliation, 107_000.0, Some(100_000.0), 7.0),
                &scope(),
            )
            .unwrap()
            .unwrap();
        assert_eq!(bank.impact.points, None);
    }

    #[test]
    fn missing_external_value_is_not_this_rules_business() {
        let signal = CrossCheckDivergenceRule
            .evaluate(
                &item(ComparisonKind::VatDeclaration, 107_000.0, None, 100.0),
                &scope(),
            )
            .unwrap();
        assert!(signal.is_none());
        let zeroed = CrossCheckDivergenceRule
            .evaluate(
                &item(ComparisonKind::VatDeclaration, 107_000.0, Some(0.0), 100.0),
                &scope(),
            )
            .unwrap();
        assert!(zeroed.is_none());
    }

    #[test]
    fn small_divergence_is_quiet() {
        let signal = CrossCheckDivergenceRule
            .evaluate(
                &item(ComparisonKind::BankReconciliation, 101_840.0, Some(100_000.0), 1.84),
                &scope(),
            )
            .unwrap();
        assert!(signal.is_none());
    }

    #[test]
    fn justification_quotes_both_sides() {
        let signal = CrossCheckDivergenceRule
            .evaluate(
                &item(ComparisonKind::VatDeclaration, 107_000.0, Some(100_000.0), 7.0),
                &scope(),
            )
            .unwrap()
            .unwrap();
        assert!(signal.justification.contains("107000.00"));
        assert!(signal.justification.contains("100000.00"));
        assert!(signal.justification.contains("Ocak KDV beyannamesi"));
    }
}
