//! Cross-check with a silent external side.
//!
//! The ledger carries a value but the external source delivered nothing (or
//! an exact zero) — the comparison cannot be trusted either way until the
//! document shows up. A data-quality finding rather than a divergence one:
//! the right next step is to request the document, not to reconcile.

use crate::error::RuleError;
use crate::rule::SignalRule;
use crate::types::{
    ActionKind, CandidateSignal, DomainRecord, EvidenceKind, EvidenceRef, ImpactEstimate,
    ReviewScope, SignalCategory, SuggestedAction,
};
use mizan_crosscheck::Severity;

const SCORE: f64 = 50.0;

pub struct CrossCheckMissingSourceRule;

impl SignalRule for CrossCheckMissingSourceRule {
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
        let external_missing = item.external_value.map_or(true, |v| v == 0.0);
        if !external_missing || item.ledger_value == 0.0 {
            return Ok(None);
        }
        let exposure = item.ledger_value.abs();

        Ok(Some(CandidateSignal {
            category: SignalCategory::DataQuality,
            severity: Severity::Medium,
            score: SCORE,
            impact: ImpactEstimate::amount(exposure),
            title: format!("{} için kaynak belge yok", item.kind),
            summary: format!(
                "{} hesabı karşılaştırılamadı: {} tarafı boş.",
                item.account_code, item.source_label
            ),
            justification: format!(
                "{} hesabı mizanda {:.2} tutarı taşıyor ama {} kaynağından karşılık gelen \
                 bir değer gelmedi; {:.2} tutarlık bakiye doğrulanamıyor.",
                item.account_code, item.ledger_value, item.source_label, exposure
            ),
            evidence: vec![EvidenceRef {
                id: format!("missing-{}", item.account_code),
                kind: EvidenceKind::MissingDocument,
                label: format!("{} bu dönem için yüklenmemiş", item.source_label),
                locator: None,
            }],
            actions: vec![SuggestedAction {
                id: format!("request-{}", item.account_code),
                label: format!("{} belgesini talep et", item.source_label),
                kind: ActionKind::RequestDocument,
                target: None,
                payload: None,
            }],
            snoozeable: true,
            dedupe_key: format!("crosscheck-missing:{}", item.account_code),
            rule_name: self.name().to_string(),
        }))
    }
}
