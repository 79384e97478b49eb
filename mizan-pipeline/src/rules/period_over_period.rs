//! Period-over-period balance anomaly.
//!
//! Applies to every account that carries a prior-period balance: a net
//! balance that moved by more than half of its prior value is worth a look,
//! and severity escalates as the swing doubles and quadruples. Accounts
//! without history, or with a prior balance of exactly zero, are skipped —
//! there is no base to measure against.

use crate::error::RuleError;
use crate::rule::SignalRule;
use crate::types::{
    ActionKind, CandidateSignal, DomainRecord, EvidenceKind, EvidenceRef, ImpactEstimate,
    ReviewScope, SignalCategory, SuggestedAction,
};
use mizan_crosscheck::Severity;

/// Relative change at which the rule starts firing.
const CHANGE_LOW: f64 = 0.50;
const CHANGE_MEDIUM: f64 = 1.00;
const CHANGE_HIGH: f64 = 2.00;

pub struct PeriodOverPeriodRule;

impl SignalRule for PeriodOverPeriodRule {
    fn account_prefixes(&self) -> &[&str] {
        // The empty prefix matches every account code.
        &[""]
    }

    fn evaluate(
        &self,
        record: &DomainRecord,
        _scope: &ReviewScope,
    ) -> Result<Option<CandidateSignal>, RuleError> {
        let DomainRecord::Balance(balance) = record else {
            return Ok(None);
        };
        let Some(prior) = balance.prior_net_balance else {
            return Ok(None);
        };
        if prior == 0.0 {
            return Ok(None);
        }

        let swing = (balance.net_balance - prior).abs();
        let change = swing / prior.abs();
        let (severity, score) = if change > CHANGE_HIGH {
            (Severity::High, 70.0)
        } else if change > CHANGE_MEDIUM {
            (Severity::Medium, 55.0)
        } else if change > CHANGE_LOW {
            (Severity::Low, 40.0)
        } else {
            return Ok(None);
        };
        let change_percent = change * 100.0;

        Ok(Some(CandidateSignal {
            category: SignalCategory::PeriodAnomaly,
            severity,
            score,
            impact: ImpactEstimate {
                amount: Some(swing),
                percentage: Some(change_percent),
                points: None,
            },
            title: format!("{} bakiyesinde sıra dışı dönemsel değişim", balance.code),
            summary: format!(
                "{} bakiyesi önceki döneme göre %{:.0} değişti.",
                balance.code, change_percent
            ),
            justification: format!(
                "{} ({}) hesabının net bakiyesi önceki dönemdeki {:.2} seviyesinden {:.2} \
                 seviyesine geldi (%{:.1} değişim); bu büyüklükte bir sıçrama sınıflandırma \
                 hatası veya olağan dışı bir işlem olabilir.",
                balance.code, balance.name, prior, balance.net_balance, change_percent
            ),
            evidence: vec![
                EvidenceRef {
                    id: format!("mizan-{}", balance.code),
                    kind: EvidenceKind::LedgerRow,
                    label: format!("{} cari dönem bakiyesi {:.2}", balance.code, balance.net_balance),
                    locator: Some(format!("mizan:{}", balance.code)),
                },
                EvidenceRef {
                    id: format!("prior-{}", balance.code),
                    kind: EvidenceKind::PriorPeriod,
                    label: format!("{} önceki dönem bakiyesi {:.2}", balance.code, prior),
                    locator: None,
                },
            ],
            actions: vec![SuggestedAction {
                id: format!("open-{}", balance.code),
                label: format!("{} hesabının dönem hareketlerini karşılaştır", balance.code),
                kind: ActionKind::OpenAccount,
                target: Some(format!("account:{}", balance.code)),
                payload: None,
            }],
            snoozeable: true,
            dedupe_key: format!("period-anomaly:{}", balance.code),
            rule_name: self.name().to_string(),
        }))
    }
}
