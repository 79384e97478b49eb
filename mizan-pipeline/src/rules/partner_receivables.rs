//! Partner receivables measured against paid-in capital.
//!
//! Money lent to partners (131 short-term, 231 long-term) is a classic
//! disguised profit distribution; auditors flag it once it grows out of
//! proportion to the company's capital. Severity escalates with the
//! receivable-to-capital ratio.
//!
//! The rule needs the paid-in capital aggregate from the scope: absent
//! capital means the rule simply does not fire, while a capital of exactly
//! zero makes the ratio undefined and is reported as a fault.

use crate::error::RuleError;
use crate::rule::SignalRule;
use crate::types::{
    ActionKind, CandidateSignal, DomainRecord, EvidenceKind, EvidenceRef, ImpactEstimate,
    ReviewScope, SignalCategory, SuggestedAction,
};
use mizan_crosscheck::Severity;

/// Ratio of receivable to capital at which the rule starts firing.
const RATIO_MEDIUM: f64 = 0.10;
const RATIO_HIGH: f64 = 0.25;
const RATIO_CRITICAL: f64 = 0.50;
/// VDK risk points once the ratio reaches the high band.
const VDK_POINTS: f64 = -10.0;

pub struct PartnerReceivablesRule;

impl SignalRule for PartnerReceivablesRule {
    fn account_prefixes(&self) -> &[&str] {
        &["131", "231"]
    }

    fn evaluate(
        &self,
        record: &DomainRecord,
        scope: &ReviewScope,
    ) -> Result<Option<CandidateSignal>, RuleError> {
        let DomainRecord::Balance(balance) = record else {
            return Ok(None);
        };
        // No capital figure, no ratio — a data gap, not a fault.
        let Some(capital) = scope.paid_in_capital else {
            return Ok(None);
        };
        if capital == 0.0 {
            return Err(RuleError::ZeroAggregate {
                rule: "PartnerReceivablesRule",
                aggregate: "paid_in_capital",
            });
        }

        let receivable = balance.net_balance.abs();
        let ratio = receivable / capital.abs();
        let (severity, score) = if ratio > RATIO_CRITICAL {
            (Severity::Critical, 90.0)
        } else if ratio > RATIO_HIGH {
            (Severity::High, 75.0)
        } else if ratio > RATIO_MEDIUM {
            (Severity::Medium, 60.0)
        } else {
            return Ok(None);
        };
        let ratio_percent = ratio * 100.0;

        Ok(Some(CandidateSignal {
            category: SignalCategory::PartnerAccounts,
            severity,
            score,
            impact: ImpactEstimate {
                amount: Some(receivable),
                percentage: Some(ratio_percent),
                points: (severity >= Severity::High).then_some(VDK_POINTS),
            },
            title: format!("{} ortak alacağı sermayeye oranla yüksek", balance.code),
            summary: format!(
                "Ortaklardan alacaklar ödenmiş sermayenin %{:.1}'i seviyesinde.",
                ratio_percent
            ),
            justification: format!(
                "{} ({}) hesabındaki {:.2} tutarındaki alacak, {:.2} tutarındaki ödenmiş \
                 sermayenin %{:.1}'ine denk geliyor; %{:.0} eşiğinin üzerindeki oranlar örtülü \
                 kazanç dağıtımı şüphesi doğurur.",
                balance.code,
                balance.name,
                receivable,
                capital,
                ratio_percent,
                RATIO_MEDIUM * 100.0
            ),
            evidence: vec![
                EvidenceRef {
                    id: format!("mizan-{}", balance.code),
                    kind: EvidenceKind::LedgerRow,
                    label: format!("{} mizan satırı: net bakiye {:.2}", balance.code, receivable),
                    locator: Some(format!("mizan:{}", balance.code)),
                },
                EvidenceRef {
                    id: format!("ratio-{}", balance.code),
                    kind: EvidenceKind::Calculation,
                    label: format!(
                        "{:.2} / {:.2} = %{:.1}",
                        receivable, capital, ratio_percent
                    ),
                    locator: None,
                },
            ],
            actions: vec![
                SuggestedAction {
                    id: format!("open-{}", balance.code),
                    label: format!("{} hesabının hareketlerini incele", balance.code),
                    kind: ActionKind::OpenAccount,
                    target: Some(format!("account:{}", balance.code)),
                    payload: None,
                },
                SuggestedAction {
                    id: "review-kvk-13".into(),
                    label: "Örtülü kazanç dağıtımı düzenlemesini gözden geçir (KVK 13)".into(),
                    kind: ActionKind::ReviewRegulation,
                    target: None,
                    payload: None,
                },
            ],
            snoozeable: true,
            dedupe_key: format!("partner-capital:{}", balance.code),
            rule_name: self.name().to_string(),
        }))
    }
}
