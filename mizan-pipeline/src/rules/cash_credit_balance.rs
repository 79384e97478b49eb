//! Cash accounts can never carry a credit balance.
//!
//! Physical cash (100) and exchange-held cash (108) cannot go below zero;
//! a credit-direction balance means overstated expenses, unrecorded income,
//! or a backdated entry — all of which draw a tax auditor's eye first. This
//! is a single-threshold rule: anything above the noise floor is critical
//! outright, there is no escalation ladder.

use crate::error::RuleError;
use crate::rule::SignalRule;
use crate::types::{
    ActionKind, BalanceDirection, CandidateSignal, DomainRecord, EvidenceKind, EvidenceRef,
    ImpactEstimate, ReviewScope, SignalCategory, SuggestedAction,
};
use mizan_crosscheck::Severity;

/// Credit balances with magnitude at or below this are treated as rounding
/// noise and ignored.
const MIN_CREDIT_MAGNITUDE: f64 = 1_000.0;
/// VDK risk points a negative cash balance costs.
const VDK_POINTS: f64 = -15.0;
const SCORE: f64 = 95.0;

pub struct CashCreditBalanceRule;

impl SignalRule for CashCreditBalanceRule {
    fn account_prefixes(&self) -> &[&str] {
        &["100", "108"]
    }

    fn evaluate(
        &self,
        record: &DomainRecord,
        _scope: &ReviewScope,
    ) -> Result<Option<CandidateSignal>, RuleError> {
        let DomainRecord::Balance(balance) = record else {
            return Ok(None);
        };
        let magnitude = balance.net_balance.abs();
        if balance.direction != BalanceDirection::Credit || magnitude <= MIN_CREDIT_MAGNITUDE {
            return Ok(None);
        }

        Ok(Some(CandidateSignal {
            category: SignalCategory::CashIntegrity,
            severity: Severity::Critical,
            score: SCORE,
            impact: ImpactEstimate {
                amount: Some(magnitude),
                percentage: None,
                points: Some(VDK_POINTS),
            },
            title: format!("{} hesabında ters bakiye", balance.code),
            summary: format!("Kasa hesabı {} alacak bakiyesi veriyor.", balance.code),
            justification: format!(
                "{} ({}) hesabı {:.2} tutarında alacak bakiyesi veriyor; fiili kasa mevcudu \
                 negatif olamayacağı için bu bakiye kayıt dışı gelir veya fazladan gider \
                 kaydına işaret eder.",
                balance.code, balance.name, magnitude
            ),
            evidence: vec![
                EvidenceRef {
                    id: format!("mizan-{}", balance.code),
                    kind: EvidenceKind::LedgerRow,
                    label: format!(
                        "{} mizan satırı: borç {:.2} / alacak {:.2}",
                        balance.code, balance.debit_total, balance.credit_total
                    ),
                    locator: Some(format!("mizan:{}", balance.code)),
                },
                EvidenceRef {
                    id: "vuk-kasa".into(),
                    kind: EvidenceKind::RuleReference,
                    label: "VUK kasa hesabı düzenlemesi: kasa alacak bakiyesi veremez".into(),
                    locator: None,
                },
            ],
            actions: vec![SuggestedAction {
                id: format!("open-{}", balance.code),
                label: format!("{} hesabının yevmiye dökümünü incele", balance.code),
                kind: ActionKind::OpenAccount,
                target: Some(format!("account:{}", balance.code)),
                payload: None,
            }],
            snoozeable: false,
            dedupe_key: format!("cash-credit:{}", balance.code),
            rule_name: self.name().to_string(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AccountBalance;

    fn scope() -> ReviewScope {
        ReviewScope {
            tenant_id: "t".into(),
            client_id: "c".into(),
            period: "2026-01".into(),
            turnover: None,
            paid_in_capital: None,
        }
    }

    fn cash(code: &str, net_balance: f64, direction: BalanceDirection) -> DomainRecord {
        DomainRecord::Balance(AccountBalance {
            code: code.into(),
            name: "Kasa".into(),
            debit_total: 10_000.0,
            credit_total: 10_000.0 - net_balance,
            net_balance,
            direction,
            prior_net_balance: None,
        })
    }

    #[test]
    fn credit_cash_above_the_floor_is_critical_95() {
        // Scenario: 45,230 credit balance on the cash account.
        let record = cash("100", -45_230.0, BalanceDirection::Credit);
        let signal = CashCreditBalanceRule
            .evaluate(&record, &scope())
            .unwrap()
            .expect("rule should fire");
        assert_eq!(signal.severity, Severity::Critical);
        assert_eq!(signal.score, 95.0);
        assert_eq!(signal.impact.amount, Some(45_230.0));
        assert_eq!(signal.impact.points, Some(-15.0));
        assert_eq!(signal.category, SignalCategory::CashIntegrity);
        assert!(!signal.snoozeable);
        assert!(signal.justification.contains("45230.00"));
        assert!(signal.evidence.len() >= 2);
        assert!(!signal.actions.is_empty());
    }

    #[test]
    fn debit_cash_never_fires() {
        let record = cash("100", 45_230.0, BalanceDirection::Debit);
        assert!(CashCreditBalanceRule
            .evaluate(&record, &scope())
            .unwrap()
            .is_none());
    }

    #[test]
    fn small_credit_balance_is_noise() {
        let record = cash("100", -800.0, BalanceDirection::Credit);
        assert!(CashCreditBalanceRule
            .evaluate(&record, &scope())
            .unwrap()
            .is_none());
    }

    #[test]
    fn floor_is_exclusive() {
        let record = cash("100", -1_000.0, BalanceDirection::Credit);
        assert!(CashCreditBalanceRule
            .evaluate(&record, &scope())
            .unwrap()
            .is_none());
    }

    #[test]
    fn applies_to_exchange_cash_too() {
        let record = cash("108", -5_500.0, BalanceDirection::Credit);
        let signal = CashCreditBalanceRule
            .evaluate(&record, &scope())
            .unwrap()
            .expect("108 is a cash prefix");
        assert_eq!(signal.dedupe_key, "cash-credit:108");
    }
}
