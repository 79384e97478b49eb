//! The rule trait and the fault-tolerant evaluation loop.
//!
//! Rules are stateless, side-effect-free predicates over single records: a
//! record may match several rules and every match is evaluated
//! independently. A rule returning `Err` poisons nothing — the fault is
//! recorded with the rule and record it came from, and evaluation continues
//! for every remaining rule/record pair.

use log::{debug, warn};
use serde::Serialize;

use crate::error::RuleError;
use crate::types::{CandidateSignal, DomainRecord, ReviewScope};
use crate::util;

/// A single named rule over one domain record.
pub trait SignalRule {
    /// Account-code prefixes this rule applies to. An empty slice means the
    /// rule is not an account rule (cross-check rules override `matches`
    /// instead).
    fn account_prefixes(&self) -> &[&str] {
        &[]
    }

    /// Decide if this rule should examine the given record. The default
    /// matches balance records whose code starts with one of the declared
    /// prefixes, and no cross-check records.
    fn matches(&self, record: &DomainRecord) -> bool {
        match record {
            DomainRecord::Balance(balance) => {
                let prefixes = self.account_prefixes();
                !prefixes.is_empty() && prefixes.iter().any(|p| balance.code.starts_with(p))
            }
            DomainRecord::CrossCheck(_) => false,
        }
    }

    /// Examine one record. `Ok(None)` means the rule looked and found
    /// nothing — the common case. `Err` is a recorded fault, never a stop.
    fn evaluate(
        &self,
        record: &DomainRecord,
        scope: &ReviewScope,
    ) -> Result<Option<CandidateSignal>, RuleError>;

    /// Returns a stable name for logging and fault reports.
    fn name(&self) -> &str {
        util::short_type_name(std::any::type_name::<Self>())
    }
}

/// One rule-per-record evaluation failure, reported alongside the results.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EvaluationFault {
    pub rule: String,
    pub record_key: String,
    pub message: String,
}

/// Everything one evaluation pass produced.
#[derive(Debug, Default)]
pub struct Evaluation {
    pub candidates: Vec<CandidateSignal>,
    pub faults: Vec<EvaluationFault>,
}

/// An ordered collection of rules evaluated together.
pub struct RuleSet {
    rules: Vec<Box<dyn SignalRule>>,
}

impl RuleSet {
    pub fn new(rules: Vec<Box<dyn SignalRule>>) -> Self {
        Self { rules }
    }

    /// The five production rules, in their canonical order.
    pub fn standard() -> Self {
        use crate::rules::{
            CashCreditBalanceRule, CrossCheckDivergenceRule, CrossCheckMissingSourceRule,
            PartnerReceivablesRule, PeriodOverPeriodRule,
        };
        Self::new(vec![
            Box::new(CashCreditBalanceRule),
            Box::new(PartnerReceivablesRule),
            Box::new(PeriodOverPeriodRule),
            Box::new(CrossCheckDivergenceRule),
            Box::new(CrossCheckMissingSourceRule),
        ])
    }

    pub fn push(&mut self, rule: Box<dyn SignalRule>) {
        self.rules.push(rule);
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Evaluate every matching rule against every record.
    pub fn evaluate(&self, records: &[DomainRecord], scope: &ReviewScope) -> Evaluation {
        let mut evaluation = Evaluation::default();
        for record in records {
            for rule in self.rules.iter().filter(|r| r.matches(record)) {
                match rule.evaluate(record, scope) {
                    Ok(Some(candidate)) => evaluation.candidates.push(candidate),
                    Ok(None) => {}
                    Err(err) => {
                        let fault = EvaluationFault {
                            rule: rule.name().to_string(),
                            record_key: record.record_key(),
                            message: err.to_string(),
                        };
                        warn!(
                            "rule fault: {} on record {}: {}",
                            fault.rule, fault.record_key, fault.message
                        );
                        evaluation.faults.push(fault);
                    }
                }
            }
        }
        debug!(
            "rule evaluation: {} records -> {} candidates, {} faults",
            records.len(),
            evaluation.candidates.len(),
            evaluation.faults.len()
        );
        evaluation
    }
}
