//! The production rule set, one file per rule.
//!
//! Every rule keeps its thresholds as local constants next to the logic
//! they serve, and every emitted candidate carries a number-bearing
//! justification, typed evidence, and at least one concrete next step.

pub mod cash_credit_balance;
pub mod cross_check_divergence;
pub mod cross_check_missing_source;
pub mod partner_receivables;
pub mod period_over_period;

pub use cash_credit_balance::CashCreditBalanceRule;
pub use cross_check_divergence::CrossCheckDivergenceRule;
pub use cross_check_missing_source::CrossCheckMissingSourceRule;
pub use partner_receivables::PartnerReceivablesRule;
pub use period_over_period::PeriodOverPeriodRule;
