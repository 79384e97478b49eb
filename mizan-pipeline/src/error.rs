//! Pipeline error types.
//!
//! Every failure mode has a named variant. No stringly-typed errors.
//!
//! `RuleError` is the only error a rule may return; the evaluation loop
//! catches it per rule-per-record and keeps going. `PresetError` is a
//! caller contract violation and fails fast at pipeline construction.

use thiserror::Error;

/// A rule could not evaluate one record.
#[derive(Debug, Error)]
pub enum RuleError {
    /// An aggregate the rule needs is present but unusable (e.g. zero
    /// capital makes a ratio undefined). A merely *absent* aggregate is not
    /// an error — the rule just does not fire.
    #[error("{rule}: aggregate {aggregate} is zero, ratio undefined")]
    ZeroAggregate {
        rule: &'static str,
        aggregate: &'static str,
    },

    /// The record carries values the rule cannot interpret.
    #[error("{rule}: record {record} not evaluable: {reason}")]
    NotEvaluable {
        rule: &'static str,
        record: String,
        reason: String,
    },
}

/// Malformed pipeline configuration. Raised once, at construction.
#[derive(Debug, Error)]
pub enum PresetError {
    #[error("preset {preset}: threshold {name} must be non-negative, got {value}")]
    NegativeThreshold {
        preset: &'static str,
        name: &'static str,
        value: f64,
    },

    #[error("preset {preset}: min_score {value} outside [0, 100]")]
    ScoreOutOfRange { preset: &'static str, value: f64 },

    #[error("capacity must be at least 1")]
    ZeroCapacity,
}
