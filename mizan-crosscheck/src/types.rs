//! Shared domain model for cross-check review.
//!
//! Everything here is plain data handed over by the caller layer: the
//! upstream boundary has already validated and normalized the records, so
//! the engine can assume well-typed values throughout. No type in this
//! module carries behaviour beyond small presentation helpers.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Severity
// ---------------------------------------------------------------------------

/// Finding severity with an explicit total order.
///
/// Variants are declared ascending so the derived `Ord` ranks
/// `Critical` highest; the feed ordering and the merge-severity floor both
/// rely on this being a closed, totally ordered enum rather than a string
/// comparison.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// All severities, weakest first.
    pub const ALL: [Severity; 5] = [
        Severity::Info,
        Severity::Low,
        Severity::Medium,
        Severity::High,
        Severity::Critical,
    ];

    /// Numeric rank used by the feed sort: `Info` = 0 … `Critical` = 4.
    pub fn rank(&self) -> u8 {
        match self {
            Severity::Info => 0,
            Severity::Low => 1,
            Severity::Medium => 2,
            Severity::High => 3,
            Severity::Critical => 4,
        }
    }

    /// Upper-case wire label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Low => "LOW",
            Severity::Medium => "MEDIUM",
            Severity::High => "HIGH",
            Severity::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Check status
// ---------------------------------------------------------------------------

/// Outcome of a single cross-check run, as reported by the comparison layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    Pass,
    Fail,
    Warning,
    Skipped,
    NoData,
}

impl CheckStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckStatus::Pass => "PASS",
            CheckStatus::Fail => "FAIL",
            CheckStatus::Warning => "WARNING",
            CheckStatus::Skipped => "SKIPPED",
            CheckStatus::NoData => "NO_DATA",
        }
    }

    /// A check that never ran or had nothing to compare against.
    pub fn is_missing_data(&self) -> bool {
        matches!(self, CheckStatus::NoData | CheckStatus::Skipped)
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Cross-check records
// ---------------------------------------------------------------------------

/// What kind of external source a ledger value is compared against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonKind {
    /// VAT declaration (KDV beyannamesi) vs. ledger VAT accounts.
    VatDeclaration,
    /// Withholding declaration (muhtasar) vs. payroll/tax accounts.
    WithholdingDeclaration,
    /// Bank statement balance vs. ledger 102 accounts.
    BankReconciliation,
    /// Counterparty statement (cari mutabakat) vs. receivable/payable accounts.
    CounterpartyReconciliation,
    /// Stamp duty declaration vs. ledger stamp duty accounts.
    StampDutyDeclaration,
}

impl ComparisonKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComparisonKind::VatDeclaration => "KDV Beyannamesi",
            ComparisonKind::WithholdingDeclaration => "Muhtasar Beyanname",
            ComparisonKind::BankReconciliation => "Banka Mutabakatı",
            ComparisonKind::CounterpartyReconciliation => "Cari Mutabakat",
            ComparisonKind::StampDutyDeclaration => "Damga Vergisi Beyannamesi",
        }
    }

    /// Declaration-backed comparisons carry tax-audit (VDK) exposure.
    pub fn is_declaration(&self) -> bool {
        matches!(
            self,
            ComparisonKind::VatDeclaration
                | ComparisonKind::WithholdingDeclaration
                | ComparisonKind::StampDutyDeclaration
        )
    }
}

impl fmt::Display for ComparisonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single ledger-vs-external comparison fact, as the rule engine sees it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CrossCheckItem {
    pub kind: ComparisonKind,
    /// Ledger account code the comparison is anchored on (e.g. "191").
    pub account_code: String,
    /// Value carried by our own ledger.
    pub ledger_value: f64,
    /// Value reported by the external source, when it delivered one.
    pub external_value: Option<f64>,
    /// `|ledger − external|`, pre-computed at the boundary.
    pub difference: f64,
    /// Difference as a percent of the external value, non-negative.
    pub difference_percent: f64,
    /// Human-readable label of the external source ("Ocak KDV beyannamesi").
    pub source_label: String,
}

/// Allowed slack for a cross-check before a mismatch counts as real.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct Tolerance {
    pub amount: f64,
    pub percent: f64,
}

/// The fully evaluated outcome of one cross-check, ready for enrichment.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CrossCheckResult {
    /// Stable identifier of the check ("kdv_beyanname_191", "banka_102").
    pub check_id: String,
    pub check_name: String,
    pub status: CheckStatus,
    pub severity: Severity,
    pub source_label: String,
    pub target_label: String,
    pub source_value: Option<f64>,
    pub target_value: Option<f64>,
    /// `source − target`, signed.
    pub difference: f64,
    /// Divergence as a non-negative percent of the target value.
    pub difference_percent: f64,
    pub tolerance: Tolerance,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
    /// Free-form evidence captured by the comparison layer, keyed by label.
    /// BTreeMap keeps serialization order deterministic.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub evidence: BTreeMap<String, String>,
}

impl CrossCheckResult {
    /// True when the given side delivered a usable (non-zero) figure.
    pub fn has_source_value(&self) -> bool {
        self.source_value.map_or(false, |v| v != 0.0)
    }

    pub fn has_target_value(&self) -> bool {
        self.target_value.map_or(false, |v| v != 0.0)
    }
}

// ---------------------------------------------------------------------------
// Reviewer decisions
// ---------------------------------------------------------------------------

/// The reviewing accountant's disposition on one cross-check finding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionVerdict {
    Accepted,
    Rejected,
    UnderReview,
}

impl DecisionVerdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionVerdict::Accepted => "accepted",
            DecisionVerdict::Rejected => "rejected",
            DecisionVerdict::UnderReview => "under_review",
        }
    }
}

impl fmt::Display for DecisionVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A persisted reviewer decision, loaded by the caller and merged read-only.
///
/// The engine never writes these; `decided_at` is whatever timestamp the
/// persistence layer recorded, kept as an opaque string.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserDecision {
    pub check_id: String,
    pub verdict: DecisionVerdict,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub decided_at: String,
}
