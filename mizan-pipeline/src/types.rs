//! Typed domain model for the signal feed pipeline.
//!
//! Records arrive as a tagged union (`DomainRecord`), already validated and
//! normalized at the boundary — the pipeline never sees duck-typed upstream
//! shapes. Everything that crosses the pipeline boundary in either
//! direction derives serde so the presentation layer can consume the
//! output directly.

use std::fmt;

use serde::{Deserialize, Serialize};

pub use mizan_crosscheck::types::{ComparisonKind, CrossCheckItem, Severity};

// ---------------------------------------------------------------------------
// Scope and records
// ---------------------------------------------------------------------------

/// Who and when the pipeline is running for, plus the aggregate figures
/// ratio rules need. Aggregates are optional: a rule that needs a missing
/// aggregate simply does not fire.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReviewScope {
    pub tenant_id: String,
    pub client_id: String,
    /// Period identifier as the caller keeps it ("2026-01").
    pub period: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub turnover: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_in_capital: Option<f64>,
}

/// Which way a trial-balance account's net balance points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceDirection {
    Debit,
    Credit,
    Balanced,
}

/// One trial-balance (mizan) line.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AccountBalance {
    /// Uniform chart-of-accounts code ("100", "131", "320.01").
    pub code: String,
    pub name: String,
    pub debit_total: f64,
    pub credit_total: f64,
    /// `debit_total − credit_total`, signed.
    pub net_balance: f64,
    pub direction: BalanceDirection,
    /// Prior period's net balance, when the caller has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prior_net_balance: Option<f64>,
}

/// The tagged union every rule evaluates against.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DomainRecord {
    Balance(AccountBalance),
    CrossCheck(CrossCheckItem),
}

impl DomainRecord {
    /// Short key identifying the record in fault reports and logs.
    pub fn record_key(&self) -> String {
        match self {
            DomainRecord::Balance(b) => b.code.clone(),
            DomainRecord::CrossCheck(c) => format!("{}@{}", c.account_code, c.source_label),
        }
    }
}

// ---------------------------------------------------------------------------
// Signal vocabulary
// ---------------------------------------------------------------------------

/// What part of the books a signal is about. Materiality bypass lists and
/// the stable signal id are keyed on this.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalCategory {
    CashIntegrity,
    PartnerAccounts,
    PeriodAnomaly,
    CrossCheck,
    DataQuality,
    VdkRisk,
}

impl SignalCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalCategory::CashIntegrity => "cash_integrity",
            SignalCategory::PartnerAccounts => "partner_accounts",
            SignalCategory::PeriodAnomaly => "period_anomaly",
            SignalCategory::CrossCheck => "cross_check",
            SignalCategory::DataQuality => "data_quality",
            SignalCategory::VdkRisk => "vdk_risk",
        }
    }
}

impl fmt::Display for SignalCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What an evidence reference points at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceKind {
    LedgerRow,
    RuleReference,
    MissingDocument,
    Calculation,
    ExternalSource,
    PriorPeriod,
}

/// A typed pointer at the fact backing a signal.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EvidenceRef {
    /// Unique within a signal; the dedupe union is keyed on this.
    pub id: String,
    pub kind: EvidenceKind,
    pub label: String,
    /// Where the caller can navigate to see the evidence ("mizan:100").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locator: Option<String>,
}

/// What a suggested action asks the reviewer to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    OpenAccount,
    OpenCrossCheck,
    RequestDocument,
    Recalculate,
    ReviewRegulation,
}

/// One concrete next step for the reviewer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SuggestedAction {
    pub id: String,
    pub label: String,
    pub kind: ActionKind,
    /// Navigation target inside the host application, when one applies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    /// Free-form payload the host passes through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<serde_json::Value>,
}

/// Estimated impact of a finding. Each field is independently optional;
/// an absent field means the rule had nothing to say about that dimension.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ImpactEstimate {
    /// Monetary exposure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    /// Relative divergence in percent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage: Option<f64>,
    /// VDK risk points (negative = exposure).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<f64>,
}

impl ImpactEstimate {
    pub fn amount(amount: f64) -> Self {
        Self {
            amount: Some(amount),
            ..Self::default()
        }
    }

    /// Field-wise combination used by dedupe bundling: amounts sum,
    /// percentages take the max, points sum. Absent fields count as zero,
    /// and a field that combines to exactly zero goes back to absent.
    pub fn merged_with(&self, other: &ImpactEstimate) -> ImpactEstimate {
        let amount = self.amount.unwrap_or(0.0) + other.amount.unwrap_or(0.0);
        let percentage = self
            .percentage
            .unwrap_or(0.0)
            .max(other.percentage.unwrap_or(0.0));
        let points = self.points.unwrap_or(0.0) + other.points.unwrap_or(0.0);
        ImpactEstimate {
            amount: (amount != 0.0).then_some(amount),
            percentage: (percentage != 0.0).then_some(percentage),
            points: (points != 0.0).then_some(points),
        }
    }
}

// ---------------------------------------------------------------------------
// Candidate and final signals
// ---------------------------------------------------------------------------

/// One rule firing, before any gate has seen it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CandidateSignal {
    pub category: SignalCategory,
    pub severity: Severity,
    /// Priority score in [0, 100]; the pipeline clamps on merge.
    pub score: f64,
    pub impact: ImpactEstimate,
    pub title: String,
    pub summary: String,
    /// Why this signal exists, quoting the actual numbers involved.
    pub justification: String,
    pub evidence: Vec<EvidenceRef>,
    pub actions: Vec<SuggestedAction>,
    /// Whether the reviewer may snooze this signal in the host UI.
    pub snoozeable: bool,
    /// Exact-match grouping key; candidates sharing it describe the same
    /// underlying issue and get bundled.
    pub dedupe_key: String,
    /// Name of the rule that emitted this candidate.
    pub rule_name: String,
}

/// A signal that survived both gates, was bundled with any same-key
/// siblings, and received its stable id.
#[derive(Clone, Debug, Serialize)]
pub struct FeedItem {
    /// Deterministic content-addressed id ("sig-…").
    pub id: String,
    pub category: SignalCategory,
    pub severity: Severity,
    pub score: f64,
    pub impact: ImpactEstimate,
    pub title: String,
    pub summary: String,
    pub justification: String,
    pub evidence: Vec<EvidenceRef>,
    pub actions: Vec<SuggestedAction>,
    pub snoozeable: bool,
    pub dedupe_key: String,
    /// Rule behind the first-seen candidate in the bundle.
    pub rule_name: String,
    /// How many candidates were bundled into this item.
    pub merged_count: usize,
    pub client_id: String,
    pub period: String,
}

/// Stage-by-stage counters for one pipeline run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FeedStats {
    pub total_raw: usize,
    pub passed_explainability: usize,
    pub passed_materiality: usize,
    pub after_dedupe: usize,
    pub final_count: usize,
    /// Bundled signals that did not fit the capacity.
    pub others_count: usize,
    pub rejected_explainability: usize,
    pub rejected_materiality: usize,
    pub fault_count: usize,
}
