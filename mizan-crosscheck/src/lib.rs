//! Cross-check enrichment engine for trial-balance review.
//!
//! Takes fully evaluated ledger-vs-external comparison results and explains
//! them: a deterministic root-cause classification, a coverage / matching
//! quality confidence split, a period-over-period trend, and a join against
//! the reviewer's externally persisted decisions. Pure computation
//! throughout — no I/O, no clock, no shared mutable state.

pub mod confidence;
pub mod decisions;
pub mod enrich;
pub mod root_cause;
pub mod thresholds;
pub mod trend;
pub mod types;

pub use confidence::ConfidenceSplit;
pub use decisions::{DecisionStore, InMemoryDecisionStore, NoDecisions};
pub use enrich::{enrich_cross_checks, EnrichedCrossCheck};
pub use root_cause::{classify, Certainty, RootCause, RootCauseAssessment};
pub use trend::{TrendAssessment, TrendDirection};
pub use types::{
    CheckStatus, ComparisonKind, CrossCheckItem, CrossCheckResult, DecisionVerdict, Severity,
    Tolerance, UserDecision,
};
