//! Deterministic signal-to-feed pipeline for trial-balance review.
//!
//! Turns raw accounting observations (trial-balance lines, ledger-vs-
//! external cross-checks) into a small, prioritized, fully explained list
//! of action items. Stages, in order: rule evaluation, explainability
//! gate, materiality gate, dedupe/bundle, capacity cut, stable id
//! assignment. The whole pipeline is a pure synchronous computation — no
//! I/O, no clock, no shared mutable state — so identical inputs always
//! produce byte-identical output, ids included.
//!
//! ```
//! use mizan_pipeline::{FeedInput, FeedPipeline, ReviewScope};
//!
//! let pipeline = FeedPipeline::standard();
//! let scope = ReviewScope {
//!     tenant_id: "tenant-1".into(),
//!     client_id: "client-9".into(),
//!     period: "2026-01".into(),
//!     turnover: None,
//!     paid_in_capital: None,
//! };
//! let outcome = pipeline.run(&FeedInput::default(), &scope);
//! assert!(outcome.items.len() <= 12);
//! ```

pub mod bundle;
pub mod error;
pub mod explainability;
pub mod feed;
pub mod limit;
pub mod materiality;
pub mod rule;
pub mod rules;
pub mod signal_id;
pub mod types;
pub mod util;

pub use error::{PresetError, RuleError};
pub use feed::{FeedInput, FeedOutcome, FeedPipeline};
pub use materiality::MaterialityPreset;
pub use rule::{Evaluation, EvaluationFault, RuleSet, SignalRule};
pub use types::{
    AccountBalance, ActionKind, BalanceDirection, CandidateSignal, ComparisonKind, CrossCheckItem,
    DomainRecord, EvidenceKind, EvidenceRef, FeedItem, FeedStats, ImpactEstimate, ReviewScope,
    Severity, SignalCategory, SuggestedAction,
};
