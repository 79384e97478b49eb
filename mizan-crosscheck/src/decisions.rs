//! Read-only port to the reviewer-decision store.
//!
//! Decisions are persisted by the surrounding application (whatever storage
//! it chooses); the engine only merges already-loaded decisions into its
//! output. The port is deliberately read-only — nothing in the engine ever
//! writes a verdict.

use std::collections::HashMap;

use crate::types::UserDecision;

/// Lookup interface over externally persisted reviewer decisions.
pub trait DecisionStore {
    /// The persisted decision for a check, if the reviewer made one.
    fn decision_for(&self, check_id: &str) -> Option<&UserDecision>;
}

/// Decision store backed by a plain map, for hosts and tests.
#[derive(Clone, Debug, Default)]
pub struct InMemoryDecisionStore {
    decisions: HashMap<String, UserDecision>,
}

impl InMemoryDecisionStore {
    pub fn new(decisions: impl IntoIterator<Item = UserDecision>) -> Self {
        Self {
            decisions: decisions
                .into_iter()
                .map(|d| (d.check_id.clone(), d))
                .collect(),
        }
    }

    pub fn insert(&mut self, decision: UserDecision) {
        self.decisions.insert(decision.check_id.clone(), decision);
    }
}

impl DecisionStore for InMemoryDecisionStore {
    fn decision_for(&self, check_id: &str) -> Option<&UserDecision> {
        self.decisions.get(check_id)
    }
}

/// Store with no decisions at all; every lookup misses.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoDecisions;

impl DecisionStore for NoDecisions {
    fn decision_for(&self, _check_id: &str) -> Option<&UserDecision> {
        None
    }
}
