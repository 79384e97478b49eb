//! The explainability gate.
//!
//! A signal the reviewer cannot act on is noise, however severe: every
//! candidate must say why it exists (a real justification, not a stub),
//! point at evidence, and offer at least one next step. Rejections are a
//! normal filtering outcome, counted and logged, never an error.

use log::warn;

use crate::types::CandidateSignal;

/// Minimum justification length after trimming.
pub const MIN_JUSTIFICATION_CHARS: usize = 10;

/// Partition of candidates into kept and rejected-count.
pub struct GateOutcome {
    pub kept: Vec<CandidateSignal>,
    pub rejected: usize,
}

/// True when the candidate carries enough explanation to surface.
pub fn passes(candidate: &CandidateSignal) -> bool {
    candidate.justification.trim().chars().count() >= MIN_JUSTIFICATION_CHARS
        && !candidate.evidence.is_empty()
        && !candidate.actions.is_empty()
}

/// Apply the gate to every candidate, keeping input order.
pub fn apply(candidates: Vec<CandidateSignal>) -> GateOutcome {
    let total = candidates.len();
    let kept: Vec<CandidateSignal> = candidates
        .into_iter()
        .filter(|c| {
            let ok = passes(c);
            if !ok {
                warn!(
                    "explainability gate dropped a candidate from {} (key {})",
                    c.rule_name, c.dedupe_key
                );
            }
            ok
        })
        .collect();
    GateOutcome {
        rejected: total - kept.len(),
        kept,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        ActionKind, EvidenceKind, EvidenceRef, ImpactEstimate, SignalCategory, SuggestedAction,
    };
    use mizan_crosscheck::Severity;

    fn candidate(justification: &str) -> CandidateSignal {
        CandidateSignal {
            category: SignalCategory::CashIntegrity,
            severity: Severity::Critical,
            score: 95.0,
            impact: ImpactEstimate::amount(45_230.0),
            title: "test".into(),
            summary: "test".into(),
            justification: justification.into(),
            evidence: vec![EvidenceRef {
                id: "e1".into(),
                kind: EvidenceKind::LedgerRow,
                label: "mizan".into(),
                locator: None,
            }],
            actions: vec![SuggestedAction {
                id: "a1".into(),
                label: "incele".into(),
                kind: ActionKind::OpenAccount,
                target: None,
                payload: None,
            }],
            snoozeable: false,
            dedupe_key: "k".into(),
            rule_name: "TestRule".into(),
        }
    }

    #[test]
    fn nine_characters_is_rejected_regardless_of_severity() {
        // 9 chars exactly, on a critical candidate.
        let c = candidate("123456789");
        assert!(!passes(&c));
        let outcome = apply(vec![c]);
        assert!(outcome.kept.is_empty());
        assert_eq!(outcome.rejected, 1);
    }

    #[test]
    fn ten_characters_passes() {
        assert!(passes(&candidate("1234567890")));
    }

    #[test]
    fn whitespace_does_not_count() {
        assert!(!passes(&candidate("   12345    ")));
    }

    #[test]
    fn missing_evidence_is_rejected() {
        let mut c = candidate("yeterince uzun bir gerekçe");
        c.evidence.clear();
        assert!(!passes(&c));
    }

    #[test]
    fn missing_actions_is_rejected() {
        let mut c = candidate("yeterince uzun bir gerekçe");
        c.actions.clear();
        assert!(!passes(&c));
    }

    #[test]
    fn gate_preserves_input_order() {
        let outcome = apply(vec![
            candidate("birinci yeterli gerekçe"),
            candidate("kısa"),
            candidate("ikinci yeterli gerekçe"),
        ]);
        assert_eq!(outcome.kept.len(), 2);
        assert_eq!(outcome.rejected, 1);
        assert!(outcome.kept[0].justification.starts_with("birinci"));
        assert!(outcome.kept[1].justification.starts_with("ikinci"));
    }
}
