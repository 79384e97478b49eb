//! Dedupe and bundle: candidates describing the same issue become one.
//!
//! Grouping is exact-string equality on the dedupe key, in first-seen
//! order. Within a group the first-seen candidate owns the title, summary
//! and rule name; severity takes the max; impacts combine field-wise;
//! evidence and actions union by id with first occurrence winning.
//!
//! The merged score is `min(100, first + 0.5 x sum(rest))` — computed as
//! one fold over the whole group rather than pairwise, so the 100 cap
//! cannot make the result depend on grouping order. For a two-member group
//! this agrees exactly with the pairwise `min(100, a + 0.5b)`.

use std::collections::HashMap;

use log::debug;

use crate::types::CandidateSignal;

/// One merged group and how many candidates went into it.
pub struct BundledSignal {
    pub signal: CandidateSignal,
    pub merged_count: usize,
}

/// Merge candidates sharing a dedupe key, preserving first-seen order.
pub fn bundle(candidates: Vec<CandidateSignal>) -> Vec<BundledSignal> {
    let total = candidates.len();
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<CandidateSignal>> = HashMap::new();
    for candidate in candidates {
        let key = candidate.dedupe_key.clone();
        groups
            .entry(key.clone())
            .or_insert_with(|| {
                order.push(key);
                Vec::new()
            })
            .push(candidate);
    }

    let bundled: Vec<BundledSignal> = order
        .into_iter()
        .map(|key| {
            let group = groups.remove(&key).expect("key was registered on insert");
            merge_group(group)
        })
        .collect();
    debug!("bundled {} candidates into {} signals", total, bundled.len());
    bundled
}

fn merge_group(group: Vec<CandidateSignal>) -> BundledSignal {
    let merged_count = group.len();
    let mut members = group.into_iter();
    let mut merged = members.next().expect("groups are never empty");

    let mut rest_score_sum = 0.0;
    for incoming in members {
        merged.severity = merged.severity.max(incoming.severity);
        rest_score_sum += incoming.score;
        merged.impact = merged.impact.merged_with(&incoming.impact);
        for evidence in incoming.evidence {
            if !merged.evidence.iter().any(|e| e.id == evidence.id) {
                merged.evidence.push(evidence);
            }
        }
        for action in incoming.actions {
            if !merged.actions.iter().any(|a| a.id == action.id) {
                merged.actions.push(action);
            }
        }
    }
    merged.score = (merged.score + 0.5 * rest_score_sum).min(100.0);

    BundledSignal {
        signal: merged,
        merged_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        ActionKind, EvidenceKind, EvidenceRef, ImpactEstimate, SignalCategory, SuggestedAction,
    };
    use mizan_crosscheck::Severity;

    fn candidate(key: &str, severity: Severity, score: f64) -> CandidateSignal {
        CandidateSignal {
            category: SignalCategory::CrossCheck,
            severity,
            score,
            impact: ImpactEstimate::default(),
            title: format!("title for {score}"),
            summary: format!("summary for {score}"),
            justification: "yeterince uzun bir gerekçe".into(),
            evidence: vec![EvidenceRef {
                id: format!("e-{score}"),
                kind: EvidenceKind::LedgerRow,
                label: "mizan".into(),
                locator: None,
            }],
            actions: vec![SuggestedAction {
                id: format!("a-{score}"),
                label: "incele".into(),
                kind: ActionKind::OpenAccount,
                target: None,
                payload: None,
            }],
            snoozeable: true,
            dedupe_key: key.into(),
            rule_name: format!("Rule{score}"),
        }
    }

    #[test]
    fn medium_60_plus_high_70_merges_to_high_95() {
        let bundled = bundle(vec![
            candidate("same", Severity::Medium, 60.0),
            candidate("same", Severity::High, 70.0),
        ]);
        assert_eq!(bundled.len(), 1);
        let merged = &bundled[0].signal;
        assert_eq!(merged.severity, Severity::High);
        assert_eq!(merged.score, 95.0);
        assert_eq!(bundled[0].merged_count, 2);
    }

    #[test]
    fn first_seen_owns_title_summary_and_rule_name() {
        let bundled = bundle(vec![
            candidate("same", Severity::Low, 30.0),
            candidate("same", Severity::Critical, 90.0),
        ]);
        let merged = &bundled[0].signal;
        assert_eq!(merged.title, "title for 30");
        assert_eq!(merged.summary, "summary for 30");
        assert_eq!(merged.rule_name, "Rule30");
        // but severity still floored at the strongest member
        assert_eq!(merged.severity, Severity::Critical);
    }

    #[test]
    fn merged_severity_is_never_weaker_than_any_member() {
        for (a, b) in [
            (Severity::Info, Severity::Critical),
            (Severity::High, Severity::Medium),
            (Severity::Low, Severity::Low),
        ] {
            let bundled = bundle(vec![candidate("k", a, 10.0), candidate("k", b, 10.0)]);
            let merged = bundled[0].signal.severity;
            assert!(merged >= a && merged >= b);
        }
    }

    #[test]
    fn score_cap_applies_once_over_the_whole_group() {
        // 80 + 0.5 x (70 + 70) = 150 -> capped to 100. A pairwise cap
        // would have produced min(100, min(100, 80+35) + 35) = 100 too,
        // but the fold keeps intermediate sums uncapped by construction.
        let bundled = bundle(vec![
            candidate("k", Severity::High, 80.0),
            candidate("k", Severity::High, 70.0),
            candidate("k", Severity::High, 70.0),
        ]);
        assert_eq!(bundled[0].signal.score, 100.0);
    }

    #[test]
    fn evidence_and_actions_union_by_id_first_wins() {
        let mut first = candidate("k", Severity::Medium, 60.0);
        first.evidence[0].id = "shared".into();
        first.evidence[0].label = "first label".into();
        let mut second = candidate("k", Severity::Medium, 20.0);
        second.evidence[0].id = "shared".into();
        second.evidence[0].label = "second label".into();
        second.actions[0].id = "unique-action".into();

        let bundled = bundle(vec![first, second]);
        let merged = &bundled[0].signal;
        assert_eq!(merged.evidence.len(), 1, "duplicate evidence id dropped");
        assert_eq!(merged.evidence[0].label, "first label");
        assert_eq!(merged.actions.len(), 2, "distinct action ids unioned");
    }

    #[test]
    fn impacts_combine_field_wise() {
        let mut first = candidate("k", Severity::Medium, 60.0);
        first.impact = ImpactEstimate {
            amount: Some(1_000.0),
            percentage: Some(4.0),
            points: Some(-10.0),
        };
        let mut second = candidate("k", Severity::Medium, 20.0);
        second.impact = ImpactEstimate {
            amount: Some(500.0),
            percentage: Some(6.0),
            points: None,
        };
        let bundled = bundle(vec![first, second]);
        let impact = bundled[0].signal.impact;
        assert_eq!(impact.amount, Some(1_500.0));
        assert_eq!(impact.percentage, Some(6.0));
        assert_eq!(impact.points, Some(-10.0));
    }

    #[test]
    fn distinct_keys_stay_separate_in_first_seen_order() {
        let bundled = bundle(vec![
            candidate("b", Severity::Low, 10.0),
            candidate("a", Severity::Low, 20.0),
            candidate("b", Severity::Low, 30.0),
        ]);
        assert_eq!(bundled.len(), 2);
        assert_eq!(bundled[0].signal.dedupe_key, "b");
        assert_eq!(bundled[0].merged_count, 2);
        assert_eq!(bundled[1].signal.dedupe_key, "a");
        assert_eq!(bundled[1].merged_count, 1);
    }

    #[test]
    fn singleton_groups_pass_through_unchanged() {
        let bundled = bundle(vec![candidate("only", Severity::High, 70.0)]);
        assert_eq!(bundled[0].signal.score, 70.0);
        assert_eq!(bundled[0].merged_count, 1);
    }
}
