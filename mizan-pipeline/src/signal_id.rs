//! Stable, content-addressed signal ids.
//!
//! The id is a SHA-256 digest over the scope and grouping identity of the
//! signal — client, period, category, dedupe key — never a counter, random
//! value, or timestamp, so repeated runs over identical input produce
//! byte-identical ids and the host can track user state (snoozes, reads)
//! across runs.

use sha2::{Digest, Sha256};

use crate::types::SignalCategory;

/// Hex digits of the digest kept in the id.
const ID_HEX_LEN: usize = 16;

/// Derive the stable id for one final signal.
pub fn assign(client_id: &str, period: &str, category: SignalCategory, dedupe_key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(client_id.as_bytes());
    hasher.update(b"|");
    hasher.update(period.as_bytes());
    hasher.update(b"|");
    hasher.update(category.as_str().as_bytes());
    hasher.update(b"|");
    hasher.update(dedupe_key.as_bytes());
    let digest = hasher.finalize();
    format!("sig-{}", &hex::encode(digest)[..ID_HEX_LEN])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_inputs_same_id() {
        let a = assign("client-9", "2026-01", SignalCategory::CashIntegrity, "cash-credit:100");
        let b = assign("client-9", "2026-01", SignalCategory::CashIntegrity, "cash-credit:100");
        assert_eq!(a, b);
    }

    #[test]
    fn id_shape_is_prefixed_short_hex() {
        let id = assign("client-9", "2026-01", SignalCategory::CrossCheck, "k");
        assert!(id.starts_with("sig-"));
        assert_eq!(id.len(), 4 + ID_HEX_LEN);
        assert!(id[4..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn every_component_changes_the_id() {
        let base = assign("client-9", "2026-01", SignalCategory::CrossCheck, "k");
        assert_ne!(base, assign("client-8", "2026-01", SignalCategory::CrossCheck, "k"));
        assert_ne!(base, assign("client-9", "2026-02", SignalCategory::CrossCheck, "k"));
        assert_ne!(base, assign("client-9", "2026-01", SignalCategory::DataQuality, "k"));
        assert_ne!(base, assign("client-9", "2026-01", SignalCategory::CrossCheck, "k2"));
    }

    #[test]
    fn separator_prevents_field_bleed() {
        // ("ab", "c") and ("a", "bc") must not collide.
        let a = assign("ab", "c", SignalCategory::CrossCheck, "k");
        let b = assign("a", "bc", SignalCategory::CrossCheck, "k");
        assert_ne!(a, b);
    }
}
