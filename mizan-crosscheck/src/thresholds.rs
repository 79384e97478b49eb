//! Centralized classification breakpoints for cross-check enrichment.
//!
//! These values are carried over unchanged from the original review tool.
//! Changing a breakpoint here affects BOTH root-cause classification (in
//! `root_cause.rs`) and the matching-quality steps (in `confidence.rs`),
//! so they live in one place.

/// Divergence above this percent is treated as a structural difference
/// between the ledger and the external source (different scope, different
/// account mapping), not a bookkeeping slip.
pub const STRUCTURAL_DIFF_PERCENT: f64 = 10.0;

/// Lower bound (exclusive) of the timing/cut-off band for declaration
/// checks: a declaration that diverges by more than this but at most
/// [`STRUCTURAL_DIFF_PERCENT`] usually reflects period-boundary timing.
pub const TIMING_BAND_MIN_PERCENT: f64 = 2.0;

/// Upper bound (inclusive) of the calculation-error band: tiny divergences
/// up to this percent are most often rounding or a manual entry typo.
/// Divergences between this and [`TIMING_BAND_MIN_PERCENT`] sit in neither
/// band and classify as unknown.
pub const CALCULATION_ERROR_MAX_PERCENT: f64 = 1.0;

/// Trend changes smaller than this percent count as stable.
pub const TREND_STABLE_BAND_PERCENT: f64 = 5.0;

/// Substrings that mark a check id as declaration-related (VAT, withholding,
/// tax base, stamp duty). The match is a plain lower-cased substring test —
/// pattern-based, not a classifier — so ids that spell these differently
/// will not be recognized as declarations.
pub const DECLARATION_MARKERS: [&str; 5] = ["kdv", "beyanname", "matrah", "muhtasar", "damga"];

/// True when the check id carries one of the [`DECLARATION_MARKERS`].
pub fn is_declaration_check(check_id: &str) -> bool {
    let id = check_id.to_lowercase();
    DECLARATION_MARKERS.iter().any(|marker| id.contains(marker))
}
