//! Period-over-period trend for cross-check mismatches.
//!
//! Compares a check's current mismatch magnitude to the prior period's and
//! classifies the direction. A widening gap pushes a check up the review
//! list even when its absolute size is unremarkable; a shrinking gap tells
//! the reviewer last month's correction is working.

use std::fmt;

use serde::Serialize;

use crate::thresholds::TREND_STABLE_BAND_PERCENT;

/// Which direction the mismatch is heading compared to the prior period.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Up,
    Down,
    Stable,
    NoHistory,
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrendDirection::Up => write!(f, "\u{2191} Artıyor"),
            TrendDirection::Down => write!(f, "\u{2193} Azalıyor"),
            TrendDirection::Stable => write!(f, "\u{2192} Sabit"),
            TrendDirection::NoHistory => write!(f, "— Geçmiş yok"),
        }
    }
}

/// Trend verdict for one check.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TrendAssessment {
    pub direction: TrendDirection,
    /// Signed change of the mismatch magnitude versus the prior period.
    pub change_percent: f64,
    /// The prior period's mismatch magnitude, when one exists.
    pub previous_difference: Option<f64>,
    pub rationale: String,
}

/// Classify the trend from the current and optional prior mismatch magnitude.
///
/// Both inputs are absolute differences; callers pass `None` when the check
/// has no prior-period counterpart.
pub fn compute(current: f64, previous: Option<f64>) -> TrendAssessment {
    let current = current.abs();
    let Some(previous) = previous.map(f64::abs) else {
        return TrendAssessment {
            direction: TrendDirection::NoHistory,
            change_percent: 0.0,
            previous_difference: None,
            rationale: "Önceki dönemde bu kontrol için sonuç yok, eğilim hesaplanamadı."
                .to_string(),
        };
    };

    if previous == 0.0 && current == 0.0 {
        return TrendAssessment {
            direction: TrendDirection::Stable,
            change_percent: 0.0,
            previous_difference: Some(0.0),
            rationale: "Fark her iki dönemde de sıfır.".to_string(),
        };
    }

    if previous == 0.0 {
        // A mismatch appeared where there was none.
        return TrendAssessment {
            direction: TrendDirection::Up,
            change_percent: 100.0,
            previous_difference: Some(0.0),
            rationale: format!(
                "Önceki dönemde fark yokken bu dönem {:.2} tutarında fark oluştu.",
                current
            ),
        };
    }

    let change_percent = (current - previous) / previous * 100.0;
    let direction = if change_percent.abs() < TREND_STABLE_BAND_PERCENT {
        TrendDirection::Stable
    } else if change_percent > 0.0 {
        TrendDirection::Up
    } else {
        TrendDirection::Down
    };
    let rationale = match direction {
        TrendDirection::Stable => format!(
            "Fark önceki dönemdeki {:.2} seviyesine göre %{:.1} değişti; sabit bantta.",
            previous, change_percent
        ),
        TrendDirection::Up => format!(
            "Fark önceki dönemdeki {:.2} seviyesinden %{:.1} büyüdü.",
            previous, change_percent
        ),
        _ => format!(
            "Fark önceki dönemdeki {:.2} seviyesinden %{:.1} küçüldü.",
            previous,
            change_percent.abs()
        ),
    };

    TrendAssessment {
        direction,
        change_percent,
        previous_difference: Some(previous),
        rationale,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_previous_is_no_history() {
        let trend = compute(8_450.0, None);
        assert_eq!(trend.direction, TrendDirection::NoHistory);
        assert_eq!(trend.previous_difference, None);
    }

    #[test]
    fn both_zero_is_stable_at_zero() {
        let trend = compute(0.0, Some(0.0));
        assert_eq!(trend.direction, TrendDirection::Stable);
        assert_eq!(trend.change_percent, 0.0);
    }

    #[test]
    fn gap_appearing_from_zero_is_up_100() {
        let trend = compute(5_000.0, Some(0.0));
        assert_eq!(trend.direction, TrendDirection::Up);
        assert_eq!(trend.change_percent, 100.0);
        assert!(trend.rationale.contains("5000.00"));
    }

    #[test]
    fn small_change_is_stable() {
        // 10,000 -> 10,400 is +4%, inside the 5% stable band.
        let trend = compute(10_400.0, Some(10_000.0));
        assert_eq!(trend.direction, TrendDirection::Stable);
        assert!((trend.change_percent - 4.0).abs() < 1e-9);
    }

    #[test]
    fn widening_gap_is_up() {
        let trend = compute(15_000.0, Some(10_000.0));
        assert_eq!(trend.direction, TrendDirection::Up);
        assert!((trend.change_percent - 50.0).abs() < 1e-9);
        assert_eq!(trend.previous_difference, Some(10_000.0));
    }

    #[test]
    fn shrinking_gap_is_down() {
        let trend = compute(4_000.0, Some(10_000.0));
        assert_eq!(trend.direction, TrendDirection::Down);
        assert!((trend.change_percent + 60.0).abs() < 1e-9);
    }

    #[test]
    fn signs_are_ignored_on_both_inputs() {
        // Magnitudes only: a sign flip on the raw difference is not a trend.
        let trend = compute(-4_000.0, Some(-10_000.0));
        assert_eq!(trend.direction, TrendDirection::Down);
    }

    #[test]
    fn stable_band_boundary_is_exclusive() {
        // Exactly +5% is no longer stable.
        let trend = compute(10_500.0, Some(10_000.0));
        assert_eq!(trend.direction, TrendDirection::Up);
    }
}
