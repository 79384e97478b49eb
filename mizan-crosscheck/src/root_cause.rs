//! Root-cause classification for cross-check mismatches.
//!
//! A fixed decision tree, evaluated top to bottom, first match wins:
//!
//! 1. no data / skipped                         → `VeriEksik` (certain)
//! 2. within tolerance and passing              → `Uyumlu` (certain)
//! 3. divergence above 10%                      → `YapisalFark` (certain)
//! 4. declaration check, divergence in (2, 10]  → `ZamanlamaFarki` (estimated)
//! 5. divergence in (0, 1]                      → `HesaplamaHatasi` (estimated)
//! 6. anything else                             → `Bilinmeyen` (estimated)
//!
//! Causes are drawn from a closed vocabulary — there is no generative or
//! scored component, so the same result always classifies the same way.
//! Every branch writes an explanation that quotes the check's own labels
//! and numbers rather than a canned sentence.

use serde::Serialize;

use crate::thresholds::{
    is_declaration_check, CALCULATION_ERROR_MAX_PERCENT, STRUCTURAL_DIFF_PERCENT,
    TIMING_BAND_MIN_PERCENT,
};
use crate::types::{CheckStatus, CrossCheckResult};

// ---------------------------------------------------------------------------
// Cause vocabulary
// ---------------------------------------------------------------------------

/// The six root-cause hypotheses for a cross-check outcome.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RootCause {
    /// Ledger and source agree within tolerance.
    Uyumlu,
    /// One side delivered no usable data; nothing to compare.
    VeriEksik,
    /// Divergence too large for bookkeeping noise — the two sides measure
    /// structurally different things (scope, account mapping, grouping).
    YapisalFark,
    /// Period-boundary timing: the declaration and the ledger booked the
    /// same facts into different cut-off windows.
    ZamanlamaFarki,
    /// Small divergence consistent with rounding or a manual entry slip.
    HesaplamaHatasi,
    /// Mismatch is real but fits no known pattern.
    Bilinmeyen,
}

/// How firmly the tree stands behind a classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Certainty {
    Certain,
    Estimated,
}

impl RootCause {
    /// All causes, in decision-tree order.
    pub const ALL: [RootCause; 6] = [
        RootCause::VeriEksik,
        RootCause::Uyumlu,
        RootCause::YapisalFark,
        RootCause::ZamanlamaFarki,
        RootCause::HesaplamaHatasi,
        RootCause::Bilinmeyen,
    ];

    /// Upper-case wire tag, matching the original tool's vocabulary.
    pub fn code(&self) -> &'static str {
        match self {
            RootCause::Uyumlu => "UYUMLU",
            RootCause::VeriEksik => "VERI_EKSIK",
            RootCause::YapisalFark => "YAPISAL_FARK",
            RootCause::ZamanlamaFarki => "ZAMANLAMA_FARKI",
            RootCause::HesaplamaHatasi => "HESAPLAMA_HATASI",
            RootCause::Bilinmeyen => "BILINMEYEN",
        }
    }

    /// Human-readable display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            RootCause::Uyumlu => "Uyumlu",
            RootCause::VeriEksik => "Veri Eksikliği",
            RootCause::YapisalFark => "Yapısal Fark",
            RootCause::ZamanlamaFarki => "Zamanlama / Dönemsellik Farkı",
            RootCause::HesaplamaHatasi => "Hesaplama Hatası",
            RootCause::Bilinmeyen => "Bilinmeyen Fark",
        }
    }

    /// Actionable follow-ups for the reviewing accountant.
    pub fn recommendations(&self) -> &'static [&'static str] {
        match self {
            RootCause::Uyumlu => &[
                "Kontrol sonucunu dosyalayın, ek işlem gerekmez",
            ],
            RootCause::VeriEksik => &[
                "Eksik kaynak belgeyi (beyanname, ekstre, mutabakat) talep edin",
                "İlgili dönemin yüklemelerinin tamamlandığını doğrulayın",
                "Veri geldikten sonra kontrolü yeniden çalıştırın",
            ],
            RootCause::YapisalFark => &[
                "İki tarafın kapsamını karşılaştırın (hangi hesaplar dahil?)",
                "Hesap planı eşleştirmesini gözden geçirin",
                "Gerekirse kontrol tanımındaki hesap aralığını düzeltin",
            ],
            RootCause::ZamanlamaFarki => &[
                "Dönem sonu kayıtlarının kesim tarihini kontrol edin",
                "Bir önceki ve sonraki dönemin aynı kontrolüne bakın",
                "Faturaların beyan dönemi ile kayıt dönemini karşılaştırın",
            ],
            RootCause::HesaplamaHatasi => &[
                "Yevmiye kayıtlarında yuvarlama ve elle giriş hatası arayın",
                "KDV/tevkifat oranlarının doğru uygulandığını kontrol edin",
                "Farkı oluşturan tekil fişleri tespit edin",
            ],
            RootCause::Bilinmeyen => &[
                "Fark kalemlerini tek tek mutabakata bağlayın",
                "Büyük tutarlı fişlerden başlayarak detay inceleme yapın",
                "Gerekirse karşı taraftan güncel döküm isteyin",
            ],
        }
    }
}

impl std::fmt::Display for RootCause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// The tree's verdict for one cross-check result.
#[derive(Clone, Debug, Serialize)]
pub struct RootCauseAssessment {
    pub cause: RootCause,
    pub certainty: Certainty,
    /// Explanation quoting the check's labels and figures.
    pub explanation: String,
}

/// Classify one cross-check result. Every result maps to exactly one cause.
pub fn classify(result: &CrossCheckResult) -> RootCauseAssessment {
    // 1. Nothing was compared.
    if result.status.is_missing_data() {
        let missing_side = if result.source_value.is_none() {
            &result.source_label
        } else {
            &result.target_label
        };
        return RootCauseAssessment {
            cause: RootCause::VeriEksik,
            certainty: Certainty::Certain,
            explanation: format!(
                "{} kontrolü çalıştırılamadı: {} tarafında kullanılabilir veri yok.",
                result.check_name, missing_side
            ),
        };
    }

    let abs_difference = result.difference.abs();
    let percent = result.difference_percent;

    // 2. Agreement within tolerance.
    if abs_difference <= result.tolerance.amount && result.status == CheckStatus::Pass {
        return RootCauseAssessment {
            cause: RootCause::Uyumlu,
            certainty: Certainty::Certain,
            explanation: format!(
                "{} ile {} arasındaki {:.2} tutarındaki fark {:.2} tolerans sınırının içinde.",
                result.source_label, result.target_label, abs_difference, result.tolerance.amount
            ),
        };
    }

    // 3. Too large to be bookkeeping noise.
    if percent > STRUCTURAL_DIFF_PERCENT {
        return RootCauseAssessment {
            cause: RootCause::YapisalFark,
            certainty: Certainty::Certain,
            explanation: format!(
                "%{:.2} sapma ({:.2} tutar) yapısal eşik olan %{:.0} üzerinde: {} ile {} \
                 büyük olasılıkla farklı kapsamları ölçüyor.",
                percent,
                abs_difference,
                STRUCTURAL_DIFF_PERCENT,
                result.source_label,
                result.target_label
            ),
        };
    }

    // 4. Declaration checks in the timing band.
    if is_declaration_check(&result.check_id)
        && percent > TIMING_BAND_MIN_PERCENT
        && percent <= STRUCTURAL_DIFF_PERCENT
    {
        return RootCauseAssessment {
            cause: RootCause::ZamanlamaFarki,
            certainty: Certainty::Estimated,
            explanation: format!(
                "{} beyana dayalı bir kontrol ve %{:.2} sapma dönemsellik bandında \
                 (%{:.0}–%{:.0}): fark büyük olasılıkla kesim tarihi kaynaklı.",
                result.check_name,
                percent,
                TIMING_BAND_MIN_PERCENT,
                STRUCTURAL_DIFF_PERCENT
            ),
        };
    }

    // 5. Small enough to be rounding or a typo.
    if percent > 0.0 && percent <= CALCULATION_ERROR_MAX_PERCENT {
        return RootCauseAssessment {
            cause: RootCause::HesaplamaHatasi,
            certainty: Certainty::Estimated,
            explanation: format!(
                "%{:.2} sapma ({:.2} tutar) hesaplama bandının içinde (≤%{:.0}): \
                 yuvarlama veya elle giriş hatası olasılığı yüksek.",
                percent, abs_difference, CALCULATION_ERROR_MAX_PERCENT
            ),
        };
    }

    // 6. A real mismatch that fits no known pattern.
    RootCauseAssessment {
        cause: RootCause::Bilinmeyen,
        certainty: Certainty::Estimated,
        explanation: format!(
            "{} ile {} arasında {:.2} tutar (%{:.2}) fark var ve bilinen desenlerin \
             hiçbirine uymuyor; kalem bazında inceleme gerekiyor.",
            result.source_label, result.target_label, abs_difference, percent
        ),
    }
}
