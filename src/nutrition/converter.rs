//! Unit normalizer
//!
//! Converts nutrient amounts from the source's reporting basis to per 100 g.

/// Grams in the canonical reference quantity
pub const REFERENCE_GRAMS: f64 = 100.0;

/// The quantity a source nutrient amount refers to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReportingBasis {
    /// Already per 100 g (survey foods)
    Per100Grams,
    /// Per labelled serving of the given gram weight (branded foods)
    PerServing { grams: f64 },
}

impl ReportingBasis {
    /// Factor that turns an amount in this basis into an amount per 100 g
    ///
    /// Returns `None` when the serving weight is zero, negative or not finite,
    /// since no per-100 g value can be derived from it.
    pub fn conversion_factor(&self) -> Option<f64> {
        match *self {
            ReportingBasis::Per100Grams => Some(1.0),
            ReportingBasis::PerServing { grams } => {
                if grams.is_finite() && grams > 0.0 {
                    Some(REFERENCE_GRAMS / grams)
                } else {
                    None
                }
            }
        }
    }

    /// Normalize a raw amount to per 100 g
    pub fn normalize(&self, raw_amount: f64) -> Option<f64> {
        self.conversion_factor().map(|factor| raw_amount * factor)
    }

    /// Whether amounts in this basis can be normalized at all
    pub fn is_convertible(&self) -> bool {
        self.conversion_factor().is_some()
    }
}

/// Factor that recovers the per-serving value from a per-100 g value
///
/// Zero for a missing or degenerate serving weight.
pub fn serving_size_multiplicand(serving_grams: f64) -> f64 {
    if serving_grams.is_finite() && serving_grams > 0.0 {
        serving_grams / REFERENCE_GRAMS
    } else {
        0.0
    }
}
