//! Confidence module - the mined strength of an association rule

use crate::rule::RuleError;
use std::cmp::Ordering;
use std::fmt;

/// Confidence of a rule, a probability in the half-open interval `(0, 1]`
///
/// Confidence is the estimate that the consequent co-occurs given the
/// antecedent. A value of zero would mean the rule never fires, so the
/// mining step never emits one and loading rejects it.
///
/// Unlike a bare `f64`, `Confidence` is totally ordered (NaN cannot be
/// constructed), which lets it serve directly as a sort key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Confidence(f64);

impl Confidence {
    /// Create a validated confidence value
    ///
    /// # Examples
    ///
    /// ```
    /// use setlist_domain::Confidence;
    ///
    /// assert!(Confidence::new(0.8).is_ok());
    /// assert!(Confidence::new(1.0).is_ok());
    /// assert!(Confidence::new(0.0).is_err());
    /// assert!(Confidence::new(f64::NAN).is_err());
    /// ```
    pub fn new(value: f64) -> Result<Self, RuleError> {
        if value.is_nan() || value <= 0.0 || value > 1.0 {
            return Err(RuleError::ConfidenceOutOfRange(value));
        }
        Ok(Self(value))
    }

    /// Get the raw value
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Eq for Confidence {}

impl PartialOrd for Confidence {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Confidence {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}", self.0)
    }
}

impl From<Confidence> for f64 {
    fn from(confidence: Confidence) -> Self {
        confidence.0
    }
}
