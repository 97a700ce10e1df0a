//! Rule module - the fundamental unit of the recommendation corpus

use crate::{Confidence, ItemSet};
use std::fmt;

/// Reasons a rule fails validation
#[derive(Debug, Clone, PartialEq)]
pub enum RuleError {
    /// The antecedent has no items
    EmptyAntecedent,

    /// The consequent has no items
    EmptyConsequent,

    /// Antecedent and consequent share items
    Overlap {
        /// Items present on both sides
        items: Vec<String>,
    },

    /// Confidence is NaN or outside `(0, 1]`
    ConfidenceOutOfRange(f64),
}

impl fmt::Display for RuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleError::EmptyAntecedent => write!(f, "antecedent is empty"),
            RuleError::EmptyConsequent => write!(f, "consequent is empty"),
            RuleError::Overlap { items } => {
                write!(f, "antecedent and consequent overlap on [{}]", items.join(", "))
            }
            RuleError::ConfidenceOutOfRange(value) => {
                write!(f, "confidence {} is outside (0, 1]", value)
            }
        }
    }
}

impl std::error::Error for RuleError {}

/// A mined association rule: when every antecedent item is present,
/// recommend the consequent items
///
/// Rules are validated on construction and immutable afterwards:
/// - antecedent and consequent are both non-empty
/// - antecedent and consequent are disjoint, so a rule never recommends
///   one of its own trigger items
/// - confidence lies in `(0, 1]`
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    antecedent: ItemSet,
    consequent: ItemSet,
    confidence: Confidence,
    support: Option<f64>,
    lift: Option<f64>,
}

impl Rule {
    /// Create a validated rule
    ///
    /// # Examples
    ///
    /// ```
    /// use setlist_domain::{Confidence, ItemSet, Rule};
    ///
    /// let rule = Rule::new(
    ///     ["A"].into_iter().collect(),
    ///     ["B"].into_iter().collect(),
    ///     Confidence::new(0.8).unwrap(),
    /// ).unwrap();
    /// assert!(rule.matches(&["A", "C"].into_iter().collect::<ItemSet>()));
    /// ```
    pub fn new(
        antecedent: ItemSet,
        consequent: ItemSet,
        confidence: Confidence,
    ) -> Result<Self, RuleError> {
        if antecedent.is_empty() {
            return Err(RuleError::EmptyAntecedent);
        }
        if consequent.is_empty() {
            return Err(RuleError::EmptyConsequent);
        }
        if !antecedent.is_disjoint(&consequent) {
            let items = antecedent
                .intersection(&consequent)
                .map(str::to_string)
                .collect();
            return Err(RuleError::Overlap { items });
        }

        Ok(Self {
            antecedent,
            consequent,
            confidence,
            support: None,
            lift: None,
        })
    }

    /// Attach the mining statistics reported alongside confidence
    ///
    /// These are carried for diagnostics only and never affect ranking.
    pub fn with_stats(mut self, support: Option<f64>, lift: Option<f64>) -> Self {
        self.support = support;
        self.lift = lift;
        self
    }

    /// Items whose presence triggers the rule
    pub fn antecedent(&self) -> &ItemSet {
        &self.antecedent
    }

    /// Items the rule recommends
    pub fn consequent(&self) -> &ItemSet {
        &self.consequent
    }

    /// Mined confidence
    pub fn confidence(&self) -> Confidence {
        self.confidence
    }

    /// Mined support of the full itemset, if the corpus carried it
    pub fn support(&self) -> Option<f64> {
        self.support
    }

    /// Mined lift, if the corpus carried it
    pub fn lift(&self) -> Option<f64> {
        self.lift
    }

    /// Whether the antecedent is a subset of `seeds`
    pub fn matches(&self, seeds: &ItemSet) -> bool {
        self.antecedent.is_subset(seeds)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} => {} (confidence {})",
            self.antecedent, self.consequent, self.confidence
        )
    }
}
