//! Discrete probability tables.

use serde::{Deserialize, Serialize};

/// How far the probabilities of a table may sum away from 1.0.
///
/// Wide enough for hand-written two-decimal tables (three outcomes at 0.33
/// each sum to 0.99).
pub const PROBABILITY_SUM_TOLERANCE: f64 = 0.015;

/// An ordered probability mass function over integer outcomes.
///
/// Outcomes are durations in minutes. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTable", into = "RawTable")]
pub struct ProbabilityTable {
    outcomes: Vec<u32>,
    probabilities: Vec<f64>,
}

impl ProbabilityTable {
    /// Build a table from parallel outcome and probability lists.
    pub fn new(outcomes: Vec<u32>, probabilities: Vec<f64>) -> Result<Self, TableError> {
        if outcomes.len() != probabilities.len() {
            return Err(TableError::LengthMismatch {
                outcomes: outcomes.len(),
                probabilities: probabilities.len(),
            });
        }
        if outcomes.is_empty() {
            return Err(TableError::Empty);
        }
        for (index, &probability) in probabilities.iter().enumerate() {
            if !probability.is_finite() || probability <= 0.0 || probability > 1.0 {
                return Err(TableError::ProbabilityOutOfRange { index, probability });
            }
        }
        let sum: f64 = probabilities.iter().sum();
        if (sum - 1.0).abs() > PROBABILITY_SUM_TOLERANCE {
            return Err(TableError::SumMismatch { sum });
        }

        Ok(Self {
            outcomes,
            probabilities,
        })
    }

    /// Build a table from `(outcome, probability)` pairs.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (u32, f64)>) -> Result<Self, TableError> {
        let (outcomes, probabilities) = pairs.into_iter().unzip();
        Self::new(outcomes, probabilities)
    }

    pub fn outcomes(&self) -> &[u32] {
        &self.outcomes
    }

    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }

    /// Number of outcomes (never zero).
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

/// Serialized shape of a [`ProbabilityTable`]; validated on conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawTable {
    outcomes: Vec<u32>,
    probabilities: Vec<f64>,
}

impl TryFrom<RawTable> for ProbabilityTable {
    type Error = TableError;

    fn try_from(raw: RawTable) -> Result<Self, Self::Error> {
        ProbabilityTable::new(raw.outcomes, raw.probabilities)
    }
}

impl From<ProbabilityTable> for RawTable {
    fn from(table: ProbabilityTable) -> Self {
        RawTable {
            outcomes: table.outcomes,
            probabilities: table.probabilities,
        }
    }
}

/// Errors from building a [`ProbabilityTable`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TableError {
    /// No outcomes at all.
    #[error("Probability table is empty")]
    Empty,

    /// Outcome and probability lists differ in length.
    #[error("Probability table has {outcomes} outcomes but {probabilities} probabilities")]
    LengthMismatch {
        /// Number of outcomes.
        outcomes: usize,
        /// Number of probabilities.
        probabilities: usize,
    },

    /// A probability is not in (0, 1].
    #[error("Probability {probability} at position {index} is outside (0, 1]")]
    ProbabilityOutOfRange {
        /// Position in the table.
        index: usize,
        /// The offending value.
        probability: f64,
    },

    /// Probabilities do not sum to 1.0.
    #[error("Probabilities sum to {sum}, expected 1.0")]
    SumMismatch {
        /// Actual sum.
        sum: f64,
    },
}
