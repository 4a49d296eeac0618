//! Settings for the normal-form conversion.

use std::fmt::{self, Display, Formatter};

/// Number of NNF-then-distribute rounds the conversion historically ran.
pub const LEGACY_ROUNDS: usize = 3;

/// Upper bound on rounds when converging to a fixed point.
pub const MAX_FIXED_POINT_ROUNDS: usize = 32;

/// How many times the conversion re-derives NNF and distributes before extracting clauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ConversionStrategy {
    /// Exactly this many rounds, whether or not the tree is already in CNF.
    FixedRounds(usize),
    /// Repeat until a round leaves the tree unchanged, at most [`MAX_FIXED_POINT_ROUNDS`].
    #[default]
    FixedPoint,
}

impl ConversionStrategy {
    /// The historical three fixed rounds.
    #[must_use]
    pub const fn legacy() -> Self {
        Self::FixedRounds(LEGACY_ROUNDS)
    }

    /// The most rounds this strategy can run.
    #[must_use]
    pub const fn max_rounds(self) -> usize {
        match self {
            Self::FixedRounds(n) => n,
            Self::FixedPoint => MAX_FIXED_POINT_ROUNDS,
        }
    }

    /// Whether the loop may stop early once a round changes nothing.
    #[must_use]
    pub const fn stops_at_fixed_point(self) -> bool {
        matches!(self, Self::FixedPoint)
    }
}

impl Display for ConversionStrategy {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::FixedRounds(n) => write!(f, "{n} rounds"),
            Self::FixedPoint => f.write_str("fixed point"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(ConversionStrategy::default(), ConversionStrategy::FixedPoint);
        assert_eq!(ConversionStrategy::legacy().max_rounds(), 3);
        assert!(!ConversionStrategy::legacy().stops_at_fixed_point());
        assert_eq!(ConversionStrategy::FixedPoint.to_string(), "fixed point");
    }
}
