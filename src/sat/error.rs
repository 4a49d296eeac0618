//! Error types for parsing formulas and running the solvers.

use thiserror::Error;

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while turning formula text into solutions.
#[derive(Debug, Error)]
pub enum Error {
    /// A character that is not part of the formula vocabulary.
    #[error("illegal character '{character}' at position {position}")]
    IllegalCharacter {
        /// The offending character.
        character: char,
        /// Byte offset in the source text.
        position: usize,
    },

    /// A literal name that is not made of letters only.
    #[error("invalid literal name '{name}' at position {position}: literals may only contain letters")]
    InvalidLiteral {
        /// The rejected name.
        name: String,
        /// Byte offset in the source text.
        position: usize,
    },

    /// A token that cannot appear where it was found.
    #[error("unexpected token '{found}' at position {position}")]
    UnexpectedToken {
        /// Textual form of the token.
        found: String,
        /// Byte offset in the source text.
        position: usize,
    },

    /// The formula ended while an operand was still expected.
    #[error("unexpected end of formula")]
    UnexpectedEnd,

    /// The formula contains no tokens at all.
    #[error("empty formula")]
    EmptyFormula,

    /// A parenthesis without a partner.
    #[error("unbalanced parenthesis at position {position}")]
    UnbalancedParenthesis {
        /// Byte offset of the parenthesis in the source text.
        position: usize,
    },

    /// The formula nests operators deeper than the parser accepts.
    #[error("formula nests deeper than {limit} levels at position {position}")]
    TooDeep {
        /// Deepest tree the parser builds.
        limit: usize,
        /// Byte offset of the operator that went past the limit.
        position: usize,
    },

    /// Exhaustive enumeration was requested over too many variables.
    #[error("truth table over {count} variables exceeds the limit of {limit}")]
    TooManyVariables {
        /// Number of variables in the formula.
        count: usize,
        /// Largest number of variables the enumeration accepts.
        limit: usize,
    },

    /// Reading formula input failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_errors_convert() {
        let err = Error::from(std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"));
        assert!(matches!(err, Error::Io(_)));
        assert_eq!(err.to_string(), "no such file");
    }

    #[test]
    fn test_error_messages() {
        let err = Error::IllegalCharacter {
            character: '$',
            position: 2,
        };
        assert_eq!(err.to_string(), "illegal character '$' at position 2");

        let err = Error::TooManyVariables {
            count: 30,
            limit: 24,
        };
        assert_eq!(
            err.to_string(),
            "truth table over 30 variables exceeds the limit of 24"
        );

        let err = Error::TooDeep {
            limit: 512,
            position: 700,
        };
        assert_eq!(
            err.to_string(),
            "formula nests deeper than 512 levels at position 700"
        );
    }
}
