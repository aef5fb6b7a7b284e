use thiserror::Error;

/// Errors reported by [`Parser::parse`](crate::Parser::parse).
///
/// A parse stops at the first violation; there is no recovery and there are
/// no warnings. The two failure classes of interest to callers, bad input
/// versus insufficient token storage, are distinct variants, and on
/// `NoSpace` the store's high-water mark is left equal to its capacity.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// The input violates the JSON grammar. `offset` is the position of the
    /// first offending byte, or the input length when the text ended too
    /// early.
    #[error("syntax error at byte {offset}")]
    Syntax {
        /// Byte position of the violation.
        offset: usize,
    },

    /// The token store filled up and could not grow: no growth policy was
    /// configured, or the policy refused.
    #[error("token store exhausted")]
    NoSpace,

    /// The input is longer than the 32-bit lexeme offsets can address.
    #[error("input longer than 32-bit offsets can address")]
    Oversize,
}
