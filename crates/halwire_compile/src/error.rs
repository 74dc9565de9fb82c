//! Hard compilation failures for malformed wiring expressions.

use halwire_common::PinParseError;

/// Errors that abort compilation of the accumulated declarations.
///
/// Naming conflicts and redundant constants are *not* errors; they are
/// reported through the diagnostic sink and compilation continues. These
/// variants cover structurally malformed input that has no meaningful
/// best-effort interpretation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    /// A parenthesis without a matching partner.
    #[error("unbalanced parentheses in expression '{0}'")]
    UnbalancedParens(String),

    /// A `()` group with nothing inside it.
    #[error("empty expression group while compiling '{0}'")]
    EmptyGroup(String),

    /// An operator position held a token that is not an operator.
    #[error("unknown operator '{token}' in expression '{expr}'")]
    UnknownOperator {
        /// The offending token.
        token: String,
        /// The expression group it appeared in.
        expr: String,
    },

    /// A chain mixing two different operators, e.g. `a AND b OR c`.
    #[error("mixed operators in expression '{0}': a chain must use a single operator")]
    MixedOperators(String),

    /// A group that is neither a single operand nor an alternating
    /// operand/operator chain.
    #[error("malformed expression '{0}': expected 'operand OP operand [OP operand ...]'")]
    MalformedChain(String),

    /// An operand token that could not be classified.
    #[error("invalid operand in expression '{expr}': {source}")]
    InvalidOperand {
        /// The expression group the operand appeared in.
        expr: String,
        /// The underlying classification failure.
        source: PinParseError,
    },
}
