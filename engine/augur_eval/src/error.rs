//! Call-time errors.

use augur_typeck::ClassError;
use augur_types::TypeError;
use thiserror::Error;

/// Error from invoking or composing a wrapped function.
#[derive(Clone, Eq, PartialEq, Debug, Error)]
pub enum CallError {
    /// The call is ill-typed; the native function was not invoked.
    #[error(transparent)]
    Type(#[from] TypeError),

    /// The native implementation returned a value that does not unify with
    /// the result type its own signature predicts.
    #[error("implementation violates its signature: declared result `{declared}`, returned `{actual}`")]
    SignatureViolation {
        /// Result type predicted from the declaration.
        declared: String,
        /// Type of the value actually returned.
        actual: String,
    },

    /// Typeclass registration or dispatch failure.
    #[error(transparent)]
    Class(#[from] ClassError),

    /// More arguments supplied than the function has parameters.
    #[error("too many arguments: {supplied} supplied, {arity} expected")]
    TooManyArguments {
        /// Parameters still expected.
        arity: usize,
        /// Arguments supplied.
        supplied: usize,
    },

    /// The native implementation itself failed.
    #[error("host function error: {0}")]
    Host(String),
}
