//! Typed success/failure container for agent operations.
//!
//! `Outcome` replaces dual-channel `(value, error)` signaling with a sum type
//! whose tag can only be branched on through [`Outcome::match_with`] or
//! pattern matching. Provider-calling operations wrapped by the retry
//! executor return `Outcome<T, AgentError>`.

/// A type-safe operation result that either succeeded or failed.
///
/// Exactly one variant is ever populated. The accessors [`Outcome::value`]
/// and [`Outcome::error`] enforce the caller contract loudly: calling either
/// on the wrong variant is a programming error and panics rather than
/// returning a default.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome<T, E> {
    /// The operation succeeded with a value.
    Ok(T),
    /// The operation failed with an error.
    Err(E),
}

impl<T, E> Outcome<T, E> {
    /// Returns true if the outcome is a success.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Ok(_))
    }

    /// Returns true if the outcome is an error.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Err(_))
    }

    /// Consumes the outcome and returns the success value.
    ///
    /// # Panics
    /// Panics if the outcome is an error. Check [`Outcome::is_success`] first.
    pub fn value(self) -> T {
        match self {
            Self::Ok(value) => value,
            Self::Err(_) => panic!("value() called on an error outcome; check is_success() first"),
        }
    }

    /// Consumes the outcome and returns the error.
    ///
    /// # Panics
    /// Panics if the outcome is a success. Check [`Outcome::is_error`] first.
    pub fn error(self) -> E {
        match self {
            Self::Ok(_) => panic!("error() called on a success outcome; check is_error() first"),
            Self::Err(err) => err,
        }
    }

    /// Returns the success value as an `Option`, discarding any error.
    pub fn ok(self) -> Option<T> {
        match self {
            Self::Ok(value) => Some(value),
            Self::Err(_) => None,
        }
    }

    /// Returns the error as an `Option`, discarding any success value.
    pub fn err(self) -> Option<E> {
        match self {
            Self::Ok(_) => None,
            Self::Err(err) => Some(err),
        }
    }

    /// Applies a function to the success value, preserving the error channel.
    ///
    /// The closure is never invoked on an error outcome.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Outcome<U, E> {
        match self {
            Self::Ok(value) => Outcome::Ok(f(value)),
            Self::Err(err) => Outcome::Err(err),
        }
    }

    /// Applies a function to the error, preserving the success channel.
    ///
    /// The closure is never invoked on a success outcome.
    pub fn map_err<F2, F: FnOnce(E) -> F2>(self, f: F) -> Outcome<T, F2> {
        match self {
            Self::Ok(value) => Outcome::Ok(value),
            Self::Err(err) => Outcome::Err(f(err)),
        }
    }

    /// Dispatches to exactly one of the two branches based on the tag.
    pub fn match_with<U>(self, on_ok: impl FnOnce(T) -> U, on_err: impl FnOnce(E) -> U) -> U {
        match self {
            Self::Ok(value) => on_ok(value),
            Self::Err(err) => on_err(err),
        }
    }

    /// Converts into a standard library `Result` for `?`-style propagation.
    pub fn into_result(self) -> Result<T, E> {
        match self {
            Self::Ok(value) => Ok(value),
            Self::Err(err) => Err(err),
        }
    }
}

impl<T, E> From<Result<T, E>> for Outcome<T, E> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::Ok(value),
            Err(err) => Self::Err(err),
        }
    }
}

impl<T, E> From<Outcome<T, E>> for Result<T, E> {
    fn from(outcome: Outcome<T, E>) -> Self {
        outcome.into_result()
    }
}
