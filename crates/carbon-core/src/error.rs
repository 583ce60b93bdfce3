//! Error types for `carbon-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A request was rejected before it reached the store.
  #[error("validation error: {0}")]
  Validation(String),

  #[error("user not found: {0}")]
  UserNotFound(i64),

  #[error("unknown canned query: {0:?}")]
  UnknownCannedQuery(String),
}

impl Error {
  pub(crate) fn validation(msg: impl Into<String>) -> Self {
    Self::Validation(msg.into())
  }
}

/// Coarse failure classes front-ends branch on, independent of backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
  /// Bad input; nothing was sent to the store.
  Validation,
  /// A user or canned query named in the request does not exist.
  NotFound,
  /// The store rejected a statement.
  Query,
  /// The store could not be reached, or failed internally.
  Internal,
}

/// Implemented by every error an [`EmissionStore`](crate::store::EmissionStore)
/// can return.
pub trait Classify {
  fn class(&self) -> ErrorClass;
}

impl Classify for Error {
  fn class(&self) -> ErrorClass {
    match self {
      Error::Validation(_) => ErrorClass::Validation,
      Error::UserNotFound(_) | Error::UnknownCannedQuery(_) => ErrorClass::NotFound,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
