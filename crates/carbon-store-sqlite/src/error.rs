//! Error type for `carbon-store-sqlite`.

use std::path::PathBuf;

use carbon_core::{Classify, ErrorClass};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A request was rejected before reaching the store.
  #[error("validation error: {0}")]
  Validation(String),

  #[error("user not found: {0}")]
  UserNotFound(i64),

  #[error("unknown canned query: {0:?}")]
  UnknownCannedQuery(String),

  /// SQLite rejected a statement. The message is SQLite's, verbatim.
  #[error("query error: {0}")]
  Query(String),

  /// The store file could not be opened or created.
  #[error("store unavailable at {}: {message}", path.display())]
  StoreUnavailable { path: PathBuf, message: String },

  /// The connection worker failed outside of statement execution.
  #[error("database error: {0}")]
  Database(tokio_rusqlite::Error),

  /// A stored date column did not start with `YYYY-MM-DD`.
  #[error("date parse error: {0}")]
  DateParse(String),

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
}

impl Classify for Error {
  fn class(&self) -> ErrorClass {
    match self {
      Error::Validation(_) => ErrorClass::Validation,
      Error::UserNotFound(_) | Error::UnknownCannedQuery(_) => ErrorClass::NotFound,
      Error::Query(_) => ErrorClass::Query,
      Error::StoreUnavailable { .. }
      | Error::Database(_)
      | Error::DateParse(_)
      | Error::Io(_) => ErrorClass::Internal,
    }
  }
}

impl From<carbon_core::Error> for Error {
  fn from(e: carbon_core::Error) -> Self {
    match e {
      carbon_core::Error::Validation(msg) => Self::Validation(msg),
      carbon_core::Error::UserNotFound(id) => Self::UserNotFound(id),
      carbon_core::Error::UnknownCannedQuery(name) => Self::UnknownCannedQuery(name),
    }
  }
}

impl From<tokio_rusqlite::Error> for Error {
  fn from(e: tokio_rusqlite::Error) -> Self {
    match e {
      tokio_rusqlite::Error::Rusqlite(e) => Self::Query(e.to_string()),
      other => Self::Database(other),
    }
  }
}

impl From<rusqlite::Error> for Error {
  fn from(e: rusqlite::Error) -> Self { Self::Query(e.to_string()) }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
