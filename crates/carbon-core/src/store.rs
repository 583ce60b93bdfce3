//! The `EmissionStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `carbon-store-sqlite`).
//! The aggregator, report engine and query runner in this crate depend on
//! this abstraction, not on any concrete backend.

use std::future::Future;

use crate::{
  aggregate::ActivitySet,
  query::Outcome,
  record::{
    EmissionFactor, EmissionRecord, Enrollment, NewActivity, NewUser,
    SustainabilityProgram, User, UserId,
  },
  request::DateRange,
};

/// Abstraction over the relational store holding users, activity, reference
/// data and offsets.
///
/// Implementations open whatever resources an operation needs and release
/// them before the returned future completes; no state is shared between
/// calls other than the store itself.
pub trait EmissionStore: Send + Sync {
  /// Backend error. Must absorb core errors so that validation and
  /// user-lookup failures raised by the engine share one error type, and
  /// classify itself for front-ends.
  type Error: std::error::Error + crate::Classify + From<crate::Error> + Send + Sync + 'static;

  // ── Users ─────────────────────────────────────────────────────────────

  /// Persist a new user; the store assigns the id.
  fn add_user(
    &self,
    input: NewUser,
  ) -> impl Future<Output = Result<User, Self::Error>> + Send + '_;

  /// Retrieve a user by id. Returns `None` if not found.
  fn get_user(
    &self,
    id: UserId,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + '_;

  /// All users, by id.
  fn list_users(
    &self,
  ) -> impl Future<Output = Result<Vec<User>, Self::Error>> + Send + '_;

  // ── Activity ──────────────────────────────────────────────────────────

  /// Insert an activity or offset row and return its id. A `user_id` that
  /// references no user is rejected by the store.
  fn record_activity(
    &self,
    input: NewActivity,
  ) -> impl Future<Output = Result<i64, Self::Error>> + Send + '_;

  /// Enroll a user in a sustainability program.
  fn enroll(
    &self,
    input: Enrollment,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Every activity and offset row of `user_id` dated within `range`
  /// (inclusive), in insertion order.
  fn activity_in_range(
    &self,
    user_id: UserId,
    range: DateRange,
  ) -> impl Future<Output = Result<ActivitySet, Self::Error>> + Send + '_;

  // ── Reference data ────────────────────────────────────────────────────

  fn emission_factors(
    &self,
  ) -> impl Future<Output = Result<Vec<EmissionFactor>, Self::Error>> + Send + '_;

  fn emission_records(
    &self,
  ) -> impl Future<Output = Result<Vec<EmissionRecord>, Self::Error>> + Send + '_;

  fn programs(
    &self,
  ) -> impl Future<Output = Result<Vec<SustainabilityProgram>, Self::Error>> + Send + '_;

  fn enrollments(
    &self,
  ) -> impl Future<Output = Result<Vec<Enrollment>, Self::Error>> + Send + '_;

  // ── Ad-hoc SQL ────────────────────────────────────────────────────────

  /// Execute one arbitrary statement. Reads (see
  /// [`StatementKind`](crate::query::StatementKind)) return their rows;
  /// writes are committed and return the affected-row count.
  fn execute<'a>(
    &'a self,
    sql: &'a str,
  ) -> impl Future<Output = Result<Outcome, Self::Error>> + Send + 'a;
}
