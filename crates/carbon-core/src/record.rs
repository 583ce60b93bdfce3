//! Persisted entities.
//!
//! Users own activity records and offsets. Emission factors and
//! sustainability programs are reference data seeded once. Emission records
//! are a historical log kept alongside; reports never read them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::category::RecordKind;

pub type UserId = i64;

// ─── Users ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
  pub user_id:   UserId,
  pub full_name: String,
  pub email:     String,
  pub location:  String,
}

impl User {
  /// `"<id> - <name>"`, the form a user picker displays.
  pub fn choice_label(&self) -> String {
    format!("{} - {}", self.user_id, self.full_name)
  }
}

/// A validated user insertion. Build one with
/// [`UserForm::validate`](crate::request::UserForm::validate).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewUser {
  pub full_name: String,
  pub email:     String,
  pub location:  String,
}

// ─── Activity ────────────────────────────────────────────────────────────────

/// One row of `Transportation`, `Energy_Consumption`, `Waste_Management`,
/// `Industrial_Activity` or `Carbon_Offset`.
///
/// `label` is the kind-specific type (vehicle type, energy source, waste
/// type, activity type, offset type) and `amount` the kind-specific magnitude
/// (distance, consumption, weight, emission produced, offset amount).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
  pub record_id: i64,
  pub user_id:   UserId,
  pub label:     String,
  pub amount:    f64,
  pub date:      NaiveDate,
}

/// A validated activity or offset insertion. Build one with
/// [`ActivityForm::validate`](crate::request::ActivityForm::validate).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewActivity {
  pub kind:    RecordKind,
  pub user_id: UserId,
  pub label:   String,
  pub amount:  f64,
  pub date:    NaiveDate,
}

// ─── Reference data ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionFactor {
  pub factor_id:         i64,
  pub source_type:       String,
  pub emission_per_unit: f64,
}

/// A logged emission event. Audit history only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionRecord {
  pub record_id:       i64,
  pub factor_id:       i64,
  pub source_type:     String,
  pub source_id:       i64,
  pub emission_amount: f64,
  pub date:            NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SustainabilityProgram {
  pub program_id:   i64,
  pub program_name: String,
  pub description:  String,
}

/// A user's enrollment in a sustainability program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enrollment {
  pub user_id:         UserId,
  pub program_id:      i64,
  pub enrollment_date: NaiveDate,
}
