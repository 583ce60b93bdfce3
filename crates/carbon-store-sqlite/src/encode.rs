//! Encoding and decoding helpers between domain types and SQLite columns.
//!
//! Dates are stored as `YYYY-MM-DD` text. Rows are read into `Raw*` structs
//! of plain column values inside the connection closure and decoded into
//! domain types afterwards.

use carbon_core::{
  category::RecordKind,
  query::Value,
  record::{ActivityRecord, EmissionRecord, Enrollment, User},
  request::DATE_FORMAT,
};
use chrono::NaiveDate;
use rusqlite::types::Value as SqlValue;

use crate::{Error, Result};

// ─── Tables ──────────────────────────────────────────────────────────────────

/// Where a [`RecordKind`] lives and what its columns are called.
#[derive(Debug, Clone, Copy)]
pub struct ActivityTable {
  pub table:  &'static str,
  pub id:     &'static str,
  pub label:  &'static str,
  pub amount: &'static str,
}

pub fn activity_table(kind: RecordKind) -> ActivityTable {
  let (table, id, label, amount) = match kind {
    RecordKind::Transport => ("Transportation", "Transport_ID", "Vehicle_Type", "Distance_KM"),
    RecordKind::Energy => ("Energy_Consumption", "Energy_ID", "Energy_Source", "Consumption_KWH"),
    RecordKind::Waste => ("Waste_Management", "Waste_ID", "Waste_Type", "Waste_Weight_KG"),
    RecordKind::Industrial => {
      ("Industrial_Activity", "Industry_ID", "Activity_Type", "Emission_Produced")
    }
    RecordKind::Offset => ("Carbon_Offset", "Offset_ID", "Offset_Type", "Offset_Amount"),
  };
  ActivityTable { table, id, label, amount }
}

impl ActivityTable {
  pub fn select_in_range(&self) -> String {
    let ActivityTable { table, id, label, amount } = self;
    format!(
      "SELECT {id}, User_ID, {label}, {amount}, Date FROM {table}
       WHERE User_ID = ?1 AND Date BETWEEN ?2 AND ?3
       ORDER BY {id}"
    )
  }

  pub fn insert(&self) -> String {
    let ActivityTable { table, label, amount, .. } = self;
    format!("INSERT INTO {table} (User_ID, {label}, {amount}, Date) VALUES (?1, ?2, ?3, ?4)")
  }
}

// ─── Dates ───────────────────────────────────────────────────────────────────

pub fn encode_date(date: NaiveDate) -> String { date.format(DATE_FORMAT).to_string() }

/// Parse a stored date. Only the leading `YYYY-MM-DD` is read, so ISO 8601
/// timestamps written through ad-hoc SQL decode to their calendar day.
pub fn decode_date(s: &str) -> Result<NaiveDate> {
  let day = s.trim_start().get(..10).unwrap_or(s);
  NaiveDate::parse_from_str(day, DATE_FORMAT)
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── Loose columns ───────────────────────────────────────────────────────────

/// A magnitude column as SQL arithmetic would see it: numeric text is
/// parsed, anything else counts as zero.
pub fn coerce_amount(value: SqlValue) -> f64 {
  match value {
    SqlValue::Integer(i) => i as f64,
    SqlValue::Real(r) => r,
    SqlValue::Text(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()).unwrap_or(0.0),
    SqlValue::Null | SqlValue::Blob(_) => 0.0,
  }
}

/// A label column rendered as text; `NULL` and blobs become empty.
pub fn coerce_text(value: SqlValue) -> String {
  match value {
    SqlValue::Text(s) => s,
    SqlValue::Integer(i) => i.to_string(),
    SqlValue::Real(r) => r.to_string(),
    SqlValue::Null | SqlValue::Blob(_) => String::new(),
  }
}

// ─── Raw rows ────────────────────────────────────────────────────────────────

/// Nullable columns default to empty text or zero: ad-hoc SQL can write
/// rows the typed commands never would.
pub struct RawUser {
  pub user_id:   i64,
  pub full_name: Option<String>,
  pub email:     Option<String>,
  pub location:  Option<String>,
}

impl RawUser {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      user_id:   row.get(0)?,
      full_name: row.get(1)?,
      email:     row.get(2)?,
      location:  row.get(3)?,
    })
  }

  pub fn into_user(self) -> User {
    User {
      user_id:   self.user_id,
      full_name: self.full_name.unwrap_or_default(),
      email:     self.email.unwrap_or_default(),
      location:  self.location.unwrap_or_default(),
    }
  }
}

pub struct RawActivity {
  pub record_id: i64,
  pub user_id:   i64,
  pub label:     SqlValue,
  pub amount:    SqlValue,
  pub date:      SqlValue,
}

impl RawActivity {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      record_id: row.get(0)?,
      user_id:   row.get(1)?,
      label:     row.get(2)?,
      amount:    row.get(3)?,
      date:      row.get(4)?,
    })
  }

  pub fn into_record(self) -> Result<ActivityRecord> {
    Ok(ActivityRecord {
      record_id: self.record_id,
      user_id:   self.user_id,
      label:     coerce_text(self.label),
      amount:    coerce_amount(self.amount),
      date:      decode_date(&coerce_text(self.date))?,
    })
  }
}

pub struct RawEmissionRecord {
  pub record_id:       i64,
  pub factor_id:       i64,
  pub source_type:     Option<String>,
  pub source_id:       i64,
  pub emission_amount: SqlValue,
  pub date:            SqlValue,
}

impl RawEmissionRecord {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      record_id:       row.get(0)?,
      factor_id:       row.get(1)?,
      source_type:     row.get(2)?,
      source_id:       row.get(3)?,
      emission_amount: row.get(4)?,
      date:            row.get(5)?,
    })
  }

  pub fn into_record(self) -> Result<EmissionRecord> {
    Ok(EmissionRecord {
      record_id:       self.record_id,
      factor_id:       self.factor_id,
      source_type:     self.source_type.unwrap_or_default(),
      source_id:       self.source_id,
      emission_amount: coerce_amount(self.emission_amount),
      date:            decode_date(&coerce_text(self.date))?,
    })
  }
}

pub struct RawEnrollment {
  pub user_id:         i64,
  pub program_id:      i64,
  pub enrollment_date: String,
}

impl RawEnrollment {
  pub fn into_enrollment(self) -> Result<Enrollment> {
    Ok(Enrollment {
      user_id:         self.user_id,
      program_id:      self.program_id,
      enrollment_date: decode_date(&self.enrollment_date)?,
    })
  }
}

// ─── Ad-hoc values ───────────────────────────────────────────────────────────

pub fn decode_value(value: SqlValue) -> Value {
  match value {
    SqlValue::Null => Value::Null,
    SqlValue::Integer(i) => Value::Integer(i),
    SqlValue::Real(r) => Value::Real(r),
    SqlValue::Text(s) => Value::Text(s),
    SqlValue::Blob(b) => Value::Blob(b),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn every_kind_maps_to_a_distinct_table() {
    let mut tables: Vec<_> = RecordKind::ALL.iter().map(|k| activity_table(*k).table).collect();
    tables.sort_unstable();
    tables.dedup();
    assert_eq!(tables.len(), RecordKind::ALL.len());
  }

  #[test]
  fn insert_names_the_kind_columns() {
    let sql = activity_table(RecordKind::Waste).insert();
    assert_eq!(
      sql,
      "INSERT INTO Waste_Management (User_ID, Waste_Type, Waste_Weight_KG, Date) VALUES (?1, ?2, ?3, ?4)"
    );
  }

  fn d(s: &str) -> NaiveDate { NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap() }

  #[test]
  fn dates_round_trip_zero_padded() {
    let day = decode_date("2023-02-05").unwrap();
    assert_eq!(encode_date(day), "2023-02-05");
    assert!(matches!(decode_date("5 Feb 2023"), Err(Error::DateParse(_))));
  }

  #[test]
  fn timestamps_decode_to_their_day() {
    assert_eq!(decode_date("2023-02-01T09:30:00").unwrap(), d("2023-02-01"));
    assert_eq!(decode_date("2023-02-01 09:30").unwrap(), d("2023-02-01"));
    assert!(decode_date("02/01/2023 09:30").is_err());
  }

  #[test]
  fn loose_amounts_coerce_like_sql_arithmetic() {
    assert_eq!(coerce_amount(SqlValue::Integer(3)), 3.0);
    assert_eq!(coerce_amount(SqlValue::Text(" 4.5 ".into())), 4.5);
    assert_eq!(coerce_amount(SqlValue::Text("heavy".into())), 0.0);
    assert_eq!(coerce_amount(SqlValue::Null), 0.0);
    assert_eq!(coerce_text(SqlValue::Integer(7)), "7");
  }
}
