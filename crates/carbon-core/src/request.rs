//! Raw request forms and their validation.
//!
//! Every command a front-end can issue starts as a form of loosely-typed
//! fields (text as typed by a user). `validate` turns it into the typed
//! request the store accepts, or fails with [`Error::Validation`] before the
//! store is touched.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  category::RecordKind,
  record::{Enrollment, NewActivity, NewUser, UserId},
};

/// Dates are stored as fixed-width ISO 8601 strings so that lexicographic
/// comparison in SQL agrees with chronological order.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn format_date(date: NaiveDate) -> String { date.format(DATE_FORMAT).to_string() }

/// Parse a `YYYY-MM-DD` date, naming `field` in the error.
pub fn parse_date(field: &str, raw: &str) -> Result<NaiveDate> {
  let raw = raw.trim();
  if raw.is_empty() {
    return Err(Error::validation(format!("{field} is required")));
  }
  NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| {
    Error::validation(format!(
      "{field} must be a valid date in YYYY-MM-DD format, got {raw:?}"
    ))
  })
}

fn required(field: &str, raw: &str) -> Result<String> {
  let value = raw.trim();
  if value.is_empty() {
    return Err(Error::validation(format!("{field} is required")));
  }
  Ok(value.to_owned())
}

fn number(field: &str, raw: &str) -> Result<f64> {
  let raw = required(field, raw)?;
  match raw.parse::<f64>() {
    Ok(v) if v.is_finite() => Ok(v),
    _ => Err(Error::validation(format!("{field} must be a number, got {raw:?}"))),
  }
}

// ─── Date range ──────────────────────────────────────────────────────────────

/// An inclusive date window.
///
/// Constructing one does not check `from <= to`; an inverted range simply
/// matches nothing. [`ReportForm::validate`] is where ordering is enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
  pub from: NaiveDate,
  pub to:   NaiveDate,
}

impl DateRange {
  pub fn new(from: NaiveDate, to: NaiveDate) -> Self { Self { from, to } }

  /// January 1st of `today`'s year through `today`.
  pub fn year_to_date(today: NaiveDate) -> Self {
    let from = NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today);
    Self { from, to: today }
  }

  pub fn contains(&self, date: NaiveDate) -> bool { self.from <= date && date <= self.to }

  /// The bounds as stored-format strings, for binding into SQL.
  pub fn bounds(&self) -> (String, String) { (format_date(self.from), format_date(self.to)) }
}

// ─── Forms ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserForm {
  pub full_name: String,
  pub email:     String,
  pub location:  String,
}

impl UserForm {
  pub fn validate(self) -> Result<NewUser> {
    Ok(NewUser {
      full_name: required("Full name", &self.full_name)?,
      email:     required("Email", &self.email)?,
      location:  required("Location", &self.location)?,
    })
  }
}

/// An activity or offset entry as typed into a form.
#[derive(Debug, Clone, Deserialize)]
pub struct ActivityForm {
  pub kind:    RecordKind,
  pub user_id: UserId,
  pub label:   String,
  pub amount:  String,
  pub date:    String,
}

impl ActivityForm {
  pub fn validate(self) -> Result<NewActivity> {
    Ok(NewActivity {
      kind:    self.kind,
      user_id: self.user_id,
      label:   required(self.kind.label_name(), &self.label)?,
      amount:  number(self.kind.amount_name(), &self.amount)?,
      date:    parse_date("Date", &self.date)?,
    })
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct EnrollmentForm {
  pub user_id:    UserId,
  pub program_id: i64,
  pub date:       String,
}

impl EnrollmentForm {
  pub fn validate(self) -> Result<Enrollment> {
    Ok(Enrollment {
      user_id:         self.user_id,
      program_id:      self.program_id,
      enrollment_date: parse_date("Enrollment date", &self.date)?,
    })
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportForm {
  pub user_id: UserId,
  pub from:    String,
  pub to:      String,
}

/// A validated report request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReportRequest {
  pub user_id: UserId,
  pub range:   DateRange,
}

impl ReportForm {
  pub fn validate(self) -> Result<ReportRequest> {
    let from = parse_date("From date", &self.from)?;
    let to = parse_date("To date", &self.to)?;
    if from > to {
      return Err(Error::validation(format!(
        "From date {} is after To date {}",
        format_date(from),
        format_date(to)
      )));
    }
    Ok(ReportRequest { user_id: self.user_id, range: DateRange { from, to } })
  }
}
