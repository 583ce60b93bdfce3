//! [`SqliteStore`]: the SQLite implementation of [`EmissionStore`].

use std::path::{Path, PathBuf};

use carbon_core::{
  aggregate::ActivitySet,
  category::RecordKind,
  query::{Outcome, QueryResult, StatementKind},
  record::{
    ActivityRecord, EmissionFactor, EmissionRecord, Enrollment, NewActivity, NewUser,
    SustainabilityProgram, User, UserId,
  },
  request::DateRange,
  store::EmissionStore,
};
use rusqlite::{OpenFlags, OptionalExtension as _};
use tokio_rusqlite::Connection;

use crate::{
  Error, Result,
  encode::{
    RawActivity, RawEmissionRecord, RawEnrollment, RawUser, activity_table,
    decode_value, encode_date,
  },
  schema::{CONNECTION_PRAGMAS, SCHEMA},
  seed,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// An emission store backed by a single SQLite file.
///
/// Holds only the file location. Every operation opens a fresh connection
/// and drops it before returning, on success and on error alike.
#[derive(Debug, Clone)]
pub struct SqliteStore {
  path: PathBuf,
}

impl SqliteStore {
  /// A store at `path`. Nothing is opened until the first operation.
  pub fn new(path: impl Into<PathBuf>) -> Self { Self { path: path.into() } }

  pub fn path(&self) -> &Path { &self.path }

  fn unavailable(&self, e: impl std::fmt::Display) -> Error {
    Error::StoreUnavailable { path: self.path.clone(), message: e.to_string() }
  }

  /// Open a connection to an existing store file.
  async fn connect(&self) -> Result<Connection> {
    let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
      | OpenFlags::SQLITE_OPEN_URI
      | OpenFlags::SQLITE_OPEN_NO_MUTEX;
    let conn = Connection::open_with_flags(&self.path, flags)
      .await
      .map_err(|e| self.unavailable(e))?;
    conn
      .call(|conn| {
        conn.execute_batch(CONNECTION_PRAGMAS)?;
        Ok(())
      })
      .await
      .map_err(|e| self.unavailable(e))?;
    Ok(conn)
  }

  /// Delete any existing store file, then create the schema and the demo
  /// rows in one transaction.
  pub async fn initialize(&self) -> Result<()> {
    match tokio::fs::remove_file(&self.path).await {
      Ok(()) => tracing::info!(path = %self.path.display(), "removed existing store"),
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
      Err(e) => return Err(self.unavailable(e)),
    }

    let conn = Connection::open(&self.path)
      .await
      .map_err(|e| self.unavailable(e))?;
    conn
      .call(|conn| {
        conn.execute_batch(CONNECTION_PRAGMAS)?;
        conn.execute_batch(SCHEMA)?;
        let tx = conn.transaction()?;
        seed::populate(&tx)?;
        tx.commit()?;
        Ok(())
      })
      .await?;

    tracing::info!(path = %self.path.display(), "initialized store with demo data");
    Ok(())
  }

  /// Whether the store file exists and carries the schema.
  pub async fn is_initialized(&self) -> Result<bool> {
    if !tokio::fs::try_exists(&self.path).await? {
      return Ok(false);
    }
    let conn = self.connect().await?;
    let found = conn
      .call(|conn| {
        Ok(
          conn
            .query_row(
              "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'User_Profile'",
              [],
              |_| Ok(()),
            )
            .optional()?
            .is_some(),
        )
      })
      .await?;
    Ok(found)
  }

  async fn activity_rows(
    conn: &Connection,
    kind: RecordKind,
    user_id: UserId,
    range: DateRange,
  ) -> Result<Vec<ActivityRecord>> {
    let sql = activity_table(kind).select_in_range();
    let (from, to) = range.bounds();

    let raws: Vec<RawActivity> = conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params![user_id, from, to], RawActivity::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawActivity::into_record).collect()
  }
}

// ─── EmissionStore impl ──────────────────────────────────────────────────────

impl EmissionStore for SqliteStore {
  type Error = Error;

  // ── Users ─────────────────────────────────────────────────────────────────

  async fn add_user(&self, input: NewUser) -> Result<User> {
    let conn = self.connect().await?;
    let NewUser { full_name, email, location } = input;

    let user = conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO User_Profile (Full_Name, Email, Location) VALUES (?1, ?2, ?3)",
          rusqlite::params![full_name, email, location],
        )?;
        Ok(User { user_id: conn.last_insert_rowid(), full_name, email, location })
      })
      .await?;

    tracing::info!(user_id = user.user_id, "added user");
    Ok(user)
  }

  async fn get_user(&self, id: UserId) -> Result<Option<User>> {
    let conn = self.connect().await?;

    let raw: Option<RawUser> = conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT User_ID, Full_Name, Email, Location FROM User_Profile WHERE User_ID = ?1",
              rusqlite::params![id],
              RawUser::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    Ok(raw.map(RawUser::into_user))
  }

  async fn list_users(&self) -> Result<Vec<User>> {
    let conn = self.connect().await?;

    let raws: Vec<RawUser> = conn
      .call(|conn| {
        let mut stmt = conn
          .prepare("SELECT User_ID, Full_Name, Email, Location FROM User_Profile ORDER BY User_ID")?;
        let rows = stmt
          .query_map([], RawUser::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(raws.into_iter().map(RawUser::into_user).collect())
  }

  // ── Activity ──────────────────────────────────────────────────────────────

  async fn record_activity(&self, input: NewActivity) -> Result<i64> {
    let conn = self.connect().await?;
    let sql = activity_table(input.kind).insert();
    let date = encode_date(input.date);
    let NewActivity { kind, user_id, label, amount, .. } = input;

    let id = conn
      .call(move |conn| {
        conn.execute(&sql, rusqlite::params![user_id, label, amount, date])?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    tracing::info!(%kind, user_id, id, "recorded activity");
    Ok(id)
  }

  async fn enroll(&self, input: Enrollment) -> Result<()> {
    let conn = self.connect().await?;
    let Enrollment { user_id, program_id, enrollment_date } = input;
    let date = encode_date(enrollment_date);

    conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO User_Program (User_ID, Program_ID, Enrollment_Date) VALUES (?1, ?2, ?3)",
          rusqlite::params![user_id, program_id, date],
        )?;
        Ok(())
      })
      .await?;

    tracing::info!(user_id, program_id, "enrolled user");
    Ok(())
  }

  async fn activity_in_range(&self, user_id: UserId, range: DateRange) -> Result<ActivitySet> {
    let conn = self.connect().await?;

    Ok(ActivitySet {
      transport:  Self::activity_rows(&conn, RecordKind::Transport, user_id, range).await?,
      energy:     Self::activity_rows(&conn, RecordKind::Energy, user_id, range).await?,
      waste:      Self::activity_rows(&conn, RecordKind::Waste, user_id, range).await?,
      industrial: Self::activity_rows(&conn, RecordKind::Industrial, user_id, range).await?,
      offsets:    Self::activity_rows(&conn, RecordKind::Offset, user_id, range).await?,
    })
  }

  // ── Reference data ────────────────────────────────────────────────────────

  async fn emission_factors(&self) -> Result<Vec<EmissionFactor>> {
    let conn = self.connect().await?;

    let factors = conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT Factor_ID, Source_Type, Emission_Per_Unit FROM Emission_Factor ORDER BY Factor_ID",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(EmissionFactor {
              factor_id:         row.get(0)?,
              source_type:       row.get::<_, Option<String>>(1)?.unwrap_or_default(),
              emission_per_unit: row.get::<_, Option<f64>>(2)?.unwrap_or(0.0),
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(factors)
  }

  async fn emission_records(&self) -> Result<Vec<EmissionRecord>> {
    let conn = self.connect().await?;

    let raws: Vec<RawEmissionRecord> = conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT Record_ID, Factor_ID, Source_Type, Source_ID, Emission_Amount, Date
           FROM Emission_Record ORDER BY Record_ID",
        )?;
        let rows = stmt
          .query_map([], RawEmissionRecord::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawEmissionRecord::into_record).collect()
  }

  async fn programs(&self) -> Result<Vec<SustainabilityProgram>> {
    let conn = self.connect().await?;

    let programs = conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT Program_ID, Program_Name, Description FROM Sustainability_Program ORDER BY Program_ID",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(SustainabilityProgram {
              program_id:   row.get(0)?,
              program_name: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
              description:  row.get::<_, Option<String>>(2)?.unwrap_or_default(),
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(programs)
  }

  async fn enrollments(&self) -> Result<Vec<Enrollment>> {
    let conn = self.connect().await?;

    let raws: Vec<RawEnrollment> = conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT User_ID, Program_ID, Enrollment_Date FROM User_Program
           ORDER BY User_ID, Program_ID",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(RawEnrollment {
              user_id:         row.get(0)?,
              program_id:      row.get(1)?,
              enrollment_date: row.get(2)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawEnrollment::into_enrollment).collect()
  }

  // ── Ad-hoc SQL ────────────────────────────────────────────────────────────

  async fn execute<'a>(&'a self, sql: &'a str) -> Result<Outcome> {
    let kind = StatementKind::classify(sql);
    let statement = sql.trim().to_owned();
    let conn = self.connect().await?;

    let outcome = conn
      .call(move |conn| match kind {
        StatementKind::Read => {
          let mut stmt = conn.prepare(&statement)?;
          let columns: Vec<String> =
            stmt.column_names().into_iter().map(str::to_owned).collect();
          let width = columns.len();
          let mut rows = Vec::new();
          let mut cursor = stmt.query([])?;
          while let Some(row) = cursor.next()? {
            let mut values = Vec::with_capacity(width);
            for i in 0..width {
              values.push(decode_value(row.get(i)?));
            }
            rows.push(values);
          }
          Ok(Outcome::Rows(QueryResult { columns, rows }))
        }
        StatementKind::Write => {
          // Step to completion; rows a write yields (PRAGMA, RETURNING) are
          // discarded.
          let mut stmt = conn.prepare(&statement)?;
          let mut cursor = stmt.query([])?;
          while cursor.next()?.is_some() {}
          Ok(Outcome::RowsAffected { count: conn.changes() as usize })
        }
      })
      .await
      .map_err(Error::from);

    match &outcome {
      Ok(Outcome::Rows(result)) => {
        tracing::debug!(rows = result.rows.len(), columns = result.columns.len(), "query returned rows")
      }
      Ok(Outcome::RowsAffected { count }) => tracing::debug!(count, "statement committed"),
      Err(e) => tracing::warn!(error = %e, "statement failed"),
    }
    outcome
  }
}
