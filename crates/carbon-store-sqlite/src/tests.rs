//! Integration tests for `SqliteStore` against a seeded file in a temp dir.

use carbon_core::{
  aggregate::aggregate,
  category::RecordKind,
  query::{Outcome, QueryRunner, Value},
  record::{Enrollment, NewActivity, NewUser},
  report::report,
  request::{DateRange, ReportRequest},
  store::EmissionStore,
};
use chrono::NaiveDate;
use tempfile::TempDir;

use crate::{Error, SqliteStore, seed};

fn d(s: &str) -> NaiveDate { NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap() }

fn q1() -> DateRange { DateRange::new(d("2023-01-01"), d("2023-03-31")) }

async fn store() -> (TempDir, SqliteStore) {
  let dir = tempfile::tempdir().expect("temp dir");
  let store = SqliteStore::new(dir.path().join("carbon.db"));
  store.initialize().await.expect("seeded store");
  (dir, store)
}

fn close(a: f64, b: f64) -> bool { (a - b).abs() < 1e-9 }

// ─── Lifecycle ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn missing_file_is_unavailable() {
  let dir = tempfile::tempdir().unwrap();
  let s = SqliteStore::new(dir.path().join("absent.db"));

  assert!(!s.is_initialized().await.unwrap());
  let err = s.list_users().await.unwrap_err();
  assert!(matches!(err, Error::StoreUnavailable { .. }), "{err:?}");
  assert!(!dir.path().join("absent.db").exists());
}

#[tokio::test]
async fn initialize_seeds_every_table() {
  let (_dir, s) = store().await;
  assert!(s.is_initialized().await.unwrap());

  assert_eq!(s.list_users().await.unwrap().len(), seed::USERS.len());
  assert_eq!(s.emission_factors().await.unwrap().len(), seed::EMISSION_FACTORS.len());
  assert_eq!(s.emission_records().await.unwrap().len(), seed::EMISSION_RECORDS.len());
  assert_eq!(s.programs().await.unwrap().len(), seed::SUSTAINABILITY_PROGRAMS.len());
  assert_eq!(s.enrollments().await.unwrap().len(), seed::USER_PROGRAMS.len());
}

#[tokio::test]
async fn initialize_discards_previous_contents() {
  let (_dir, s) = store().await;
  s.add_user(NewUser {
    full_name: "Temp".into(),
    email:     "temp@example.com".into(),
    location:  "Nowhere".into(),
  })
  .await
  .unwrap();
  assert_eq!(s.list_users().await.unwrap().len(), 6);

  s.initialize().await.unwrap();
  assert_eq!(s.list_users().await.unwrap().len(), 5);
}

// ─── Users ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn get_user_returns_seeded_row() {
  let (_dir, s) = store().await;
  let user = s.get_user(1).await.unwrap().unwrap();
  assert_eq!(user.full_name, "John Doe");
  assert_eq!(user.choice_label(), "1 - John Doe");
  assert!(s.get_user(9999).await.unwrap().is_none());
}

#[tokio::test]
async fn add_user_assigns_next_id() {
  let (_dir, s) = store().await;
  let user = s
    .add_user(NewUser {
      full_name: "Ada Green".into(),
      email:     "ada@example.com".into(),
      location:  "Boston".into(),
    })
    .await
    .unwrap();
  assert_eq!(user.user_id, 6);
  assert_eq!(s.get_user(6).await.unwrap(), Some(user));
}

// ─── Aggregation ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn seeded_user_one_quarter_totals() {
  let (_dir, s) = store().await;
  let agg = aggregate(&s, 1, q1()).await.unwrap();

  assert!(close(agg.totals.transport, 414.583));
  assert!(close(agg.totals.energy, 193.56));
  assert!(close(agg.totals.waste, 3.886));
  assert!(close(agg.totals.industrial, 1010.3));
  assert!(close(agg.totals.offset, 135.0));
  assert!(close(agg.totals.total_emissions(), 1622.329));
  assert!(close(agg.totals.net_emissions(), 1487.329));
}

#[tokio::test]
async fn window_bounds_are_inclusive() {
  let (_dir, s) = store().await;
  let one_day = DateRange::new(d("2023-01-15"), d("2023-01-15"));
  let agg = aggregate(&s, 1, one_day).await.unwrap();
  assert_eq!(agg.transport.len(), 1);
  assert_eq!(agg.industrial.len(), 1);
  assert!(close(agg.totals.transport, 347.655));
}

#[tokio::test]
async fn unknown_user_aggregates_to_zero() {
  let (_dir, s) = store().await;
  let agg = aggregate(&s, 9999, q1()).await.unwrap();
  assert_eq!(agg.totals.total_emissions(), 0.0);
  assert_eq!(agg.totals.net_emissions(), 0.0);
}

#[tokio::test]
async fn unmatched_labels_contribute_zero() {
  let (_dir, s) = store().await;
  // User 4: Bicycle, Solar, Glass, Food Processing, Tree Planting.
  let agg = aggregate(&s, 4, q1()).await.unwrap();
  assert_eq!(agg.totals.transport, 0.0);
  assert_eq!(agg.totals.energy, 0.0);
  assert!(close(agg.totals.waste, 4.5 * 0.58));
  assert!(close(agg.totals.industrial, 350.2));
}

// ─── Reports ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn report_for_seeded_user() {
  let (_dir, s) = store().await;
  let r = report(&s, ReportRequest { user_id: 1, range: q1() }).await.unwrap();

  assert_eq!(r.user.full_name, "John Doe");
  assert!(close(r.summary.net_emissions, 1487.329));
  assert_eq!(r.recommendation.dominant, carbon_core::category::Category::Industrial);
  assert!(r.recommendation.lines[0].contains("Industrial Activity"));
  // 135 is below 10% of 1622.329.
  assert!(r.recommendation.lines.iter().any(|l| l == carbon_core::category::OFFSET_ADVICE));
  assert_eq!(r.details.offsets.len(), 2);
}

#[tokio::test]
async fn report_for_missing_user_fails() {
  let (_dir, s) = store().await;
  let err = report(&s, ReportRequest { user_id: 9999, range: q1() })
    .await
    .unwrap_err();
  assert!(matches!(err, Error::UserNotFound(9999)));
}

#[tokio::test]
async fn recorded_activity_shows_up_in_report() {
  let (_dir, s) = store().await;
  let id = s
    .record_activity(NewActivity {
      kind:    RecordKind::Transport,
      user_id: 1,
      label:   "Car".into(),
      amount:  100.0,
      date:    d("2023-03-15"),
    })
    .await
    .unwrap();
  assert_eq!(id, 9);

  let r = report(&s, ReportRequest { user_id: 1, range: q1() }).await.unwrap();
  assert!(close(r.summary.transport_emissions, 414.583 + 231.0));
}

#[tokio::test]
async fn report_tolerates_loose_ad_hoc_rows() {
  let (_dir, s) = store().await;
  s.execute(
    "INSERT INTO Transportation (User_ID, Vehicle_Type, Distance_KM, Date) \
     VALUES (1, 'Car', 10.0, '2023-02-01T09:30:00')",
  )
  .await
  .unwrap();
  s.execute(
    "INSERT INTO Waste_Management (User_ID, Waste_Type, Waste_Weight_KG, Date) \
     VALUES (1, 'Plastic', 'heavy', '2023-02-02')",
  )
  .await
  .unwrap();

  let r = report(&s, ReportRequest { user_id: 1, range: q1() }).await.unwrap();
  assert!(close(r.summary.transport_emissions, 414.583 + 23.1));
  assert!(close(r.summary.waste_emissions, 3.886));
  assert!(r.details.transport.iter().any(|row| row.record.date == d("2023-02-01")));
  assert!(r.details.waste.iter().any(|row| row.record.amount == 0.0));
}

#[tokio::test]
async fn undecodable_stored_date_is_internal() {
  let (_dir, s) = store().await;
  s.execute(
    "INSERT INTO Transportation (User_ID, Vehicle_Type, Distance_KM, Date) \
     VALUES (1, 'Car', 10.0, '2023-02-xx')",
  )
  .await
  .unwrap();

  let err = report(&s, ReportRequest { user_id: 1, range: q1() }).await.unwrap_err();
  assert!(matches!(err, Error::DateParse(_)), "{err:?}");
  assert_eq!(carbon_core::Classify::class(&err), carbon_core::ErrorClass::Internal);
}

#[tokio::test]
async fn activity_for_unknown_user_is_rejected() {
  let (_dir, s) = store().await;
  let err = s
    .record_activity(NewActivity {
      kind:    RecordKind::Offset,
      user_id: 9999,
      label:   "Tree Planting".into(),
      amount:  10.0,
      date:    d("2023-03-15"),
    })
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Query(ref m) if m.contains("FOREIGN KEY")), "{err:?}");
}

#[tokio::test]
async fn duplicate_enrollment_is_rejected() {
  let (_dir, s) = store().await;
  let enrollment = Enrollment { user_id: 4, program_id: 2, enrollment_date: d("2023-03-01") };
  s.enroll(enrollment.clone()).await.unwrap();
  assert!(matches!(s.enroll(enrollment).await, Err(Error::Query(_))));
}

// ─── Ad-hoc SQL ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn select_returns_columns_and_rows() {
  let (_dir, s) = store().await;
  let mut runner = QueryRunner::new(&s);

  let Outcome::Rows(result) = runner.run("SELECT 1").await.unwrap() else {
    panic!("expected rows");
  };
  assert_eq!(result.columns.len(), 1);
  assert_eq!(result.rows, vec![vec![Value::Integer(1)]]);
}

#[tokio::test]
async fn select_preserves_store_column_names() {
  let (_dir, s) = store().await;
  let Outcome::Rows(result) = s
    .execute("SELECT Full_Name, Location FROM User_Profile WHERE User_ID = 2")
    .await
    .unwrap()
  else {
    panic!("expected rows");
  };
  assert_eq!(result.columns, ["Full_Name", "Location"]);
  assert_eq!(result.rows[0][1], Value::Text("Los Angeles".into()));
}

#[tokio::test]
async fn write_reports_affected_rows() {
  let (_dir, s) = store().await;
  let outcome = s.execute("DELETE FROM Transportation WHERE Transport_ID = 999").await.unwrap();
  assert_eq!(outcome, Outcome::RowsAffected { count: 0 });

  let outcome = s
    .execute("UPDATE User_Profile SET Location = 'Boston' WHERE User_ID IN (1, 2)")
    .await
    .unwrap();
  assert_eq!(outcome, Outcome::RowsAffected { count: 2 });
  assert_eq!(s.get_user(1).await.unwrap().unwrap().location, "Boston");
}

#[tokio::test]
async fn pragma_runs_as_a_write() {
  let (_dir, s) = store().await;
  let outcome = s.execute("PRAGMA table_info(User_Profile)").await.unwrap();
  assert_eq!(outcome, Outcome::RowsAffected { count: 0 });
}

#[tokio::test]
async fn returning_clause_counts_the_insert() {
  let (_dir, s) = store().await;
  let outcome = s
    .execute(
      "INSERT INTO User_Profile (Full_Name, Email, Location) \
       VALUES ('Ann Lee', 'ann@example.com', 'Oslo') RETURNING User_ID",
    )
    .await
    .unwrap();
  assert_eq!(outcome, Outcome::RowsAffected { count: 1 });
  assert_eq!(s.list_users().await.unwrap().len(), seed::USERS.len() + 1);
}

#[tokio::test]
async fn syntax_error_is_a_query_error_and_still_recorded() {
  let (_dir, s) = store().await;
  let mut runner = QueryRunner::new(&s);

  let err = runner.run("SELEC * FROM nowhere").await.unwrap_err();
  assert!(matches!(err, Error::Query(ref m) if m.contains("syntax error")), "{err:?}");
  assert_eq!(runner.history().entries(), ["SELEC * FROM nowhere"]);
}

#[tokio::test]
async fn blank_sql_is_rejected_before_the_store() {
  let (_dir, s) = store().await;
  let mut runner = QueryRunner::new(&s);
  assert!(matches!(runner.run("   ").await, Err(Error::Validation(_))));
  assert!(runner.history().is_empty());
}

#[tokio::test]
async fn history_walks_across_runs() {
  let (_dir, s) = store().await;
  let mut runner = QueryRunner::new(&s);
  for sql in ["SELECT 1", "SELECT 2", "SELECT 2", "SELECT 3"] {
    runner.run(sql).await.unwrap();
  }
  assert_eq!(runner.history().len(), 3);
  assert_eq!(runner.previous(), Some("SELECT 2"));
  assert_eq!(runner.previous(), Some("SELECT 1"));
  assert_eq!(runner.previous(), None);
  assert_eq!(runner.next(), Some("SELECT 2"));
}

// ─── Canned queries ──────────────────────────────────────────────────────────

#[tokio::test]
async fn every_read_in_the_catalogs_runs() {
  let (_dir, s) = store().await;
  let mut runner = QueryRunner::new(&s);

  // The view has to exist before it can be queried.
  runner.run_canned("Create Carbon Footprint View").await.unwrap();

  for query in carbon_core::catalog::all() {
    if query.name == "Create Carbon Footprint View" {
      continue;
    }
    let (_, outcome) = runner
      .run_canned(query.name)
      .await
      .unwrap_or_else(|e| panic!("{}: {e}", query.name));
    assert!(matches!(outcome, Outcome::Rows(_)), "{}", query.name);
  }
}

#[tokio::test]
async fn canned_view_creation_is_idempotent() {
  let (_dir, s) = store().await;
  let mut runner = QueryRunner::new(&s);
  let (_, first) = runner.run_canned("Create Carbon Footprint View").await.unwrap();
  assert_eq!(first, Outcome::RowsAffected { count: 0 });
  runner.run_canned("Create Carbon Footprint View").await.unwrap();

  let (_, outcome) = runner.run_canned("Query Carbon Footprint View").await.unwrap();
  let Outcome::Rows(result) = outcome else { panic!("expected rows") };
  assert_eq!(result.rows.len(), seed::USERS.len());
}

#[tokio::test]
async fn unknown_canned_query_is_rejected() {
  let (_dir, s) = store().await;
  let mut runner = QueryRunner::new(&s);
  let err = runner.run_canned("No Such Query").await.unwrap_err();
  assert!(matches!(err, Error::UnknownCannedQuery(ref n) if n == "No Such Query"));
}
