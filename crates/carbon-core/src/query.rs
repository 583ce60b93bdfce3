//! The ad-hoc query runner and its session history.

use serde::{Deserialize, Serialize};

use crate::{
  Error,
  catalog::{self, CannedQuery},
  store::EmissionStore,
};

// ─── Results ─────────────────────────────────────────────────────────────────

/// A single cell of a result set, as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
  Null,
  Integer(i64),
  Real(f64),
  Text(String),
  Blob(Vec<u8>),
}

impl std::fmt::Display for Value {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Value::Null => f.write_str("NULL"),
      Value::Integer(i) => write!(f, "{i}"),
      Value::Real(r) => write!(f, "{r}"),
      Value::Text(s) => f.write_str(s),
      Value::Blob(b) => write!(f, "<{} bytes>", b.len()),
    }
  }
}

/// Tabular output of a read statement, in the store's column and row order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
  pub columns: Vec<String>,
  pub rows:    Vec<Vec<Value>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
  Rows(QueryResult),
  RowsAffected { count: usize },
}

// ─── Classification ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
  /// Produces a result set.
  Read,
  /// Modifies the store and reports an affected-row count.
  Write,
}

/// Strip leading whitespace and SQL comments (`-- ...` and `/* ... */`).
fn skip_comments(mut sql: &str) -> &str {
  loop {
    sql = sql.trim_start();
    if let Some(rest) = sql.strip_prefix("--") {
      sql = rest.find('\n').map_or("", |i| &rest[i + 1..]);
    } else if let Some(rest) = sql.strip_prefix("/*") {
      sql = rest.find("*/").map_or("", |i| &rest[i + 2..]);
    } else {
      return sql;
    }
  }
}

impl StatementKind {
  /// Classify by the statement's first keyword, case-insensitively. Any
  /// keyword beginning with `SELECT` counts as a read; `WITH` and `VALUES`
  /// must match whole.
  pub fn classify(sql: &str) -> Self {
    let body = skip_comments(sql);
    let keyword: String = body
      .chars()
      .take_while(|c| c.is_ascii_alphabetic())
      .collect::<String>()
      .to_ascii_uppercase();
    match keyword.as_str() {
      k if k.starts_with("SELECT") => Self::Read,
      "WITH" | "VALUES" => Self::Read,
      _ => Self::Write,
    }
  }
}

// ─── History ─────────────────────────────────────────────────────────────────

/// The linear list of statements run in one session, with a cursor for
/// stepping back and forth.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryHistory {
  entries: Vec<String>,
  cursor:  Option<usize>,
}

impl QueryHistory {
  pub fn new() -> Self { Self::default() }

  /// Append `sql` unless it equals the newest entry. Either way the cursor
  /// moves to the newest entry.
  pub fn push(&mut self, sql: impl Into<String>) {
    let sql = sql.into();
    if self.entries.last() != Some(&sql) {
      self.entries.push(sql);
    }
    self.cursor = self.entries.len().checked_sub(1);
  }

  /// Step back one entry. `None` (and no movement) at the oldest entry or
  /// when the history is empty.
  pub fn previous(&mut self) -> Option<&str> {
    let cursor = self.cursor.filter(|c| *c > 0)? - 1;
    self.cursor = Some(cursor);
    self.entries.get(cursor).map(String::as_str)
  }

  /// Step forward one entry. `None` (and no movement) at the newest entry or
  /// when the history is empty.
  pub fn next(&mut self) -> Option<&str> {
    let cursor = self.cursor.filter(|c| c + 1 < self.entries.len())? + 1;
    self.cursor = Some(cursor);
    self.entries.get(cursor).map(String::as_str)
  }

  /// The entry under the cursor.
  pub fn current(&self) -> Option<&str> {
    self.cursor.and_then(|c| self.entries.get(c)).map(String::as_str)
  }

  pub fn cursor(&self) -> Option<usize> { self.cursor }

  pub fn entries(&self) -> &[String] { &self.entries }

  pub fn len(&self) -> usize { self.entries.len() }

  pub fn is_empty(&self) -> bool { self.entries.is_empty() }
}

// ─── Runner ──────────────────────────────────────────────────────────────────

/// Runs arbitrary SQL against a store and remembers what was run.
pub struct QueryRunner<'s, S> {
  store:   &'s S,
  history: QueryHistory,
}

impl<'s, S> QueryRunner<'s, S>
where
  S: EmissionStore,
{
  pub fn new(store: &'s S) -> Self { Self { store, history: QueryHistory::new() } }

  /// Record `sql` in the history, then execute it.
  ///
  /// Blank input is rejected as a validation error and not recorded. A
  /// failing statement is still recorded so it can be recalled and fixed.
  pub async fn run(&mut self, sql: &str) -> Result<Outcome, S::Error> {
    if sql.trim().is_empty() {
      return Err(Error::Validation("Please enter an SQL query to run".into()).into());
    }
    self.history.push(sql);
    self.store.execute(sql).await
  }

  /// Run a query from the canned catalogs by name.
  pub async fn run_canned(&mut self, name: &str) -> Result<(&'static CannedQuery, Outcome), S::Error> {
    let query = catalog::find(name).ok_or_else(|| Error::UnknownCannedQuery(name.to_owned()))?;
    let outcome = self.run(query.sql.trim()).await?;
    Ok((query, outcome))
  }

  pub fn previous(&mut self) -> Option<&str> { self.history.previous() }

  pub fn next(&mut self) -> Option<&str> { self.history.next() }

  pub fn history(&self) -> &QueryHistory { &self.history }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn select_is_read_regardless_of_case_and_padding() {
    assert_eq!(StatementKind::classify("SELECT 1"), StatementKind::Read);
    assert_eq!(StatementKind::classify("  \n\tselect * from t"), StatementKind::Read);
    assert_eq!(StatementKind::classify("SeLeCt 1"), StatementKind::Read);
  }

  #[test]
  fn everything_else_is_write() {
    assert_eq!(StatementKind::classify("DELETE FROM t"), StatementKind::Write);
    assert_eq!(StatementKind::classify("insert into t values (1)"), StatementKind::Write);
    assert_eq!(StatementKind::classify("WITHOUT"), StatementKind::Write);
    assert_eq!(StatementKind::classify(""), StatementKind::Write);
  }

  #[test]
  fn select_is_matched_as_a_prefix() {
    assert_eq!(StatementKind::classify("SELECTx FROM t"), StatementKind::Read);
    assert_eq!(StatementKind::classify("selected"), StatementKind::Read);
    assert_eq!(StatementKind::classify("SELEC * FROM t"), StatementKind::Write);
  }

  #[test]
  fn comments_and_ctes_are_skipped_to_the_keyword() {
    assert_eq!(StatementKind::classify("-- note\n  SELECT 1"), StatementKind::Read);
    assert_eq!(StatementKind::classify("/* a */ WITH x AS (SELECT 1) SELECT * FROM x"), StatementKind::Read);
    assert_eq!(StatementKind::classify("-- only a comment"), StatementKind::Write);
    assert_eq!(StatementKind::classify("-- make a view\nCREATE VIEW v AS SELECT 1"), StatementKind::Write);
  }

  #[test]
  fn empty_history_navigation_is_a_no_op() {
    let mut h = QueryHistory::new();
    assert_eq!(h.previous(), None);
    assert_eq!(h.next(), None);
    assert_eq!(h.cursor(), None);
    assert_eq!(h.current(), None);
  }

  #[test]
  fn history_walks_back_and_forth() {
    let mut h = QueryHistory::new();
    for q in ["A", "B", "C"] {
      h.push(q);
    }
    assert_eq!(h.current(), Some("C"));
    assert_eq!(h.next(), None);
    assert_eq!(h.previous(), Some("B"));
    assert_eq!(h.previous(), Some("A"));
    assert_eq!(h.previous(), None);
    assert_eq!(h.current(), Some("A"));
    assert_eq!(h.next(), Some("B"));
    assert_eq!(h.current(), Some("B"));
  }

  #[test]
  fn consecutive_duplicates_collapse() {
    let mut h = QueryHistory::new();
    for q in ["A", "B", "C", "C"] {
      h.push(q);
    }
    assert_eq!(h.entries(), ["A", "B", "C"]);
    h.push("A");
    assert_eq!(h.len(), 4);
  }

  #[test]
  fn push_moves_cursor_to_newest() {
    let mut h = QueryHistory::new();
    h.push("A");
    h.push("B");
    h.previous();
    h.push("B");
    assert_eq!(h.cursor(), Some(1));
    assert_eq!(h.current(), Some("B"));
  }

  #[test]
  fn values_serialize_untagged() {
    let result = QueryResult {
      columns: vec!["id".into(), "name".into(), "x".into()],
      rows:    vec![vec![Value::Integer(1), Value::Text("Car".into()), Value::Null]],
    };
    let json = serde_json::to_value(Outcome::Rows(result)).unwrap();
    assert_eq!(json["kind"], "rows");
    assert_eq!(json["rows"][0], serde_json::json!([1, "Car", null]));
  }
}
