//! The report engine.
//!
//! [`build_report`] turns one user's [`Aggregation`] into a read-only
//! [`Report`]: a summary record, a recommendation, chart series and detail
//! rows. Renderers (CLI text, JSON) consume the report; nothing here knows
//! how it will be drawn.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::{
  Error,
  aggregate::{Aggregation, AssessedRow, CategoryTotals, aggregate},
  category::{Category, OFFSET_ADVICE},
  record::{ActivityRecord, User},
  request::{DateRange, ReportRequest},
  store::EmissionStore,
};

/// Offsets below this share of gross emissions trigger the offsetting advice.
pub const OFFSET_THRESHOLD: f64 = 0.1;

// ─── Report ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
  pub transport_emissions:  f64,
  pub energy_emissions:     f64,
  pub waste_emissions:      f64,
  pub industrial_emissions: f64,
  pub total_emissions:      f64,
  pub total_offset:         f64,
  pub net_emissions:        f64,
}

impl From<&CategoryTotals> for Summary {
  fn from(t: &CategoryTotals) -> Self {
    Self {
      transport_emissions:  t.transport,
      energy_emissions:     t.energy,
      waste_emissions:      t.waste,
      industrial_emissions: t.industrial,
      total_emissions:      t.total_emissions(),
      total_offset:         t.offset,
      net_emissions:        t.net_emissions(),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
  pub dominant: Category,
  /// Headline first, then category advice, then offsetting advice if any.
  pub lines:    Vec<String>,
}

/// One labelled value in a chart series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Point {
  pub label: String,
  pub value: f64,
}

impl Point {
  fn new(label: impl Into<String>, value: f64) -> Self {
    Self { label: label.into(), value }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
  /// Emissions by source; categories with no emissions are left out.
  pub by_source:            Vec<Point>,
  /// Total emissions, carbon offset and net emissions, in that order.
  pub emissions_vs_offset:  Vec<Point>,
  /// Kilometres travelled per vehicle type, sorted by label.
  pub distance_by_vehicle:  Vec<Point>,
  /// Kilowatt-hours consumed per energy source, sorted by label.
  pub consumption_by_source: Vec<Point>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Details {
  pub transport:  Vec<AssessedRow>,
  pub energy:     Vec<AssessedRow>,
  pub waste:      Vec<AssessedRow>,
  pub industrial: Vec<AssessedRow>,
  pub offsets:    Vec<ActivityRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
  pub user:           User,
  pub range:          DateRange,
  pub totals:         CategoryTotals,
  pub summary:        Summary,
  pub recommendation: Recommendation,
  pub charts:         ChartData,
  pub details:        Details,
}

// ─── Engine ──────────────────────────────────────────────────────────────────

/// The category with the largest emissions. Ties go to the category
/// declared first (transport, energy, waste, industrial).
pub fn dominant_category(totals: &CategoryTotals) -> Category {
  let mut best = (Category::Transport, totals.transport);
  for (category, amount) in totals.by_category().into_iter().skip(1) {
    if amount > best.1 {
      best = (category, amount);
    }
  }
  best.0
}

pub fn recommend(totals: &CategoryTotals) -> Recommendation {
  let dominant = dominant_category(totals);
  let mut lines = vec![format!(
    "Your highest emissions come from {}. Focus on reducing this area first.",
    dominant.display_name()
  )];
  lines.extend(dominant.advice().iter().map(|s| (*s).to_owned()));
  if totals.offset < OFFSET_THRESHOLD * totals.total_emissions() {
    lines.push(OFFSET_ADVICE.to_owned());
  }
  Recommendation { dominant, lines }
}

fn sum_by_label(rows: &[AssessedRow]) -> Vec<Point> {
  let mut groups: BTreeMap<&str, f64> = BTreeMap::new();
  for row in rows {
    *groups.entry(row.record.label.as_str()).or_default() += row.record.amount;
  }
  groups.into_iter().map(|(label, value)| Point::new(label, value)).collect()
}

fn chart_data(aggregation: &Aggregation) -> ChartData {
  let totals = &aggregation.totals;
  ChartData {
    by_source:             totals
      .by_category()
      .into_iter()
      .filter(|(_, amount)| *amount > 0.0)
      .map(|(c, amount)| Point::new(c.short_name(), amount))
      .collect(),
    emissions_vs_offset:   vec![
      Point::new("Total Emissions", totals.total_emissions()),
      Point::new("Carbon Offset", totals.offset),
      Point::new("Net Emissions", totals.net_emissions()),
    ],
    distance_by_vehicle:   sum_by_label(&aggregation.transport),
    consumption_by_source: sum_by_label(&aggregation.energy),
  }
}

/// Assemble a report for `user` from an aggregation of their activity.
pub fn build_report(user: User, aggregation: Aggregation) -> Report {
  let totals = aggregation.totals;
  let charts = chart_data(&aggregation);
  let Aggregation { range, transport, energy, waste, industrial, offsets, .. } = aggregation;

  Report {
    user,
    range,
    totals,
    summary: Summary::from(&totals),
    recommendation: recommend(&totals),
    charts,
    details: Details { transport, energy, waste, industrial, offsets },
  }
}

/// Look up the requested user, aggregate their activity and build a report.
///
/// Fails with [`Error::UserNotFound`] when the user does not exist, which
/// distinguishes a missing user from one with no activity in the window.
pub async fn report<S>(store: &S, request: ReportRequest) -> Result<Report, S::Error>
where
  S: EmissionStore,
{
  let ReportRequest { user_id, range } = request;
  let user = store
    .get_user(user_id)
    .await?
    .ok_or(Error::UserNotFound(user_id))?;
  let aggregation = aggregate(store, user_id, range).await?;
  let report = build_report(user, aggregation);
  tracing::info!(
    user_id,
    net = report.summary.net_emissions,
    dominant = %report.recommendation.dominant,
    "built emission report"
  );
  Ok(report)
}
