//! Category aggregation: per-user, per-window emission totals.
//!
//! The store narrows rows by user and date; [`Aggregation::tally`] resolves
//! factors and sums. Every total defaults to `0.0` when nothing matches, so a
//! user with no activity (or no user at all) yields an all-zero aggregation
//! rather than an error.

use serde::{Deserialize, Serialize};

use crate::{
  category::{Category, FactorKey},
  factor::FactorTable,
  record::{ActivityRecord, UserId},
  request::DateRange,
  store::EmissionStore,
};

// ─── Inputs ──────────────────────────────────────────────────────────────────

/// Raw activity and offset rows, one list per table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivitySet {
  pub transport:  Vec<ActivityRecord>,
  pub energy:     Vec<ActivityRecord>,
  pub waste:      Vec<ActivityRecord>,
  pub industrial: Vec<ActivityRecord>,
  pub offsets:    Vec<ActivityRecord>,
}

impl ActivitySet {
  pub fn rows(&self, category: Category) -> &[ActivityRecord] {
    match category {
      Category::Transport => &self.transport,
      Category::Energy => &self.energy,
      Category::Waste => &self.waste,
      Category::Industrial => &self.industrial,
    }
  }

  pub fn is_empty(&self) -> bool {
    Category::ALL.iter().all(|c| self.rows(*c).is_empty()) && self.offsets.is_empty()
  }

  fn retain(&mut self, mut keep: impl FnMut(&ActivityRecord) -> bool) {
    self.transport.retain(&mut keep);
    self.energy.retain(&mut keep);
    self.waste.retain(&mut keep);
    self.industrial.retain(&mut keep);
    self.offsets.retain(&mut keep);
  }
}

// ─── Outputs ─────────────────────────────────────────────────────────────────

/// An activity row together with the factor applied to it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessedRow {
  #[serde(flatten)]
  pub record:            ActivityRecord,
  /// `None` when no factor row matched, or for industrial rows which carry
  /// their emission directly.
  pub emission_per_unit: Option<f64>,
  pub emission_amount:   f64,
}

impl AssessedRow {
  fn assess(category: Category, record: ActivityRecord, factors: &FactorTable) -> Self {
    let emission_per_unit = factors.factor_for(category, &record);
    let emission_amount = match category.factor_key() {
      FactorKey::Direct => record.amount,
      _ => record.amount * emission_per_unit.unwrap_or(0.0),
    };
    Self { record, emission_per_unit, emission_amount }
  }
}

/// The five sums a report is built from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotals {
  pub transport:  f64,
  pub energy:     f64,
  pub waste:      f64,
  pub industrial: f64,
  pub offset:     f64,
}

impl CategoryTotals {
  pub fn get(&self, category: Category) -> f64 {
    match category {
      Category::Transport => self.transport,
      Category::Energy => self.energy,
      Category::Waste => self.waste,
      Category::Industrial => self.industrial,
    }
  }

  fn slot(&mut self, category: Category) -> &mut f64 {
    match category {
      Category::Transport => &mut self.transport,
      Category::Energy => &mut self.energy,
      Category::Waste => &mut self.waste,
      Category::Industrial => &mut self.industrial,
    }
  }

  /// Gross emissions across all four categories.
  pub fn total_emissions(&self) -> f64 {
    Category::ALL.iter().map(|c| self.get(*c)).sum()
  }

  /// Gross emissions minus offsets. Negative when offsets exceed emissions.
  pub fn net_emissions(&self) -> f64 { self.total_emissions() - self.offset }

  /// `(category, amount)` pairs in declaration order.
  pub fn by_category(&self) -> [(Category, f64); 4] {
    Category::ALL.map(|c| (c, self.get(c)))
  }
}

/// Totals plus the per-row datasets they were computed from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aggregation {
  pub user_id:    UserId,
  pub range:      DateRange,
  pub totals:     CategoryTotals,
  pub transport:  Vec<AssessedRow>,
  pub energy:     Vec<AssessedRow>,
  pub waste:      Vec<AssessedRow>,
  pub industrial: Vec<AssessedRow>,
  pub offsets:    Vec<ActivityRecord>,
}

impl Aggregation {
  /// Sum `activity` for `user_id` within `range`.
  ///
  /// Rows belonging to other users or outside the range are ignored, so the
  /// caller may pass a superset.
  pub fn tally(
    user_id: UserId,
    range: DateRange,
    mut activity: ActivitySet,
    factors: &FactorTable,
  ) -> Self {
    activity.retain(|r| r.user_id == user_id && range.contains(r.date));

    let mut totals = CategoryTotals::default();
    let mut assess = |category: Category, rows: Vec<ActivityRecord>| -> Vec<AssessedRow> {
      let assessed: Vec<AssessedRow> = rows
        .into_iter()
        .map(|r| AssessedRow::assess(category, r, factors))
        .collect();
      *totals.slot(category) = assessed.iter().map(|r| r.emission_amount).sum();
      assessed
    };

    let transport = assess(Category::Transport, activity.transport);
    let energy = assess(Category::Energy, activity.energy);
    let waste = assess(Category::Waste, activity.waste);
    let industrial = assess(Category::Industrial, activity.industrial);
    totals.offset = activity.offsets.iter().map(|r| r.amount).sum();

    Self {
      user_id,
      range,
      totals,
      transport,
      energy,
      waste,
      industrial,
      offsets: activity.offsets,
    }
  }

  pub fn rows(&self, category: Category) -> &[AssessedRow] {
    match category {
      Category::Transport => &self.transport,
      Category::Energy => &self.energy,
      Category::Waste => &self.waste,
      Category::Industrial => &self.industrial,
    }
  }
}

/// Load `user_id`'s activity within `range` from `store` and tally it.
///
/// An unknown user is not an error here; it simply has no rows.
pub async fn aggregate<S>(store: &S, user_id: UserId, range: DateRange) -> Result<Aggregation, S::Error>
where
  S: EmissionStore,
{
  let factors = FactorTable::new(store.emission_factors().await?);
  let activity = store.activity_in_range(user_id, range).await?;
  let aggregation = Aggregation::tally(user_id, range, activity, &factors);
  tracing::debug!(
    user_id,
    from = %range.from,
    to = %range.to,
    total = aggregation.totals.total_emissions(),
    offset = aggregation.totals.offset,
    "aggregated emissions"
  );
  Ok(aggregation)
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;

  use super::*;
  use crate::record::EmissionFactor;

  fn d(s: &str) -> NaiveDate { NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap() }

  fn row(id: i64, user_id: UserId, label: &str, amount: f64, date: &str) -> ActivityRecord {
    ActivityRecord { record_id: id, user_id, label: label.into(), amount, date: d(date) }
  }

  fn factors() -> FactorTable {
    FactorTable::new(
      [("Car", 2.31), ("Bus", 0.89), ("Electricity", 0.45), ("Natural Gas", 0.20), ("Waste", 0.58)]
        .into_iter()
        .enumerate()
        .map(|(i, (label, v))| EmissionFactor {
          factor_id:         i as i64 + 1,
          source_type:       label.into(),
          emission_per_unit: v,
        }),
    )
  }

  fn q1() -> DateRange { DateRange::new(d("2023-01-01"), d("2023-03-31")) }

  #[test]
  fn transport_multiplies_distance_by_factor() {
    let activity = ActivitySet {
      transport: vec![
        row(1, 1, "Car", 150.5, "2023-01-15"),
        row(2, 1, "Bus", 75.2, "2023-02-10"),
      ],
      ..Default::default()
    };
    let agg = Aggregation::tally(1, q1(), activity, &factors());
    assert!((agg.totals.transport - 414.583).abs() < 1e-9);
    assert!((agg.transport[0].emission_amount - 347.655).abs() < 1e-9);
    assert_eq!(agg.transport[1].emission_per_unit, Some(0.89));
  }

  #[test]
  fn unmatched_label_contributes_zero() {
    let activity = ActivitySet {
      transport: vec![row(1, 1, "Bicycle", 30.0, "2023-01-30")],
      energy: vec![row(2, 1, "Solar", 150.0, "2023-01-31")],
      ..Default::default()
    };
    let agg = Aggregation::tally(1, q1(), activity, &factors());
    assert_eq!(agg.totals.transport, 0.0);
    assert_eq!(agg.totals.energy, 0.0);
    assert_eq!(agg.transport[0].emission_per_unit, None);
    assert_eq!(agg.transport[0].emission_amount, 0.0);
  }

  #[test]
  fn waste_uses_category_factor_and_industrial_is_direct() {
    let activity = ActivitySet {
      waste: vec![row(1, 1, "Plastic", 5.2, "2023-01-20"), row(6, 1, "Electronic", 1.5, "2023-02-15")],
      industrial: vec![row(1, 1, "Manufacturing", 500.0, "2023-01-15")],
      ..Default::default()
    };
    let agg = Aggregation::tally(1, q1(), activity, &factors());
    assert!((agg.totals.waste - 3.886).abs() < 1e-9);
    assert_eq!(agg.totals.industrial, 500.0);
    assert_eq!(agg.industrial[0].emission_per_unit, None);
  }

  #[test]
  fn rows_outside_user_or_range_are_ignored() {
    let activity = ActivitySet {
      transport: vec![
        row(1, 1, "Car", 10.0, "2022-12-31"),
        row(2, 2, "Car", 10.0, "2023-01-15"),
        row(3, 1, "Car", 10.0, "2023-03-31"),
      ],
      offsets: vec![row(1, 1, "Tree Planting", 5.0, "2023-04-01")],
      ..Default::default()
    };
    let agg = Aggregation::tally(1, q1(), activity, &factors());
    assert_eq!(agg.transport.len(), 1);
    assert_eq!(agg.transport[0].record.record_id, 3);
    assert!(agg.offsets.is_empty());
    assert_eq!(agg.totals.offset, 0.0);
  }

  #[test]
  fn empty_activity_is_all_zero() {
    let agg = Aggregation::tally(42, q1(), ActivitySet::default(), &factors());
    assert_eq!(agg.totals, CategoryTotals::default());
    assert_eq!(agg.totals.net_emissions(), 0.0);
  }

  #[test]
  fn net_may_go_negative() {
    let totals = CategoryTotals { transport: 10.0, offset: 25.0, ..Default::default() };
    assert_eq!(totals.total_emissions(), 10.0);
    assert_eq!(totals.net_emissions(), -15.0);
  }
}
