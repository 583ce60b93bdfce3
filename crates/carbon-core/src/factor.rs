//! Emission factor resolution.
//!
//! A [`FactorTable`] is built once per aggregation from the full
//! `Emission_Factor` table and then answers lookups in memory. A label with
//! no factor row resolves to `0.0`: the activity is counted but contributes
//! nothing, mirroring a left join with a zero default.

use std::collections::HashMap;

use crate::{
  category::{Category, FactorKey},
  record::{ActivityRecord, EmissionFactor},
};

#[derive(Debug, Clone, Default)]
pub struct FactorTable {
  by_label: HashMap<String, f64>,
}

impl FactorTable {
  /// Index `factors` by source type. When a label appears more than once,
  /// the row with the lowest `factor_id` wins.
  pub fn new(factors: impl IntoIterator<Item = EmissionFactor>) -> Self {
    let mut rows: Vec<EmissionFactor> = factors.into_iter().collect();
    rows.sort_by_key(|f| f.factor_id);

    let mut by_label = HashMap::with_capacity(rows.len());
    for row in rows {
      by_label
        .entry(row.source_type)
        .or_insert(row.emission_per_unit);
    }
    Self { by_label }
  }

  /// The factor row for `label`, if one exists.
  pub fn get(&self, label: &str) -> Option<f64> {
    self.by_label.get(label).copied()
  }

  /// Coefficient for `label`, `0.0` when unknown.
  pub fn resolve(&self, label: &str) -> f64 { self.get(label).unwrap_or(0.0) }

  /// Resolve many labels in one pass, preserving order.
  pub fn resolve_batch<'a, I>(&self, labels: I) -> Vec<f64>
  where
    I: IntoIterator<Item = &'a str>,
  {
    labels.into_iter().map(|l| self.resolve(l)).collect()
  }

  /// The factor row that applies to `record` under `category`'s key rule.
  ///
  /// Returns `None` both for direct-emission categories and for labels with
  /// no factor row.
  pub fn factor_for(
    &self,
    category: Category,
    record: &ActivityRecord,
  ) -> Option<f64> {
    match category.factor_key() {
      FactorKey::RowLabel => self.get(&record.label),
      FactorKey::Fixed(label) => self.get(label),
      FactorKey::Direct => None,
    }
  }

  pub fn len(&self) -> usize { self.by_label.len() }

  pub fn is_empty(&self) -> bool { self.by_label.is_empty() }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn factor(id: i64, label: &str, value: f64) -> EmissionFactor {
    EmissionFactor {
      factor_id:         id,
      source_type:       label.into(),
      emission_per_unit: value,
    }
  }

  #[test]
  fn unknown_label_resolves_to_zero() {
    let table = FactorTable::new([factor(1, "Car", 2.31)]);
    assert_eq!(table.resolve("Car"), 2.31);
    assert_eq!(table.resolve("Bicycle"), 0.0);
    assert_eq!(table.get("Bicycle"), None);
  }

  #[test]
  fn lookup_is_case_sensitive() {
    let table = FactorTable::new([factor(1, "Car", 2.31)]);
    assert_eq!(table.resolve("car"), 0.0);
  }

  #[test]
  fn duplicate_labels_keep_lowest_id() {
    let table = FactorTable::new([factor(7, "Bus", 1.0), factor(2, "Bus", 0.89)]);
    assert_eq!(table.resolve("Bus"), 0.89);
    assert_eq!(table.len(), 1);
  }

  #[test]
  fn batch_matches_single_lookups() {
    let table = FactorTable::new([factor(1, "Car", 2.31), factor(2, "Bus", 0.89)]);
    assert_eq!(table.resolve_batch(["Bus", "Walking", "Car"]), vec![
      0.89, 0.0, 2.31
    ]);
  }

  #[test]
  fn waste_rows_share_the_category_factor() {
    let table = FactorTable::new([factor(10, "Waste", 0.58)]);
    let row = ActivityRecord {
      record_id: 1,
      user_id:   1,
      label:     "Plastic".into(),
      amount:    5.2,
      date:      chrono::NaiveDate::from_ymd_opt(2023, 1, 20).unwrap(),
    };
    assert_eq!(table.factor_for(Category::Waste, &row), Some(0.58));
    assert_eq!(table.factor_for(Category::Transport, &row), None);
    assert_eq!(table.factor_for(Category::Industrial, &row), None);
  }
}
