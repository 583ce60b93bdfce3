//! Plain-text rendering for terminal output.

use carbon_core::{
  aggregate::AssessedRow,
  catalog::CannedQuery,
  query::{Outcome, QueryResult},
  record::{ActivityRecord, User},
  report::{Point, Report},
};

const BAR_WIDTH: usize = 40;

// ─── Tables ──────────────────────────────────────────────────────────────────

/// Left-aligned columns padded to their widest cell.
pub fn table(headers: &[String], rows: &[Vec<String>]) -> String {
  let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
  for row in rows {
    for (i, cell) in row.iter().enumerate() {
      if let Some(w) = widths.get_mut(i) {
        *w = (*w).max(cell.chars().count());
      }
    }
  }

  let line = |cells: &[String]| -> String {
    cells
      .iter()
      .zip(&widths)
      .map(|(c, w)| format!("{c:<w$}"))
      .collect::<Vec<_>>()
      .join("  ")
      .trim_end()
      .to_owned()
  };

  let mut out = vec![line(headers)];
  out.push(widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>().join("  "));
  out.extend(rows.iter().map(|r| line(r)));
  out.join("\n")
}

pub fn outcome(outcome: &Outcome) -> String {
  match outcome {
    Outcome::Rows(QueryResult { columns, rows }) => {
      let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|r| r.iter().map(ToString::to_string).collect())
        .collect();
      let noun = if rows.len() == 1 { "row" } else { "rows" };
      format!("{}\n({} {noun})", table(columns, &cells), rows.len())
    }
    Outcome::RowsAffected { count } => {
      format!("Query executed successfully. Rows affected: {count}")
    }
  }
}

pub fn users(users: &[User]) -> String {
  users.iter().map(User::choice_label).collect::<Vec<_>>().join("\n")
}

pub fn catalog(queries: &[&CannedQuery]) -> String {
  let rows: Vec<Vec<String>> = queries
    .iter()
    .map(|q| vec![q.name.to_owned(), format!("{:?}", q.catalog).to_lowercase()])
    .collect();
  table(&["Name".into(), "Catalog".into()], &rows)
}

// ─── Report ──────────────────────────────────────────────────────────────────

fn bars(title: &str, points: &[Point], empty: &str) -> String {
  let mut out = vec![title.to_owned()];
  if points.is_empty() {
    out.push(format!("  {empty}"));
    return out.join("\n");
  }
  let label_width = points.iter().map(|p| p.label.chars().count()).max().unwrap_or(0);
  let max = points.iter().map(|p| p.value.abs()).fold(0.0_f64, f64::max);
  for p in points {
    let len = if max > 0.0 { ((p.value.abs() / max) * BAR_WIDTH as f64).round() as usize } else { 0 };
    out.push(format!("  {:<label_width$}  {:<BAR_WIDTH$}  {:.2}", p.label, "#".repeat(len), p.value));
  }
  out.join("\n")
}

fn assessed(title: &str, label: &str, amount: &str, rows: &[AssessedRow]) -> String {
  if rows.is_empty() {
    return format!("{title}\n  No data available for this category");
  }
  let headers = ["Date", label, amount, "Factor", "Emission"].map(String::from);
  let cells: Vec<Vec<String>> = rows
    .iter()
    .map(|r| {
      vec![
        r.record.date.to_string(),
        r.record.label.clone(),
        format!("{:.2}", r.record.amount),
        r.emission_per_unit.map_or_else(|| "-".into(), |f| format!("{f}")),
        format!("{:.2}", r.emission_amount),
      ]
    })
    .collect();
  format!("{title}\n{}", table(&headers, &cells))
}

fn offsets(rows: &[ActivityRecord]) -> String {
  if rows.is_empty() {
    return "Carbon Offset\n  No data available for this category".into();
  }
  let headers = ["Date", "Offset Type", "Offset Amount"].map(String::from);
  let cells: Vec<Vec<String>> = rows
    .iter()
    .map(|r| vec![r.date.to_string(), r.label.clone(), format!("{:.2}", r.amount)])
    .collect();
  format!("Carbon Offset\n{}", table(&headers, &cells))
}

pub fn report(r: &Report) -> String {
  let s = &r.summary;
  let summary_rows = [
    ("Transportation", s.transport_emissions),
    ("Energy Consumption", s.energy_emissions),
    ("Waste Management", s.waste_emissions),
    ("Industrial Activity", s.industrial_emissions),
    ("Total Emissions", s.total_emissions),
    ("Carbon Offset", s.total_offset),
    ("Net Emissions", s.net_emissions),
  ];

  let mut sections = vec![
    format!(
      "User Information\n  Name: {}\n  Email: {}\n  Location: {}",
      r.user.full_name, r.user.email, r.user.location
    ),
    format!("Report Period\n  From: {} To: {}", r.range.from, r.range.to),
    format!(
      "Carbon Emissions Summary\n  {:<22}{:>16}\n{}",
      "Emission Source",
      "Amount (kg CO2e)",
      summary_rows
        .iter()
        .map(|(label, value)| format!("  {label:<22}{value:>16.2}"))
        .collect::<Vec<_>>()
        .join("\n")
    ),
    format!(
      "Recommendations\n{}",
      r.recommendation
        .lines
        .iter()
        .map(|l| format!("  * {l}"))
        .collect::<Vec<_>>()
        .join("\n")
    ),
  ];

  let charts = &r.charts;
  sections.push(bars("Emissions by Source", &charts.by_source, "No emissions data available"));
  sections.push(bars("Emissions vs Offset", &charts.emissions_vs_offset, ""));
  sections.push(bars(
    "Transportation by Vehicle Type (km)",
    &charts.distance_by_vehicle,
    "No transportation data available",
  ));
  sections.push(bars(
    "Energy by Source (kWh)",
    &charts.consumption_by_source,
    "No energy data available",
  ));

  let d = &r.details;
  sections.push(assessed("Transportation", "Vehicle Type", "Distance (km)", &d.transport));
  sections.push(assessed("Energy", "Energy Source", "Consumption (kWh)", &d.energy));
  sections.push(assessed("Waste", "Waste Type", "Weight (kg)", &d.waste));
  sections.push(assessed("Industrial", "Activity Type", "Emission Produced", &d.industrial));
  sections.push(offsets(&d.offsets));

  sections.join("\n\n")
}

#[cfg(test)]
mod tests {
  use carbon_core::query::Value;

  use super::*;

  #[test]
  fn table_pads_to_widest_cell() {
    let out = table(
      &["id".into(), "name".into()],
      &[vec!["1".into(), "John Doe".into()], vec!["10".into(), "Al".into()]],
    );
    let lines: Vec<_> = out.lines().collect();
    assert_eq!(lines[0], "id  name");
    assert_eq!(lines[1], "--  --------");
    assert_eq!(lines[2], "1   John Doe");
    assert_eq!(lines[3], "10  Al");
  }

  #[test]
  fn write_outcome_reports_count() {
    assert_eq!(
      outcome(&Outcome::RowsAffected { count: 0 }),
      "Query executed successfully. Rows affected: 0"
    );
  }

  #[test]
  fn rows_outcome_ends_with_row_count() {
    let out = outcome(&Outcome::Rows(QueryResult {
      columns: vec!["x".into()],
      rows:    vec![vec![Value::Null]],
    }));
    assert!(out.ends_with("(1 row)"));
    assert!(out.contains("NULL"));
  }

  #[test]
  fn bars_scale_to_the_largest_value() {
    let out = bars("T", &[Point { label: "a".into(), value: 10.0 }, Point { label: "b".into(), value: 5.0 }], "");
    let lines: Vec<_> = out.lines().collect();
    assert_eq!(lines[1].matches('#').count(), BAR_WIDTH);
    assert_eq!(lines[2].matches('#').count(), BAR_WIDTH / 2);
  }
}
