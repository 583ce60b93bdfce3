//! Emission categories and the kinds of record a user can log.
//!
//! [`Category`] is the dimension reports are broken down by. [`RecordKind`]
//! adds carbon offsets, which are logged like activity but subtracted rather
//! than converted.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Error;

// ─── Category ────────────────────────────────────────────────────────────────

/// One of the four dimensions along which raw activity becomes emissions.
///
/// Declaration order is significant: it is the tie-break order used when
/// picking the dominant category of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
  Transport,
  Energy,
  Waste,
  Industrial,
}

/// How an activity row of a category finds its emission factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactorKey {
  /// Look up the row's own type label (vehicle type, energy source).
  RowLabel,
  /// Every row of the category shares one factor row with this label.
  Fixed(&'static str),
  /// The row already carries an emission amount.
  Direct,
}

impl Category {
  pub const ALL: [Category; 4] =
    [Self::Transport, Self::Energy, Self::Waste, Self::Industrial];

  /// Long-form name used in summaries and recommendations.
  pub fn display_name(self) -> &'static str {
    match self {
      Self::Transport => "Transportation",
      Self::Energy => "Energy Consumption",
      Self::Waste => "Waste Management",
      Self::Industrial => "Industrial Activity",
    }
  }

  /// Short label used on chart axes.
  pub fn short_name(self) -> &'static str {
    match self {
      Self::Transport => "Transportation",
      Self::Energy => "Energy",
      Self::Waste => "Waste",
      Self::Industrial => "Industrial",
    }
  }

  pub fn factor_key(self) -> FactorKey {
    match self {
      Self::Transport | Self::Energy => FactorKey::RowLabel,
      Self::Waste => FactorKey::Fixed("Waste"),
      Self::Industrial => FactorKey::Direct,
    }
  }

  /// Static advice shown when this category dominates a report.
  pub fn advice(self) -> &'static [&'static str] {
    ADVICE
      .iter()
      .find(|(c, _)| *c == self)
      .map(|(_, lines)| *lines)
      .unwrap_or(&[])
  }
}

impl fmt::Display for Category {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.display_name())
  }
}

// ─── Advice ──────────────────────────────────────────────────────────────────

const ADVICE: [(Category, &[&str]); 4] = [
  (Category::Transport, &[
    "Consider using public transportation, carpooling, or switching to electric vehicles.",
    "Reduce unnecessary travel and combine trips when possible.",
  ]),
  (Category::Energy, &[
    "Switch to energy-efficient appliances and LED lighting.",
    "Consider renewable energy sources like solar panels.",
    "Improve insulation to reduce heating and cooling needs.",
  ]),
  (Category::Waste, &[
    "Practice recycling and composting to reduce landfill waste.",
    "Choose products with minimal packaging.",
    "Donate or repurpose items instead of disposing them.",
  ]),
  (Category::Industrial, &[
    "Implement more efficient industrial processes.",
    "Consider cleaner energy sources for industrial operations.",
    "Invest in carbon capture technologies.",
  ]),
];

/// Appended to every report whose offsets cover less than a tenth of its
/// gross emissions.
pub const OFFSET_ADVICE: &str = "Consider increasing your carbon offset contributions through tree \
                                 planting or renewable energy credits.";

// ─── Record kinds ────────────────────────────────────────────────────────────

/// Everything a user can log against their profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
  Transport,
  Energy,
  Waste,
  Industrial,
  Offset,
}

impl RecordKind {
  pub const ALL: [RecordKind; 5] = [
    Self::Transport,
    Self::Energy,
    Self::Waste,
    Self::Industrial,
    Self::Offset,
  ];

  /// The emission category this kind feeds, or `None` for offsets.
  pub fn category(self) -> Option<Category> {
    match self {
      Self::Transport => Some(Category::Transport),
      Self::Energy => Some(Category::Energy),
      Self::Waste => Some(Category::Waste),
      Self::Industrial => Some(Category::Industrial),
      Self::Offset => None,
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      Self::Transport => "transport",
      Self::Energy => "energy",
      Self::Waste => "waste",
      Self::Industrial => "industrial",
      Self::Offset => "offset",
    }
  }

  /// Human name of the type label field, for validation messages.
  pub fn label_name(self) -> &'static str {
    match self {
      Self::Transport => "Vehicle type",
      Self::Energy => "Energy source",
      Self::Waste => "Waste type",
      Self::Industrial => "Activity type",
      Self::Offset => "Offset type",
    }
  }

  /// Human name of the magnitude field, for validation messages.
  pub fn amount_name(self) -> &'static str {
    match self {
      Self::Transport => "Distance",
      Self::Energy => "Consumption",
      Self::Waste => "Weight",
      Self::Industrial => "Emission",
      Self::Offset => "Offset amount",
    }
  }

  /// Type labels offered to a front-end as choices. Not exhaustive: any
  /// label is accepted, unknown ones simply resolve to a zero factor.
  pub fn suggestions(self) -> &'static [&'static str] {
    match self {
      Self::Transport => &[
        "Car",
        "Bus",
        "Train",
        "Airplane",
        "Bicycle",
        "Electric Car",
        "Motorcycle",
        "Walking",
      ],
      Self::Energy => &[
        "Electricity",
        "Natural Gas",
        "Solar",
        "Wind",
        "Coal",
        "Biomass",
        "Geothermal",
      ],
      Self::Waste => &[
        "Plastic",
        "Paper",
        "Glass",
        "Metal",
        "Organic",
        "Electronic",
        "Hazardous",
      ],
      Self::Industrial => &[
        "Manufacturing",
        "Construction",
        "Chemical Processing",
        "Food Processing",
        "Textile Production",
        "Mining",
        "Agriculture",
      ],
      Self::Offset => &[
        "Tree Planting",
        "Renewable Energy Credits",
        "Methane Capture",
        "Carbon Sequestration",
        "Energy Efficiency",
      ],
    }
  }
}

impl fmt::Display for RecordKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for RecordKind {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::ALL
      .into_iter()
      .find(|k| k.as_str().eq_ignore_ascii_case(s.trim()))
      .ok_or_else(|| Error::validation(format!("unknown record kind: {s:?}")))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn every_category_has_advice() {
    for c in Category::ALL {
      assert!(!c.advice().is_empty(), "{c} has no advice");
    }
  }

  #[test]
  fn waste_resolves_through_category_key() {
    assert_eq!(Category::Waste.factor_key(), FactorKey::Fixed("Waste"));
    assert_eq!(Category::Industrial.factor_key(), FactorKey::Direct);
  }

  #[test]
  fn record_kind_parses_case_insensitively() {
    assert_eq!("Energy".parse::<RecordKind>().unwrap(), RecordKind::Energy);
    assert_eq!(" offset ".parse::<RecordKind>().unwrap(), RecordKind::Offset);
    assert!("fuel".parse::<RecordKind>().is_err());
  }

  #[test]
  fn offset_has_no_category() {
    assert_eq!(RecordKind::Offset.category(), None);
    assert_eq!(RecordKind::Waste.category(), Some(Category::Waste));
  }
}
