//! Demo rows written by [`SqliteStore::initialize`](crate::SqliteStore::initialize).
//!
//! The literal values are fixed; tests and the canned catalogs depend on
//! them.

use rusqlite::{Transaction, params};

pub const USERS: [(i64, &str, &str, &str); 5] = [
  (1, "John Doe", "john.doe@email.com", "New York"),
  (2, "Jane Smith", "jane.smith@email.com", "Los Angeles"),
  (3, "Robert Johnson", "robert.j@email.com", "Chicago"),
  (4, "Emily Davis", "emily.d@email.com", "Houston"),
  (5, "Michael Wilson", "michael.w@email.com", "Phoenix"),
];

type ActivityRow = (i64, i64, &'static str, f64, &'static str);

pub const TRANSPORTATION: [ActivityRow; 8] = [
  (1, 1, "Car", 150.5, "2023-01-15"),
  (2, 1, "Bus", 75.2, "2023-02-10"),
  (3, 2, "Train", 200.0, "2023-01-22"),
  (4, 3, "Electric Car", 120.3, "2023-02-05"),
  (5, 4, "Bicycle", 30.0, "2023-01-30"),
  (6, 5, "Car", 180.7, "2023-02-15"),
  (7, 2, "Airplane", 2500.0, "2023-03-01"),
  (8, 3, "Bus", 90.5, "2023-03-10"),
];

pub const ENERGY_CONSUMPTION: [ActivityRow; 8] = [
  (1, 1, "Electricity", 350.0, "2023-01-31"),
  (2, 2, "Natural Gas", 200.5, "2023-01-31"),
  (3, 3, "Electricity", 400.2, "2023-01-31"),
  (4, 4, "Solar", 150.0, "2023-01-31"),
  (5, 5, "Electricity", 320.7, "2023-01-31"),
  (6, 1, "Natural Gas", 180.3, "2023-02-28"),
  (7, 2, "Electricity", 370.5, "2023-02-28"),
  (8, 3, "Wind", 100.0, "2023-02-28"),
];

pub const WASTE_MANAGEMENT: [ActivityRow; 8] = [
  (1, 1, "Plastic", 5.2, "2023-01-20"),
  (2, 2, "Paper", 3.7, "2023-01-25"),
  (3, 3, "Organic", 8.0, "2023-01-15"),
  (4, 4, "Glass", 4.5, "2023-01-10"),
  (5, 5, "Metal", 2.3, "2023-01-05"),
  (6, 1, "Electronic", 1.5, "2023-02-15"),
  (7, 2, "Plastic", 6.0, "2023-02-20"),
  (8, 3, "Paper", 4.2, "2023-02-25"),
];

pub const INDUSTRIAL_ACTIVITY: [ActivityRow; 8] = [
  (1, 1, "Manufacturing", 500.0, "2023-01-15"),
  (2, 2, "Construction", 750.5, "2023-01-20"),
  (3, 3, "Chemical Processing", 820.0, "2023-01-25"),
  (4, 4, "Food Processing", 350.2, "2023-01-30"),
  (5, 5, "Textile Production", 420.7, "2023-02-05"),
  (6, 1, "Manufacturing", 510.3, "2023-02-10"),
  (7, 2, "Construction", 730.0, "2023-02-15"),
  (8, 3, "Chemical Processing", 800.5, "2023-02-20"),
];

pub const EMISSION_FACTORS: [(i64, &str, f64); 10] = [
  (1, "Car", 2.31),
  (2, "Bus", 0.89),
  (3, "Train", 0.41),
  (4, "Airplane", 8.75),
  (5, "Electricity", 0.45),
  (6, "Natural Gas", 0.20),
  (7, "Coal", 0.34),
  (8, "Manufacturing", 5.20),
  (9, "Construction", 4.35),
  (10, "Waste", 0.58),
];

pub const EMISSION_RECORDS: [(i64, i64, &str, i64, f64, &str); 8] = [
  (1, 1, "Car", 1, 347.65, "2023-01-15"),
  (2, 2, "Bus", 2, 66.92, "2023-02-10"),
  (3, 3, "Train", 3, 82.00, "2023-01-22"),
  (4, 5, "Electricity", 1, 157.50, "2023-01-31"),
  (5, 6, "Natural Gas", 2, 40.10, "2023-01-31"),
  (6, 8, "Manufacturing", 1, 2600.00, "2023-01-15"),
  (7, 9, "Construction", 2, 3264.67, "2023-01-20"),
  (8, 10, "Waste", 1, 3.02, "2023-01-20"),
];

pub const SUSTAINABILITY_PROGRAMS: [(i64, &str, &str); 5] = [
  (1, "Green Energy Initiative", "Promoting renewable energy sources"),
  (2, "Zero Waste Challenge", "Reducing waste through recycling and composting"),
  (3, "Carbon Footprint Reduction", "Activities to reduce personal carbon footprint"),
  (4, "Sustainable Transportation", "Promoting eco-friendly transportation methods"),
  (5, "Energy Efficiency Program", "Improving energy efficiency at home and work"),
];

pub const USER_PROGRAMS: [(i64, i64, &str); 8] = [
  (1, 1, "2022-12-01"),
  (1, 3, "2023-01-05"),
  (2, 2, "2022-11-15"),
  (3, 4, "2022-12-20"),
  (4, 5, "2023-01-10"),
  (5, 1, "2022-11-01"),
  (2, 3, "2023-02-05"),
  (3, 2, "2023-01-15"),
];

pub const CARBON_OFFSETS: [ActivityRow; 8] = [
  (1, 1, "Tree Planting", 50.0, "2023-01-10"),
  (2, 2, "Renewable Energy Credits", 100.0, "2023-01-15"),
  (3, 3, "Methane Capture", 75.5, "2023-01-20"),
  (4, 4, "Tree Planting", 30.0, "2023-01-25"),
  (5, 5, "Renewable Energy Credits", 120.0, "2023-01-30"),
  (6, 1, "Methane Capture", 85.0, "2023-02-05"),
  (7, 2, "Tree Planting", 45.0, "2023-02-10"),
  (8, 3, "Renewable Energy Credits", 110.0, "2023-02-15"),
];

fn insert_activity(tx: &Transaction<'_>, table: &str, rows: &[ActivityRow]) -> rusqlite::Result<()> {
  let mut stmt = tx.prepare(&format!("INSERT INTO {table} VALUES (?1, ?2, ?3, ?4, ?5)"))?;
  for row in rows {
    stmt.execute(params![row.0, row.1, row.2, row.3, row.4])?;
  }
  Ok(())
}

/// Insert every demo row inside `tx`. The caller commits.
pub fn populate(tx: &Transaction<'_>) -> rusqlite::Result<()> {
  {
    let mut stmt = tx.prepare("INSERT INTO User_Profile VALUES (?1, ?2, ?3, ?4)")?;
    for row in USERS {
      stmt.execute(params![row.0, row.1, row.2, row.3])?;
    }
  }

  insert_activity(tx, "Transportation", &TRANSPORTATION)?;
  insert_activity(tx, "Energy_Consumption", &ENERGY_CONSUMPTION)?;
  insert_activity(tx, "Waste_Management", &WASTE_MANAGEMENT)?;
  insert_activity(tx, "Industrial_Activity", &INDUSTRIAL_ACTIVITY)?;

  {
    let mut stmt = tx.prepare("INSERT INTO Emission_Factor VALUES (?1, ?2, ?3)")?;
    for row in EMISSION_FACTORS {
      stmt.execute(params![row.0, row.1, row.2])?;
    }
  }

  {
    let mut stmt = tx.prepare("INSERT INTO Emission_Record VALUES (?1, ?2, ?3, ?4, ?5, ?6)")?;
    for row in EMISSION_RECORDS {
      stmt.execute(params![row.0, row.1, row.2, row.3, row.4, row.5])?;
    }
  }

  {
    let mut stmt = tx.prepare("INSERT INTO Sustainability_Program VALUES (?1, ?2, ?3)")?;
    for row in SUSTAINABILITY_PROGRAMS {
      stmt.execute(params![row.0, row.1, row.2])?;
    }
  }

  {
    let mut stmt = tx.prepare("INSERT INTO User_Program VALUES (?1, ?2, ?3)")?;
    for row in USER_PROGRAMS {
      stmt.execute(params![row.0, row.1, row.2])?;
    }
  }

  insert_activity(tx, "Carbon_Offset", &CARBON_OFFSETS)
}
