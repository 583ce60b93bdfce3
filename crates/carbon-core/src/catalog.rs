//! The canned query catalogs.
//!
//! Two fixed libraries of named SQL statements a front-end can offer as
//! one-click queries: the basic catalog (table dumps and simple rollups) and
//! the analytical catalog (joins, subqueries, views, window functions and
//! CTEs). They are plain data; [`QueryRunner::run_canned`] executes them.
//!
//! [`QueryRunner::run_canned`]: crate::query::QueryRunner::run_canned

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Catalog {
  Basic,
  Analytical,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CannedQuery {
  pub name:    &'static str,
  pub catalog: Catalog,
  pub sql:     &'static str,
}

/// Look a query up by exact name across both catalogs.
pub fn find(name: &str) -> Option<&'static CannedQuery> {
  all().find(|q| q.name == name)
}

/// Every canned query, basic catalog first.
pub fn all() -> impl Iterator<Item = &'static CannedQuery> {
  BASIC.iter().chain(ANALYTICAL.iter())
}

pub fn catalog(which: Catalog) -> &'static [CannedQuery] {
  match which {
    Catalog::Basic => BASIC,
    Catalog::Analytical => ANALYTICAL,
  }
}

// ─── Basic ───────────────────────────────────────────────────────────────────

pub const BASIC: &[CannedQuery] = &[
  CannedQuery {
    name:    "Show All Users",
    catalog: Catalog::Basic,
    sql:     "SELECT * FROM User_Profile",
  },
  CannedQuery {
    name:    "Show All Transportation Records",
    catalog: Catalog::Basic,
    sql:     "SELECT * FROM Transportation",
  },
  CannedQuery {
    name:    "Show All Energy Consumption Records",
    catalog: Catalog::Basic,
    sql:     "SELECT * FROM Energy_Consumption",
  },
  CannedQuery {
    name:    "Show All Waste Management Records",
    catalog: Catalog::Basic,
    sql:     "SELECT * FROM Waste_Management",
  },
  CannedQuery {
    name:    "Show All Industrial Activities",
    catalog: Catalog::Basic,
    sql:     "SELECT * FROM Industrial_Activity",
  },
  CannedQuery {
    name:    "Show All Emission Factors",
    catalog: Catalog::Basic,
    sql:     "SELECT * FROM Emission_Factor",
  },
  CannedQuery {
    name:    "Show All Emission Records",
    catalog: Catalog::Basic,
    sql:     "SELECT * FROM Emission_Record",
  },
  CannedQuery {
    name:    "Show All Sustainability Programs",
    catalog: Catalog::Basic,
    sql:     "SELECT * FROM Sustainability_Program",
  },
  CannedQuery {
    name:    "Show All User Programs",
    catalog: Catalog::Basic,
    sql:     "SELECT * FROM User_Program",
  },
  CannedQuery {
    name:    "Show All Carbon Offsets",
    catalog: Catalog::Basic,
    sql:     "SELECT * FROM Carbon_Offset",
  },
  CannedQuery {
    name:    "Total Emissions By User",
    catalog: Catalog::Basic,
    sql:     r#"
      SELECT up.User_ID, up.Full_Name, SUM(er.Emission_Amount) as Total_Emissions
      FROM User_Profile up
      LEFT JOIN Emission_Record er ON er.Source_ID = up.User_ID
      GROUP BY up.User_ID
      ORDER BY Total_Emissions DESC
    "#,
  },
  CannedQuery {
    name:    "Monthly Energy Consumption",
    catalog: Catalog::Basic,
    sql:     r#"
      SELECT strftime('%Y-%m', ec.Date) as Month, SUM(ec.Consumption_KWH) as Total_KWH
      FROM Energy_Consumption ec
      GROUP BY Month
      ORDER BY Month
    "#,
  },
  CannedQuery {
    name:    "Users with Highest Carbon Footprint",
    catalog: Catalog::Basic,
    sql:     r#"
      SELECT up.User_ID, up.Full_Name, SUM(er.Emission_Amount) as Carbon_Footprint
      FROM User_Profile up
      JOIN Emission_Record er ON er.Source_ID = up.User_ID
      GROUP BY up.User_ID
      ORDER BY Carbon_Footprint DESC
      LIMIT 5
    "#,
  },
  CannedQuery {
    name:    "Most Common Transportation Type",
    catalog: Catalog::Basic,
    sql:     r#"
      SELECT Vehicle_Type, COUNT(*) as Count
      FROM Transportation
      GROUP BY Vehicle_Type
      ORDER BY Count DESC
    "#,
  },
  CannedQuery {
    name:    "Total Waste by Type",
    catalog: Catalog::Basic,
    sql:     r#"
      SELECT Waste_Type, SUM(Waste_Weight_KG) as Total_Weight
      FROM Waste_Management
      GROUP BY Waste_Type
      ORDER BY Total_Weight DESC
    "#,
  },
  CannedQuery {
    name:    "Users in Green Energy Initiative",
    catalog: Catalog::Basic,
    sql:     r#"
      SELECT up.User_ID, up.Full_Name, sp.Program_Name, usp.Enrollment_Date
      FROM User_Profile up
      JOIN User_Program usp ON up.User_ID = usp.User_ID
      JOIN Sustainability_Program sp ON usp.Program_ID = sp.Program_ID
      WHERE sp.Program_Name = 'Green Energy Initiative'
    "#,
  },
  CannedQuery {
    name:    "Average Emission by Industry Type",
    catalog: Catalog::Basic,
    sql:     r#"
      SELECT Activity_Type, AVG(Emission_Produced) as Average_Emission
      FROM Industrial_Activity
      GROUP BY Activity_Type
      ORDER BY Average_Emission DESC
    "#,
  },
  CannedQuery {
    name:    "Carbon Offset Contribution",
    catalog: Catalog::Basic,
    sql:     r#"
      SELECT up.User_ID, up.Full_Name, SUM(co.Offset_Amount) as Total_Offset
      FROM User_Profile up
      JOIN Carbon_Offset co ON up.User_ID = co.User_ID
      GROUP BY up.User_ID
      ORDER BY Total_Offset DESC
    "#,
  },
  CannedQuery {
    name:    "Transportation vs Energy Consumption",
    catalog: Catalog::Basic,
    sql:     r#"
      SELECT up.User_ID, up.Full_Name,
             SUM(CASE WHEN er.Source_Type IN ('Car', 'Bus', 'Train', 'Airplane') THEN er.Emission_Amount ELSE 0 END) as Transport_Emission,
             SUM(CASE WHEN er.Source_Type IN ('Electricity', 'Natural Gas', 'Coal') THEN er.Emission_Amount ELSE 0 END) as Energy_Emission
      FROM User_Profile up
      LEFT JOIN Emission_Record er ON er.Source_ID = up.User_ID
      GROUP BY up.User_ID
    "#,
  },
  CannedQuery {
    name:    "Emission Reduction Over Time",
    catalog: Catalog::Basic,
    sql:     r#"
      SELECT strftime('%Y-%m', er.Date) as Month, SUM(er.Emission_Amount) as Total_Emission
      FROM Emission_Record er
      GROUP BY Month
      ORDER BY Month
    "#,
  },
  CannedQuery {
    name:    "Top Carbon Offset Methods",
    catalog: Catalog::Basic,
    sql:     r#"
      SELECT Offset_Type, SUM(Offset_Amount) as Total_Offset
      FROM Carbon_Offset
      GROUP BY Offset_Type
      ORDER BY Total_Offset DESC
    "#,
  },
  CannedQuery {
    name:    "Users With Most Sustainability Programs",
    catalog: Catalog::Basic,
    sql:     r#"
      SELECT up.User_ID, up.Full_Name, COUNT(usp.Program_ID) as Program_Count
      FROM User_Profile up
      JOIN User_Program usp ON up.User_ID = usp.User_ID
      GROUP BY up.User_ID
      ORDER BY Program_Count DESC
    "#,
  },
  CannedQuery {
    name:    "Compare Car vs Public Transport Usage",
    catalog: Catalog::Basic,
    sql:     r#"
      SELECT up.User_ID, up.Full_Name,
             SUM(CASE WHEN t.Vehicle_Type = 'Car' THEN t.Distance_KM ELSE 0 END) as Car_Distance,
             SUM(CASE WHEN t.Vehicle_Type IN ('Bus', 'Train') THEN t.Distance_KM ELSE 0 END) as Public_Transport_Distance
      FROM User_Profile up
      LEFT JOIN Transportation t ON up.User_ID = t.User_ID
      GROUP BY up.User_ID
    "#,
  },
  CannedQuery {
    name:    "Most Eco-Friendly User",
    catalog: Catalog::Basic,
    sql:     r#"
      SELECT up.User_ID, up.Full_Name,
             COUNT(DISTINCT usp.Program_ID) as Program_Count,
             SUM(co.Offset_Amount) as Total_Offset,
             SUM(er.Emission_Amount) as Total_Emission
      FROM User_Profile up
      LEFT JOIN User_Program usp ON up.User_ID = usp.User_ID
      LEFT JOIN Carbon_Offset co ON up.User_ID = co.User_ID
      LEFT JOIN Emission_Record er ON er.Source_ID = up.User_ID
      GROUP BY up.User_ID
      ORDER BY (Program_Count + Total_Offset - Total_Emission) DESC
      LIMIT 1
    "#,
  },
  CannedQuery {
    name:    "Program Effectiveness",
    catalog: Catalog::Basic,
    sql:     r#"
      SELECT sp.Program_ID, sp.Program_Name,
             AVG(er1.Emission_Amount - er2.Emission_Amount) as Average_Reduction
      FROM User_Program usp
      JOIN Sustainability_Program sp ON usp.Program_ID = sp.Program_ID
      JOIN Emission_Record er1 ON er1.Source_ID = usp.User_ID AND er1.Date < usp.Enrollment_Date
      JOIN Emission_Record er2 ON er2.Source_ID = usp.User_ID AND er2.Date > usp.Enrollment_Date
      GROUP BY sp.Program_ID
      ORDER BY Average_Reduction DESC
    "#,
  },
  CannedQuery {
    name:    "Waste Reduction by Month",
    catalog: Catalog::Basic,
    sql:     r#"
      SELECT strftime('%Y-%m', wm.Date) as Month, SUM(wm.Waste_Weight_KG) as Total_Waste
      FROM Waste_Management wm
      GROUP BY Month
      ORDER BY Month
    "#,
  },
  CannedQuery {
    name:    "Transportation Distance by Vehicle Type",
    catalog: Catalog::Basic,
    sql:     r#"
      SELECT Vehicle_Type, SUM(Distance_KM) as Total_Distance
      FROM Transportation
      GROUP BY Vehicle_Type
      ORDER BY Total_Distance DESC
    "#,
  },
  CannedQuery {
    name:    "Energy Source Distribution",
    catalog: Catalog::Basic,
    sql:     r#"
      SELECT Energy_Source, COUNT(*) as Usage_Count, SUM(Consumption_KWH) as Total_KWH
      FROM Energy_Consumption
      GROUP BY Energy_Source
      ORDER BY Total_KWH DESC
    "#,
  },
  CannedQuery {
    name:    "Industry Emission by Location",
    catalog: Catalog::Basic,
    sql:     r#"
      SELECT up.Location, SUM(ia.Emission_Produced) as Total_Emission
      FROM User_Profile up
      JOIN Industrial_Activity ia ON up.User_ID = ia.User_ID
      GROUP BY up.Location
      ORDER BY Total_Emission DESC
    "#,
  },
];

// ─── Analytical ──────────────────────────────────────────────────────────────

/// `Carbon_Footprint_View` must be created (by running "Create Carbon
/// Footprint View") before the queries that read from it.
pub const ANALYTICAL: &[CannedQuery] = &[
  CannedQuery {
    name:    "View All Users",
    catalog: Catalog::Analytical,
    sql:     "SELECT * FROM User_Profile",
  },
  CannedQuery {
    name:    "View All Transportation Records",
    catalog: Catalog::Analytical,
    sql:     "SELECT * FROM Transportation",
  },
  CannedQuery {
    name:    "View All Energy Consumption Records",
    catalog: Catalog::Analytical,
    sql:     "SELECT * FROM Energy_Consumption",
  },
  CannedQuery {
    name:    "View All Waste Management Records",
    catalog: Catalog::Analytical,
    sql:     "SELECT * FROM Waste_Management",
  },
  CannedQuery {
    name:    "View All Industrial Activities",
    catalog: Catalog::Analytical,
    sql:     "SELECT * FROM Industrial_Activity",
  },
  CannedQuery {
    name:    "View All Carbon Offsets",
    catalog: Catalog::Analytical,
    sql:     "SELECT * FROM Carbon_Offset",
  },
  CannedQuery {
    name:    "View Users in New York",
    catalog: Catalog::Analytical,
    sql:     r#"
      SELECT * FROM User_Profile
      WHERE Location = 'New York'
    "#,
  },
  CannedQuery {
    name:    "View Car Transportation Only",
    catalog: Catalog::Analytical,
    sql:     r#"
      SELECT * FROM Transportation
      WHERE Vehicle_Type = 'Car'
    "#,
  },
  CannedQuery {
    name:    "View High Energy Consumption",
    catalog: Catalog::Analytical,
    sql:     r#"
      SELECT * FROM Energy_Consumption
      WHERE Consumption_KWH > 300
    "#,
  },
  CannedQuery {
    name:    "User Transportation Data",
    catalog: Catalog::Analytical,
    sql:     r#"
      SELECT up.User_ID, up.Full_Name, t.Vehicle_Type, t.Distance_KM, t.Date
      FROM User_Profile up
      JOIN Transportation t ON up.User_ID = t.User_ID
      ORDER BY up.User_ID, t.Date
    "#,
  },
  CannedQuery {
    name:    "User Energy Consumption",
    catalog: Catalog::Analytical,
    sql:     r#"
      SELECT up.User_ID, up.Full_Name, ec.Energy_Source, ec.Consumption_KWH, ec.Date
      FROM User_Profile up
      JOIN Energy_Consumption ec ON up.User_ID = ec.User_ID
      ORDER BY up.User_ID, ec.Date
    "#,
  },
  CannedQuery {
    name:    "User Waste Management",
    catalog: Catalog::Analytical,
    sql:     r#"
      SELECT up.User_ID, up.Full_Name, wm.Waste_Type, wm.Waste_Weight_KG, wm.Date
      FROM User_Profile up
      JOIN Waste_Management wm ON up.User_ID = wm.User_ID
      ORDER BY up.User_ID, wm.Date
    "#,
  },
  CannedQuery {
    name:    "Total Transportation by User",
    catalog: Catalog::Analytical,
    sql:     r#"
      SELECT up.User_ID, up.Full_Name, COUNT(t.Transport_ID) as Trip_Count,
             SUM(t.Distance_KM) as Total_Distance
      FROM User_Profile up
      LEFT JOIN Transportation t ON up.User_ID = t.User_ID
      GROUP BY up.User_ID
      ORDER BY Total_Distance DESC
    "#,
  },
  CannedQuery {
    name:    "Total Energy by User",
    catalog: Catalog::Analytical,
    sql:     r#"
      SELECT up.User_ID, up.Full_Name, COUNT(ec.Energy_ID) as Record_Count,
             SUM(ec.Consumption_KWH) as Total_KWH
      FROM User_Profile up
      LEFT JOIN Energy_Consumption ec ON up.User_ID = ec.User_ID
      GROUP BY up.User_ID
      ORDER BY Total_KWH DESC
    "#,
  },
  CannedQuery {
    name:    "Total Waste by User",
    catalog: Catalog::Analytical,
    sql:     r#"
      SELECT up.User_ID, up.Full_Name, COUNT(wm.Waste_ID) as Waste_Count,
             SUM(wm.Waste_Weight_KG) as Total_Weight
      FROM User_Profile up
      LEFT JOIN Waste_Management wm ON up.User_ID = wm.User_ID
      GROUP BY up.User_ID
      ORDER BY Total_Weight DESC
    "#,
  },
  CannedQuery {
    name:    "Transportation by Vehicle Type",
    catalog: Catalog::Analytical,
    sql:     r#"
      SELECT Vehicle_Type, COUNT(*) as Trip_Count,
             SUM(Distance_KM) as Total_Distance,
             AVG(Distance_KM) as Average_Distance
      FROM Transportation
      GROUP BY Vehicle_Type
      ORDER BY Total_Distance DESC
    "#,
  },
  CannedQuery {
    name:    "Energy by Source Type",
    catalog: Catalog::Analytical,
    sql:     r#"
      SELECT Energy_Source, COUNT(*) as Record_Count,
             SUM(Consumption_KWH) as Total_KWH,
             AVG(Consumption_KWH) as Average_KWH
      FROM Energy_Consumption
      GROUP BY Energy_Source
      ORDER BY Total_KWH DESC
    "#,
  },
  CannedQuery {
    name:    "Waste by Type",
    catalog: Catalog::Analytical,
    sql:     r#"
      SELECT Waste_Type, COUNT(*) as Waste_Count,
             SUM(Waste_Weight_KG) as Total_Weight,
             AVG(Waste_Weight_KG) as Average_Weight
      FROM Waste_Management
      GROUP BY Waste_Type
      ORDER BY Total_Weight DESC
    "#,
  },
  CannedQuery {
    name:    "Transport by Month",
    catalog: Catalog::Analytical,
    sql:     r#"
      SELECT strftime('%Y-%m', Date) as Month,
             COUNT(*) as Trip_Count,
             SUM(Distance_KM) as Total_Distance
      FROM Transportation
      GROUP BY Month
      ORDER BY Month
    "#,
  },
  CannedQuery {
    name:    "Energy Consumption by Month",
    catalog: Catalog::Analytical,
    sql:     r#"
      SELECT strftime('%Y-%m', Date) as Month,
             SUM(Consumption_KWH) as Total_KWH
      FROM Energy_Consumption
      GROUP BY Month
      ORDER BY Month
    "#,
  },
  CannedQuery {
    name:    "Waste Generation by Month",
    catalog: Catalog::Analytical,
    sql:     r#"
      SELECT strftime('%Y-%m', Date) as Month,
             SUM(Waste_Weight_KG) as Total_Waste
      FROM Waste_Management
      GROUP BY Month
      ORDER BY Month
    "#,
  },
  CannedQuery {
    name:    "Users with Above Average Energy Use",
    catalog: Catalog::Analytical,
    sql:     r#"
      SELECT up.User_ID, up.Full_Name, SUM(ec.Consumption_KWH) as Total_KWH
      FROM User_Profile up
      JOIN Energy_Consumption ec ON up.User_ID = ec.User_ID
      GROUP BY up.User_ID
      HAVING Total_KWH > (
          SELECT AVG(Total_User_KWH)
          FROM (
              SELECT SUM(Consumption_KWH) as Total_User_KWH
              FROM Energy_Consumption
              GROUP BY User_ID
          )
      )
      ORDER BY Total_KWH DESC
    "#,
  },
  CannedQuery {
    name:    "Users with Below Average Waste",
    catalog: Catalog::Analytical,
    sql:     r#"
      SELECT up.User_ID, up.Full_Name, SUM(wm.Waste_Weight_KG) as Total_Waste
      FROM User_Profile up
      JOIN Waste_Management wm ON up.User_ID = wm.User_ID
      GROUP BY up.User_ID
      HAVING Total_Waste < (
          SELECT AVG(Total_User_Waste)
          FROM (
              SELECT SUM(Waste_Weight_KG) as Total_User_Waste
              FROM Waste_Management
              GROUP BY User_ID
          )
      )
      ORDER BY Total_Waste
    "#,
  },
  CannedQuery {
    name:    "User Environmental Impact Summary",
    catalog: Catalog::Analytical,
    sql:     r#"
      SELECT up.User_ID, up.Full_Name, up.Location,
             SUM(t.Distance_KM) as Total_Travel_Distance,
             SUM(ec.Consumption_KWH) as Total_Energy_Consumption,
             SUM(wm.Waste_Weight_KG) as Total_Waste_Generated,
             SUM(ia.Emission_Produced) as Total_Industrial_Emissions,
             SUM(co.Offset_Amount) as Total_Carbon_Offset
      FROM User_Profile up
      LEFT JOIN Transportation t ON up.User_ID = t.User_ID
      LEFT JOIN Energy_Consumption ec ON up.User_ID = ec.User_ID
      LEFT JOIN Waste_Management wm ON up.User_ID = wm.User_ID
      LEFT JOIN Industrial_Activity ia ON up.User_ID = ia.User_ID
      LEFT JOIN Carbon_Offset co ON up.User_ID = co.User_ID
      GROUP BY up.User_ID
      ORDER BY up.User_ID
    "#,
  },
  CannedQuery {
    name:    "User Carbon Footprint View",
    catalog: Catalog::Analytical,
    sql:     r#"
      SELECT up.User_ID, up.Full_Name,
             COALESCE(SUM(t.Distance_KM * ef_t.Emission_Per_Unit), 0) as Transport_Emissions,
             COALESCE(SUM(ec.Consumption_KWH * ef_e.Emission_Per_Unit), 0) as Energy_Emissions,
             COALESCE(SUM(wm.Waste_Weight_KG * ef_w.Emission_Per_Unit), 0) as Waste_Emissions,
             COALESCE(SUM(ia.Emission_Produced), 0) as Industrial_Emissions,
             COALESCE(SUM(co.Offset_Amount), 0) as Carbon_Offset
      FROM User_Profile up
      LEFT JOIN Transportation t ON up.User_ID = t.User_ID
      LEFT JOIN Emission_Factor ef_t ON t.Vehicle_Type = ef_t.Source_Type
      LEFT JOIN Energy_Consumption ec ON up.User_ID = ec.User_ID
      LEFT JOIN Emission_Factor ef_e ON ec.Energy_Source = ef_e.Source_Type
      LEFT JOIN Waste_Management wm ON up.User_ID = wm.User_ID
      LEFT JOIN Emission_Factor ef_w ON 'Waste' = ef_w.Source_Type
      LEFT JOIN Industrial_Activity ia ON up.User_ID = ia.User_ID
      LEFT JOIN Carbon_Offset co ON up.User_ID = co.User_ID
      GROUP BY up.User_ID
    "#,
  },
  CannedQuery {
    name:    "New User Template",
    catalog: Catalog::Analytical,
    sql:     r#"
      -- Example:
      -- INSERT INTO User_Profile (Full_Name, Email, Location)
      -- VALUES ('New User', 'new.user@email.com', 'City')
      SELECT 'INSERT INTO User_Profile (Full_Name, Email, Location) VALUES (''New User'', ''new.user@email.com'', ''City'')' as SQL_Statement
    "#,
  },
  CannedQuery {
    name:    "Update User Template",
    catalog: Catalog::Analytical,
    sql:     r#"
      -- Example:
      -- UPDATE User_Profile
      -- SET Email = 'updated.email@example.com', Location = 'New Location'
      -- WHERE User_ID = 1
      SELECT 'UPDATE User_Profile SET Email = ''updated.email@example.com'', Location = ''New Location'' WHERE User_ID = 1' as SQL_Statement
    "#,
  },
  CannedQuery {
    name:    "Delete Record Template",
    catalog: Catalog::Analytical,
    sql:     r#"
      -- Example:
      -- DELETE FROM Transportation
      -- WHERE Transport_ID = 1
      SELECT 'DELETE FROM Transportation WHERE Transport_ID = 1' as SQL_Statement
    "#,
  },
  CannedQuery {
    name:    "Create Carbon Footprint View",
    catalog: Catalog::Analytical,
    sql:     r#"
      CREATE VIEW IF NOT EXISTS Carbon_Footprint_View AS
      SELECT
          up.User_ID,
          up.Full_Name,
          up.Location,
          COALESCE(SUM(t.Distance_KM * ef_t.Emission_Per_Unit), 0) as Transport_Emissions,
          COALESCE(SUM(ec.Consumption_KWH * ef_e.Emission_Per_Unit), 0) as Energy_Emissions,
          COALESCE(SUM(wm.Waste_Weight_KG * ef_w.Emission_Per_Unit), 0) as Waste_Emissions,
          COALESCE(SUM(ia.Emission_Produced), 0) as Industrial_Emissions,
          COALESCE(SUM(co.Offset_Amount), 0) as Offset_Amount,
          (
              COALESCE(SUM(t.Distance_KM * ef_t.Emission_Per_Unit), 0) +
              COALESCE(SUM(ec.Consumption_KWH * ef_e.Emission_Per_Unit), 0) +
              COALESCE(SUM(wm.Waste_Weight_KG * ef_w.Emission_Per_Unit), 0) +
              COALESCE(SUM(ia.Emission_Produced), 0) -
              COALESCE(SUM(co.Offset_Amount), 0)
          ) as Net_Emissions
      FROM User_Profile up
      LEFT JOIN Transportation t ON up.User_ID = t.User_ID
      LEFT JOIN Emission_Factor ef_t ON t.Vehicle_Type = ef_t.Source_Type
      LEFT JOIN Energy_Consumption ec ON up.User_ID = ec.User_ID
      LEFT JOIN Emission_Factor ef_e ON ec.Energy_Source = ef_e.Source_Type
      LEFT JOIN Waste_Management wm ON up.User_ID = wm.User_ID
      LEFT JOIN Emission_Factor ef_w ON 'Waste' = ef_w.Source_Type
      LEFT JOIN Industrial_Activity ia ON up.User_ID = ia.User_ID
      LEFT JOIN Carbon_Offset co ON up.User_ID = co.User_ID
      GROUP BY up.User_ID
    "#,
  },
  CannedQuery {
    name:    "Query Carbon Footprint View",
    catalog: Catalog::Analytical,
    sql:     r#"
      SELECT * FROM Carbon_Footprint_View
      ORDER BY Net_Emissions DESC;
    "#,
  },
  CannedQuery {
    name:    "Users with No Carbon Offset",
    catalog: Catalog::Analytical,
    sql:     r#"
      SELECT up.User_ID, up.Full_Name, up.Email, up.Location
      FROM User_Profile up
      WHERE NOT EXISTS (
          SELECT 1
          FROM Carbon_Offset co
          WHERE co.User_ID = up.User_ID
      )
      AND EXISTS (
          SELECT 1
          FROM (
              SELECT t.User_ID FROM Transportation t
              UNION
              SELECT ec.User_ID FROM Energy_Consumption ec
              UNION
              SELECT wm.User_ID FROM Waste_Management wm
              UNION
              SELECT ia.User_ID FROM Industrial_Activity ia
          ) as active_users
          WHERE active_users.User_ID = up.User_ID
      )
      ORDER BY up.User_ID;
    "#,
  },
  CannedQuery {
    name:    "User Emission Categories with Ranking",
    catalog: Catalog::Analytical,
    sql:     r#"
      SELECT
          User_ID,
          Full_Name,
          Net_Emissions,
          CASE
              WHEN Net_Emissions > 1000 THEN 'Very High'
              WHEN Net_Emissions > 500 THEN 'High'
              WHEN Net_Emissions > 200 THEN 'Medium'
              WHEN Net_Emissions > 0 THEN 'Low'
              ELSE 'Carbon Negative'
          END as Emission_Category,
          RANK() OVER (ORDER BY Net_Emissions DESC) as Emission_Rank,
          PERCENT_RANK() OVER (ORDER BY Net_Emissions DESC) as Percentile
      FROM Carbon_Footprint_View
      ORDER BY Net_Emissions DESC;
    "#,
  },
  CannedQuery {
    name:    "Emission Analysis with CTE",
    catalog: Catalog::Analytical,
    sql:     r#"
      WITH
      UserEmissions AS (
          SELECT
              up.User_ID,
              up.Full_Name,
              COALESCE(SUM(t.Distance_KM * ef.Emission_Per_Unit), 0) as Transport_Emissions
          FROM User_Profile up
          LEFT JOIN Transportation t ON up.User_ID = t.User_ID
          LEFT JOIN Emission_Factor ef ON t.Vehicle_Type = ef.Source_Type
          GROUP BY up.User_ID
      ),
      EmissionStats AS (
          SELECT
              AVG(Transport_Emissions) as Avg_Emissions,
              MAX(Transport_Emissions) as Max_Emissions,
              MIN(Transport_Emissions) as Min_Emissions
          FROM UserEmissions
          WHERE Transport_Emissions > 0
      )
      SELECT
          ue.User_ID,
          ue.Full_Name,
          ue.Transport_Emissions,
          es.Avg_Emissions,
          ((ue.Transport_Emissions - es.Avg_Emissions) / es.Avg_Emissions) * 100 as Percent_Diff_From_Avg,
          CASE
              WHEN ue.Transport_Emissions > es.Avg_Emissions THEN 'Above Average'
              WHEN ue.Transport_Emissions < es.Avg_Emissions THEN 'Below Average'
              ELSE 'Average'
          END as Emissions_Category
      FROM UserEmissions ue, EmissionStats es
      WHERE ue.Transport_Emissions > 0
      ORDER BY ue.Transport_Emissions DESC;
    "#,
  },
  CannedQuery {
    name:    "Users Activity Comparison",
    catalog: Catalog::Analytical,
    sql:     r#"
      -- Users with transportation but no energy consumption
      SELECT up.User_ID, up.Full_Name, 'Transportation Only' as Activity_Type
      FROM User_Profile up
      WHERE EXISTS (
          SELECT 1 FROM Transportation t WHERE t.User_ID = up.User_ID
      )
      AND NOT EXISTS (
          SELECT 1 FROM Energy_Consumption ec WHERE ec.User_ID = up.User_ID
      )

      UNION

      -- Users with energy consumption but no transportation
      SELECT up.User_ID, up.Full_Name, 'Energy Only' as Activity_Type
      FROM User_Profile up
      WHERE EXISTS (
          SELECT 1 FROM Energy_Consumption ec WHERE ec.User_ID = up.User_ID
      )
      AND NOT EXISTS (
          SELECT 1 FROM Transportation t WHERE t.User_ID = up.User_ID
      )

      UNION

      -- Users with both
      SELECT up.User_ID, up.Full_Name, 'Both Activities' as Activity_Type
      FROM User_Profile up
      WHERE EXISTS (
          SELECT 1 FROM Transportation t WHERE t.User_ID = up.User_ID
      )
      AND EXISTS (
          SELECT 1 FROM Energy_Consumption ec WHERE ec.User_ID = up.User_ID
      )

      ORDER BY User_ID;
    "#,
  },
  CannedQuery {
    name:    "Compare Users in Same Location",
    catalog: Catalog::Analytical,
    sql:     r#"
      SELECT
          u1.User_ID as User1_ID,
          u1.Full_Name as User1_Name,
          u2.User_ID as User2_ID,
          u2.Full_Name as User2_Name,
          u1.Location,
          cfv1.Net_Emissions as User1_Emissions,
          cfv2.Net_Emissions as User2_Emissions,
          ABS(cfv1.Net_Emissions - cfv2.Net_Emissions) as Emission_Difference
      FROM User_Profile u1
      JOIN User_Profile u2 ON u1.Location = u2.Location AND u1.User_ID < u2.User_ID
      JOIN Carbon_Footprint_View cfv1 ON u1.User_ID = cfv1.User_ID
      JOIN Carbon_Footprint_View cfv2 ON u2.User_ID = cfv2.User_ID
      ORDER BY u1.Location, Emission_Difference DESC;
    "#,
  },
  CannedQuery {
    name:    "Emission Reduction Projection",
    catalog: Catalog::Analytical,
    sql:     r#"
      WITH RECURSIVE
      EmissionProjection AS (
          -- Base case: current emissions
          SELECT
              User_ID,
              Full_Name,
              Net_Emissions as Current_Emissions,
              Net_Emissions as Projected_Emissions,
              0 as Year
          FROM Carbon_Footprint_View

          UNION ALL

          -- Recursive case: reduce by 5% each year
          SELECT
              User_ID,
              Full_Name,
              Current_Emissions,
              Projected_Emissions * 0.95 as Projected_Emissions,
              Year + 1
          FROM EmissionProjection
          WHERE Year < 10  -- Project for 10 years
      )
      SELECT
          User_ID,
          Full_Name,
          Current_Emissions,
          Year,
          ROUND(Projected_Emissions, 2) as Projected_Emissions,
          ROUND((Projected_Emissions / Current_Emissions) * 100, 2) as Percent_Of_Original
      FROM EmissionProjection
      WHERE User_ID IN (
          SELECT User_ID FROM Carbon_Footprint_View
          ORDER BY Net_Emissions DESC LIMIT 3  -- Only show top 3 emitters
      )
      ORDER BY User_ID, Year;
    "#,
  },
];

#[cfg(test)]
mod tests {
  use std::collections::HashSet;

  use super::*;
  use crate::query::StatementKind;

  #[test]
  fn names_are_unique_across_catalogs() {
    let mut seen = HashSet::new();
    for q in all() {
      assert!(seen.insert(q.name), "duplicate canned query {:?}", q.name);
    }
    assert_eq!(seen.len(), BASIC.len() + ANALYTICAL.len());
  }

  #[test]
  fn find_is_exact() {
    assert_eq!(find("Show All Users").map(|q| q.catalog), Some(Catalog::Basic));
    assert_eq!(find("Transport by Month").map(|q| q.catalog), Some(Catalog::Analytical));
    assert!(find("show all users").is_none());
  }

  #[test]
  fn only_the_view_definition_is_a_write() {
    let writes: Vec<_> = all()
      .filter(|q| StatementKind::classify(q.sql) == StatementKind::Write)
      .map(|q| q.name)
      .collect();
    assert_eq!(writes, ["Create Carbon Footprint View"]);
  }
}
