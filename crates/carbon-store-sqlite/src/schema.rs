//! SQL schema for the carbon emission store.
//!
//! Table and column names match the demo database the canned catalogs are
//! written against, so they keep their `Upper_Snake` spelling.

/// Run on every connection. SQLite leaves foreign-key enforcement off
/// unless asked, per connection.
pub const CONNECTION_PRAGMAS: &str = "PRAGMA foreign_keys = ON;";

/// Full schema DDL. Only ever run against a freshly created file.
pub const SCHEMA: &str = "
CREATE TABLE User_Profile (
    User_ID   INTEGER PRIMARY KEY,
    Full_Name VARCHAR(100),
    Email     VARCHAR(100),
    Location  VARCHAR(100)
);

CREATE TABLE Transportation (
    Transport_ID INTEGER PRIMARY KEY,
    User_ID      INTEGER,
    Vehicle_Type VARCHAR(50),
    Distance_KM  FLOAT,
    Date         DATE,
    FOREIGN KEY (User_ID) REFERENCES User_Profile(User_ID)
);

CREATE TABLE Energy_Consumption (
    Energy_ID       INTEGER PRIMARY KEY,
    User_ID         INTEGER,
    Energy_Source   VARCHAR(50),
    Consumption_KWH FLOAT,
    Date            DATE,
    FOREIGN KEY (User_ID) REFERENCES User_Profile(User_ID)
);

CREATE TABLE Waste_Management (
    Waste_ID        INTEGER PRIMARY KEY,
    User_ID         INTEGER,
    Waste_Type      VARCHAR(50),
    Waste_Weight_KG FLOAT,
    Date            DATE,
    FOREIGN KEY (User_ID) REFERENCES User_Profile(User_ID)
);

CREATE TABLE Industrial_Activity (
    Industry_ID       INTEGER PRIMARY KEY,
    User_ID           INTEGER,
    Activity_Type     VARCHAR(100),
    Emission_Produced FLOAT,
    Date              DATE,
    FOREIGN KEY (User_ID) REFERENCES User_Profile(User_ID)
);

CREATE TABLE Emission_Factor (
    Factor_ID         INTEGER PRIMARY KEY,
    Source_Type       VARCHAR(50),
    Emission_Per_Unit FLOAT
);

-- Historical log only; reports recompute from activity and factors.
CREATE TABLE Emission_Record (
    Record_ID       INTEGER PRIMARY KEY,
    Factor_ID       INTEGER,
    Source_Type     VARCHAR(50),
    Source_ID       INTEGER,
    Emission_Amount FLOAT,
    Date            DATE,
    FOREIGN KEY (Factor_ID) REFERENCES Emission_Factor(Factor_ID)
);

CREATE TABLE Sustainability_Program (
    Program_ID   INTEGER PRIMARY KEY,
    Program_Name VARCHAR(100),
    Description  TEXT
);

CREATE TABLE User_Program (
    User_ID         INTEGER,
    Program_ID      INTEGER,
    Enrollment_Date DATE,
    PRIMARY KEY (User_ID, Program_ID),
    FOREIGN KEY (User_ID) REFERENCES User_Profile(User_ID),
    FOREIGN KEY (Program_ID) REFERENCES Sustainability_Program(Program_ID)
);

CREATE TABLE Carbon_Offset (
    Offset_ID     INTEGER PRIMARY KEY,
    User_ID       INTEGER,
    Offset_Type   VARCHAR(50),
    Offset_Amount FLOAT,
    Date          DATE,
    FOREIGN KEY (User_ID) REFERENCES User_Profile(User_ID)
);

PRAGMA user_version = 1;
";
