//! Search criteria: which court, and which decision-date range.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

use lagrum_common::{Result, ScrapeError};

/// Format the form's date fields expect.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Court filter accepted by the search form's authority dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Court {
    /// Every court and authority (the form's `ALLAMYND` option).
    All,
    SupremeCourt,
    SupremeAdministrativeCourt,
    LabourCourt,
    MigrationCourtOfAppeal,
    LandAndEnvironmentCourtOfAppeal,
    PatentAndMarketCourtOfAppeal,
}

impl Court {
    /// The option value the dropdown carries for this court.
    pub fn code(self) -> &'static str {
        match self {
            Court::All => "ALLAMYND",
            Court::SupremeCourt => "HDO",
            Court::SupremeAdministrativeCourt => "HFD",
            Court::LabourCourt => "AD",
            Court::MigrationCourtOfAppeal => "MIG",
            Court::LandAndEnvironmentCourtOfAppeal => "MOD",
            Court::PatentAndMarketCourtOfAppeal => "PMOD",
        }
    }
}

impl FromStr for Court {
    type Err = ScrapeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "ALLAMYND" => Ok(Court::All),
            "HDO" => Ok(Court::SupremeCourt),
            "HFD" => Ok(Court::SupremeAdministrativeCourt),
            "AD" => Ok(Court::LabourCourt),
            "MIG" => Ok(Court::MigrationCourtOfAppeal),
            "MOD" => Ok(Court::LandAndEnvironmentCourtOfAppeal),
            "PMOD" => Ok(Court::PatentAndMarketCourtOfAppeal),
            other => Err(ScrapeError::InvalidCriteria(format!(
                "unknown court code `{other}` (expected one of ALLAMYND, HDO, HFD, AD, MIG, MOD, PMOD)"
            ))),
        }
    }
}

impl fmt::Display for Court {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Validated court filter and inclusive decision-date range for one search.
#[derive(Debug, Clone)]
pub struct SearchCriteria {
    pub court: Court,
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl SearchCriteria {
    /// Build criteria, rejecting an inverted date range up front.
    pub fn new(court: Court, from: NaiveDate, to: NaiveDate) -> Result<Self> {
        if from > to {
            return Err(ScrapeError::InvalidCriteria(format!(
                "date range is inverted: {from} is after {to}"
            )));
        }
        Ok(Self { court, from, to })
    }

    /// The lower date bound, formatted for the form.
    pub fn from_field(&self) -> String {
        self.from.format(DATE_FORMAT).to_string()
    }

    /// The upper date bound, formatted for the form.
    pub fn to_field(&self) -> String {
        self.to.format(DATE_FORMAT).to_string()
    }
}
