// ********* Input data structures ***********

use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::Display;

/// Province-level code (and area scope code) marking a nationwide row.
pub const NATIONWIDE_CODE: &str = "00";
/// City code of the nationwide aggregate row.
pub const NO_CITY_CODE: &str = "000";
/// Department code of rows that do not sit under a department.
pub const NO_DEPARTMENT_CODE: &str = "000";
/// Village code of rows that are not village-level.
pub const NO_VILLAGE_CODE: &str = "0000";

/// Color used for parties that are absent from the palette.
pub const FALLBACK_COLOR: &str = "#DEE2E6";

// Legacy province-tier rows still present in the upstream files. They are not
// voting jurisdictions and never appear in the city filter.
pub(crate) const PROVINCE_TIER_NAMES: [&str; 2] = ["臺灣省", "福建省"];

/// One administrative unit of a given election year.
///
/// The code tuple `(prv_code, city_code, dept_code, li_code)` identifies the
/// unit; `area_code` carries the scope tier of the row. Codes are only
/// meaningful within the files of a single year.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct RegionRecord {
    pub prv_code: String,
    pub city_code: String,
    pub area_code: String,
    pub dept_code: String,
    pub li_code: String,
    pub area_name: String,
}

impl RegionRecord {
    /// The all-sentinel code tuple denotes the aggregate, country-wide row.
    pub fn is_nationwide(&self) -> bool {
        self.prv_code == NATIONWIDE_CODE
            && self.city_code == NO_CITY_CODE
            && self.dept_code == NO_DEPARTMENT_CODE
            && self.li_code == NO_VILLAGE_CODE
    }
}

/// A registered party of a given year. Party codes are not stable across
/// years.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct PartyRecord {
    pub party_code: String,
    pub party_name: String,
}

/// One entry of the global party color palette, keyed by party name.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct PartyColorRecord {
    pub party_name: String,
    pub color: String,
}

/// Links a ballot number to a party, within one year only.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub cand_no: String,
    pub party_code: String,
}

/// A tally row of the candidate vote file.
#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct CandidateVoteRecord {
    pub prv_code: String,
    pub cand_no: String,
    pub ticket_num: u64,
    pub ticket_percent: f64,
}

impl CandidateVoteRecord {
    /// National tallies carry the nationwide province code; everything else
    /// is a per-district breakdown.
    pub fn is_national(&self) -> bool {
        self.prv_code == NATIONWIDE_CODE
    }
}

// ******** Output data structures *********

/// One ranked entry of the national party vote summary of a year.
///
/// The serialized field names follow the wire format consumed by the views.
#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct PartyVoteSummary {
    pub year: String,
    #[serde(rename = "candNo")]
    pub cand_no: String,
    #[serde(rename = "ticketNum")]
    pub ticket_num: u64,
    #[serde(rename = "ticketPercent")]
    pub ticket_percent: f64,
    #[serde(rename = "partyName")]
    pub party_name: String,
    #[serde(rename = "partyColor")]
    pub party_color: String,
}

// ********* Store **********

/// The datasets retrieved for a single election year.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct YearData {
    pub regions: Vec<RegionRecord>,
    /// Raw rows of the election profile file. No derived view reads them
    /// yet, so their schema is kept opaque.
    pub region_votes: Vec<JSValue>,
    pub parties: Vec<PartyRecord>,
    pub candidates: Vec<CandidateRecord>,
    pub candidate_votes: Vec<CandidateVoteRecord>,
}

/// The assembled, read-only election data of a session.
///
/// A store is built once, by a loader or a
/// [`StoreBuilder`](crate::builder::StoreBuilder), and passed by reference to
/// every derived computation. Derived results are recomputed in full, never
/// patched, so the store itself is never mutated after construction.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct ElectionStore {
    pub(crate) years: Vec<String>,
    pub(crate) by_year: HashMap<String, YearData>,
    pub(crate) party_colors: Vec<PartyColorRecord>,
}

impl ElectionStore {
    /// The loaded years, in insertion order.
    pub fn years(&self) -> &[String] {
        &self.years
    }

    pub fn year_data(&self, year: &str) -> Option<&YearData> {
        self.by_year.get(year)
    }

    /// The global color palette. Not year-scoped.
    pub fn party_colors(&self) -> &[PartyColorRecord] {
        &self.party_colors
    }
}

/// Errors raised while assembling a store.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum StoreError {
    DuplicateYear(String),
}

impl Error for StoreError {}

impl Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::DuplicateYear(year) => write!(f, "year {} was added twice", year),
        }
    }
}
