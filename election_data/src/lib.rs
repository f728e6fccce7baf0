mod store;
use log::{debug, info, warn};

use std::collections::{BTreeMap, HashMap};

pub mod builder;
pub mod quick_start;
pub mod selection;

pub use crate::store::*;

/// Computes the ranked national party vote summary for every loaded year.
///
/// For each year, independently: the tally rows aggregated to the whole
/// country are joined with the candidate and party tables of the same year,
/// then with the global color palette. A tally row whose candidate or party
/// cannot be resolved is skipped with a warning rather than failing the
/// year; a party absent from the palette falls back to [`FALLBACK_COLOR`].
/// The entries of a year are sorted by vote share, highest first, and ties
/// keep their source order.
///
/// The result replaces any previously computed summary in full. Calling this
/// twice on the same store yields the same output.
pub fn party_vote_summary(store: &ElectionStore) -> BTreeMap<String, Vec<PartyVoteSummary>> {
    info!(
        "party_vote_summary: processing {} years",
        store.years().len()
    );
    let mut res: BTreeMap<String, Vec<PartyVoteSummary>> = BTreeMap::new();
    for year in store.years() {
        let entries = match store.year_data(year) {
            Some(data) => year_summary(year, data, store.party_colors()),
            None => Vec::new(),
        };
        res.insert(year.clone(), entries);
    }
    res
}

fn year_summary(
    year: &str,
    data: &YearData,
    palette: &[PartyColorRecord],
) -> Vec<PartyVoteSummary> {
    // Codes are year-scoped, so the lookup tables are rebuilt for each year.
    let candidates_by_no: HashMap<&str, &CandidateRecord> = data
        .candidates
        .iter()
        .map(|c| (c.cand_no.as_str(), c))
        .collect();
    let parties_by_code: HashMap<&str, &PartyRecord> = data
        .parties
        .iter()
        .map(|p| (p.party_code.as_str(), p))
        .collect();
    let colors_by_party: HashMap<&str, &str> = palette
        .iter()
        .map(|pc| (pc.party_name.as_str(), pc.color.as_str()))
        .collect();

    let mut entries: Vec<PartyVoteSummary> = Vec::new();
    for vote in data.candidate_votes.iter().filter(|v| v.is_national()) {
        let candidate = match candidates_by_no.get(vote.cand_no.as_str()) {
            Some(c) => *c,
            None => {
                warn!(
                    "year {}: no candidate record for ballot number {}, skipping tally row",
                    year, vote.cand_no
                );
                continue;
            }
        };
        let party = match parties_by_code.get(candidate.party_code.as_str()) {
            Some(p) => *p,
            None => {
                warn!(
                    "year {}: no party record for code {} (candidate {}), skipping tally row",
                    year, candidate.party_code, vote.cand_no
                );
                continue;
            }
        };
        let color = colors_by_party
            .get(party.party_name.as_str())
            .copied()
            .unwrap_or(FALLBACK_COLOR);
        entries.push(PartyVoteSummary {
            year: year.to_string(),
            cand_no: vote.cand_no.clone(),
            ticket_num: vote.ticket_num,
            ticket_percent: vote.ticket_percent,
            party_name: party.party_name.clone(),
            party_color: color.to_string(),
        });
    }

    // Vec::sort_by is stable: equal shares keep their source order.
    entries.sort_by(|a, b| {
        b.ticket_percent
            .partial_cmp(&a.ticket_percent)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    debug!("year_summary: year {}: {} entries", year, entries.len());
    entries
}

/// The city-level filter list of a year.
///
/// Keeps the top-level rows of the region table (nationwide scope code, no
/// department, no village), minus the two legacy province-tier rows. The
/// aggregate nationwide entry is recognized by its code tuple and pinned to
/// the front; the remaining cities keep their source order. An unknown year
/// yields an empty list.
pub fn city_names(store: &ElectionStore, year: &str) -> Vec<String> {
    let data = match store.year_data(year) {
        Some(d) => d,
        None => {
            debug!("city_names: no data for year {}", year);
            return Vec::new();
        }
    };

    let mut res: Vec<String> = Vec::new();
    let mut cities: Vec<String> = Vec::new();
    for region in data.regions.iter() {
        let top_level = region.area_code == NATIONWIDE_CODE
            && region.dept_code == NO_DEPARTMENT_CODE
            && region.li_code == NO_VILLAGE_CODE;
        if !top_level || PROVINCE_TIER_NAMES.contains(&region.area_name.as_str()) {
            continue;
        }
        if region.is_nationwide() {
            res.push(region.area_name.clone());
        } else {
            cities.push(region.area_name.clone());
        }
    }
    res.extend(cities);
    res
}

/// The town-level filter list under one city of a year.
///
/// The city row is resolved by area name to obtain its `(prv_code,
/// city_code)` pair; towns are the rows sharing that pair with a real
/// department code and no village code, in source order. An unknown year or
/// city yields an empty list.
pub fn town_names(store: &ElectionStore, year: &str, city: &str) -> Vec<String> {
    let data = match store.year_data(year) {
        Some(d) => d,
        None => {
            debug!("town_names: no data for year {}", year);
            return Vec::new();
        }
    };
    let city_row = match data.regions.iter().find(|r| r.area_name == city) {
        Some(r) => r,
        None => {
            debug!("town_names: no region named {:?} in year {}", city, year);
            return Vec::new();
        }
    };

    data.regions
        .iter()
        .filter(|r| {
            r.prv_code == city_row.prv_code
                && r.city_code == city_row.city_code
                && r.li_code == NO_VILLAGE_CODE
                && r.dept_code != NO_DEPARTMENT_CODE
        })
        .map(|r| r.area_name.clone())
        .collect()
}
