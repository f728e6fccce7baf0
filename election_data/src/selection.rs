use crate::store::*;
use crate::{city_names, party_vote_summary, town_names};
use log::info;
use std::collections::BTreeMap;

/// A field of the current selection.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum SelectionField {
    Year,
    City,
    Town,
}

/// The current `(year, city, town)` choice. A field is empty until selected.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct Selection {
    pub year: String,
    pub city: String,
    pub town: String,
}

/// A loaded store together with the selection-driven filter lists.
///
/// This is the surface the presentation layer talks to. Selecting a year
/// recomputes the city list and clears the city and town; selecting a city
/// recomputes the town list and clears the town; selecting a town only
/// records it. The derived lists are replaced in full on every change.
pub struct Session {
    store: ElectionStore,
    current: Selection,
    cities: Vec<String>,
    towns: Vec<String>,
}

impl Session {
    pub fn new(store: ElectionStore) -> Session {
        Session {
            store,
            current: Selection::default(),
            cities: Vec::new(),
            towns: Vec::new(),
        }
    }

    /// Installs a freshly loaded store and resets the whole selection.
    ///
    /// Loads return owned stores, so a slow superseded load cannot clobber a
    /// newer one: whichever store the caller installs last wins, in full.
    pub fn replace_store(&mut self, store: ElectionStore) {
        info!("replace_store: {} years", store.years().len());
        self.store = store;
        self.current = Selection::default();
        self.cities.clear();
        self.towns.clear();
    }

    pub fn store(&self) -> &ElectionStore {
        &self.store
    }

    pub fn selection(&self) -> &Selection {
        &self.current
    }

    /// The city filter list of the selected year, nationwide entry first.
    pub fn cities(&self) -> &[String] {
        &self.cities
    }

    /// The town filter list under the selected city.
    pub fn towns(&self) -> &[String] {
        &self.towns
    }

    pub fn set_selection(&mut self, field: SelectionField, value: &str) {
        match field {
            SelectionField::Year => {
                self.current.year = value.to_string();
                self.current.city.clear();
                self.current.town.clear();
                self.cities = city_names(&self.store, value);
                self.towns.clear();
            }
            SelectionField::City => {
                self.current.city = value.to_string();
                self.current.town.clear();
                self.towns = town_names(&self.store, &self.current.year, value);
            }
            SelectionField::Town => {
                self.current.town = value.to_string();
            }
        }
    }

    /// The ranked national party vote summary, recomputed from the store.
    pub fn party_vote_summary(&self) -> BTreeMap<String, Vec<PartyVoteSummary>> {
        party_vote_summary(&self.store)
    }
}
