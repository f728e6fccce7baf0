pub use crate::store::*;

/// A builder for assembling an [`ElectionStore`] year by year.
///
/// Loaders use it to install each year as its retrievals complete; tests use
/// it to put together small stores by hand.
///
/// ```
/// pub use election_data::builder::StoreBuilder;
/// # use election_data::StoreError;
///
/// let store = StoreBuilder::new()
///     .party_colors(vec![])
///     .year_data("2024", Default::default())?
///     .build();
///
/// assert_eq!(store.years(), ["2024".to_string()]);
/// # Ok::<(), StoreError>(())
/// ```
pub struct StoreBuilder {
    pub(crate) _store: ElectionStore,
}

impl StoreBuilder {
    pub fn new() -> StoreBuilder {
        StoreBuilder {
            _store: ElectionStore::default(),
        }
    }

    /// Replaces the global party color palette.
    pub fn party_colors(mut self, colors: Vec<PartyColorRecord>) -> StoreBuilder {
        self._store.party_colors = colors;
        self
    }

    /// Adds the datasets of one year. Years keep their insertion order.
    pub fn year_data(mut self, year: &str, data: YearData) -> Result<StoreBuilder, StoreError> {
        if self._store.by_year.contains_key(year) {
            return Err(StoreError::DuplicateYear(year.to_string()));
        }
        self._store.years.push(year.to_string());
        self._store.by_year.insert(year.to_string(), data);
        Ok(self)
    }

    pub fn build(self) -> ElectionStore {
        self._store
    }
}
