use log::{debug, info, warn};

use election_data::builder::StoreBuilder;
use election_data::*;
use snafu::{prelude::*, Snafu};

use std::collections::BTreeMap;
use std::fs;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value as JSValue;
use text_diff::print_diff;

pub mod fs_files;

/// The eight presidential elections with published datasets.
pub const SUPPORTED_YEARS: [&str; 8] = [
    "1996", "2000", "2004", "2008", "2012", "2016", "2020", "2024",
];

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum FetchError {
    #[snafu(display("Error opening data file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing data file {path}"))]
    ParsingJson {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Error assembling the store"))]
    Store { source: StoreError },
    #[snafu(display("Error serializing the summary"))]
    SerializingSummary { source: serde_json::Error },
    #[snafu(display("Error writing the summary to {path}"))]
    WritingSummary {
        source: std::io::Error,
        path: String,
    },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        // The source must stay Send: year loads travel across spawned tasks.
        #[snafu(source(from(Box<dyn std::error::Error + Send + Sync>, Some)))]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

pub type FetchResult<T> = Result<T, FetchError>;

/// A source of parsed election datasets.
///
/// Implementations own the actual paths and formats; the loader only relies
/// on the five per-year record sequences and the global color palette being
/// obtainable by year key.
#[async_trait]
pub trait DataFetcher: Send + Sync {
    /// Administrative region rows of a year.
    async fn regions(&self, year: &str) -> FetchResult<Vec<RegionRecord>>;
    /// Raw rows of the election profile file of a year.
    async fn region_profiles(&self, year: &str) -> FetchResult<Vec<JSValue>>;
    /// Registered parties of a year.
    async fn parties(&self, year: &str) -> FetchResult<Vec<PartyRecord>>;
    /// Registered candidates of a year.
    async fn candidates(&self, year: &str) -> FetchResult<Vec<CandidateRecord>>;
    /// Candidate tally rows of a year.
    async fn candidate_votes(&self, year: &str) -> FetchResult<Vec<CandidateVoteRecord>>;
    /// The global party color palette.
    async fn party_colors(&self) -> FetchResult<Vec<PartyColorRecord>>;
}

/// The outcome of a [`load_all`] call: the assembled store plus the years
/// whose retrievals failed.
#[derive(Debug)]
pub struct LoadReport {
    pub store: ElectionStore,
    pub failures: Vec<(String, FetchError)>,
}

/// Retrieves every dataset for the given years and assembles a fresh store.
///
/// Years are retrieved concurrently and joined at the end; within a year the
/// five datasets are all-or-nothing, so a single failed retrieval removes
/// exactly that year from the store and leaves the others alone. The palette
/// is fetched once; if it cannot be retrieved, the store carries an empty
/// palette and every summary entry falls back to the default color.
///
/// Each call returns an owned store, so re-invocation replaces data
/// wholesale instead of mutating anything in flight.
pub async fn load_all<F>(fetcher: Arc<F>, years: &[String]) -> FetchResult<LoadReport>
where
    F: DataFetcher + 'static,
{
    info!("load_all: retrieving {} years", years.len());

    let party_colors = match fetcher.party_colors().await {
        Ok(colors) => colors,
        Err(e) => {
            warn!("load_all: could not retrieve the party color palette: {}", e);
            Vec::new()
        }
    };

    let mut handles = Vec::new();
    for year in years {
        let fetcher = Arc::clone(&fetcher);
        let year = year.clone();
        handles.push(tokio::spawn(async move {
            let res = load_year(fetcher.as_ref(), &year).await;
            (year, res)
        }));
    }

    let mut builder = StoreBuilder::new().party_colors(party_colors);
    let mut failures: Vec<(String, FetchError)> = Vec::new();
    for handle in handles {
        let (year, res) = match handle.await {
            Ok(p) => p,
            Err(e) => {
                whatever!("a retrieval task was aborted: {:?}", e);
            }
        };
        match res {
            Ok(data) => {
                builder = builder.year_data(&year, data).context(StoreSnafu {})?;
            }
            Err(e) => {
                warn!("load_all: year {} could not be loaded: {}", year, e);
                failures.push((year, e));
            }
        }
    }

    let store = builder.build();
    info!(
        "load_all: loaded {} years, {} failed",
        store.years().len(),
        failures.len()
    );
    Ok(LoadReport { store, failures })
}

/// Retrieves the five datasets of one year. The join is all-or-nothing: the
/// first failure discards whatever else was retrieved for the year.
async fn load_year<F: DataFetcher + ?Sized>(fetcher: &F, year: &str) -> FetchResult<YearData> {
    let (regions, region_votes, parties, candidates, candidate_votes) = tokio::try_join!(
        fetcher.regions(year),
        fetcher.region_profiles(year),
        fetcher.parties(year),
        fetcher.candidates(year),
        fetcher.candidate_votes(year),
    )?;
    debug!(
        "load_year: year {}: {} regions, {} parties, {} candidates, {} tally rows",
        year,
        regions.len(),
        parties.len(),
        candidates.len(),
        candidate_votes.len()
    );
    Ok(YearData {
        regions,
        region_votes,
        parties,
        candidates,
        candidate_votes,
    })
}

/// Serializes the summary mapping to the wire format consumed by the views.
pub fn summary_to_json(summary: &BTreeMap<String, Vec<PartyVoteSummary>>) -> FetchResult<JSValue> {
    serde_json::to_value(summary).context(SerializingSummarySnafu {})
}

/// Reads a previously written summary file.
pub fn read_summary(path: &str) -> FetchResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    debug!("read_summary: read {} bytes", contents.len());
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })?;
    Ok(js)
}

/// Compares the computed summary against a reference file, printing a diff
/// on mismatch.
pub fn check_reference(summary_js: &JSValue, reference_path: &str) -> FetchResult<()> {
    let reference = read_summary(reference_path)?;
    let pretty_ref =
        serde_json::to_string_pretty(&reference).context(SerializingSummarySnafu {})?;
    let pretty_computed =
        serde_json::to_string_pretty(summary_js).context(SerializingSummarySnafu {})?;
    if pretty_ref != pretty_computed {
        warn!("Found differences with the reference summary");
        print_diff(pretty_ref.as_str(), pretty_computed.as_str(), "\n");
        whatever!("Difference detected between computed summary and reference summary")
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct MemoryFetcher {
        years: HashMap<String, YearData>,
        colors: Vec<PartyColorRecord>,
        fail_votes_for: Option<String>,
        fail_colors: bool,
    }

    impl MemoryFetcher {
        fn data(&self, year: &str) -> FetchResult<&YearData> {
            match self.years.get(year) {
                Some(d) => Ok(d),
                None => whatever!("no fixture data for year {}", year),
            }
        }
    }

    #[async_trait]
    impl DataFetcher for MemoryFetcher {
        async fn regions(&self, year: &str) -> FetchResult<Vec<RegionRecord>> {
            Ok(self.data(year)?.regions.clone())
        }
        async fn region_profiles(&self, year: &str) -> FetchResult<Vec<JSValue>> {
            Ok(self.data(year)?.region_votes.clone())
        }
        async fn parties(&self, year: &str) -> FetchResult<Vec<PartyRecord>> {
            Ok(self.data(year)?.parties.clone())
        }
        async fn candidates(&self, year: &str) -> FetchResult<Vec<CandidateRecord>> {
            Ok(self.data(year)?.candidates.clone())
        }
        async fn candidate_votes(&self, year: &str) -> FetchResult<Vec<CandidateVoteRecord>> {
            if self.fail_votes_for.as_deref() == Some(year) {
                whatever!("injected retrieval failure for year {}", year)
            }
            Ok(self.data(year)?.candidate_votes.clone())
        }
        async fn party_colors(&self) -> FetchResult<Vec<PartyColorRecord>> {
            if self.fail_colors {
                whatever!("injected palette retrieval failure")
            }
            Ok(self.colors.clone())
        }
    }

    fn year_labels(years: &[&str]) -> Vec<String> {
        years.iter().map(|y| y.to_string()).collect()
    }

    fn fixture_year(party_name: &str) -> YearData {
        YearData {
            parties: vec![PartyRecord {
                party_code: "P1".to_string(),
                party_name: party_name.to_string(),
            }],
            candidates: vec![CandidateRecord {
                cand_no: "1".to_string(),
                party_code: "P1".to_string(),
            }],
            candidate_votes: vec![CandidateVoteRecord {
                prv_code: "00".to_string(),
                cand_no: "1".to_string(),
                ticket_num: 5_000_000,
                ticket_percent: 55.0,
            }],
            ..Default::default()
        }
    }

    fn two_year_fetcher() -> MemoryFetcher {
        let mut years = HashMap::new();
        years.insert("2020".to_string(), fixture_year("Alpha"));
        years.insert("2024".to_string(), fixture_year("Beta"));
        MemoryFetcher {
            years,
            colors: vec![PartyColorRecord {
                party_name: "Beta".to_string(),
                color: "#112233".to_string(),
            }],
            fail_votes_for: None,
            fail_colors: false,
        }
    }

    #[tokio::test]
    async fn loads_years_in_request_order() {
        let fetcher = Arc::new(two_year_fetcher());
        let report = load_all(fetcher, &year_labels(&["2020", "2024"]))
            .await
            .unwrap();
        assert_eq!(report.store.years(), year_labels(&["2020", "2024"]));
        assert!(report.failures.is_empty());
    }

    #[tokio::test]
    async fn failed_year_is_absent_and_isolated() {
        let mut fetcher = two_year_fetcher();
        fetcher.fail_votes_for = Some("2020".to_string());
        let report = load_all(Arc::new(fetcher), &year_labels(&["2020", "2024"]))
            .await
            .unwrap();

        // All-or-nothing: the other datasets of 2020 were retrievable, but
        // the year must not be applied at all.
        assert!(report.store.year_data("2020").is_none());
        assert_eq!(report.store.years(), year_labels(&["2024"]));
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].0, "2020");
    }

    #[tokio::test]
    async fn palette_failure_degrades_to_empty_palette() {
        let mut fetcher = two_year_fetcher();
        fetcher.fail_colors = true;
        let report = load_all(Arc::new(fetcher), &year_labels(&["2020", "2024"]))
            .await
            .unwrap();

        assert!(report.store.party_colors().is_empty());
        assert_eq!(report.store.years().len(), 2);
        let summary = party_vote_summary(&report.store);
        assert_eq!(summary["2024"][0].party_color, FALLBACK_COLOR);
    }

    #[tokio::test]
    async fn loaded_store_feeds_the_summary() {
        let fetcher = Arc::new(two_year_fetcher());
        let report = load_all(fetcher, &year_labels(&["2020", "2024"]))
            .await
            .unwrap();

        let summary = party_vote_summary(&report.store);
        assert_eq!(summary["2024"][0].party_name, "Beta");
        assert_eq!(summary["2024"][0].party_color, "#112233");
        assert_eq!(summary["2020"][0].party_color, FALLBACK_COLOR);
    }

    #[tokio::test]
    async fn reloading_returns_a_fresh_store() {
        let fetcher = Arc::new(two_year_fetcher());
        let first = load_all(Arc::clone(&fetcher), &year_labels(&["2024"]))
            .await
            .unwrap();
        let second = load_all(fetcher, &year_labels(&["2024"])).await.unwrap();
        assert_eq!(first.store, second.store);
    }

    #[test]
    fn reference_check_accepts_its_own_output() {
        let mut summary: BTreeMap<String, Vec<PartyVoteSummary>> = BTreeMap::new();
        summary.insert(
            "2024".to_string(),
            vec![PartyVoteSummary {
                year: "2024".to_string(),
                cand_no: "1".to_string(),
                ticket_num: 5_000_000,
                ticket_percent: 55.0,
                party_name: "Alpha".to_string(),
                party_color: "#112233".to_string(),
            }],
        );
        let js = summary_to_json(&summary).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.json");
        fs::write(&path, serde_json::to_string_pretty(&js).unwrap()).unwrap();

        let path_str = path.display().to_string();
        check_reference(&js, path_str.as_str()).unwrap();

        // Any difference must be reported as an error.
        summary.get_mut("2024").unwrap()[0].ticket_num = 1;
        let other = summary_to_json(&summary).unwrap();
        assert!(check_reference(&other, path_str.as_str()).is_err());
    }

    #[test]
    fn summary_json_uses_the_wire_field_names() {
        let mut summary: BTreeMap<String, Vec<PartyVoteSummary>> = BTreeMap::new();
        summary.insert(
            "2024".to_string(),
            vec![PartyVoteSummary {
                year: "2024".to_string(),
                cand_no: "1".to_string(),
                ticket_num: 5_000_000,
                ticket_percent: 55.0,
                party_name: "Alpha".to_string(),
                party_color: "#112233".to_string(),
            }],
        );
        let js = summary_to_json(&summary).unwrap();
        let entry = &js["2024"][0];
        assert_eq!(entry["candNo"], "1");
        assert_eq!(entry["ticketNum"], 5_000_000);
        assert_eq!(entry["ticketPercent"], 55.0);
        assert_eq!(entry["partyName"], "Alpha");
        assert_eq!(entry["partyColor"], "#112233");
    }
}
