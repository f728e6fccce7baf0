// Filesystem retrieval of the published JSON datasets.

use crate::fetch::*;
use election_data::*;

use async_trait::async_trait;
use log::info;
use serde::de::DeserializeOwned;
use serde_json::Value as JSValue;
use snafu::prelude::*;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Fetches datasets from a local directory laid out like the published site:
/// `data/vote/<year>/elbase.json` (regions), `elprof.json` (profile),
/// `elpaty.json` (parties), `elcand.json` (candidates), `elctks.json`
/// (tallies), and the global `data/vote/party-color.json`.
pub struct FsFetcher {
    root: PathBuf,
}

impl FsFetcher {
    pub fn new(root: &Path) -> FsFetcher {
        FsFetcher {
            root: root.to_path_buf(),
        }
    }

    fn vote_dir(&self) -> PathBuf {
        self.root.join("data").join("vote")
    }

    fn year_file(&self, year: &str, name: &str) -> PathBuf {
        self.vote_dir().join(year).join(name)
    }

    async fn read_json<T: DeserializeOwned>(&self, path: PathBuf) -> FetchResult<Vec<T>> {
        let p = path.as_path().display().to_string();
        info!("Attempting to read data file {:?}", p);
        let contents = fs::read_to_string(&path)
            .await
            .context(OpeningJsonSnafu { path: p.clone() })?;
        let rows: Vec<T> =
            serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path: p })?;
        Ok(rows)
    }
}

#[async_trait]
impl DataFetcher for FsFetcher {
    async fn regions(&self, year: &str) -> FetchResult<Vec<RegionRecord>> {
        self.read_json(self.year_file(year, "elbase.json")).await
    }

    async fn region_profiles(&self, year: &str) -> FetchResult<Vec<JSValue>> {
        self.read_json(self.year_file(year, "elprof.json")).await
    }

    async fn parties(&self, year: &str) -> FetchResult<Vec<PartyRecord>> {
        self.read_json(self.year_file(year, "elpaty.json")).await
    }

    async fn candidates(&self, year: &str) -> FetchResult<Vec<CandidateRecord>> {
        self.read_json(self.year_file(year, "elcand.json")).await
    }

    async fn candidate_votes(&self, year: &str) -> FetchResult<Vec<CandidateVoteRecord>> {
        self.read_json(self.year_file(year, "elctks.json")).await
    }

    async fn party_colors(&self) -> FetchResult<Vec<PartyColorRecord>> {
        self.read_json(self.vote_dir().join("party-color.json"))
            .await
    }
}
