/*!

# Quick start

This example assembles a minimal store by hand and derives the two views the
presentation layer consumes: the ranked national party summary and the
region filter lists. In the full application the store is assembled by the
`votemap` loader from the published JSON files; the engine below does not
care where the records came from.

```rust
use election_data::builder::StoreBuilder;
use election_data::selection::{SelectionField, Session};
use election_data::{
    CandidateRecord, CandidateVoteRecord, PartyColorRecord, PartyRecord, RegionRecord, YearData,
};

let data = YearData {
    regions: vec![
        RegionRecord {
            prv_code: "00".to_string(),
            city_code: "000".to_string(),
            area_code: "00".to_string(),
            dept_code: "000".to_string(),
            li_code: "0000".to_string(),
            area_name: "全國".to_string(),
        },
        RegionRecord {
            prv_code: "63".to_string(),
            city_code: "000".to_string(),
            area_code: "00".to_string(),
            dept_code: "000".to_string(),
            li_code: "0000".to_string(),
            area_name: "臺北市".to_string(),
        },
    ],
    parties: vec![PartyRecord {
        party_code: "P1".to_string(),
        party_name: "Alpha".to_string(),
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
};

let store = StoreBuilder::new()
    .party_colors(vec![PartyColorRecord {
        party_name: "Alpha".to_string(),
        color: "#112233".to_string(),
    }])
    .year_data("2024", data)
    .unwrap()
    .build();

let mut session = Session::new(store);

// The national summary, ranked by vote share.
let summary = session.party_vote_summary();
assert_eq!(summary["2024"][0].party_color, "#112233");

// The selection flow: year first, then drill into a city.
session.set_selection(SelectionField::Year, "2024");
assert_eq!(session.cities()[0], "全國");
```

The summary serializes to the camelCase wire format with `serde_json`, so a
view layer (or the `votemap --out` flag) can persist it directly.

*/
