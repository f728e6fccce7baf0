use clap::Parser;

/// This program loads historical election datasets and prints the derived
/// national summaries and region filter lists.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (directory path) Root directory holding the published data files, laid out as
    /// data/vote/<year>/*.json with the global palette at data/vote/party-color.json.
    #[clap(short, long, value_parser, default_value = ".")]
    pub data_dir: String,

    /// (comma-separated year labels) The election years to load. Defaults to the eight
    /// presidential elections from 1996 to 2024.
    #[clap(long, value_parser, value_delimiter = ',')]
    pub years: Option<Vec<String>>,

    /// (year label) If specified, prints the city filter list of that year instead of
    /// the national summary. The nationwide entry always comes first.
    #[clap(short, long, value_parser)]
    pub year: Option<String>,

    /// (city name) If specified together with --year, prints the town filter list under
    /// that city. An unknown city prints nothing.
    #[clap(short, long, value_parser)]
    pub city: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the national party vote summary will
    /// be written in JSON format to the given location.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) A reference file containing a previously computed summary in JSON
    /// format. If provided, votemap will check that the computed summary matches the
    /// reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
