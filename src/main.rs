mod args;
mod fetch;

use crate::args::Args;
use crate::fetch::fs_files::FsFetcher;
use crate::fetch::{
    check_reference, load_all, summary_to_json, FetchResult, SUPPORTED_YEARS,
};
use clap::Parser;
use election_data::selection::{SelectionField, Session};
use log::warn;
use snafu::{prelude::*, ErrorCompat};
use std::path::Path;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let args = Args::parse();
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::init();
    }

    if let Err(e) = run(&args).await {
        eprintln!("An error occured {}", e);
        if let Some(bt) = ErrorCompat::backtrace(&e) {
            eprintln!("trace: {}", bt);
        }
        std::process::exit(1);
    }
}

async fn run(args: &Args) -> FetchResult<()> {
    let years: Vec<String> = match &args.years {
        Some(ys) => ys.clone(),
        None => SUPPORTED_YEARS.iter().map(|y| y.to_string()).collect(),
    };

    let fetcher = Arc::new(FsFetcher::new(Path::new(args.data_dir.as_str())));
    let report = load_all(fetcher, &years).await?;
    for (year, e) in report.failures.iter() {
        warn!("year {} is not available: {}", year, e);
    }

    let mut session = Session::new(report.store);

    // Region filter listings, driven by the selection flow.
    if let Some(year) = &args.year {
        session.set_selection(SelectionField::Year, year);
        match &args.city {
            Some(city) => {
                session.set_selection(SelectionField::City, city);
                for town in session.towns() {
                    println!("{}", town);
                }
            }
            None => {
                for city in session.cities() {
                    println!("{}", city);
                }
            }
        }
        return Ok(());
    }

    // The national summary for every loaded year.
    let summary = session.party_vote_summary();
    for (year, entries) in summary.iter() {
        println!("{}", year);
        for entry in entries {
            println!(
                "  {:>10} {:>6.2}% {} ({})",
                entry.ticket_num, entry.ticket_percent, entry.party_name, entry.party_color
            );
        }
    }

    let summary_js = summary_to_json(&summary)?;

    if let Some(out) = &args.out {
        let pretty = serde_json::to_string_pretty(&summary_js)
            .context(fetch::SerializingSummarySnafu {})?;
        if out == "stdout" {
            println!("{}", pretty);
        } else {
            std::fs::write(out, pretty)
                .context(fetch::WritingSummarySnafu { path: out.as_str() })?;
        }
    }

    // The reference summary, if provided for comparison
    if let Some(reference) = &args.reference {
        check_reference(&summary_js, reference)?;
    }

    Ok(())
}
