#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the APD arrests scraper.

use std::path::PathBuf;

use apd_arrests_cli::csv_writer::ArrestCsvWriter;
use apd_arrests_cli::{parse_date_arg, pipeline};
use apd_arrests_cli_utils::{IndicatifProgress, init_logger};
use apd_arrests_fetch::{DateRange, HttpFetcher, SearchEndpoint};
use apd_arrests_report::ReportLayout;
use chrono::NaiveDate;
use clap::Parser;

#[derive(Parser)]
#[command(
    name = "apd_arrests",
    about = "Scrape the APD's messy incident reports database into a machine-readable format"
)]
struct Cli {
    /// Date to start scraping from (nearest to present) in MM/DD/YYYY format
    #[arg(value_parser = parse_date_arg)]
    start_date: NaiveDate,
    /// Date to scrape back to (furthest from present) in MM/DD/YYYY format
    #[arg(value_parser = parse_date_arg)]
    end_date: NaiveDate,
    /// Filename to write CSV data to
    filename: PathBuf,
    /// Increase output verbosity
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let multi = init_logger(cli.verbose);

    println!("APD Incident Reports Scraper");
    println!();

    let range = DateRange::new(cli.start_date, cli.end_date)?;
    let layout = ReportLayout::apd()?;
    let fetcher = HttpFetcher::new(SearchEndpoint::austin()?)?;

    println!(
        "Scraping {} day(s) from {} back to {} and saving as {}",
        range.day_count(),
        range.start().format("%m/%d/%Y"),
        range.end().format("%m/%d/%Y"),
        cli.filename.display(),
    );

    let mut writer = ArrestCsvWriter::create(&cli.filename)?;
    let progress = IndicatifProgress::days_bar(&multi, "Days", range.day_count());

    let summary = pipeline::scrape(&fetcher, range, &layout, &mut writer, &progress).await?;

    println!("Done: {summary}");

    Ok(())
}
