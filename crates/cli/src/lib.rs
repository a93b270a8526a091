//! Dataset build pipeline and command-line interface.
//!
//! load -> normalize -> derive -> serialize -> write, strictly in sequence.

use std::path::PathBuf;

use chrono::{NaiveDate, Utc};
use clap::Parser;
use tracing::info;
use winedata_core::{config::CUTOFF_DAYS, Config, Result};
use winedata_export::{write_dataset, ExportSummary};
use winedata_ingestion::{load_csv, normalize_types};
use winedata_pricing::{derive_prices, derive_relative_values, PriceResolver};

/// Default log filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "winedata=info";

/// Build the compressed wine price dataset from a raw CSV export.
#[derive(Parser, Debug)]
#[command(name = "build-dataset")]
#[command(about = "Build the compressed wine price dataset from a raw CSV export")]
#[command(version)]
pub struct Args {
    /// Raw CSV export to read
    #[arg(long, default_value = winedata_core::config::DEFAULT_INPUT_PATH)]
    pub input: PathBuf,

    /// Gzip-compressed JSON dataset to write
    #[arg(long, default_value = winedata_core::config::DEFAULT_OUTPUT_PATH)]
    pub output: PathBuf,

    /// Maximum age in days of a last trade used directly as the price
    #[arg(long, default_value_t = CUTOFF_DAYS)]
    pub cutoff_days: i64,

    /// Reference date (YYYY-MM-DD) for trade recency, defaults to today in UTC
    #[arg(long)]
    pub today: Option<NaiveDate>,

    /// Add Predicted_Price and Relative_Value from a price-versus-score fit
    #[arg(long)]
    pub relative_value: bool,
}

impl Args {
    /// Overlay the command-line options onto the default configuration.
    pub fn to_config(&self) -> Config {
        let mut config = Config::default();
        config.io.input_path = self.input.clone();
        config.io.output_path = self.output.clone();
        config.pricing.cutoff_days = self.cutoff_days;
        config.pricing.relative_value = self.relative_value;
        config
    }

    /// Reference date for this run.
    pub fn reference_date(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Utc::now().date_naive())
    }
}

/// Run the full pipeline once.
pub fn run(config: &Config, today: NaiveDate) -> Result<ExportSummary> {
    config.validate()?;
    info!(
        input = %config.io.input_path.display(),
        output = %config.io.output_path.display(),
        %today,
        "building dataset"
    );

    let mut table = load_csv(&config.io.input_path)?;
    normalize_types(&mut table);

    let resolver = PriceResolver::from_config(&config.pricing);
    derive_prices(&mut table, &resolver, today);
    if config.pricing.relative_value {
        derive_relative_values(&mut table);
    }

    write_dataset(&table, &config.io.output_path)
}

/// Completion line printed on stdout.
pub fn completion_message(summary: &ExportSummary) -> String {
    format!("Wrote {} ({} rows)", summary.path.display(), summary.rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::fs;
    use winedata_core::Error;
    use winedata_export::read_dataset;

    const RAW: &str = "\
Name,Vintage,Score,DA Start,DA Finish,Last_Trade_Date,Last_Trade_Price,Bid_Per_Case,Offer_Per_Case,Price
Margaux,2010,98,2020,2040,2024-05-22,100,90,110,450
Lafite,2009,99,2019,2039,2023-11-14,,90,110,
Latour,2015,n/a,,,,,,50,
Empty,,,,,,,,,
Palmer,2016,96,2026,2046,2024-03-03,300,250,,
";

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn config_in(dir: &std::path::Path) -> Config {
        let mut config = Config::default();
        config.io.input_path = dir.join("raw.csv");
        config.io.output_path = dir.join("dataset.latest.json.gz");
        config
    }

    #[test]
    fn test_pipeline_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        fs::write(&config.io.input_path, RAW).unwrap();

        let summary = run(&config, today()).unwrap();
        assert_eq!(summary.rows, 5);

        let records = read_dataset(&config.io.output_path).unwrap();
        assert_eq!(records.len(), summary.rows);

        let names: Vec<&str> = records.iter().map(|r| r["Name"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["Margaux", "Lafite", "Latour", "Empty", "Palmer"]);

        // Recent trade.
        assert_relative_eq!(records[0]["Price_to_use"].as_f64().unwrap(), 100.0);
        // Stale date, no trade price: midpoint.
        assert_relative_eq!(records[1]["Price_to_use"].as_f64().unwrap(), 100.0);
        // Offer only.
        assert_relative_eq!(records[2]["Price_to_use"].as_f64().unwrap(), 50.0);
        // Nothing usable, key still present.
        assert!(records[3]["Price_to_use"].is_null());
        assert!(records[3].as_object().unwrap().contains_key("Price_to_use"));
        // 90 days old exactly.
        assert_relative_eq!(records[4]["Price_to_use"].as_f64().unwrap(), 300.0);

        // Normalized numeric columns, untouched text columns.
        assert_relative_eq!(records[0]["Vintage"].as_f64().unwrap(), 2010.0);
        assert!(records[2]["Score"].is_null());
        assert_eq!(records[0]["Last_Trade_Date"], "2024-05-22");
    }

    #[test]
    fn test_keys_follow_input_columns() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        fs::write(&config.io.input_path, RAW).unwrap();
        run(&config, today()).unwrap();

        let records = read_dataset(&config.io.output_path).unwrap();
        let keys: Vec<&String> = records[0].as_object().unwrap().keys().collect();
        assert_eq!(keys.len(), 11);
        assert!(keys.iter().any(|k| k.as_str() == "DA Start"));
        assert!(keys.iter().any(|k| k.as_str() == "Price_to_use"));
    }

    #[test]
    fn test_relative_value_columns() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path());
        config.pricing.relative_value = true;
        fs::write(&config.io.input_path, RAW).unwrap();
        run(&config, today()).unwrap();

        let records = read_dataset(&config.io.output_path).unwrap();
        let keys: Vec<&String> = records[0].as_object().unwrap().keys().collect();
        assert_eq!(keys.len(), 13);
        assert!(keys.iter().any(|k| k.as_str() == "Predicted_Price"));
        assert!(keys.iter().any(|k| k.as_str() == "Relative_Value"));

        // Scored and priced: Margaux (98, 100), Lafite (99, 100), Palmer (96, 300).
        assert!(records[0]["Predicted_Price"].is_number());
        assert!(records[4]["Relative_Value"].as_f64().unwrap() < 0.0);
        // No score.
        assert!(records[2]["Predicted_Price"].is_null());
        assert!(records[3]["Relative_Value"].is_null());
    }

    #[test]
    fn test_missing_input_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());

        let result = run(&config, today());
        assert!(matches!(result, Err(Error::Io(_))));
        assert!(!config.io.output_path.exists());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = Config::default();
        config.pricing.cutoff_days = -5;
        assert!(matches!(run(&config, today()), Err(Error::Config(_))));
    }

    #[test]
    fn test_args_defaults() {
        let args = Args::parse_from(["build-dataset"]);
        let config = args.to_config();
        assert_eq!(config.io.input_path, PathBuf::from("raw.csv"));
        assert_eq!(config.io.output_path, PathBuf::from("dataset.latest.json.gz"));
        assert_eq!(config.pricing.cutoff_days, 90);
        assert!(!config.pricing.relative_value);
        assert!(args.today.is_none());
    }

    #[test]
    fn test_args_overrides() {
        let args = Args::parse_from([
            "build-dataset",
            "--input",
            "export.csv",
            "--cutoff-days",
            "30",
            "--today",
            "2024-06-01",
            "--relative-value",
        ]);
        assert!(args.to_config().pricing.relative_value);
        assert_eq!(args.to_config().pricing.cutoff_days, 30);
        assert_eq!(args.to_config().io.input_path, PathBuf::from("export.csv"));
        assert_eq!(args.reference_date(), today());
    }

    #[test]
    fn test_completion_message() {
        let summary = ExportSummary {
            path: PathBuf::from("dataset.latest.json.gz"),
            rows: 1234,
            compressed_bytes: 99,
        };
        assert_eq!(
            completion_message(&summary),
            "Wrote dataset.latest.json.gz (1234 rows)"
        );
    }
}
