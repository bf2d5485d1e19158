//! Stats command implementation
//!
//! Summarizes a document set before it is exported.

use super::{load_input, FilterArgs};
use crate::cli::{EXIT_CONFIG_ERROR, EXIT_SUCCESS};
use crate::config::load_config_or_default;
use crate::core::stats::DocumentStats;
use clap::Args;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Arguments for the stats command
#[derive(Args, Debug)]
pub struct StatsArgs {
    /// JSON file with the documents
    #[arg(short, long)]
    pub input: PathBuf,

    /// Input shape (canonical or intake)
    #[arg(long, default_value = "canonical")]
    pub input_kind: String,

    #[command(flatten)]
    pub filter: FilterArgs,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

fn print_counts(title: &str, counts: &BTreeMap<String, usize>) {
    if counts.is_empty() {
        return;
    }
    println!("{title}:");
    for (key, count) in counts {
        println!("  {key}: {count}");
    }
}

impl StatsArgs {
    /// Execute the stats command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_config_or_default(config_path) {
            Ok(config) => config,
            Err(e) => {
                println!("❌ {e}");
                return Ok(EXIT_CONFIG_ERROR);
            }
        };

        let Some(filter) = self.filter.to_filter() else {
            return Ok(EXIT_CONFIG_ERROR);
        };

        let Some(documents) = load_input(
            &self.input,
            &self.input_kind,
            config.report.default_archive_id,
        )
        .await
        else {
            return Ok(EXIT_CONFIG_ERROR);
        };

        let documents = filter.apply(documents);
        let stats = DocumentStats::collect(&documents);
        stats.log_summary();

        if self.json {
            println!("{}", serde_json::to_string_pretty(&stats)?);
            return Ok(EXIT_SUCCESS);
        }

        println!("Documents: {}", stats.total);
        println!("Cases: {}", stats.cases);
        println!("Without archive code: {}", stats.without_archive_code);
        println!("Average confidence: {:.2}", stats.average_confidence);
        if let (Some(earliest), Some(latest)) =
            (stats.earliest_processing_date, stats.latest_processing_date)
        {
            println!("Processed: {earliest} .. {latest}");
        }
        print_counts("By recognition type", &stats.by_recognition_type);
        print_counts("By archive", &stats.by_archive);
        print_counts("By fund", &stats.by_fund);
        print_counts("Attribute coverage", &stats.attribute_coverage);

        Ok(EXIT_SUCCESS)
    }
}
