//! Fields command implementation
//!
//! Lists the report fields, grouped by category.

use crate::cli::EXIT_SUCCESS;
use crate::core::fields::{FieldCategory, FieldRegistry};
use clap::Args;

/// Arguments for the fields command
#[derive(Args, Debug)]
pub struct FieldsArgs {
    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

const CATEGORY_ORDER: [FieldCategory; 4] = [
    FieldCategory::Archive,
    FieldCategory::Text,
    FieldCategory::Attributes,
    FieldCategory::File,
];

impl FieldsArgs {
    /// Execute the fields command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        let registry = FieldRegistry::global();

        if self.json {
            println!("{}", serde_json::to_string_pretty(registry.fields())?);
            return Ok(EXIT_SUCCESS);
        }

        for category in CATEGORY_ORDER {
            println!("{}:", category.label());
            for field in registry.fields().iter().filter(|f| f.category == category) {
                let marker = if field.required { " *" } else { "" };
                println!(
                    "  {:<16} {}{} - {}",
                    field.key, field.label, marker, field.description
                );
            }
            println!();
        }
        println!("* required");

        Ok(EXIT_SUCCESS)
    }
}
