//! Templates command implementation
//!
//! Lists the built-in report templates with their columns.

use crate::cli::EXIT_SUCCESS;
use crate::core::fields::FieldRegistry;
use crate::core::templates::ReportTemplate;
use clap::Args;

/// Arguments for the templates command
#[derive(Args, Debug)]
pub struct TemplatesArgs {
    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

impl TemplatesArgs {
    /// Execute the templates command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        let templates = ReportTemplate::builtin();

        if self.json {
            println!("{}", serde_json::to_string_pretty(templates)?);
            return Ok(EXIT_SUCCESS);
        }

        let registry = FieldRegistry::global();
        for template in templates {
            let default = if template.id == ReportTemplate::DEFAULT_ID {
                " (default)"
            } else {
                ""
            };
            println!("{}{} - {}", template.id, default, template.name);
            println!("  {}", template.description);
            println!("  Documents: {}", template.recognition_type);
            let labels: Vec<&str> = template.fields.iter().map(|key| registry.label(*key)).collect();
            println!("  Columns: {}", labels.join(", "));
            println!();
        }

        Ok(EXIT_SUCCESS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_execute() {
        assert_eq!(TemplatesArgs { json: false }.execute().await.unwrap(), EXIT_SUCCESS);
        assert_eq!(TemplatesArgs { json: true }.execute().await.unwrap(), EXIT_SUCCESS);
    }
}
