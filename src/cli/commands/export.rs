//! Export command implementation
//!
//! This module implements the `export` command, which renders a document set
//! into a CSV report and saves it to the output directory.

use super::{load_input, split_list, FilterArgs};
use crate::cli::{EXIT_CONFIG_ERROR, EXIT_FATAL, EXIT_PRECONDITION_FAILED, EXIT_SUCCESS};
use crate::config::load_config_or_default;
use crate::core::export::{ReportArtifact, ReportExporter, ReportSink};
use crate::core::ordering::sort_documents_by_archive_and_page;
use crate::core::templates::ReportTemplate;
use crate::domain::DocumentRecognitionResult;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// JSON file with the documents to export
    #[arg(short, long)]
    pub input: PathBuf,

    /// Input shape (canonical or intake)
    #[arg(long, default_value = "canonical")]
    pub input_kind: String,

    /// Override the report template
    #[arg(short, long)]
    pub template: Option<String>,

    /// Override the selected fields (comma-separated keys)
    #[arg(short, long)]
    pub fields: Option<String>,

    /// Override the output directory
    #[arg(short, long)]
    pub output_dir: Option<String>,

    /// Override the report file name prefix
    #[arg(long)]
    pub base_name: Option<String>,

    /// Override the processing date locale (ru-RU, en-US, iso)
    #[arg(long)]
    pub date_locale: Option<String>,

    /// Sort documents by archive code and page before export
    #[arg(long)]
    pub group_by_archive: bool,

    #[command(flatten)]
    pub filter: FilterArgs,

    /// Replace an existing report with the same name
    #[arg(long)]
    pub overwrite: bool,

    /// Dry run mode - render the report without saving it
    #[arg(long)]
    pub dry_run: bool,
}

impl ExportArgs {
    /// Execute the export command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(input = %self.input.display(), "Starting export command");

        let mut config = match load_config_or_default(config_path) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                println!("❌ {e}");
                return Ok(EXIT_CONFIG_ERROR);
            }
        };

        // Apply CLI overrides
        if let Some(template) = &self.template {
            tracing::info!(template = %template, "Overriding template from CLI");
            config.report.template = template.clone();
            if self.fields.is_none() {
                config.report.selected_fields.clear();
            }
        }
        if let Some(fields) = &self.fields {
            let fields = split_list(fields);
            tracing::info!(fields = ?fields, "Overriding selected fields from CLI");
            config.report.selected_fields = fields;
        }
        if let Some(output_dir) = &self.output_dir {
            config.output.directory = output_dir.clone();
        }
        if let Some(base_name) = &self.base_name {
            config.report.base_name = base_name.clone();
        }
        if let Some(date_locale) = &self.date_locale {
            match date_locale.parse() {
                Ok(locale) => config.report.date_locale = locale,
                Err(e) => {
                    println!("❌ {e}");
                    return Ok(EXIT_CONFIG_ERROR);
                }
            }
        }
        if self.group_by_archive {
            config.report.group_by_archive = true;
        }
        if self.overwrite {
            config.output.overwrite = true;
        }

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            println!("❌ Configuration validation failed: {e}");
            return Ok(EXIT_CONFIG_ERROR);
        }

        let report_config = match config.report_configuration() {
            Ok(report_config) => report_config,
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

        let mut documents = filter.apply(documents);
        warn_unsuited_documents(&documents, &report_config.template);

        if report_config.group_by_archive {
            tracing::debug!("Sorting documents by archive code and page");
            sort_documents_by_archive_and_page(&mut documents);
        }

        let exporter = ReportExporter::new().with_options(config.export_options());
        let artifact = match exporter.export(&documents, &report_config) {
            Ok(artifact) => artifact,
            Err(e) if e.is_precondition() => {
                tracing::warn!(error = %e, "Export precondition failed");
                println!("❌ {e}");
                return Ok(EXIT_PRECONDITION_FAILED);
            }
            Err(e) => {
                crate::log_error_with_context!(&e, "Report export failed");
                println!("❌ Report export failed: {e}");
                return Ok(EXIT_FATAL);
            }
        };

        artifact.result.log_summary();

        if self.dry_run {
            tracing::info!("Dry run mode enabled - report not saved");
            println!("🔍 DRY RUN MODE - report not saved");
            println!();
            println!("  File name: {}", artifact.file_name);
            println!("  Records: {}", artifact.result.records_count);
            println!("  Fields: {}", artifact.result.fields_count);
            println!("  Size: {} bytes", artifact.result.file_size);
            println!();
            println!("  Preview:");
            for line in preview_lines(&artifact) {
                println!("    {line}");
            }
            return Ok(EXIT_SUCCESS);
        }

        let sink = config.file_sink();
        match sink.save(&artifact).await {
            Ok(saved) => {
                println!("✅ Report saved: {}", saved.path.display());
                println!();
                println!("Export Summary:");
                println!("  Template: {}", report_config.template);
                println!("  Records: {}", artifact.result.records_count);
                println!("  Fields: {}", artifact.result.fields_count);
                println!("  Size: {} bytes", saved.bytes_written);
                println!("  SHA-256: {}", saved.checksum);
                Ok(EXIT_SUCCESS)
            }
            Err(e) => {
                crate::log_error_with_context!(&e, "Failed to save report");
                println!("❌ Failed to save report");
                println!("   Error: {e}");
                Ok(EXIT_FATAL)
            }
        }
    }
}

/// Warns when a built-in template targets another recognition mode
fn warn_unsuited_documents(documents: &[DocumentRecognitionResult], template_id: &str) {
    let Some(template) = ReportTemplate::find(template_id) else {
        return;
    };
    let unsuited = count_unsuited(documents, template);
    if unsuited > 0 {
        tracing::warn!(
            template = template.id,
            recognition_type = %template.recognition_type,
            unsuited,
            "Documents do not match the template's recognition type"
        );
        println!(
            "⚠️  {unsuited} document(s) are not '{}' recognition results expected by template '{}'",
            template.recognition_type, template.id
        );
    }
}

fn count_unsuited(documents: &[DocumentRecognitionResult], template: &ReportTemplate) -> usize {
    documents
        .iter()
        .filter(|document| !template.accepts(document))
        .count()
}

/// Header line and first data line of a rendered report
fn preview_lines(artifact: &ReportArtifact) -> Vec<&str> {
    artifact.csv().lines().take(2).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::loader::env_lock;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    fn args(input: PathBuf, output_dir: &TempDir) -> ExportArgs {
        ExportArgs {
            input,
            input_kind: "intake".to_string(),
            template: None,
            fields: Some("archiveCode,fio".to_string()),
            output_dir: Some(output_dir.path().to_string_lossy().to_string()),
            base_name: None,
            date_locale: None,
            group_by_archive: false,
            filter: FilterArgs::default(),
            overwrite: false,
            dry_run: false,
        }
    }

    fn input_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_export_writes_report() {
        let input = input_file(
            r#"[{ "fileName": "01-0203-0745-000002_00000001.jpg",
                  "extractedAttributes": { "fio": "Иванов И.И." } }]"#,
        );
        let output = TempDir::new().unwrap();
        let _lock = env_lock();

        let code = args(input.path().to_path_buf(), &output)
            .execute("/nonexistent/archive-report.toml")
            .await
            .unwrap();
        assert_eq!(code, EXIT_SUCCESS);

        let reports: Vec<_> = std::fs::read_dir(output.path())
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .collect();
        assert_eq!(reports.len(), 1);
        let content = std::fs::read_to_string(&reports[0]).unwrap();
        assert_eq!(
            content,
            "\u{FEFF}Архивный шифр,ФИО\n01-0203-0745-000002,Иванов И.И.\n"
        );
    }

    #[tokio::test]
    async fn test_export_empty_input_is_precondition_failure() {
        let input = input_file("[]");
        let output = TempDir::new().unwrap();
        let _lock = env_lock();

        let code = args(input.path().to_path_buf(), &output)
            .execute("/nonexistent/archive-report.toml")
            .await
            .unwrap();
        assert_eq!(code, EXIT_PRECONDITION_FAILED);
        assert_eq!(std::fs::read_dir(output.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_export_unknown_field_is_config_error() {
        let input = input_file("[]");
        let output = TempDir::new().unwrap();
        let _lock = env_lock();
        let mut args = args(input.path().to_path_buf(), &output);
        args.fields = Some("opis".to_string());

        let code = args.execute("/nonexistent/archive-report.toml").await.unwrap();
        assert_eq!(code, EXIT_CONFIG_ERROR);
    }

    const UNORDERED: &str = r#"[
        { "fileName": "02-0105-1234-000001_00000001.jpg", "processedAt": "2024-03-15T10:00:00+03:00" },
        { "fileName": "01-0203-0745-000002_00000002.jpg", "processedAt": "2024-02-10T10:00:00+03:00" },
        { "fileName": "01-0203-0745-000002_00000001.jpg" }
    ]"#;

    fn read_single_report(output: &TempDir) -> String {
        let reports: Vec<_> = std::fs::read_dir(output.path())
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .collect();
        assert_eq!(reports.len(), 1);
        std::fs::read_to_string(&reports[0]).unwrap()
    }

    #[tokio::test]
    async fn test_export_keeps_input_order_by_default() {
        let input = input_file(UNORDERED);
        let output = TempDir::new().unwrap();
        let _lock = env_lock();
        let mut args = args(input.path().to_path_buf(), &output);
        args.fields = Some("archiveCode,pageNumber".to_string());

        let code = args.execute("/nonexistent/archive-report.toml").await.unwrap();
        assert_eq!(code, EXIT_SUCCESS);
        assert_eq!(
            read_single_report(&output),
            "\u{FEFF}Архивный шифр,Номер страницы\n\
             02-0105-1234-000001,1\n\
             01-0203-0745-000002,2\n\
             01-0203-0745-000002,1\n"
        );
    }

    #[tokio::test]
    async fn test_export_group_by_archive_sorts() {
        let input = input_file(UNORDERED);
        let output = TempDir::new().unwrap();
        let _lock = env_lock();
        let mut args = args(input.path().to_path_buf(), &output);
        args.fields = Some("archiveCode,pageNumber".to_string());
        args.group_by_archive = true;

        let code = args.execute("/nonexistent/archive-report.toml").await.unwrap();
        assert_eq!(code, EXIT_SUCCESS);
        assert_eq!(
            read_single_report(&output),
            "\u{FEFF}Архивный шифр,Номер страницы\n\
             01-0203-0745-000002,1\n\
             01-0203-0745-000002,2\n\
             02-0105-1234-000001,1\n"
        );
    }

    #[tokio::test]
    async fn test_export_applies_filter() {
        let input = input_file(UNORDERED);
        let output = TempDir::new().unwrap();
        let _lock = env_lock();
        let mut args = args(input.path().to_path_buf(), &output);
        args.fields = Some("archiveCode,pageNumber".to_string());
        args.filter = FilterArgs {
            fund: vec![203],
            from: Some("2024-02-01".to_string()),
            ..Default::default()
        };

        let code = args.execute("/nonexistent/archive-report.toml").await.unwrap();
        assert_eq!(code, EXIT_SUCCESS);
        assert_eq!(
            read_single_report(&output),
            "\u{FEFF}Архивный шифр,Номер страницы\n\
             01-0203-0745-000002,2\n\
             01-0203-0745-000002,1\n"
        );
    }

    #[tokio::test]
    async fn test_export_filter_removing_everything_is_precondition_failure() {
        let input = input_file(UNORDERED);
        let output = TempDir::new().unwrap();
        let _lock = env_lock();
        let mut args = args(input.path().to_path_buf(), &output);
        args.filter.archive_id = vec![7];

        let code = args.execute("/nonexistent/archive-report.toml").await.unwrap();
        assert_eq!(code, EXIT_PRECONDITION_FAILED);
    }

    #[tokio::test]
    async fn test_export_invalid_filter_date_is_config_error() {
        let input = input_file(UNORDERED);
        let output = TempDir::new().unwrap();
        let _lock = env_lock();
        let mut args = args(input.path().to_path_buf(), &output);
        args.filter.to = Some("31.12.2024".to_string());

        let code = args.execute("/nonexistent/archive-report.toml").await.unwrap();
        assert_eq!(code, EXIT_CONFIG_ERROR);
    }

    #[test]
    fn test_preview_lines() {
        use crate::core::export::FixedClock;
        use crate::core::templates::ReportConfiguration;
        use crate::domain::{DocumentBuilder, RecognitionType};
        use chrono::{TimeZone, Utc};

        let documents: Vec<_> = ["01-0203-0745-000002_00000001.jpg", "cover.jpg"]
            .iter()
            .map(|name| {
                DocumentBuilder::new()
                    .file_name(name)
                    .recognition_type(RecognitionType::Full)
                    .build()
                    .unwrap()
            })
            .collect();
        let config = ReportConfiguration::with_fields(
            "custom",
            vec!["archiveCode".to_string(), "pageNumber".to_string()],
        );
        let artifact = ReportExporter::new()
            .with_clock(FixedClock(Utc.with_ymd_and_hms(2024, 3, 15, 8, 0, 0).unwrap()))
            .export(&documents, &config)
            .unwrap();

        assert_eq!(
            preview_lines(&artifact),
            vec!["Архивный шифр,Номер страницы", "01-0203-0745-000002,1"]
        );
    }

    #[test]
    fn test_count_unsuited() {
        use crate::domain::{AttributeKind, DocumentBuilder, RecognitionType, RecognizedAttribute};

        let documents = vec![
            DocumentBuilder::new()
                .file_name("01-0203-0745-000002_00000001.jpg")
                .recognition_type(RecognitionType::Full)
                .full_text("Текст")
                .build()
                .unwrap(),
            DocumentBuilder::new()
                .file_name("01-0203-0745-000002_00000002.jpg")
                .recognition_type(RecognitionType::Attribute)
                .attribute(RecognizedAttribute::new(AttributeKind::Fio, "Иванов", 0.9))
                .build()
                .unwrap(),
        ];

        let full_text = ReportTemplate::find("fullText").unwrap();
        let archive_full = ReportTemplate::find("archiveFull").unwrap();
        assert_eq!(count_unsuited(&documents, full_text), 1);
        assert_eq!(count_unsuited(&documents, archive_full), 0);
    }

    #[tokio::test]
    async fn test_export_dry_run_writes_nothing() {
        let input = input_file(r#"[{ "fileName": "cover.jpg" }]"#);
        let output = TempDir::new().unwrap();
        let _lock = env_lock();
        let mut args = args(input.path().to_path_buf(), &output);
        args.dry_run = true;

        let code = args.execute("/nonexistent/archive-report.toml").await.unwrap();
        assert_eq!(code, EXIT_SUCCESS);
        assert_eq!(std::fs::read_dir(output.path()).unwrap().count(), 0);
    }
}
