//! Core report logic for archive-report.
//!
//! This module turns recognized documents into CSV reports.
//!
//! # Modules
//!
//! - [`fields`] - Field registry and value extraction
//! - [`templates`] - Report presets and export configuration
//! - [`filter`] - Document selection by fund, archive, date and file name
//! - [`export`] - CSV rendering, file naming and report sinks
//! - [`ordering`] - Grouping and sorting by archive code and page
//! - [`stats`] - Aggregate statistics over a document set
//!
//! # Export Workflow
//!
//! 1. **Select**: Pick a template or an explicit list of field keys
//! 2. **Filter** (optional): Keep documents matching a [`DocumentFilter`](filter::DocumentFilter)
//! 3. **Order** (optional): Sort documents by archive code and page
//! 4. **Render**: Build the BOM-prefixed CSV artifact and its metadata
//! 5. **Save**: Hand the artifact to a [`ReportSink`](export::ReportSink)
//!
//! # Example
//!
//! ```rust,no_run
//! use archive_report::core::export::{FileSink, ReportExporter, ReportSink};
//! use archive_report::core::templates::{ReportConfiguration, ReportTemplate};
//! use archive_report::adapters::load_documents;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let documents = load_documents("documents.json").await?;
//! let template = ReportTemplate::find("archiveBasic").unwrap();
//! let config = ReportConfiguration::from_template(template);
//!
//! let artifact = ReportExporter::new().export(&documents, &config)?;
//! let saved = FileSink::new("reports").save(&artifact).await?;
//!
//! println!("Saved {} rows to {}", artifact.result.records_count, saved.path.display());
//! # Ok(())
//! # }
//! ```

pub mod export;
pub mod fields;
pub mod filter;
pub mod ordering;
pub mod stats;
pub mod templates;
