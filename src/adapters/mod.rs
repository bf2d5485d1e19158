//! Input adapters for archive-report.
//!
//! This module converts upstream document shapes into the canonical
//! [`DocumentRecognitionResult`](crate::domain::DocumentRecognitionResult):
//!
//! - [`intake`] - Flat upload-stage records with free-text archive references
//! - [`source`] - Document sources (JSON files of either shape)
//!
//! # Design Pattern
//!
//! Adapters follow the **Adapter Pattern**: the export pipeline reads one
//! record type, and each upstream shape gets an explicit conversion.
//!
//! ```rust,no_run
//! use archive_report::adapters::{DocumentSource, InputKind, IntakeAdapter, JsonFileSource};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let source = JsonFileSource::new("uploads.json", InputKind::Intake)
//!     .with_adapter(IntakeAdapter::new(Some(1)));
//! let documents = source.load().await?;
//! println!("{} documents", documents.len());
//! # Ok(())
//! # }
//! ```

pub mod intake;
pub mod source;

pub use intake::{ExtractedAttributes, IntakeAdapter, IntakeRecord};
pub use source::{load_documents, DocumentSource, InputKind, JsonFileSource};
