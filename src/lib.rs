// Archive Report - Archive code parsing and CSV report export
// Copyright (c) 2025 Archive Report Contributors
// Licensed under the MIT License

//! # Archive Report - archive code parsing and CSV report export
//!
//! Archive Report turns recognized archive scans into spreadsheet-ready CSV
//! reports. Every scan is identified by a four-part archive code
//! (`AA-FFFF-SSSS-CCCCCC`: archive, fund, signature, case) embedded in its
//! file name together with an 8-digit image number.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Parsing** archive codes, legacy references and scan file names
//! - **Selecting** report columns from a closed field registry or a template
//! - **Rendering** RFC 4180 CSV with a UTF-8 byte order mark, so spreadsheet
//!   applications open Cyrillic text correctly
//! - **Saving** reports atomically with checksum verification
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Report logic (fields, templates, export, ordering, stats)
//! - [`adapters`] - Document sources (canonical JSON, intake records)
//! - [`domain`] - Archive codes, documents and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust
//! use archive_report::core::export::ReportExporter;
//! use archive_report::core::templates::ReportConfiguration;
//! use archive_report::domain::{AttributeKind, DocumentBuilder, RecognitionType, RecognizedAttribute};
//!
//! let document = DocumentBuilder::new()
//!     .file_name("01-0203-0745-000002_00000001.jpg")
//!     .recognition_type(RecognitionType::Attribute)
//!     .attribute(RecognizedAttribute::new(AttributeKind::Fio, "Иванов И.И.", 0.9))
//!     .build()
//!     .unwrap();
//!
//! let config = ReportConfiguration::with_fields(
//!     "custom",
//!     vec!["archiveCode".to_string(), "fio".to_string()],
//! );
//! let artifact = ReportExporter::new().export(&[document], &config).unwrap();
//!
//! assert_eq!(artifact.csv(), "Архивный шифр,ФИО\n01-0203-0745-000002,Иванов И.И.\n");
//! assert!(artifact.content.starts_with('\u{FEFF}'));
//! ```
//!
//! ## Error Handling
//!
//! Fallible operations return [`domain::Result`] with [`domain::ReportError`].
//! A missing archive code is not an error: parsers return `Option`.
//!
//! ## Logging
//!
//! Archive Report uses structured logging with the `tracing` crate. Console
//! output goes to stderr; JSON log files are optional (see
//! [`config::LoggingConfig`]).

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
