//! Integration tests for the CSV report export pipeline

use archive_report::core::export::{
    create_report_headers, create_report_row, escape_csv_value, export_report_to_csv,
    FixedClock, ReportExporter, CSV_MIME_TYPE,
};
use archive_report::core::fields::FieldRegistry;
use archive_report::core::ordering::sort_documents_by_archive_and_page;
use archive_report::core::templates::{ReportConfiguration, ReportTemplate};
use archive_report::domain::{
    extract_archive_code_from_path, extract_image_number, AttributeKind, DocumentBuilder,
    DocumentPageInfo, DocumentRecognitionResult, RecognitionType, RecognizedAttribute,
    ReportError,
};
use chrono::{TimeZone, Utc};

fn ivanov() -> DocumentRecognitionResult {
    DocumentBuilder::new()
        .file_name("01-0203-0745-000002_00000001.jpg")
        .recognition_type(RecognitionType::Attribute)
        .attribute(RecognizedAttribute::new(AttributeKind::Fio, "Иванов И.И.", 0.95))
        .confidence(0.95)
        .build()
        .unwrap()
}

fn fields(keys: &[&str]) -> ReportConfiguration {
    ReportConfiguration::with_fields("custom", keys.iter().map(|k| k.to_string()).collect())
}

#[test]
fn test_minimal_export() {
    let artifact = export_report_to_csv(&[ivanov()], &fields(&["archiveCode", "fio"])).unwrap();

    assert_eq!(
        artifact.csv(),
        "Архивный шифр,ФИО\n01-0203-0745-000002,Иванов И.И.\n"
    );
    assert_eq!(artifact.mime_type, CSV_MIME_TYPE);
    assert_eq!(artifact.result.records_count, 1);
    assert_eq!(artifact.result.fields_count, 2);
    assert_eq!(artifact.result.format, "csv");
}

#[test]
fn test_content_starts_with_utf8_bom() {
    let artifact = export_report_to_csv(&[ivanov()], &fields(&["fio"])).unwrap();

    assert_eq!(&artifact.bytes()[..3], &[0xEF, 0xBB, 0xBF]);
    assert_eq!(artifact.result.file_size, artifact.bytes().len());
}

#[test]
fn test_missing_attribute_renders_empty_row() {
    let artifact = export_report_to_csv(&[ivanov()], &fields(&["date"])).unwrap();
    assert_eq!(artifact.csv(), "Дата\n\n");
}

#[test]
fn test_empty_input_fails_before_rendering() {
    let result = export_report_to_csv(&[], &fields(&["archiveCode"]));
    assert!(matches!(result, Err(ReportError::EmptyInput)));
}

#[test]
fn test_no_fields_selected() {
    let result = export_report_to_csv(&[ivanov()], &fields(&[]));
    assert!(matches!(result, Err(ReportError::NoFieldsSelected)));
}

#[test]
fn test_empty_input_checked_before_fields() {
    let result = export_report_to_csv(&[], &fields(&[]));
    assert!(matches!(result, Err(ReportError::EmptyInput)));
}

#[test]
fn test_line_count_is_documents_plus_header() {
    let documents: Vec<_> = (1..=25)
        .map(|page| {
            DocumentBuilder::new()
                .file_name(&format!("01-0203-0745-000002_{page:08}.jpg"))
                .recognition_type(RecognitionType::Full)
                .full_text("Текст, с запятой\nи переносом")
                .build()
                .unwrap()
        })
        .collect();

    let template = ReportTemplate::find("archiveFull").unwrap();
    let artifact =
        export_report_to_csv(&documents, &ReportConfiguration::from_template(template)).unwrap();

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(artifact.csv().as_bytes());
    let headers = reader.headers().unwrap().clone();
    assert_eq!(headers.len(), template.fields.len());

    let records: Vec<_> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(records.len(), documents.len());
    assert!(records.iter().all(|r| r.len() == template.fields.len()));
}

#[test]
fn test_headers_follow_selection_order() {
    let headers = create_report_headers(&["fio", "archiveCode", "unknownKey"]);
    assert_eq!(headers, vec!["ФИО", "Архивный шифр", "unknownKey"]);
}

#[test]
fn test_row_escapes_values() {
    let document = DocumentBuilder::new()
        .file_name("01-0203-0745-000002_00000003.jpg")
        .recognition_type(RecognitionType::Attribute)
        .attribute(RecognizedAttribute::new(
            AttributeKind::Organization,
            "ООО \"Рога и копыта\"",
            0.8,
        ))
        .attribute(RecognizedAttribute::new(AttributeKind::Address, "Москва, ул. Ленина", 0.8))
        .build()
        .unwrap();

    assert_eq!(
        create_report_row(&document, &["caseNumber", "organization", "address"]),
        "000002,\"ООО \"\"Рога и копыта\"\"\",\"Москва, ул. Ленина\""
    );
}

#[test]
fn test_escape_examples() {
    assert_eq!(escape_csv_value("a,b"), "\"a,b\"");
    assert_eq!(escape_csv_value("He said \"hi\""), "\"He said \"\"hi\"\"\"");
    assert_eq!(escape_csv_value("carriage\rreturn"), "\"carriage\rreturn\"");
    assert_eq!(escape_csv_value("Иванов И.И."), "Иванов И.И.");
}

#[test]
fn test_document_without_archive_code() {
    let document = DocumentBuilder::new()
        .file_name("cover.jpg")
        .recognition_type(RecognitionType::Full)
        .full_text("Обложка")
        .build()
        .unwrap();

    let artifact = export_report_to_csv(
        &[document],
        &fields(&["archiveCode", "fund", "fileName", "pageNumber", "fullText"]),
    )
    .unwrap();

    assert_eq!(artifact.csv().lines().nth(1), Some(",,cover.jpg,0,Обложка"));
}

#[test]
fn test_file_name_uses_fixed_clock() {
    let exporter = ReportExporter::new().with_clock(FixedClock(
        Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 1).unwrap(),
    ));
    let artifact = exporter.export(&[ivanov()], &fields(&["fio"])).unwrap();

    assert_eq!(artifact.file_name, "archive_report_2024-12-31-23-59-01.csv");
    assert_eq!(artifact.result.file_name, artifact.file_name);
}

#[test]
fn test_scan_file_name_extraction() {
    let path = "scans/01-0203-0745-000002_00000007.jpg";

    let code = extract_archive_code_from_path(path).unwrap();
    assert_eq!(code.case_number(), "000002");
    assert_eq!(extract_image_number(path), "00000007");
    assert_eq!(DocumentPageInfo::from_file_name(path).page_number, 7);
}

#[test]
fn test_grouped_export_orders_by_archive_and_page() {
    let make = |file_name: &str| {
        DocumentBuilder::new()
            .file_name(file_name)
            .recognition_type(RecognitionType::Full)
            .build()
            .unwrap()
    };
    let mut documents = vec![
        make("cover.jpg"),
        make("01-0203-0745-000003_00000001.jpg"),
        make("01-0203-0745-000002_00000010.jpg"),
        make("01-0203-0745-000002_00000002.jpg"),
    ];
    sort_documents_by_archive_and_page(&mut documents);

    let artifact = export_report_to_csv(&documents, &fields(&["caseNumber", "pageNumber"])).unwrap();
    assert_eq!(
        artifact.csv(),
        "Дело,Номер страницы\n000002,2\n000002,10\n000003,1\n,0\n"
    );
}

#[test]
fn test_every_template_exports() {
    for template in ReportTemplate::builtin() {
        assert!(template
            .fields
            .iter()
            .all(|key| FieldRegistry::global().contains(key)));

        let artifact =
            export_report_to_csv(&[ivanov()], &ReportConfiguration::from_template(template))
                .unwrap();
        assert_eq!(artifact.result.fields_count, template.fields.len());
    }
}
