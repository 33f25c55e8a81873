mod common;

use common::{docx_with_paragraphs, pdf_with_pages, xlsx_with_rows};
use unredactor::config::ExtractionConfig;
use unredactor::extraction::{
    BatchCoordinator, BatchError, Document, ExtractionUnit, route_document,
};

fn config() -> ExtractionConfig {
    ExtractionConfig::default()
}

#[test]
fn pdf_pages_become_numbered_units_and_blank_pages_are_dropped() {
    let bytes = pdf_with_pages(&["First page", "", "Third page"]);
    let units = route_document(Document::from_bytes("a.b.pdf", bytes), &config());

    assert_eq!(units.len(), 2, "units: {units:?}");
    assert_eq!(units[0].unit_index, 1);
    assert!(units[0].snippet.contains("First page"));
    assert_eq!(units[1].unit_index, 3);
    assert!(units[1].snippet.contains("Third page"));
    assert!(units.iter().all(|unit| !unit.is_error));
}

#[test]
fn long_pdf_page_is_truncated_to_budget() {
    let long_text = "a".repeat(700);
    let bytes = pdf_with_pages(&[&long_text]);
    let units = route_document(Document::from_bytes("long.pdf", bytes), &config());

    assert_eq!(units.len(), 1);
    assert_eq!(units[0].snippet.chars().count(), 500);
}

#[test]
fn docx_paragraphs_are_joined_into_one_unit() {
    let bytes = docx_with_paragraphs(&["  Dear team,", "", "Budget attached."]);
    let units = route_document(Document::from_bytes("memo.docx", bytes), &config());

    assert_eq!(
        units,
        vec![ExtractionUnit::content(
            1,
            "Dear team,\n\nBudget attached.".into()
        )]
    );
}

#[test]
fn docx_without_text_yields_no_units() {
    let bytes = docx_with_paragraphs(&["", "   "]);
    assert!(route_document(Document::from_bytes("blank.docx", bytes), &config()).is_empty());
}

#[test]
fn docx_without_document_part_is_reported() {
    let units = route_document(
        Document::from_bytes("odd.docx", xlsx_with_rows(&[&["x"]])),
        &config(),
    );
    assert_eq!(units.len(), 1);
    assert!(units[0].is_error);
    assert!(units[0].snippet.starts_with("Failed to read file ("));
}

#[test]
fn xlsx_rows_are_flattened_with_spaces_and_newlines() {
    let bytes = xlsx_with_rows(&[&["name", "qty"], &["apple", "3"], &["pear", "12"]]);
    let units = route_document(Document::from_bytes("stock.XLSX", bytes), &config());

    assert_eq!(units.len(), 1);
    assert_eq!(units[0].unit_index, 1);
    assert_eq!(units[0].snippet, "name qty\napple 3\npear 12");
}

#[test]
fn text_exactly_over_budget_is_cut_to_budget() {
    let text = "z".repeat(501);
    let units = route_document(Document::from_bytes("big.txt", text), &config());
    assert_eq!(units[0].snippet.len(), 500);
}

#[test]
fn csv_is_read_as_text() {
    let units = route_document(Document::from_bytes("t.csv", "a,b\n1,2\n"), &config());
    assert_eq!(units, vec![ExtractionUnit::content(1, "a,b\n1,2".into())]);
}

#[test]
fn documents_are_read_from_disk() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("stored.pdf");
    std::fs::write(&path, pdf_with_pages(&["On disk"])).expect("write pdf");

    let units = route_document(Document::from_path("stored.pdf", &path), &config());
    assert_eq!(units.len(), 1);
    assert!(units[0].snippet.contains("On disk"));
}

#[tokio::test]
async fn mixed_batch_reports_every_document() {
    let coordinator = BatchCoordinator::new(ExtractionConfig {
        max_workers: 3,
        ..ExtractionConfig::default()
    });
    let result = coordinator
        .run(vec![
            Document::from_bytes("report.pdf", pdf_with_pages(&["Quarterly"])),
            Document::from_bytes("memo.docx", docx_with_paragraphs(&["Hello"])),
            Document::from_bytes("sheet.xlsx", xlsx_with_rows(&[&["a", "b"]])),
            Document::from_bytes("notes.txt", "   "),
            Document::from_bytes("corrupt.pdf", "not really a pdf"),
            Document::from_bytes("report.xyz", "whatever"),
        ])
        .await
        .expect("batch result");

    let keys: Vec<&str> = result.keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        vec![
            "report.pdf",
            "memo.docx",
            "sheet.xlsx",
            "notes.txt",
            "corrupt.pdf",
            "report.xyz"
        ]
    );
    assert!(result["report.pdf"][0].snippet.contains("Quarterly"));
    assert_eq!(result["memo.docx"][0].snippet, "Hello");
    assert_eq!(result["sheet.xlsx"][0].snippet, "a b");
    assert!(result["notes.txt"].is_empty());
    assert!(result["corrupt.pdf"][0].is_error);
    assert_eq!(result["report.xyz"].len(), 1);
    assert!(result["report.xyz"][0].snippet.contains("xyz"));
}

#[tokio::test]
async fn reversed_submission_reverses_keys() {
    let coordinator = BatchCoordinator::default();
    let build = |ids: [&str; 3]| {
        ids.into_iter()
            .map(|id| Document::from_bytes(id, format!("content of {id}")))
            .collect::<Vec<_>>()
    };

    let forward = coordinator
        .run(build(["a.txt", "b.txt", "c.txt"]))
        .await
        .expect("forward");
    let backward = coordinator
        .run(build(["c.txt", "b.txt", "a.txt"]))
        .await
        .expect("backward");

    assert_eq!(
        forward.keys().collect::<Vec<_>>(),
        vec!["a.txt", "b.txt", "c.txt"]
    );
    assert_eq!(
        backward.keys().collect::<Vec<_>>(),
        vec!["c.txt", "b.txt", "a.txt"]
    );
    assert_eq!(forward["a.txt"], backward["a.txt"]);
}

#[tokio::test]
async fn empty_submission_signals_no_documents() {
    let err = BatchCoordinator::default().run(Vec::new()).await.unwrap_err();
    assert_eq!(err, BatchError::EmptyBatch);
    assert_eq!(err.to_string(), "no documents submitted");
}
