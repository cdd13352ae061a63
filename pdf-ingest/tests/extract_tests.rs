mod common;

use pdf_ingest::{Document, Extraction, RecursiveSplitter, extract_pdf_text, prepare_chunks};

#[test]
fn extracts_single_page_text() {
    let pdf = common::pdf_with_pages(&[&["Petitioner: Jane Doe"]]);
    let text = match extract_pdf_text(&pdf) {
        Extraction::Text(t) => t,
        other => panic!("expected text, got {other:?}"),
    };
    assert!(text.contains("Petitioner: Jane Doe"), "got {text:?}");
}

#[test]
fn pages_are_concatenated_in_order() {
    let pdf = common::pdf_with_pages(&[&["Respondent: ACME Corp"], &["Petitioner: Jane Doe"]]);
    let text = extract_pdf_text(&pdf).into_text();
    let first = text.find("Respondent").unwrap();
    let second = text.find("Petitioner").unwrap();
    assert!(first < second);
}

#[test]
fn blank_page_yields_zero_chunks() {
    let pdf = common::pdf_with_pages(&[&[]]);
    let batch = prepare_chunks(
        &[Document::new("blank.pdf", pdf)],
        &RecursiveSplitter::default(),
    );
    assert!(batch.chunks.is_empty());
    assert_eq!(batch.unreadable(), 0);
}

#[test]
fn bad_file_does_not_abort_batch() {
    let good = common::pdf_with_pages(&[&["Petitioner: Jane Doe"]]);
    let batch = prepare_chunks(
        &[
            Document::new("broken.pdf", b"not a pdf".to_vec()),
            Document::new("case.pdf", good),
        ],
        &RecursiveSplitter::default(),
    );
    assert_eq!(batch.chunks.len(), 1);
    assert!(batch.chunks[0].contains("Jane Doe"));
    assert!(batch.per_document[0].unreadable);
    assert_eq!(batch.per_document[1].chunks, 1);
}
