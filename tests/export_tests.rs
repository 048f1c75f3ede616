#![cfg(feature = "export")]

use rust_decimal_macros::dec;

use invoiceflow::document::*;
use invoiceflow::editor::Editor;
use invoiceflow::error::EditorError;
use invoiceflow::export::RasterImage;
use invoiceflow::store::MemoryStorage;

fn editor_with_document() -> Editor<MemoryStorage> {
    let mut editor = Editor::open(MemoryStorage::new());
    editor.edit(|doc| {
        doc.number = "INV-4821".into();
        doc.client = Client {
            name: "Acme Pty Ltd".into(),
            email: "billing@acme.example".into(),
            address: "1 Flinders St".into(),
        };
        doc.items = vec![LineItemBuilder::new("Consulting", dec!(2), dec!(50)).build()];
    });
    editor
}

fn capture() -> RasterImage {
    RasterImage::new(800, 1131, vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10]).unwrap()
}

#[test]
fn export_produces_a_named_pdf() {
    let mut editor = editor_with_document();

    let name = editor.begin_export().unwrap();
    assert_eq!(name, "invoice-INV-4821.pdf");
    assert!(editor.export_in_flight());

    let artifact = editor.finish_export(Ok(capture())).unwrap();
    assert_eq!(artifact.file_name, "invoice-INV-4821.pdf");
    assert!(artifact.bytes.starts_with(b"%PDF-1.5"));
    assert!(!editor.export_in_flight());
}

#[test]
fn concurrent_export_requests_are_rejected_not_queued() {
    let mut editor = editor_with_document();
    editor.begin_export().unwrap();

    let err = editor.begin_export().unwrap_err();
    assert!(matches!(err, EditorError::InvalidState(_)));
    // the original export is still in flight and completes normally
    assert!(editor.export_in_flight());
    editor.finish_export(Ok(capture())).unwrap();
}

#[test]
fn capture_failure_surfaces_and_changes_nothing() {
    let mut editor = editor_with_document();
    let before = editor.current().clone();
    editor.begin_export().unwrap();

    let err = editor
        .finish_export(Err("canvas capture failed".to_string()))
        .unwrap_err();
    assert!(matches!(err, EditorError::Export(_)));
    assert!(!editor.export_in_flight());
    assert_eq!(*editor.current(), before);
    assert!(editor.documents().is_empty());

    // the editor is free to try again
    editor.begin_export().unwrap();
    editor.finish_export(Ok(capture())).unwrap();
}

#[test]
fn finishing_without_a_pending_export_is_an_error() {
    let mut editor = editor_with_document();
    assert!(matches!(
        editor.finish_export(Ok(capture())),
        Err(EditorError::InvalidState(_))
    ));
}

#[test]
fn unnumbered_documents_export_as_new() {
    let mut editor = Editor::open(MemoryStorage::new());
    editor.set_document_type(DocumentType::Quotation);
    editor.edit(|doc| doc.number.clear());

    assert_eq!(editor.begin_export().unwrap(), "quotation-new.pdf");
}
