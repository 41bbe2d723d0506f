use super::*;

fn picked(name: &str, mime_type: &str) -> PickedFile {
    PickedFile {
        name: name.to_owned(),
        mime_type: mime_type.to_owned(),
        size: 2048,
        last_modified: time::macros::datetime!(2024-03-01 12:00 UTC),
    }
}

// =============================================================
// intake
// =============================================================

#[test]
fn intake_builds_document_for_accepted_type() {
    let doc = intake(picked("report.pdf", "application/pdf"), "user-1").unwrap();
    assert_eq!(doc.name, "report.pdf");
    assert_eq!(doc.mime_type, "application/pdf");
    assert_eq!(doc.size, 2048);
    assert_eq!(doc.user_id, "user-1");
    assert_eq!(doc.last_modified, time::macros::datetime!(2024-03-01 12:00 UTC));
    assert!(doc.content.is_none());
    assert!(doc.summary.is_none());
}

#[test]
fn intake_rejects_unaccepted_type() {
    let err = intake(picked("photo.png", "image/png"), "user-1").unwrap_err();
    assert_eq!(
        err,
        UploadError::UnsupportedType { name: "photo.png".to_owned(), mime_type: "image/png".to_owned() }
    );
}

#[test]
fn reported_type_wins_over_extension() {
    assert_eq!(accepted_type(&picked("notes.pdf", "image/png")), None);
    assert_eq!(accepted_type(&picked("notes.bin", "TEXT/PLAIN")), Some("text/plain"));
}

#[test]
fn missing_type_falls_back_to_extension() {
    assert_eq!(accepted_type(&picked("Thesis.DOCX", "")), Some(ACCEPTED_TYPES[2].0));
    assert_eq!(accepted_type(&picked("letter.doc", "application/octet-stream")), Some("application/msword"));
    assert_eq!(accepted_type(&picked("archive.zip", "")), None);
}

#[test]
fn document_ids_are_short_base36() {
    let id = generate_document_id();
    assert_eq!(id.len(), 7);
    assert!(id.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
}

// =============================================================
// file_kind
// =============================================================

#[test]
fn file_kind_matches_icon_families() {
    assert_eq!(file_kind("application/pdf"), FileKind::Pdf);
    assert_eq!(file_kind("application/msword"), FileKind::Doc);
    assert_eq!(file_kind(ACCEPTED_TYPES[2].0), FileKind::Doc);
    assert_eq!(file_kind("text/plain"), FileKind::Text);
    assert_eq!(file_kind("image/png"), FileKind::Other);
    assert_eq!(file_kind(""), FileKind::Other);
    assert_eq!(FileKind::Text.as_str(), "text");
}
