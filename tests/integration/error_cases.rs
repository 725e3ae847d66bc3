//! Integration tests for declined and failed merges.

use lopdf::Document;
use rstest::rstest;
use tempfile::TempDir;

use pdftray::controller::MergeController;
use pdftray::error::PdfTrayError;
use pdftray::io::DirectoryDelivery;
use pdftray::merge::DocumentAssembler;
use pdftray::selection::Candidate;

use crate::common::write_fixture;

#[rstest]
#[case(0)]
#[case(1)]
#[tokio::test]
async fn test_small_selection_is_declined(#[case] count: usize) {
    let staging = TempDir::new().unwrap();
    let downloads = TempDir::new().unwrap();

    let mut controller = MergeController::new();
    for i in 0..count {
        let path = write_fixture(staging.path(), &format!("f{i}.pdf"), 1);
        controller.add_files([Candidate::from_path(path)]);
    }

    let mut backend = DocumentAssembler::new();
    let delivery = DirectoryDelivery::new(downloads.path());

    let err = controller
        .merge_all(&mut backend, &delivery)
        .await
        .unwrap_err();

    assert!(matches!(err, PdfTrayError::SelectionTooSmall { .. }));
    assert!(err.is_validation());

    // Nothing reached the capability or the download directory.
    assert_eq!(backend.files_added(), 0);
    assert!(!downloads.path().join("merged.pdf").exists());
    assert_eq!(controller.file_count(), count);
}

#[tokio::test]
async fn test_corrupt_file_fails_merge_and_keeps_selection() {
    let staging = TempDir::new().unwrap();
    let downloads = TempDir::new().unwrap();

    let good = write_fixture(staging.path(), "good.pdf", 1);
    let bogus = staging.path().join("bogus.pdf");
    std::fs::write(&bogus, b"this is not a pdf").unwrap();

    let mut controller = MergeController::new();
    controller.add_files([Candidate::from_path(&good), Candidate::from_path(&bogus)]);

    let mut backend = DocumentAssembler::new();
    let delivery = DirectoryDelivery::new(downloads.path());

    let err = controller
        .merge_all(&mut backend, &delivery)
        .await
        .unwrap_err();

    assert!(matches!(err, PdfTrayError::FailedToLoadPdf { .. }));
    assert!(err.is_capability());
    assert!(!downloads.path().join("merged.pdf").exists());

    // Selection survives so the user can remove the offender and retry.
    assert_eq!(controller.file_count(), 2);
    assert!(!controller.is_merging());
}

#[tokio::test]
async fn test_retry_after_removing_offender() {
    let staging = TempDir::new().unwrap();
    let downloads = TempDir::new().unwrap();

    let a = write_fixture(staging.path(), "a.pdf", 1);
    let bogus = staging.path().join("bogus.pdf");
    std::fs::write(&bogus, b"junk").unwrap();
    let b = write_fixture(staging.path(), "b.pdf", 1);

    let mut controller = MergeController::new();
    controller.add_files([
        Candidate::from_path(&a),
        Candidate::from_path(&bogus),
        Candidate::from_path(&b),
    ]);

    let delivery = DirectoryDelivery::new(downloads.path());

    let mut backend = DocumentAssembler::new();
    controller
        .merge_all(&mut backend, &delivery)
        .await
        .unwrap_err();

    // Drop the corrupt entry and try again with a fresh backend.
    let removed = controller.remove_file(1).unwrap();
    assert_eq!(removed.name(), "bogus.pdf");

    let mut backend = DocumentAssembler::new();
    let report = controller
        .merge_all(&mut backend, &delivery)
        .await
        .unwrap();

    assert_eq!(report.files_merged, 2);
    let merged = Document::load(&report.output_path).unwrap();
    assert_eq!(merged.get_pages().len(), 2);
    assert_eq!(controller.file_count(), 0);
}

#[tokio::test]
async fn test_missing_file_fails_merge() {
    let staging = TempDir::new().unwrap();
    let downloads = TempDir::new().unwrap();

    let good = write_fixture(staging.path(), "good.pdf", 1);

    let mut controller = MergeController::new();
    controller.add_files([
        Candidate::from_path(&good),
        Candidate::from_path(staging.path().join("vanished.pdf")),
    ]);

    let mut backend = DocumentAssembler::new();
    let delivery = DirectoryDelivery::new(downloads.path());

    let err = controller
        .merge_all(&mut backend, &delivery)
        .await
        .unwrap_err();

    assert!(matches!(err, PdfTrayError::FileNotAccessible { .. }));
    assert_eq!(controller.file_count(), 2);
}

#[tokio::test]
async fn test_delivery_into_missing_directory_keeps_selection() {
    let staging = TempDir::new().unwrap();

    let a = write_fixture(staging.path(), "a.pdf", 1);
    let b = write_fixture(staging.path(), "b.pdf", 1);

    let mut controller = MergeController::new();
    controller.add_files([Candidate::from_path(&a), Candidate::from_path(&b)]);

    let mut backend = DocumentAssembler::new();
    let delivery = DirectoryDelivery::new("/nonexistent/downloads");

    let err = controller
        .merge_all(&mut backend, &delivery)
        .await
        .unwrap_err();

    assert!(err.is_capability());
    assert_eq!(controller.file_count(), 2);
    assert!(!controller.is_merging());
}
