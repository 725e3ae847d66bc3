//! Integration tests for the full stage-merge-deliver flow.

use lopdf::Document;
use tempfile::TempDir;

use pdftray::controller::MergeController;
use pdftray::io::picker::pick_files;
use pdftray::io::DirectoryDelivery;
use pdftray::merge::{DocumentAssembler, MergeBackend};
use pdftray::selection::Candidate;

use crate::common::write_fixture;

#[tokio::test]
async fn test_stage_merge_download_flow() {
    let staging = TempDir::new().unwrap();
    let downloads = TempDir::new().unwrap();

    write_fixture(staging.path(), "fileA.pdf", 1);
    write_fixture(staging.path(), "fileB.pdf", 2);

    // Pick everything in the staging directory, in name order.
    let picked = pick_files([staging.path().to_str().unwrap()]).unwrap();
    assert_eq!(picked.files.len(), 2);

    let mut controller = MergeController::new();
    controller.add_files(picked.files);

    let mut backend = DocumentAssembler::new();
    let delivery = DirectoryDelivery::new(downloads.path());

    let report = controller
        .merge_all(&mut backend, &delivery)
        .await
        .unwrap();

    assert_eq!(report.files_merged, 2);
    assert_eq!(report.output_path, downloads.path().join("merged.pdf"));
    assert!(report.output_bytes > 0);

    // The artifact is a loadable PDF holding every submitted page.
    let merged = Document::load(&report.output_path).unwrap();
    assert_eq!(merged.get_pages().len(), 3);

    // Back to the initial selectable state.
    assert_eq!(controller.file_count(), 0);
    assert!(!controller.is_merging());
}

#[tokio::test]
async fn test_merge_three_files_in_order() {
    let staging = TempDir::new().unwrap();
    let downloads = TempDir::new().unwrap();

    let a = write_fixture(staging.path(), "a.pdf", 2);
    let b = write_fixture(staging.path(), "b.pdf", 1);
    let c = write_fixture(staging.path(), "c.pdf", 3);

    let mut controller = MergeController::new();
    controller.add_files([
        Candidate::from_path(&a),
        Candidate::from_path(&b),
        Candidate::from_path(&c),
    ]);

    let mut backend = DocumentAssembler::new();
    let delivery = DirectoryDelivery::new(downloads.path());

    let report = controller
        .merge_all(&mut backend, &delivery)
        .await
        .unwrap();

    assert_eq!(report.files_merged, 3);

    let merged = Document::load(&report.output_path).unwrap();
    assert_eq!(merged.get_pages().len(), 6);
}

#[tokio::test]
async fn test_second_merge_replaces_previous_artifact() {
    let staging = TempDir::new().unwrap();
    let downloads = TempDir::new().unwrap();

    let a = write_fixture(staging.path(), "a.pdf", 1);
    let b = write_fixture(staging.path(), "b.pdf", 1);
    let c = write_fixture(staging.path(), "c.pdf", 1);

    let delivery = DirectoryDelivery::new(downloads.path());
    let mut controller = MergeController::new();

    controller.add_files([Candidate::from_path(&a), Candidate::from_path(&b)]);
    let mut backend = DocumentAssembler::new();
    controller
        .merge_all(&mut backend, &delivery)
        .await
        .unwrap();

    // A fresh backend per attempt; the first one is spent.
    controller.add_files([
        Candidate::from_path(&a),
        Candidate::from_path(&b),
        Candidate::from_path(&c),
    ]);
    let mut backend = DocumentAssembler::new();
    let report = controller
        .merge_all(&mut backend, &delivery)
        .await
        .unwrap();

    let merged = Document::load(&report.output_path).unwrap();
    assert_eq!(merged.get_pages().len(), 3);
}

#[tokio::test]
async fn test_assembler_reports_progress_counts() {
    let staging = TempDir::new().unwrap();
    let a = write_fixture(staging.path(), "a.pdf", 2);
    let b = write_fixture(staging.path(), "b.pdf", 2);

    let mut assembler = DocumentAssembler::new();
    assembler.add(&Candidate::from_path(&a)).await.unwrap();
    assembler.add(&Candidate::from_path(&b)).await.unwrap();

    assert_eq!(assembler.files_added(), 2);
    assert_eq!(assembler.page_count(), 4);
}
