use super::*;
use crate::model::ledger::Ledger;

/// Tests saving a ledger creates the file in the flat map format.
///
/// Expected: Ok with `{"id": count}` on disk and no temporary file left behind
#[tokio::test]
async fn writes_flat_map() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;

    let store = LedgerStore::new(test.ledger_path());
    let ledger: Ledger = [(123, 4), (456, 1)].into_iter().collect();
    store.save(&ledger).await.unwrap();

    let on_disk = test.read_ledger().await?;
    assert_eq!(on_disk, Some(serde_json::json!({ "123": 4, "456": 1 })));
    assert!(!test.dir().join("participaciones.json.tmp").exists());

    Ok(())
}

/// Tests saving replaces the previous snapshot entirely.
///
/// Verifies the write is a full overwrite rather than a merge with old content.
///
/// Expected: Ok with only the new entries on disk
#[tokio::test]
async fn overwrites_previous_snapshot() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_entries(&[(1, 9), (2, 9)])
        .build()
        .await?;

    let store = LedgerStore::new(test.ledger_path());
    let ledger: Ledger = [(3, 1)].into_iter().collect();
    store.save(&ledger).await.unwrap();

    let on_disk = test.read_ledger().await?;
    assert_eq!(on_disk, Some(serde_json::json!({ "3": 1 })));

    Ok(())
}

/// Tests that a saved ledger loads back identically.
///
/// Expected: Ok with equal ledgers
#[tokio::test]
async fn save_then_load_preserves_entries() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;

    let store = LedgerStore::new(test.ledger_path());
    let ledger: Ledger = [(10, 2), (20, 7)].into_iter().collect();
    store.save(&ledger).await.unwrap();

    let reloaded = LedgerStore::new(test.ledger_path()).load().await.unwrap();
    assert_eq!(reloaded, ledger);

    Ok(())
}

/// Tests that a failed write leaves the previous snapshot in place.
///
/// Occupies the temporary file's path with a directory so the write fails on the same
/// ledger the store points at.
///
/// Expected: Err classified as Internal, original file byte-identical
#[tokio::test]
async fn failed_write_keeps_previous_file() -> Result<(), TestError> {
    let test = TestBuilder::new().with_entries(&[(1, 2)]).build().await?;
    let original = tokio::fs::read(test.ledger_path()).await?;
    tokio::fs::create_dir(test.dir().join("participaciones.json.tmp")).await?;

    let store = LedgerStore::new(test.ledger_path());
    let ledger: Ledger = [(1, 5)].into_iter().collect();
    let result = store.save(&ledger).await;

    assert_eq!(result.unwrap_err().kind(), ErrorKind::Internal);
    assert_eq!(tokio::fs::read(test.ledger_path()).await?, original);

    Ok(())
}

/// Tests that a failed replace removes the temporary file.
///
/// The ledger path is a non-empty directory, so the final rename fails after the
/// temporary file was written.
///
/// Expected: Err classified as Internal, no temporary file left, directory untouched
#[tokio::test]
async fn failed_replace_removes_temporary_file() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;
    tokio::fs::create_dir(test.ledger_path()).await?;
    tokio::fs::write(test.ledger_path().join("keep"), b"x").await?;

    let store = LedgerStore::new(test.ledger_path());
    let ledger: Ledger = [(1, 5)].into_iter().collect();
    let result = store.save(&ledger).await;

    assert_eq!(result.unwrap_err().kind(), ErrorKind::Internal);
    assert!(!test.dir().join("participaciones.json.tmp").exists());
    assert!(test.ledger_path().join("keep").exists());

    Ok(())
}
