use super::*;

/// Tests deleting an existing ledger file.
///
/// Expected: Ok with the file gone
#[tokio::test]
async fn removes_file() -> Result<(), TestError> {
    let test = TestBuilder::new().with_entries(&[(1, 2)]).build().await?;

    let store = LedgerStore::new(test.ledger_path());
    store.delete().await.unwrap();

    assert!(!test.ledger_exists());

    Ok(())
}

/// Tests deleting when the file was never written.
///
/// Expected: Ok, deleting is idempotent
#[tokio::test]
async fn missing_file_is_ok() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;

    let store = LedgerStore::new(test.ledger_path());

    assert!(store.delete().await.is_ok());
    assert!(store.delete().await.is_ok());

    Ok(())
}

/// Tests that a stale temporary file from an interrupted write is cleaned up.
///
/// Expected: Ok with both files gone
#[tokio::test]
async fn removes_stale_temporary_file() -> Result<(), TestError> {
    let test = TestBuilder::new().with_entries(&[(1, 2)]).build().await?;
    let tmp = test.dir().join("participaciones.json.tmp");
    tokio::fs::write(&tmp, b"{}").await?;

    let store = LedgerStore::new(test.ledger_path());
    store.delete().await.unwrap();

    assert!(!test.ledger_exists());
    assert!(!tmp.exists());

    Ok(())
}
