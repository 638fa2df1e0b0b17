use super::*;

/// Tests clearing every participant.
///
/// Expected: Ok, every lookup 0 and the ledger file deleted
#[tokio::test]
async fn empties_ledger_and_deletes_file() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_entries(&[(1, 2), (2, 5)])
        .build()
        .await?;
    let ledger = open(&test).await;

    ledger.clear_all().await.unwrap();

    assert_eq!(ledger.lookup(1).await, 0);
    assert_eq!(ledger.lookup(2).await, 0);
    assert!(ledger.snapshot().await.is_empty());
    assert!(!test.ledger_exists());

    Ok(())
}

/// Tests that a cleared ledger stays deleted through a shutdown flush.
///
/// Expected: no file after flush, and a reopened ledger is empty
#[tokio::test]
async fn flush_after_clear_keeps_file_deleted() -> Result<(), TestError> {
    let test = TestBuilder::new().with_entries(&[(1, 2)]).build().await?;
    let ledger = open(&test).await;

    ledger.clear_all().await.unwrap();
    ledger.flush().await.unwrap();

    assert!(!test.ledger_exists());
    assert!(open(&test).await.snapshot().await.is_empty());

    Ok(())
}

/// Tests the ledger is usable again after a clear.
///
/// Expected: new entries start from zero and recreate the file
#[tokio::test]
async fn add_after_clear_starts_fresh() -> Result<(), TestError> {
    let test = TestBuilder::new().with_entries(&[(1, 2)]).build().await?;
    let ledger = open(&test).await;

    ledger.clear_all().await.unwrap();
    ledger.add(1, 1).await.unwrap();

    assert_eq!(ledger.lookup(1).await, 1);
    assert_eq!(
        test.read_ledger().await?,
        Some(serde_json::json!({ "1": 1 }))
    );

    Ok(())
}
