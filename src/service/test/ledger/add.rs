use super::*;

/// Tests adding entries to a new and an existing participant.
///
/// Verifies the running total is returned and written to disk after each call.
///
/// Expected: Ok with totals 3 then 5, file matching memory
#[tokio::test]
async fn accumulates_and_persists() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;
    let ledger = open(&test).await;

    assert_eq!(ledger.add(42, 3).await.unwrap(), 3);
    assert_eq!(ledger.add(42, 2).await.unwrap(), 5);

    assert_eq!(ledger.lookup(42).await, 5);
    assert_eq!(
        test.read_ledger().await?,
        Some(serde_json::json!({ "42": 5 }))
    );

    Ok(())
}

/// Tests that a zero or negative count is rejected without touching the file.
///
/// Expected: InvalidArgument, ledger file never created
#[tokio::test]
async fn rejects_non_positive_count() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;
    let ledger = open(&test).await;

    let zero = ledger.add(42, 0).await.unwrap_err();
    let negative = ledger.add(42, -1).await.unwrap_err();

    assert_eq!(zero.kind(), ErrorKind::InvalidArgument);
    assert_eq!(negative.kind(), ErrorKind::InvalidArgument);
    assert_eq!(ledger.lookup(42).await, 0);
    assert!(!test.ledger_exists());

    Ok(())
}

/// Tests that entries survive a restart.
///
/// Expected: a second service opened on the same file sees the same totals
#[tokio::test]
async fn survives_reload() -> Result<(), TestError> {
    let test = TestBuilder::new().with_entries(&[(1, 2)]).build().await?;

    let ledger = open(&test).await;
    ledger.add(1, 1).await.unwrap();
    ledger.add(2, 4).await.unwrap();
    drop(ledger);

    let reopened = open(&test).await;
    assert_eq!(reopened.lookup(1).await, 3);
    assert_eq!(reopened.lookup(2).await, 4);

    Ok(())
}

/// Tests concurrent adds from many tasks are serialized without lost updates.
///
/// Expected: final total equals the number of adds, on disk and in memory
#[tokio::test]
async fn concurrent_adds_are_not_lost() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;
    let ledger = open(&test).await;

    let tasks: Vec<_> = (0..20)
        .map(|_| {
            let ledger = ledger.clone();
            tokio::spawn(async move { ledger.add(7, 1).await })
        })
        .collect();

    for task in tasks {
        task.await.unwrap().unwrap();
    }

    assert_eq!(ledger.lookup(7).await, 20);
    assert_eq!(
        test.read_ledger().await?,
        Some(serde_json::json!({ "7": 20 }))
    );

    Ok(())
}

/// Tests that a failed write leaves the in-memory ledger unchanged.
///
/// Removes the scratch directory from under the service so the temporary file cannot
/// be created.
///
/// Expected: Internal error and the previous total still visible
#[tokio::test]
async fn failed_persist_keeps_memory_unchanged() -> Result<(), TestError> {
    let test = TestBuilder::new().with_entries(&[(1, 2)]).build().await?;
    let ledger = open(&test).await;

    tokio::fs::remove_dir_all(test.dir()).await?;

    let err = ledger.add(1, 5).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Internal);
    assert_eq!(ledger.lookup(1).await, 2);

    Ok(())
}
