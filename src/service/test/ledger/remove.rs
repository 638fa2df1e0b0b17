use super::*;

/// Tests a partial removal.
///
/// Expected: Ok with the reduced total persisted
#[tokio::test]
async fn subtracts_entries() -> Result<(), TestError> {
    let test = TestBuilder::new().with_entries(&[(1, 5)]).build().await?;
    let ledger = open(&test).await;

    assert_eq!(ledger.remove(1, 2).await.unwrap(), 3);

    assert_eq!(ledger.lookup(1).await, 3);
    assert_eq!(
        test.read_ledger().await?,
        Some(serde_json::json!({ "1": 3 }))
    );

    Ok(())
}

/// Tests removing exactly the holding deletes the participant.
///
/// Expected: Ok(0), lookup 0, absent from the file and the listing
#[tokio::test]
async fn removing_everything_deletes_key() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_entries(&[(1, 2), (2, 1)])
        .build()
        .await?;
    let ledger = open(&test).await;
    let directory = GuildDirectory::new(
        vec![DirectoryMember::new(1, "ana"), DirectoryMember::new(2, "bob")],
        Vec::new(),
    );

    assert_eq!(ledger.remove(1, 2).await.unwrap(), 0);

    assert_eq!(ledger.lookup(1).await, 0);
    assert_eq!(
        ledger.list_all(&directory).await,
        vec![("bob".to_string(), 1)]
    );
    assert_eq!(
        test.read_ledger().await?,
        Some(serde_json::json!({ "2": 1 }))
    );

    Ok(())
}

/// Tests removing more than held, and removing from an absent participant.
///
/// Expected: InsufficientEntries both times, ledger and file unchanged
#[tokio::test]
async fn insufficient_entries_leave_ledger_unchanged() -> Result<(), TestError> {
    let test = TestBuilder::new().with_entries(&[(1, 2)]).build().await?;
    let ledger = open(&test).await;

    let over = ledger.remove(1, 3).await.unwrap_err();
    let absent = ledger.remove(9, 1).await.unwrap_err();

    assert!(matches!(
        over,
        AppError::InsufficientEntries {
            held: 2,
            requested: 3
        }
    ));
    assert_eq!(absent.kind(), ErrorKind::InsufficientEntries);
    assert_eq!(ledger.lookup(1).await, 2);
    assert_eq!(
        test.read_ledger().await?,
        Some(serde_json::json!({ "1": 2 }))
    );

    Ok(())
}

/// Tests removing a non-positive count.
///
/// Expected: InvalidArgument, even for a user without entries
#[tokio::test]
async fn rejects_non_positive_count() -> Result<(), TestError> {
    let test = TestBuilder::new().with_entries(&[(1, 2)]).build().await?;
    let ledger = open(&test).await;

    assert_eq!(
        ledger.remove(1, 0).await.unwrap_err().kind(),
        ErrorKind::InvalidArgument
    );
    assert_eq!(
        ledger.remove(9, -2).await.unwrap_err().kind(),
        ErrorKind::InvalidArgument
    );

    Ok(())
}

/// Tests removing a participant's whole holding.
///
/// Expected: Ok with the removed amount, then Ok(0) once nothing is left
#[tokio::test]
async fn remove_all_zeroes_holding() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_entries(&[(1, 4), (2, 1)])
        .build()
        .await?;
    let ledger = open(&test).await;

    assert_eq!(ledger.remove_all(1).await.unwrap(), 4);
    assert_eq!(ledger.remove_all(1).await.unwrap(), 0);

    assert_eq!(ledger.lookup(1).await, 0);
    assert_eq!(ledger.lookup(2).await, 1);

    Ok(())
}
