use super::*;

/// Tests loading when no ledger file exists.
///
/// Verifies that a missing file is treated as the pristine state rather than an error.
///
/// Expected: Ok with an empty ledger
#[tokio::test]
async fn missing_file_loads_empty() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;

    let store = LedgerStore::new(test.ledger_path());
    let ledger = store.load().await.unwrap();

    assert!(ledger.is_empty());

    Ok(())
}

/// Tests loading a seeded ledger file.
///
/// Verifies that string keys are parsed back into user ids with their counts.
///
/// Expected: Ok with every seeded entry present
#[tokio::test]
async fn loads_seeded_entries() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_entries(&[(123456789012345678, 4), (987654321098765432, 1)])
        .build()
        .await?;

    let store = LedgerStore::new(test.ledger_path());
    let ledger = store.load().await.unwrap();

    assert_eq!(ledger.len(), 2);
    assert_eq!(ledger.lookup(123456789012345678), 4);
    assert_eq!(ledger.lookup(987654321098765432), 1);

    Ok(())
}

/// Tests that zero counts from a hand-edited file are dropped on load.
///
/// Expected: Ok with the zero entry absent
#[tokio::test]
async fn drops_zero_counts() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_entries(&[(1, 0), (2, 3)])
        .build()
        .await?;

    let store = LedgerStore::new(test.ledger_path());
    let ledger = store.load().await.unwrap();

    assert_eq!(ledger.len(), 1);
    assert_eq!(ledger.lookup(1), 0);
    assert_eq!(ledger.lookup(2), 3);

    Ok(())
}

/// Tests loading a file that is not a ledger map.
///
/// Expected: Err classified as Internal
#[tokio::test]
async fn malformed_file_fails() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;
    test.write_raw("{\"123\": -1}").await?;

    let store = LedgerStore::new(test.ledger_path());
    let result = store.load().await;

    assert_eq!(result.unwrap_err().kind(), ErrorKind::Internal);

    Ok(())
}
