use super::*;

/// Tests the pool is the intersection of room occupants and ledger holders.
///
/// carla holds entries but is in another room; the bot is in the room but holds none.
///
/// Expected: Ok with ana and bob only, total 4
#[tokio::test]
async fn pool_is_room_intersect_ledger() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_entries(&[(1, 3), (2, 1), (4, 10)])
        .build()
        .await?;
    let (engine, _) = engine(&test).await;

    let session = engine.start(&directory(), "sorteo").await.unwrap();

    let ids: Vec<u64> = session.candidates().iter().map(|c| c.user_id).collect();
    assert_eq!(ids, vec![1, 2]);
    assert_eq!(session.total(), 4);
    assert_eq!(session.room(), "Sorteo");

    Ok(())
}

/// Tests a draw in a room that does not exist.
///
/// Expected: NotFound, ledger unchanged
#[tokio::test]
async fn missing_room_is_not_found() -> Result<(), TestError> {
    let test = TestBuilder::new().with_entries(&[(1, 3)]).build().await?;
    let (engine, ledger) = engine(&test).await;

    let err = engine.start(&directory(), "Lobby").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(ledger.lookup(1).await, 3);

    Ok(())
}

/// Tests a draw in a room nobody is connected to.
///
/// Expected: EmptyPool with the EmptyRoom reason
#[tokio::test]
async fn empty_room_is_rejected() -> Result<(), TestError> {
    let test = TestBuilder::new().with_entries(&[(1, 3)]).build().await?;
    let (engine, _) = engine(&test).await;

    let err = engine.start(&directory(), "Vacío").await.unwrap_err();

    assert!(matches!(
        err,
        AppError::EmptyPoolErr(EmptyPoolError::EmptyRoom(_))
    ));

    Ok(())
}

/// Tests a room whose occupants hold no entries.
///
/// Expected: EmptyPool with the NoEligibleCandidates reason, ledger and file unchanged
#[tokio::test]
async fn no_eligible_candidates_is_rejected() -> Result<(), TestError> {
    let test = TestBuilder::new().with_entries(&[(4, 10)]).build().await?;
    let (engine, ledger) = engine(&test).await;

    let err = engine.start(&directory(), "Sorteo").await.unwrap_err();

    assert!(matches!(
        err,
        AppError::EmptyPoolErr(EmptyPoolError::NoEligibleCandidates(_))
    ));
    assert_eq!(err.kind(), ErrorKind::EmptyPool);
    assert_eq!(ledger.lookup(4).await, 10);
    assert_eq!(
        test.read_ledger().await?,
        Some(serde_json::json!({ "4": 10 }))
    );

    Ok(())
}

/// Tests that a second draw waits until the first session ends.
///
/// Expected: the second start only completes after the first session is dropped
#[tokio::test]
async fn draws_are_serialized() -> Result<(), TestError> {
    let test = TestBuilder::new().with_entries(&[(1, 3)]).build().await?;
    let (engine, _) = engine(&test).await;
    let directory = directory();

    let first = engine.start(&directory, "Sorteo").await.unwrap();

    let waiting = tokio::time::timeout(
        std::time::Duration::from_millis(50),
        engine.start(&directory, "Sorteo"),
    )
    .await;
    assert!(waiting.is_err(), "second draw started while first was open");

    drop(first);

    let second = tokio::time::timeout(
        std::time::Duration::from_secs(1),
        engine.start(&directory, "Sorteo"),
    )
    .await;
    assert!(matches!(second, Ok(Ok(_))));

    Ok(())
}
