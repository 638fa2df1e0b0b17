use super::*;

/// Tests the commit invariant after a full draw.
///
/// Expected: the winner is absent from the ledger and every other count is unchanged
#[tokio::test]
async fn winner_removed_others_unchanged() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_entries(&[(1, 3), (2, 1), (4, 10)])
        .build()
        .await?;
    let (engine, ledger) = engine(&test).await;
    let mut rng = StdRng::seed_from_u64(99);

    let session = engine.start(&directory(), "Sorteo").await.unwrap();
    let winner = session.pick(&mut rng).user_id;
    let outcome = engine.commit(session, winner).await.unwrap();

    assert_eq!(outcome.winner.user_id, winner);
    assert_eq!(ledger.lookup(winner).await, 0);

    let before = [(1u64, 3u32), (2, 1), (4, 10)];
    for (user_id, entries) in before.into_iter().filter(|(id, _)| *id != winner) {
        assert_eq!(ledger.lookup(user_id).await, entries);
    }

    Ok(())
}

/// Tests the whole holding is removed, not a single entry.
///
/// Expected: removed equals the holding and the file no longer lists the winner
#[tokio::test]
async fn removes_entire_holding() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_entries(&[(1, 5), (4, 2)])
        .build()
        .await?;
    let (engine, _) = engine(&test).await;

    let session = engine.start(&directory(), "Sorteo").await.unwrap();
    let outcome = engine.commit(session, 1).await.unwrap();

    assert_eq!(outcome.removed, 5);
    assert_eq!(
        test.read_ledger().await?,
        Some(serde_json::json!({ "4": 2 }))
    );

    Ok(())
}

/// Tests entries granted between validation and commit are removed too.
///
/// Expected: removed reflects the holding at commit time
#[tokio::test]
async fn removes_holding_at_commit_time() -> Result<(), TestError> {
    let test = TestBuilder::new().with_entries(&[(1, 2)]).build().await?;
    let (engine, ledger) = engine(&test).await;

    let session = engine.start(&directory(), "Sorteo").await.unwrap();
    ledger.add(1, 3).await.unwrap();
    let outcome = engine.commit(session, 1).await.unwrap();

    assert_eq!(outcome.removed, 5);
    assert_eq!(ledger.lookup(1).await, 0);

    Ok(())
}

/// Tests committing an id that was never a candidate.
///
/// Expected: Internal error and ledger unchanged
#[tokio::test]
async fn foreign_winner_is_rejected() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_entries(&[(1, 2), (4, 1)])
        .build()
        .await?;
    let (engine, ledger) = engine(&test).await;

    let session = engine.start(&directory(), "Sorteo").await.unwrap();
    let err = engine.commit(session, 4).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Internal);
    assert_eq!(ledger.lookup(1).await, 2);
    assert_eq!(ledger.lookup(4).await, 1);

    Ok(())
}

/// Tests the draw guard is released after commit.
///
/// Expected: a new draw can start immediately
#[tokio::test]
async fn commit_releases_draw_guard() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_entries(&[(1, 2), (2, 1)])
        .build()
        .await?;
    let (engine, _) = engine(&test).await;

    let session = engine.start(&directory(), "Sorteo").await.unwrap();
    engine.commit(session, 1).await.unwrap();

    let next = tokio::time::timeout(
        std::time::Duration::from_secs(1),
        engine.start(&directory(), "Sorteo"),
    )
    .await;
    assert!(matches!(next, Ok(Ok(_))));

    Ok(())
}
