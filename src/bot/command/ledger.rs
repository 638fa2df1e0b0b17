use crate::{
    bot::{command::CommandContext, render},
    error::AppError,
    model::directory::MemberDirectory,
};

/// Adds `count` entries to the member matching `name`.
pub async fn register(cx: &CommandContext<'_>, name: &str, count: i64) -> Result<(), AppError> {
    let user_id = cx.state.resolver.resolve(name, &cx.directory)?;
    let total = cx.state.ledger.add(user_id, count).await?;
    let member_name = cx.directory.display_name(user_id).unwrap_or(name);

    tracing::info!(
        "Registered {} entries for {} ({}), now {}",
        count,
        member_name,
        user_id,
        total
    );

    cx.say(render::registered(member_name, count, total)).await?;

    Ok(())
}

/// Removes `count` entries from the member matching `name`.
pub async fn remove_entries(
    cx: &CommandContext<'_>,
    name: &str,
    count: i64,
) -> Result<(), AppError> {
    let user_id = cx.state.resolver.resolve(name, &cx.directory)?;
    let remaining = cx.state.ledger.remove(user_id, count).await?;
    let member_name = cx.directory.display_name(user_id).unwrap_or(name);

    tracing::info!(
        "Removed {} entries from {} ({}), {} left",
        count,
        member_name,
        user_id,
        remaining
    );

    cx.say(render::removed(member_name, count, remaining)).await?;

    Ok(())
}

pub async fn clear_all(cx: &CommandContext<'_>) -> Result<(), AppError> {
    cx.state.ledger.clear_all().await?;

    cx.say(render::cleared()).await?;

    Ok(())
}

pub async fn my_entries(cx: &CommandContext<'_>) -> Result<(), AppError> {
    let count = cx.state.ledger.lookup(cx.message.author.id.get()).await;

    cx.say(render::my_entries(count)).await?;

    Ok(())
}

pub async fn list_participants(cx: &CommandContext<'_>) -> Result<(), AppError> {
    let listing = cx.state.ledger.list_all(&cx.directory).await;

    cx.say_all(render::participants(&listing)).await
}
