use crate::{
    bot::{command::CommandContext, render},
    error::AppError,
    model::directory::MemberDirectory,
};

/// Lists human members who are online, idle or do-not-disturb.
pub async fn active_members(cx: &CommandContext<'_>) -> Result<(), AppError> {
    let active = cx
        .directory
        .members()
        .iter()
        .filter(|member| !member.bot && member.status.is_active());

    cx.say_all(render::active_members(active)).await
}

/// Lists the display name of every guild member.
pub async fn list_members(cx: &CommandContext<'_>) -> Result<(), AppError> {
    cx.say_all(render::member_list(cx.directory.members())).await
}
