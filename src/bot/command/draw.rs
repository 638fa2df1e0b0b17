//! Draw and grant commands.
//!
//! A draw posts a status message, edits it once per reveal frame and announces the winner
//! in the same message. The engine decides what happens when one of those sends fails.

use rand::{rngs::StdRng, SeedableRng};
use serenity::{all::Message, async_trait};

use crate::{
    bot::{command::CommandContext, render},
    error::AppError,
    model::draw::{Candidate, DrawOutcome, SpinFrame},
    service::{
        draw::{DrawAnnouncer, DrawSession},
        room::occupied_room,
    },
};

/// Reports a draw in the channel the command was sent from.
struct ChannelAnnouncer<'c, 'a> {
    cx: &'c CommandContext<'a>,
    status: Option<Message>,
}

impl ChannelAnnouncer<'_, '_> {
    fn status(&self) -> Result<&Message, AppError> {
        self.status
            .as_ref()
            .ok_or_else(|| AppError::InternalError("Draw status message was never posted".into()))
    }
}

#[async_trait]
impl<'c, 'a> DrawAnnouncer for ChannelAnnouncer<'c, 'a> {
    async fn started(&mut self, _session: &DrawSession) -> Result<(), AppError> {
        self.status = Some(self.cx.say(render::draw_started()).await?);

        Ok(())
    }

    async fn spin(
        &mut self,
        session: &DrawSession,
        frame: &SpinFrame<'_>,
    ) -> Result<(), AppError> {
        let status = self.status()?;

        self.cx.edit(status, render::spin(session, frame)).await
    }

    async fn winner(
        &mut self,
        _session: &DrawSession,
        winner: &Candidate,
    ) -> Result<(), AppError> {
        let status = self.status()?;

        self.cx.edit(status, render::winner(winner)).await
    }

    async fn committed(&mut self, outcome: &DrawOutcome) -> Result<(), AppError> {
        let confirmed = self
            .cx
            .say(render::winner_removed(&outcome.winner.name))
            .await
            .map(|_| ());

        let listing = self.cx.state.ledger.list_all(&self.cx.directory).await;
        let listed = self.cx.say_all(render::updated_listing(&listing)).await;

        confirmed.and(listed)
    }
}

pub async fn draw(cx: &CommandContext<'_>) -> Result<(), AppError> {
    let mut announcer = ChannelAnnouncer { cx, status: None };
    let mut rng = StdRng::from_os_rng();

    cx.state
        .draw
        .run(&cx.directory, &cx.state.config.draw_room, &mut announcer, &mut rng)
        .await?;

    Ok(())
}

/// Grants one entry to every human in `room`, or in the configured grant room.
pub async fn grant_room(cx: &CommandContext<'_>, room: Option<&str>) -> Result<(), AppError> {
    let room_name = room.unwrap_or(&cx.state.config.grant_room);
    let (room, occupants) = occupied_room(&cx.directory, room_name)?;

    let granted = cx.state.ledger.grant_room(occupants).await?;

    cx.say(render::granted(&room.name, granted)).await?;

    Ok(())
}
