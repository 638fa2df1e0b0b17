//! Draw engine: candidate pool validation, weighted selection, reveal and commit.
//!
//! A draw runs through `Validating → Revealing → Committing → Done`. `DrawEngine::start`
//! performs validation and hands back a `DrawSession` holding the candidate pool; the
//! caller pulls `SpinFrame`s from `DrawSession::reveal` and renders them at its own pace,
//! draws the winner with `DrawSession::pick`, and finally passes the session to
//! `DrawEngine::commit` which removes the winner from the ledger.
//!
//! `DrawEngine::run` drives that whole cycle against a `DrawAnnouncer`. The status message
//! and the winner announcement must be delivered before the commit; a failure there ends
//! the draw with the ledger untouched. Spin frames and post-commit messages are
//! best-effort.
//!
//! Only one draw runs at a time. The session holds the engine's draw guard until it is
//! committed or dropped, so a second draw waits for the first instead of racing it. The
//! ledger write guard is only taken inside `commit`, never across the reveal.

use std::{fmt, sync::Arc, time::Duration};

use rand::Rng;
use serenity::async_trait;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::{
    error::{draw::EmptyPoolError, AppError},
    model::{
        directory::MemberDirectory,
        draw::{Candidate, DrawOutcome, DrawPhase, SpinFrame},
        ledger::UserId,
    },
    service::{ledger::LedgerService, room::occupied_room},
};

/// Reveal frames shown before the winner by default.
pub const DEFAULT_SPIN_STEPS: usize = 5;
/// Default pause between reveal frames, in milliseconds.
pub const DEFAULT_SPIN_DELAY_MS: u64 = 200;

/// Where a running draw reports its progress.
///
/// Implemented over a Discord channel by the bot. `started` and `winner` gate the commit;
/// errors from `spin` and `committed` are logged and ignored.
#[async_trait]
pub trait DrawAnnouncer: Send {
    /// Publishes the initial status for a validated draw.
    async fn started(&mut self, session: &DrawSession) -> Result<(), AppError>;

    /// Shows one reveal frame.
    async fn spin(
        &mut self,
        session: &DrawSession,
        frame: &SpinFrame<'_>,
    ) -> Result<(), AppError>;

    /// Announces the drawn winner before their entries are removed.
    async fn winner(
        &mut self,
        session: &DrawSession,
        winner: &Candidate,
    ) -> Result<(), AppError>;

    /// Reports the committed outcome.
    async fn committed(&mut self, outcome: &DrawOutcome) -> Result<(), AppError>;
}

/// Candidate pool for one draw invocation.
pub struct DrawSession {
    room: String,
    candidates: Vec<Candidate>,
    /// Running ticket totals; `cumulative[i]` is one past the last ticket of candidate `i`.
    cumulative: Vec<u64>,
    _guard: Option<OwnedMutexGuard<()>>,
}

impl DrawSession {
    /// Builds a session from an explicit candidate pool.
    ///
    /// Candidates holding zero entries are dropped.
    ///
    /// # Returns
    /// - `Ok(DrawSession)` - At least one candidate holds entries
    /// - `Err(AppError::EmptyPoolErr)` - No candidate holds entries
    pub fn new(room: impl Into<String>, candidates: Vec<Candidate>) -> Result<Self, AppError> {
        let room = room.into();
        let candidates: Vec<Candidate> = candidates
            .into_iter()
            .filter(|candidate| candidate.entries > 0)
            .collect();

        if candidates.is_empty() {
            return Err(EmptyPoolError::NoEligibleCandidates(room).into());
        }

        let cumulative = candidates
            .iter()
            .scan(0u64, |running, candidate| {
                *running += u64::from(candidate.entries);
                Some(*running)
            })
            .collect();

        Ok(Self {
            room,
            candidates,
            cumulative,
            _guard: None,
        })
    }

    pub fn room(&self) -> &str {
        &self.room
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Total tickets in the pool.
    pub fn total(&self) -> u64 {
        self.cumulative.last().copied().unwrap_or(0)
    }

    /// Share of the pool held by `candidate`, in percent.
    pub fn percentage(&self, candidate: &Candidate) -> f64 {
        f64::from(candidate.entries) / self.total() as f64 * 100.0
    }

    /// Draws one candidate with probability `entries / total`.
    ///
    /// Samples a ticket uniformly from `[0, total)` and returns the candidate owning it.
    pub fn pick<R>(&self, rng: &mut R) -> &Candidate
    where
        R: Rng + ?Sized,
    {
        let ticket = rng.random_range(0..self.total());
        let index = self.cumulative.partition_point(|&upper| upper <= ticket);

        &self.candidates[index]
    }

    /// Lazily yields `steps` independently sampled reveal frames.
    ///
    /// Calling it again starts a fresh sequence; frames never affect the final pick.
    pub fn reveal<R>(&self, rng: R, steps: usize) -> Reveal<'_, R>
    where
        R: Rng,
    {
        tracing::debug!(phase = ?DrawPhase::Revealing, "Revealing {} frames", steps);

        Reveal {
            session: self,
            rng,
            step: 0,
            steps,
        }
    }
}

impl fmt::Debug for DrawSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DrawSession")
            .field("room", &self.room)
            .field("candidates", &self.candidates)
            .field("total", &self.total())
            .finish_non_exhaustive()
    }
}

/// Iterator over the spin frames of a reveal.
pub struct Reveal<'s, R> {
    session: &'s DrawSession,
    rng: R,
    step: usize,
    steps: usize,
}

impl<'s, R> Iterator for Reveal<'s, R>
where
    R: Rng,
{
    type Item = SpinFrame<'s>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.step >= self.steps {
            return None;
        }

        let frame = SpinFrame {
            step: self.step,
            highlighted: self.session.pick(&mut self.rng),
        };
        self.step += 1;

        Some(frame)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.steps - self.step;
        (remaining, Some(remaining))
    }
}

impl<R> ExactSizeIterator for Reveal<'_, R> where R: Rng {}

#[derive(Clone)]
pub struct DrawEngine {
    ledger: LedgerService,
    in_progress: Arc<Mutex<()>>,
    spin_steps: usize,
    spin_delay: Duration,
}

impl DrawEngine {
    pub fn new(ledger: LedgerService) -> Self {
        Self {
            ledger,
            in_progress: Arc::new(Mutex::new(())),
            spin_steps: DEFAULT_SPIN_STEPS,
            spin_delay: Duration::from_millis(DEFAULT_SPIN_DELAY_MS),
        }
    }

    /// Sets the number of reveal frames and the pause after each one.
    pub fn with_reveal(mut self, steps: usize, delay: Duration) -> Self {
        self.spin_steps = steps;
        self.spin_delay = delay;
        self
    }

    /// Runs a complete draw in `room_name`, reporting each stage to `announcer`.
    ///
    /// The winner is drawn independently of the reveal frames. The ledger is only touched
    /// after `announcer` has accepted the winner announcement.
    ///
    /// # Arguments
    /// - `directory` - Guild directory with room membership
    /// - `room_name` - Voice room to draw in
    /// - `announcer` - Receives the status, frames, winner and outcome
    /// - `rng` - Randomness for the frames and the final pick
    ///
    /// # Returns
    /// - `Ok(DrawOutcome)` - The winner was removed from the ledger
    /// - `Err(AppError)` - Validation failed, the status or winner could not be announced,
    ///   or the commit failed; in every case the ledger is unchanged
    pub async fn run<D, A, R>(
        &self,
        directory: &D,
        room_name: &str,
        announcer: &mut A,
        rng: &mut R,
    ) -> Result<DrawOutcome, AppError>
    where
        D: MemberDirectory + ?Sized,
        A: DrawAnnouncer + ?Sized,
        R: Rng + ?Sized,
    {
        let session = self.start(directory, room_name).await?;

        tracing::info!(
            "Starting draw in '{}' with {} candidates and {} entries",
            session.room(),
            session.candidates().len(),
            session.total()
        );

        announcer.started(&session).await?;

        for frame in session.reveal(&mut *rng, self.spin_steps) {
            if let Err(e) = announcer.spin(&session, &frame).await {
                tracing::warn!("Skipped spin frame {}: {}", frame.step, e);
            }
            tokio::time::sleep(self.spin_delay).await;
        }

        let winner = session.pick(&mut *rng).clone();
        if let Err(e) = announcer.winner(&session, &winner).await {
            tracing::warn!(
                phase = ?DrawPhase::Failed,
                "Draw in '{}' stopped before commit: {}",
                session.room(),
                e
            );
            return Err(e);
        }

        let outcome = self.commit(session, winner.user_id).await?;

        if let Err(e) = announcer.committed(&outcome).await {
            tracing::warn!("Failed to report committed draw: {}", e);
        }

        Ok(outcome)
    }

    /// Validates a draw in `room_name` and returns its candidate pool.
    ///
    /// Waits for any running draw to finish first, then reads a ledger snapshot so the pool
    /// reflects every mutation committed before this draw. Nothing is mutated here.
    ///
    /// # Arguments
    /// - `directory` - Guild directory with room membership
    /// - `room_name` - Voice room to draw in, compared case-insensitively
    ///
    /// # Returns
    /// - `Ok(DrawSession)` - Pool of room occupants holding entries, in directory order
    /// - `Err(AppError::NotFoundErr)` - The room does not exist
    /// - `Err(AppError::EmptyPoolErr)` - The room is empty or nobody in it holds entries
    pub async fn start<D>(&self, directory: &D, room_name: &str) -> Result<DrawSession, AppError>
    where
        D: MemberDirectory + ?Sized,
    {
        let guard = self.in_progress.clone().lock_owned().await;

        tracing::debug!(
            from = ?DrawPhase::Idle,
            phase = ?DrawPhase::Validating,
            "Validating draw in '{}'",
            room_name
        );

        let result = self.validate(directory, room_name).await;
        match result {
            Ok(mut session) => {
                session._guard = Some(guard);
                Ok(session)
            }
            Err(e) => {
                tracing::debug!(phase = ?DrawPhase::Failed, "Draw rejected: {}", e);
                Err(e)
            }
        }
    }

    async fn validate<D>(&self, directory: &D, room_name: &str) -> Result<DrawSession, AppError>
    where
        D: MemberDirectory + ?Sized,
    {
        let (room, occupants) = occupied_room(directory, room_name)?;
        let ledger = self.ledger.snapshot().await;

        let candidates = occupants
            .into_iter()
            .filter_map(|member| {
                let entries = ledger.lookup(member.id);
                (entries > 0).then(|| Candidate {
                    user_id: member.id,
                    name: member.display_name().to_string(),
                    entries,
                })
            })
            .collect();

        DrawSession::new(room.name.clone(), candidates)
    }

    /// Removes the winner's entire holding and ends the session.
    ///
    /// # Arguments
    /// - `session` - Session the winner was drawn from, consumed to release the draw guard
    /// - `winner` - Id of the drawn candidate
    ///
    /// # Returns
    /// - `Ok(DrawOutcome)` - The winner and the entries removed
    /// - `Err(AppError::InternalError)` - `winner` is not a candidate of this session
    /// - `Err(AppError)` - Persisting failed; the ledger is unchanged
    pub async fn commit(
        &self,
        session: DrawSession,
        winner: UserId,
    ) -> Result<DrawOutcome, AppError> {
        let candidate = session
            .candidates
            .iter()
            .find(|candidate| candidate.user_id == winner)
            .cloned()
            .ok_or_else(|| {
                AppError::InternalError(format!(
                    "Winner {} is not a candidate of the draw in '{}'",
                    winner, session.room
                ))
            })?;

        tracing::debug!(phase = ?DrawPhase::Committing, "Committing winner {}", winner);

        let removed = self.ledger.remove_all(winner).await?;
        if removed == 0 {
            tracing::warn!(
                "Winner {} no longer held entries at commit time",
                winner
            );
        }

        tracing::info!(
            phase = ?DrawPhase::Done,
            "Draw in '{}' won by {} ({}), {} entries removed",
            session.room,
            candidate.name,
            winner,
            removed
        );

        Ok(DrawOutcome {
            winner: candidate,
            removed,
        })
    }
}
