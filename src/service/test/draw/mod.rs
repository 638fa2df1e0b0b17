use rand::{rngs::StdRng, SeedableRng};

use crate::{
    data::ledger::LedgerStore,
    error::{draw::EmptyPoolError, AppError, ErrorKind},
    model::{
        directory::{DirectoryMember, GuildDirectory, Room},
        draw::Candidate,
    },
    service::{
        draw::{DrawEngine, DrawSession},
        ledger::LedgerService,
    },
};
use test_utils::{builder::TestBuilder, context::TestContext, error::TestError};

mod commit;
mod start;

const DRAW_ROOM: u64 = 10;
const OTHER_ROOM: u64 = 20;

fn candidate(user_id: u64, name: &str, entries: u32) -> Candidate {
    Candidate {
        user_id,
        name: name.to_string(),
        entries,
    }
}

/// Directory with ana (1), bob (2) and a bot (3) in the draw room, carla (4) elsewhere.
fn directory() -> GuildDirectory {
    GuildDirectory::new(
        vec![
            DirectoryMember::new(1, "ana").in_room(DRAW_ROOM),
            DirectoryMember::new(2, "bob").in_room(DRAW_ROOM),
            DirectoryMember::new(3, "rafflebot").as_bot().in_room(DRAW_ROOM),
            DirectoryMember::new(4, "carla").in_room(OTHER_ROOM),
        ],
        vec![
            Room::new(DRAW_ROOM, "Sorteo"),
            Room::new(OTHER_ROOM, "Evento"),
            Room::new(30, "Vacío"),
        ],
    )
}

async fn engine(test: &TestContext) -> (DrawEngine, LedgerService) {
    let ledger = LedgerService::open(LedgerStore::new(test.ledger_path()))
        .await
        .unwrap();
    (DrawEngine::new(ledger.clone()), ledger)
}
