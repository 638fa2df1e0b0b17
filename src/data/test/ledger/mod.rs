use crate::{data::ledger::LedgerStore, error::ErrorKind};
use test_utils::{builder::TestBuilder, error::TestError};

mod delete;
mod load;
mod save;
