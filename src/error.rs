//! Rejection reasons for session operations.
//!
//! Every rejected operation leaves the session untouched, so callers can tell
//! "refused" apart from "succeeded with no visible effect".

use crate::catalog::Rarity;
use crate::collection::EntryId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GachaError {
    #[error("Not enough gems: need {needed}, have {available}")]
    InsufficientFunds { needed: u64, available: u64 },

    #[error("A pull is already in progress or awaiting a decision")]
    OperationInProgress,

    #[error("Fusion needs exactly {expected} staged cards, found {found}")]
    InvalidSelectionSize { expected: usize, found: usize },

    #[error("Entry {0} is locked")]
    ItemLocked(EntryId),

    #[error("Nothing to collect yet")]
    NothingToCollect,

    #[error("No drawn character is waiting for a decision")]
    NoPendingDraw,

    #[error("No collection entry {0}")]
    EntryNotFound(EntryId),

    #[error("Cannot sell {requested} of entry {entry}: {owned} owned")]
    InvalidAmount {
        entry: EntryId,
        requested: u32,
        owned: u32,
    },

    #[error("{0} fusion selection is already full")]
    SelectionFull(Rarity),

    #[error("Every owned copy of entry {0} is already staged")]
    SelectionExceedsOwned(EntryId),

    #[error("{0} has no higher tier to fuse into")]
    NoHigherRarity(Rarity),

    #[error("No staged card at {rarity} position {index}")]
    InvalidIndex { rarity: Rarity, index: usize },
}

pub type GachaResult<T> = Result<T, GachaError>;
