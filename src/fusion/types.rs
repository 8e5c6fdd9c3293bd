//! Fusion staging and outcome types.

use crate::catalog::{Character, Rarity};
use crate::collection::EntryId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Copies staged for fusion, per rarity tier, in staging order.
///
/// The same entry may appear several times when it stacks more than one
/// copy. Mythic is never stageable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FusionSelection {
    pub(super) staged: BTreeMap<Rarity, Vec<EntryId>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FusionOutcome {
    pub rarity: Rarity,
    pub success: bool,
    /// Success chance in whole percent.
    pub chance: u32,
    /// The new card and its entry on success.
    pub result: Option<(EntryId, Character)>,
    /// Staged handles consumed, in staging order.
    pub consumed: Vec<EntryId>,
    /// Handles given back on failure.
    pub returned: Vec<EntryId>,
}

impl FusionOutcome {
    /// Net change in total cards owned.
    pub fn net_cards(&self) -> i64 {
        let added = if self.success { 1 } else { self.returned.len() as i64 };
        added - self.consumed.len() as i64
    }
}
