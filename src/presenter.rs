//! Presentation collaborators: sound cues and the recent-pull log.

use crate::catalog::{Character, Rarity};
use crate::core::constants::PULL_LOG_CAPACITY;
use serde::Serialize;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Sound cues the engine asks the front end to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Cue {
    Pull,
    Reveal,
    Rare,
    SuperRare,
    UltraRare,
    Legendary,
    Mythic,
    Save,
    Sell,
}

impl Cue {
    /// Reveal cue for a drawn card. Commons get the plain reveal.
    pub fn for_rarity(rarity: Rarity) -> Cue {
        match rarity {
            Rarity::Common => Cue::Reveal,
            Rarity::Rare => Cue::Rare,
            Rarity::SuperRare => Cue::SuperRare,
            Rarity::UltraRare => Cue::UltraRare,
            Rarity::Legendary => Cue::Legendary,
            Rarity::Mythic => Cue::Mythic,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Cue::Pull => "pull",
            Cue::Reveal => "reveal",
            Cue::Rare => "rare",
            Cue::SuperRare => "super-rare",
            Cue::UltraRare => "ultra-rare",
            Cue::Legendary => "legendary",
            Cue::Mythic => "mythic",
            Cue::Save => "save",
            Cue::Sell => "sell",
        }
    }
}

/// What the engine calls into on the presentation side.
pub trait Presenter: Send {
    fn play_cue(&mut self, cue: Cue);
    fn log_pull(&mut self, character: &Character, username: &str);
}

/// Discards everything. Used by the simulator and headless tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn play_cue(&mut self, _cue: Cue) {}
    fn log_pull(&mut self, _character: &Character, _username: &str) {}
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PullLogEntry {
    pub character: Character,
    pub username: String,
}

/// Bounded recent-pull feed, newest first.
#[derive(Debug, Clone)]
pub struct PullLog {
    entries: VecDeque<PullLogEntry>,
    capacity: usize,
}

impl Default for PullLog {
    fn default() -> Self {
        Self::new()
    }
}

impl PullLog {
    pub fn new() -> Self {
        Self::with_capacity(PULL_LOG_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, character: &Character, username: &str) {
        self.entries.push_front(PullLogEntry {
            character: character.clone(),
            username: username.to_string(),
        });
        self.entries.truncate(self.capacity);
    }

    pub fn entries(&self) -> impl Iterator<Item = &PullLogEntry> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&PullLogEntry> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Presenter for PullLog {
    fn play_cue(&mut self, _cue: Cue) {}

    fn log_pull(&mut self, character: &Character, username: &str) {
        self.push(character, username);
    }
}

/// Lets a caller keep a handle on a presenter the session owns.
impl<P: Presenter> Presenter for Arc<Mutex<P>> {
    fn play_cue(&mut self, cue: Cue) {
        if let Ok(mut inner) = self.lock() {
            inner.play_cue(cue);
        }
    }

    fn log_pull(&mut self, character: &Character, username: &str) {
        if let Ok(mut inner) = self.lock() {
            inner.log_pull(character, username);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn test_pull_log_newest_first_and_bounded() {
        let catalog = Catalog::shared();
        let mut log = PullLog::with_capacity(3);
        for character in catalog.characters().iter().take(5) {
            log.log_pull(character, "Player7");
        }
        assert_eq!(log.len(), 3);
        assert_eq!(log.latest().unwrap().character, catalog.characters()[4]);
        assert_eq!(log.entries().last().unwrap().character, catalog.characters()[2]);
    }

    #[test]
    fn test_default_capacity() {
        let catalog = Catalog::shared();
        let mut log = PullLog::new();
        for character in catalog.characters().iter().take(60) {
            log.push(character, "p");
        }
        assert_eq!(log.len(), PULL_LOG_CAPACITY);
    }

    #[test]
    fn test_cue_for_rarity() {
        assert_eq!(Cue::for_rarity(Rarity::Common), Cue::Reveal);
        assert_eq!(Cue::for_rarity(Rarity::Mythic), Cue::Mythic);
        assert_eq!(Cue::SuperRare.name(), "super-rare");
    }

    #[test]
    fn test_shared_handle_sees_pushes() {
        let catalog = Catalog::shared();
        let shared = Arc::new(Mutex::new(PullLog::new()));
        let mut handle = Arc::clone(&shared);
        handle.log_pull(&catalog.characters()[0], "a");
        assert_eq!(shared.lock().unwrap().len(), 1);
    }
}
