use super::types::*;
use crate::catalog::{Catalog, Character, Rarity};
use crate::collection::{sell_payout, Collection, CollectionStats, EntryId};
use crate::config::GameConfig;
use crate::core::clock::Clock;
use crate::core::constants::SAVE_FORMAT_VERSION;
use crate::economy::{Economy, FountainState, GemState};
use crate::error::{GachaError, GachaResult};
use crate::fusion::{self, FusionOutcome, FusionSelection};
use crate::pity::{PityProgress, PityTracker};
use crate::presenter::{Cue, Presenter};
use crate::pull::{draw_batch, pull_cost, PullCount, PullOutcome};
use crate::rates::{edition_bonuses, effective_rates, milestone_bonuses, ActiveEffects, RateTable};
use crate::save::SaveData;
use crate::stats::LifetimeStats;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;
use tracing::{debug, info};

/// One player's game: every mutation goes through here, one call at a time.
pub struct GameSession {
    catalog: Arc<Catalog>,
    base_rates: RateTable,
    username: String,
    collection: Collection,
    economy: Economy,
    pity: PityTracker,
    lifetime: LifetimeStats,
    selection: FusionSelection,
    phase: SessionPhase,
    rng: ChaCha8Rng,
    clock: Box<dyn Clock>,
    presenter: Box<dyn Presenter>,
}

fn session_rng(config: &GameConfig) -> ChaCha8Rng {
    match config.rng_seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}

impl GameSession {
    /// Fresh session with the configured starting balance.
    pub fn new(config: &GameConfig, clock: Box<dyn Clock>, presenter: Box<dyn Presenter>) -> Self {
        let mut rng = session_rng(config);
        let username = config
            .username
            .clone()
            .unwrap_or_else(|| format!("Player{}", rng.gen_range(0..1000)));
        let now = clock.now_ms();
        Self {
            catalog: Catalog::for_seed(config.catalog_seed),
            base_rates: config.base_rates,
            username,
            collection: Collection::new(),
            economy: Economy::new(config.starting_gems, now),
            pity: PityTracker::new(),
            lifetime: LifetimeStats::new(),
            selection: FusionSelection::new(),
            phase: SessionPhase::Idle,
            rng,
            clock,
            presenter,
        }
    }

    /// Resume from a save. The passive timer restarts from now, so time spent
    /// closed earns nothing; the fountain keeps filling from its last
    /// collection.
    pub fn restore(
        config: &GameConfig,
        data: SaveData,
        clock: Box<dyn Clock>,
        presenter: Box<dyn Presenter>,
    ) -> Self {
        let now = clock.now_ms();
        let mut economy = data.economy;
        economy.resume_at(now);
        economy.refresh_fountain(now);
        info!(
            username = %data.username,
            entries = data.collection.len(),
            gems = economy.gems,
            "session restored"
        );
        Self {
            catalog: Catalog::for_seed(data.catalog_seed),
            base_rates: config.base_rates,
            username: data.username,
            collection: data.collection,
            economy,
            pity: data.pity,
            lifetime: data.lifetime,
            selection: FusionSelection::new(),
            phase: SessionPhase::Idle,
            rng: session_rng(config),
            clock,
            presenter,
        }
    }

    pub fn to_save_data(&self) -> SaveData {
        SaveData {
            version: SAVE_FORMAT_VERSION,
            catalog_seed: self.catalog.seed(),
            username: self.username.clone(),
            collection: self.collection.clone(),
            economy: self.economy.clone(),
            pity: self.pity,
            lifetime: self.lifetime.clone(),
            saved_at: self.clock.now_ms(),
        }
    }

    // ========================================================================
    // Pulls and drawn-card decisions
    // ========================================================================

    /// Charge for and draw `count` cards. The batch then waits for a
    /// save/sell decision per card; no other pull is accepted until it is
    /// resolved or dismissed.
    pub fn pull(&mut self, count: PullCount) -> GachaResult<PullOutcome> {
        if !self.phase.is_idle() {
            return Err(GachaError::OperationInProgress);
        }
        let effects = self.active_effects();
        let cost = pull_cost(count, effects.pull_discount);
        self.economy.spend(cost)?;

        self.phase = SessionPhase::Drawing;
        self.presenter.play_cue(Cue::Pull);
        let rates = effective_rates(&self.base_rates, effects.luck_boost);
        let characters = draw_batch(
            &self.catalog,
            &rates,
            &mut self.pity,
            &mut self.lifetime,
            count,
            &mut self.rng,
        );

        for character in &characters {
            self.presenter.log_pull(character, &self.username);
        }
        if let Some(best) = characters.iter().map(|c| c.rarity).max() {
            self.presenter.play_cue(Cue::for_rarity(best));
        }

        info!(
            times = count.times(),
            cost,
            gems = self.economy.gems,
            best = ?characters.iter().map(|c| c.rarity).max(),
            "pull"
        );

        self.phase = if characters.is_empty() {
            SessionPhase::Idle
        } else {
            SessionPhase::AwaitingDecision {
                batch: characters.clone(),
                index: 0,
            }
        };

        Ok(PullOutcome {
            characters,
            cost_charged: cost,
        })
    }

    pub fn pending_draw(&self) -> Option<PendingDraw> {
        match &self.phase {
            SessionPhase::AwaitingDecision { batch, index } => {
                batch.get(*index).map(|character| PendingDraw {
                    character: character.clone(),
                    position: *index,
                    batch_size: batch.len(),
                })
            }
            _ => None,
        }
    }

    /// Take the card on show and move to the next one, or back to idle.
    fn take_drawn(&mut self) -> GachaResult<Character> {
        let SessionPhase::AwaitingDecision { batch, index } = &mut self.phase else {
            return Err(GachaError::NoPendingDraw);
        };
        let character = batch.get(*index).cloned().ok_or(GachaError::NoPendingDraw)?;
        *index += 1;
        if *index >= batch.len() {
            self.phase = SessionPhase::Idle;
        }
        Ok(character)
    }

    pub fn save_drawn(&mut self) -> GachaResult<EntryId> {
        let character = self.take_drawn()?;
        let entry = self.collection.save(character);
        self.presenter.play_cue(Cue::Save);
        Ok(entry)
    }

    /// Sell the card on show straight away. It never enters the collection.
    pub fn sell_drawn(&mut self) -> GachaResult<u64> {
        let sell_boost = self.active_effects().sell_boost;
        let character = self.take_drawn()?;
        let payout = sell_payout(character.rarity, 1, sell_boost);
        self.economy.credit(payout);
        self.lifetime.record_sale(payout, 1);
        self.presenter.play_cue(Cue::Sell);
        debug!(character = %character.name, payout, "sold drawn card");
        Ok(payout)
    }

    /// Save every card still waiting, in batch order.
    pub fn save_all_drawn(&mut self) -> GachaResult<Vec<EntryId>> {
        let remaining = self.phase.remaining().to_vec();
        if remaining.is_empty() {
            return Err(GachaError::NoPendingDraw);
        }
        let entries = remaining
            .into_iter()
            .map(|character| self.collection.save(character))
            .collect();
        self.phase = SessionPhase::Idle;
        self.presenter.play_cue(Cue::Save);
        Ok(entries)
    }

    /// Close the result view. Undecided cards are discarded. Returns how many.
    pub fn dismiss_drawn(&mut self) -> GachaResult<usize> {
        let discarded = self.phase.remaining().len();
        if discarded == 0 {
            return Err(GachaError::NoPendingDraw);
        }
        self.phase = SessionPhase::Idle;
        debug!(discarded, "dismissed drawn cards");
        Ok(discarded)
    }

    // ========================================================================
    // Collection
    // ========================================================================

    pub fn sell(&mut self, entry: EntryId, amount: u32) -> GachaResult<u64> {
        let sell_boost = self.active_effects().sell_boost;
        let payout = self.collection.sell(entry, amount, sell_boost)?;
        self.economy.credit(payout);
        self.lifetime.record_sale(payout, amount);
        self.selection.trim_to_owned(&self.collection);
        self.presenter.play_cue(Cue::Sell);
        debug!(%entry, amount, payout, "sold");
        Ok(payout)
    }

    /// Locking an entry also withdraws its staged copies from fusion.
    pub fn toggle_lock(&mut self, entry: EntryId) -> GachaResult<bool> {
        let locked = self.collection.toggle_lock(entry)?;
        if locked {
            self.selection.trim_to_owned(&self.collection);
        }
        Ok(locked)
    }

    // ========================================================================
    // Fusion
    // ========================================================================

    pub fn stage_for_fusion(&mut self, entry: EntryId) -> GachaResult<usize> {
        self.selection.stage(&self.collection, entry)
    }

    pub fn unstage_for_fusion(&mut self, rarity: Rarity, index: usize) -> GachaResult<EntryId> {
        self.selection.unstage(rarity, index)
    }

    pub fn staged(&self, rarity: Rarity) -> &[EntryId] {
        self.selection.staged(rarity)
    }

    /// Success chance the staged batch would have right now, if it is full.
    pub fn fusion_chance(&self, rarity: Rarity) -> Option<u32> {
        let ids: Vec<_> = self
            .selection
            .staged(rarity)
            .iter()
            .filter_map(|entry| self.collection.get(*entry).map(|e| e.character.id))
            .collect();
        (ids.len() == crate::core::constants::FUSION_BATCH_SIZE).then(|| fusion::success_chance(&ids))
    }

    pub fn attempt_fusion(&mut self, rarity: Rarity) -> GachaResult<FusionOutcome> {
        let outcome = fusion::attempt_fusion(
            &mut self.collection,
            &mut self.selection,
            rarity,
            &self.catalog,
            &mut self.rng,
        )?;
        self.selection.trim_to_owned(&self.collection);
        self.presenter.play_cue(if outcome.success {
            Cue::Legendary
        } else {
            Cue::Sell
        });
        info!(
            rarity = rarity.name(),
            chance = outcome.chance,
            success = outcome.success,
            result = ?outcome.result.as_ref().map(|(_, c)| c.name.as_str()),
            returned = outcome.returned.len(),
            "fusion"
        );
        Ok(outcome)
    }

    // ========================================================================
    // Timers
    // ========================================================================

    /// Advance the passive timer and fountain to `now_ms`. Returns passive
    /// gems credited.
    pub fn tick(&mut self, now_ms: i64) -> u64 {
        let effects = self.active_effects();
        let credited = self.economy.advance(now_ms, &effects);
        if credited > 0 {
            debug!(credited, gems = self.economy.gems, "passive income");
        }
        credited
    }

    pub fn tick_now(&mut self) -> u64 {
        let now = self.clock.now_ms();
        self.tick(now)
    }

    pub fn collect_fountain(&mut self) -> GachaResult<u64> {
        let now = self.clock.now_ms();
        let reward = self.economy.collect_fountain(now)?;
        self.presenter.play_cue(Cue::Save);
        info!(reward, gems = self.economy.gems, "fountain collected");
        Ok(reward)
    }

    // ========================================================================
    // Read-only snapshots
    // ========================================================================

    /// Character effects plus collection milestones plus edition bonuses.
    pub fn active_effects(&self) -> ActiveEffects {
        let stats = self.collection.stats(&self.catalog);
        let mut effects = ActiveEffects::from_effects(self.collection.effects());
        effects.merge(&milestone_bonuses(
            stats.unique_characters,
            stats.catalog_size,
        ));
        effects.merge(&edition_bonuses(
            stats
                .by_edition
                .iter()
                .map(|p| (p.edition, p.unique, p.max)),
        ));
        effects
    }

    /// Normalized rates the next pull would use before any pity floor.
    pub fn current_rates(&self) -> RateTable {
        effective_rates(&self.base_rates, self.active_effects().luck_boost)
    }

    pub fn collection_stats(&self) -> CollectionStats {
        self.collection.stats(&self.catalog)
    }

    pub fn lifetime_stats(&self) -> &LifetimeStats {
        &self.lifetime
    }

    pub fn pity_progress(&self) -> PityProgress {
        self.pity.progress()
    }

    pub fn fountain_state(&self) -> FountainState {
        self.economy.fountain_state(self.clock.now_ms())
    }

    pub fn gem_state(&self) -> GemState {
        self.economy.gem_state()
    }

    pub fn gems(&self) -> u64 {
        self.economy.gems
    }

    pub fn phase(&self) -> &SessionPhase {
        &self.phase
    }

    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    pub fn selection(&self) -> &FusionSelection {
        &self.selection
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}
