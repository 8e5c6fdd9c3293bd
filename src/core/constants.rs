// Starting balance and pricing
pub const STARTING_GEMS: u64 = 8000;
pub const PULL_PRICE: u64 = 100;
pub const MULTI_PULL_SIZE: u32 = 10;

// Base pull weights (need not sum to 100; normalized at draw time)
pub const BASE_RATE_COMMON: f64 = 70.0;
pub const BASE_RATE_RARE: f64 = 20.0;
pub const BASE_RATE_SUPER_RARE: f64 = 8.0;
pub const BASE_RATE_ULTRA_RARE: f64 = 1.5;
pub const BASE_RATE_LEGENDARY: f64 = 0.4;
pub const BASE_RATE_MYTHIC: f64 = 0.1;

// Luck boost shifts weight out of common and into the upper tiers
pub const COMMON_RATE_FLOOR: f64 = 50.0;
pub const LUCK_COMMON_FACTOR: f64 = 0.5;
pub const LUCK_SUPER_RARE_FACTOR: f64 = 0.2;
pub const LUCK_ULTRA_RARE_FACTOR: f64 = 0.15;
pub const LUCK_LEGENDARY_FACTOR: f64 = 0.1;
pub const LUCK_MYTHIC_FACTOR: f64 = 0.05;

// Pity thresholds (pulls without the tier before the floor kicks in)
pub const PITY_SUPER_RARE_THRESHOLD: u32 = 11;
pub const PITY_ULTRA_RARE_THRESHOLD: u32 = 79;

// Sell values per rarity tier
pub const SELL_VALUE_COMMON: u64 = 30;
pub const SELL_VALUE_RARE: u64 = 80;
pub const SELL_VALUE_SUPER_RARE: u64 = 200;
pub const SELL_VALUE_ULTRA_RARE: u64 = 500;
pub const SELL_VALUE_LEGENDARY: u64 = 1000;
pub const SELL_VALUE_MYTHIC: u64 = 2500;

// Passive income
pub const PASSIVE_GEM_REWARD: u64 = 50;
pub const PASSIVE_GEM_PERIOD_SECONDS: f64 = 60.0;
pub const TICK_INTERVAL_MS: i64 = 1000;

// Fountain: reward(m) = a * e^(b*m), pinned at reward(1) = 10 and reward(25) = 1000
pub const FOUNTAIN_MAX_MINUTES: f64 = 25.0;
pub const FOUNTAIN_MIN_MINUTES: f64 = 1.0;
pub const FOUNTAIN_REWARD_CAP: u64 = 1000;
pub const FOUNTAIN_REWARD_AT_ONE_MINUTE: f64 = 10.0;
pub const FOUNTAIN_GROWTH_SPAN_MINUTES: f64 = 24.0;
pub const FOUNTAIN_GROWTH_RATIO: f64 = 100.0;

// Catalog
pub const CATALOG_TARGET_SIZE: usize = 142;
pub const DEFAULT_CATALOG_SEED: u64 = 0x5A4E_5249_4F00_0142;
pub const PADDING_EFFECT_CHANCE: f64 = 0.3;
pub const PADDING_EFFECT_MAX_VALUE: u32 = 10;

// Fusion
pub const FUSION_BATCH_SIZE: usize = 10;
pub const FUSION_BASE_CHANCE: f64 = 50.0;
pub const FUSION_SIMILARITY_SPAN: f64 = 50.0;
pub const FUSION_FAILURE_RETURN_COUNT: usize = FUSION_BATCH_SIZE / 2;

// Collection milestones (share of the full catalog owned, as unique entries)
pub const MILESTONE_GEM_BOOST_SHARE: f64 = 0.30;
pub const MILESTONE_GEM_BOOST: f64 = 5.0;
pub const MILESTONE_TIMER_BOOST_SHARE: f64 = 0.75;
pub const MILESTONE_TIMER_BOOST: f64 = 10.0;
pub const MILESTONE_PULL_DISCOUNT_SHARE: f64 = 1.0;
pub const MILESTONE_PULL_DISCOUNT: f64 = 15.0;

// Edition completion breakpoints (percent) and the bonus each grants
pub const EDITION_BREAKPOINTS: [f64; 3] = [30.0, 75.0, 100.0];
pub const EDITION_BONUS_VALUES: [f64; 3] = [5.0, 10.0, 15.0];
pub const ANNIVERSARY_BONUS_VALUES: [f64; 3] = [2.0, 4.0, 6.0];

// Recent pull log
pub const PULL_LOG_CAPACITY: usize = 50;

// Save file
pub const SAVE_VERSION_MAGIC: u64 = 0x4741_4348_4153_4156; // "GACHASAV"
pub const SAVE_FORMAT_VERSION: u32 = 1;
