//! Headless terminal driver: one session, line commands on stdin.

use gacha::build_info;
use gacha::catalog::Rarity;
use gacha::collection::{EntryId, OwnedCharacter};
use gacha::config::GameConfig;
use gacha::core::clock::SystemClock;
use gacha::core::constants::TICK_INTERVAL_MS;
use gacha::presenter::PullLog;
use gacha::pull::PullCount;
use gacha::save::SaveManager;
use gacha::session::GameSession;
use gacha::utils::logging::init_tracing;
use std::io::{self, BufRead, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;
use std::time::Duration;
use tracing::{info, warn};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let mut fresh = false;
    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "--version" | "-v" => {
                println!("{}", build_info::version_string());
                return Ok(());
            }
            "--help" | "-h" => {
                println!("Gacha - collectible character draws in the terminal\n");
                println!("Usage: gacha [--new]\n");
                println!("  --new        Ignore any existing save and start over");
                println!("  --version    Show version");
                println!("\nType 'help' once running for the command list.");
                return Ok(());
            }
            "--new" => fresh = true,
            other => {
                eprintln!("Unknown argument: {}", other);
                std::process::exit(2);
            }
        }
    }

    init_tracing();
    let config = GameConfig::load();
    // Write back so a first run leaves an editable file with every field.
    if let Err(e) = config.save() {
        warn!(error = %e, "could not write config");
    }
    let save_manager = SaveManager::new()?;
    let pull_log = Arc::new(Mutex::new(PullLog::new()));

    let session = if !fresh && save_manager.save_exists() {
        match save_manager.load() {
            Ok(data) => GameSession::restore(
                &config,
                data,
                Box::new(SystemClock),
                Box::new(Arc::clone(&pull_log)),
            ),
            Err(e) => {
                warn!(error = %e, "could not load save, starting fresh");
                GameSession::new(&config, Box::new(SystemClock), Box::new(Arc::clone(&pull_log)))
            }
        }
    } else {
        GameSession::new(&config, Box::new(SystemClock), Box::new(Arc::clone(&pull_log)))
    };
    let session = Arc::new(Mutex::new(session));

    // Passive income and fountain keep running between commands.
    let running = Arc::new(AtomicBool::new(true));
    let ticker = {
        let session = Arc::clone(&session);
        let running = Arc::clone(&running);
        thread::spawn(move || {
            while running.load(Ordering::Relaxed) {
                thread::sleep(Duration::from_millis(TICK_INTERVAL_MS as u64));
                lock(&session).tick_now();
            }
        })
    };

    {
        let s = lock(&session);
        println!("{}", build_info::version_string());
        println!("Welcome, {}. You have {} gems.", s.username(), s.gems());
        println!("Type 'help' for commands.");
    }

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let words: Vec<&str> = line.split_whitespace().collect();
        if words.is_empty() {
            continue;
        }
        if matches!(words[0], "quit" | "exit" | "q") {
            break;
        }
        let mut s = lock(&session);
        run_command(&mut s, &pull_log, &words);
    }

    running.store(false, Ordering::Relaxed);
    if ticker.join().is_err() {
        warn!("ticker thread panicked");
    }

    let data = lock(&session).to_save_data();
    save_manager.save(&data)?;
    info!("session saved on exit");
    println!("Saved. Bye!");
    Ok(())
}

fn parse_entry(word: Option<&&str>) -> Option<EntryId> {
    word.and_then(|w| w.trim_start_matches('#').parse().ok())
        .map(EntryId)
}

fn parse_pull_count(word: Option<&str>) -> Option<PullCount> {
    match word {
        None | Some("1") => Some(PullCount::Single),
        Some("10") => Some(PullCount::Ten),
        _ => None,
    }
}

fn parse_rarity(word: Option<&&str>) -> Option<Rarity> {
    word.and_then(|w| Rarity::from_tag(w))
}

fn print_entry(owned: &OwnedCharacter, staged: usize) {
    println!(
        "  {:>5} x{:<3} {}{}{}",
        owned.entry_id.to_string(),
        owned.count,
        owned.character.display(),
        if owned.is_locked { " [locked]" } else { "" },
        if staged > 0 {
            format!(" [staged {}]", staged)
        } else {
            String::new()
        }
    );
}

fn show_pending(session: &GameSession) {
    if let Some(pending) = session.pending_draw() {
        println!(
            "Card {}/{}: {}",
            pending.position + 1,
            pending.batch_size,
            pending.character.display()
        );
        println!("  save | sell | saveall | dismiss");
    }
}

fn run_command(session: &mut GameSession, pull_log: &Arc<Mutex<PullLog>>, words: &[&str]) {
    let result: Result<(), gacha::error::GachaError> = (|| {
        match words[0] {
            "help" => print_help(),
            "pull" => match parse_pull_count(words.get(1).copied()) {
                Some(count) => {
                    let outcome = session.pull(count)?;
                    println!(
                        "Spent {} gems on {} card(s).",
                        outcome.cost_charged,
                        outcome.characters.len()
                    );
                    show_pending(session);
                }
                None => println!("Usage: pull [1|10]"),
            },
            "save" => {
                let entry = session.save_drawn()?;
                println!("Saved as {}.", entry);
                show_pending(session);
            }
            "saveall" => {
                let entries = session.save_all_drawn()?;
                println!("Saved {} card(s).", entries.len());
            }
            "dismiss" => {
                let discarded = session.dismiss_drawn()?;
                println!("Discarded {} card(s).", discarded);
            }
            "sell" if words.len() == 1 => {
                let payout = session.sell_drawn()?;
                println!("Sold for {} gems.", payout);
                show_pending(session);
            }
            "sell" => match parse_entry(words.get(1)) {
                Some(entry) => {
                    let amount = words.get(2).and_then(|w| w.parse().ok()).unwrap_or(1);
                    let payout = session.sell(entry, amount)?;
                    println!("Sold for {} gems.", payout);
                }
                None => println!("Usage: sell [<entry> [amount]]"),
            },
            "lock" => match parse_entry(words.get(1)) {
                Some(entry) => {
                    let locked = session.toggle_lock(entry)?;
                    println!("{} is now {}.", entry, if locked { "locked" } else { "unlocked" });
                }
                None => println!("Usage: lock <entry>"),
            },
            "list" => {
                let filter = parse_rarity(words.get(1));
                for owned in session.collection().entries() {
                    if filter.map_or(true, |r| owned.rarity() == r) {
                        print_entry(owned, session.selection().staged_count(owned.entry_id));
                    }
                }
            }
            "stage" => match parse_entry(words.get(1)) {
                Some(entry) => {
                    let staged = session.stage_for_fusion(entry)?;
                    println!("{}/10 staged.", staged);
                }
                None => println!("Usage: stage <entry>"),
            },
            "unstage" => match (
                parse_rarity(words.get(1)),
                words.get(2).and_then(|w| w.parse::<usize>().ok()),
            ) {
                (Some(rarity), Some(index)) => {
                    let entry = session.unstage_for_fusion(rarity, index)?;
                    println!("Unstaged {}.", entry);
                }
                _ => println!("Usage: unstage <rarity> <index>"),
            },
            "staged" => {
                for rarity in Rarity::ALL {
                    let staged = session.staged(rarity);
                    if staged.is_empty() {
                        continue;
                    }
                    let handles: Vec<String> = staged.iter().map(|e| e.to_string()).collect();
                    let chance = session
                        .fusion_chance(rarity)
                        .map(|c| format!(" ({}% chance)", c))
                        .unwrap_or_default();
                    println!("  {}: {}{}", rarity, handles.join(" "), chance);
                }
            }
            "fuse" => match parse_rarity(words.get(1)) {
                Some(rarity) => {
                    let outcome = session.attempt_fusion(rarity)?;
                    match &outcome.result {
                        Some((entry, character)) => {
                            println!("Fusion succeeded! {} -> {}", entry, character.display())
                        }
                        None => println!(
                            "Fusion failed ({}% chance). {} card(s) returned.",
                            outcome.chance,
                            outcome.returned.len()
                        ),
                    }
                }
                None => println!("Usage: fuse <rarity>"),
            },
            "fountain" => {
                let state = session.fountain_state();
                println!(
                    "Fountain: {:.1} min, worth {} gems{}",
                    state.minutes,
                    state.reward,
                    if state.ready { " (ready)" } else { "" }
                );
            }
            "collect" => {
                let reward = session.collect_fountain()?;
                println!("Collected {} gems.", reward);
            }
            "gems" => {
                let state = session.gem_state();
                println!(
                    "{} gems, next passive payout in {:.0}s",
                    state.gems, state.next_gem_time
                );
            }
            "rates" => {
                let rates = session.current_rates();
                for rarity in Rarity::ALL.iter().rev() {
                    println!("  {:<11} {:>6.2}%", rarity.name(), rates.weight(*rarity));
                }
            }
            "effects" => {
                let badges = session.active_effects().badges();
                if badges.is_empty() {
                    println!("No active effects.");
                } else {
                    println!("  {}", badges.join("  "));
                }
            }
            "pity" => {
                let pity = session.pity_progress();
                println!(
                    "  Super Rare: {}/{}   Ultra Rare: {}/{}",
                    pity.pulls_since_super_rare,
                    pity.super_rare_threshold,
                    pity.pulls_since_ultra_rare,
                    pity.ultra_rare_threshold
                );
            }
            "stats" => {
                let stats = session.collection_stats();
                let lifetime = session.lifetime_stats();
                println!(
                    "  Collection: {} entries, {} cards, {}/{} unique ({:.1}%)",
                    stats.total_entries,
                    stats.total_cards,
                    stats.unique_characters,
                    stats.catalog_size,
                    stats.completion()
                );
                for progress in &stats.by_edition {
                    println!(
                        "  {:<12} {:>3}/{:<3} ({:.0}%)",
                        progress.edition.name(),
                        progress.unique,
                        progress.max,
                        progress.completion()
                    );
                }
                println!(
                    "  Lifetime: {} pulls, {} cards sold for {} gems",
                    lifetime.total_pulls, lifetime.total_cards_sold, lifetime.total_gems_made
                );
                for rarity in Rarity::ALL {
                    println!("    {:<11} {}", rarity.name(), lifetime.pulls_of(rarity));
                }
            }
            "log" => {
                let log = lock(pull_log);
                for entry in log.entries().take(10) {
                    println!("  {} pulled {}", entry.username, entry.character.display());
                }
            }
            other => println!("Unknown command '{}'. Type 'help'.", other),
        }
        Ok(())
    })();

    if let Err(e) = result {
        warn!(command = words[0], error = %e, "command rejected");
        println!("{}", e);
    }
}

fn print_help() {
    println!("Commands:");
    println!("  pull [1|10]              Draw one or ten cards");
    println!("  save | sell | saveall    Decide on the card on show");
    println!("  dismiss                  Discard the rest of the batch");
    println!("  list [rarity]            Show the collection");
    println!("  sell <entry> [amount]    Sell owned cards");
    println!("  lock <entry>             Toggle lock");
    println!("  stage <entry>            Stage a card for fusion");
    println!("  unstage <rarity> <i>     Remove a staged card");
    println!("  staged                   Show staged cards and odds");
    println!("  fuse <rarity>            Fuse ten staged cards");
    println!("  fountain | collect       Check or collect the prize fountain");
    println!("  gems | rates | effects | pity | stats | log");
    println!("  quit                     Save and exit");
    println!();
    println!("Rarities: common rare super-rare ultra-rare legendary mythic");
}
