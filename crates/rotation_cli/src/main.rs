//! Rotation CLI
//!
//! Propose rounds from a tournament snapshot, or simulate a whole event to
//! inspect how a format rotates players.

use rand::rngs::StdRng;
use rand::{thread_rng, Rng, RngCore, SeedableRng};
use rotation_core::{
    compute_rest_streaks, generate_round_with_rng, select_active_pool, CompletedRound, Format,
    Gender, GenderMap, ParticipantId, PlayedMatch, ProposedMatch, RotationConfig, RoundContext,
    ScoreMap,
};
use serde::{Deserialize, Serialize};
use std::env;

fn print_usage() {
    println!("Court Rotation Runner");
    println!();
    println!("Usage:");
    println!("  rotation generate <snapshot.json> --format <name> --courts <n> [--config <file.toml>] [--seed <n>] [--out <file.json>]");
    println!("  rotation simulate <format> [--players N] [--courts N] [--rounds N] [--seed S]");
    println!();
    println!("Formats:");
    for format in Format::ALL {
        println!("  {}", format);
    }
    println!();
    println!("Examples:");
    println!("  rotation generate friday.json --format mexicano --courts 3");
    println!("  rotation simulate americano --players 9 --courts 2 --rounds 10");
}

/// On-disk shape of a tournament snapshot, as the persistence layer exports it.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TournamentSnapshot {
    participants: Vec<ParticipantId>,
    #[serde(default)]
    history: Vec<CompletedRound>,
    #[serde(default)]
    genders: Option<GenderMap>,
    #[serde(default)]
    scores: Option<ScoreMap>,
}

impl TournamentSnapshot {
    fn load(path: &str) -> Result<Self, String> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {}", path, e))?;
        serde_json::from_str(&contents).map_err(|e| format!("Failed to parse {}: {}", path, e))
    }

    fn into_context(self) -> RoundContext {
        RoundContext {
            participants: self.participants,
            history: self.history,
            genders: self.genders,
            scores: self.scores,
        }
    }
}

fn load_config(path: &str) -> Result<RotationConfig, String> {
    let contents =
        std::fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {}", path, e))?;
    toml::from_str(&contents).map_err(|e| format!("Failed to parse {}: {}", path, e))
}

fn make_rng(seed: Option<u64>) -> Box<dyn RngCore> {
    match seed {
        Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
        None => Box::new(thread_rng()),
    }
}

/// Scan `--flag value` pairs after the positional arguments.
fn flag_value<'a>(args: &'a [String], names: &[&str]) -> Option<&'a str> {
    let mut i = 0;
    while i < args.len() {
        if names.contains(&args[i].as_str()) && i + 1 < args.len() {
            return Some(&args[i + 1]);
        }
        i += 1;
    }
    None
}

fn print_matches(matches: &[ProposedMatch]) {
    for (i, m) in matches.iter().enumerate() {
        let bonus = match &m.bonus {
            Some(b) => format!("  (+{} bonus from round {})", b.bonus_points, b.bonus_from_round),
            None => String::new(),
        };
        println!("Court {}: {} vs {}{}", i + 1, m.sides[0], m.sides[1], bonus);
    }
}

fn run_generate(args: &[String]) {
    if args.is_empty() {
        eprintln!("Error: generate requires a snapshot file");
        print_usage();
        return;
    }

    let snapshot_path = &args[0];
    let format: Format = match flag_value(args, &["--format", "-f"]) {
        Some(name) => match name.parse() {
            Ok(format) => format,
            Err(e) => {
                eprintln!("Error: {}", e);
                return;
            }
        },
        None => {
            eprintln!("Error: --format is required");
            return;
        }
    };
    let courts: usize = flag_value(args, &["--courts", "-c"])
        .and_then(|v| v.parse().ok())
        .unwrap_or(1);
    let seed = flag_value(args, &["--seed", "-s"]).and_then(|v| v.parse().ok());

    let config = match flag_value(args, &["--config"]) {
        Some(path) => match load_config(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {}", e);
                return;
            }
        },
        None => RotationConfig::default(),
    };

    let snapshot = match TournamentSnapshot::load(snapshot_path) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            eprintln!("Error: {}", e);
            return;
        }
    };
    let ctx = snapshot.into_context();

    println!("=== Round Proposal: {} ===", format);
    println!(
        "Participants: {}, Courts: {}, Max rest streak: {}",
        ctx.participants.len(),
        courts,
        config.max_rest_streak
    );
    println!();

    let selection = select_active_pool(&ctx.participants, &ctx.history, courts, config.max_rest_streak);
    if selection.forced_out > 0 {
        eprintln!(
            "Warning: {} player(s) past the rest limit could not fit on {} court(s)",
            selection.forced_out, courts
        );
    }

    let mut rng = make_rng(seed);
    let matches = match generate_round_with_rng(format, &ctx, courts, &config, &mut rng) {
        Ok(matches) => matches,
        Err(e) => {
            eprintln!("Error: {}", e);
            return;
        }
    };

    if matches.is_empty() {
        println!("No round possible: fewer than two active participants.");
        return;
    }

    print_matches(&matches);
    if !selection.resting.is_empty() {
        let resting: Vec<&str> = selection.resting.iter().map(|id| id.as_str()).collect();
        println!("Resting: {}", resting.join(", "));
    }

    if let Some(out_path) = flag_value(args, &["--out", "-o"]) {
        match serde_json::to_string_pretty(&matches) {
            Ok(json) => {
                if let Err(e) = std::fs::write(out_path, json) {
                    eprintln!("Warning: Failed to write {}: {}", out_path, e);
                }
            }
            Err(e) => eprintln!("Warning: Failed to serialize proposal: {}", e),
        }
    }
}

fn run_simulate(args: &[String]) {
    if args.is_empty() {
        eprintln!("Error: simulate requires a format name");
        print_usage();
        return;
    }

    let format: Format = match args[0].parse() {
        Ok(format) => format,
        Err(e) => {
            eprintln!("Error: {}", e);
            return;
        }
    };
    let players: usize = flag_value(args, &["--players", "-p"])
        .and_then(|v| v.parse().ok())
        .unwrap_or(8);
    let courts: usize = flag_value(args, &["--courts", "-c"])
        .and_then(|v| v.parse().ok())
        .unwrap_or(2);
    let rounds: u32 = flag_value(args, &["--rounds", "-r"])
        .and_then(|v| v.parse().ok())
        .unwrap_or(7);
    let seed = flag_value(args, &["--seed", "-s"]).and_then(|v| v.parse().ok());

    let label = if format.is_team_format() { "t" } else { "p" };
    let participants: Vec<ParticipantId> = (1..=players)
        .map(|i| ParticipantId::new(format!("{}{}", label, i)))
        .collect();
    // Alternate genders so the mixed formats have a workable pool
    let genders: GenderMap = participants
        .iter()
        .enumerate()
        .map(|(i, id)| {
            let g = if i % 2 == 0 { Gender::Female } else { Gender::Male };
            (id.clone(), g)
        })
        .collect();
    let mut scores: ScoreMap = participants.iter().map(|id| (id.clone(), 0.0)).collect();
    let mut history: Vec<CompletedRound> = Vec::new();
    let mut played = vec![0u32; players];
    let config = RotationConfig::default();
    let mut rng = make_rng(seed);

    println!("=== Simulation: {} ===", format);
    println!("Players: {}, Courts: {}, Rounds: {}", players, courts, rounds);

    for round in 1..=rounds {
        let ctx = RoundContext {
            participants: participants.clone(),
            history: history.clone(),
            genders: Some(genders.clone()),
            scores: Some(scores.clone()),
        };

        let matches = match generate_round_with_rng(format, &ctx, courts, &config, &mut rng) {
            Ok(matches) => matches,
            Err(e) => {
                eprintln!("Error in round {}: {}", round, e);
                return;
            }
        };

        println!("\n--- Round {} ---", round);
        if matches.is_empty() {
            println!("No matches possible.");
            continue;
        }
        print_matches(&matches);

        // Hand out random points so the score-seeded formats reshuffle
        for m in &matches {
            for side in &m.sides {
                *scores.entry(side.clone()).or_insert(0.0) += rng.gen_range(0..=24) as f64;
                let idx = participants.iter().position(|p| p == side).unwrap();
                played[idx] += 1;
            }
        }
        history.push(CompletedRound {
            matches: matches.iter().map(PlayedMatch::from).collect(),
        });
    }

    let streaks = compute_rest_streaks(&participants, &history);
    println!("\n=== Rotation Report ===");
    println!("{:<10} {:>7} {:>7} {:>8}", "Player", "Played", "Rested", "Points");
    println!("{}", "-".repeat(36));
    for (i, id) in participants.iter().enumerate() {
        println!(
            "{:<10} {:>7} {:>7} {:>8.0}",
            id.as_str(),
            played[i],
            streaks[id],
            scores[id]
        );
    }
}

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    match args[1].as_str() {
        "generate" | "gen" => run_generate(&args[2..]),
        "simulate" | "sim" => run_simulate(&args[2..]),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", args[1]);
            print_usage();
        }
    }
}
