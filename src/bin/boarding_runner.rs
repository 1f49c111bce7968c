//! Headless Boarding Runner
//!
//! Drives a scripted boarding scenario against a seeded world and reports
//! the outcomes as text or JSON.

use std::collections::HashMap;

use clap::Parser;
use serde::{Deserialize, Serialize};

use corsair::board::{self, BoardingStart, CompletionOutcome, StealKind};
use corsair::core::config::BoardingConfig;
use corsair::core::error::{CorsairError, Result};
use corsair::core::types::{Commodity, EquipmentKind, PilotId, Vec2};
use corsair::ship::cargo::CargoHold;
use corsair::ship::equipment::EquipmentBay;
use corsair::world::World;

/// Headless Boarding Runner - scripted piracy for tuning and regression
#[derive(Parser, Debug)]
#[command(name = "boarding_runner")]
#[command(about = "Run a scripted boarding scenario and report the outcomes")]
struct Args {
    /// Scenario file (TOML); omit to run the built-in raid
    #[arg(long)]
    scenario: Option<std::path::PathBuf>,

    /// Random seed for deterministic runs (overrides the scenario's)
    #[arg(long)]
    seed: Option<u64>,

    /// Seconds of simulated time per tick
    #[arg(long, default_value_t = 0.1)]
    dt: f32,

    /// Maximum ticks before giving up on pending boardings
    #[arg(long, default_value_t = 200)]
    max_ticks: u64,

    /// Output format: json or text
    #[arg(long, default_value = "text")]
    format: String,

    /// Print the boarding window and event log to stderr
    #[arg(long, short = 'v')]
    verbose: bool,
}

/// Built-in scenario: two freighters get picked over and a carrier takes
/// its fighter back aboard.
const DEFAULT_SCENARIO: &str = r#"
seed = 2077

[[pilots]]
name = "Sable Corsair"
crew = 12
fuel = 60.0
fuel_max = 120.0
cargo_capacity = 80

[[pilots]]
name = "Hapless Mule"
credits = 18500
crew = 3
fuel = 50.0
cargo_capacity = 120
cargo = [
    { commodity = "Ore", quantity = 40 },
    { commodity = "Food", quantity = 25 },
]
equipment = ["LaserCannon", "ShieldBooster"]
disabled = true

[[pilots]]
name = "Iron Magpie"
crew = 5
fuel = 10.0

[[pilots]]
name = "Drifting Clipper"
credits = 6000
crew = 1
fuel = 80.0
disabled = true

[[pilots]]
name = "Carrier Valiant"
crew = 40

[[pilots]]
name = "Valiant Wing"
parent = "Carrier Valiant"
disabled = true

[[boardings]]
boarder = "Sable Corsair"
target = "Hapless Mule"
interactive = true
steals = ["Credits", "Cargo", "Equipment", "Fuel"]

[[boardings]]
boarder = "Iron Magpie"
target = "Drifting Clipper"

[[boardings]]
boarder = "Carrier Valiant"
target = "Valiant Wing"
interactive = true
"#;

/// Scenario file schema
#[derive(Debug, Deserialize)]
struct Scenario {
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    config: BoardingConfig,
    pilots: Vec<PilotSpec>,
    #[serde(default)]
    boardings: Vec<BoardingSpec>,
}

#[derive(Debug, Deserialize)]
struct PilotSpec {
    name: String,
    #[serde(default)]
    credits: u64,
    #[serde(default)]
    crew: u32,
    #[serde(default)]
    fuel: f32,
    #[serde(default = "default_fuel_max")]
    fuel_max: f32,
    #[serde(default)]
    cargo_capacity: u32,
    #[serde(default)]
    cargo: Vec<CargoLine>,
    #[serde(default)]
    equipment: Vec<EquipmentKind>,
    #[serde(default)]
    disabled: bool,
    #[serde(default)]
    no_board: bool,
    #[serde(default)]
    size_radius: Option<f32>,
    #[serde(default)]
    position: Option<[f32; 2]>,
    #[serde(default)]
    velocity: Option<[f32; 2]>,
    /// Carrier this ship launched from, by pilot name
    #[serde(default)]
    parent: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CargoLine {
    commodity: Commodity,
    quantity: u32,
}

#[derive(Debug, Deserialize)]
struct BoardingSpec {
    boarder: String,
    target: String,
    #[serde(default)]
    interactive: bool,
    /// Steal actions for interactive boardings, in order
    #[serde(default)]
    steals: Vec<StealKind>,
}

fn default_fuel_max() -> f32 {
    100.0
}

/// JSON output structure
#[derive(Serialize)]
struct RunReport {
    seed: u64,
    ticks: u64,
    boardings: Vec<BoardingReport>,
    pilots: Vec<PilotSummary>,
    events_logged: usize,
}

#[derive(Serialize)]
struct BoardingReport {
    boarder: String,
    target: String,
    mode: String,
    outcome: String,
    actions: Vec<String>,
}

#[derive(Serialize)]
struct PilotSummary {
    name: String,
    credits: u64,
    cargo_tons: u32,
    equipment_fitted: usize,
    locker: usize,
    fuel: f32,
    armor: f32,
    boarded: bool,
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    let scenario = load_scenario(args.scenario.as_deref()).unwrap_or_else(|e| {
        eprintln!("{}", e);
        std::process::exit(1);
    });

    scenario
        .config
        .validate()
        .map_err(CorsairError::InvalidConfig)
        .unwrap_or_else(|e| {
            eprintln!("{}", e);
            std::process::exit(1);
        });

    // Determine seed
    let seed = args.seed.or(scenario.seed).unwrap_or_else(rand::random);

    let (mut world, ids) = build_world(&scenario, seed).unwrap_or_else(|e| {
        eprintln!("{}", e);
        std::process::exit(1);
    });

    tracing::info!(
        "Running boarding scenario: {} pilots, {} boardings, seed {}",
        scenario.pilots.len(),
        scenario.boardings.len(),
        seed
    );

    // Kick off every scripted boarding
    let mut reports: Vec<BoardingReport> = Vec::new();
    let mut pending_reports: HashMap<(PilotId, PilotId), usize> = HashMap::new();

    for spec in &scenario.boardings {
        let (Some(&boarder), Some(&target)) = (ids.get(&spec.boarder), ids.get(&spec.target))
        else {
            eprintln!(
                "Skipping boarding with unknown pilot: {} -> {}",
                spec.boarder, spec.target
            );
            continue;
        };

        if spec.interactive {
            let (outcome, actions) =
                run_interactive(&mut world, boarder, target, &spec.steals, args.verbose);
            reports.push(BoardingReport {
                boarder: spec.boarder.clone(),
                target: spec.target.clone(),
                mode: "interactive".to_string(),
                outcome,
                actions,
            });
        } else {
            let outcome = match board::start_boarding(&mut world, boarder, target) {
                Ok(()) => {
                    pending_reports.insert((boarder, target), reports.len());
                    "pending".to_string()
                }
                Err(e) => format!("refused: {}", e),
            };
            reports.push(BoardingReport {
                boarder: spec.boarder.clone(),
                target: spec.target.clone(),
                mode: "autonomous".to_string(),
                outcome,
                actions: Vec::new(),
            });
        }
    }

    // Drive the world until every pending boarding resolves
    while !world.pending_boardings().is_empty() && world.tick < args.max_ticks {
        for done in world.update(args.dt) {
            if let Some(&idx) = pending_reports.get(&(done.boarder, done.target)) {
                reports[idx].outcome = completion_line(&done.outcome);
            }
        }
    }

    let pilots = world
        .pilots()
        .iter()
        .map(|p| PilotSummary {
            name: p.name.clone(),
            credits: p.credits,
            cargo_tons: p.cargo.used(),
            equipment_fitted: p.equipment.fitted_count(),
            locker: p.locker.len(),
            fuel: p.fuel,
            armor: p.armor,
            boarded: p.boarded,
        })
        .collect();

    let report = RunReport {
        seed,
        ticks: world.tick,
        boardings: reports,
        pilots,
        events_logged: world.events.len(),
    };

    match args.format.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&report).unwrap());
        }
        "text" => print_text(&report),
        _ => {
            eprintln!("Unknown format '{}', defaulting to text", args.format);
            print_text(&report);
        }
    }

    if args.verbose {
        eprintln!();
        eprintln!("=== Event log ===");
        for r in &world.events.records {
            eprintln!("  [{}] {:?}", r.tick, r.event);
        }
    }
}

/// Read and parse the scenario, falling back to the built-in raid
fn load_scenario(path: Option<&std::path::Path>) -> Result<Scenario> {
    match path {
        Some(p) => {
            let text = std::fs::read_to_string(p)?;
            toml::from_str(&text)
                .map_err(|e| CorsairError::InvalidConfig(format!("scenario {}: {}", p.display(), e)))
        }
        None => Ok(toml::from_str(DEFAULT_SCENARIO).expect("built-in scenario parses")),
    }
}

/// Build the world and a name -> id map from the scenario
fn build_world(scenario: &Scenario, seed: u64) -> Result<(World, HashMap<String, PilotId>)> {
    let mut world = World::with_config(scenario.config.clone(), seed);
    let mut ids: HashMap<String, PilotId> = HashMap::new();

    for spec in &scenario.pilots {
        if ids.contains_key(&spec.name) {
            return Err(CorsairError::InvalidConfig(format!(
                "duplicate pilot name '{}'",
                spec.name
            )));
        }
        let id = world.spawn(spec.name.clone());
        let pilot = world.pilot_mut(id).expect("just spawned");
        pilot.credits = spec.credits;
        pilot.crew = spec.crew;
        pilot.fuel = spec.fuel;
        pilot.fuel_max = spec.fuel_max;
        pilot.cargo = CargoHold::new(spec.cargo_capacity);
        for line in &spec.cargo {
            pilot.cargo.add(line.commodity, line.quantity);
        }
        pilot.equipment = EquipmentBay::with_fitted(&spec.equipment);
        pilot.disabled = spec.disabled;
        pilot.no_board = spec.no_board;
        if let Some(radius) = spec.size_radius {
            pilot.size_radius = radius;
        }
        if let Some([x, y]) = spec.position {
            pilot.position = Vec2::new(x, y);
        }
        if let Some([x, y]) = spec.velocity {
            pilot.velocity = Vec2::new(x, y);
        }
        ids.insert(spec.name.clone(), id);
    }

    // Parents resolve once every pilot exists
    for spec in &scenario.pilots {
        if let Some(parent_name) = &spec.parent {
            let Some(&parent_id) = ids.get(parent_name) else {
                return Err(CorsairError::InvalidConfig(format!(
                    "unknown parent '{}' for '{}'",
                    parent_name, spec.name
                )));
            };
            world.pilot_mut(ids[&spec.name]).expect("spawned above").parent = Some(parent_id);
        }
    }

    Ok((world, ids))
}

/// Open a session, work through the steal list, and walk away
fn run_interactive(
    world: &mut World,
    boarder: PilotId,
    target: PilotId,
    steals: &[StealKind],
    verbose: bool,
) -> (String, Vec<String>) {
    let start = match board::open_boarding(world, boarder, target) {
        Ok(start) => start,
        Err(e) => return (format!("refused: {}", e), Vec::new()),
    };
    let mut session = match start {
        BoardingStart::Session(s) => s,
        BoardingStart::EscortRecovered => return ("escort recovered".to_string(), Vec::new()),
    };

    if verbose {
        if let Some(view) = board::plunder_view(world, target) {
            eprint!("{}", view.summary());
        }
    }

    let crew = world.pilot(boarder).map(|p| p.crew).unwrap_or(0);
    let mut actions = Vec::new();
    for &kind in steals {
        match board::steal(world, &mut session, kind) {
            Ok(outcome) => {
                actions.push(format!(
                    "{:?}: {}",
                    kind,
                    board::steal_outcome_line(&outcome, crew)
                ));
                if !session.is_open() {
                    break;
                }
            }
            Err(e) => {
                actions.push(format!("{:?}: error: {}", kind, e));
                break;
            }
        }
    }

    let outcome = if session.is_open() {
        board::close_boarding(world, &mut session);
        "walked away with the take".to_string()
    } else {
        "thrown off the ship".to_string()
    };
    (outcome, actions)
}

fn completion_line(outcome: &CompletionOutcome) -> String {
    match outcome {
        CompletionOutcome::Looted { credits } => {
            format!("looted {} credits", board::format_credits(*credits, 2))
        }
        CompletionOutcome::LockedOut => "locked out".to_string(),
        CompletionOutcome::CounterAttacked { damage } => {
            format!("counter-attacked for {:.0} damage", damage)
        }
        CompletionOutcome::TargetVanished => "target vanished".to_string(),
    }
}

fn print_text(report: &RunReport) {
    println!("Boarding Report");
    println!("===============");
    println!("Seed: {}", report.seed);
    println!("Ticks: {}", report.ticks);
    println!();
    for b in &report.boardings {
        println!("{} -> {} ({}): {}", b.boarder, b.target, b.mode, b.outcome);
        for line in &b.actions {
            println!("  {}", line);
        }
    }
    println!();
    println!("Pilots");
    println!("------");
    for p in &report.pilots {
        println!(
            "{:<16} credits {:>9}  cargo {:>4} t  gear {}/{} fitted/locker  fuel {:>6.1}  armor {:>6.1}{}",
            p.name,
            p.credits,
            p.cargo_tons,
            p.equipment_fitted,
            p.locker,
            p.fuel,
            p.armor,
            if p.boarded { "  [boarded]" } else { "" }
        );
    }
    println!();
    println!("Events logged: {}", report.events_logged);
}
