use std::env;
use std::io;
use std::process::ExitCode;

use donut_queue_sim::io::input::{parse_seed, prompt_config};
use donut_queue_sim::io::reporting::{write_summary, ConsoleTrace, CsvTrace};
use donut_queue_sim::{SimResult, SimRng, Simulation, SimulationConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Fixed seed for a reproducible run.
const SEED_VAR: &str = "DONUT_SIM_SEED";
/// Set to `1` to stream a per-tick CSV trace to stdout.
const CSV_VAR: &str = "DONUT_SIM_CSV";

const BANNER: &str = r"      ___
     /   \
    |  O  |
     \___/
  Yummy Donuts
Queue Simulation
";

fn main() -> ExitCode {
    init_logging();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run() -> SimResult<()> {
    println!("{BANNER}");

    // 1. COLLECT CONFIGURATION
    let mut input = io::stdin().lock();
    let mut stdout = io::stdout();
    let mut config = prompt_config(&mut input, &mut stdout, SimulationConfig::default())?;
    if let Ok(raw) = env::var(SEED_VAR) {
        config.seed = Some(parse_seed(&raw)?);
    }

    // 2. INITIALIZE SIMULATION
    let rng = match config.seed {
        Some(seed) => SimRng::new(seed),
        None => SimRng::from_entropy(),
    };
    let verbose = config.verbose;
    let mut sim = Simulation::new(config, rng)?;

    // 3. RUN SIMULATION
    // Verbose mode prints the minute-by-minute trace and stops early.
    let csv = env::var(CSV_VAR).is_ok_and(|v| v == "1");
    let mut observers = (
        verbose.then(|| ConsoleTrace::new(io::stdout())),
        csv.then(|| CsvTrace::new(io::stdout())),
    );
    let summary = sim.run(&mut observers);

    let (console, csv) = observers;
    if let Some(console) = console {
        console.finish()?;
    }
    if let Some(csv) = csv {
        let rows = csv.finish()?;
        info!(rows, "tick trace written");
    }

    // 4. REPORT
    write_summary(&mut io::stdout().lock(), &summary)?;
    Ok(())
}
