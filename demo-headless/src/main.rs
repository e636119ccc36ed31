use std::process::ExitCode;

use clap::Parser;
use fire_risk_core::{
    EnsembleConfig, FireAutomaton, FireRiskError, Grid, Landscape, RiskMap, SpreadParams,
    ThreatAggregator, WindBias, MAX_DENSITY,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing_subscriber::EnvFilter;

/// Fire risk forecast demo on a random landscape
#[derive(Parser, Debug)]
#[command(name = "fire-risk-demo")]
#[command(about = "Wildfire spread and population risk forecast demo", long_about = None)]
struct Args {
    /// Grid side length in cells (square map)
    #[arg(short, long, default_value_t = 100)]
    size: usize,

    /// Fraction of cells that are forest (0-1)
    #[arg(long, default_value_t = 0.45)]
    tree_ratio: f64,

    /// Highest settlement density on land cells (0-8)
    #[arg(long, default_value_t = MAX_DENSITY)]
    max_density: u8,

    /// Steps to run before the forecast starts
    #[arg(short, long, default_value_t = 100)]
    warmup: usize,

    /// Forecast horizon in steps
    #[arg(long, default_value_t = 100)]
    horizon: usize,

    /// Seed for landscape generation and fire spread
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Ensemble members to average (1 = single realization)
    #[arg(short, long, default_value_t = 1)]
    members: usize,

    /// Wind heading in degrees (0 = right, 90 = up)
    #[arg(long)]
    wind_direction: Option<f64>,

    /// Wind bias strength, only used with --wind-direction
    #[arg(long, default_value_t = 0.8)]
    wind_strength: f64,

    /// Side length of the coarse map printed at the end (0 = skip)
    #[arg(long, default_value_t = 20)]
    preview: usize,
}

/// Random forest mask and density layer, reproducible from `seed`
fn generate_landscape(args: &Args) -> Result<Landscape, FireRiskError> {
    let mut rng = StdRng::seed_from_u64(args.seed);
    let max_density = args.max_density.min(MAX_DENSITY);
    let cells = args.size * args.size;

    let forest: Vec<bool> = (0..cells)
        .map(|_| rng.random_bool(args.tree_ratio))
        .collect();
    let density: Vec<u8> = (0..cells)
        .map(|_| rng.random_range(0..=max_density))
        .collect();

    Landscape::from_layers(
        &Grid::from_vec(args.size, args.size, forest)?,
        &Grid::from_vec(args.size, args.size, density)?,
    )
}

fn print_histogram(risk: &RiskMap) {
    let histogram = risk.histogram();
    let total: usize = histogram.iter().sum();
    println!("\nRisk level distribution:");
    for (level, &count) in histogram.iter().enumerate() {
        let share = count as f64 / total as f64;
        let bar = "#".repeat((share * 50.0).round() as usize);
        println!("  {level}: {count:>7} ({:>5.1}%) {bar}", share * 100.0);
    }
}

fn print_preview(risk: &RiskMap, side: usize) -> Result<(), FireRiskError> {
    const SHADES: [char; 10] = [' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

    let coarse = risk.resample(side, side)?;
    println!("\nRisk preview ({side}x{side}):");
    for y in 0..coarse.height() {
        let row: String = (0..coarse.width())
            .map(|x| SHADES[(coarse.get(x, y).round() as usize).min(9)])
            .collect();
        println!("  |{row}|");
    }
    Ok(())
}

fn run(args: &Args) -> Result<(), FireRiskError> {
    println!("=== Fire Risk Forecast Demo ===\n");

    let landscape = generate_landscape(args)?;
    let mask = landscape.forest_mask();
    println!(
        "Landscape: {}x{} cells, {} trees ({:.1}%)",
        landscape.width(),
        landscape.height(),
        landscape.tree_count(),
        100.0 * landscape.tree_count() as f64 / landscape.cells().len() as f64
    );

    let params = SpreadParams {
        wind: args
            .wind_direction
            .map(|direction| WindBias::new(direction, args.wind_strength)),
        ..SpreadParams::default()
    };
    params.validate()?;
    if let Some(wind) = params.wind {
        println!(
            "Wind: heading {:.0} deg, strength {:.2}",
            wind.direction_degrees, wind.strength
        );
    }

    let aggregator = ThreatAggregator::new(args.horizon);
    let risk = if args.members > 1 {
        let config = EnsembleConfig {
            members: args.members,
            warmup_steps: args.warmup,
            base_seed: args.seed,
        };
        println!(
            "Running {} members: warm-up {} steps, horizon {} steps",
            config.members, config.warmup_steps, args.horizon
        );
        let ensemble = aggregator.forecast_ensemble(&landscape, &mask, params, config)?;
        let peak_frequency = ensemble.mean_burn_frequency.max_value().unwrap_or(0.0);
        println!("Peak mean burn frequency: {peak_frequency:.2} steps");
        ensemble.risk
    } else {
        let mut automaton = FireAutomaton::with_seed(&landscape, params, args.seed)?;
        let (ix, iy) = automaton.ignition_cell();
        println!("Ignition at ({ix}, {iy})");

        automaton.advance(args.warmup);
        println!(
            "After {} warm-up steps: {} cells burning",
            automaton.steps_taken(),
            automaton.burning_count()
        );

        let forecast = aggregator.forecast(&mut automaton, &landscape, &mask)?;
        let burned = forecast
            .exposure
            .burn_frequency
            .iter()
            .filter(|&&f| f > 0.0)
            .count();
        println!(
            "After {} forecast steps: {} cells burning, {} cells burned during horizon",
            args.horizon,
            automaton.burning_count(),
            burned
        );
        forecast.risk
    };

    println!("Peak risk level: {}", risk.max_level());
    print_histogram(&risk);
    if args.preview > 0 {
        print_preview(&risk, args.preview.min(args.size))?;
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    if !(0.0..=1.0).contains(&args.tree_ratio) {
        eprintln!("--tree-ratio must be within [0, 1], got {}", args.tree_ratio);
        return ExitCode::FAILURE;
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
