use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tendon_core::*;

#[derive(Parser)]
#[command(name = "tli")]
#[command(about = "Tendon load index calculator for climbing sessions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Bouldering load for a session file
    Boulder {
        /// Session file (.toml or .json)
        #[arg(long, short)]
        input: PathBuf,

        /// CSV climb list (grade,tut_sec) replacing the file's climbs
        #[arg(long)]
        climbs: Option<PathBuf>,
    },

    /// Hangboard load for a session file
    Hangboard {
        /// Session file (.toml or .json)
        #[arg(long, short)]
        input: PathBuf,
    },

    /// Whole-session load, spike check and rest recommendation
    Session {
        /// Session file (.toml or .json)
        #[arg(long, short)]
        input: PathBuf,

        /// CSV climb list (grade,tut_sec) replacing the file's climbs
        #[arg(long)]
        climbs: Option<PathBuf>,

        /// Rolling 28-day average TLI
        #[arg(long)]
        average: Option<f64>,
    },

    /// Print the effective configuration
    Config,
}

fn main() -> Result<()> {
    // Initialize logging
    tendon_core::logging::init();

    let cli = Cli::parse();

    let config = match cli.config {
        Some(ref path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    match cli.command {
        Commands::Boulder { input, climbs } => {
            cmd_boulder(&input, climbs.as_deref(), &config, cli.json)
        }
        Commands::Hangboard { input } => cmd_hangboard(&input, &config, cli.json),
        Commands::Session {
            input,
            climbs,
            average,
        } => cmd_session(&input, climbs.as_deref(), average, &config, cli.json),
        Commands::Config => {
            print!("{}", config.to_toml()?);
            Ok(())
        }
    }
}

/// Load, merge and resolve a session file
///
/// Callers validate the sections they evaluate.
fn load_session(
    input: &Path,
    climbs: Option<&Path>,
    average: Option<f64>,
    config: &Config,
) -> Result<ResolvedSession> {
    let mut session = SessionInput::load(input)?;

    if let Some(path) = climbs {
        session = session.with_climbs(load_climbs(path)?)?;
    }
    if average.is_some() {
        session.historical_average = average;
    }

    let resolved = session.resolve(config);
    tracing::debug!("Resolved session: {:?}", resolved);
    Ok(resolved)
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn cmd_boulder(input: &Path, climbs: Option<&Path>, config: &Config, json: bool) -> Result<()> {
    let resolved = load_session(input, climbs, None, config)?;
    resolved.validate_bouldering()?;
    let bouldering = resolved
        .bouldering
        .ok_or_else(|| Error::Input("Session file has no [bouldering] section".into()))?;

    let result = bouldering.compute();

    if json {
        return print_json(&result);
    }

    println!("Bouldering TLI: {:.1}", result.total);
    display_bouldering(&result);
    Ok(())
}

fn cmd_hangboard(input: &Path, config: &Config, json: bool) -> Result<()> {
    let resolved = load_session(input, None, None, config)?;
    resolved.validate_hangboard()?;
    if resolved.hangboard.is_empty() {
        return Err(Error::Input("Session file has no [[hangboard]] entries".into()));
    }

    let sets: Vec<HangboardSetResult> = resolved
        .hangboard
        .iter()
        .map(compute_hangboard_set_tli)
        .collect();
    let total = compute_hangboard_total(&resolved.hangboard);

    if json {
        return print_json(&serde_json::json!({
            "sets": sets,
            "total": total,
        }));
    }

    println!("Hangboard TLI: {:.1}", total);
    display_hangboard(&resolved.hangboard, &sets);
    Ok(())
}

fn cmd_session(
    input: &Path,
    climbs: Option<&Path>,
    average: Option<f64>,
    config: &Config,
    json: bool,
) -> Result<()> {
    let resolved = load_session(input, climbs, average, config)?;
    resolved.validate()?;
    let report = evaluate_session(&resolved);

    if json {
        return print_json(&report);
    }

    let session = &report.session;
    println!("Session TLI: {:.1}", session.total);
    if let Some(ref bouldering) = report.bouldering {
        println!("  Bouldering: {:.1}", bouldering.total);
    }
    if !report.hangboard_sets.is_empty() {
        println!("  Hangboard:  {:.1}", report.hangboard_total);
    }

    if resolved.historical_average > 0.0 {
        println!(
            "  Ratio to average: {:.2} (average {:.1})",
            session.ratio_to_average, resolved.historical_average
        );
    } else {
        println!("  Ratio to average: n/a (no history)");
    }

    if session.spike_warning {
        println!("  ⚠ Spike: more than 1.4x your average load");
    }

    let rest = session.recommended_rest_days;
    if rest.min == rest.max {
        println!("Recommended rest: {} day(s)", rest.min);
    } else {
        println!("Recommended rest: {}-{} days", rest.min, rest.max);
    }

    Ok(())
}

fn display_bouldering(result: &BoulderingResult) {
    println!("  Time under tension: {:.0} s", result.total_tut);
    println!("  Rest between climbs: {:.0} s", result.total_rest_within);
    println!("  Freshness factor: {:.3}", result.freshness_factor);
    println!("  Density factor: {:.3}", result.density_factor);
}

fn display_hangboard(rows: &[HangboardRow], sets: &[HangboardSetResult]) {
    for (i, (row, set)) in rows.iter().zip(sets).enumerate() {
        println!(
            "  #{} {:?} {}mm: {:.1} per set x {} = {:.1}",
            i + 1,
            row.grip,
            row.edge_mm,
            set.per_set,
            row.sets,
            set.per_set * row.sets as f64
        );
        println!(
            "     intensity {:.3}, work {:.0} s, rest {:.0} s, density {:.3}",
            set.relative_intensity, set.work_seconds, set.rest_seconds, set.density_factor
        );
    }
}
