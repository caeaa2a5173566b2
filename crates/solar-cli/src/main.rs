use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use solar::codec;
use solar::config::SimulationConfig;
use solar::engine::Engine;

/// Load a system description, advance it and write the resulting report
#[derive(Parser, Debug)]
#[command(name = "solar", version)]
struct Args {
    /// System description file
    input: PathBuf,

    /// YAML simulation config (gravity, singularity policy, integrator)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Step length in physical seconds; defaults to the config's time_step
    #[arg(long)]
    dt: Option<f64>,

    /// Number of steps to run
    #[arg(short = 'n', long, default_value_t = 1000)]
    steps: usize,

    /// Print elapsed time every N steps (0 prints only at the end)
    #[arg(long, default_value_t = 0)]
    print_every: usize,

    /// Shift into the centre-of-mass frame before running
    #[arg(long)]
    center: bool,

    /// Write the report here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also write a re-loadable description of the final state
    #[arg(long)]
    snapshot: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => SimulationConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => SimulationConfig::default(),
    };
    let dt = args.dt.unwrap_or(config.time_step);
    let engine = Engine::from_config(&config).context("building engine")?;

    let loaded = codec::load(&args.input)
        .with_context(|| format!("reading system from {}", args.input.display()))?;
    for warning in &loaded.warnings {
        eprintln!("warning: {}: {warning}", args.input.display());
    }

    let mut system = loaded.system;
    if args.center {
        system.move_to_center_of_mass_frame();
    }

    println!("Modelling started!");
    let e0 = engine.total_energy(&system);
    for step in 1..=args.steps {
        engine.advance(&mut system, dt)?;
        if args.print_every > 0 && step % args.print_every == 0 {
            println!("{:.1} seconds gone", system.time);
        }
    }
    println!("{:.1} seconds gone", system.time);
    println!("Modelling finished!");

    let e1 = engine.total_energy(&system);
    if e0 != 0.0 {
        eprintln!("relative energy drift: {:.3e}", (e1 - e0) / e0.abs());
    }

    match &args.output {
        Some(path) => codec::save(path, &system)
            .with_context(|| format!("writing report to {}", path.display()))?,
        None => codec::write_report(io::stdout().lock(), &system)?,
    }
    if let Some(path) = &args.snapshot {
        codec::save_description(path, &system)
            .with_context(|| format!("writing snapshot to {}", path.display()))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["solar", "system.txt"]).unwrap();

        assert_eq!(args.input, PathBuf::from("system.txt"));
        assert_eq!(args.steps, 1000);
        assert_eq!(args.print_every, 0);
        assert!(args.dt.is_none());
        assert!(args.config.is_none());
        assert!(!args.center);
    }

    #[test]
    fn test_full_command_line() {
        let args = Args::try_parse_from([
            "solar",
            "data/solar_system.txt",
            "-c",
            "data/config.yaml",
            "--dt",
            "3600",
            "-n",
            "24",
            "--print-every",
            "6",
            "--center",
            "-o",
            "report.txt",
            "--snapshot",
            "snap.txt",
        ])
        .unwrap();

        assert_eq!(args.dt, Some(3600.0));
        assert_eq!(args.steps, 24);
        assert_eq!(args.print_every, 6);
        assert!(args.center);
        assert_eq!(args.output, Some(PathBuf::from("report.txt")));
        assert_eq!(args.snapshot, Some(PathBuf::from("snap.txt")));
    }

    #[test]
    fn test_missing_input_rejected() {
        assert!(Args::try_parse_from(["solar"]).is_err());
    }

    #[test]
    fn test_bad_dt_rejected() {
        assert!(Args::try_parse_from(["solar", "in.txt", "--dt", "soon"]).is_err());
    }
}
