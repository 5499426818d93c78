use clap::{Parser, Subcommand};
use hn_app::{
    AppError, AppResult, Session, TelemetrySnapshot, compile_project, load_project, summarize,
    validate_project,
};
use hn_core::units::display::{bar, celsius, liters_per_minute};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hn-cli")]
#[command(about = "Hydronet CLI - steady-state hydraulic network solver", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate project file syntax and structure
    Validate {
        /// Path to the project YAML/JSON file
        project_path: PathBuf,
    },
    /// Solve the network and print every node and pipe
    Solve {
        /// Path to the project YAML/JSON file
        project_path: PathBuf,
        /// Print the telemetry snapshot as JSON
        #[arg(long)]
        json: bool,
    },
    /// Solve the network at several openings of one valve
    Sweep {
        /// Path to the project YAML/JSON file
        project_path: PathBuf,
        /// Key of the valve node to reposition
        #[arg(long)]
        node: String,
        /// First opening [%]
        #[arg(long, default_value_t = 10.0)]
        from: f64,
        /// Last opening [%]
        #[arg(long, default_value_t = 100.0)]
        to: f64,
        /// Number of openings
        #[arg(long, default_value_t = 10)]
        steps: usize,
    },
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { project_path } => cmd_validate(&project_path),
        Commands::Solve { project_path, json } => cmd_solve(&project_path, json),
        Commands::Sweep {
            project_path,
            node,
            from,
            to,
            steps,
        } => cmd_sweep(&project_path, &node, from, to, steps),
    }
}

fn cmd_validate(project_path: &Path) -> AppResult<()> {
    println!("Validating project: {}", project_path.display());
    let project = load_project(project_path)?;
    validate_project(&project)?;
    compile_project(&project)?;

    let summary = summarize(&project);
    println!("✓ Project is valid: {}", summary.name);
    println!("  Nodes: {} ({} tanks)", summary.node_count, summary.tank_count);
    println!("  Pipes: {}", summary.edge_count);
    if !summary.valve_keys.is_empty() {
        println!("  Valves: {}", summary.valve_keys.join(", "));
    }
    Ok(())
}

fn cmd_solve(project_path: &Path, json: bool) -> AppResult<()> {
    let start = Instant::now();
    let mut session = Session::open(project_path)?;
    let snapshot = session.solve()?;

    if json {
        println!("{}", snapshot.to_json()?);
        return Ok(());
    }

    println!(
        "✓ Converged in {} iterations (residual {:.3e}, {:.3}s)",
        snapshot.iterations,
        snapshot.residual_norm,
        start.elapsed().as_secs_f64()
    );
    print_snapshot(&snapshot);
    Ok(())
}

fn print_snapshot(snapshot: &TelemetrySnapshot) {
    println!("\nNodes:");
    println!(
        "  {:<16} {:<15} {:>10} {:>10} {:>8} {:>8}",
        "key", "type", "p_in [bar]", "p_out[bar]", "T_in[°C]", "T_out[°C]"
    );
    for node in &snapshot.nodes {
        let (Some(inlet), Some(outlet)) = (node.inlets.first(), node.outlets.first()) else {
            continue;
        };
        println!(
            "  {:<16} {:<15} {:>10.4} {:>10.4} {:>8.2} {:>8.2}",
            node.key,
            node.kind,
            bar(inlet.pressure_pa),
            bar(outlet.pressure_pa),
            celsius(inlet.temperature_k),
            celsius(outlet.temperature_k),
        );
    }

    println!("\nPipes:");
    println!(
        "  {:<16} {:>12} {:>9} {:>10} {:>10}",
        "key", "Q [L/min]", "v [m/s]", "Re", "dp [bar]"
    );
    for edge in &snapshot.edges {
        println!(
            "  {:<16} {:>12.2} {:>9.3} {:>10.0} {:>10.4}",
            edge.key,
            liters_per_minute(edge.flow_m3_s),
            edge.velocity_m_s,
            edge.reynolds,
            bar(edge.pressure_drop_pa),
        );
    }
}

fn cmd_sweep(project_path: &Path, node: &str, from: f64, to: f64, steps: usize) -> AppResult<()> {
    if steps == 0 {
        return Err(AppError::InvalidInput("--steps must be at least 1".to_string()));
    }
    let project = load_project(project_path)?;
    let network = compile_project(&project)?;

    let openings: Vec<f64> = if steps == 1 {
        vec![from]
    } else {
        (0..steps)
            .map(|i| from + (to - from) * i as f64 / (steps - 1) as f64)
            .collect()
    };

    // Each point gets its own clone; solves run side by side
    let results: Vec<(f64, AppResult<TelemetrySnapshot>)> = openings
        .par_iter()
        .map(|&pct| {
            let mut session = Session::new();
            session.replace_network(network.clone());
            let run = session
                .set_valve_opening(node, pct)
                .and_then(|applied| session.solve().map(|snapshot| (applied, snapshot)));
            match run {
                Ok((applied, snapshot)) => (applied, Ok(snapshot)),
                Err(err) => (pct, Err(err)),
            }
        })
        .collect();

    println!("Sweep of valve '{}' ({} points):", node, steps);
    println!(
        "  {:>9} {:>10} {:>10} {:>12}",
        "open [%]", "dp [bar]", "p_in [bar]", "Q [L/min]"
    );
    for (pct, result) in results {
        match result {
            Ok(snapshot) => {
                let Some(valve) = snapshot.node(node) else {
                    continue;
                };
                let inlet = valve.inlets.first();
                println!(
                    "  {:>9.1} {:>10.4} {:>10.4} {:>12.2}",
                    pct,
                    bar(valve.pressure_drop_pa().unwrap_or(0.0)),
                    bar(inlet.map_or(0.0, |p| p.pressure_pa)),
                    liters_per_minute(inlet.map_or(0.0, |p| p.flow_m3_s)),
                );
            }
            Err(err) => println!("  {:>9.1} failed: {}", pct, err),
        }
    }
    Ok(())
}
