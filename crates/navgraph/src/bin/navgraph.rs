use std::fs;
use std::path::PathBuf;

use clap::Parser;
use navgraph::{build_navigation_graph, CaptureSet, EdgeCalculator, EdgeCalculatorSettings};

use navgraph::core::level_from_verbosity;
#[cfg(not(feature = "tracing"))]
use navgraph::core::init_with_level;
#[cfg(feature = "tracing")]
use navgraph::core::init_tracing;
#[cfg(feature = "tracing")]
use tracing_log::LogTracer;

use log::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Build a navigation graph from a JSON capture set")]
struct Args {
    /// Capture set JSON (captures, sequences, optional reference)
    #[arg(long)]
    input: PathBuf,

    /// Edge calculator settings JSON; missing fields use defaults
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Write the result here instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Only report the edges of this node
    #[arg(long)]
    node: Option<String>,

    /// Candidate search radius around each node (meters)
    #[arg(long, default_value_t = 50.0)]
    search_radius: f64,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace); `RUST_LOG`
    /// takes precedence with the `tracing` feature
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Emit JSON log lines (with the `tracing` feature)
    #[arg(long)]
    json_logs: bool,
}

fn init_logging(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(feature = "tracing")]
    {
        let _ = LogTracer::init();
        init_tracing(args.json_logs, level_from_verbosity(args.verbose));
    }
    #[cfg(not(feature = "tracing"))]
    {
        if args.json_logs {
            eprintln!("--json-logs needs the `tracing` feature; using plain logs");
        }
        init_with_level(level_from_verbosity(args.verbose))?;
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(&args)?;

    let settings = match &args.settings {
        Some(path) => EdgeCalculatorSettings::load_json(path)?,
        None => EdgeCalculatorSettings::default(),
    };
    let calculator = EdgeCalculator::new(settings)?;

    let input = CaptureSet::load_json(&args.input)?.into_graph_input()?;
    let graph = build_navigation_graph(&input, &calculator, args.search_radius)?;

    let json = match &args.node {
        Some(id) => {
            let edges = graph
                .edges_of(id)
                .ok_or_else(|| format!("no edges computed for node {id}"))?;
            serde_json::to_string_pretty(edges)?
        }
        None => serde_json::to_string_pretty(&graph)?,
    };

    match &args.output {
        Some(path) => {
            fs::write(path, json)?;
            info!("wrote navigation graph to {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
