mod args;

use clap::Parser;
use log::info;
use osm2edges::{load, write_edges, Result, RoadGraph};
use std::fs::File;
use std::io::{self, BufWriter};
use std::time::Instant;

fn run(args: args::Args) -> Result<()> {
    let data = load(&args.input)?;

    let t = Instant::now();
    let graph = RoadGraph::from_osm(&data, args.directed)?;
    drop(data);
    info!(
        "Built graph with {} nodes and {} edges in {:.2}s",
        graph.number_of_nodes(),
        graph.number_of_edges(),
        t.elapsed().as_secs_f32()
    );

    let stats = match &args.output {
        Some(path) => write_edges(&graph, args.metric, BufWriter::new(File::create(path)?))?,
        None => write_edges(&graph, args.metric, BufWriter::new(io::stdout().lock()))?,
    };
    info!(
        "Wrote {} edges, total length {:.1} km",
        stats.edges,
        stats.total_length_m / 1000.0
    );

    if let Some(path) = &args.stats {
        stats.write_json(File::create(path)?)?;
    }

    Ok(())
}

fn main() {
    let args = args::Args::parse();
    let level = match args.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_module_path(false)
        .init();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
