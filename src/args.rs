use std::path::PathBuf;

use clap::Parser;
use osm2edges::Metric;

/// Converts the road network of an OpenStreetMap extract into a weighted edge list
#[derive(Debug, Parser)]
#[command(about, version)]
pub struct Args {
    /// Verbose mode (-v, -vv, etc.)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Input OSM file (.osm XML or .osm.pbf)
    pub input: PathBuf,

    /// Write edges to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Respect oneway tags and emit directed edges
    #[arg(long)]
    pub directed: bool,

    /// How edge lengths are measured
    #[arg(long, value_enum, default_value_t = Metric::Haversine)]
    pub metric: Metric,

    /// Write a JSON summary of the graph to this file
    #[arg(long)]
    pub stats: Option<PathBuf>,
}
