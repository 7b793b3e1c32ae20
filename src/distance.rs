use crate::graph::{Edge, RoadGraph};
use crate::Result;
use geo::{Distance, Geodesic, Haversine, Point};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// How the length of an edge is measured on the Earth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Metric {
    /// Great-circle distance on a sphere with the mean Earth radius.
    #[default]
    Haversine,
    /// Shortest path on the WGS84 ellipsoid (Karney).
    Geodesic,
}

impl Metric {
    /// Distance between two points in meters.
    pub fn distance(self, a: Point, b: Point) -> f64 {
        match self {
            Metric::Haversine => Haversine::distance(a, b),
            Metric::Geodesic => Geodesic::distance(a, b),
        }
    }
}

/// Rounded distance in meters plus one, so that every weight is positive.
pub fn edge_weight(metric: Metric, a: Point, b: Point) -> u64 {
    to_weight(metric.distance(a, b))
}

fn to_weight(length: f64) -> u64 {
    length.round() as u64 + 1
}

/// Summary of a written edge list.
#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq)]
pub struct Stats {
    pub nodes: usize,
    pub edges: usize,
    pub ways: usize,
    pub directed: bool,
    pub total_length_m: f64,
    pub min_weight: Option<u64>,
    pub max_weight: Option<u64>,
}

impl Stats {
    fn add(&mut self, length: f64, weight: u64) {
        self.edges += 1;
        self.total_length_m += length;
        self.min_weight = Some(self.min_weight.map_or(weight, |w| w.min(weight)));
        self.max_weight = Some(self.max_weight.map_or(weight, |w| w.max(weight)));
    }

    /// Pretty-printed JSON report.
    pub fn write_json<W: Write>(&self, writer: W) -> Result<()> {
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }
}

impl RoadGraph {
    /// Edges of the graph with their weights, in enumeration order.
    pub fn weighted_edges(&self, metric: Metric) -> impl Iterator<Item = Edge> + '_ {
        self.edges().map(move |(source, target)| Edge {
            source,
            target,
            weight: edge_weight(metric, self.coord(source), self.coord(target)),
        })
    }
}

/// Write one `source target weight` line per edge.
pub fn write_edges<W: Write>(graph: &RoadGraph, metric: Metric, mut writer: W) -> Result<Stats> {
    let mut stats = Stats {
        nodes: graph.number_of_nodes(),
        ways: graph.number_of_ways(),
        directed: graph.is_directed(),
        ..Default::default()
    };

    for (source, target) in graph.edges() {
        let length = metric.distance(graph.coord(source), graph.coord(target));
        let weight = to_weight(length);
        writeln!(writer, "{} {} {}", source, target, weight)?;
        stats.add(length, weight);
    }
    writer.flush()?;

    Ok(stats)
}
