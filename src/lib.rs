use std::collections::HashMap;

mod error;
pub mod distance;
pub mod graph;
pub mod ids;
pub mod reader;
mod xml;

pub use distance::{edge_weight, write_edges, Metric, Stats};
pub use error::{Error, Result};
pub use graph::{Edge, RoadGraph};
pub use reader::load;

/// Direction of travel allowed on a way, from its `oneway` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Oneway {
    #[default]
    No,
    Forward,
    Backward,
}

impl Oneway {
    pub fn from_tag(value: &str) -> Oneway {
        match value {
            "yes" | "true" | "1" => Oneway::Forward,
            "-1" | "reverse" => Oneway::Backward,
            _ => Oneway::No,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OsmNode {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OsmWay {
    pub way_id: i64,

    pub node_ids: Vec<i64>, // The nodes that make up this way, in order.

    pub oneway: Oneway,
}

impl OsmWay {
    /// Builds a way from its id, node refs and tags. Returns `None` unless the
    /// way is tagged `highway`.
    pub fn from_tags<'a>(
        way_id: i64,
        node_ids: Vec<i64>,
        tags: impl Iterator<Item = (&'a str, &'a str)>,
    ) -> Option<OsmWay> {
        let mut is_highway = false;
        let mut oneway = Oneway::No;
        for (k, v) in tags {
            match k {
                "highway" => is_highway = true,
                "oneway" => oneway = Oneway::from_tag(v),
                _ => {}
            }
        }

        is_highway.then(|| OsmWay {
            way_id,
            node_ids,
            oneway,
        })
    }
}

/// Highway ways of an extract together with the coordinates of the nodes
/// they reference.
#[derive(Debug, Default)]
pub struct OsmData {
    pub nodes: HashMap<i64, OsmNode>,
    pub ways: Vec<OsmWay>,
}

impl OsmData {
    /// Helper function to get a count of the number of times nodes are used by the ways.
    pub fn get_used_node_counts(&self) -> HashMap<i64, i64> {
        let mut node_use_count = HashMap::new();
        for way in self.ways.iter() {
            for node_id in way.node_ids.iter() {
                let count = node_use_count.entry(*node_id).or_insert(0);
                *count += 1;
            }
        }

        node_use_count
    }
}
