use crate::ids::{IdTable, IdTableBuilder};
use crate::{Error, OsmData, Oneway, Result};
use geo::Point;

/// One line of output: two compact node ids and the edge weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub source: u32,
    pub target: u32,
    pub weight: u64,
}

/// Road network with nodes relabeled to `0..n`.
///
/// Nodes are numbered in the order they are first seen while walking the
/// highway ways, and neighbour lists keep insertion order, so edge
/// enumeration is stable for a given input.
#[derive(Debug)]
pub struct RoadGraph {
    ids: IdTable,
    coords: Vec<Point>,
    adjacency: Vec<Vec<u32>>,
    directed: bool,
    num_ways: usize,
    num_edges: usize,
}

impl RoadGraph {
    /// Builds the graph from consecutive node pairs of every way.
    ///
    /// In directed mode `oneway` tags restrict which direction is added,
    /// otherwise each pair becomes one undirected edge and repeated pairs
    /// collapse.
    pub fn from_osm(data: &OsmData, directed: bool) -> Result<RoadGraph> {
        let mut builder = IdTableBuilder::new();
        let mut graph = RoadGraph {
            ids: IdTable::default(),
            coords: Vec::new(),
            adjacency: Vec::new(),
            directed,
            num_ways: 0,
            num_edges: 0,
        };

        for way in data.ways.iter().filter(|way| way.node_ids.len() > 1) {
            let nodes: Vec<u32> = way
                .node_ids
                .iter()
                .map(|node_id| builder.insert(*node_id))
                .collect();
            graph.num_ways += 1;
            if let Some(max) = nodes.iter().max() {
                if graph.adjacency.len() <= *max as usize {
                    graph.adjacency.resize(*max as usize + 1, Vec::new());
                }
            }

            for pair in nodes.windows(2) {
                let (a, b) = (pair[0], pair[1]);
                match (directed, way.oneway) {
                    (true, Oneway::Forward) => graph.add_edge(a, b),
                    (true, Oneway::Backward) => graph.add_edge(b, a),
                    (true, Oneway::No) => {
                        graph.add_edge(a, b);
                        graph.add_edge(b, a);
                    }
                    (false, _) => graph.add_edge(a, b),
                }
            }
        }

        graph.ids = builder.build();
        graph.coords = graph
            .ids
            .osm_ids()
            .iter()
            .map(|osm_id| match data.nodes.get(osm_id) {
                Some(node) => Ok(Point::new(node.lon, node.lat)),
                None => Err(Error::MissingCoordinate(*osm_id)),
            })
            .collect::<Result<_>>()?;

        Ok(graph)
    }

    fn add_edge(&mut self, source: u32, target: u32) {
        if self.adjacency[source as usize].contains(&target) {
            return;
        }
        self.adjacency[source as usize].push(target);
        if !self.directed && source != target {
            self.adjacency[target as usize].push(source);
        }
        self.num_edges += 1;
    }

    /// Enumerates edges node by node. Undirected edges are reported once,
    /// from their lower endpoint.
    pub fn edges(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.adjacency
            .iter()
            .enumerate()
            .flat_map(move |(source, targets)| {
                let source = source as u32;
                targets
                    .iter()
                    .copied()
                    .filter(move |target| self.directed || *target >= source)
                    .map(move |target| (source, target))
            })
    }

    /// Coordinate of a node as a `geo::Point` (x = lon, y = lat).
    pub fn coord(&self, node: u32) -> Point {
        self.coords[node as usize]
    }

    pub fn osm_id(&self, node: u32) -> Option<i64> {
        self.ids.osm_id(node)
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Ways that contributed at least one edge.
    pub fn number_of_ways(&self) -> usize {
        self.num_ways
    }

    pub fn number_of_nodes(&self) -> usize {
        self.coords.len()
    }

    pub fn number_of_edges(&self) -> usize {
        self.num_edges
    }
}
