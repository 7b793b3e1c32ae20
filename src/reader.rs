use crate::{xml, OsmData, OsmNode, OsmWay, Result};
use log::{debug, info};
use osmpbf::{Element, ElementReader};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::time::Instant;

/// Read an OSM extract and collect its highway ways together with the
/// coordinates of every node they reference.
///
/// Files ending in `.osm` or `.xml` (any case) are read as OSM XML, everything else as
/// OSM PBF.
pub fn load<P: AsRef<Path>>(path: P) -> Result<OsmData> {
    let path = path.as_ref();
    let t = Instant::now();
    let is_xml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| {
            ext.eq_ignore_ascii_case("osm") || ext.eq_ignore_ascii_case("xml")
        });
    let data = if is_xml {
        xml::load_xml(path)?
    } else {
        load_pbf(path)?
    };
    info!(
        "Loaded {} highways referencing {} nodes from {} in {:.2}s",
        data.ways.len(),
        data.nodes.len(),
        path.display(),
        t.elapsed().as_secs_f32()
    );
    Ok(data)
}

/// Walk every element of a PBF file, keeping what `filter_map` returns.
pub fn collect_filtered<T, F, P>(path: P, mut filter_map: F) -> Result<Vec<T>>
where
    F: FnMut(Element) -> Option<T>,
    P: AsRef<Path>,
{
    let reader = ElementReader::from_path(path)?;
    let mut items = Vec::new();
    reader.for_each(|element| {
        if let Some(item) = filter_map(element) {
            items.push(item);
        }
    })?;
    Ok(items)
}

/// Two passes over the file: first the highway ways, then the coordinates of
/// the nodes those ways use.
pub fn load_pbf<P: AsRef<Path>>(path: P) -> Result<OsmData> {
    let path = path.as_ref();

    let t = Instant::now();
    let ways = collect_filtered(path, |element| match element {
        Element::Way(way) => OsmWay::from_tags(way.id(), way.refs().collect(), way.tags()),
        _ => None,
    })?;
    debug!("Decoded ways {:.2}s", t.elapsed().as_secs_f32());

    let mut data = OsmData {
        nodes: HashMap::new(),
        ways,
    };
    let used = data.get_used_node_counts();
    debug!(
        "{} of {} highway nodes are shared between ways",
        used.values().filter(|count| **count > 1).count(),
        used.len()
    );
    let used: HashSet<i64> = used.into_keys().collect();

    let t = Instant::now();
    let nodes = collect_filtered(path, |element| {
        let (id, lat, lon) = match element {
            Element::Node(node) => (node.id(), node.lat(), node.lon()),
            Element::DenseNode(node) => (node.id(), node.lat(), node.lon()),
            _ => return None,
        };
        used.contains(&id).then_some((id, OsmNode { lat, lon }))
    })?;
    debug!("Decoded nodes {:.2}s", t.elapsed().as_secs_f32());

    data.nodes.extend(nodes);
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_missing_pbf_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load(dir.path().join("missing.osm.pbf"));
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_xml_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load(dir.path().join("missing.osm"));
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_upper_case_extension_is_read_as_xml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("MAP.OSM");
        std::fs::write(
            &path,
            r#"<osm>
  <node id="1" lat="0.0" lon="0.0" />
  <node id="2" lat="0.0" lon="1.0" />
  <way id="1"><nd ref="1" /><nd ref="2" /><tag k="highway" v="primary" /></way>
</osm>"#,
        )
        .unwrap();

        let data = load(&path).unwrap();
        assert_eq!(data.ways.len(), 1);
        assert_eq!(data.nodes.len(), 2);
    }

    #[test]
    fn test_load_pbf_nodes_and_dense_nodes() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data/roads.osm.pbf");
        let data = load(&path).unwrap();

        // way 11 is a stream, so only way 10 is kept, and node 4 is dropped
        assert_eq!(data.ways.len(), 1);
        assert_eq!(data.ways[0].way_id, 10);
        assert_eq!(data.ways[0].node_ids, vec![1, 2, 3]);

        let mut ids: Vec<_> = data.nodes.keys().copied().collect();
        ids.sort();
        assert_eq!(ids, vec![1, 2, 3]);

        // 2 is a dense node, 3 a plain node
        assert!((data.nodes[&2].lon - 1.0).abs() < 1e-9);
        assert!(data.nodes[&2].lat.abs() < 1e-9);
        assert!((data.nodes[&3].lon - 2.0).abs() < 1e-9);
    }
}
