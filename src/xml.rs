use crate::{Error, OsmData, OsmNode, OsmWay, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

pub fn load_xml(path: &Path) -> Result<OsmData> {
    let file = File::open(path)?;
    parse_xml(BufReader::new(file))
}

#[derive(Default)]
struct WayData {
    way_id: i64,
    node_refs: Vec<i64>,
    tags: Vec<(String, String)>,
}

#[derive(Default)]
struct XmlLoader {
    nodes: HashMap<i64, OsmNode>,
    ways: Vec<OsmWay>,
    current_way: Option<WayData>,
}

fn get_attr_value(event: &BytesStart<'_>, key: &[u8]) -> Result<Option<String>> {
    for attr in event.attributes().with_checks(false) {
        let attr = attr?;
        if attr.key.as_ref() == key {
            return Ok(Some(attr.unescape_value()?.to_string()));
        }
    }
    Ok(None)
}

fn parse_attr<T: FromStr>(event: &BytesStart<'_>, key: &[u8]) -> Result<Option<T>> {
    match get_attr_value(event, key)? {
        None => Ok(None),
        Some(value) => value
            .parse::<T>()
            .map(Some)
            .map_err(|_| invalid_attribute(event, key, value)),
    }
}

fn required_attr<T: FromStr>(event: &BytesStart<'_>, key: &[u8]) -> Result<T> {
    parse_attr(event, key)?.ok_or_else(|| invalid_attribute(event, key, String::new()))
}

/// Like `parse_attr`, but `NaN` and infinities are rejected.
fn coordinate_attr(event: &BytesStart<'_>, key: &[u8]) -> Result<Option<f64>> {
    match parse_attr::<f64>(event, key)? {
        Some(value) if !value.is_finite() => {
            Err(invalid_attribute(event, key, value.to_string()))
        }
        value => Ok(value),
    }
}

fn invalid_attribute(event: &BytesStart<'_>, key: &[u8], value: String) -> Error {
    Error::InvalidAttribute {
        element: String::from_utf8_lossy(event.name().as_ref()).into_owned(),
        name: String::from_utf8_lossy(key).into_owned(),
        value,
    }
}

impl XmlLoader {
    /// Handles `<node>`, `<way>`, `<nd>` and `<tag>`. `has_children` is false
    /// for self-closing elements.
    fn element(&mut self, e: &BytesStart<'_>, has_children: bool) -> Result<()> {
        match e.name().as_ref() {
            b"node" => {
                // Deleted nodes in change files come without coordinates.
                let id = required_attr(e, b"id")?;
                let lat = coordinate_attr(e, b"lat")?;
                let lon = coordinate_attr(e, b"lon")?;
                if let (Some(lat), Some(lon)) = (lat, lon) {
                    self.nodes.insert(id, OsmNode { lat, lon });
                }
            }
            b"way" if has_children => {
                self.current_way = Some(WayData {
                    way_id: required_attr(e, b"id")?,
                    ..Default::default()
                });
            }
            b"nd" => {
                if let Some(way) = self.current_way.as_mut() {
                    way.node_refs.push(required_attr(e, b"ref")?);
                }
            }
            b"tag" => {
                if let Some(way) = self.current_way.as_mut() {
                    let key = get_attr_value(e, b"k")?;
                    let value = get_attr_value(e, b"v")?;
                    if let (Some(key), Some(value)) = (key, value) {
                        way.tags.push((key, value));
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn end_way(&mut self) {
        if let Some(way) = self.current_way.take() {
            let tags = way.tags.iter().map(|(k, v)| (k.as_str(), v.as_str()));
            if let Some(way) = OsmWay::from_tags(way.way_id, way.node_refs, tags) {
                self.ways.push(way);
            }
        }
    }

    fn finish(mut self) -> OsmData {
        let used: HashSet<i64> = self
            .ways
            .iter()
            .flat_map(|way| way.node_ids.iter().copied())
            .collect();
        self.nodes.retain(|id, _| used.contains(id));

        OsmData {
            nodes: self.nodes,
            ways: self.ways,
        }
    }
}

/// Parse OSM XML, keeping highway ways and the nodes they reference.
pub fn parse_xml<R: BufRead>(input: R) -> Result<OsmData> {
    let mut reader = Reader::from_reader(input);
    let mut loader = XmlLoader::default();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Eof => break,
            Event::Start(e) => loader.element(&e, true)?,
            Event::Empty(e) => loader.element(&e, false)?,
            Event::End(e) => {
                if e.name().as_ref() == b"way" {
                    loader.end_way();
                }
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(loader.finish())
}
