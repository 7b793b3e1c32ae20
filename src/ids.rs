use std::collections::HashMap;

/// Maps OSM node ids to a consecutive range of ids starting at 0.
#[derive(Debug, Default)]
pub struct IdTable {
    compact: HashMap<i64, u32>,
    // reverse mapping, indexed by compact id
    osm: Vec<i64>,
}

#[derive(Debug, Default)]
pub struct IdTableBuilder {
    compact: HashMap<i64, u32>,
    osm: Vec<i64>,
}

impl IdTableBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    /// Inserts an id and returns its mapped index. Ids already seen keep
    /// the index they got on first insertion.
    pub fn insert(&mut self, x: i64) -> u32 {
        let next_id = self.osm.len() as u32;
        let osm = &mut self.osm;
        *self.compact.entry(x).or_insert_with(|| {
            osm.push(x);
            next_id
        })
    }

    pub fn build(self) -> IdTable {
        IdTable {
            compact: self.compact,
            osm: self.osm,
        }
    }
}

impl IdTable {
    pub fn get(&self, x: i64) -> Option<u32> {
        self.compact.get(&x).copied()
    }

    /// The OSM id a compact id was assigned to.
    pub fn osm_id(&self, id: u32) -> Option<i64> {
        self.osm.get(id as usize).copied()
    }

    pub fn len(&self) -> usize {
        self.osm.len()
    }

    pub fn is_empty(&self) -> bool {
        self.osm.is_empty()
    }

    /// OSM ids in compact id order.
    pub fn osm_ids(&self) -> &[i64] {
        &self.osm
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_mapping_in_first_seen_order() {
        let mut builder = IdTableBuilder::new();
        let data = [9, 8, 7, 4, 3, 10, 13];
        for x in data.iter() {
            builder.insert(*x);
        }

        let lookup = builder.build();
        assert_eq!(lookup.len(), data.len());
        for (pos, x) in data.iter().enumerate() {
            assert_eq!(lookup.get(*x), Some(pos as u32));
            assert_eq!(lookup.osm_id(pos as u32), Some(*x));
        }

        for x in [0, 1, 2, 5, 6, 11, 12, 14].iter() {
            assert_eq!(lookup.get(*x), None);
        }
    }

    #[test]
    fn test_repeated_ids_keep_first_index() {
        let mut builder = IdTableBuilder::new();
        assert_eq!(builder.insert(1 << 40), 0);
        assert_eq!(builder.insert(-5), 1);
        assert_eq!(builder.insert(1 << 40), 0);
        assert_eq!(builder.insert(17), 2);

        let lookup = builder.build();
        assert_eq!(lookup.len(), 3);
        assert_eq!(lookup.osm_ids(), &[1 << 40, -5, 17]);
        assert_eq!(lookup.osm_id(3), None);
    }
}
