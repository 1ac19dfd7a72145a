use crate::error::Error;
use crate::token::Pos;
use indexmap::map::Entry;
use indexmap::IndexMap;

// name -> (address, where it was defined)
// Iteration order is discovery order.
#[derive(Debug, Default)]
pub struct Labels {
    labels: IndexMap<String, (u32, Pos)>,
}

impl Labels {
    pub fn new() -> Self {
        Labels {
            labels: IndexMap::new(),
        }
    }

    pub fn define(&mut self, name: String, addr: u32, pos: Pos) -> Result<(), Error> {
        match self.labels.entry(name) {
            Entry::Occupied(prev) => Err(Error::DuplicateLabel {
                name: prev.key().clone(),
                pos,
                first: prev.get().1,
            }),
            Entry::Vacant(slot) => {
                slot.insert((addr, pos));
                Ok(())
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<u32> {
        self.labels.get(name).map(|(addr, _)| *addr)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.labels
            .iter()
            .map(|(name, (addr, _))| (name.as_str(), *addr))
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[test]
fn test() {
    let mut labels = Labels::new();
    labels.define("end".into(), 8, Pos { line: 9 }).unwrap();
    labels.define("start".into(), 0, Pos { line: 1 }).unwrap();

    assert_eq!(labels.get("start"), Some(0));
    assert_eq!(labels.get("end"), Some(8));
    assert_eq!(labels.get("middle"), None);

    // Discovery order, not sorted
    let order: Vec<_> = labels.iter().collect();
    assert_eq!(order, vec![("end", 8), ("start", 0)]);

    match labels.define("end".into(), 12, Pos { line: 20 }) {
        Err(Error::DuplicateLabel { name, pos, first }) => {
            assert_eq!(name, "end");
            assert_eq!(pos.line, 20);
            assert_eq!(first.line, 9);
        }
        other => panic!("expected duplicate label, got {:?}", other),
    }
    assert_eq!(labels.get("end"), Some(8));
    assert_eq!(labels.len(), 2);
}
