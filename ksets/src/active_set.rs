use std::iter::Copied;
use std::slice::Iter;

const ABSENT: usize = usize::MAX;

/// Set of ids drawn from `0..universe` with O(1) insert, erase and membership test.
///
/// Present ids are packed at the front of `dense`; `position[id]` points back into it.
/// Erasing swaps the last present id into the freed slot, so iteration order is stable
/// only until the next mutation.
#[derive(Debug, Clone)]
pub struct ActiveSet {
    dense: Vec<usize>,
    position: Vec<usize>,
}

impl ActiveSet {
    /// Empty set over ids `0..universe`
    pub fn new(universe: usize) -> ActiveSet {
        ActiveSet {
            dense: Vec::with_capacity(universe),
            position: vec![ABSENT; universe],
        }
    }

    /// Set containing every id of `0..universe`
    pub fn full(universe: usize) -> ActiveSet {
        ActiveSet {
            dense: (0..universe).collect(),
            position: (0..universe).collect(),
        }
    }

    /// Add `id`. No-op if already present.
    pub fn insert(&mut self, id: usize) {
        if self.position[id] == ABSENT {
            self.position[id] = self.dense.len();
            self.dense.push(id);
        }
    }

    /// Remove `id`, which must be present.
    pub fn erase(&mut self, id: usize) {
        let pos = self.position[id];
        assert!(pos != ABSENT, "erasing id {id} that is not in the set");
        let last = self.dense.len() - 1;
        self.dense.swap(pos, last);
        self.dense.pop();
        if pos != last {
            self.position[self.dense[pos]] = pos;
        }
        self.position[id] = ABSENT;
    }

    /// Whether `id` is present
    pub fn contains(&self, id: usize) -> bool {
        self.position.get(id).map_or(false, |&p| p != ABSENT)
    }

    /// Number of present ids
    pub fn len(&self) -> usize {
        self.dense.len()
    }

    /// True if no id is present
    pub fn is_empty(&self) -> bool {
        self.dense.is_empty()
    }

    /// Present ids, each exactly once
    pub fn iter(&self) -> Copied<Iter<'_, usize>> {
        self.dense.iter().copied()
    }
}

impl<'a> IntoIterator for &'a ActiveSet {
    type Item = usize;
    type IntoIter = Copied<Iter<'a, usize>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
