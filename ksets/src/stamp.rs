const UNOWNED: usize = usize::MAX;

/// Per-key slot remembering which owner last wrote it, so a scan over one owner's
/// neighborhood can deduplicate keys in O(degree) without clearing anything between owners.
#[derive(Default)]
pub(crate) struct StampTable<T> {
    owner: Vec<usize>,
    slot: Vec<T>,
}

impl<T: Copy + Default> StampTable<T> {
    pub fn new() -> Self {
        StampTable {
            owner: Vec::new(),
            slot: Vec::new(),
        }
    }

    /// Forget every record and size the table for keys `0..len`.
    pub fn reset(&mut self, len: usize) {
        self.owner.clear();
        self.owner.resize(len, UNOWNED);
        self.slot.clear();
        self.slot.resize(len, T::default());
    }

    /// The value `owner` recorded for `key`, if `owner` was the last to record it.
    pub fn get(&self, key: usize, owner: usize) -> Option<T> {
        if self.owner[key] == owner {
            Some(self.slot[key])
        } else {
            None
        }
    }

    pub fn record(&mut self, key: usize, owner: usize, value: T) {
        self.owner[key] = owner;
        self.slot[key] = value;
    }
}
