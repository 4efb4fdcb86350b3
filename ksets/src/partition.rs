const NONE: usize = usize::MAX;

/// Assignment of vertices `0..n` to cluster ids `0..n`.
///
/// Members of a cluster form an intrusive doubly linked list threaded through `next`/`prev`,
/// arrays indexed by vertex id, with one `head` per cluster. Moving a vertex is an O(1) splice
/// and enumerating a cluster costs O(members).
#[derive(Debug, Clone)]
pub struct Partition {
    which: Vec<usize>,
    size: Vec<usize>,
    head: Vec<usize>,
    next: Vec<usize>,
    prev: Vec<usize>,
}

/// Members of one cluster at the time `Partition::members` was called.
pub struct Members<'a> {
    partition: &'a Partition,
    cursor: usize,
}

impl Iterator for Members<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.cursor == NONE {
            return None;
        }
        let v = self.cursor;
        self.cursor = self.partition.next[v];
        Some(v)
    }
}

impl Partition {
    /// Every vertex in its own cluster: `which_cluster(v) == v`
    pub fn singletons(n: usize) -> Partition {
        Partition {
            which: (0..n).collect(),
            size: vec![1; n],
            head: (0..n).collect(),
            next: vec![NONE; n],
            prev: vec![NONE; n],
        }
    }

    /// Partition with vertex `v` in cluster `assignment[v]`. Every cluster id must be `< assignment.len()`.
    pub fn from_assignment(assignment: &[usize]) -> Partition {
        let n = assignment.len();
        let mut p = Partition {
            which: vec![NONE; n],
            size: vec![0; n],
            head: vec![NONE; n],
            next: vec![NONE; n],
            prev: vec![NONE; n],
        };
        // Insert in reverse so each member list comes out in ascending vertex order.
        for (v, &c) in assignment.iter().enumerate().rev() {
            assert!(c < n, "cluster id {c} of vertex {v} out of range for {n} vertices");
            p.link(v, c);
        }
        p
    }

    /// Number of vertices
    pub fn nodes(&self) -> usize {
        self.which.len()
    }

    /// Cluster currently holding `v`
    pub fn which_cluster(&self, v: usize) -> usize {
        self.which[v]
    }

    /// Number of members of cluster `c`
    pub fn size(&self, c: usize) -> usize {
        self.size[c]
    }

    /// Move `v` from its current cluster into `c`
    pub fn move_to(&mut self, v: usize, c: usize) {
        assert!(c < self.size.len(), "moving vertex {v} to non-existent cluster {c}");
        if self.which[v] == c {
            return;
        }
        self.unlink(v);
        self.link(v, c);
    }

    /// Members of cluster `c`. The partition cannot be changed while the iterator lives.
    pub fn members(&self, c: usize) -> Members<'_> {
        Members {
            partition: self,
            cursor: self.head[c],
        }
    }

    /// Labels of all vertices, indexed by vertex id
    pub fn labels(&self) -> &[usize] {
        &self.which
    }

    /// Panics if any member list disagrees with the cluster sizes or vertex labels.
    pub fn assert_consistent(&self) {
        let mut seen = 0;
        for c in 0..self.size.len() {
            let mut count = 0;
            for v in self.members(c) {
                assert_eq!(self.which[v], c, "vertex {v} listed in cluster {c} but labelled {}", self.which[v]);
                count += 1;
                assert!(count <= self.size[c], "cluster {c} lists more members than its size {}", self.size[c]);
            }
            assert_eq!(count, self.size[c], "cluster {c} lists {count} members but has size {}", self.size[c]);
            seen += count;
        }
        assert_eq!(seen, self.nodes(), "member lists cover {seen} of {} vertices", self.nodes());
    }

    fn link(&mut self, v: usize, c: usize) {
        let old_head = self.head[c];
        self.next[v] = old_head;
        self.prev[v] = NONE;
        if old_head != NONE {
            self.prev[old_head] = v;
        }
        self.head[c] = v;
        self.which[v] = c;
        self.size[c] += 1;
    }

    fn unlink(&mut self, v: usize) {
        let c = self.which[v];
        let (p, n) = (self.prev[v], self.next[v]);
        if p == NONE {
            self.head[c] = n;
        } else {
            self.next[p] = n;
        }
        if n != NONE {
            self.prev[n] = p;
        }
        self.size[c] -= 1;
    }
}
