use num_traits::bounds::Bounded;
use num_traits::cast::AsPrimitive;
use num_traits::identities::{One, Zero};
use std::convert::{From, TryFrom};
use std::iter::{repeat, FlatMap, Iterator, Repeat, Zip};
use std::ops::{Add, AddAssign};
use std::slice::Iter;

pub trait IndexTrait:
    Add<Output = Self>
    + AddAssign
    + AsPrimitive<usize>
    + Bounded
    + Clone
    + Copy
    + One
    + PartialEq
    + PartialOrd
    + TryFrom<usize>
    + Zero
where
    Self: std::marker::Sized,
{
}

impl IndexTrait for usize {}
impl IndexTrait for u32 {}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd)]
pub struct Index<Ix>(Ix)
where
    Ix: IndexTrait;

impl<Ix> Index<Ix>
where
    Ix: IndexTrait,
{
    pub fn index(&self) -> Ix {
        self.0
    }
}

impl<Ix> From<Ix> for Index<Ix>
where
    Ix: IndexTrait,
{
    fn from(ix: Ix) -> Self {
        Index(ix)
    }
}

#[derive(Copy, Clone, Debug)]
pub struct Edge<W, NodeIx>
where
    W: Clone,
    NodeIx: IndexTrait,
{
    source: Index<NodeIx>,
    target: Index<NodeIx>,
    weight: W,
}

impl<W, NodeIx> Edge<W, NodeIx>
where
    W: Clone,
    NodeIx: IndexTrait,
{
    pub fn source(&self) -> Index<NodeIx> {
        self.source
    }
    pub fn target(&self) -> Index<NodeIx> {
        self.target
    }
    pub fn weight(&self) -> W {
        self.weight.clone()
    }
}

#[derive(Copy, Clone, Debug)]
pub struct DiEdge<W, NodeIx = usize>
where
    W: Clone,
    NodeIx: IndexTrait,
{
    target: Index<NodeIx>,
    pub(crate) weight: W,
}

/// Positions of the two half-edges of one undirected edge, one in each endpoint's adjacency.
/// Stays valid while edges are only appended.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct EdgeHandle {
    source: usize,
    source_slot: usize,
    target: usize,
    target_slot: usize,
}

pub struct Edges<'a, W, NodeIx = usize>
where
    W: Clone,
    NodeIx: IndexTrait,
{
    source: Index<NodeIx>,
    iter: Iter<'a, DiEdge<W, NodeIx>>,
}

impl<'a, W, NodeIx> Iterator for Edges<'a, W, NodeIx>
where
    W: Clone,
    NodeIx: IndexTrait,
{
    type Item = Edge<&'a W, NodeIx>;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|DiEdge { target, weight }| Edge {
            source: self.source,
            target: *target,
            weight,
        })
    }
}

fn edge_refs_mapper<W, NodeIx>(
    (src, edges): (Index<NodeIx>, &Vec<DiEdge<W, NodeIx>>),
) -> Zip<Repeat<Index<NodeIx>>, Iter<DiEdge<W, NodeIx>>>
where
    W: Clone,
    NodeIx: IndexTrait,
{
    repeat(src).zip(edges.iter())
}

type EdgeRefsMapper<W, NodeIx> =
    fn((Index<NodeIx>, &Vec<DiEdge<W, NodeIx>>)) -> Zip<Repeat<Index<NodeIx>>, Iter<DiEdge<W, NodeIx>>>;
type IndexEdgeMapInput<'a, W, NodeIx> = Zip<Repeat<Index<NodeIx>>, Iter<'a, DiEdge<W, NodeIx>>>;
type IndexEdgeMapOutput<'a, W, NodeIx> = Zip<NodeIndices<NodeIx>, Iter<'a, Vec<DiEdge<W, NodeIx>>>>;

/// Every undirected edge exactly once, reported from its lower-indexed endpoint.
pub struct EdgeReferences<'a, W, NodeIx = usize>
where
    W: Clone,
    NodeIx: IndexTrait,
{
    iter: FlatMap<IndexEdgeMapOutput<'a, W, NodeIx>, IndexEdgeMapInput<'a, W, NodeIx>, EdgeRefsMapper<W, NodeIx>>,
}

impl<'a, W, NodeIx> Iterator for EdgeReferences<'a, W, NodeIx>
where
    W: Clone,
    NodeIx: IndexTrait,
{
    type Item = Edge<&'a W, NodeIx>;

    fn next(&mut self) -> Option<Self::Item> {
        for (source, DiEdge { target, weight }) in self.iter.by_ref() {
            if target.0 >= source.0 {
                return Some(Edge {
                    source,
                    target: *target,
                    weight,
                });
            }
        }
        None
    }
}

pub struct NodeIndices<Ix>
where
    Ix: IndexTrait,
{
    start: Ix,
    end: Ix,
}

impl<Ix> Iterator for NodeIndices<Ix>
where
    Ix: IndexTrait,
{
    type Item = Index<Ix>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.start < self.end {
            let ix = self.start;
            self.start += Ix::one();
            Some(Index(ix))
        } else {
            None
        }
    }
}

/// Undirected graph over a fixed node count. Each edge is stored as two half-edges
/// appended in insertion order to the adjacency of its endpoints.
#[derive(Debug)]
pub struct UnGraph<W, NodeIx = usize>
where
    W: AddAssign + Clone + Zero,
    NodeIx: IndexTrait,
    <NodeIx as TryFrom<usize>>::Error: std::fmt::Debug,
{
    pub(crate) edges: Vec<Vec<DiEdge<W, NodeIx>>>,
    total_edges: usize,
}

impl<W, NodeIx> UnGraph<W, NodeIx>
where
    W: AddAssign + Clone + Zero,
    NodeIx: IndexTrait,
    <NodeIx as TryFrom<usize>>::Error: std::fmt::Debug,
{
    pub fn with_nodes(nodes: usize) -> Self {
        assert!(
            nodes <= NodeIx::max_value().as_(),
            "{nodes} nodes do not fit the graph's index type"
        );
        UnGraph {
            edges: (0..nodes).map(|_| Vec::new()).collect(),
            total_edges: 0,
        }
    }

    pub fn add_edge(&mut self, source: Index<NodeIx>, target: Index<NodeIx>, weight: W) -> EdgeHandle {
        let (s, t): (usize, usize) = (source.0.as_(), target.0.as_());
        let source_slot = self.edges[s].len();
        self.edges[s].push(DiEdge {
            target,
            weight: weight.clone(),
        });
        let target_slot = self.edges[t].len();
        self.edges[t].push(DiEdge { target: source, weight });
        self.total_edges += 1;
        EdgeHandle {
            source: s,
            source_slot,
            target: t,
            target_slot,
        }
    }

    /// Add `delta` to both half-edges of the edge behind `handle`.
    pub fn add_to_edge(&mut self, handle: EdgeHandle, delta: W) {
        self.edges[handle.source][handle.source_slot].weight += delta.clone();
        self.edges[handle.target][handle.target_slot].weight += delta;
    }

    pub fn edge_count(&self) -> usize {
        self.total_edges
    }

    pub fn node_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edges(&self, source: Index<NodeIx>) -> Edges<W, NodeIx> {
        Edges {
            source,
            iter: self.edges[source.0.as_()].iter(),
        }
    }

    pub fn node_indices(&self) -> NodeIndices<NodeIx> {
        NodeIndices {
            start: NodeIx::zero(),
            end: NodeIx::try_from(self.edges.len()).unwrap(),
        }
    }

    pub fn edge_references(&self) -> EdgeReferences<W, NodeIx> {
        let iter = self
            .node_indices()
            .zip(self.edges.iter())
            .flat_map(edge_refs_mapper as EdgeRefsMapper<W, NodeIx>);
        EdgeReferences { iter }
    }
}
