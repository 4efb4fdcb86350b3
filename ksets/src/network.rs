use crate::graph::{EdgeHandle, Edges, UnGraph};

/// Undirected graph with f64 edge weights. Used to represent one level of the network being clustered.
pub type Graph = UnGraph<f64, u32>;

/// Largest vertex count a `Network` can index
pub const MAX_NODES: usize = u32::MAX as usize;

/// Container for the network graph plus the mass that lives on its vertices rather than its edges.
///
/// Self-loops are never stored as half-edges. The raw weight of a self-loop is kept in
/// `self_weight` instead, and counts twice towards the weighted degree of its vertex. A reduced
/// network uses the same slot for the intra-cluster weight of the cluster a supernode replaced.
#[derive(Debug)]
pub struct Network {
    pub(crate) graph: Graph,
    self_weight: Vec<f64>,
    total_weight: f64,
}

/// Iterator over pairs of (adjacent node id, edge_weight) for all neighbors of a chosen node.
pub struct NeighborAndWeightIter<'a> {
    edge_iter: Edges<'a, f64, u32>,
}

impl Iterator for NeighborAndWeightIter<'_> {
    type Item = (usize, f64);

    fn next(&mut self) -> Option<Self::Item> {
        self.edge_iter
            .next()
            .map(|edge_ref| (edge_ref.target().index() as usize, *edge_ref.weight()))
    }
}

impl Network {
    /// Create a network with `nodes` vertices and no edges
    pub fn new(nodes: usize) -> Network {
        Network {
            graph: Graph::with_nodes(nodes),
            self_weight: vec![0.0; nodes],
            total_weight: 0.0,
        }
    }

    /// Build a network from `(source, target, weight)` triples. Panics if an endpoint is `>= nodes`.
    pub fn from_edges<I: IntoIterator<Item = (usize, usize, f64)>>(nodes: usize, edges: I) -> Network {
        let mut network = Network::new(nodes);
        for (source, target, weight) in edges {
            network.add_edge(source, target, weight);
        }
        network
    }

    /// Reduced network over `nodes` supernodes that keeps the normalization of the level it came from.
    pub(crate) fn reduced(nodes: usize, total_weight: f64) -> Network {
        Network {
            total_weight,
            ..Network::new(nodes)
        }
    }

    /// Add an undirected edge. Repeated edges accumulate as separate entries.
    pub fn add_edge(&mut self, source: usize, target: usize, weight: f64) {
        assert!(
            source < self.nodes() && target < self.nodes(),
            "edge ({source}, {target}) out of range for {} nodes",
            self.nodes()
        );
        self.total_weight += weight;
        if source == target {
            self.self_weight[source] += weight;
        } else {
            self.graph.add_edge((source as u32).into(), (target as u32).into(), weight);
        }
    }

    /// Create an edge between two supernodes without touching the total weight.
    pub(crate) fn add_cross_edge(&mut self, source: usize, target: usize) -> EdgeHandle {
        self.graph.add_edge((source as u32).into(), (target as u32).into(), 0.0)
    }

    /// Add weight to a cross edge created by `add_cross_edge`.
    pub(crate) fn add_to_edge(&mut self, handle: EdgeHandle, weight: f64) {
        self.graph.add_to_edge(handle, weight);
    }

    pub(crate) fn set_self_weight(&mut self, node: usize, weight: f64) {
        self.self_weight[node] = weight;
    }

    /// Number of nodes in the graph
    pub fn nodes(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of stored edges between distinct nodes
    pub fn edges(&self) -> usize {
        self.graph.edge_count()
    }

    /// Sum of the weights of all distinct edges, self-loops included
    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    /// Raw self-loop weight of `node`
    pub fn self_weight(&self, node: usize) -> f64 {
        self.self_weight[node]
    }

    /// Weighted degree of `node`. A self-loop contributes twice its weight.
    pub fn degree(&self, node: usize) -> f64 {
        self.neighbors(node).map(|(_, w)| w).sum::<f64>() + 2.0 * self.self_weight[node]
    }

    /// Iterator over pairs of (adjacent node id, edge_weight) for all neighbors of `node`.
    pub fn neighbors(&'_ self, node: usize) -> NeighborAndWeightIter<'_> {
        NeighborAndWeightIter {
            edge_iter: self.graph.edges((node as u32).into()),
        }
    }
}
