//! Graph state shared by the generator and the reference strategies: a
//! forest with stable edge indexing, a bounded-arboricity graph as a tuple
//! of edge-disjoint forests, and an orientation with per-vertex outdegree
//! bookkeeping.

use std::collections::BTreeSet;
use std::io::{self, Write};

use crate::link_cut_tree::{LinkCutTree, SplayLct};
use crate::order_stat_tree::OrderStatTree;

pub use crate::link_cut_tree::Node;

/// An edge as an unordered pair, canonicalised so `first <= second`.
pub type Edge = (Node, Node);

pub fn ordered(a: Node, b: Node) -> Edge {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

const DOT_NODE_STYLE: &str = "  node [margin=0 shape=circle style=filled]";

/// Undirected graph of arboricity one. The ordered edge multiset provides
/// stable indexed access, the link/cut trees reject cycle-closing edges.
#[derive(Debug)]
pub struct Forest {
    v: usize,
    edges: OrderStatTree<Edge>,
    links: SplayLct,
}

impl Forest {
    pub fn new(v: usize) -> Self {
        Self {
            v,
            edges: OrderStatTree::new(),
            links: SplayLct::new(v),
        }
    }

    pub fn node_count(&self) -> usize {
        self.v
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_adjacent(&self, va: Node, vb: Node) -> bool {
        self.check_node(va);
        self.check_node(vb);
        self.edges.contains(&ordered(va, vb))
    }

    /// Returns true iff the insertion was successful: the endpoints differ,
    /// and connecting them does not produce a cycle (presence of the edge is
    /// a special case of connectivity).
    pub fn insert_edge(&mut self, va: Node, vb: Node) -> bool {
        self.check_node(va);
        self.check_node(vb);
        let (va, vb) = ordered(va, vb);

        if va == vb || self.links.connected(va, vb) {
            return false;
        }

        self.edges.insert((va, vb));
        self.links.link(va, vb);
        true
    }

    /// Removes the edge. Has no effect when the edge is absent.
    pub fn delete_edge(&mut self, va: Node, vb: Node) {
        let (va, vb) = ordered(va, vb);
        if self.is_adjacent(va, vb) {
            self.edges.remove(&(va, vb));
            self.links.cut(va, vb);
        }
    }

    /// The i-th edge in key order, numbering from 0.
    pub fn get_edge(&self, index: usize) -> Edge {
        assert!(index < self.edge_count(), "edge index {index} out of range");
        *self.edges.nth(index)
    }

    pub fn all_edges(&self) -> Vec<Edge> {
        self.edges.collect()
    }

    /// Description in DOT format (graphviz-friendly).
    pub fn write_dot(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "graph {{")?;
        writeln!(out, "{DOT_NODE_STYLE}")?;
        for (u, v) in self.all_edges() {
            writeln!(out, "  {u} -- {v}")?;
        }
        writeln!(out, "}}")
    }

    fn check_node(&self, u: Node) {
        assert!(u < self.v, "node {u} out of range, |V| = {}", self.v);
    }
}

/// Bounded-arboricity graph, represented as a collection of forests where
/// every edge belongs to one particular forest.
#[derive(Debug)]
pub struct BoundedArbGraph {
    v: usize,
    alpha: usize,
    forests: Vec<Forest>,
}

impl BoundedArbGraph {
    pub fn new(v: usize, alpha: usize) -> Self {
        assert!(alpha > 0, "arboricity bound must be positive");
        Self {
            v,
            alpha,
            forests: (0..alpha).map(|_| Forest::new(v)).collect(),
        }
    }

    pub fn node_count(&self) -> usize {
        self.v
    }

    pub fn alpha(&self) -> usize {
        self.alpha
    }

    pub fn is_adjacent(&self, va: Node, vb: Node) -> bool {
        self.forests.iter().any(|f| f.is_adjacent(va, vb))
    }

    /// Returns true iff the insertion into the named forest was successful.
    /// Fails when any forest already holds the edge (the forests' edge sets
    /// stay pairwise disjoint) or the forest rejects it.
    pub fn insert_edge(&mut self, forest_index: usize, va: Node, vb: Node) -> bool {
        assert!(forest_index < self.alpha, "forest index out of range");
        if self.is_adjacent(va, vb) {
            return false;
        }
        self.forests[forest_index].insert_edge(va, vb)
    }

    /// Removes the edge from whichever forest holds it.
    pub fn delete_edge(&mut self, va: Node, vb: Node) {
        for f in &mut self.forests {
            f.delete_edge(va, vb);
        }
    }

    pub fn edge_count(&self) -> usize {
        self.forests.iter().map(Forest::edge_count).sum()
    }

    /// The i-th edge under the flat indexing that concatenates the forests
    /// in index order. Numbering starts from 0.
    pub fn get_edge(&self, index: usize) -> Edge {
        assert!(
            index < self.edge_count(),
            "edge index {index} out of range, edge count = {}",
            self.edge_count()
        );
        let mut index = index;
        for f in &self.forests {
            if index >= f.edge_count() {
                index -= f.edge_count();
            } else {
                return f.get_edge(index);
            }
        }
        unreachable!("index checked against the total edge count");
    }

    /// DOT description where each forest has its own color.
    pub fn write_dot(&self, out: &mut impl Write) -> io::Result<()> {
        const PALETTE: [&str; 7] = [
            "navy", "red", "darkgreen", "chocolate", "purple", "dimgray", "black",
        ];
        writeln!(out, "graph {{")?;
        writeln!(out, "{DOT_NODE_STYLE}")?;
        writeln!(out, "  edge [penwidth=5]")?;
        for (f, forest) in self.forests.iter().enumerate() {
            writeln!(out, "  edge [color={}]", PALETTE[f % PALETTE.len()])?;
            for (u, v) in forest.all_edges() {
                writeln!(out, "  {u} -- {v}")?;
            }
        }
        writeln!(out, "}}")
    }
}

/// A forest orientation: every edge points one way, and the structure keeps
/// per-vertex outdegrees plus reverse adjacency for in-neighbour lookup.
/// Used by both reference strategies.
#[derive(Debug, Clone)]
pub struct ForestOrientation {
    v: usize,
    /// Current outdegrees, node numbering from 0.
    outdegs: Vec<usize>,
    /// A pair (u, v) denotes an edge oriented from u to v.
    directions: BTreeSet<(Node, Node)>,
    /// Reverse lookup: in-neighbours per vertex.
    rev_directions: Vec<BTreeSet<Node>>,
}

impl ForestOrientation {
    pub fn new(v: usize) -> Self {
        Self {
            v,
            outdegs: vec![0; v],
            directions: BTreeSet::new(),
            rev_directions: vec![BTreeSet::new(); v],
        }
    }

    pub fn node_count(&self) -> usize {
        self.v
    }

    /// Number of edges oriented away from v.
    pub fn outdegree(&self, v: Node) -> usize {
        self.check_node(v);
        self.outdegs[v]
    }

    pub fn max_outdegree(&self) -> usize {
        self.outdegs.iter().copied().max().unwrap_or(0)
    }

    /// Is the edge (va, vb) oriented from va to vb?
    pub fn is_oriented(&self, va: Node, vb: Node) -> bool {
        self.check_node(va);
        self.check_node(vb);
        self.directions.contains(&(va, vb))
    }

    /// Does the edge exist in the orientation, in either direction?
    pub fn contains(&self, va: Node, vb: Node) -> bool {
        self.is_oriented(va, vb) || self.is_oriented(vb, va)
    }

    /// Inserts a new oriented edge. The unordered pair must be absent.
    pub fn orient_edge(&mut self, from: Node, to: Node) {
        assert!(
            !self.contains(from, to),
            "edge {{{from}, {to}}} is already oriented"
        );
        self.outdegs[from] += 1;
        self.directions.insert((from, to));
        self.rev_directions[to].insert(from);
    }

    /// Deletes the edge, which must be oriented exactly as given.
    pub fn remove_edge(&mut self, from: Node, to: Node) {
        assert!(
            self.is_oriented(from, to),
            "edge ({from}, {to}) is not oriented"
        );
        self.outdegs[from] -= 1;
        self.directions.remove(&(from, to));
        self.rev_directions[to].remove(&from);
    }

    pub fn flip_edge(&mut self, from: Node, to: Node) {
        self.remove_edge(from, to);
        self.orient_edge(to, from);
    }

    /// Neighbours with an edge oriented towards v.
    pub fn in_neighbours(&self, v: Node) -> Vec<Node> {
        self.check_node(v);
        self.rev_directions[v].iter().copied().collect()
    }

    /// Neighbours with an edge oriented away from v.
    pub fn out_neighbours(&self, v: Node) -> Vec<Node> {
        self.check_node(v);
        self.directions
            .range((v, 0)..(v + 1, 0))
            .map(|&(_, to)| to)
            .collect()
    }

    /// All edges with their orientations.
    pub fn all_edges(&self) -> Vec<(Node, Node)> {
        self.directions.iter().copied().collect()
    }

    /// Description in DOT format.
    pub fn write_dot(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "digraph {{")?;
        writeln!(out, "{DOT_NODE_STYLE}")?;
        for &(from, to) in &self.directions {
            writeln!(out, "  {from} -> {to}")?;
        }
        writeln!(out, "}}")
    }

    fn check_node(&self, u: Node) {
        assert!(u < self.v, "node {u} out of range, |V| = {}", self.v);
    }
}
