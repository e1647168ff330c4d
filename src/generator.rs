//! Random instance generation: a walk through graph states that keeps the
//! graph a union of at most alpha edge-disjoint forests at every step. The
//! generator inserts a new edge with a density-dependent probability and
//! otherwise removes an existing one; a purge phase (continuous run of
//! deletions) may be triggered to vary the density over time.

use std::fmt::Debug;
use std::io::{self, Write};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Geometric};

use crate::graphs::{ordered, BoundedArbGraph, Edge, Node};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Insert,
    Delete,
}

/// A single step of the dynamic graph: one edge inserted or deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Command {
    pub operation: OperationKind,
    pub nodes: Edge,
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let op = match self.operation {
            OperationKind::Insert => "INSERT",
            OperationKind::Delete => "DELETE",
        };
        write!(f, "{op} {} -- {}", self.nodes.0, self.nodes.1)
    }
}

/// An instance of the dynamic orientation problem: replaying `sequence`
/// from the empty graph on `v` vertices keeps arboricity at most `alpha`
/// at every prefix.
#[derive(Debug, Clone)]
pub struct OrientationProblemInstance {
    pub v: usize,
    pub alpha: usize,
    pub sequence: Vec<Command>,
}

impl OrientationProblemInstance {
    /// Pretty-printer of the entire operation sequence.
    pub fn write_description(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "|V| = {}, alpha = {}", self.v, self.alpha)?;
        for c in &self.sequence {
            writeln!(out, "{c}")?;
        }
        Ok(())
    }
}

/// How insertion endpoints are drawn. Implementations resample until the
/// graph accepts the edge, so they may consume a variable amount of
/// randomness per call.
pub trait InsertSampling: Debug {
    /// Inserts one legal edge into the graph and returns its canonical
    /// endpoints.
    fn sample_edge(&self, rng: &mut StdRng, graph: &mut BoundedArbGraph) -> Edge;
}

/// Both endpoints and the target forest drawn uniformly.
#[derive(Debug, Clone, Copy)]
pub struct UniformEndpoints;

impl InsertSampling for UniformEndpoints {
    fn sample_edge(&self, rng: &mut StdRng, graph: &mut BoundedArbGraph) -> Edge {
        let v = graph.node_count();
        let alpha = graph.alpha();
        loop {
            let forest_index = rng.gen_range(0..alpha);
            let first: Node = rng.gen_range(0..v);
            let second: Node = rng.gen_range(0..v);
            if graph.insert_edge(forest_index, first, second) {
                return ordered(first, second);
            }
        }
    }
}

/// The second endpoint follows a geometric distribution, biasing edges
/// toward low-numbered vertices; in expectation a few nodes end up with
/// high degrees. The distribution tail folds onto the last vertex.
#[derive(Debug, Clone, Copy)]
pub struct GeometricEndpoints {
    geom: Geometric,
}

impl GeometricEndpoints {
    /// `success_prob` is the geometric distribution parameter.
    pub fn new(success_prob: f64) -> Self {
        Self {
            geom: Geometric::new(success_prob).expect("success probability in (0, 1]"),
        }
    }
}

impl InsertSampling for GeometricEndpoints {
    fn sample_edge(&self, rng: &mut StdRng, graph: &mut BoundedArbGraph) -> Edge {
        let v = graph.node_count();
        let alpha = graph.alpha();
        loop {
            let forest_index = rng.gen_range(0..alpha);
            let first: Node = rng.gen_range(0..v);
            let second = (self.geom.sample(rng) as usize).min(v - 1);
            if graph.insert_edge(forest_index, first, second) {
                return ordered(first, second);
            }
        }
    }
}

/// Seedable generator of [OrientationProblemInstance] values. The same seed
/// reproduces the exact same instance.
#[derive(Debug)]
pub struct Generator<S> {
    v: usize,
    alpha: usize,
    /// Expected fraction of possible edges present in the graph.
    edge_density: f64,
    purge_prob: f64,
    rng: StdRng,
    sampling: S,
}

impl<S: InsertSampling> Generator<S> {
    pub fn new(v: usize, alpha: usize, edge_density: f64, purge_prob: f64, sampling: S) -> Self {
        assert!(v >= 2, "need at least two vertices");
        assert!(
            edge_density > 0.0 && edge_density <= 1.0,
            "edge density must lie in (0, 1]"
        );
        assert!(
            (0.0..=1.0).contains(&purge_prob),
            "purge probability must lie in [0, 1]"
        );
        Self {
            v,
            alpha,
            edge_density,
            purge_prob,
            rng: StdRng::from_entropy(),
            sampling,
        }
    }

    pub fn set_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Produces an instance with `sequence_len` operations.
    pub fn generate_instance(&mut self, sequence_len: usize) -> OrientationProblemInstance {
        let mut graph = BoundedArbGraph::new(self.v, self.alpha);
        let mut sequence = Vec::with_capacity(sequence_len);
        // Purge phase is active iff the countdown is positive.
        let mut purge_countdown = 0usize;

        for _ in 0..sequence_len {
            let p_insert = self.insert_probability(&graph);
            let mut kind = if self.rng.gen_bool(p_insert) {
                OperationKind::Insert
            } else {
                OperationKind::Delete
            };

            // Special cases where the operation type is enforced.
            if graph.edge_count() == 0 {
                kind = OperationKind::Insert;
            } else if graph.edge_count() == (self.v - 1) * self.alpha {
                kind = OperationKind::Delete;
            } else if purge_countdown > 0 {
                kind = OperationKind::Delete;
            }

            let nodes = match kind {
                OperationKind::Insert => self.sampling.sample_edge(&mut self.rng, &mut graph),
                OperationKind::Delete => Self::delete_random_edge(&mut self.rng, &mut graph),
            };
            sequence.push(Command { operation: kind, nodes });

            let activate_purge = purge_countdown == 0 && self.rng.gen_bool(self.purge_prob);
            if activate_purge {
                purge_countdown = self.rng.gen_range(0..=graph.edge_count() / 2);
                log::debug!("purge phase of length {purge_countdown} activated");
            } else if purge_countdown > 0 {
                purge_countdown -= 1;
            }
        }
        OrientationProblemInstance {
            v: self.v,
            alpha: self.alpha,
            sequence,
        }
    }

    /// Piecewise-linear schedule in the current density: 1 on the empty
    /// graph, 0.5 at the target density, 0 on the full graph.
    fn insert_probability(&self, graph: &BoundedArbGraph) -> f64 {
        let density = graph.edge_count() as f64 / (self.alpha as f64 * (self.v - 1) as f64);
        if density <= self.edge_density {
            1.0 - density / (2.0 * self.edge_density)
        } else {
            (1.0 - density) / (2.0 - 2.0 * self.edge_density)
        }
    }

    /// Every edge present has equal probability of deletion.
    fn delete_random_edge(rng: &mut StdRng, graph: &mut BoundedArbGraph) -> Edge {
        let index = rng.gen_range(0..graph.edge_count());
        let edge = graph.get_edge(index);
        graph.delete_edge(edge.0, edge.1);
        edge
    }
}
