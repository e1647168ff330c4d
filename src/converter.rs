//! Translation of the dynamic graph orientation problem into the
//! interval-based setting: every maximal presence span of an edge becomes
//! one time interval, and orienting the edge becomes picking one of the
//! interval's two endpoints.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::generator::{OperationKind, OrientationProblemInstance};
use crate::graphs::{Edge, Node};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalStatus {
    NotSet,
    FirstSelected,
    SecondSelected,
}

/// A single edge occurrence, interpreted as an interval: the edge is alive
/// during `[start_time, end_time]`. No two intervals of one instance share
/// the same time bounds.
#[derive(Debug, Clone)]
pub struct Interval {
    /// Timestamp of the insertion.
    pub start_time: usize,
    /// Timestamp of the deletion.
    pub end_time: usize,
    /// Edge endpoints.
    pub nodes: Edge,
    pub status: IntervalStatus,
    /// Current interval score, maintained by the heuristic solver.
    pub score: u32,
}

impl Interval {
    /// The `(start_time, end_time)` pair, the total order on intervals.
    pub fn time_bounds(&self) -> (usize, usize) {
        (self.start_time, self.end_time)
    }

    /// The node this interval was assigned to. Panics while unassigned.
    pub fn assigned_node(&self) -> Node {
        match self.status {
            IntervalStatus::NotSet => panic!("interval has no node assigned"),
            IntervalStatus::FirstSelected => self.nodes.0,
            IntervalStatus::SecondSelected => self.nodes.1,
        }
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{{{}, {}}} FROM {} TO {}",
            self.nodes.0, self.nodes.1, self.start_time, self.end_time
        )?;
        match self.status {
            IntervalStatus::NotSet => write!(f, " (NOT SET)"),
            IntervalStatus::FirstSelected => write!(f, " (SET {})", self.nodes.0),
            IntervalStatus::SecondSelected => write!(f, " (SET {})", self.nodes.1),
        }
    }
}

/// The interval reformulation of an [OrientationProblemInstance].
#[derive(Debug, Clone)]
pub struct IntervalProblemInstance {
    pub v: usize,
    pub alpha: usize,
    /// Largest timestamp + 1.
    pub timeframe: usize,
    pub intervals: Vec<Interval>,
}

impl IntervalProblemInstance {
    /// Pretty-printer of the entire interval set.
    pub fn write_description(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(
            out,
            "|V| = {}, alpha = {}, timeframe = {}",
            self.v, self.alpha, self.timeframe
        )?;
        for i in &self.intervals {
            writeln!(out, "{i}")?;
        }
        Ok(())
    }

    /// Serialises the instance for offline inspection, used when a solver
    /// postcondition is found violated.
    pub fn dump_counterexample(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let mut file = File::create(path)?;
        self.write_description(&mut file)
    }
}

/// Translates the dynamic graph orientation problem into the interval
/// setting. The timestamps of each edge must alternate insert, delete,
/// insert, ... starting with an insert; a trailing unmatched insert is
/// closed at the artificial final timestamp `sequence.len()`.
pub fn convert_instance(opi: &OrientationProblemInstance) -> IntervalProblemInstance {
    let timeframe = opi.sequence.len() + 1;

    // Matching between edges and the timestamps where the edge is touched.
    let mut history: BTreeMap<Edge, Vec<usize>> = BTreeMap::new();
    for (current_time, cmd) in opi.sequence.iter().enumerate() {
        let timestamps = history.entry(cmd.nodes).or_default();
        assert_eq!(
            cmd.operation,
            if timestamps.len() % 2 == 0 {
                OperationKind::Insert
            } else {
                OperationKind::Delete
            },
            "command at time {current_time} does not alternate with the \
             history of edge {:?}",
            cmd.nodes
        );
        timestamps.push(current_time);
    }

    let mut intervals = Vec::new();
    for (nodes, timestamps) in history {
        // Timestamps at even indices are insertions, odd ones deletions.
        for pair in timestamps.chunks_exact(2) {
            intervals.push(Interval {
                start_time: pair[0],
                end_time: pair[1],
                nodes,
                status: IntervalStatus::NotSet,
                score: 0,
            });
        }
        // Edges that remain in the graph after all operations.
        if timestamps.len() % 2 == 1 {
            intervals.push(Interval {
                start_time: *timestamps.last().unwrap(),
                end_time: opi.sequence.len(),
                nodes,
                status: IntervalStatus::NotSet,
                score: 0,
            });
        }
    }
    IntervalProblemInstance {
        v: opi.v,
        alpha: opi.alpha,
        timeframe,
        intervals,
    }
}
