//! The Adaptive Minimize Collisions heuristic: a priority-driven assignment
//! of every interval to one of its two endpoints, always processing the
//! interval with the most clashes against already-assigned intervals and
//! sending it to the endpoint where it collides less.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet};

use crate::converter::{IntervalProblemInstance, IntervalStatus};
use crate::interval_tree::IntervalTree;
use crate::segment_tree::{PlusMax, SegmentTree};

/// Key of the priority queue: higher score first, then the total order on
/// time bounds as the tiebreak.
type QueueKey = (Reverse<u32>, usize, usize);

/// Assigns a node to every interval of the instance and returns the largest
/// outdegree that appeared. On return no interval is left unassigned.
pub fn solve_instance(ipi: &mut IntervalProblemInstance) -> usize {
    // Per-vertex interval trees: the intervals already assigned to the
    // vertex, and the not-yet-assigned intervals with the vertex as one of
    // the two candidates.
    let mut set_intervals: Vec<IntervalTree> = (0..ipi.v).map(|_| IntervalTree::new()).collect();
    let mut notset_intervals: Vec<IntervalTree> =
        (0..ipi.v).map(|_| IntervalTree::new()).collect();
    for intv in &ipi.intervals {
        notset_intervals[intv.nodes.0].insert(intv.start_time, intv.end_time);
        notset_intervals[intv.nodes.1].insert(intv.start_time, intv.end_time);
    }

    // outdeg[v] tracks the outdegree of v as a function of time.
    let mut outdeg: Vec<SegmentTree<PlusMax>> = (0..ipi.v)
        .map(|_| SegmentTree::new(ipi.timeframe))
        .collect();

    // Interval lookup by time bounds; no two intervals share them.
    let dict: BTreeMap<(usize, usize), usize> = ipi
        .intervals
        .iter()
        .enumerate()
        .map(|(index, intv)| (intv.time_bounds(), index))
        .collect();
    assert_eq!(dict.len(), ipi.intervals.len(), "duplicate time bounds");

    // Priority queue of unprocessed intervals.
    let mut queue: BTreeSet<QueueKey> = ipi
        .intervals
        .iter()
        .map(|intv| (Reverse(intv.score), intv.start_time, intv.end_time))
        .collect();

    let mut max_outdegree: i64 = 0;

    while let Some(&key) = queue.first() {
        // The interval with the highest score: the most clashes with
        // intervals that already have a node assigned.
        let (_, start, end) = key;
        let current = dict[&(start, end)];
        assert_eq!(ipi.intervals[current].status, IntervalStatus::NotSet);
        let (first, second) = ipi.intervals[current].nodes;

        notset_intervals[first].remove(start, end);
        notset_intervals[second].remove(start, end);

        let fst_collisions = set_intervals[first].count_clashes(start, end);
        let snd_collisions = set_intervals[second].count_clashes(start, end);

        // Ties go to the first endpoint.
        ipi.intervals[current].status = if fst_collisions > snd_collisions {
            IntervalStatus::SecondSelected
        } else {
            IntervalStatus::FirstSelected
        };

        let assigned = ipi.intervals[current].assigned_node();
        outdeg[assigned].insert(start, end, 1);
        let current_outdegree = outdeg[assigned].query(start, end);
        max_outdegree = max_outdegree.max(current_outdegree);

        set_intervals[assigned].insert(start, end);

        // Bump the score of unprocessed intervals clashing with this one.
        // The score is part of the queue key, so each entry is removed
        // before the mutation and reinserted afterwards.
        for (clash_start, clash_end) in notset_intervals[assigned].get_clashes(start, end) {
            let other = dict[&(clash_start, clash_end)];
            let score = ipi.intervals[other].score;
            assert!(queue.remove(&(Reverse(score), clash_start, clash_end)));
            ipi.intervals[other].score = score + 1;
            queue.insert((Reverse(score + 1), clash_start, clash_end));
        }

        queue.remove(&key);
        log::trace!(
            "interval {:?} assigned to {assigned}, outdegree now {current_outdegree}",
            (start, end)
        );
    }

    assert!(
        ipi.intervals
            .iter()
            .all(|intv| intv.status != IntervalStatus::NotSet),
        "solver left an interval unassigned"
    );
    max_outdegree as usize
}
