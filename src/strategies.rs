//! Reference orientation strategies for forests (alpha = 1): Kowalik's
//! offline divide-and-conquer construction, which incurs zero flips at the
//! cost of a logarithmic outdegree, and Brodal and Fagerberg's online
//! strategy ("Dynamic Representations of Sparse Graphs", Lemma 3), which
//! keeps the outdegree bounded and pays O(log |V|) flips per operation.

use crate::generator::{Command, OperationKind, OrientationProblemInstance};
use crate::graphs::{Forest, ForestOrientation, Node};

/// Runs Kowalik's offline strategy and returns the largest outdegree that
/// appears over the whole sequence. The constructed orientation sequence
/// incurs no edge reorientations, and the outdegree stays within
/// `floor(log2(timeframe)) + 1`; both facts are asserted.
pub fn orient_by_kowalik(opi: &OrientationProblemInstance) -> usize {
    assert_eq!(opi.alpha, 1, "Kowalik's strategy applies to forests only");
    assert!(!opi.sequence.is_empty(), "empty operation sequence");

    let timeframe = opi.sequence.len();
    let graphs = build_graph_history(&opi.sequence, opi.v);
    let mut orientations = vec![ForestOrientation::new(opi.v); timeframe];

    construct_orientations(&mut orientations, &graphs, 0, timeframe - 1);

    assert_eq!(
        count_total_flips(&orientations),
        0,
        "Kowalik's construction must not flip edges"
    );
    let max_outdegree = max_outdegree_over(&orientations);
    assert!(
        max_outdegree <= timeframe.ilog2() as usize + 1,
        "outdegree {max_outdegree} breaks the logarithmic bound"
    );
    max_outdegree
}

/// Runs the Brodal and Fagerberg strategy with the given outdegree bound
/// and returns the total number of edge flips performed.
pub fn orient_by_brodal(opi: &OrientationProblemInstance, outdeg_bound: usize) -> usize {
    assert_eq!(opi.alpha, 1, "Brodal's strategy applies to forests only");
    assert!(outdeg_bound > 1, "Brodal's strategy assumes a bound above 1");
    assert!(!opi.sequence.is_empty(), "empty operation sequence");

    let graphs = build_graph_history(&opi.sequence, opi.v);
    let mut orientation = ForestOrientation::new(opi.v);

    // 1-orientation of the last phase, then walk backwards counting flips.
    construct_root_orientation(graphs.last().unwrap(), &mut orientation);
    propagate_back(&opi.sequence, &mut orientation, outdeg_bound)
}

/// Populates the per-timestep graph history: the graph at time t is the
/// graph at time t-1 with the t-th command applied.
fn build_graph_history(sequence: &[Command], v: usize) -> Vec<Forest> {
    let mut graphs: Vec<Forest> = Vec::with_capacity(sequence.len());
    for (t, cmd) in sequence.iter().enumerate() {
        let mut graph = Forest::new(v);
        if t > 0 {
            for (a, b) in graphs[t - 1].all_edges() {
                graph.insert_edge(a, b);
            }
        }
        let (u, w) = cmd.nodes;
        match cmd.operation {
            OperationKind::Insert => {
                graph.insert_edge(u, w);
            }
            OperationKind::Delete => graph.delete_edge(u, w),
        }
        graphs.push(graph);
    }
    graphs
}

/// Reviews the operations in reverse chronological order and maintains the
/// orientation according to Brodal and Fagerberg's construction. Returns
/// the number of flips performed.
fn propagate_back(
    sequence: &[Command],
    orientation: &mut ForestOrientation,
    outdeg_bound: usize,
) -> usize {
    let mut total_flips = 0;
    for cmd in sequence.iter().rev() {
        let (u, v) = cmd.nodes;
        match cmd.operation {
            // A forward insertion is an edge removal in reverse time. The
            // edge is oriented one way or the other at this point; the
            // removal asserts it.
            OperationKind::Insert => {
                if orientation.is_oriented(u, v) {
                    orientation.remove_edge(u, v);
                } else {
                    orientation.remove_edge(v, u);
                }
            }
            // A forward deletion is an edge insertion in reverse time.
            OperationKind::Delete => {
                if orientation.outdegree(u) == outdeg_bound {
                    total_flips += flip_on_short_path(orientation, u, outdeg_bound);
                }
                orientation.orient_edge(u, v);
            }
        }
    }
    total_flips
}

/// Finds an at-most-logarithmic-length path from `start_node` to some
/// vertex with outdegree below `outdeg_bound` and reverses every edge on
/// it. Such a path is guaranteed to exist. Returns the number of flips.
fn flip_on_short_path(
    orientation: &mut ForestOrientation,
    start_node: Node,
    outdeg_bound: usize,
) -> usize {
    let v = orientation.node_count();
    let limit = ((v as f64).log2() / (outdeg_bound as f64).log2()).ceil() as usize;
    let mut visited = vec![false; v];
    let mut current_path = vec![start_node];
    let mut found_path = Vec::new();

    seek_short_path(
        start_node,
        limit,
        outdeg_bound,
        &mut visited,
        orientation,
        &mut current_path,
        &mut found_path,
    );
    assert!(!found_path.is_empty(), "no flip path within the depth limit");
    log::trace!("flipping along {found_path:?}");

    for p in 1..found_path.len() {
        orientation.flip_edge(found_path[p - 1], found_path[p]);
    }
    found_path.len() - 1
}

/// DFS for a short path to flip. Among all complete paths encountered, the
/// first strictly shorter one replaces the previous candidate.
#[allow(clippy::too_many_arguments)]
fn seek_short_path(
    v: Node,
    distance_left: usize,
    outdeg_bound: usize,
    visited: &mut [bool],
    orientation: &ForestOrientation,
    current_path: &mut Vec<Node>,
    found_path: &mut Vec<Node>,
) {
    visited[v] = true;

    if orientation.outdegree(v) < outdeg_bound
        && (found_path.is_empty() || current_path.len() < found_path.len())
    {
        *found_path = current_path.clone();
    }

    // Otherwise the path would get too long.
    if distance_left > 0 {
        for neighbour in orientation.out_neighbours(v) {
            if !visited[neighbour] {
                current_path.push(neighbour);
                seek_short_path(
                    neighbour,
                    distance_left - 1,
                    outdeg_bound,
                    visited,
                    orientation,
                    current_path,
                    found_path,
                );
                current_path.pop();
            }
        }
    }
}

/// Recursively constructs the orientation sequence for the time interval
/// `[start_time, end_time]` according to Kowalik's algorithm: both halves
/// are built independently, then forced to agree with a fresh orientation
/// of the middle graph on every edge the middle graph contains.
fn construct_orientations(
    orientations: &mut [ForestOrientation],
    graphs: &[Forest],
    start_time: usize,
    end_time: usize,
) {
    // Base case: an arbitrary 1-orientation.
    if start_time == end_time {
        construct_root_orientation(&graphs[start_time], &mut orientations[start_time]);
        return;
    }

    let mid_time = start_time + (end_time - start_time + 1) / 2;
    construct_orientations(orientations, graphs, start_time, mid_time - 1);
    if mid_time + 1 <= end_time {
        construct_orientations(orientations, graphs, mid_time + 1, end_time);
    }

    // Combine both halves into one sequence.
    construct_root_orientation(&graphs[mid_time], &mut orientations[mid_time]);
    for (from, to) in orientations[mid_time].all_edges() {
        for time in start_time..=end_time {
            if orientations[time].is_oriented(to, from) {
                orientations[time].flip_edge(to, from);
            }
        }
    }
}

/// Orients every edge towards the root of its tree (the lowest-numbered
/// reachable vertex), an optimal 1-orientation of the forest.
fn construct_root_orientation(forest: &Forest, orientation: &mut ForestOrientation) {
    let v = forest.node_count();
    let mut adjacency = vec![Vec::new(); v];
    let mut visited = vec![false; v];

    for (a, b) in forest.all_edges() {
        adjacency[a].push(b);
        adjacency[b].push(a);
    }

    for root in 0..v {
        if !visited[root] {
            forest_traversal(root, &mut visited, &adjacency, orientation);
        }
    }
}

/// DFS traversal of one tree, orienting all edges towards the root.
fn forest_traversal(
    v: Node,
    visited: &mut [bool],
    adjacency: &[Vec<Node>],
    orientation: &mut ForestOrientation,
) {
    visited[v] = true;
    for &neighbour in &adjacency[v] {
        if !visited[neighbour] {
            forest_traversal(neighbour, visited, adjacency, orientation);
            orientation.orient_edge(neighbour, v);
        }
    }
}

/// Edge flips between two successive orientations.
fn count_flips_between(o1: &ForestOrientation, o2: &ForestOrientation) -> usize {
    o1.all_edges()
        .into_iter()
        .filter(|&(from, to)| o2.is_oriented(to, from))
        .count()
}

/// Total flips over the entire sequence of orientations.
fn count_total_flips(orientations: &[ForestOrientation]) -> usize {
    (1..orientations.len())
        .map(|t| count_flips_between(&orientations[t - 1], &orientations[t]))
        .sum()
}

/// Largest outdegree appearing anywhere in the sequence.
fn max_outdegree_over(orientations: &[ForestOrientation]) -> usize {
    orientations
        .iter()
        .map(ForestOrientation::max_outdegree)
        .max()
        .unwrap_or(0)
}
