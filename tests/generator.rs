use std::collections::BTreeMap;
use std::collections::BTreeSet;

use common::init_logger;
use dynamic_orientation::converter::convert_instance;
use dynamic_orientation::generator::{
    Command, Generator, GeometricEndpoints, InsertSampling, OperationKind,
    OrientationProblemInstance, UniformEndpoints,
};
use dynamic_orientation::graphs::Forest;

mod common;

fn edge(a: usize, b: usize) -> (usize, usize) {
    (a.min(b), a.max(b))
}

fn cmd(op: OperationKind, a: usize, b: usize) -> Command {
    Command {
        operation: op,
        nodes: edge(a, b),
    }
}

/// Replays an alpha = 1 instance on a fresh forest; every command must be
/// directly applicable.
fn replay_forest(opi: &OrientationProblemInstance) {
    assert_eq!(opi.alpha, 1);
    let mut forest = Forest::new(opi.v);
    for c in &opi.sequence {
        let (u, v) = c.nodes;
        assert!(u < v, "endpoints not canonicalised: {c}");
        match c.operation {
            OperationKind::Insert => {
                assert!(forest.insert_edge(u, v), "illegal insert {c}");
            }
            OperationKind::Delete => {
                assert!(forest.is_adjacent(u, v), "delete of an absent edge {c}");
                forest.delete_edge(u, v);
            }
        }
        assert!(forest.edge_count() <= opi.v - 1);
    }
}

/// Validity checks that hold for any alpha: inserts target absent edges,
/// deletes target present ones, and the total count respects alpha(V-1).
fn replay_validity(opi: &OrientationProblemInstance) {
    let mut present = BTreeSet::new();
    for c in &opi.sequence {
        match c.operation {
            OperationKind::Insert => assert!(present.insert(c.nodes), "double insert {c}"),
            OperationKind::Delete => assert!(present.remove(&c.nodes), "absent delete {c}"),
        }
        assert!(present.len() <= opi.alpha * (opi.v - 1));
    }
}

#[test]
fn test_uniform_generator_keeps_forest() {
    init_logger();
    let mut gen = Generator::new(12, 1, 0.7, 0.1, UniformEndpoints);
    for seed in [7, 99, 2012] {
        gen.set_seed(seed);
        let opi = gen.generate_instance(400);
        assert_eq!(opi.sequence.len(), 400);
        replay_forest(&opi);
    }
}

#[test]
fn test_geometric_generator_keeps_forest() {
    init_logger();
    let mut gen = Generator::new(12, 1, 0.7, 0.05, GeometricEndpoints::new(0.3));
    gen.set_seed(31337);
    let opi = gen.generate_instance(400);
    replay_forest(&opi);
}

#[test]
fn test_generator_alpha_two_validity() {
    init_logger();
    let mut gen = Generator::new(10, 2, 0.8, 0.1, UniformEndpoints);
    gen.set_seed(555);
    let opi = gen.generate_instance(500);
    assert_eq!(opi.alpha, 2);
    replay_validity(&opi);
}

#[test]
fn test_same_seed_reproduces_instance() {
    let mut gen = Generator::new(9, 1, 0.6, 0.2, UniformEndpoints);
    gen.set_seed(424242);
    let a = gen.generate_instance(200);
    gen.set_seed(424242);
    let b = gen.generate_instance(200);
    assert_eq!(a.sequence, b.sequence);
}

#[test]
fn test_geometric_sampling_prefers_low_vertices() {
    init_logger();
    let mut gen = Generator::new(30, 1, 0.5, 0.0, GeometricEndpoints::new(0.5));
    gen.set_seed(8128);
    let opi = gen.generate_instance(600);
    let touches_low: usize = opi
        .sequence
        .iter()
        .filter(|c| c.operation == OperationKind::Insert)
        .filter(|c| c.nodes.0 < 5)
        .count();
    let inserts = opi
        .sequence
        .iter()
        .filter(|c| c.operation == OperationKind::Insert)
        .count();
    // geometric second endpoints concentrate on low-numbered vertices
    assert!(
        touches_low * 2 > inserts,
        "only {touches_low} of {inserts} inserts touch a low vertex"
    );
}

#[test]
fn test_sampler_respects_graph_state() {
    use dynamic_orientation::graphs::BoundedArbGraph;
    use rand::SeedableRng;

    let mut rng = rand::rngs::StdRng::seed_from_u64(1);
    let mut graph = BoundedArbGraph::new(4, 1);
    let mut seen = BTreeSet::new();
    for _ in 0..3 {
        let e = UniformEndpoints.sample_edge(&mut rng, &mut graph);
        assert!(seen.insert(e), "sampler produced a duplicate edge");
    }
    assert_eq!(graph.edge_count(), 3);
}

#[test]
fn test_instance_description_format() {
    let opi = OrientationProblemInstance {
        v: 3,
        alpha: 1,
        sequence: vec![
            cmd(OperationKind::Insert, 0, 1),
            cmd(OperationKind::Delete, 0, 1),
        ],
    };
    let mut out = Vec::new();
    opi.write_description(&mut out).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "|V| = 3, alpha = 1\nINSERT 0 -- 1\nDELETE 0 -- 1\n"
    );
}

#[test]
fn test_converter_reinserted_edge() {
    // the same edge living twice yields two intervals with distinct bounds
    let opi = OrientationProblemInstance {
        v: 2,
        alpha: 1,
        sequence: vec![
            cmd(OperationKind::Insert, 0, 1),
            cmd(OperationKind::Delete, 0, 1),
            cmd(OperationKind::Insert, 0, 1),
        ],
    };
    let ipi = convert_instance(&opi);
    assert_eq!(ipi.timeframe, 4);
    let bounds: Vec<_> = ipi.intervals.iter().map(|i| i.time_bounds()).collect();
    assert_eq!(bounds, vec![(0, 1), (2, 2)]);
}

#[test]
fn test_converter_basic_pair() {
    let opi = OrientationProblemInstance {
        v: 3,
        alpha: 1,
        sequence: vec![
            cmd(OperationKind::Insert, 0, 1),
            cmd(OperationKind::Insert, 1, 2),
        ],
    };
    let ipi = convert_instance(&opi);
    assert_eq!(ipi.timeframe, 3);
    let described: Vec<_> = ipi
        .intervals
        .iter()
        .map(|i| (i.time_bounds(), i.nodes))
        .collect();
    assert_eq!(described, vec![((0, 2), (0, 1)), ((1, 2), (1, 2))]);
}

/// Edge lifespans recovered by scanning the command sequence directly.
fn scan_lifespans(sequence: &[Command]) -> Vec<((usize, usize), usize, usize)> {
    let mut open: BTreeMap<(usize, usize), usize> = BTreeMap::new();
    let mut spans = Vec::new();
    for (t, c) in sequence.iter().enumerate() {
        match c.operation {
            OperationKind::Insert => {
                assert!(open.insert(c.nodes, t).is_none());
            }
            OperationKind::Delete => {
                let start = open.remove(&c.nodes).unwrap();
                spans.push((c.nodes, start, t));
            }
        }
    }
    for (nodes, start) in open {
        spans.push((nodes, start, sequence.len()));
    }
    spans.sort();
    spans
}

#[test]
fn test_converter_round_trip() {
    init_logger();
    let mut gen = Generator::new(10, 1, 0.8, 0.15, UniformEndpoints);
    for seed in [3, 17, 1009] {
        gen.set_seed(seed);
        let opi = gen.generate_instance(300);
        let ipi = convert_instance(&opi);

        let mut produced: Vec<_> = ipi
            .intervals
            .iter()
            .map(|i| (i.nodes, i.start_time, i.end_time))
            .collect();
        produced.sort();
        assert_eq!(produced, scan_lifespans(&opi.sequence));
    }
}

#[test]
fn test_interval_description_and_dump() {
    use dynamic_orientation::converter::IntervalStatus;

    let opi = OrientationProblemInstance {
        v: 3,
        alpha: 1,
        sequence: vec![
            cmd(OperationKind::Insert, 0, 1),
            cmd(OperationKind::Insert, 1, 2),
        ],
    };
    let mut ipi = convert_instance(&opi);
    ipi.intervals[1].status = IntervalStatus::SecondSelected;

    let mut out = Vec::new();
    ipi.write_description(&mut out).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "|V| = 3, alpha = 1, timeframe = 3\n\
         {0, 1} FROM 0 TO 2 (NOT SET)\n\
         {1, 2} FROM 1 TO 2 (SET 2)\n"
    );

    let path = std::env::temp_dir().join("dynamic-orientation-dump-test.txt");
    ipi.dump_counterexample(&path).unwrap();
    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.starts_with("|V| = 3, alpha = 1, timeframe = 3\n"));
    std::fs::remove_file(&path).unwrap();
}

#[test]
#[should_panic(expected = "alternate")]
fn test_converter_rejects_double_insert() {
    let opi = OrientationProblemInstance {
        v: 2,
        alpha: 1,
        sequence: vec![
            cmd(OperationKind::Insert, 0, 1),
            cmd(OperationKind::Insert, 0, 1),
        ],
    };
    convert_instance(&opi);
}
