//! Research workbench for the dynamic low-outdegree orientation problem on
//! bounded-arboricity graphs. An online sequence of edge insertions and
//! deletions keeps the graph a union of at most alpha edge-disjoint forests;
//! each edge present must be oriented so that no vertex ever exceeds a
//! prescribed outdegree. The crate generates such instances, runs competing
//! orientation strategies on them and measures the largest outdegree each
//! strategy induces.
//!
//! ## Usage
//!
//! Generate an instance, reformulate it as a set of time intervals and run
//! the "Adaptive Minimize Collisions" heuristic:
//!
//! ```
//! use dynamic_orientation::converter::convert_instance;
//! use dynamic_orientation::generator::{Generator, UniformEndpoints};
//! use dynamic_orientation::solver::solve_instance;
//!
//! let mut gen = Generator::new(8, 1, 0.6, 0.0, UniformEndpoints);
//! gen.set_seed(42);
//! let opi = gen.generate_instance(30);
//! let mut ipi = convert_instance(&opi);
//! let max_outdegree = solve_instance(&mut ipi);
//! assert!(max_outdegree >= 1);
//! ```
//!
//! The reference strategies live in [strategies] (Kowalik's offline
//! zero-flip construction and the Brodal–Fagerberg online strategy), and
//! [logic] provides an exact feasibility oracle through a SAT reduction
//! with a Davis–Putnam solver.
//!
//! ## Implementation
//!
//! The pipeline stands on four data structures that can also be used on
//! their own:
//! - order-statistics AVL multiset: see [order_stat_tree::OrderStatTree],
//! - augmented interval tree: see [interval_tree::IntervalTree],
//! - lazy segment tree over a monoid pair: see [segment_tree::SegmentTree],
//! - splay-based link/cut trees: see [link_cut_tree::SplayLct].
pub mod converter;
pub mod generator;
pub mod graphs;
pub mod interval_tree;
pub mod link_cut_tree;
pub mod logic;
pub mod order_stat_tree;
pub mod segment_tree;
pub mod solver;
pub mod strategies;

pub use converter::{convert_instance, IntervalProblemInstance};
pub use generator::{Generator, OrientationProblemInstance};
pub use solver::solve_instance;
pub use strategies::{orient_by_brodal, orient_by_kowalik};
