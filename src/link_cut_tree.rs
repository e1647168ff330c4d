//! Link/cut trees, used as an online connectivity oracle during graph
//! generation: a [crate::graphs::Forest] rejects an edge insertion exactly
//! when the endpoints are already connected.

use std::fmt::Formatter;

use derivative::Derivative;

pub type Node = usize;

type Idx = usize;
const EMPTY: Idx = usize::MAX;

fn node_fmt(u: &Idx, f: &mut Formatter) -> std::fmt::Result {
    if *u == EMPTY {
        write!(f, "∅")
    } else {
        write!(f, "{u}")
    }
}

fn node2_fmt([u, v]: &[Idx; 2], f: &mut Formatter) -> std::fmt::Result {
    write!(f, "[")?;
    node_fmt(u, f)?;
    write!(f, ", ")?;
    node_fmt(v, f)?;
    write!(f, "]")
}

/// Interface of a link/cut tree: a dynamic forest on nodes `0..n` under
/// edge insertions and deletions with connectivity queries, all amortised
/// O(lg n). Queries take `&mut self` because they splay internally.
pub trait LinkCutTree {
    /// New structure with n vertices and no edges.
    fn new(n: usize) -> Self;
    /// Adds the edge (u, v). The callers guarantee u and v are in
    /// different trees.
    fn link(&mut self, u: Node, v: Node);
    /// Removes the edge (u, v). The callers guarantee the edge exists.
    fn cut(&mut self, u: Node, v: Node);
    /// Are u and v in the same tree? False when `u == v`.
    fn connected(&mut self, u: Node, v: Node) -> bool;
}

#[derive(Derivative)]
#[derivative(Debug)]
struct SplayNode {
    /// Left and right child in the auxiliary splay tree.
    #[derivative(Debug(format_with = "node2_fmt"))]
    child: [Idx; 2],
    /// Splay parent, or the path-parent when this node is a splay root.
    #[derivative(Debug(format_with = "node_fmt"))]
    parent: Idx,
    /// This node's subtree should be read in reverse order.
    reversed: bool,
}

/// Splay-based Sleator–Tarjan link/cut trees with a make-root reversal flag.
#[derive(Debug)]
pub struct SplayLct {
    nodes: Vec<SplayNode>,
}

impl SplayLct {
    fn push(&mut self, u: Idx) {
        if self.nodes[u].reversed {
            self.nodes[u].reversed = false;
            self.nodes[u].child.swap(0, 1);
            for c in self.nodes[u].child {
                if c != EMPTY {
                    self.nodes[c].reversed ^= true;
                }
            }
        }
    }

    fn is_root(&self, u: Idx) -> bool {
        let p = self.nodes[u].parent;
        p == EMPTY || (self.nodes[p].child[0] != u && self.nodes[p].child[1] != u)
    }

    fn rotate(&mut self, child: Idx) {
        let parent = self.nodes[child].parent;
        let grand = self.nodes[parent].parent;

        if !self.is_root(parent) {
            let side = usize::from(self.nodes[grand].child[1] == parent);
            self.nodes[grand].child[side] = child;
        }

        self.push(parent);
        self.push(child);

        // Rotation direction depends on which side the child hangs off.
        let side = usize::from(self.nodes[parent].child[1] == child);
        let moved = self.nodes[child].child[1 - side];
        self.nodes[parent].child[side] = moved;
        self.nodes[child].child[1 - side] = parent;
        if moved != EMPTY {
            self.nodes[moved].parent = parent;
        }

        self.nodes[parent].parent = child;
        self.nodes[child].parent = grand;
    }

    fn splay(&mut self, child: Idx) {
        while !self.is_root(child) {
            let parent = self.nodes[child].parent;
            let grand = self.nodes[parent].parent;
            if !self.is_root(parent) {
                let zig_zig = (self.nodes[grand].child[1] == parent)
                    == (self.nodes[parent].child[1] == child);
                self.rotate(if zig_zig { parent } else { child });
            }
            self.rotate(child);
        }
        self.push(child);
    }

    /// Makes the path from v to the root of its represented tree preferred,
    /// splaying v to the root of its auxiliary tree.
    fn access(&mut self, v: Idx) {
        let mut last = EMPTY;
        let mut loc = v;
        while loc != EMPTY {
            self.splay(loc);
            self.nodes[loc].child[1] = last;
            last = loc;
            loc = self.nodes[loc].parent;
        }
        self.splay(v);
    }

    fn make_root(&mut self, v: Idx) {
        self.access(v);
        let left = self.nodes[v].child[0];
        if left != EMPTY {
            self.nodes[left].reversed ^= true;
            self.nodes[v].child[0] = EMPTY;
        }
    }
}

impl LinkCutTree for SplayLct {
    fn new(n: usize) -> Self {
        Self {
            nodes: (0..n)
                .map(|_| SplayNode {
                    child: [EMPTY; 2],
                    parent: EMPTY,
                    reversed: false,
                })
                .collect(),
        }
    }

    fn link(&mut self, u: Node, v: Node) {
        self.make_root(v);
        self.nodes[v].parent = u;
    }

    fn cut(&mut self, u: Node, v: Node) {
        self.make_root(u);
        self.access(v);
        let left = self.nodes[v].child[0];
        if left != EMPTY {
            self.nodes[left].parent = EMPTY;
            self.nodes[v].child[0] = EMPTY;
        }
    }

    fn connected(&mut self, u: Node, v: Node) -> bool {
        self.access(u);
        self.access(v);
        self.nodes[u].parent != EMPTY
    }
}
