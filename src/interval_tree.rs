//! Augmented interval tree, as described in "Introduction to Algorithms" by
//! Cormen et al.: an AVL tree keyed by the `(low, high)` pair where every
//! node also knows the largest `high` in its subtree, which prunes the
//! overlap search.

use std::fmt::{Debug, Formatter};

use debug_tree::TreeBuilder;

/// A stored `[low, high]` range, `low <= high`.
pub type Range = (usize, usize);

struct ItNode {
    range: Range,
    /// Maximum `high` value in the subtree.
    highest: usize,
    /// Node count on the longest root-leaf path.
    height: usize,
    child: [Link; 2],
}

type Link = Option<Box<ItNode>>;

impl ItNode {
    fn new(range: Range) -> Box<Self> {
        Box::new(Self {
            range,
            highest: range.1,
            height: 1,
            child: [None, None],
        })
    }
}

fn height(node: &Link) -> usize {
    node.as_ref().map_or(0, |n| n.height)
}

fn highest(node: &Link) -> usize {
    node.as_ref().map_or(0, |n| n.highest)
}

fn update_aux(node: &mut ItNode) {
    node.height = 1 + height(&node.child[0]).max(height(&node.child[1]));
    node.highest = node
        .range
        .1
        .max(highest(&node.child[0]))
        .max(highest(&node.child[1]));
}

fn balance_factor(node: &ItNode) -> isize {
    height(&node.child[0]) as isize - height(&node.child[1]) as isize
}

fn rotate_right(mut node: Box<ItNode>) -> Box<ItNode> {
    let mut root = node.child[0].take().expect("left rotation child");
    node.child[0] = root.child[1].take();
    update_aux(&mut node);
    root.child[1] = Some(node);
    update_aux(&mut root);
    root
}

fn rotate_left(mut node: Box<ItNode>) -> Box<ItNode> {
    let mut root = node.child[1].take().expect("right rotation child");
    node.child[1] = root.child[0].take();
    update_aux(&mut node);
    root.child[0] = Some(node);
    update_aux(&mut root);
    root
}

fn rebalance(mut node: Box<ItNode>) -> Box<ItNode> {
    let bf = balance_factor(&node);
    assert!(bf.abs() <= 2);
    if bf == 2 {
        if balance_factor(node.child[0].as_ref().unwrap()) < 0 {
            node.child[0] = Some(rotate_left(node.child[0].take().unwrap()));
        }
        rotate_right(node)
    } else if bf == -2 {
        if balance_factor(node.child[1].as_ref().unwrap()) > 0 {
            node.child[1] = Some(rotate_right(node.child[1].take().unwrap()));
        }
        rotate_left(node)
    } else {
        node
    }
}

fn insert_rec(node: Link, addend: Range) -> Box<ItNode> {
    let Some(mut node) = node else {
        return ItNode::new(addend);
    };
    let side = usize::from(node.range < addend);
    node.child[side] = Some(insert_rec(node.child[side].take(), addend));
    update_aux(&mut node);
    rebalance(node)
}

fn remove_rec(node: Link, target: Range) -> Link {
    let mut node = node?;
    if node.range != target {
        let side = usize::from(node.range < target);
        node.child[side] = remove_rec(node.child[side].take(), target);
        update_aux(&mut node);
        return Some(rebalance(node));
    }
    match (node.child[0].take(), node.child[1].take()) {
        (left, None) => left,
        (None, right) => right,
        (left, Some(right)) => {
            let (rest, mut successor) = drop_min(right);
            successor.child = [left, rest];
            update_aux(&mut successor);
            Some(rebalance(successor))
        }
    }
}

fn drop_min(mut node: Box<ItNode>) -> (Link, Box<ItNode>) {
    match node.child[0].take() {
        None => {
            let right = node.child[1].take();
            (right, node)
        }
        Some(left) => {
            let (rest, min) = drop_min(left);
            node.child[0] = rest;
            update_aux(&mut node);
            (Some(rebalance(node)), min)
        }
    }
}

/// Do the two intervals have a nonempty overlap?
fn clashing(a: Range, b: Range) -> bool {
    a.0 <= b.1 && b.0 <= a.1
}

fn collect_clashes(node: &Link, query: Range, result: &mut Vec<Range>) {
    let Some(node) = node else { return };
    // Skip the whole subtree if none of its intervals can clash.
    if node.highest < query.0 {
        return;
    }
    collect_clashes(&node.child[0], query, result);
    if clashing(node.range, query) {
        result.push(node.range);
    }
    // Another possible skip, using the BST property.
    if node.range.0 <= query.1 {
        collect_clashes(&node.child[1], query, result);
    }
}

/// Interval tree over `usize` time ranges. Multiple intervals with equal
/// endpoints may be stored; each occurrence is reported separately.
#[derive(Default)]
pub struct IntervalTree {
    root: Link,
    len: usize,
}

impl IntervalTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Inserts a new `[low, high]` interval.
    pub fn insert(&mut self, low: usize, high: usize) {
        assert!(low <= high, "insert: low {low} > high {high}");
        self.root = Some(insert_rec(self.root.take(), (low, high)));
        self.len += 1;
    }

    /// Removes one occurrence of the interval. Has no effect if absent.
    pub fn remove(&mut self, low: usize, high: usize) {
        assert!(low <= high, "remove: low {low} > high {high}");
        let present = self.contains(low, high);
        self.root = remove_rec(self.root.take(), (low, high));
        if present {
            self.len -= 1;
        }
    }

    pub fn contains(&self, low: usize, high: usize) -> bool {
        assert!(low <= high, "contains: low {low} > high {high}");
        let target = (low, high);
        let mut cur = &self.root;
        while let Some(node) = cur {
            cur = match target.cmp(&node.range) {
                std::cmp::Ordering::Equal => return true,
                std::cmp::Ordering::Less => &node.child[0],
                std::cmp::Ordering::Greater => &node.child[1],
            };
        }
        false
    }

    /// All stored intervals overlapping `[low, high]`, each occurrence
    /// reported exactly once, in ascending order.
    pub fn get_clashes(&self, low: usize, high: usize) -> Vec<Range> {
        assert!(low <= high, "get_clashes: low {low} > high {high}");
        let mut result = Vec::new();
        collect_clashes(&self.root, (low, high), &mut result);
        result
    }

    /// Number of stored intervals overlapping `[low, high]`.
    pub fn count_clashes(&self, low: usize, high: usize) -> usize {
        self.get_clashes(low, high).len()
    }
}

impl Debug for IntervalTree {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        fn tree_dbg(node: &Link, tree: &mut TreeBuilder) {
            let Some(n) = node else {
                tree.add_leaf("<empty>");
                return;
            };
            let _b = tree.add_branch(&format!(
                "[{},{}],h={},hs={}",
                n.range.0, n.range.1, n.height, n.highest
            ));
            if n.child[0].is_some() || n.child[1].is_some() {
                tree_dbg(&n.child[0], tree);
                tree_dbg(&n.child[1], tree);
            }
        }
        let mut builder = TreeBuilder::new();
        let _b = builder.add_branch("IntervalTree");
        tree_dbg(&self.root, &mut builder);
        writeln!(f, "{}", builder.string())
    }
}
