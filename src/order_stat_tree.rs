//! Order-statistics multiset, implemented as an AVL tree where every node
//! additionally stores its subtree size. Rank access via [OrderStatTree::nth]
//! is the basis for the stable edge indexing of [crate::graphs::Forest].

use std::fmt::{Debug, Formatter};

use debug_tree::TreeBuilder;

struct OsNode<K> {
    key: K,
    /// Total number of nodes in the subtree.
    count: usize,
    /// Node count on the longest root-leaf path.
    height: usize,
    child: [Link<K>; 2],
}

type Link<K> = Option<Box<OsNode<K>>>;

impl<K> OsNode<K> {
    fn new(key: K) -> Box<Self> {
        Box::new(Self {
            key,
            count: 1,
            height: 1,
            child: [None, None],
        })
    }
}

/// Balanced ordered multiset with rank queries. Duplicate keys are allowed
/// and counted separately.
pub struct OrderStatTree<K> {
    root: Link<K>,
}

impl<K: Ord + Clone + Debug> Default for OrderStatTree<K> {
    fn default() -> Self {
        Self::new()
    }
}

fn count<K>(node: &Link<K>) -> usize {
    node.as_ref().map_or(0, |n| n.count)
}

fn height<K>(node: &Link<K>) -> usize {
    node.as_ref().map_or(0, |n| n.height)
}

/// Recompute auxiliary values from the children.
fn update_aux<K>(node: &mut OsNode<K>) {
    node.count = 1 + count(&node.child[0]) + count(&node.child[1]);
    node.height = 1 + height(&node.child[0]).max(height(&node.child[1]));
}

fn balance_factor<K>(node: &OsNode<K>) -> isize {
    height(&node.child[0]) as isize - height(&node.child[1]) as isize
}

fn rotate_right<K>(mut node: Box<OsNode<K>>) -> Box<OsNode<K>> {
    let mut root = node.child[0].take().expect("left rotation child");
    node.child[0] = root.child[1].take();
    update_aux(&mut node);
    root.child[1] = Some(node);
    update_aux(&mut root);
    root
}

fn rotate_left<K>(mut node: Box<OsNode<K>>) -> Box<OsNode<K>> {
    let mut root = node.child[1].take().expect("right rotation child");
    node.child[1] = root.child[0].take();
    update_aux(&mut node);
    root.child[0] = Some(node);
    update_aux(&mut root);
    root
}

/// Restore the AVL height invariant at the root of the given subtree.
fn rebalance<K>(mut node: Box<OsNode<K>>) -> Box<OsNode<K>> {
    let bf = balance_factor(&node);
    assert!(bf.abs() <= 2);
    if bf == 2 {
        // Leaning left.
        if balance_factor(node.child[0].as_ref().unwrap()) < 0 {
            node.child[0] = Some(rotate_left(node.child[0].take().unwrap()));
        }
        rotate_right(node)
    } else if bf == -2 {
        // Leaning right.
        if balance_factor(node.child[1].as_ref().unwrap()) > 0 {
            node.child[1] = Some(rotate_right(node.child[1].take().unwrap()));
        }
        rotate_left(node)
    } else {
        node
    }
}

fn insert_rec<K: Ord>(node: Link<K>, key: K) -> Box<OsNode<K>> {
    let Some(mut node) = node else {
        return OsNode::new(key);
    };
    // Duplicates descend into the left subtree.
    let side = usize::from(node.key < key);
    node.child[side] = Some(insert_rec(node.child[side].take(), key));
    update_aux(&mut node);
    rebalance(node)
}

fn remove_rec<K: Ord>(node: Link<K>, key: &K) -> Link<K> {
    let mut node = node?;
    if node.key != *key {
        // Walk down the tree, searching for the node to be removed.
        let side = usize::from(node.key < *key);
        node.child[side] = remove_rec(node.child[side].take(), key);
        update_aux(&mut node);
        return Some(rebalance(node));
    }
    match (node.child[0].take(), node.child[1].take()) {
        // Replace a node with at most one child by that child.
        (left, None) => left,
        (None, right) => right,
        // Both children: substitute the in-order successor.
        (left, Some(right)) => {
            let (rest, mut successor) = drop_min(right);
            successor.child = [left, rest];
            update_aux(&mut successor);
            Some(rebalance(successor))
        }
    }
}

/// Detach the smallest node of the subtree; returns (remaining subtree, node).
fn drop_min<K>(mut node: Box<OsNode<K>>) -> (Link<K>, Box<OsNode<K>>) {
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

impl<K: Ord + Clone + Debug> OrderStatTree<K> {
    pub fn new() -> Self {
        Self { root: None }
    }

    pub fn len(&self) -> usize {
        count(&self.root)
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Adds a new key, allowing multiple occurrences of the same key.
    pub fn insert(&mut self, key: K) {
        self.root = Some(insert_rec(self.root.take(), key));
    }

    /// Removes one occurrence of the key. Has no effect if the key is absent.
    pub fn remove(&mut self, key: &K) {
        self.root = remove_rec(self.root.take(), key);
    }

    pub fn contains(&self, key: &K) -> bool {
        let mut cur = &self.root;
        while let Some(node) = cur {
            cur = match key.cmp(&node.key) {
                std::cmp::Ordering::Equal => return true,
                std::cmp::Ordering::Less => &node.child[0],
                std::cmp::Ordering::Greater => &node.child[1],
            };
        }
        false
    }

    /// Smallest key in the tree. Panics when the tree is empty.
    pub fn min(&self) -> &K {
        let mut node = self.root.as_ref().expect("min() on an empty tree");
        while let Some(left) = &node.child[0] {
            node = left;
        }
        &node.key
    }

    /// Largest key in the tree. Panics when the tree is empty.
    pub fn max(&self) -> &K {
        let mut node = self.root.as_ref().expect("max() on an empty tree");
        while let Some(right) = &node.child[1] {
            node = right;
        }
        &node.key
    }

    /// The n-th smallest key, 0-indexed. Panics when `n >= len()`.
    pub fn nth(&self, mut n: usize) -> &K {
        assert!(n < self.len(), "nth({n}) out of range, len = {}", self.len());
        let mut node = self.root.as_ref().unwrap();
        loop {
            let left_count = count(&node.child[0]);
            if n == left_count {
                return &node.key;
            } else if n < left_count {
                node = node.child[0].as_ref().unwrap();
            } else {
                n -= left_count + 1;
                node = node.child[1].as_ref().unwrap();
            }
        }
    }

    /// All keys in ascending order, duplicates repeated.
    pub fn collect(&self) -> Vec<K> {
        fn walk<K: Clone>(node: &Link<K>, out: &mut Vec<K>) {
            if let Some(n) = node {
                walk(&n.child[0], out);
                out.push(n.key.clone());
                walk(&n.child[1], out);
            }
        }
        let mut result = Vec::with_capacity(self.len());
        walk(&self.root, &mut result);
        result
    }
}

impl<K: Debug> Debug for OrderStatTree<K> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        fn tree_dbg<K: Debug>(node: &Link<K>, tree: &mut TreeBuilder) {
            let Some(n) = node else {
                tree.add_leaf("<empty>");
                return;
            };
            let _b = tree.add_branch(&format!(
                "{:?},c={},h={}",
                n.key, n.count, n.height
            ));
            if n.child[0].is_some() || n.child[1].is_some() {
                tree_dbg(&n.child[0], tree);
                tree_dbg(&n.child[1], tree);
            }
        }
        let mut builder = TreeBuilder::new();
        let _b = builder.add_branch("OrderStatTree");
        tree_dbg(&self.root, &mut builder);
        writeln!(f, "{}", builder.string())
    }
}
