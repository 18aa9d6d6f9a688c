use std::collections::VecDeque;

use super::graph::StoryGraph;

/// Spanning forest over the story graph: every visited node has exactly one
/// layout parent, except roots which have none.
#[derive(Debug, Clone)]
pub struct LayoutTree {
    pub roots: Vec<usize>,
    pub children: Vec<Vec<usize>>,
    pub parent: Vec<Option<usize>>,
    pub visited: Vec<bool>,
}

impl LayoutTree {
    pub fn visited_count(&self) -> usize {
        self.visited.iter().filter(|seen| **seen).count()
    }

    /// Nodes of the subtree under `root`, parents before children.
    pub fn pre_order(&self, root: usize) -> Vec<usize> {
        let mut order = Vec::new();
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            order.push(node);
            stack.extend(self.children[node].iter().rev().copied());
        }
        order
    }
}

pub(super) fn build_layout_tree(graph: &StoryGraph, roots: &[usize]) -> LayoutTree {
    let len = graph.len();
    let mut tree = LayoutTree {
        roots: Vec::new(),
        children: vec![Vec::new(); len],
        parent: vec![None; len],
        visited: vec![false; len],
    };

    for &root in roots {
        if !tree.visited[root] {
            traverse_from(graph, &mut tree, root);
        }
    }

    // Islands nothing reaches (e.g. a cycle beside a proper root) are laid
    // out as extra roots after the regular ones.
    for idx in 0..len {
        if !tree.visited[idx] {
            tracing::debug!(node = %graph.ids[idx], "unreachable node promoted to root");
            traverse_from(graph, &mut tree, idx);
        }
    }

    tree
}

fn traverse_from(graph: &StoryGraph, tree: &mut LayoutTree, root: usize) {
    tree.roots.push(root);
    tree.visited[root] = true;
    let mut queue = VecDeque::from([root]);
    while let Some(node) = queue.pop_front() {
        for &child in &graph.children[node] {
            if tree.visited[child] {
                continue;
            }
            tree.visited[child] = true;
            tree.parent[child] = Some(node);
            tree.children[node].push(child);
            queue.push_back(child);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Layer, StoryNode};
    use crate::layout::graph::build_story_graph;

    fn graph_of(edges: &[(&str, &str)], ids: &[&str]) -> StoryGraph {
        let mut layer = Layer::new("L1", 1);
        for id in ids {
            let node = layer.push_node(StoryNode::new(id, id));
            for (from, to) in edges {
                if from == id {
                    node.push_branch(to, None);
                }
            }
        }
        build_story_graph(&[layer])
    }

    #[test]
    fn diamond_keeps_first_parent() {
        let graph = graph_of(&[("A", "B"), ("A", "C"), ("B", "D"), ("C", "D")], &["A", "B", "C", "D"]);
        let tree = build_layout_tree(&graph, &[0]);
        assert_eq!(tree.children[0], vec![1, 2]);
        assert_eq!(tree.children[1], vec![3]);
        assert!(tree.children[2].is_empty());
        assert_eq!(tree.parent[3], Some(1));
    }

    #[test]
    fn breadth_first_claims_shallow_nodes() {
        // A reaches C directly and through B; BFS attaches C to A.
        let graph = graph_of(&[("A", "B"), ("B", "C"), ("A", "C")], &["A", "B", "C"]);
        let tree = build_layout_tree(&graph, &[0]);
        assert_eq!(tree.children[0], vec![1, 2]);
        assert!(tree.children[1].is_empty());
    }

    #[test]
    fn cycle_terminates() {
        let graph = graph_of(&[("A", "B"), ("B", "C"), ("C", "A")], &["A", "B", "C"]);
        let tree = build_layout_tree(&graph, &[0]);
        assert_eq!(tree.visited_count(), 3);
        assert_eq!(tree.pre_order(0), vec![0, 1, 2]);
    }

    #[test]
    fn unreachable_cycle_becomes_extra_root() {
        let graph = graph_of(&[("X", "Y"), ("A", "B"), ("B", "A")], &["X", "Y", "A", "B"]);
        let tree = build_layout_tree(&graph, &[0]);
        assert_eq!(tree.roots, vec![0, 2]);
        assert_eq!(tree.children[2], vec![3]);
        assert_eq!(tree.visited_count(), 4);
    }

    #[test]
    fn shared_descendant_goes_to_first_root() {
        let graph = graph_of(&[("A", "C"), ("B", "C")], &["A", "B", "C"]);
        let tree = build_layout_tree(&graph, &[0, 1]);
        assert_eq!(tree.children[0], vec![2]);
        assert!(tree.children[1].is_empty());
        assert_eq!(tree.roots, vec![0, 1]);
    }
}
