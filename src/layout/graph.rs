use std::collections::HashMap;

use crate::ir::Layer;

/// Adjacency view of the story graph, indexed by first-seen node order.
#[derive(Debug, Clone, Default)]
pub struct StoryGraph {
    pub ids: Vec<String>,
    pub index: HashMap<String, usize>,
    pub children: Vec<Vec<usize>>,
    pub in_degree: Vec<usize>,
}

impl StoryGraph {
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn edge_count(&self) -> usize {
        self.children.iter().map(Vec::len).sum()
    }
}

pub(super) fn build_story_graph(layers: &[Layer]) -> StoryGraph {
    let mut graph = StoryGraph::default();

    for layer in layers {
        for node in &layer.nodes {
            if graph.index.contains_key(&node.id) {
                continue;
            }
            graph.index.insert(node.id.clone(), graph.ids.len());
            graph.ids.push(node.id.clone());
            graph.children.push(Vec::new());
            graph.in_degree.push(0);
        }
    }

    let mut dropped = 0usize;
    for layer in layers {
        for node in &layer.nodes {
            let Some(from) = graph.index_of(&node.id) else {
                continue;
            };
            for branch in &node.branches {
                let Some(to) = graph.index_of(&branch.to_node_id) else {
                    dropped += 1;
                    continue;
                };
                graph.children[from].push(to);
                graph.in_degree[to] += 1;
            }
        }
    }

    if dropped > 0 {
        tracing::debug!(dropped, "ignored branches with unknown targets");
    }
    graph
}
