use crate::ir::Layer;

use super::LayoutError;
use super::graph::StoryGraph;

/// Roots are the nodes nothing points at. Fully cyclic graphs fall back to
/// the first node of layer order 1, then to the first node of the first layer.
pub(super) fn select_roots(graph: &StoryGraph, layers: &[Layer]) -> Result<Vec<usize>, LayoutError> {
    let roots: Vec<usize> = (0..graph.len())
        .filter(|&idx| graph.in_degree[idx] == 0)
        .collect();
    if !roots.is_empty() {
        return Ok(roots);
    }

    let fallback = match layers.iter().find(|layer| layer.layer_order == 1) {
        Some(layer) if !layer.nodes.is_empty() => layer.nodes.first(),
        _ => layers.first().and_then(|layer| layer.nodes.first()),
    };
    let root = fallback
        .and_then(|node| graph.index_of(&node.id))
        .ok_or(LayoutError::NoRoot)?;
    tracing::debug!(root = %graph.ids[root], "no zero in-degree node, using fallback root");
    Ok(vec![root])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::StoryNode;
    use crate::layout::graph::build_story_graph;

    fn cycle_layers(first_order: i64) -> Vec<Layer> {
        let mut first = Layer::new("L1", first_order);
        first.push_node(StoryNode::new("A", "A")).push_branch("B", None);
        let mut second = Layer::new("L2", 1);
        second.push_node(StoryNode::new("B", "B")).push_branch("A", None);
        vec![first, second]
    }

    #[test]
    fn zero_in_degree_nodes_in_registration_order() {
        let mut layer = Layer::new("L1", 1);
        layer.push_node(StoryNode::new("X", "X"));
        layer.push_node(StoryNode::new("A", "A")).push_branch("B", None);
        layer.push_node(StoryNode::new("B", "B"));
        let layers = vec![layer];
        let graph = build_story_graph(&layers);
        assert_eq!(select_roots(&graph, &layers).unwrap(), vec![0, 1]);
    }

    #[test]
    fn cycle_falls_back_to_layer_order_one() {
        let layers = cycle_layers(2);
        let graph = build_story_graph(&layers);
        let roots = select_roots(&graph, &layers).unwrap();
        assert_eq!(graph.ids[roots[0]], "B");
    }

    #[test]
    fn empty_order_one_layer_falls_back_to_first_layer() {
        let mut layers = cycle_layers(3);
        layers[1].layer_order = 2;
        layers.push(Layer::new("L3", 1));
        let graph = build_story_graph(&layers);
        let roots = select_roots(&graph, &layers).unwrap();
        assert_eq!(graph.ids[roots[0]], "A");
    }

    #[test]
    fn no_candidate_reports_no_root() {
        let mut layers = cycle_layers(2);
        layers[1].layer_order = 3;
        layers.insert(0, Layer::new("empty", 4));
        let graph = build_story_graph(&layers);
        assert_eq!(select_roots(&graph, &layers), Err(LayoutError::NoRoot));
    }
}
