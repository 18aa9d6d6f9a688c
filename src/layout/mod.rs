mod compact;
mod error;
pub mod extent;
pub mod graph;
mod position;
mod roots;
pub mod tree;
pub use error::LayoutError;
use compact::*;
use graph::*;
use position::*;
use roots::*;
use tree::*;

use crate::config::LayoutConfig;
use crate::ir::{Direction, Layer, LayoutMode, Point, node_count};
use std::collections::BTreeMap;

impl LayoutConfig {
    pub fn validate(&self) -> Result<(), LayoutError> {
        let sizes = [
            ("tree.node_width", self.tree.node_width),
            ("compact.node_width", self.compact.node_width),
            ("compact.node_height", self.compact.node_height),
        ];
        for (field, value) in sizes {
            if !value.is_finite() || value <= 0.0 {
                return Err(LayoutError::InvalidConfig { field, value });
            }
        }
        let spacings = [
            ("tree.gap_x", self.tree.gap_x),
            ("tree.gap_y", self.tree.gap_y),
            ("compact.gap", self.compact.gap),
            ("compact.vertical_layer_gap", self.compact.vertical_layer_gap),
            ("compact.horizontal_layer_gap", self.compact.horizontal_layer_gap),
            ("offsets.vertical.x", self.offsets.vertical.x),
            ("offsets.vertical.y", self.offsets.vertical.y),
            ("offsets.horizontal.x", self.offsets.horizontal.x),
            ("offsets.horizontal.y", self.offsets.horizontal.y),
            ("fallback_position", self.fallback_position),
        ];
        for (field, value) in spacings {
            if !value.is_finite() {
                return Err(LayoutError::InvalidConfig { field, value });
            }
        }
        Ok(())
    }
}

/// Computes a position for every arranged node, keyed by node id.
///
/// Nothing is written back: pair with [`apply_positions`], or use
/// [`compute_layout`] for both steps.
pub fn compute_positions(
    layers: &[Layer],
    direction: Direction,
    mode: LayoutMode,
    config: &LayoutConfig,
) -> Result<BTreeMap<String, Point>, LayoutError> {
    config.validate()?;
    if node_count(layers) == 0 {
        tracing::warn!("auto layout skipped: nothing to arrange");
        return Err(LayoutError::NothingToArrange);
    }
    let offset = config.offsets.for_direction(direction);

    let positions = match mode {
        LayoutMode::Compact => compute_compact_positions(
            layers,
            direction,
            &config.compact,
            offset,
            config.fallback_position,
        ),
        LayoutMode::Tree => compute_tree_positions(layers, direction, config, offset)
            .inspect_err(|err| {
                if err.is_notice() {
                    tracing::warn!("auto layout skipped: {err}");
                } else {
                    tracing::error!("auto layout failed: {err}");
                }
            })?,
    };

    tracing::debug!(
        ?mode,
        ?direction,
        positioned = positions.len(),
        "auto layout complete"
    );
    Ok(positions)
}

fn compute_tree_positions(
    layers: &[Layer],
    direction: Direction,
    config: &LayoutConfig,
    offset: Point,
) -> Result<BTreeMap<String, Point>, LayoutError> {
    let graph = build_story_graph(layers);
    tracing::debug!(
        nodes = graph.len(),
        edges = graph.edge_count(),
        "built story graph"
    );
    let roots = select_roots(&graph, layers)?;
    let tree = build_layout_tree(&graph, &roots);
    let raw = assign_tree_positions(&tree, &config.tree)?;

    let mut positions = BTreeMap::new();
    for (idx, point) in raw.into_iter().enumerate() {
        let Some(point) = point else {
            return Err(LayoutError::Internal(format!(
                "node '{}' was never placed",
                graph.ids[idx]
            )));
        };
        let placed = finalize(orient(point, direction), offset, config.fallback_position);
        positions.insert(graph.ids[idx].clone(), placed);
    }
    Ok(positions)
}

/// Returns a copy of `layers` with positions written onto matching nodes.
/// Nodes absent from `positions` keep their previous coordinates.
pub fn apply_positions(layers: &[Layer], positions: &BTreeMap<String, Point>) -> Vec<Layer> {
    layers
        .iter()
        .map(|layer| {
            let mut layer = layer.clone();
            for node in &mut layer.nodes {
                if let Some(point) = positions.get(&node.id) {
                    node.position_x = Some(point.x);
                    node.position_y = Some(point.y);
                }
            }
            layer
        })
        .collect()
}

pub fn compute_layout(
    layers: &[Layer],
    direction: Direction,
    mode: LayoutMode,
    config: &LayoutConfig,
) -> Result<Vec<Layer>, LayoutError> {
    let positions = compute_positions(layers, direction, mode, config)?;
    Ok(apply_positions(layers, &positions))
}
