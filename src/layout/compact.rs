use std::collections::BTreeMap;

use crate::config::CompactConfig;
use crate::ir::{Direction, Layer, Point};

use super::position::finalize;

/// Packs each layer's nodes into one centered row, ignoring branches. Rows
/// advance along the depth axis by layer index.
pub(super) fn compute_compact_positions(
    layers: &[Layer],
    direction: Direction,
    config: &CompactConfig,
    offset: Point,
    fallback: f32,
) -> BTreeMap<String, Point> {
    let horizontal = direction.is_horizontal();
    let (size, layer_gap) = if horizontal {
        (config.node_height, config.horizontal_layer_gap)
    } else {
        (config.node_width, config.vertical_layer_gap)
    };

    let mut positions = BTreeMap::new();
    for (layer_idx, layer) in layers.iter().enumerate() {
        let count = layer.nodes.len();
        if count == 0 {
            continue;
        }
        let total = count as f32 * size + (count as f32 - 1.0) * config.gap;
        let start = -total / 2.0 + size / 2.0;
        let depth = layer_idx as f32 * layer_gap;

        for (node_idx, node) in layer.nodes.iter().enumerate() {
            let along = start + node_idx as f32 * (size + config.gap);
            let point = if horizontal {
                Point::new(depth, along)
            } else {
                Point::new(along, depth)
            };
            positions
                .entry(node.id.clone())
                .or_insert_with(|| finalize(point, offset, fallback));
        }
    }
    positions
}
