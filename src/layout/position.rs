use crate::config::TreeConfig;
use crate::ir::{Direction, Point};

use super::LayoutError;
use super::extent::{Extents, measure_subtree};
use super::tree::LayoutTree;

/// Absolute positions for every node of the forest, in the depth-down frame
/// (x across, y along depth). Unvisited nodes stay `None`.
pub(super) fn assign_tree_positions(
    tree: &LayoutTree,
    config: &TreeConfig,
) -> Result<Vec<Option<Point>>, LayoutError> {
    let len = tree.children.len();
    let mut extents = Extents::new(len);
    let mut positions: Vec<Option<Point>> = vec![None; len];
    let mut cursor = 0.0f32;

    for &root in &tree.roots {
        let order = tree.pre_order(root);
        measure_subtree(tree, &order, config.node_width, config.gap_x, &mut extents)?;

        positions[root] = Some(Point::new(cursor + extents.left[root], 0.0));
        for &node in order.iter().skip(1) {
            let parent = tree.parent[node].ok_or_else(|| {
                LayoutError::Internal(format!("node {node} has no layout parent"))
            })?;
            let anchor = positions[parent].ok_or_else(|| {
                LayoutError::Internal(format!("parent {parent} of node {node} was not placed"))
            })?;
            positions[node] = Some(Point::new(
                anchor.x + extents.offset[node],
                anchor.y + config.gap_y,
            ));
        }

        cursor += extents.width(root) + config.gap_x * 2.0;
    }

    Ok(positions)
}

/// Maps a depth-down point into the requested orientation.
pub(super) fn orient(point: Point, direction: Direction) -> Point {
    if direction.is_horizontal() {
        point.transposed()
    } else {
        point
    }
}

/// Applies the screen offset and replaces any non-finite coordinate.
pub(super) fn finalize(point: Point, offset: Point, fallback: f32) -> Point {
    let mut x = point.x + offset.x;
    let mut y = point.y + offset.y;
    if !x.is_finite() {
        tracing::warn!(x, "non-finite x coordinate replaced");
        x = fallback;
    }
    if !y.is_finite() {
        tracing::warn!(y, "non-finite y coordinate replaced");
        y = fallback;
    }
    Point::new(x, y)
}
