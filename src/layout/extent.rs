use super::LayoutError;
use super::tree::LayoutTree;

/// Horizontal footprint of every measured subtree, pre-transpose.
///
/// `left`/`right` are the distances from a node's center to the edges of its
/// subtree. `offset` is a node's center relative to its layout parent.
#[derive(Debug, Clone)]
pub struct Extents {
    pub left: Vec<f32>,
    pub right: Vec<f32>,
    pub offset: Vec<f32>,
    measured: Vec<bool>,
}

impl Extents {
    pub fn new(len: usize) -> Self {
        Self {
            left: vec![0.0; len],
            right: vec![0.0; len],
            offset: vec![0.0; len],
            measured: vec![false; len],
        }
    }

    pub fn width(&self, node: usize) -> f32 {
        self.left[node] + self.right[node]
    }

    pub fn is_measured(&self, node: usize) -> bool {
        self.measured[node]
    }
}

/// Measures the subtree whose pre-order is `order`. Children are visited
/// before their parent by walking the pre-order backwards.
pub(super) fn measure_subtree(
    tree: &LayoutTree,
    order: &[usize],
    node_width: f32,
    gap_x: f32,
    extents: &mut Extents,
) -> Result<(), LayoutError> {
    let half = node_width / 2.0;
    let mut centers: Vec<f32> = Vec::new();

    for &node in order.iter().rev() {
        let children = &tree.children[node];
        if children.is_empty() {
            extents.left[node] = half;
            extents.right[node] = half;
            extents.offset[node] = 0.0;
            extents.measured[node] = true;
            continue;
        }

        centers.clear();
        let mut running = 0.0f32;
        for &child in children {
            if !extents.measured[child] {
                return Err(LayoutError::Internal(format!(
                    "child {child} of node {node} has no extent"
                )));
            }
            centers.push(running + extents.left[child]);
            running += extents.left[child] + extents.right[child] + gap_x;
        }
        let row_width = running - gap_x;
        let first = centers[0];
        let last = centers[centers.len() - 1];
        let center = (first + last) / 2.0;

        extents.left[node] = center.max(half);
        extents.right[node] = (row_width - center).max(half);
        for (&child, &child_center) in children.iter().zip(&centers) {
            extents.offset[child] = child_center - center;
        }
        extents.offset[node] = 0.0;
        extents.measured[node] = true;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(children: Vec<Vec<usize>>) -> LayoutTree {
        let len = children.len();
        let mut parent = vec![None; len];
        for (node, kids) in children.iter().enumerate() {
            for &kid in kids {
                parent[kid] = Some(node);
            }
        }
        LayoutTree {
            roots: vec![0],
            children,
            parent,
            visited: vec![true; len],
        }
    }

    fn measure(tree: &LayoutTree) -> Extents {
        let mut extents = Extents::new(tree.children.len());
        let order = tree.pre_order(0);
        measure_subtree(tree, &order, 220.0, 60.0, &mut extents).unwrap();
        extents
    }

    #[test]
    fn leaf_is_half_node_width_each_side() {
        let extents = measure(&tree(vec![vec![]]));
        assert_eq!(extents.left[0], 110.0);
        assert_eq!(extents.right[0], 110.0);
    }

    #[test]
    fn two_children_center_parent() {
        let extents = measure(&tree(vec![vec![1, 2], vec![], vec![]]));
        assert_eq!(extents.left[0], 250.0);
        assert_eq!(extents.right[0], 250.0);
        assert_eq!(extents.offset[1], -140.0);
        assert_eq!(extents.offset[2], 140.0);
    }

    #[test]
    fn parent_centers_over_extreme_children_not_average() {
        // 0 -> [1, 2]; 1 -> [3, 4, 5]. Row: child 1 spans 780, child 2 spans 220.
        let extents = measure(&tree(vec![
            vec![1, 2],
            vec![3, 4, 5],
            vec![],
            vec![],
            vec![],
            vec![],
        ]));
        assert_eq!(extents.left[1], 390.0);
        assert_eq!(extents.right[1], 390.0);
        // centers 390 and 780 + 60 + 110 = 950, midpoint 670, row 1060
        assert_eq!(extents.left[0], 670.0);
        assert_eq!(extents.right[0], 390.0);
        assert_eq!(extents.offset[1], -280.0);
        assert_eq!(extents.offset[2], 280.0);
    }

    #[test]
    fn siblings_are_separated_by_gap() {
        let extents = measure(&tree(vec![
            vec![1, 2, 3],
            vec![4, 5],
            vec![],
            vec![6],
            vec![],
            vec![],
            vec![],
        ]));
        let siblings = [1usize, 2, 3];
        for pair in siblings.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let a_right = extents.offset[a] + extents.right[a];
            let b_left = extents.offset[b] - extents.left[b];
            assert!(b_left - a_right >= 60.0 - 1e-3, "{a} and {b} overlap");
        }
    }

    #[test]
    fn deep_chain_does_not_recurse() {
        let len = 50_000;
        let mut children: Vec<Vec<usize>> = (1..len).map(|next| vec![next]).collect();
        children.push(Vec::new());
        let extents = measure(&tree(children));
        assert_eq!(extents.left[0], 110.0);
        assert!(extents.offset.iter().all(|offset| *offset == 0.0));
    }

    #[test]
    fn unmeasured_child_is_an_internal_fault() {
        let tree = tree(vec![vec![1], vec![]]);
        let mut extents = Extents::new(2);
        let err = measure_subtree(&tree, &[1, 0], 220.0, 60.0, &mut extents).unwrap_err();
        assert!(matches!(err, LayoutError::Internal(_)));
    }
}
