use crate::ir::{Branch, BranchType, Layer, StoryNode};
use anyhow::Result;
use serde::Deserialize;

/// Ids arrive as strings from the current backend and as integers from
/// older exports.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

impl RawId {
    fn into_string(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Number(number) => number.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawDocument {
    Layers(Vec<RawLayer>),
    Script { layers: Vec<RawLayer> },
}

#[derive(Debug, Deserialize)]
struct RawLayer {
    id: RawId,
    #[serde(alias = "scriptId")]
    script_id: Option<RawId>,
    #[serde(alias = "layerOrder")]
    layer_order: Option<i64>,
    title: Option<String>,
    description: Option<String>,
    #[serde(alias = "isCollapsed")]
    is_collapsed: Option<bool>,
    #[serde(alias = "createdAt")]
    created_at: Option<String>,
    #[serde(alias = "updatedAt")]
    updated_at: Option<String>,
    nodes: Option<Vec<RawNode>>,
}

#[derive(Debug, Deserialize)]
struct RawNode {
    id: RawId,
    #[serde(alias = "layerId")]
    layer_id: Option<RawId>,
    #[serde(alias = "nodeOrder")]
    node_order: Option<i64>,
    title: Option<String>,
    content: Option<String>,
    duration: Option<f64>,
    #[serde(alias = "positionX")]
    position_x: Option<f64>,
    #[serde(alias = "positionY")]
    position_y: Option<f64>,
    metadata: Option<serde_json::Value>,
    #[serde(alias = "createdAt")]
    created_at: Option<String>,
    #[serde(alias = "updatedAt")]
    updated_at: Option<String>,
    branches: Option<Vec<RawBranch>>,
}

#[derive(Debug, Deserialize)]
struct RawBranch {
    id: Option<RawId>,
    #[serde(alias = "fromNodeId")]
    from_node_id: Option<RawId>,
    #[serde(alias = "toNodeId")]
    to_node_id: Option<RawId>,
    #[serde(alias = "branchLabel")]
    branch_label: Option<String>,
    #[serde(alias = "branchType")]
    branch_type: Option<String>,
    condition: Option<serde_json::Value>,
    #[serde(alias = "branchOrder")]
    branch_order: Option<i64>,
    #[serde(alias = "createdAt")]
    created_at: Option<String>,
}

/// Parses a story graph document into canonical layers.
///
/// Accepts either a bare array of layers or an object carrying a `layers`
/// array, with snake_case or camelCase keys. Strict JSON is tried first and
/// JSON5 is the fallback for hand-edited files.
pub fn parse_story_graph(input: &str) -> Result<Vec<Layer>> {
    let document: RawDocument = serde_json::from_str(input)
        .or_else(|json_err| json5::from_str(input).map_err(|_| json_err))?;
    let raw_layers = match document {
        RawDocument::Layers(layers) => layers,
        RawDocument::Script { layers } => layers,
    };
    Ok(raw_layers
        .into_iter()
        .enumerate()
        .map(|(idx, layer)| normalize_layer(layer, idx))
        .collect())
}

fn normalize_layer(raw: RawLayer, idx: usize) -> Layer {
    let id = raw.id.into_string();
    let layer_order = raw.layer_order.unwrap_or(idx as i64 + 1);
    let nodes = raw
        .nodes
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(node_idx, node)| normalize_node(node, &id, node_idx))
        .collect();
    Layer {
        script_id: raw.script_id.map(RawId::into_string).unwrap_or_default(),
        layer_order,
        title: raw.title.unwrap_or_else(|| format!("Layer {layer_order}")),
        description: raw.description,
        is_collapsed: raw.is_collapsed.unwrap_or(false),
        created_at: raw.created_at,
        updated_at: raw.updated_at,
        nodes,
        id,
    }
}

fn normalize_node(raw: RawNode, layer_id: &str, idx: usize) -> StoryNode {
    let id = raw.id.into_string();
    let mut branches: Vec<Branch> = raw
        .branches
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .filter_map(|(branch_idx, branch)| normalize_branch(branch, &id, branch_idx))
        .collect();
    // Stable: branches sharing an order keep their stored sequence.
    branches.sort_by_key(|branch| branch.branch_order);

    StoryNode {
        layer_id: raw
            .layer_id
            .map(RawId::into_string)
            .unwrap_or_else(|| layer_id.to_string()),
        node_order: raw.node_order.unwrap_or(idx as i64 + 1),
        title: raw.title.unwrap_or_default(),
        content: raw.content.unwrap_or_default(),
        duration: raw.duration,
        position_x: finite_coordinate(raw.position_x),
        position_y: finite_coordinate(raw.position_y),
        metadata: raw.metadata,
        created_at: raw.created_at,
        updated_at: raw.updated_at,
        branches,
        id,
    }
}

fn normalize_branch(raw: RawBranch, owner: &str, idx: usize) -> Option<Branch> {
    let Some(to_node_id) = raw.to_node_id.map(RawId::into_string).filter(|id| !id.is_empty()) else {
        tracing::warn!(node = owner, index = idx, "branch without a target node dropped");
        return None;
    };
    let from_node_id = raw
        .from_node_id
        .map(RawId::into_string)
        .unwrap_or_else(|| owner.to_string());
    let branch_type = match raw.branch_type.as_deref() {
        None => BranchType::Default,
        Some(token) => BranchType::from_token(token).unwrap_or_else(|| {
            tracing::debug!(branch_type = token, "unknown branch type, using default");
            BranchType::Default
        }),
    };
    Some(Branch {
        id: raw
            .id
            .map(RawId::into_string)
            .unwrap_or_else(|| format!("{from_node_id}->{to_node_id}")),
        branch_label: raw.branch_label,
        branch_type,
        condition: raw.condition,
        branch_order: raw.branch_order.unwrap_or(idx as i64 + 1),
        created_at: raw.created_at,
        from_node_id,
        to_node_id,
    })
}

fn finite_coordinate(value: Option<f64>) -> Option<f32> {
    value.map(|v| v as f32).filter(|v| v.is_finite())
}
