use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Depth grows top to bottom.
    #[default]
    Vertical,
    /// Depth grows left to right.
    Horizontal,
}

impl Direction {
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "vertical" | "td" | "tb" => Some(Self::Vertical),
            "horizontal" | "lr" => Some(Self::Horizontal),
            _ => None,
        }
    }

    pub fn is_horizontal(self) -> bool {
        self == Self::Horizontal
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    #[default]
    Tree,
    Compact,
}

impl LayoutMode {
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "tree" => Some(Self::Tree),
            "compact" => Some(Self::Compact),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn transposed(self) -> Self {
        Self {
            x: self.y,
            y: self.x,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BranchType {
    #[default]
    Default,
    Choice,
    Condition,
}

impl BranchType {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "default" => Some(Self::Default),
            "choice" => Some(Self::Choice),
            "condition" => Some(Self::Condition),
            _ => None,
        }
    }
}

/// A directed edge between two story nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    pub id: String,
    pub from_node_id: String,
    pub to_node_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch_label: Option<String>,
    #[serde(default)]
    pub branch_type: BranchType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<serde_json::Value>,
    #[serde(default)]
    pub branch_order: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryNode {
    pub id: String,
    #[serde(default)]
    pub layer_id: String,
    #[serde(default)]
    pub node_order: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_x: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_y: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub branches: Vec<Branch>,
}

impl StoryNode {
    pub fn new(id: &str, title: &str) -> Self {
        Self {
            id: id.to_string(),
            layer_id: String::new(),
            node_order: 0,
            title: title.to_string(),
            content: String::new(),
            duration: None,
            position_x: None,
            position_y: None,
            metadata: None,
            created_at: None,
            updated_at: None,
            branches: Vec::new(),
        }
    }

    pub fn position(&self) -> Option<Point> {
        match (self.position_x, self.position_y) {
            (Some(x), Some(y)) => Some(Point::new(x, y)),
            _ => None,
        }
    }

    /// Appends a branch to `to` with the next sibling order.
    pub fn push_branch(&mut self, to: &str, label: Option<&str>) {
        let order = self.branches.len() as i64 + 1;
        self.branches.push(Branch {
            id: format!("{}->{}", self.id, to),
            from_node_id: self.id.clone(),
            to_node_id: to.to_string(),
            branch_label: label.map(str::to_string),
            branch_type: if label.is_some() {
                BranchType::Choice
            } else {
                BranchType::Default
            },
            condition: None,
            branch_order: order,
            created_at: None,
        });
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub id: String,
    #[serde(default)]
    pub script_id: String,
    pub layer_order: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub is_collapsed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub nodes: Vec<StoryNode>,
}

impl Layer {
    pub fn new(id: &str, layer_order: i64) -> Self {
        Self {
            id: id.to_string(),
            script_id: String::new(),
            layer_order,
            title: format!("Layer {layer_order}"),
            description: None,
            is_collapsed: false,
            created_at: None,
            updated_at: None,
            nodes: Vec::new(),
        }
    }

    /// Adds a node to this layer, stamping its `layer_id` and `node_order`.
    pub fn push_node(&mut self, mut node: StoryNode) -> &mut StoryNode {
        node.layer_id = self.id.clone();
        node.node_order = self.nodes.len() as i64 + 1;
        self.nodes.push(node);
        let last = self.nodes.len() - 1;
        &mut self.nodes[last]
    }
}

pub fn node_count(layers: &[Layer]) -> usize {
    layers.iter().map(|layer| layer.nodes.len()).sum()
}
