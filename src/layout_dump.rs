use crate::ir::{Direction, Layer, LayoutMode};
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
pub struct PositionDump {
    pub direction: Direction,
    pub mode: LayoutMode,
    pub nodes: Vec<NodeDump>,
}

#[derive(Debug, Serialize)]
pub struct NodeDump {
    pub id: String,
    pub layer_id: String,
    pub layer_order: i64,
    pub title: String,
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub children: Vec<String>,
}

impl PositionDump {
    pub fn from_layers(layers: &[Layer], direction: Direction, mode: LayoutMode) -> Self {
        let nodes = layers
            .iter()
            .flat_map(|layer| {
                layer.nodes.iter().map(move |node| NodeDump {
                    id: node.id.clone(),
                    layer_id: layer.id.clone(),
                    layer_order: layer.layer_order,
                    title: node.title.clone(),
                    x: node.position_x,
                    y: node.position_y,
                    children: node
                        .branches
                        .iter()
                        .map(|branch| branch.to_node_id.clone())
                        .collect(),
                })
            })
            .collect();

        PositionDump {
            direction,
            mode,
            nodes,
        }
    }
}

pub fn write_position_dump<W: Write>(
    writer: W,
    layers: &[Layer],
    direction: Direction,
    mode: LayoutMode,
) -> anyhow::Result<()> {
    let dump = PositionDump::from_layers(layers, direction, mode);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}

pub fn write_layers<W: Write>(writer: W, layers: &[Layer]) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(writer, layers)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::StoryNode;

    #[test]
    fn dump_lists_nodes_in_layer_order() {
        let mut first = Layer::new("L1", 1);
        let node = first.push_node(StoryNode::new("A", "Start"));
        node.position_x = Some(650.0);
        node.position_y = Some(100.0);
        node.push_branch("B", None);
        let mut second = Layer::new("L2", 2);
        second.push_node(StoryNode::new("B", "End"));

        let mut out = Vec::new();
        write_position_dump(&mut out, &[first, second], Direction::Vertical, LayoutMode::Tree).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["mode"], "tree");
        assert_eq!(value["direction"], "vertical");
        assert_eq!(value["nodes"][0]["x"], 650.0);
        assert_eq!(value["nodes"][0]["children"][0], "B");
        assert_eq!(value["nodes"][1]["layer_order"], 2);
        assert!(value["nodes"][1]["x"].is_null());
    }
}
