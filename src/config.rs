use crate::ir::{Direction, LayoutMode, Point};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeConfig {
    pub node_width: f32,
    pub gap_x: f32,
    pub gap_y: f32,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            node_width: 220.0,
            gap_x: 60.0,
            gap_y: 180.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompactConfig {
    pub node_width: f32,
    pub node_height: f32,
    /// Spacing between neighbours in a row. Negative values make nodes overlap.
    pub gap: f32,
    pub vertical_layer_gap: f32,
    pub horizontal_layer_gap: f32,
}

impl Default for CompactConfig {
    fn default() -> Self {
        Self {
            node_width: 220.0,
            node_height: 120.0,
            gap: -20.0,
            vertical_layer_gap: 190.0,
            horizontal_layer_gap: 200.0,
        }
    }
}

/// Screen-space shift applied after orientation, keeping coordinates away
/// from the canvas origin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OffsetConfig {
    pub vertical: Point,
    pub horizontal: Point,
}

impl OffsetConfig {
    pub fn for_direction(&self, direction: Direction) -> Point {
        match direction {
            Direction::Vertical => self.vertical,
            Direction::Horizontal => self.horizontal,
        }
    }
}

impl Default for OffsetConfig {
    fn default() -> Self {
        Self {
            vertical: Point::new(400.0, 100.0),
            horizontal: Point::new(100.0, 300.0),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub tree: TreeConfig,
    pub compact: CompactConfig,
    pub offsets: OffsetConfig,
    pub fallback_position: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            tree: TreeConfig::default(),
            compact: CompactConfig::default(),
            offsets: OffsetConfig::default(),
            fallback_position: 100.0,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub layout: LayoutConfig,
    pub direction: Direction,
    pub mode: LayoutMode,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct TreeConfigFile {
    node_width: Option<f32>,
    gap_x: Option<f32>,
    gap_y: Option<f32>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct CompactConfigFile {
    node_width: Option<f32>,
    node_height: Option<f32>,
    gap: Option<f32>,
    vertical_layer_gap: Option<f32>,
    horizontal_layer_gap: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct PointFile {
    x: f32,
    y: f32,
}

#[derive(Debug, Deserialize, Default)]
struct OffsetConfigFile {
    vertical: Option<PointFile>,
    horizontal: Option<PointFile>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    layout_direction: Option<String>,
    mode: Option<String>,
    tree: Option<TreeConfigFile>,
    compact: Option<CompactConfigFile>,
    offsets: Option<OffsetConfigFile>,
    fallback_position: Option<f32>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

/// Parses a JSON5 config document and overlays it on the defaults.
pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let parsed: ConfigFile = json5::from_str(contents)?;

    if let Some(token) = parsed.layout_direction.as_deref() {
        config.direction = Direction::from_token(token)
            .ok_or_else(|| anyhow::anyhow!("Unknown layoutDirection '{}'", token))?;
    }
    if let Some(token) = parsed.mode.as_deref() {
        config.mode = LayoutMode::from_token(token)
            .ok_or_else(|| anyhow::anyhow!("Unknown layout mode '{}'", token))?;
    }

    if let Some(tree) = parsed.tree {
        if let Some(v) = tree.node_width {
            config.layout.tree.node_width = v;
        }
        if let Some(v) = tree.gap_x {
            config.layout.tree.gap_x = v;
        }
        if let Some(v) = tree.gap_y {
            config.layout.tree.gap_y = v;
        }
    }

    if let Some(compact) = parsed.compact {
        if let Some(v) = compact.node_width {
            config.layout.compact.node_width = v;
        }
        if let Some(v) = compact.node_height {
            config.layout.compact.node_height = v;
        }
        if let Some(v) = compact.gap {
            config.layout.compact.gap = v;
        }
        if let Some(v) = compact.vertical_layer_gap {
            config.layout.compact.vertical_layer_gap = v;
        }
        if let Some(v) = compact.horizontal_layer_gap {
            config.layout.compact.horizontal_layer_gap = v;
        }
    }

    if let Some(offsets) = parsed.offsets {
        if let Some(v) = offsets.vertical {
            config.layout.offsets.vertical = Point::new(v.x, v.y);
        }
        if let Some(v) = offsets.horizontal {
            config.layout.offsets.horizontal = Point::new(v.x, v.y);
        }
    }

    if let Some(v) = parsed.fallback_position {
        config.layout.fallback_position = v;
    }

    Ok(config)
}
