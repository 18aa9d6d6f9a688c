use serde::Deserialize;
use storyflow_layout::{Direction, LayoutConfig, LayoutMode, compute_layout, parse_story_graph};
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AutoLayoutOptions {
    layout_direction: Option<String>,
    mode: Option<String>,
    node_width: Option<f32>,
    gap_x: Option<f32>,
    gap_y: Option<f32>,
}

struct ResolvedOptions {
    direction: Direction,
    mode: LayoutMode,
    config: LayoutConfig,
}

fn resolve_options(options: AutoLayoutOptions) -> Result<ResolvedOptions, String> {
    let direction = match options.layout_direction.as_deref() {
        None => Direction::Vertical,
        Some(token) => {
            Direction::from_token(token).ok_or_else(|| format!("unknown layoutDirection '{token}'"))?
        }
    };
    let mode = match options.mode.as_deref() {
        None => LayoutMode::Tree,
        Some(token) => LayoutMode::from_token(token).ok_or_else(|| format!("unknown mode '{token}'"))?,
    };

    let mut config = LayoutConfig::default();
    if let Some(node_width) = options.node_width {
        config.tree.node_width = node_width;
        config.compact.node_width = node_width;
    }
    if let Some(gap_x) = options.gap_x {
        config.tree.gap_x = gap_x;
    }
    if let Some(gap_y) = options.gap_y {
        config.tree.gap_y = gap_y;
    }

    Ok(ResolvedOptions {
        direction,
        mode,
        config,
    })
}

fn auto_layout_json(layers_json: &str, options_json: Option<&str>) -> Result<String, String> {
    let options = match options_json {
        Some(raw) => serde_json::from_str::<AutoLayoutOptions>(raw).map_err(|error| error.to_string())?,
        None => AutoLayoutOptions::default(),
    };
    let resolved = resolve_options(options)?;
    let layers = parse_story_graph(layers_json).map_err(|error| error.to_string())?;
    let arranged = compute_layout(&layers, resolved.direction, resolved.mode, &resolved.config)
        .map_err(|error| error.to_string())?;
    serde_json::to_string(&arranged).map_err(|error| error.to_string())
}

/// Arranges the editor's layers and returns them as JSON with positions set.
///
/// Notices ("nothing to arrange", "no determinable root") and failures are
/// both returned as errors; the caller keeps its current graph either way.
#[wasm_bindgen]
pub fn auto_layout(layers_json: &str, options_json: Option<String>) -> Result<String, JsValue> {
    auto_layout_json(layers_json, options_json.as_deref()).map_err(|error| JsValue::from_str(&error))
}
