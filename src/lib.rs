#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod parser;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, LayoutConfig, load_config};
pub use ir::{Branch, BranchType, Direction, Layer, LayoutMode, Point, StoryNode};
pub use layout::{LayoutError, apply_positions, compute_layout, compute_positions};
pub use parser::parse_story_graph;
