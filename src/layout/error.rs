use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum LayoutError {
    #[error("nothing to arrange: the graph has no nodes")]
    NothingToArrange,

    #[error("no determinable root: every node has incoming branches")]
    NoRoot,

    #[error("invalid layout config: {field} = {value}")]
    InvalidConfig { field: &'static str, value: f32 },

    #[error("layout failed: {0}")]
    Internal(String),
}

impl LayoutError {
    /// Notices are user-facing outcomes, not faults. The graph is left as is.
    pub fn is_notice(&self) -> bool {
        matches!(self, Self::NothingToArrange | Self::NoRoot)
    }
}
