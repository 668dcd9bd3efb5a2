use async_trait::async_trait;

use crate::core::vault::VaultFile;

#[derive(Debug, thiserror::Error)]
pub enum CanvasError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid canvas document: {0}")]
    Document(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasPoint {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

/// A canvas-type view that can host vault files as positioned nodes.
#[async_trait]
pub trait CanvasView: Send + Sync {
    /// Current pointer position on the canvas.
    fn pointer(&self) -> CanvasPoint;

    fn default_file_node_size(&self) -> CanvasSize;

    /// Add a file node and return its id.
    async fn create_file_node(
        &self,
        pos: CanvasPoint,
        size: CanvasSize,
        file: &VaultFile,
    ) -> Result<String, CanvasError>;
}
