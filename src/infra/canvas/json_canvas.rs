use std::path::{Path, PathBuf};

use async_trait::async_trait;
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tokio::fs;

use crate::core::vault::VaultFile;
use crate::core::workspace::{CanvasError, CanvasPoint, CanvasSize, CanvasView};

/// Size given to new file nodes, matching the host's default file node dimensions.
pub const DEFAULT_FILE_NODE_SIZE: CanvasSize = CanvasSize {
    width: 400.0,
    height: 400.0,
};

/// `.canvas` document. Nodes and edges we do not create are kept untouched.
#[derive(Debug, Default, Serialize, Deserialize)]
struct CanvasDocument {
    #[serde(default)]
    nodes: Vec<Value>,
    #[serde(default)]
    edges: Vec<Value>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

/// A JSON Canvas file acting as the active canvas view.
pub struct JsonCanvas {
    path: PathBuf,
    pointer: CanvasPoint,
}

impl JsonCanvas {
    pub fn new(path: impl AsRef<Path>, pointer: CanvasPoint) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            pointer,
        }
    }

    async fn load(&self) -> Result<CanvasDocument, CanvasError> {
        if !fs::try_exists(&self.path).await? {
            return Ok(CanvasDocument::default());
        }
        let text = fs::read_to_string(&self.path).await?;
        if text.trim().is_empty() {
            return Ok(CanvasDocument::default());
        }
        Ok(serde_json::from_str(&text)?)
    }

    async fn save(&self, doc: &CanvasDocument) -> Result<(), CanvasError> {
        let text = serde_json::to_string_pretty(doc)?;
        fs::write(&self.path, text).await?;
        Ok(())
    }
}

fn new_node_id() -> String {
    format!("{:016x}", rand::thread_rng().gen::<u64>())
}

#[async_trait]
impl CanvasView for JsonCanvas {
    fn pointer(&self) -> CanvasPoint {
        self.pointer
    }

    fn default_file_node_size(&self) -> CanvasSize {
        DEFAULT_FILE_NODE_SIZE
    }

    async fn create_file_node(
        &self,
        pos: CanvasPoint,
        size: CanvasSize,
        file: &VaultFile,
    ) -> Result<String, CanvasError> {
        let mut doc = self.load().await?;
        let id = new_node_id();

        // Canvas coordinates are whole pixels.
        doc.nodes.push(json!({
            "id": id,
            "type": "file",
            "file": file.path,
            "x": pos.x.round() as i64,
            "y": pos.y.round() as i64,
            "width": size.width.round() as i64,
            "height": size.height.round() as i64,
        }));

        self.save(&doc).await?;
        tracing::debug!(node_id = %id, file = %file.path, "Placed file node on canvas");
        Ok(id)
    }
}
