pub mod block_models;
pub mod block_service;
pub mod block_url;

pub use block_models::{
    AttachmentPayload, Block, BlockFields, BlockId, BlockKind, EmbedPayload, ImagePayload,
};
pub use block_service::{ArenaClient, ArenaError, BlockImporter};
pub use block_url::{block_id_from_file_name, block_page_url, parse_block_url};
