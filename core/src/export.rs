use crate::block::BlockContent;
use crate::list::BlockList;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to encode blocks: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Block contents in list order with ids dropped.
pub fn export_contents(blocks: &BlockList) -> Vec<&BlockContent> {
    blocks.iter().map(|block| &block.content).collect()
}

/// Pretty JSON array of the blocks, two-space indented, ids omitted.
pub fn export_json(blocks: &BlockList) -> Result<String, ExportError> {
    serde_json::to_string_pretty(&export_contents(blocks)).map_err(ExportError::Encode)
}
