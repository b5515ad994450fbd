pub mod block;
pub mod drag;
pub mod editor;
pub mod export;
pub mod list;
pub mod palette;
pub mod patch;
pub mod preview;

pub use block::{create_block, Block, BlockContent, BlockId, BlockIdGen, BlockKind, TextObject, TextType};
pub use drag::{destination_index, DragController, DragSource, DropOutcome, DropPlan};
pub use editor::{EditorAction, EditorState};
pub use export::{export_contents, export_json, ExportError};
pub use list::BlockList;
pub use palette::{display_name, palette_entry, PaletteEntry, PALETTE};
pub use patch::{fields_for, panel_title, BlockPatch, FieldControl, FieldKey, PropertyField};
pub use preview::{block_count_label, preview_for, BlockPreview};
