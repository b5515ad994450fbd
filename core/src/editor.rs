use crate::block::{Block, BlockId, BlockIdGen, BlockKind};
use crate::drag::{DragController, DropOutcome, DropPlan};
use crate::export::{export_json, ExportError};
use crate::list::BlockList;
use crate::patch::BlockPatch;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditorAction {
    AddBlock(BlockKind),
    Select(Option<BlockId>),
    DeleteBlock(BlockId),
    UpdateBlock { id: BlockId, patch: BlockPatch },
    UpdateSelected(BlockPatch),
    MoveBlock { from: usize, to: usize },
    BeginPaletteDrag(BlockKind),
    BeginBlockDrag(usize),
    DragOver(usize),
    DragOverCanvas,
    Drop,
    DropOnCanvas,
    CancelDrag,
}

/// Everything the editor shows. Transitions go through [`EditorState::apply`]
/// and report whether anything visible changed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditorState {
    blocks: BlockList,
    selected: Option<BlockId>,
    drag: DragController,
    json_output: String,
    ids: BlockIdGen,
}

impl EditorState {
    pub fn new(id_salt: u64) -> Self {
        Self {
            blocks: BlockList::new(),
            selected: None,
            drag: DragController::new(),
            json_output: String::new(),
            ids: BlockIdGen::new(id_salt),
        }
    }

    pub fn blocks(&self) -> &BlockList {
        &self.blocks
    }

    pub fn selected_id(&self) -> Option<&BlockId> {
        self.selected.as_ref()
    }

    pub fn selected_block(&self) -> Option<&Block> {
        self.selected.as_ref().and_then(|id| self.blocks.get(id))
    }

    pub fn drag(&self) -> &DragController {
        &self.drag
    }

    pub fn drop_target(&self) -> Option<usize> {
        self.drag.candidate()
    }

    pub fn json_output(&self) -> &str {
        &self.json_output
    }

    /// Text available for copying; `None` until JSON was generated.
    pub fn copy_text(&self) -> Option<&str> {
        if self.json_output.is_empty() {
            None
        } else {
            Some(&self.json_output)
        }
    }

    pub fn apply(&mut self, action: EditorAction) -> bool {
        match action {
            EditorAction::AddBlock(kind) => {
                self.add_block(kind);
                true
            }
            EditorAction::Select(id) => self.select(id),
            EditorAction::DeleteBlock(id) => self.delete_block(&id),
            EditorAction::UpdateBlock { id, patch } => self.blocks.update(&id, &patch),
            EditorAction::UpdateSelected(patch) => self.update_selected(&patch),
            EditorAction::MoveBlock { from, to } => self.blocks.move_block(from, to),
            EditorAction::BeginPaletteDrag(kind) => {
                self.drag.begin_palette(kind);
                true
            }
            EditorAction::BeginBlockDrag(index) => {
                if index >= self.blocks.len() {
                    return false;
                }
                self.drag.begin_existing(index);
                true
            }
            EditorAction::DragOver(index) => self.drag.drag_over(index, self.blocks.len()),
            EditorAction::DragOverCanvas => self.drag.clear_candidate(),
            EditorAction::Drop => {
                let had_candidate = self.drag.candidate().is_some();
                self.drop_dragged().mutated() || had_candidate
            }
            EditorAction::DropOnCanvas => {
                let had_candidate = self.drag.candidate().is_some();
                self.drop_on_canvas().mutated() || had_candidate
            }
            EditorAction::CancelDrag => self.drag.cancel(),
        }
    }

    /// Palette click: append and select.
    pub fn add_block(&mut self, kind: BlockKind) -> BlockId {
        let block = Block::new(kind, self.ids.next_id());
        let id = block.id.clone();
        self.blocks.push(block);
        self.selected = Some(id.clone());
        id
    }

    pub fn add_block_by_tag(&mut self, tag: &str) -> Option<BlockId> {
        BlockKind::from_tag(tag).map(|kind| self.add_block(kind))
    }

    pub fn select(&mut self, id: Option<BlockId>) -> bool {
        let id = id.filter(|id| self.blocks.contains(id));
        if self.selected == id {
            return false;
        }
        self.selected = id;
        true
    }

    pub fn delete_block(&mut self, id: &BlockId) -> bool {
        if self.blocks.remove(id).is_none() {
            return false;
        }
        if self.selected.as_ref() == Some(id) {
            self.selected = None;
        }
        true
    }

    pub fn update_selected(&mut self, patch: &BlockPatch) -> bool {
        let Some(id) = self.selected.clone() else {
            return false;
        };
        self.blocks.update(&id, patch)
    }

    /// Completes the current drag. The descriptor and candidate are cleared
    /// whatever the outcome.
    pub fn drop_dragged(&mut self) -> DropOutcome {
        let plan = self.drag.finish(self.blocks.len());
        self.carry_out(plan)
    }

    /// Drop on the canvas outside any block: palette blocks append, block
    /// moves are abandoned.
    pub fn drop_on_canvas(&mut self) -> DropOutcome {
        let plan = self.drag.finish_on_canvas();
        self.carry_out(plan)
    }

    fn carry_out(&mut self, plan: DropPlan) -> DropOutcome {
        match plan {
            DropPlan::Insert { kind, at } => {
                let block = Block::new(kind, self.ids.next_id());
                let id = block.id.clone();
                match at {
                    Some(index) => {
                        self.blocks.insert(index, block);
                    }
                    None => self.blocks.push(block),
                }
                self.selected = Some(id.clone());
                DropOutcome::Inserted(id)
            }
            DropPlan::Move { from, to } => {
                if self.blocks.move_block(from, to) {
                    DropOutcome::Moved { from, to }
                } else {
                    DropOutcome::Unchanged
                }
            }
            DropPlan::Unchanged => DropOutcome::Unchanged,
            DropPlan::Ignored => DropOutcome::Ignored,
        }
    }

    /// Materializes the export text. Returns `true` if it differs from the
    /// previously generated text.
    pub fn generate_json(&mut self) -> Result<bool, ExportError> {
        let next = export_json(&self.blocks)?;
        if next == self.json_output {
            return Ok(false);
        }
        self.json_output = next;
        Ok(true)
    }
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new(0)
    }
}
