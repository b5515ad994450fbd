use crate::block::{BlockId, BlockKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragSource {
    Palette(BlockKind),
    Existing(usize),
}

/// What a drop resolved to, before the list is touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropPlan {
    Insert { kind: BlockKind, at: Option<usize> },
    Move { from: usize, to: usize },
    Unchanged,
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    Inserted(BlockId),
    Moved { from: usize, to: usize },
    Unchanged,
    Ignored,
}

impl DropOutcome {
    pub fn mutated(&self) -> bool {
        matches!(self, DropOutcome::Inserted(_) | DropOutcome::Moved { .. })
    }
}

/// idle -> dragging(palette | existing) -> dropped | cancelled -> idle.
///
/// The candidate is an insertion point into the list as it was when the drag
/// started: `i` means "before block `i`", `len` means "after the last block".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragController {
    source: Option<DragSource>,
    candidate: Option<usize>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn candidate(&self) -> Option<usize> {
        self.candidate
    }

    pub fn is_dragging(&self) -> bool {
        self.source.is_some()
    }

    pub fn begin_palette(&mut self, kind: BlockKind) {
        self.source = Some(DragSource::Palette(kind));
        self.candidate = None;
    }

    pub fn begin_existing(&mut self, index: usize) {
        self.source = Some(DragSource::Existing(index));
        self.candidate = None;
    }

    /// Records the insertion point under the pointer, clamped to `[0, len]`.
    /// Returns `true` if the candidate changed.
    pub fn drag_over(&mut self, index: usize, len: usize) -> bool {
        let next = Some(index.min(len));
        if self.candidate == next {
            return false;
        }
        self.candidate = next;
        true
    }

    /// Pointer is over the canvas but not over a block or the end zone.
    pub fn clear_candidate(&mut self) -> bool {
        self.candidate.take().is_some()
    }

    pub fn cancel(&mut self) -> bool {
        let was_active = self.source.is_some() || self.candidate.is_some();
        self.source = None;
        self.candidate = None;
        was_active
    }

    /// Resolves the drop and returns to idle whatever the result.
    pub fn finish(&mut self, len: usize) -> DropPlan {
        let source = self.source.take();
        let candidate = self.candidate.take().map(|index| index.min(len));
        match source {
            Some(DragSource::Palette(kind)) => DropPlan::Insert { kind, at: candidate },
            Some(DragSource::Existing(from)) => {
                let Some(target) = candidate else {
                    return DropPlan::Ignored;
                };
                if from >= len {
                    return DropPlan::Ignored;
                }
                let to = destination_index(from, target);
                if to == from {
                    DropPlan::Unchanged
                } else {
                    DropPlan::Move { from, to }
                }
            }
            None => DropPlan::Ignored,
        }
    }

    /// Resolves a drop on the canvas background. Palette blocks append;
    /// existing blocks stay where they are.
    pub fn finish_on_canvas(&mut self) -> DropPlan {
        self.candidate = None;
        match self.source.take() {
            Some(DragSource::Palette(kind)) => DropPlan::Insert { kind, at: None },
            Some(DragSource::Existing(_)) | None => DropPlan::Ignored,
        }
    }
}

/// Final index of a block taken from `from` and dropped at insertion point
/// `target`. Removing the source shifts every later gap down by one.
pub fn destination_index(from: usize, target: usize) -> usize {
    if target > from {
        target - 1
    } else {
        target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_drop_without_candidate_appends() {
        let mut drag = DragController::new();
        drag.begin_palette(BlockKind::Image);
        assert_eq!(
            drag.finish(3),
            DropPlan::Insert {
                kind: BlockKind::Image,
                at: None
            }
        );
        assert!(!drag.is_dragging());
        assert_eq!(drag.candidate(), None);
    }

    #[test]
    fn candidate_is_clamped() {
        let mut drag = DragController::new();
        drag.begin_palette(BlockKind::Section);
        assert!(drag.drag_over(99, 2));
        assert_eq!(drag.candidate(), Some(2));
        assert!(!drag.drag_over(2, 2));
    }

    #[test]
    fn existing_block_gaps_around_itself_are_noops() {
        for target in [1, 2] {
            let mut drag = DragController::new();
            drag.begin_existing(1);
            drag.drag_over(target, 3);
            assert_eq!(drag.finish(3), DropPlan::Unchanged);
        }
    }

    #[test]
    fn existing_block_moves_forward_and_back() {
        let mut drag = DragController::new();
        drag.begin_existing(0);
        drag.drag_over(3, 3);
        assert_eq!(drag.finish(3), DropPlan::Move { from: 0, to: 2 });

        drag.begin_existing(2);
        drag.drag_over(0, 3);
        assert_eq!(drag.finish(3), DropPlan::Move { from: 2, to: 0 });
    }

    #[test]
    fn existing_without_candidate_is_ignored() {
        let mut drag = DragController::new();
        drag.begin_existing(0);
        assert_eq!(drag.finish(2), DropPlan::Ignored);
    }

    #[test]
    fn stale_source_index_is_ignored() {
        let mut drag = DragController::new();
        drag.begin_existing(4);
        drag.drag_over(0, 2);
        assert_eq!(drag.finish(2), DropPlan::Ignored);
    }

    #[test]
    fn drop_while_idle_clears_candidate() {
        let mut drag = DragController::new();
        drag.drag_over(1, 2);
        assert_eq!(drag.finish(2), DropPlan::Ignored);
        assert_eq!(drag.candidate(), None);
    }

    #[test]
    fn canvas_drop_ignores_stale_candidate() {
        let mut drag = DragController::new();
        drag.begin_palette(BlockKind::Divider);
        drag.drag_over(0, 2);
        assert_eq!(
            drag.finish_on_canvas(),
            DropPlan::Insert {
                kind: BlockKind::Divider,
                at: None
            }
        );
        assert_eq!(drag, DragController::new());

        drag.begin_existing(2);
        drag.drag_over(0, 3);
        assert_eq!(drag.finish_on_canvas(), DropPlan::Ignored);
        assert_eq!(drag, DragController::new());
    }

    #[test]
    fn leaving_blocks_clears_candidate() {
        let mut drag = DragController::new();
        drag.begin_existing(0);
        assert!(!drag.clear_candidate());
        drag.drag_over(1, 2);
        assert!(drag.clear_candidate());
        assert_eq!(drag.candidate(), None);
        assert!(drag.is_dragging());
    }

    #[test]
    fn cancel_returns_to_idle() {
        let mut drag = DragController::new();
        assert!(!drag.cancel());
        drag.begin_existing(0);
        drag.drag_over(1, 2);
        assert!(drag.cancel());
        assert_eq!(drag, DragController::new());
    }
}
