//! Undo/redo history of whole-grid snapshots
//!
//! Every [`Action`] stores the grid as it was before and after one paint
//! stroke. Undo and redo overwrite all 1024 cells at once.

use std::collections::VecDeque;

use crate::TileGrid;

/// Default number of undo steps kept before the oldest is evicted
pub const DEFAULT_HISTORY_LIMIT: usize = 25;

/// One undoable grid mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    pub old_tiles: TileGrid,
    pub new_tiles: TileGrid,
}

impl Action {
    pub fn new(old_tiles: TileGrid, new_tiles: TileGrid) -> Self {
        Self {
            old_tiles,
            new_tiles,
        }
    }

    /// Whether applying this action changes anything
    pub fn is_noop(&self) -> bool {
        self.old_tiles == self.new_tiles
    }
}

/// Linear undo/redo history.
///
/// `push_undo` only appends to the undo stack. The redo stack is filled by
/// [`ActionStack::undo`] and drained by [`ActionStack::redo`], [`ActionStack::clear`]
/// or an explicit [`ActionStack::discard_redo`].
#[derive(Debug, Clone)]
pub struct ActionStack {
    undo_stack: VecDeque<Action>,
    redo_stack: VecDeque<Action>,
    /// Maximum entries per stack, `None` for unbounded
    limit: Option<usize>,
}

impl Default for ActionStack {
    fn default() -> Self {
        Self::bounded(DEFAULT_HISTORY_LIMIT)
    }
}

impl ActionStack {
    /// History that evicts its oldest entry once `limit` actions are stored.
    /// A limit of zero means unbounded.
    pub fn bounded(limit: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: VecDeque::new(),
            limit: (limit > 0).then_some(limit),
        }
    }

    pub fn unbounded() -> Self {
        Self::bounded(0)
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Change the capacity, evicting the oldest entries if the stacks are now too long
    pub fn set_limit(&mut self, limit: usize) {
        self.limit = (limit > 0).then_some(limit);
        if let Some(limit) = self.limit {
            while self.undo_stack.len() > limit {
                self.undo_stack.pop_front();
            }
            while self.redo_stack.len() > limit {
                self.redo_stack.pop_front();
            }
        }
    }

    /// Drop all history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        log::debug!("Action history cleared");
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    /// Append an action to the undo stack
    pub fn push_undo(&mut self, action: Action) {
        Self::push_bounded(&mut self.undo_stack, action, self.limit);
    }

    /// Forget the redo history
    pub fn discard_redo(&mut self) {
        self.redo_stack.clear();
    }

    /// Restore the previous grid state. Returns `false` when there is nothing to undo.
    pub fn undo(&mut self, grid: &mut TileGrid) -> bool {
        let Some(action) = self.undo_stack.pop_back() else {
            return false;
        };
        grid.replace_with(&action.old_tiles);
        Self::push_bounded(&mut self.redo_stack, action, self.limit);
        log::debug!(
            "Undo ({} undo / {} redo left)",
            self.undo_stack.len(),
            self.redo_stack.len()
        );
        true
    }

    /// Re-apply the most recently undone action. Returns `false` when there is nothing to redo.
    pub fn redo(&mut self, grid: &mut TileGrid) -> bool {
        let Some(action) = self.redo_stack.pop_back() else {
            return false;
        };
        grid.replace_with(&action.new_tiles);
        Self::push_bounded(&mut self.undo_stack, action, self.limit);
        log::debug!(
            "Redo ({} undo / {} redo left)",
            self.undo_stack.len(),
            self.redo_stack.len()
        );
        true
    }

    fn push_bounded(stack: &mut VecDeque<Action>, action: Action, limit: Option<usize>) {
        stack.push_back(action);
        if let Some(limit) = limit {
            while stack.len() > limit {
                stack.pop_front();
            }
        }
    }
}
