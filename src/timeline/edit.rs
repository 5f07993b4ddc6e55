//! Cut/undo/redo toolbar actions.
//!
//! There is no edit history: the actions only log and track which buttons
//! are enabled.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditActions {
    can_undo: bool,
    can_redo: bool,
}

impl EditActions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cut(&mut self) {
        log::info!("Timeline cut action performed");
        self.can_undo = true;
    }

    /// Returns `false` when undo is not available
    pub fn undo(&mut self) -> bool {
        if !self.can_undo {
            return false;
        }
        log::info!("Timeline undo action performed");
        self.can_redo = true;
        true
    }

    /// Returns `false` when redo is not available
    pub fn redo(&mut self) -> bool {
        if !self.can_redo {
            return false;
        }
        log::info!("Timeline redo action performed");
        true
    }

    pub fn can_undo(&self) -> bool {
        self.can_undo
    }

    pub fn can_redo(&self) -> bool {
        self.can_redo
    }
}
