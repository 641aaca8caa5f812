//! Modal stack for managing overlays
//!
//! Dialogs drawn on top of the table form a stack; only the top modal
//! receives input events.

/// Represents a modal overlay that can be displayed on top of the table
#[derive(Debug, Clone, PartialEq)]
pub enum Modal {
    /// Quit confirmation dialog
    QuitConfirm,
    /// Page size selector
    PageSize,
    /// Help dialog showing all keyboard shortcuts
    Help,
}

/// A stack of modal overlays
#[derive(Debug, Default)]
pub struct ModalStack {
    stack: Vec<Modal>,
}

impl ModalStack {
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    pub fn push(&mut self, modal: Modal) {
        self.stack.push(modal);
    }

    pub fn pop(&mut self) -> Option<Modal> {
        self.stack.pop()
    }

    /// Get a reference to the top modal without removing it
    pub fn top(&self) -> Option<&Modal> {
        self.stack.last()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Push `modal`, or pop it when it is already on top
    pub fn toggle(&mut self, modal: Modal) {
        if self.top() == Some(&modal) {
            self.stack.pop();
        } else {
            self.stack.push(modal);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modal_stack_push_pop() {
        let mut stack = ModalStack::new();
        assert!(stack.top().is_none());

        stack.push(Modal::QuitConfirm);
        stack.push(Modal::Help);

        assert_eq!(stack.pop(), Some(Modal::Help));
        assert_eq!(stack.pop(), Some(Modal::QuitConfirm));
        assert!(stack.is_empty());
    }

    #[test]
    fn test_modal_stack_toggle() {
        let mut stack = ModalStack::new();
        stack.toggle(Modal::Help);
        assert_eq!(stack.top(), Some(&Modal::Help));

        stack.toggle(Modal::PageSize);
        assert_eq!(stack.top(), Some(&Modal::PageSize));

        stack.toggle(Modal::PageSize);
        assert_eq!(stack.top(), Some(&Modal::Help));
    }
}
