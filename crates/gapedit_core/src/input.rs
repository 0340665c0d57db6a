//! Normalized user intents and the pointer gesture state machine.

/// Commands consumed by [`crate::Editor::apply`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditorCommand {
    InsertChar(char),
    InsertText(String),
    InsertNewline,
    InsertTab,
    Backspace,
    DeleteForward,
    MoveLeft { select: bool },
    MoveRight { select: bool },
    MoveUp { select: bool },
    MoveDown { select: bool },
    MoveTo { index: usize, select: bool },
    SelectAll,
    Deselect,
    Copy,
    Cut,
    Paste(String),
}

impl EditorCommand {
    /// Returns true when the command replaces an active selection.
    pub fn consumes_selection(&self) -> bool {
        matches!(
            self,
            Self::InsertChar(_)
                | Self::InsertText(_)
                | Self::InsertNewline
                | Self::InsertTab
                | Self::Backspace
                | Self::DeleteForward
                | Self::Cut
                | Self::Paste(_)
        )
    }
}

/// Keys handled while the search prompt is open.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchKey {
    Enter,
    F3 { shift: bool },
    Escape,
    Backspace,
    Char(char),
}

/// Mouse gesture phase for the text area and scrollbar.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PointerState {
    #[default]
    Idle,
    Pressed,
    Dragging,
    ScrollbarDragging,
}

/// Where a press landed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PressTarget {
    /// Logical index under the pointer in the text area.
    Text(usize),
    Scrollbar,
    /// Outside anything interactive (buttons, menus, margins).
    Elsewhere,
}

/// Selection effect the host should apply for a pointer transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerAction {
    /// Move the cursor and anchor a fresh selection there.
    PlaceAnchor(usize),
    /// Move the cursor, keeping the current anchor.
    ExtendTo(usize),
    None,
}

impl PointerState {
    /// Transition on a button press.
    pub fn press(&mut self, target: PressTarget) -> PointerAction {
        match target {
            PressTarget::Text(index) => {
                *self = Self::Pressed;
                PointerAction::PlaceAnchor(index)
            }
            PressTarget::Scrollbar => {
                *self = Self::ScrollbarDragging;
                PointerAction::None
            }
            PressTarget::Elsewhere => PointerAction::None,
        }
    }

    /// Transition on pointer motion; `index` is the text position under it.
    pub fn drag(&mut self, index: Option<usize>) -> PointerAction {
        match (*self, index) {
            (Self::Pressed | Self::Dragging, Some(index)) => {
                *self = Self::Dragging;
                PointerAction::ExtendTo(index)
            }
            _ => PointerAction::None,
        }
    }

    /// Transition on button release.
    pub fn release(&mut self) {
        *self = Self::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn destructive_commands_consume_selection() {
        let destructive = [
            EditorCommand::InsertChar('x'),
            EditorCommand::InsertNewline,
            EditorCommand::Backspace,
            EditorCommand::DeleteForward,
            EditorCommand::Cut,
            EditorCommand::Paste("p".to_string()),
        ];
        for command in destructive {
            assert!(command.consumes_selection(), "{:?}", command);
        }
        assert!(!EditorCommand::Copy.consumes_selection());
        assert!(!EditorCommand::MoveLeft { select: true }.consumes_selection());
        assert!(!EditorCommand::SelectAll.consumes_selection());
    }

    #[test]
    fn text_press_drag_release_cycle() {
        let mut state = PointerState::default();
        assert_eq!(state.press(PressTarget::Text(4)), PointerAction::PlaceAnchor(4));
        assert_eq!(state, PointerState::Pressed);
        assert_eq!(state.drag(Some(9)), PointerAction::ExtendTo(9));
        assert_eq!(state, PointerState::Dragging);
        assert_eq!(state.drag(None), PointerAction::None);
        state.release();
        assert_eq!(state, PointerState::Idle);
        assert_eq!(state.drag(Some(2)), PointerAction::None);
    }

    #[test]
    fn scrollbar_drag_never_touches_selection() {
        let mut state = PointerState::default();
        assert_eq!(state.press(PressTarget::Scrollbar), PointerAction::None);
        assert_eq!(state.drag(Some(3)), PointerAction::None);
        assert_eq!(state, PointerState::ScrollbarDragging);
        state.release();
        assert_eq!(state.press(PressTarget::Elsewhere), PointerAction::None);
        assert_eq!(state, PointerState::Idle);
    }
}
