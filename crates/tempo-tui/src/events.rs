//! Key bindings and the action vocabulary.

use crate::backend::KeyInput;

/// Everything the event loop can be asked to do. Interpreted by the single
/// dispatch switch in [`crate::update::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Mark,
    Undo,
    NextFormat,
    PrevFormat,
    ToggleVerbose,
    Quit,
    /// New terminal size as (cols, rows).
    Resize(u16, u16),
    /// Keepalive tick; no state change, lets the runtime redraw.
    Idle,
}

/// Maps an input to its bound action. `None` means unbound: ignored.
pub fn action_for(input: KeyInput) -> Option<Action> {
    match input {
        KeyInput::Enter => Some(Action::Mark),
        KeyInput::CtrlC => Some(Action::Quit),
        KeyInput::Resize(cols, rows) => Some(Action::Resize(cols, rows)),
        KeyInput::Char(c) => match c {
            ' ' | 'j' | 'n' | 'm' => Some(Action::Mark),
            'u' | 'k' | 'p' => Some(Action::Undo),
            '/' | 'y' => Some(Action::NextFormat),
            'Y' | '?' => Some(Action::PrevFormat),
            'v' => Some(Action::ToggleVerbose),
            'q' => Some(Action::Quit),
            _ => None,
        },
        KeyInput::Other => None,
    }
}
