use crate::terminal::KeyEvent;
use crate::widgets::traits::TextAction;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Exit,
    Cancel,
    NextFocus,
    PrevFocus,
    SubmitForm,
    EditForm,
    Save,
    Load,
    InputKey(KeyEvent),
    TextAction(TextAction),
    Tick,
    Noop,
}
