use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use rephrase_core::{AppViewModel, Msg};

/// Which part of the screen receives plain key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Input,
    Output(usize),
}

impl Focus {
    pub fn next(self, outputs: usize) -> Self {
        match self {
            Focus::Input if outputs > 0 => Focus::Output(0),
            Focus::Output(idx) if idx + 1 < outputs => Focus::Output(idx + 1),
            _ => Focus::Input,
        }
    }

    pub fn prev(self, outputs: usize) -> Self {
        match self {
            Focus::Input if outputs > 0 => Focus::Output(outputs - 1),
            Focus::Output(0) | Focus::Input => Focus::Input,
            Focus::Output(idx) => Focus::Output(idx - 1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Dispatch(Msg),
    FocusNext,
    FocusPrev,
    Ignore,
}

pub fn map_key(key: KeyEvent, focus: Focus, view: &AppViewModel) -> Action {
    if key.kind != KeyEventKind::Press {
        return Action::Ignore;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Action::Dispatch(Msg::QuitRequested),
            KeyCode::Char('r') => Action::Dispatch(Msg::SubmitClicked),
            KeyCode::Char('x') => Action::Dispatch(Msg::CancelClicked),
            KeyCode::Char('l') => Action::Dispatch(Msg::ClearAllOutputs),
            KeyCode::Char('u') => Action::Dispatch(Msg::ClearInput),
            _ => Action::Ignore,
        };
    }

    match key.code {
        KeyCode::Esc => Action::Dispatch(Msg::QuitRequested),
        KeyCode::Tab => Action::FocusNext,
        KeyCode::BackTab => Action::FocusPrev,
        _ => match focus {
            Focus::Input => map_input_key(key, view),
            Focus::Output(idx) => map_output_key(key, idx, view),
        },
    }
}

pub fn map_paste(text: &str, focus: Focus, view: &AppViewModel) -> Action {
    if focus != Focus::Input || text.is_empty() {
        return Action::Ignore;
    }
    edit_input(view, |input| input.push_str(&text.replace("\r\n", "\n")))
}

fn map_input_key(key: KeyEvent, view: &AppViewModel) -> Action {
    match key.code {
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::ALT) => {
            edit_input(view, |input| input.push(ch))
        }
        KeyCode::Enter => edit_input(view, |input| input.push('\n')),
        KeyCode::Backspace => edit_input(view, |input| {
            input.pop();
        }),
        _ => Action::Ignore,
    }
}

fn map_output_key(key: KeyEvent, idx: usize, view: &AppViewModel) -> Action {
    let Some(output) = view.outputs.get(idx) else {
        return Action::Ignore;
    };
    let style = output.key.clone();
    match key.code {
        KeyCode::Char('c') => Action::Dispatch(Msg::CopyOutput { style }),
        KeyCode::Char('d') => Action::Dispatch(Msg::ClearOutput { style }),
        _ => Action::Ignore,
    }
}

fn edit_input(view: &AppViewModel, edit: impl FnOnce(&mut String)) -> Action {
    if !view.input_enabled {
        return Action::Ignore;
    }
    let mut input = view.input.clone();
    edit(&mut input);
    Action::Dispatch(Msg::InputChanged(input))
}
