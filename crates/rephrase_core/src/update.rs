use crate::{AppState, BackendHealth, Effect, Msg, StreamEvent, Status, ERROR_MARKER};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(text) => {
            // Input is disabled while a job runs.
            if state.status() == Status::Idle {
                state.set_input(text);
            }
            Vec::new()
        }
        Msg::SubmitClicked => {
            if state.status() != Status::Idle || state.input().trim().is_empty() {
                return (state, Vec::new());
            }
            let text = state.input().to_owned();
            state.begin_job();
            vec![Effect::StartJob { text }]
        }
        Msg::JobStarted { session_id } => {
            if state.job_pending() && !state.should_quit() {
                state.attach_session(session_id.clone());
                vec![Effect::OpenStream { session_id }]
            } else {
                // Nobody will read this session; stop the backend work.
                if state.job_pending() {
                    state.finish();
                }
                vec![Effect::CancelJob { session_id }]
            }
        }
        Msg::JobStartFailed { reason: _ } => {
            if state.job_pending() {
                state.finish();
            }
            Vec::new()
        }
        Msg::Stream { session_id, event } => {
            if !state.is_active_session(&session_id) {
                return (state, Vec::new());
            }
            match event {
                StreamEvent::Delta { style, delta } => {
                    if !delta.is_empty() {
                        state.append_output(&style, &delta);
                    }
                    Vec::new()
                }
                StreamEvent::StyleError { style, message } => {
                    state.append_output(&style, &format!("\n\n{ERROR_MARKER} {message}"));
                    Vec::new()
                }
                StreamEvent::Done | StreamEvent::Cancelled => close_session(&mut state),
            }
        }
        Msg::StreamFailed {
            session_id,
            reason: _,
        } => {
            if state.is_active_session(&session_id) {
                close_session(&mut state)
            } else {
                Vec::new()
            }
        }
        Msg::CancelClicked => match state.session().cloned() {
            Some(session_id) => {
                state.finish();
                vec![
                    Effect::CancelJob {
                        session_id: session_id.clone(),
                    },
                    Effect::CloseStream { session_id },
                ]
            }
            None => Vec::new(),
        },
        Msg::ClearAllOutputs => {
            state.clear_outputs();
            Vec::new()
        }
        Msg::ClearInput => {
            state.set_input(String::new());
            Vec::new()
        }
        Msg::ClearOutput { style } => {
            state.clear_output(&style);
            Vec::new()
        }
        Msg::CopyOutput { style } => match state.output(&style) {
            Some(text) => vec![Effect::CopyToClipboard {
                text: text.to_owned(),
            }],
            None => Vec::new(),
        },
        Msg::BackendHealth { reachable } => {
            state.set_health(if reachable {
                BackendHealth::Reachable
            } else {
                BackendHealth::Unreachable
            });
            Vec::new()
        }
        Msg::QuitRequested => {
            let effects = match state.session().cloned() {
                Some(_) => close_session(&mut state),
                None => Vec::new(),
            };
            state.request_quit();
            effects
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn close_session(state: &mut AppState) -> Vec<Effect> {
    match state.finish() {
        Some(session_id) => vec![Effect::CloseStream { session_id }],
        None => Vec::new(),
    }
}
