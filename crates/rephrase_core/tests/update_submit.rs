use std::sync::Once;

use pretty_assertions::assert_eq;
use rephrase_core::{update, AppState, Effect, Msg, SessionId, Status, StreamEvent};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(rephrase_logging::initialize_for_tests);
}

fn submit(state: AppState, input: &str) -> (AppState, Vec<Effect>) {
    let (state, _) = update(state, Msg::InputChanged(input.to_string()));
    update(state, Msg::SubmitClicked)
}

#[test]
fn submit_starts_job_with_raw_text() {
    init_logging();
    let (mut state, effects) = submit(AppState::new(), "  Make me polite \n");

    assert_eq!(
        effects,
        vec![Effect::StartJob {
            text: "  Make me polite \n".to_string()
        }]
    );
    let view = state.view();
    assert_eq!(view.status, Status::Processing);
    assert!(!view.input_enabled);
    assert!(!view.can_cancel);
    assert_eq!(view.submit_label, "Processing…");
    assert_eq!(view.status_label, "Streaming…");
    assert!(state.consume_dirty());
}

#[test]
fn job_started_opens_exactly_one_stream() {
    init_logging();
    let (state, _) = submit(AppState::new(), "Hello world");
    let (state, effects) = update(
        state,
        Msg::JobStarted {
            session_id: SessionId::from("abc-123"),
        },
    );

    assert_eq!(
        effects,
        vec![Effect::OpenStream {
            session_id: SessionId::from("abc-123")
        }]
    );
    assert_eq!(state.status(), Status::Processing);
    assert_eq!(state.session(), Some(&SessionId::from("abc-123")));
    assert!(state.view().can_cancel);
}

#[test]
fn every_style_starts_empty_when_a_job_starts() {
    init_logging();
    let (state, _) = submit(AppState::new(), "first");
    let (state, _) = update(
        state,
        Msg::JobStarted {
            session_id: "s-1".into(),
        },
    );
    let mut state = state;
    for key in ["professional", "casual", "polite", "social"] {
        let (next, _) = update(
            state,
            Msg::Stream {
                session_id: "s-1".into(),
                event: StreamEvent::Delta {
                    style: key.to_string(),
                    delta: "old".to_string(),
                },
            },
        );
        state = next;
    }
    let (state, _) = update(
        state,
        Msg::Stream {
            session_id: "s-1".into(),
            event: StreamEvent::Done,
        },
    );

    let (state, effects) = update(state, Msg::SubmitClicked);
    assert_eq!(effects.len(), 1);
    assert!(state.view().outputs.iter().all(|out| out.text.is_empty()));
}

#[test]
fn empty_or_whitespace_input_never_starts_a_job() {
    init_logging();
    for input in ["", "   ", "\n\t \n"] {
        let (state, effects) = submit(AppState::new(), input);
        assert!(effects.is_empty(), "input {input:?} produced effects");
        assert_eq!(state.status(), Status::Idle);
        assert_eq!(state.view().status_label, "Idle");
    }
}

#[test]
fn submit_while_processing_is_noop() {
    init_logging();
    let (state, _) = submit(AppState::new(), "Hello");
    let (state, effects) = update(state, Msg::SubmitClicked);
    assert!(effects.is_empty());

    let (state, _) = update(
        state,
        Msg::JobStarted {
            session_id: "t-1".into(),
        },
    );
    let before = state.clone();
    let (state, effects) = update(state, Msg::SubmitClicked);
    assert!(effects.is_empty());
    assert_eq!(state, before);
}

#[test]
fn input_is_frozen_while_processing() {
    init_logging();
    let (state, _) = submit(AppState::new(), "Hello");
    let (state, _) = update(state, Msg::InputChanged("Hello there".to_string()));
    assert_eq!(state.input(), "Hello");
}

#[test]
fn job_start_failure_reverts_to_idle_without_stream() {
    init_logging();
    let (state, _) = update(
        AppState::new(),
        Msg::InputChanged("Boom".to_string()),
    );
    let (state, _) = update(state, Msg::ClearAllOutputs);
    let (state, start) = update(state, Msg::SubmitClicked);
    assert_eq!(start.len(), 1);

    let (state, effects) = update(
        state,
        Msg::JobStartFailed {
            reason: "http status 500".to_string(),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state.status(), Status::Idle);
    assert_eq!(state.session(), None);
    assert!(state.view().input_enabled);
    assert_eq!(state.input(), "Boom");
}

#[test]
fn late_session_after_quit_is_cancelled() {
    init_logging();
    let (state, _) = submit(AppState::new(), "Hello");
    let (state, effects) = update(state, Msg::QuitRequested);
    assert!(effects.is_empty());
    assert!(state.should_quit());

    let (state, effects) = update(
        state,
        Msg::JobStarted {
            session_id: "orphan".into(),
        },
    );
    assert_eq!(
        effects,
        vec![Effect::CancelJob {
            session_id: "orphan".into()
        }]
    );
    assert_eq!(state.session(), None);
    assert_eq!(state.status(), Status::Idle);
}

#[test]
fn unexpected_session_while_idle_is_cancelled() {
    init_logging();
    let (state, effects) = update(
        AppState::new(),
        Msg::JobStarted {
            session_id: "stray".into(),
        },
    );
    assert_eq!(
        effects,
        vec![Effect::CancelJob {
            session_id: "stray".into()
        }]
    );
    assert_eq!(state.status(), Status::Idle);
}
