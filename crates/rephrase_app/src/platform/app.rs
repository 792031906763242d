use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use rephrase_core::{update, AppState, Effect, Msg, Status};
use rephrase_engine::EngineHandle;
use rephrase_logging::{clear_session_tag, rephrase_info, rephrase_warn, set_session_tag};

use super::effects::EffectRunner;
use super::keymap::{self, Action, Focus};
use super::terminal::{self, Tui};
use super::ui;
use crate::config::AppConfig;

/// How long to wait for terminal input before draining engine events again.
const TICK: Duration = Duration::from_millis(50);
/// Upper bound on waiting for an in-flight job request after quit.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

pub fn run_app(config: AppConfig) -> Result<()> {
    rephrase_info!("Starting rephrase client against {}", config.client.base_url);
    let engine = EngineHandle::new(config.client).context("Failed to create HTTP client")?;
    let mut app = App::new(AppState::with_styles(config.styles), EffectRunner::new(engine));

    terminal::install_panic_hook();
    let mut tui = terminal::setup_terminal()?;
    let result = app.run(&mut tui);
    terminal::restore_terminal()?;
    // Joins the engine thread, which lets pending cancel calls finish.
    drop(app);
    result
}

struct App {
    state: AppState,
    focus: Focus,
    runner: EffectRunner,
    needs_redraw: bool,
}

impl App {
    fn new(state: AppState, runner: EffectRunner) -> Self {
        Self {
            state,
            focus: Focus::Input,
            runner,
            needs_redraw: true,
        }
    }

    fn run(&mut self, tui: &mut Tui) -> Result<()> {
        self.runner.run(vec![Effect::CheckHealth]);

        while !self.state.should_quit() {
            for msg in self.runner.poll_messages() {
                self.dispatch_msg(msg);
            }

            if self.state.consume_dirty() || self.needs_redraw {
                let view = self.state.view();
                let focus = self.focus;
                tui.draw(|frame| ui::render::render(frame, &view, focus))?;
                self.needs_redraw = false;
            }

            if event::poll(TICK)? {
                self.handle_terminal_event(event::read()?);
            } else {
                self.dispatch_msg(Msg::Tick);
            }
        }
        self.drain_after_quit();
        Ok(())
    }

    /// A job request still in flight at quit may yet return a session that
    /// must be cancelled; give it a bounded chance to arrive.
    fn drain_after_quit(&mut self) {
        let deadline = Instant::now() + SHUTDOWN_GRACE;
        while self.state.status() == Status::Processing {
            if Instant::now() >= deadline {
                rephrase_warn!("Quitting before the backend answered the job request");
                return;
            }
            for msg in self.runner.poll_messages() {
                self.dispatch_msg(msg);
            }
            thread::sleep(TICK);
        }
    }

    fn handle_terminal_event(&mut self, event: Event) {
        let view = self.state.view();
        let action = match event {
            Event::Key(key) => keymap::map_key(key, self.focus, &view),
            Event::Paste(text) => keymap::map_paste(&text, self.focus, &view),
            Event::Resize(..) => {
                self.needs_redraw = true;
                Action::Ignore
            }
            _ => Action::Ignore,
        };

        match action {
            Action::Dispatch(msg) => self.dispatch_msg(msg),
            Action::FocusNext => self.set_focus(self.focus.next(view.outputs.len())),
            Action::FocusPrev => self.set_focus(self.focus.prev(view.outputs.len())),
            Action::Ignore => {}
        }
    }

    fn dispatch_msg(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;

        match self.state.session() {
            Some(session_id) => set_session_tag(session_id.as_str()),
            None => clear_session_tag(),
        }
        self.runner.run(effects);
    }

    fn set_focus(&mut self, focus: Focus) {
        if self.focus != focus {
            self.focus = focus;
            self.needs_redraw = true;
        }
    }
}
